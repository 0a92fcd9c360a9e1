use async_trait::async_trait;
use libsql::Connection;
use uuid::Uuid;

use super::model::{FavoriteRecord, NewFavorite};
use crate::error::{StoreError, StoreResult};

/// Persistence contract for favorite records.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Persists a new record, assigning its id. Inserting a (student, book)
    /// pair that is already stored returns the existing record untouched.
    async fn insert(&self, new: NewFavorite) -> StoreResult<FavoriteRecord>;

    /// Returns all records for a student, order unspecified.
    async fn find_by_student(&self, student_id: &str) -> StoreResult<Vec<FavoriteRecord>>;

    async fn exists_by_student_and_book(
        &self,
        student_id: &str,
        book_id: i32,
    ) -> StoreResult<bool>;

    /// Removes the matching record if present. Removing an absent pair is a
    /// no-op, not an error.
    async fn delete_by_student_and_book(&self, student_id: &str, book_id: i32) -> StoreResult<()>;
}

pub struct LibsqlFavoriteStore {
    conn: Connection,
}

impl LibsqlFavoriteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

fn row_to_record(row: &libsql::Row) -> StoreResult<FavoriteRecord> {
    Ok(FavoriteRecord {
        id: row.get(0).map_err(malformed)?,
        student_id: row.get(1).map_err(malformed)?,
        book_id: row.get(2).map_err(malformed)?,
    })
}

fn malformed(e: libsql::Error) -> StoreError {
    StoreError::Malformed(e.to_string())
}

#[async_trait]
impl FavoriteStore for LibsqlFavoriteStore {
    async fn insert(&self, new: NewFavorite) -> StoreResult<FavoriteRecord> {
        let insert = r#"
            INSERT INTO favorites (id, student_id, book_id)
            VALUES (?, ?, ?)
            ON CONFLICT (student_id, book_id) DO NOTHING
            RETURNING id, student_id, book_id
        "#;

        let id = Uuid::new_v4().to_string();
        let mut rows = self
            .conn
            .query(insert, libsql::params![id, new.student_id.as_str(), new.book_id])
            .await?;

        if let Some(row) = rows.next().await? {
            return row_to_record(&row);
        }

        // Conflict path: the pair is already stored, hand that record back.
        let select = r#"
            SELECT id, student_id, book_id FROM favorites
            WHERE student_id = ? AND book_id = ?
        "#;
        let mut rows = self
            .conn
            .query(select, libsql::params![new.student_id, new.book_id])
            .await?;

        match rows.next().await? {
            Some(row) => row_to_record(&row),
            None => Err(StoreError::Malformed(
                "insert returned no row and no existing record was found".to_string(),
            )),
        }
    }

    async fn find_by_student(&self, student_id: &str) -> StoreResult<Vec<FavoriteRecord>> {
        let query = "SELECT id, student_id, book_id FROM favorites WHERE student_id = ?";
        let mut rows = self.conn.query(query, libsql::params![student_id]).await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    async fn exists_by_student_and_book(
        &self,
        student_id: &str,
        book_id: i32,
    ) -> StoreResult<bool> {
        let query = "SELECT 1 FROM favorites WHERE student_id = ? AND book_id = ? LIMIT 1";
        let mut rows = self
            .conn
            .query(query, libsql::params![student_id, book_id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn delete_by_student_and_book(&self, student_id: &str, book_id: i32) -> StoreResult<()> {
        let query = "DELETE FROM favorites WHERE student_id = ? AND book_id = ?";
        self.conn
            .execute(query, libsql::params![student_id, book_id])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        Database::open_local(":memory:").await.expect("in-memory database")
    }

    #[tokio::test]
    async fn insert_assigns_an_id() {
        let db = test_db().await;
        let store = LibsqlFavoriteStore::new(db.connection().clone());

        let record = store
            .insert(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .expect("should insert favorite");

        assert!(!record.id.is_empty());
        assert_eq!("u1", record.student_id);
        assert_eq!(42, record.book_id);
    }

    #[tokio::test]
    async fn insert_duplicate_pair_returns_existing_record() {
        let db = test_db().await;
        let store = LibsqlFavoriteStore::new(db.connection().clone());

        let first = store
            .insert(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .expect("should insert favorite");
        let second = store
            .insert(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .expect("duplicate insert should not error");

        assert_eq!(first, second);
        let records = store.find_by_student("u1").await.expect("should list favorites");
        assert_eq!(1, records.len());
    }

    #[tokio::test]
    async fn find_by_student_only_returns_that_students_records() {
        let db = test_db().await;
        let store = LibsqlFavoriteStore::new(db.connection().clone());

        store
            .insert(NewFavorite { student_id: "u1".to_string(), book_id: 1 })
            .await
            .unwrap();
        store
            .insert(NewFavorite { student_id: "u1".to_string(), book_id: 2 })
            .await
            .unwrap();
        store
            .insert(NewFavorite { student_id: "u2".to_string(), book_id: 3 })
            .await
            .unwrap();

        let records = store.find_by_student("u1").await.expect("should list favorites");
        assert_eq!(2, records.len());
        assert!(records.iter().all(|r| r.student_id == "u1"));

        let none = store.find_by_student("u3").await.expect("should list favorites");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn exists_tracks_insert_and_delete() {
        let db = test_db().await;
        let store = LibsqlFavoriteStore::new(db.connection().clone());

        assert!(!store.exists_by_student_and_book("u1", 42).await.unwrap());

        store
            .insert(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .unwrap();
        assert!(store.exists_by_student_and_book("u1", 42).await.unwrap());

        store.delete_by_student_and_book("u1", 42).await.unwrap();
        assert!(!store.exists_by_student_and_book("u1", 42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_of_absent_pair_is_a_noop() {
        let db = test_db().await;
        let store = LibsqlFavoriteStore::new(db.connection().clone());

        store
            .delete_by_student_and_book("u1", 42)
            .await
            .expect("deleting a non-existent pair should not error");
    }
}
