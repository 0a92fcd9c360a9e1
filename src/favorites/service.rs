use std::sync::Arc;

use super::model::{FavoriteRecord, NewFavorite};
use super::store::FavoriteStore;
use crate::error::StoreResult;

/// Business layer for favorite records. Holds the store it was constructed
/// with; every read and write goes through it, and nothing is cached or
/// retained beyond a single call.
pub struct FavoriteService {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteService {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// Records a favorite. Adding a pair the student already has is
    /// suppressed by the store's uniqueness constraint; the stored record is
    /// returned in both branches.
    pub async fn add_favorite(&self, new: NewFavorite) -> StoreResult<FavoriteRecord> {
        self.store.insert(new).await
    }

    /// Removes a favorite. Idempotent.
    pub async fn remove_favorite(&self, student_id: &str, book_id: i32) -> StoreResult<()> {
        self.store.delete_by_student_and_book(student_id, book_id).await
    }

    pub async fn favorites_by_student(&self, student_id: &str) -> StoreResult<Vec<FavoriteRecord>> {
        self.store.find_by_student(student_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::favorites::LibsqlFavoriteStore;

    async fn test_service() -> (FavoriteService, Database) {
        let db = Database::open_local(":memory:").await.expect("in-memory database");
        let store = LibsqlFavoriteStore::new(db.connection().clone());
        (FavoriteService::new(Arc::new(store)), db)
    }

    #[tokio::test]
    async fn add_favorite_creates_one_retrievable_record() {
        let (service, _db) = test_service().await;

        let record = service
            .add_favorite(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .expect("should add favorite");
        assert!(!record.id.is_empty());

        let records = service.favorites_by_student("u1").await.expect("should list");
        assert_eq!(vec![record], records);
    }

    #[tokio::test]
    async fn sequential_duplicate_adds_store_one_record() {
        let (service, _db) = test_service().await;

        service
            .add_favorite(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .expect("should add favorite");
        let second = service
            .add_favorite(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .expect("duplicate add should not error");

        assert_eq!("u1", second.student_id);
        assert_eq!(42, second.book_id);

        let records = service.favorites_by_student("u1").await.expect("should list");
        assert_eq!(1, records.len());
        assert_eq!(42, records[0].book_id);
    }

    #[tokio::test]
    async fn remove_favorite_makes_record_absent() {
        let (service, _db) = test_service().await;

        service
            .add_favorite(NewFavorite { student_id: "u1".to_string(), book_id: 42 })
            .await
            .unwrap();
        service.remove_favorite("u1", 42).await.expect("should remove favorite");

        let records = service.favorites_by_student("u1").await.expect("should list");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn remove_of_absent_favorite_is_a_noop() {
        let (service, _db) = test_service().await;

        service
            .remove_favorite("u1", 42)
            .await
            .expect("removing a non-existent favorite should not error");
    }

    #[tokio::test]
    async fn listing_for_unknown_student_is_empty() {
        let (service, _db) = test_service().await;

        let records = service.favorites_by_student("nobody").await.expect("should list");
        assert!(records.is_empty());
    }
}
