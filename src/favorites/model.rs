use serde::{Deserialize, Serialize};

/// A (student, book) association. `id` is assigned by the record store and
/// immutable once set; the wire format uses camelCase field names while the
/// persisted columns stay snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub id: String,
    pub student_id: String,
    pub book_id: i32,
}

/// Payload for recording a new favorite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub student_id: String,
    pub book_id: i32,
}
