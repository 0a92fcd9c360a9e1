//! Favorites Module
//!
//! Tracks which books a student has marked as favorites. The module owns the
//! whole `/favorites` surface: the record model, the store contract and its
//! libsql implementation, the service layer, and the HTTP handlers/routes.
//!
//! Duplicate favorites are suppressed at the store: the schema carries a
//! uniqueness constraint on (student_id, book_id), so adding a pair the
//! student already has hands back the existing record instead of creating a
//! second one.

mod handler;
mod model;
mod routes;
mod service;
mod store;

pub use model::{FavoriteRecord, NewFavorite};
pub use routes::routes;
pub use service::FavoriteService;
pub use store::{FavoriteStore, LibsqlFavoriteStore};

/// Returns the migrations for the favorites module, run during startup by
/// [`crate::db::Database`].
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "favorites_001_schema.sql",
        include_str!("migrations/001_favorites.sql"),
    )]
}
