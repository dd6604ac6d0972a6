//! Remote user directory: record model, client trait and the HTTP adapter.
//!
pub mod http;
pub mod model;

use async_trait::async_trait;

use crate::error::ApiError;
pub use http::HttpUserApi;
pub use model::{Address, Company, User, UserId};

/// The four operations the directory offers. The client keeps no state between calls.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<User>, ApiError>;

    /// Fetch a single record.
    async fn get(&self, id: &UserId) -> Result<User, ApiError>;

    /// Create a record and return the server's representation of it.
    async fn create(&self, user: &User) -> Result<User, ApiError>;

    /// Replace the record named by `user.id`; fails with `MissingId` when unset.
    async fn update(&self, user: &User) -> Result<User, ApiError>;

    /// Remove a record. Any 2xx response counts as success.
    async fn delete(&self, id: &UserId) -> Result<(), ApiError>;
}
