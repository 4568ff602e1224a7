//! User record storage.
//!
//! Records are keyed by wallet address. Backends are async so a remote
//! document store can sit behind the same trait as the in-memory one.

mod memory;

pub use memory::MemoryUserStore;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub credits: u32,
    pub wallet_address: String,
}

/// Fields for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub wallet_address: String,
    pub credits: u32,
}

/// Trait for user record backends.
pub trait UserStore: Send + Sync {
    /// Look up the user owning a wallet address.
    fn get_by_address(&self, address: &str) -> BoxFuture<'_, StoreResult<Option<UserRecord>>>;

    /// Store a new user and return the record with its assigned id.
    fn create(&self, user: NewUser) -> BoxFuture<'_, StoreResult<UserRecord>>;

    /// Overwrite the credit balance of an existing user.
    fn update_credits(&self, id: &str, credits: u32) -> BoxFuture<'_, StoreResult<()>>;
}
