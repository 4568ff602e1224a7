//! In-memory user store.

use super::{BoxFuture, NewUser, StoreError, StoreResult, UserRecord, UserStore};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory user store for tests and offline use.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(e: impl std::fmt::Display) -> StoreError {
        StoreError::Other(format!("Lock error: {}", e))
    }
}

impl UserStore for MemoryUserStore {
    fn get_by_address(&self, address: &str) -> BoxFuture<'_, StoreResult<Option<UserRecord>>> {
        let address = address.to_string();
        Box::pin(async move {
            let users = self.users.read().map_err(Self::lock_error)?;
            Ok(users
                .values()
                .find(|user| user.wallet_address == address)
                .cloned())
        })
    }

    fn create(&self, user: NewUser) -> BoxFuture<'_, StoreResult<UserRecord>> {
        Box::pin(async move {
            let mut users = self.users.write().map_err(Self::lock_error)?;
            if users
                .values()
                .any(|existing| existing.wallet_address == user.wallet_address)
            {
                return Err(StoreError::AlreadyExists(user.wallet_address));
            }
            let record = UserRecord {
                id: uuid::Uuid::new_v4().to_string(),
                credits: user.credits,
                wallet_address: user.wallet_address,
            };
            users.insert(record.id.clone(), record.clone());
            Ok(record)
        })
    }

    fn update_credits(&self, id: &str, credits: u32) -> BoxFuture<'_, StoreResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut users = self.users.write().map_err(Self::lock_error)?;
            let user = users.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            user.credits = credits;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    fn new_user(address: &str) -> NewUser {
        NewUser {
            wallet_address: address.to_string(),
            credits: 3,
        }
    }

    #[test]
    fn test_create_and_lookup() {
        let store = MemoryUserStore::new();
        let created = block_on(store.create(new_user("wallet-a"))).unwrap();
        assert_eq!(created.credits, 3);
        assert!(!created.id.is_empty());

        let found = block_on(store.get_by_address("wallet-a")).unwrap();
        assert_eq!(found, Some(created));
    }

    #[test]
    fn test_lookup_missing() {
        let store = MemoryUserStore::new();
        assert_eq!(block_on(store.get_by_address("nobody")).unwrap(), None);
    }

    #[test]
    fn test_duplicate_address() {
        let store = MemoryUserStore::new();
        block_on(store.create(new_user("wallet-a"))).unwrap();
        let result = block_on(store.create(new_user("wallet-a")));
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[test]
    fn test_update_credits() {
        let store = MemoryUserStore::new();
        let user = block_on(store.create(new_user("wallet-a"))).unwrap();

        block_on(store.update_credits(&user.id, 12)).unwrap();
        let found = block_on(store.get_by_address("wallet-a")).unwrap().unwrap();
        assert_eq!(found.credits, 12);

        let result = block_on(store.update_credits("missing", 1));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
