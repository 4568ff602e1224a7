//! Credit accounting for image generation.

use crate::storage::{NewUser, StoreError, UserRecord, UserStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Credits charged per generation.
pub const GENERATION_COST: u32 = 3;

/// Credits granted to a newly created user.
pub const STARTER_CREDITS: u32 = 3;

/// Purchasable credit packs.
pub const CREDIT_PACKS: [CreditPack; 3] = [
    CreditPack { credits: 20, price_cents: 100 },
    CreditPack { credits: 100, price_cents: 500 },
    CreditPack { credits: 500, price_cents: 2500 },
];

/// A bundle of credits sold together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPack {
    pub credits: u32,
    pub price_cents: u32,
}

/// Sign-in state of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unauthenticated,
    /// Sign-in is in flight.
    Loading,
    Authenticated { address: String },
}

impl AuthStatus {
    /// Wallet address when signed in.
    pub fn address(&self) -> Option<&str> {
        match self {
            AuthStatus::Authenticated { address } => Some(address),
            AuthStatus::Unauthenticated | AuthStatus::Loading => None,
        }
    }
}

/// Credit errors.
#[derive(Debug, Error)]
pub enum CreditError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Insufficient credits: {required} required, {available} available")]
    Insufficient { required: u32, available: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads and updates credit balances through a [`UserStore`].
pub struct CreditLedger<S> {
    store: S,
}

impl<S: UserStore> CreditLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the user for `address`, creating one with starter credits on
    /// first sign-in.
    pub async fn ensure_user(&self, address: &str) -> Result<UserRecord, CreditError> {
        if let Some(user) = self.store.get_by_address(address).await? {
            return Ok(user);
        }
        let user = self
            .store
            .create(NewUser {
                wallet_address: address.to_string(),
                credits: STARTER_CREDITS,
            })
            .await?;
        log::info!("Created user {} with {} credits", user.id, user.credits);
        Ok(user)
    }

    /// Charge one generation. Returns the updated record.
    pub async fn debit_generation(&self, user: &UserRecord) -> Result<UserRecord, CreditError> {
        if user.credits < GENERATION_COST {
            return Err(CreditError::Insufficient {
                required: GENERATION_COST,
                available: user.credits,
            });
        }
        let credits = user.credits - GENERATION_COST;
        self.store.update_credits(&user.id, credits).await?;
        log::debug!("Debited {} credits from {}", GENERATION_COST, user.id);
        Ok(UserRecord {
            credits,
            ..user.clone()
        })
    }

    /// Add purchased credits. Returns the updated record.
    pub async fn top_up(
        &self,
        user: &UserRecord,
        pack: CreditPack,
    ) -> Result<UserRecord, CreditError> {
        let credits = user.credits.saturating_add(pack.credits);
        self.store.update_credits(&user.id, credits).await?;
        log::info!("Added {} credits to {}", pack.credits, user.id);
        Ok(UserRecord {
            credits,
            ..user.clone()
        })
    }
}
