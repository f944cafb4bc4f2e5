use soroban_sdk::{contracttype, Address, Env};

use crate::registry::ItemRegistry;

/// Where a locker sits in its lifecycle at a given instant.
///
/// A destroyed locker has no state: it is simply gone from storage.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LockerState {
    /// No claim key minted yet; items may still be added.
    Open = 0,
    /// Claim key minted; the bundle is frozen.
    Locked = 1,
    /// Locked, empty, and past any deadline: ready to destroy.
    Eligible = 2,
}

/// The custody aggregate guarded by a master key and, once locked, a claim key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locker {
    pub id: u64,
    pub creator: Address,
    pub items: ItemRegistry,
    /// Cached `items.size()`.
    pub item_count: u32,
    /// Set once, at lock time.
    pub claim_key_id: Option<u64>,
    /// Set at lock time (optionally); afterwards only ever increased.
    pub claim_deadline: Option<u64>,
    pub created_at: u64,
}

impl Locker {
    pub fn new(env: &Env, id: u64, creator: Address, now: u64) -> Self {
        Self {
            id,
            creator,
            items: ItemRegistry::new(env),
            item_count: 0,
            claim_key_id: None,
            claim_deadline: None,
            created_at: now,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.claim_key_id.is_some()
    }
}

/// Hosting contract configuration, kept in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockerConfig {
    /// Custody contract every locker deposits into.
    pub custody: Address,
}
