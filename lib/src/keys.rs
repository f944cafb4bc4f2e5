//! Capability tokens.
//!
//! A key is nothing more than an identity plus the id of the locker it was
//! minted for. Keys are only ever minted by the hosting contract and live in
//! its storage, so a caller can present a key (by id) but never fabricate
//! one. Binding checks are done by the [`Locker`](crate::Locker), not here.

use soroban_sdk::contracttype;

/// Which of the two token types a key id refers to.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum KeyKind {
    Master = 0,
    Claim = 1,
}

/// Creator-side key: populate, lock, extend, and reclaim after expiry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MasterKey {
    pub id: u64,
    pub locker_id: u64,
}

/// Claimant-side key: claim items while the window is open.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimKey {
    pub id: u64,
    pub locker_id: u64,
}

impl MasterKey {
    pub fn mint(id: u64, locker_id: u64) -> Self {
        Self { id, locker_id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bound_locker(&self) -> u64 {
        self.locker_id
    }
}

impl ClaimKey {
    pub fn mint(id: u64, locker_id: u64) -> Self {
        Self { id, locker_id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bound_locker(&self) -> u64 {
        self.locker_id
    }
}

impl KeyKind {
    /// Type tag a key of this kind would carry if someone tried to deposit it.
    pub fn type_tag(self) -> soroban_sdk::Symbol {
        match self {
            KeyKind::Master => crate::MASTER_KEY_TAG,
            KeyKind::Claim => crate::CLAIM_KEY_TAG,
        }
    }
}
