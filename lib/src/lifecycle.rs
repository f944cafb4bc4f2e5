//! Locker lifecycle state machine.
//!
//! Every transition takes the current time explicitly and performs all of
//! its checks before touching `self`, so a failed call leaves the locker
//! exactly as it was. The hosting contract loads a locker, runs one of these
//! transitions, and persists the result only on success.
//!
//! ```text
//! Open --lock--> Locked --(empty, past deadline)--> Eligible --destroy--> (gone)
//!   \________________________(empty)___________________________/
//! ```

use soroban_sdk::Symbol;

use crate::{
    errors::LockerError,
    keys::{ClaimKey, MasterKey},
    types::{Locker, LockerState},
    validation::validate_item_type,
    MAX_ITEM_COUNT,
};

impl Locker {
    /// Lifecycle state as seen at `now`.
    pub fn state(&self, now: u64) -> LockerState {
        if !self.is_locked() {
            LockerState::Open
        } else if self.items.is_empty() && self.expiry_reached(now) {
            LockerState::Eligible
        } else {
            LockerState::Locked
        }
    }

    /// Master keys are validated against the locker's own id, never against
    /// the claim key it may have issued.
    pub fn ensure_master_key(&self, key: &MasterKey) -> Result<(), LockerError> {
        if key.bound_locker() != self.id {
            return Err(LockerError::InvalidMasterKey);
        }
        Ok(())
    }

    pub fn ensure_claim_key(&self, key: &ClaimKey) -> Result<(), LockerError> {
        if key.bound_locker() != self.id {
            return Err(LockerError::InvalidClaimKey);
        }
        Ok(())
    }

    pub fn add_item(
        &mut self,
        key: &MasterKey,
        item_id: u64,
        type_tag: Symbol,
    ) -> Result<(), LockerError> {
        self.ensure_master_key(key)?;
        if self.is_locked() {
            return Err(LockerError::AlreadyLocked);
        }
        if self.item_count >= MAX_ITEM_COUNT {
            return Err(LockerError::CapacityExceeded);
        }
        validate_item_type(&type_tag)?;

        self.items.insert(item_id, type_tag)?;
        self.item_count = self.items.size();
        Ok(())
    }

    /// Freezes the bundle and mints the locker's one claim key.
    pub fn lock(
        &mut self,
        key: &MasterKey,
        claim_key_id: u64,
        deadline: Option<u64>,
        now: u64,
    ) -> Result<ClaimKey, LockerError> {
        self.ensure_master_key(key)?;
        if self.is_locked() {
            return Err(LockerError::AlreadyLocked);
        }
        if let Some(deadline) = deadline {
            if deadline <= now {
                return Err(LockerError::DeadlineInPast);
            }
        }

        self.bind_claim_key(claim_key_id)?;
        self.claim_deadline = deadline;
        Ok(ClaimKey::mint(claim_key_id, self.id))
    }

    /// Removes an item for the claim-key holder. Returns its type tag.
    pub fn claim_item(
        &mut self,
        key: &ClaimKey,
        item_id: u64,
        now: u64,
    ) -> Result<Symbol, LockerError> {
        self.ensure_claim_key(key)?;
        if !self.is_locked() {
            return Err(LockerError::NotYetLocked);
        }
        if !self.claim_window_open(now) {
            return Err(LockerError::ClaimWindowExpired);
        }

        self.take_item(item_id)
    }

    /// Removes an item for the master-key holder once the claim window has
    /// closed. Returns its type tag.
    pub fn reclaim_item(
        &mut self,
        key: &MasterKey,
        item_id: u64,
        now: u64,
    ) -> Result<Symbol, LockerError> {
        self.ensure_master_key(key)?;
        if !self.is_locked() {
            return Err(LockerError::NotYetLocked);
        }
        if !self.reclaim_window_open(now) {
            return Err(LockerError::ClaimWindowStillOpen);
        }

        self.take_item(item_id)
    }

    /// Pushes the deadline strictly later. Returns the previous deadline.
    pub fn extend_deadline(
        &mut self,
        key: &MasterKey,
        new_deadline: u64,
    ) -> Result<u64, LockerError> {
        self.ensure_master_key(key)?;
        let current = self.claim_deadline.ok_or(LockerError::NoDeadlineToExtend)?;
        if new_deadline <= current {
            return Err(LockerError::DeadlineNotExtended);
        }

        self.claim_deadline = Some(new_deadline);
        Ok(current)
    }

    pub fn ensure_destroyable(&self, now: u64) -> Result<(), LockerError> {
        if !self.items.is_empty() || !self.expiry_reached(now) {
            return Err(LockerError::NotEligibleForDestruction);
        }
        Ok(())
    }

    /// `now < deadline`, or always when no deadline was set.
    pub fn claim_window_open(&self, now: u64) -> bool {
        match self.claim_deadline {
            Some(deadline) => now < deadline,
            None => true,
        }
    }

    /// `now > deadline`. Without a deadline the reclaim window never opens.
    pub fn reclaim_window_open(&self, now: u64) -> bool {
        match self.claim_deadline {
            Some(deadline) => now > deadline,
            None => false,
        }
    }

    /// Expiry condition gating destruction: vacuous when the locker was never
    /// locked or has no deadline.
    fn expiry_reached(&self, now: u64) -> bool {
        if !self.is_locked() {
            return true;
        }
        match self.claim_deadline {
            Some(deadline) => now > deadline,
            None => true,
        }
    }

    fn bind_claim_key(&mut self, claim_key_id: u64) -> Result<(), LockerError> {
        if self.claim_key_id.is_some() {
            return Err(LockerError::AlreadyLocked);
        }
        self.claim_key_id = Some(claim_key_id);
        Ok(())
    }

    fn take_item(&mut self, item_id: u64) -> Result<Symbol, LockerError> {
        let type_tag = self.items.remove(item_id)?;
        self.item_count = self.items.size();
        Ok(type_tag)
    }
}
