use soroban_sdk::{contracttype, Address, Env};

use keylocker_lib::{Asset, RECORD_TTL_EXTEND, RECORD_TTL_THRESHOLD};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Pending asset under (owner, slot, item_id)
    Pending(Address, u64, u64),
    /// Number of items pending under (owner, slot)
    SlotSize(Address, u64),
}

/* ---------------- PENDING ITEMS ---------------- */

pub fn get_pending(env: &Env, owner: &Address, slot: u64, item_id: u64) -> Option<Asset> {
    env.storage()
        .persistent()
        .get(&DataKey::Pending(owner.clone(), slot, item_id))
}

pub fn has_pending(env: &Env, owner: &Address, slot: u64, item_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pending(owner.clone(), slot, item_id))
}

pub fn set_pending(env: &Env, owner: &Address, slot: u64, item_id: u64, asset: &Asset) {
    let key = DataKey::Pending(owner.clone(), slot, item_id);
    env.storage().persistent().set(&key, asset);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

pub fn remove_pending(env: &Env, owner: &Address, slot: u64, item_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::Pending(owner.clone(), slot, item_id));
}

/* ---------------- SLOT SIZE ---------------- */

pub fn get_slot_size(env: &Env, owner: &Address, slot: u64) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::SlotSize(owner.clone(), slot))
        .unwrap_or(0)
}

pub fn set_slot_size(env: &Env, owner: &Address, slot: u64, size: u32) {
    let key = DataKey::SlotSize(owner.clone(), slot);
    if size == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &size);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}
