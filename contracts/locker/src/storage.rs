use soroban_sdk::{contracttype, Address, Env};

use keylocker_lib::{
    ClaimKey, KeyKind, Locker, LockerConfig, LockerError, MasterKey, INSTANCE_TTL_EXTEND,
    INSTANCE_TTL_THRESHOLD, RECORD_TTL_EXTEND, RECORD_TTL_THRESHOLD,
};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    LockerCounter,
    /// Shared by master and claim keys
    KeyCounter,
    ItemCounter,
    Locker(u64),
    MasterKey(u64),
    ClaimKey(u64),
    KeyHolder(KeyKind, u64),
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_record_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

/* ---------------- CONFIG ---------------- */

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &LockerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<LockerConfig, LockerError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LockerError::NotInitialized)
}

/* ---------------- COUNTERS ---------------- */

fn next_counter(env: &Env, key: &DataKey) -> u64 {
    let next = env
        .storage()
        .instance()
        .get::<_, u64>(key)
        .unwrap_or(0)
        .saturating_add(1);
    env.storage().instance().set(key, &next);
    next
}

pub fn get_locker_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LockerCounter)
        .unwrap_or(0)
}

pub fn next_locker_id(env: &Env) -> u64 {
    next_counter(env, &DataKey::LockerCounter)
}

pub fn next_key_id(env: &Env) -> u64 {
    next_counter(env, &DataKey::KeyCounter)
}

pub fn next_item_id(env: &Env) -> u64 {
    next_counter(env, &DataKey::ItemCounter)
}

/* ---------------- LOCKERS ---------------- */

pub fn get_locker(env: &Env, locker_id: u64) -> Result<Locker, LockerError> {
    env.storage()
        .persistent()
        .get(&DataKey::Locker(locker_id))
        .ok_or(LockerError::LockerNotFound)
}

pub fn set_locker(env: &Env, locker: &Locker) {
    let key = DataKey::Locker(locker.id);
    env.storage().persistent().set(&key, locker);
    extend_record_ttl(env, &key);
}

pub fn remove_locker(env: &Env, locker_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::Locker(locker_id));
}

/* ---------------- KEYS ---------------- */

pub fn get_master_key(env: &Env, key_id: u64) -> Result<MasterKey, LockerError> {
    env.storage()
        .persistent()
        .get(&DataKey::MasterKey(key_id))
        .ok_or(LockerError::KeyNotFound)
}

pub fn set_master_key(env: &Env, key: &MasterKey) {
    let storage_key = DataKey::MasterKey(key.id());
    env.storage().persistent().set(&storage_key, key);
    extend_record_ttl(env, &storage_key);
}

pub fn get_claim_key(env: &Env, key_id: u64) -> Result<ClaimKey, LockerError> {
    env.storage()
        .persistent()
        .get(&DataKey::ClaimKey(key_id))
        .ok_or(LockerError::KeyNotFound)
}

pub fn set_claim_key(env: &Env, key: &ClaimKey) {
    let storage_key = DataKey::ClaimKey(key.id());
    env.storage().persistent().set(&storage_key, key);
    extend_record_ttl(env, &storage_key);
}

/// Deletes the key record and its holder entry.
pub fn remove_key(env: &Env, kind: KeyKind, key_id: u64) {
    let record = match kind {
        KeyKind::Master => DataKey::MasterKey(key_id),
        KeyKind::Claim => DataKey::ClaimKey(key_id),
    };
    env.storage().persistent().remove(&record);
    env.storage()
        .persistent()
        .remove(&DataKey::KeyHolder(kind, key_id));
}

/* ---------------- HOLDERS ---------------- */

pub fn get_key_holder(env: &Env, kind: KeyKind, key_id: u64) -> Result<Address, LockerError> {
    env.storage()
        .persistent()
        .get(&DataKey::KeyHolder(kind, key_id))
        .ok_or(LockerError::KeyNotFound)
}

pub fn set_key_holder(env: &Env, kind: KeyKind, key_id: u64, holder: &Address) {
    let key = DataKey::KeyHolder(kind, key_id);
    env.storage().persistent().set(&key, holder);
    extend_record_ttl(env, &key);
}

/// `NotKeyHolder` unless `caller` is the recorded holder of the key.
pub fn require_key_holder(
    env: &Env,
    kind: KeyKind,
    key_id: u64,
    caller: &Address,
) -> Result<(), LockerError> {
    if get_key_holder(env, kind, key_id)? != *caller {
        return Err(LockerError::NotKeyHolder);
    }
    Ok(())
}
