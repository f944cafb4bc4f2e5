#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contractimpl, log, Address, Env};

use keylocker_lib::{
    events,
    journal::{self, JournalPage},
    validation::validate_asset,
    Asset, ClaimKey, CustodyClient, KeyKind, Locker, LockerConfig, LockerError, LockerEvent,
    LockerState, MasterKey,
};

mod storage;

#[cfg(test)]
mod test_lifecycle;

use storage::*;

#[contract]
pub struct KeyLocker;

#[contractimpl]
impl KeyLocker {
    /* ---------------- SETUP ---------------- */

    /// One-time setup: records the custody contract every locker deposits into.
    pub fn init_contract(env: Env, custody: Address) -> Result<(), LockerError> {
        if is_initialized(&env) {
            return Err(LockerError::AlreadyInitialized);
        }

        set_config(&env, &LockerConfig { custody });
        extend_instance_ttl(&env);
        Ok(())
    }

    /* ---------------- LIFECYCLE ---------------- */

    /// Opens an empty locker and hands its master key to `creator`.
    pub fn create(env: Env, creator: Address) -> Result<MasterKey, LockerError> {
        get_config(&env)?;
        creator.require_auth();

        let now = env.ledger().timestamp();
        let locker_id = next_locker_id(&env);
        let master_key = MasterKey::mint(next_key_id(&env), locker_id);

        set_locker(&env, &Locker::new(&env, locker_id, creator.clone(), now));
        set_master_key(&env, &master_key);
        set_key_holder(&env, KeyKind::Master, master_key.id(), &creator);
        extend_instance_ttl(&env);

        log!(&env, "locker: created", locker_id, master_key.id());
        events::emit(
            &env,
            &creator,
            LockerEvent::created(locker_id, master_key.id()),
            now,
        );

        Ok(master_key)
    }

    /// Deposits `asset` from `holder` into the locker's custody slot.
    ///
    /// Returns the id the item is registered under.
    pub fn add_item(
        env: Env,
        holder: Address,
        master_key_id: u64,
        locker_id: u64,
        asset: Asset,
    ) -> Result<u64, LockerError> {
        let config = get_config(&env)?;
        let master_key = held_master_key(&env, &holder, master_key_id)?;
        let mut locker = get_locker(&env, locker_id)?;
        let now = env.ledger().timestamp();

        let item_id = next_item_id(&env);
        locker.add_item(&master_key, item_id, asset.type_tag())?;
        validate_asset(&asset, &env.current_contract_address())?;

        deposit_into_custody(&env, &config, &holder, locker_id, item_id, &asset)?;
        set_locker(&env, &locker);
        extend_instance_ttl(&env);

        log!(&env, "locker: item added", locker_id, item_id);
        events::emit(&env, &holder, LockerEvent::item_added(locker_id, item_id), now);

        Ok(item_id)
    }

    /// Freezes the bundle and mints the claim key, held by the caller.
    pub fn lock(
        env: Env,
        holder: Address,
        master_key_id: u64,
        locker_id: u64,
        deadline: Option<u64>,
    ) -> Result<ClaimKey, LockerError> {
        get_config(&env)?;
        let master_key = held_master_key(&env, &holder, master_key_id)?;
        let mut locker = get_locker(&env, locker_id)?;
        let now = env.ledger().timestamp();

        let claim_key = locker.lock(&master_key, next_key_id(&env), deadline, now)?;

        set_locker(&env, &locker);
        set_claim_key(&env, &claim_key);
        set_key_holder(&env, KeyKind::Claim, claim_key.id(), &holder);
        extend_instance_ttl(&env);

        log!(&env, "locker: locked", locker_id, claim_key.id());
        events::emit(
            &env,
            &holder,
            LockerEvent::locked(locker_id, claim_key.id(), deadline),
            now,
        );

        Ok(claim_key)
    }

    /// Releases an item to the claim-key holder while the claim window is open.
    pub fn claim_item(
        env: Env,
        holder: Address,
        claim_key_id: u64,
        locker_id: u64,
        item_id: u64,
    ) -> Result<Asset, LockerError> {
        let config = get_config(&env)?;
        let claim_key = held_claim_key(&env, &holder, claim_key_id)?;
        let mut locker = get_locker(&env, locker_id)?;
        let now = env.ledger().timestamp();

        locker.claim_item(&claim_key, item_id, now)?;

        let asset = withdraw_from_custody(&env, &config, locker_id, item_id, &holder)?;
        set_locker(&env, &locker);
        extend_instance_ttl(&env);

        log!(&env, "locker: item claimed", locker_id, item_id);
        events::emit(
            &env,
            &holder,
            LockerEvent::claimed(locker_id, item_id, claim_key.id()),
            now,
        );

        Ok(asset)
    }

    /// Returns an item to the master-key holder once the claim window closed.
    pub fn reclaim_item(
        env: Env,
        holder: Address,
        master_key_id: u64,
        locker_id: u64,
        item_id: u64,
    ) -> Result<Asset, LockerError> {
        let config = get_config(&env)?;
        let master_key = held_master_key(&env, &holder, master_key_id)?;
        let mut locker = get_locker(&env, locker_id)?;
        let now = env.ledger().timestamp();

        locker.reclaim_item(&master_key, item_id, now)?;

        let asset = withdraw_from_custody(&env, &config, locker_id, item_id, &holder)?;
        set_locker(&env, &locker);
        extend_instance_ttl(&env);

        log!(&env, "locker: item reclaimed", locker_id, item_id);
        events::emit(
            &env,
            &holder,
            LockerEvent::removed(locker_id, item_id, master_key.id()),
            now,
        );

        Ok(asset)
    }

    /// Moves the claim deadline strictly later.
    pub fn set_deadline(
        env: Env,
        holder: Address,
        master_key_id: u64,
        locker_id: u64,
        new_deadline: u64,
    ) -> Result<(), LockerError> {
        get_config(&env)?;
        let master_key = held_master_key(&env, &holder, master_key_id)?;
        let mut locker = get_locker(&env, locker_id)?;
        let now = env.ledger().timestamp();

        let previous = locker.extend_deadline(&master_key, new_deadline)?;

        set_locker(&env, &locker);
        extend_instance_ttl(&env);

        log!(&env, "locker: deadline extended", locker_id, previous, new_deadline);
        events::emit(
            &env,
            &holder,
            LockerEvent::deadline_extended(locker_id, master_key.id(), new_deadline),
            now,
        );

        Ok(())
    }

    /// Removes an empty, expired locker. Anyone may call this; keys bound to
    /// the locker stay outstanding but no longer open anything.
    pub fn destroy(env: Env, caller: Address, locker_id: u64) -> Result<(), LockerError> {
        get_config(&env)?;
        caller.require_auth();

        let locker = get_locker(&env, locker_id)?;
        let now = env.ledger().timestamp();

        locker.ensure_destroyable(now)?;

        remove_locker(&env, locker_id);
        extend_instance_ttl(&env);

        log!(&env, "locker: destroyed", locker_id);
        events::emit(&env, &caller, LockerEvent::destroyed(locker_id), now);

        Ok(())
    }

    /* ---------------- KEYS ---------------- */

    pub fn transfer_master_key(
        env: Env,
        holder: Address,
        key_id: u64,
        to: Address,
    ) -> Result<(), LockerError> {
        get_config(&env)?;
        let master_key = held_master_key(&env, &holder, key_id)?;
        reassign_key(&env, KeyKind::Master, key_id, master_key.bound_locker(), &holder, &to);
        Ok(())
    }

    pub fn transfer_claim_key(
        env: Env,
        holder: Address,
        key_id: u64,
        to: Address,
    ) -> Result<(), LockerError> {
        get_config(&env)?;
        let claim_key = held_claim_key(&env, &holder, key_id)?;
        reassign_key(&env, KeyKind::Claim, key_id, claim_key.bound_locker(), &holder, &to);
        Ok(())
    }

    /// Destroys a master key. The locker itself is untouched.
    pub fn burn_master_key(env: Env, holder: Address, key_id: u64) -> Result<(), LockerError> {
        get_config(&env)?;
        let master_key = held_master_key(&env, &holder, key_id)?;
        burn_key(&env, KeyKind::Master, key_id, master_key.bound_locker(), &holder);
        Ok(())
    }

    /// Destroys a claim key. The locker itself is untouched.
    pub fn burn_claim_key(env: Env, holder: Address, key_id: u64) -> Result<(), LockerError> {
        get_config(&env)?;
        let claim_key = held_claim_key(&env, &holder, key_id)?;
        burn_key(&env, KeyKind::Claim, key_id, claim_key.bound_locker(), &holder);
        Ok(())
    }

    /* ---------------- QUERIES ---------------- */

    pub fn get_locker(env: Env, locker_id: u64) -> Result<Locker, LockerError> {
        storage::get_locker(&env, locker_id)
    }

    pub fn locker_state(env: Env, locker_id: u64) -> Result<LockerState, LockerError> {
        let locker = storage::get_locker(&env, locker_id)?;
        Ok(locker.state(env.ledger().timestamp()))
    }

    pub fn get_master_key(env: Env, key_id: u64) -> Result<MasterKey, LockerError> {
        storage::get_master_key(&env, key_id)
    }

    pub fn get_claim_key(env: Env, key_id: u64) -> Result<ClaimKey, LockerError> {
        storage::get_claim_key(&env, key_id)
    }

    pub fn key_holder(env: Env, kind: KeyKind, key_id: u64) -> Result<Address, LockerError> {
        get_key_holder(&env, kind, key_id)
    }

    /// Number of lockers ever created, destroyed ones included.
    pub fn locker_count(env: Env) -> u64 {
        get_locker_count(&env)
    }

    /// Page through the event journal; see [`journal::query`] for the
    /// boundary rules.
    pub fn get_journal(env: Env, start_id: u64, end_id: u64, max_results: u32) -> JournalPage {
        journal::query(&env, start_id, end_id, max_results)
    }

    pub fn custody(env: Env) -> Result<Address, LockerError> {
        Ok(get_config(&env)?.custody)
    }
}

/* ---------------- HELPERS ---------------- */

/// Authorizes `holder` and loads a master key they currently hold.
fn held_master_key(env: &Env, holder: &Address, key_id: u64) -> Result<MasterKey, LockerError> {
    holder.require_auth();
    let key = storage::get_master_key(env, key_id)?;
    require_key_holder(env, KeyKind::Master, key_id, holder)?;
    Ok(key)
}

/// Authorizes `holder` and loads a claim key they currently hold.
fn held_claim_key(env: &Env, holder: &Address, key_id: u64) -> Result<ClaimKey, LockerError> {
    holder.require_auth();
    let key = storage::get_claim_key(env, key_id)?;
    require_key_holder(env, KeyKind::Claim, key_id, holder)?;
    Ok(key)
}

fn reassign_key(
    env: &Env,
    kind: KeyKind,
    key_id: u64,
    locker_id: u64,
    holder: &Address,
    to: &Address,
) {
    set_key_holder(env, kind, key_id, to);
    extend_instance_ttl(env);

    log!(env, "locker: key transferred", key_id, locker_id);
    events::emit(
        env,
        holder,
        LockerEvent::key_transferred(locker_id, key_id),
        env.ledger().timestamp(),
    );
}

fn burn_key(env: &Env, kind: KeyKind, key_id: u64, locker_id: u64, holder: &Address) {
    remove_key(env, kind, key_id);
    extend_instance_ttl(env);

    log!(env, "locker: key burned", key_id, locker_id);
    events::emit(
        env,
        holder,
        LockerEvent::key_burned(locker_id, key_id),
        env.ledger().timestamp(),
    );
}

/// The locker contract owns every slot; the slot id is the locker id.
fn deposit_into_custody(
    env: &Env,
    config: &LockerConfig,
    from: &Address,
    locker_id: u64,
    item_id: u64,
    asset: &Asset,
) -> Result<(), LockerError> {
    let custody = CustodyClient::new(env, &config.custody);
    match custody.try_deposit(
        from,
        &env.current_contract_address(),
        &locker_id,
        &item_id,
        asset,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(LockerError::CustodyRejected),
    }
}

fn withdraw_from_custody(
    env: &Env,
    config: &LockerConfig,
    locker_id: u64,
    item_id: u64,
    recipient: &Address,
) -> Result<Asset, LockerError> {
    let custody = CustodyClient::new(env, &config.custody);
    match custody.try_withdraw(
        &env.current_contract_address(),
        &locker_id,
        &item_id,
        recipient,
    ) {
        Ok(Ok(asset)) => Ok(asset),
        _ => Err(LockerError::CustodyRejected),
    }
}
