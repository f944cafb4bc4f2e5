#![no_std]

use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env};

use keylocker_lib::{Asset, CustodyError, CustodyInterface, CUSTODY_TOPIC};

mod storage;


use storage::*;

/// Holds assets on behalf of slot owners until the owner releases them.
///
/// Token assets are moved into the vault's own balance on deposit and paid
/// out on withdrawal; record assets are simply held.
#[contract]
pub struct CustodyVault;

#[contractimpl]
impl CustodyInterface for CustodyVault {
    fn deposit(
        env: Env,
        from: Address,
        owner: Address,
        slot: u64,
        item_id: u64,
        asset: Asset,
    ) -> Result<(), CustodyError> {
        // Only the slot owner fills its slots; `from` pays for token assets.
        owner.require_auth();
        if from != owner {
            from.require_auth();
        }

        if has_pending(&env, &owner, slot, item_id) {
            return Err(CustodyError::AlreadyPending);
        }

        if let Asset::Token(token, amount) = &asset {
            if *amount <= 0 {
                return Err(CustodyError::InvalidAmount);
            }
            token::Client::new(&env, token).transfer(
                &from,
                &env.current_contract_address(),
                amount,
            );
        }

        set_pending(&env, &owner, slot, item_id, &asset);
        let size = get_slot_size(&env, &owner, slot);
        set_slot_size(&env, &owner, slot, size + 1);

        log!(&env, "custody: deposit", slot, item_id);
        env.events().publish(
            (CUSTODY_TOPIC, symbol_short!("deposit")),
            (owner, slot, item_id),
        );

        Ok(())
    }

    fn withdraw(
        env: Env,
        owner: Address,
        slot: u64,
        item_id: u64,
        recipient: Address,
    ) -> Result<Asset, CustodyError> {
        owner.require_auth();

        let asset =
            get_pending(&env, &owner, slot, item_id).ok_or(CustodyError::NotPending)?;

        remove_pending(&env, &owner, slot, item_id);
        let size = get_slot_size(&env, &owner, slot);
        set_slot_size(&env, &owner, slot, size.saturating_sub(1));

        if let Asset::Token(token, amount) = &asset {
            token::Client::new(&env, token).transfer(
                &env.current_contract_address(),
                &recipient,
                amount,
            );
        }

        log!(&env, "custody: withdraw", slot, item_id);
        env.events().publish(
            (CUSTODY_TOPIC, symbol_short!("withdraw")),
            (owner, slot, item_id, recipient),
        );

        Ok(asset)
    }

    fn pending(env: Env, owner: Address, slot: u64, item_id: u64) -> Option<Asset> {
        get_pending(&env, &owner, slot, item_id)
    }

    fn is_pending(env: Env, owner: Address, slot: u64, item_id: u64) -> bool {
        has_pending(&env, &owner, slot, item_id)
    }
}

#[contractimpl]
impl CustodyVault {
    /// Number of items currently pending under `(owner, slot)`.
    pub fn slot_size(env: Env, owner: Address, slot: u64) -> u32 {
        get_slot_size(&env, &owner, slot)
    }
}
