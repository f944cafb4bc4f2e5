//! The custody primitive a locker delegates asset movement to.
//!
//! A locker never moves assets itself. On `add_item` it deposits the asset
//! into its slot at the custody contract; on claim or reclaim it withdraws
//! the asset from that slot to the recipient. A slot is `(owner, slot)`,
//! where the owner is the locker contract and the slot is the locker id.

use soroban_sdk::{contractclient, contracttype, Address, Bytes, Env, Symbol};

use crate::{errors::CustodyError, TOKEN_TAG};

/// An asset held in custody on behalf of a locker.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// A balance of a SEP-41 token: `(token contract, amount)`.
    Token(Address, i128),
    /// An opaque record with its own type tag: `(type tag, payload)`.
    Record(Symbol, Bytes),
}

impl Asset {
    pub fn type_tag(&self) -> Symbol {
        match self {
            Asset::Token(_, _) => TOKEN_TAG,
            Asset::Record(tag, _) => tag.clone(),
        }
    }
}

#[contractclient(name = "CustodyClient")]
pub trait CustodyInterface {
    /// Move `asset` from `from` into the `(owner, slot)` slot under `item_id`.
    /// Both `owner` and `from` must authorize.
    fn deposit(
        env: Env,
        from: Address,
        owner: Address,
        slot: u64,
        item_id: u64,
        asset: Asset,
    ) -> Result<(), CustodyError>;

    /// Release a pending item to `recipient`. Fails unless the item is
    /// actually pending in the `(owner, slot)` slot.
    fn withdraw(
        env: Env,
        owner: Address,
        slot: u64,
        item_id: u64,
        recipient: Address,
    ) -> Result<Asset, CustodyError>;

    fn pending(env: Env, owner: Address, slot: u64, item_id: u64) -> Option<Asset>;

    fn is_pending(env: Env, owner: Address, slot: u64, item_id: u64) -> bool;
}
