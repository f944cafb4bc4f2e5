use soroban_sdk::{contracttype, Env, Map, Symbol, Vec};

use crate::{errors::LockerError, MAX_ITEM_COUNT};

/// Item id -> type tag for every asset a locker currently holds in custody.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemRegistry {
    pub entries: Map<u64, Symbol>,
}

impl ItemRegistry {
    pub fn new(env: &Env) -> Self {
        Self {
            entries: Map::new(env),
        }
    }

    /// Fails on a duplicate id before checking capacity, so a full registry
    /// still reports `DuplicateItem` for an id it already holds.
    pub fn insert(&mut self, item_id: u64, type_tag: Symbol) -> Result<(), LockerError> {
        if self.entries.contains_key(item_id) {
            return Err(LockerError::DuplicateItem);
        }
        if self.size() >= MAX_ITEM_COUNT {
            return Err(LockerError::CapacityExceeded);
        }
        self.entries.set(item_id, type_tag);
        Ok(())
    }

    pub fn remove(&mut self, item_id: u64) -> Result<Symbol, LockerError> {
        let type_tag = self.entries.get(item_id).ok_or(LockerError::ItemNotFound)?;
        self.entries.remove(item_id);
        Ok(type_tag)
    }

    pub fn contains(&self, item_id: u64) -> bool {
        self.entries.contains_key(item_id)
    }

    pub fn type_of(&self, item_id: u64) -> Option<Symbol> {
        self.entries.get(item_id)
    }

    pub fn size(&self) -> u32 {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn item_ids(&self) -> Vec<u64> {
        self.entries.keys()
    }
}
