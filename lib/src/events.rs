//! Lifecycle notifications.
//!
//! Events are a pure side channel: they are published after a transition
//! has been applied and nothing reads them back into locker state.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{journal, LOCKER_TOPIC};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EventKind {
    Created = 1,
    ItemAdded = 2,
    Locked = 3,
    Claimed = 4,
    Removed = 5,
    DeadlineExtended = 6,
    Destroyed = 7,
    KeyTransferred = 8,
    KeyBurned = 9,
}

impl EventKind {
    pub fn topic(self) -> Symbol {
        match self {
            EventKind::Created => symbol_short!("created"),
            EventKind::ItemAdded => symbol_short!("item_add"),
            EventKind::Locked => symbol_short!("locked"),
            EventKind::Claimed => symbol_short!("claimed"),
            EventKind::Removed => symbol_short!("removed"),
            EventKind::DeadlineExtended => symbol_short!("deadline"),
            EventKind::Destroyed => symbol_short!("destroyed"),
            EventKind::KeyTransferred => symbol_short!("key_xfer"),
            EventKind::KeyBurned => symbol_short!("key_burn"),
        }
    }
}

/// Record published for every committed transition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockerEvent {
    pub kind: EventKind,
    pub locker_id: u64,
    pub item_id: Option<u64>,
    pub token_id: Option<u64>,
    pub deadline: Option<u64>,
}

impl LockerEvent {
    fn new(kind: EventKind, locker_id: u64) -> Self {
        Self {
            kind,
            locker_id,
            item_id: None,
            token_id: None,
            deadline: None,
        }
    }

    pub fn created(locker_id: u64, master_key_id: u64) -> Self {
        Self {
            token_id: Some(master_key_id),
            ..Self::new(EventKind::Created, locker_id)
        }
    }

    pub fn item_added(locker_id: u64, item_id: u64) -> Self {
        Self {
            item_id: Some(item_id),
            ..Self::new(EventKind::ItemAdded, locker_id)
        }
    }

    pub fn locked(locker_id: u64, claim_key_id: u64, deadline: Option<u64>) -> Self {
        Self {
            token_id: Some(claim_key_id),
            deadline,
            ..Self::new(EventKind::Locked, locker_id)
        }
    }

    pub fn claimed(locker_id: u64, item_id: u64, claim_key_id: u64) -> Self {
        Self {
            item_id: Some(item_id),
            token_id: Some(claim_key_id),
            ..Self::new(EventKind::Claimed, locker_id)
        }
    }

    pub fn removed(locker_id: u64, item_id: u64, master_key_id: u64) -> Self {
        Self {
            item_id: Some(item_id),
            token_id: Some(master_key_id),
            ..Self::new(EventKind::Removed, locker_id)
        }
    }

    pub fn deadline_extended(locker_id: u64, master_key_id: u64, deadline: u64) -> Self {
        Self {
            token_id: Some(master_key_id),
            deadline: Some(deadline),
            ..Self::new(EventKind::DeadlineExtended, locker_id)
        }
    }

    pub fn destroyed(locker_id: u64) -> Self {
        Self::new(EventKind::Destroyed, locker_id)
    }

    pub fn key_transferred(locker_id: u64, key_id: u64) -> Self {
        Self {
            token_id: Some(key_id),
            ..Self::new(EventKind::KeyTransferred, locker_id)
        }
    }

    pub fn key_burned(locker_id: u64, key_id: u64) -> Self {
        Self {
            token_id: Some(key_id),
            ..Self::new(EventKind::KeyBurned, locker_id)
        }
    }
}

/// Publish `event` on the contract event stream and append it to the journal.
///
/// Returns the journal entry id.
pub fn emit(env: &Env, operator: &Address, event: LockerEvent, timestamp: u64) -> u64 {
    env.events()
        .publish((LOCKER_TOPIC, event.kind.topic()), event.clone());
    journal::record(env, operator.clone(), event, timestamp)
}
