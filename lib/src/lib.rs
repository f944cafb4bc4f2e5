#![no_std]

#[cfg(test)]
extern crate std;

pub mod custody;
pub mod errors;
pub mod events;
pub mod journal;
pub mod keys;
pub mod lifecycle;
pub mod registry;
pub mod storage_keys;
pub mod types;
pub mod validation;

pub use custody::{Asset, CustodyClient, CustodyInterface};
pub use errors::{CustodyError, ErrorClass, LockerError};
pub use events::{EventKind, LockerEvent};
pub use keys::{ClaimKey, KeyKind, MasterKey};
pub use registry::ItemRegistry;
pub use storage_keys::*;
pub use types::*;

/// Limits
pub const MAX_ITEM_COUNT: u32 = 255;
pub const MAX_RECORD_PAYLOAD_SIZE: u32 = 4096;

// Journal paging
pub const DEFAULT_JOURNAL_PAGE_SIZE: u32 = 100;
pub const MAX_JOURNAL_PAGE_SIZE: u32 = 500;

// Storage TTLs, in ledgers (~5s each)
pub const INSTANCE_TTL_THRESHOLD: u32 = 17_280; // ~1 day
pub const INSTANCE_TTL_EXTEND: u32 = 518_400; // ~30 days
pub const RECORD_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const RECORD_TTL_EXTEND: u32 = 1_036_800; // ~60 days
