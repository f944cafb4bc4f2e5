use soroban_sdk::{symbol_short, Symbol};

// Item type tags
pub const TOKEN_TAG: Symbol = symbol_short!("token");
pub const MASTER_KEY_TAG: Symbol = symbol_short!("masterkey");
pub const CLAIM_KEY_TAG: Symbol = symbol_short!("claimkey");

// Event topics
pub const LOCKER_TOPIC: Symbol = symbol_short!("locker");
pub const CUSTODY_TOPIC: Symbol = symbol_short!("custody");

// Journal storage
pub const JOURNAL_COUNTER_KEY: &str = "journal_counter";
pub const JOURNAL_ENTRY_KEY: &str = "journal_entry";
