/// Append-only journal of locker events.
///
/// Every event published by the locker contract is also stored here under an
/// auto-incrementing id, so observers that missed the event stream can page
/// through the full history. Entries are never modified or deleted.
use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

use crate::{
    events::LockerEvent, DEFAULT_JOURNAL_PAGE_SIZE, JOURNAL_COUNTER_KEY, JOURNAL_ENTRY_KEY,
    MAX_JOURNAL_PAGE_SIZE, RECORD_TTL_EXTEND, RECORD_TTL_THRESHOLD,
};

// ============================================================================
// JOURNAL TYPES
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JournalEntry {
    /// Auto-incrementing id, starting at 1
    pub id: u64,
    /// Ledger timestamp of the committing invocation
    pub timestamp: u64,
    /// Address that triggered the transition
    pub operator: Address,
    pub event: LockerEvent,
}

/// Result of a paginated journal query
#[contracttype]
#[derive(Clone, Debug)]
pub struct JournalPage {
    pub entries: Vec<JournalEntry>,
    pub total_count: u64,
    pub start_id: u64,
    pub end_id: u64,
    pub has_more: bool,
}

// ============================================================================
// STORAGE
// ============================================================================

pub fn get_entry_counter(env: &Env) -> u64 {
    let key = Symbol::new(env, JOURNAL_COUNTER_KEY);
    env.storage().persistent().get::<_, u64>(&key).unwrap_or(0)
}

fn increment_entry_counter(env: &Env) -> u64 {
    let key = Symbol::new(env, JOURNAL_COUNTER_KEY);
    let next = get_entry_counter(env).saturating_add(1);
    env.storage().persistent().set(&key, &next);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
    next
}

fn store_entry(env: &Env, entry: &JournalEntry) {
    let key = (Symbol::new(env, JOURNAL_ENTRY_KEY), entry.id);
    env.storage().persistent().set(&key, entry);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

pub fn get_entry(env: &Env, entry_id: u64) -> Option<JournalEntry> {
    let key = (Symbol::new(env, JOURNAL_ENTRY_KEY), entry_id);
    env.storage().persistent().get(&key)
}

// ============================================================================
// RECORDING
// ============================================================================

/// Append `event` and return its entry id.
pub fn record(env: &Env, operator: Address, event: LockerEvent, timestamp: u64) -> u64 {
    let id = increment_entry_counter(env);
    let entry = JournalEntry {
        id,
        timestamp,
        operator,
        event,
    };
    store_entry(env, &entry);
    id
}

// ============================================================================
// QUERYING
// ============================================================================

/// Entries with ids in `[start_id, end_id]`, at most `max_results` of them.
///
/// `start_id == 0` means 1, `end_id` past the last entry is clamped, and
/// `max_results == 0` means the default page size.
pub fn query(env: &Env, start_id: u64, end_id: u64, max_results: u32) -> JournalPage {
    let total_count = get_entry_counter(env);
    let start = start_id.max(1);
    let end = end_id.min(total_count);
    let limit = match max_results {
        0 => DEFAULT_JOURNAL_PAGE_SIZE,
        n => n.min(MAX_JOURNAL_PAGE_SIZE),
    };

    let mut entries: Vec<JournalEntry> = Vec::new(env);
    if start > end {
        return JournalPage {
            entries,
            total_count,
            start_id: start,
            end_id: end,
            has_more: false,
        };
    }

    // Ids are dense: every id up to the counter has an entry.
    let last = end.min(start.saturating_add(u64::from(limit) - 1));
    for entry in (start..=last).filter_map(|id| get_entry(env, id)) {
        entries.push_back(entry);
    }

    JournalPage {
        entries,
        total_count,
        start_id: start,
        end_id: last,
        has_more: last < end,
    }
}
