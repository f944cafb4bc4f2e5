//! End-to-end lifecycle runs against a real custody vault.

#![cfg(test)]

use soroban_sdk::testutils::Address as _;
use soroban_sdk::{symbol_short, Address, Env};

use keylocker_lib::{LockerError, LockerState};

use crate::test::{assert_custody_matches, record, set_time, setup};

const NOW: u64 = 10_000;

#[test]
fn test_claim_within_window_then_reclaim_after_expiry() {
    let env = Env::default();
    let (client, vault) = setup(&env);
    let creator = Address::generate(&env);
    let claimant = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;
    let item_a = record(&env, symbol_short!("art"), b"A");
    let item_b = record(&env, symbol_short!("deed"), b"B");
    let a = client.add_item(&creator, &master.id, &locker_id, &item_a);
    let b = client.add_item(&creator, &master.id, &locker_id, &item_b);
    assert_eq!(client.get_locker(&locker_id).item_count, 2);
    assert_custody_matches(&client, &vault, locker_id);

    let claim = client.lock(&creator, &master.id, &locker_id, &Some(NOW + 1_000));
    assert_eq!(claim.locker_id, locker_id);
    assert_eq!(client.get_locker(&locker_id).claim_key_id, Some(claim.id));
    assert_eq!(client.locker_state(&locker_id), LockerState::Locked);

    let late = client.try_add_item(
        &creator,
        &master.id,
        &locker_id,
        &record(&env, symbol_short!("note"), b"C"),
    );
    assert_eq!(late, Err(Ok(LockerError::AlreadyLocked)));

    client.transfer_claim_key(&creator, &claim.id, &claimant);

    set_time(&env, NOW + 500);
    let claimed = client.claim_item(&claimant, &claim.id, &locker_id, &a);
    assert_eq!(claimed, item_a);
    assert_eq!(client.get_locker(&locker_id).item_count, 1);
    assert!(!vault.is_pending(&client.address, &locker_id, &a));
    assert_custody_matches(&client, &vault, locker_id);

    set_time(&env, NOW + 1_500);
    assert_eq!(
        client.try_claim_item(&claimant, &claim.id, &locker_id, &b),
        Err(Ok(LockerError::ClaimWindowExpired))
    );

    let reclaimed = client.reclaim_item(&creator, &master.id, &locker_id, &b);
    assert_eq!(reclaimed, item_b);
    assert_eq!(client.get_locker(&locker_id).item_count, 0);
    assert_eq!(client.locker_state(&locker_id), LockerState::Eligible);
    assert_custody_matches(&client, &vault, locker_id);

    client.destroy(&creator, &locker_id);
    assert_eq!(
        client.try_get_locker(&locker_id),
        Err(Ok(LockerError::LockerNotFound))
    );
}

#[test]
fn test_no_deadline_destroyable_after_last_claim() {
    let env = Env::default();
    let (client, vault) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;
    let item = client.add_item(
        &creator,
        &master.id,
        &locker_id,
        &record(&env, symbol_short!("deed"), b"A"),
    );
    let claim = client.lock(&creator, &master.id, &locker_id, &None);

    // Without a deadline the reclaim window never opens.
    set_time(&env, NOW + 1_000_000);
    assert_eq!(
        client.try_reclaim_item(&creator, &master.id, &locker_id, &item),
        Err(Ok(LockerError::ClaimWindowStillOpen))
    );
    assert_eq!(
        client.try_destroy(&creator, &locker_id),
        Err(Ok(LockerError::NotEligibleForDestruction))
    );

    client.claim_item(&creator, &claim.id, &locker_id, &item);
    assert_custody_matches(&client, &vault, locker_id);
    assert_eq!(client.locker_state(&locker_id), LockerState::Eligible);

    client.destroy(&creator, &locker_id);
    assert_eq!(
        client.try_locker_state(&locker_id),
        Err(Ok(LockerError::LockerNotFound))
    );
}

#[test]
fn test_neither_claim_nor_reclaim_at_deadline() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;
    let item = client.add_item(
        &creator,
        &master.id,
        &locker_id,
        &record(&env, symbol_short!("deed"), b"A"),
    );
    let claim = client.lock(&creator, &master.id, &locker_id, &Some(NOW + 100));

    set_time(&env, NOW + 100);
    assert_eq!(
        client.try_claim_item(&creator, &claim.id, &locker_id, &item),
        Err(Ok(LockerError::ClaimWindowExpired))
    );
    assert_eq!(
        client.try_reclaim_item(&creator, &master.id, &locker_id, &item),
        Err(Ok(LockerError::ClaimWindowStillOpen))
    );
    assert_eq!(client.get_locker(&locker_id).item_count, 1);
}

#[test]
fn test_reclaim_before_lock_fails() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);

    let master = client.create(&creator);
    let item = client.add_item(
        &creator,
        &master.id,
        &master.locker_id,
        &record(&env, symbol_short!("deed"), b"A"),
    );

    assert_eq!(
        client.try_reclaim_item(&creator, &master.id, &master.locker_id, &item),
        Err(Ok(LockerError::NotYetLocked))
    );
}

#[test]
fn test_lock_twice_and_deadline_in_past() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;

    assert_eq!(
        client.try_lock(&creator, &master.id, &locker_id, &Some(NOW)),
        Err(Ok(LockerError::DeadlineInPast))
    );
    assert_eq!(client.get_locker(&locker_id).claim_key_id, None);

    client.lock(&creator, &master.id, &locker_id, &Some(NOW + 1));
    assert_eq!(
        client.try_lock(&creator, &master.id, &locker_id, &Some(NOW + 50)),
        Err(Ok(LockerError::AlreadyLocked))
    );
    assert_eq!(client.get_locker(&locker_id).claim_deadline, Some(NOW + 1));
}

#[test]
fn test_claim_unknown_item() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let claim = client.lock(&creator, &master.id, &master.locker_id, &None);

    assert_eq!(
        client.try_claim_item(&creator, &claim.id, &master.locker_id, &404),
        Err(Ok(LockerError::ItemNotFound))
    );
}

#[test]
fn test_set_deadline_only_extends() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;

    assert_eq!(
        client.try_set_deadline(&creator, &master.id, &locker_id, &(NOW + 10)),
        Err(Ok(LockerError::NoDeadlineToExtend))
    );

    client.lock(&creator, &master.id, &locker_id, &Some(NOW + 100));

    for shorter in [NOW + 100, NOW + 50] {
        assert_eq!(
            client.try_set_deadline(&creator, &master.id, &locker_id, &shorter),
            Err(Ok(LockerError::DeadlineNotExtended))
        );
    }

    client.set_deadline(&creator, &master.id, &locker_id, &(NOW + 200));
    assert_eq!(client.get_locker(&locker_id).claim_deadline, Some(NOW + 200));
}

#[test]
fn test_extension_reopens_claim_window() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;
    let item = client.add_item(
        &creator,
        &master.id,
        &locker_id,
        &record(&env, symbol_short!("deed"), b"A"),
    );
    let claim = client.lock(&creator, &master.id, &locker_id, &Some(NOW + 100));

    set_time(&env, NOW + 150);
    assert_eq!(
        client.try_claim_item(&creator, &claim.id, &locker_id, &item),
        Err(Ok(LockerError::ClaimWindowExpired))
    );

    client.set_deadline(&creator, &master.id, &locker_id, &(NOW + 300));
    client.claim_item(&creator, &claim.id, &locker_id, &item);
    assert_eq!(client.get_locker(&locker_id).item_count, 0);
}

#[test]
fn test_destroy_requires_empty_registry() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    let stranger = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;
    client.add_item(
        &creator,
        &master.id,
        &locker_id,
        &record(&env, symbol_short!("deed"), b"A"),
    );
    client.lock(&creator, &master.id, &locker_id, &Some(NOW + 10));

    set_time(&env, NOW + 20);
    assert_eq!(
        client.try_destroy(&stranger, &locker_id),
        Err(Ok(LockerError::NotEligibleForDestruction))
    );
}

#[test]
fn test_destroy_before_expiry_fails_even_when_empty() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    set_time(&env, NOW);

    let master = client.create(&creator);
    let locker_id = master.locker_id;
    client.lock(&creator, &master.id, &locker_id, &Some(NOW + 10));

    assert_eq!(
        client.try_destroy(&creator, &locker_id),
        Err(Ok(LockerError::NotEligibleForDestruction))
    );

    set_time(&env, NOW + 11);
    client.destroy(&creator, &locker_id);
}

#[test]
fn test_empty_open_locker_is_destroyable() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let creator = Address::generate(&env);
    let stranger = Address::generate(&env);

    let master = client.create(&creator);
    client.destroy(&stranger, &master.locker_id);

    // The key outlives the locker but opens nothing.
    assert_eq!(client.get_master_key(&master.id), master);
    assert_eq!(
        client.try_lock(&creator, &master.id, &master.locker_id, &None),
        Err(Ok(LockerError::LockerNotFound))
    );
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use soroban_sdk::testutils::Address as _;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_item_count_tracks_custody(adds in 1..12u32, claims in 0..12u32) {
            let env = Env::default();
            let (client, vault) = setup(&env);
            let creator = Address::generate(&env);
            set_time(&env, NOW);

            let master = client.create(&creator);
            let locker_id = master.locker_id;
            let mut items = std::vec::Vec::new();
            for i in 0..adds {
                let id = client.add_item(
                    &creator,
                    &master.id,
                    &locker_id,
                    &record(&env, symbol_short!("note"), &i.to_be_bytes()),
                );
                items.push(id);
            }
            let claim = client.lock(&creator, &master.id, &locker_id, &None);

            for id in items.iter().take(claims as usize) {
                client.claim_item(&creator, &claim.id, &locker_id, id);
                assert_custody_matches(&client, &vault, locker_id);
            }

            let expected = adds - claims.min(adds);
            prop_assert_eq!(client.get_locker(&locker_id).item_count, expected);
            prop_assert_eq!(vault.slot_size(&client.address, &locker_id), expected);
        }

        #[test]
        fn prop_claim_and_reclaim_never_both_allowed(
            deadline_offset in 1..1_000u64,
            probe_offset in 0..2_000u64,
        ) {
            let env = Env::default();
            let (client, _) = setup(&env);
            let creator = Address::generate(&env);
            set_time(&env, NOW);

            let master = client.create(&creator);
            let locker_id = master.locker_id;
            let item = client.add_item(
                &creator,
                &master.id,
                &locker_id,
                &record(&env, symbol_short!("deed"), b"A"),
            );
            let claim = client.lock(&creator, &master.id, &locker_id, &Some(NOW + deadline_offset));

            set_time(&env, NOW + probe_offset);
            let claim_ok = client.try_claim_item(&creator, &claim.id, &locker_id, &item).is_ok();
            // A successful claim would empty the locker; only probe reclaim otherwise.
            let reclaim_ok = !claim_ok
                && client.try_reclaim_item(&creator, &master.id, &locker_id, &item).is_ok();

            prop_assert!(!(claim_ok && reclaim_ok));
            prop_assert_eq!(claim_ok, probe_offset < deadline_offset);
            prop_assert_eq!(reclaim_ok, probe_offset > deadline_offset);
        }

        #[test]
        fn prop_deadline_never_decreases(
            initial in 1..1_000u64,
            proposals in prop::collection::vec(0..3_000u64, 1..8),
        ) {
            let env = Env::default();
            let (client, _) = setup(&env);
            let creator = Address::generate(&env);
            set_time(&env, NOW);

            let master = client.create(&creator);
            let locker_id = master.locker_id;
            client.lock(&creator, &master.id, &locker_id, &Some(NOW + initial));

            let mut current = NOW + initial;
            for proposal in proposals {
                let proposed = NOW + proposal;
                let result = client.try_set_deadline(&creator, &master.id, &locker_id, &proposed);
                prop_assert_eq!(result.is_ok(), proposed > current);

                let stored = client.get_locker(&locker_id).claim_deadline;
                prop_assert!(stored >= Some(current));
                if let Some(stored) = stored {
                    current = stored;
                }
            }
        }
    }
}
