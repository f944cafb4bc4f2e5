use soroban_sdk::{Address, Symbol};

use crate::{
    custody::Asset, errors::LockerError, CLAIM_KEY_TAG, MASTER_KEY_TAG, MAX_RECORD_PAYLOAD_SIZE,
    TOKEN_TAG,
};

/// Capability tokens must never end up inside a locker as items.
pub fn validate_item_type(type_tag: &Symbol) -> Result<(), LockerError> {
    if *type_tag == MASTER_KEY_TAG || *type_tag == CLAIM_KEY_TAG {
        return Err(LockerError::DisallowedItemType);
    }
    Ok(())
}

/// Rejects assets a locker hosted by `locker_contract` must not accept.
///
/// Besides the reserved key tags, a token issued by the locker contract
/// itself is refused. Records may not claim the `token` tag, and their
/// payloads are bounded.
pub fn validate_asset(asset: &Asset, locker_contract: &Address) -> Result<(), LockerError> {
    validate_item_type(&asset.type_tag())?;
    match asset {
        Asset::Token(token, _) => {
            if token == locker_contract {
                return Err(LockerError::DisallowedItemType);
            }
        }
        Asset::Record(tag, payload) => {
            if *tag == TOKEN_TAG || payload.len() > MAX_RECORD_PAYLOAD_SIZE {
                return Err(LockerError::DisallowedItemType);
            }
        }
    }
    Ok(())
}
