use soroban_sdk::contracterror;

/// Errors surfaced by the locker core and the hosting contract.
///
/// Discriminants are part of the contract ABI: clients match on
/// `Error(Contract, #n)`, so existing values must never be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LockerError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidMasterKey = 3,
    InvalidClaimKey = 4,
    AlreadyLocked = 5,
    NotYetLocked = 6,
    CapacityExceeded = 7,
    DeadlineInPast = 8,
    ClaimWindowExpired = 9,
    ClaimWindowStillOpen = 10,
    DeadlineNotExtended = 11,
    NoDeadlineToExtend = 12,
    ItemNotFound = 13,
    NotEligibleForDestruction = 14,
    DisallowedItemType = 15,
    DuplicateItem = 16,
    LockerNotFound = 17,
    KeyNotFound = 18,
    NotKeyHolder = 19,
    /// The custody contract refused a deposit or withdrawal.
    CustodyRejected = 20,
}

/// Errors surfaced by the custody vault.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CustodyError {
    AlreadyPending = 1,
    NotPending = 2,
    InvalidAmount = 3,
}

/// Coarse failure class of a [`LockerError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// A key was presented against a locker it is not bound to.
    Binding,
    /// The operation is not valid in the locker's lifecycle state.
    State,
    Capacity,
    Timing,
    NotFound,
    Precondition,
    Authorization,
    Configuration,
}

impl LockerError {
    pub fn class(self) -> ErrorClass {
        match self {
            LockerError::InvalidMasterKey | LockerError::InvalidClaimKey => ErrorClass::Binding,
            LockerError::AlreadyLocked | LockerError::NotYetLocked => ErrorClass::State,
            LockerError::CapacityExceeded => ErrorClass::Capacity,
            LockerError::DeadlineInPast
            | LockerError::ClaimWindowExpired
            | LockerError::ClaimWindowStillOpen
            | LockerError::DeadlineNotExtended
            | LockerError::NoDeadlineToExtend => ErrorClass::Timing,
            LockerError::ItemNotFound | LockerError::LockerNotFound | LockerError::KeyNotFound => {
                ErrorClass::NotFound
            }
            LockerError::NotEligibleForDestruction
            | LockerError::DisallowedItemType
            | LockerError::DuplicateItem
            | LockerError::CustodyRejected => ErrorClass::Precondition,
            LockerError::NotKeyHolder => ErrorClass::Authorization,
            LockerError::AlreadyInitialized | LockerError::NotInitialized => {
                ErrorClass::Configuration
            }
        }
    }
}
