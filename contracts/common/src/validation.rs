//! Caller-side input validation. Failures here are validation errors, kept
//! apart from authorization failures.

use soroban_sdk::String;

use crate::AuthorizationError;

pub const MIN_NAME_LENGTH: u32 = 1;
pub const MAX_NAME_LENGTH: u32 = 64;

/// Minimum length for a data reference (IPFS CID or similar)
pub const MIN_DATA_HASH_LENGTH: u32 = 1;
pub const MAX_DATA_HASH_LENGTH: u32 = 128;

pub fn validate_name(name: &String) -> Result<(), AuthorizationError> {
    let len = name.len();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(AuthorizationError::InvalidName);
    }
    Ok(())
}

pub fn validate_data_hash(data_hash: &String) -> Result<(), AuthorizationError> {
    let len = data_hash.len();
    if !(MIN_DATA_HASH_LENGTH..=MAX_DATA_HASH_LENGTH).contains(&len) {
        return Err(AuthorizationError::InvalidDataHash);
    }
    Ok(())
}
