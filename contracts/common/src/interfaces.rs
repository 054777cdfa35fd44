//! Cross-contract interfaces.
//!
//! Each trait mirrors the subset of a contract's public surface that peer
//! contracts call. `#[contractclient]` generates a typed client per trait, so
//! contracts reach each other by address without linking each other's code.

use soroban_sdk::{contractclient, Address, Env, String};

use crate::{AuthorizationError, MedicalRecord, Role};

/// Graph surface exposed by every contract that has privileged entry points.
#[contractclient(name = "AuthorizationGraphClient")]
pub trait AuthorizationGraphInterface {
    fn authorize(env: Env, caller: Address, grantee: Address) -> Result<bool, AuthorizationError>;
    fn revoke(env: Env, caller: Address, grantee: Address) -> Result<bool, AuthorizationError>;
    fn is_authorized(env: Env, grantee: Address) -> bool;
}

#[contractclient(name = "UserManagementClient")]
pub trait UserManagementInterface {
    fn get_role(env: Env, identity: Address) -> Role;
    fn ownership_epoch(env: Env, identity: Address) -> u32;
    fn admin_count(env: Env) -> u32;
    fn register_user_for(
        env: Env,
        caller_contract: Address,
        user: Address,
        name: String,
    ) -> Result<(), AuthorizationError>;
}

#[contractclient(name = "MedicalRecordsClient")]
pub trait MedicalRecordsInterface {
    fn get_record_owner(env: Env, record_id: u64) -> Result<Address, AuthorizationError>;
    fn create_record_for(
        env: Env,
        caller_contract: Address,
        author: Address,
        owner: Address,
        data_hash: String,
    ) -> Result<u64, AuthorizationError>;
    fn read_record_for(
        env: Env,
        caller_contract: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError>;
}

#[contractclient(name = "AccessControlClient")]
pub trait AccessControlInterface {
    fn has_access(env: Env, record_id: u64, identity: Address) -> bool;
    fn grant_access_for(
        env: Env,
        caller_contract: Address,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<u64, AuthorizationError>;
    fn revoke_access_for(
        env: Env,
        caller_contract: Address,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<(), AuthorizationError>;
    fn read_record_for(
        env: Env,
        caller_contract: Address,
        reader: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError>;
}

/// Resolves `identity`'s current role through the UserManagement contract.
///
/// The role is fetched on every call; nothing is cached between calls.
pub fn role_of(env: &Env, user_management: &Address, identity: &Address) -> Role {
    UserManagementClient::new(env, user_management).get_role(identity)
}
