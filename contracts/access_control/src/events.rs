use soroban_sdk::{symbol_short, Address, Env};

use crate::policy::AccessPolicy;

/// Event published when the contract is constructed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub user_management: Address,
    pub medical_records: Address,
    pub timestamp: u64,
}

/// Event published when access is granted to a record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub grant_id: u64,
    pub record_id: u64,
    pub owner: Address,
    pub grantee: Address,
    pub granted_by: Address,
    pub timestamp: u64,
}

/// Event published when access is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub grant_id: u64,
    pub record_id: u64,
    pub grantee: Address,
    pub revoked_by: Address,
    pub timestamp: u64,
}

/// Event published when a record is read through the access controller.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordReadEvent {
    pub record_id: u64,
    pub reader: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyUpdatedEvent {
    pub caller: Address,
    pub policy: AccessPolicy,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, user_management: Address, medical_records: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        user_management,
        medical_records,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when access is granted to a record.
pub fn publish_access_granted(
    env: &Env,
    grant_id: u64,
    record_id: u64,
    owner: Address,
    grantee: Address,
    granted_by: Address,
) {
    let topics = (symbol_short!("ACC_GRT"), owner.clone(), grantee.clone());
    let data = AccessGrantedEvent {
        grant_id,
        record_id,
        owner,
        grantee,
        granted_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when access to a record is revoked.
/// Also emitted for every grant closed by an owner purge.
pub fn publish_access_revoked(
    env: &Env,
    grant_id: u64,
    record_id: u64,
    grantee: Address,
    revoked_by: Address,
) {
    let topics = (symbol_short!("ACC_REV"), record_id, grantee.clone());
    let data = AccessRevokedEvent {
        grant_id,
        record_id,
        grantee,
        revoked_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_read(env: &Env, record_id: u64, reader: Address) {
    let topics = (symbol_short!("REC_READ"), reader.clone());
    let data = RecordReadEvent {
        record_id,
        reader,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_policy_updated(env: &Env, caller: Address, policy: AccessPolicy) {
    let topics = (symbol_short!("POL_SET"),);
    let data = PolicyUpdatedEvent {
        caller,
        policy,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
