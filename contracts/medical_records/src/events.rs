use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is constructed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub user_management: Address,
    pub timestamp: u64,
}

/// Event published when a new record is added.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_id: u64,
    pub owner: Address,
    pub author: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, user_management: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        user_management,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new record is added.
/// Only the linkage is published; the data hash stays in storage.
pub fn publish_record_added(env: &Env, record_id: u64, owner: Address, author: Address) {
    let topics = (symbol_short!("REC_ADD"), owner.clone(), author.clone());
    let data = RecordAddedEvent {
        record_id,
        owner,
        author,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
