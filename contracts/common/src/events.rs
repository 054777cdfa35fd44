use crate::errors::ErrorContext;
use soroban_sdk::{symbol_short, Address, Env};

/// Event published when a grantor contract starts trusting a peer contract.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractAuthorizedEvent {
    pub grantor: Address,
    pub grantee: Address,
    pub caller: Address,
    pub timestamp: u64,
}

/// Event published when a grantor contract stops trusting a peer contract.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractRevokedEvent {
    pub grantor: Address,
    pub grantee: Address,
    pub caller: Address,
    pub timestamp: u64,
}

/// Event published when an operation is rejected.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug)]
pub struct ErrorEvent {
    pub error_code: u32,
    pub context: ErrorContext,
}

pub fn publish_contract_authorized(env: &Env, caller: Address, grantee: Address) {
    let topics = (symbol_short!("AUTH_ADD"), grantee.clone());
    let data = ContractAuthorizedEvent {
        grantor: env.current_contract_address(),
        grantee,
        caller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_revoked(env: &Env, caller: Address, grantee: Address) {
    let topics = (symbol_short!("AUTH_REV"), grantee.clone());
    let data = ContractRevokedEvent {
        grantor: env.current_contract_address(),
        grantee,
        caller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an error event carrying the full error context.
pub fn publish_error(env: &Env, error_code: u32, context: ErrorContext) {
    let topics = (symbol_short!("ERROR"), error_code);
    let data = ErrorEvent {
        error_code,
        context,
    };
    env.events().publish(topics, data);
}
