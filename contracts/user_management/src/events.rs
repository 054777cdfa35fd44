use common::Role;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is constructed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when an identity's role changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub caller: Address,
    pub target: Address,
    pub previous: Role,
    pub role: Role,
    pub timestamp: u64,
}

/// Event published when a new user is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRegisteredEvent {
    pub user: Address,
    pub role: Role,
    pub name: String,
    pub registered_by: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a role is set, including the role it replaced.
pub fn publish_role_changed(
    env: &Env,
    caller: Address,
    target: Address,
    previous: Role,
    role: Role,
) {
    let topics = (symbol_short!("ROLE_SET"), target.clone());
    let data = RoleChangedEvent {
        caller,
        target,
        previous,
        role,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new user is registered.
/// `registered_by` is the admin or the contract that performed the registration.
pub fn publish_user_registered(
    env: &Env,
    user: Address,
    role: Role,
    name: String,
    registered_by: Address,
) {
    let topics = (symbol_short!("USR_REG"), user.clone());
    let data = UserRegisteredEvent {
        user,
        role,
        name,
        registered_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
