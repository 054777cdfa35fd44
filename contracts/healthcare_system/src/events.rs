use soroban_sdk::{symbol_short, Address, Env};

use crate::Dependencies;

/// Event published when the contract is constructed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub dependencies: Dependencies,
    pub timestamp: u64,
}

/// Event published after a wiring run.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WiringCompletedEvent {
    pub caller: Address,
    pub added: u32,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, dependencies: Dependencies) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        dependencies,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes the number of edges a wiring run added; zero on a live system.
pub fn publish_wiring_completed(env: &Env, caller: Address, added: u32) {
    let topics = (symbol_short!("WIRED"), caller.clone());
    let data = WiringCompletedEvent {
        caller,
        added,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
