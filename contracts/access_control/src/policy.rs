use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

const POLICY: Symbol = symbol_short!("POLICY");

/// Sharing rules that are configurable at runtime by an Admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessPolicy {
    /// Whether a Patient may be the grantee of another patient's record.
    pub allow_patient_to_patient: bool,
    /// Whether grants stop counting once their owner loses ownership rights.
    pub cascade_on_demotion: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            allow_patient_to_patient: false,
            cascade_on_demotion: true,
        }
    }
}

pub fn get(env: &Env) -> AccessPolicy {
    env.storage()
        .instance()
        .get(&POLICY)
        .unwrap_or_default()
}

pub fn set(env: &Env, policy: &AccessPolicy) {
    env.storage().instance().set(&POLICY, policy);
}
