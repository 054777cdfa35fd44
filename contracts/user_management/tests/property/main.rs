#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! ```bash
//! cargo test -p user_management --test property
//! ```
//!
//! To increase the number of generated cases:
//!
//! ```bash
//! PROPTEST_CASES=512 cargo test -p user_management --test property
//! ```

mod graph;
mod roles;

use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use user_management::{Role, UserManagementContract, UserManagementContractClient};

/// Generator-friendly mirror of [`Role`].
#[derive(Arbitrary, Clone, Copy, Debug)]
pub enum RoleChoice {
    Unassigned,
    Patient,
    HealthcareProvider,
    Insurer,
    Admin,
}

impl RoleChoice {
    pub fn role(self) -> Role {
        match self {
            RoleChoice::Unassigned => Role::Unassigned,
            RoleChoice::Patient => Role::Patient,
            RoleChoice::HealthcareProvider => Role::HealthcareProvider,
            RoleChoice::Insurer => Role::Insurer,
            RoleChoice::Admin => Role::Admin,
        }
    }
}

pub fn setup() -> (Env, UserManagementContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let contract_id = env.register(UserManagementContract, (admin.clone(),));
    let client = UserManagementContractClient::new(&env, &contract_id);

    (env, client, admin)
}
