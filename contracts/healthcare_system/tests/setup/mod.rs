#![allow(dead_code)]

use access_control::{AccessControlContract, AccessControlContractClient};
use healthcare_system::{HealthcareSystemContract, HealthcareSystemContractClient, Role};
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String};
use user_management::{UserManagementContract, UserManagementContractClient};

pub struct TestContext {
    pub env: Env,
    pub users: UserManagementContractClient<'static>,
    pub records: MedicalRecordsContractClient<'static>,
    pub access: AccessControlContractClient<'static>,
    pub system: HealthcareSystemContractClient<'static>,
    pub admin: Address,
}

/// Deploys U, M(U), A(U, M) and H(U, M, A) in dependency order. No edges are
/// authorized, so every privileged path is still closed.
pub fn deploy() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let users_id = env.register(UserManagementContract, (admin.clone(),));
    let records_id = env.register(MedicalRecordsContract, (users_id.clone(),));
    let access_id = env.register(
        AccessControlContract,
        (users_id.clone(), records_id.clone()),
    );
    let system_id = env.register(
        HealthcareSystemContract,
        (users_id.clone(), records_id.clone(), access_id.clone()),
    );

    TestContext {
        users: UserManagementContractClient::new(&env, &users_id),
        records: MedicalRecordsContractClient::new(&env, &records_id),
        access: AccessControlContractClient::new(&env, &access_id),
        system: HealthcareSystemContractClient::new(&env, &system_id),
        env,
        admin,
    }
}

/// Deploys the system and authorizes every required edge.
pub fn deploy_wired() -> TestContext {
    let ctx = deploy();
    ctx.system.complete_wiring(&ctx.admin);
    ctx
}

/// Creates and registers a user for tests and returns its address.
pub fn create_test_user(ctx: &TestContext, role: Role, name: &str) -> Address {
    let user = Address::generate(&ctx.env);
    let name = String::from_str(&ctx.env, name);
    ctx.users.register_user(&ctx.admin, &user, &role, &name);
    user
}

/// Creates a record through the facade and returns its id.
pub fn create_test_record(ctx: &TestContext, author: &Address, owner: &Address, hash: &str) -> u64 {
    ctx.system
        .add_record(author, owner, &String::from_str(&ctx.env, hash))
}
