#![no_main]

use access_control::{AccessControlContract, AccessControlContractClient};
use arbitrary::Arbitrary;
use common::interfaces::AuthorizationGraphClient;
use healthcare_system::{HealthcareSystemContract, HealthcareSystemContractClient};
use libfuzzer_sys::fuzz_target;
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String};
use user_management::{
    AuthorizationError, Role, UserManagementContract, UserManagementContractClient,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    SetRole { caller: u8, target: u8, role: u8 },
    Authorize { caller: u8, grantor: u8, grantee: u8 },
    Revoke { caller: u8, grantor: u8, grantee: u8 },
    AddRecord { author: u8, owner: u8, hash_len: u8 },
    Share { caller: u8, record: u8, grantee: u8 },
    Unshare { caller: u8, record: u8, grantee: u8 },
    Register { name_len: u8 },
    Wire { caller: u8 },
}

fn role_from(value: u8) -> Role {
    match value % 5 {
        0 => Role::Unassigned,
        1 => Role::Patient,
        2 => Role::HealthcareProvider,
        3 => Role::Insurer,
        _ => Role::Admin,
    }
}

fuzz_target!(|actions: Vec<FuzzAction>| {
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

    let users = UserManagementContractClient::new(&env, &users_id);
    let records = MedicalRecordsContractClient::new(&env, &records_id);
    let access = AccessControlContractClient::new(&env, &access_id);
    let system = HealthcareSystemContractClient::new(&env, &system_id);

    // The facade owns no edges, so only U, M and A act as grantors.
    let contracts = [
        users_id.clone(),
        records_id.clone(),
        access_id.clone(),
        system_id.clone(),
    ];
    let mut identities = vec![admin.clone()];
    for _ in 0..4 {
        identities.push(Address::generate(&env));
    }
    let pick = |index: u8| identities[index as usize % identities.len()].clone();

    for action in actions {
        match action {
            FuzzAction::SetRole {
                caller,
                target,
                role,
            } => {
                let caller = pick(caller);
                let target = pick(target);
                let before = users.get_role(&target);
                let caller_was_admin = users.get_role(&caller) == Role::Admin;

                let result = users.try_set_role(&caller, &target, &role_from(role));
                if caller_was_admin {
                    assert!(result.is_ok());
                    assert_eq!(users.get_role(&target), role_from(role));
                } else {
                    assert_eq!(result, Err(Ok(AuthorizationError::InsufficientRole)));
                    assert_eq!(users.get_role(&target), before);
                }
            }
            FuzzAction::Authorize {
                caller,
                grantor,
                grantee,
            } => {
                let caller = pick(caller);
                let grantor = &contracts[grantor as usize % 3];
                let grantee = &contracts[grantee as usize % contracts.len()];
                let caller_is_admin = users.get_role(&caller) == Role::Admin;
                let graph = AuthorizationGraphClient::new(&env, grantor);
                let before = graph.is_authorized(grantee);

                let result = graph.try_authorize(&caller, grantee);
                if !caller_is_admin {
                    assert!(result.is_err());
                    assert_eq!(graph.is_authorized(grantee), before);
                } else if grantor != grantee {
                    assert!(graph.is_authorized(grantee));
                }
            }
            FuzzAction::Revoke {
                caller,
                grantor,
                grantee,
            } => {
                let caller = pick(caller);
                let grantor = &contracts[grantor as usize % 3];
                let grantee = &contracts[grantee as usize % contracts.len()];
                let caller_is_admin = users.get_role(&caller) == Role::Admin;
                let graph = AuthorizationGraphClient::new(&env, grantor);
                let before = graph.is_authorized(grantee);

                let _ = graph.try_revoke(&caller, grantee);
                if caller_is_admin {
                    assert!(!graph.is_authorized(grantee));
                } else {
                    assert_eq!(graph.is_authorized(grantee), before);
                }
            }
            FuzzAction::AddRecord {
                author,
                owner,
                hash_len,
            } => {
                let hash = "a".repeat(hash_len as usize % 140);
                let count = records.get_record_count();
                let result = system.try_add_record(
                    &pick(author),
                    &pick(owner),
                    &String::from_str(&env, &hash),
                );
                if !records.is_authorized(&system_id) {
                    assert_eq!(result, Err(Ok(AuthorizationError::UnauthorizedContract)));
                    assert_eq!(records.get_record_count(), count);
                }
            }
            FuzzAction::Share {
                caller,
                record,
                grantee,
            } => {
                let record_id = u64::from(record % 8);
                let grantee = pick(grantee);
                let result = system.try_share_record(&pick(caller), &record_id, &grantee);
                if !access.is_authorized(&system_id) {
                    assert_eq!(result, Err(Ok(AuthorizationError::UnauthorizedContract)));
                } else if result.is_ok() {
                    assert!(access.has_access(&record_id, &grantee));
                }
            }
            FuzzAction::Unshare {
                caller,
                record,
                grantee,
            } => {
                let record_id = u64::from(record % 8);
                let result = system.try_unshare_record(&pick(caller), &record_id, &pick(grantee));
                if !access.is_authorized(&system_id) {
                    assert_eq!(result, Err(Ok(AuthorizationError::UnauthorizedContract)));
                }
            }
            FuzzAction::Register { name_len } => {
                let user = Address::generate(&env);
                let name = "n".repeat(name_len as usize % 80);
                let result = system.try_register_patient(&user, &String::from_str(&env, &name));
                if !users.is_authorized(&system_id) {
                    assert_eq!(result, Err(Ok(AuthorizationError::UnauthorizedContract)));
                    assert_eq!(users.get_role(&user), Role::Unassigned);
                } else if result.is_ok() {
                    assert_eq!(users.get_role(&user), Role::Patient);
                }
            }
            FuzzAction::Wire { caller } => {
                let caller = pick(caller);
                let caller_is_admin = users.get_role(&caller) == Role::Admin;
                let result = system.try_complete_wiring(&caller);
                if caller_is_admin {
                    assert!(result.is_ok());
                    assert!(system.wiring_report(&caller).live);
                } else {
                    assert_eq!(result, Err(Ok(AuthorizationError::InsufficientRole)));
                }
            }
        }
    }
});
