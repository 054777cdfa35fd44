use super::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Env;

#[test]
fn test_dependencies_are_stored() {
    let env = Env::default();
    let users = Address::generate(&env);
    let records = Address::generate(&env);
    let access = Address::generate(&env);

    let contract_id = env.register(
        HealthcareSystemContract,
        (users.clone(), records.clone(), access.clone()),
    );
    let client = HealthcareSystemContractClient::new(&env, &contract_id);

    assert_eq!(
        client.dependencies(),
        Dependencies {
            user_management: users,
            medical_records: records,
            access_control: access,
        }
    );
}

#[test]
fn test_required_edges_cover_every_privileged_path() {
    let env = Env::default();
    let users = Address::generate(&env);
    let records = Address::generate(&env);
    let access = Address::generate(&env);

    let contract_id = env.register(
        HealthcareSystemContract,
        (users.clone(), records.clone(), access.clone()),
    );
    let client = HealthcareSystemContractClient::new(&env, &contract_id);

    let edges = client.required_edges();
    assert_eq!(edges.len(), 4);

    let expect = |grantor: &Address, grantee: &Address| AuthorizationEdge {
        grantor: grantor.clone(),
        grantee: grantee.clone(),
    };
    assert!(edges.contains(expect(&users, &contract_id)));
    assert!(edges.contains(expect(&records, &contract_id)));
    assert!(edges.contains(expect(&access, &contract_id)));
    assert!(edges.contains(expect(&records, &access)));
}
