#![allow(clippy::unwrap_used, clippy::expect_used)]

mod setup;

use healthcare_system::{AuthorizationError, Role};
use setup::{create_test_record, create_test_user, deploy_wired};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, String};

#[test]
fn test_patient_journey() {
    let ctx = deploy_wired();
    let patient = Address::generate(&ctx.env);
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");

    ctx.system
        .register_patient(&patient, &String::from_str(&ctx.env, "Pat"));
    assert_eq!(ctx.users.get_role(&patient), Role::Patient);
    assert_eq!(
        ctx.users.get_user(&patient).name,
        String::from_str(&ctx.env, "Pat")
    );

    let record_id = create_test_record(&ctx, &provider, &patient, "QmVisit");
    assert_eq!(ctx.records.get_record_owner(&record_id), patient);

    assert_eq!(
        ctx.system.try_read_record(&provider, &record_id),
        Err(Ok(AuthorizationError::AccessDenied))
    );

    ctx.system.share_record(&patient, &record_id, &provider);
    let record = ctx.system.read_record(&provider, &record_id);
    assert_eq!(record.author, provider);
    assert_eq!(record.data_hash, String::from_str(&ctx.env, "QmVisit"));

    ctx.system.unshare_record(&patient, &record_id, &provider);
    assert_eq!(
        ctx.system.try_read_record(&provider, &record_id),
        Err(Ok(AuthorizationError::AccessDenied))
    );
    assert_eq!(ctx.access.grant_history(&record_id, &provider).len(), 1);
}

#[test]
fn test_register_patient_twice_fails() {
    let ctx = deploy_wired();
    let patient = Address::generate(&ctx.env);
    let name = String::from_str(&ctx.env, "Pat");

    ctx.system.register_patient(&patient, &name);
    assert_eq!(
        ctx.system.try_register_patient(&patient, &name),
        Err(Ok(AuthorizationError::AlreadyRegistered))
    );
}

#[test]
fn test_register_patient_rejects_bad_name() {
    let ctx = deploy_wired();
    let patient = Address::generate(&ctx.env);

    assert_eq!(
        ctx.system
            .try_register_patient(&patient, &String::from_str(&ctx.env, "")),
        Err(Ok(AuthorizationError::InvalidName))
    );
    assert_eq!(ctx.users.get_role(&patient), Role::Unassigned);
}

#[test]
fn test_callee_errors_pass_through_the_facade() {
    let ctx = deploy_wired();
    let patient = create_test_user(&ctx, Role::Patient, "Pat");
    let insurer = create_test_user(&ctx, Role::Insurer, "Acme");
    let stranger = Address::generate(&ctx.env);

    assert_eq!(
        ctx.system
            .try_add_record(&insurer, &patient, &String::from_str(&ctx.env, "QmClaim")),
        Err(Ok(AuthorizationError::InsufficientRole))
    );

    let record_id = create_test_record(&ctx, &patient, &patient, "QmOwn");
    assert_eq!(
        ctx.system.try_share_record(&patient, &record_id, &stranger),
        Err(Ok(AuthorizationError::UnknownIdentity))
    );
    assert_eq!(
        ctx.system.try_share_record(&insurer, &record_id, &insurer),
        Err(Ok(AuthorizationError::AccessDenied))
    );
    assert_eq!(
        ctx.system.try_unshare_record(&patient, &record_id, &insurer),
        Err(Ok(AuthorizationError::GrantNotFound))
    );
    assert_eq!(
        ctx.system.try_read_record(&patient, &99),
        Err(Ok(AuthorizationError::RecordNotFound))
    );
}

#[test]
fn test_admin_shares_on_behalf_of_owner() {
    let ctx = deploy_wired();
    let patient = create_test_user(&ctx, Role::Patient, "Pat");
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");
    let record_id = create_test_record(&ctx, &patient, &patient, "QmOwn");

    ctx.system.share_record(&ctx.admin, &record_id, &provider);
    assert!(ctx.access.has_access(&record_id, &provider));

    // Only the owner may take it back.
    assert_eq!(
        ctx.system.try_unshare_record(&ctx.admin, &record_id, &provider),
        Err(Ok(AuthorizationError::AccessDenied))
    );
    ctx.system.unshare_record(&patient, &record_id, &provider);
    assert!(!ctx.access.has_access(&record_id, &provider));
}

#[test]
fn test_role_changes_apply_on_next_call() {
    let ctx = deploy_wired();
    let patient = create_test_user(&ctx, Role::Patient, "Pat");
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");

    create_test_record(&ctx, &provider, &patient, "QmFirst");
    ctx.users.set_role(&ctx.admin, &provider, &Role::Insurer);

    assert_eq!(
        ctx.system
            .try_add_record(&provider, &patient, &String::from_str(&ctx.env, "QmSecond")),
        Err(Ok(AuthorizationError::InsufficientRole))
    );
    assert_eq!(ctx.records.get_record_count(), 1);
}
