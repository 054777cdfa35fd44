#![allow(clippy::unwrap_used, clippy::expect_used)]

mod setup;

use healthcare_system::{AuthorizationError, Role};
use setup::{create_test_record, create_test_user, deploy, deploy_wired};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, String};

#[test]
fn test_fresh_deployment_denies_every_privileged_path() {
    let ctx = deploy();
    let patient = create_test_user(&ctx, Role::Patient, "Pat");
    let newcomer = Address::generate(&ctx.env);

    assert_eq!(
        ctx.system
            .try_register_patient(&newcomer, &String::from_str(&ctx.env, "New")),
        Err(Ok(AuthorizationError::UnauthorizedContract))
    );
    assert_eq!(
        ctx.system
            .try_add_record(&patient, &patient, &String::from_str(&ctx.env, "QmA")),
        Err(Ok(AuthorizationError::UnauthorizedContract))
    );
    assert_eq!(ctx.users.get_role(&newcomer), Role::Unassigned);
    assert_eq!(ctx.records.get_record_count(), 0);
}

#[test]
fn test_share_fails_until_access_control_trusts_system() {
    let ctx = deploy();
    let patient = create_test_user(&ctx, Role::Patient, "Pat");
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");
    ctx.records.authorize(&ctx.admin, &ctx.system.address);
    let record_id = create_test_record(&ctx, &patient, &patient, "QmScan");

    assert_eq!(
        ctx.system.try_share_record(&patient, &record_id, &provider),
        Err(Ok(AuthorizationError::UnauthorizedContract))
    );
    assert!(!ctx.access.has_access(&record_id, &provider));

    ctx.access.authorize(&ctx.admin, &ctx.system.address);
    ctx.system.share_record(&patient, &record_id, &provider);
    assert!(ctx.access.has_access(&record_id, &provider));
}

#[test]
fn test_complete_wiring_is_idempotent() {
    let ctx = deploy();

    let report = ctx.system.wiring_report(&ctx.admin);
    assert_eq!(report.missing, 4);
    assert!(!report.live);

    assert_eq!(ctx.system.complete_wiring(&ctx.admin), 4);
    assert_eq!(ctx.system.complete_wiring(&ctx.admin), 0);

    let report = ctx.system.wiring_report(&ctx.admin);
    assert_eq!(report.missing, 0);
    assert!(report.live);
    assert!(ctx.users.is_authorized(&ctx.system.address));
    assert!(ctx.records.is_authorized(&ctx.system.address));
    assert!(ctx.records.is_authorized(&ctx.access.address));
    assert!(ctx.access.is_authorized(&ctx.system.address));
}

#[test]
fn test_complete_wiring_fills_only_missing_edges() {
    let ctx = deploy();
    ctx.access.authorize(&ctx.admin, &ctx.system.address);
    ctx.records.authorize(&ctx.admin, &ctx.access.address);

    assert_eq!(ctx.system.wiring_report(&ctx.admin).missing, 2);
    assert_eq!(ctx.system.complete_wiring(&ctx.admin), 2);
}

#[test]
fn test_report_does_not_mutate() {
    let ctx = deploy();
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");

    let report = ctx.system.wiring_report(&provider);
    assert_eq!(report.caller_role, Role::HealthcareProvider);
    assert_eq!(report.admin_count, 1);
    assert_eq!(report.edges.len(), 4);
    for status in report.edges.iter() {
        assert!(!status.authorized);
    }

    assert_eq!(ctx.system.wiring_report(&provider), report);
    assert!(ctx.users.authorized_contracts().is_empty());
    assert!(ctx.records.authorized_contracts().is_empty());
    assert!(ctx.access.authorized_contracts().is_empty());
}

#[test]
fn test_complete_wiring_requires_admin() {
    let ctx = deploy();
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");

    assert_eq!(
        ctx.system.try_complete_wiring(&provider),
        Err(Ok(AuthorizationError::InsufficientRole))
    );
    assert_eq!(ctx.system.wiring_report(&ctx.admin).missing, 4);
}

#[test]
fn test_sole_admin_self_demotion_blocks_wiring() {
    let ctx = deploy();
    let user = Address::generate(&ctx.env);

    ctx.users.set_role(&ctx.admin, &ctx.admin, &Role::Patient);

    let report = ctx.system.wiring_report(&ctx.admin);
    assert_eq!(report.admin_count, 0);
    assert_eq!(report.caller_role, Role::Patient);

    assert_eq!(
        ctx.system.try_complete_wiring(&ctx.admin),
        Err(Ok(AuthorizationError::InsufficientRole))
    );
    assert_eq!(
        ctx.users.try_set_role(&ctx.admin, &user, &Role::Patient),
        Err(Ok(AuthorizationError::InsufficientRole))
    );
    assert_eq!(
        ctx.access.try_authorize(&ctx.admin, &ctx.system.address),
        Err(Ok(AuthorizationError::InsufficientRole))
    );
}

#[test]
fn test_revoking_an_edge_takes_the_system_offline() {
    let ctx = deploy_wired();
    let patient = create_test_user(&ctx, Role::Patient, "Pat");
    let provider = create_test_user(&ctx, Role::HealthcareProvider, "Dr. Lee");
    let record_id = create_test_record(&ctx, &patient, &patient, "QmScan");
    ctx.system.share_record(&patient, &record_id, &provider);

    ctx.records.revoke(&ctx.admin, &ctx.access.address);
    assert!(!ctx.system.wiring_report(&ctx.admin).live);
    assert_eq!(
        ctx.system.try_read_record(&provider, &record_id),
        Err(Ok(AuthorizationError::UnauthorizedContract))
    );

    assert_eq!(ctx.system.complete_wiring(&ctx.admin), 1);
    assert_eq!(ctx.system.read_record(&provider, &record_id).id, record_id);
}
