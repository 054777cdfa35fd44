//! Property-based tests for the role registry.
//!
//! Invariants tested:
//! - Every identity reads as `Unassigned` before any `set_role`
//! - A non-admin `set_role` always fails with `InsufficientRole` and leaves the
//!   target untouched
//! - An admin `set_role` is always visible on the very next read
//! - The admin list always matches the identities whose role is `Admin`

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use user_management::{AuthorizationError, Role};

use crate::{setup, RoleChoice};

proptest! {
    #[test]
    fn prop_fresh_identities_are_unassigned(count in 1usize..8) {
        let (env, client, _admin) = setup();
        for _ in 0..count {
            let identity = Address::generate(&env);
            prop_assert_eq!(client.get_role(&identity), Role::Unassigned);
        }
    }

    #[test]
    fn prop_non_admin_set_role_is_rejected(
        caller_role in any::<RoleChoice>(),
        target_role in any::<RoleChoice>(),
        requested in any::<RoleChoice>(),
    ) {
        let caller_role = caller_role.role();
        prop_assume!(caller_role != Role::Admin);

        let (env, client, admin) = setup();
        let caller = Address::generate(&env);
        let target = Address::generate(&env);
        client.set_role(&admin, &caller, &caller_role);
        client.set_role(&admin, &target, &target_role.role());

        let result = client.try_set_role(&caller, &target, &requested.role());
        prop_assert_eq!(result, Err(Ok(AuthorizationError::InsufficientRole)));
        prop_assert_eq!(client.get_role(&target), target_role.role());
    }

    #[test]
    fn prop_admin_set_role_is_visible_immediately(
        sequence in proptest::collection::vec(any::<RoleChoice>(), 1..6),
    ) {
        let (env, client, admin) = setup();
        let target = Address::generate(&env);
        for choice in sequence {
            client.set_role(&admin, &target, &choice.role());
            prop_assert_eq!(client.get_role(&target), choice.role());
        }
    }

    #[test]
    fn prop_admin_list_tracks_admin_roles(
        choices in proptest::collection::vec(any::<RoleChoice>(), 1..6),
    ) {
        let (env, client, admin) = setup();
        let mut expected = 1u32;
        for choice in choices {
            let identity = Address::generate(&env);
            client.set_role(&admin, &identity, &choice.role());
            if choice.role() == Role::Admin {
                expected += 1;
                prop_assert!(client.list_admins().contains(&identity));
            }
        }
        prop_assert_eq!(client.admin_count(), expected);
    }
}
