//! Property-based tests for the authorization graph surface of the registry.
//!
//! Invariants tested:
//! - An edge is absent until an Admin authorizes it
//! - Only an Admin can add or remove an edge
//! - Authorize/revoke sequences always leave `is_authorized` equal to the last
//!   operation applied

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use user_management::{AuthorizationError, Role};

use crate::{setup, RoleChoice};

proptest! {
    #[test]
    fn prop_edges_default_to_deny(count in 1usize..6) {
        let (env, client, _admin) = setup();
        for _ in 0..count {
            prop_assert!(!client.is_authorized(&Address::generate(&env)));
        }
    }

    #[test]
    fn prop_only_admin_edits_edges(caller_role in any::<RoleChoice>()) {
        let caller_role = caller_role.role();
        let (env, client, admin) = setup();
        let caller = Address::generate(&env);
        let peer = Address::generate(&env);
        client.set_role(&admin, &caller, &caller_role);

        let result = client.try_authorize(&caller, &peer);
        if caller_role == Role::Admin {
            prop_assert_eq!(result, Ok(Ok(true)));
            prop_assert!(client.is_authorized(&peer));
        } else {
            prop_assert_eq!(result, Err(Ok(AuthorizationError::InsufficientRole)));
            prop_assert!(!client.is_authorized(&peer));
        }
    }

    #[test]
    fn prop_last_operation_wins(ops in proptest::collection::vec(any::<bool>(), 1..10)) {
        let (env, client, admin) = setup();
        let peer = Address::generate(&env);
        let mut expected = false;
        for authorize in ops {
            if authorize {
                let added = client.authorize(&admin, &peer);
                prop_assert_eq!(added, !expected);
            } else {
                let removed = client.revoke(&admin, &peer);
                prop_assert_eq!(removed, expected);
            }
            expected = authorize;
            prop_assert_eq!(client.is_authorized(&peer), expected);
        }
    }
}
