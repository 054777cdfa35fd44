//! # Contract authorization graph
//!
//! Every contract that exposes privileged entry points owns a table of the
//! peer contracts it trusts. An entry `grantee -> true` in the grantor's
//! storage is the edge `(grantor, grantee)`; absence means deny.
//!
//! Edges are only written by a caller whose *current* role is `Admin`. The
//! role is resolved by the hosting contract at call time and handed in here,
//! so this module never caches or infers it.
//!
//! ## Storage Keys
//!
//! - `("AUTH_EDGE", grantee)` → bool
//! - `"AUTH_LIST"` → Vec<Address> (grantees, for diagnostics)
//!
//! Lookups are pure reads; `authorize` (including a repeat call on an existing
//! edge) is what extends an edge's TTL.

use soroban_sdk::{log, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::{report, AuthorizationError};
use crate::{events, Role, TTL_EXTEND_TO, TTL_THRESHOLD};

const AUTH_EDGE: Symbol = symbol_short!("AUTH_EDGE");
const AUTH_LIST: Symbol = symbol_short!("AUTH_LIST");

fn edge_key(grantee: &Address) -> (Symbol, Address) {
    (AUTH_EDGE, grantee.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Whether the current contract accepts privileged calls from `grantee`.
pub fn is_authorized(env: &Env, grantee: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&edge_key(grantee))
        .unwrap_or(false)
}

/// Returns every peer contract currently trusted by this contract.
pub fn authorized_contracts(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&AUTH_LIST)
        .unwrap_or(Vec::new(env))
}

// ── Guards ───────────────────────────────────────────────────────────────────

/// Guard: rejects the call unless `caller_role` is `Admin`.
pub fn require_admin(
    env: &Env,
    caller: &Address,
    caller_role: Role,
    resource: &str,
) -> Result<(), AuthorizationError> {
    if !caller_role.is_admin() {
        log!(env, "admin check failed for {}", caller.clone());
        return Err(report(
            env,
            AuthorizationError::InsufficientRole,
            Some(caller.clone()),
            resource,
        ));
    }
    Ok(())
}

/// Guard run first by every privileged entry point.
///
/// Checks the edge `(current contract, caller_contract)` before anything else
/// and then has the host prove that `caller_contract` really is the invoker.
pub fn require_authorized_contract(
    env: &Env,
    caller_contract: &Address,
) -> Result<(), AuthorizationError> {
    if !is_authorized(env, caller_contract) {
        return Err(report(
            env,
            AuthorizationError::UnauthorizedContract,
            Some(caller_contract.clone()),
            "privileged_call",
        ));
    }
    caller_contract.require_auth();
    Ok(())
}

// ── Mutations ────────────────────────────────────────────────────────────────

/// Records the edge `(current contract, grantee)`.
///
/// Returns `Ok(true)` when the edge is new and `Ok(false)` when it already
/// existed, so wiring can be re-run without failing.
pub fn authorize(
    env: &Env,
    caller: &Address,
    caller_role: Role,
    grantee: Address,
) -> Result<bool, AuthorizationError> {
    require_admin(env, caller, caller_role, "authorize")?;

    if grantee == env.current_contract_address() {
        return Err(AuthorizationError::InvalidInput);
    }
    let key = edge_key(&grantee);
    if is_authorized(env, &grantee) {
        extend_ttl(env, &key);
        return Ok(false);
    }

    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);

    let mut grantees = authorized_contracts(env);
    if !grantees.contains(&grantee) {
        grantees.push_back(grantee.clone());
    }
    env.storage().persistent().set(&AUTH_LIST, &grantees);

    events::publish_contract_authorized(env, caller.clone(), grantee);
    Ok(true)
}

/// Removes the edge `(current contract, grantee)`.
///
/// Returns `Ok(false)` when there was no edge to remove.
pub fn revoke(
    env: &Env,
    caller: &Address,
    caller_role: Role,
    grantee: Address,
) -> Result<bool, AuthorizationError> {
    require_admin(env, caller, caller_role, "revoke")?;

    if !is_authorized(env, &grantee) {
        return Ok(false);
    }

    env.storage().persistent().remove(&edge_key(&grantee));

    let mut remaining = Vec::new(env);
    for existing in authorized_contracts(env).iter() {
        if existing != grantee {
            remaining.push_back(existing);
        }
    }
    env.storage().persistent().set(&AUTH_LIST, &remaining);

    events::publish_contract_revoked(env, caller.clone(), grantee);
    Ok(true)
}
