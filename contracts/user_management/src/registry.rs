//! # Role registry
//!
//! Sole source of truth for "who is allowed to do what". Maps an identity to
//! exactly one [`Role`]; identities never written here read as
//! `Role::Unassigned`. There is no cache: every read goes to storage, so a
//! role change is visible to the next call from any contract.
//!
//! ## Storage Keys
//!
//! - `("ROLE", identity)` → Role
//! - `("USER", identity)` → UserProfile
//! - `("OWN_EPOCH", identity)` → u32 (times ownership rights were lost)
//! - `"ADM_LIST"` → Vec<Address> (current admins)
//!
//! Reads never extend TTL; entries are kept alive by the writes that touch
//! them.

use common::{Role, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");

/// Display profile kept next to the role. The role field mirrors the
/// registry entry and is rewritten on every role change.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProfile {
    pub address: Address,
    pub role: Role,
    pub name: String,
    pub registered_at: u64,
    pub updated_at: u64,
}

fn role_key(identity: &Address) -> (Symbol, Address) {
    (symbol_short!("ROLE"), identity.clone())
}

fn profile_key(identity: &Address) -> (Symbol, Address) {
    (symbol_short!("USER"), identity.clone())
}

fn epoch_key(identity: &Address) -> (Symbol, Address) {
    (symbol_short!("OWN_EPOCH"), identity.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Never fails; unknown identities are `Unassigned`.
pub fn get_role(env: &Env, identity: &Address) -> Role {
    env.storage()
        .persistent()
        .get(&role_key(identity))
        .unwrap_or(Role::Unassigned)
}

/// Bumped every time `identity` moves from a role with ownership rights to
/// one without. Grants remember the value they were issued under.
pub fn ownership_epoch(env: &Env, identity: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&epoch_key(identity))
        .unwrap_or(0)
}

/// Writes `role` for `identity` and returns the previous role.
/// Callers must have verified authorization beforehand.
pub fn set_role(env: &Env, identity: &Address, role: Role) -> Role {
    let previous = get_role(env, identity);

    let key = role_key(identity);
    env.storage().persistent().set(&key, &role);
    extend_ttl(env, &key);

    if role.is_admin() {
        track_admin(env, identity);
    } else if previous.is_admin() {
        untrack_admin(env, identity);
    }

    if previous.can_own_records() && !role.can_own_records() {
        let key = epoch_key(identity);
        let epoch = ownership_epoch(env, identity).saturating_add(1);
        env.storage().persistent().set(&key, &epoch);
        extend_ttl(env, &key);
    }

    if let Some(mut profile) = get_profile(env, identity) {
        profile.role = role;
        profile.updated_at = env.ledger().timestamp();
        put_profile(env, &profile);
    }

    previous
}

pub fn get_profile(env: &Env, identity: &Address) -> Option<UserProfile> {
    env.storage().persistent().get(&profile_key(identity))
}

pub fn is_registered(env: &Env, identity: &Address) -> bool {
    env.storage().persistent().has(&profile_key(identity))
}

/// Creates the profile and assigns `role` in one step.
pub fn register(env: &Env, identity: &Address, role: Role, name: String) -> UserProfile {
    let now = env.ledger().timestamp();
    let profile = UserProfile {
        address: identity.clone(),
        role,
        name,
        registered_at: now,
        updated_at: now,
    };
    put_profile(env, &profile);
    set_role(env, identity, role);
    profile
}

fn put_profile(env: &Env, profile: &UserProfile) {
    let key = profile_key(&profile.address);
    env.storage().persistent().set(&key, profile);
    extend_ttl(env, &key);
}

// ── Admin tracking ───────────────────────────────────────────────────────────

pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if !admins.contains(admin) {
        admins.push_back(admin.clone());
        env.storage().persistent().set(&ADMIN_LIST, &admins);
    }
}

fn untrack_admin(env: &Env, admin: &Address) {
    let mut remaining = Vec::new(env);
    for existing in list_admins(env).iter() {
        if existing != *admin {
            remaining.push_back(existing);
        }
    }
    env.storage().persistent().set(&ADMIN_LIST, &remaining);
}
