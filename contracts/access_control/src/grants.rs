//! # Grant store
//!
//! Each call to share a record creates a new [`AccessGrant`] row with a fresh
//! id. A grant moves from `Granted` to `Revoked` exactly once and never back;
//! sharing the same record with the same grantee again creates a new row.
//!
//! A grant issued under the demotion cascade also records the owner's
//! ownership epoch. Once the owner's epoch moves on, the grant has lapsed: it
//! reads as `Revoked` everywhere even while its row still says `Granted`, and
//! restoring the owner's role does not bring it back.
//!
//! ## Storage Keys
//!
//! - `"GRT_CTR"` → u64 (instance, last issued grant id)
//! - `("GRANT", grant_id)` → AccessGrant
//! - `("ACTIVE", record_id, grantee)` → u64 (id of the live grant, if any)
//! - `("GRT_HIST", record_id, grantee)` → Vec<u64> (every grant ever issued)
//! - `("OWN_GRT", owner)` → Vec<u64> (grants of an owner not yet closed)

use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val, Vec};

const GRANT_COUNTER: Symbol = symbol_short!("GRT_CTR");

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GrantState {
    Granted,
    Revoked,
}

/// Observable sharing state of a `(record, grantee)` pair.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessState {
    NoAccess,
    Granted,
    Revoked,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrant {
    pub grant_id: u64,
    pub record_id: u64,
    pub owner: Address,
    pub grantee: Address,
    /// The owner, or the Admin who shared on the owner's behalf.
    pub granted_by: Address,
    pub state: GrantState,
    pub granted_at: u64,
    /// Zero while the grant is active, and for a grant that lapsed with its
    /// owner's ownership rights without being closed.
    pub revoked_at: u64,
    /// Owner's ownership epoch when the grant was issued.
    pub owner_epoch: u32,
    /// Whether the grant lapses when the owner loses ownership rights.
    pub cascades: bool,
}

impl AccessGrant {
    /// Whether the owner has lost ownership rights since issue, given the
    /// owner's current epoch.
    pub fn lapsed(&self, current_epoch: u32) -> bool {
        self.cascades && self.owner_epoch != current_epoch
    }

    /// The grant as callers see it: a lapsed grant reads as `Revoked`.
    pub fn effective(mut self, current_epoch: u32) -> Self {
        if self.state == GrantState::Granted && self.lapsed(current_epoch) {
            self.state = GrantState::Revoked;
        }
        self
    }
}

fn grant_key(grant_id: u64) -> (Symbol, u64) {
    (symbol_short!("GRANT"), grant_id)
}

fn active_key(record_id: u64, grantee: &Address) -> (Symbol, u64, Address) {
    (symbol_short!("ACTIVE"), record_id, grantee.clone())
}

fn history_key(record_id: u64, grantee: &Address) -> (Symbol, u64, Address) {
    (symbol_short!("GRT_HIST"), record_id, grantee.clone())
}

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (symbol_short!("OWN_GRT"), owner.clone())
}

fn extend_ttl<K: IntoVal<Env, Val>>(env: &Env, key: &K) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn append_id<K: IntoVal<Env, Val>>(env: &Env, key: &K, grant_id: u64) {
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(key)
        .unwrap_or(Vec::new(env));
    ids.push_back(grant_id);
    env.storage().persistent().set(key, &ids);
    extend_ttl(env, key);
}

fn store(env: &Env, grant: &AccessGrant) {
    let key = grant_key(grant.grant_id);
    env.storage().persistent().set(&key, grant);
    extend_ttl(env, &key);
}

pub fn get(env: &Env, grant_id: u64) -> Option<AccessGrant> {
    env.storage().persistent().get(&grant_key(grant_id))
}

/// The open grant for `(record_id, grantee)`, if there is one. The caller
/// decides whether it has lapsed.
pub fn active(env: &Env, record_id: u64, grantee: &Address) -> Option<AccessGrant> {
    let grant_id: u64 = env
        .storage()
        .persistent()
        .get(&active_key(record_id, grantee))?;
    get(env, grant_id).filter(|grant| grant.state == GrantState::Granted)
}

/// Ownership terms a grant is issued under.
#[derive(Clone, Copy, Debug)]
pub struct Terms {
    pub owner_epoch: u32,
    pub cascades: bool,
}

/// Issues a new grant and makes it the live one for `(record_id, grantee)`.
pub fn issue(
    env: &Env,
    record_id: u64,
    owner: &Address,
    grantee: &Address,
    granted_by: &Address,
    terms: Terms,
) -> AccessGrant {
    let grant_id: u64 = env
        .storage()
        .instance()
        .get(&GRANT_COUNTER)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&GRANT_COUNTER, &grant_id);

    let grant = AccessGrant {
        grant_id,
        record_id,
        owner: owner.clone(),
        grantee: grantee.clone(),
        granted_by: granted_by.clone(),
        state: GrantState::Granted,
        granted_at: env.ledger().timestamp(),
        revoked_at: 0,
        owner_epoch: terms.owner_epoch,
        cascades: terms.cascades,
    };
    store(env, &grant);

    let key = active_key(record_id, grantee);
    env.storage().persistent().set(&key, &grant_id);
    extend_ttl(env, &key);

    append_id(env, &history_key(record_id, grantee), grant_id);
    append_id(env, &owner_key(owner), grant_id);
    grant
}

/// Moves an open grant to `Revoked` and drops it from the owner index.
/// Revoked grants stay in history.
pub fn close(env: &Env, mut grant: AccessGrant) -> AccessGrant {
    grant.state = GrantState::Revoked;
    grant.revoked_at = env.ledger().timestamp();
    store(env, &grant);
    env.storage()
        .persistent()
        .remove(&active_key(grant.record_id, &grant.grantee));
    remove_id(env, &owner_key(&grant.owner), grant.grant_id);
    grant
}

fn remove_id<K: IntoVal<Env, Val>>(env: &Env, key: &K, grant_id: u64) {
    let Some(mut ids) = env.storage().persistent().get::<_, Vec<u64>>(key) else {
        return;
    };
    let Some(index) = ids.first_index_of(grant_id) else {
        return;
    };
    ids.remove(index);
    if ids.is_empty() {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &ids);
        extend_ttl(env, key);
    }
}

pub fn history(env: &Env, record_id: u64, grantee: &Address) -> Vec<AccessGrant> {
    let ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&history_key(record_id, grantee))
        .unwrap_or(Vec::new(env));
    resolve(env, ids)
}

/// Grants of `owner` that have not been closed, lapsed ones included.
pub fn open_by_owner(env: &Env, owner: &Address) -> Vec<AccessGrant> {
    let ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&owner_key(owner))
        .unwrap_or(Vec::new(env));
    resolve(env, ids)
}

fn resolve(env: &Env, ids: Vec<u64>) -> Vec<AccessGrant> {
    let mut grants = Vec::new(env);
    for grant_id in ids.iter() {
        if let Some(grant) = get(env, grant_id) {
            grants.push_back(grant);
        }
    }
    grants
}

/// Most recent grant for `(record_id, grantee)`, as stored.
pub fn latest(env: &Env, record_id: u64, grantee: &Address) -> Option<AccessGrant> {
    let ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&history_key(record_id, grantee))?;
    get(env, ids.last()?)
}
