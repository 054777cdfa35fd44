//! # Deployment wiring plan
//!
//! Contracts are deployed one at a time and only learn each other's
//! addresses afterwards, so the authorization graph is filled in a separate
//! step. A [`WiringPlan`] lists the edges the system needs, reports which of
//! them are still missing, and authorizes exactly those. Applying a plan to a
//! fully wired system changes nothing.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::{settle, AuthorizationError};
use crate::interfaces::AuthorizationGraphClient;

/// `grantor` accepts privileged calls originating from `grantee`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationEdge {
    pub grantor: Address,
    pub grantee: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeStatus {
    pub grantor: Address,
    pub grantee: Address,
    pub authorized: bool,
}

pub struct WiringPlan {
    edges: Vec<AuthorizationEdge>,
}

impl WiringPlan {
    pub fn new(env: &Env) -> Self {
        Self {
            edges: Vec::new(env),
        }
    }

    /// Adds the edge `(grantor, grantee)`; duplicates are ignored.
    pub fn require(mut self, grantor: &Address, grantee: &Address) -> Self {
        let edge = AuthorizationEdge {
            grantor: grantor.clone(),
            grantee: grantee.clone(),
        };
        if !self.edges.contains(&edge) {
            self.edges.push_back(edge);
        }
        self
    }

    pub fn edges(&self) -> Vec<AuthorizationEdge> {
        self.edges.clone()
    }

    /// Queries each grantor for its edge. Read-only.
    pub fn status(&self, env: &Env) -> Vec<EdgeStatus> {
        let mut statuses = Vec::new(env);
        for edge in self.edges.iter() {
            let authorized =
                AuthorizationGraphClient::new(env, &edge.grantor).is_authorized(&edge.grantee);
            statuses.push_back(EdgeStatus {
                grantor: edge.grantor,
                grantee: edge.grantee,
                authorized,
            });
        }
        statuses
    }

    /// Edges that are required but not yet recorded by their grantor.
    pub fn missing(&self, env: &Env) -> Vec<AuthorizationEdge> {
        let mut missing = Vec::new(env);
        for status in self.status(env).iter() {
            if !status.authorized {
                missing.push_back(AuthorizationEdge {
                    grantor: status.grantor,
                    grantee: status.grantee,
                });
            }
        }
        missing
    }

    /// Authorizes every missing edge on its grantor on behalf of `caller`.
    ///
    /// Each grantor re-checks that `caller` is currently `Admin`. Returns the
    /// number of edges that were newly recorded.
    pub fn apply(&self, env: &Env, caller: &Address) -> Result<u32, AuthorizationError> {
        let mut added = 0u32;
        for edge in self.missing(env).iter() {
            let client = AuthorizationGraphClient::new(env, &edge.grantor);
            if settle(client.try_authorize(caller, &edge.grantee))? {
                added = added.saturating_add(1);
            }
        }
        Ok(added)
    }
}
