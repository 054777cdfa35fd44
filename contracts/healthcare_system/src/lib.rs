#![no_std]

//! Entry point for end users and for deployment tooling.
//!
//! The facade methods authenticate the user here and forward to the privileged
//! `*_for` entry points of the component contracts, each of which requires an
//! edge to this contract. The wiring methods describe and complete those edges.

pub mod events;

use common::authorization;
use common::errors::settle;
use common::interfaces::{
    role_of, AccessControlClient, MedicalRecordsClient, UserManagementClient,
};
use common::wiring::{AuthorizationEdge, EdgeStatus, WiringPlan};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use common::{AuthorizationError, MedicalRecord, Role};

const DEPENDENCIES: Symbol = symbol_short!("DEPS");

/// Component contracts this facade forwards to. Fixed at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dependencies {
    pub user_management: Address,
    pub medical_records: Address,
    pub access_control: Address,
}

/// Read-only snapshot of the deployment, as seen by `caller`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WiringReport {
    pub caller: Address,
    pub caller_role: Role,
    pub edges: Vec<EdgeStatus>,
    pub missing: u32,
    pub live: bool,
    pub admin_count: u32,
}

#[contract]
pub struct HealthcareSystemContract;

#[contractimpl]
impl HealthcareSystemContract {
    pub fn __constructor(
        env: Env,
        user_management: Address,
        medical_records: Address,
        access_control: Address,
    ) {
        let dependencies = Dependencies {
            user_management,
            medical_records,
            access_control,
        };
        env.storage().instance().set(&DEPENDENCIES, &dependencies);
        events::publish_initialized(&env, dependencies);
    }

    pub fn dependencies(env: Env) -> Result<Dependencies, AuthorizationError> {
        Self::load(&env)
    }

    fn load(env: &Env) -> Result<Dependencies, AuthorizationError> {
        env.storage()
            .instance()
            .get(&DEPENDENCIES)
            .ok_or(AuthorizationError::DependencyFailure)
    }

    fn plan(env: &Env) -> Result<WiringPlan, AuthorizationError> {
        let deps = Self::load(env)?;
        let this = env.current_contract_address();
        Ok(WiringPlan::new(env)
            .require(&deps.user_management, &this)
            .require(&deps.medical_records, &this)
            .require(&deps.access_control, &this)
            .require(&deps.medical_records, &deps.access_control))
    }

    // ======================== Facade ========================

    /// Self-registration: `user` becomes a Patient.
    pub fn register_patient(
        env: Env,
        user: Address,
        name: String,
    ) -> Result<(), AuthorizationError> {
        user.require_auth();
        let deps = Self::load(&env)?;
        let users = UserManagementClient::new(&env, &deps.user_management);
        settle(users.try_register_user_for(&env.current_contract_address(), &user, &name))
    }

    pub fn add_record(
        env: Env,
        author: Address,
        owner: Address,
        data_hash: String,
    ) -> Result<u64, AuthorizationError> {
        author.require_auth();
        let deps = Self::load(&env)?;
        let records = MedicalRecordsClient::new(&env, &deps.medical_records);
        settle(records.try_create_record_for(
            &env.current_contract_address(),
            &author,
            &owner,
            &data_hash,
        ))
    }

    /// Share a record; `caller` is the owner or an Admin.
    pub fn share_record(
        env: Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<u64, AuthorizationError> {
        caller.require_auth();
        let deps = Self::load(&env)?;
        let access = AccessControlClient::new(&env, &deps.access_control);
        settle(access.try_grant_access_for(
            &env.current_contract_address(),
            &caller,
            &record_id,
            &grantee,
        ))
    }

    pub fn unshare_record(
        env: Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<(), AuthorizationError> {
        caller.require_auth();
        let deps = Self::load(&env)?;
        let access = AccessControlClient::new(&env, &deps.access_control);
        settle(access.try_revoke_access_for(
            &env.current_contract_address(),
            &caller,
            &record_id,
            &grantee,
        ))
    }

    pub fn read_record(
        env: Env,
        reader: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError> {
        reader.require_auth();
        let deps = Self::load(&env)?;
        let access = AccessControlClient::new(&env, &deps.access_control);
        settle(access.try_read_record_for(&env.current_contract_address(), &reader, &record_id))
    }

    // ======================== Wiring ========================

    /// Every edge the system needs before it is live.
    pub fn required_edges(env: Env) -> Result<Vec<AuthorizationEdge>, AuthorizationError> {
        Ok(Self::plan(&env)?.edges())
    }

    /// Describe the deployment without changing it.
    pub fn wiring_report(env: Env, caller: Address) -> Result<WiringReport, AuthorizationError> {
        let deps = Self::load(&env)?;
        let edges = Self::plan(&env)?.status(&env);

        let mut missing = 0u32;
        for status in edges.iter() {
            if !status.authorized {
                missing = missing.saturating_add(1);
            }
        }

        let caller_role = role_of(&env, &deps.user_management, &caller);
        let admin_count = UserManagementClient::new(&env, &deps.user_management).admin_count();

        Ok(WiringReport {
            caller,
            caller_role,
            edges,
            missing,
            live: missing == 0,
            admin_count,
        })
    }

    /// Authorize every missing edge on behalf of `caller`, who must be an
    /// Admin. Returns the number of edges added; zero on a live system.
    pub fn complete_wiring(env: Env, caller: Address) -> Result<u32, AuthorizationError> {
        caller.require_auth();
        let deps = Self::load(&env)?;
        let caller_role = role_of(&env, &deps.user_management, &caller);
        authorization::require_admin(&env, &caller, caller_role, "complete_wiring")?;

        let added = Self::plan(&env)?.apply(&env, &caller)?;
        if added > 0 {
            log!(&env, "wiring added {} edges", added);
        }
        events::publish_wiring_completed(&env, caller, added);
        Ok(added)
    }
}

#[cfg(test)]
mod test;
