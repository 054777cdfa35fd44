#![no_std]

pub mod events;
pub mod grants;
pub mod policy;

use common::authorization;
use common::errors::{report, settle};
use common::interfaces::{role_of, MedicalRecordsClient, UserManagementClient};
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, Symbol, Vec};

pub use common::{AuthorizationError, MedicalRecord, Role};
pub use grants::{AccessGrant, AccessState, GrantState};
pub use policy::AccessPolicy;

const USER_MANAGEMENT: Symbol = symbol_short!("USR_MGMT");
const MEDICAL_RECORDS: Symbol = symbol_short!("MED_REC");

#[contract]
pub struct AccessControlContract;

#[contractimpl]
impl AccessControlContract {
    /// Deploy the access controller against already deployed UserManagement
    /// and MedicalRecords contracts.
    pub fn __constructor(env: Env, user_management: Address, medical_records: Address) {
        env.storage()
            .instance()
            .set(&USER_MANAGEMENT, &user_management);
        env.storage()
            .instance()
            .set(&MEDICAL_RECORDS, &medical_records);
        events::publish_initialized(&env, user_management, medical_records);
    }

    fn dependency(env: &Env, key: &Symbol) -> Result<Address, AuthorizationError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(AuthorizationError::DependencyFailure)
    }

    fn role(env: &Env, identity: &Address) -> Result<Role, AuthorizationError> {
        let registry = Self::dependency(env, &USER_MANAGEMENT)?;
        Ok(role_of(env, &registry, identity))
    }

    fn ownership_epoch(env: &Env, owner: &Address) -> Result<u32, AuthorizationError> {
        let registry = Self::dependency(env, &USER_MANAGEMENT)?;
        Ok(UserManagementClient::new(env, &registry).ownership_epoch(owner))
    }

    /// Stored grant with lapse applied.
    fn effective(env: &Env, grant: AccessGrant) -> Result<AccessGrant, AuthorizationError> {
        if grant.state != GrantState::Granted || !grant.cascades {
            return Ok(grant);
        }
        let epoch = Self::ownership_epoch(env, &grant.owner)?;
        Ok(grant.effective(epoch))
    }

    /// The grant that currently gives `grantee` access, if any. A lapsed
    /// grant is left open in storage but never returned.
    fn live(
        env: &Env,
        record_id: u64,
        grantee: &Address,
    ) -> Result<Option<AccessGrant>, AuthorizationError> {
        let Some(grant) = grants::active(env, record_id, grantee) else {
            return Ok(None);
        };
        let grant = Self::effective(env, grant)?;
        if grant.state == GrantState::Granted {
            Ok(Some(grant))
        } else {
            log!(env, "grant {} lapsed, owner lost ownership", grant.grant_id);
            Ok(None)
        }
    }

    fn records(env: &Env) -> Result<MedicalRecordsClient<'_>, AuthorizationError> {
        let address = Self::dependency(env, &MEDICAL_RECORDS)?;
        Ok(MedicalRecordsClient::new(env, &address))
    }

    fn record_owner(env: &Env, record_id: u64) -> Result<Address, AuthorizationError> {
        settle(Self::records(env)?.try_get_record_owner(&record_id))
    }

    // ======================== Sharing ========================

    fn share(
        env: &Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<u64, AuthorizationError> {
        let owner = Self::record_owner(env, record_id)?;

        if caller != owner && !Self::role(env, &caller)?.is_admin() {
            return Err(report(
                env,
                AuthorizationError::AccessDenied,
                Some(caller),
                "grant_access",
            ));
        }
        if !Self::role(env, &owner)?.can_own_records() {
            return Err(report(
                env,
                AuthorizationError::InsufficientRole,
                Some(owner),
                "grant_access",
            ));
        }
        if grantee == owner {
            return Err(AuthorizationError::InvalidInput);
        }

        match Self::role(env, &grantee)? {
            Role::Unassigned => {
                return Err(report(
                    env,
                    AuthorizationError::UnknownIdentity,
                    Some(grantee),
                    "grant_access",
                ));
            }
            Role::Patient if !policy::get(env).allow_patient_to_patient => {
                return Err(AuthorizationError::IneligibleGrantee);
            }
            _ => {}
        }

        if let Some(existing) = Self::live(env, record_id, &grantee)? {
            return Ok(existing.grant_id);
        }
        // A lapsed grant may still be open; close it before issuing afresh.
        if let Some(stale) = grants::active(env, record_id, &grantee) {
            grants::close(env, stale);
        }

        let terms = grants::Terms {
            owner_epoch: Self::ownership_epoch(env, &owner)?,
            cascades: policy::get(env).cascade_on_demotion,
        };
        let grant = grants::issue(env, record_id, &owner, &grantee, &caller, terms);
        events::publish_access_granted(
            env,
            grant.grant_id,
            record_id,
            owner,
            grantee,
            caller,
        );
        Ok(grant.grant_id)
    }

    fn unshare(
        env: &Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<(), AuthorizationError> {
        let owner = Self::record_owner(env, record_id)?;
        if caller != owner {
            return Err(report(
                env,
                AuthorizationError::AccessDenied,
                Some(caller),
                "revoke_access",
            ));
        }

        let grant = Self::live(env, record_id, &grantee)?
            .ok_or(AuthorizationError::GrantNotFound)?;
        let grant = grants::close(env, grant);
        events::publish_access_revoked(env, grant.grant_id, record_id, grantee, caller);
        Ok(())
    }

    /// Share `record_id` with `grantee`. Returns the id of the live grant,
    /// which is the existing one when the record is already shared.
    ///
    /// The caller is the record owner or an Admin acting on the owner's
    /// behalf; the owner must still hold ownership rights.
    pub fn grant_access(
        env: Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<u64, AuthorizationError> {
        caller.require_auth();
        Self::share(&env, caller, record_id, grantee)
    }

    /// Privileged variant of [`Self::grant_access`]; `caller` was authenticated
    /// by the calling contract.
    pub fn grant_access_for(
        env: Env,
        caller_contract: Address,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<u64, AuthorizationError> {
        authorization::require_authorized_contract(&env, &caller_contract)?;
        Self::share(&env, caller, record_id, grantee)
    }

    /// Revoke the live grant of `grantee` on `record_id`. Only the owner may
    /// revoke; Admins cannot revoke on the owner's behalf.
    pub fn revoke_access(
        env: Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<(), AuthorizationError> {
        caller.require_auth();
        Self::unshare(&env, caller, record_id, grantee)
    }

    pub fn revoke_access_for(
        env: Env,
        caller_contract: Address,
        caller: Address,
        record_id: u64,
        grantee: Address,
    ) -> Result<(), AuthorizationError> {
        authorization::require_authorized_contract(&env, &caller_contract)?;
        Self::unshare(&env, caller, record_id, grantee)
    }

    // ======================== Access checks ========================

    fn permits(env: &Env, record_id: u64, identity: &Address) -> Result<bool, AuthorizationError> {
        let owner = Self::record_owner(env, record_id)?;
        if *identity == owner || Self::role(env, identity)?.is_admin() {
            return Ok(true);
        }

        Ok(Self::live(env, record_id, identity)?.is_some())
    }

    /// Whether `identity` may read `record_id` right now. Unknown records
    /// are never accessible.
    pub fn has_access(env: Env, record_id: u64, identity: Address) -> bool {
        Self::permits(&env, record_id, &identity).unwrap_or(false)
    }

    pub fn check_access(
        env: Env,
        record_id: u64,
        identity: Address,
    ) -> Result<(), AuthorizationError> {
        if Self::permits(&env, record_id, &identity)? {
            Ok(())
        } else {
            Err(AuthorizationError::AccessDenied)
        }
    }

    fn fetch(
        env: &Env,
        reader: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError> {
        if !Self::permits(env, record_id, &reader)? {
            return Err(report(
                env,
                AuthorizationError::AccessDenied,
                Some(reader),
                "read_record",
            ));
        }

        let record = settle(
            Self::records(env)?.try_read_record_for(&env.current_contract_address(), &record_id),
        )?;
        events::publish_record_read(env, record_id, reader);
        Ok(record)
    }

    /// Read a record through the access controller. Needs the edge
    /// `(MedicalRecords, AccessControl)` to be in place.
    pub fn read_record(
        env: Env,
        reader: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError> {
        reader.require_auth();
        Self::fetch(&env, reader, record_id)
    }

    pub fn read_record_for(
        env: Env,
        caller_contract: Address,
        reader: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError> {
        authorization::require_authorized_contract(&env, &caller_contract)?;
        Self::fetch(&env, reader, record_id)
    }

    // ======================== Grant queries ========================

    /// State of the most recent grant for `(record_id, grantee)`. Agrees
    /// with [`Self::has_access`] for every identity that is neither the
    /// owner nor an Admin.
    pub fn access_state(
        env: Env,
        record_id: u64,
        grantee: Address,
    ) -> Result<AccessState, AuthorizationError> {
        let Some(grant) = grants::latest(&env, record_id, &grantee) else {
            return Ok(AccessState::NoAccess);
        };
        Ok(match Self::effective(&env, grant)?.state {
            GrantState::Granted => AccessState::Granted,
            GrantState::Revoked => AccessState::Revoked,
        })
    }

    /// Every grant ever issued for `(record_id, grantee)`, oldest first.
    pub fn grant_history(
        env: Env,
        record_id: u64,
        grantee: Address,
    ) -> Result<Vec<AccessGrant>, AuthorizationError> {
        let mut history = Vec::new(&env);
        for grant in grants::history(&env, record_id, &grantee).iter() {
            history.push_back(Self::effective(&env, grant)?);
        }
        Ok(history)
    }

    pub fn get_grant(env: Env, grant_id: u64) -> Result<AccessGrant, AuthorizationError> {
        let grant = grants::get(&env, grant_id).ok_or(AuthorizationError::GrantNotFound)?;
        Self::effective(&env, grant)
    }

    /// Close every open grant of `owner` once the owner has lost ownership
    /// rights, lapsed or not. Admin only. Returns the number of grants closed.
    pub fn purge_owner_grants(
        env: Env,
        caller: Address,
        owner: Address,
    ) -> Result<u32, AuthorizationError> {
        caller.require_auth();
        let caller_role = Self::role(&env, &caller)?;
        authorization::require_admin(&env, &caller, caller_role, "purge_owner_grants")?;

        if Self::role(&env, &owner)?.can_own_records() {
            return Err(AuthorizationError::InvalidInput);
        }

        let mut closed = 0u32;
        for grant in grants::open_by_owner(&env, &owner).iter() {
            let grant = grants::close(&env, grant);
            events::publish_access_revoked(
                &env,
                grant.grant_id,
                grant.record_id,
                grant.grantee,
                caller.clone(),
            );
            closed = closed.saturating_add(1);
        }
        Ok(closed)
    }

    // ======================== Policy ========================

    pub fn get_policy(env: Env) -> AccessPolicy {
        policy::get(&env)
    }

    pub fn set_policy(
        env: Env,
        caller: Address,
        policy: AccessPolicy,
    ) -> Result<(), AuthorizationError> {
        caller.require_auth();
        let caller_role = Self::role(&env, &caller)?;
        authorization::require_admin(&env, &caller, caller_role, "set_policy")?;

        policy::set(&env, &policy);
        events::publish_policy_updated(&env, caller, policy);
        Ok(())
    }

    pub fn dependencies(env: Env) -> Result<(Address, Address), AuthorizationError> {
        Ok((
            Self::dependency(&env, &USER_MANAGEMENT)?,
            Self::dependency(&env, &MEDICAL_RECORDS)?,
        ))
    }

    // ======================== Authorization graph ========================

    pub fn authorize(
        env: Env,
        caller: Address,
        grantee: Address,
    ) -> Result<bool, AuthorizationError> {
        caller.require_auth();
        let caller_role = Self::role(&env, &caller)?;
        authorization::authorize(&env, &caller, caller_role, grantee)
    }

    pub fn revoke(env: Env, caller: Address, grantee: Address) -> Result<bool, AuthorizationError> {
        caller.require_auth();
        let caller_role = Self::role(&env, &caller)?;
        authorization::revoke(&env, &caller, caller_role, grantee)
    }

    pub fn is_authorized(env: Env, grantee: Address) -> bool {
        authorization::is_authorized(&env, &grantee)
    }

    pub fn authorized_contracts(env: Env) -> Vec<Address> {
        authorization::authorized_contracts(&env)
    }
}
