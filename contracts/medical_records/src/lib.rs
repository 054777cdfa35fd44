#![no_std]

pub mod events;

use common::errors::report;
use common::interfaces::role_of;
use common::{authorization, validation, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

pub use common::{AuthorizationError, MedicalRecord, Role};

/// Storage keys for the contract
const USER_MANAGEMENT: Symbol = symbol_short!("USR_MGMT");
const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");

fn record_key(record_id: u64) -> (Symbol, u64) {
    (symbol_short!("RECORD"), record_id)
}

fn owner_records_key(owner: &Address) -> (Symbol, Address) {
    (symbol_short!("OWN_REC"), owner.clone())
}

fn extend_ttl_u64_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_address_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    /// Deploy the record store against an already deployed UserManagement
    /// contract. The dependency is fixed for the lifetime of the contract.
    pub fn __constructor(env: Env, user_management: Address) {
        env.storage()
            .instance()
            .set(&USER_MANAGEMENT, &user_management);
        events::publish_initialized(&env, user_management);
    }

    pub fn user_management(env: Env) -> Result<Address, AuthorizationError> {
        Self::registry(&env)
    }

    fn registry(env: &Env) -> Result<Address, AuthorizationError> {
        env.storage()
            .instance()
            .get(&USER_MANAGEMENT)
            .ok_or(AuthorizationError::DependencyFailure)
    }

    fn role(env: &Env, identity: &Address) -> Result<Role, AuthorizationError> {
        Ok(role_of(env, &Self::registry(env)?, identity))
    }

    fn load(env: &Env, record_id: u64) -> Result<MedicalRecord, AuthorizationError> {
        env.storage()
            .persistent()
            .get(&record_key(record_id))
            .ok_or(AuthorizationError::RecordNotFound)
    }

    fn create(
        env: &Env,
        author: Address,
        owner: Address,
        data_hash: String,
    ) -> Result<u64, AuthorizationError> {
        validation::validate_data_hash(&data_hash)?;

        let owner_role = Self::role(env, &owner)?;
        if !owner_role.can_own_records() {
            return Err(report(
                env,
                AuthorizationError::UnknownIdentity,
                Some(owner),
                "add_record",
            ));
        }

        if author != owner && !Self::role(env, &author)?.can_author_records() {
            return Err(report(
                env,
                AuthorizationError::InsufficientRole,
                Some(author),
                "add_record",
            ));
        }

        let record_id: u64 = env
            .storage()
            .instance()
            .get(&RECORD_COUNTER)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&RECORD_COUNTER, &record_id);

        let record = MedicalRecord {
            id: record_id,
            owner: owner.clone(),
            author: author.clone(),
            data_hash,
            created_at: env.ledger().timestamp(),
        };
        let key = record_key(record_id);
        env.storage().persistent().set(&key, &record);
        extend_ttl_u64_key(env, &key);

        let owner_key = owner_records_key(&owner);
        let mut owner_records: Vec<u64> = env
            .storage()
            .persistent()
            .get(&owner_key)
            .unwrap_or(Vec::new(env));
        owner_records.push_back(record_id);
        env.storage().persistent().set(&owner_key, &owner_records);
        extend_ttl_address_key(env, &owner_key);

        events::publish_record_added(env, record_id, owner, author);
        Ok(record_id)
    }

    /// Add a record owned by `owner`.
    ///
    /// The author is either the owner itself or a HealthcareProvider/Admin
    /// writing on the owner's behalf. The owner must hold ownership rights.
    pub fn add_record(
        env: Env,
        author: Address,
        owner: Address,
        data_hash: String,
    ) -> Result<u64, AuthorizationError> {
        author.require_auth();
        Self::create(&env, author, owner, data_hash)
    }

    /// Privileged variant of [`Self::add_record`] for trusted peer contracts,
    /// which are expected to have authenticated `author` themselves.
    pub fn create_record_for(
        env: Env,
        caller_contract: Address,
        author: Address,
        owner: Address,
        data_hash: String,
    ) -> Result<u64, AuthorizationError> {
        authorization::require_authorized_contract(&env, &caller_contract)?;
        Self::create(&env, author, owner, data_hash)
    }

    /// Owner of a record. Public linkage metadata, no content.
    pub fn get_record_owner(env: Env, record_id: u64) -> Result<Address, AuthorizationError> {
        Ok(Self::load(&env, record_id)?.owner)
    }

    /// Direct read for the owner, the author, or a current Admin. Reads on
    /// behalf of grantees go through the access controller.
    pub fn read_record(
        env: Env,
        reader: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError> {
        reader.require_auth();
        let record = Self::load(&env, record_id)?;

        if reader != record.owner
            && reader != record.author
            && !Self::role(&env, &reader)?.is_admin()
        {
            return Err(report(
                &env,
                AuthorizationError::AccessDenied,
                Some(reader),
                "read_record",
            ));
        }
        Ok(record)
    }

    /// Full read for trusted peer contracts that already decided access.
    pub fn read_record_for(
        env: Env,
        caller_contract: Address,
        record_id: u64,
    ) -> Result<MedicalRecord, AuthorizationError> {
        authorization::require_authorized_contract(&env, &caller_contract)?;
        Self::load(&env, record_id)
    }

    /// Get all record ids owned by `owner`
    pub fn get_owner_records(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&owner_records_key(&owner))
            .unwrap_or(Vec::new(&env))
    }

    /// Get the total number of records
    pub fn get_record_count(env: Env) -> u64 {
        env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
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
