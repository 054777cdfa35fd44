#![no_std]

pub mod events;
pub mod registry;

use common::{authorization, validation};
use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

pub use common::{AuthorizationError, Role};
pub use registry::UserProfile;

/// Registration never overwrites an existing role. The constructor admin and
/// identities assigned through `set_role` hold a role but no profile.
fn ensure_unregistered(env: &Env, user: &Address) -> Result<(), AuthorizationError> {
    if registry::is_registered(env, user) || registry::get_role(env, user) != Role::Unassigned {
        return Err(AuthorizationError::AlreadyRegistered);
    }
    Ok(())
}

#[contract]
pub struct UserManagementContract;

#[contractimpl]
impl UserManagementContract {
    /// Deploy the registry and bootstrap `admin` with the Admin role.
    pub fn __constructor(env: Env, admin: Address) {
        registry::set_role(&env, &admin, Role::Admin);
        events::publish_initialized(&env, admin);
    }

    // ======================== Role registry ========================

    /// Current role of `identity`; `Unassigned` if it was never set.
    pub fn get_role(env: Env, identity: Address) -> Role {
        registry::get_role(&env, &identity)
    }

    /// Sets `target`'s role. Only a caller whose current role is Admin may do
    /// this, including promoting to or demoting from Admin.
    ///
    /// An Admin may demote itself even when it is the last one; afterwards no
    /// identity can set roles or edit the authorization graph.
    pub fn set_role(
        env: Env,
        caller: Address,
        target: Address,
        new_role: Role,
    ) -> Result<(), AuthorizationError> {
        caller.require_auth();
        let caller_role = registry::get_role(&env, &caller);
        authorization::require_admin(&env, &caller, caller_role, "set_role")?;

        let previous = registry::set_role(&env, &target, new_role);
        if previous.is_admin() && !new_role.is_admin() && registry::list_admins(&env).is_empty() {
            log!(&env, "last admin removed: {}", target.clone());
        }

        events::publish_role_changed(&env, caller, target, previous, new_role);
        Ok(())
    }

    /// Register a user with a display name and an initial role. Admin only.
    ///
    /// Only identities that hold no role yet can be registered; existing
    /// roles change through [`Self::set_role`].
    pub fn register_user(
        env: Env,
        caller: Address,
        user: Address,
        role: Role,
        name: String,
    ) -> Result<(), AuthorizationError> {
        caller.require_auth();
        let caller_role = registry::get_role(&env, &caller);
        authorization::require_admin(&env, &caller, caller_role, "register_user")?;

        validation::validate_name(&name)?;
        ensure_unregistered(&env, &user)?;

        registry::register(&env, &user, role, name.clone());
        events::publish_user_registered(&env, user, role, name, caller);
        Ok(())
    }

    /// Self-registration relayed by a trusted peer contract. The user becomes
    /// a Patient; the peer is expected to have authenticated the user.
    pub fn register_user_for(
        env: Env,
        caller_contract: Address,
        user: Address,
        name: String,
    ) -> Result<(), AuthorizationError> {
        authorization::require_authorized_contract(&env, &caller_contract)?;

        validation::validate_name(&name)?;
        ensure_unregistered(&env, &user)?;

        registry::register(&env, &user, Role::Patient, name.clone());
        events::publish_user_registered(&env, user, Role::Patient, name, caller_contract);
        Ok(())
    }

    /// Get user profile information
    pub fn get_user(env: Env, user: Address) -> Result<UserProfile, AuthorizationError> {
        registry::get_profile(&env, &user).ok_or(AuthorizationError::UserNotFound)
    }

    /// How many times `identity` has lost ownership rights.
    pub fn ownership_epoch(env: Env, identity: Address) -> u32 {
        registry::ownership_epoch(&env, &identity)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        registry::list_admins(&env)
    }

    pub fn admin_count(env: Env) -> u32 {
        registry::list_admins(&env).len()
    }

    // ======================== Authorization graph ========================

    /// Trust `grantee` to call this contract's privileged entry points.
    pub fn authorize(
        env: Env,
        caller: Address,
        grantee: Address,
    ) -> Result<bool, AuthorizationError> {
        caller.require_auth();
        let caller_role = registry::get_role(&env, &caller);
        authorization::authorize(&env, &caller, caller_role, grantee)
    }

    pub fn revoke(env: Env, caller: Address, grantee: Address) -> Result<bool, AuthorizationError> {
        caller.require_auth();
        let caller_role = registry::get_role(&env, &caller);
        authorization::revoke(&env, &caller, caller_role, grantee)
    }

    pub fn is_authorized(env: Env, grantee: Address) -> bool {
        authorization::is_authorized(&env, &grantee)
    }

    pub fn authorized_contracts(env: Env) -> Vec<Address> {
        authorization::authorized_contracts(&env)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
