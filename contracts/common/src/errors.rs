use soroban_sdk::{contracterror, contracttype, Address, Env, String};

use crate::events;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Role, edge or grant checks that rejected the caller
    Authorization = 1,
    /// Resource lookup failures
    NotFound = 2,
    /// Malformed caller input
    Validation = 3,
    /// A dependency contract could not be reached or trapped
    System = 4,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user: Option<Address>,
    pub resource_id: Option<String>,
    pub timestamp: u64,
    pub retryable: bool,
}

/// Standardised error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 10 – 19 | Authorization                  |
/// | 20 – 29 | Resource not found             |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Dependency / system            |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum AuthorizationError {
    // ── Authorization (10–19) ────────────────────────────────
    /// The caller's current role is too low for the requested mutation.
    InsufficientRole = 10,

    /// The calling contract has no authorization edge into the target.
    UnauthorizedContract = 11,

    /// The identity holds neither a valid grant nor an equivalent role.
    AccessDenied = 12,

    /// The identity was never assigned a role.
    UnknownIdentity = 13,

    // ── Not-found (20–29) ────────────────────────────────────
    UserNotFound = 20,
    RecordNotFound = 21,
    GrantNotFound = 22,

    // ── Validation (30–39) ───────────────────────────────────
    /// One or more input parameters are invalid (e.g. self-grant,
    /// self-edge, purge of an owner that still holds ownership rights).
    InvalidInput = 30,
    InvalidName = 31,
    InvalidDataHash = 32,
    /// The grantee's role does not qualify for the requested grant.
    IneligibleGrantee = 33,
    AlreadyRegistered = 34,

    // ── Dependency (40–49) ───────────────────────────────────
    /// A cross-contract call trapped instead of returning a typed error.
    DependencyFailure = 40,
}

impl AuthorizationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthorizationError::InsufficientRole
            | AuthorizationError::UnauthorizedContract
            | AuthorizationError::AccessDenied
            | AuthorizationError::UnknownIdentity => ErrorCategory::Authorization,
            AuthorizationError::UserNotFound
            | AuthorizationError::RecordNotFound
            | AuthorizationError::GrantNotFound => ErrorCategory::NotFound,
            AuthorizationError::InvalidInput
            | AuthorizationError::InvalidName
            | AuthorizationError::InvalidDataHash
            | AuthorizationError::IneligibleGrantee
            | AuthorizationError::AlreadyRegistered => ErrorCategory::Validation,
            AuthorizationError::DependencyFailure => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AuthorizationError::InvalidInput
            | AuthorizationError::InvalidName
            | AuthorizationError::InvalidDataHash
            | AuthorizationError::IneligibleGrantee
            | AuthorizationError::AlreadyRegistered
            | AuthorizationError::UserNotFound
            | AuthorizationError::RecordNotFound
            | AuthorizationError::GrantNotFound => ErrorSeverity::Low,
            AuthorizationError::InsufficientRole
            | AuthorizationError::AccessDenied
            | AuthorizationError::UnknownIdentity => ErrorSeverity::Medium,
            AuthorizationError::UnauthorizedContract => ErrorSeverity::High,
            AuthorizationError::DependencyFailure => ErrorSeverity::Critical,
        }
    }

    /// Whether a rejection with this error is published as an `ERROR` event.
    /// Only authorization failures are; lookups and input validation return
    /// the bare error.
    pub fn is_reported(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }

    /// Authorization failures never become valid by waiting: the condition
    /// only changes through a separately authorized mutation.
    pub fn retryable(&self) -> bool {
        false
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthorizationError::InsufficientRole => "Caller role is too low for this operation",
            AuthorizationError::UnauthorizedContract => {
                "Calling contract is not authorized on this contract"
            }
            AuthorizationError::AccessDenied => "Access denied to the requested resource",
            AuthorizationError::UnknownIdentity => "Identity has no assigned role",
            AuthorizationError::UserNotFound => "User not found in the system",
            AuthorizationError::RecordNotFound => "Record not found",
            AuthorizationError::GrantNotFound => "No active access grant for this record",
            AuthorizationError::InvalidInput => "Invalid input parameters provided",
            AuthorizationError::InvalidName => "Invalid user name",
            AuthorizationError::InvalidDataHash => "Invalid data hash format",
            AuthorizationError::IneligibleGrantee => "Grantee role is not eligible for access",
            AuthorizationError::AlreadyRegistered => "User is already registered",
            AuthorizationError::DependencyFailure => "Dependency contract call failed",
        }
    }
}

/// Creates an ErrorContext structure from an error and optional user/resource information.
pub fn create_error_context(
    env: &Env,
    error: AuthorizationError,
    user: Option<Address>,
    resource_id: Option<String>,
) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        user,
        resource_id,
        timestamp: env.ledger().timestamp(),
        retryable: error.retryable(),
    }
}

/// Publishes an `ERROR` event describing a rejected operation and hands the
/// error back so call sites can `return Err(report(..))`.
///
/// Errors outside the authorization category are handed back unpublished.
/// The event belongs to the failed invocation, so hosts surface it as a
/// diagnostic event; it is not durable contract state.
pub fn report(
    env: &Env,
    error: AuthorizationError,
    user: Option<Address>,
    resource: &str,
) -> AuthorizationError {
    if !error.is_reported() {
        return error;
    }
    let context = create_error_context(env, error, user, Some(String::from_str(env, resource)));
    events::publish_error(env, error as u32, context);
    error
}

/// Collapses the nested result of a generated `try_*` client call.
///
/// A typed error from the callee is passed through unchanged; a trap or a
/// value that fails to decode becomes [`AuthorizationError::DependencyFailure`].
pub fn settle<T, C, I>(
    result: Result<Result<T, C>, Result<AuthorizationError, I>>,
) -> Result<T, AuthorizationError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(error)) => Err(error),
        _ => Err(AuthorizationError::DependencyFailure),
    }
}
