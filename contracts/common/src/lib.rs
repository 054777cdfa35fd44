//! Shared role model, error taxonomy and authorization graph for the
//! healthcare contract suite.
//!
//! This crate provides:
//! - [`Role`]: the closed, totally ordered role enumeration.
//! - [`AuthorizationError`]: standardised error codes for all contracts.
//! - [`authorization`]: the per-contract table of trusted peer contracts and
//!   the guard every privileged entry point runs first.
//! - [`interfaces`]: typed cross-contract clients.
//! - [`wiring`]: the deployment wiring plan used by the orchestrator and
//!   diagnostics.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod authorization;
pub mod errors;
pub mod events;
pub mod interfaces;
pub mod role;
pub mod types;
pub mod validation;
pub mod wiring;

pub use errors::{AuthorizationError, ErrorCategory, ErrorContext, ErrorSeverity};
pub use role::Role;
pub use types::MedicalRecord;
pub use wiring::{AuthorizationEdge, EdgeStatus, WiringPlan};

// ── Storage TTL policy ───────────────────────────────────────────────────────

pub const TTL_THRESHOLD: u32 = 5184000;
pub const TTL_EXTEND_TO: u32 = 10368000;
