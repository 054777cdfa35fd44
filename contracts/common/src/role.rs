use soroban_sdk::contracttype;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Closed role hierarchy shared by every contract in the suite.
///
/// ```text
/// Admin (4)               : sets roles, edits the authorization graph
/// Insurer (3)             : may be granted read access to records
/// HealthcareProvider (2)  : authors records, may be granted read access
/// Patient (1)             : owns records and shares them
/// Unassigned (0)          : default for every unknown identity
/// ```
///
/// Comparisons go through [`Role::rank`] and [`Role::has_at_least`]; call
/// sites never compare raw discriminants.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Role {
    Unassigned = 0,
    Patient = 1,
    HealthcareProvider = 2,
    Insurer = 3,
    Admin = 4,
}

impl Role {
    /// Returns the numeric rank of this role for comparison.
    pub fn rank(&self) -> u32 {
        match self {
            Role::Unassigned => 0,
            Role::Patient => 1,
            Role::HealthcareProvider => 2,
            Role::Insurer => 3,
            Role::Admin => 4,
        }
    }

    /// Returns true if this role is at least as high as `min_role`.
    pub fn has_at_least(&self, min_role: &Role) -> bool {
        self.rank() >= min_role.rank()
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }

    /// Whether an identity holding this role keeps ownership rights over its
    /// records (and therefore over the grants it issued).
    pub fn can_own_records(&self) -> bool {
        self.has_at_least(&Role::Patient)
    }

    /// Whether this role may author records on behalf of another identity.
    pub fn can_author_records(&self) -> bool {
        matches!(self, Role::HealthcareProvider | Role::Admin)
    }
}
