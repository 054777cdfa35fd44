use soroban_sdk::{contracttype, Address, String};

/// Ownership linkage of a medical record. `data_hash` points at the
/// off-chain content; nothing else about the content is stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    pub id: u64,
    pub owner: Address,
    pub author: Address,
    pub data_hash: String,
    pub created_at: u64,
}
