use anchor_lang::prelude::*;

/// Shipment facts published by the registry program.
/// Stored after an 8-byte discriminator in the `["shipment", id]` PDA of the registry.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shipment {
    pub weight: u64,
    pub bulk: bool,
    /// Creation time, unix seconds
    pub timestamp: i64,
}

/// Eco attestation published by the verifier program.
/// Stored after an 8-byte discriminator in the `["eco_proof", id]` PDA of the verifier.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcoProof {
    pub is_eco: bool,
}
