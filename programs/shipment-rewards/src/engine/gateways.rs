use anchor_lang::prelude::*;
use crate::states::{EcoProof, Shipment};

/// Read access to the shipment registry
pub trait ShipmentRegistry {
    /// Fails with `InvalidShipment` when `registry` holds no shipment `shipment_id`
    fn get_shipment(&self, registry: &Pubkey, shipment_id: u64) -> Result<Shipment>;
}

/// Read access to the eco-proof verifier
pub trait EcoVerifier {
    /// Fails with `InvalidEcoProof` when `verifier` holds no proof for `shipment_id`
    fn verify_eco(&self, verifier: &Pubkey, shipment_id: u64) -> Result<EcoProof>;
}

/// Moves reward tokens out of the pool
pub trait TokenGateway {
    fn transfer(&mut self, mint: &Pubkey, amount: u64, recipient: &Pubkey) -> Result<()>;
}

/// A committed payout, one entry of the distribution history
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub shipment_id: u64,
    pub claimant: Pubkey,
    pub amount: u64,
    pub sequence: u64,
    pub timestamp: i64,
}

/// Claim markers and the distribution history
pub trait ClaimStore {
    fn is_claimed(&self, shipment_id: u64) -> Result<bool>;

    /// Marks the shipment claimed and appends the receipt to the history
    fn record(&mut self, receipt: &ClaimReceipt) -> Result<()>;
}
