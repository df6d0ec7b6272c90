use anchor_lang::prelude::*;

/// Per-shipment claim marker. Once `claimed` is set it is never reset.
#[account]
#[derive(InitSpace)]
pub struct ClaimRecord {
    /// Shipment this record belongs to
    pub shipment_id: u64,
    /// Principal that received the reward
    pub claimant: Pubkey,
    /// Reward paid out
    pub amount: u64,
    /// Position of the payout in the distribution history
    pub sequence: u64,
    /// Timestamp of the claim
    pub claimed_at: i64,
    /// Idempotence marker
    pub claimed: bool,
    /// Bump seed for the PDA
    pub bump: u8,
}
