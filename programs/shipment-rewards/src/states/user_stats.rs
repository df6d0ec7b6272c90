use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Per-principal reward statistics
#[account]
#[derive(InitSpace, Default)]
pub struct UserStats {
    /// The principal's public key
    pub user: Pubkey,
    /// Running total of rewards recorded for the principal
    pub pending_rewards: u64,
    /// Lifetime rewards claimed
    pub total_claimed: u64,
    /// Timestamp of the latest successful claim
    pub last_claim_time: i64,
    /// Number of successful claims
    pub claim_count: u32,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl UserStats {
    pub fn new(user: Pubkey, bump: u8) -> Self {
        Self {
            user,
            bump,
            ..Self::default()
        }
    }

    /// Records a successful claim
    pub fn record_claim(&mut self, amount: u64, now: i64) -> Result<()> {
        let pending_rewards = self.pending_rewards
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_claimed = self.total_claimed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let claim_count = self.claim_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        self.pending_rewards = pending_rewards;
        self.total_claimed = total_claimed;
        self.claim_count = claim_count;
        self.last_claim_time = now;

        Ok(())
    }
}
