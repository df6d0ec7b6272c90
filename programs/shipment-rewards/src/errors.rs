use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not the admin or the address is the null address")]
    NotAuthorized,
    #[msg("Shipment not found in the registry")]
    InvalidShipment,
    #[msg("Rewards for this shipment were already claimed")]
    AlreadyClaimed,
    #[msg("Reward pool cannot cover the payout")]
    InsufficientPool,
    #[msg("Bonus rate must be within (0, 100]")]
    InvalidRate,
    #[msg("Reward cap must be greater than zero")]
    InvalidCap,
    #[msg("Time multiplier must be at least 1")]
    InvalidMultiplier,
    #[msg("Eco proof not found for this shipment")]
    InvalidEcoProof,
    #[msg("Shipment weight below minimum, or minimum weight lowered")]
    InvalidWeight,
    #[msg("Reward distribution is paused")]
    Inactive,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Shipment has not reached the minimum duration")]
    InvalidDuration,
    #[msg("Batch exceeds the maximum batch size")]
    BatchTooLarge,
    #[msg("Required collaborator address is not configured")]
    TraitNotSet,
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
    #[msg("Max batch size must be within [1, 18]")]
    InvalidBatchSize,
    #[msg("Claim record account does not match the shipment")]
    InvalidClaimRecord,
    #[msg("Remaining accounts do not match the batch layout")]
    InvalidRemainingAccounts,
    #[msg("Token account does not match the reward mint or recipient")]
    InvalidTokenAccount,
    #[msg("Reward mint cannot change while the pool holds tokens")]
    PoolNotEmpty,
}
