use anchor_lang::prelude::*;

declare_id!("HVkAfQYUuxQ88rPCvaAJDfCeEwLEixP4S85R2WgH74zg");

pub mod instructions;
pub mod errors;
pub mod constants;
pub mod states;
pub mod events;
pub mod engine;
pub mod adapters;

pub use instructions::*;
pub use events::*;
pub use states::{Collaborator, ConfigParameter};

#[program]
pub mod shipment_rewards {
    use super::*;

    pub fn initialize(ctx: Context<InitializeRewardConfig>) -> Result<()> {
        InitializeRewardConfig::handle(ctx)
    }

    pub fn set_admin(ctx: Context<UpdateConfig>, new_admin: Pubkey) -> Result<()> {
        UpdateConfig::set_admin(ctx, new_admin)
    }

    pub fn set_token_mint(ctx: Context<UpdateConfig>, mint: Pubkey) -> Result<()> {
        UpdateConfig::set_collaborator(ctx, Collaborator::TokenMint, mint)
    }

    pub fn set_registry_program(ctx: Context<UpdateConfig>, registry: Pubkey) -> Result<()> {
        UpdateConfig::set_collaborator(ctx, Collaborator::RegistryProgram, registry)
    }

    pub fn set_verifier_program(ctx: Context<UpdateConfig>, verifier: Pubkey) -> Result<()> {
        UpdateConfig::set_collaborator(ctx, Collaborator::VerifierProgram, verifier)
    }

    pub fn fund_pool(ctx: Context<FundPool>, amount: u64) -> Result<()> {
        FundPool::handle(ctx, amount)
    }

    pub fn set_bulk_bonus_rate(ctx: Context<UpdateConfig>, rate: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::BulkBonusRate, rate)
    }

    pub fn set_eco_bonus_rate(ctx: Context<UpdateConfig>, rate: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::EcoBonusRate, rate)
    }

    pub fn set_min_weight(ctx: Context<UpdateConfig>, weight: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::MinWeight, weight)
    }

    pub fn set_max_reward_cap(ctx: Context<UpdateConfig>, cap: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::MaxRewardCap, cap)
    }

    pub fn set_time_multiplier(ctx: Context<UpdateConfig>, multiplier: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::TimeMultiplier, multiplier)
    }

    pub fn set_min_duration(ctx: Context<UpdateConfig>, seconds: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::MinDuration, seconds)
    }

    pub fn set_decay_rate(ctx: Context<UpdateConfig>, rate: u64) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::DecayRate, rate)
    }

    pub fn set_max_batch_size(ctx: Context<UpdateConfig>, size: u32) -> Result<()> {
        UpdateConfig::set_parameter(ctx, ConfigParameter::MaxBatchSize, u64::from(size))
    }

    pub fn toggle_active(ctx: Context<UpdateConfig>) -> Result<bool> {
        UpdateConfig::toggle_active(ctx)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>, shipment_id: u64) -> Result<u64> {
        ClaimRewards::handle(ctx, shipment_id)
    }

    pub fn distribute_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeBatch<'info>>,
        shipment_ids: Vec<u64>,
    ) -> Result<u64> {
        DistributeBatch::handle(ctx, shipment_ids)
    }

    pub fn preview_reward(ctx: Context<PreviewReward>, shipment_id: u64) -> Result<u64> {
        PreviewReward::handle(ctx, shipment_id)
    }

    pub fn query_distribution(ctx: Context<QueryDistribution>) -> Result<DistributionSummary> {
        QueryDistribution::handle(ctx)
    }
}
