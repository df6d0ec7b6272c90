use anchor_lang::prelude::*;
use crate::adapters::{EcoProofAccounts, ShipmentAccounts};
use crate::constants::REWARD_CONFIG_SEED;
use crate::engine::calculate_reward;
use crate::states::RewardConfig;

/// Prices a shipment without claiming it
#[derive(Accounts)]
pub struct PreviewReward<'info> {
    #[account(
        seeds = [REWARD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, RewardConfig>,

    /// CHECK: Shipment PDA of the registry program, validated when read
    pub shipment: UncheckedAccount<'info>,

    /// CHECK: Eco proof PDA of the verifier program, validated when read
    pub eco_proof: UncheckedAccount<'info>,
}

impl<'info> PreviewReward<'info> {
    pub fn handle(ctx: Context<PreviewReward>, shipment_id: u64) -> Result<u64> {
        let externals = [
            ctx.accounts.shipment.to_account_info(),
            ctx.accounts.eco_proof.to_account_info(),
        ];
        let reward = calculate_reward(
            &ctx.accounts.config,
            &ShipmentAccounts::new(&externals),
            &EcoProofAccounts::new(&externals),
            shipment_id,
            Clock::get()?.unix_timestamp,
        )?;

        msg!("Shipment {} would pay {} units", shipment_id, reward);
        Ok(reward)
    }
}

/// Aggregate distribution state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct DistributionSummary {
    pub active: bool,
    pub reward_pool: u64,
    pub total_distributed: u64,
    pub last_distribution_time: i64,
    pub distribution_count: u64,
}

impl From<&RewardConfig> for DistributionSummary {
    fn from(config: &RewardConfig) -> Self {
        Self {
            active: config.active,
            reward_pool: config.reward_pool,
            total_distributed: config.total_distributed,
            last_distribution_time: config.last_distribution_time,
            distribution_count: config.distribution_count,
        }
    }
}

#[derive(Accounts)]
pub struct QueryDistribution<'info> {
    #[account(
        seeds = [REWARD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, RewardConfig>,
}

impl<'info> QueryDistribution<'info> {
    pub fn handle(ctx: Context<QueryDistribution>) -> Result<DistributionSummary> {
        let summary = DistributionSummary::from(&*ctx.accounts.config);

        msg!("Distribution active: {}", summary.active);
        msg!("Reward pool: {} units", summary.reward_pool);
        msg!("Total distributed: {} units", summary.total_distributed);
        msg!("Distributions: {}", summary.distribution_count);

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mirrors_config() {
        let admin = Pubkey::new_unique();
        let mut config = RewardConfig::new(admin, 1, 2);
        config.reward_pool = 9_874;
        config.total_distributed = 126;
        config.last_distribution_time = 10;
        config.distribution_count = 1;

        let summary = DistributionSummary::from(&config);
        assert!(summary.active);
        assert_eq!(summary.reward_pool, 9_874);
        assert_eq!(summary.total_distributed, 126);
        assert_eq!(summary.last_distribution_time, 10);
        assert_eq!(summary.distribution_count, 1);
    }
}
