use anchor_lang::prelude::*;
use crate::constants::{POOL_AUTHORITY_SEED, REWARD_CONFIG_SEED};
use crate::states::RewardConfig;

#[derive(Accounts)]
pub struct InitializeRewardConfig<'info> {
    /// Becomes the admin of the reward configuration
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Reward configuration PDA
    #[account(
        init,
        payer = admin,
        space = RewardConfig::DISCRIMINATOR.len() + RewardConfig::INIT_SPACE,
        seeds = [REWARD_CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, RewardConfig>,

    /// CHECK: PDA that owns the pool vault, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeRewardConfig<'info> {
    pub fn handle(ctx: Context<InitializeRewardConfig>) -> Result<()> {
        msg!("Initializing reward configuration");

        let admin = ctx.accounts.admin.key();
        let config_key = ctx.accounts.config.key();
        let config = &mut ctx.accounts.config;
        config.set_inner(RewardConfig::new(
            admin,
            ctx.bumps.config,
            ctx.bumps.pool_authority,
        ));

        msg!("Admin: {}", admin);
        msg!("Bulk bonus: {}%", config.bulk_bonus_rate);
        msg!("Eco bonus: {}%", config.eco_bonus_rate);
        msg!("Min weight: {}", config.min_weight);
        msg!("Max reward cap: {}", config.max_reward_cap);
        msg!("Max batch size: {}", config.max_batch_size);

        emit!(crate::events::RewardConfigInitialized {
            config: config_key,
            admin,
            bulk_bonus_rate: config.bulk_bonus_rate,
            eco_bonus_rate: config.eco_bonus_rate,
            min_weight: config.min_weight,
            max_reward_cap: config.max_reward_cap,
            max_batch_size: config.max_batch_size,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
