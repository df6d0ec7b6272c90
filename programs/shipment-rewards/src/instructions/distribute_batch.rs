use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::adapters::{ClaimRecordAccounts, EcoProofAccounts, ShipmentAccounts};
use crate::constants::{ACCOUNTS_PER_BATCH_ENTRY, POOL_AUTHORITY_SEED, POOL_VAULT_SEED, REWARD_CONFIG_SEED, USER_STATS_SEED};
use crate::engine::Distributor;
use crate::errors::ErrorCode;
use crate::states::{RewardConfig, UserStats};
use super::claim_rewards::{prepare_user_stats, vault_transfer};

/// Settles several shipments for one claimant.
///
/// Remaining accounts carry, for each shipment id in order: the shipment PDA,
/// the eco proof PDA and the (writable) claim record PDA.
#[derive(Accounts)]
pub struct DistributeBatch<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, RewardConfig>>,

    #[account(
        init_if_needed,
        payer = claimant,
        space = UserStats::DISCRIMINATOR.len() + UserStats::INIT_SPACE,
        seeds = [USER_STATS_SEED, claimant.key().as_ref()],
        bump
    )]
    pub user_stats: Box<Account<'info, UserStats>>,

    /// CHECK: PDA that owns the pool vault, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED],
        bump = config.pool_authority_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    /// Vault holding the reward pool
    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, pool_vault.mint.as_ref()],
        bump,
        token::authority = pool_authority,
        // Account validation runs before the handler, so an unset mint is
        // reported ahead of Inactive
        constraint = config.token_mint == Some(pool_vault.mint) @ ErrorCode::TraitNotSet
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    /// Claimant's token account receiving the rewards
    #[account(
        mut,
        token::mint = pool_vault.mint,
        token::authority = claimant
    )]
    pub claimant_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> DistributeBatch<'info> {
    pub fn handle(
        mut ctx: Context<'_, '_, 'info, 'info, DistributeBatch<'info>>,
        shipment_ids: Vec<u64>,
    ) -> Result<u64> {
        msg!("Distributing batch of {} shipments to {}", shipment_ids.len(), ctx.accounts.claimant.key());

        // An oversized batch cannot carry its accounts, so size is checked first
        ctx.accounts.config.ensure_batch(shipment_ids.len())?;

        let expected_accounts = shipment_ids
            .len()
            .checked_mul(ACCOUNTS_PER_BATCH_ENTRY)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(
            ctx.remaining_accounts.len() == expected_accounts,
            ErrorCode::InvalidRemainingAccounts
        );

        let now = Clock::get()?.unix_timestamp;
        let remaining = ctx.remaining_accounts;
        let accounts = &mut ctx.accounts;
        prepare_user_stats(&mut accounts.user_stats, accounts.claimant.key(), ctx.bumps.user_stats);

        let registry = ShipmentAccounts::new(remaining);
        let verifier = EcoProofAccounts::new(remaining);
        let mut token = vault_transfer(
            &accounts.config,
            &accounts.pool_vault,
            accounts.pool_authority.to_account_info(),
            &accounts.claimant_token_account,
            accounts.token_program.to_account_info(),
        );
        let mut claims = ClaimRecordAccounts::new(
            accounts.claimant.to_account_info(),
            accounts.system_program.to_account_info(),
            remaining,
        );

        let total = Distributor::new(&mut accounts.config, &registry, &verifier, &mut token, &mut claims)
            .distribute_batch(&shipment_ids, &mut accounts.user_stats, now)?;

        msg!("Batch distributed {} units", total);
        msg!("Reward pool remaining: {} units", accounts.config.reward_pool);

        emit!(crate::events::BatchDistributed {
            claimant: accounts.claimant.key(),
            shipment_count: shipment_ids.len() as u32,
            total_amount: total,
            reward_pool: accounts.config.reward_pool,
            timestamp: now,
        });

        Ok(total)
    }
}
