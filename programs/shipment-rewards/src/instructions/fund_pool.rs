use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::{POOL_AUTHORITY_SEED, POOL_VAULT_SEED, REWARD_CONFIG_SEED};
use crate::states::RewardConfig;

#[derive(Accounts)]
pub struct FundPool<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_CONFIG_SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ ErrorCode::NotAuthorized,
        constraint = config.token_mint.is_some() @ ErrorCode::TraitNotSet
    )]
    pub config: Box<Account<'info, RewardConfig>>,

    /// Reward token mint, must match the configured mint
    #[account(
        constraint = config.token_mint == Some(token_mint.key()) @ ErrorCode::InvalidTokenAccount
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA that owns the pool vault, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED],
        bump = config.pool_authority_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    /// Vault holding the reward pool
    #[account(
        init_if_needed,
        payer = admin,
        seeds = [POOL_VAULT_SEED, token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = pool_authority
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    /// Admin's token account the funds come from
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = admin
    )]
    pub admin_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> FundPool<'info> {
    pub fn handle(ctx: Context<FundPool>, amount: u64) -> Result<()> {
        msg!("Funding reward pool with {} units", amount);

        let admin = ctx.accounts.admin.key();
        ctx.accounts.config.fund(&admin, amount)?;

        anchor_spl::token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                anchor_spl::token::Transfer {
                    from: ctx.accounts.admin_token_account.to_account_info(),
                    to: ctx.accounts.pool_vault.to_account_info(),
                    authority: ctx.accounts.admin.to_account_info(),
                },
            ),
            amount,
        )?;

        let reward_pool = ctx.accounts.config.reward_pool;
        msg!("Reward pool balance: {} units", reward_pool);

        emit!(crate::events::PoolFunded {
            admin,
            amount,
            reward_pool,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
