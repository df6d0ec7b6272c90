use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::adapters::{ClaimRecordAccounts, EcoProofAccounts, ShipmentAccounts, VaultTransfer};
use crate::constants::{CLAIM_RECORD_SEED, POOL_AUTHORITY_SEED, POOL_VAULT_SEED, REWARD_CONFIG_SEED, USER_STATS_SEED};
use crate::engine::Distributor;
use crate::errors::ErrorCode;
use crate::states::{RewardConfig, UserStats};

#[derive(Accounts)]
#[instruction(shipment_id: u64)]
pub struct ClaimRewards<'info> {
    /// Principal claiming the reward; pays for new records
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

    /// CHECK: Shipment PDA of the registry program, validated when read
    pub shipment: UncheckedAccount<'info>,

    /// CHECK: Eco proof PDA of the verifier program, validated when read
    pub eco_proof: UncheckedAccount<'info>,

    /// CHECK: Claim record PDA, created by the claim store on first payout
    #[account(
        mut,
        seeds = [CLAIM_RECORD_SEED, shipment_id.to_le_bytes().as_ref()],
        bump
    )]
    pub claim_record: UncheckedAccount<'info>,

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

    /// Claimant's token account receiving the reward
    #[account(
        mut,
        token::mint = pool_vault.mint,
        token::authority = claimant
    )]
    pub claimant_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> ClaimRewards<'info> {
    pub fn handle(mut ctx: Context<ClaimRewards>, shipment_id: u64) -> Result<u64> {
        msg!("Claiming rewards for shipment {} by {}", shipment_id, ctx.accounts.claimant.key());

        let now = Clock::get()?.unix_timestamp;
        let accounts = &mut ctx.accounts;
        prepare_user_stats(&mut accounts.user_stats, accounts.claimant.key(), ctx.bumps.user_stats);

        let externals = [accounts.shipment.to_account_info(), accounts.eco_proof.to_account_info()];
        let claim_records = [accounts.claim_record.to_account_info()];
        let registry = ShipmentAccounts::new(&externals);
        let verifier = EcoProofAccounts::new(&externals);
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
            &claim_records,
        );

        let reward = Distributor::new(&mut accounts.config, &registry, &verifier, &mut token, &mut claims)
            .claim_rewards(shipment_id, &mut accounts.user_stats, now)?;

        msg!("Shipment {} paid {} units", shipment_id, reward);
        msg!("Claimant total claimed: {} units", accounts.user_stats.total_claimed);

        Ok(reward)
    }
}

/// Fills a freshly created user stats account
pub(crate) fn prepare_user_stats(user_stats: &mut Account<UserStats>, claimant: Pubkey, bump: u8) {
    if user_stats.user == Pubkey::default() {
        user_stats.set_inner(UserStats::new(claimant, bump));
        msg!("Created user stats for {}", claimant);
    }
}

pub(crate) fn vault_transfer<'info>(
    config: &RewardConfig,
    pool_vault: &Account<'info, TokenAccount>,
    pool_authority: AccountInfo<'info>,
    recipient: &Account<'info, TokenAccount>,
    token_program: AccountInfo<'info>,
) -> VaultTransfer<'info> {
    VaultTransfer {
        token_program,
        vault: pool_vault.to_account_info(),
        vault_mint: pool_vault.mint,
        pool_authority,
        pool_authority_bump: config.pool_authority_bump,
        recipient_account: recipient.to_account_info(),
        recipient_owner: recipient.owner,
    }
}
