use anchor_lang::prelude::*;
use crate::constants::REWARD_CONFIG_SEED;
use crate::events::{ActiveToggled, AdminUpdated, CollaboratorUpdated, ConfigParameterUpdated};
use crate::states::{Collaborator, ConfigParameter, RewardConfig};

/// Admin-only configuration changes. Authorization is checked against the
/// stored admin by `RewardConfig`, so a wrong signer fails with NotAuthorized.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, RewardConfig>,
}

impl<'info> UpdateConfig<'info> {
    pub fn set_admin(ctx: Context<UpdateConfig>, new_admin: Pubkey) -> Result<()> {
        let caller = ctx.accounts.admin.key();
        let config = &mut ctx.accounts.config;
        let previous_admin = config.admin;

        config.set_admin(&caller, new_admin)?;
        msg!("Admin changed from {} to {}", previous_admin, new_admin);

        emit!(AdminUpdated {
            previous_admin,
            new_admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn set_collaborator(
        ctx: Context<UpdateConfig>,
        collaborator: Collaborator,
        address: Pubkey,
    ) -> Result<()> {
        let caller = ctx.accounts.admin.key();
        ctx.accounts.config.set_collaborator(&caller, collaborator, address)?;
        msg!("{:?} set to {}", collaborator, address);

        emit!(CollaboratorUpdated {
            collaborator,
            address,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn set_parameter(
        ctx: Context<UpdateConfig>,
        parameter: ConfigParameter,
        value: u64,
    ) -> Result<()> {
        let caller = ctx.accounts.admin.key();
        let previous_value = ctx.accounts.config.set_parameter(&caller, parameter, value)?;
        msg!("{:?} updated: {} -> {}", parameter, previous_value, value);

        emit!(ConfigParameterUpdated {
            parameter,
            previous_value,
            new_value: value,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn toggle_active(ctx: Context<UpdateConfig>) -> Result<bool> {
        let caller = ctx.accounts.admin.key();
        let active = ctx.accounts.config.toggle_active(&caller)?;
        msg!("Reward distribution active: {}", active);

        emit!(ActiveToggled {
            active,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(active)
    }
}
