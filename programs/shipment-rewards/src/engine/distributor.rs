use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::states::{RewardConfig, UserStats};
use super::calculator::calculate_reward;
use super::gateways::{ClaimReceipt, ClaimStore, EcoVerifier, ShipmentRegistry, TokenGateway};

/// Claim and batch settlement against the reward configuration.
///
/// The collaborators are borrowed for the duration of one instruction.
pub struct Distributor<'a, R: ?Sized, V: ?Sized, T: ?Sized, S: ?Sized> {
    config: &'a mut RewardConfig,
    registry: &'a R,
    verifier: &'a V,
    token: &'a mut T,
    claims: &'a mut S,
}

impl<'a, R, V, T, S> Distributor<'a, R, V, T, S>
where
    R: ShipmentRegistry + ?Sized,
    V: EcoVerifier + ?Sized,
    T: TokenGateway + ?Sized,
    S: ClaimStore + ?Sized,
{
    pub fn new(
        config: &'a mut RewardConfig,
        registry: &'a R,
        verifier: &'a V,
        token: &'a mut T,
        claims: &'a mut S,
    ) -> Self {
        Self { config, registry, verifier, token, claims }
    }

    /// Computes the reward a shipment would pay right now, without side effects
    pub fn preview(&self, shipment_id: u64, now: i64) -> Result<u64> {
        calculate_reward(&*self.config, self.registry, self.verifier, shipment_id, now)
    }

    /// Pays out the reward for one shipment to `claimant`
    pub fn claim_rewards(&mut self, shipment_id: u64, claimant: &mut UserStats, now: i64) -> Result<u64> {
        require!(self.config.active, ErrorCode::Inactive);
        require!(!self.claims.is_claimed(shipment_id)?, ErrorCode::AlreadyClaimed);

        let reward = self.preview(shipment_id, now)?;
        msg!("Shipment {} reward: {} units", shipment_id, reward);

        require!(reward > 0, ErrorCode::InvalidAmount);
        require!(self.config.reward_pool >= reward, ErrorCode::InsufficientPool);
        let mint = self.config.token_mint.ok_or(ErrorCode::TraitNotSet)?;

        self.pay(shipment_id, &mint, reward, claimant, now)?;

        msg!("Reward pool remaining: {} units", self.config.reward_pool);
        msg!("Total distributed: {} units", self.config.total_distributed);

        Ok(reward)
    }

    /// Settles a batch of shipments for `claimant`, all or nothing.
    ///
    /// Errors surface in the order of a dry run followed by one claim per
    /// shipment: pricing failures, then the pool total, then the per-claim
    /// checks of each shipment in turn. All of them are raised before the
    /// first payout.
    pub fn distribute_batch(&mut self, shipment_ids: &[u64], claimant: &mut UserStats, now: i64) -> Result<u64> {
        self.config.ensure_batch(shipment_ids.len())?;

        let mut priced = Vec::with_capacity(shipment_ids.len());
        let mut total: u64 = 0;
        for &shipment_id in shipment_ids {
            let reward = self.preview(shipment_id, now)?;
            total = total.checked_add(reward).ok_or(ErrorCode::MathOverflow)?;
            priced.push((shipment_id, reward));
        }

        msg!("Batch of {} shipments priced at {} units", shipment_ids.len(), total);
        require!(self.config.reward_pool >= total, ErrorCode::InsufficientPool);

        let mut seen = BTreeSet::new();
        for &(shipment_id, reward) in &priced {
            require!(
                seen.insert(shipment_id) && !self.claims.is_claimed(shipment_id)?,
                ErrorCode::AlreadyClaimed
            );
            require!(reward > 0, ErrorCode::InvalidAmount);
            require!(self.config.token_mint.is_some(), ErrorCode::TraitNotSet);
        }

        let Some(mint) = self.config.token_mint else {
            return Ok(0);
        };
        for &(shipment_id, reward) in &priced {
            self.pay(shipment_id, &mint, reward, claimant, now)?;
        }

        msg!("Reward pool remaining: {} units", self.config.reward_pool);
        Ok(total)
    }

    /// Transfers a validated reward and commits it to the ledger
    fn pay(&mut self, shipment_id: u64, mint: &Pubkey, reward: u64, claimant: &mut UserStats, now: i64) -> Result<()> {
        self.token.transfer(mint, reward, &claimant.user)?;

        let sequence = self.config.settle(reward, now)?;
        claimant.record_claim(reward, now)?;
        self.claims.record(&ClaimReceipt {
            shipment_id,
            claimant: claimant.user,
            amount: reward,
            sequence,
            timestamp: now,
        })
    }
}
