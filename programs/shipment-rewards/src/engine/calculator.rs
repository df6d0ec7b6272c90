use anchor_lang::prelude::*;
use crate::constants::{DECAY_BUCKET_SECONDS, PERCENT_DENOMINATOR};
use crate::errors::ErrorCode;
use crate::states::{EcoProof, RewardConfig, Shipment};
use super::gateways::{EcoVerifier, ShipmentRegistry};

/// Snapshot of the configuration fields that drive the reward formula
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardPolicy {
    pub min_weight: u64,
    pub min_duration: u64,
    pub time_multiplier: u64,
    pub bulk_bonus_rate: u64,
    pub eco_bonus_rate: u64,
    pub decay_rate: u64,
    pub max_reward_cap: u64,
}

impl From<&RewardConfig> for RewardPolicy {
    fn from(config: &RewardConfig) -> Self {
        Self {
            min_weight: config.min_weight,
            min_duration: config.min_duration,
            time_multiplier: config.time_multiplier,
            bulk_bonus_rate: config.bulk_bonus_rate,
            eco_bonus_rate: config.eco_bonus_rate,
            decay_rate: config.decay_rate,
            max_reward_cap: config.max_reward_cap,
        }
    }
}

impl RewardPolicy {
    /// Checks eligibility and computes the reward for a shipment at time `now`.
    ///
    /// reward = weight * time_multiplier, then the bulk bonus, then the eco bonus
    /// compounding on the bulk-adjusted amount, minus
    /// `reward * decay_rate * (duration / 100) / 100`, clamped to `max_reward_cap`.
    /// All divisions truncate.
    pub fn compute(&self, shipment: &Shipment, proof: &EcoProof, now: i64) -> Result<u64> {
        require!(shipment.weight >= self.min_weight, ErrorCode::InvalidWeight);

        // A shipment timestamped in the future has a negative age
        let duration = now
            .checked_sub(shipment.timestamp)
            .and_then(|elapsed| u64::try_from(elapsed).ok())
            .ok_or(ErrorCode::InvalidDuration)?;
        require!(duration >= self.min_duration, ErrorCode::InvalidDuration);

        let mut reward = (shipment.weight as u128)
            .checked_mul(self.time_multiplier as u128)
            .ok_or(ErrorCode::MathOverflow)?;

        if shipment.bulk {
            reward = apply_bonus(reward, self.bulk_bonus_rate)?;
        }
        if proof.is_eco {
            reward = apply_bonus(reward, self.eco_bonus_rate)?;
        }

        let decay = reward
            .checked_mul(self.decay_rate as u128)
            .and_then(|v| v.checked_mul(duration as u128 / DECAY_BUCKET_SECONDS))
            .ok_or(ErrorCode::MathOverflow)?
            / PERCENT_DENOMINATOR;

        let reward = reward.saturating_sub(decay).min(self.max_reward_cap as u128);

        // Bounded by max_reward_cap
        u64::try_from(reward).map_err(|_| error!(ErrorCode::MathOverflow))
    }
}

fn apply_bonus(reward: u128, rate: u64) -> Result<u128> {
    let bonus = reward
        .checked_mul(rate as u128)
        .ok_or(ErrorCode::MathOverflow)?
        / PERCENT_DENOMINATOR;
    Ok(reward.checked_add(bonus).ok_or(ErrorCode::MathOverflow)?)
}

/// Resolves the shipment and its eco proof through the gateways and prices it.
/// Never mutates state.
pub fn calculate_reward<R, V>(
    config: &RewardConfig,
    registry: &R,
    verifier: &V,
    shipment_id: u64,
    now: i64,
) -> Result<u64>
where
    R: ShipmentRegistry + ?Sized,
    V: EcoVerifier + ?Sized,
{
    let (registry_program, verifier_program) = match (config.registry_program, config.verifier_program) {
        (Some(registry_program), Some(verifier_program)) => (registry_program, verifier_program),
        _ => return err!(ErrorCode::TraitNotSet),
    };

    let shipment = registry.get_shipment(&registry_program, shipment_id)?;
    let proof = verifier.verify_eco(&verifier_program, shipment_id)?;

    RewardPolicy::from(config).compute(&shipment, &proof, now)
}
