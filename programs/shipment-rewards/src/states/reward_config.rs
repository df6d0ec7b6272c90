use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;

/// Global reward configuration, reward pool balance and distribution counters
#[account]
#[derive(InitSpace)]
pub struct RewardConfig {
    /// Principal allowed to change the configuration
    pub admin: Pubkey,
    /// Mint of the reward token (None until set)
    pub token_mint: Option<Pubkey>,
    /// Program owning shipment accounts (None until set)
    pub registry_program: Option<Pubkey>,
    /// Program owning eco proof accounts (None until set)
    pub verifier_program: Option<Pubkey>,
    /// Tokens available for payouts
    pub reward_pool: u64,
    /// Bulk bonus in percent, (0, 100]
    pub bulk_bonus_rate: u64,
    /// Eco bonus in percent, (0, 100]
    pub eco_bonus_rate: u64,
    /// Minimum shipment weight; can only be raised
    pub min_weight: u64,
    /// Upper bound on a single reward
    pub max_reward_cap: u64,
    /// Reward units per unit of weight
    pub time_multiplier: u64,
    /// Minimum age of a shipment in seconds
    pub min_duration: u64,
    /// Maximum number of shipments per batch
    pub max_batch_size: u32,
    /// Decay in percent per 100 seconds of shipment age
    pub decay_rate: u64,
    /// Claims are accepted only while active
    pub active: bool,
    /// Total tokens paid out
    pub total_distributed: u64,
    /// Timestamp of the latest payout
    pub last_distribution_time: i64,
    /// Number of payouts; sequence of the distribution history
    pub distribution_count: u64,
    /// Bump seed for the config PDA
    pub bump: u8,
    /// Bump seed for the pool authority PDA
    pub pool_authority_bump: u8,
}

/// Parameters tunable through the admin setters, used to tag update events
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigParameter {
    BulkBonusRate,
    EcoBonusRate,
    MinWeight,
    MaxRewardCap,
    TimeMultiplier,
    MinDuration,
    DecayRate,
    MaxBatchSize,
}

/// Collaborator addresses held by the configuration
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collaborator {
    TokenMint,
    RegistryProgram,
    VerifierProgram,
}

impl RewardConfig {
    /// Creates the configuration with default policy parameters
    pub fn new(admin: Pubkey, bump: u8, pool_authority_bump: u8) -> Self {
        Self {
            admin,
            token_mint: None,
            registry_program: None,
            verifier_program: None,
            reward_pool: 0,
            bulk_bonus_rate: DEFAULT_BULK_BONUS_RATE,
            eco_bonus_rate: DEFAULT_ECO_BONUS_RATE,
            min_weight: DEFAULT_MIN_WEIGHT,
            max_reward_cap: DEFAULT_MAX_REWARD_CAP,
            time_multiplier: DEFAULT_TIME_MULTIPLIER,
            min_duration: DEFAULT_MIN_DURATION,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            decay_rate: DEFAULT_DECAY_RATE,
            active: true,
            total_distributed: 0,
            last_distribution_time: 0,
            distribution_count: 0,
            bump,
            pool_authority_bump,
        }
    }

    /// Fails with NotAuthorized unless `caller` is the current admin
    pub fn ensure_admin(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.admin, ErrorCode::NotAuthorized);
        Ok(())
    }

    pub fn set_admin(&mut self, caller: &Pubkey, new_admin: Pubkey) -> Result<()> {
        self.ensure_admin(caller)?;
        require!(new_admin != Pubkey::default(), ErrorCode::NotAuthorized);
        self.admin = new_admin;
        Ok(())
    }

    pub fn set_collaborator(
        &mut self,
        caller: &Pubkey,
        collaborator: Collaborator,
        address: Pubkey,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        require!(address != Pubkey::default(), ErrorCode::NotAuthorized);
        // The pool balance is held in the vault of the current mint
        if collaborator == Collaborator::TokenMint && self.token_mint != Some(address) {
            require!(self.reward_pool == 0, ErrorCode::PoolNotEmpty);
        }

        let slot = match collaborator {
            Collaborator::TokenMint => &mut self.token_mint,
            Collaborator::RegistryProgram => &mut self.registry_program,
            Collaborator::VerifierProgram => &mut self.verifier_program,
        };
        *slot = Some(address);
        Ok(())
    }

    /// Validates a pool top-up and credits it; the caller moves the tokens
    pub fn fund(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        self.ensure_admin(caller)?;
        require!(self.token_mint.is_some(), ErrorCode::TraitNotSet);
        require!(amount > 0, ErrorCode::InvalidAmount);

        self.reward_pool = self.reward_pool
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Applies a validated parameter update and returns the previous value
    pub fn set_parameter(
        &mut self,
        caller: &Pubkey,
        parameter: ConfigParameter,
        value: u64,
    ) -> Result<u64> {
        self.ensure_admin(caller)?;

        let previous = match parameter {
            ConfigParameter::BulkBonusRate => {
                require!(is_valid_bonus_rate(value), ErrorCode::InvalidRate);
                std::mem::replace(&mut self.bulk_bonus_rate, value)
            }
            ConfigParameter::EcoBonusRate => {
                require!(is_valid_bonus_rate(value), ErrorCode::InvalidRate);
                std::mem::replace(&mut self.eco_bonus_rate, value)
            }
            ConfigParameter::MinWeight => {
                require!(value >= self.min_weight, ErrorCode::InvalidWeight);
                std::mem::replace(&mut self.min_weight, value)
            }
            ConfigParameter::MaxRewardCap => {
                require!(value > 0, ErrorCode::InvalidCap);
                std::mem::replace(&mut self.max_reward_cap, value)
            }
            ConfigParameter::TimeMultiplier => {
                require!(value >= MIN_TIME_MULTIPLIER, ErrorCode::InvalidMultiplier);
                std::mem::replace(&mut self.time_multiplier, value)
            }
            ConfigParameter::MinDuration => std::mem::replace(&mut self.min_duration, value),
            ConfigParameter::DecayRate => {
                require!(value <= MAX_DECAY_RATE, ErrorCode::InvalidRate);
                std::mem::replace(&mut self.decay_rate, value)
            }
            ConfigParameter::MaxBatchSize => {
                let size = u32::try_from(value).map_err(|_| ErrorCode::InvalidBatchSize)?;
                require!(
                    size > 0 && size <= MAX_BATCH_SIZE_LIMIT,
                    ErrorCode::InvalidBatchSize
                );
                u64::from(std::mem::replace(&mut self.max_batch_size, size))
            }
        };

        Ok(previous)
    }

    /// Flips the active flag and returns the new state
    pub fn toggle_active(&mut self, caller: &Pubkey) -> Result<bool> {
        self.ensure_admin(caller)?;
        self.active = !self.active;
        Ok(self.active)
    }

    /// Admission check of a batch of `len` shipments, run before any lookup
    pub fn ensure_batch(&self, len: usize) -> Result<()> {
        require!(len <= self.max_batch_size as usize, ErrorCode::BatchTooLarge);
        require!(self.active, ErrorCode::Inactive);
        Ok(())
    }

    /// Debits a payout from the pool and advances the distribution counters.
    /// Returns the history sequence number assigned to the payout.
    pub fn settle(&mut self, reward: u64, now: i64) -> Result<u64> {
        require!(self.reward_pool >= reward, ErrorCode::InsufficientPool);

        let reward_pool = self.reward_pool
            .checked_sub(reward)
            .ok_or(ErrorCode::InsufficientPool)?;
        let total_distributed = self.total_distributed
            .checked_add(reward)
            .ok_or(ErrorCode::MathOverflow)?;
        let sequence = self.distribution_count;
        let distribution_count = sequence
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        self.reward_pool = reward_pool;
        self.total_distributed = total_distributed;
        self.last_distribution_time = now;
        self.distribution_count = distribution_count;

        Ok(sequence)
    }
}

fn is_valid_bonus_rate(rate: u64) -> bool {
    rate > 0 && rate <= MAX_BONUS_RATE
}
