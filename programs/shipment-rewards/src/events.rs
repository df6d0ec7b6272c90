use anchor_lang::prelude::*;
use crate::states::{Collaborator, ConfigParameter};

/// Event emitted when the reward configuration is created
#[event]
pub struct RewardConfigInitialized {
    /// Reward config PDA
    pub config: Pubkey,
    /// Initial admin
    pub admin: Pubkey,
    /// Bulk bonus in percent
    pub bulk_bonus_rate: u64,
    /// Eco bonus in percent
    pub eco_bonus_rate: u64,
    /// Minimum shipment weight
    pub min_weight: u64,
    /// Upper bound on a single reward
    pub max_reward_cap: u64,
    /// Maximum shipments per batch
    pub max_batch_size: u32,
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted when the admin is replaced
#[event]
pub struct AdminUpdated {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a collaborator address is set
#[event]
pub struct CollaboratorUpdated {
    pub collaborator: Collaborator,
    pub address: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a policy parameter changes
#[event]
pub struct ConfigParameterUpdated {
    pub parameter: ConfigParameter,
    pub previous_value: u64,
    pub new_value: u64,
    pub timestamp: i64,
}

/// Event emitted when distribution is paused or resumed
#[event]
pub struct ActiveToggled {
    pub active: bool,
    pub timestamp: i64,
}

/// Event emitted when the admin tops up the reward pool
#[event]
pub struct PoolFunded {
    /// Admin that funded the pool
    pub admin: Pubkey,
    /// Amount added
    pub amount: u64,
    /// Pool balance after funding
    pub reward_pool: u64,
    /// Timestamp of funding
    pub timestamp: i64,
}

/// Distribution history entry, emitted once per paid shipment
#[event]
pub struct RewardDistributed {
    /// Position in the distribution history
    pub sequence: u64,
    /// Shipment the reward was paid for
    pub shipment_id: u64,
    /// Principal that received the reward
    pub claimant: Pubkey,
    /// Reward paid out
    pub amount: u64,
    /// Timestamp of the payout
    pub timestamp: i64,
}

/// Event emitted when a batch settles
#[event]
pub struct BatchDistributed {
    /// Principal that received the rewards
    pub claimant: Pubkey,
    /// Number of shipments in the batch
    pub shipment_count: u32,
    /// Sum of the rewards paid out
    pub total_amount: u64,
    /// Pool balance after the batch
    pub reward_pool: u64,
    /// Timestamp of the batch
    pub timestamp: i64,
}
