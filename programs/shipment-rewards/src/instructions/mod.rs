pub mod initialize_reward_config;
pub use initialize_reward_config::*;

pub mod update_config;
pub use update_config::*;

pub mod fund_pool;
pub use fund_pool::*;

pub mod claim_rewards;
pub use claim_rewards::*;

pub mod distribute_batch;
pub use distribute_batch::*;

pub mod query_rewards;
pub use query_rewards::*;
