pub mod reward_config;
pub mod claim_record;
pub mod user_stats;
pub mod external;

pub use reward_config::*;
pub use claim_record::*;
pub use user_stats::*;
pub use external::*;
