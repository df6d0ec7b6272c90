// PDA Seeds
pub const REWARD_CONFIG_SEED: &[u8] = b"reward_config";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const CLAIM_RECORD_SEED: &[u8] = b"claim_record";
pub const USER_STATS_SEED: &[u8] = b"user_stats";

// Seeds of the accounts owned by the registry and verifier programs
pub const SHIPMENT_SEED: &[u8] = b"shipment";
pub const ECO_PROOF_SEED: &[u8] = b"eco_proof";

// Default policy parameters
pub const DEFAULT_BULK_BONUS_RATE: u64 = 10; // 10%
pub const DEFAULT_ECO_BONUS_RATE: u64 = 15; // 15%
pub const DEFAULT_MIN_WEIGHT: u64 = 50;
pub const DEFAULT_MAX_REWARD_CAP: u64 = 1_000_000;
pub const DEFAULT_TIME_MULTIPLIER: u64 = 1;
pub const DEFAULT_MIN_DURATION: u64 = 1; // seconds
pub const DEFAULT_MAX_BATCH_SIZE: u32 = 16;
pub const DEFAULT_DECAY_RATE: u64 = 5; // 5% per decay bucket

// Validation constants
pub const MAX_BONUS_RATE: u64 = 100; // 100% maximum
pub const MAX_DECAY_RATE: u64 = 100;
pub const MIN_TIME_MULTIPLIER: u64 = 1;
// A transaction locks at most 64 accounts. Batches need 9 fixed keys
// (8 named accounts plus the program) and 3 per shipment.
pub const MAX_BATCH_SIZE_LIMIT: u32 = 18;

// Reward math constants
pub const PERCENT_DENOMINATOR: u128 = 100;
pub const DECAY_BUCKET_SECONDS: u128 = 100;

// Remaining accounts supplied per shipment in a batch: shipment, eco proof, claim record
pub const ACCOUNTS_PER_BATCH_ENTRY: usize = 3;
