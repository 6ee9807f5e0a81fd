use soroban_sdk::{contracterror, contracttype, Address, Env};

/// 18-decimal fixed-point denominator for prices and fee rates.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Fee rates must stay strictly below 45%.
pub const MAX_FEE: i128 = 450_000_000_000_000_000;

/// Upper bound on the number of contributor classes.
pub const MAX_CLASSES: u32 = 100;

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    Config,          // Immutable sale configuration (set once)
    State,           // Mutable sale counters and flags
    ClassCount,      // Number of registered contributor classes
    Class(u32),      // Class ID -> ContributorClass
    Funder(Address), // Contributor -> FunderPortfolio
    Metadata,        // Opaque metadata blob
}

/// Immutable sale configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone)]
pub struct SaleConfig {
    pub admin: Address,
    pub beneficiary: Address,
    pub seed_token: Address,    // Asset being distributed
    pub funding_token: Address, // Asset being collected
    pub soft_cap: i128,         // Minimum funding for the sale to succeed
    pub hard_cap: i128,         // Maximum funding the sale accepts
    pub price: i128,            // Funding per seed unit, 18-decimal fixed point
    pub start_time: u64,
    pub end_time: u64,
    pub vesting_cliff: u64,          // Applied uniformly to every class
    pub permissioned: bool,          // Whether buyers must be whitelisted
    pub seed_amount_required: i128,  // hard_cap * PRECISION / price
    pub fee_amount_required: i128,   // seed_amount_required * fee / PRECISION
}

/// Mutable sale counters and lifecycle flags.
#[contracttype]
#[derive(Clone)]
pub struct SaleState {
    pub funding_collected: i128,
    pub funding_withdrawn: i128,
    pub seed_claimed: i128,
    pub fee_claimed: i128,
    pub seed_remainder: i128, // Unsold seed inventory
    pub fee_remainder: i128,  // Unused fee inventory
    pub paused: bool,
    pub closed: bool,
}

/// When a class's vesting schedule begins.
///
/// `Pending` is resolved to `Fixed(now)` exactly once, by the purchase
/// that first pushes total funding past the soft cap.
#[contracttype]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VestingStart {
    Fixed(u64),
    Pending,
}

/// A contributor cohort with its own pricing, caps and schedule.
#[contracttype]
#[derive(Clone)]
pub struct ContributorClass {
    pub cap: i128,          // Funding cap for the whole class
    pub personal_cap: i128, // Funding cap per contributor
    pub price: i128,        // Funding per seed unit, 18-decimal fixed point
    pub vesting_duration: u64,
    pub vesting_start: VestingStart,
    pub fee: i128, // Fixed-point fee rate, < MAX_FEE
    pub funding_collected: i128,
}

/// Per-contributor ledger record, created lazily on first interaction.
#[contracttype]
#[derive(Clone)]
pub struct FunderPortfolio {
    pub class_id: u32,
    pub funding: i128,     // Cumulative funding contributed
    pub seed_amount: i128, // Cumulative seed purchased
    pub fee_owed: i128,    // Fee entitlement locked at purchase time
    pub claimed: i128,     // Seed already claimed
    pub fee_claimed: i128, // Fee already released to the beneficiary
    pub whitelisted: bool,
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,        // Contract already initialized
    NotInitialized = 2,            // Contract not yet initialized
    CallerNotAdmin = 3,            // Caller should be admin
    ShouldNotBePaused = 4,         // Contract should not be paused
    ShouldBePaused = 5,            // Contract should be paused
    ShouldNotBeClosed = 6,         // Contract should not be closed
    NotDistributionPeriod = 7,     // Only allowed during distribution period
    DistributionNotStarted = 8,    // Distribution hasn't started
    DistributionNotFinished = 9,   // The distribution has not yet finished
    VestingNotStarted = 10,        // Vesting start time for this class is not started yet
    VestingAlreadyStarted = 11,    // Vesting is already started
    MaxClassFundingReached = 12,   // Maximum class funding reached
    MaxPersonalFundingReached = 13, // Maximum personal funding reached
    HardCapReached = 14,           // Amount exceeds sale hard cap
    InsufficientSeedInventory = 15, // Sufficient seeds not provided
    ZeroFundingAmount = 16,        // Zero funding amount
    NothingClaimable = 17,         // Amount claimable is 0
    ClaimExceedsClaimable = 18,    // Request is greater than claimable amount
    MinimumAlreadyMet = 19,        // Minimum funding amount met
    MinimumNotMet = 20,            // Minimum funding amount not met
    ArraySizeMismatch = 21,        // All provided arrays should be same size
    ClassLimitReached = 22,        // Can't register more than 100 classes
    InvalidClass = 23,             // Incorrect class chosen
    FeeTooHigh = 24,               // Fee cannot be 45% or more
    InvalidTimeWindow = 25,        // End time must be after start time
    InvalidCaps = 26,              // Soft cap cannot exceed hard cap
    InvalidPrice = 27,             // Price must be positive
    VestingStartBeforeEnd = 28,    // Vesting start can't be before the sale end
    NotWhitelisted = 29,           // Buyer is not whitelisted
    WhitelistNotRequired = 30,     // Instance does not use a whitelist
    BuyingNotEnded = 31,           // Buying must have ended before inventory withdrawal
    FundingStillRefundable = 32,   // Funding can still be reclaimed by contributors
    MathOverflow = 33,             // Arithmetic overflow
}

pub fn read_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn write_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_state(env: &Env) -> Result<SaleState, Error> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn write_state(env: &Env, state: &SaleState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn read_class_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ClassCount)
        .unwrap_or(0)
}

pub fn write_class_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::ClassCount, &count);
}

pub fn read_class(env: &Env, id: u32) -> Result<ContributorClass, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Class(id))
        .ok_or(Error::InvalidClass)
}

pub fn write_class(env: &Env, id: u32, class: &ContributorClass) {
    env.storage().persistent().set(&DataKey::Class(id), class);
}

pub fn read_funder(env: &Env, addr: &Address) -> Option<FunderPortfolio> {
    env.storage().persistent().get(&DataKey::Funder(addr.clone()))
}

/// Load a contributor's record, or a fresh class-0 record on first touch.
pub fn read_or_new_funder(env: &Env, addr: &Address) -> FunderPortfolio {
    read_funder(env, addr).unwrap_or(FunderPortfolio {
        class_id: 0,
        funding: 0,
        seed_amount: 0,
        fee_owed: 0,
        claimed: 0,
        fee_claimed: 0,
        whitelisted: false,
    })
}

pub fn write_funder(env: &Env, addr: &Address, funder: &FunderPortfolio) {
    env.storage()
        .persistent()
        .set(&DataKey::Funder(addr.clone()), funder);
}
