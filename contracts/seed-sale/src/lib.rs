#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, Vec};

mod access;
mod classes;
mod math;
mod recovery;
mod sale;
mod setup;
mod types;
mod vesting;

use crate::access::AccessManager;
use crate::classes::ClassManager;
use crate::recovery::RecoveryManager;
use crate::sale::SaleManager;
use crate::setup::SetupManager;
use crate::vesting::VestingManager;

pub use crate::types::{
    ContributorClass, Error, FunderPortfolio, SaleConfig, SaleState, VestingStart, MAX_CLASSES,
    MAX_FEE, PRECISION,
};

#[contract]
pub struct SeedSaleContract;

#[contractimpl]
impl SeedSaleContract {
    /// Set up the sale. Callable exactly once; derives the seed and fee
    /// inventory the contract must hold and creates class 0 from the
    /// supplied defaults.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        beneficiary: Address,
        seed_token: Address,
        funding_token: Address,
        soft_cap: i128,
        hard_cap: i128,
        price: i128,
        start_time: u64,
        end_time: u64,
        vesting_duration: u64,
        vesting_cliff: u64,
        permissioned: bool,
        fee: i128,
    ) -> Result<(), Error> {
        SetupManager::initialize(
            &env,
            admin,
            beneficiary,
            seed_token,
            funding_token,
            soft_cap,
            hard_cap,
            price,
            start_time,
            end_time,
            vesting_duration,
            vesting_cliff,
            permissioned,
            fee,
        )
    }

    /// Halt purchases until `unpause`
    pub fn pause(env: Env) -> Result<(), Error> {
        SetupManager::pause(&env)
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        SetupManager::unpause(&env)
    }

    /// Permanently end purchases, class mutation and whitelisting
    pub fn close(env: Env) -> Result<(), Error> {
        SetupManager::close(&env)
    }

    /// Replace the metadata blob
    pub fn update_metadata(env: Env, caller: Address, metadata: Bytes) -> Result<(), Error> {
        SetupManager::update_metadata(&env, caller, metadata)
    }

    /// Register a contributor class; returns its id
    #[allow(clippy::too_many_arguments)]
    pub fn add_class(
        env: Env,
        cap: i128,
        personal_cap: i128,
        price: i128,
        vesting_duration: u64,
        vesting_start: u64,
        fee: i128,
    ) -> Result<u32, Error> {
        ClassManager::add_class(
            &env,
            cap,
            personal_cap,
            price,
            vesting_duration,
            vesting_start,
            fee,
        )
    }

    /// Register several classes atomically
    pub fn add_class_batch(
        env: Env,
        caps: Vec<i128>,
        personal_caps: Vec<i128>,
        prices: Vec<i128>,
        vesting_durations: Vec<u64>,
        vesting_starts: Vec<u64>,
        fees: Vec<i128>,
    ) -> Result<(), Error> {
        ClassManager::add_class_batch(
            &env,
            caps,
            personal_caps,
            prices,
            vesting_durations,
            vesting_starts,
            fees,
        )
    }

    /// Rework a class whose vesting has not yet started
    #[allow(clippy::too_many_arguments)]
    pub fn change_class(
        env: Env,
        class_id: u32,
        cap: i128,
        personal_cap: i128,
        price: i128,
        vesting_duration: u64,
        vesting_start: u64,
        fee: i128,
    ) -> Result<(), Error> {
        ClassManager::change_class(
            &env,
            class_id,
            cap,
            personal_cap,
            price,
            vesting_duration,
            vesting_start,
            fee,
        )
    }

    /// Assign an existing class to a contributor
    pub fn set_class(env: Env, funder: Address, class_id: u32) -> Result<(), Error> {
        AccessManager::set_class(&env, funder, class_id)
    }

    /// Whitelist a contributor and assign their class
    pub fn whitelist(env: Env, funder: Address, class_id: u32) -> Result<(), Error> {
        AccessManager::whitelist(&env, funder, class_id)
    }

    pub fn whitelist_batch(
        env: Env,
        funders: Vec<Address>,
        class_ids: Vec<u32>,
    ) -> Result<(), Error> {
        AccessManager::whitelist_batch(&env, funders, class_ids)
    }

    pub fn unwhitelist(env: Env, funder: Address) -> Result<(), Error> {
        AccessManager::unwhitelist(&env, funder)
    }

    /// Buy seed with the funding asset. Returns `(seed_amount, fee)`.
    pub fn buy(env: Env, buyer: Address, funding_amount: i128) -> Result<(i128, i128), Error> {
        buyer.require_auth();
        SaleManager::buy(&env, buyer, funding_amount)
    }

    /// Seed claimable by `funder` at the current ledger time
    pub fn calculate_claim(env: Env, funder: Address) -> Result<i128, Error> {
        VestingManager::calculate_claim(&env, &funder)
    }

    /// Send vested seed to `funder` and the pro-rata fee to the
    /// beneficiary
    pub fn claim(env: Env, funder: Address, amount: i128) -> Result<(), Error> {
        VestingManager::claim(&env, funder, amount)
    }

    /// Reclaim a contribution while the soft cap is unmet
    pub fn retrieve_funding_tokens(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        RecoveryManager::retrieve_funding_tokens(&env, caller)
    }

    /// Admin: reclaim unsold seed and unused fee inventory after buying
    /// has ended
    pub fn retrieve_seed_tokens(env: Env, receiver: Address) -> Result<i128, Error> {
        RecoveryManager::retrieve_seed_tokens(&env, receiver)
    }

    /// Admin: withdraw collected funding once refunds are foreclosed
    pub fn withdraw(env: Env) -> Result<i128, Error> {
        RecoveryManager::withdraw(&env)
    }

    pub fn minimum_reached(env: Env) -> Result<bool, Error> {
        SaleManager::minimum_reached(&env)
    }

    pub fn maximum_reached(env: Env) -> Result<bool, Error> {
        SaleManager::maximum_reached(&env)
    }

    /// Whether the contract holds the full required seed inventory
    pub fn is_funded(env: Env) -> Result<bool, Error> {
        let config = types::read_config(&env)?;
        Ok(SaleManager::is_funded(&env, &config))
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        types::read_config(&env)
    }

    pub fn get_state(env: Env) -> Result<SaleState, Error> {
        types::read_state(&env)
    }

    pub fn get_class(env: Env, class_id: u32) -> Result<ContributorClass, Error> {
        types::read_class(&env, class_id)
    }

    pub fn get_class_count(env: Env) -> u32 {
        types::read_class_count(&env)
    }

    pub fn get_funder(env: Env, funder: Address) -> Option<FunderPortfolio> {
        types::read_funder(&env, &funder)
    }

    pub fn get_metadata(env: Env) -> Option<Bytes> {
        SetupManager::get_metadata(&env)
    }
}
