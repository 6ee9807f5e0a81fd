use crate::access::AccessManager;
use crate::types::{
    read_class, read_class_count, read_config, read_state, write_class, write_class_count,
    ContributorClass, Error, SaleConfig, VestingStart, MAX_CLASSES, MAX_FEE,
};
use soroban_sdk::{Env, Symbol, Vec};

pub struct ClassManager;

impl ClassManager {
    /// Register a new contributor class.
    #[allow(clippy::too_many_arguments)]
    pub fn add_class(
        env: &Env,
        cap: i128,
        personal_cap: i128,
        price: i128,
        vesting_duration: u64,
        vesting_start: u64,
        fee: i128,
    ) -> Result<u32, Error> {
        AccessManager::require_admin(env)?;
        Self::check_mutable(env)?;

        let config = read_config(env)?;
        let count = read_class_count(env);
        if count >= MAX_CLASSES {
            return Err(Error::ClassLimitReached);
        }
        Self::validate_params(&config, price, vesting_start, fee)?;

        Self::insert(env, count, cap, personal_cap, price, vesting_duration, vesting_start, fee);
        write_class_count(env, count + 1);
        Ok(count)
    }

    /// Register several classes atomically. All six sequences must have
    /// equal length and every entry must validate before anything is
    /// written.
    pub fn add_class_batch(
        env: &Env,
        caps: Vec<i128>,
        personal_caps: Vec<i128>,
        prices: Vec<i128>,
        vesting_durations: Vec<u64>,
        vesting_starts: Vec<u64>,
        fees: Vec<i128>,
    ) -> Result<(), Error> {
        AccessManager::require_admin(env)?;
        Self::check_mutable(env)?;

        let len = caps.len();
        if personal_caps.len() != len
            || prices.len() != len
            || vesting_durations.len() != len
            || vesting_starts.len() != len
            || fees.len() != len
        {
            return Err(Error::ArraySizeMismatch);
        }

        let config = read_config(env)?;
        let count = read_class_count(env);
        if count + len > MAX_CLASSES {
            return Err(Error::ClassLimitReached);
        }
        for i in 0..len {
            Self::validate_params(
                &config,
                prices.get_unchecked(i),
                vesting_starts.get_unchecked(i),
                fees.get_unchecked(i),
            )?;
        }

        for i in 0..len {
            Self::insert(
                env,
                count + i,
                caps.get_unchecked(i),
                personal_caps.get_unchecked(i),
                prices.get_unchecked(i),
                vesting_durations.get_unchecked(i),
                vesting_starts.get_unchecked(i),
                fees.get_unchecked(i),
            );
        }
        write_class_count(env, count + len);
        Ok(())
    }

    /// Rework an existing class. A schedule is frozen once its vesting
    /// has begun.
    #[allow(clippy::too_many_arguments)]
    pub fn change_class(
        env: &Env,
        class_id: u32,
        cap: i128,
        personal_cap: i128,
        price: i128,
        vesting_duration: u64,
        vesting_start: u64,
        fee: i128,
    ) -> Result<(), Error> {
        AccessManager::require_admin(env)?;
        Self::check_mutable(env)?;

        if class_id >= read_class_count(env) {
            return Err(Error::InvalidClass);
        }
        let current = read_class(env, class_id)?;
        if Self::vesting_started(env, &current) {
            return Err(Error::VestingAlreadyStarted);
        }

        let config = read_config(env)?;
        Self::validate_params(&config, price, vesting_start, fee)?;

        write_class(
            env,
            class_id,
            &ContributorClass {
                cap,
                personal_cap,
                price,
                vesting_duration,
                vesting_start: VestingStart::Fixed(vesting_start),
                fee,
                funding_collected: current.funding_collected,
            },
        );

        env.events()
            .publish((Symbol::new(env, "class_changed"),), class_id);
        Ok(())
    }

    /// Whether a class's vesting schedule has already begun. A deferred
    /// start counts as not started.
    pub fn vesting_started(env: &Env, class: &ContributorClass) -> bool {
        match class.vesting_start {
            VestingStart::Fixed(t) => env.ledger().timestamp() >= t,
            VestingStart::Pending => false,
        }
    }

    fn check_mutable(env: &Env) -> Result<(), Error> {
        let state = read_state(env)?;
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        Ok(())
    }

    fn validate_params(
        config: &SaleConfig,
        price: i128,
        vesting_start: u64,
        fee: i128,
    ) -> Result<(), Error> {
        if fee < 0 || fee >= MAX_FEE {
            return Err(Error::FeeTooHigh);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }
        if vesting_start <= config.end_time {
            return Err(Error::VestingStartBeforeEnd);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn insert(
        env: &Env,
        class_id: u32,
        cap: i128,
        personal_cap: i128,
        price: i128,
        vesting_duration: u64,
        vesting_start: u64,
        fee: i128,
    ) {
        write_class(
            env,
            class_id,
            &ContributorClass {
                cap,
                personal_cap,
                price,
                vesting_duration,
                vesting_start: VestingStart::Fixed(vesting_start),
                fee,
                funding_collected: 0,
            },
        );

        env.events()
            .publish((Symbol::new(env, "class_added"),), class_id);
    }
}
