use crate::access::AccessManager;
use crate::math::mul_div;
use crate::types::{
    is_initialized, read_config, read_state, write_class, write_class_count, write_config,
    write_state, ContributorClass, DataKey, Error, SaleConfig, SaleState, VestingStart, PRECISION,
};
use soroban_sdk::{Address, Bytes, Env, Symbol};

pub struct SetupManager;

impl SetupManager {
    /// One-time initialization. Derives the seed and fee inventory the
    /// contract must hold before purchases are admitted, and registers
    /// class 0 from the supplied defaults with a deferred vesting start.
    ///
    /// No tokens move here; funding the seed inventory is an external
    /// transfer that `buy` later checks through `is_funded`.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: &Env,
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
        if is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        if end_time <= start_time {
            return Err(Error::InvalidTimeWindow);
        }
        if soft_cap > hard_cap || soft_cap < 0 {
            return Err(Error::InvalidCaps);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        let seed_amount_required = mul_div(env, hard_cap, PRECISION, price)?;
        let fee_amount_required = mul_div(env, seed_amount_required, fee, PRECISION)?;

        let config = SaleConfig {
            admin: admin.clone(),
            beneficiary,
            seed_token,
            funding_token,
            soft_cap,
            hard_cap,
            price,
            start_time,
            end_time,
            vesting_cliff,
            permissioned,
            seed_amount_required,
            fee_amount_required,
        };
        write_config(env, &config);

        write_state(
            env,
            &SaleState {
                funding_collected: 0,
                funding_withdrawn: 0,
                seed_claimed: 0,
                fee_claimed: 0,
                seed_remainder: seed_amount_required,
                fee_remainder: fee_amount_required,
                paused: false,
                closed: false,
            },
        );

        // Class 0 carries the sale-wide defaults. Its schedule starts
        // when the soft cap is first crossed.
        write_class(
            env,
            0,
            &ContributorClass {
                cap: hard_cap,
                personal_cap: hard_cap,
                price,
                vesting_duration,
                vesting_start: VestingStart::Pending,
                fee,
                funding_collected: 0,
            },
        );
        write_class_count(env, 1);

        env.events()
            .publish((Symbol::new(env, "initialized"),), admin);
        Ok(())
    }

    pub fn pause(env: &Env) -> Result<(), Error> {
        AccessManager::require_admin(env)?;
        let mut state = read_state(env)?;
        if state.paused {
            return Err(Error::ShouldNotBePaused);
        }
        state.paused = true;
        write_state(env, &state);

        env.events().publish((Symbol::new(env, "paused"),), ());
        Ok(())
    }

    pub fn unpause(env: &Env) -> Result<(), Error> {
        AccessManager::require_admin(env)?;
        let mut state = read_state(env)?;
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        if !state.paused {
            return Err(Error::ShouldBePaused);
        }
        state.paused = false;
        write_state(env, &state);

        env.events().publish((Symbol::new(env, "unpaused"),), ());
        Ok(())
    }

    /// One-way shutdown of purchases, class mutation and whitelisting.
    pub fn close(env: &Env) -> Result<(), Error> {
        AccessManager::require_admin(env)?;
        let mut state = read_state(env)?;
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        state.closed = true;
        write_state(env, &state);

        env.events().publish((Symbol::new(env, "closed"),), ());
        Ok(())
    }

    /// Anyone may seed metadata before initialization; only the admin
    /// may change it afterwards.
    pub fn update_metadata(env: &Env, caller: Address, metadata: Bytes) -> Result<(), Error> {
        caller.require_auth();
        if is_initialized(env) {
            let config = read_config(env)?;
            if caller != config.admin {
                return Err(Error::CallerNotAdmin);
            }
        }
        env.storage().instance().set(&DataKey::Metadata, &metadata);

        env.events()
            .publish((Symbol::new(env, "metadata_updated"),), metadata);
        Ok(())
    }

    pub fn get_metadata(env: &Env) -> Option<Bytes> {
        env.storage().instance().get(&DataKey::Metadata)
    }
}
