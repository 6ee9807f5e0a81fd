use crate::math::{checked_add, checked_sub, mul_div};
use crate::types::{
    read_class, read_class_count, read_config, read_or_new_funder, read_state, write_class,
    write_funder, write_state, Error, SaleConfig, VestingStart, PRECISION,
};
use soroban_sdk::{token, Address, Env, Symbol};

pub struct SaleManager;

impl SaleManager {
    /// Exchange `funding_amount` of the funding asset for seed at the
    /// buyer's class price. Returns the seed amount purchased and the
    /// fee locked for the beneficiary.
    ///
    /// Bookkeeping is finished before the funding-token pull so a
    /// reentrant callback from the token contract cannot observe
    /// inconsistent pools; a failed transfer rolls the whole call back.
    pub fn buy(env: &Env, buyer: Address, funding_amount: i128) -> Result<(i128, i128), Error> {
        let config = read_config(env)?;
        let mut state = read_state(env)?;
        if state.paused {
            return Err(Error::ShouldNotBePaused);
        }
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        let now = env.ledger().timestamp();
        if now < config.start_time || now > config.end_time {
            return Err(Error::NotDistributionPeriod);
        }
        let mut funder = read_or_new_funder(env, &buyer);
        if config.permissioned && !funder.whitelisted {
            return Err(Error::NotWhitelisted);
        }
        if !Self::is_funded(env, &config) {
            return Err(Error::InsufficientSeedInventory);
        }
        if funding_amount <= 0 {
            return Err(Error::ZeroFundingAmount);
        }

        let mut class = read_class(env, funder.class_id)?;
        let seed_amount = mul_div(env, funding_amount, PRECISION, class.price)?;
        let mut fee = mul_div(env, seed_amount, class.fee, PRECISION)?;
        // When the straightforward fee would exceed the remaining fee
        // pool the purchase is charged no fee at all, not a partial one.
        if fee > state.fee_remainder {
            fee = 0;
        }

        if checked_add(class.funding_collected, funding_amount)? > class.cap {
            return Err(Error::MaxClassFundingReached);
        }
        if checked_add(funder.funding, funding_amount)? > class.personal_cap {
            return Err(Error::MaxPersonalFundingReached);
        }
        if checked_add(state.funding_collected, funding_amount)? > config.hard_cap {
            return Err(Error::HardCapReached);
        }
        if seed_amount > state.seed_remainder {
            return Err(Error::InsufficientSeedInventory);
        }

        let minimum_before = state.funding_collected >= config.soft_cap;

        funder.funding = checked_add(funder.funding, funding_amount)?;
        funder.seed_amount = checked_add(funder.seed_amount, seed_amount)?;
        funder.fee_owed = checked_add(funder.fee_owed, fee)?;
        class.funding_collected = checked_add(class.funding_collected, funding_amount)?;
        state.funding_collected = checked_add(state.funding_collected, funding_amount)?;
        state.seed_remainder = checked_sub(state.seed_remainder, seed_amount)?;
        state.fee_remainder = checked_sub(state.fee_remainder, fee)?;

        write_funder(env, &buyer, &funder);
        write_class(env, funder.class_id, &class);
        write_state(env, &state);

        if !minimum_before && state.funding_collected >= config.soft_cap {
            Self::resolve_pending_vesting(env, now);
        }

        let funding_token = token::Client::new(env, &config.funding_token);
        funding_token.transfer(&buyer, &env.current_contract_address(), &funding_amount);

        env.events()
            .publish((Symbol::new(env, "purchased"), buyer), seed_amount);
        Ok((seed_amount, fee))
    }

    pub fn minimum_reached(env: &Env) -> Result<bool, Error> {
        let config = read_config(env)?;
        let state = read_state(env)?;
        Ok(state.funding_collected >= config.soft_cap)
    }

    pub fn maximum_reached(env: &Env) -> Result<bool, Error> {
        let config = read_config(env)?;
        let state = read_state(env)?;
        Ok(state.funding_collected >= config.hard_cap)
    }

    /// Whether the contract holds the full seed and fee inventory the
    /// sale needs to honor every purchase.
    pub fn is_funded(env: &Env, config: &SaleConfig) -> bool {
        let held = token::Client::new(env, &config.seed_token)
            .balance(&env.current_contract_address());
        held >= config.seed_amount_required + config.fee_amount_required
    }

    /// Fix every still-deferred schedule to the timestamp of the
    /// purchase that first crossed the soft cap. Runs at most once per
    /// class because a fixed start is never reset.
    fn resolve_pending_vesting(env: &Env, now: u64) {
        let count = read_class_count(env);
        for id in 0..count {
            if let Ok(mut class) = read_class(env, id) {
                if class.vesting_start == VestingStart::Pending {
                    class.vesting_start = VestingStart::Fixed(now);
                    write_class(env, id, &class);
                }
            }
        }
    }
}
