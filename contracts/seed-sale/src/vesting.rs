use crate::math::{checked_add, checked_sub, mul_div};
use crate::types::{
    read_class, read_config, read_funder, read_state, write_funder, write_state, Error,
    VestingStart, PRECISION,
};
use soroban_sdk::{token, Address, Env, Symbol};

pub struct VestingManager;

impl VestingManager {
    /// Seed amount the funder could claim right now: the linearly
    /// vested share of their purchase, less what they already claimed.
    ///
    /// Returns 0 before the class's vesting start, while the start is
    /// still deferred, and before the cliff has elapsed. A zero vesting
    /// duration vests the whole purchase the moment the start passes.
    pub fn calculate_claim(env: &Env, funder_addr: &Address) -> Result<i128, Error> {
        let config = read_config(env)?;
        let funder = match read_funder(env, funder_addr) {
            Some(f) => f,
            None => return Ok(0),
        };
        let class = read_class(env, funder.class_id)?;

        let start = match class.vesting_start {
            VestingStart::Fixed(t) => t,
            VestingStart::Pending => return Ok(0),
        };
        let now = env.ledger().timestamp();
        if now < start {
            return Ok(0);
        }

        let vested = if class.vesting_duration == 0 {
            funder.seed_amount
        } else {
            let elapsed = (now - start).min(class.vesting_duration);
            if elapsed < config.vesting_cliff {
                return Ok(0);
            }
            mul_div(
                env,
                funder.seed_amount,
                elapsed as i128,
                class.vesting_duration as i128,
            )?
        };
        Ok(checked_sub(vested, funder.claimed)?.max(0))
    }

    /// Settle a claim: send `amount` of vested seed to the funder and
    /// release the matching pro-rata fee share to the beneficiary. The
    /// cumulative fee released never exceeds the entitlement locked at
    /// purchase time.
    ///
    /// Callable by anyone; proceeds only ever move to the funder and
    /// the beneficiary.
    pub fn claim(env: &Env, on_behalf_of: Address, amount: i128) -> Result<(), Error> {
        let config = read_config(env)?;
        let mut state = read_state(env)?;
        if state.funding_collected < config.soft_cap {
            return Err(Error::MinimumNotMet);
        }

        let mut funder = match read_funder(env, &on_behalf_of) {
            Some(f) => f,
            None => return Err(Error::NothingClaimable),
        };
        let class = read_class(env, funder.class_id)?;
        let now = env.ledger().timestamp();

        // Funders on the default schedule wait out the whole sale
        // window before claiming.
        if funder.class_id == 0 && now <= config.end_time {
            return Err(Error::DistributionNotFinished);
        }
        match class.vesting_start {
            VestingStart::Fixed(t) if now >= t => {}
            _ => return Err(Error::VestingNotStarted),
        }

        let claimable = Self::calculate_claim(env, &on_behalf_of)?;
        if claimable == 0 || amount <= 0 {
            return Err(Error::NothingClaimable);
        }
        if amount > claimable {
            return Err(Error::ClaimExceedsClaimable);
        }

        let mut fee_release = mul_div(env, amount, class.fee, PRECISION)?;
        let fee_left = checked_sub(funder.fee_owed, funder.fee_claimed)?;
        if fee_release > fee_left {
            fee_release = fee_left;
        }

        funder.claimed = checked_add(funder.claimed, amount)?;
        funder.fee_claimed = checked_add(funder.fee_claimed, fee_release)?;
        state.seed_claimed = checked_add(state.seed_claimed, amount)?;
        state.fee_claimed = checked_add(state.fee_claimed, fee_release)?;
        write_funder(env, &on_behalf_of, &funder);
        write_state(env, &state);

        let seed_token = token::Client::new(env, &config.seed_token);
        seed_token.transfer(&env.current_contract_address(), &on_behalf_of, &amount);
        if fee_release > 0 {
            seed_token.transfer(
                &env.current_contract_address(),
                &config.beneficiary,
                &fee_release,
            );
        }

        env.events().publish(
            (Symbol::new(env, "claimed"), on_behalf_of),
            (amount, config.beneficiary, fee_release),
        );
        Ok(())
    }
}
