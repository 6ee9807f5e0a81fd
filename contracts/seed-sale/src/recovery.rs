use crate::access::AccessManager;
use crate::math::{checked_add, checked_sub};
use crate::types::{
    read_class, read_config, read_funder, read_state, write_class, write_funder, write_state,
    Error,
};
use soroban_sdk::{token, Address, Env, Symbol};

pub struct RecoveryManager;

impl RecoveryManager {
    /// Return a contributor's full funding contribution while the soft
    /// cap is unmet. Reverses the purchase back into the unsold pools
    /// and zeroes the contributor's purchase record; class assignment
    /// and whitelist flag survive.
    pub fn retrieve_funding_tokens(env: &Env, caller: Address) -> Result<i128, Error> {
        let config = read_config(env)?;
        let mut state = read_state(env)?;
        let now = env.ledger().timestamp();
        if now < config.start_time {
            return Err(Error::DistributionNotStarted);
        }
        let mut funder = match read_funder(env, &caller) {
            Some(f) => f,
            None => return Err(Error::ZeroFundingAmount),
        };
        if funder.funding == 0 {
            return Err(Error::ZeroFundingAmount);
        }
        // Once the threshold is met the refund path closes for good;
        // contributors settle through `claim` instead.
        if state.funding_collected >= config.soft_cap {
            return Err(Error::MinimumAlreadyMet);
        }

        let refund = funder.funding;
        let mut class = read_class(env, funder.class_id)?;
        class.funding_collected = checked_sub(class.funding_collected, refund)?;
        state.funding_collected = checked_sub(state.funding_collected, refund)?;
        state.seed_remainder = checked_add(state.seed_remainder, funder.seed_amount)?;
        state.fee_remainder = checked_add(state.fee_remainder, funder.fee_owed)?;
        funder.funding = 0;
        funder.seed_amount = 0;
        funder.fee_owed = 0;

        write_funder(env, &caller, &funder);
        write_class(env, funder.class_id, &class);
        write_state(env, &state);

        let funding_token = token::Client::new(env, &config.funding_token);
        funding_token.transfer(&env.current_contract_address(), &caller, &refund);

        env.events()
            .publish((Symbol::new(env, "refunded"), caller), refund);
        Ok(refund)
    }

    /// Hand the unsold seed and unused fee inventory back to the admin
    /// once buying has ended, either by closing the sale or by the sale
    /// window elapsing.
    pub fn retrieve_seed_tokens(env: &Env, receiver: Address) -> Result<i128, Error> {
        AccessManager::require_admin(env)?;
        let config = read_config(env)?;
        let mut state = read_state(env)?;
        if !state.closed && env.ledger().timestamp() <= config.end_time {
            return Err(Error::BuyingNotEnded);
        }

        let amount = checked_add(state.seed_remainder, state.fee_remainder)?;
        state.seed_remainder = 0;
        state.fee_remainder = 0;
        write_state(env, &state);

        if amount > 0 {
            let seed_token = token::Client::new(env, &config.seed_token);
            seed_token.transfer(&env.current_contract_address(), &receiver, &amount);
        }

        env.events()
            .publish((Symbol::new(env, "seeds_retrieved"), receiver), amount);
        Ok(amount)
    }

    /// Withdraw the collected funding (net of prior withdrawals) to the
    /// admin. Only possible once the soft cap is met and the sale window
    /// has fully elapsed, so no contributor still holds a refund right.
    pub fn withdraw(env: &Env) -> Result<i128, Error> {
        let admin = AccessManager::require_admin(env)?;
        let config = read_config(env)?;
        let mut state = read_state(env)?;
        if state.funding_collected < config.soft_cap {
            return Err(Error::FundingStillRefundable);
        }
        if env.ledger().timestamp() <= config.end_time {
            return Err(Error::DistributionNotFinished);
        }

        let amount = checked_sub(state.funding_collected, state.funding_withdrawn)?;
        state.funding_withdrawn = checked_add(state.funding_withdrawn, amount)?;
        write_state(env, &state);

        if amount > 0 {
            let funding_token = token::Client::new(env, &config.funding_token);
            funding_token.transfer(&env.current_contract_address(), &admin, &amount);
        }

        env.events()
            .publish((Symbol::new(env, "withdrawn"), admin), amount);
        Ok(amount)
    }
}
