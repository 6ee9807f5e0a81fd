use crate::classes::ClassManager;
use crate::types::{
    read_class_count, read_config, read_or_new_funder, read_state, write_funder, Error,
};
use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct AccessManager;

impl AccessManager {
    /// Verify the stored admin authorized this call.
    pub fn require_admin(env: &Env) -> Result<Address, Error> {
        let config = read_config(env)?;
        config.admin.require_auth();
        Ok(config.admin)
    }

    /// Whitelist a contributor and assign them a class.
    pub fn whitelist(env: &Env, addr: Address, class_id: u32) -> Result<(), Error> {
        Self::require_admin(env)?;
        Self::check_whitelist_allowed(env)?;
        Self::whitelist_unchecked(env, addr, class_id)
    }

    /// Whitelist several contributors in one call. The two input
    /// sequences must have equal length; nothing is written otherwise.
    pub fn whitelist_batch(
        env: &Env,
        addrs: Vec<Address>,
        class_ids: Vec<u32>,
    ) -> Result<(), Error> {
        Self::require_admin(env)?;
        Self::check_whitelist_allowed(env)?;
        if addrs.len() != class_ids.len() {
            return Err(Error::ArraySizeMismatch);
        }
        for (addr, class_id) in addrs.iter().zip(class_ids.iter()) {
            Self::whitelist_unchecked(env, addr, class_id)?;
        }
        Ok(())
    }

    /// Clear a contributor's whitelist flag. Purchase history survives.
    pub fn unwhitelist(env: &Env, addr: Address) -> Result<(), Error> {
        Self::require_admin(env)?;
        let state = read_state(env)?;
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        let mut funder = read_or_new_funder(env, &addr);
        funder.whitelisted = false;
        write_funder(env, &addr, &funder);

        env.events()
            .publish((Symbol::new(env, "unwhitelisted"),), addr);
        Ok(())
    }

    /// Assign an existing class to a contributor.
    pub fn set_class(env: &Env, addr: Address, class_id: u32) -> Result<(), Error> {
        Self::require_admin(env)?;
        let state = read_state(env)?;
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        Self::assign_class(env, addr, class_id)
    }

    fn check_whitelist_allowed(env: &Env) -> Result<(), Error> {
        let config = read_config(env)?;
        if !config.permissioned {
            return Err(Error::WhitelistNotRequired);
        }
        let state = read_state(env)?;
        if state.closed {
            return Err(Error::ShouldNotBeClosed);
        }
        Ok(())
    }

    fn whitelist_unchecked(env: &Env, addr: Address, class_id: u32) -> Result<(), Error> {
        Self::assign_class(env, addr.clone(), class_id)?;
        let mut funder = read_or_new_funder(env, &addr);
        funder.whitelisted = true;
        write_funder(env, &addr, &funder);

        env.events()
            .publish((Symbol::new(env, "whitelisted"),), (addr, class_id));
        Ok(())
    }

    fn assign_class(env: &Env, addr: Address, class_id: u32) -> Result<(), Error> {
        if class_id >= read_class_count(env) {
            return Err(Error::InvalidClass);
        }
        let class = crate::types::read_class(env, class_id)?;
        if ClassManager::vesting_started(env, &class) {
            return Err(Error::VestingAlreadyStarted);
        }
        let mut funder = read_or_new_funder(env, &addr);
        funder.class_id = class_id;
        write_funder(env, &addr, &funder);
        Ok(())
    }
}
