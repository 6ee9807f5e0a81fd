use crate::types::Error;
use soroban_sdk::{Env, U256};

/// Floor of `a * b / denom`, widened through 256 bits so that
/// 18-decimal fixed-point products cannot overflow i128.
pub fn mul_div(env: &Env, a: i128, b: i128, denom: i128) -> Result<i128, Error> {
    if a < 0 || b < 0 || denom <= 0 {
        return Err(Error::MathOverflow);
    }
    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let quotient = product
        .div(&U256::from_u128(env, denom as u128))
        .to_u128()
        .ok_or(Error::MathOverflow)?;
    i128::try_from(quotient).map_err(|_| Error::MathOverflow)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::MathOverflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_sub(b).ok_or(Error::MathOverflow)
}
