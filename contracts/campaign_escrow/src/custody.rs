//! # Custody
//!
//! The escrow's only contact with the token contract. The escrow itself is
//! the custody account: it receives every contribution and pays out every
//! withdrawal, claim and refund.
//!
//! Token-side failures would otherwise trap inside the token contract with
//! the token's own error, so [`ensure_collectable`] checks allowance and balance first
//! and reports them as [`Error::InsufficientAllowance`] and
//! [`Error::InsufficientBalance`]. Outgoing transfers need no such check:
//! custody always holds at least the sum of all unclaimed `pledged` totals.

use soroban_sdk::{token, Address, Env};

use crate::Error;

/// Token balance held by `account`.
pub fn balance_of(env: &Env, token: &Address, account: &Address) -> i128 {
    token::Client::new(env, token).balance(account)
}

/// Allowance `owner` has granted to the escrow.
pub fn allowance_of(env: &Env, token: &Address, owner: &Address) -> i128 {
    token::Client::new(env, token).allowance(owner, &env.current_contract_address())
}

/// Fail unless `owner` can currently fund a transfer of `amount` into custody.
pub fn ensure_collectable(
    env: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), Error> {
    if allowance_of(env, token, owner) < amount {
        return Err(Error::InsufficientAllowance);
    }
    if balance_of(env, token, owner) < amount {
        return Err(Error::InsufficientBalance);
    }
    Ok(())
}

/// Pull `amount` from `owner` into custody using the escrow's allowance.
///
/// Callers run [`ensure_collectable`] first; a transfer that still fails
/// traps and reverts the whole call.
pub fn collect(env: &Env, token: &Address, owner: &Address, amount: i128) {
    let custody = env.current_contract_address();
    token::Client::new(env, token).transfer_from(&custody, owner, &custody, &amount);
}

/// Pay `amount` out of custody to `to`.
pub fn release(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
}
