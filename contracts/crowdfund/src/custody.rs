//! # Custody
//!
//! Moves the funding token between contributors and the ledger's own
//! address. Inbound funds are pulled with `transfer_from` against the
//! allowance the contributor granted to the ledger; outbound funds are
//! pushed with a plain `transfer`.

use soroban_sdk::{token, Address, Env};

use crate::storage;
use crate::Error;

fn token_client(env: &Env) -> token::Client<'_> {
    token::Client::new(env, &storage::get_token(env))
}

/// Pull `amount` from `from` into escrow.
///
/// The allowance and balance are checked up front so a short contributor
/// gets `InsufficientBalance` instead of a token-contract trap.
pub fn pull_funds(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
    let client = token_client(env);
    let escrow = env.current_contract_address();

    if client.allowance(from, &escrow) < amount || client.balance(from) < amount {
        return Err(Error::InsufficientBalance);
    }

    client.transfer_from(&escrow, from, &escrow, &amount);
    Ok(())
}

/// Return `amount` from escrow to `to`. Zero amounts skip the token call.
pub fn push_funds(env: &Env, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    token_client(env).transfer(&env.current_contract_address(), to, &amount);
}

