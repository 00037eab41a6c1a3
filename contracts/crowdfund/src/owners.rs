//! # Owner allow-list
//!
//! A flat set of addresses allowed to create projects and to grant owner
//! status to others. The set is seeded by the constructor and only grows;
//! there is no revocation.
//!
//! Membership lives in persistent storage under `DataKey::Owner(address)`,
//! see [`crate::storage`].

use soroban_sdk::{Address, Env, String};

use crate::events;
use crate::storage;
use crate::Error;

/// Strkey of the all-zero ed25519 account.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
/// Strkey of the all-zero contract id.
pub const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

/// Seed the allow-list with the deploying owner.
pub fn init_seed_owner(env: &Env, owner: &Address) {
    storage::set_owner(env, owner);
    events::emit_owner_added(env, owner.clone(), owner.clone());
}

pub fn is_owner(env: &Env, address: &Address) -> bool {
    storage::is_owner(env, address)
}

/// Fail with `NotAnOwner` unless `caller` is on the allow-list.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    if is_owner(env, caller) {
        Ok(())
    } else {
        Err(Error::NotAnOwner)
    }
}

/// `true` for either null-address sentinel.
pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    [ZERO_ACCOUNT, ZERO_CONTRACT]
        .iter()
        .any(|strkey| *address == Address::from_string(&String::from_str(env, strkey)))
}

/// Add `new_owner` to the allow-list on behalf of `caller`.
///
/// Re-granting an existing owner succeeds and emits the event again.
pub fn grant_owner(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;

    if is_zero_address(env, new_owner) {
        return Err(Error::OwnerCantBeZeroAddress);
    }

    storage::set_owner(env, new_owner);
    events::emit_owner_added(env, new_owner.clone(), caller.clone());
    Ok(())
}
