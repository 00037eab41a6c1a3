//! # Crowdfund Escrow Contract
//!
//! A single Soroban contract, `CrowdFund`, that holds contributors' tokens in
//! escrow for fundraising projects created by an allow-listed set of owners.
//!
//! | Phase        | Entry Point(s)                                          |
//! |--------------|---------------------------------------------------------|
//! | Bootstrap    | `__constructor(owner, token)`                           |
//! | Owner admin  | [`CrowdFund::add_project_owner`]                        |
//! | Registration | [`CrowdFund::create_project`]                           |
//! | Funding      | [`CrowdFund::fund_project`]                             |
//! | Recovery     | [`CrowdFund::recover_funds`]                            |
//! | Queries      | `get_project`, `get_project_balance`, `get_project_phase`, ... |
//!
//! ## Architecture
//!
//! Authorization is delegated to [`owners`], token movement to [`custody`],
//! and storage access to [`storage`]. This file holds the entry points and
//! the escrow accounting rules.
//!
//! ## Escrow accounting
//!
//! For every project the pledges of all contributors sum to
//! `total_pledged`, and the ledger's token balance equals the sum of
//! `total_pledged` over all projects. Funding adds the same amount to one
//! pledge, to the project total and to custody; recovery removes a whole
//! pledge from all three.
//!
//! A project is recoverable once `now >= deadline` and
//! `total_pledged < funding_goal`. That condition is re-evaluated on every
//! call and never stored.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env};

mod custody;
pub mod events;
pub mod owners;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_recovery;

use storage::{
    get_and_increment_project_id, get_pledge, load_project, load_project_pair, save_project,
    save_project_state, set_pledge,
};
pub use types::{Project, ProjectConfig, ProjectPhase, ProjectState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAnOwner = 1,
    FundingGoalCantBeZero = 2,
    TimelineNotInTheFuture = 3,
    /// Raised by every entry point keyed by a project id at or beyond
    /// `project_count()`; the offending id is the one passed in.
    ProjectDoesNotExist = 4,
    TimelineElapsed = 5,
    AmountCantBeZero = 6,
    InsufficientBalance = 7,
    TimelineNotElapsed = 8,
    FundingGoalMet = 9,
    OwnerCantBeZeroAddress = 10,
    ArithmeticOverflow = 11,
}

#[contract]
pub struct CrowdFund;

#[contractimpl]
impl CrowdFund {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Runs once, atomically with deployment.
    ///
    /// - `owner` becomes the first entry of the owner allow-list.
    /// - `token` is the only asset this ledger escrows.
    pub fn __constructor(env: Env, owner: Address, token: Address) {
        storage::init_ledger(&env, &token);
        owners::init_seed_owner(&env, &owner);
    }

    // ─────────────────────────────────────────────────────────
    // Owner management
    // ─────────────────────────────────────────────────────────

    /// Grant owner status to `new_owner`.
    ///
    /// - `caller` must authorize and already be an owner.
    /// - `new_owner` must not be a null-address sentinel.
    pub fn add_project_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        caller.require_auth();
        owners::grant_owner(&env, &caller, &new_owner)
    }

    pub fn is_project_owner(env: Env, address: Address) -> bool {
        owners::is_owner(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Project lifecycle
    // ─────────────────────────────────────────────────────────

    /// Create a project and return its sequential id.
    ///
    /// Checks run in order: owner gate, goal, deadline.
    pub fn create_project(
        env: Env,
        caller: Address,
        funding_goal: i128,
        deadline: u64,
    ) -> Result<u64, Error> {
        caller.require_auth();
        owners::require_owner(&env, &caller)?;

        if funding_goal <= 0 {
            return Err(Error::FundingGoalCantBeZero);
        }
        if deadline <= env.ledger().timestamp() {
            return Err(Error::TimelineNotInTheFuture);
        }

        let id = get_and_increment_project_id(&env)?;
        save_project(
            &env,
            &ProjectConfig {
                id,
                creator: caller.clone(),
                funding_goal,
                deadline,
            },
        );

        events::emit_project_created(&env, caller, id, funding_goal);
        Ok(id)
    }

    /// Pledge `amount` of the funding token to `project_id`.
    ///
    /// `caller` must have approved the ledger for at least `amount` and hold
    /// that much. Pledges past the goal are accepted.
    pub fn fund_project(
        env: Env,
        caller: Address,
        project_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        let (config, mut state) = load_project_pair(&env, project_id)?;

        if env.ledger().timestamp() >= config.deadline {
            return Err(Error::TimelineElapsed);
        }
        if amount <= 0 {
            return Err(Error::AmountCantBeZero);
        }

        let pledge = get_pledge(&env, project_id, &caller)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        state.total_pledged = state
            .total_pledged
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        custody::pull_funds(&env, &caller, amount)?;

        set_pledge(&env, project_id, &caller, pledge);
        save_project_state(&env, project_id, &state);

        events::emit_project_funded(&env, caller, project_id, amount);
        Ok(())
    }

    /// Return the caller's whole pledge once the deadline has passed with the
    /// goal unmet. Returns the amount sent back; zero when nothing is pledged.
    pub fn recover_funds(env: Env, caller: Address, project_id: u64) -> Result<i128, Error> {
        caller.require_auth();

        let (config, mut state) = load_project_pair(&env, project_id)?;

        if env.ledger().timestamp() < config.deadline {
            return Err(Error::TimelineNotElapsed);
        }
        if state.total_pledged >= config.funding_goal {
            return Err(Error::FundingGoalMet);
        }

        let amount = get_pledge(&env, project_id, &caller);
        if amount > 0 {
            state.total_pledged -= amount;
            set_pledge(&env, project_id, &caller, 0);
            save_project_state(&env, project_id, &state);
            custody::push_funds(&env, &caller, amount);
        }

        events::emit_funds_recovered(&env, caller, project_id, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project(env: Env, project_id: u64) -> Result<Project, Error> {
        load_project(&env, project_id)
    }

    pub fn get_project_balance(env: Env, project_id: u64) -> Result<i128, Error> {
        let (_, state) = load_project_pair(&env, project_id)?;
        Ok(state.total_pledged)
    }

    pub fn get_funds_pledge_by_owner(
        env: Env,
        project_id: u64,
        address: Address,
    ) -> Result<i128, Error> {
        storage::require_project_exists(&env, project_id)?;
        Ok(get_pledge(&env, project_id, &address))
    }

    /// Derived lifecycle phase at the current ledger timestamp.
    pub fn get_project_phase(env: Env, project_id: u64) -> Result<ProjectPhase, Error> {
        let (config, state) = load_project_pair(&env, project_id)?;
        Ok(ProjectPhase::derive(
            env.ledger().timestamp(),
            config.deadline,
            state.total_pledged,
            config.funding_goal,
        ))
    }

    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    pub fn get_token(env: Env) -> Address {
        storage::get_token(&env)
    }
}
