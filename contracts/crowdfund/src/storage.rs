//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                          |
//! |------------------|-----------|--------------------------------------|
//! | `Token`          | `Address` | Funding token held in escrow         |
//! | `ProjectCount`   | `u64`     | Number of projects ever created      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type            | Description                       |
//! |----------------------|-----------------|-----------------------------------|
//! | `Owner(addr)`        | `bool`          | Owner allow-list membership       |
//! | `ProjConfig(id)`     | `ProjectConfig` | Immutable project configuration   |
//! | `ProjState(id)`      | `ProjectState`  | Mutable pledged total             |
//! | `Pledge(id, addr)`   | `i128`          | Unrecovered pledge of a contributor |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Funding and recovery rewrite only `ProjState(id)` and one `Pledge` entry;
//! the config entry is never touched after creation.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Project, ProjectConfig, ProjectState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Funding token address (Instance).
    Token,
    /// Number of projects created; also the next project id (Instance).
    ProjectCount,
    /// Owner allow-list membership (Persistent).
    Owner(Address),
    /// Immutable project configuration keyed by ID (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by ID (Persistent).
    ProjState(u64),
    /// Pledge of a contributor to a project (Persistent).
    Pledge(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Record the funding token and reset the project counter.
pub fn init_ledger(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    env.storage().instance().set(&DataKey::ProjectCount, &0u64);
    bump_instance(env);
}

/// Retrieve the funding token. Always present once the constructor has run.
pub fn get_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .expect("token not set")
}

/// Number of projects ever created.
pub fn project_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

/// Atomically reads, increments, and stores the project counter.
/// Returns the ID to use for the *current* project (pre-increment value).
pub fn get_and_increment_project_id(env: &Env) -> Result<u64, Error> {
    let current = project_count(env);
    let next = current.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
    env.storage().instance().set(&DataKey::ProjectCount, &next);
    Ok(current)
}

/// A project exists iff its id is below the number of projects created.
pub fn require_project_exists(env: &Env, id: u64) -> Result<(), Error> {
    if id < project_count(env) {
        Ok(())
    } else {
        Err(Error::ProjectDoesNotExist)
    }
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Owner allow-list membership.
pub fn is_owner(env: &Env, address: &Address) -> bool {
    let key = DataKey::Owner(address.clone());
    let member = env.storage().persistent().get(&key).unwrap_or(false);
    if member {
        bump_persistent(env, &key);
    }
    member
}

pub fn set_owner(env: &Env, address: &Address) {
    let key = DataKey::Owner(address.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

/// Save the immutable config and a zeroed state for a new project.
pub fn save_project(env: &Env, config: &ProjectConfig) {
    let config_key = DataKey::ProjConfig(config.id);
    let state_key = DataKey::ProjState(config.id);

    let state = ProjectState { total_pledged: 0 };

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u64) -> Result<ProjectConfig, Error> {
    require_project_exists(env, id)?;
    let key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProjectDoesNotExist)?;
    bump_persistent(env, &key);
    Ok(config)
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u64) -> Result<ProjectState, Error> {
    require_project_exists(env, id)?;
    let key = DataKey::ProjState(id);
    let state: ProjectState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProjectDoesNotExist)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Load config and state together.
pub fn load_project_pair(env: &Env, id: u64) -> Result<(ProjectConfig, ProjectState), Error> {
    let config = load_project_config(env, id)?;
    let state = load_project_state(env, id)?;
    Ok((config, state))
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let (config, state) = load_project_pair(env, id)?;
    Ok(Project {
        id: config.id,
        creator: config.creator,
        funding_goal: config.funding_goal,
        deadline: config.deadline,
        total_pledged: state.total_pledged,
    })
}

/// Save only the mutable project state.
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Unrecovered pledge of `contributor` to project `id`; zero if never funded.
pub fn get_pledge(env: &Env, id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Pledge(id, contributor.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Overwrite a pledge. Zeroed pledges stay in storage.
pub fn set_pledge(env: &Env, id: u64, contributor: &Address, amount: i128) {
    let key = DataKey::Pledge(id, contributor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
