//! # Types
//!
//! Shared data structures used across all modules of the escrow ledger.
//!
//! ## Config / State split
//!
//! A `Project` is stored as two separate ledger entries:
//!
//! - [`ProjectConfig`] — written once by `create_project`; never mutated.
//! - [`ProjectState`] — rewritten on every `fund_project` and `recover_funds`.
//!
//! The public API returns the reconstructed [`Project`].
//!
//! ## Derived lifecycle
//!
//! [`ProjectPhase`] is never stored. It is recomputed from the ledger
//! timestamp, the deadline, the pledged total and the goal on every call:
//!
//! ```text
//! Open ──(deadline passes, total < goal)──► Recoverable
//!   └───(deadline passes, total >= goal)──► GoalReached
//! ```

use soroban_sdk::{contracttype, Address};

/// Lifecycle phase of a project, derived on read.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectPhase {
    /// Before the deadline; accepting pledges.
    Open,
    /// Deadline passed with the goal unmet; contributors may recover pledges.
    Recoverable,
    /// Deadline passed with the goal met. No operation is enabled by this phase.
    GoalReached,
}

impl ProjectPhase {
    pub fn derive(now: u64, deadline: u64, total_pledged: i128, funding_goal: i128) -> Self {
        if now < deadline {
            ProjectPhase::Open
        } else if total_pledged < funding_goal {
            ProjectPhase::Recoverable
        } else {
            ProjectPhase::GoalReached
        }
    }
}

/// Immutable project configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub creator: Address,
    pub funding_goal: i128,
    pub deadline: u64,
}

/// Mutable project state, updated on funding and recovery.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub total_pledged: i128,
}

/// Full view of a fundraising project.
///
/// Used as the public API return type; reconstructed internally from
/// the split `ProjectConfig` + `ProjectState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Sequential identifier, starting at 0.
    pub id: u64,
    /// Owner that created the project.
    pub creator: Address,
    /// Target amount. Never zero.
    pub funding_goal: i128,
    /// Ledger timestamp at which funding closes.
    pub deadline: u64,
    /// Sum of all unrecovered pledges.
    pub total_pledged: i128,
}
