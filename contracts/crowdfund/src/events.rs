//! # Events
//!
//! Every state change publishes one event. Topics carry the event symbol and
//! the entity key so indexers can filter without decoding the payload:
//!
//! | Event             | Topics                        | Data                |
//! |-------------------|-------------------------------|---------------------|
//! | `CreateProject`   | `("created", project_id)`     | [`CreateProject`]   |
//! | `FundProject`     | `("funded", project_id)`      | [`FundProject`]     |
//! | `RecoveredFunds`  | `("recovered", project_id)`   | [`RecoveredFunds`]  |
//! | `NewProjectOwner` | `("owner_add", new_owner)`    | [`NewProjectOwner`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreateProject {
    pub creator: Address,
    pub project_id: u64,
    pub funding_goal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundProject {
    pub contributor: Address,
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveredFunds {
    pub contributor: Address,
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewProjectOwner {
    pub new_owner: Address,
    pub granted_by: Address,
}

pub fn emit_project_created(env: &Env, creator: Address, project_id: u64, funding_goal: i128) {
    env.events().publish(
        (symbol_short!("created"), project_id),
        CreateProject {
            creator,
            project_id,
            funding_goal,
        },
    );
}

pub fn emit_project_funded(env: &Env, contributor: Address, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("funded"), project_id),
        FundProject {
            contributor,
            project_id,
            amount,
        },
    );
}

pub fn emit_funds_recovered(env: &Env, contributor: Address, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("recovered"), project_id),
        RecoveredFunds {
            contributor,
            project_id,
            amount,
        },
    );
}

pub fn emit_owner_added(env: &Env, new_owner: Address, granted_by: Address) {
    env.events().publish(
        (symbol_short!("owner_add"), new_owner.clone()),
        NewProjectOwner {
            new_owner,
            granted_by,
        },
    );
}
