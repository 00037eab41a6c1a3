//! Canonical event types emitted by the crowdfund escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfund/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the crowdfund contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new project was created (`created` topic).
    ProjectCreated,
    /// A contributor pledged to a project (`funded` topic).
    ProjectFunded,
    /// A contributor recovered their pledge (`recovered` topic).
    FundsRecovered,
    /// An address was added to the owner allow-list (`owner_add` topic).
    OwnerAdded,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::ProjectCreated,
            "funded" => Self::ProjectFunded,
            "recovered" => Self::FundsRecovered,
            "owner_add" => Self::OwnerAdded,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::ProjectFunded => "project_funded",
            Self::FundsRecovered => "funds_recovered",
            Self::OwnerAdded => "owner_added",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic of this event is a project id.
    pub fn is_project_scoped(&self) -> bool {
        matches!(
            self,
            Self::ProjectCreated | Self::ProjectFunded | Self::FundsRecovered
        )
    }
}

/// A fully decoded contract event, ready to be stored in the database.
///
/// `actor` is the creator, contributor or new owner depending on the kind;
/// `counterparty` is only set for `owner_added` (the granting owner).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// RPC event id (`<toid>-<index>`), unique per event on the network.
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub counterparty: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub counterparty: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
