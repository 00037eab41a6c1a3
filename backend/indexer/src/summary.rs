//! Off-chain reconstruction of project escrow balances from indexed events.
//!
//! Replays `project_created`, `project_funded` and `funds_recovered` records
//! in ledger order. Each recovery drains the contributor's whole pledge,
//! so the replayed per-contributor pledges sum to `total_pledged`, which
//! must match the contract's `get_project_balance`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, EventRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorPledge {
    pub address: String,
    pub pledged: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub creator: Option<String>,
    pub funding_goal: Option<String>,
    pub total_funded: String,
    pub total_recovered: String,
    pub total_pledged: String,
    pub contributors: Vec<ContributorPledge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerGrant {
    pub owner: String,
    pub granted_by: Option<String>,
    pub ledger: i64,
}

fn parse_amount(record: &EventRecord) -> Result<i128> {
    let value = record.amount.as_deref().unwrap_or("0");
    value.parse().map_err(|_| IndexerError::InvalidAmount {
        event_id: record.id,
        value: value.to_string(),
    })
}

/// Fold a project's events into its current escrow position.
///
/// `events` must be the records of a single project in ledger order.
pub fn summarize(project_id: &str, events: &[EventRecord]) -> Result<ProjectSummary> {
    let mut creator = None;
    let mut funding_goal = None;
    let mut funded: i128 = 0;
    let mut recovered: i128 = 0;
    let mut pledges: BTreeMap<String, i128> = BTreeMap::new();

    for record in events {
        let Some(actor) = record.actor.clone() else {
            continue;
        };
        if record.event_type == EventKind::ProjectCreated.as_str() {
            creator = Some(actor);
            funding_goal = record.amount.clone();
        } else if record.event_type == EventKind::ProjectFunded.as_str() {
            let amount = parse_amount(record)?;
            funded += amount;
            *pledges.entry(actor).or_insert(0) += amount;
        } else if record.event_type == EventKind::FundsRecovered.as_str() {
            let amount = parse_amount(record)?;
            recovered += amount;
            *pledges.entry(actor).or_insert(0) -= amount;
        }
    }

    let contributors = pledges
        .into_iter()
        .filter(|(_, pledged)| *pledged != 0)
        .map(|(address, pledged)| ContributorPledge {
            address,
            pledged: pledged.to_string(),
        })
        .collect();

    Ok(ProjectSummary {
        project_id: project_id.to_string(),
        creator,
        funding_goal,
        total_funded: funded.to_string(),
        total_recovered: recovered.to_string(),
        total_pledged: (funded - recovered).to_string(),
        contributors,
    })
}

/// Owner grants in the order they were indexed.
pub fn owner_grants(events: &[EventRecord]) -> Vec<OwnerGrant> {
    events
        .iter()
        .filter(|r| r.event_type == EventKind::OwnerAdded.as_str())
        .filter_map(|r| {
            Some(OwnerGrant {
                owner: r.actor.clone()?,
                granted_by: r.counterparty.clone(),
                ledger: r.ledger,
            })
        })
        .collect()
}
