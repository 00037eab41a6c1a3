//! Soroban RPC client — polls `getEvents` and decodes crowdfund events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//!
//! ## Topic and value encoding
//!
//! `getEvents` returns topics and the event value as base64 XDR `ScVal`s;
//! see [`crate::xdr`]. Older RPC builds and hand-fed fixtures use JSON
//! objects (`{"type":"symbol","value":"funded"}`) instead, and both forms
//! are accepted.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, LedgerEvent};
use crate::xdr::{self, ScValue};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that will never succeed on retry.
const HARD_ERROR_CODES: [i64; 2] = [-32600, -32601];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Network-unique event id
    pub id: Option<String>,
    /// Topic list, JSON or base64 XDR per entry
    pub topic: Vec<String>,
    /// Event value, base64 XDR string or JSON object
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventPage> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                backoff = sleep_and_grow(backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            if HARD_ERROR_CODES.contains(&err.code) {
                return Err(IndexerError::EventParse(format!(
                    "RPC hard error {}: {}",
                    err.code, err.message
                )));
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let result = body.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok(EventPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

async fn sleep_and_grow(backoff: u64) -> u64 {
    tokio::time::sleep(Duration::from_secs(backoff)).await;
    next_backoff(backoff)
}

fn next_backoff(backoff: u64) -> u64 {
    (backoff * 2).min(MAX_BACKOFF_SECS)
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`LedgerEvent`] structs.
///
/// Events from failed contract calls are dropped: their state changes were
/// rolled back, so recording them would break the pledge totals.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<LedgerEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<LedgerEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let Some(event_id) = raw.id.clone() else {
        warn!("Skipping {} event without id in ledger {ledger}", kind.as_str());
        return None;
    };
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let second_topic = raw.topic.get(1).map(|t| topic_text(t));
    let project_id = if kind.is_project_scoped() {
        second_topic.clone()
    } else {
        None
    };

    let data = data_json(&raw.value);
    let (mut actor, counterparty, amount) = decode_data(&data, kind);
    if kind == EventKind::OwnerAdded && actor.is_none() {
        actor = second_topic;
    }

    Some(LedgerEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        project_id,
        actor,
        counterparty,
        amount,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// JSON view of the event value; XDR strings are decoded, objects pass through.
fn data_json(value: &Value) -> Value {
    match value {
        Value::String(b64) => match xdr::decode(b64) {
            Ok(decoded) => decoded.to_json(),
            Err(e) => {
                debug!("Event value is not XDR ({e}), keeping it as-is");
                value.clone()
            }
        },
        _ => value.clone(),
    }
}

/// Pull `(actor, counterparty, amount)` out of the event data object.
fn decode_data(
    value: &Value,
    kind: EventKind,
) -> (Option<String>, Option<String>, Option<String>) {
    match kind {
        EventKind::ProjectCreated => {
            let actor = extract_field(value, &["creator", "address"])
                .or_else(|| find_nested(value, "creator"));
            let amount = extract_field(value, &["funding_goal", "goal"]);
            (actor, None, amount)
        }
        EventKind::ProjectFunded | EventKind::FundsRecovered => {
            let actor = extract_field(value, &["contributor", "address"])
                .or_else(|| find_nested(value, "contributor"));
            let amount = extract_field(value, &["amount"]);
            (actor, None, amount)
        }
        EventKind::OwnerAdded => {
            let actor = extract_field(value, &["new_owner"]);
            let granted_by = extract_field(value, &["granted_by"]);
            (actor, granted_by, None)
        }
        EventKind::Unknown => (None, None, None),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn find_nested(value: &Value, key: &str) -> Option<String> {
    if let Value::Object(map) = value {
        for (k, v) in map {
            if k == key {
                return v.as_str().map(String::from);
            }
            if let Some(found) = find_nested(v, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Extract the event symbol from the first topic.
/// Accepts `{"type":"symbol","value":"funded"}`, base64 XDR, or the bare string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    if let Ok(ScValue::Symbol(s)) = xdr::decode(raw) {
        return s;
    }
    raw.to_string()
}

/// Text form of a non-leading topic (project id or address).
fn topic_text(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(n) = v.get("value").and_then(|x| x.as_u64()) {
            return n.to_string();
        }
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    match xdr::decode(raw) {
        Ok(value) => value.into_text(),
        Err(_) => raw.to_string(),
    }
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
