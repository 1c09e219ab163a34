//! Canonical event types emitted by the campaign escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/campaign_escrow/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the escrow contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A campaign was launched (`launched` topic).
    CampaignLaunched,
    /// A campaign was cancelled before it started (`cancelled` topic).
    CampaignCancelled,
    /// A contributor pledged tokens (`contrib` topic).
    PledgeContributed,
    /// A contributor took back part of a pledge (`withdrawn` topic).
    PledgeWithdrawn,
    /// The creator claimed a successful campaign (`claimed` topic).
    CampaignClaimed,
    /// A contributor was refunded from a failed campaign (`refunded` topic).
    PledgeRefunded,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "launched" => Self::CampaignLaunched,
            "cancelled" => Self::CampaignCancelled,
            "contrib" => Self::PledgeContributed,
            "withdrawn" => Self::PledgeWithdrawn,
            "claimed" => Self::CampaignClaimed,
            "refunded" => Self::PledgeRefunded,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignLaunched => "campaign_launched",
            Self::CampaignCancelled => "campaign_cancelled",
            Self::PledgeContributed => "pledge_contributed",
            Self::PledgeWithdrawn => "pledge_withdrawn",
            Self::CampaignClaimed => "campaign_claimed",
            Self::PledgeRefunded => "pledge_refunded",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], used when folding stored records.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "campaign_launched" => Self::CampaignLaunched,
            "campaign_cancelled" => Self::CampaignCancelled,
            "pledge_contributed" => Self::PledgeContributed,
            "pledge_withdrawn" => Self::PledgeWithdrawn,
            "campaign_claimed" => Self::CampaignClaimed,
            "pledge_refunded" => Self::PledgeRefunded,
            _ => Self::Unknown,
        }
    }
}

/// A fully decoded escrow event, ready to be stored in the database.
///
/// `event_id` is the RPC's own event id, unique per emitted event, and is
/// the deduplication key. `amount` is the goal for `campaign_launched` and
/// the moved token amount for every other kind. Amounts are kept as decimal
/// strings because the contract uses `i128`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub event_id: String,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
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
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
