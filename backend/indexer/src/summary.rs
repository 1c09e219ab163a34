//! Per-campaign projection folded from indexed events.
//!
//! The contract is the source of truth; this view only replays what the
//! indexer has seen. Replaying every event of a campaign in ledger order
//! reproduces its `pledged` total and per-contributor pledges, because each
//! successful lifecycle call emits exactly one event carrying the amount it
//! moved.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, EventRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub creator: Option<String>,
    pub goal: Option<i128>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    /// Net pledged total: contributions minus withdrawals and refunds.
    pub pledged: i128,
    /// Contributors whose net pledge is still positive.
    pub active_contributors: usize,
    pub claimed: bool,
    pub claimed_amount: Option<i128>,
    pub cancelled: bool,
    pub event_count: usize,
}

/// Fold the events of one campaign, in ledger order, into a summary.
///
/// Returns `None` when `events` is empty.
pub fn summarize(campaign_id: &str, events: &[EventRecord]) -> Result<Option<CampaignSummary>> {
    if events.is_empty() {
        return Ok(None);
    }

    let mut summary = CampaignSummary {
        campaign_id: campaign_id.to_string(),
        event_count: events.len(),
        ..CampaignSummary::default()
    };
    let mut pledges: BTreeMap<String, i128> = BTreeMap::new();

    for record in events {
        let kind = EventKind::from_stored(&record.event_type);
        match kind {
            EventKind::CampaignLaunched => {
                summary.creator = record.actor.clone();
                summary.goal = Some(parse_amount(record)?);
                summary.start_at = record.start_at;
                summary.end_at = record.end_at;
            }
            EventKind::CampaignCancelled => summary.cancelled = true,
            EventKind::PledgeContributed => {
                let amount = parse_amount(record)?;
                *pledges.entry(contributor(record)?).or_default() += amount;
                summary.pledged += amount;
            }
            EventKind::PledgeWithdrawn | EventKind::PledgeRefunded => {
                let amount = parse_amount(record)?;
                *pledges.entry(contributor(record)?).or_default() -= amount;
                summary.pledged -= amount;
            }
            EventKind::CampaignClaimed => {
                summary.claimed = true;
                summary.claimed_amount = Some(parse_amount(record)?);
            }
            EventKind::Unknown => {}
        }
    }

    summary.active_contributors = pledges.values().filter(|p| **p > 0).count();
    Ok(Some(summary))
}

fn parse_amount(record: &EventRecord) -> Result<i128> {
    let raw = record.amount.as_deref().ok_or_else(|| {
        IndexerError::EventParse(format!("event {} has no amount", record.id))
    })?;
    raw.parse().map_err(|_| {
        IndexerError::EventParse(format!("event {} has invalid amount {raw:?}", record.id))
    })
}

fn contributor(record: &EventRecord) -> Result<String> {
    record.actor.clone().ok_or_else(|| {
        IndexerError::EventParse(format!("event {} has no contributor", record.id))
    })
}
