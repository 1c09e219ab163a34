//! # Types
//!
//! Shared data structures used across all modules of the campaign escrow.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Campaign` is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`]: written once at launch; never mutated.
//! - [`CampaignState`]: written on every contribution, withdrawal, claim
//!   and refund.
//!
//! The public API exposes the reconstructed [`Campaign`] struct.
//!
//! ### Status is derived, not stored
//!
//! [`CampaignStatus`] is computed from the ledger timestamp, the stored
//! window and the pledged total every time it is asked for:
//!
//! ```text
//! Pending ──► Running ──► Succeeded ──► Claimed
//!    │                 └─► Failed
//!    └──► (cancelled: entries removed)
//! ```
//!
//! Nothing ever writes a status, so a campaign can never be observed in a
//! state that disagrees with the clock.

use soroban_sdk::{contracttype, Address};

/// Lifecycle status of a campaign, derived at read time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Launched; contribution window not yet open. Still cancellable.
    Pending,
    /// Inside `[start_at, end_at)`; accepting contributions and withdrawals.
    Running,
    /// Window closed with `pledged >= goal`; awaiting the creator's claim.
    Succeeded,
    /// Window closed with `pledged < goal`; contributors may refund.
    Failed,
    /// Creator has claimed the pledged funds.
    Claimed,
}

/// Immutable campaign configuration, written once at launch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub creator: Address,
    pub goal: i128,
    pub start_at: u64,
    pub end_at: u64,
}

/// Mutable campaign state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub pledged: i128,
    pub claimed: bool,
}

/// Full on-chain representation of a campaign.
///
/// Used as the public API return type; reconstructed internally from
/// the split `CampaignConfig` + `CampaignState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Unique identifier, allocated sequentially from 1.
    pub id: u64,
    /// Address that launched the campaign and may claim its funds.
    pub creator: Address,
    /// Pledged total required for the creator to claim.
    pub goal: i128,
    /// Net contributions currently held for this campaign.
    pub pledged: i128,
    /// Ledger timestamp at which contributions open.
    pub start_at: u64,
    /// Ledger timestamp at which contributions close.
    pub end_at: u64,
    /// Set once the creator has claimed; never cleared.
    pub claimed: bool,
}

impl Campaign {
    pub(crate) fn from_parts(config: CampaignConfig, state: CampaignState) -> Self {
        Campaign {
            id: config.id,
            creator: config.creator,
            goal: config.goal,
            pledged: state.pledged,
            start_at: config.start_at,
            end_at: config.end_at,
            claimed: state.claimed,
        }
    }

    /// Derive the lifecycle status at ledger time `now`.
    pub fn status_at(&self, now: u64) -> CampaignStatus {
        if self.claimed {
            CampaignStatus::Claimed
        } else if now < self.start_at {
            CampaignStatus::Pending
        } else if now < self.end_at {
            CampaignStatus::Running
        } else if self.pledged >= self.goal {
            CampaignStatus::Succeeded
        } else {
            CampaignStatus::Failed
        }
    }
}
