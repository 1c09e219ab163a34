//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                         |
//! |------------------|-----------|-------------------------------------|
//! | `CampaignCount`  | `u64`     | Highest campaign ID ever allocated  |
//! | `Token`          | `Address` | Token custodied by the escrow       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                    | Type             | Description                        |
//! |------------------------|------------------|------------------------------------|
//! | `CampConfig(id)`       | `CampaignConfig` | Immutable campaign configuration   |
//! | `CampState(id)`        | `CampaignState`  | Mutable pledged total / claim flag |
//! | `Pledge(id, address)`  | `i128`           | Net pledge of one contributor      |
//! | `Contributors(id)`     | `Vec<Address>`   | Everyone who has contributed       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! A pledge that reaches zero is removed rather than stored as `0`; readers
//! treat an absent pledge as zero. Cancelling a campaign removes every
//! persistent entry keyed by its ID, so lookups afterwards report
//! [`Error::NotFound`] instead of returning a zeroed record.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Campaign, CampaignConfig, CampaignState};
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
    /// Global campaign ID counter (Instance).
    CampaignCount,
    /// Token custodied on behalf of every campaign (Instance).
    Token,
    /// Immutable campaign configuration keyed by ID (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by ID (Persistent).
    CampState(u64),
    /// Net pledge keyed by (campaign ID, contributor) (Persistent).
    Pledge(u64, Address),
    /// Contributor list keyed by campaign ID (Persistent).
    Contributors(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Reads, increments, and stores the campaign counter.
/// Returns the ID to use for the new campaign (post-increment value), so the
/// first campaign is `1` and an ID is never handed out twice.
pub fn next_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let next = campaign_count(env) + 1;
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &next);
    next
}

/// Highest campaign ID allocated so far (`0` before the first launch).
pub fn campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

pub fn has_token(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Token)
}

/// Store the custodied token address in instance storage.
pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Retrieve the custodied token address.
pub fn get_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new campaign.
pub fn save_campaign(env: &Env, campaign: &Campaign) {
    let config_key = DataKey::CampConfig(campaign.id);
    let state_key = DataKey::CampState(campaign.id);

    let config = CampaignConfig {
        id: campaign.id,
        creator: campaign.creator.clone(),
        goal: campaign.goal,
        start_at: campaign.start_at,
        end_at: campaign.end_at,
    };

    let state = CampaignState {
        pledged: campaign.pledged,
        claimed: campaign.claimed,
    };

    env.storage().persistent().set(&config_key, &config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Campaign` by combining config and state.
pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    Ok(Campaign::from_parts(config, state))
}

/// Load only the immutable campaign configuration.
pub fn load_campaign_config(env: &Env, id: u64) -> Result<CampaignConfig, Error> {
    let key = DataKey::CampConfig(id);
    let config: CampaignConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

/// Load only the mutable campaign state.
pub fn load_campaign_state(env: &Env, id: u64) -> Result<CampaignState, Error> {
    let key = DataKey::CampState(id);
    let state: CampaignState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Save only the mutable campaign state.
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Remove every persistent entry belonging to campaign `id`.
///
/// The ID counter is untouched, so the ID is never reallocated.
pub fn remove_campaign(env: &Env, id: u64) {
    let persistent = env.storage().persistent();
    for contributor in load_contributors(env, id).iter() {
        persistent.remove(&DataKey::Pledge(id, contributor));
    }
    persistent.remove(&DataKey::Contributors(id));
    persistent.remove(&DataKey::CampState(id));
    persistent.remove(&DataKey::CampConfig(id));
}

/// Net pledge of `contributor` to campaign `id`; zero when absent.
pub fn load_pledge(env: &Env, id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Pledge(id, contributor.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Store the net pledge of `contributor`. A zero pledge removes the entry.
pub fn save_pledge(env: &Env, id: u64, contributor: &Address, amount: i128) {
    let key = DataKey::Pledge(id, contributor.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }
}

/// Addresses that have contributed to campaign `id`, in first-contribution order.
pub fn load_contributors(env: &Env, id: u64) -> Vec<Address> {
    let key = DataKey::Contributors(id);
    match env.storage().persistent().get::<_, Vec<Address>>(&key) {
        Some(list) => {
            bump_persistent(env, &key);
            list
        }
        None => Vec::new(env),
    }
}

/// Record `contributor` in the campaign's contributor list if not already present.
pub fn add_contributor(env: &Env, id: u64, contributor: &Address) {
    let mut list = load_contributors(env, id);
    if !list.contains(contributor) {
        list.push_back(contributor.clone());
        let key = DataKey::Contributors(id);
        env.storage().persistent().set(&key, &list);
        bump_persistent(env, &key);
    }
}
