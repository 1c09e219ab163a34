//! # Events
//!
//! Every successful lifecycle call publishes exactly one event with the topic
//! tuple `(symbol, campaign_id)` and a typed payload. Events are published
//! after any token movement, so a reverted call never leaves one behind.
//!
//! | Topic       | Payload               |
//! |-------------|-----------------------|
//! | `launched`  | [`CampaignLaunched`]  |
//! | `cancelled` | [`CampaignCancelled`] |
//! | `contrib`   | [`PledgeContributed`] |
//! | `withdrawn` | [`PledgeWithdrawn`]   |
//! | `claimed`   | [`CampaignClaimed`]   |
//! | `refunded`  | [`PledgeRefunded`]    |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignLaunched {
    pub campaign_id: u64,
    pub creator: Address,
    pub goal: i128,
    pub start_at: u64,
    pub end_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCancelled {
    pub campaign_id: u64,
    pub creator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PledgeContributed {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PledgeWithdrawn {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignClaimed {
    pub campaign_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PledgeRefunded {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

pub fn emit_launched(
    env: &Env,
    campaign_id: u64,
    creator: Address,
    goal: i128,
    start_at: u64,
    end_at: u64,
) {
    let topics = (symbol_short!("launched"), campaign_id);
    let data = CampaignLaunched {
        campaign_id,
        creator,
        goal,
        start_at,
        end_at,
    };
    env.events().publish(topics, data);
}

pub fn emit_cancelled(env: &Env, campaign_id: u64, creator: Address) {
    let topics = (symbol_short!("cancelled"), campaign_id);
    env.events().publish(
        topics,
        CampaignCancelled {
            campaign_id,
            creator,
        },
    );
}

pub fn emit_contributed(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("contrib"), campaign_id);
    env.events().publish(
        topics,
        PledgeContributed {
            campaign_id,
            contributor,
            amount,
        },
    );
}

pub fn emit_withdrawn(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), campaign_id);
    env.events().publish(
        topics,
        PledgeWithdrawn {
            campaign_id,
            contributor,
            amount,
        },
    );
}

pub fn emit_claimed(env: &Env, campaign_id: u64, creator: Address, amount: i128) {
    let topics = (symbol_short!("claimed"), campaign_id);
    env.events().publish(
        topics,
        CampaignClaimed {
            campaign_id,
            creator,
            amount,
        },
    );
}

pub fn emit_refunded(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), campaign_id);
    env.events().publish(
        topics,
        PledgeRefunded {
            campaign_id,
            contributor,
            amount,
        },
    );
}
