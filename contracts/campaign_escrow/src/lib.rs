// contracts/campaign_escrow/src/lib.rs

//! # Campaign Escrow Contract
//!
//! A crowdfunding escrow. Creators launch campaigns with a goal and a fixed
//! contribution window; contributors pledge a single fungible token; once the
//! window closes the pledged funds go to the creator if the goal was met, or
//! back to each contributor if it was not.
//!
//! | Phase        | Entry Point(s)                                         |
//! |--------------|--------------------------------------------------------|
//! | Bootstrap    | [`CampaignEscrow::init`]                               |
//! | Launch       | [`CampaignEscrow::launch_campaign`], `cancel_campaign` |
//! | Funding      | [`CampaignEscrow::contribute`], `withdraw`             |
//! | Settlement   | [`CampaignEscrow::claim_campaign`], `refund_campaign`  |
//! | Queries      | `get_campaign`, `get_pledge`, `campaign_status`        |
//!
//! Further read-only helpers: `get_contributors`, `campaign_count`,
//! `campaign_token` and `custody_balance`.
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`], token movement to [`custody`]
//! and event emission to [`events`]. This file holds the entry points and
//! the lifecycle rules.
//!
//! Every mutating entry point follows validate → mutate → transfer → emit.
//! An `Err` return or a trap in the token contract reverts every write made
//! by the call, so `pledged` and the custody balance always move together.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, Vec};

mod custody;
pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_sequences;

pub use types::{Campaign, CampaignStatus};

/// Longest allowed contribution window: 90 days, in seconds.
pub const MAX_CAMPAIGN_DURATION: u64 = 90 * 24 * 60 * 60;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized    = 1,
    NotInitialized        = 2,
    InvalidGoal           = 3,
    InvalidStart          = 4,
    InvalidWindow         = 5,
    NotFound              = 6,
    NotCreator            = 7,
    AlreadyStarted        = 8,
    NotRunning            = 9,
    InvalidAmount         = 10,
    ExceedsPledge         = 11,
    NotEnded              = 12,
    GoalNotMet            = 13,
    AlreadyClaimed        = 14,
    GoalReached           = 15,
    NotContributor        = 16,
    // Token-side failures, detected before any transfer is attempted.
    InsufficientAllowance = 17,
    InsufficientBalance   = 18,
}

#[contract]
pub struct CampaignEscrow;

#[contractimpl]
impl CampaignEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Bind the escrow to the token it custodies.
    ///
    /// Must be called exactly once after deployment. Every campaign pledges
    /// in this token.
    pub fn init(env: Env, token: Address) -> Result<(), Error> {
        if storage::has_token(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_token(&env, &token);
        Ok(())
    }

    /// The token custodied by this escrow.
    pub fn campaign_token(env: Env) -> Result<Address, Error> {
        storage::get_token(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Launch / cancel
    // ─────────────────────────────────────────────────────────

    /// Launch a new campaign owned by `caller`.
    ///
    /// `start_at` must lie strictly in the future and the window
    /// `[start_at, end_at)` must be non-empty and at most
    /// [`MAX_CAMPAIGN_DURATION`] long. Returns the new campaign ID.
    pub fn launch_campaign(
        env: Env,
        caller: Address,
        goal: i128,
        start_at: u64,
        end_at: u64,
    ) -> Result<u64, Error> {
        caller.require_auth();
        storage::get_token(&env)?;

        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if start_at <= env.ledger().timestamp() {
            return Err(Error::InvalidStart);
        }
        if end_at <= start_at || end_at - start_at > MAX_CAMPAIGN_DURATION {
            return Err(Error::InvalidWindow);
        }

        let id = storage::next_campaign_id(&env);
        let campaign = Campaign {
            id,
            creator: caller.clone(),
            goal,
            pledged: 0,
            start_at,
            end_at,
            claimed: false,
        };
        storage::save_campaign(&env, &campaign);

        events::emit_launched(&env, id, caller, goal, start_at, end_at);
        Ok(id)
    }

    /// Cancel a campaign that has not started yet.
    ///
    /// The campaign and everything keyed by its ID is removed; its ID is
    /// never reused.
    pub fn cancel_campaign(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_campaign_config(&env, id)?;
        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        if env.ledger().timestamp() >= config.start_at {
            return Err(Error::AlreadyStarted);
        }

        storage::remove_campaign(&env, id);

        events::emit_cancelled(&env, id, caller);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Pledge `amount` tokens to a running campaign.
    ///
    /// `caller` must have approved the escrow for at least `amount` and hold
    /// that many tokens; otherwise the call fails with
    /// `InsufficientAllowance` / `InsufficientBalance` and nothing changes.
    pub fn contribute(env: Env, caller: Address, id: u64, amount: i128) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_campaign_config(&env, id)?;
        ensure_running(&env, config.start_at, config.end_at)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let token = storage::get_token(&env)?;
        custody::ensure_collectable(&env, &token, &caller, amount)?;

        let mut state = storage::load_campaign_state(&env, id)?;
        state.pledged += amount;
        storage::save_campaign_state(&env, id, &state);

        let pledge = storage::load_pledge(&env, id, &caller);
        storage::save_pledge(&env, id, &caller, pledge + amount);
        storage::add_contributor(&env, id, &caller);

        custody::collect(&env, &token, &caller, amount);

        events::emit_contributed(&env, id, caller, amount);
        Ok(())
    }

    /// Take back part of a pledge while the campaign is still running.
    pub fn withdraw(env: Env, caller: Address, id: u64, amount: i128) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_campaign_config(&env, id)?;
        ensure_running(&env, config.start_at, config.end_at)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let pledge = storage::load_pledge(&env, id, &caller);
        if amount > pledge {
            return Err(Error::ExceedsPledge);
        }

        let token = storage::get_token(&env)?;

        let mut state = storage::load_campaign_state(&env, id)?;
        state.pledged -= amount;
        storage::save_campaign_state(&env, id, &state);
        storage::save_pledge(&env, id, &caller, pledge - amount);

        custody::release(&env, &token, &caller, amount);

        events::emit_withdrawn(&env, id, caller, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Pay the pledged total of a successful campaign to its creator.
    ///
    /// Succeeds at most once per campaign. The campaign record is kept, with
    /// `claimed` set, so later reads still see the final pledged total.
    pub fn claim_campaign(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_campaign_config(&env, id)?;
        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        if env.ledger().timestamp() < config.end_at {
            return Err(Error::NotEnded);
        }

        let mut state = storage::load_campaign_state(&env, id)?;
        if state.claimed {
            return Err(Error::AlreadyClaimed);
        }
        if state.pledged < config.goal {
            return Err(Error::GoalNotMet);
        }

        let token = storage::get_token(&env)?;

        state.claimed = true;
        storage::save_campaign_state(&env, id, &state);

        custody::release(&env, &token, &caller, state.pledged);

        events::emit_claimed(&env, id, caller, state.pledged);
        Ok(())
    }

    /// Return `caller`'s whole pledge from a campaign that missed its goal.
    pub fn refund_campaign(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();

        let config = storage::load_campaign_config(&env, id)?;
        if env.ledger().timestamp() < config.end_at {
            return Err(Error::NotEnded);
        }

        let mut state = storage::load_campaign_state(&env, id)?;
        if state.pledged >= config.goal {
            return Err(Error::GoalReached);
        }

        let pledge = storage::load_pledge(&env, id, &caller);
        if pledge == 0 {
            return Err(Error::NotContributor);
        }

        let token = storage::get_token(&env)?;

        state.pledged -= pledge;
        storage::save_campaign_state(&env, id, &state);
        storage::save_pledge(&env, id, &caller, 0);

        custody::release(&env, &token, &caller, pledge);

        events::emit_refunded(&env, id, caller, pledge);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a campaign by its ID.
    pub fn get_campaign(env: Env, id: u64) -> Result<Campaign, Error> {
        storage::load_campaign(&env, id)
    }

    /// Net pledge of `contributor` to campaign `id` (zero if none).
    pub fn get_pledge(env: Env, id: u64, contributor: Address) -> Result<i128, Error> {
        storage::load_campaign_config(&env, id)?;
        Ok(storage::load_pledge(&env, id, &contributor))
    }

    /// Every address that has contributed to campaign `id`, including those
    /// whose pledge has since been withdrawn or refunded.
    pub fn get_contributors(env: Env, id: u64) -> Result<Vec<Address>, Error> {
        storage::load_campaign_config(&env, id)?;
        Ok(storage::load_contributors(&env, id))
    }

    /// Lifecycle status of campaign `id` at the current ledger time.
    pub fn campaign_status(env: Env, id: u64) -> Result<CampaignStatus, Error> {
        let campaign = storage::load_campaign(&env, id)?;
        Ok(campaign.status_at(env.ledger().timestamp()))
    }

    /// Highest campaign ID allocated so far, including cancelled campaigns.
    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    /// Tokens currently held in custody across all campaigns.
    pub fn custody_balance(env: Env) -> Result<i128, Error> {
        let token = storage::get_token(&env)?;
        Ok(custody::balance_of(
            &env,
            &token,
            &env.current_contract_address(),
        ))
    }
}

/// Contributions and withdrawals are only accepted inside `[start_at, end_at)`.
fn ensure_running(env: &Env, start_at: u64, end_at: u64) -> Result<(), Error> {
    let now = env.ledger().timestamp();
    if now < start_at || now >= end_at {
        return Err(Error::NotRunning);
    }
    Ok(())
}
