//! Long deterministic operation sequences.
//!
//! Each run drives a mix of valid and invalid calls across several campaigns
//! and re-checks the ledger invariants after every single step. Failed calls
//! are expected; they must leave every campaign exactly as it was.

extern crate std;

use std::collections::BTreeMap;
use std::vec::Vec as StdVec;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::invariants::{
    assert_all_campaign_invariants, assert_campaign_immutable_fields, assert_custody_matches,
    assert_pledged_matches_pledges, assert_sequential_ids, assert_valid_status_transition,
};
use crate::{Campaign, CampaignEscrow, CampaignEscrowClient, CampaignStatus};

const HOUR: u64 = 3_600;
const MINTED_PER_ACTOR: i128 = 10_000;

/// Seeded xorshift64 generator driving the operation choice.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

struct World {
    env: Env,
    client: CampaignEscrowClient<'static>,
    token: token::Client<'static>,
    actors: StdVec<Address>,
    launched: StdVec<u64>,
    snapshots: BTreeMap<u64, Campaign>,
    statuses: BTreeMap<u64, CampaignStatus>,
}

impl World {
    fn new(actor_count: usize) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_700_000_000);
        let contract_id = env.register(CampaignEscrow, ());
        let client = CampaignEscrowClient::new(&env, &contract_id);

        let token_admin = Address::generate(&env);
        let addr = env.register_stellar_asset_contract_v2(token_admin);
        let token = token::Client::new(&env, &addr.address());
        let sac = token::StellarAssetClient::new(&env, &addr.address());
        client.init(&token.address);

        let mut actors = StdVec::new();
        for _ in 0..actor_count {
            let actor = Address::generate(&env);
            sac.mint(&actor, &MINTED_PER_ACTOR);
            token.approve(
                &actor,
                &contract_id,
                &(MINTED_PER_ACTOR * 100),
                &(env.ledger().sequence() + 100_000),
            );
            actors.push(actor);
        }

        World {
            env,
            client,
            token,
            actors,
            launched: StdVec::new(),
            snapshots: BTreeMap::new(),
            statuses: BTreeMap::new(),
        }
    }

    fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    fn step(&mut self, rng: &mut Rng) {
        let actor = self.actors[rng.below(self.actors.len() as u64) as usize].clone();
        // Occasionally aim at an ID that was never allocated.
        let id = if self.launched.is_empty() || rng.below(10) == 0 {
            self.launched.len() as u64 + 1 + rng.below(3)
        } else {
            self.launched[rng.below(self.launched.len() as u64) as usize]
        };
        let amount = rng.below(600) as i128 - 50;

        match rng.below(8) {
            0 => {
                let start_at = self.now() + 1 + rng.below(6 * HOUR);
                let end_at = start_at + 1 + rng.below(12 * HOUR);
                let goal = 1 + rng.below(2_000) as i128;
                if let Ok(Ok(new_id)) =
                    self.client
                        .try_launch_campaign(&actor, &goal, &start_at, &end_at)
                {
                    self.launched.push(new_id);
                    assert_sequential_ids(&self.launched);
                    let campaign = self.client.get_campaign(&new_id);
                    self.snapshots.insert(new_id, campaign);
                }
            }
            1 => {
                if self.client.try_cancel_campaign(&actor, &id).is_ok() {
                    self.snapshots.remove(&id);
                    self.statuses.remove(&id);
                }
            }
            2 | 3 => {
                let _ = self.client.try_contribute(&actor, &id, &amount);
            }
            4 => {
                let _ = self.client.try_withdraw(&actor, &id, &amount);
            }
            5 => {
                // Claims are only interesting from the creator.
                let caller = match self.snapshots.get(&id) {
                    Some(campaign) if rng.below(4) != 0 => campaign.creator.clone(),
                    _ => actor,
                };
                let _ = self.client.try_claim_campaign(&caller, &id);
            }
            6 => {
                let _ = self.client.try_refund_campaign(&actor, &id);
            }
            _ => {
                let now = self.now();
                self.env.ledger().set_timestamp(now + rng.below(4 * HOUR));
            }
        }
    }

    fn check(&mut self) {
        let now = self.now();
        let mut live = StdVec::new();

        for (id, original) in self.snapshots.iter() {
            let campaign = self.client.get_campaign(id);
            assert_all_campaign_invariants(&campaign);
            assert_campaign_immutable_fields(original, &campaign);

            let pledges: StdVec<i128> = self
                .client
                .get_contributors(id)
                .iter()
                .map(|contributor| self.client.get_pledge(id, &contributor))
                .collect();
            assert_pledged_matches_pledges(&campaign, &pledges);

            let status = campaign.status_at(now);
            assert_eq!(self.client.campaign_status(id), status);
            if let Some(previous) = self.statuses.get(id) {
                assert_valid_status_transition(previous, &status);
            }
            self.statuses.insert(*id, status);

            live.push(campaign);
        }

        // Cancelled campaigns stay gone.
        for id in self.launched.iter() {
            if !self.snapshots.contains_key(id) {
                assert!(self.client.try_get_campaign(id).is_err());
            }
        }

        let custody = self.client.custody_balance();
        assert_custody_matches(custody, &live);

        // No tokens created or destroyed.
        let held: i128 = self
            .actors
            .iter()
            .map(|actor| self.token.balance(actor))
            .sum();
        assert_eq!(
            held + custody,
            MINTED_PER_ACTOR * self.actors.len() as i128
        );
    }
}

fn run(seed: u64, steps: usize) {
    let mut world = World::new(4);
    let mut rng = Rng(seed);
    for _ in 0..steps {
        world.step(&mut rng);
        world.check();
    }
}

#[test]
fn test_sequence_seed_1() {
    run(0x9e37_79b9_7f4a_7c15, 200);
}

#[test]
fn test_sequence_seed_2() {
    run(0xdead_beef_cafe_f00d, 200);
}

#[test]
fn test_sequence_seed_3() {
    run(42, 200);
}

#[test]
fn test_custody_drains_after_every_campaign_settles() {
    let mut world = World::new(3);
    let env = world.env.clone();
    let now = world.now();
    let creator = world.actors[0].clone();

    let funded = world.client.launch_campaign(&creator, &500, &(now + HOUR), &(now + 2 * HOUR));
    let missed = world.client.launch_campaign(&creator, &5_000, &(now + HOUR), &(now + 2 * HOUR));
    world.launched.extend([funded, missed]);
    for id in [funded, missed] {
        let campaign = world.client.get_campaign(&id);
        world.snapshots.insert(id, campaign);
    }

    env.ledger().set_timestamp(now + HOUR);
    for backer in world.actors[1..].to_vec() {
        world.client.contribute(&backer, &funded, &300);
        world.client.contribute(&backer, &missed, &700);
        world.check();
    }

    env.ledger().set_timestamp(now + 2 * HOUR);
    world.client.claim_campaign(&creator, &funded);
    world.check();
    for backer in world.actors[1..].to_vec() {
        world.client.refund_campaign(&backer, &missed);
        world.check();
    }

    assert_eq!(world.client.custody_balance(), 0);
    assert_eq!(world.token.balance(&creator), MINTED_PER_ACTOR + 600);
}

#[test]
fn test_claim_observed_across_a_clock_jump() {
    let mut world = World::new(2);
    let env = world.env.clone();
    let now = world.now();
    let creator = world.actors[0].clone();
    let backer = world.actors[1].clone();

    let id = world.client.launch_campaign(&creator, &100, &(now + HOUR), &(now + 2 * HOUR));
    world.launched.push(id);
    world.snapshots.insert(id, world.client.get_campaign(&id));
    world.check();
    assert_eq!(world.statuses[&id], CampaignStatus::Pending);

    env.ledger().set_timestamp(now + HOUR);
    world.client.contribute(&backer, &id, &100);

    // Jump past the end and claim before the next observation.
    env.ledger().set_timestamp(now + 3 * HOUR);
    world.client.claim_campaign(&creator, &id);
    world.check();
    assert_eq!(world.statuses[&id], CampaignStatus::Claimed);

    assert_valid_status_transition(&CampaignStatus::Pending, &CampaignStatus::Claimed);
    assert_valid_status_transition(&CampaignStatus::Running, &CampaignStatus::Claimed);
}
