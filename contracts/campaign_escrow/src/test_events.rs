extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, Symbol, TryIntoVal,
};

use crate::events::{
    CampaignCancelled, CampaignClaimed, CampaignLaunched, PledgeContributed, PledgeRefunded,
    PledgeWithdrawn,
};
use crate::{CampaignEscrow, CampaignEscrowClient};

const DAY: u64 = 86_400;

fn setup() -> (Env, CampaignEscrowClient<'static>, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);
    let contract_id = env.register(CampaignEscrow, ());
    let client = CampaignEscrowClient::new(&env, &contract_id);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    client.init(&token.address);
    (env, client, token)
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

/// Launch a one-day campaign, fund `backer`, and move the clock into the window.
fn running_campaign(
    env: &Env,
    client: &CampaignEscrowClient,
    token: &token::Client,
    creator: &Address,
    backer: &Address,
    goal: i128,
) -> u64 {
    let now = env.ledger().timestamp();
    let id = client.launch_campaign(creator, &goal, &(now + DAY), &(now + 2 * DAY));

    token::StellarAssetClient::new(env, &token.address).mint(backer, &1_000);
    token.approve(
        backer,
        &client.address,
        &1_000,
        &(env.ledger().sequence() + 10_000),
    );

    env.ledger().set_timestamp(now + DAY);
    id
}

/// Assert the most recent event came from the escrow with topics `(name, id)`.
fn assert_last_topics(env: &Env, client: &CampaignEscrowClient, name: Symbol, id: u64) {
    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![env, name.into_val(env), id.into_val(env)];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_launched_event() {
    let (env, client, _token) = setup();
    let creator = Address::generate(&env);
    let start_at = env.ledger().timestamp() + DAY;
    let end_at = start_at + DAY;

    let id = client.launch_campaign(&creator, &3000, &start_at, &end_at);

    assert_last_topics(&env, &client, symbol_short!("launched"), id);

    let last_event = env.events().all().last().unwrap();
    let event_data: CampaignLaunched = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignLaunched {
            campaign_id: 1,
            creator: creator.clone(),
            goal: 3000,
            start_at,
            end_at,
        }
    );
}

#[test]
fn test_cancelled_event() {
    let (env, client, _token) = setup();
    let creator = Address::generate(&env);
    let now = env.ledger().timestamp();
    let id = client.launch_campaign(&creator, &3000, &(now + DAY), &(now + 2 * DAY));

    client.cancel_campaign(&creator, &id);

    assert_last_topics(&env, &client, symbol_short!("cancelled"), id);

    let last_event = env.events().all().last().unwrap();
    let event_data: CampaignCancelled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCancelled {
            campaign_id: id,
            creator,
        }
    );
}

#[test]
fn test_contributed_event() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    let id = running_campaign(&env, &client, &token, &creator, &backer, 3000);

    client.contribute(&backer, &id, &200);

    assert_last_topics(&env, &client, symbol_short!("contrib"), id);

    let last_event = env.events().all().last().unwrap();
    let event_data: PledgeContributed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PledgeContributed {
            campaign_id: id,
            contributor: backer.clone(),
            amount: 200,
        }
    );
}

#[test]
fn test_withdrawn_event() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    let id = running_campaign(&env, &client, &token, &creator, &backer, 3000);
    client.contribute(&backer, &id, &200);

    client.withdraw(&backer, &id, &100);

    assert_last_topics(&env, &client, symbol_short!("withdrawn"), id);

    let last_event = env.events().all().last().unwrap();
    let event_data: PledgeWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PledgeWithdrawn {
            campaign_id: id,
            contributor: backer.clone(),
            amount: 100,
        }
    );
}

#[test]
fn test_claimed_event() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    let id = running_campaign(&env, &client, &token, &creator, &backer, 200);
    client.contribute(&backer, &id, &200);
    env.ledger()
        .set_timestamp(env.ledger().timestamp() + DAY);

    client.claim_campaign(&creator, &id);

    assert_last_topics(&env, &client, symbol_short!("claimed"), id);

    let last_event = env.events().all().last().unwrap();
    let event_data: CampaignClaimed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignClaimed {
            campaign_id: id,
            creator: creator.clone(),
            amount: 200,
        }
    );
}

#[test]
fn test_refunded_event() {
    let (env, client, token) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    let id = running_campaign(&env, &client, &token, &creator, &backer, 2000);
    client.contribute(&backer, &id, &200);
    env.ledger()
        .set_timestamp(env.ledger().timestamp() + DAY);

    client.refund_campaign(&backer, &id);

    assert_last_topics(&env, &client, symbol_short!("refunded"), id);

    let last_event = env.events().all().last().unwrap();
    let event_data: PledgeRefunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PledgeRefunded {
            campaign_id: id,
            contributor: backer.clone(),
            amount: 200,
        }
    );
}
