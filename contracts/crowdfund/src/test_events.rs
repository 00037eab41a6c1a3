extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{CreateProject, FundProject, NewProjectOwner, RecoveredFunds};
use crate::{CrowdFund, CrowdFundClient};

fn setup() -> (Env, CrowdFundClient<'static>, Address, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac.address());

    let contract_id = env.register(CrowdFund, (&owner, &sac.address()));
    let client = CrowdFundClient::new(&env, &contract_id);
    (env, client, owner, token)
}

fn mint_and_approve(
    env: &Env,
    token: &token::Client,
    from: &Address,
    spender: &Address,
    amount: i128,
) {
    token::StellarAssetClient::new(env, &token.address).mint(from, &amount);
    token.approve(from, spender, &amount, &(env.ledger().sequence() + 1_000));
}

#[test]
fn test_create_project_event() {
    let (env, client, owner, _) = setup();
    let deadline = env.ledger().timestamp() + 100_000_000;

    let id = client.create_project(&owner, &1000, &deadline);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CreateProject = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CreateProject {
            creator: owner.clone(),
            project_id: 0,
            funding_goal: 1000,
        }
    );
}

#[test]
fn test_fund_project_event() {
    let (env, client, owner, token) = setup();
    let deadline = env.ledger().timestamp() + 100_000_000;
    client.create_project(&owner, &1000, &deadline);

    mint_and_approve(&env, &token, &owner, &client.address, 100);
    client.fund_project(&owner, &0, &100);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("funded"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("funded").into_val(&env),
        0u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundProject = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundProject {
            contributor: owner.clone(),
            project_id: 0,
            amount: 100,
        }
    );
}

#[test]
fn test_recovered_funds_event() {
    let (env, client, owner, token) = setup();
    let donor = Address::generate(&env);
    let deadline = env.ledger().timestamp() + 100_000_000;
    client.create_project(&owner, &1000, &deadline);

    mint_and_approve(&env, &token, &donor, &client.address, 100);
    client.fund_project(&donor, &0, &100);

    env.ledger().set_timestamp(deadline + 1);
    client.recover_funds(&donor, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("recovered"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("recovered").into_val(&env),
        0u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RecoveredFunds = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RecoveredFunds {
            contributor: donor.clone(),
            project_id: 0,
            amount: 100,
        }
    );
}

#[test]
fn test_zero_recovery_still_emits_event() {
    let (env, client, owner, _) = setup();
    let bystander = Address::generate(&env);
    let deadline = env.ledger().timestamp() + 100_000_000;
    client.create_project(&owner, &1000, &deadline);

    env.ledger().set_timestamp(deadline);
    client.recover_funds(&bystander, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let event_data: RecoveredFunds = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data.contributor, bystander);
    assert_eq!(event_data.amount, 0);
}

#[test]
fn test_new_project_owner_event() {
    let (env, client, owner, _) = setup();
    let manager = Address::generate(&env);

    client.add_project_owner(&owner, &manager);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("owner_add"), new_owner)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("owner_add").into_val(&env),
        manager.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: NewProjectOwner = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        NewProjectOwner {
            new_owner: manager.clone(),
            granted_by: owner.clone(),
        }
    );
}

#[test]
fn test_constructor_emits_seed_owner_event() {
    let (env, client, owner, _) = setup();

    let all_events = env.events().all();
    let seed_event = all_events
        .iter()
        .find(|e| e.0 == client.address)
        .expect("constructor published no event");

    let expected_topics = vec![
        &env,
        symbol_short!("owner_add").into_val(&env),
        owner.into_val(&env),
    ];
    assert_eq!(seed_event.1, expected_topics);

    let event_data: NewProjectOwner = seed_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        NewProjectOwner {
            new_owner: owner.clone(),
            granted_by: owner.clone(),
        }
    );
}

#[test]
fn test_regranting_owner_emits_event_again() {
    let (env, client, owner, _) = setup();
    let manager = Address::generate(&env);
    let other_owner = Address::generate(&env);

    client.add_project_owner(&owner, &manager);
    client.add_project_owner(&owner, &other_owner);
    client.add_project_owner(&other_owner, &manager);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("owner_add").into_val(&env),
        manager.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: NewProjectOwner = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        NewProjectOwner {
            new_owner: manager.clone(),
            granted_by: other_owner.clone(),
        }
    );
    assert!(client.is_project_owner(&manager));
}
