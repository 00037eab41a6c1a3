extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::invariants::{assert_ledger_invariants, assert_project_immutable_fields};
use crate::{CrowdFund, CrowdFundClient, Error};

const GOAL: i128 = 1000;

struct TestContext {
    env: Env,
    client: CrowdFundClient<'static>,
    owner: Address,
    token: token::Client<'static>,
    deadline: u64,
}

/// One owner, one project with `GOAL` and a far deadline.
fn setup() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac.address());

    let contract_id = env.register(CrowdFund, (&owner, &sac.address()));
    let client = CrowdFundClient::new(&env, &contract_id);

    let deadline = env.ledger().timestamp() + 100_000_000;
    client.create_project(&owner, &GOAL, &deadline);

    TestContext {
        env,
        client,
        owner,
        token,
        deadline,
    }
}

impl TestContext {
    fn fund(&self, from: &Address, id: u64, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.token.address).mint(from, &amount);
        self.token.approve(
            from,
            &self.client.address,
            &amount,
            &(self.env.ledger().sequence() + 1_000),
        );
        self.client.fund_project(from, &id, &amount);
    }

    fn pass_deadline(&self) {
        self.env.ledger().set_timestamp(self.deadline + 1);
    }
}

#[test]
fn test_recover_after_deadline_with_goal_unmet() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);

    ctx.pass_deadline();
    let recovered = ctx.client.recover_funds(&donor, &0);

    assert_eq!(recovered, 100);
    assert_eq!(ctx.client.get_project_balance(&0), 0);
    assert_eq!(ctx.client.get_funds_pledge_by_owner(&0, &donor), 0);
    assert_eq!(ctx.token.balance(&donor), 100);
    assert_eq!(ctx.token.balance(&ctx.client.address), 0);
}

#[test]
fn test_recover_exactly_at_deadline() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);

    ctx.env.ledger().set_timestamp(ctx.deadline);
    assert_eq!(ctx.client.recover_funds(&donor, &0), 100);
}

#[test]
fn test_recover_before_deadline_fails() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);

    assert_eq!(
        ctx.client.try_recover_funds(&donor, &0),
        Err(Ok(Error::TimelineNotElapsed))
    );

    ctx.env.ledger().set_timestamp(ctx.deadline - 1);
    assert_eq!(
        ctx.client.try_recover_funds(&donor, &0),
        Err(Ok(Error::TimelineNotElapsed))
    );
    assert_eq!(ctx.client.get_funds_pledge_by_owner(&0, &donor), 100);
}

#[test]
fn test_recover_fails_when_goal_met_exactly() {
    let ctx = setup();
    ctx.fund(&ctx.owner, 0, GOAL);

    ctx.pass_deadline();
    assert_eq!(
        ctx.client.try_recover_funds(&ctx.owner, &0),
        Err(Ok(Error::FundingGoalMet))
    );
    assert_eq!(ctx.client.get_project_balance(&0), GOAL);
    assert_eq!(ctx.token.balance(&ctx.client.address), GOAL);
}

#[test]
fn test_recover_fails_when_goal_exceeded() {
    let ctx = setup();
    let alice = Address::generate(&ctx.env);
    let bob = Address::generate(&ctx.env);
    ctx.fund(&alice, 0, 700);
    ctx.fund(&bob, 0, 700);

    ctx.pass_deadline();
    assert_eq!(
        ctx.client.try_recover_funds(&alice, &0),
        Err(Ok(Error::FundingGoalMet))
    );
    assert_eq!(
        ctx.client.try_recover_funds(&bob, &0),
        Err(Ok(Error::FundingGoalMet))
    );
}

#[test]
fn test_timeline_check_runs_before_goal_check() {
    let ctx = setup();
    ctx.fund(&ctx.owner, 0, GOAL);

    assert_eq!(
        ctx.client.try_recover_funds(&ctx.owner, &0),
        Err(Ok(Error::TimelineNotElapsed))
    );
}

#[test]
fn test_double_recovery_returns_zero() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    let other = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);
    ctx.fund(&other, 0, 300);

    ctx.pass_deadline();
    assert_eq!(ctx.client.recover_funds(&donor, &0), 100);
    assert_eq!(ctx.client.get_project_balance(&0), 300);

    assert_eq!(ctx.client.recover_funds(&donor, &0), 0);
    assert_eq!(ctx.client.get_project_balance(&0), 300);
    assert_eq!(ctx.token.balance(&donor), 100);
    assert_eq!(ctx.token.balance(&ctx.client.address), 300);
}

#[test]
fn test_recover_without_pledge_is_noop() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    let bystander = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);

    ctx.pass_deadline();
    assert_eq!(ctx.client.recover_funds(&bystander, &0), 0);
    assert_eq!(ctx.client.get_project_balance(&0), 100);
    assert_eq!(ctx.token.balance(&bystander), 0);
}

#[test]
fn test_recovery_returns_cumulative_pledge() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);
    ctx.fund(&donor, 0, 250);
    ctx.fund(&donor, 0, 50);

    ctx.pass_deadline();
    assert_eq!(ctx.client.recover_funds(&donor, &0), 400);
    assert_eq!(ctx.token.balance(&donor), 400);
}

#[test]
fn test_recovery_does_not_touch_other_projects() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    let later = ctx.deadline + 1_000_000;
    ctx.client.create_project(&ctx.owner, &GOAL, &later);
    ctx.fund(&donor, 0, 100);
    ctx.fund(&donor, 1, 200);

    ctx.pass_deadline();
    assert_eq!(ctx.client.recover_funds(&donor, &0), 100);
    assert_eq!(
        ctx.client.try_recover_funds(&donor, &1),
        Err(Ok(Error::TimelineNotElapsed))
    );
    assert_eq!(ctx.client.get_funds_pledge_by_owner(&1, &donor), 200);
    assert_eq!(ctx.token.balance(&ctx.client.address), 200);
}

#[test]
fn test_all_contributors_can_drain_a_failed_project() {
    let ctx = setup();
    let donors = [
        Address::generate(&ctx.env),
        Address::generate(&ctx.env),
        Address::generate(&ctx.env),
    ];
    for (i, donor) in donors.iter().enumerate() {
        ctx.fund(donor, 0, 100 * (i as i128 + 1));
    }
    assert_eq!(ctx.client.get_project_balance(&0), 600);

    ctx.pass_deadline();
    for (i, donor) in donors.iter().enumerate() {
        assert_eq!(ctx.client.recover_funds(donor, &0), 100 * (i as i128 + 1));
        assert_ledger_invariants(&ctx.client, &ctx.token, &donors);
    }
    assert_eq!(ctx.client.get_project_balance(&0), 0);
    assert_eq!(ctx.token.balance(&ctx.client.address), 0);
}

#[test]
fn test_recovery_keeps_project_config() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);
    let before = ctx.client.get_project(&0);

    ctx.pass_deadline();
    ctx.client.recover_funds(&donor, &0);

    let after = ctx.client.get_project(&0);
    assert_project_immutable_fields(&before, &after);
    assert_eq!(after.total_pledged, 0);
}

#[test]
fn test_funding_closed_after_recovery() {
    let ctx = setup();
    let donor = Address::generate(&ctx.env);
    ctx.fund(&donor, 0, 100);

    ctx.pass_deadline();
    ctx.client.recover_funds(&donor, &0);
    assert_eq!(
        ctx.client.try_fund_project(&donor, &0, &100),
        Err(Ok(Error::TimelineElapsed))
    );
}
