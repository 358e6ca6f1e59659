use std::sync::Arc;

use super::common::*;
use crate::workflows::origination::domain::ClientId;
use crate::workflows::origination::eligibility::EligibilityViolation;
use crate::workflows::origination::policy::{
    LoanRequest, PolicyConfig, PolicyError, RepaymentMethod,
};
use crate::workflows::origination::repository::{ClientStore, StoreError};
use crate::workflows::origination::scoring::{MetricError, Recommendation, RiskCategory, ScoringConfig};
use crate::workflows::origination::service::{OriginationError, OriginationService};

fn loan_request() -> LoanRequest {
    LoanRequest {
        requested_amount: 120_000.0,
        term_months: 6,
        repayment_method: RepaymentMethod::Weekly,
        purpose: None,
    }
}

#[test]
fn process_metrics_persists_the_derived_set() {
    let (service, store) = build_service();

    let metrics = service
        .process_metrics(&cid(), evaluation_date())
        .expect("metrics derive");

    assert_eq!(metrics, derived_metrics());
    let stored = store
        .metrics(&cid())
        .expect("store reachable")
        .expect("metrics persisted");
    assert_eq!(stored, metrics);
}

#[test]
fn process_metrics_surfaces_missing_history_as_not_found() {
    let (service, _) = build_service();

    match service.process_metrics(&ClientId::from("999"), evaluation_date()) {
        Err(OriginationError::Store(StoreError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn score_client_runs_the_full_pass_and_persists() {
    let (service, store) = build_service();

    let result = service
        .score_client(&cid(), evaluation_date(), evaluation_timestamp())
        .expect("scoring pass completes");

    assert_eq!(result.cid, cid());
    assert_eq!(result.timestamp, evaluation_timestamp());
    assert_eq!(result.input, derived_metrics());
    assert_eq!(result.credit_score, 698);
    assert!((result.default_probability - 0.6130).abs() < 1e-9);
    assert_eq!(result.risk_category, RiskCategory::Good);
    assert_eq!(result.recommendation, Recommendation::Approve);

    let stored = store
        .score(&cid())
        .expect("store reachable")
        .expect("score persisted");
    assert_eq!(stored, result);
    // The pass also refreshed the persisted metrics.
    assert!(store.metrics(&cid()).expect("store reachable").is_some());
}

#[test]
fn score_client_rejects_a_zero_payment_log() {
    let mut raw = raw_history();
    raw.payment_history_log.clear();
    let store = MemoryStore::default()
        .with_client(client_record(cid()))
        .with_history(cid(), raw);
    let service = OriginationService::new(
        Arc::new(store),
        ScoringConfig::default(),
        PolicyConfig::default(),
    );

    match service.score_client(&cid(), evaluation_date(), evaluation_timestamp()) {
        Err(OriginationError::Metric(MetricError::EmptyPaymentLog)) => {}
        other => panic!("expected metric rejection, got {other:?}"),
    }
}

#[test]
fn recommend_loan_quotes_from_the_stored_score() {
    let (service, _) = build_service();
    service
        .score_client(&cid(), evaluation_date(), evaluation_timestamp())
        .expect("scoring pass completes");

    let outcome = service
        .recommend_loan(&cid(), &loan_request())
        .expect("quote produced");

    // Score 698 sits in the 670+ tier.
    assert_eq!(outcome.recommended_amount, 75_000.0);
    assert_eq!(outcome.borrower_request, 75_000.0);
    assert_eq!(outcome.interest_rate, 14.0);
}

#[test]
fn recommend_loan_requires_a_prior_scoring_pass() {
    let (service, _) = build_service();

    match service.recommend_loan(&cid(), &loan_request()) {
        Err(OriginationError::Store(StoreError::NotFound)) => {}
        other => panic!("expected not found for unscored client, got {other:?}"),
    }
}

#[test]
fn recommend_loan_blocks_clients_with_an_active_balance() {
    let store = MemoryStore::default()
        .with_client(indebted_client_record(cid()))
        .with_history(cid(), raw_history());
    let service = OriginationService::new(
        Arc::new(store),
        ScoringConfig::default(),
        PolicyConfig::default(),
    );
    service
        .score_client(&cid(), evaluation_date(), evaluation_timestamp())
        .expect("scoring pass completes");

    match service.recommend_loan(&cid(), &loan_request()) {
        Err(OriginationError::Eligibility(EligibilityViolation::ActiveLoanBalance {
            amount,
        })) => {
            assert_eq!(amount, 15_000.0);
        }
        other => panic!("expected eligibility violation, got {other:?}"),
    }
}

#[test]
fn recommend_loan_propagates_policy_rejections() {
    let (service, _) = build_service();
    service
        .score_client(&cid(), evaluation_date(), evaluation_timestamp())
        .expect("scoring pass completes");

    let mut request = loan_request();
    request.term_months = 24;

    match service.recommend_loan(&cid(), &request) {
        Err(OriginationError::Policy(PolicyError::TermOutOfRange { found: 24, .. })) => {}
        other => panic!("expected term rejection, got {other:?}"),
    }
}

#[test]
fn client_lookup_propagates_not_found() {
    let (service, _) = build_service();

    match service.client(&ClientId::from("404")) {
        Err(OriginationError::Store(StoreError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn store_outages_surface_as_unavailable() {
    let service = OriginationService::new(
        Arc::new(UnavailableStore),
        ScoringConfig::default(),
        PolicyConfig::default(),
    );

    match service.clients() {
        Err(OriginationError::Store(StoreError::Unavailable(reason))) => {
            assert!(reason.contains("offline"));
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
}

#[test]
fn rescoring_overwrites_the_previous_result() {
    let (service, store) = build_service();

    let first = service
        .score_client(&cid(), evaluation_date(), evaluation_timestamp())
        .expect("first pass completes");
    let later = evaluation_timestamp() + chrono::Duration::hours(2);
    let second = service
        .score_client(&cid(), evaluation_date(), later)
        .expect("second pass completes");

    assert_eq!(first.credit_score, second.credit_score);
    let stored = store
        .score(&cid())
        .expect("store reachable")
        .expect("score persisted");
    // Last write wins; only the newer timestamp survives.
    assert_eq!(stored.timestamp, later);
}
