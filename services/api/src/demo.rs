use crate::infra::seeded_store;
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use loansiya::error::AppError;
use loansiya::workflows::origination::{
    ClientId, LoanRequest, OriginationError, OriginationService, PolicyConfig, RepaymentMethod,
    ScoringConfig,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Client identifier to score (seeded demo data: 001, 002)
    #[arg(default_value = "001")]
    pub(crate) cid: String,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

fn demo_service(as_of: NaiveDate) -> OriginationService<crate::infra::InMemoryClientStore> {
    OriginationService::new(
        Arc::new(seeded_store(as_of)),
        ScoringConfig::default(),
        PolicyConfig::default(),
    )
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let service = demo_service(as_of);

    let result = service.score_client(&ClientId(args.cid), as_of, Utc::now())?;

    println!("Scoring pass for client {} ({})", result.cid, as_of);
    print_metrics(&result.input);
    print_score(&result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let service = demo_service(as_of);

    println!("LoanSiya origination demo ({as_of})");

    println!("\nClient roster");
    for record in service.clients()? {
        let balance = record.outstanding_balance();
        println!(
            "  {} {} (outstanding balance {:.2})",
            record.cid, record.name, balance
        );
    }

    let steady = ClientId::from("001");
    println!("\nScoring pass for client {steady}");
    let result = service.score_client(&steady, as_of, Utc::now())?;
    print_metrics(&result.input);
    print_score(&result);

    let request = LoanRequest {
        requested_amount: 120_000.0,
        term_months: 6,
        repayment_method: RepaymentMethod::Weekly,
        purpose: None,
    };
    println!(
        "\nLoan request: {:.2} over {} months, {} repayments",
        request.requested_amount,
        request.term_months,
        request.repayment_method.label()
    );
    let outcome = service.recommend_loan(&steady, &request)?;
    println!("  recommended ceiling {:.2}", outcome.recommended_amount);
    println!("  capped request      {:.2}", outcome.borrower_request);
    println!("  interest rate       {:.2}%", outcome.interest_rate);
    println!("  amount due/period   {:.2}", outcome.amount_due);

    let indebted = ClientId::from("002");
    println!("\nRe-application check for client {indebted}");
    service.score_client(&indebted, as_of, Utc::now())?;
    match service.recommend_loan(&indebted, &request) {
        Err(OriginationError::Eligibility(violation)) => {
            println!("  blocked: {violation}");
        }
        Ok(_) => println!("  unexpectedly eligible"),
        Err(other) => return Err(other.into()),
    }

    Ok(())
}

fn print_metrics(metrics: &loansiya::workflows::origination::DerivedMetrics) {
    println!("  payment history       {:.2}%", metrics.payment_history);
    println!("  credit utilization    {:.2}%", metrics.credit_utilization);
    println!("  history length        {} months", metrics.credit_history_length);
    println!("  credit mix            {}", metrics.credit_mix);
    println!("  new inquiries         {}", metrics.new_inquiries);
}

fn print_score(result: &loansiya::workflows::origination::ScoreResult) {
    println!("  credit score          {}", result.credit_score);
    println!("  default probability   {:.4}", result.default_probability);
    println!("  risk category         {}", result.risk_category.label());
    println!("  recommendation        {}", result.recommendation.label());
}
