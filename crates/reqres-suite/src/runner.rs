use crate::cases::Case;
use crate::check::CheckFailure;
use reqres_client::ReqresClient;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub case: Case,
    pub result: Result<(), CheckFailure>,
    pub elapsed: Duration,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (Case, &CheckFailure)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.case, e)))
    }
}

/// Runs each case in turn. A failing case never stops the ones after it.
pub async fn run_cases(
    client: &ReqresClient,
    cases: impl IntoIterator<Item = Case>,
) -> SuiteReport {
    let mut report = SuiteReport::default();

    for case in cases {
        let started = Instant::now();
        let result = case.run(client).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(()) => info!(case = %case, kind = %case.kind(), ?elapsed, "Check passed"),
            Err(e) => warn!(case = %case, kind = %case.kind(), ?elapsed, error = %e, "Check failed"),
        }

        report.outcomes.push(CaseOutcome {
            case,
            result,
            elapsed,
        });
    }

    info!(
        passed = report.passed(),
        failed = report.failed(),
        "Suite finished"
    );
    report
}

pub async fn run_all(client: &ReqresClient) -> SuiteReport {
    run_cases(client, Case::ALL).await
}
