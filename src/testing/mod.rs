//! # Testing & Assertions
//!
//! Runs test cases against a shared [`TestContext`] and collects a verdict per
//! case. A case sends exactly one request, then evaluates its assertions in
//! order and stops at the first one that fails.

pub mod assertion;
pub mod report;

use std::time::Instant;

use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CaseFailure;
use crate::http::client;
use crate::http::context::TestContext;
use crate::http::request::RequestSpec;

pub use assertion::{Assertion, AssertionOperator, AssertionResult, AssertionTarget};
pub use report::{CaseReport, RunReport};

/// One named scenario: a request plus the checks applied to its response.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub request: RequestSpec,
    pub assertions: Vec<Assertion>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            name: name.into(),
            request,
            assertions: Vec::new(),
        }
    }

    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn expect_status(self, code: u16) -> Self {
        self.expect(Assertion::status(code))
    }

    pub fn expect_body(self, pointer: &str, operator: AssertionOperator) -> Self {
        self.expect(Assertion::body(pointer, operator))
    }
}

/// Execution mode for the suite runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Serial,
    Parallel,
}

pub async fn run_case(ctx: &TestContext, case: &TestCase) -> CaseReport {
    let started = Instant::now();
    let mut report = CaseReport {
        name: case.name.clone(),
        passed: false,
        failure: None,
        duration_ms: 0,
        status: None,
        assertions: Vec::new(),
    };

    match check(ctx, case, &mut report).await {
        Ok(()) => {
            report.passed = true;
            info!(case = %case.name, "passed");
        }
        Err(failure) => {
            match &failure {
                CaseFailure::Assertion { .. } => info!(case = %case.name, %failure, "failed"),
                _ => warn!(case = %case.name, %failure, "failed"),
            }
            report.failure = Some(failure);
        }
    }

    report.duration_ms = started.elapsed().as_millis() as u64;
    report
}

async fn check(ctx: &TestContext, case: &TestCase, report: &mut CaseReport) -> Result<(), CaseFailure> {
    let response = client::send(ctx, &case.request).await?;
    report.status = Some(response.status);

    let mut body: Option<Value> = None;
    for assertion in &case.assertions {
        if assertion.reads_body() && body.is_none() {
            body = Some(response.json()?);
        }

        let result = assertion.evaluate(response.status, body.as_ref());
        let failure = (!result.passed).then(|| result.to_failure());
        report.assertions.push(result);
        if let Some(failure) = failure {
            return Err(failure);
        }
    }

    Ok(())
}

/// Run every case against the same context. A failing case never stops the
/// others.
pub async fn run_suite(ctx: &TestContext, cases: &[TestCase], mode: RunMode) -> RunReport {
    info!(cases = cases.len(), ?mode, base_url = ctx.base_url(), "running suite");
    let started = Instant::now();

    let reports = match mode {
        RunMode::Serial => {
            let mut reports = Vec::with_capacity(cases.len());
            for case in cases {
                reports.push(run_case(ctx, case).await);
            }
            reports
        }
        RunMode::Parallel => join_all(cases.iter().map(|case| run_case(ctx, case))).await,
    };

    let report = RunReport::from_cases(reports, started.elapsed());
    info!(
        passed = report.passed,
        failed = report.failed,
        duration_ms = report.duration_ms,
        "suite finished"
    );
    report
}
