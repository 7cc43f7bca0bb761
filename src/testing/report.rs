use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use crate::error::CaseFailure;

use super::assertion::AssertionResult;

/// Verdict for one test case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CaseFailure>,
    pub duration_ms: u64,
    /// Observed status, absent when no response arrived.
    pub status: Option<u16>,
    pub assertions: Vec<AssertionResult>,
}

/// Summary report for a suite run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    pub fn from_cases(cases: Vec<CaseReport>, elapsed: Duration) -> Self {
        let passed = cases.iter().filter(|c| c.passed).count();
        Self {
            total: cases.len(),
            passed,
            failed: cases.len() - passed,
            duration_ms: elapsed.as_millis() as u64,
            cases,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for case in &self.cases {
            let verdict = if case.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "{verdict}  {} ({} ms)", case.name, case.duration_ms);
            if let Some(failure) = &case.failure {
                let _ = writeln!(out, "      {failure}");
            }
        }
        let _ = writeln!(
            out,
            "{} cases: {} passed, {} failed ({} ms)",
            self.total, self.passed, self.failed, self.duration_ms
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Assertion, AssertionOperator};

    fn case(name: &str, failure: Option<CaseFailure>) -> CaseReport {
        CaseReport {
            name: name.into(),
            passed: failure.is_none(),
            failure,
            duration_ms: 5,
            status: Some(200),
            assertions: Vec::new(),
        }
    }

    #[test]
    fn counts_passed_and_failed() {
        let report = RunReport::from_cases(
            vec![
                case("a", None),
                case("b", Some(CaseFailure::infrastructure("connection refused"))),
            ],
            Duration::from_millis(12),
        );
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert!(report.case("b").is_some());
    }

    #[test]
    fn text_lists_failure_detail() {
        let report = RunReport::from_cases(
            vec![case(
                "delete user",
                Some(CaseFailure::Assertion {
                    target: "status".into(),
                    expected: "204".into(),
                    actual: "404".into(),
                }),
            )],
            Duration::from_millis(3),
        );
        let text = report.render_text();
        assert!(text.contains("FAIL  delete user (5 ms)"));
        assert!(text.contains("status: expected 204, got 404"));
        assert!(text.ends_with("1 cases: 0 passed, 1 failed (3 ms)\n"));
    }

    #[test]
    fn json_assertion_entries_have_documented_keys() {
        let mut passed = case("create user", None);
        passed.assertions = vec![
            Assertion::status(201).evaluate(201, None),
            Assertion::body("/id", AssertionOperator::IsString).evaluate(201, None),
        ];
        let report = RunReport::from_cases(vec![passed], Duration::ZERO);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        let entry = value["cases"][0]["assertions"][1].as_object().unwrap();
        let mut keys: Vec<&str> = entry.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["actual", "expected", "passed", "target"]);
        assert_eq!(entry["target"], "body/id");
        assert_eq!(entry["expected"], "a string");
        assert_eq!(entry["actual"], "undefined");
        assert_eq!(entry["passed"], false);

        let case = value["cases"][0].as_object().unwrap();
        assert!(case.contains_key("durationMs"));
        assert!(!case.contains_key("failure"));
    }

    #[test]
    fn json_tags_failure_kind() {
        let report = RunReport::from_cases(
            vec![case("login", Some(CaseFailure::parse("expected value at line 1")))],
            Duration::ZERO,
        );
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["cases"][0]["failure"]["kind"], "parse");
        assert_eq!(value["failed"], 1);
    }
}
