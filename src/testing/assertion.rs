use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::error::CaseFailure;

const MAX_ACTUAL_CHARS: usize = 200;

/// Target of an assertion within the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionTarget {
    StatusCode,
    /// JSON pointer into the parsed body, e.g. `/data` or `/data/0/id`.
    JsonPath(String),
}

impl Display for AssertionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionTarget::StatusCode => f.write_str("status"),
            AssertionTarget::JsonPath(pointer) => write!(f, "body{pointer}"),
        }
    }
}

/// Predicate applied to the targeted value.
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionOperator {
    Equals(Value),
    Exists,
    IsString,
    IsArray,
    NotEmpty,
    LengthAtLeast(usize),
}

impl Display for AssertionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionOperator::Equals(value) => write!(f, "{value}"),
            AssertionOperator::Exists => f.write_str("defined"),
            AssertionOperator::IsString => f.write_str("a string"),
            AssertionOperator::IsArray => f.write_str("an array"),
            AssertionOperator::NotEmpty => f.write_str("non-empty"),
            AssertionOperator::LengthAtLeast(min) => write!(f, "length >= {min}"),
        }
    }
}

/// A single assertion that can be evaluated against a response.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub target: AssertionTarget,
    pub operator: AssertionOperator,
}

impl Assertion {
    pub fn status(code: u16) -> Self {
        Self {
            target: AssertionTarget::StatusCode,
            operator: AssertionOperator::Equals(Value::from(code)),
        }
    }

    pub fn body(pointer: impl Into<String>, operator: AssertionOperator) -> Self {
        Self {
            target: AssertionTarget::JsonPath(pointer.into()),
            operator,
        }
    }

    pub fn reads_body(&self) -> bool {
        matches!(self.target, AssertionTarget::JsonPath(_))
    }

    /// Evaluate against the response status and, for body targets, the
    /// parsed body. A body target with `body == None` sees no value.
    pub fn evaluate(&self, status: u16, body: Option<&Value>) -> AssertionResult {
        let status_value = Value::from(status);
        let observed = match &self.target {
            AssertionTarget::StatusCode => Some(&status_value),
            AssertionTarget::JsonPath(pointer) => body.and_then(|b| b.pointer(pointer)),
        };

        let passed = match (&self.operator, observed) {
            (_, None) => false,
            (AssertionOperator::Equals(expected), Some(actual)) => actual == expected,
            (AssertionOperator::Exists, Some(_)) => true,
            (AssertionOperator::IsString, Some(actual)) => actual.is_string(),
            (AssertionOperator::IsArray, Some(actual)) => actual.is_array(),
            (AssertionOperator::NotEmpty, Some(actual)) => length(actual).is_some_and(|n| n > 0),
            (AssertionOperator::LengthAtLeast(min), Some(actual)) => {
                length(actual).is_some_and(|n| n >= *min)
            }
        };

        AssertionResult {
            target: self.target.to_string(),
            expected: self.operator.to_string(),
            actual: describe(&self.operator, observed),
            passed,
        }
    }
}

/// Outcome of evaluating one [`Assertion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionResult {
    pub target: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
}

impl AssertionResult {
    pub fn to_failure(&self) -> CaseFailure {
        CaseFailure::Assertion {
            target: self.target.clone(),
            expected: self.expected.clone(),
            actual: self.actual.clone(),
        }
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(operator: &AssertionOperator, observed: Option<&Value>) -> String {
    let Some(value) = observed else {
        return "undefined".into();
    };

    match operator {
        AssertionOperator::IsString | AssertionOperator::IsArray => type_name(value).into(),
        AssertionOperator::NotEmpty | AssertionOperator::LengthAtLeast(_) => match length(value) {
            Some(n) => format!("length {n}"),
            None => type_name(value).into(),
        },
        AssertionOperator::Equals(_) | AssertionOperator::Exists => {
            let mut rendered = value.to_string();
            if rendered.chars().count() > MAX_ACTUAL_CHARS {
                rendered = rendered.chars().take(MAX_ACTUAL_CHARS).collect();
                rendered.push('…');
            }
            rendered
        }
    }
}
