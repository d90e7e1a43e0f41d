//! Probe runner: send a fixed list of requests in order and report what came back.
//!
//! A probe never aborts a run. Transport errors, timeouts, non-2xx responses
//! and undecodable bodies all become a [`ProbeOutcome`] and the next case runs.

mod suites;

pub use suites::{custom_info_case, Suite, SuiteContext, DEFAULT_PROBE_USER};

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::{self, ApiError};
use crate::format::truncate;

/// Maximum characters shown for a scalar body or a failed response body.
pub const BODY_PREVIEW: usize = 100;
/// Maximum characters shown for an exception message.
pub const ERROR_PREVIEW: usize = 80;
/// Number of object keys listed for an object body.
pub const MAX_KEYS: usize = 5;

/// One request to try.
#[derive(Debug, Clone)]
pub struct ProbeCase {
    pub method: Method,
    pub url: String,
    pub payload: Option<Value>,
    pub timeout: Duration,
}

impl ProbeCase {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            payload: None,
            timeout,
        }
    }

    pub fn post(url: impl Into<String>, payload: Value, timeout: Duration) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            payload: Some(payload),
            timeout,
        }
    }

    /// `[GET] <url>` or `[POST] <url> <payload>`.
    pub fn label(&self) -> String {
        match &self.payload {
            Some(p) => format!("[{}] {} {}", self.method, self.url, p),
            None => format!("[{}] {}", self.method, self.url),
        }
    }
}

/// Top-level shape of a successful JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonShape {
    /// `len` is the array's element count
    List { len: usize, first_keys: Vec<String> },
    Object { keys: Vec<String>, total_keys: usize },
    Scalar { preview: String },
}

impl JsonShape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(items) => JsonShape::List {
                len: items.len(),
                first_keys: items
                    .first()
                    .and_then(Value::as_object)
                    .map(|obj| obj.keys().cloned().collect())
                    .unwrap_or_default(),
            },
            Value::Object(map) => JsonShape::Object {
                keys: map.keys().take(MAX_KEYS).cloned().collect(),
                total_keys: map.len(),
            },
            other => JsonShape::Scalar {
                preview: truncate(&other.to_string(), BODY_PREVIEW),
            },
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonShape::List { len, first_keys } => {
                write!(f, "list of {} items", len)?;
                if !first_keys.is_empty() {
                    write!(f, "; first item keys: {:?}", first_keys)?;
                }
                Ok(())
            }
            JsonShape::Object { keys, total_keys } => {
                write!(f, "dict keys: {:?}", keys)?;
                if *total_keys > keys.len() {
                    write!(f, " (+{} more)", total_keys - keys.len())?;
                }
                Ok(())
            }
            JsonShape::Scalar { preview } => write!(f, "{}", preview),
        }
    }
}

/// Result of one probe case.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Success { status: u16, shape: JsonShape },
    HttpFailure { status: u16, body_preview: String },
    Error { kind: &'static str, message: String },
}

impl ProbeOutcome {
    fn from_error(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, body } => ProbeOutcome::HttpFailure {
                status: status.as_u16(),
                body_preview: truncate(&body, BODY_PREVIEW),
            },
            other => ProbeOutcome::Error {
                kind: other.kind(),
                message: truncate(&other.to_string(), ERROR_PREVIEW),
            },
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success { status, shape } => write!(f, "SUCCESS {} -> {}", status, shape),
            ProbeOutcome::HttpFailure {
                status,
                body_preview,
            } => write!(f, "FAILED {}: {}", status, body_preview),
            ProbeOutcome::Error { kind, message } => write!(f, "ERROR ({}) {}", kind, message),
        }
    }
}

/// A case together with what happened to it.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub case: ProbeCase,
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn line(&self) -> String {
        format!("{} -> {}", self.case.label(), self.outcome)
    }
}

/// Tally of a finished suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub succeeded: usize,
    pub http_failures: usize,
    pub errors: usize,
}

impl SuiteSummary {
    pub fn from_reports(reports: &[ProbeReport]) -> Self {
        reports
            .iter()
            .fold(SuiteSummary::default(), |mut acc, r| {
                match r.outcome {
                    ProbeOutcome::Success { .. } => acc.succeeded += 1,
                    ProbeOutcome::HttpFailure { .. } => acc.http_failures += 1,
                    ProbeOutcome::Error { .. } => acc.errors += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.http_failures + self.errors
    }

    pub fn merge(&mut self, other: SuiteSummary) {
        self.succeeded += other.succeeded;
        self.http_failures += other.http_failures;
        self.errors += other.errors;
    }
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases: {} succeeded, {} failed, {} errored",
            self.total(),
            self.succeeded,
            self.http_failures,
            self.errors
        )
    }
}

/// Sends probe cases one at a time.
pub struct ProbeRunner {
    client: Client,
}

impl ProbeRunner {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Run one case; every failure is folded into the outcome.
    pub async fn run_case(&self, case: &ProbeCase) -> ProbeOutcome {
        let result = api::send(
            &self.client,
            case.method.clone(),
            &case.url,
            case.payload.as_ref(),
            case.timeout,
        )
        .await
        .and_then(|raw| raw.error_for_status())
        .and_then(|raw| {
            let status = raw.status.as_u16();
            raw.json::<Value>().map(|value| (status, value))
        });

        match result {
            Ok((status, value)) => ProbeOutcome::Success {
                status,
                shape: JsonShape::of(&value),
            },
            Err(err) => {
                warn!(url = %case.url, kind = err.kind(), "Probe failed");
                ProbeOutcome::from_error(err)
            }
        }
    }

    /// Run every case in order, handing each report to `on_report` as soon
    /// as it is available.
    pub async fn run_suite<F>(&self, cases: Vec<ProbeCase>, mut on_report: F) -> Vec<ProbeReport>
    where
        F: FnMut(&ProbeReport),
    {
        let mut reports = Vec::with_capacity(cases.len());

        for case in cases {
            debug!(case = %case.label(), "Running probe");
            let outcome = self.run_case(&case).await;
            let report = ProbeReport { case, outcome };
            on_report(&report);
            reports.push(report);
        }

        reports
    }
}
