//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use crate::records::{CategoricalField, PredictionRequest};
use crate::recommender::Prediction;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// One answered request, as written to stdout in JSON mode
#[derive(Debug, Serialize)]
pub struct PredictionLine<'a> {
    pub ts: String,
    pub disaster_type: &'a str,
    pub location: &'a str,
    pub severity: i64,
    pub response_action: &'a str,
    #[serde(skip_serializing_if = "no_unseen")]
    pub unseen: &'a [CategoricalField],
}

fn no_unseen(fields: &&[CategoricalField]) -> bool {
    fields.is_empty()
}

impl<'a> PredictionLine<'a> {
    pub fn new(request: &'a PredictionRequest, prediction: &'a Prediction) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            disaster_type: &request.disaster_type,
            location: &request.location,
            severity: request.severity,
            response_action: &prediction.label,
            unseen: &prediction.unseen,
        }
    }
}

/// Initialize tracing with JSON format (one JSON object per line)
pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber: JSON lines to stderr, level from RUST_LOG or default.
    /// Stdout is left for prediction output.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    /// Emit a single structured line without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
