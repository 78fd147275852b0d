//! Recommender entrypoint: trains once at startup from the configured dataset (or the
//! built-in sample), logs the held-out accuracy, then answers the request given as
//! `<disaster_type> <location> <severity>` if one was supplied.

use response_recommender::{
    config::RecommenderConfig,
    logging::{PredictionLine, StructuredLogger},
    pipeline::Pipeline,
    records::{load_records, sample_records, PredictionRequest},
};
use std::path::PathBuf;
use tracing::info;

fn parse_request(args: &[String]) -> Result<Option<PredictionRequest>, Box<dyn std::error::Error + Send + Sync>> {
    match args {
        [] => Ok(None),
        [disaster_type, location, severity] => {
            let severity: i64 = severity
                .parse()
                .map_err(|e| format!("severity must be an integer, got {severity:?}: {e}"))?;
            Ok(Some(PredictionRequest::new(disaster_type.as_str(), location.as_str(), severity)))
        }
        _ => Err("usage: response-recommender [<disaster_type> <location> <severity>]".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("RECOMMENDER_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = RecommenderConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args)?;

    let records = match &config.dataset_path {
        Some(path) => load_records(path)?,
        None => sample_records(),
    };
    info!(records = records.len(), config = %config_path.display(), "recommender starting");

    let trained = Pipeline::new().build_schema(records).train(&config)?;
    let (context, report) = trained.serve();
    match report.accuracy {
        Some(acc) => info!(model_id = %report.model_id, accuracy = acc, "model accuracy"),
        None => info!(model_id = %report.model_id, "model accuracy unavailable"),
    }

    if let Some(request) = request {
        let prediction = context.predict_detailed(&request);
        if config.log.json {
            let line = PredictionLine::new(&request, &prediction);
            StructuredLogger::emit_json(&line, &mut std::io::stdout().lock())?;
        } else {
            println!("Recommended Response: {}", prediction.label);
        }
    }

    Ok(())
}
