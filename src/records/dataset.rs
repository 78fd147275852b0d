//! Record sources: the built-in sample table and JSON files.

use super::DisasterRecord;
use crate::error::Result;
use std::path::Path;

/// The five-row reference table (severity on a 1–5 scale).
pub fn sample_records() -> Vec<DisasterRecord> {
    vec![
        DisasterRecord::new("Flood", "Urban", 3, "Evacuate"),
        DisasterRecord::new("Earthquake", "Rural", 5, "Search and Rescue"),
        DisasterRecord::new("Cyclone", "Coastal", 4, "Shelter"),
        DisasterRecord::new("Flood", "Coastal", 2, "Evacuate"),
        DisasterRecord::new("Earthquake", "Urban", 4, "Search and Rescue"),
    ]
}

/// Load a JSON array of records. Input order is preserved; it feeds the seeded split.
pub fn load_records(path: &Path) -> Result<Vec<DisasterRecord>> {
    let data = std::fs::read_to_string(path)?;
    let records: Vec<DisasterRecord> = serde_json::from_str(&data)?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn sample_has_three_actions() {
        let records = sample_records();
        assert_eq!(records.len(), 5);
        let labels: BTreeSet<_> = records.iter().map(|r| r.response_action.as_str()).collect();
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, serde_json::to_string(&sample_records()).unwrap()).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, sample_records());
    }

    #[test]
    fn load_rejects_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"disaster_type":"Flood","location":"Urban","severity":3}]"#).unwrap();
        assert!(matches!(
            load_records(&path),
            Err(crate::error::RecommenderError::Json(_))
        ));
    }
}
