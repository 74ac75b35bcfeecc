//! Dataset retrieval
//!
//! Blocking HTTP via ureq, or a local copy of the script for offline runs.

use std::path::Path;

use tracing::{debug, info};

use crate::config::FetchConfig;
use crate::error::{HelmetDataError, RetrievalError};
use crate::extractors::extract_records;
use crate::record::HelmetRecord;

/// Fetch the raw script text using ureq (simple blocking HTTP)
pub fn fetch_source_blocking(config: &FetchConfig) -> Result<String, RetrievalError> {
    config.validate()?;

    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build(),
    );

    let url = config.url.as_str();
    let resp = match agent.get(url).call() {
        Ok(resp) => resp,
        Err(ureq::Error::StatusCode(status)) => {
            return Err(RetrievalError::Status {
                url: url.to_string(),
                status,
            });
        }
        Err(e) => {
            return Err(RetrievalError::Transport {
                url: url.to_string(),
                source: e,
            });
        }
    };

    if !resp.status().is_success() {
        return Err(RetrievalError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    let text = resp
        .into_body()
        .read_to_string()
        .map_err(|e| RetrievalError::Body {
            url: url.to_string(),
            source: e,
        })?;
    debug!("Read {} bytes from {}", text.len(), url);
    Ok(text)
}

/// Read a locally saved copy of the script
pub fn read_source_file(path: &Path) -> Result<String, RetrievalError> {
    std::fs::read_to_string(path).map_err(|e| RetrievalError::File {
        path: path.display().to_string(),
        source: e,
    })
}

/// Fetch the published dataset and extract its records
pub fn fetch_helmet_data(config: &FetchConfig) -> Result<Vec<HelmetRecord>, HelmetDataError> {
    info!("Fetching data from {}", config.url);
    let js_code = fetch_source_blocking(config)?;
    let records = extract_records(&js_code)?;
    info!("Successfully fetched {} helmet records", records.len());
    Ok(records)
}

/// Same as [`fetch_helmet_data`] but from a file on disk
pub fn load_helmet_data_file(path: &Path) -> Result<Vec<HelmetRecord>, HelmetDataError> {
    info!("Loading data from {}", path.display());
    let js_code = read_source_file(path)?;
    let records = extract_records(&js_code)?;
    info!("Successfully loaded {} helmet records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "const bicycleDataRaw = [\n  {{brand: 'Giro', score: 12}},\n  {{brand: 'Bell', score: 9}},\n];"
        )
        .unwrap();

        let records = load_helmet_data_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("brand"), Some("Bell".to_string()));
    }

    #[test]
    fn test_load_file_without_marker() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "var somethingElse = 1;").unwrap();

        let err = load_helmet_data_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            HelmetDataError::Extraction(ExtractionError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source_file(&dir.path().join("missing.js")).unwrap_err();
        assert!(matches!(err, RetrievalError::File { .. }));
    }

    #[test]
    fn test_fetch_rejects_invalid_url_before_request() {
        let config = FetchConfig {
            url: "file:///etc/passwd".to_string(),
            ..FetchConfig::default()
        };
        let err = fetch_source_blocking(&config).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidUrl { .. }));
    }
}
