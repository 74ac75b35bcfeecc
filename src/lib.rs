//! Bicycle helmet ratings fetcher and filter
//!
//! Pulls Virginia Tech's bicycle helmet safety ratings out of the
//! `bicycleData.js` script they publish and filters them:
//! - array literal extraction and JS-to-JSON repair
//! - exact-match and maximum-value filters
//! - stable ordering by score, safest first

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod filter;
pub mod record;
pub mod report;

pub use config::FetchConfig;
pub use error::{CoercionError, ExtractionError, HelmetDataError, RetrievalError};
pub use extractors::{extract_records, extract_records_named, DATA_IDENTIFIER};
pub use fetch::{fetch_helmet_data, load_helmet_data_file};
pub use filter::{filter_records, FilterSpec, FilterValue, THRESHOLD_FIELDS};
pub use record::HelmetRecord;
pub use report::render_report;
