//! helmet-ratings: filter and display Virginia Tech bicycle helmet ratings.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use helmet_ratings::{
    fetch_helmet_data, filter_records, load_helmet_data_file, render_report, FetchConfig,
    FilterSpec, HelmetDataError, HelmetRecord,
};

#[derive(Parser)]
#[command(
    name = "helmet-ratings",
    about = "Filter and display bicycle helmet safety data from Virginia Tech",
    after_help = "Example: helmet-ratings --style Road --cost 200 --score 15",
    version
)]
struct Cli {
    /// Filter by helmet style (e.g., Road, Mountain, Commuter).
    #[arg(long)]
    style: Option<String>,

    /// Maximum cost filter in dollars (e.g., 100).
    #[arg(long)]
    cost: Option<f64>,

    /// Maximum score filter - lower is better (e.g., 10).
    #[arg(long)]
    score: Option<f64>,

    /// Filter by brand name (e.g., Giro, Specialized).
    #[arg(long)]
    brand: Option<String>,

    /// Filter by star rating (1-5).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rating: Option<u8>,

    /// Filter by date/year (e.g., 2023).
    #[arg(long)]
    date: Option<String>,

    /// Filter by certifications (e.g., CPSC, MIPS).
    #[arg(long)]
    certifications: Option<String>,

    /// Dataset URL. Also reads HELMET_DATA_URL.
    #[arg(long)]
    url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Read a saved copy of bicycleData.js instead of fetching it.
    #[arg(long, conflicts_with = "url")]
    from_file: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn filter_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new();
        if let Some(style) = &self.style {
            spec.insert("style", style.as_str());
        }
        if let Some(cost) = self.cost {
            spec.insert("cost", cost);
        }
        if let Some(score) = self.score {
            spec.insert("score", score);
        }
        if let Some(brand) = &self.brand {
            spec.insert("brand", brand.as_str());
        }
        if let Some(rating) = self.rating {
            spec.insert("rating", rating);
        }
        if let Some(date) = &self.date {
            spec.insert("date", date.as_str());
        }
        if let Some(certifications) = &self.certifications {
            spec.insert("certifications", certifications.as_str());
        }
        spec
    }

    fn load(&self) -> Result<Vec<HelmetRecord>, HelmetDataError> {
        if let Some(path) = &self.from_file {
            return load_helmet_data_file(path);
        }
        let config = FetchConfig::resolve(self.url.as_deref(), self.timeout)?;
        fetch_helmet_data(&config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let records = match cli.load() {
        Ok(records) => records,
        Err(e) => {
            error!("Data processing error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let spec = cli.filter_spec();
    let filtered = filter_records(&records, &spec);
    print!("{}", render_report(&filtered, &spec));

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use helmet_ratings::FilterValue;

    #[test]
    fn test_filter_spec_from_flags() {
        let cli = Cli::parse_from([
            "helmet-ratings",
            "--style",
            "Road",
            "--cost",
            "200",
            "--rating",
            "5",
        ]);
        let spec = cli.filter_spec();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec.get("style"), Some(&FilterValue::Text("Road".to_string())));
        assert_eq!(spec.get("cost"), Some(&FilterValue::Number(200.0)));
        assert_eq!(spec.get("rating"), Some(&FilterValue::Integer(5)));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_no_flags_means_no_filters() {
        let cli = Cli::parse_from(["helmet-ratings", "-v"]);
        assert!(cli.filter_spec().is_empty());
        assert!(cli.verbose);
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["helmet-ratings", "--rating", "6"]).is_err());
        assert!(Cli::try_parse_from(["helmet-ratings", "--rating", "0"]).is_err());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["helmet-ratings", "--timeout", "0"]).is_err());
        let cli = Cli::parse_from(["helmet-ratings", "--timeout", "5"]);
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_url_and_file_conflict() {
        let parsed = Cli::try_parse_from([
            "helmet-ratings",
            "--url",
            "https://example.com/a.js",
            "--from-file",
            "a.js",
        ]);
        assert!(parsed.is_err());
    }
}
