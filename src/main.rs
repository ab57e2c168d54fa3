//! altscore CLI - evaluate a subject from a JSON file and print its report

use altscore::config::EngineConfig;
use altscore::logging;
use altscore::models::subject::Subject;
use altscore::report::RiskReport;
use altscore::signals::RiskEngine;
use chrono::{Datelike, Utc};
use clap::Parser;
use dotenvy::dotenv;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "altscore")]
#[command(about = "Score small-business credit risk from public signals")]
struct Cli {
    /// Subject JSON file; omit to evaluate the built-in sample
    #[arg(value_name = "PATH")]
    subject: Option<PathBuf>,

    /// TOML engine config (overrides ALTSCORE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print subject, assessment and report as JSON
    #[arg(long)]
    json: bool,
}

fn sample_subject() -> Subject {
    let current_year = Utc::now().year();
    let mut subject = Subject::new("Joe's Pizza")
        .with_headquarters("Austin, TX")
        .with_industry("Restaurant")
        .with_founding_year(current_year - 4, current_year);
    subject.add_signal("Google News", "Joe's Pizza wins best slice award", "2024-03-02");
    subject.add_signal("Google News", "Local favorite expands to second location", "2024-05-14");
    subject.add_signal("Yelp", "Service was slow and the order was wrong", "2024-06-01");
    subject.add_signal("Yelp", "Great crust, friendly staff", "2024-06-20");
    subject.verify_financials(18250.0);
    subject.add_key_person("Joe Romano", "Owner");
    subject
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = EngineConfig::from_file(path)?;
            config.validate()?;
            config
        }
        None => EngineConfig::load()?,
    };

    let mut subject = match &cli.subject {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str::<Subject>(&contents)?
        }
        None => {
            info!("No subject file given, evaluating the built-in sample");
            sample_subject()
        }
    };
    let current_year = Utc::now().year();
    subject.validate(current_year)?;
    subject.derive_age(current_year);

    let engine = RiskEngine::new(config);
    let assessment = engine.evaluate(&mut subject);
    let report = RiskReport::new(&subject, &assessment);

    if cli.json {
        let output = json!({
            "subject": subject,
            "assessment": assessment,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
