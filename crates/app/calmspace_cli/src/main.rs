// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::fs;
use std::path::Path;

use calmspace_core::crisis::{CrisisFilter, CrisisLevel};
use calmspace_core::dataset::{DatasetConfig, DatasetHandler};
use calmspace_core::emotion::{Emotion, EmotionDetector, Intensity};
use calmspace_core::llm::PLACEHOLDER_API_KEY;
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!(
                "{} {} (calmspace_core {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                calmspace_core::version()
            );
        }
        Commands::Check { env_file, template } => check(env_file, template)?,
        Commands::Classify { message, json } => classify(message, *json)?,
        Commands::DatasetStats { dir } => {
            dotenvy::dotenv().ok();
            let mut config = DatasetConfig::from_env();
            if let Some(dir) = dir {
                config.dir = dir.clone();
            }
            dataset_stats(&config)?;
        }
    }

    Ok(())
}

fn check(env_file: &Path, template: &Path) -> Result<()> {
    if !env_file.exists() {
        log::warn!("{} not found", env_file.display());
        if !template.exists() {
            return Err(Error::Custom(format!("{} not found", template.display())));
        }
        fs::copy(template, env_file)?;
        log::info!("Created {} from {}", env_file.display(), template.display());
        return Err(Error::Custom(format!(
            "Set GROQ_API_KEY in {}",
            env_file.display()
        )));
    }

    let mut key = None;
    for item in dotenvy::from_path_iter(env_file)? {
        let (name, value) = item?;
        if name == "GROQ_API_KEY" {
            key = Some(value);
        }
    }

    match key.as_deref().map(str::trim) {
        None | Some("") | Some(PLACEHOLDER_API_KEY) => Err(Error::Custom(format!(
            "Set GROQ_API_KEY in {}",
            env_file.display()
        ))),
        Some(_) => {
            log::info!("Environment file configured");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct Classification {
    crisis_level: CrisisLevel,
    escalation_needed: bool,
    emotion: Emotion,
    intensity: Intensity,
    confidence: f32,
    suggestions: Vec<&'static str>,
}

fn classify(message: &str, json: bool) -> Result<()> {
    let crisis = CrisisFilter::new().assess(message, &[]);
    let detector = EmotionDetector::new();
    let reading = detector.analyze(message);

    let result = Classification {
        crisis_level: crisis.level,
        escalation_needed: crisis.escalation_needed,
        emotion: reading.primary,
        intensity: reading.intensity,
        confidence: reading.confidence,
        suggestions: detector.emotion_suggestions(reading.primary),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("crisis level: {}", result.crisis_level);
    println!("emotion:      {} ({})", result.emotion, result.intensity);
    println!("confidence:   {:.2}", result.confidence);
    for tip in &result.suggestions {
        println!("  - {tip}");
    }
    if result.escalation_needed {
        println!();
        println!("{}", CrisisFilter::new().crisis_response());
    }
    Ok(())
}

fn dataset_stats(config: &DatasetConfig) -> Result<()> {
    let handler = DatasetHandler::load(config);
    if !handler.is_loaded() {
        log::warn!("No corpora loaded from {}", config.dir.display());
    }
    let datasets = handler.stats();
    let total_entries: usize = datasets.values().map(|s| s.rows).sum();
    let out = serde_json::json!({
        "datasets": datasets,
        "total_entries": total_entries,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
