// main.rs

// Module declarations
mod config;

use crate::config::GeneratorConfig;
use colored::*;
use personagen::{BigFivePersonality, DefaultRandomSource};
use std::path::Path;

fn main() {
    // Load configuration file, falling back to defaults when absent
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config_path = Path::new(&config_path);
    let config = if config_path.exists() {
        match GeneratorConfig::load(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                return;
            }
        }
    } else {
        GeneratorConfig::default()
    };

    let mut rng = match config.seed {
        Some(seed) => DefaultRandomSource::new(seed),
        None => DefaultRandomSource::from_entropy(),
    };

    for index in 1..=config.count {
        let personality = match BigFivePersonality::random(config.life_stage, &mut rng) {
            Ok(personality) => personality,
            Err(e) => {
                eprintln!("Error generating personality: {}", e);
                return;
            }
        };

        if config.output_json {
            match serde_json::to_string_pretty(&personality.to_mapping()) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing personality: {}", e);
                    return;
                }
            }
        } else {
            print_personality(index, &personality);
        }
    }
}

/// Prints one personality as a colored terminal summary.
fn print_personality(index: usize, personality: &BigFivePersonality) {
    let traits = &personality.trait_configuration;
    let conflict = &personality.conflict_resolution_configuration;

    println!(
        "{} #{} ({})",
        "PERSONA".green().bold(),
        index,
        personality.life_stage
    );
    println!("  openness           {}", score_label(traits.openness.score()));
    println!(
        "  conscientiousness  {}",
        score_label(traits.conscientiousness.score())
    );
    println!(
        "  extraversion       {}",
        score_label(traits.extraversion.score())
    );
    println!(
        "  agreeableness      {}",
        score_label(traits.agreeableness.score())
    );
    println!(
        "  neuroticism        {}",
        score_label(traits.neuroticism.score())
    );
    println!(
        "  conflict style     {} (self: {:?}, others: {:?})",
        conflict.conflict_resolution_style.to_string().cyan(),
        conflict.concern_for_self,
        conflict.concern_for_others
    );
    println!("  {}", personality.describe().italic());
}

/// Colors a trait score by magnitude: high green, low red, middling yellow.
fn score_label(score: f64) -> ColoredString {
    let text = format!("{:.2}", score);
    if score > 0.7 {
        text.green()
    } else if score < 0.3 {
        text.red()
    } else {
        text.yellow()
    }
}
