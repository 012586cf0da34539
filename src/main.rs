// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Tagwright: Danbooru tag classifier and prompt formatter
//!
//! Classifies comma-separated tags into eight categories and renders them
//! as natural-language prompts for anime image models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use tagwright::config::AppConfig;
use tagwright::prompt::{PromptProcessor, PromptRequest};
use tagwright::{Category, ClassifiedTags, Classifier, CustomTags, KnowledgeBase};

/// Tagwright CLI - Danbooru tag classifier and prompt formatter
#[derive(Parser, Debug)]
#[command(name = "tagwright")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "2.0.0")]
#[command(about = "Classify Danbooru tags and turn them into image prompts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a comma-separated tag string
    Classify {
        /// Tags, e.g. "1girl, long_hair, masterpiece"
        tags: String,

        /// Knowledge-base folder (overrides config)
        #[arg(long, conflicts_with = "no_kb")]
        kb: Option<PathBuf>,

        /// Classify with the built-in dictionary only
        #[arg(long)]
        no_kb: bool,

        #[command(flatten)]
        custom: CustomArgs,
    },

    /// Render tags as a natural-language prompt
    Prompt {
        /// Tags, e.g. "1girl, long_hair, masterpiece"
        #[arg(default_value = "")]
        tags: String,

        /// Drawing theme, used by LLM enhancement
        #[arg(long, default_value = "")]
        theme: String,

        /// Description to use instead of the general-tag summary
        #[arg(short, long, default_value = "")]
        description: String,

        #[command(flatten)]
        custom: CustomArgs,

        /// Disable #character / @artist symbols
        #[arg(long)]
        no_symbols: bool,
    },

    /// Knowledge-base operations
    Kb {
        #[command(subcommand)]
        action: KbCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Comma-separated user overrides
#[derive(clap::Args, Debug)]
struct CustomArgs {
    /// Tags to treat as character names
    #[arg(long, default_value = "")]
    characters: String,

    /// Tags to treat as artist names
    #[arg(long, default_value = "")]
    artists: String,

    /// Tags to treat as copyrights
    #[arg(long, default_value = "")]
    copyrights: String,
}

#[derive(Subcommand, Debug)]
enum KbCommands {
    /// Show per-category tag counts
    Stats {
        /// Knowledge-base folder (default: from config)
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    let json = cli.format == "json";

    match cli.command {
        Commands::Classify { tags, kb, no_kb, custom } => {
            run_classify(&config, &tags, kb, no_kb, &custom, json)
        }
        Commands::Prompt { tags, theme, description, custom, no_symbols } => {
            let request = PromptRequest {
                tags,
                theme,
                description,
                custom_characters: custom.characters,
                custom_artists: custom.artists,
                custom_copyrights: custom.copyrights,
            };
            run_prompt(config, request, no_symbols, json, cli.verbose)
        }
        Commands::Kb { action: KbCommands::Stats { dir } } => run_kb_stats(&config, dir, json),
        Commands::Config { action } => run_config_command(config, action),
    }
}

/// Classify tags and print the category mapping
fn run_classify(
    config: &AppConfig,
    tags: &str,
    kb: Option<PathBuf>,
    no_kb: bool,
    custom: &CustomArgs,
    json: bool,
) -> Result<()> {
    let classifier = Classifier::new();
    let custom = CustomTags::parse(&custom.characters, &custom.artists, &custom.copyrights);

    let classified = if no_kb || (kb.is_none() && !config.knowledge_base.enabled) {
        debug!("Classifying without a knowledge base");
        classifier.classify_tags(tags, &custom)
    } else {
        let folder = kb.unwrap_or_else(|| PathBuf::from(&config.knowledge_base.path));
        let knowledge = classifier.load_knowledge_base(&folder);
        classifier.classify_tags_with_knowledge(tags, &knowledge, &custom)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&classified)?);
    } else {
        print_classified(&classified);
    }
    Ok(())
}

fn print_classified(classified: &ClassifiedTags) {
    for (category, tags) in classified.iter() {
        if tags.is_empty() {
            continue;
        }
        println!("{:<11} {}", format!("{}:", category), tags.join(", "));
    }
    println!("Total: {} tags", classified.total());
}

/// Run the prompt pipeline
fn run_prompt(
    mut config: AppConfig,
    request: PromptRequest,
    no_symbols: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    if no_symbols {
        config.output.symbol_enhancement = false;
    }

    let processor = PromptProcessor::new(config);
    let processed = processor.process(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&processed)?);
        return Ok(());
    }

    println!("{}", processed.final_prompt);
    if verbose {
        println!();
        println!("Formatted prompt: {}", processed.formatted_prompt);
        if !processed.enhanced_description.is_empty() {
            println!("Description: {}", processed.enhanced_description);
        }
        println!();
        print_classified(&processed.classified);
        println!();
        println!("Processing log:");
        for entry in &processed.processing_log {
            println!("  {}", entry);
        }
    }
    Ok(())
}

/// Show knowledge-base statistics
fn run_kb_stats(config: &AppConfig, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let folder = dir.unwrap_or_else(|| PathBuf::from(&config.knowledge_base.path));
    let knowledge = Classifier::new().load_knowledge_base(&folder);

    if json {
        let counts: serde_json::Map<String, serde_json::Value> = Category::ALL
            .into_iter()
            .map(|c| (c.to_string(), knowledge.count(c).into()))
            .collect();
        let stats = serde_json::json!({
            "path": folder.display().to_string(),
            "total": knowledge.total(),
            "categories": counts,
            "files": knowledge.sources(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_kb_stats(&folder, &knowledge);
    }
    Ok(())
}

fn print_kb_stats(folder: &Path, knowledge: &KnowledgeBase) {
    println!("Knowledge base: {}", folder.display());
    println!("=================");
    if knowledge.is_empty() {
        println!("No tags loaded");
        return;
    }
    for category in Category::ALL {
        println!("  {:<11} {}", format!("{}:", category), knowledge.count(category));
    }
    println!("  Total:      {}", knowledge.total());
    println!("Files: {}", knowledge.sources().join(", "));
}

/// Run configuration commands
fn run_config_command(config: AppConfig, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default()
                .save(&output)
                .with_context(|| format!("Failed to write config to {:?}", output))?;
            info!("Generated config at {:?}", output);
        }
    }

    Ok(())
}
