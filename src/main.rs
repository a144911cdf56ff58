//! switchyard - content-based routing of chat queries to LLM providers
//!
//! Command-line front end: route a message, inspect the rule cascade, or
//! validate a configuration file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use switchyard::router::rules::CASCADE;
use switchyard::router::{Classification, Domain, RouteKind};
use switchyard::{Config, ContentRouter};

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(about = "Content-based routing of chat queries to LLM providers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a message and print the decision
    Route {
        /// Message text to classify
        message: String,

        /// Number of prior turns in the conversation
        #[arg(short = 'n', long, default_value_t = 0, allow_negative_numbers = true)]
        context_size: i64,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the classification cascade in evaluation order
    Rules,

    /// Show the provider and model for every route kind
    Providers {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate configuration file
    Check {
        /// Path to configuration file
        #[arg(short, long, default_value = "switchyard.toml")]
        config: PathBuf,
    },
}

impl Commands {
    fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Commands::Route { config, .. } | Commands::Providers { config } => config.as_ref(),
            Commands::Check { config } => Some(config),
            Commands::Rules => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load errors are returned only once logging is up
    let config_path = cli.command.config_path().map(PathBuf::as_path);
    let loaded = config_path.map(|path| Config::load(Some(path)));
    let default_level = match &loaded {
        Some(Ok(config)) => config.logging.level.clone(),
        _ => "info".to_string(),
    };

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("switchyard={}", default_level).into()),
        )
        .with(stderr_layer)
        .init();

    let config = loaded.transpose()?.unwrap_or_default();

    match cli.command {
        Commands::Route {
            message,
            context_size,
            json,
            ..
        } => {
            let router = ContentRouter::from_config(&config);
            let classification = router.classify(&message, context_size);

            if json {
                println!("{}", classification.to_json()?);
            } else {
                print_classification(&classification);
            }
            Ok(())
        }

        Commands::Rules => {
            let router = ContentRouter::default();
            println!("{:<3} {:<18} {:<10} CHECK", "#", "DOMAIN", "TERMS");
            for (i, rule) in CASCADE.iter().enumerate() {
                let terms = rule
                    .vocabulary_len()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<3} {:<18} {:<10} {}",
                    i + 1,
                    rule.domain,
                    terms,
                    describe(rule.domain, router.long_context_threshold())
                );
            }
            println!(
                "{:<3} {:<18} {:<10} {}",
                CASCADE.len() + 1,
                Domain::Fallback,
                "-",
                describe(Domain::Fallback, router.long_context_threshold())
            );
            Ok(())
        }

        Commands::Providers { .. } => {
            let router = ContentRouter::from_config(&config);
            println!("{:<18} {:<12} MODEL", "ROUTE", "PROVIDER");
            for kind in RouteKind::ALL {
                let (provider, model) = router.target(kind);
                println!("{:<18} {:<12} {}", kind, provider, model);
            }
            Ok(())
        }

        Commands::Check { config: path } => {
            tracing::info!(config = %path.display(), "Configuration is valid");
            println!(
                "{}: ok (long_context_threshold = {}, {} model override(s))",
                path.display(),
                config.router.long_context_threshold,
                config.models.len()
            );
            Ok(())
        }
    }
}

fn print_classification(classification: &Classification) {
    let decision = &classification.decision;
    println!("provider: {}", decision.provider);
    println!("model:    {}", decision.model);
    println!("domain:   {}", classification.domain);
    println!("reason:   {}", decision.reason);
}

fn describe(domain: Domain, threshold: i64) -> String {
    match domain {
        Domain::Greeting => "greeting phrase anywhere in message".to_string(),
        Domain::Code => "code vocabulary or programming language name".to_string(),
        Domain::Reasoning => "analytical or creative vocabulary".to_string(),
        Domain::Research => "real-time or citation vocabulary".to_string(),
        Domain::LongContext => format!("context size > {}", threshold),
        Domain::LongDocument => "document-scale vocabulary".to_string(),
        Domain::FactualQuestion => "question pattern, vetoed by ambiguous phrasing".to_string(),
        Domain::Fallback => "always".to_string(),
    }
}
