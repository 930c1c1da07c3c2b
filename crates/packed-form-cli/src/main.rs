mod commands;

use clap::{Parser, Subcommand};
use packed_form::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "packed-form")]
#[command(version, about = "Render, check and serve declarative form definitions", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "packed-form.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the HTML form for a definition file (.json or .toml)
    Render {
        /// Form definition file
        definition: PathBuf,
    },

    /// Validate name=value pairs against a definition
    Check {
        /// Form definition file
        definition: PathBuf,

        /// Field values, e.g. name=Al age=30
        values: Vec<String>,
    },

    /// List the supported field kinds
    Kinds,

    /// Serve a definition as a live HTML form
    Serve {
        /// Form definition file
        definition: PathBuf,

        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    let result = match cli.command {
        Commands::Render { definition } => commands::render::run(&definition, &config.render),
        Commands::Check { definition, values } => commands::check::run(&definition, &values),
        Commands::Kinds => commands::kinds::run(),
        Commands::Serve { definition, port } => {
            commands::serve::run(&definition, config, port).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
