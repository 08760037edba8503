//! Command-line interface for linkstash.
//!
//! Provides commands for collecting link records interactively,
//! listing and sampling the stored links, and inspecting the
//! resolved configuration.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::collector::{prompt_nonempty, Collector};
use crate::config::ResolvedConfig;
use crate::domain::LinkOptions;
use crate::publish::{GitRunner, Publisher};
use crate::store::LinkStore;
use crate::vocab::Vocabularies;

/// linkstash - Interactive link metadata collector
#[derive(Parser, Debug)]
#[command(name = "linkstash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect link records interactively and save them to the store
    Add {
        /// Publish the updated store to a contributor branch after saving
        #[arg(long)]
        publish: bool,

        /// Contributor name for the branch and commit attribution
        /// (prompted for if publishing without this flag)
        #[arg(long)]
        contributor: Option<String>,
    },

    /// List stored links sorted by interest, level, and type
    List {
        /// Maximum number of links to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one random stored link matching the given options
    Random {
        /// Required experience level
        #[arg(long)]
        level: String,

        /// Interest area
        #[arg(long)]
        interest: String,

        /// Resource type
        #[arg(long = "type")]
        resource_type: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Add {
                publish,
                contributor,
            } => add_links(publish, contributor).await,
            Commands::List { limit } => list_links(limit).await,
            Commands::Random {
                level,
                interest,
                resource_type,
            } => random_link(level, interest, resource_type).await,
            Commands::Config => show_config(),
        }
    }
}

/// Run one collection session: load vocabularies and store, collect
/// records until done, save, and optionally publish
async fn add_links(publish: bool, contributor: Option<String>) -> Result<()> {
    let config = ResolvedConfig::load()?;

    let vocabs = Vocabularies::load(&config)
        .await
        .context("Cannot start a session without the vocabulary files")?;
    let mut store = LinkStore::load(&config.store_path)
        .await
        .context("Cannot start a session without an existing link store")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let added = {
        let mut collector = Collector::new(stdin.lock(), stdout.lock(), &vocabs);
        collector
            .run(&mut store)
            .context("Collection session aborted")?
    };

    store.save(&config.store_path).await?;
    eprintln!(
        "✅ Saved {} new link(s) to {}",
        added,
        config.store_path.display()
    );

    if publish {
        let contributor = match contributor {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => prompt_contributor()?,
        };

        let publisher = Publisher::new(GitRunner, &config.publish);
        publisher.publish(&contributor, &config.store_path).await?;
        eprintln!("✅ Pushed branch {}", publisher.branch_name(&contributor));
    }

    Ok(())
}

/// Ask for the contributor name on the terminal until non-empty
fn prompt_contributor() -> Result<String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let name = prompt_nonempty(&mut stdin.lock(), &mut stdout.lock(), "your name")
        .context("Publishing needs a contributor name")?;
    Ok(name)
}

/// Print the stored links sorted by interest, then level, then type
async fn list_links(limit: Option<usize>) -> Result<()> {
    let config = ResolvedConfig::load()?;
    let store = LinkStore::load(&config.store_path).await?;

    if store.is_empty() {
        println!("Store is empty. Use 'linkstash add' to collect links.");
        return Ok(());
    }

    let mut records = store.sorted_by_options();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    println!(
        "{:<24} {:<8} {:<10} {:<40}",
        "INTEREST", "LEVEL", "TYPE", "TITLE"
    );
    println!("{}", "-".repeat(84));

    for record in &records {
        println!(
            "{:<24} {:<8} {:<10} {:<40}",
            record.options.interest, record.options.level, record.options.resource_type,
            record.title
        );
        println!("    {}", record.link);
    }

    println!("\nTotal: {} link(s)", store.len());
    Ok(())
}

/// Print one random stored link matching the given options
async fn random_link(level: String, interest: String, resource_type: String) -> Result<()> {
    let config = ResolvedConfig::load()?;
    let store = LinkStore::load(&config.store_path).await?;

    let wanted = LinkOptions::new(level, interest, resource_type);
    match store.random_matching(&wanted) {
        Some(record) => {
            println!("{}", record.title);
            println!("{}", record.link);
            Ok(())
        }
        None => anyhow::bail!("No link found matching {}", wanted),
    }
}

/// Show the resolved configuration
fn show_config() -> Result<()> {
    let config = ResolvedConfig::load()?;

    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Data:           {}", config.data_dir.display());
    println!("  Store:          {}", config.store_path.display());
    println!("  Levels:         {}", config.levels_path.display());
    println!("  Interests:      {}", config.interests_path.display());
    println!("  Resource types: {}", config.resource_types_path.display());
    println!();
    println!("Publish:");
    println!("  Remote:         {}", config.publish.remote);
    println!("  Branch suffix:  {}", config.publish.branch_suffix);

    Ok(())
}
