//! CLI administration tool for portfolio-site.
//!
//! Manages the site-wide default landing domain and inspects the portfolio
//! content without going through the admin panel.
//!
//! # Usage
//!
//! ```bash
//! # Show the effective default landing domain
//! cargo run --bin portfolio-admin -- landing show
//!
//! # Make new visitors land on the mechanical portfolio
//! cargo run --bin portfolio-admin -- landing set mechanical
//!
//! # Remove the override
//! cargo run --bin portfolio-admin -- landing reset
//!
//! # Summarize content for one domain
//! cargo run --bin portfolio-admin -- content show --domain cs
//!
//! # Write the content record as JSON (usable as CONTENT_PATH)
//! cargo run --bin portfolio-admin -- content export content.json
//! ```
//!
//! # Environment Variables
//!
//! - `PREFERENCES_PATH`: site preference file (default `data/preferences.json`)
//! - `DEFAULT_DOMAIN`: fallback when no override is set (default `cs`)
//! - `CONTENT_PATH`: alternative content file (default: built-in content)

use portfolio_site::application::services::DomainSelector;
use portfolio_site::domain::content_store::ContentStore;
use portfolio_site::domain::entities::PortfolioDomain;
use portfolio_site::infrastructure::preferences::FilePreferenceStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing portfolio-site.
#[derive(Parser)]
#[command(name = "portfolio-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the default landing domain
    Landing {
        #[command(subcommand)]
        action: LandingAction,
    },

    /// Inspect portfolio content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

/// Default landing subcommands.
#[derive(Subcommand)]
enum LandingAction {
    /// Show the effective default landing domain
    Show,

    /// Set the default landing domain
    Set {
        /// `cs` or `mechanical`
        domain: PortfolioDomain,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove the override and use DEFAULT_DOMAIN again
    Reset,
}

/// Content subcommands.
#[derive(Subcommand)]
enum ContentAction {
    /// Summarize the content of one or both domains
    Show {
        /// Only this domain
        #[arg(short, long)]
        domain: Option<PortfolioDomain>,
    },

    /// Write the full content record as JSON
    Export {
        /// Output file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Landing { action } => handle_landing_action(action)?,
        Commands::Content { action } => handle_content_action(action)?,
    }

    Ok(())
}

fn selector() -> Result<DomainSelector<FilePreferenceStore>> {
    let path = std::env::var("PREFERENCES_PATH")
        .unwrap_or_else(|_| "data/preferences.json".to_string());
    let fallback = match std::env::var("DEFAULT_DOMAIN") {
        Ok(value) if !value.is_empty() => value
            .parse::<PortfolioDomain>()
            .context("Invalid DEFAULT_DOMAIN")?,
        _ => PortfolioDomain::default(),
    };
    Ok(DomainSelector::new(
        Arc::new(FilePreferenceStore::new(path)),
        fallback,
    ))
}

/// Dispatches default landing commands.
fn handle_landing_action(action: LandingAction) -> Result<()> {
    let selector = selector()?;

    match action {
        LandingAction::Show => show_landing(&selector),
        LandingAction::Set { domain, yes } => set_landing(&selector, domain, yes)?,
        LandingAction::Reset => {
            selector
                .reset_default_landing()
                .map_err(|e| anyhow::anyhow!("Failed to reset default landing: {}", e))?;
            println!(
                "{} {}",
                "✅ Default landing reset to".green().bold(),
                selector.fallback().label().cyan()
            );
        }
    }

    Ok(())
}

fn show_landing(selector: &DomainSelector<FilePreferenceStore>) {
    println!("{}", "🧭 Default Landing".bright_blue().bold());
    println!();
    println!(
        "  Effective: {}",
        selector.get_default_landing().label().cyan().bold()
    );
    match selector.configured_default_landing() {
        Some(domain) => println!("  Override:  {}", domain.as_str().bright_yellow()),
        None => println!("  Override:  {}", "none".bright_black()),
    }
    println!("  Fallback:  {}", selector.fallback().as_str().bright_black());
    println!();
}

/// Sets the override after confirmation (unless `--yes`).
fn set_landing(
    selector: &DomainSelector<FilePreferenceStore>,
    domain: PortfolioDomain,
    skip_confirm: bool,
) -> Result<()> {
    let current = selector.get_default_landing();
    if current == domain && selector.configured_default_landing().is_some() {
        println!(
            "{}",
            format!("⚠️  Default landing is already {}", domain.label()).yellow()
        );
        return Ok(());
    }

    println!("  From: {}", current.label().bright_black());
    println!("  To:   {}", domain.label().cyan().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Change the default landing for new visitors?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    selector
        .set_default_landing(domain)
        .map_err(|e| anyhow::anyhow!("Failed to set default landing: {}", e))?;

    println!("{}", "✅ Default landing updated!".green().bold());
    Ok(())
}

fn content_store() -> Result<ContentStore> {
    match std::env::var("CONTENT_PATH") {
        Ok(path) if !path.is_empty() => ContentStore::from_json_file(path),
        _ => Ok(ContentStore::builtin()),
    }
}

/// Dispatches content commands.
fn handle_content_action(action: ContentAction) -> Result<()> {
    let store = content_store()?;

    match action {
        ContentAction::Show { domain } => {
            let personal = store.personal();
            println!("{}", "📄 Portfolio Content".bright_blue().bold());
            println!();
            println!("  {} ({})", personal.name.cyan().bold(), personal.title);
            println!("  {}", personal.email.bright_black());
            println!();

            let domains: Vec<PortfolioDomain> = match domain {
                Some(d) => vec![d],
                None => PortfolioDomain::ALL.to_vec(),
            };
            for domain in domains {
                print_domain(&store, domain);
            }
        }
        ContentAction::Export { path } => {
            let json = serde_json::to_string_pretty(&store.snapshot())?;
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {}",
                "✅ Content exported to".green().bold(),
                path.display().to_string().cyan()
            );
        }
    }

    Ok(())
}

fn print_domain(store: &ContentStore, domain: PortfolioDomain) {
    let content = store.domain(domain);

    println!("{}", domain.label().bright_white().bold());
    println!("  {}", content.tagline.bright_black());
    println!(
        "  {:<22} {}",
        "Skills:",
        content.skill_count().to_string().bright_white()
    );
    println!(
        "  {:<22} {}",
        "Projects:",
        content.projects.len().to_string().bright_white()
    );
    for project in &content.projects {
        println!("    • {}", project.title.cyan());
    }
    println!(
        "  {:<22} {}",
        "Additional projects:",
        content.additional_projects.len().to_string().bright_white()
    );
    if content.has_achievements() {
        println!(
            "  {:<22} {} publications, {} detailed projects, {} patents",
            "Achievements:",
            content.publications.len(),
            content.detailed_projects.len(),
            content.patents.len()
        );
    }
    println!(
        "  {:<22} {}",
        "Experience entries:",
        store.experience(domain).len().to_string().bright_white()
    );
    println!(
        "  {:<22} {}",
        "Resume:",
        store.resume_file_name(domain).bright_black()
    );
    println!();
}
