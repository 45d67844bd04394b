//! Custom-PC build configurator
//!
//! Computes price totals, budget fit and derived performance metrics
//! (cooling score, FPS, render time) for a chosen set of components.

mod catalog;
mod engine;
mod log;
mod models;

use ::log::warn;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::catalog::Catalog;
use crate::engine::{QuoteError, apply_profile, compute_quote};
use crate::models::{Category, Quote, Selection};

/// Profile used when none is given or the given name is unknown
const DEFAULT_PROFILE: &str = "gaming";

#[derive(Parser)]
#[command(name = "rig-configurator")]
#[command(about = "Custom PC build configurator and quote calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a quote for a build
    Quote {
        /// Build profile to start from (gaming, creator, pro)
        #[arg(short, long, default_value = DEFAULT_PROFILE)]
        profile: String,

        /// Override the profile's CPU choice
        #[arg(long)]
        cpu: Option<String>,

        /// Override the profile's GPU choice
        #[arg(long)]
        gpu: Option<String>,

        /// Override the profile's RAM choice
        #[arg(long)]
        ram: Option<String>,

        /// Override the profile's storage choice
        #[arg(long)]
        storage: Option<String>,

        /// Replace the profile's extras (repeatable)
        #[arg(short, long = "extra")]
        extras: Option<Vec<String>>,

        /// Override the profile's budget
        #[arg(short, long)]
        budget: Option<u64>,
    },

    /// List all components by category
    ListComponents,

    /// List all optional extras
    ListExtras,

    /// List the named build profiles
    Profiles,

    /// Show details for a specific component
    Component {
        /// Component category
        #[arg(value_enum)]
        category: Category,

        /// Component ID
        id: String,
    },
}

fn main() -> Result<()> {
    log::init()?;
    let cli = Cli::parse();
    let catalog = Catalog::builtin();

    match cli.command {
        Commands::Quote {
            profile,
            cpu,
            gpu,
            ram,
            storage,
            extras,
            budget,
        } => {
            let mut selection = resolve_profile_selection(&profile, &catalog)?;

            let overrides = [
                (Category::Cpu, cpu),
                (Category::Gpu, gpu),
                (Category::Ram, ram),
                (Category::Storage, storage),
            ];
            for (category, id) in overrides {
                if let Some(id) = id {
                    selection.components.insert(category, id);
                }
            }
            if let Some(extras) = extras {
                selection.extras = extras.into_iter().collect();
            }
            if let Some(budget) = budget {
                selection.budget = budget;
            }

            match compute_quote(&selection, &catalog) {
                Ok(quote) => print_quote(&quote, &selection),
                Err(QuoteError::IncompleteSelection { category }) => {
                    println!(
                        "Selection incomplete: no valid {} chosen. \
                         Run 'list-components' to see the available ids.",
                        category
                    );
                }
            }
        }

        Commands::ListComponents => {
            for category in Category::ALL {
                println!("{}:", category);
                println!("{:<14} {:<26} {:>12} {:>8}", "ID", "Name", "Price", "TDP (W)");
                println!("{}", "-".repeat(64));
                for option in catalog.options(category) {
                    println!(
                        "{:<14} {:<26} {:>12} {:>8.0}",
                        option.id,
                        option.display_name,
                        format_currency(option.price),
                        option.tdp
                    );
                }
                println!();
            }
        }

        Commands::ListExtras => {
            println!(
                "{:<10} {:<22} {:>12} {:>9} {:>9}",
                "ID", "Name", "Price", "Cooling", "Render"
            );
            println!("{}", "-".repeat(66));
            for extra in catalog.extras() {
                println!(
                    "{:<10} {:<22} {:>12} {:>+9.0} {:>+9.0}",
                    extra.id,
                    extra.display_name,
                    format_currency(extra.price),
                    extra.cooling_effect,
                    extra.render_effect
                );
            }
        }

        Commands::Profiles => {
            for (name, profile) in catalog.profiles() {
                println!("{} (budget {})", name, format_currency(profile.budget));
                for category in Category::ALL {
                    if let Some(id) = profile.components.get(&category) {
                        println!("  {}: {}", category, id);
                    }
                }
                if !profile.extras.is_empty() {
                    let extras: Vec<&str> = profile.extras.iter().map(String::as_str).collect();
                    println!("  Extras: {}", extras.join(", "));
                }
                println!();
            }
        }

        Commands::Component { category, id } => {
            if let Some(option) = catalog.lookup(category, &id) {
                println!("{}: {}", category, option.display_name);
                println!("  ID: {}", option.id);
                println!("  Price: {}", format_currency(option.price));
                if option.tdp > 0.0 {
                    println!("  TDP: {}W", option.tdp);
                }
            } else {
                println!("{} '{}' not found", category, id);
            }
        }
    }

    Ok(())
}

/// Materialize the requested profile, falling back to the default one for
/// unknown names.
fn resolve_profile_selection(name: &str, catalog: &Catalog) -> Result<Selection> {
    if let Some(selection) = apply_profile(name, catalog) {
        return Ok(selection);
    }
    warn!("unknown profile {name:?}, falling back to {DEFAULT_PROFILE:?}");
    apply_profile(DEFAULT_PROFILE, catalog).context("default profile missing from catalog")
}

/// Render a quote the way the sales page summary does: budget fit first,
/// then one row per category, then total and metrics.
fn print_quote(quote: &Quote, selection: &Selection) {
    if quote.budget_delta >= 0 {
        println!(
            "Within budget: {} to spare",
            format_currency(quote.budget_delta as u64)
        );
    } else {
        println!(
            "Over budget by {}",
            format_currency(quote.budget_delta.unsigned_abs())
        );
    }
    println!();

    for item in &quote.line_items {
        println!("  {:<10} {}", item.label, item.value);
    }
    println!();

    println!("Total:  {}", format_currency(quote.total));
    println!("Budget: {}", format_currency(selection.budget));
    println!();

    match &quote.metrics {
        Some(metrics) => {
            println!("Cooling score: {:.0}%", metrics.cooling_score_percent);
            println!("Expected FPS:  {}", metrics.fps_estimate);
            println!("Render time:   {} min", metrics.render_time_minutes);
        }
        None => println!("Performance metrics unavailable for this configuration"),
    }
}

/// Format a price the way the sales page does: rounded to the nearest
/// hundred, space-separated thousands, rouble sign.
fn format_currency(value: u64) -> String {
    let rounded = (value + 50) / 100 * 100;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped.push_str(" ₽");
    grouped
}
