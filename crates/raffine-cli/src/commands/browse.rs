use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::str::FromStr;

use raffine_core::browse::{FilterState, SortOrder};

use super::utils::{App, render_listing};

#[derive(Args)]
pub struct BrowseArgs {
    /// Case-insensitive text matched against name, description and category
    #[arg(short, long)]
    search: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    /// Service type to include; repeatable
    #[arg(long = "type")]
    service_types: Vec<String>,

    /// Minimum rating to accept; repeatable, any match passes
    #[arg(long = "min-rating")]
    min_ratings: Vec<f64>,

    /// recommended, price-asc, price-desc or top-rated
    #[arg(long, default_value = "recommended")]
    sort: String,

    /// Number of pages to reveal
    #[arg(long, default_value_t = 1)]
    pages: usize,

    /// Start from the storefront sidebar preset
    #[arg(long)]
    storefront: bool,
}

impl BrowseArgs {
    fn filters(&self) -> FilterState {
        let mut filters = if self.storefront {
            FilterState::storefront()
        } else {
            FilterState::default()
        };
        if self.min_price.is_some() || self.max_price.is_some() {
            filters = filters.with_price(
                self.min_price.unwrap_or(f64::NEG_INFINITY),
                self.max_price.unwrap_or(f64::INFINITY),
            );
        }
        for service_type in &self.service_types {
            filters = filters.with_service_type(service_type.clone());
        }
        for threshold in &self.min_ratings {
            filters = filters.with_min_rating(*threshold);
        }
        filters
    }
}

pub async fn run(app: &App, args: BrowseArgs) -> Result<()> {
    let sort = SortOrder::from_str(&args.sort)
        .with_context(|| format!("Unknown sort order '{}'", args.sort))?;
    let mut session = app
        .marketplace()
        .open(args.filters(), sort)
        .await
        .context("Failed to fetch services")?;

    if let Some(search) = &args.search {
        session.set_search(search.clone());
    }
    if let Some(category) = &args.category {
        session.select_category(category.clone());
    }
    for _ in 1..args.pages {
        session.load_more();
    }

    println!("{}", session.summary().bright_cyan());
    println!("{}", format!("Sorted by {}", session.sort()).bright_black());
    for (i, listing) in session.visible().into_iter().enumerate() {
        render_listing(Some(i + 1), listing);
    }
    if session.has_more() {
        println!(
            "{}",
            format!("More results available; rerun with --pages {}", args.pages + 1).bright_black()
        );
    }
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    let listing = app.marketplace().listing(&id.into()).await?;
    render_listing(None, &listing);
    if !listing.description.is_empty() {
        println!("\n{}", listing.description);
    }
    Ok(())
}
