use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use raffine_application::UserContext;
use raffine_core::listing::ListingId;

use super::utils::{App, render_listing};

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// Show favorites
    List,
    /// Add or remove a listing
    Toggle { id: String },
}

pub async fn run(app: &App, action: FavoritesAction) -> Result<()> {
    let mut ctx = app.started_user_context().await;
    // Starting may have queued a push of kept-local state; flush it on every path.
    let result = apply(app, &mut ctx, action).await;
    ctx.settle().await;
    result?;

    if ctx.favorites().is_empty() {
        println!("{}", "No favorites yet.".bright_black());
    }
    for (i, listing) in ctx.favorites().items().iter().enumerate() {
        render_listing(Some(i + 1), listing);
    }
    Ok(())
}

async fn apply(app: &App, ctx: &mut UserContext, action: FavoritesAction) -> Result<()> {
    if let FavoritesAction::Toggle { id } = action {
        let id: ListingId = id.into();
        let listing = match ctx.favorites().items().iter().find(|l| l.id == id) {
            Some(listing) => listing.clone(),
            None => app.marketplace().listing(&id).await?,
        };
        let now_favorite = ctx.favorites_mut().toggle(&listing);
        let verb = if now_favorite { "Saved" } else { "Removed" };
        println!("{} {}", verb.green(), listing.name);
    }
    Ok(())
}
