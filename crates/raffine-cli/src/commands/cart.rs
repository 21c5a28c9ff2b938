use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use raffine_application::UserContext;
use raffine_core::listing::ListingId;

use super::utils::{App, render_listing, success};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    List,
    /// Add one of a listing
    Add { id: String },
    /// Remove a listing entirely
    Remove { id: String },
    /// Set the quantity of a listing already in the cart; 0 removes it
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(app: &App, action: CartAction) -> Result<()> {
    let mut ctx = app.started_user_context().await;
    // Starting may have queued a push of kept-local state; flush it on every path.
    let result = apply(app, &mut ctx, action).await;
    ctx.settle().await;
    result?;
    print_cart(&ctx);
    Ok(())
}

async fn apply(app: &App, ctx: &mut UserContext, action: CartAction) -> Result<()> {
    match action {
        CartAction::List => {}
        CartAction::Add { id } => {
            let listing = app.marketplace().listing(&id.into()).await?;
            ctx.cart_mut().add(&listing);
            success(format!("Added {} to your cart", listing.name));
        }
        CartAction::Remove { id } => {
            ctx.cart_mut().remove(&id.into());
        }
        CartAction::Set { id, quantity } => {
            let id: ListingId = id.into();
            if quantity > 0 && ctx.cart().quantity_of(&id).is_none() {
                anyhow::bail!("{} is not in your cart", id);
            }
            ctx.cart_mut().set_quantity(&id, quantity);
        }
        CartAction::Clear => ctx.cart_mut().clear(),
    }
    Ok(())
}

fn print_cart(ctx: &UserContext) {
    let cart = ctx.cart();
    if cart.is_empty() {
        println!("{}", "Your cart is empty.".bright_black());
        return;
    }
    for (i, line) in cart.lines().iter().enumerate() {
        render_listing(Some(i + 1), &line.listing);
        println!("     {}", format!("quantity: {}", line.quantity).cyan());
    }
    println!("{}", format!("{} item(s)", cart.count()).bold());
}
