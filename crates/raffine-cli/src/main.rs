use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{account, browse, cart, favorites};

#[derive(Parser)]
#[command(name = "raffine")]
#[command(about = "Raffine - browse, favorite and book beauty and wellness services", long_about = None)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Local storage document to use instead of the default
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog with filters and sorting
    Browse(browse::BrowseArgs),
    /// Show one listing
    Show {
        /// Listing id
        id: String,
    },
    /// Sign in
    Login(account::LoginArgs),
    /// Create an account and sign in
    Register(account::RegisterArgs),
    /// Sign out (the local cart and favorites are kept)
    Logout,
    /// Show who is signed in
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: cart::CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: favorites::FavoritesAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let app = commands::utils::App::load(cli.api_url, cli.storage)?;

    match cli.command {
        Commands::Browse(args) => browse::run(&app, args).await?,
        Commands::Show { id } => browse::show(&app, &id).await?,
        Commands::Login(args) => account::login(&app, args).await?,
        Commands::Register(args) => account::register(&app, args).await?,
        Commands::Logout => account::logout(&app).await?,
        Commands::Whoami => account::whoami(&app)?,
        Commands::Cart { action } => cart::run(&app, action).await?,
        Commands::Favorites { action } => favorites::run(&app, action).await?,
    }

    Ok(())
}
