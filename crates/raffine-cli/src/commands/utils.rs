use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use raffine_application::{Marketplace, SyncOutcome, UserContext};
use raffine_core::listing::ServiceListing;
use raffine_core::storage::LocalStorage;
use raffine_infrastructure::{AppConfig, FileStorage};
use raffine_interaction::{ApiClient, HttpAuthService, HttpCatalogService, HttpProfileService};

/// Everything a command needs, built from config and flags.
pub struct App {
    pub config: AppConfig,
    storage: Arc<dyn LocalStorage>,
    api: ApiClient,
}

impl App {
    pub fn load(api_url: Option<String>, storage: Option<PathBuf>) -> Result<Self> {
        let mut config = AppConfig::load().context("Failed to load configuration")?;
        if let Some(url) = api_url {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = storage {
            config.storage_path = Some(path);
        }

        let storage_path = config.storage_path()?;
        let storage = FileStorage::open(&storage_path)
            .with_context(|| format!("Failed to open local storage at {}", storage_path.display()))?;
        let api = ApiClient::from_config(&config);
        tracing::debug!(api_url = %config.api_url, storage = %storage_path.display(), "Configured");

        Ok(Self {
            config,
            storage: Arc::new(storage),
            api,
        })
    }

    pub fn marketplace(&self) -> Marketplace {
        Marketplace::new(Arc::new(HttpCatalogService::new(self.api.clone())))
    }

    /// Opens the user context without touching the network.
    pub fn user_context(&self) -> UserContext {
        UserContext::open(
            self.storage.clone(),
            Arc::new(HttpAuthService::new(self.api.clone())),
            Arc::new(HttpProfileService::new(self.api.clone())),
        )
    }

    /// Opens the user context and resumes a persisted session.
    pub async fn started_user_context(&self) -> UserContext {
        let mut ctx = self.user_context();
        if let SyncOutcome::ProfileUnavailable = ctx.start().await {
            eprintln!(
                "{}",
                "Could not reach your profile; working with the local copy.".yellow()
            );
        }
        ctx
    }
}

pub fn render_listing(index: Option<usize>, listing: &ServiceListing) {
    let (full, half) = listing.stars();
    let stars = format!("{}{}", "★".repeat(full as usize), if half { "½" } else { "" });
    let prefix = index.map(|i| format!("{:>3}. ", i)).unwrap_or_default();

    let mut price = listing.price.bold().to_string();
    if let Some(original) = &listing.original_price {
        price = format!("{} {}", price, original.strikethrough().bright_black());
    }

    println!(
        "{}{} {} {}",
        prefix,
        listing.name.bright_white().bold(),
        price,
        listing
            .badge
            .as_ref()
            .map(|b| format!("[{}]", b.text).magenta().to_string())
            .unwrap_or_default()
    );
    println!(
        "     {} {} ({} reviews)  {} / {}  {}",
        stars.yellow(),
        listing.rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string()),
        listing.reviews,
        listing.category,
        listing.service_type,
        format!("id: {}", listing.id).bright_black()
    );
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}
