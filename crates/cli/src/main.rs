//! GreenCart CLI - Drive the cart store against a live backend.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with its count and total
//! greencart cart
//!
//! # Add one unit of a product
//! greencart add 6650a1f2c3
//!
//! # Set a quantity (0 removes the item)
//! greencart set 6650a1f2c3 4
//!
//! # Remove one unit
//! greencart remove 6650a1f2c3
//!
//! # List the catalog
//! greencart products
//!
//! # Show the current session
//! greencart whoami
//! ```
//!
//! Configuration comes from the environment; see `greencart_client::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use greencart_client::ClientConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "greencart")]
#[command(author, version, about = "GreenCart cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart contents, item count and total
    Cart,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: String,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product ID
        product_id: String,

        /// New quantity (0 or less removes the item)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove one unit of a product
    Remove {
        /// Product ID
        product_id: String,
    },
    /// List products in the catalog
    Products,
    /// Show the current session and seller status
    Whoami,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter` and, when enabled, the Sentry layer.
fn init_tracing(with_sentry: bool) {
    // Defaults to warn for dependencies and info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,greencart_client=info,greencart=info".into());

    let sentry_layer =
        with_sentry.then(|| sentry_tracing::layer().event_filter(sentry_event_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing(sentry_guard.is_some());

    if let Err(e) = commands::run(cli.command, config).await {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}
