//! Larek CLI - catalog browsing and order submission against a live API.
//!
//! # Usage
//!
//! ```bash
//! # List the product catalog
//! larek catalog list
//!
//! # Show a single product
//! larek catalog show -i 854cef69-976d-4c2a-a18c-2aa45046c390
//!
//! # Submit an order
//! larek order submit \
//!     -p online -a "Spasskaya tower, Red Square" \
//!     -e dev@larek.store -n 89991234567 \
//!     --item 854cef69-976d-4c2a-a18c-2aa45046c390
//! ```
//!
//! # Commands
//!
//! - `catalog` - Browse the product catalog
//! - `order` - Submit orders
//!
//! # Environment Variables
//!
//! - `LAREK_API_URL` - Base URL of the order API
//! - `LAREK_CDN_URL` - Base URL for product images

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "larek")]
#[command(author, version, about = "Larek storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Submit orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products in server order
    List,
    /// Show a single product by id
    Show {
        /// Product id
        #[arg(short, long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Submit an order for the given items
    Submit {
        /// Payment method (`online` or `cash`)
        #[arg(short, long, default_value = "online")]
        payment: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Contact phone number
        #[arg(short = 'n', long)]
        phone: String,

        /// Product id to order (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
            CatalogAction::Show { id } => commands::catalog::show(&id).await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Submit {
                payment,
                address,
                email,
                phone,
                items,
            } => {
                commands::order::submit(&payment, &address, &email, &phone, &items).await?;
            }
        },
    }
    Ok(())
}
