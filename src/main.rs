//! PayPal Digital Goods admin CLI
//!
//! Inspects checkouts, transactions and recurring payments profiles, and
//! changes profile status. Credentials and settings come from the
//! environment (or a `.env` file), see [`Config::from_env`].
//!
//! ```bash
//! paypal-dg checkout-url EC-0TD95475M3219592N
//! paypal-dg checkout-details EC-0TD95475M3219592N
//! paypal-dg transaction-details 6GA2846573851864T
//! paypal-dg profile-details I-M0WXE0SLRVRY
//! paypal-dg manage-profile I-M0WXE0SLRVRY cancel --note "Requested by customer"
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use paypal_digital_goods::modules::checkout::Checkout;
use paypal_digital_goods::subscriptions::StatusAction;
use paypal_digital_goods::{Config, DigitalGoods, Purchase, PurchaseDetails};
use paypal_digital_goods::{Subscription, SubscriptionDetails};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "paypal-dg")]
#[command(about = "PayPal Digital Goods administration utility", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print every response field under its human-friendly name instead of the typed view
    #[arg(long, global = true)]
    raw: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the in-context checkout URL for a token
    CheckoutUrl {
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Show buyer and checkout state for a token (GetExpressCheckoutDetails)
    CheckoutDetails {
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Show a completed purchase (GetTransactionDetails)
    TransactionDetails {
        #[arg(value_name = "TRANSACTION_ID")]
        transaction_id: String,
    },

    /// Show a recurring payments profile (GetRecurringPaymentsProfileDetails)
    ProfileDetails {
        #[arg(value_name = "PROFILE_ID")]
        profile_id: String,
    },

    /// Cancel, suspend or reactivate a recurring payments profile
    ManageProfile {
        #[arg(value_name = "PROFILE_ID")]
        profile_id: String,

        /// cancel, suspend or reactivate
        #[arg(value_name = "ACTION")]
        action: StatusAction,

        /// Reason shown to the subscriber
        #[arg(long)]
        note: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load PayPal configuration")?;
    init_tracing();

    config.validate().context("Configuration validation failed")?;

    tracing::debug!(
        environment = %config.environment(),
        endpoint = %config.endpoint(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::CheckoutUrl { token } => {
            println!("{}", config.checkout_url(&token));
        }
        Commands::CheckoutDetails { token } => {
            let mut checkout = Checkout::new(config)?;
            checkout.resume(token, None);
            let details = checkout.checkout_details().await?;
            print_json(cli.raw, &details, &details.raw)?;
        }
        Commands::TransactionDetails { transaction_id } => {
            let purchase = Purchase::new(config, PurchaseDetails::new(Decimal::ONE))?;
            let details = purchase.get_details(&transaction_id).await?;
            print_json(cli.raw, &details, &details.raw)?;
        }
        Commands::ProfileDetails { profile_id } => {
            let subscription = Subscription::new(config, SubscriptionDetails::default())?;
            let details = subscription.get_details(&profile_id).await?;
            print_json(cli.raw, &details, &details.raw)?;
        }
        Commands::ManageProfile {
            profile_id,
            action,
            note,
        } => {
            let subscription = Subscription::new(config, SubscriptionDetails::default())?;
            let changed = subscription
                .manage_subscription_status(&profile_id, action, note.as_deref())
                .await?;
            print_json(cli.raw, &changed, &changed.raw)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine readable
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| "paypal_digital_goods=info,paypal_dg=info".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json<T: Serialize>(
    raw: bool,
    view: &T,
    response: &paypal_digital_goods::modules::nvp::NvpResponse,
) -> anyhow::Result<()> {
    let output = if raw {
        serde_json::to_string_pretty(&response.humanize())?
    } else {
        serde_json::to_string_pretty(view)?
    };
    println!("{}", output);
    Ok(())
}
