//! `ims-console` - command line front end of the inventory console
//!
//! Runs the same page view-models as the interactive console against the
//! configured backend. The session is kept in `IMS_SESSION_FILE` between runs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ims_client::{FileSessionStore, ImsClient, NetworkHttpClient, SessionContext};
use ims_console::logger::init_logger;
use ims_console::pages::{AuthPage, CountState, DashboardPage, HomePage, InventoryPage, Route};
use ims_console::scanner::{ResourceResolver, ScanResultView};
use ims_console::{ConsoleConfig, Notifier, ToastLevel};

#[derive(Parser, Debug)]
#[command(name = "ims-console", about = "Inventory management console")]
struct Cli {
    /// Backend base URL (overrides IMS_API_BASE_URL).
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the session.
    Login {
        #[arg(long, short = 'u')]
        username: String,
        #[arg(long, short = 'p', env = "IMS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the stored session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// List resources.
    Resources {
        /// Case-insensitive search over every column.
        #[arg(long, short = 's', default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Resource counts by specification, type, model and brand.
    Dashboard,

    /// Look up the resource behind a scanned code.
    Resolve { code: String },

    /// Save the barcode image of a resource.
    Barcode {
        resource_id: String,
        /// Output file (PNG).
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ConsoleConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    init_logger(&config.log_level, config.log_json)?;

    let session = SessionContext::restore(Arc::new(FileSessionStore::new(&config.session_file)));
    let client = ImsClient::connect(&config.client_config(), session.clone())
        .context("Failed to create HTTP client")?;
    let notifier = Notifier::new();

    let result = run(cli.command, &config, client, &notifier).await;

    for toast in notifier.drain() {
        match toast.level {
            ToastLevel::Error => eprintln!("error: {}", toast.message),
            ToastLevel::Success | ToastLevel::Info => eprintln!("{}", toast.message),
        }
    }
    result
}

async fn run(
    command: Commands,
    config: &ConsoleConfig,
    client: ImsClient<NetworkHttpClient>,
    notifier: &Notifier,
) -> anyhow::Result<()> {
    match command {
        Commands::Login { username, password } => {
            let mut page = AuthPage::new(client, notifier.clone());
            match page.login(&username, &password).await {
                Some(Route::Admin) => println!("Signed in as administrator"),
                Some(_) => println!("Signed in"),
                None => anyhow::bail!("Login failed"),
            }
        }

        Commands::Logout => {
            AuthPage::new(client, notifier.clone()).logout();
        }

        Commands::Whoami => {
            let session = client.session().clone();
            match session.role() {
                Some(role) => println!("{} ({})", HomePage::new(session).greeting(), role),
                None => println!("Not signed in"),
            }
        }

        Commands::Resources { search, page } => {
            let mut inventory =
                InventoryPage::new(client, notifier.clone()).with_page_size(config.page_size);
            inventory.mount().await?;
            let list = inventory.list_mut();
            list.set_search(search);
            list.set_page(page);

            let visible = list.visible();
            for r in &visible.items {
                println!(
                    "{:<8} {:<12} {:<20} {:<16} {:<14} {}",
                    r.resource_id,
                    r.brand,
                    r.model,
                    r.serial_number,
                    r.resource_status,
                    r.resource_type
                );
            }
            println!(
                "page {}/{} ({} matching)",
                visible.page, visible.total_pages, visible.total
            );
        }

        Commands::Dashboard => {
            let mut dashboard = DashboardPage::new(client);
            dashboard.load().await;
            for (dimension, state) in dashboard.counts() {
                println!("[{}]", dimension.path_suffix());
                match state {
                    CountState::Loaded(entries) => {
                        for entry in entries {
                            println!("  {:<30} {}", entry.name, entry.count);
                        }
                    }
                    CountState::Error(message) => println!("  error: {}", message),
                    CountState::Idle => println!("  -"),
                }
            }
        }

        Commands::Resolve { code } => {
            let resolver = ResourceResolver::new(client);
            resolver.resolve(&code).await;
            let view = ScanResultView::from(&resolver.state());
            println!("{}", view);
            if matches!(view, ScanResultView::Failed { .. }) {
                anyhow::bail!("Lookup failed");
            }
        }

        Commands::Barcode { resource_id, out } => {
            let inventory = InventoryPage::new(client, notifier.clone());
            let png = inventory.barcode(&resource_id).await?;
            tokio::fs::write(&out, &png)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Barcode saved to {}", out.display());
        }
    }
    Ok(())
}
