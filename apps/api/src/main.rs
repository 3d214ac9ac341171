use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use outreach::client::api::ApiClient;
use outreach::client::filter::{distinct_business_types, distinct_cities, ContactFilter};
use outreach::client::render::{render_card, render_stats};
use outreach::client::session::ClientSession;
use outreach::config::Config;
use outreach::contacts::export::export_json;
use outreach::contacts::import::import_csv;
use outreach::contacts::memory::MemoryContactStore;
use outreach::contacts::service::DEFAULT_LIMIT;
use outreach::contacts::store::{ContactStore, PgContactStore};
use outreach::db::{create_pool, ensure_schema};
use outreach::models::contact::StatusField;
use outreach::routes::build_router;
use outreach::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "outreach", version, about = "Outreach lead tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Serve an exported JSON snapshot from memory instead of PostgreSQL.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Load leads from a CSV file into the database.
    Import {
        csv: PathBuf,
        /// Delete all existing contacts first.
        #[arg(long)]
        reset: bool,
    },
    /// Dump every contact to a JSON array file.
    Export { output: PathBuf },
    /// Fetch a page from a running API and print it.
    Browse {
        #[arg(long)]
        api: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long = "type", default_value = "")]
        business_type: String,
        /// Print both email drafts under each card.
        #[arg(long)]
        drafts: bool,
    },
    /// Flip a contact's status field between unset and today.
    Toggle {
        #[arg(long)]
        api: Option<String>,
        #[arg(long)]
        id: i32,
        /// initialContact or followUp
        #[arg(long)]
        field: StatusField,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Serve { snapshot } => serve(config, snapshot).await,
        Command::Import { csv, reset } => {
            let store = connect(&config).await?;
            let report = import_csv(&store, &csv, reset).await?;
            println!("Inserted: {} (skipped {})", report.inserted, report.skipped);
            Ok(())
        }
        Command::Export { output } => {
            let store = connect(&config).await?;
            let count = export_json(&store, &output).await?;
            println!("Exported {count} contacts");
            Ok(())
        }
        Command::Browse {
            api,
            page,
            limit,
            search,
            city,
            business_type,
            drafts,
        } => {
            let filter = ContactFilter {
                search,
                city,
                business_type,
            };
            browse(api.unwrap_or(config.api_url), page, limit, filter, drafts).await
        }
        Command::Toggle {
            api,
            id,
            field,
            limit,
        } => toggle(api.unwrap_or(config.api_url), id, field, limit).await,
    }
}

async fn connect(config: &Config) -> Result<PgContactStore> {
    let pool = create_pool(config.require_database_url()?).await?;
    ensure_schema(&pool).await?;
    Ok(PgContactStore::new(pool))
}

async fn serve(config: Config, snapshot: Option<PathBuf>) -> Result<()> {
    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ContactStore> = match snapshot {
        Some(path) => {
            let store = MemoryContactStore::from_json_file(&path)?;
            info!(
                "Serving snapshot {} ({} contacts)",
                path.display(),
                store.count().await?
            );
            Arc::new(store)
        }
        None => Arc::new(connect(&config).await?),
    };

    let state = AppState::new(store, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn browse(
    api_url: String,
    page: u32,
    limit: u32,
    filter: ContactFilter,
    drafts: bool,
) -> Result<()> {
    let mut session = ClientSession::new(ApiClient::new(api_url), limit);
    session
        .load_page(page)
        .await
        .with_context(|| format!("failed to load page {page}"))?;

    let loaded = session.loaded();
    println!("Cities: {}", distinct_cities(loaded.iter().copied()).join(", "));
    println!(
        "Types: {}",
        distinct_business_types(loaded.iter().copied()).join(", ")
    );

    let shown = session.filtered(&filter);
    println!("{}\n", render_stats(&session.stats(), shown.len()));
    if shown.is_empty() {
        println!("No leads found");
    }
    for contact in &shown {
        println!("{}", render_card(contact, drafts));
    }
    if let Some(p) = session.pagination() {
        println!("Page {} of {}", p.page, p.total_pages);
    }
    Ok(())
}

async fn toggle(api_url: String, id: i32, field: StatusField, limit: u32) -> Result<()> {
    let mut session = ClientSession::new(ApiClient::new(api_url), limit);

    // Walk pages until the contact is loaded.
    let mut page = 1;
    while session.find(id).is_none() {
        session.load_page(page).await?;
        match session.pagination() {
            Some(p) if p.has_more => page += 1,
            _ => break,
        }
    }

    let edit = session.toggle(id, field).await?;
    println!(
        "Contact {id} {field} is now {}",
        edit.update.value.as_deref().unwrap_or("unset")
    );
    Ok(())
}
