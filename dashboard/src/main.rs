//! `backoffice` command line
//!
//! Mounts a dashboard page against the configured API and prints the rows it
//! loaded.
//!
//! ```text
//! backoffice companies --filter acme
//! backoffice reservations --event 4 --status reservado
//! ```

use backoffice_core::environment::SystemClock;
use backoffice_dashboard::api::rest::RestClient;
use backoffice_dashboard::entities::{Company, Event, Reservation, ReservationStatus, Role};
use backoffice_dashboard::list::ListEnvironment;
use backoffice_dashboard::navigation::TracingNavigator;
use backoffice_dashboard::notify::TracingNotifier;
use backoffice_dashboard::page::{PageAction, PageEnvironment, PageReducer, PageState};
use backoffice_dashboard::reservations::{
    ReservationsAction, ReservationsEnvironment, ReservationsReducer, ReservationsState,
};
use backoffice_dashboard::{DashboardConfig, EntityGateway, EntityId, Resource};
use backoffice_runtime::metrics::describe_store_metrics;
use backoffice_runtime::Store;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "backoffice=info,backoffice_dashboard=info,backoffice_runtime=warn";
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Backoffice administration from the terminal
#[derive(Debug, Parser)]
#[command(name = "backoffice", version, about)]
struct Cli {
    /// REST base URL (overrides BACKOFFICE_API_URL from .env)
    #[arg(long, env = "BACKOFFICE_API_URL", global = true)]
    api_url: Option<String>,

    /// Only print rows containing this text
    #[arg(long, global = true)]
    filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List companies
    Companies,
    /// List roles
    Roles,
    /// List reservations, optionally for one event
    Reservations {
        /// Event id
        #[arg(long)]
        event: Option<i64>,
        /// reservado, cancelado or completado
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
}

fn init_tracing(config: &DashboardConfig) {
    let filter = config
        .log_filter
        .as_deref()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// How long to wait for a mount and everything it triggers
fn settle_timeout(config: &DashboardConfig) -> Duration {
    config.request_timeout + Duration::from_secs(1)
}

async fn list_page<R: Resource>(
    gateway: Arc<dyn EntityGateway<R>>,
    config: &DashboardConfig,
    filter: Option<String>,
) -> Result<Vec<R>, Box<dyn Error>> {
    let env = PageEnvironment::new(
        gateway,
        Arc::new(TracingNotifier),
        Arc::new(TracingNavigator),
        Arc::new(SystemClock),
        config.failed_load,
    );
    let store = Store::new(PageState::<R>::new(), PageReducer::new(), env);

    let mut handle = store.send_cascading(PageAction::Mount { scope: None }).await?;
    handle.wait_with_timeout(settle_timeout(config)).await?;
    if let Some(filter) = filter {
        store.send(PageAction::SetFilter(filter)).await?;
    }

    let (rows, error) = store
        .state(|s| (s.list.visible().cloned().collect::<Vec<_>>(), s.list.last_error.clone()))
        .await;
    store.shutdown(SHUTDOWN_TIMEOUT).await?;

    match error {
        Some(error) => Err(format!("could not load {}: {error}", R::PATH).into()),
        None => Ok(rows),
    }
}

async fn list_reservations(
    client: &Arc<RestClient>,
    config: &DashboardConfig,
    event_id: Option<EntityId>,
    status: Option<ReservationStatus>,
    filter: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let clock = Arc::new(SystemClock);
    let page = PageEnvironment::<Reservation>::new(
        client.clone(),
        Arc::new(TracingNotifier),
        Arc::new(TracingNavigator),
        clock.clone(),
        config.failed_load,
    );
    let events = ListEnvironment::<Event>::new(client.clone(), clock, config.failed_load);
    let store = Store::new(
        ReservationsState::new(),
        ReservationsReducer::new(),
        ReservationsEnvironment::new(page, events),
    );

    let mut handle = store.send_cascading(ReservationsAction::Mount { event_id }).await?;
    handle.wait_with_timeout(settle_timeout(config)).await?;
    store.send(ReservationsAction::SetStatus(status)).await?;
    if let Some(filter) = filter {
        store.send(ReservationsAction::SetFilter(filter)).await?;
    }

    let (heading, rows, error) = store
        .state(|s| {
            (
                s.event_name().to_string(),
                s.visible().cloned().collect::<Vec<_>>(),
                s.page.list.last_error.clone(),
            )
        })
        .await;
    store.shutdown(SHUTDOWN_TIMEOUT).await?;

    if let Some(error) = error {
        return Err(format!("could not load reservations: {error}").into());
    }

    println!("Reservations for event: {heading}");
    for r in rows {
        println!(
            "{:>6}  {:<24}  {}  {:>3}  {:<20}  {:<10}  {}",
            r.id,
            r.name,
            r.reservation_datetime.format("%Y-%m-%d %H:%M"),
            r.people.map_or_else(|| "-".to_string(), |p| p.to_string()),
            r.person.names,
            r.station.name,
            r.status,
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = DashboardConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url)?;
    }

    init_tracing(&config);
    describe_store_metrics();
    tracing::info!(
        api_url = %config.api_url,
        failed_load = %config.failed_load,
        "Starting backoffice"
    );

    let client = Arc::new(RestClient::from_config(&config)?);

    match cli.command {
        Command::Companies => {
            let rows = list_page::<Company>(client, &config, cli.filter).await?;
            for company in rows {
                println!(
                    "{:>6}  [{}]  {}",
                    company.id,
                    company.avatar_initial(),
                    company.business_name
                );
            }
        },
        Command::Roles => {
            let rows = list_page::<Role>(client, &config, cli.filter).await?;
            for role in rows {
                println!("{:>6}  {}", role.id, role.name);
            }
        },
        Command::Reservations { event, status } => {
            list_reservations(&client, &config, event.map(EntityId::new), status, cli.filter)
                .await?;
        },
    }

    Ok(())
}
