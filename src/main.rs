//! Wiring & DI. Entry point: load config, build the store and service, run the UI.
//! No business logic here.

use classsync::adapters::persistence::JsonClassStore;
use classsync::adapters::ui::tui::TuiInputPort;
use classsync::domain::TimetableLayout;
use classsync::ports::{ClassStore, InputPort};
use classsync::shared::config::AppConfig;
use classsync::usecases::ScheduleService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    classsync::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "could not read configuration, using defaults");
        AppConfig::default()
    });

    // --- Timetable window (validated once; layout itself never fails) ---
    let layout = TimetableLayout::new(cfg.layout_config())?;
    info!(
        start_hour = layout.config().start_hour,
        end_hour = layout.config().end_hour,
        hour_height_px = layout.config().hour_height_px,
        "timetable window"
    );

    // --- Schedule store ---
    let schedule_path = cfg.schedule_path();
    let store: Arc<dyn ClassStore> = Arc::new(JsonClassStore::open(&schedule_path).await?);

    // --- Services ---
    let schedule_service = Arc::new(ScheduleService::new(Arc::clone(&store), layout));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(schedule_service));

    // --- Run (main menu -> classes / timetable) ---
    input_port.run().await?;

    info!("bye");
    Ok(())
}
