pub mod skills;
pub mod training;
pub mod students;
pub mod planner;
pub mod repetition;
pub mod progress;
pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod cache;
pub mod state;

/// Initialize logging and load persisted plans into a fresh AppState.
/// Embedding applications call this once at startup.
pub async fn bootstrap() -> Result<state::app::AppState, error::CoachError> {
    logging::init_logging();
    tracing::info!("chesscoach starting");

    let app_state = state::app::AppState::new();

    let plans = planner::store::load_all_plans().await?;
    tracing::info!(count = plans.len(), "Training plans loaded");
    app_state.set_plans(plans);

    Ok(app_state)
}
