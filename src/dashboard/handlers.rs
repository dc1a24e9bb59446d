//! JSON handlers for the dashboard API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::DashboardState;
use crate::market::MarketSnapshot;
use crate::modules::{self, ModuleCard, ModuleConfig, ModuleSummary};
use crate::risk_controls::RiskControls;
use crate::system::SystemStatus;
use crate::views::{self, DashboardOverview};

pub async fn root_handler() -> Html<&'static str> {
    Html(include_str!("static/index.html"))
}

pub async fn health() -> impl IntoResponse {
    "OK"
}

pub async fn metrics_handler() -> impl IntoResponse {
    crate::metrics::render()
}

#[derive(Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub revision: u64,
    pub snapshot: Arc<MarketSnapshot>,
}

pub async fn snapshot_handler(State(state): State<DashboardState>) -> Json<SnapshotResponse> {
    let snapshot = state.store.get().await;
    Json(SnapshotResponse { revision: state.store.revision(), snapshot })
}

pub async fn overview_handler(State(state): State<DashboardState>) -> Json<DashboardOverview> {
    let snapshot = state.store.get().await;
    let modules = state.modules.read().await;
    let status = *state.system_status.read().await;
    Json(views::dashboard_overview(&snapshot, &modules, status))
}

#[derive(Serialize, Deserialize)]
pub struct ClockResponse {
    pub time: DateTime<Local>,
    pub display: String,
}

pub async fn clock_handler(State(state): State<DashboardState>) -> Json<ClockResponse> {
    let time = state.clock.get().await;
    Json(ClockResponse { time, display: time.format("%H:%M:%S").to_string() })
}

#[derive(Serialize, Deserialize)]
pub struct ModulesResponse {
    pub modules: Vec<ModuleCard>,
    pub summary: ModuleSummary,
}

impl From<&ModuleConfig> for ModulesResponse {
    fn from(config: &ModuleConfig) -> Self {
        Self {
            modules: config.modules.iter().map(ModuleCard::from).collect(),
            summary: config.summary(),
        }
    }
}

pub async fn modules_handler(State(state): State<DashboardState>) -> Json<ModulesResponse> {
    let config = state.modules.read().await;
    Json((&*config).into())
}

pub async fn toggle_module_handler(
    State(state): State<DashboardState>, Path(id): Path<String>,
) -> Json<ModulesResponse> {
    let mut config = state.modules.write().await;
    *config = modules::toggle_module(&config, &id);
    if let Some(m) = config.get(&id) {
        info!(module = %id, enabled = m.enabled, "module toggled");
        metrics::counter!("module_toggle_total", 1);
    }
    let response = ModulesResponse::from(&*config);
    metrics::gauge!("modules_enabled", response.summary.enabled as f64);
    Json(response)
}

#[derive(Serialize, Deserialize)]
pub struct PriorityRequest {
    pub priority: i64,
}

pub async fn module_priority_handler(
    State(state): State<DashboardState>, Path(id): Path<String>, Json(req): Json<PriorityRequest>,
) -> Json<ModulesResponse> {
    let mut config = state.modules.write().await;
    *config = modules::set_module_priority(&config, &id, req.priority);
    info!(module = %id, priority = req.priority, "module priority set");
    Json((&*config).into())
}

#[derive(Serialize, Deserialize)]
pub struct SystemResponse {
    pub status: SystemStatus,
    pub color: String,
}

impl From<SystemStatus> for SystemResponse {
    fn from(status: SystemStatus) -> Self {
        Self { status, color: status.color().to_string() }
    }
}

pub async fn system_handler(State(state): State<DashboardState>) -> Json<SystemResponse> {
    Json((*state.system_status.read().await).into())
}

pub async fn system_toggle_handler(State(state): State<DashboardState>) -> Json<SystemResponse> {
    let mut status = state.system_status.write().await;
    let next = status.toggle();
    *status = next;
    info!(status = %next, "system status changed");
    Json(next.into())
}

pub async fn risk_controls_handler(State(state): State<DashboardState>) -> Json<RiskControls> {
    Json(*state.risk_controls.read().await)
}

pub async fn risk_controls_update_handler(
    State(state): State<DashboardState>, Json(requested): Json<RiskControls>,
) -> Result<Json<RiskControls>, (StatusCode, String)> {
    let mut current = state.risk_controls.write().await;
    current.apply(requested).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    info!(tolerance_pct = current.tolerance_pct(), "risk controls applied");
    Ok(Json(*current))
}

pub async fn risk_controls_reset_handler(State(state): State<DashboardState>) -> Json<RiskControls> {
    let mut current = state.risk_controls.write().await;
    *current = state.default_risk_controls;
    Json(*current)
}
