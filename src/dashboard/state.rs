//! Shared state behind the dashboard handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::modules::{self, ModuleConfig};
use crate::refresh::WallClock;
use crate::risk_controls::RiskControls;
use crate::store::SnapshotStore;
use crate::system::SystemStatus;

#[derive(Clone)]
pub struct DashboardState {
    pub store: SnapshotStore,
    pub clock: WallClock,
    pub modules: Arc<RwLock<ModuleConfig>>,
    pub system_status: Arc<RwLock<SystemStatus>>,
    pub risk_controls: Arc<RwLock<RiskControls>>,
    /// Values restored by the risk panel reset
    pub default_risk_controls: RiskControls,
}

impl DashboardState {
    /// State seeded with the fixed module list and an active system status.
    pub fn new(store: SnapshotStore, clock: WallClock, risk_controls: RiskControls) -> Self {
        Self {
            store,
            clock,
            modules: Arc::new(RwLock::new(modules::seed_modules())),
            system_status: Arc::new(RwLock::new(SystemStatus::default())),
            risk_controls: Arc::new(RwLock::new(risk_controls)),
            default_risk_controls: risk_controls,
        }
    }
}
