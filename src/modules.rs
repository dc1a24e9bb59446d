//! Feature-module configuration: the on/off panel of the dashboard.
//!
//! Modules are cosmetic; enabling one starts nothing. The record is built once
//! from [`seed_modules`] and only changes through [`toggle_module`] and
//! [`set_module_priority`]. Both return a new config and leave the input
//! untouched; an unknown id yields an unchanged copy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Active,
    Pending,
    Error,
}

impl ModuleStatus {
    /// Display colour for the status badge
    pub fn color(&self) -> &'static str {
        match self {
            | ModuleStatus::Active => "green",
            | ModuleStatus::Pending => "yellow",
            | ModuleStatus::Error => "red",
        }
    }

    /// Icon shown next to the status
    pub fn icon(&self) -> &'static str {
        match self {
            | ModuleStatus::Active => "check-circle",
            | ModuleStatus::Pending => "clock",
            | ModuleStatus::Error => "alert-circle",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub id: String,
    pub name: String,
    pub status: ModuleStatus,
    pub description: String,
    pub metrics: Vec<String>,
    pub enabled: bool,
    /// 1 = high, 2 = medium, 3 = low. Not range checked.
    pub priority: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModuleConfig {
    pub modules: Vec<Module>,
}

impl ModuleConfig {
    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn summary(&self) -> ModuleSummary {
        let count_status =
            |status: ModuleStatus| self.modules.iter().filter(|m| m.status == status).count();
        ModuleSummary {
            active: count_status(ModuleStatus::Active),
            pending: count_status(ModuleStatus::Pending),
            enabled: self.modules.iter().filter(|m| m.enabled).count(),
            total: self.modules.len(),
        }
    }
}

/// A module with its display lookups resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCard {
    #[serde(flatten)]
    pub module: Module,
    pub icon: String,
    pub status_color: String,
    pub status_icon: String,
}

impl From<&Module> for ModuleCard {
    fn from(module: &Module) -> Self {
        Self {
            icon: module_icon(&module.id).to_string(),
            status_color: module.status.color().to_string(),
            status_icon: module.status.icon().to_string(),
            module: module.clone(),
        }
    }
}

/// Counts shown in the module overview panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleSummary {
    pub active: usize,
    pub pending: usize,
    pub enabled: usize,
    pub total: usize,
}

fn update_module(config: &ModuleConfig, id: &str, f: impl Fn(&mut Module)) -> ModuleConfig {
    let mut next = config.clone();
    if let Some(module) = next.modules.iter_mut().find(|m| m.id == id) {
        f(module);
    }
    next
}

/// Copy of `config` with module `id` enabled flag flipped.
pub fn toggle_module(config: &ModuleConfig, id: &str) -> ModuleConfig {
    update_module(config, id, |m| m.enabled = !m.enabled)
}

/// Copy of `config` with module `id` set to `priority`.
pub fn set_module_priority(config: &ModuleConfig, id: &str, priority: i64) -> ModuleConfig {
    update_module(config, id, |m| m.priority = priority)
}

/// Icon name for a module id, `settings` for anything unmapped.
pub fn module_icon(id: &str) -> &'static str {
    match id {
        | "multi-asset-core" => "trending-up",
        | "strategy-swarm" | "market-brain" => "brain",
        | "onchain-integrator" => "wifi",
        | "guardian-angel" => "shield",
        | "data-retriever" => "database",
        | "websocket-hub" => "zap",
        | "mt4-mt5-bridge" | "ctrader-bridge" => "play",
        | _ => "settings",
    }
}

fn module(
    id: &str, name: &str, status: ModuleStatus, description: &str, metrics: &[&str],
    enabled: bool, priority: i64,
) -> Module {
    Module {
        id: id.into(),
        name: name.into(),
        status,
        description: description.into(),
        metrics: metrics.iter().map(|s| s.to_string()).collect(),
        enabled,
        priority,
    }
}

/// The fixed module list the process starts with.
pub fn seed_modules() -> ModuleConfig {
    use ModuleStatus::{Active, Pending};

    ModuleConfig {
        modules: vec![
            module(
                "multi-asset-core",
                "Multi-Asset Adaptive Core",
                Active,
                "24/7 market simulation across all asset classes",
                &["Volume", "Volatility", "Liquidity", "Correlation"],
                true,
                1,
            ),
            module(
                "strategy-swarm",
                "Sentient Strategy Swarm",
                Active,
                "Self-evolving trading strategies with genetic algorithms",
                &["Active Strategies", "Win Rate", "Evolution Cycles"],
                true,
                1,
            ),
            module(
                "onchain-integrator",
                "On-Chain Signal Integrator",
                Active,
                "Real-time blockchain data analysis and whale tracking",
                &["Whale Activity", "Funding Rates", "Network Health"],
                true,
                2,
            ),
            module(
                "guardian-angel",
                "Guardian Angel Risk Manager",
                Active,
                "AI-powered risk management and drawdown protection",
                &["Risk Score", "Drawdown", "VaR", "Kelly Criterion"],
                true,
                1,
            ),
            module(
                "data-retriever",
                "Data Retrieval Engine",
                Pending,
                "Multi-source data aggregation and normalization",
                &["Sources", "Latency", "Quality"],
                false,
                3,
            ),
            module(
                "websocket-hub",
                "WebSocket Connection Hub",
                Pending,
                "Real-time market data streaming and connection management",
                &["Connections", "Latency", "Uptime"],
                false,
                2,
            ),
            module(
                "strategy-importer",
                "Strategy Importer (SQL)",
                Pending,
                "Import and convert strategies from SQL databases",
                &["Imported", "Converted", "Active"],
                false,
                3,
            ),
            module(
                "mt4-mt5-bridge",
                "MetaTrader Bridge",
                Pending,
                "Execution layer for MT4/MT5 platforms",
                &["Connections", "Latency", "Orders"],
                false,
                2,
            ),
            module(
                "ctrader-bridge",
                "cTrader Bridge",
                Pending,
                "Execution layer for cTrader platform",
                &["Connections", "Latency", "Orders"],
                false,
                2,
            ),
            module(
                "market-brain",
                "Market Condition Brain",
                Pending,
                "AI system for market regime detection and strategy selection",
                &["Regime Accuracy", "Predictions", "Confidence"],
                false,
                1,
            ),
            module(
                "evolution-engine",
                "Evolution Engine",
                Pending,
                "Advanced genetic algorithms for strategy evolution",
                &["Generations", "Mutations", "Fitness"],
                false,
                1,
            ),
        ],
    }
}
