//! Market/portfolio snapshot records.
//!
//! Field names serialize in camelCase so the JSON matches what the dashboard
//! front end reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset class tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Forex,
    Crypto,
    Indices,
    Commodities,
}

impl AssetClass {
    /// All classes in snapshot order.
    pub const ALL: [AssetClass; 4] =
        [AssetClass::Forex, AssetClass::Crypto, AssetClass::Indices, AssetClass::Commodities];

    pub fn as_str(&self) -> &'static str {
        match self {
            | AssetClass::Forex => "forex",
            | AssetClass::Crypto => "crypto",
            | AssetClass::Indices => "indices",
            | AssetClass::Commodities => "commodities",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One quoted instrument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
}

impl AssetQuote {
    pub fn new(symbol: &str, price: f64, change: f64, change_percent: f64, volume: f64) -> Self {
        Self { symbol: symbol.to_string(), price, change, change_percent, volume }
    }
}

/// Quotes grouped by asset class.
///
/// Kept as named fields rather than a map so iteration order is fixed
/// (forex, crypto, indices, commodities).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Assets {
    pub forex: Vec<AssetQuote>,
    pub crypto: Vec<AssetQuote>,
    pub indices: Vec<AssetQuote>,
    pub commodities: Vec<AssetQuote>,
}

impl Assets {
    pub fn class(&self, class: AssetClass) -> &[AssetQuote] {
        match class {
            | AssetClass::Forex => &self.forex,
            | AssetClass::Crypto => &self.crypto,
            | AssetClass::Indices => &self.indices,
            | AssetClass::Commodities => &self.commodities,
        }
    }

    /// Iterate `(class, quotes)` in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, &[AssetQuote])> {
        AssetClass::ALL.into_iter().map(move |c| (c, self.class(c)))
    }

    /// Every quote across all classes, in snapshot order.
    pub fn quotes_mut(&mut self) -> impl Iterator<Item = &mut AssetQuote> {
        self.forex
            .iter_mut()
            .chain(self.crypto.iter_mut())
            .chain(self.indices.iter_mut())
            .chain(self.commodities.iter_mut())
    }

    /// Total quote count across classes
    pub fn len(&self) -> usize {
        self.forex.len() + self.crypto.len() + self.indices.len() + self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Synthetic strategy record. Not executable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub win_rate: f64,
    pub trades: u32,
    pub pnl: f64,
    pub genes: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvolutionAction {
    Mutation,
    Crossover,
    Elimination,
    Spawn,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionEvent {
    pub timestamp: DateTime<Utc>,
    pub action: EvolutionAction,
    pub strategy: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Strategies {
    pub active: u32,
    /// Percentage, 0..=100
    pub win_rate: f64,
    pub evolution_cycles: u32,
    pub mutation_rate: f64,
    pub top_performers: Vec<Strategy>,
    pub recent_evolution: Vec<EvolutionEvent>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WhaleAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhaleEvent {
    pub wallet: String,
    pub asset: String,
    pub amount: f64,
    pub action: WhaleAction,
    /// 0..=1
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundingRate {
    pub exchange: String,
    pub pair: String,
    pub rate: f64,
    pub trend: FundingTrend,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlassnodeMetrics {
    pub network_value: f64,
    pub active_addresses: u64,
    pub exchange_outflow: f64,
    pub mvrv: f64,
    #[serde(rename = "fear_greed")]
    pub fear_greed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnChainSignals {
    pub whale_activity: Vec<WhaleEvent>,
    pub funding_rates: Vec<FundingRate>,
    pub glassnode: GlassnodeMetrics,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    #[serde(rename = "dailyPnL")]
    pub daily_pnl: f64,
    pub drawdown: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub active_trades: u32,
    pub daily_trades: u32,
    pub risk_score: f64,
    pub kelly: f64,
    pub var95: f64,
    pub alerts: Vec<Alert>,
}

/// Cumulative KPIs. No cross-field invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub monthly_return: f64,
    pub annualized_return: f64,
    pub total_trades: u64,
    pub profitable_trades: u64,
    pub volume_traded: f64,
    pub best_strategy: String,
    pub worst_strategy: String,
    pub avg_hold_time: f64,
    pub max_consecutive_wins: u32,
    pub max_consecutive_losses: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketCondition {
    pub name: String,
    /// 0..=1
    pub suitability: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketConditions {
    pub current_regime: String,
    pub volatility: String,
    pub sentiment: String,
    pub conditions: Vec<MarketCondition>,
}

/// Full market/portfolio snapshot. Replaced as a whole on every refresh tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub assets: Assets,
    pub strategies: Strategies,
    pub on_chain_signals: OnChainSignals,
    pub risk_metrics: RiskMetrics,
    pub performance: Performance,
    pub market_conditions: MarketConditions,
}
