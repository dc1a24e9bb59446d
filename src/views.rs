//! Read-only projections of a snapshot that the dashboard panels display.

use serde::{Deserialize, Serialize};

use crate::market::{AssetClass, AssetQuote, MarketSnapshot, RiskMetrics, Strategy};
use crate::modules::{ModuleConfig, ModuleSummary};
use crate::system::SystemStatus;

/// Daily P&L gauge threshold in USD
pub const DAILY_PNL_THRESHOLD: f64 = 50_000.0;
/// Drawdown gauge threshold in percent
pub const DRAWDOWN_THRESHOLD: f64 = -5.0;
pub const SHARPE_RATIO_THRESHOLD: f64 = 2.0;
pub const RISK_SCORE_THRESHOLD: f64 = 0.5;
pub const ACTIVE_TRADES_THRESHOLD: f64 = 30.0;
/// Strategies above this win rate are flagged as top performers
pub const TOP_STRATEGY_WIN_RATE: f64 = 80.0;

/// Per-class aggregate row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassOverview {
    pub class: AssetClass,
    pub total_volume: f64,
    pub avg_change_percent: f64,
    pub rising: usize,
    pub count: usize,
}

pub fn asset_class_overview(class: AssetClass, quotes: &[AssetQuote]) -> AssetClassOverview {
    let total_volume = quotes.iter().map(|q| q.volume).sum();
    let avg_change_percent = if quotes.is_empty() {
        0.0
    } else {
        quotes.iter().map(|q| q.change_percent).sum::<f64>() / quotes.len() as f64
    };
    AssetClassOverview {
        class,
        total_volume,
        avg_change_percent,
        rising: quotes.iter().filter(|q| q.change > 0.0).count(),
        count: quotes.len(),
    }
}

/// Heatmap colour bucket for a change percentage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeatBucket {
    StrongUp,
    Up,
    Down,
    StrongDown,
}

pub fn heat_bucket(change_percent: f64) -> HeatBucket {
    if change_percent > 2.0 {
        HeatBucket::StrongUp
    } else if change_percent > 0.0 {
        HeatBucket::Up
    } else if change_percent > -2.0 {
        HeatBucket::Down
    } else {
        HeatBucket::StrongDown
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Safe,
    Warning,
    Danger,
}

pub fn daily_pnl_status(daily_pnl: f64) -> RiskStatus {
    if daily_pnl > 0.0 {
        RiskStatus::Safe
    } else {
        RiskStatus::Warning
    }
}

pub fn drawdown_status(drawdown: f64) -> RiskStatus {
    if drawdown > -3.0 {
        RiskStatus::Safe
    } else if drawdown > -5.0 {
        RiskStatus::Warning
    } else {
        RiskStatus::Danger
    }
}

pub fn sharpe_ratio_status(sharpe: f64) -> RiskStatus {
    if sharpe > 2.0 {
        RiskStatus::Safe
    } else if sharpe > 1.0 {
        RiskStatus::Warning
    } else {
        RiskStatus::Danger
    }
}

pub fn risk_score_status(score: f64) -> RiskStatus {
    if score < 0.3 {
        RiskStatus::Safe
    } else if score < 0.5 {
        RiskStatus::Warning
    } else {
        RiskStatus::Danger
    }
}

/// Never reaches danger.
pub fn active_trades_status(active_trades: u32) -> RiskStatus {
    if active_trades < 25 {
        RiskStatus::Safe
    } else {
        RiskStatus::Warning
    }
}

/// Gauge fill in percent: `|value / threshold| * 100`, capped at 100.
pub fn threshold_fill(value: f64, threshold: f64) -> f64 {
    if threshold == 0.0 {
        return 100.0;
    }
    ((value / threshold).abs() * 100.0).min(100.0)
}

pub fn is_top_strategy(strategy: &Strategy) -> bool {
    strategy.win_rate > TOP_STRATEGY_WIN_RATE
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskCard {
    pub value: f64,
    pub threshold: f64,
    pub fill: f64,
    pub status: RiskStatus,
}

impl RiskCard {
    fn new(value: f64, threshold: f64, status: RiskStatus) -> Self {
        Self { value, threshold, fill: threshold_fill(value, threshold), status }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskOverview {
    #[serde(rename = "dailyPnL")]
    pub daily_pnl: RiskCard,
    pub drawdown: RiskCard,
    pub sharpe_ratio: RiskCard,
    pub risk_score: RiskCard,
    pub active_trades: RiskCard,
}

/// The five status cards of the risk panel.
pub fn risk_overview(risk: &RiskMetrics) -> RiskOverview {
    RiskOverview {
        daily_pnl: RiskCard::new(
            risk.daily_pnl,
            DAILY_PNL_THRESHOLD,
            daily_pnl_status(risk.daily_pnl),
        ),
        drawdown: RiskCard::new(risk.drawdown, DRAWDOWN_THRESHOLD, drawdown_status(risk.drawdown)),
        sharpe_ratio: RiskCard::new(
            risk.sharpe_ratio,
            SHARPE_RATIO_THRESHOLD,
            sharpe_ratio_status(risk.sharpe_ratio),
        ),
        risk_score: RiskCard::new(
            risk.risk_score,
            RISK_SCORE_THRESHOLD,
            risk_score_status(risk.risk_score),
        ),
        active_trades: RiskCard::new(
            f64::from(risk.active_trades),
            ACTIVE_TRADES_THRESHOLD,
            active_trades_status(risk.active_trades),
        ),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatCell {
    pub symbol: String,
    pub class: AssetClass,
    pub change_percent: f64,
    pub bucket: HeatBucket,
}

/// Everything the overview tab shows, derived in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub system_status: SystemStatus,
    pub asset_classes: Vec<AssetClassOverview>,
    pub heatmap: Vec<HeatCell>,
    pub risk: RiskOverview,
    pub top_strategies: Vec<String>,
    pub modules: ModuleSummary,
}

pub fn dashboard_overview(
    snapshot: &MarketSnapshot, modules: &ModuleConfig, system_status: SystemStatus,
) -> DashboardOverview {
    let asset_classes =
        snapshot.assets.iter().map(|(class, quotes)| asset_class_overview(class, quotes)).collect();
    let mut heatmap = Vec::with_capacity(snapshot.assets.len());
    heatmap.extend(snapshot.assets.iter().flat_map(|(class, quotes)| {
        quotes.iter().map(move |q| HeatCell {
            symbol: q.symbol.clone(),
            class,
            change_percent: q.change_percent,
            bucket: heat_bucket(q.change_percent),
        })
    }));
    let top_strategies = snapshot
        .strategies
        .top_performers
        .iter()
        .filter(|s| is_top_strategy(s))
        .map(|s| s.id.clone())
        .collect();

    DashboardOverview {
        system_status,
        asset_classes,
        heatmap,
        risk: risk_overview(&snapshot.risk_metrics),
        top_strategies,
        modules: modules.summary(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::seed_snapshot;
    use crate::modules::seed_modules;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[case(4.94, HeatBucket::StrongUp)]
    #[case(2.0, HeatBucket::Up)]
    #[case(0.21, HeatBucket::Up)]
    #[case(0.0, HeatBucket::Down)]
    #[case(-2.0, HeatBucket::StrongDown)]
    #[case(-3.98, HeatBucket::StrongDown)]
    fn heat_buckets(#[case] change: f64, #[case] expected: HeatBucket) {
        assert_eq!(heat_bucket(change), expected);
    }

    #[rstest]
    #[case(-1.0, RiskStatus::Safe)]
    #[case(-3.0, RiskStatus::Warning)]
    #[case(-4.2, RiskStatus::Warning)]
    #[case(-5.0, RiskStatus::Danger)]
    fn drawdown_statuses(#[case] drawdown: f64, #[case] expected: RiskStatus) {
        assert_eq!(drawdown_status(drawdown), expected);
    }

    #[rstest]
    #[case(2.87, RiskStatus::Safe)]
    #[case(2.0, RiskStatus::Warning)]
    #[case(1.01, RiskStatus::Warning)]
    #[case(1.0, RiskStatus::Danger)]
    #[case(-0.5, RiskStatus::Danger)]
    fn sharpe_ratio_statuses(#[case] sharpe: f64, #[case] expected: RiskStatus) {
        assert_eq!(sharpe_ratio_status(sharpe), expected);
    }

    #[rstest]
    #[case(0.1, RiskStatus::Safe)]
    #[case(0.3, RiskStatus::Warning)]
    #[case(0.34, RiskStatus::Warning)]
    #[case(0.5, RiskStatus::Danger)]
    #[case(0.9, RiskStatus::Danger)]
    fn risk_score_statuses(#[case] score: f64, #[case] expected: RiskStatus) {
        assert_eq!(risk_score_status(score), expected);
    }

    #[rstest]
    #[case(15, RiskStatus::Safe)]
    #[case(24, RiskStatus::Safe)]
    #[case(25, RiskStatus::Warning)]
    #[case(34, RiskStatus::Warning)]
    fn active_trades_statuses(#[case] trades: u32, #[case] expected: RiskStatus) {
        assert_eq!(active_trades_status(trades), expected);
    }

    #[test]
    fn risk_panel_has_five_cards() {
        let snap = seed_snapshot(Utc::now());
        let json = serde_json::to_value(risk_overview(&snap.risk_metrics)).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["activeTrades", "dailyPnL", "drawdown", "riskScore", "sharpeRatio"]);
        assert_eq!(json["sharpeRatio"]["status"], "safe");
        assert_eq!(json["riskScore"]["status"], "warning");
        assert_eq!(json["activeTrades"]["value"], 23.0);
        assert_eq!(json["activeTrades"]["threshold"], 30.0);
        assert_eq!(json["activeTrades"]["status"], "safe");
    }

    #[test]
    fn active_trades_card_follows_regeneration() {
        let mut snap = seed_snapshot(Utc::now());
        snap.risk_metrics.active_trades = 31;
        let card = risk_overview(&snap.risk_metrics).active_trades;
        assert_eq!(card.status, RiskStatus::Warning);
        assert_eq!(card.fill, 100.0);
    }

    #[test]
    fn gauge_fill_caps_at_100() {
        assert!((threshold_fill(-4.2, -5.0) - 84.0).abs() < 1e-9);
        assert_eq!(threshold_fill(60_000.0, 50_000.0), 100.0);
        assert_eq!(threshold_fill(1.0, 0.0), 100.0);
    }

    #[test]
    fn forex_overview_from_seed() {
        let snap = seed_snapshot(Utc::now());
        let row = asset_class_overview(AssetClass::Forex, &snap.assets.forex);
        assert_eq!(row.count, 7);
        assert_eq!(row.rising, 4);
        assert!((row.total_volume - 10.0e9).abs() < 1.0);
        assert!((row.avg_change_percent - (-0.08 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn overview_from_seed() {
        let overview =
            dashboard_overview(&seed_snapshot(Utc::now()), &seed_modules(), SystemStatus::Active);
        assert_eq!(overview.asset_classes.len(), 4);
        assert_eq!(overview.heatmap.len(), 21);
        assert_eq!(overview.top_strategies, vec!["STR_001", "STR_003"]);
        assert_eq!(overview.risk.daily_pnl.status, RiskStatus::Safe);
        assert_eq!(overview.risk.drawdown.status, RiskStatus::Warning);
        assert_eq!(overview.modules.total, 11);
    }

    #[test]
    fn empty_class_has_zero_average() {
        let row = asset_class_overview(AssetClass::Crypto, &[]);
        assert_eq!(row.avg_change_percent, 0.0);
        assert_eq!(row.count, 0);
    }
}
