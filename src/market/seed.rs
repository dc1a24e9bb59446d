//! Literal seed snapshot the service boots from.

use chrono::{DateTime, Duration, Utc};

use super::types::*;

fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}

fn strategy(id: &str, name: &str, win_rate: f64, trades: u32, pnl: f64, genes: u32) -> Strategy {
    Strategy { id: id.into(), name: name.into(), win_rate, trades, pnl, genes }
}

fn evolution(
    timestamp: DateTime<Utc>, action: EvolutionAction, strategy: &str, details: &str,
) -> EvolutionEvent {
    EvolutionEvent { timestamp, action, strategy: strategy.into(), details: details.into() }
}

fn condition(name: &str, suitability: f64, active: bool) -> MarketCondition {
    MarketCondition { name: name.into(), suitability, active }
}

/// Build the seed snapshot. Relative timestamps are anchored at `now`.
pub fn seed_snapshot(now: DateTime<Utc>) -> MarketSnapshot {
    let assets = Assets {
        forex: vec![
            AssetQuote::new("EUR/USD", 1.0847, 0.0023, 0.21, 2.3e9),
            AssetQuote::new("GBP/USD", 1.2634, -0.0045, -0.35, 1.8e9),
            AssetQuote::new("USD/JPY", 149.23, 0.78, 0.53, 1.9e9),
            AssetQuote::new("AUD/USD", 0.6789, 0.0012, 0.18, 1.2e9),
            AssetQuote::new("USD/CAD", 1.3456, -0.0089, -0.66, 1.1e9),
            AssetQuote::new("USD/CHF", 0.8923, 0.0034, 0.38, 0.9e9),
            AssetQuote::new("NZD/USD", 0.6123, -0.0023, -0.37, 0.8e9),
        ],
        crypto: vec![
            AssetQuote::new("BTC/USD", 67834.56, 1234.78, 1.86, 28.5e9),
            AssetQuote::new("ETH/USD", 3456.78, -89.34, -2.52, 15.2e9),
            AssetQuote::new("SOL/USD", 189.45, 8.92, 4.94, 3.8e9),
            AssetQuote::new("ADA/USD", 0.4567, 0.0234, 5.41, 1.2e9),
            AssetQuote::new("DOT/USD", 6.789, -0.345, -4.83, 0.9e9),
        ],
        indices: vec![
            AssetQuote::new("SPX500", 5247.89, 23.45, 0.45, 4.2e9),
            AssetQuote::new("NASDAQ", 16789.34, -67.23, -0.40, 3.8e9),
            AssetQuote::new("DAX40", 17823.45, 156.78, 0.89, 2.1e9),
            AssetQuote::new("FTSE100", 7894.56, -23.45, -0.30, 1.9e9),
            AssetQuote::new("NIKKEI", 38456.78, 234.56, 0.61, 2.3e9),
        ],
        commodities: vec![
            AssetQuote::new("GOLD", 2034.56, 12.34, 0.61, 1.8e9),
            AssetQuote::new("SILVER", 23.45, -0.78, -3.21, 0.9e9),
            AssetQuote::new("CRUDE", 78.92, 2.34, 3.06, 2.1e9),
            AssetQuote::new("NATGAS", 2.89, -0.12, -3.98, 1.2e9),
        ],
    };

    let strategies = Strategies {
        active: 147,
        win_rate: 73.4,
        evolution_cycles: 12,
        mutation_rate: 8.5,
        top_performers: vec![
            strategy("STR_001", "Quantum Scalper Alpha", 84.2, 234, 15420.56, 23),
            strategy("STR_002", "Volatility Hunter", 78.9, 189, 12890.34, 19),
            strategy("STR_003", "Trend Fusion Pro", 82.1, 156, 18945.78, 27),
            strategy("STR_004", "Mean Reversion X", 76.5, 203, 11234.89, 21),
            strategy("STR_005", "Breakout Predator", 79.8, 167, 14567.23, 25),
        ],
        recent_evolution: vec![
            evolution(
                minutes_ago(now, 5),
                EvolutionAction::Mutation,
                "STR_001",
                "Risk parameter optimized",
            ),
            evolution(
                minutes_ago(now, 10),
                EvolutionAction::Crossover,
                "STR_NEW_001",
                "Combined STR_002 + STR_003",
            ),
            evolution(
                minutes_ago(now, 15),
                EvolutionAction::Elimination,
                "STR_089",
                "Performance below threshold",
            ),
            evolution(
                minutes_ago(now, 20),
                EvolutionAction::Spawn,
                "STR_NEW_002",
                "Generated from top performer",
            ),
        ],
    };

    let on_chain_signals = OnChainSignals {
        whale_activity: vec![
            WhaleEvent {
                wallet: "0x742d...a4b8".into(),
                asset: "ETH".into(),
                amount: 15420.56,
                action: WhaleAction::Buy,
                confidence: 0.89,
                timestamp: now,
            },
            WhaleEvent {
                wallet: "0x1a2b...c3d4".into(),
                asset: "BTC".into(),
                amount: 234.78,
                action: WhaleAction::Sell,
                confidence: 0.76,
                timestamp: minutes_ago(now, 5),
            },
            WhaleEvent {
                wallet: "0x5e6f...g7h8".into(),
                asset: "SOL".into(),
                amount: 8945.23,
                action: WhaleAction::Buy,
                confidence: 0.92,
                timestamp: minutes_ago(now, 10),
            },
        ],
        funding_rates: vec![
            FundingRate {
                exchange: "Binance".into(),
                pair: "BTC/USDT".into(),
                rate: 0.0045,
                trend: FundingTrend::Increasing,
                timestamp: now,
            },
            FundingRate {
                exchange: "Bybit".into(),
                pair: "ETH/USDT".into(),
                rate: -0.0023,
                trend: FundingTrend::Decreasing,
                timestamp: now,
            },
            FundingRate {
                exchange: "OKX".into(),
                pair: "SOL/USDT".into(),
                rate: 0.0089,
                trend: FundingTrend::Stable,
                timestamp: now,
            },
        ],
        glassnode: GlassnodeMetrics {
            network_value: 1.2e12,
            active_addresses: 945_234,
            exchange_outflow: 23456.78,
            mvrv: 2.34,
            fear_greed: 67,
        },
    };

    let risk_metrics = RiskMetrics {
        daily_pnl: 47832.56,
        drawdown: -4.2,
        sharpe_ratio: 2.87,
        max_drawdown: -8.9,
        win_rate: 73.4,
        avg_win: 450.23,
        avg_loss: -234.56,
        active_trades: 23,
        daily_trades: 189,
        risk_score: 0.34,
        kelly: 0.28,
        var95: -12345.67,
        alerts: vec![
            Alert {
                alert_type: AlertType::Warning,
                message: "Drawdown approaching 5% threshold".into(),
                timestamp: now,
            },
            Alert {
                alert_type: AlertType::Info,
                message: "New strategy STR_NEW_001 showing strong performance".into(),
                timestamp: minutes_ago(now, 5),
            },
        ],
    };

    let performance = Performance {
        total_pnl: 284567.89,
        monthly_return: 12.4,
        annualized_return: 34.7,
        total_trades: 15678,
        profitable_trades: 11508,
        volume_traded: 45.6e9,
        best_strategy: "STR_001".into(),
        worst_strategy: "STR_089".into(),
        avg_hold_time: 4.2,
        max_consecutive_wins: 23,
        max_consecutive_losses: 8,
    };

    let market_conditions = MarketConditions {
        current_regime: "TRENDING_BULL".into(),
        volatility: "MEDIUM".into(),
        sentiment: "BULLISH".into(),
        conditions: vec![
            condition("Trend Following", 0.89, true),
            condition("Mean Reversion", 0.34, false),
            condition("Breakout", 0.76, true),
            condition("Counter Trend", 0.23, false),
        ],
    };

    MarketSnapshot {
        assets,
        strategies,
        on_chain_signals,
        risk_metrics,
        performance,
        market_conditions,
    }
}
