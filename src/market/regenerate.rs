//! Per-tick perturbation of the market snapshot.
//!
//! Draw order is fixed: one draw per quote (forex, crypto, indices,
//! commodities), then total P&L, daily P&L, active trades, active strategies
//! and strategy win rate. Deterministic sources rely on that order.

use rand::RngCore;

use super::types::MarketSnapshot;

/// Source of uniform draws on `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedSequence {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

/// Derive the next snapshot from `prev`.
///
/// Prices are compounded by an independent delta in `[-1%, 1%)` with no
/// clamping or mean reversion, so they drift without bound over long sessions.
pub fn regenerate<S: RandomSource + ?Sized>(prev: &MarketSnapshot, rng: &mut S) -> MarketSnapshot {
    let mut next = prev.clone();

    for quote in next.assets.quotes_mut() {
        let delta = (rng.next_f64() - 0.5) * 0.02;
        quote.price *= 1.0 + delta;
        quote.change = quote.price * delta;
        quote.change_percent = delta * 100.0;
    }

    next.performance.total_pnl += (rng.next_f64() - 0.4) * 1000.0;
    next.risk_metrics.daily_pnl += (rng.next_f64() - 0.4) * 500.0;
    next.risk_metrics.active_trades = (15.0 + rng.next_f64() * 20.0).floor() as u32;

    next.strategies.active = (140.0 + rng.next_f64() * 20.0).floor() as u32;
    next.strategies.win_rate = 70.0 + rng.next_f64() * 10.0;

    next
}
