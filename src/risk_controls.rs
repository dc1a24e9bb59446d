//! Session-local risk control panel state.
//!
//! These settings are held for display and never feed back into the market
//! snapshot. They are lost on restart.

use serde::{Deserialize, Serialize};

use crate::utils::error::{Error, Result};

/// Slider granularity for risk tolerance
pub const TOLERANCE_STEP: f64 = 0.1;

/// Serializes in camelCase; the snake_case names are accepted on input so
/// the `[risk]` config section reads either way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskControls {
    /// Fraction in `[0, 1]`, snapped to 0.1 steps
    #[serde(alias = "risk_tolerance")]
    pub risk_tolerance: f64,
    /// Maximum daily loss in USD
    #[serde(default, alias = "max_daily_loss", skip_serializing_if = "Option::is_none")]
    pub max_daily_loss: Option<f64>,
    /// Maximum drawdown in percent
    #[serde(default, alias = "max_drawdown", skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<f64>,
}

impl Default for RiskControls {
    fn default() -> Self {
        Self { risk_tolerance: 0.5, max_daily_loss: None, max_drawdown: None }
    }
}

impl RiskControls {
    pub fn validate(&self) -> Result<()> {
        if !self.risk_tolerance.is_finite() || !(0.0..=1.0).contains(&self.risk_tolerance) {
            return Err(Error::InvalidArgument(format!(
                "risk tolerance {} outside [0, 1]",
                self.risk_tolerance
            )));
        }
        if let Some(loss) = self.max_daily_loss {
            if !loss.is_finite() || loss <= 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "max daily loss must be positive, got {}",
                    loss
                )));
            }
        }
        if let Some(dd) = self.max_drawdown {
            if !dd.is_finite() || dd <= 0.0 || dd > 100.0 {
                return Err(Error::InvalidArgument(format!(
                    "max drawdown must be in (0, 100], got {}",
                    dd
                )));
            }
        }
        Ok(())
    }

    /// Replace these controls with `requested`, tolerance snapped to the
    /// slider step. On error nothing changes.
    pub fn apply(&mut self, requested: RiskControls) -> Result<()> {
        requested.validate()?;
        let snapped = (requested.risk_tolerance / TOLERANCE_STEP).round() * TOLERANCE_STEP;
        *self = RiskControls { risk_tolerance: snapped.clamp(0.0, 1.0), ..requested };
        Ok(())
    }

    /// Tolerance as a whole percentage for display
    pub fn tolerance_pct(&self) -> u32 {
        (self.risk_tolerance * 100.0).round() as u32
    }
}
