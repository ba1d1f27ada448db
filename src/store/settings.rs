//! User settings
//!
//! Daily goal, unit system and the onboarding flag. A unit switch converts
//! the goal in place and hands back the factor the store needs to rescale
//! its stored amounts.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::StoreError;

/// Millilitres per US fluid ounce
const ML_PER_FL_OZ: f64 = 29.5735;

/// Daily goal a fresh install starts with, in millilitres
const DEFAULT_DAILY_GOAL: f64 = 2000.0;

/// Unit system amounts are logged and shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    Millilitres,
    FluidOunces,
}

impl Default for Units {
    fn default() -> Self {
        Units::Millilitres
    }
}

impl Units {
    /// Multiplier converting amounts in `self` into `target` units
    pub fn conversion_factor(self, target: Units) -> f64 {
        match (self, target) {
            (Units::Millilitres, Units::FluidOunces) => 1.0 / ML_PER_FL_OZ,
            (Units::FluidOunces, Units::Millilitres) => ML_PER_FL_OZ,
            _ => 1.0,
        }
    }

    /// Short label shown next to amounts
    pub fn label(self) -> &'static str {
        match self {
            Units::Millilitres => "mL",
            Units::FluidOunces => "fl oz",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    daily_goal: f64,
    units: Units,
    onboarded: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            units: Units::default(),
            onboarded: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn daily_goal(&self) -> f64 {
        self.daily_goal
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn onboarded(&self) -> bool {
        self.onboarded
    }

    pub fn complete_onboarding(&mut self) {
        self.onboarded = true;
    }

    pub fn set_daily_goal(&mut self, goal: f64) -> Result<(), StoreError> {
        if !goal.is_finite() || goal <= 0.0 {
            return Err(StoreError::NonPositiveGoal(goal));
        }
        info!("Daily goal set to {}", goal);
        self.daily_goal = goal;
        Ok(())
    }

    /// Switches the unit system, converting the goal in place
    ///
    /// Returns the factor to pass to `Store::rescale_amounts` so logged
    /// entries move to the new units with the goal.
    pub fn switch_units(&mut self, target: Units) -> f64 {
        let factor = self.units.conversion_factor(target);
        if self.units != target {
            info!("Units switched to {}", target.label());
        }
        self.units = target;
        self.daily_goal *= factor;
        factor
    }
}
