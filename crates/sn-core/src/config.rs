//! Navigation configuration.
//!
//! Typically built by the host integration from its own settings file and
//! handed to `NavigatorBuilder`.  Nothing here is read from global state;
//! roaming is toggled on the running navigator, which owns its copy.

use crate::{NavError, NavResult};

/// Ordering of the move command relative to the arrival check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalOrder {
    /// Evaluate arrival first; only issue the move command when no
    /// kind-specific action fired.
    CheckThenMove,

    /// Always issue the move command, then evaluate arrival.
    #[default]
    MoveThenCheck,
}

/// What a request for an agent does while its previous task is unready.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResubmitPolicy {
    /// Report `Pending` and leave the in-flight task alone.  A new task is
    /// only submitted once the previous result has been consumed.
    #[default]
    WhenConsumed,

    /// Submit a fresh task on every call, superseding the in-flight one.
    EveryCall,
}

/// Tunables for the smart navigation layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Whether agents search the whole map (fire exits, main entrance)
    /// instead of heading out when nobody is left inside.
    pub global_roaming: bool,

    /// Distance in world units within which a special-link action fires.
    pub arrival_radius: f32,

    pub arrival_order: ArrivalOrder,

    pub resubmit: ResubmitPolicy,

    /// Seconds after the last entrance use before the targetability gate
    /// runs again.
    pub entrance_recheck_secs: f32,
}

impl NavConfig {
    pub const DEFAULT_ARRIVAL_RADIUS: f32 = 1.0;
    pub const DEFAULT_ENTRANCE_RECHECK_SECS: f32 = 3.0;

    /// Reject values the controllers cannot work with.
    pub fn validate(&self) -> NavResult<()> {
        if !self.arrival_radius.is_finite() || self.arrival_radius <= 0.0 {
            return Err(NavError::Config(format!(
                "arrival_radius must be finite and positive, got {}",
                self.arrival_radius
            )));
        }
        if !self.entrance_recheck_secs.is_finite() || self.entrance_recheck_secs <= 0.0 {
            return Err(NavError::Config(format!(
                "entrance_recheck_secs must be finite and positive, got {}",
                self.entrance_recheck_secs
            )));
        }
        Ok(())
    }

    /// Builder-style roaming toggle, handy in tests.
    pub fn with_roaming(mut self, roaming: bool) -> Self {
        self.global_roaming = roaming;
        self
    }

    pub fn with_arrival_order(mut self, order: ArrivalOrder) -> Self {
        self.arrival_order = order;
        self
    }

    pub fn with_resubmit(mut self, policy: ResubmitPolicy) -> Self {
        self.resubmit = policy;
        self
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            global_roaming:        false,
            arrival_radius:        Self::DEFAULT_ARRIVAL_RADIUS,
            arrival_order:         ArrivalOrder::default(),
            resubmit:              ResubmitPolicy::default(),
            entrance_recheck_secs: Self::DEFAULT_ENTRANCE_RECHECK_SECS,
        }
    }
}
