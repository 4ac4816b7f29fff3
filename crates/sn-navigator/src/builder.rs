//! Fluent builder for constructing a [`Navigator`].

use sn_core::{NavConfig, NavResult};
use sn_pathfinding::PathfindingService;

use crate::{Navigator, PathRequestRegistry, SearchModeController, TargetabilityGate};

/// Fluent builder for [`Navigator<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                 |
/// |----------------|-------------------------|
/// | `.config(c)`   | `NavConfig::default()`  |
/// | `.roaming(b)`  | `false`                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut nav = NavigatorBuilder::new(ScriptedPathfinder::direct(2))
///     .roaming(settings.global_roaming)
///     .build()?;
/// ```
pub struct NavigatorBuilder<S: PathfindingService> {
    service: S,
    config:  NavConfig,
}

impl<S: PathfindingService> NavigatorBuilder<S> {
    pub fn new(service: S) -> Self {
        Self { service, config: NavConfig::default() }
    }

    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    pub fn roaming(mut self, roaming: bool) -> Self {
        self.config.global_roaming = roaming;
        self
    }

    /// Validate the configuration and return an empty navigator.
    pub fn build(self) -> NavResult<Navigator<S>> {
        self.config.validate()?;
        Ok(Navigator {
            service:  self.service,
            gate:     TargetabilityGate::from_config(&self.config),
            config:   self.config,
            registry: PathRequestRegistry::new(),
            search:   SearchModeController::new(),
        })
    }
}
