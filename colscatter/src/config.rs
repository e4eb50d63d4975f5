/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use serde::{Deserialize, Serialize};

pub mod defaults {
    use super::BackendKind;

    /// Batch padding writes by default.
    pub const BACKEND: BackendKind = BackendKind::Runs;

    /// Prefetch hints are free on platforms without support, so leave them on.
    pub const PREFETCH: bool = true;
}

/// The row copy engine used to apply a [`ScatterPlan`](crate::ScatterPlan).
///
/// Both engines produce identical output for identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Copy mapped columns one element at a time and fill each padding run with a single
    /// slice copy. See [`Runs`](crate::Runs).
    Runs,
    /// Write every destination cell individually. See
    /// [`Elementwise`](crate::Elementwise).
    Elementwise,
}

/// Host supplied settings for column scattering.
///
/// Fields missing from a serialized configuration take their values from [`defaults`].
/// ```
/// use colscatter::{BackendKind, ScatterConfig};
///
/// let config: ScatterConfig = serde_json::from_str(r#"{ "prefetch": false }"#).unwrap();
/// assert_eq!(config.backend(), BackendKind::Runs);
/// assert!(!config.prefetch());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScatterConfig {
    backend: BackendKind,

    /// Issue prefetch hints for the next source and destination elements. Only consulted
    /// by [`BackendKind::Runs`].
    prefetch: bool,
}

impl ScatterConfig {
    /// Construct a new configuration.
    pub fn new(backend: BackendKind, prefetch: bool) -> Self {
        Self { backend, prefetch }
    }

    /// The backend to construct from this configuration.
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Whether the [`BackendKind::Runs`] backend issues prefetch hints.
    pub fn prefetch(&self) -> bool {
        self.prefetch
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self::new(defaults::BACKEND, defaults::PREFETCH)
    }
}
