//! # Autonomy Parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{map::MapParams, nav::NavParams, per::PerParams};
use util::params::{self, LoadError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the whole autonomy pipeline, one table per module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoParams {
    #[serde(default)]
    pub per: PerParams,

    #[serde(default)]
    pub map: MapParams,

    #[serde(default)]
    pub nav: NavParams,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AutoParams {
    /// Load the parameters from a file relative to the software root's params directory.
    pub fn load(param_file_path: &str) -> Result<Self, LoadError> {
        params::load(param_file_path)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
