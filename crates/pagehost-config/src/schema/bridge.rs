use serde::{Deserialize, Serialize};

/// Page-side entry points called by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Function invoked once the page script environment is ready, with the
    /// host's dark-theme flag as its only argument.
    pub bootstrap_function: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bootstrap_function: "initializePage".into(),
        }
    }
}
