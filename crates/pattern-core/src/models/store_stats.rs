use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Store-reported statistics. `extra` holds store-specific fields verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_patterns: usize,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
