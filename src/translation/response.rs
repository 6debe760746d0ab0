//! Response envelope returned to the tabular UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableResponse {
    /// The request's `draw` as an integer; `null` when it was not numeric.
    pub draw: Option<i64>,
    pub data: Vec<serde_json::Value>,
    pub records_filtered: u64,
    pub records_total: u64,
    #[serde(rename = "_", default, skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<serde_json::Value>,
}
