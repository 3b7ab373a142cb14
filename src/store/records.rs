//! Customer record type.

use serde::{Deserialize, Serialize};

/// A customer profile as returned by the `get_customer_info` tool.
///
/// Field names are camelCase on the wire, matching what the model sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub customer_id: String,
    pub name: String,
    pub monthly_income: u64,
    pub credit_score: u32,
}

impl CustomerRecord {
    pub fn new(customer_id: impl Into<String>, name: impl Into<String>, monthly_income: u64, credit_score: u32) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            monthly_income,
            credit_score,
        }
    }
}
