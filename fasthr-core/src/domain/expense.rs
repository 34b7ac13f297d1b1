//! Expense request records

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::RequestStatus;

/// An expense request as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: Option<i64>,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Free-form type, e.g. "Yol", "Yemek", "Konaklama"
    pub expense_type: String,
    #[serde(serialize_with = "serialize_amount", deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub receipt_url: Option<String>,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub expense_type: String,
    #[serde(serialize_with = "serialize_amount", deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

/// Body of `PATCH /api/expenses/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Per-employee expense summary
///
/// The API does not pin this shape down, so fields are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    #[serde(flatten)]
    pub fields: BTreeMap<String, JsonValue>,
}

/// Amounts go out as JSON numbers; the backend models them as floats
fn serialize_amount<S>(amount: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;
    let value = amount
        .to_f64()
        .ok_or_else(|| S::Error::custom("amount out of range"))?;
    serializer.serialize_f64(value)
}

/// Deserialize amount that can be number or string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        JsonValue::String(s) => s
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}
