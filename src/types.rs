//! Common types shared across modules.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned transaction identifier.
pub type TransactionId = i64;

/// Settlement status reported by the transactions API.
///
/// Unknown values are kept verbatim so a newer server never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Pending,
    Cleared,
    Failed,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Cleared => "cleared",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Other(s) => s,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => TransactionStatus::Pending,
            "cleared" => TransactionStatus::Cleared,
            "failed" => TransactionStatus::Failed,
            _ => TransactionStatus::Other(value),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction row as returned by `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub client_name: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Body of a successful `POST /transactions/{id}/clear-funds`.
///
/// Only `id` and `status` are used; any other fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearedTransaction {
    pub id: TransactionId,
    pub status: TransactionStatus,
}

/// Accepts RFC 3339 timestamps and naive ISO timestamps (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    parse_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    // ==================== TransactionStatus tests ====================

    #[test]
    fn test_status_known_values() {
        assert_eq!(TransactionStatus::from("pending".to_string()), TransactionStatus::Pending);
        assert_eq!(TransactionStatus::from("cleared".to_string()), TransactionStatus::Cleared);
        assert_eq!(TransactionStatus::from("failed".to_string()), TransactionStatus::Failed);
    }

    #[test]
    fn test_status_unknown_value_is_kept() {
        let status = TransactionStatus::from("reversed".to_string());
        assert_eq!(status, TransactionStatus::Other("reversed".to_string()));
        assert_eq!(status.to_string(), "reversed");
        assert!(!status.is_pending());
    }

    // ==================== Transaction decoding tests ====================

    #[test]
    fn test_decode_transaction_with_utc_timestamp() {
        let json = r#"{"id":1,"client_name":"Acme","amount":500,"status":"pending","timestamp":"2024-01-01T00:00:00Z"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, 1);
        assert_eq!(tx.client_name, "Acme");
        assert_eq!(tx.amount, Decimal::from(500));
        assert!(tx.status.is_pending());
        assert_eq!(tx.timestamp, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_decode_float_amount_and_naive_timestamp() {
        let json = r#"{"id":7,"client_name":"Client 3","amount":12345.67,"status":"cleared","timestamp":"2024-05-02T10:30:15.123456"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, Decimal::from_str("12345.67").unwrap());
        assert_eq!(tx.status, TransactionStatus::Cleared);
        let ts = tx.timestamp.unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-02 10:30:15");
    }

    #[test]
    fn test_decode_missing_and_null_timestamp() {
        let missing = r#"{"id":2,"client_name":"B","amount":1,"status":"pending"}"#;
        let null = r#"{"id":3,"client_name":"C","amount":1,"status":"pending","timestamp":null}"#;
        assert!(serde_json::from_str::<Transaction>(missing).unwrap().timestamp.is_none());
        assert!(serde_json::from_str::<Transaction>(null).unwrap().timestamp.is_none());
    }

    #[test]
    fn test_decode_rejects_garbage_timestamp() {
        let json = r#"{"id":2,"client_name":"B","amount":1,"status":"pending","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_decode_cleared_response_ignores_extra_fields() {
        let json = r#"{"id":1,"status":"cleared","client_name":"Acme","amount":500.0}"#;
        let cleared: ClearedTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(cleared.id, 1);
        assert_eq!(cleared.status, TransactionStatus::Cleared);
    }
}
