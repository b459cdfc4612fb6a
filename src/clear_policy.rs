//! Client-side rule deciding which transactions may be cleared from the desk.
//!
//! This only gates the UI. The API is not assumed to enforce the same rule.

use crate::types::Transaction;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearPolicy {
    pub high_amount_threshold: Decimal,
}

impl ClearPolicy {
    pub fn new(high_amount_threshold: Decimal) -> Self {
        Self {
            high_amount_threshold,
        }
    }

    /// Strictly above the threshold. An amount equal to it is not high.
    pub fn is_high_amount(&self, tx: &Transaction) -> bool {
        tx.amount > self.high_amount_threshold
    }

    /// Pending, and either below the high-amount threshold or super admin is on.
    pub fn can_clear(&self, tx: &Transaction, super_admin: bool) -> bool {
        tx.status.is_pending() && (!self.is_high_amount(tx) || super_admin)
    }
}

impl Default for ClearPolicy {
    fn default() -> Self {
        Self::new(Decimal::from(crate::config::HIGH_AMOUNT_THRESHOLD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;

    fn tx(amount: i64, status: TransactionStatus) -> Transaction {
        Transaction {
            id: 1,
            client_name: "Acme".to_string(),
            amount: Decimal::from(amount),
            status,
            timestamp: None,
        }
    }

    #[test]
    fn test_pending_small_amount_is_clearable() {
        let policy = ClearPolicy::default();
        assert!(policy.can_clear(&tx(500, TransactionStatus::Pending), false));
    }

    #[test]
    fn test_non_pending_is_never_clearable() {
        let policy = ClearPolicy::default();
        for status in [
            TransactionStatus::Cleared,
            TransactionStatus::Failed,
            TransactionStatus::Other("held".to_string()),
        ] {
            assert!(!policy.can_clear(&tx(500, status.clone()), false));
            assert!(!policy.can_clear(&tx(500, status), true));
        }
    }

    #[test]
    fn test_high_amount_needs_super_admin() {
        let policy = ClearPolicy::default();
        let big = tx(10_001, TransactionStatus::Pending);
        assert!(policy.is_high_amount(&big));
        assert!(!policy.can_clear(&big, false));
        assert!(policy.can_clear(&big, true));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let policy = ClearPolicy::default();
        let edge = tx(10_000, TransactionStatus::Pending);
        assert!(!policy.is_high_amount(&edge));
        assert!(policy.can_clear(&edge, false));
    }
}
