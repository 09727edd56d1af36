use serde::{Deserialize, Serialize};

/// Status of an ambient transaction, with the standard JTA status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    Active,
    MarkedRollback,
    Prepared,
    Committed,
    RolledBack,
    Unknown,
    NoTransaction,
    Preparing,
    Committing,
    RollingBack,
}

impl TxStatus {
    pub const ALL: [TxStatus; 10] = [
        TxStatus::Active,
        TxStatus::MarkedRollback,
        TxStatus::Prepared,
        TxStatus::Committed,
        TxStatus::RolledBack,
        TxStatus::Unknown,
        TxStatus::NoTransaction,
        TxStatus::Preparing,
        TxStatus::Committing,
        TxStatus::RollingBack,
    ];

    /// Numeric status code as defined by `javax.transaction.Status`.
    pub fn code(self) -> i32 {
        match self {
            TxStatus::Active => 0,
            TxStatus::MarkedRollback => 1,
            TxStatus::Prepared => 2,
            TxStatus::Committed => 3,
            TxStatus::RolledBack => 4,
            TxStatus::Unknown => 5,
            TxStatus::NoTransaction => 6,
            TxStatus::Preparing => 7,
            TxStatus::Committing => 8,
            TxStatus::RollingBack => 9,
        }
    }

    /// Map a numeric status code back to a status. Unrecognized codes
    /// become [`TxStatus::Unknown`].
    pub fn from_code(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .unwrap_or(TxStatus::Unknown)
    }

    /// Only the literal `Active` status counts. A transaction marked
    /// rollback-only or mid-completion is not joinable here.
    pub fn is_active(self) -> bool {
        matches!(self, TxStatus::Active)
    }
}
