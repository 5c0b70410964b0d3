//! Contract domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContractStatus {
    ToSign,
    Signed,
    Cancelled,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [
        ContractStatus::ToSign,
        ContractStatus::Signed,
        ContractStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::ToSign => "ToSign",
            ContractStatus::Signed => "Signed",
            ContractStatus::Cancelled => "Cancelled",
        }
    }

    /// Human-readable form for menus and tables.
    pub fn label(self) -> &'static str {
        match self {
            ContractStatus::ToSign => "To sign",
            ContractStatus::Signed => "Signed",
            ContractStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ToSign" => Ok(ContractStatus::ToSign),
            "Signed" => Ok(ContractStatus::Signed),
            "Cancelled" => Ok(ContractStatus::Cancelled),
            other => Err(format!("unknown contract status: {other}")),
        }
    }
}

/// A sales contract between a client and the company.
///
/// Invariants: `total_amount >= 0` and `0 <= amount_due <= total_amount`.
/// Both are enforced at prompt time; the model itself stays plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub client_id: Uuid,
    pub total_amount: f64,
    pub amount_due: f64,
    pub status: ContractStatus,
    /// Commercial staff member responsible for this contract.
    pub commercial_contact: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateContract {
    pub client_id: Uuid,
    pub total_amount: f64,
    pub amount_due: f64,
    pub status: ContractStatus,
    pub commercial_contact: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateContract {
    pub client_id: Option<Uuid>,
    pub total_amount: Option<f64>,
    pub amount_due: Option<f64>,
    pub status: Option<ContractStatus>,
    pub commercial_contact: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_str() {
        for status in ContractStatus::ALL {
            assert_eq!(status.as_str().parse::<ContractStatus>().unwrap(), status);
        }
    }
}
