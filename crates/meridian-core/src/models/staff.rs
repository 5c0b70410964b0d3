//! Staff member domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Department a staff member belongs to. Doubles as the unit of
/// authorization: every guarded operation names the departments allowed
/// to invoke it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Management,
    Commercial,
    Support,
}

impl Department {
    pub const ALL: [Department; 3] = [
        Department::Management,
        Department::Commercial,
        Department::Support,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Management => "management",
            Department::Commercial => "commercial",
            Department::Support => "support",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "management" => Ok(Department::Management),
            "commercial" => Ok(Department::Commercial),
            "support" => Ok(Department::Support),
            other => Err(format!("unknown department: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique login identifier.
    pub email: String,
    pub department: Department,
    /// Argon2id hash in PHC string format. Never the plaintext.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct CreateStaffMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    /// Hash produced by the credential store; the repository stores it
    /// verbatim.
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateStaffMember {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<Department>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_roundtrips_through_str() {
        for dept in Department::ALL {
            assert_eq!(dept.as_str().parse::<Department>().unwrap(), dept);
        }
    }

    #[test]
    fn unknown_department_is_rejected() {
        assert!("accounting".parse::<Department>().is_err());
    }
}
