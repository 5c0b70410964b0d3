//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organized event attached to a signed contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Support staff member running the event. `None` until management
    /// assigns one.
    pub support_contact: Option<Uuid>,
    pub location: String,
    pub attendees: u32,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub contract_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub support_contact: Option<Uuid>,
    pub location: String,
    pub attendees: u32,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// `Some(Some(id))` = assign, `Some(None)` = clear, `None` = no change.
    pub support_contact: Option<Option<Uuid>>,
    pub location: Option<String>,
    pub attendees: Option<u32>,
    pub notes: Option<String>,
}
