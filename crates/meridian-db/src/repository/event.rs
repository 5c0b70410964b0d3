//! SurrealDB implementation of [`EventRepository`].
//!
//! Events are never deleted. The support contact stays unset until
//! management assigns one, which is what `list_without_support` surfaces.

use chrono::{DateTime, Utc};
use meridian_core::error::CrmResult;
use meridian_core::models::event::{CreateEvent, Event, UpdateEvent};
use meridian_core::repository::EventRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct EventRow {
    contract_id: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    support_contact: Option<String>,
    location: String,
    attendees: u32,
    notes: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct EventRowWithId {
    record_id: String,
    contract_id: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    support_contact: Option<String>,
    location: String,
    attendees: u32,
    notes: String,
    created_at: DateTime<Utc>,
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Data(format!("invalid {what} UUID: {e}")))
}

fn parse_support(contact: Option<String>) -> Result<Option<Uuid>, DbError> {
    contact
        .map(|s| parse_uuid(&s, "support contact"))
        .transpose()
}

impl EventRow {
    fn into_event(self, id: Uuid) -> Result<Event, DbError> {
        Ok(Event {
            id,
            contract_id: parse_uuid(&self.contract_id, "contract")?,
            start_date: self.start_date,
            end_date: self.end_date,
            support_contact: parse_support(self.support_contact)?,
            location: self.location,
            attendees: self.attendees,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

impl EventRowWithId {
    fn try_into_event(self) -> Result<Event, DbError> {
        let id = parse_uuid(&self.record_id, "event")?;
        Ok(Event {
            id,
            contract_id: parse_uuid(&self.contract_id, "contract")?,
            start_date: self.start_date,
            end_date: self.end_date,
            support_contact: parse_support(self.support_contact)?,
            location: self.location,
            attendees: self.attendees,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

fn rows_into_events(rows: Vec<EventRowWithId>) -> Result<Vec<Event>, DbError> {
    rows.into_iter().map(|row| row.try_into_event()).collect()
}

/// SurrealDB implementation of the event repository.
#[derive(Clone)]
pub struct SurrealEventRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEventRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_where(
        &self,
        condition: &str,
        bind: Option<(&'static str, String)>,
    ) -> CrmResult<Vec<Event>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM event \
             WHERE {condition} ORDER BY created_at ASC"
        );

        let mut builder = self.db.query(&query);
        if let Some((key, value)) = bind {
            builder = builder.bind((key, value));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<EventRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_into_events(rows)?)
    }
}

impl<C: Connection> EventRepository for SurrealEventRepository<C> {
    async fn create(&self, input: CreateEvent) -> CrmResult<Event> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('event', $id) SET \
                 contract_id = $contract_id, \
                 start_date = $start_date, \
                 end_date = $end_date, \
                 support_contact = $support_contact, \
                 location = $location, \
                 attendees = $attendees, \
                 notes = $notes",
            )
            .bind(("id", id_str.clone()))
            .bind(("contract_id", input.contract_id.to_string()))
            .bind(("start_date", input.start_date))
            .bind(("end_date", input.end_date))
            .bind((
                "support_contact",
                input.support_contact.map(|c| c.to_string()),
            ))
            .bind(("location", input.location))
            .bind(("attendees", input.attendees))
            .bind(("notes", input.notes))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> CrmResult<Event> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('event', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> CrmResult<Event> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.start_date.is_some() {
            sets.push("start_date = $start_date");
        }
        if input.end_date.is_some() {
            sets.push("end_date = $end_date");
        }
        if input.support_contact.is_some() {
            sets.push("support_contact = $support_contact");
        }
        if input.location.is_some() {
            sets.push("location = $location");
        }
        if input.attendees.is_some() {
            sets.push("attendees = $attendees");
        }
        if input.notes.is_some() {
            sets.push("notes = $notes");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE type::record('event', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(start_date) = input.start_date {
            builder = builder.bind(("start_date", start_date));
        }
        if let Some(end_date) = input.end_date {
            builder = builder.bind(("end_date", end_date));
        }
        if let Some(support_contact) = input.support_contact {
            // Option<Option<Uuid>>: Some(Some(id)) = assign, Some(None) = clear.
            builder = builder.bind((
                "support_contact",
                support_contact.map(|c| c.to_string()),
            ));
        }
        if let Some(location) = input.location {
            builder = builder.bind(("location", location));
        }
        if let Some(attendees) = input.attendees {
            builder = builder.bind(("attendees", attendees));
        }
        if let Some(notes) = input.notes {
            builder = builder.bind(("notes", notes));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn list(&self) -> CrmResult<Vec<Event>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM event \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EventRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_into_events(rows)?)
    }

    async fn list_by_support(&self, staff_id: Uuid) -> CrmResult<Vec<Event>> {
        self.list_where(
            "support_contact = $support_contact",
            Some(("support_contact", staff_id.to_string())),
        )
        .await
    }

    async fn list_without_support(&self) -> CrmResult<Vec<Event>> {
        self.list_where("support_contact = NONE", None).await
    }
}
