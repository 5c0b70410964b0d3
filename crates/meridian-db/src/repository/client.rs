//! SurrealDB implementation of [`ClientRepository`].

use chrono::{DateTime, Utc};
use meridian_core::error::CrmResult;
use meridian_core::models::client::{Client, CreateClient, UpdateClient};
use meridian_core::repository::ClientRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ClientRow {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
    commercial_contact: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ClientRowWithId {
    record_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
    commercial_contact: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_contact(contact: Option<String>) -> Result<Option<Uuid>, DbError> {
    contact
        .map(|s| {
            Uuid::parse_str(&s).map_err(|e| DbError::Data(format!("invalid contact UUID: {e}")))
        })
        .transpose()
}

impl ClientRow {
    fn into_client(self, id: Uuid) -> Result<Client, DbError> {
        Ok(Client {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            commercial_contact: parse_contact(self.commercial_contact)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ClientRowWithId {
    fn try_into_client(self) -> Result<Client, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Data(format!("invalid UUID: {e}")))?;
        Ok(Client {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            commercial_contact: parse_contact(self.commercial_contact)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the client repository.
#[derive(Clone)]
pub struct SurrealClientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealClientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ClientRepository for SurrealClientRepository<C> {
    async fn create(&self, input: CreateClient) -> CrmResult<Client> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('client', $id) SET \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 email = $email, \
                 phone = $phone, \
                 company = $company, \
                 commercial_contact = $commercial_contact",
            )
            .bind(("id", id_str.clone()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind(("company", input.company))
            .bind((
                "commercial_contact",
                input.commercial_contact.map(|c| c.to_string()),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: id_str,
        })?;

        Ok(row.into_client(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> CrmResult<Client> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('client', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: id_str,
        })?;

        Ok(row.into_client(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateClient) -> CrmResult<Client> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.first_name.is_some() {
            sets.push("first_name = $first_name");
        }
        if input.last_name.is_some() {
            sets.push("last_name = $last_name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.phone.is_some() {
            sets.push("phone = $phone");
        }
        if input.company.is_some() {
            sets.push("company = $company");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('client', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(first_name) = input.first_name {
            builder = builder.bind(("first_name", first_name));
        }
        if let Some(last_name) = input.last_name {
            builder = builder.bind(("last_name", last_name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(phone) = input.phone {
            builder = builder.bind(("phone", phone));
        }
        if let Some(company) = input.company {
            builder = builder.bind(("company", company));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: id_str,
        })?;

        Ok(row.into_client(id)?)
    }

    async fn assign_commercial(&self, id: Uuid, commercial_contact: Uuid) -> CrmResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('client', $id) SET \
                 commercial_contact = $commercial_contact, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("commercial_contact", commercial_contact.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "client".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self) -> CrmResult<Vec<Client>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM client \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientRowWithId> = result.take(0).map_err(DbError::from)?;

        let clients = rows
            .into_iter()
            .map(|row| row.try_into_client())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(clients)
    }
}
