//! SurrealDB implementation of [`ContractRepository`].
//!
//! Contracts are never deleted; the status field tracks cancellation.

use chrono::{DateTime, Utc};
use meridian_core::error::CrmResult;
use meridian_core::models::contract::{
    Contract, ContractStatus, CreateContract, UpdateContract,
};
use meridian_core::repository::ContractRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ContractRow {
    client_id: String,
    total_amount: f64,
    amount_due: f64,
    status: String,
    commercial_contact: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ContractRowWithId {
    record_id: String,
    client_id: String,
    total_amount: f64,
    amount_due: f64,
    status: String,
    commercial_contact: String,
    created_at: DateTime<Utc>,
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Data(format!("invalid {what} UUID: {e}")))
}

fn parse_status(s: &str) -> Result<ContractStatus, DbError> {
    s.parse()
        .map_err(|e: String| DbError::Data(format!("contract row: {e}")))
}

impl ContractRow {
    fn into_contract(self, id: Uuid) -> Result<Contract, DbError> {
        Ok(Contract {
            id,
            client_id: parse_uuid(&self.client_id, "client")?,
            total_amount: self.total_amount,
            amount_due: self.amount_due,
            status: parse_status(&self.status)?,
            commercial_contact: parse_uuid(&self.commercial_contact, "commercial contact")?,
            created_at: self.created_at,
        })
    }
}

impl ContractRowWithId {
    fn try_into_contract(self) -> Result<Contract, DbError> {
        let id = parse_uuid(&self.record_id, "contract")?;
        Ok(Contract {
            id,
            client_id: parse_uuid(&self.client_id, "client")?,
            total_amount: self.total_amount,
            amount_due: self.amount_due,
            status: parse_status(&self.status)?,
            commercial_contact: parse_uuid(&self.commercial_contact, "commercial contact")?,
            created_at: self.created_at,
        })
    }
}

fn rows_into_contracts(rows: Vec<ContractRowWithId>) -> Result<Vec<Contract>, DbError> {
    rows.into_iter().map(|row| row.try_into_contract()).collect()
}

/// SurrealDB implementation of the contract repository.
#[derive(Clone)]
pub struct SurrealContractRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealContractRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_where(
        &self,
        condition: &str,
        bind: Option<(&'static str, String)>,
    ) -> CrmResult<Vec<Contract>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM contract \
             WHERE {condition} ORDER BY created_at ASC"
        );

        let mut builder = self.db.query(&query);
        if let Some((key, value)) = bind {
            builder = builder.bind((key, value));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<ContractRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_into_contracts(rows)?)
    }
}

impl<C: Connection> ContractRepository for SurrealContractRepository<C> {
    async fn create(&self, input: CreateContract) -> CrmResult<Contract> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('contract', $id) SET \
                 client_id = $client_id, \
                 total_amount = $total_amount, \
                 amount_due = $amount_due, \
                 status = $status, \
                 commercial_contact = $commercial_contact",
            )
            .bind(("id", id_str.clone()))
            .bind(("client_id", input.client_id.to_string()))
            .bind(("total_amount", input.total_amount))
            .bind(("amount_due", input.amount_due))
            .bind(("status", input.status.as_str().to_string()))
            .bind((
                "commercial_contact",
                input.commercial_contact.to_string(),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ContractRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "contract".into(),
            id: id_str,
        })?;

        Ok(row.into_contract(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> CrmResult<Contract> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('contract', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ContractRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "contract".into(),
            id: id_str,
        })?;

        Ok(row.into_contract(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateContract) -> CrmResult<Contract> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.client_id.is_some() {
            sets.push("client_id = $client_id");
        }
        if input.total_amount.is_some() {
            sets.push("total_amount = $total_amount");
        }
        if input.amount_due.is_some() {
            sets.push("amount_due = $amount_due");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.commercial_contact.is_some() {
            sets.push("commercial_contact = $commercial_contact");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('contract', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(client_id) = input.client_id {
            builder = builder.bind(("client_id", client_id.to_string()));
        }
        if let Some(total_amount) = input.total_amount {
            builder = builder.bind(("total_amount", total_amount));
        }
        if let Some(amount_due) = input.amount_due {
            builder = builder.bind(("amount_due", amount_due));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(commercial_contact) = input.commercial_contact {
            builder = builder.bind(("commercial_contact", commercial_contact.to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ContractRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "contract".into(),
            id: id_str,
        })?;

        Ok(row.into_contract(id)?)
    }

    async fn list(&self) -> CrmResult<Vec<Contract>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM contract \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ContractRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_into_contracts(rows)?)
    }

    async fn list_by_commercial(&self, staff_id: Uuid) -> CrmResult<Vec<Contract>> {
        self.list_where(
            "commercial_contact = $commercial_contact",
            Some(("commercial_contact", staff_id.to_string())),
        )
        .await
    }

    async fn list_by_client(&self, client_id: Uuid) -> CrmResult<Vec<Contract>> {
        self.list_where(
            "client_id = $client_id",
            Some(("client_id", client_id.to_string())),
        )
        .await
    }

    async fn list_with_due_amount(&self) -> CrmResult<Vec<Contract>> {
        self.list_where("amount_due > 0", None).await
    }

    async fn list_by_status(&self, status: ContractStatus) -> CrmResult<Vec<Contract>> {
        self.list_where("status = $status", Some(("status", status.as_str().to_string())))
            .await
    }
}
