//! SurrealDB implementation of [`StaffRepository`].
//!
//! Credential hashes are produced by the auth layer and stored verbatim
//! here; this repository never sees a plaintext password.

use chrono::{DateTime, Utc};
use meridian_core::error::CrmResult;
use meridian_core::models::staff::{
    CreateStaffMember, Department, StaffMember, UpdateStaffMember,
};
use meridian_core::repository::StaffRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct StaffRow {
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct StaffRowWithId {
    record_id: String,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_department(s: &str) -> Result<Department, DbError> {
    s.parse()
        .map_err(|e: String| DbError::Data(format!("staff row: {e}")))
}

impl StaffRow {
    fn into_staff(self, id: Uuid) -> Result<StaffMember, DbError> {
        Ok(StaffMember {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: parse_department(&self.department)?,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl StaffRowWithId {
    fn try_into_staff(self) -> Result<StaffMember, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Data(format!("invalid UUID: {e}")))?;
        Ok(StaffMember {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: parse_department(&self.department)?,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the staff repository.
#[derive(Clone)]
pub struct SurrealStaffRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStaffRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> StaffRepository for SurrealStaffRepository<C> {
    async fn create(&self, input: CreateStaffMember) -> CrmResult<StaffMember> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('staff', $id) SET \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 email = $email, \
                 department = $department, \
                 password_hash = $password_hash",
            )
            .bind(("id", id_str.clone()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("email", input.email))
            .bind(("department", input.department.as_str().to_string()))
            .bind(("password_hash", input.password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> CrmResult<StaffMember> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('staff', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn get_by_email(&self, email: &str) -> CrmResult<StaffMember> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM staff \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_staff()?)
    }

    async fn update(&self, id: Uuid, input: UpdateStaffMember) -> CrmResult<StaffMember> {
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
        if input.department.is_some() {
            sets.push("department = $department");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('staff', $id) SET {}", sets.join(", "));

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
        if let Some(department) = input.department {
            builder = builder.bind(("department", department.as_str().to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "staff".into(),
            id: id_str,
        })?;

        Ok(row.into_staff(id)?)
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: String) -> CrmResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('staff', $id) SET \
                 password_hash = $password_hash, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "staff".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CrmResult<()> {
        self.db
            .query("DELETE type::record('staff', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> CrmResult<Vec<StaffMember>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM staff \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StaffRowWithId> = result.take(0).map_err(DbError::from)?;

        let staff = rows
            .into_iter()
            .map(|row| row.try_into_staff())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(staff)
    }
}
