//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The interactive CLI renders
//! complete tables, so list operations return full vectors ordered by
//! creation time.

use uuid::Uuid;

use crate::error::CrmResult;
use crate::models::{
    client::{Client, CreateClient, UpdateClient},
    contract::{Contract, ContractStatus, CreateContract, UpdateContract},
    event::{CreateEvent, Event, UpdateEvent},
    staff::{CreateStaffMember, StaffMember, UpdateStaffMember},
};

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

pub trait StaffRepository: Send + Sync {
    fn create(
        &self,
        input: CreateStaffMember,
    ) -> impl Future<Output = CrmResult<StaffMember>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CrmResult<StaffMember>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = CrmResult<StaffMember>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateStaffMember,
    ) -> impl Future<Output = CrmResult<StaffMember>> + Send;
    /// Replace the stored credential hash. Used by the authentication
    /// flow for opportunistic rehash and by administrative password
    /// resets.
    fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> impl Future<Output = CrmResult<()>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = CrmResult<()>> + Send;
    fn list(&self) -> impl Future<Output = CrmResult<Vec<StaffMember>>> + Send;
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

pub trait ClientRepository: Send + Sync {
    fn create(&self, input: CreateClient) -> impl Future<Output = CrmResult<Client>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CrmResult<Client>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateClient,
    ) -> impl Future<Output = CrmResult<Client>> + Send;
    /// Set the commercial contact for a client that has none yet.
    fn assign_commercial(
        &self,
        id: Uuid,
        commercial_contact: Uuid,
    ) -> impl Future<Output = CrmResult<()>> + Send;
    fn list(&self) -> impl Future<Output = CrmResult<Vec<Client>>> + Send;
}

// ---------------------------------------------------------------------------
// Contracts — no delete operation exists.
// ---------------------------------------------------------------------------

pub trait ContractRepository: Send + Sync {
    fn create(&self, input: CreateContract) -> impl Future<Output = CrmResult<Contract>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CrmResult<Contract>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateContract,
    ) -> impl Future<Output = CrmResult<Contract>> + Send;
    fn list(&self) -> impl Future<Output = CrmResult<Vec<Contract>>> + Send;
    /// Contracts where the given staff member is the commercial contact.
    fn list_by_commercial(
        &self,
        staff_id: Uuid,
    ) -> impl Future<Output = CrmResult<Vec<Contract>>> + Send;
    fn list_by_client(
        &self,
        client_id: Uuid,
    ) -> impl Future<Output = CrmResult<Vec<Contract>>> + Send;
    /// Contracts with an outstanding amount due.
    fn list_with_due_amount(&self) -> impl Future<Output = CrmResult<Vec<Contract>>> + Send;
    fn list_by_status(
        &self,
        status: ContractStatus,
    ) -> impl Future<Output = CrmResult<Vec<Contract>>> + Send;
}

// ---------------------------------------------------------------------------
// Events — no delete operation exists.
// ---------------------------------------------------------------------------

pub trait EventRepository: Send + Sync {
    fn create(&self, input: CreateEvent) -> impl Future<Output = CrmResult<Event>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CrmResult<Event>> + Send;
    fn update(&self, id: Uuid, input: UpdateEvent)
    -> impl Future<Output = CrmResult<Event>> + Send;
    fn list(&self) -> impl Future<Output = CrmResult<Vec<Event>>> + Send;
    /// Events where the given staff member is the support contact.
    fn list_by_support(
        &self,
        staff_id: Uuid,
    ) -> impl Future<Output = CrmResult<Vec<Event>>> + Send;
    /// Events with no support contact assigned yet.
    fn list_without_support(&self) -> impl Future<Output = CrmResult<Vec<Event>>> + Send;
}
