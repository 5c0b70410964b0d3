//! SurrealDB implementations of the `meridian-core` repository traits.

mod client;
mod contract;
mod event;
mod staff;

pub use client::SurrealClientRepository;
pub use contract::SurrealContractRepository;
pub use event::SurrealEventRepository;
pub use staff::SurrealStaffRepository;
