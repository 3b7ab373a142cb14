//! Read-only data backing the tools.
//!
//! Tools only see the `CustomerStore` trait. The shipped implementation is an
//! in-memory table built once at startup and shared behind an `Arc`.

mod memory;
mod records;

pub use memory::InMemoryCustomerStore;
pub use records::CustomerRecord;

use async_trait::async_trait;

use crate::error::Result;

/// Lookup interface over customer records
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Fetch one record; `Ok(None)` when the identifier is unknown
    async fn find(&self, customer_id: &str) -> Result<Option<CustomerRecord>>;
}
