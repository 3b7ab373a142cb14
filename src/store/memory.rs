//! In-memory customer table.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{CustomerRecord, CustomerStore};
use crate::error::Result;

/// Read-only customer table keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerStore {
    records: HashMap<String, CustomerRecord>,
}

impl InMemoryCustomerStore {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the built-in demo customer
    pub fn seeded() -> Self {
        Self::from_records([CustomerRecord::new("CUST001", "Rajesh Kumar", 75000, 750)])
    }

    /// Build a table; later records replace earlier ones with the same id
    pub fn from_records(records: impl IntoIterator<Item = CustomerRecord>) -> Self {
        let mut store = Self::new();
        store.extend(records);
        store
    }

    /// Merge records in, replacing any with the same id
    pub fn extend(&mut self, records: impl IntoIterator<Item = CustomerRecord>) {
        for record in records {
            self.records.insert(record.customer_id.clone(), record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find(&self, customer_id: &str) -> Result<Option<CustomerRecord>> {
        Ok(self.records.get(customer_id).cloned())
    }
}
