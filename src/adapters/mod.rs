// Adapters layer: concrete implementations of the domain ports.

pub mod memory;
pub mod rest_store;

pub use memory::{InMemorySubmissionStore, MemoryStateStore};
pub use rest_store::RestSubmissionStore;
