//! Port contracts for the storage boundary.

pub mod object_store;

pub use object_store::{ObjectStore, ObjectStoreError, ObjectStoreResult, PayloadReader};
