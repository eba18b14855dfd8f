//! Task lifecycle management for csvtrack.
//!
//! A task tracks one CSV-processing job: the durable reference to the
//! uploaded file, the job's current lifecycle status, and the bookkeeping
//! fields an external worker fills in as it completes or fails the job.
//! Status changes are only possible through the validated conditional
//! update exposed by the repository port, which makes the backing store the
//! sole serialization point for concurrent transitions. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
