//! Object storage for uploaded CSV payloads.
//!
//! The storage boundary is a port: csvtrack persists uploaded bytes under a
//! server-derived key and records only the durable location the store hands
//! back. The production object-storage client is an external collaborator
//! implementing [`ports::ObjectStore`]; the adapters here cover tests and
//! local development.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
