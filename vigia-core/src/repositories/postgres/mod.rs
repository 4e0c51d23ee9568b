// src/repositories/postgres/mod.rs
//
// Postgres implementations of the storage-collaborator traits. Every
// repository holds both pools and routes each query to the privilege
// level it needs: creation and ledger appends run on the service pool,
// everything else on the restricted pool.

pub mod company;
pub mod entry;
pub mod receivable;
pub mod user;
