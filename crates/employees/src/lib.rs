//! Employees domain module.
//!
//! Plain employee records and the payload used to create or replace them.
//! No IO, no HTTP, no storage.

pub mod employee;

pub use employee::{Employee, EmployeeId, NewEmployee};
