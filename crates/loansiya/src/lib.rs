//! Core library for the LoanSiya loan-origination service.
//!
//! Houses the credit-scoring engine, the loan policy advisor, and the
//! client-store abstraction the HTTP and CLI front ends are built on.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
