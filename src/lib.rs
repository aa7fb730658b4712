//! Payroll Engine for the Panama market
//!
//! This crate computes monthly and biweekly payrolls: salary normalization,
//! social-security and income-tax (ISR) withholding, and the thirteenth-month
//! bonus prorated by legal payment window.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
