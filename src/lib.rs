//! Payroll engine for Rwandan monthly payroll sheets.
//!
//! This crate finds the gross salary that yields a requested take-home pay
//! after PAYE, RSSB pension, maternity and CBHI deductions, and folds a month
//! of payroll rows into per-category summaries and period totals.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

pub use calculation::compute_gross_for_take_home;
