//! Leave Engine
//!
//! This crate classifies calendar days against holidays and leave requests,
//! aggregates per-employee leave entitlements, validates leave submissions
//! against yearly allowances, and exposes the leave request workflow over
//! an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
