//! US States Fun-Facts API
//!
//! This crate serves reference data for the fifty US states merged with a
//! persisted, user-editable list of fun facts per state.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod event_log;
pub mod models;
pub mod services;
pub mod store;
