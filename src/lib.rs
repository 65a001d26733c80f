//! Shift assignment and quota engine for Sunday volunteer rosters.
//!
//! Every Sunday has a morning (09:00) and an evening (18:00) shift with three
//! seats each. This crate keeps the volunteer roster and the shift store
//! consistent under assignment, unassignment and removal, derives the monthly
//! participation quota, and serves all of it over a small HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod messaging;
pub mod models;
pub mod persistence;
pub mod scheduling;
