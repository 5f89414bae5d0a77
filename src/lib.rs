//! Rollbook - Recurring Class-Session Generation
//!
//! This crate expands weekly schedule rules and per-class exception calendars
//! into concrete session instances for every tenant of an academy platform,
//! idempotently and with per-class failure isolation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
