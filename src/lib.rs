//! Call Intake - Phone-Driven Healthcare Intake Core
//!
//! This crate implements the session state machine for an inbound phone
//! intake line: collecting healthcare fields from a caller, offering
//! appointment slots, and confirming a booking. Telephony transport,
//! speech recognition, and the scheduling backend are external
//! collaborators consumed through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
