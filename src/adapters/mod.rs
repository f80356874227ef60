//! Adapters: concrete implementations of the ports.
//!
//! In-memory implementations suit tests and single-process deployments;
//! production deployments substitute their own (e.g. a Redis-backed
//! session store, the telephony provider's SMS API as the notifier).

pub mod memory;
pub mod notify;
pub mod scheduling;
pub mod validation;
