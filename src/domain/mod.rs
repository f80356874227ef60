//! Domain layer: pure types and decision logic, no I/O.

pub mod call;
pub mod foundation;
pub mod intake;
pub mod scheduling;
