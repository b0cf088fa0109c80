//! Row-level query functions. All take a borrowed `Connection`; the
//! engine owns locking.

pub mod audit_ops;
pub mod override_ops;
