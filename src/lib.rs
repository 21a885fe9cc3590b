//! init-lowering — compile-time lowering of lazy class initialization and
//! build-time service discovery for an ahead-of-time bytecode compiler.
//!
//! The target has no classloader and no reflection, so two pieces of
//! dynamic semantics are resolved at compile time: exactly-once static
//! class initialization (trigger analysis plus a per-class init-entry
//! contract) and service provider discovery (deterministic, immutable
//! provider tables resolved from build-time configuration resources).

pub mod adapters;
pub mod app;
pub mod domain;
