//! Error taxonomy for the lowering core.
//!
//! Compile-time errors ([`LoweringError`]) are fatal for the affected
//! compilation unit and surface to the surrounding build tool as diagnostics.
//! [`InitializationError`] and [`ServiceInstantiationError`] describe
//! conditions observed by the *generated* program; the compile-time crate
//! carries them because the reference init runtime and the lazy provider
//! sequence realize those contracts for conformance testing.

use crate::domain::class::ClassId;
use thiserror::Error;

pub type LoweringResult<T> = Result<T, LoweringError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    #[error("link error in {class}: unresolved reference to {missing}")]
    Link { class: ClassId, missing: ClassId },

    #[error("service {service}: provider class {provider} not found (declared in {origin})")]
    ProviderClassNotFound {
        service: ClassId,
        provider: ClassId,
        origin: String,
    },

    #[error("service {service}: provider class {provider} is not assignable to the service interface (declared in {origin})")]
    ProviderNotAssignable {
        service: ClassId,
        provider: ClassId,
        origin: String,
    },

    #[error("failed to read service configuration for {service}: {message}")]
    ServiceConfigParse { service: ClassId, message: String },
}

/// A wrapped failure from a class's static-initializer body.
///
/// Once raised, the class is permanently erroneous: every later use re-raises
/// an equivalent error without re-running any side effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("initialization of class {class} failed: {cause}")]
pub struct InitializationError {
    pub class: ClassId,
    pub cause: String,
}

/// Initializer bodies report failures as plain cause strings; a nested
/// initialization failure propagates as its rendered message.
impl From<InitializationError> for String {
    fn from(err: InitializationError) -> Self {
        err.to_string()
    }
}

/// Failure while advancing a lazy provider sequence: either the provider
/// class failed to initialize, or its no-argument construction failed.
/// Surfaces at the failing advancement step, never at table-build time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceInstantiationError {
    #[error("service provider {class} failed to initialize")]
    Initialization {
        class: ClassId,
        #[source]
        source: InitializationError,
    },

    #[error("service provider {class} construction failed: {message}")]
    Construction { class: ClassId, message: String },
}
