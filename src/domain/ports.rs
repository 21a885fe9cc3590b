use crate::domain::class::ClassDescriptor;
use anyhow::Result;

/// One build-time service configuration resource: where it came from and its
/// UTF-8 text. The provider is responsible for a fixed, deterministic
/// resource order (e.g. classpath order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResource {
    pub origin: String,
    pub content: String,
}

/// Service configuration resource port (implemented by the build tool).
pub trait ServiceResourceProvider {
    /// All resources configuring `interface`, in a fixed deterministic
    /// order. An interface nobody configured yields an empty list.
    fn resources_for(&self, interface: &str) -> Result<Vec<ServiceResource>>;
}

/// Parsed class descriptor source port (implemented by the front end).
pub trait DescriptorSource {
    fn load(&self) -> Result<Vec<ClassDescriptor>>;
}
