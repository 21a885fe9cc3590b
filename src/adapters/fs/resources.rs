use crate::domain::ports::{ServiceResource, ServiceResourceProvider};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Default logical prefix for service configuration resources.
pub const DEFAULT_RESOURCE_PREFIX: &str = "META-INF/services";

/// Filesystem service resource provider.
///
/// Roots are searched in the given order (classpath order); the logical
/// resource path is `<root>/<prefix>/<interface FQN>`. A missing file is an
/// absent resource, not an error.
pub struct FsResourceProvider {
    roots: Vec<PathBuf>,
    prefix: String,
}

impl FsResourceProvider {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl ServiceResourceProvider for FsResourceProvider {
    fn resources_for(&self, interface: &str) -> Result<Vec<ServiceResource>> {
        let mut resources = Vec::new();
        for root in &self.roots {
            let path = root.join(&self.prefix).join(interface);
            match std::fs::read_to_string(&path) {
                Ok(content) => resources.push(ServiceResource {
                    origin: path.display().to_string(),
                    content,
                }),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("failed to read service resource: {}", path.display())
                    });
                }
            }
        }
        Ok(resources)
    }
}
