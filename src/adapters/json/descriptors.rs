use crate::domain::class::ClassDescriptor;
use crate::domain::ports::DescriptorSource;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Descriptor source reading the front end's JSON handoff: a single file
/// holding the full batch of parsed class descriptors.
pub struct JsonDescriptorSource {
    path: PathBuf,
}

impl JsonDescriptorSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DescriptorSource for JsonDescriptorSource {
    fn load(&self) -> Result<Vec<ClassDescriptor>> {
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("failed to read descriptor file: {}", self.path.display())
        })?;
        serde_json::from_str(&content).with_context(|| {
            format!("failed to parse descriptor JSON: {}", self.path.display())
        })
    }
}
