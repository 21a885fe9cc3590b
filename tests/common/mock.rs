//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use init_lowering::domain::class::ClassId;
use init_lowering::domain::error::ServiceInstantiationError;
use init_lowering::domain::init_entry::InitRuntime;
use init_lowering::domain::ports::{ServiceResource, ServiceResourceProvider};
use init_lowering::domain::services::ProviderInstantiator;

/// Mock resource provider serving configuration resources from memory, in
/// insertion order per interface.
pub struct MockResourceProvider {
    resources: HashMap<String, Vec<ServiceResource>>,
    fail_for: Option<String>,
}

impl MockResourceProvider {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
            fail_for: None,
        }
    }

    pub fn with_resource(
        mut self,
        interface: impl Into<String>,
        origin: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.resources
            .entry(interface.into())
            .or_default()
            .push(ServiceResource {
                origin: origin.into(),
                content: content.into(),
            });
        self
    }

    /// Simulate a collaborator-side read failure for one interface.
    pub fn failing_for(mut self, interface: impl Into<String>) -> Self {
        self.fail_for = Some(interface.into());
        self
    }
}

impl Default for MockResourceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceResourceProvider for MockResourceProvider {
    fn resources_for(&self, interface: &str) -> Result<Vec<ServiceResource>> {
        if self.fail_for.as_deref() == Some(interface) {
            return Err(anyhow!("resource read failed for {interface}"));
        }
        Ok(self.resources.get(interface).cloned().unwrap_or_default())
    }
}

/// A constructed provider instance with a tracked method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub class: ClassId,
    pub output: String,
    pub calls: u32,
}

impl ServiceInstance {
    /// The tracked method: advances the call counter and returns the
    /// configured output.
    pub fn invoke(&mut self) -> &str {
        self.calls += 1;
        &self.output
    }
}

/// Mock instantiator: records construction order, returns configurable
/// outputs, and can be told to fail construction of specific classes.
pub struct MockInstantiator {
    outputs: HashMap<ClassId, String>,
    failures: HashMap<ClassId, String>,
    pub instantiated: Rc<RefCell<Vec<ClassId>>>,
}

impl MockInstantiator {
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
            failures: HashMap::new(),
            instantiated: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_output(mut self, class: impl Into<ClassId>, output: impl Into<String>) -> Self {
        self.outputs.insert(class.into(), output.into());
        self
    }

    pub fn failing(mut self, class: impl Into<ClassId>, message: impl Into<String>) -> Self {
        self.failures.insert(class.into(), message.into());
        self
    }
}

impl Default for MockInstantiator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderInstantiator for MockInstantiator {
    type Instance = ServiceInstance;

    fn instantiate(&mut self, class: &ClassId) -> Result<ServiceInstance, ServiceInstantiationError> {
        if let Some(message) = self.failures.get(class) {
            return Err(ServiceInstantiationError::Construction {
                class: class.clone(),
                message: message.clone(),
            });
        }
        self.instantiated.borrow_mut().push(class.clone());
        Ok(ServiceInstance {
            class: class.clone(),
            output: self.outputs.get(class).cloned().unwrap_or_else(|| class.clone()),
            calls: 0,
        })
    }
}

/// Instantiator wired to the reference init runtime: each construction
/// first ensures the provider class is initialized, the way generated code
/// would.
pub struct InitAwareInstantiator {
    pub runtime: Rc<RefCell<InitRuntime>>,
    pub constructed: Rc<RefCell<Vec<ClassId>>>,
}

impl InitAwareInstantiator {
    pub fn new(runtime: Rc<RefCell<InitRuntime>>) -> Self {
        Self {
            runtime,
            constructed: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ProviderInstantiator for InitAwareInstantiator {
    type Instance = ClassId;

    fn instantiate(&mut self, class: &ClassId) -> Result<ClassId, ServiceInstantiationError> {
        self.runtime
            .borrow_mut()
            .ensure_initialized(class)
            .map_err(|source| ServiceInstantiationError::Initialization {
                class: class.clone(),
                source,
            })?;
        self.constructed.borrow_mut().push(class.clone());
        Ok(class.clone())
    }
}
