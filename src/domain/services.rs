//! Service Provider Resolver.
//!
//! Replaces the host language's runtime classpath scan for service providers
//! with a build-time resolution step. For each service interface the
//! resolver collects its configuration resources (the port supplies them in
//! a fixed, deterministic order), parses the tolerant line format, resolves
//! every named class against the class graph, and produces one ordered,
//! deduplicated provider table. Tables are built once and cached; later
//! requests for the same interface return the cached descriptor.
//!
//! Resource format: UTF-8 text, one fully qualified implementation class
//! name per line; a line whose first non-whitespace character is `#` is a
//! comment; blank lines are ignored; no other syntax is recognized.

use crate::domain::class::ClassId;
use crate::domain::error::{LoweringError, LoweringResult, ServiceInstantiationError};
use crate::domain::graph::ClassGraph;
use crate::domain::ports::ServiceResourceProvider;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// One resolved provider: the implementation class and the configuration
/// resource it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub class: ClassId,
    pub origin: String,
}

/// The resolved provider table for one service interface. Immutable after
/// resolution; provider order is first-seen across resources in resource
/// order, duplicates dropped keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub interface: ClassId,
    pub providers: Vec<ProviderDescriptor>,
}

impl ServiceDescriptor {
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// The lazy, single-pass instantiation sequence over this table.
    pub fn instantiate_with<I: ProviderInstantiator>(&self, instantiator: I) -> LazyProviders<'_, I> {
        LazyProviders {
            providers: self.providers.iter(),
            instantiator,
        }
    }
}

/// Service Provider Resolver - builds and caches provider tables.
pub struct ServiceResolver<'g> {
    graph: &'g ClassGraph,
    resources: Box<dyn ServiceResourceProvider>,
    cache: HashMap<ClassId, Arc<ServiceDescriptor>>,
}

impl<'g> ServiceResolver<'g> {
    pub fn new(graph: &'g ClassGraph, resources: Box<dyn ServiceResourceProvider>) -> Self {
        Self {
            graph,
            resources,
            cache: HashMap::new(),
        }
    }

    /// Resolve the provider table for `interface`. An interface with no
    /// configuration resources, or only blank/comment lines, resolves to an
    /// empty table; that is not an error.
    pub fn resolve(&mut self, interface: &str) -> LoweringResult<Arc<ServiceDescriptor>> {
        if let Some(cached) = self.cache.get(interface) {
            return Ok(Arc::clone(cached));
        }

        let resources = self.resources.resources_for(interface).map_err(|err| {
            LoweringError::ServiceConfigParse {
                service: interface.to_string(),
                message: format!("{err:#}"),
            }
        })?;

        let mut providers = Vec::new();
        let mut seen: HashSet<ClassId> = HashSet::new();
        for resource in &resources {
            for name in provider_names(&resource.content) {
                if !self.graph.contains(name) {
                    return Err(LoweringError::ProviderClassNotFound {
                        service: interface.to_string(),
                        provider: name.to_string(),
                        origin: resource.origin.clone(),
                    });
                }
                if !self.graph.is_assignable(name, interface) {
                    return Err(LoweringError::ProviderNotAssignable {
                        service: interface.to_string(),
                        provider: name.to_string(),
                        origin: resource.origin.clone(),
                    });
                }
                if seen.insert(name.to_string()) {
                    providers.push(ProviderDescriptor {
                        class: name.to_string(),
                        origin: resource.origin.clone(),
                    });
                }
            }
        }

        debug!(
            service = interface,
            resources = resources.len(),
            providers = providers.len(),
            "service providers resolved"
        );

        let descriptor = Arc::new(ServiceDescriptor {
            interface: interface.to_string(),
            providers,
        });
        self.cache
            .insert(interface.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }
}

/// Provider class names in one resource, in file order: trimmed lines,
/// skipping blanks and `#` comments.
fn provider_names(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// The generated program's seam for constructing one provider instance:
/// trigger the class's initialization, then its no-argument constructor.
pub trait ProviderInstantiator {
    type Instance;

    fn instantiate(&mut self, class: &ClassId) -> Result<Self::Instance, ServiceInstantiationError>;
}

/// Lazy, single-pass provider sequence: each advancement instantiates
/// exactly one provider, only when requested. Not restartable; a
/// construction failure surfaces at that step, not at table-build time, so
/// initialization side effects interleave with iteration exactly as the
/// rest of the program observes them.
pub struct LazyProviders<'d, I: ProviderInstantiator> {
    providers: std::slice::Iter<'d, ProviderDescriptor>,
    instantiator: I,
}

impl<I: ProviderInstantiator> Iterator for LazyProviders<'_, I> {
    type Item = Result<I::Instance, ServiceInstantiationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let provider = self.providers.next()?;
        Some(self.instantiator.instantiate(&provider.class))
    }
}
