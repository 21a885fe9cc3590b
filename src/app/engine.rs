use crate::app::dto::{ClassTriggerTable, LoweringOutput, ProviderTable, TriggerSiteDto};
use crate::domain::analyzer::TriggerAnalyzer;
use crate::domain::builder::GraphBuilder;
use crate::domain::class::{ClassDescriptor, ClassId};
use crate::domain::error::LoweringResult;
use crate::domain::graph::ClassGraph;
use crate::domain::init_entry::init_entry_plan;
use crate::domain::ports::{DescriptorSource, ServiceResourceProvider};
use crate::domain::services::ServiceResolver;
use anyhow::{Context as _, Result};
use tracing::info;

/// Orchestrates the lowering phases: graph construction, trigger analysis,
/// and service provider resolution. Owns the immutable class graph; every
/// phase is a pure function of it, so the combined output is identical
/// regardless of scheduling.
pub struct LoweringEngine {
    graph: ClassGraph,
}

impl LoweringEngine {
    pub fn new(descriptors: Vec<ClassDescriptor>) -> LoweringResult<Self> {
        let graph = GraphBuilder::new().build(descriptors)?;
        Ok(Self { graph })
    }

    /// Construct an engine from an external descriptor source (the front
    /// end's handoff), e.g. [`JsonDescriptorSource`](crate::adapters::json::descriptors::JsonDescriptorSource).
    pub fn from_source(source: &dyn DescriptorSource) -> Result<Self> {
        let descriptors = source.load().context("failed to load class descriptors")?;
        Ok(Self::new(descriptors)?)
    }

    pub fn graph(&self) -> &ClassGraph {
        &self.graph
    }

    /// Run trigger analysis over every class and resolve the requested
    /// service interfaces. Output lists are sorted by id, so the result is
    /// deterministic for a given graph and resource set.
    pub fn lower(
        &self,
        resources: Box<dyn ServiceResourceProvider>,
        service_interfaces: &[ClassId],
    ) -> LoweringResult<LoweringOutput> {
        let analyzer = TriggerAnalyzer::new();

        let mut class_ids: Vec<&ClassId> = self.graph.class_ids().collect();
        class_ids.sort();

        let mut triggers = Vec::new();
        let mut init_entries = Vec::new();
        for id in &class_ids {
            let sites: Vec<TriggerSiteDto> = analyzer
                .analyze_class(&self.graph, id)
                .iter()
                .flat_map(|method| {
                    method.sites.iter().map(|site| TriggerSiteDto {
                        method: method.method.clone(),
                        block: site.block,
                        instr: site.instr,
                        target: site.class.clone(),
                    })
                })
                .collect();
            if !sites.is_empty() {
                triggers.push(ClassTriggerTable {
                    class: (*id).clone(),
                    sites,
                });
            }
            if let Some(plan) = init_entry_plan(&self.graph, id) {
                init_entries.push(plan);
            }
        }

        let mut requested: Vec<ClassId> = service_interfaces.to_vec();
        requested.sort();
        requested.dedup();

        let mut resolver = ServiceResolver::new(&self.graph, resources);
        let mut services = Vec::new();
        for interface in &requested {
            let descriptor = resolver.resolve(interface)?;
            services.push(ProviderTable {
                interface: descriptor.interface.clone(),
                providers: descriptor.providers.clone(),
            });
        }

        info!(
            classes = self.graph.len(),
            trigger_tables = triggers.len(),
            init_entries = init_entries.len(),
            services = services.len(),
            "lowering complete"
        );

        Ok(LoweringOutput {
            triggers,
            init_entries,
            services,
        })
    }
}
