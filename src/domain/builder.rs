use crate::domain::class::ClassDescriptor;
use crate::domain::edge::EdgeKind;
use crate::domain::error::{LoweringError, LoweringResult};
use crate::domain::graph::ClassGraph;
use tracing::debug;

/// Graph builder - constructs the [`ClassGraph`] from one batch of parsed
/// descriptors.
///
/// Two passes, so results never depend on descriptor order: first allocate
/// every node, then resolve and wire declared hierarchy edges. A declared
/// superclass or interface that cannot be resolved against the batch is a
/// [`LoweringError::Link`] and blocks the affected class's compilation.
pub struct GraphBuilder;

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, descriptors: Vec<ClassDescriptor>) -> LoweringResult<ClassGraph> {
        let mut graph = ClassGraph::new();

        // Pass 1: node allocation.
        for descriptor in descriptors {
            graph.add_class(descriptor);
        }
        debug!(classes = graph.len(), "allocated class graph nodes");

        // Pass 2: hierarchy edge wiring.
        let indices: Vec<_> = graph.graph.node_indices().collect();
        for idx in indices {
            let (id, superclass, interfaces) = {
                let desc = &graph.graph[idx];
                (desc.id.clone(), desc.superclass.clone(), desc.interfaces.clone())
            };

            if let Some(superclass) = superclass {
                let target = graph
                    .get(&superclass)
                    .ok_or_else(|| LoweringError::Link {
                        class: id.clone(),
                        missing: superclass.clone(),
                    })?;
                graph.add_edge(idx, target, EdgeKind::Extends);
            }

            for interface in interfaces {
                let target = graph.get(&interface).ok_or_else(|| LoweringError::Link {
                    class: id.clone(),
                    missing: interface.clone(),
                })?;
                graph.add_edge(idx, target, EdgeKind::Implements);
            }
        }
        debug!(
            classes = graph.len(),
            edges = graph.graph.edge_count(),
            "class graph built"
        );

        Ok(graph)
    }
}
