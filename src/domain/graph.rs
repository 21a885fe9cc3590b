use crate::domain::class::{ClassDescriptor, ClassId};
use crate::domain::edge::EdgeKind;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Class Metadata Graph - the whole-program structural graph.
///
/// Nodes own the parsed [`ClassDescriptor`]s; edges are the declared
/// hierarchy ([`EdgeKind::Extends`] / [`EdgeKind::Implements`]). Append-only:
/// built once by the [`GraphBuilder`](crate::domain::builder::GraphBuilder)
/// in a single batch pass and read-only afterwards.
#[derive(Debug)]
pub struct ClassGraph {
    /// The directed graph of classes and hierarchy edges.
    pub graph: DiGraph<ClassDescriptor, EdgeKind>,

    /// Mapping from class id to node index.
    pub class_to_node: HashMap<ClassId, NodeIndex>,
}

impl Default for ClassGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            class_to_node: HashMap::new(),
        }
    }

    /// Append a descriptor node. Hierarchy validation and edge wiring belong
    /// to the builder, which sees the whole batch.
    pub fn add_class(&mut self, descriptor: ClassDescriptor) -> NodeIndex {
        let id = descriptor.id.clone();
        let idx = self.graph.add_node(descriptor);
        self.class_to_node.insert(id, idx);
        idx
    }

    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, kind: EdgeKind) {
        self.graph.add_edge(source, target, kind);
    }

    pub fn get(&self, class: &str) -> Option<NodeIndex> {
        self.class_to_node.get(class).copied()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.class_to_node.contains_key(class)
    }

    pub fn descriptor(&self, class: &str) -> Option<&ClassDescriptor> {
        self.get(class).map(|idx| &self.graph[idx])
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All class ids, in unspecified order. Callers that produce output must
    /// sort (see the engine), so scheduling never leaks into results.
    pub fn class_ids(&self) -> impl Iterator<Item = &ClassId> {
        self.class_to_node.keys()
    }

    /// Superclass chain from the furthest ancestor down to the class itself.
    /// Used to sequence nested initialization. Unknown classes yield an
    /// empty chain.
    pub fn ancestors_in_order(&self, class: &str) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.descriptor(class);
        while let Some(desc) = current {
            if !seen.insert(desc.id.clone()) {
                break;
            }
            chain.push(desc.id.clone());
            current = desc.superclass.as_deref().and_then(|s| self.descriptor(s));
        }
        chain.reverse();
        chain
    }

    /// The set of classes directly touched by active-use instructions in any
    /// method body of `class`. Derived, never stored: recomputed from the
    /// descriptor on each call.
    pub fn referenced_classes(&self, class: &str) -> BTreeSet<ClassId> {
        let mut referenced = BTreeSet::new();
        if let Some(desc) = self.descriptor(class) {
            for method in &desc.methods {
                for block in &method.blocks {
                    for instr in &block.instructions {
                        if let Some(target) = instr.active_use() {
                            referenced.insert(target.clone());
                        }
                    }
                }
            }
        }
        referenced
    }

    /// True when `sub` is `target` or reaches it through the superclass
    /// chain and the transitive interface closure.
    pub fn is_assignable(&self, sub: &str, target: &str) -> bool {
        if sub == target {
            return true;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(sub);
        seen.insert(sub);
        while let Some(current) = queue.pop_front() {
            let Some(desc) = self.descriptor(current) else {
                continue;
            };
            for parent in desc
                .superclass
                .as_deref()
                .into_iter()
                .chain(desc.interfaces.iter().map(String::as_str))
            {
                if parent == target {
                    return true;
                }
                if seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        false
    }

    /// True when the class needs a generated init-entry routine: it declares
    /// a static initializer, or some ancestor on its superclass chain does.
    /// Interfaces never inherit this from implementors or extenders; they
    /// need an entry only for their own static initializer.
    pub fn requires_init_entry(&self, class: &str) -> bool {
        self.ancestors_in_order(class)
            .iter()
            .any(|c| self.descriptor(c).is_some_and(ClassDescriptor::has_clinit))
    }
}
