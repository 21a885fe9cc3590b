//! Initialization Trigger Analyzer.
//!
//! For every instruction that actively uses a class C, decides whether a
//! trigger call to C's init-entry must be emitted immediately before the
//! instruction, or is provably redundant on every path reaching it.
//!
//! Per method body this is a forward must-dataflow over the control-flow
//! graph: the tracked fact is the set of classes certainly already triggered
//! on every path to a program point. Merges intersect. The analyzer never
//! tries to break static-initializer cycles; recursion safety is always the
//! init-entry routine's `InProgress` check.

use crate::domain::class::{ClassId, MethodBody, MethodKind};
use crate::domain::graph::ClassGraph;
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// One required trigger call: emit a call to `class`'s init-entry
/// immediately before instruction `instr` of block `block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSite {
    pub block: usize,
    pub instr: usize,
    pub class: ClassId,
}

/// Trigger sites for one method body, in block/instruction order.
#[derive(Debug, Clone)]
pub struct MethodTriggers {
    pub method: String,
    pub sites: Vec<TriggerSite>,
}

/// Trigger Analyzer - decides insertion versus elision. This phase never
/// fails: unresolved references were already rejected at graph-build time.
pub struct TriggerAnalyzer;

impl Default for TriggerAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze every method body owned by `class`.
    pub fn analyze_class(&self, graph: &ClassGraph, class: &str) -> Vec<MethodTriggers> {
        let Some(desc) = graph.descriptor(class) else {
            return Vec::new();
        };
        desc.methods
            .iter()
            .map(|method| self.analyze_method(graph, class, method))
            .collect()
    }

    /// Analyze a single method body.
    ///
    /// Entry fact: the declaring class itself for constructors (the
    /// superclass constructor has already run, so the instantiation that
    /// reached this body already triggered the class) and for the class's
    /// own static initializer (the state machine marks the class in-progress
    /// before the body runs, so a self-trigger would return immediately).
    pub fn analyze_method(
        &self,
        graph: &ClassGraph,
        declaring: &str,
        method: &MethodBody,
    ) -> MethodTriggers {
        let block_count = method.blocks.len();
        if block_count == 0 {
            return MethodTriggers {
                method: method.name.clone(),
                sites: Vec::new(),
            };
        }

        let mut entry = HashSet::new();
        if matches!(method.kind, MethodKind::Constructor | MethodKind::ClassInit) {
            entry.insert(declaring.to_string());
        }

        // Worklist fixpoint over block entry facts. `None` is the "not yet
        // reached" top element, so the first edge into a block seeds its
        // fact and later edges intersect into it.
        let mut input: Vec<Option<HashSet<ClassId>>> = vec![None; block_count];
        input[0] = Some(entry);
        let mut queued = vec![false; block_count];
        queued[0] = true;
        let mut worklist = VecDeque::from([0usize]);

        while let Some(block) = worklist.pop_front() {
            queued[block] = false;
            let Some(mut facts) = input[block].clone() else {
                continue;
            };
            transfer(graph, &method.blocks[block].instructions, &mut facts);

            for &succ in &method.blocks[block].successors {
                if succ >= block_count {
                    continue;
                }
                let merged = match &input[succ] {
                    None => Some(facts.clone()),
                    Some(old) => {
                        let merged: HashSet<ClassId> =
                            old.intersection(&facts).cloned().collect();
                        (merged.len() != old.len()).then_some(merged)
                    }
                };
                if let Some(merged) = merged {
                    input[succ] = Some(merged);
                    if !queued[succ] {
                        queued[succ] = true;
                        worklist.push_back(succ);
                    }
                }
            }
        }

        // Collection pass: walk blocks in index order, emitting a site for
        // every active use not certainly triggered yet.
        let mut sites = Vec::new();
        for (block_idx, block) in method.blocks.iter().enumerate() {
            let Some(entry_facts) = &input[block_idx] else {
                continue; // unreachable block
            };
            let mut facts = entry_facts.clone();
            for (instr_idx, instr) in block.instructions.iter().enumerate() {
                if let Some(class) = instr.active_use()
                    && needs_tracking(graph, class)
                    && !facts.contains(class)
                {
                    sites.push(TriggerSite {
                        block: block_idx,
                        instr: instr_idx,
                        class: class.clone(),
                    });
                    facts.insert(class.clone());
                }
            }
        }

        trace!(
            class = declaring,
            method = method.name.as_str(),
            sites = sites.len(),
            "trigger analysis done"
        );
        MethodTriggers {
            method: method.name.clone(),
            sites,
        }
    }
}

/// A class without an init-entry (no static initializer anywhere on its
/// superclass chain) never needs a trigger: the call would be a no-op in
/// generated code, so every use of it is elided outright.
fn needs_tracking(graph: &ClassGraph, class: &str) -> bool {
    graph.requires_init_entry(class)
}

fn transfer(graph: &ClassGraph, instructions: &[crate::domain::class::Instruction], facts: &mut HashSet<ClassId>) {
    for instr in instructions {
        if let Some(class) = instr.active_use()
            && needs_tracking(graph, class)
        {
            facts.insert(class.clone());
        }
    }
}
