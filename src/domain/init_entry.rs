//! Init-Entry Contract: the shape every generated per-class initialization
//! routine must satisfy, plus an executable reference implementation.
//!
//! The contract is a four-state machine per class:
//!
//! - `Initialized`: return immediately, no side effects.
//! - `InProgress`: return immediately without running the body and without
//!   error. This is the safe re-entrancy path for cyclic or self
//!   dependencies encountered while the class is already initializing.
//! - `Erroneous`: fail deterministically with a wrapped error equivalent to
//!   the one recorded when the class first failed; the body is never re-run.
//! - `Uninitialized`: mark `InProgress`, ensure each ancestor (furthest
//!   first, excluding the class itself) or propagate its failure, run the
//!   static-initializer body, then mark `Initialized` on success or
//!   `Erroneous` on failure and propagate a wrapped error.
//!
//! `Uninitialized` is initial; `Initialized` and `Erroneous` are terminal.
//! The model is single-threaded and cooperative: the `InProgress` check is a
//! plain reentrancy guard, never a lock.
//!
//! [`InitRuntime`] realizes this machine literally. Code emitters must
//! produce target code with exactly these observable semantics; the
//! conformance tests in this crate run their scenarios against the runtime.

use crate::domain::class::ClassId;
use crate::domain::error::InitializationError;
use crate::domain::graph::ClassGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-class initialization state in the generated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    InProgress,
    Initialized,
    Erroneous,
}

/// What the emitter needs to generate one class's init-entry: the ancestors
/// to ensure first (only those that themselves have an init-entry, furthest
/// ancestor first) and whether this class contributes a body of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitEntryPlan {
    pub class: ClassId,
    pub ancestors: Vec<ClassId>,
    pub has_clinit: bool,
}

/// The init-entry plan for `class`, or `None` when no entry is generated
/// (neither the class nor any superclass declares a static initializer).
pub fn init_entry_plan(graph: &ClassGraph, class: &str) -> Option<InitEntryPlan> {
    if !graph.requires_init_entry(class) {
        return None;
    }
    let mut ancestors = graph.ancestors_in_order(class);
    ancestors.pop(); // the class itself
    ancestors.retain(|c| graph.requires_init_entry(c));
    Some(InitEntryPlan {
        class: class.to_string(),
        ancestors,
        has_clinit: graph
            .descriptor(class)
            .is_some_and(|d| d.has_clinit()),
    })
}

/// A static-initializer body in the reference runtime. Bodies may re-enter
/// the runtime (that is the point of the reentrancy guard).
pub type InitBody = Box<dyn FnMut(&mut InitRuntime) -> Result<(), String>>;

/// Reference implementation of the init-entry state machine.
///
/// Holds the per-class state, the recorded first failure per erroneous
/// class, and the registered bodies. A body is consumed when it runs, so it
/// can never execute twice.
pub struct InitRuntime {
    plans: HashMap<ClassId, InitEntryPlan>,
    states: HashMap<ClassId, InitState>,
    failures: HashMap<ClassId, InitializationError>,
    bodies: HashMap<ClassId, InitBody>,
}

impl InitRuntime {
    pub fn new(graph: &ClassGraph) -> Self {
        let mut plans = HashMap::new();
        for id in graph.class_ids() {
            if let Some(plan) = init_entry_plan(graph, id) {
                plans.insert(id.clone(), plan);
            }
        }
        Self {
            plans,
            states: HashMap::new(),
            failures: HashMap::new(),
            bodies: HashMap::new(),
        }
    }

    /// Register the executable body for a class's static initializer.
    pub fn register_body(
        &mut self,
        class: impl Into<ClassId>,
        body: impl FnMut(&mut InitRuntime) -> Result<(), String> + 'static,
    ) {
        self.bodies.insert(class.into(), Box::new(body));
    }

    pub fn state(&self, class: &str) -> InitState {
        self.states
            .get(class)
            .copied()
            .unwrap_or(InitState::Uninitialized)
    }

    /// The init-entry routine: ensure `class` reaches `Initialized`, or fail
    /// the way the generated program would.
    pub fn ensure_initialized(&mut self, class: &str) -> Result<(), InitializationError> {
        match self.state(class) {
            InitState::Initialized | InitState::InProgress => return Ok(()),
            InitState::Erroneous => {
                return Err(self.recorded_failure(class));
            }
            InitState::Uninitialized => {}
        }

        let Some(plan) = self.plans.get(class).cloned() else {
            // No init-entry is generated for this class; a trigger to it
            // would have been elided as well.
            return Ok(());
        };

        self.states.insert(class.to_string(), InitState::InProgress);

        for ancestor in &plan.ancestors {
            if let Err(err) = self.ensure_initialized(ancestor) {
                self.fail(class, err.clone());
                return Err(err);
            }
        }

        if plan.has_clinit
            && let Some(mut body) = self.bodies.remove(class)
        {
            if let Err(cause) = body(self) {
                let err = InitializationError {
                    class: class.to_string(),
                    cause,
                };
                self.fail(class, err.clone());
                return Err(err);
            }
        }

        self.states.insert(class.to_string(), InitState::Initialized);
        Ok(())
    }

    fn fail(&mut self, class: &str, err: InitializationError) {
        self.states.insert(class.to_string(), InitState::Erroneous);
        self.failures.insert(class.to_string(), err);
    }

    fn recorded_failure(&self, class: &str) -> InitializationError {
        self.failures
            .get(class)
            .cloned()
            .unwrap_or_else(|| InitializationError {
                class: class.to_string(),
                cause: "class initialization failed previously".into(),
            })
    }
}
