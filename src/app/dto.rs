//! Emitter-facing output types: everything the code emitter consumes from
//! this subsystem, as plain serializable data.

use crate::domain::class::ClassId;
use crate::domain::init_entry::InitEntryPlan;
use crate::domain::services::ProviderDescriptor;
use serde::{Deserialize, Serialize};

/// One required trigger call inside a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSiteDto {
    pub method: String,
    pub block: usize,
    pub instr: usize,
    pub target: ClassId,
}

/// All trigger call sites for one class's method bodies, in
/// method/block/instruction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTriggerTable {
    pub class: ClassId,
    pub sites: Vec<TriggerSiteDto>,
}

/// The resolved, ordered, deduplicated provider table for one service
/// interface, to be embedded as static data in the generated program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTable {
    pub interface: ClassId,
    pub providers: Vec<ProviderDescriptor>,
}

/// The complete lowering result handed to the code emitter. All lists are
/// sorted by class/interface id so the output is byte-for-byte
/// deterministic regardless of scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoweringOutput {
    /// Trigger tables for classes that need at least one trigger call.
    pub triggers: Vec<ClassTriggerTable>,
    /// Init-entry plans for every class that gets a generated entry routine.
    pub init_entries: Vec<InitEntryPlan>,
    /// Provider tables for the requested service interfaces.
    pub services: Vec<ProviderTable>,
}
