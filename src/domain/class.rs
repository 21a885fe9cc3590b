//! Parsed class descriptors: the contract between the bytecode front end and
//! the lowering core.
//!
//! The front end parses class files into this shape and hands the whole batch
//! over at once. Method bodies are opaque instruction streams queryable only
//! for the handful of instruction kinds that constitute an *active use* of a
//! class (static field access, static invocation, instantiation, class
//! literal). Everything else is [`Instruction::Other`].

use serde::{Deserialize, Serialize};

/// Class identifier: fully qualified class name.
pub type ClassId = String;

/// Whether a descriptor declares a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
}

/// A single instruction, reduced to what the lowering core can query.
///
/// `GetStatic` with `constant: true` marks a compile-time constant field
/// read, which does not count as an active use. `ClassLiteral` names the
/// class whose literal is taken, never its supertypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    GetStatic { class: ClassId, constant: bool },
    PutStatic { class: ClassId },
    InvokeStatic { class: ClassId },
    New { class: ClassId },
    ClassLiteral { class: ClassId },
    Other,
}

impl Instruction {
    /// The class this instruction actively uses, if any: the class that must
    /// be initialized before the instruction executes.
    pub fn active_use(&self) -> Option<&ClassId> {
        match self {
            Instruction::GetStatic { constant: true, .. } => None,
            Instruction::GetStatic { class, .. }
            | Instruction::PutStatic { class }
            | Instruction::InvokeStatic { class }
            | Instruction::New { class }
            | Instruction::ClassLiteral { class } => Some(class),
            Instruction::Other => None,
        }
    }
}

/// Method kind, as far as trigger analysis cares.
///
/// A `Constructor` body runs only after the superclass constructor has run,
/// so its declaring class is already initialized on entry. A `ClassInit`
/// body runs with its declaring class already marked in-progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Static,
    Instance,
    Constructor,
    ClassInit,
}

/// One basic block of a method's control-flow graph. `successors` are block
/// indices into [`MethodBody::blocks`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicBlock {
    pub instructions: Vec<Instruction>,
    pub successors: Vec<usize>,
}

/// A method body as a control-flow graph. Block 0 is the entry block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodBody {
    pub name: String,
    pub kind: MethodKind,
    pub blocks: Vec<BasicBlock>,
}

impl MethodBody {
    /// Straight-line body with a single block.
    pub fn linear(
        name: impl Into<String>,
        kind: MethodKind,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            blocks: vec![BasicBlock {
                instructions,
                successors: vec![],
            }],
        }
    }
}

/// A parsed class: identity, declared hierarchy, and method bodies.
///
/// The static-initializer body, when present, is the method with
/// [`MethodKind::ClassInit`] (field initializers plus static blocks, already
/// flattened in declaration order by the front end). Descriptors are
/// immutable once added to the [`ClassGraph`](crate::domain::graph::ClassGraph).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub id: ClassId,
    pub kind: ClassKind,
    pub superclass: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub methods: Vec<MethodBody>,
}

impl ClassDescriptor {
    /// The static-initializer body, if the class declares one.
    pub fn clinit(&self) -> Option<&MethodBody> {
        self.methods.iter().find(|m| m.kind == MethodKind::ClassInit)
    }

    pub fn has_clinit(&self) -> bool {
        self.clinit().is_some()
    }
}
