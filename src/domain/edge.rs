/// Edge kind - structural relationships stored in the class graph.
///
/// Active-use dependencies (`uses(A, B)`) are deliberately *not* graph edges:
/// they are derived on demand from method bodies via
/// [`ClassGraph::referenced_classes`](crate::domain::graph::ClassGraph::referenced_classes),
/// so the graph stays append-only and purely structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Class → declared superclass (or interface → extended interface).
    Extends,
    /// Class → directly implemented interface.
    Implements,
}
