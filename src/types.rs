//! Type-safe handles for BDD nodes and symbolic variables.
//!
//! This module provides newtype wrappers that enforce compile-time
//! distinction between node identifiers and variable indices, preventing
//! common mistakes in BDD manipulation code.
use std::fmt;

/// A node identifier: the stable integer handle for a node in the table.
///
/// # Invariants
///
/// - `FALSE` is always 0 and `TRUE` is always 1
/// - Internal nodes are numbered from 2 upward in allocation order
/// - An id is never reissued, even after the node it named is swept
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The FALSE terminal.
    pub const FALSE: Self = NodeId(0);
    /// The TRUE terminal.
    pub const TRUE: Self = NodeId(1);

    /// Creates a node id from its raw integer value.
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Returns the raw integer value of this id.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Checks whether this id names one of the two terminals.
    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A symbolic variable, identified by its position in the global
/// declaration order.
///
/// Comparing two `Var`s compares their positions, so the ROBDD ordering
/// invariant ("variables strictly increase along every path") is a plain
/// `<` on `Var`. The position-to-name mapping lives in the
/// [`Bdd`][crate::bdd::Bdd] manager and is append-only: a `Var` handed out
/// once stays valid for the life of the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a variable from its position in the declaration order.
    pub const fn new(index: u32) -> Self {
        Var(index)
    }

    /// Returns the position of this variable in the declaration order.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
