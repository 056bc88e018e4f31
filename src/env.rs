//! The interpreter environment.
//!
//! One namespace maps user names to either a symbolic decision variable or
//! a bound BDD. The `preserved` bit on bound entries is the root-set marker
//! for [`sweep`][crate::interp::Interp::sweep].

use rustc_hash::FxHashMap;

use crate::types::{NodeId, Var};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A declared decision variable.
    Symbolic(Var),
    /// A name bound to a diagram via `set`.
    Bound { id: NodeId, preserved: bool },
}

#[derive(Debug, Default)]
pub struct Env {
    globals: FxHashMap<String, Binding>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Binding> {
        self.globals.get(name).copied()
    }

    pub fn insert_symbolic(&mut self, name: &str, var: Var) {
        self.globals.insert(name.to_owned(), Binding::Symbolic(var));
    }

    /// Binds `name` to `id`, keeping the preserved bit of a previous
    /// binding if there was one.
    pub fn bind(&mut self, name: &str, id: NodeId) {
        let preserved = matches!(
            self.globals.get(name),
            Some(Binding::Bound { preserved: true, .. })
        );
        self.globals
            .insert(name.to_owned(), Binding::Bound { id, preserved });
    }

    /// Flips the preserved bit of a bound entry. Returns `false` when
    /// `name` is not bound to a diagram.
    pub fn set_preserved(&mut self, name: &str, flag: bool) -> bool {
        match self.globals.get_mut(name) {
            Some(Binding::Bound { preserved, .. }) => {
                *preserved = flag;
                true
            }
            _ => false,
        }
    }

    pub fn set_all_preserved(&mut self, flag: bool) {
        for binding in self.globals.values_mut() {
            if let Binding::Bound { preserved, .. } = binding {
                *preserved = flag;
            }
        }
    }

    /// Drops every non-preserved bound entry. Symbolic entries are
    /// untouched.
    pub fn retain_preserved(&mut self) {
        self.globals
            .retain(|_, binding| !matches!(binding, Binding::Bound { preserved: false, .. }));
    }

    /// Ids of all bound entries, the sweep root set.
    pub fn bound_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.globals.values().filter_map(|binding| match binding {
            Binding::Bound { id, .. } => Some(*id),
            Binding::Symbolic(_) => None,
        })
    }
}
