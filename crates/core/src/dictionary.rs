//! The word dictionary
//!
//! Maps names to definitions. Primitives and user words live in the same
//! namespace, so `def` can shadow a primitive and lookup stays uniform.
//!
//! Bindings hold values, not references: `alias` copies the definition the
//! existing name has *right now*, so redefining the original later never
//! changes the alias.

use crate::error::{ErrorKind, EvalResult};
use crate::primitives::Primitive;
use crate::reader::Token;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::debug;

/// What a name is bound to
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Native operation
    Primitive(Primitive),
    /// Token sequence bound by `def`
    User(Rc<[Token]>),
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, Definition>,
    /// existing name -> aliases still sharing its definition (for listings only)
    aliases: HashMap<String, Vec<String>>,
}

impl Dictionary {
    /// An empty dictionary with no primitives
    pub fn empty() -> Self {
        Dictionary::default()
    }

    /// A dictionary holding every primitive
    pub fn new() -> Self {
        let mut dict = Dictionary::empty();
        for &prim in Primitive::ALL {
            dict.entries
                .insert(prim.name().to_string(), Definition::Primitive(prim));
        }
        dict
    }

    pub fn lookup(&self, name: &str) -> Option<&Definition> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bind `name`, replacing any earlier binding
    pub fn define(&mut self, name: impl Into<String>, definition: Definition) {
        let name = name.into();
        debug!(word = %name, "define");
        self.forget_aliases(&name);
        self.entries.insert(name, definition);
    }

    /// Bind `new_name` to a copy of the current definition of `existing`
    pub fn alias(&mut self, new_name: impl Into<String>, existing: &str) -> EvalResult<()> {
        let definition = self
            .entries
            .get(existing)
            .cloned()
            .ok_or_else(|| ErrorKind::UnknownWord(existing.to_string()))?;
        let new_name = new_name.into();
        debug!(word = %new_name, target = %existing, "alias");
        if new_name != existing {
            self.forget_aliases(&new_name);
            self.aliases
                .entry(existing.to_string())
                .or_default()
                .push(new_name.clone());
        }
        self.entries.insert(new_name, definition);
        Ok(())
    }

    /// A rebound name no longer shares a definition with any alias link
    fn forget_aliases(&mut self, name: &str) {
        self.aliases.remove(name);
        for names in self.aliases.values_mut() {
            names.retain(|n| n != name);
        }
        self.aliases.retain(|_, names| !names.is_empty());
    }

    /// All bound names in sorted order, each with the aliases made from it
    pub fn words(&self) -> Vec<(String, Vec<String>)> {
        let sorted: BTreeMap<&String, &Definition> = self.entries.iter().collect();
        sorted
            .into_keys()
            .map(|name| {
                let aliases = self.aliases.get(name).cloned().unwrap_or_default();
                (name.clone(), aliases)
            })
            .collect()
    }
}
