// Copyright (c) 2016-2021 Fabian Schuiki

//! Raw grammar records as delivered by a front end.

use std::collections::HashMap;

/// An element of a raw rule definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// A reference to another nonterminal.
    Reference(String),
    /// Keyword or literal text.
    Keyword(String),
    /// A raw terminal symbol.
    Terminal(String),
    /// The definition is given in prose.
    SeeTheRules,
    /// Repeat the preceding element.
    Ellipsis,
    /// An optional group.
    Optional(Vec<Element>),
    /// A bracketed group.
    Group(Vec<Element>),
    /// One branch of an alternation.
    Alternation(Vec<Element>),
    /// Character data between elements.
    Text(String),
}

/// Raw definitions keyed by nonterminal name.
///
/// Names keep the order in which they were first added. Adding a definition
/// for a name that already exists appends it to that name's definitions.
#[derive(Clone, Debug, Default)]
pub struct RawGrammar {
    defs: Vec<(String, Vec<Vec<Element>>)>,
    lookup: HashMap<String, usize>,
}

impl RawGrammar {
    pub fn new() -> RawGrammar {
        Default::default()
    }

    /// Add a definition for `name`.
    pub fn add_definition(&mut self, name: impl Into<String>, elements: Vec<Element>) {
        let name = name.into();
        match self.lookup.get(&name) {
            Some(&i) => self.defs[i].1.push(elements),
            None => {
                self.lookup.insert(name.clone(), self.defs.len());
                self.defs.push((name, vec![elements]));
            }
        }
    }

    /// Append all definitions of `other`.
    pub fn merge(&mut self, other: RawGrammar) {
        for (name, defs) in other.defs {
            for elements in defs {
                self.add_definition(name.clone(), elements);
            }
        }
    }

    /// The definitions of `name`.
    pub fn get(&self, name: &str) -> Option<&[Vec<Element>]> {
        self.lookup.get(name).map(|&i| self.defs[i].1.as_slice())
    }

    /// Obtain an iterator over all names and their definitions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<Element>])> + '_ {
        self.defs.iter().map(|(n, d)| (n.as_str(), d.as_slice()))
    }

    /// The number of distinct names.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
