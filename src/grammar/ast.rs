// Copyright (c) 2016-2021 Fabian Schuiki

//! The grammar abstract syntax tree.
//!
//! A [`Grammar`] maps nonterminal names to [`ProductionRule`]s, in the order
//! the rules were added. Every rule has one or more bodies, each of which is a
//! tree of [`Node`]s. References to other rules are made by name through
//! [`Nonterminal`]s, which are bound to their rule in a separate pass once the
//! whole grammar has been built.

use bnfmerge_common::name::letter_suffix;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A node in a rule body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A literal matched verbatim.
    Terminal(String),
    /// A literal that is a lexical keyword.
    Keyword(String),
    /// The empty alternative.
    NoOp,
    /// A definition that the source document only gives in prose.
    SeeTheRules,
    /// A symbolic placeholder such as `Char`, rendered verbatim.
    Symbolic(String),
    /// A reference to another rule.
    Nonterminal(Nonterminal),
    /// Concatenation.
    Sequence(Vec<Node>),
    /// Mutually exclusive branches.
    Alternatives(Vec<Node>),
    /// Zero or one occurrence.
    Optional(Vec<Node>),
    /// Grouping without cardinality.
    Group(Vec<Node>),
    /// One or more occurrences.
    Repetition(Box<Node>),
}

impl Node {
    pub fn terminal(text: impl Into<String>) -> Node {
        Node::Terminal(text.into())
    }

    pub fn keyword(text: impl Into<String>) -> Node {
        Node::Keyword(text.into())
    }

    pub fn nonterminal(name: impl Into<String>) -> Node {
        Node::Nonterminal(Nonterminal::new(name))
    }

    /// Check whether this node matches the empty string only.
    pub fn is_epsilon(&self) -> bool {
        match self {
            Node::NoOp => true,
            _ => false,
        }
    }

    /// The child nodes of a composite, or an empty slice for symbols.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Sequence(cs) | Node::Alternatives(cs) | Node::Optional(cs) | Node::Group(cs) => {
                cs
            }
            Node::Repetition(c) => std::slice::from_ref(&**c),
            Node::Terminal(..)
            | Node::Keyword(..)
            | Node::NoOp
            | Node::SeeTheRules
            | Node::Symbolic(..)
            | Node::Nonterminal(..) => &[],
        }
    }

    /// Visit this node and all its descendants in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for c in self.children() {
            c.walk(f);
        }
    }

    /// Collect the innermost nodes in this subtree that satisfy `pred`.
    ///
    /// Descent into a child stops as soon as the child's subtree yields a
    /// match, so a matching node is only returned if none of its descendants
    /// match.
    pub fn collect_leafs(&self, pred: &impl Fn(&Node) -> bool) -> Vec<&Node> {
        let mut into = vec![];
        self.collect_leafs_into(pred, &mut into);
        into
    }

    fn collect_leafs_into<'a>(&'a self, pred: &impl Fn(&Node) -> bool, into: &mut Vec<&'a Node>) {
        let before = into.len();
        for c in self.children() {
            c.collect_leafs_into(pred, into);
        }
        if into.len() == before && pred(self) {
            into.push(self);
        }
    }

    /// All nonterminal references in this subtree, in pre-order.
    pub fn nonterminals(&self) -> Vec<&Nonterminal> {
        let mut into = vec![];
        self.walk(&mut |n| {
            if let Node::Nonterminal(nt) = n {
                into.push(nt);
            }
        });
        into
    }
}

impl From<Nonterminal> for Node {
    fn from(nt: Nonterminal) -> Node {
        Node::Nonterminal(nt)
    }
}

/// A reference to a rule by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nonterminal {
    pub name: String,
    bound: bool,
}

impl Nonterminal {
    /// Create an unresolved reference.
    pub fn new(name: impl Into<String>) -> Nonterminal {
        Nonterminal {
            name: name.into(),
            bound: false,
        }
    }

    /// Check whether the reference has been resolved to a rule.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Mark the reference as resolved. Binding is permanent.
    pub(crate) fn bind(&mut self) {
        self.bound = true;
    }

    pub(crate) fn bound(mut self) -> Nonterminal {
        self.bind();
        self
    }
}

/// The definition of a nonterminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionRule {
    pub head: Nonterminal,
    /// One entry per definition; each renders on its own line.
    pub bodies: Vec<Node>,
}

impl ProductionRule {
    pub fn new(name: impl Into<String>, bodies: Vec<Node>) -> ProductionRule {
        ProductionRule {
            head: Nonterminal::new(name).bound(),
            bodies,
        }
    }

    pub fn name(&self) -> &str {
        &self.head.name
    }

    /// The alternatives this rule offers.
    ///
    /// This is the branches of a lone `Alternatives` body, or the bodies
    /// themselves otherwise.
    #[cfg(test)]
    pub(crate) fn branches(&self) -> &[Node] {
        match self.bodies.as_slice() {
            [Node::Alternatives(branches)] => branches,
            bodies => bodies,
        }
    }
}

/// A collection of rules, keyed by name, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    rules: Vec<Rc<ProductionRule>>,
    lookup: HashMap<String, usize>,
    known: HashSet<String>,
}

impl Grammar {
    pub fn new() -> Grammar {
        Default::default()
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Obtain an iterator over all rules, in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &Rc<ProductionRule>> + '_ {
        self.rules.iter()
    }

    /// Obtain an iterator over all rule names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rc<ProductionRule>> {
        self.lookup.get(name).map(|&i| &self.rules[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Add a rule.
    ///
    /// Returns `false` and leaves the grammar untouched if a rule with the
    /// same name already exists.
    pub fn insert(&mut self, rule: impl Into<Rc<ProductionRule>>) -> bool {
        let rule = rule.into();
        if self.lookup.contains_key(rule.name()) {
            return false;
        }
        self.lookup.insert(rule.name().to_string(), self.rules.len());
        self.rules.push(rule);
        true
    }

    /// Mutable access to the rule at `index`. Clones the rule first if it is
    /// shared with another grammar.
    pub(crate) fn rule_mut(&mut self, index: usize) -> &mut ProductionRule {
        Rc::make_mut(&mut self.rules[index])
    }

    /// Record that `name` is referenced from somewhere in the grammar.
    pub fn mark_known(&mut self, name: &str) {
        if !self.known.contains(name) {
            self.known.insert(name.to_string());
        }
    }

    /// Check whether `name` is referenced from somewhere in the grammar.
    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Obtain an iterator over all referenced names, in no particular order.
    pub fn known_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.known.iter().map(|s| s.as_str())
    }

    pub(crate) fn inherit_known(&mut self, other: &Grammar) {
        self.known = other.known.clone();
    }

    /// Allocate an unused name for a synthetic rule.
    ///
    /// The name has the form `<base> <suffix> <letters>`, where the letters
    /// count up from `A` until the name is not taken.
    pub fn synthetic_name(&self, base: &str, suffix: &str) -> String {
        let mut index = 0;
        loop {
            let name = format!("{} {} {}", base, suffix, letter_suffix(index));
            if !self.contains(&name) {
                return name;
            }
            index += 1;
        }
    }

    /// Add a synthetic rule named after `base` and `suffix`, and return a
    /// bound reference to it.
    pub fn add_synthetic(&mut self, base: &str, suffix: &str, bodies: Vec<Node>) -> Nonterminal {
        let name = self.synthetic_name(base, suffix);
        let rule = ProductionRule::new(name.clone(), bodies);
        self.insert(rule);
        self.mark_known(&name);
        Nonterminal::new(name).bound()
    }

    /// The rules that no other rule refers to.
    pub fn tree_roots(&self) -> Vec<&Rc<ProductionRule>> {
        self.rules
            .iter()
            .filter(|r| !self.is_known(r.name()))
            .collect()
    }
}
