// Copyright (c) 2016-2021 Fabian Schuiki

//! Restriction of a grammar to the rules reachable from a root.

use crate::ast::{Grammar, Nonterminal, ProductionRule};
use bnfmerge_common::errors::{DiagBuilder, DiagEmitter};
use std::collections::HashSet;

/// Create a grammar of the rules reachable from `root`, including `root`.
///
/// Returns `None` if the grammar has no rule named `root`. Rules are listed in
/// the order they are discovered by a depth-first walk starting at the root,
/// and are shared with `grammar` rather than copied. Only bound references are
/// followed; unbound ones are reported once each.
pub fn filter(grammar: &Grammar, root: &str, diag: &dyn DiagEmitter) -> Option<Grammar> {
    let root_rule = grammar.get(root)?;
    let mut reach = Reach {
        grammar,
        diag,
        into: Grammar::new(),
        reported: HashSet::new(),
    };
    reach.into.inherit_known(grammar);
    reach.into.insert(root_rule.clone());
    reach.visit(root_rule);
    debug!(
        "Filtered {} of {} rules reachable from <{}>",
        reach.into.len(),
        grammar.len(),
        root
    );
    Some(reach.into)
}

struct Reach<'a> {
    grammar: &'a Grammar,
    diag: &'a dyn DiagEmitter,
    into: Grammar,
    reported: HashSet<&'a str>,
}

impl<'a> Reach<'a> {
    fn visit(&mut self, rule: &'a ProductionRule) {
        for body in &rule.bodies {
            for nt in body.nonterminals() {
                self.follow(nt, rule.name());
            }
        }
    }

    /// Follow a reference made within the rule named `from`.
    fn follow(&mut self, nt: &'a Nonterminal, from: &'a str) {
        if self.into.contains(&nt.name) {
            return;
        }
        match self.grammar.get(&nt.name) {
            Some(rule) if nt.is_bound() => {
                trace!("Reached <{}>", nt.name);
                self.into.insert(rule.clone());
                self.visit(rule);
            }
            _ => {
                if self.reported.insert(&nt.name) {
                    self.diag.emit(
                        DiagBuilder::warning(format!(
                            "non-terminal '{}' has no production rule",
                            nt.name
                        ))
                        .add_note(format!("referenced from <{}>", from)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Node, ProductionRule},
        config::{Config, Style},
        normalize::normalize,
    };
    use bnfmerge_common::errors::{DiagCollector, DiagSegment};
    use std::rc::Rc;

    fn grammar(rules: Vec<(&str, Vec<Node>)>) -> Grammar {
        let mut g = Grammar::new();
        for (name, bodies) in rules {
            g.insert(ProductionRule::new(name, bodies));
        }
        normalize(&mut g, &Config::new(Style::Bnf), &DiagCollector::new());
        g
    }

    fn names(g: &Grammar) -> Vec<&str> {
        g.names().collect()
    }

    #[test]
    fn missing_root() {
        let g = grammar(vec![("a", vec![Node::terminal("x")])]);
        assert!(filter(&g, "b", &DiagCollector::new()).is_none());
        assert!(filter(&g, "<a>", &DiagCollector::new()).is_none());
    }

    #[test]
    fn reachable_rules_in_discovery_order() {
        let g = grammar(vec![
            ("unused", vec![Node::nonterminal("a")]),
            ("a", vec![Node::Sequence(vec![Node::nonterminal("b"), Node::nonterminal("c")])]),
            ("c", vec![Node::Optional(vec![Node::nonterminal("d")])]),
            ("b", vec![Node::terminal("b")]),
            ("d", vec![Node::terminal("d")]),
        ]);
        let f = filter(&g, "a", &DiagCollector::new()).unwrap();
        assert_eq!(names(&f), vec!["a", "b", "c", "d"]);
        assert!(Rc::ptr_eq(f.get("c").unwrap(), g.get("c").unwrap()));
    }

    #[test]
    fn cycles_terminate() {
        let g = grammar(vec![
            ("expr", vec![Node::Alternatives(vec![
                Node::nonterminal("term"),
                Node::Sequence(vec![Node::nonterminal("expr"), Node::terminal("+"), Node::nonterminal("term")]),
            ])]),
            ("term", vec![Node::Alternatives(vec![
                Node::terminal("1"),
                Node::Group(vec![Node::nonterminal("expr")]),
            ])]),
            ("other", vec![Node::terminal("z")]),
        ]);
        let f = filter(&g, "term", &DiagCollector::new()).unwrap();
        assert_eq!(names(&f), vec!["term", "expr"]);
        assert!(f.len() <= g.len());
    }

    #[test]
    fn unbound_references_are_reported_once() {
        let g = grammar(vec![(
            "a",
            vec![Node::Sequence(vec![Node::nonterminal("ghost"), Node::nonterminal("ghost")])],
        )]);
        let diag = DiagCollector::new();
        let f = filter(&g, "a", &diag).unwrap();
        assert_eq!(names(&f), vec!["a"]);
        assert_eq!(diag.diags().len(), 1);
        assert!(diag.mentions("'ghost'"));
        assert_eq!(
            diag.diags()[0].segments,
            vec![DiagSegment::Note("referenced from <a>".into())]
        );
    }

    #[test]
    fn filtering_a_filtered_grammar() {
        let g = grammar(vec![
            ("a", vec![Node::nonterminal("b")]),
            ("b", vec![Node::nonterminal("c")]),
            ("c", vec![Node::terminal("c")]),
        ]);
        let diag = DiagCollector::new();
        let f = filter(&g, "a", &diag).unwrap();
        let ff = filter(&f, "b", &diag).unwrap();
        assert_eq!(names(&ff), vec!["b", "c"]);
        assert!(diag.is_empty());
    }
}
