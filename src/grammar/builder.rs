// Copyright (c) 2016-2021 Fabian Schuiki

//! Construction of the grammar AST from raw records.

use crate::{
    ast::{Grammar, Node, ProductionRule},
    raw::{Element, RawGrammar},
};
use bnfmerge_common::errors::{DiagBuilder, DiagEmitter};
use std::rc::Rc;

/// Build a grammar with one rule per name in `raw`.
///
/// Rules are added in the order their names first appear. References are left
/// unbound; see [`crate::normalize`].
pub fn build_grammar(raw: &RawGrammar, diag: &dyn DiagEmitter) -> Grammar {
    info!("Building grammar from {} raw definitions", raw.len());
    let mut grammar = Grammar::new();
    for (name, _) in raw.iter() {
        build_rule(&mut grammar, raw, name, diag);
    }
    info!("Grammar has {} rules", grammar.len());
    grammar
}

/// Build the rule for `name` and add it to `grammar`.
///
/// A rule that already exists in the grammar is returned as is. Returns `None`
/// if `raw` has no definition for `name`.
pub fn build_rule<'g>(
    grammar: &'g mut Grammar,
    raw: &RawGrammar,
    name: &str,
    diag: &dyn DiagEmitter,
) -> Option<&'g Rc<ProductionRule>> {
    if !grammar.contains(name) {
        let defs = raw.get(name)?;
        let bodies: Vec<Node> = {
            let mut builder = Builder {
                grammar: &mut *grammar,
                diag,
                rule: name,
            };
            defs.iter()
                .map(|elements| builder.build(elements).unwrap_or(Node::NoOp))
                .collect()
        };
        trace!("Built <{}> with {} bodies", name, bodies.len());
        grammar.insert(ProductionRule::new(name, bodies));
    }
    grammar.get(name)
}

struct Builder<'a> {
    grammar: &'a mut Grammar,
    diag: &'a dyn DiagEmitter,
    rule: &'a str,
}

/// The result of converting a single element.
enum Converted {
    Node(Node),
    /// The content of one alternation branch.
    Alternation(Option<Node>),
    /// A marker that repeats the preceding node.
    Ellipsis,
}

impl Builder<'_> {
    /// Build a sequence of elements into a single node.
    fn build(&mut self, elements: &[Element]) -> Option<Node> {
        let mut output = vec![];
        let mut alternatives = false;

        for element in elements {
            match self.convert(element) {
                Converted::Alternation(content) => {
                    alternatives = true;
                    match content {
                        Some(Node::Alternatives(branches)) => output.extend(branches),
                        Some(node) => output.push(node),
                        None => output.push(Node::NoOp),
                    }
                }
                Converted::Ellipsis => match output.pop() {
                    Some(node) => output.push(Node::Repetition(Box::new(node))),
                    None => self.diag.emit(DiagBuilder::warning(format!(
                        "production rule for <{}> has an ellipsis without a preceding symbol",
                        self.rule
                    ))),
                },
                Converted::Node(node) => {
                    if alternatives && !node.is_epsilon() {
                        self.diag.emit(DiagBuilder::warning(format!(
                            "production rule for <{}> contains mixed alt and non-alt symbols",
                            self.rule
                        )));
                    }
                    output.push(node);
                }
            }
        }

        if alternatives {
            Some(Node::Alternatives(output))
        } else if output.len() > 1 {
            Some(Node::Sequence(output))
        } else {
            output.pop()
        }
    }

    fn convert(&mut self, element: &Element) -> Converted {
        let node = match element {
            Element::Reference(name) => {
                self.grammar.mark_known(name);
                Node::nonterminal(name.as_str())
            }
            Element::Keyword(text) => literal(text, Node::Keyword),
            Element::Terminal(text) | Element::Text(text) => literal(text, Node::Terminal),
            Element::SeeTheRules => Node::SeeTheRules,
            Element::Ellipsis => return Converted::Ellipsis,
            Element::Optional(elements) => Node::Optional(self.build(elements).into_iter().collect()),
            Element::Group(elements) => Node::Group(self.build(elements).into_iter().collect()),
            Element::Alternation(elements) => return Converted::Alternation(self.build(elements)),
        };
        Converted::Node(node)
    }
}

/// Trim literal text. Blank text is the empty alternative.
fn literal(text: &str, make: fn(String) -> Node) -> Node {
    let text = text.trim();
    if text.is_empty() {
        Node::NoOp
    } else {
        make(text.to_string())
    }
}
