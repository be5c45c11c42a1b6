// Copyright (c) 2016-2021 Fabian Schuiki

//! Normalization of a built grammar.
//!
//! Normalization binds every nonterminal reference to its rule and replaces
//! prose placeholders with concrete symbols. In strict BNF mode it further
//! moves every repetition, group, and optional into a synthetic rule of its
//! own, and finally flattens each rule's alternations into one body per
//! branch.

use crate::{
    ast::{Grammar, Node, Nonterminal},
    config::{Config, Recursion},
};
use bnfmerge_common::errors::{DiagBuilder, DiagEmitter};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Normalize a grammar in place.
///
/// Rules are processed in order. Synthetic rules added along the way are
/// appended to the grammar and processed in turn. Running this on an already
/// normalized grammar with the same configuration has no effect.
pub fn normalize(grammar: &mut Grammar, config: &Config, diag: &dyn DiagEmitter) {
    info!(
        "Normalizing {} rules ({}{})",
        grammar.len(),
        config.style(),
        if config.is_strict_bnf() { ", strict" } else { "" }
    );
    let mut norm = Normalizer {
        config,
        diag,
        extracted: 0,
    };
    let mut index = 0;
    while index < grammar.len() {
        norm.normalize_rule(grammar, index);
        index += 1;
    }
    debug!("Extracted {} synthetic rules", norm.extracted);

    if config.is_strict_bnf() {
        flatten_alternatives(grammar);
    }
}

struct Normalizer<'a> {
    config: &'a Config,
    diag: &'a dyn DiagEmitter,
    extracted: usize,
}

impl Normalizer<'_> {
    fn normalize_rule(&mut self, grammar: &mut Grammar, index: usize) {
        let (context, mut bodies) = {
            let rule = grammar.rule_mut(index);
            (rule.name().to_string(), std::mem::take(&mut rule.bodies))
        };
        self.normalize_nodes(grammar, &context, &mut bodies, Position::Body);
        grammar.rule_mut(index).bodies = bodies;
    }

    /// Normalize a list of siblings. Placeholders that expand to several
    /// branches are spliced in if the list holds alternatives.
    fn normalize_nodes(
        &mut self,
        grammar: &mut Grammar,
        context: &str,
        nodes: &mut Vec<Node>,
        position: Position,
    ) {
        for node in nodes.iter_mut() {
            self.normalize_node(grammar, context, node, position);
        }
        if position == Position::Branch && nodes.iter().any(is_alternatives) {
            let flat = std::mem::take(nodes)
                .into_iter()
                .flat_map(|n| match n {
                    Node::Alternatives(branches) => branches,
                    n => vec![n],
                })
                .collect();
            *nodes = flat;
        }
    }

    fn normalize_node(
        &mut self,
        grammar: &mut Grammar,
        context: &str,
        node: &mut Node,
        position: Position,
    ) {
        let strict = self.config.is_strict_bnf();
        match node {
            Node::Nonterminal(nt) => bind(grammar, nt, context, self.diag),
            Node::SeeTheRules => {
                let mut patch = patch_placeholder(context);
                if position == Position::Operand && is_alternatives(&patch) {
                    patch = Node::Group(vec![patch]);
                }
                *node = patch;
                self.normalize_node(grammar, context, node, position);
            }
            Node::Terminal(..) | Node::Keyword(..) | Node::NoOp | Node::Symbolic(..) => (),

            Node::Repetition(child) if strict => {
                let child = std::mem::replace(&mut **child, Node::NoOp);
                let name = grammar.synthetic_name(context, "seq");
                let this = Node::Nonterminal(Nonterminal::new(name).bound());
                let seq = match self.config.style().recursion() {
                    Recursion::Right => vec![child, this],
                    Recursion::Left => vec![this, child],
                };
                let body = Node::Alternatives(vec![Node::Sequence(seq), Node::NoOp]);
                *node = self.extract(grammar, context, "seq", vec![body]);
            }
            Node::Group(children) if strict => {
                let mut bodies = std::mem::take(children);
                if bodies.is_empty() {
                    bodies.push(Node::NoOp);
                }
                *node = self.extract(grammar, context, "group", bodies);
            }
            Node::Optional(children) if strict => {
                let mut branches = std::mem::take(children);
                branches.push(Node::NoOp);
                *node = self.extract(grammar, context, "opt", vec![Node::Alternatives(branches)]);
            }

            Node::Alternatives(children) => {
                self.normalize_nodes(grammar, context, children, Position::Branch)
            }
            Node::Sequence(children) => {
                self.normalize_nodes(grammar, context, children, Position::Operand);
                // Flattening only lifts alternatives out of the top of a body,
                // so alternatives within a sequence need a rule of their own.
                if strict {
                    for child in children.iter_mut() {
                        if is_alternatives(child) {
                            let alt = std::mem::replace(child, Node::NoOp);
                            *child = self.extract(grammar, context, "group", vec![alt]);
                        }
                    }
                }
            }
            Node::Optional(children) | Node::Group(children) => {
                self.normalize_nodes(grammar, context, children, Position::Body)
            }
            Node::Repetition(child) => {
                self.normalize_node(grammar, context, child, Position::Operand)
            }
        }
    }

    /// Move `bodies` into a new synthetic rule and return a reference to it.
    fn extract(&mut self, grammar: &mut Grammar, context: &str, suffix: &str, bodies: Vec<Node>) -> Node {
        let nt = grammar.add_synthetic(context, suffix, bodies);
        debug!("Extracted <{}> from <{}>", nt.name, context);
        self.extracted += 1;
        Node::Nonterminal(nt)
    }
}

/// Where a node sits within its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    /// A rule body or the content of brackets. Alternatives stand as they are.
    Body,
    /// A branch of alternatives. Nested alternatives are spliced in.
    Branch,
    /// An operand of a sequence or repetition. Alternatives need brackets.
    Operand,
}

fn is_alternatives(node: &Node) -> bool {
    match node {
        Node::Alternatives(..) => true,
        _ => false,
    }
}

/// Bind a reference to the rule of the same name.
fn bind(grammar: &Grammar, nt: &mut Nonterminal, context: &str, diag: &dyn DiagEmitter) {
    if nt.is_bound() {
        return;
    }
    if grammar.contains(&nt.name) {
        nt.bind();
    } else {
        diag.emit(
            DiagBuilder::warning(format!(
                "non-terminal '{}' has no production rule",
                nt.name
            ))
            .add_note(format!("referenced from <{}>", context)),
        );
    }
}

/// What a prose placeholder is replaced with.
#[derive(Clone, Copy, Debug)]
enum Patch {
    Literal(&'static str),
    Whitespace,
    Symbolic(&'static str),
}

/// Replacements for prose placeholders, keyed by the enclosing rule.
static PLACEHOLDERS: Lazy<HashMap<&'static str, Patch>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("escaped character", Patch::Literal("\\"));
    m.insert("space", Patch::Literal(" "));
    m.insert("newline", Patch::Literal("\n"));
    m.insert("white space", Patch::Whitespace);
    m.insert("Unicode escape character", Patch::Literal("U+"));
    m.insert("identifier start", Patch::Symbolic("Ident"));
    m.insert("identifier extend", Patch::Symbolic("Ident"));
    m.insert("nondoublequote character", Patch::Symbolic("Char"));
    m.insert("nonquote character", Patch::Symbolic("Char"));
    m.insert("non-escaped character", Patch::Symbolic("Char"));
    m
});

fn patch_placeholder(context: &str) -> Node {
    match PLACEHOLDERS.get(context) {
        Some(Patch::Literal(text)) => Node::terminal(*text),
        Some(Patch::Whitespace) => Node::Alternatives(
            [" ", "\n", "\t"].iter().map(|&s| Node::terminal(s)).collect(),
        ),
        Some(Patch::Symbolic(name)) => Node::Symbolic(name.to_string()),
        None => {
            trace!("No replacement for prose definition of <{}>", context);
            Node::Symbolic("Char".to_string())
        }
    }
}

/// Replace every rule body that contains alternatives by the branches of its
/// innermost alternatives.
fn flatten_alternatives(grammar: &mut Grammar) {
    let mut flattened = 0;
    for index in 0..grammar.len() {
        let rule = grammar.rule_mut(index);
        let mut changed = false;
        let mut bodies = Vec::with_capacity(rule.bodies.len());
        for body in std::mem::take(&mut rule.bodies) {
            let leafs = body.collect_leafs(&is_alternatives);
            if leafs.is_empty() {
                bodies.push(body);
                continue;
            }
            changed = true;
            for alt in leafs {
                bodies.extend(alt.children().iter().cloned());
            }
        }
        rule.bodies = bodies;
        if changed {
            trace!("Flattened alternatives in <{}>", rule.name());
            flattened += 1;
        }
    }
    debug!("Flattened alternatives in {} rules", flattened);
}
