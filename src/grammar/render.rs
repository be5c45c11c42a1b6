// Copyright (c) 2016-2021 Fabian Schuiki

//! Rendering of grammars as text.
//!
//! Everything renders through the [`Render`] wrapper, which pairs a node with
//! the [`Config`] that selects the output notation and implements
//! [`std::fmt::Display`].

use crate::{
    ast::{Grammar, Node, Nonterminal, ProductionRule},
    config::{Config, Style},
};
use bnfmerge_common::name::{digits_to_letters, letter_suffix, title_case};
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// A value paired with the configuration to render it in.
pub struct Render<'a, T: ?Sized> {
    item: &'a T,
    config: &'a Config,
}

/// Things that can be rendered as grammar text.
pub trait Renderable {
    fn render<'a>(&'a self, config: &'a Config) -> Render<'a, Self> {
        Render { item: self, config }
    }
}

impl Renderable for Node {}
impl Renderable for Nonterminal {}
impl Renderable for Grammar {}

/// Render a grammar to a string.
pub fn serialize(grammar: &Grammar, config: &Config) -> String {
    grammar.render(config).to_string()
}

impl fmt::Display for Render<'_, Node> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let config = self.config;
        let style = config.style();
        let list = |cs: &[Node], sep: &str| {
            cs.iter().map(move |c| c.render(config)).join(sep)
        };
        match self.item {
            Node::Terminal(text) | Node::Keyword(text) => write!(f, "{}", quote_terminal(text, style)),
            Node::NoOp => Ok(()),
            Node::SeeTheRules => write!(f, "{}", quote_terminal("seeTheRules", style)),
            Node::Symbolic(name) => write!(f, "{}", name),
            Node::Nonterminal(nt) => write!(f, "{}", nt.render(config)),
            Node::Sequence(cs) => write!(f, "{}", list(cs, style.sequence_separator())),
            Node::Alternatives(cs) => write!(f, "{}", list(cs, " | ")),
            Node::Optional(cs) => {
                let (open, close) = style.optional_brackets();
                write!(f, "{}{}{}", open, list(cs, " "), close)
            }
            Node::Group(cs) => {
                let (open, close) = style.group_brackets();
                write!(f, "{}{}{}", open, list(cs, " "), close)
            }
            Node::Repetition(c) => {
                let (open, close) = style.repetition_brackets();
                write!(f, "{}{}{}", open, c.render(config), close)
            }
        }
    }
}

impl fmt::Display for Render<'_, Nonterminal> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", mangle(&self.item.name, self.config.style()))
    }
}

impl fmt::Display for Render<'_, Grammar> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grammar = self.item;
        let config = self.config;
        match config.style() {
            Style::Antlr => write!(f, "grammar {};\n\n", config.get_grammar_name())?,
            Style::Bnfc => {
                if let Some(root) = entrypoint(grammar, config) {
                    write!(f, "entrypoints {} ;\n\n", mangle(root, Style::Bnfc))?;
                }
            }
            Style::Bnf | Style::Ebnf => (),
        }

        let mut labels = Labeler::new(grammar);
        let mut first = true;
        for rule in grammar.rules().filter(|r| !r.bodies.is_empty()) {
            if !first {
                write!(f, "{}", config.rule_spacing())?;
            }
            first = false;
            write_rule(f, rule, config, &mut labels)?;
        }
        Ok(())
    }
}

/// Write each body of a rule on its own line.
fn write_rule(
    f: &mut fmt::Formatter,
    rule: &ProductionRule,
    config: &Config,
    labels: &mut Labeler,
) -> fmt::Result {
    let style = config.style();
    let head = rule.head.render(config);
    let terminator = if config.has_terminator() { " ;" } else { "" };
    for (i, body) in rule.bodies.iter().enumerate() {
        if i > 0 {
            write!(f, "\n")?;
        }
        if style == Style::Bnfc {
            write!(f, "{} . ", labels.label(rule.name(), i))?;
        }
        write!(
            f,
            "{}{}{}{}",
            head,
            style.rule_separator(),
            body.render(config),
            terminator
        )?;
    }
    Ok(())
}

/// The rule BNFC starts parsing at.
fn entrypoint<'a>(grammar: &'a Grammar, config: &'a Config) -> Option<&'a str> {
    config
        .get_entrypoint()
        .or_else(|| grammar.tree_roots().into_iter().next().map(|r| r.name()))
        .or_else(|| grammar.names().next())
}

/// Quote a terminal, escaping its content as the style requires.
///
/// Line breaks and tabs are always written as escape sequences such that every
/// rule body stays on one line.
pub fn quote_terminal(text: &str, style: Style) -> String {
    let quote = style.quote();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' | '\'' | '"' if style.escapes_terminals() => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Turn a rule name into a nonterminal of the given style.
pub fn mangle(name: &str, style: Style) -> String {
    match style {
        Style::Bnf => format!("<{}>", name),
        Style::Ebnf => name.to_string(),
        Style::Antlr => name
            .chars()
            .filter(|&c| c != '/' && c != ':')
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c,
            })
            .collect::<String>()
            .to_lowercase(),
        Style::Bnfc => {
            let spaced: String = name
                .chars()
                .filter(|&c| c != '/' && c != ':')
                .map(|c| if c == '-' { ' ' } else { c })
                .collect();
            let joined: String = title_case(&spaced).chars().filter(|&c| c != ' ').collect();
            digits_to_letters(&joined)
        }
    }
}

/// Hands out BNFC rule labels that are unique across a grammar.
///
/// A label is the head name followed by the letter of the body's index. As
/// long as the result collides with a category or an earlier label, ` A` is
/// appended to the head name.
struct Labeler {
    categories: HashSet<String>,
    used: HashSet<String>,
}

impl Labeler {
    fn new(grammar: &Grammar) -> Labeler {
        let categories = grammar
            .names()
            .chain(grammar.known_names())
            .map(|n| mangle(n, Style::Bnfc))
            .collect();
        Labeler {
            categories,
            used: HashSet::new(),
        }
    }

    fn label(&mut self, head: &str, index: usize) -> String {
        let mut base = head.to_string();
        loop {
            let candidate = mangle(&format!("{} {}", base, letter_suffix(index)), Style::Bnfc);
            if !self.categories.contains(&candidate) && self.used.insert(candidate.clone()) {
                return candidate;
            }
            base.push_str(" A");
        }
    }
}

/// Describe the rules that no other rule refers to, one line each.
pub fn tree_roots_report(grammar: &Grammar, config: &Config) -> Vec<String> {
    grammar
        .tree_roots()
        .into_iter()
        .map(|r| format!("Grammar tree root: {}", r.head.render(config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Grammar {
        let mut g = Grammar::new();
        g.insert(ProductionRule::new(
            "digit",
            vec![Node::Alternatives(
                (0..10).map(|d| Node::terminal(d.to_string())).collect(),
            )],
        ));
        g
    }

    #[test]
    fn plain_bnf_digits() {
        let c = Config::new(Style::Bnf).terminator(false);
        assert_eq!(
            serialize(&digits(), &c),
            r#"<digit> ::= "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9""#
        );
    }

    #[test]
    fn antlr_digits() {
        let c = Config::new(Style::Antlr);
        assert_eq!(
            serialize(&digits(), &c),
            "grammar SQLGrammar;\n\n\
             digit: '0' | '1' | '2' | '3' | '4' | '5' | '6' | '7' | '8' | '9' ;"
        );
    }

    #[test]
    fn terminal_escaping() {
        let t = "\\text\"";
        assert_eq!(quote_terminal(t, Style::Antlr), r#"'\\text\"'"#);
        assert_eq!(quote_terminal(t, Style::Bnfc), r#""\\text\"""#);
        assert_eq!(quote_terminal(t, Style::Bnf), r#""\text"""#);
        assert_eq!(quote_terminal("'", Style::Antlr), r"'\''");
        assert_eq!(quote_terminal("\n", Style::Bnf), r#""\n""#);
        assert_eq!(quote_terminal("\t", Style::Antlr), r"'\t'");
    }

    #[test]
    fn nonterminal_mangling() {
        let name = "SQL-client module/name: 2";
        assert_eq!(mangle(name, Style::Bnf), "<SQL-client module/name: 2>");
        assert_eq!(mangle(name, Style::Ebnf), name);
        assert_eq!(mangle(name, Style::Antlr), "sql_client_modulename_2");
        assert_eq!(mangle(name, Style::Bnfc), "SqlClientModulenameC");
        assert_eq!(mangle("list seq A", Style::Bnfc), "ListSeqA");
        assert_eq!(mangle("level 10 item", Style::Bnfc), "LevelBAItem");
    }

    #[test]
    fn composite_brackets() {
        let node = Node::Sequence(vec![
            Node::Optional(vec![Node::nonterminal("a")]),
            Node::Group(vec![Node::Alternatives(vec![Node::keyword("b"), Node::keyword("c")])]),
            Node::Repetition(Box::new(Node::nonterminal("d"))),
            Node::NoOp,
            Node::Symbolic("Char".into()),
        ]);
        let render = |style| node.render(&Config::new(style)).to_string();
        assert_eq!(
            render(Style::Bnf),
            r#"[ <a> ] { "b" | "c" } <d> ...  Char"#
        );
        assert_eq!(render(Style::Ebnf), r#"[ a ], ( "b" | "c" ), { d }, , Char"#);
        assert_eq!(render(Style::Antlr), "( a )? ( 'b' | 'c' ) d+  Char");
        assert_eq!(render(Style::Bnfc), r#"( A )? ( "b" | "c" ) D+  Char"#);
    }

    #[test]
    fn layout_options() {
        let mut g = Grammar::new();
        g.insert(ProductionRule::new("a", vec![Node::terminal("x"), Node::terminal("y")]));
        g.insert(ProductionRule::new("b", vec![Node::nonterminal("a")]));
        g.insert(ProductionRule::new("empty", vec![]));
        let c = Config::new(Style::Bnf);
        assert_eq!(
            serialize(&g, &c),
            "<a> ::= \"x\" ;\n<a> ::= \"y\" ;\n\n<b> ::= <a> ;"
        );
        let c = c.terminator(false).empty_line(false);
        assert_eq!(serialize(&g, &c), "<a> ::= \"x\"\n<a> ::= \"y\"\n<b> ::= <a>");
        let c = Config::new(Style::Ebnf);
        assert_eq!(serialize(&g, &c), "a = \"x\" ;\na = \"y\" ;\n\nb = a ;");
    }

    #[test]
    fn bnfc_labels_and_entrypoint() {
        let mut g = Grammar::new();
        g.insert(ProductionRule::new("query", vec![Node::nonterminal("digit")]));
        g.insert(ProductionRule::new(
            "digit",
            vec![Node::terminal("0"), Node::terminal("1")],
        ));
        g.insert(ProductionRule::new("digit A", vec![Node::terminal("2")]));
        g.mark_known("digit");
        let text = serialize(&g, &Config::new(Style::Bnfc));
        assert_eq!(
            text,
            "entrypoints Query ;\n\n\
             QueryA . Query ::= Digit ;\n\n\
             DigitAA . Digit ::= \"0\" ;\n\
             DigitB . Digit ::= \"1\" ;\n\n\
             DigitAAA . DigitA ::= \"2\" ;"
        );
        let text = serialize(&g, &Config::new(Style::Bnfc).entrypoint("digit"));
        assert!(text.starts_with("entrypoints Digit ;\n\n"));
    }

    #[test]
    fn bnfc_label_overflow() {
        let mut labels = Labeler::new(&Grammar::new());
        assert_eq!(labels.label("x", 0), "XA");
        assert_eq!(labels.label("x", 25), "XZ");
        assert_eq!(labels.label("x", 26), "XAa");
    }

    #[test]
    fn tree_roots_are_reported() {
        let mut g = digits();
        g.insert(ProductionRule::new("number", vec![Node::nonterminal("digit")]));
        g.mark_known("digit");
        assert_eq!(
            tree_roots_report(&g, &Config::new(Style::Antlr)),
            vec!["Grammar tree root: number".to_string()]
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut g = digits();
        g.insert(ProductionRule::new("x", vec![Node::nonterminal("digit")]));
        for &style in &[Style::Bnf, Style::Ebnf, Style::Antlr, Style::Bnfc] {
            let c = Config::new(style);
            assert_eq!(serialize(&g, &c), serialize(&g, &c));
        }
    }
}
