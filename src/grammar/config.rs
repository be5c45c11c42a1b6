// Copyright (c) 2016-2021 Fabian Schuiki

//! Output style selection and layout options.

use std::fmt;

/// The notation a grammar is rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// Plain BNF with `<name>` nonterminals.
    Bnf,
    /// ISO-ish EBNF.
    Ebnf,
    /// A grammar ANTLR4 accepts.
    Antlr,
    /// LBNF as understood by BNFC.
    Bnfc,
}

impl Default for Style {
    fn default() -> Self {
        Style::Bnf
    }
}

/// The side on which a synthetic repetition rule refers to itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recursion {
    /// `r ::= r child`
    Left,
    /// `r ::= child r`
    Right,
}

impl Style {
    /// Separator between a rule's head and its body.
    pub fn rule_separator(self) -> &'static str {
        match self {
            Style::Bnf | Style::Bnfc => " ::= ",
            Style::Ebnf => " = ",
            Style::Antlr => ": ",
        }
    }

    /// Separator between the elements of a sequence.
    pub fn sequence_separator(self) -> &'static str {
        match self {
            Style::Ebnf => ", ",
            _ => " ",
        }
    }

    /// Opening and closing brackets around an optional part.
    pub fn optional_brackets(self) -> (&'static str, &'static str) {
        match self {
            Style::Bnf | Style::Ebnf => ("[ ", " ]"),
            Style::Antlr | Style::Bnfc => ("( ", " )?"),
        }
    }

    /// Opening and closing brackets around a group.
    pub fn group_brackets(self) -> (&'static str, &'static str) {
        match self {
            Style::Bnf => ("{ ", " }"),
            Style::Ebnf | Style::Antlr | Style::Bnfc => ("( ", " )"),
        }
    }

    /// Opening and closing brackets around a repeated element.
    pub fn repetition_brackets(self) -> (&'static str, &'static str) {
        match self {
            Style::Bnf => ("", " ..."),
            Style::Ebnf => ("{ ", " }"),
            Style::Antlr | Style::Bnfc => ("", "+"),
        }
    }

    /// The quote character around terminals.
    pub fn quote(self) -> char {
        match self {
            Style::Antlr => '\'',
            _ => '"',
        }
    }

    /// Whether backslashes and quotes inside terminals are escaped.
    pub fn escapes_terminals(self) -> bool {
        match self {
            Style::Antlr | Style::Bnfc => true,
            Style::Bnf | Style::Ebnf => false,
        }
    }

    /// How synthetic repetition rules recurse.
    pub fn recursion(self) -> Recursion {
        match self {
            Style::Bnfc => Recursion::Left,
            _ => Recursion::Right,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Style::Bnf => "bnf",
            Style::Ebnf => "ebnf",
            Style::Antlr => "antlr",
            Style::Bnfc => "bnfc",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// The options that control normalization and rendering.
///
/// A configuration is immutable once built and is passed by reference to the
/// normalizer and the renderer. Options that a style mandates cannot be
/// turned off: EBNF, ANTLR, and BNFC output always terminates rules and
/// separates them by an empty line, and BNFC output always uses strict BNF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    style: Style,
    strict_bnf: bool,
    terminator: bool,
    empty_line: bool,
    grammar_name: String,
    entrypoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(Style::default())
    }
}

impl Config {
    pub fn new(style: Style) -> Config {
        Config {
            style,
            strict_bnf: style == Style::Bnfc,
            terminator: true,
            empty_line: true,
            grammar_name: "SQLGrammar".to_string(),
            entrypoint: None,
        }
    }

    /// Eliminate repetitions, groups, and optionals, and flatten alternations.
    pub fn strict_bnf(mut self, enable: bool) -> Config {
        self.strict_bnf = enable || self.style == Style::Bnfc;
        self
    }

    /// Terminate every rule body with ` ;`.
    pub fn terminator(mut self, enable: bool) -> Config {
        self.terminator = enable || self.style != Style::Bnf;
        self
    }

    /// Separate rules by an empty line.
    pub fn empty_line(mut self, enable: bool) -> Config {
        self.empty_line = enable || self.style != Style::Bnf;
        self
    }

    /// The name declared in the ANTLR grammar header.
    pub fn grammar_name(mut self, name: impl Into<String>) -> Config {
        self.grammar_name = name.into();
        self
    }

    /// The rule listed in the BNFC `entrypoints` header.
    pub fn entrypoint(mut self, name: impl Into<String>) -> Config {
        self.entrypoint = Some(name.into());
        self
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn is_strict_bnf(&self) -> bool {
        self.strict_bnf
    }

    pub fn has_terminator(&self) -> bool {
        self.terminator
    }

    pub fn has_empty_line(&self) -> bool {
        self.empty_line
    }

    pub fn get_grammar_name(&self) -> &str {
        &self.grammar_name
    }

    pub fn get_entrypoint(&self) -> Option<&str> {
        self.entrypoint.as_deref()
    }

    /// The line break sequence placed between two rules.
    pub fn rule_spacing(&self) -> &'static str {
        if self.empty_line {
            "\n\n"
        } else {
            "\n"
        }
    }
}
