//! Token sources for the driver.

use crate::dfa::DfaTables;
use crate::source::{CharSource, END_CHAR};
use crate::symbols::SymbolCatalog;
use crate::END_OF_INPUT;
use log::info;
use std::fmt::Display;

/// Produces `(token, value)` pairs for [`Parser::run`](crate::Parser::run). Token
/// [`END_OF_INPUT`] ends the stream, and sources keep returning it once exhausted.
pub trait TokenSource<V> {
    fn next_token(&mut self) -> (i32, V);
}

/// A pre-tokenized stream.
#[derive(Clone, Debug)]
pub struct Tokens<I> {
    tokens: I,
}

impl<I> Tokens<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(tokens: T) -> Tokens<I> {
        Tokens {
            tokens: tokens.into_iter(),
        }
    }
}

impl<V: Default, I: Iterator<Item = (i32, V)>> TokenSource<V> for Tokens<I> {
    fn next_token(&mut self) -> (i32, V) {
        self.tokens
            .next()
            .unwrap_or_else(|| (END_OF_INPUT, V::default()))
    }
}

/// How a rule's matched text is checked against the reserved words of the catalog.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Keywords {
    Off,
    Exact,
    IgnoreCase,
}

/// One regular expression of a lexer mode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRule {
    /// Start vertex of the expression's automaton.
    pub vertex: usize,
    /// Token to report, or `None` to discard the text (whitespace, comments).
    pub token: Option<i32>,
    pub keywords: Keywords,
}

impl TokenRule {
    pub fn token(vertex: usize, token: i32) -> TokenRule {
        TokenRule {
            vertex,
            token: Some(token),
            keywords: Keywords::Off,
        }
    }

    pub fn skip(vertex: usize) -> TokenRule {
        TokenRule {
            vertex,
            token: None,
            keywords: Keywords::Off,
        }
    }

    /// Reports a reserved word's token instead when the matched text spells one.
    pub fn keywords(mut self, keywords: Keywords) -> TokenRule {
        self.keywords = keywords;
        self
    }
}

/// A named, ordered list of rules. The first rule that matches wins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexerMode {
    pub name: String,
    pub rules: Vec<TokenRule>,
}

impl LexerMode {
    pub fn new(name: &str, rules: Vec<TokenRule>) -> LexerMode {
        LexerMode {
            name: name.to_string(),
            rules,
        }
    }
}

/// Tokenizes a character source with DFA-compiled expressions, the way a generated lexer does.
///
/// At each position the rules of the current mode are tried in order. Skip rules discard their
/// text and scanning resumes. A character no rule matches becomes a token whose id is its code
/// point.
pub struct RegexScanner<'d, S> {
    dfa: &'d DfaTables,
    catalog: &'d SymbolCatalog,
    source: S,
    modes: Vec<LexerMode>,
    mode: usize,
}

impl<'d, S: CharSource> RegexScanner<'d, S> {
    pub fn new(dfa: &'d DfaTables, catalog: &'d SymbolCatalog, source: S) -> Self {
        Self {
            dfa,
            catalog,
            source,
            modes: Vec::new(),
            mode: 0,
        }
    }

    /// Adds a mode. The first mode added is the initial one.
    pub fn add_mode(&mut self, mode: LexerMode) -> &mut Self {
        self.modes.push(mode);
        self
    }

    /// Switches to the mode called `name`. Returns `false`, leaving the mode unchanged, if there
    /// is no such mode.
    pub fn set_mode(&mut self, name: &str) -> bool {
        match self.modes.iter().position(|m| m.name == name) {
            Some(index) => {
                self.mode = index;
                true
            }
            None => false,
        }
    }

    pub fn mode(&self) -> Option<&str> {
        self.modes.get(self.mode).map(|m| m.name.as_str())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Next token id and its text. The end of input yields [`END_OF_INPUT`] and empty text.
    pub fn next_lexeme(&mut self) -> (i32, String) {
        let rules: &[TokenRule] = match self.modes.get(self.mode) {
            Some(mode) => &mode.rules,
            None => &[],
        };
        'scan: loop {
            if self.source.next_char(true) == END_CHAR {
                return (END_OF_INPUT, String::new());
            }
            for rule in rules {
                let text = match self.dfa.match_at(rule.vertex, &mut self.source) {
                    Some(text) if !text.is_empty() => text,
                    _ => continue,
                };
                let token = match rule.token {
                    Some(token) => token,
                    None => continue 'scan,
                };
                let token = match rule.keywords {
                    Keywords::Off => None,
                    Keywords::Exact => self.catalog.find_reserved_word(&text),
                    Keywords::IgnoreCase => self.catalog.find_reserved_word_ignore_case(&text),
                }
                .unwrap_or(token);
                stx_log!("scanner: {} {:?}", token, text);
                return (token, text);
            }
            let c = self.source.next_char(false);
            return (c as i32, c.to_string());
        }
    }
}

impl<'d, V: From<String>, S: CharSource> TokenSource<V> for RegexScanner<'d, S> {
    fn next_token(&mut self) -> (i32, V) {
        let (token, text) = self.next_lexeme();
        (token, V::from(text))
    }
}

/// Reads `source` to the end, logging one `Token: NAME(id):value` line per token. Returns the
/// lines.
pub fn dump_tokens<V, S>(source: &mut S, catalog: &SymbolCatalog) -> Vec<String>
where
    V: Display,
    S: TokenSource<V> + ?Sized,
{
    let mut lines = Vec::new();
    loop {
        let (token, value) = source.next_token();
        if token == END_OF_INPUT {
            return lines;
        }
        let line = format!("Token: {}({}):{}", catalog.name(token), token, value);
        info!("{}", line);
        lines.push(line);
    }
}
