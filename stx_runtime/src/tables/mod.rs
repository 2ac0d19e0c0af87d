//! Parsing tables and the resolver interface shared by both encodings.

pub(crate) mod packed;
pub(crate) mod tabular;

use crate::error::TableError;
use crate::symbols::SymbolCatalog;
use crate::DEFAULT_STACK_DEPTH;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Raw action value meaning "accept the input".
pub const ACCEPT: i32 = i32::MAX;

/// A decoded action table entry.
///
/// Generated tables store actions as plain integers: `0` is an error, a positive value is the
/// state to shift to, a negative value is the rule to reduce by, and [`ACCEPT`] accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
    Error,
}

impl Action {
    pub fn decode(raw: i32) -> Action {
        match raw {
            ACCEPT => Action::Accept,
            0 => Action::Error,
            n if n > 0 => Action::Shift(n as usize),
            n => Action::Reduce(n.unsigned_abs() as usize),
        }
    }

    pub fn encode(self) -> i32 {
        match self {
            Action::Shift(state) => state as i32,
            Action::Reduce(rule) => -(rule as i32),
            Action::Accept => ACCEPT,
            Action::Error => 0,
        }
    }

    pub fn is_error(self) -> bool {
        self == Action::Error
    }
}

/// A grammar rule as the driver sees it: which nonterminal it produces, and how many frames a
/// reduction pops.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GrammarRule {
    /// Ordinal of the left-hand nonterminal, starting at zero.
    pub symbol: usize,
    pub reductions: usize,
}

impl GrammarRule {
    pub const fn new(symbol: usize, reductions: usize) -> GrammarRule {
        GrammarRule { symbol, reductions }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Packed,
    Tabular,
}

/// Maps (state, symbol) to an action and (state, nonterminal) to a goto target.
///
/// Both encodings implement this with the same semantics; they differ only in space and lookup
/// cost. Lookups outside the tables resolve to [`Action::Error`] or `None`, never a panic.
pub trait TableResolver: Debug + Send + Sync {
    fn encoding(&self) -> Encoding;

    fn num_states(&self) -> usize;

    fn num_nonterminals(&self) -> usize;

    fn action(&self, catalog: &SymbolCatalog, state: usize, token: i32) -> Action;

    fn goto(&self, state: usize, nonterminal: usize) -> Option<usize>;

    /// Index into the error message table for `state`, if the generator assigned one.
    fn message_index(&self, state: usize) -> Option<usize>;

    /// Tokens with a non-error action in `state`.
    ///
    /// Packed tables list only the row's explicit entries, even when the row default is not an
    /// error, so they can report fewer tokens than the same tables expanded with
    /// [`TabularTables::from_packed`](crate::TabularTables::from_packed).
    fn valid_tokens(&self, catalog: &SymbolCatalog, state: usize) -> Vec<i32>;
}

/// Everything a parse session reads: the symbol catalog, the rules, one action/goto encoding,
/// and the error and recover tables. Read-only once built; sessions borrow it.
#[derive(Debug)]
pub struct ParserTables {
    catalog: SymbolCatalog,
    rules: Vec<GrammarRule>,
    errors: Vec<String>,
    recovers: Vec<i32>,
    stack_depth: usize,
    resolver: Box<dyn TableResolver>,
}

impl ParserTables {
    pub fn new<R: TableResolver + 'static>(
        catalog: SymbolCatalog,
        rules: Vec<GrammarRule>,
        resolver: R,
    ) -> ParserTables {
        ParserTables {
            catalog,
            rules,
            errors: Vec::new(),
            recovers: Vec::new(),
            stack_depth: DEFAULT_STACK_DEPTH,
            resolver: Box::new(resolver),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> ParserTables {
        self.errors = errors;
        self
    }

    pub fn with_recovers(mut self, recovers: Vec<i32>) -> ParserTables {
        self.recovers = recovers;
        self
    }

    pub fn with_stack_depth(mut self, stack_depth: usize) -> ParserTables {
        self.stack_depth = stack_depth;
        self
    }

    /// Checks that rules and message indices stay inside the tables. Loaders call this; code
    /// that assembles tables by hand should too.
    pub fn validate(self) -> Result<ParserTables, TableError> {
        if self.stack_depth < 2 {
            return Err(TableError::Invalid(format!(
                "stack depth {} leaves no room for a shift",
                self.stack_depth
            )));
        }
        let nonterminals = self.resolver.num_nonterminals();
        for state in 0..self.resolver.num_states() {
            if let Some(index) = self.resolver.message_index(state) {
                if index >= self.errors.len() {
                    return Err(TableError::MessageIndex {
                        state,
                        index,
                        count: self.errors.len(),
                    });
                }
            }
        }
        // Rule 0 is the augmented start rule and is never reduced.
        for (rule, r) in self.rules.iter().enumerate().skip(1) {
            if r.symbol >= nonterminals {
                return Err(TableError::RuleSymbol {
                    rule,
                    symbol: r.symbol,
                    count: nonterminals,
                });
            }
        }
        Ok(self)
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    pub fn rule(&self, rule: usize) -> Option<GrammarRule> {
        self.rules.get(rule).copied()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn recovers(&self) -> &[i32] {
        &self.recovers
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    pub fn encoding(&self) -> Encoding {
        self.resolver.encoding()
    }

    pub fn resolver(&self) -> &dyn TableResolver {
        &*self.resolver
    }

    pub fn action(&self, state: usize, token: i32) -> Action {
        let action = self.resolver.action(&self.catalog, state, token);
        stx_log!("action({}, {}) = {:?}", state, token, action);
        action
    }

    pub fn goto(&self, state: usize, nonterminal: usize) -> Option<usize> {
        let target = self.resolver.goto(state, nonterminal);
        stx_log!("goto({}, {}) = {:?}", state, nonterminal, target);
        target
    }

    /// The configured message for `state`, if any.
    pub fn state_message(&self, state: usize) -> Option<&str> {
        self.resolver
            .message_index(state)
            .and_then(|index| self.errors.get(index))
            .map(|s| s.as_str())
    }

    pub fn valid_tokens(&self, state: usize) -> Vec<i32> {
        self.resolver.valid_tokens(&self.catalog, state)
    }
}
