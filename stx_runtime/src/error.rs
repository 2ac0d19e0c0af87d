use thiserror::Error;

/// The four outcomes a generated parser reports for a token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseStatus {
    Accepted,
    Shifted,
    ParsingError,
    InternalError,
}

impl ParseStatus {
    /// Collapses the result of [`Parser::parse`](crate::Parser::parse) into a status code.
    pub fn of(result: &Result<crate::Parsed, ParseError>) -> ParseStatus {
        match result {
            Ok(crate::Parsed::Accepted) => ParseStatus::Accepted,
            Ok(crate::Parsed::Shifted) => ParseStatus::Shifted,
            Err(e) => e.status(),
        }
    }
}

/// Errors raised while driving the automaton.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// No action for the lookahead, and recovery is disabled. The stack is untouched, so the
    /// caller may offer a different token.
    #[error("{message}")]
    Syntax {
        state: usize,
        token: i32,
        message: String,
    },

    /// The error callback declined to continue after the first syntax error.
    #[error("{message} (recovery declined)")]
    Aborted {
        state: usize,
        token: i32,
        message: String,
    },

    /// Recovery discarded the lookahead. Parsing continues with the next token.
    #[error("discarded token {name} while recovering from a syntax error")]
    TokenDropped { token: i32, name: String },

    /// Recovery emptied the stack, or hit the end of input while dropping tokens.
    #[error("unable to recover from syntax error in state {state} on token {token}")]
    RecoveryFailed { state: usize, token: i32 },

    #[error("semantic action for rule {rule} failed")]
    ActionFailed { rule: usize },

    #[error("parser stack overflow (depth {depth})")]
    StackOverflow { depth: usize },

    /// The tables contradicted themselves while parsing, e.g. a reduction with no goto.
    #[error("inconsistent parse tables: {0}")]
    Tables(String),
}

impl ParseError {
    pub fn status(&self) -> ParseStatus {
        match self {
            ParseError::Syntax { .. }
            | ParseError::Aborted { .. }
            | ParseError::TokenDropped { .. }
            | ParseError::RecoveryFailed { .. } => ParseStatus::ParsingError,
            ParseError::ActionFailed { .. }
            | ParseError::StackOverflow { .. }
            | ParseError::Tables(_) => ParseStatus::InternalError,
        }
    }

    /// True when the session cannot continue without [`Parser::init`](crate::Parser::init).
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ParseError::Syntax { .. } | ParseError::TokenDropped { .. }
        )
    }
}

/// Errors found while loading or validating tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tables JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state {state}: action entries {position}..{end} exceed the action table ({len} entries)")]
    ActionRow {
        state: usize,
        position: usize,
        end: usize,
        len: usize,
    },

    #[error("nonterminal {nonterminal}: goto chain starting at {start} is not terminated by a sentinel")]
    GotoChain { nonterminal: usize, start: usize },

    #[error("tabular row {state} has {found} columns, expected {expected}")]
    RowWidth {
        state: usize,
        found: usize,
        expected: usize,
    },

    #[error("state {state} uses error message {index}, but only {count} messages exist")]
    MessageIndex {
        state: usize,
        index: usize,
        count: usize,
    },

    #[error("rule {rule} reduces to nonterminal {symbol}, but only {count} nonterminals exist")]
    RuleSymbol {
        rule: usize,
        symbol: usize,
        count: usize,
    },

    #[error("DFA vertex {vertex}: {reason}")]
    Dfa { vertex: usize, reason: String },

    #[error("{0}")]
    Invalid(String),
}
