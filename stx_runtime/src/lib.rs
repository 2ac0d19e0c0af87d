//! # stx_runtime -- the engine inside generated parsers
//!
//! A parser generator turns a grammar into tables. This crate is the part that runs those
//! tables: a shift-reduce driver for LALR action/goto tables, and a backtracking matcher for the
//! DFA tables that describe regular-expression tokens. Nothing here analyzes grammars or emits
//! code; the tables arrive precompiled, either built in Rust code or loaded from JSON.
//!
//! # Table encodings
//!
//! Parsing tables come in two shapes, both behind the [`TableResolver`] trait:
//!
//! * **packed** ([`PackedTables`]) stores, per state, only the symbols whose action differs from
//!   the state's default, plus goto chains per nonterminal. Small, but every lookup is a scan.
//! * **tabular** ([`TabularTables`]) is a dense `[state][column]` matrix. Every lookup is O(1),
//!   at the cost of one cell per (state, symbol).
//!
//! The driver never knows which one it is talking to. The encoding only picks the default for
//! panic-mode recovery (on for tabular, off for packed), and [`ParserOptions`] can override
//! that.
//!
//! # Driving the parser
//!
//! The parser is pushed one token at a time, as with yacc push parsers: your code owns the
//! loop and calls into the runtime briefly for each token.
//!
//! ```rust,ignore
//! let tables = stx_runtime::load_tables_json("calc.json")?;
//! let mut parser = Parser::<Value>::new(&tables, ParserOptions::default());
//! let mut actions = Calculator::default();
//!
//! for (token, value) in tokens {
//!     match parser.parse(&mut actions, token, value) {
//!         Ok(Parsed::Shifted) => {}
//!         Ok(Parsed::Accepted) => break,
//!         Err(e) if !e.is_fatal() => eprintln!("{}", e),
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! println!("result = {:?}", parser.result());
//! ```
//!
//! A call performs at most one shift. Reductions do not consume the lookahead, so one call may
//! run any number of them (each one calls [`SemanticActions::reduce`]) before it shifts, accepts
//! or fails. [`Parser::run`] is the pull-mode alternative: it fetches tokens itself from a
//! [`TokenSource`] until the input is accepted or rejected.
//!
//! ## Semantic actions
//!
//! Reductions hand the values of the rule's right-hand side to your [`SemanticActions`]
//! implementation, which returns the value of the left-hand side. Returning
//! [`ActionError::Failed`] stops the parse with an internal error; returning
//! [`ActionError::SyntaxError`] makes the driver treat the lookahead as a syntax error, which
//! enters recovery when it is enabled.
//!
//! ## Error recovery
//!
//! With recovery enabled, the first syntax error is handed to
//! [`SemanticActions::report_error`]. The driver then pops stack frames until some state can
//! shift one of the table's *recover tokens* (typically `;` or a closing bracket), shifts it as
//! a synthetic token, and continues. If the next tokens still fail, they are dropped one at a
//! time. Reaching the bottom of the stack or the end of input during this fails the parse.
//!
//! # Scanning
//!
//! [`DfaTables`] holds the compiled regular expressions as vertex/edge tables. Matching walks
//! the graph over a [`CharSource`]; a failed match pushes every consumed character back, so the
//! source ends exactly where it started. [`RegexScanner`] strings matches together into tokens
//! in the order a generated lexer would try them.
//!
//! # Logging
//!
//! All diagnostics go through the `log` facade. [`ParserOptions::verbose`] traces every shift,
//! reduce and recovery step with the full stack contents at `debug` level. The `stx_log` cargo
//! feature additionally enables low-level traces of table lookups.

#![warn(rust_2018_idioms)]

#[cfg(feature = "stx_log")]
#[macro_export]
macro_rules! stx_log {
    (
        $($t:tt)*
    ) => {
        ::log::debug!( $($t)* )
    }
}

#[cfg(not(feature = "stx_log"))]
#[macro_export]
macro_rules! stx_log {
    (
        $($t:tt)*
    ) => {
        // nothing
    };
}

mod dfa;
mod driver;
mod error;
pub mod io;
mod options;
mod recovery;
pub mod scanner;
pub mod source;
mod stack;
mod symbols;
mod tables;

pub use dfa::{DfaBuilder, DfaTables, Transition};
pub use driver::{ActionError, Parsed, Parser, SemanticActions};
pub use error::{ParseError, ParseStatus, TableError};
pub use io::{load_tables_json, load_tables_json_str, EncodedTables, TableFile};
pub use options::ParserOptions;
pub use recovery::RecoveryPhase;
pub use scanner::{dump_tokens, Keywords, LexerMode, RegexScanner, TokenRule, TokenSource, Tokens};
pub use source::{CharSource, PushbackChars};
pub use stack::{ParserStack, StackFull};
pub use symbols::{SymbolCatalog, TokenDef};
pub use tables::packed::{ActionEntry, GotoEntry, PackedBuilder, PackedTables, StateRow};
pub use tables::tabular::TabularTables;
pub use tables::{Action, Encoding, GrammarRule, ParserTables, TableResolver, ACCEPT};

/// Token id reported by scanners at the end of the input.
pub const END_OF_INPUT: i32 = 0;

/// Stack depth used when a table set does not specify one.
pub const DEFAULT_STACK_DEPTH: usize = 5000;
