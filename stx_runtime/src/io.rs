//! Table sets on disk.
//!
//! A table file is one JSON object:
//!
//! ```json
//! {
//!   "tokens": [{"token": 0, "name": "$end", "fullName": "end of input"}, ...],
//!   "rules": [{"symbol": 0, "reductions": 1}, ...],
//!   "errors": ["expected ';'"],
//!   "recovers": [59],
//!   "stackDepth": 5000,
//!   "parser": {"encoding": "tabular", "nonterminals": 2, "rows": [[...], ...], "messages": [...]},
//!   "dfa": {"vertices": [...], "edges": [...]}
//! }
//! ```
//!
//! A packed `parser` object carries `rows`, `actions`, `gotos` and `gotoIndex` instead.

use crate::dfa::DfaTables;
use crate::error::TableError;
use crate::symbols::{SymbolCatalog, TokenDef};
use crate::tables::packed::{ActionEntry, GotoEntry, PackedTables, StateRow};
use crate::tables::tabular::TabularTables;
use crate::tables::{GrammarRule, ParserTables};
use crate::DEFAULT_STACK_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFile {
    pub tokens: Vec<TokenDef>,
    pub rules: Vec<GrammarRule>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub recovers: Vec<i32>,
    #[serde(default = "default_stack_depth")]
    pub stack_depth: usize,
    pub parser: EncodedTables,
    #[serde(default)]
    pub dfa: Option<DfaFile>,
}

fn default_stack_depth() -> usize {
    DEFAULT_STACK_DEPTH
}

/// The action/goto tables in one of the two encodings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "lowercase")]
pub enum EncodedTables {
    Packed {
        rows: Vec<StateRow>,
        actions: Vec<ActionEntry>,
        gotos: Vec<GotoEntry>,
        #[serde(rename = "gotoIndex")]
        goto_index: Vec<usize>,
    },
    Tabular {
        nonterminals: usize,
        /// One row per state: a column per catalog token, then one per nonterminal.
        rows: Vec<Vec<i32>>,
        #[serde(default)]
        messages: Vec<i32>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DfaFile {
    pub vertices: Vec<i32>,
    pub edges: Vec<i32>,
}

impl TableFile {
    pub fn from_json_str(text: &str) -> Result<TableFile, TableError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<TableFile, TableError> {
        let text = std::fs::read_to_string(path)?;
        TableFile::from_json_str(&text)
    }

    /// Builds and validates the parser tables, picking the resolver from the encoding.
    pub fn parser_tables(&self) -> Result<ParserTables, TableError> {
        let catalog = SymbolCatalog::new(self.tokens.clone());
        let rules = self.rules.clone();
        let tables = match &self.parser {
            EncodedTables::Packed {
                rows,
                actions,
                gotos,
                goto_index,
            } => {
                let packed = PackedTables::new(
                    rows.clone(),
                    actions.clone(),
                    gotos.clone(),
                    goto_index.clone(),
                )?;
                ParserTables::new(catalog, rules, packed)
            }
            EncodedTables::Tabular {
                nonterminals,
                rows,
                messages,
            } => {
                let tabular =
                    TabularTables::new(catalog.len(), *nonterminals, rows.clone(), messages.clone())?;
                ParserTables::new(catalog, rules, tabular)
            }
        };
        tables
            .with_errors(self.errors.clone())
            .with_recovers(self.recovers.clone())
            .with_stack_depth(self.stack_depth)
            .validate()
    }

    /// The scanner tables, if the file has any.
    pub fn dfa_tables(&self) -> Result<Option<DfaTables>, TableError> {
        match &self.dfa {
            Some(dfa) => Ok(Some(DfaTables::new(dfa.vertices.clone(), dfa.edges.clone())?)),
            None => Ok(None),
        }
    }
}

pub fn load_tables_json(path: impl AsRef<Path>) -> Result<ParserTables, TableError> {
    let path = path.as_ref();
    let file = TableFile::load(path)?;
    log::debug!(
        "loaded {} tables from {}: {} tokens, {} rules",
        match file.parser {
            EncodedTables::Packed { .. } => "packed",
            EncodedTables::Tabular { .. } => "tabular",
        },
        path.display(),
        file.tokens.len(),
        file.rules.len()
    );
    file.parser_tables()
}

pub fn load_tables_json_str(text: &str) -> Result<ParserTables, TableError> {
    TableFile::from_json_str(text)?.parser_tables()
}
