use super::packed::PackedTables;
use super::{Action, Encoding, TableResolver};
use crate::error::TableError;
use crate::symbols::SymbolCatalog;
use std::convert::TryFrom;

/// Dense ("tabular") action and goto tables: one row per state, one column per token followed
/// by one column per nonterminal. Token columns follow the symbol catalog's order.
#[derive(Clone, Debug)]
pub struct TabularTables {
    tokens: usize,
    nonterminals: usize,
    cells: Vec<i32>,
    messages: Vec<i32>,
}

impl TabularTables {
    /// `messages` holds one error message index per state (negative for none); it may be empty.
    pub fn new(
        tokens: usize,
        nonterminals: usize,
        rows: Vec<Vec<i32>>,
        messages: Vec<i32>,
    ) -> Result<TabularTables, TableError> {
        let columns = tokens.checked_add(nonterminals).ok_or_else(|| {
            TableError::Invalid(format!(
                "{} tokens and {} nonterminals overflow the column count",
                tokens, nonterminals
            ))
        })?;
        for (state, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(TableError::RowWidth {
                    state,
                    found: row.len(),
                    expected: columns,
                });
            }
        }
        if !messages.is_empty() && messages.len() != rows.len() {
            return Err(TableError::Invalid(format!(
                "{} error message entries for {} states",
                messages.len(),
                rows.len()
            )));
        }
        Ok(TabularTables {
            tokens,
            nonterminals,
            cells: rows.concat(),
            messages,
        })
    }

    /// Expands packed tables into the dense form. Row defaults fill every token column the row
    /// does not list, and goto chain defaults fill every state, so both encodings resolve every
    /// (state, symbol) pair the same way.
    pub fn from_packed(packed: &PackedTables, catalog: &SymbolCatalog) -> TabularTables {
        let tokens = catalog.len();
        let nonterminals = packed.num_nonterminals();
        let states = packed.num_states();
        let columns = tokens + nonterminals;
        let mut cells = Vec::with_capacity(states * columns);
        for state in 0..states {
            for def in catalog.tokens() {
                cells.push(packed.action(catalog, state, def.token).encode());
            }
            for nonterminal in 0..nonterminals {
                let target = packed.goto(state, nonterminal).unwrap_or(0);
                cells.push(target as i32);
            }
        }
        let messages = packed.rows().iter().map(|row| row.msg).collect();
        TabularTables {
            tokens,
            nonterminals,
            cells,
            messages,
        }
    }

    fn columns(&self) -> usize {
        self.tokens + self.nonterminals
    }

    fn cell(&self, state: usize, column: usize) -> Option<i32> {
        if column >= self.columns() {
            return None;
        }
        let index = state.checked_mul(self.columns())?.checked_add(column)?;
        self.cells.get(index).copied()
    }

    pub fn row(&self, state: usize) -> Option<&[i32]> {
        let columns = self.columns();
        let start = state.checked_mul(columns)?;
        self.cells.get(start..start.checked_add(columns)?)
    }
}

impl TableResolver for TabularTables {
    fn encoding(&self) -> Encoding {
        Encoding::Tabular
    }

    fn num_states(&self) -> usize {
        match self.columns() {
            0 => 0,
            columns => self.cells.len() / columns,
        }
    }

    fn num_nonterminals(&self) -> usize {
        self.nonterminals
    }

    fn action(&self, catalog: &SymbolCatalog, state: usize, token: i32) -> Action {
        match catalog.index_of(token) {
            Some(column) if column < self.tokens => {
                self.cell(state, column).map_or(Action::Error, Action::decode)
            }
            _ => Action::Error,
        }
    }

    fn goto(&self, state: usize, nonterminal: usize) -> Option<usize> {
        if nonterminal >= self.nonterminals {
            return None;
        }
        let target = self.cell(state, self.tokens + nonterminal)?;
        match usize::try_from(target) {
            Ok(0) | Err(_) => None,
            Ok(target) => Some(target),
        }
    }

    fn message_index(&self, state: usize) -> Option<usize> {
        let msg = *self.messages.get(state)?;
        usize::try_from(msg).ok()
    }

    fn valid_tokens(&self, catalog: &SymbolCatalog, state: usize) -> Vec<i32> {
        let row = match self.row(state) {
            Some(row) => row,
            None => return Vec::new(),
        };
        catalog
            .tokens()
            .iter()
            .zip(&row[..self.tokens])
            .filter(|(_, &raw)| raw != 0)
            .map(|(def, _)| def.token)
            .collect()
    }
}
