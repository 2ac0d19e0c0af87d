use super::{Action, Encoding, TableResolver};
use crate::error::TableError;
use crate::symbols::SymbolCatalog;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Per-state header of the packed action table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StateRow {
    /// First entry of this state's actions in the action table.
    pub position: usize,
    /// Number of entries; rows may share entries with other states.
    pub elements: usize,
    /// Raw action used for symbols not listed in the row.
    pub defa: i32,
    /// Error message index, or negative for none.
    #[serde(default = "no_message")]
    pub msg: i32,
}

fn no_message() -> i32 {
    -1
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub symbol: i32,
    pub state: i32,
}

/// One link of a goto chain. A chain ends at the entry whose `origin` is `-1`; that entry's
/// `destination` applies to every state not listed before it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GotoEntry {
    pub origin: i32,
    pub destination: i32,
}

impl GotoEntry {
    pub const SENTINEL: i32 = -1;

    fn is_sentinel(&self) -> bool {
        self.origin == GotoEntry::SENTINEL
    }
}

/// Sparse ("packed") action and goto tables.
#[derive(Clone, Debug)]
pub struct PackedTables {
    rows: Vec<StateRow>,
    actions: Vec<ActionEntry>,
    gotos: Vec<GotoEntry>,
    /// Start of the goto chain for each nonterminal.
    goto_index: Vec<usize>,
}

impl PackedTables {
    pub fn new(
        rows: Vec<StateRow>,
        actions: Vec<ActionEntry>,
        gotos: Vec<GotoEntry>,
        goto_index: Vec<usize>,
    ) -> Result<PackedTables, TableError> {
        for (state, row) in rows.iter().enumerate() {
            let end = row.position.checked_add(row.elements);
            if end.map_or(true, |end| end > actions.len()) {
                return Err(TableError::ActionRow {
                    state,
                    position: row.position,
                    end: row.position.saturating_add(row.elements),
                    len: actions.len(),
                });
            }
        }
        for (nonterminal, &start) in goto_index.iter().enumerate() {
            let terminated = gotos
                .get(start..)
                .map_or(false, |chain| chain.iter().any(GotoEntry::is_sentinel));
            if !terminated {
                return Err(TableError::GotoChain { nonterminal, start });
            }
        }
        Ok(PackedTables {
            rows,
            actions,
            gotos,
            goto_index,
        })
    }

    pub fn rows(&self) -> &[StateRow] {
        &self.rows
    }

    pub fn actions(&self) -> &[ActionEntry] {
        &self.actions
    }

    pub fn gotos(&self) -> &[GotoEntry] {
        &self.gotos
    }

    pub fn goto_index(&self) -> &[usize] {
        &self.goto_index
    }

    fn row_entries(&self, state: usize) -> Option<(&StateRow, &[ActionEntry])> {
        let row = self.rows.get(state)?;
        let end = row.position.checked_add(row.elements)?;
        let entries = self.actions.get(row.position..end)?;
        Some((row, entries))
    }
}

impl TableResolver for PackedTables {
    fn encoding(&self) -> Encoding {
        Encoding::Packed
    }

    fn num_states(&self) -> usize {
        self.rows.len()
    }

    fn num_nonterminals(&self) -> usize {
        self.goto_index.len()
    }

    fn action(&self, _catalog: &SymbolCatalog, state: usize, token: i32) -> Action {
        match self.row_entries(state) {
            Some((row, entries)) => {
                let raw = entries
                    .iter()
                    .find(|entry| entry.symbol == token)
                    .map_or(row.defa, |entry| entry.state);
                Action::decode(raw)
            }
            None => Action::Error,
        }
    }

    fn goto(&self, state: usize, nonterminal: usize) -> Option<usize> {
        let start = *self.goto_index.get(nonterminal)?;
        for entry in self.gotos.get(start..)? {
            if entry.is_sentinel() || usize::try_from(entry.origin).ok() == Some(state) {
                // State 0 is the start state and never a goto target.
                return match usize::try_from(entry.destination) {
                    Ok(0) | Err(_) => None,
                    Ok(target) => Some(target),
                };
            }
        }
        None
    }

    fn message_index(&self, state: usize) -> Option<usize> {
        let msg = self.rows.get(state)?.msg;
        usize::try_from(msg).ok()
    }

    fn valid_tokens(&self, _catalog: &SymbolCatalog, state: usize) -> Vec<i32> {
        match self.row_entries(state) {
            Some((_, entries)) => entries.iter().map(|entry| entry.symbol).collect(),
            None => Vec::new(),
        }
    }
}

/// Builds packed tables one state at a time:
///
/// ```rust,ignore
/// let mut b = PackedBuilder::new();
/// b.start_state();
/// b.push_action(NUM, 3);
/// b.push_action(0, ACCEPT);
/// b.finish_state(0, -1);
/// b.push_goto_chain(&[(0, 1)], 2);
/// let tables = b.finish()?;
/// ```
///
/// A state whose entries equal an earlier state's is stored once and the rows share it.
pub struct PackedBuilder {
    rows: Vec<StateRow>,
    actions: Vec<ActionEntry>,
    gotos: Vec<GotoEntry>,
    goto_index: Vec<usize>,
    pending: Vec<ActionEntry>,
}

impl PackedBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            actions: Vec::new(),
            gotos: Vec::new(),
            goto_index: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn start_state(&mut self) {
        self.pending.clear();
    }

    pub fn push_action(&mut self, symbol: i32, raw: i32) {
        self.pending.push(ActionEntry { symbol, state: raw });
    }

    pub fn finish_state(&mut self, defa: i32, msg: i32) {
        let elements = self.pending.len();
        let shared = self
            .rows
            .iter()
            .find(|row| {
                row.elements == elements
                    && self.actions[row.position..row.position + row.elements] == self.pending[..]
            })
            .map(|row| row.position);
        let position = match shared {
            Some(position) if elements > 0 => position,
            _ => {
                let position = self.actions.len();
                self.actions.append(&mut self.pending);
                position
            }
        };
        self.pending.clear();
        self.rows.push(StateRow {
            position,
            elements,
            defa,
            msg,
        });
    }

    /// Appends the chain for the next nonterminal: explicit `(origin, destination)` pairs, then
    /// the sentinel carrying `default`.
    pub fn push_goto_chain(&mut self, entries: &[(usize, usize)], default: usize) {
        self.goto_index.push(self.gotos.len());
        for &(origin, destination) in entries {
            self.gotos.push(GotoEntry {
                origin: origin as i32,
                destination: destination as i32,
            });
        }
        self.gotos.push(GotoEntry {
            origin: GotoEntry::SENTINEL,
            destination: default as i32,
        });
    }

    pub fn finish(self) -> Result<PackedTables, TableError> {
        PackedTables::new(self.rows, self.actions, self.gotos, self.goto_index)
    }
}

impl Default for PackedBuilder {
    fn default() -> Self {
        Self::new()
    }
}
