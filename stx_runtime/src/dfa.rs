//! Regular-expression matching over compiled DFA tables.
//!
//! The generator flattens each automaton into two integer arrays. `vertices[v]` is the offset of
//! vertex `v`'s block in `edges`; a negative value marks the vertex as accepting and the block
//! starts at the negated offset. A block is laid out as
//!
//! ```text
//! count, { target, size, size * (start, end) } * count
//! ```
//!
//! A negative `size` complements the ranges. A `size` of zero matches any character. No
//! transition ever matches the end-of-input character.

use crate::error::TableError;
use crate::source::{CharSource, END_CHAR};
use std::convert::TryFrom;

/// One outgoing edge of a DFA vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    pub target: usize,
    /// Inclusive code point ranges. Empty means "any character".
    pub ranges: Vec<(u32, u32)>,
    pub complement: bool,
}

impl Transition {
    pub fn ranges(target: usize, ranges: &[(char, char)]) -> Transition {
        Transition {
            target,
            ranges: ranges.iter().map(|&(a, b)| (a as u32, b as u32)).collect(),
            complement: false,
        }
    }

    /// Every character outside `ranges`.
    pub fn except(target: usize, ranges: &[(char, char)]) -> Transition {
        Transition {
            complement: true,
            ..Transition::ranges(target, ranges)
        }
    }

    pub fn any(target: usize) -> Transition {
        Transition {
            target,
            ranges: Vec::new(),
            complement: false,
        }
    }

    pub fn matches(&self, c: char) -> bool {
        if c == END_CHAR {
            return false;
        }
        let code = c as u32;
        let inside = self.ranges.is_empty()
            || self
                .ranges
                .iter()
                .any(|&(start, end)| start <= code && code <= end);
        inside != self.complement
    }
}

#[derive(Clone, Debug, Default)]
struct Vertex {
    accepting: bool,
    transitions: Vec<Transition>,
}

/// Decoded, validated DFA tables.
#[derive(Clone, Debug)]
pub struct DfaTables {
    vertices: Vec<i32>,
    edges: Vec<i32>,
    decoded: Vec<Vertex>,
}

impl DfaTables {
    pub fn new(vertices: Vec<i32>, edges: Vec<i32>) -> Result<DfaTables, TableError> {
        let mut decoded = Vec::with_capacity(vertices.len());
        for (vertex, &raw) in vertices.iter().enumerate() {
            decoded.push(decode_vertex(vertex, raw, &edges, vertices.len())?);
        }
        Ok(DfaTables {
            vertices,
            edges,
            decoded,
        })
    }

    pub fn vertices(&self) -> &[i32] {
        &self.vertices
    }

    pub fn edges(&self) -> &[i32] {
        &self.edges
    }

    pub fn num_vertices(&self) -> usize {
        self.decoded.len()
    }

    pub fn is_accepting(&self, vertex: usize) -> bool {
        self.decoded.get(vertex).map_or(false, |v| v.accepting)
    }

    /// Walks the automaton from `vertex`, taking the first matching transition at each step.
    ///
    /// Succeeds only if the vertex where no transition applies is accepting; accepting vertices
    /// passed on the way are not remembered. On success the source is left just after the
    /// returned text. On failure every consumed character is pushed back and the source is
    /// where it started.
    pub fn match_at<S: CharSource + ?Sized>(&self, vertex: usize, source: &mut S) -> Option<String> {
        let mut current = self.decoded.get(vertex)?;
        let mut recognized = String::new();
        loop {
            let c = source.next_char(true);
            match current.transitions.iter().find(|t| t.matches(c)) {
                Some(t) => {
                    recognized.push(source.next_char(false));
                    current = &self.decoded[t.target];
                }
                None if current.accepting => {
                    stx_log!("dfa: matched {:?} from vertex {}", recognized, vertex);
                    return Some(recognized);
                }
                None => {
                    for c in recognized.chars().rev() {
                        source.unget_char(c);
                    }
                    stx_log!("dfa: no match from vertex {}", vertex);
                    return None;
                }
            }
        }
    }
}

fn decode_vertex(
    vertex: usize,
    raw: i32,
    edges: &[i32],
    num_vertices: usize,
) -> Result<Vertex, TableError> {
    let bad = |reason: String| TableError::Dfa { vertex, reason };
    let mut at = raw.unsigned_abs() as usize;
    let mut next = |what: &str| -> Result<i32, TableError> {
        let value = edges
            .get(at)
            .copied()
            .ok_or_else(|| bad(format!("{} at edge offset {} is out of bounds", what, at)))?;
        at += 1;
        Ok(value)
    };

    let count = usize::try_from(next("transition count")?)
        .map_err(|_| bad("negative transition count".to_string()))?;
    let mut transitions = Vec::with_capacity(count.min(edges.len()));
    for _ in 0..count {
        let target = next("transition target")?;
        let target = usize::try_from(target)
            .ok()
            .filter(|&t| t < num_vertices)
            .ok_or_else(|| bad(format!("transition target {} is not a vertex", target)))?;
        let size = next("range count")?;
        let mut ranges = Vec::with_capacity((size.unsigned_abs() as usize).min(edges.len()));
        for _ in 0..size.unsigned_abs() {
            let start = next("range start")?;
            let end = next("range end")?;
            let start = u32::try_from(start).map_err(|_| bad(format!("negative range start {}", start)))?;
            let end = u32::try_from(end).map_err(|_| bad(format!("negative range end {}", end)))?;
            ranges.push((start, end));
        }
        transitions.push(Transition {
            target,
            ranges,
            complement: size < 0,
        });
    }
    Ok(Vertex {
        accepting: raw < 0,
        transitions,
    })
}

/// Assembles DFA tables vertex by vertex.
///
/// Offset 0 of the edge table is reserved, since an accepting vertex cannot be flagged at offset
/// zero (`-0 == 0`).
#[derive(Clone, Debug, Default)]
pub struct DfaBuilder {
    vertices: Vec<i32>,
    edges: Vec<i32>,
}

impl DfaBuilder {
    pub fn new() -> DfaBuilder {
        DfaBuilder {
            vertices: Vec::new(),
            edges: vec![0],
        }
    }

    /// Adds a vertex and returns its id. Targets may name vertices that are added later.
    pub fn push_vertex(&mut self, accepting: bool, transitions: &[Transition]) -> usize {
        if self.edges.is_empty() {
            self.edges.push(0);
        }
        let offset = self.edges.len() as i32;
        self.vertices.push(if accepting { -offset } else { offset });
        self.edges.push(transitions.len() as i32);
        for t in transitions {
            let size = t.ranges.len() as i32;
            self.edges.push(t.target as i32);
            self.edges.push(if t.complement { -size } else { size });
            for &(start, end) in &t.ranges {
                self.edges.push(start as i32);
                self.edges.push(end as i32);
            }
        }
        self.vertices.len() - 1
    }

    pub fn finish(self) -> Result<DfaTables, TableError> {
        DfaTables::new(self.vertices, self.edges)
    }
}
