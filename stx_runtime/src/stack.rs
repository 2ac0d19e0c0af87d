/// Parallel state and value stacks of one parse session.
///
/// Frame 0 always holds the start state 0. `top()` is the index of the last live frame, so an
/// empty parse has `top() == 0`. Capacity is fixed: a push at `top() == depth - 1` fails and
/// leaves the stack unchanged.
#[derive(Clone, Debug)]
pub struct ParserStack<V> {
    states: Vec<usize>,
    values: Vec<V>,
    depth: usize,
}

/// Returned by [`ParserStack::push`] when the stack is full.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StackFull;

impl<V: Default> ParserStack<V> {
    pub fn new(depth: usize) -> Self {
        let mut stack = Self {
            states: Vec::with_capacity(depth.min(64)),
            values: Vec::with_capacity(depth.min(64)),
            depth,
        };
        stack.reset();
        stack
    }

    pub fn reset(&mut self) {
        self.states.clear();
        self.values.clear();
        self.states.push(0);
        self.values.push(V::default());
    }
}

impl<V> ParserStack<V> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn top(&self) -> usize {
        self.states.len() - 1
    }

    /// State on top of the stack.
    pub fn state(&self) -> usize {
        self.states[self.top()]
    }

    pub fn states(&self) -> &[usize] {
        &self.states
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn top_value(&self) -> Option<&V> {
        self.values.last()
    }

    pub fn push(&mut self, state: usize, value: V) -> Result<(), StackFull> {
        if self.top() + 1 >= self.depth {
            return Err(StackFull);
        }
        self.states.push(state);
        self.values.push(value);
        Ok(())
    }

    /// Pops the top frame. Frame 0 is never popped.
    pub fn pop(&mut self) -> Option<(usize, V)> {
        if self.top() == 0 {
            return None;
        }
        let state = self.states.pop()?;
        let value = self.values.pop()?;
        Some((state, value))
    }

    /// The values of the top `count` frames, oldest first. `None` if that would reach frame 0.
    pub fn top_values_mut(&mut self, count: usize) -> Option<&mut [V]> {
        if count > self.top() {
            return None;
        }
        let start = self.values.len() - count;
        Some(&mut self.values[start..])
    }

    /// Drops the top `count` frames. Callers check `count` against `top()` first.
    pub(crate) fn discard(&mut self, count: usize) {
        let keep = self.states.len().saturating_sub(count).max(1);
        self.states.truncate(keep);
        self.values.truncate(keep);
    }

    pub(crate) fn into_top_value(mut self) -> Option<V> {
        self.values.pop()
    }
}
