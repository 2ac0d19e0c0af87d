//! Character input for the DFA matcher.

/// Returned by [`CharSource::next_char`] at the end of the input. It never matches a DFA edge.
pub const END_CHAR: char = '\0';

/// A character stream with pushback.
///
/// `next_char(true)` looks at the next character without consuming it. `unget_char` pushes a
/// character back so the next read returns it; a source must accept at least as many pushbacks
/// as the longest lexeme it is matched against.
pub trait CharSource {
    fn next_char(&mut self, peek_only: bool) -> char;

    fn unget_char(&mut self, c: char);
}

/// Adapts a `char` iterator to [`CharSource`].
#[derive(Clone, Debug)]
pub struct PushbackChars<I> {
    chars: I,
    pushback: Vec<char>,
    offset: usize,
}

impl<I: Iterator<Item = char>> PushbackChars<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            pushback: Vec::new(),
            offset: 0,
        }
    }

    /// Number of characters consumed so far, net of pushbacks.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<I: Iterator<Item = char>> CharSource for PushbackChars<I> {
    fn next_char(&mut self, peek_only: bool) -> char {
        let c = match self.pushback.pop() {
            Some(c) => c,
            None => match self.chars.next() {
                Some(c) => c,
                None => return END_CHAR,
            },
        };
        if peek_only {
            self.pushback.push(c);
        } else {
            self.offset += 1;
        }
        c
    }

    fn unget_char(&mut self, c: char) {
        self.pushback.push(c);
        self.offset = self.offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut src = PushbackChars::new("ab".chars());
        assert_eq!(src.next_char(true), 'a');
        assert_eq!(src.next_char(true), 'a');
        assert_eq!(src.offset(), 0);
        assert_eq!(src.next_char(false), 'a');
        assert_eq!(src.next_char(false), 'b');
        assert_eq!(src.next_char(false), END_CHAR);
        assert_eq!(src.offset(), 2);
    }

    #[test]
    fn unget_replays_in_reverse() {
        let mut src = PushbackChars::new("xyz".chars());
        let a = src.next_char(false);
        let b = src.next_char(false);
        src.unget_char(b);
        src.unget_char(a);
        assert_eq!(src.offset(), 0);
        let rest: String = (0..3).map(|_| src.next_char(false)).collect();
        assert_eq!(rest, "xyz");
    }
}
