/// Forward-only position over the normalized lines with bounded peeking.
///
/// Items returned by [`current`](Self::current) and [`peek`](Self::peek)
/// borrow the underlying slice, not the cursor, so the cursor can be advanced
/// while they are still in use.
#[derive(Debug, Clone, Copy)]
pub struct LineCursor<'a, T> {
    lines: &'a [T],
    pos: usize,
}

impl<'a, T> LineCursor<'a, T> {
    pub fn new(lines: &'a [T]) -> Self {
        Self { lines, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn current(&self) -> Option<&'a T> {
        self.lines.get(self.pos)
    }

    /// The line `offset` positions ahead of the current one; `peek(0)` is the
    /// current line.
    pub fn peek(&self, offset: usize) -> Option<&'a T> {
        self.pos.checked_add(offset).and_then(|i| self.lines.get(i))
    }

    /// True when the current line is the final one.
    pub fn is_last(&self) -> bool {
        self.pos + 1 >= self.lines.len()
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.lines.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_move() {
        let lines = ["a", "b", "c"];
        let cursor = LineCursor::new(&lines);
        assert_eq!(cursor.peek(2), Some(&"c"));
        assert_eq!(cursor.peek(3), None);
        assert_eq!(cursor.current(), Some(&"a"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn advance_is_clamped_to_the_end() {
        let lines = ["a", "b", "c"];
        let mut cursor = LineCursor::new(&lines);
        cursor.advance(2);
        assert!(cursor.is_last());
        assert_eq!(cursor.current(), Some(&"c"));
        cursor.advance(10);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.peek(usize::MAX), None);
    }

    #[test]
    fn empty_input_has_no_current_line() {
        let lines: [&str; 0] = [];
        let cursor = LineCursor::new(&lines);
        assert!(cursor.current().is_none());
        assert!(cursor.is_last());
    }
}
