/// A forward-only position over the scanned string.
///
/// The scanner never backtracks: each token ends where the next begins, so
/// the cursor only ever moves to the end of the token just emitted.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Finds the next occurrence of `b` at or after the cursor.
    ///
    /// Returns the absolute byte position without moving the cursor.
    pub fn find(&self, b: u8) -> Option<usize> {
        self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .position(|&c| c == b)
            .map(|off| self.i + off)
    }

    /// Moves the cursor to an absolute position at or after the current one.
    pub fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.i, "cursor moved backwards: {} -> {pos}", self.i);
        self.i = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        cur.advance_to(5);
        assert!(cur.eof());
    }

    #[test]
    fn find_is_relative_to_cursor() {
        let mut cur = Cursor::new("[a][b]");
        assert_eq!(cur.find(b'['), Some(0));
        assert_eq!(cur.find(b']'), Some(2));
        cur.advance_to(3);
        assert_eq!(cur.find(b'['), Some(3));
        assert_eq!(cur.find(b']'), Some(5));
    }

    #[test]
    fn find_missing_byte() {
        let cur = Cursor::new("no brackets");
        assert_eq!(cur.find(b'['), None);
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.find(b'['), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn find_at_eof() {
        let mut cur = Cursor::new("ab]");
        cur.advance_to(3);
        assert!(cur.eof());
        assert_eq!(cur.find(b']'), None);
    }
}
