/// Read position into a type specification. One cursor is shared by
/// exclusive reference across every recursive call of a single parse.
pub struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    /// Byte offset of the next unread character.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.len()
    }

    /// Current character, or None at end of input.
    pub fn cur(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    /// Returns true if the current character is `b`.
    pub fn matches(&self, b: u8) -> bool {
        self.cur() == Some(b)
    }

    /// Skip one character. Does nothing at end of input.
    pub fn consume(&mut self) {
        if !self.eof() {
            self.pos += 1;
        }
    }

    /// Consume the current character if it is `b`.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.matches(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Peeks characters while predicate returns true. Returns number of characters peeked.
    fn peek_while<P>(&self, predicate: P) -> usize
    where
        P: Fn(u8) -> bool,
    {
        let mut consumed = 0;
        while self.pos + consumed < self.len() && predicate(self.src[self.pos + consumed]) {
            consumed += 1;
        }

        consumed
    }

    /// Consumes the run of characters accepted by `predicate` and returns
    /// it. Returns None, leaving the cursor where it was, if the run is empty.
    pub fn extract_run<P>(&mut self, predicate: P) -> Option<&'a str>
    where
        P: Fn(u8) -> bool,
    {
        let length = self.peek_while(predicate);
        if length == 0 {
            return None;
        }

        let run = &self.src[self.pos..self.pos + length];
        self.pos += length;
        // Only ever called with ASCII predicates, so the run is valid utf-8.
        std::str::from_utf8(run).ok()
    }

    /// Consumes a run of ASCII decimal digits.
    pub fn extract_digits(&mut self) -> Option<&'a str> {
        self.extract_run(|b| b.is_ascii_digit())
    }
}
