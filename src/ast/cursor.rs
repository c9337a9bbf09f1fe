/// Scan position over expression source text.
///
/// There is no token stream: the parser pulls characters through the cursor
/// and classifies them in place. Positions are byte offsets.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves to a previously visited position.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos));
        self.pos = pos.min(self.text.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Current character, or `None` at end of text.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Moves past the current character.
    pub fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Consumes `expected` if it is the current character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Matches `\d+\.?\d*|\.\d+` at the current position and advances past it.
    pub fn match_numeric_literal(&mut self) -> Option<&'a str> {
        let bytes = self.rest().as_bytes();
        let int_digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        let mut len = int_digits;

        if bytes.get(len) == Some(&b'.') {
            let frac_digits = bytes[len + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if int_digits > 0 || frac_digits > 0 {
                len += 1 + frac_digits;
            }
        }

        if len == 0 {
            return None;
        }

        let literal = &self.rest()[..len];
        self.pos += len;
        Some(literal)
    }

    /// Byte offset of the next `c` at or after the current position.
    pub fn find(&self, c: char) -> Option<usize> {
        self.rest().find(c).map(|offset| self.pos + offset)
    }

    /// Returns the text between the current position and `end`, and moves to `end`.
    pub fn take_until(&mut self, end: usize) -> &'a str {
        let taken = &self.text[self.pos..end];
        self.pos = end;
        taken
    }
}
