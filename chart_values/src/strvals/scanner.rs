//! Character cursor shared by the assignment parsers.

/// Text read up to a stop character.
#[derive(Debug)]
pub(super) struct Token {
    /// Characters consumed before the stop character, with escapes resolved.
    pub(super) text: String,
    /// The stop character, or `None` when input ran out first.
    pub(super) stop: Option<char>,
}

/// Cursor over the characters of one expression.
#[derive(Debug)]
pub(super) struct Scanner {
    chars: Vec<char>,
    pos: usize,
    escapes: bool,
}

impl Scanner {
    /// A scanner that resolves `\x` to `x`.
    pub(super) fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            escapes: true,
        }
    }

    /// A scanner that treats backslashes as ordinary characters.
    pub(super) fn literal(input: &str) -> Self {
        Self {
            escapes: false,
            ..Self::new(input)
        }
    }

    pub(super) fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    /// Step back over the character most recently returned.
    pub(super) const fn unread(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Consume characters until one of `stop` is found.
    ///
    /// The stop character is consumed but not included in the token. An
    /// escape at the very end of input drops the backslash and ends the token
    /// as if input had run out.
    pub(super) fn until(&mut self, stop: &[char]) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.next_char() {
            if stop.contains(&ch) {
                return Token {
                    text,
                    stop: Some(ch),
                };
            }
            if ch == '\\' && self.escapes {
                match self.next_char() {
                    Some(escaped) => text.push(escaped),
                    None => break,
                }
            } else {
                text.push(ch);
            }
        }
        Token { text, stop: None }
    }

    /// Consume and return everything left, verbatim.
    pub(super) fn rest(&mut self) -> String {
        let rest = self.remaining();
        self.pos = self.chars.len();
        rest
    }

    /// Everything left, without consuming it.
    pub(super) fn remaining(&self) -> String {
        self.chars
            .get(self.pos..)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    /// Advance past `count` characters.
    pub(super) fn skip(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.chars.len());
    }

    /// Consume blanks up to and including a comma.
    ///
    /// Returns `true` when a comma or the end of input was reached, meaning no
    /// value follows. Any other character is left unconsumed.
    pub(super) fn skip_empty(&mut self) -> bool {
        while let Some(ch) = self.next_char() {
            if ch == ',' {
                return true;
            }
            if !ch.is_whitespace() {
                self.unread();
                return false;
            }
        }
        true
    }
}
