use derive_new::new;
use std::fmt::Display;

/// 1-indexed line, 0-indexed column, as reported by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Indentation increased at the start of a logical line
    Indent,
    /// Indentation returned to an enclosing level
    Dedent,
    /// Identifier or keyword
    Name,
    /// End of a logical line
    Newline,
    /// Strings, numbers, operators and anything else
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    pub start: Position,
}

impl<'s> Token<'s> {
    pub fn line(&self) -> usize {
        self.start.line
    }
}
