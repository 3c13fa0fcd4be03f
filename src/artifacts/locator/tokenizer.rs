use crate::artifacts::locator::STRING_PREFIXES;
use crate::artifacts::locator::token::{Position, Token, TokenKind};
use std::collections::VecDeque;
use std::str::SplitInclusive;
use thiserror::Error;

const TAB_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unindent does not match any outer indentation level at {position}")]
    InconsistentDedent { position: Position },
    #[error("EOF in multi-line string starting at {start}")]
    UnterminatedMultilineString { start: Position },
    #[error("EOF in multi-line statement at line {line}")]
    UnterminatedStatement { line: usize },
    #[error("unterminated string literal at {start}")]
    UnterminatedString { start: Position },
}

impl TokenizeError {
    pub fn line(&self) -> usize {
        match self {
            TokenizeError::InconsistentDedent { position } => position.line,
            TokenizeError::UnterminatedMultilineString { start } => start.line,
            TokenizeError::UnterminatedStatement { line } => *line,
            TokenizeError::UnterminatedString { start } => start.line,
        }
    }
}

/// A string literal whose closing quote has not been seen yet
#[derive(Debug, Clone, Copy)]
struct OpenString {
    start: Position,
    start_offset: usize,
    quote: &'static str,
}

/// Lazy tokenizer for indentation-structured (Python-style) source.
///
/// Only the structure the locator cares about is reported: indentation
/// changes, names, logical line ends and a catch-all for everything else.
/// Comments, blank lines and line breaks inside brackets produce no tokens.
/// Blocks still open at end of input are not closed with dedents.
pub struct Tokenizer<'s> {
    source: &'s str,
    lines: SplitInclusive<'s, char>,
    line_number: usize,
    line_offset: usize,
    indents: Vec<usize>,
    paren_depth: usize,
    continued: bool,
    open_string: Option<OpenString>,
    pending: VecDeque<Token<'s>>,
    error: Option<TokenizeError>,
    finished: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(source: &'s str) -> Self {
        Tokenizer {
            source,
            lines: source.split_inclusive('\n'),
            line_number: 0,
            line_offset: 0,
            indents: vec![0],
            paren_depth: 0,
            continued: false,
            open_string: None,
            pending: VecDeque::new(),
            error: None,
            finished: false,
        }
    }

    fn scan_line(&mut self, line: &'s str) -> Result<(), TokenizeError> {
        let bytes = line.as_bytes();
        let content_end = line.trim_end_matches(['\n', '\r']).len();
        let mut pos = 0;

        if let Some(open) = self.open_string.take() {
            match find_string_end(bytes, 0, open.quote) {
                Some(end) => {
                    let text = &self.source[open.start_offset..self.line_offset + end];
                    self.push(TokenKind::Other, text, open.start);
                    pos = end;
                }
                None => {
                    self.open_string = Some(open);
                    return Ok(());
                }
            }
        } else if self.paren_depth == 0 && !self.continued {
            let (column, indent_end) = measure_indent(bytes);
            pos = indent_end;

            // blank or comment-only lines do not affect indentation
            if pos >= content_end || bytes[pos] == b'#' {
                return Ok(());
            }

            self.track_indentation(line, column, pos)?;
        } else {
            self.continued = false;
        }

        while pos < content_end {
            let rest = &line[pos..];
            let Some(c) = rest.chars().next() else {
                break;
            };

            match c {
                ' ' | '\t' | '\x0c' => pos += 1,
                '#' => pos = content_end,
                '\\' if pos + 1 == content_end => {
                    self.continued = true;
                    return Ok(());
                }
                '\'' | '"' => pos = self.scan_string(line, pos, pos)?,
                c if c == '_' || c.is_alphabetic() => {
                    let end = pos
                        + rest
                            .char_indices()
                            .find(|(_, c)| !(*c == '_' || c.is_alphanumeric()))
                            .map(|(idx, _)| idx)
                            .unwrap_or(rest.len());
                    let word = &line[pos..end];

                    if end < content_end
                        && matches!(bytes[end], b'\'' | b'"')
                        && STRING_PREFIXES.contains(word.to_ascii_lowercase().as_str())
                    {
                        pos = self.scan_string(line, pos, end)?;
                    } else {
                        self.push(TokenKind::Name, word, Position::new(self.line_number, pos));
                        pos = end;
                    }
                }
                c if c.is_ascii_digit()
                    || (c == '.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)) =>
                {
                    let end = scan_number(bytes, pos, content_end);
                    self.push(
                        TokenKind::Other,
                        &line[pos..end],
                        Position::new(self.line_number, pos),
                    );
                    pos = end;
                }
                _ => {
                    match c {
                        '(' | '[' | '{' => self.paren_depth += 1,
                        ')' | ']' | '}' => self.paren_depth = self.paren_depth.saturating_sub(1),
                        _ => {}
                    }
                    let end = pos + c.len_utf8();
                    self.push(
                        TokenKind::Other,
                        &line[pos..end],
                        Position::new(self.line_number, pos),
                    );
                    pos = end;
                }
            }
        }

        if self.paren_depth == 0 && self.open_string.is_none() {
            self.push(
                TokenKind::Newline,
                &line[content_end..],
                Position::new(self.line_number, content_end),
            );
        }

        Ok(())
    }

    fn track_indentation(
        &mut self,
        line: &'s str,
        column: usize,
        pos: usize,
    ) -> Result<(), TokenizeError> {
        let current = self.indents.last().copied().unwrap_or(0);

        if column > current {
            self.indents.push(column);
            self.push(
                TokenKind::Indent,
                &line[..pos],
                Position::new(self.line_number, 0),
            );
            return Ok(());
        }

        if !self.indents.contains(&column) {
            return Err(TokenizeError::InconsistentDedent {
                position: Position::new(self.line_number, pos),
            });
        }

        while self.indents.last().is_some_and(|&indent| column < indent) {
            self.indents.pop();
            self.push(
                TokenKind::Dedent,
                &line[pos..pos],
                Position::new(self.line_number, pos),
            );
        }

        Ok(())
    }

    /// Scans a string literal whose prefix starts at `start` and whose opening
    /// quote is at `quote_pos`, returning the position right after it.
    fn scan_string(
        &mut self,
        line: &'s str,
        start: usize,
        quote_pos: usize,
    ) -> Result<usize, TokenizeError> {
        let bytes = line.as_bytes();
        let position = Position::new(self.line_number, start);
        let quote = if bytes[quote_pos..].starts_with(b"'''") {
            "'''"
        } else if bytes[quote_pos..].starts_with(b"\"\"\"") {
            "\"\"\""
        } else if bytes[quote_pos] == b'\'' {
            "'"
        } else {
            "\""
        };
        let body = quote_pos + quote.len();

        if let Some(end) = find_string_end(bytes, body, quote) {
            self.push(TokenKind::Other, &line[start..end], position);
            return Ok(end);
        }

        let content = line.trim_end_matches(['\n', '\r']);
        let trailing_backslashes = content.len() - content.trim_end_matches('\\').len();
        if quote.len() == 3 || trailing_backslashes % 2 == 1 {
            self.open_string = Some(OpenString {
                start: position,
                start_offset: self.line_offset + start,
                quote,
            });
            return Ok(line.len());
        }

        Err(TokenizeError::UnterminatedString { start: position })
    }

    fn push(&mut self, kind: TokenKind, text: &'s str, start: Position) {
        self.pending.push_back(Token::new(kind, text, start));
    }

    fn finish(&mut self) -> Result<(), TokenizeError> {
        if let Some(open) = self.open_string {
            return Err(TokenizeError::UnterminatedMultilineString { start: open.start });
        }

        if self.paren_depth > 0 || self.continued {
            return Err(TokenizeError::UnterminatedStatement {
                line: self.line_number,
            });
        }

        Ok(())
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Result<Token<'s>, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }

            if let Some(error) = self.error.take() {
                return Some(Err(error));
            }

            if self.finished {
                return None;
            }

            let result = match self.lines.next() {
                Some(line) => {
                    self.line_number += 1;
                    let result = self.scan_line(line);
                    self.line_offset += line.len();
                    result
                }
                None => {
                    self.finished = true;
                    self.finish()
                }
            };

            if let Err(error) = result {
                self.finished = true;
                self.error = Some(error);
            }
        }
    }
}

fn measure_indent(bytes: &[u8]) -> (usize, usize) {
    let mut column = 0;
    let mut pos = 0;

    for byte in bytes {
        match byte {
            b' ' => column += 1,
            b'\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
            b'\x0c' => column = 0,
            _ => break,
        }
        pos += 1;
    }

    (column, pos)
}

/// Byte index just past the closing `quote`, honouring backslash escapes
fn find_string_end(bytes: &[u8], from: usize, quote: &str) -> Option<usize> {
    let mut i = from;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(quote.as_bytes()) {
            return Some(i + quote.len());
        }
        i += 1;
    }

    None
}

fn scan_number(bytes: &[u8], start: usize, end: usize) -> usize {
    let is_hex = bytes[start..end].len() > 1
        && bytes[start] == b'0'
        && matches!(bytes[start + 1], b'x' | b'X');
    let mut pos = start;

    while pos < end {
        let byte = bytes[pos];
        let exponent_sign = !is_hex
            && matches!(byte, b'+' | b'-')
            && pos > start
            && matches!(bytes[pos - 1], b'e' | b'E');

        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.' || exponent_sign {
            pos += 1;
        } else {
            break;
        }
    }

    pos
}
