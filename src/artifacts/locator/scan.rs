use crate::artifacts::locator::BLOCK_KEYWORDS;
use crate::artifacts::locator::dotted_path::DottedPath;
use crate::artifacts::locator::span::BlockSpan;
use crate::artifacts::locator::token::{Token, TokenKind};
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Looking for the header of the next path segment
    Traversing,
    /// A segment's header matched; its logical line has not ended yet
    HeaderLine { last_segment: bool },
    /// The header's logical line ended; an indent must open its body
    AwaitingBody {
        last_segment: bool,
        header_end_line: usize,
    },
    /// Inside the located body, waiting for the dedent that closes it
    InBody,
    Finished,
}

/// One-shot state of a block lookup, fed one token at a time.
///
/// Segments of the path are matched against the first `def`/`class` header
/// carrying that name, in token order. Once an intermediate segment matched,
/// dedenting back to its header depth means the remaining segments are not
/// inside it and the lookup fails.
#[derive(Debug, Clone)]
pub struct ScanState<'p> {
    remaining: &'p [String],
    indent_depth: usize,
    match_depth: Option<usize>,
    body_start_depth: Option<usize>,
    body_start_line: Option<usize>,
    end_line: Option<usize>,
    after_keyword: bool,
    phase: Phase,
}

impl<'p> ScanState<'p> {
    pub fn new(path: &'p DottedPath) -> Self {
        ScanState {
            remaining: path.segments(),
            indent_depth: 0,
            match_depth: None,
            body_start_depth: None,
            body_start_line: None,
            end_line: None,
            after_keyword: false,
            phase: Phase::Traversing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn span(&self) -> BlockSpan {
        BlockSpan::new(self.body_start_line, self.end_line)
    }

    /// Advances the scan by one token, breaking once no further token can
    /// change the result.
    pub fn feed(&mut self, token: &Token<'_>) -> ControlFlow<()> {
        match token.kind {
            TokenKind::Indent => self.indent_depth += 1,
            TokenKind::Dedent => self.indent_depth = self.indent_depth.saturating_sub(1),
            _ => {}
        }

        match self.phase {
            Phase::Traversing => self.traverse(token),
            Phase::HeaderLine { last_segment } => {
                if token.kind == TokenKind::Newline {
                    self.phase = Phase::AwaitingBody {
                        last_segment,
                        header_end_line: token.line(),
                    };
                }
            }
            Phase::AwaitingBody {
                last_segment,
                header_end_line,
            } => match (token.kind, last_segment) {
                (TokenKind::Indent, true) => self.phase = Phase::InBody,
                (TokenKind::Indent, false) => self.phase = Phase::Traversing,
                // the body sits on the header line itself
                (_, true) => self.finish(Some(header_end_line + 1)),
                (_, false) => self.fail(),
            },
            Phase::InBody => {
                if token.kind == TokenKind::Dedent
                    && self
                        .body_start_depth
                        .is_some_and(|depth| self.indent_depth <= depth)
                {
                    self.finish(Some(token.line()));
                }
            }
            Phase::Finished => {}
        }

        if self.is_finished() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn traverse(&mut self, token: &Token<'_>) {
        if token.kind == TokenKind::Dedent
            && self
                .match_depth
                .is_some_and(|depth| self.indent_depth <= depth)
        {
            self.fail();
            return;
        }

        if self.after_keyword {
            self.after_keyword = false;

            let Some((segment, rest)) = self.remaining.split_first() else {
                return;
            };

            if token.kind == TokenKind::Name && token.text == segment.as_str() {
                self.remaining = rest;
                self.match_depth = Some(self.indent_depth);

                let last_segment = rest.is_empty();
                if last_segment {
                    self.body_start_line = Some(token.line());
                    self.body_start_depth = Some(self.indent_depth);
                }
                self.phase = Phase::HeaderLine { last_segment };
            }
            return;
        }

        if token.kind == TokenKind::Name && BLOCK_KEYWORDS.contains(token.text) {
            self.after_keyword = true;
        }
    }

    /// Gives up on a scan whose token stream broke off. A block that has
    /// not been closed yet is reported as not found.
    pub fn abort(&mut self) {
        if !self.is_finished() {
            self.fail();
        }
    }

    fn finish(&mut self, end_line: Option<usize>) {
        self.end_line = end_line;
        self.phase = Phase::Finished;
    }

    fn fail(&mut self) {
        self.body_start_line = None;
        self.body_start_depth = None;
        self.finish(None);
    }
}
