//! Comparison of one code block across several file revisions
//!
//! The base block is located once; every target is located in its own text,
//! so the block may sit at different lines or be absent. Targets that cannot
//! be fetched or do not contain the block produce a MISSING record instead of
//! failing the whole comparison.

pub mod target_diff;

use crate::artifacts::compare::target_diff::{DiffKind, DiffReport, TargetDiff};
use crate::artifacts::diff::unified::{DEFAULT_CONTEXT, unified_diff};
use crate::artifacts::locator::dotted_path::DottedPath;
use crate::artifacts::locator::locate;
use crate::artifacts::locator::span::BlockSpan;
use crate::errors::BranchDiffError;
use derive_new::new;

/// Retrieves file content for a target (a path, URL or revision spec)
pub trait ContentSource {
    fn fetch(&self, target: &str) -> Result<String, BranchDiffError>;

    /// One annotation line per source line of `target`
    fn fetch_attribution(&self, target: &str) -> Result<Vec<String>, BranchDiffError>;
}

/// Attribution lines per identifier, for comparisons over already-fetched text
pub trait AttributionLookup {
    fn attribution(&self, id: &str) -> Option<Vec<String>>;
}

impl<F> AttributionLookup for F
where
    F: Fn(&str) -> Option<Vec<String>>,
{
    fn attribution(&self, id: &str) -> Option<Vec<String>> {
        self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct CompareOptions {
    pub show_attribution: bool,
    pub context: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            show_attribution: false,
            context: DEFAULT_CONTEXT,
        }
    }
}

/// The located base block, ready to be diffed against any number of targets
#[derive(Debug, Clone)]
pub struct Comparison<'c> {
    base_id: &'c str,
    path: &'c DottedPath,
    base_span: BlockSpan,
    base_block: Vec<String>,
    base_attribution: Option<Vec<String>>,
    options: CompareOptions,
}

impl<'c> Comparison<'c> {
    /// Locates `path` in the base text. Fails when the base has no such block,
    /// since there is nothing to compare against.
    pub fn new(
        base_text: &str,
        base_id: &'c str,
        path: &'c DottedPath,
        options: CompareOptions,
    ) -> Result<Self, BranchDiffError> {
        let base_span = locate(base_text, path);
        let base_lines = base_text.lines().collect::<Vec<_>>();
        let base_block = base_span
            .slice(&base_lines)
            .ok_or_else(|| BranchDiffError::ConstructNotFound {
                path: path.to_string(),
                source_id: base_id.to_string(),
            })?
            .iter()
            .map(|line| line.to_string())
            .collect();

        log::debug!("base block {path} in {base_id}: {base_span}");

        Ok(Comparison {
            base_id,
            path,
            base_span,
            base_block,
            base_attribution: None,
            options,
        })
    }

    /// Attaches attribution lines for the whole base file; the base span
    /// selects the relevant part.
    pub fn with_base_attribution(mut self, attribution: &[String]) -> Self {
        self.base_attribution = self.base_span.slice(attribution).map(<[_]>::to_vec);
        self
    }

    pub fn missing(&self, target_id: &str) -> TargetDiff {
        TargetDiff::missing(self.base_id, target_id, &self.base_block)
    }

    /// Diffs the base block against the same block in `target_text`.
    pub fn diff_text(
        &self,
        target_id: &str,
        target_text: &str,
        target_attribution: Option<&[String]>,
    ) -> TargetDiff {
        let span = locate(target_text, self.path);
        let target_lines = target_text.lines().collect::<Vec<_>>();

        let Some(target_block) = span.slice(&target_lines) else {
            log::info!("{} not found in {target_id}", self.path);
            return self.missing(target_id);
        };

        let code_diff = unified_diff(
            &self.base_block,
            &target_block
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>(),
            self.base_id,
            target_id,
            self.options.context,
        );

        if code_diff.is_empty() {
            return TargetDiff::identical(self.base_id, target_id);
        }

        let attributed_diff = self
            .attributed_diff(target_id, span, target_attribution)
            .filter(|diff| !diff.is_empty());

        TargetDiff::new(
            target_id.to_string(),
            DiffKind::Changed,
            attributed_diff.unwrap_or(code_diff),
        )
    }

    /// Diff over attribution lines, when requested and available for both sides
    fn attributed_diff(
        &self,
        target_id: &str,
        span: BlockSpan,
        target_attribution: Option<&[String]>,
    ) -> Option<Vec<String>> {
        if !self.options.show_attribution {
            return None;
        }

        let base = self.base_attribution.as_deref()?;
        let target = span.slice(target_attribution?)?;

        Some(unified_diff(
            base,
            target,
            self.base_id,
            target_id,
            self.options.context,
        ))
    }

    /// Fetches each target from `source` and diffs it, turning fetch failures
    /// into MISSING records.
    pub fn diff_sources<S>(&self, targets: &[S], source: &dyn ContentSource) -> DiffReport
    where
        S: AsRef<str>,
    {
        targets
            .iter()
            .map(|target| {
                let target = target.as_ref();

                match source.fetch(target) {
                    Ok(text) => {
                        let attribution = self.fetch_attribution(target, source);
                        self.diff_text(target, &text, attribution.as_deref())
                    }
                    Err(error) => {
                        log::warn!("{error}");
                        self.missing(target)
                    }
                }
            })
            .collect()
    }

    fn fetch_attribution(&self, target: &str, source: &dyn ContentSource) -> Option<Vec<String>> {
        if !self.options.show_attribution {
            return None;
        }

        source
            .fetch_attribution(target)
            .inspect_err(|error| log::warn!("{error}; showing code instead"))
            .ok()
    }
}

/// Compares the block at `path` in the base text with each target text, in
/// the order given.
pub fn compare<'t, I>(
    base_text: &str,
    base_id: &str,
    targets: I,
    path: &DottedPath,
    options: CompareOptions,
    attribution: Option<&dyn AttributionLookup>,
) -> Result<DiffReport, BranchDiffError>
where
    I: IntoIterator<Item = (&'t str, &'t str)>,
{
    let mut comparison = Comparison::new(base_text, base_id, path, options)?;

    let attribution = attribution.filter(|_| options.show_attribution);
    if let Some(base_attribution) = attribution.and_then(|lookup| lookup.attribution(base_id)) {
        comparison = comparison.with_base_attribution(&base_attribution);
    }

    Ok(targets
        .into_iter()
        .map(|(target_id, target_text)| {
            let target_attribution = attribution.and_then(|lookup| lookup.attribution(target_id));
            comparison.diff_text(target_id, target_text, target_attribution.as_deref())
        })
        .collect())
}
