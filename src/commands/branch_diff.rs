use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::layout::BranchLayout;
use crate::artifacts::compare::target_diff::{DiffReport, TargetDiff};
use crate::artifacts::compare::{CompareOptions, Comparison};
use crate::artifacts::diff::unified::DEFAULT_CONTEXT;
use crate::artifacts::locator::dotted_path::DottedPath;
use anyhow::Context;
use colored::Colorize;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER_LINES: usize = 2;

#[derive(Debug, Clone, new)]
pub struct BranchDiffOptions {
    pub file: PathBuf,
    pub block: DottedPath,
    /// `None` compares against every branch the backend lists
    pub branches: Option<Vec<BranchName>>,
    pub trunk: bool,
    pub others: Vec<String>,
    pub annotate: bool,
    #[new(value = "DEFAULT_CONTEXT")]
    pub context: usize,
}

impl BranchDiffOptions {
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }
}

impl Repository {
    pub fn branch_diff(&self, options: &BranchDiffOptions) -> anyhow::Result<()> {
        let base_id = options.file.display().to_string();
        let base_text = self.workspace().read_file(&options.file)?;
        let working_file = self.workspace().absolute(&options.file);

        let targets = self.collect_targets(&working_file, options)?;
        log::info!("comparing {} with: {}", options.block, targets.join(", "));

        let compare_options = CompareOptions::new(options.annotate, options.context);
        let mut comparison =
            Comparison::new(&base_text, &base_id, &options.block, compare_options)?;

        if options.annotate {
            match self.vcs().annotate_working(&working_file) {
                Ok(attribution) => comparison = comparison.with_base_attribution(&attribution),
                Err(e) => log::warn!("{e}; showing code instead"),
            }
        }

        let report = comparison.diff_sources(&targets, self.vcs());
        self.print_report(&report)
    }

    /// Branch copies in the order asked for, then trunk, then any extra targets
    fn collect_targets(
        &self,
        working_file: &Path,
        options: &BranchDiffOptions,
    ) -> anyhow::Result<Vec<String>> {
        let vcs = self.vcs();
        let layout: BranchLayout = vcs.layout(working_file).with_context(|| {
            format!(
                "Unable to locate {} in the {:?} repository",
                working_file.display(),
                vcs.kind()
            )
        })?;

        let branches = match &options.branches {
            Some(branches) => branches.clone(),
            None => vcs.list_branches(&layout)?,
        };

        let mut targets = branches
            .iter()
            .map(|branch| vcs.branch_target(&layout, branch))
            .collect::<Vec<_>>();

        if options.trunk {
            targets.push(vcs.trunk_target(&layout)?);
        }

        targets.extend(options.others.iter().cloned());

        Ok(targets)
    }

    fn print_report(&self, report: &DiffReport) -> anyhow::Result<()> {
        for diff in report {
            self.print_target_diff(diff)?;
            writeln!(self.writer())?;
        }

        Ok(())
    }

    fn print_target_diff(&self, diff: &TargetDiff) -> anyhow::Result<()> {
        for (index, line) in diff.lines.iter().enumerate() {
            let line = if index < HEADER_LINES {
                line.bold()
            } else if line.starts_with("@@") {
                line.cyan()
            } else if line.starts_with('-') {
                line.red()
            } else if line.starts_with('+') {
                line.green()
            } else {
                line.normal()
            };

            writeln!(self.writer(), "{line}")?;
        }

        Ok(())
    }
}
