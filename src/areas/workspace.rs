use anyhow::Context;
use std::path::{Path, PathBuf};

/// Local working copy the base file is read from
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Resolves `file` against the workspace root unless already absolute
    pub fn absolute(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.path.join(file)
        }
    }

    pub fn read_file(&self, file: &Path) -> anyhow::Result<String> {
        let file_path = self.absolute(file);

        std::fs::read_to_string(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }
}
