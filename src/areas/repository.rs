use crate::areas::VersionControl;
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    workspace: Workspace,
    vcs: Box<dyn VersionControl>,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Repository {
    pub fn new(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        vcs: Box<dyn VersionControl>,
    ) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        Ok(Repository {
            workspace: Workspace::new(path.into_boxed_path()),
            vcs,
            writer: RefCell::new(writer),
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn vcs(&self) -> &dyn VersionControl {
        self.vcs.as_ref()
    }
}
