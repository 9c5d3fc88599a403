//! Non-fatal problems found while building a channel

use std::fmt;
use std::path::PathBuf;

/// Something the builder skipped and the operator should know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A directory entry has no section in its directory's configuration.
    MissingEntryConfig { entry: PathBuf, config: PathBuf },
    /// A symlinked entry was not followed.
    SymlinkSkipped { path: PathBuf },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingEntryConfig { entry, config } => write!(
                f,
                "{} has no configuration in {}... SKIPPED",
                entry.display(),
                config.display()
            ),
            Warning::SymlinkSkipped { path } => {
                write!(f, "{} is a symlink... SKIPPED", path.display())
            }
        }
    }
}

/// Receiver for warnings raised during a build.
pub trait DiagnosticSink {
    fn warn(&mut self, warning: Warning);
}

impl DiagnosticSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Adapts a closure into a [`DiagnosticSink`].
pub struct CallbackSink<F>(pub F);

impl<F: FnMut(Warning)> DiagnosticSink for CallbackSink<F> {
    fn warn(&mut self, warning: Warning) {
        (self.0)(warning)
    }
}
