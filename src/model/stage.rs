use std::fmt;

/// Progress of one import run
///
/// The run moves strictly forward through the stages. `Error` can be
/// reached from any of them; cleanup happens on every path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportStage {
    #[default]
    Init,
    ParentResolved,
    Authorized,
    Wrapped,
    Persisted,
    Done,
    Error,
}

impl ImportStage {
    /// The stage that follows a successful step, `None` once finished
    pub fn next(self) -> Option<Self> {
        match self {
            ImportStage::Init => Some(ImportStage::ParentResolved),
            ImportStage::ParentResolved => Some(ImportStage::Authorized),
            ImportStage::Authorized => Some(ImportStage::Wrapped),
            ImportStage::Wrapped => Some(ImportStage::Persisted),
            ImportStage::Persisted => Some(ImportStage::Done),
            ImportStage::Done | ImportStage::Error => None,
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Init => "init",
            ImportStage::ParentResolved => "parent-resolved",
            ImportStage::Authorized => "authorized",
            ImportStage::Wrapped => "wrapped",
            ImportStage::Persisted => "persisted",
            ImportStage::Done => "done",
            ImportStage::Error => "error",
        };
        f.write_str(name)
    }
}
