use std::fmt;

/// The two export flavors consumed by the merge: the full dependency
/// list without build strings, and the user-requested-only history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportView {
    NoBuildStrings,
    FromHistory,
}

impl ExportView {
    /// The conda CLI flag for this view.
    pub fn flag(self) -> &'static str {
        match self {
            Self::NoBuildStrings => "--no-builds",
            Self::FromHistory => "--from-history",
        }
    }

    /// Short tag used in intermediate snapshot file names.
    pub fn tag(self) -> &'static str {
        match self {
            Self::NoBuildStrings => "nobld",
            Self::FromHistory => "hist",
        }
    }
}

impl fmt::Display for ExportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}
