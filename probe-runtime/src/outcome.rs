use crate::{LoadFlags, ProbeError, Result};
use std::ffi::OsString;
use std::fmt::{Display, Formatter};

const UNKNOWN_LOADER_ERROR: &str = "unknown dynamic loader error";

pub(crate) fn non_empty_diagnostic(diagnostic: impl Into<String>) -> String {
    let diagnostic = diagnostic.into();
    if diagnostic.trim().is_empty() {
        UNKNOWN_LOADER_ERROR.to_string()
    } else {
        diagnostic
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolStatus {
    Resolved,
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReport {
    pub name: String,
    pub status: SymbolStatus,
}

impl SymbolReport {
    pub fn is_resolved(&self) -> bool {
        self.status == SymbolStatus::Resolved
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLibrary {
    pub library: OsString,
    pub flags: LoadFlags,
    pub symbols: Vec<SymbolReport>,
    /// Set when the loader refused to release the handle.
    pub release_diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub library: OsString,
    pub flags: LoadFlags,
    pub diagnostic: String,
}

/// The result of a single [`crate::LibraryProbe::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Loaded(LoadedLibrary),
    Failed(LoadFailure),
}

impl ProbeOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn library(&self) -> &OsString {
        match self {
            Self::Loaded(loaded) => &loaded.library,
            Self::Failed(failure) => &failure.library,
        }
    }

    /// The loader diagnostic of a failed load.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(failure) => Some(failure.diagnostic.as_str()),
        }
    }

    pub fn all_symbols_resolved(&self) -> bool {
        match self {
            Self::Loaded(loaded) => loaded.symbols.iter().all(SymbolReport::is_resolved),
            Self::Failed(_) => false,
        }
    }

    /// Loaded, and every requested symbol was found.
    pub fn is_success(&self) -> bool {
        self.is_loaded() && self.all_symbols_resolved()
    }

    pub fn into_result(self) -> Result<LoadedLibrary> {
        match self {
            Self::Loaded(loaded) => {
                let missing = loaded.symbols.iter().find_map(|symbol| match symbol.status {
                    SymbolStatus::Resolved => None,
                    SymbolStatus::Missing(ref diagnostic) => {
                        Some((symbol.name.clone(), diagnostic.clone()))
                    }
                });
                match missing {
                    None => Ok(loaded),
                    Some((symbol, diagnostic)) => ProbeError::SymbolNotFound {
                        library: loaded.library,
                        symbol,
                        diagnostic,
                    }
                    .into(),
                }
            }
            Self::Failed(failure) => ProbeError::LibraryNotLoadable {
                library: failure.library,
                diagnostic: failure.diagnostic,
            }
            .into(),
        }
    }
}

impl Display for ProbeOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(failure) => write!(f, "Failed: {}", failure.diagnostic),
            Self::Loaded(loaded) => {
                write!(f, "Success!")?;
                for symbol in &loaded.symbols {
                    match symbol.status {
                        SymbolStatus::Resolved => {
                            write!(f, "\nSymbol {}: resolved", symbol.name)?
                        }
                        SymbolStatus::Missing(ref diagnostic) => {
                            write!(f, "\nSymbol {}: missing ({})", symbol.name, diagnostic)?
                        }
                    }
                }
                if let Some(ref diagnostic) = loaded.release_diagnostic {
                    write!(f, "\nRelease failed: {}", diagnostic)?;
                }
                Ok(())
            }
        }
    }
}
