#[macro_use]
extern crate log;

mod error;
mod library;
mod load_flags;
mod outcome;

pub use error::{ProbeError, Result};
pub use library::{default_library_name, LibraryProbe};
pub use load_flags::{LoadFlags, SymbolBinding, SymbolVisibility};
pub use outcome::{LoadFailure, LoadedLibrary, ProbeOutcome, SymbolReport, SymbolStatus};
