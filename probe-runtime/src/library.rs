use crate::outcome::non_empty_diagnostic;
use crate::{
    LoadFailure, LoadFlags, LoadedLibrary, ProbeError, ProbeOutcome, Result, SymbolReport,
    SymbolStatus,
};
use libloading::Library;
use std::ffi::{OsStr, OsString};

const EMPTY_LIBRARY_NAME: &str = "empty library name";

/// The file name under which the platform ships the Vulkan loader.
pub fn default_library_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "vulkan-1.dll"
    } else if cfg!(target_os = "macos") {
        "libvulkan.1.dylib"
    } else {
        "libvulkan.so.1"
    }
}

/// Describes an attempt to map a shared library into the process.
///
/// The library handle lives only for the duration of [`LibraryProbe::run`]:
/// it is released before `run` returns, and only if the open succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryProbe {
    library: OsString,
    flags: LoadFlags,
    symbols: Vec<String>,
}

impl Default for LibraryProbe {
    fn default() -> Self {
        Self::new(default_library_name())
    }
}

impl LibraryProbe {
    pub fn new(library: impl Into<OsString>) -> Self {
        Self {
            library: library.into(),
            flags: LoadFlags::default(),
            symbols: vec![],
        }
    }

    pub fn with_flags(mut self, flags: LoadFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    pub fn with_symbols<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn library(&self) -> &OsStr {
        self.library.as_os_str()
    }

    pub fn flags(&self) -> LoadFlags {
        self.flags
    }

    pub fn symbols(&self) -> &[String] {
        self.symbols.as_slice()
    }

    /// Checks the library and symbol names before touching the loader.
    pub fn validate(&self) -> Result<()> {
        if self.library.is_empty() {
            return ProbeError::EmptyLibraryName.into();
        }
        for symbol in &self.symbols {
            if symbol.as_bytes().contains(&0) {
                return ProbeError::InvalidSymbolName(symbol.clone()).into();
            }
        }
        Ok(())
    }

    pub fn run(&self) -> ProbeOutcome {
        // dlopen("") opens the main program
        if self.library.is_empty() {
            warn!("Refusing to open an empty library name");
            return ProbeOutcome::Failed(LoadFailure {
                library: self.library.clone(),
                flags: self.flags,
                diagnostic: EMPTY_LIBRARY_NAME.to_string(),
            });
        }

        debug!("Opening {:?} with {}", &self.library, &self.flags);

        let library = match unsafe { open_library(&self.library, self.flags) } {
            Ok(library) => library,
            Err(error) => {
                let diagnostic = non_empty_diagnostic(error.to_string());
                warn!("Failed to load {:?}: {}", &self.library, &diagnostic);
                return ProbeOutcome::Failed(LoadFailure {
                    library: self.library.clone(),
                    flags: self.flags,
                    diagnostic,
                });
            }
        };
        info!("Loaded {:?}", &self.library);

        let symbols = self
            .symbols
            .iter()
            .map(|symbol| self.resolve_symbol(&library, symbol))
            .collect();

        let release_diagnostic = match library.close() {
            Ok(()) => {
                debug!("Released {:?}", &self.library);
                None
            }
            Err(error) => {
                let diagnostic = non_empty_diagnostic(error.to_string());
                warn!("Failed to release {:?}: {}", &self.library, &diagnostic);
                Some(diagnostic)
            }
        };

        ProbeOutcome::Loaded(LoadedLibrary {
            library: self.library.clone(),
            flags: self.flags,
            symbols,
            release_diagnostic,
        })
    }

    fn resolve_symbol(&self, library: &Library, symbol: &str) -> SymbolReport {
        let status = match unsafe {
            library.get::<unsafe extern "C" fn()>(symbol.as_bytes())
        } {
            Ok(_) => {
                debug!("Resolved {} in {:?}", symbol, &self.library);
                SymbolStatus::Resolved
            }
            Err(error) => {
                let diagnostic = non_empty_diagnostic(error.to_string());
                warn!(
                    "Symbol {} is missing in {:?}: {}",
                    symbol, &self.library, &diagnostic
                );
                SymbolStatus::Missing(diagnostic)
            }
        };
        SymbolReport {
            name: symbol.to_string(),
            status,
        }
    }
}

/// # Safety
/// Loading a library runs its initialisation routines.
#[cfg(unix)]
unsafe fn open_library(
    library: &OsStr,
    flags: LoadFlags,
) -> std::result::Result<Library, libloading::Error> {
    libloading::os::unix::Library::open(Some(library), flags.raw()).map(Library::from)
}

/// # Safety
/// Loading a library runs its initialisation routines.
#[cfg(not(unix))]
unsafe fn open_library(
    library: &OsStr,
    flags: LoadFlags,
) -> std::result::Result<Library, libloading::Error> {
    debug!("Load flags {} are not supported on this platform", flags);
    Library::new(library)
}
