use clap::Parser;
use probe_runtime::{default_library_name, LibraryProbe, LoadFlags, SymbolBinding, SymbolVisibility};
use std::ffi::OsString;

#[derive(Parser, Clone, Debug)]
#[command(name = "driver-probe", author, version, about, long_about = None)]
pub struct ProbeOptions {
    /// Shared libraries to load, by file name or path. Defaults to the Vulkan loader
    #[clap(value_name = "LIBRARY", env = "DRIVER_PROBE_LIBRARY")]
    libraries: Vec<OsString>,
    /// Resolve a symbol in every loaded library. Can be repeated
    #[clap(long = "symbol", value_name = "NAME")]
    symbols: Vec<String>,
    /// Resolve symbols lazily instead of when the library is loaded
    #[clap(long)]
    lazy: bool,
    /// Make the library's symbols available to libraries loaded after it
    #[clap(long)]
    global: bool,
    /// Exit with a non-zero status if a library fails to load or a symbol is missing
    #[clap(long)]
    pub strict: bool,
}

impl ProbeOptions {
    /// Empty names are skipped, an empty `DRIVER_PROBE_LIBRARY` included.
    pub fn libraries(&self) -> Vec<OsString> {
        let libraries: Vec<OsString> = self
            .libraries
            .iter()
            .filter(|library| !library.is_empty())
            .cloned()
            .collect();
        if libraries.is_empty() {
            vec![default_library_name().into()]
        } else {
            libraries
        }
    }

    pub fn flags(&self) -> LoadFlags {
        LoadFlags::default()
            .with_binding(if self.lazy {
                SymbolBinding::Lazy
            } else {
                SymbolBinding::Now
            })
            .with_visibility(if self.global {
                SymbolVisibility::Global
            } else {
                SymbolVisibility::Local
            })
    }

    pub fn probes(&self) -> Vec<LibraryProbe> {
        self.libraries()
            .into_iter()
            .map(|library| {
                LibraryProbe::new(library)
                    .with_flags(self.flags())
                    .with_symbols(self.symbols.iter().cloned())
            })
            .collect()
    }
}
