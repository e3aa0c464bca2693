use std::fmt::{Display, Formatter};

/// When the dynamic loader resolves the undefined symbols of a library.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SymbolBinding {
    /// Resolve every symbol before `open` returns.
    #[default]
    Now,
    /// Resolve function symbols on first call.
    Lazy,
}

/// Whether symbols of a loaded library are made available to libraries loaded after it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SymbolVisibility {
    #[default]
    Local,
    Global,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LoadFlags {
    binding: SymbolBinding,
    visibility: SymbolVisibility,
}

impl LoadFlags {
    pub fn new(binding: SymbolBinding, visibility: SymbolVisibility) -> Self {
        Self {
            binding,
            visibility,
        }
    }

    pub fn binding(&self) -> SymbolBinding {
        self.binding
    }

    pub fn visibility(&self) -> SymbolVisibility {
        self.visibility
    }

    pub fn with_binding(mut self, binding: SymbolBinding) -> Self {
        self.binding = binding;
        self
    }

    pub fn with_visibility(mut self, visibility: SymbolVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// The flag word passed to `dlopen`.
    #[cfg(unix)]
    pub fn raw(&self) -> std::os::raw::c_int {
        use libloading::os::unix::{RTLD_GLOBAL, RTLD_LAZY, RTLD_LOCAL, RTLD_NOW};

        let binding = match self.binding {
            SymbolBinding::Now => RTLD_NOW,
            SymbolBinding::Lazy => RTLD_LAZY,
        };
        let visibility = match self.visibility {
            SymbolVisibility::Local => RTLD_LOCAL,
            SymbolVisibility::Global => RTLD_GLOBAL,
        };
        binding | visibility
    }
}

impl Display for LoadFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let binding = match self.binding {
            SymbolBinding::Now => "RTLD_NOW",
            SymbolBinding::Lazy => "RTLD_LAZY",
        };
        let visibility = match self.visibility {
            SymbolVisibility::Local => "RTLD_LOCAL",
            SymbolVisibility::Global => "RTLD_GLOBAL",
        };
        write!(f, "{} | {}", binding, visibility)
    }
}
