//! Host function table.

use std::fmt::Display;

use wasmtime::{ExternType, IntoFunc, Linker as WasmLinker, Module as WasmModule};

use crate::{
    errors::{Error, Errors},
    wasm::{context::Context, engine::Engine},
};

/// Fully qualified import name, `namespace.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportName {
    /// Import module namespace
    namespace: String,
    /// Function name
    name: String,
}

impl ImportName {
    /// Create a new `ImportName`.
    #[must_use]
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Import module namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for ImportName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Host functions visible to guest modules, backed by a `wasmtime::Linker`.
pub struct Imports {
    /// `wasmtime::Linker`
    linker: WasmLinker<Context>,
    /// Every defined import in definition order
    defined: Vec<ImportName>,
}

impl Imports {
    /// Create an empty table for the `engine`.
    #[must_use]
    pub fn new(engine: &Engine) -> Self {
        Self {
            linker: WasmLinker::new(engine),
            defined: Vec::new(),
        }
    }

    /// Define a host function.
    ///
    /// # Errors
    /// - `Error::DuplicateImport`: the name is already defined.
    /// - `wasmtime` linker errors.
    pub fn func_wrap<Params, Args>(
        &mut self, namespace: &str, name: &str, func: impl IntoFunc<Context, Params, Args>,
    ) -> anyhow::Result<()> {
        let import = ImportName::new(namespace, name);
        if self.defined.contains(&import) {
            return Err(Error::DuplicateImport(import.to_string()).into());
        }
        self.linker.func_wrap(namespace, name, func)?;
        self.defined.push(import);
        Ok(())
    }

    /// Returns `true` if `namespace.name` is defined.
    #[must_use]
    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.count(namespace, name) > 0
    }

    /// Number of definitions of `namespace.name`.
    #[must_use]
    pub fn count(&self, namespace: &str, name: &str) -> usize {
        self.defined
            .iter()
            .filter(|i| i.namespace() == namespace && i.name() == name)
            .count()
    }

    /// Every defined import in definition order.
    #[must_use]
    pub fn names(&self) -> &[ImportName] {
        &self.defined
    }

    /// Underlying `wasmtime::Linker`.
    pub(crate) fn linker(&self) -> &WasmLinker<Context> {
        &self.linker
    }
}

/// Verify that every function imported by `module` is defined in `imports`.
///
/// # Errors
/// - `Errors` holding one `Error::UnresolvedImport` per missing function.
pub fn check_imports(imports: &Imports, module: &WasmModule) -> anyhow::Result<()> {
    let mut errors = Errors::new();
    for import in module.imports() {
        if let ExternType::Func(_) = import.ty() {
            if !imports.contains(import.module(), import.name()) {
                let name = ImportName::new(import.module(), import.name());
                errors.add_err(Error::UnresolvedImport(name.to_string()).into());
            }
        }
    }
    errors.return_result(())
}
