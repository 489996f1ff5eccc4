//! Host plugins.
//!
//! A [`Plugin`] defines a group of host functions in the [`Imports`] table. The
//! [`Plugins`] loader keeps the registered plugins and links them into a fresh table
//! for every engine. [`init`] is the startup entry point adding the random buffer
//! bridge, it runs once per loader.

mod imports;
pub mod js_objects;
pub mod random_buffer;

use tracing::{span, Level};

pub use imports::{check_imports, ImportName, Imports};
use js_objects::JsObjectsPlugin;
use random_buffer::RandomBufferBridge;

use crate::{config::BridgeConfig, errors::Error, wasm::engine::Engine};

/// Host plugin.
pub trait Plugin: Send + Sync {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Names of the functions the plugin defines.
    fn imports(&self) -> &[&'static str];

    /// Define the plugin functions in `imports`.
    ///
    /// # Errors
    /// - `Error::DuplicateImport`
    /// - `wasmtime` linker errors.
    fn register(&self, imports: &mut Imports) -> anyhow::Result<()>;
}

/// Ordered collection of plugins.
#[derive(Default)]
pub struct Plugins {
    /// Added plugins
    plugins: Vec<Box<dyn Plugin>>,
}

impl Plugins {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin.
    ///
    /// # Errors
    /// - `Error::DuplicatePlugin`: a plugin with the same name is already added.
    pub fn add_plugin(&mut self, plugin: impl Plugin + 'static) -> anyhow::Result<()> {
        if self.contains(plugin.name()) {
            return Err(Error::DuplicatePlugin(plugin.name().to_string()).into());
        }
        self.plugins.push(Box::new(plugin));
        Ok(())
    }

    /// Returns `true` if a plugin named `name` is added.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// Names of the added plugins in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    /// Register every plugin into a new `Imports` table.
    ///
    /// # Errors
    /// - Plugin registration errors.
    /// - `Error::MissingRegistration`: a plugin did not define one of its declared
    ///   imports.
    pub fn link(&self, engine: &Engine) -> anyhow::Result<Imports> {
        let mut imports = Imports::new(engine);
        for plugin in &self.plugins {
            span!(Level::INFO, "Plugin", name = plugin.name()).in_scope(|| -> anyhow::Result<()> {
                let before = imports.names().len();
                plugin.register(&mut imports)?;

                let defined = imports.names().get(before..).unwrap_or_default();
                for import in plugin.imports() {
                    if !defined.iter().any(|d| d.name() == *import) {
                        return Err(Error::MissingRegistration {
                            plugin: plugin.name().to_string(),
                            import: (*import).to_string(),
                        }
                        .into());
                    }
                }
                tracing::info!(imports = defined.len(), "Plugin registered");
                Ok(())
            })?;
        }
        Ok(imports)
    }
}

/// Description of the initialized bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Bridge plugin name
    name: String,
    /// Imports the bridge makes available
    imports: Vec<ImportName>,
}

impl PluginDescriptor {
    /// Bridge plugin name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Imports the bridge makes available.
    #[must_use]
    pub fn imports(&self) -> &[ImportName] {
        &self.imports
    }
}

/// Add the random buffer bridge and the object table plugin to `plugins`.
/// Either both plugins are added or none.
///
/// # Errors
/// - `Error::DuplicatePlugin`: the bridge was already initialized on this loader, or
///   one of its plugin names is taken.
pub fn init(plugins: &mut Plugins, config: &BridgeConfig) -> anyhow::Result<PluginDescriptor> {
    let objects = JsObjectsPlugin::new(config.namespace());
    let bridge = RandomBufferBridge::new(config.namespace());

    for name in [objects.name(), bridge.name()] {
        if plugins.contains(name) {
            return Err(Error::DuplicatePlugin(name.to_string()).into());
        }
    }

    let imports = bridge
        .imports()
        .iter()
        .chain(objects.imports())
        .map(|name| ImportName::new(config.namespace(), name))
        .collect();
    let descriptor = PluginDescriptor {
        name: RandomBufferBridge::NAME.to_string(),
        imports,
    };

    plugins.add_plugin(objects)?;
    plugins.add_plugin(bridge)?;
    tracing::debug!(?descriptor, "Random buffer bridge initialized");
    Ok(descriptor)
}
