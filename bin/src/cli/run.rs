//! Run cli command

use std::path::{Path, PathBuf};

use clap::Args;
use console::Emoji;

use crate::{
    config::BridgeConfig,
    plugin::{init, Plugins},
    random::{OsSource, SecureSource, UnavailableSource},
    wasm::{context::Context, engine::Engine, module::Module},
};

/// Run cli command
#[derive(Args)]
pub(crate) struct Run {
    /// Path to the WebAssembly module, binary `.wasm` or text `.wat`
    module: PathBuf,

    /// Exported function to call
    #[clap(long, default_value = "main")]
    entry: String,

    /// Path to the bridge configuration JSON
    #[clap(long)]
    config: Option<PathBuf>,

    /// Largest random buffer a single call may request, overrides the config file
    #[clap(long)]
    max_buffer_len: Option<usize>,

    /// Make the secure random source fail on every request
    #[clap(long, action = clap::ArgAction::SetTrue)]
    simulate_unavailable: bool,
}

impl Run {
    /// Run the module
    pub(crate) fn exec(self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref(), self.max_buffer_len)?;

        let engine = Engine::new()?;
        let mut plugins = Plugins::new();
        let descriptor = init(&mut plugins, &config)?;
        let imports = plugins.link(&engine)?;
        tracing::info!(
            plugin = descriptor.name(),
            imports = ?descriptor.imports(),
            "Plugins linked"
        );

        let source: Box<dyn SecureSource> = if self.simulate_unavailable {
            tracing::warn!("Secure random source is disabled");
            Box::new(UnavailableSource)
        } else {
            Box::new(OsSource)
        };
        let module_name = self
            .module
            .file_stem()
            .map_or_else(|| "module".to_string(), |s| s.to_string_lossy().into_owned());
        let ctx = Context::new(module_name.clone(), source, &config);

        let module_bytes = std::fs::read(&self.module)?;
        let mut module = Module::new(&engine, ctx, &module_bytes, &imports)?;

        println!("{} Running {module_name}::{}", Emoji::new("🚀", ""), self.entry);
        module.call_func::<(), ()>(&self.entry, ())?;

        let leaked = module.context().objects().len();
        if leaked > 0 {
            tracing::warn!(objects = leaked, "Module exited with live host objects");
        }
        Ok(())
    }
}

/// Load the configuration file, if any, and apply the cli overrides.
pub(crate) fn load_config(
    path: Option<&Path>, max_buffer_len: Option<usize>,
) -> anyhow::Result<BridgeConfig> {
    let config = match path {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::default(),
    };
    match max_buffer_len {
        Some(len) => config.with_max_buffer_len(len),
        None => Ok(config),
    }
}
