use mlua::Lua;
use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::ScriptError;
use crate::marshal;

pub const DEFAULT_TITLE: &str = "Drawing with Lua!";
pub const DEFAULT_BACKGROUND: Color = Color::MAGENTA;

pub const TITLE_GLOBAL: &str = "window_name";
pub const COLOR_GLOBAL: &str = "bgcolor";

/// Configuration read back from the script. Fully populated, never changes
/// after startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    pub window_title: String,
    pub background_color: Color,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        ConfigSnapshot {
            window_title: DEFAULT_TITLE.to_string(),
            background_color: DEFAULT_BACKGROUND,
        }
    }
}

/// One-shot Lua state used to evaluate a configuration script.
///
/// The usual sequence is `install` (defaults), `run_file`, `snapshot`, then
/// drop. [`bootstrap_config`] does exactly that.
pub struct ConfigBridge {
    lua: Lua,
}

impl ConfigBridge {
    /// Fresh Lua state with the safe standard libraries opened.
    pub fn new() -> Self {
        ConfigBridge { lua: Lua::new() }
    }

    /// Publishes `config` as the `window_name` and `bgcolor` globals.
    pub fn install(&self, config: &ConfigSnapshot) -> Result<(), ScriptError> {
        let globals = self.lua.globals();
        marshal::write_string(&globals, TITLE_GLOBAL, &config.window_title)?;

        let color = self.lua.create_table()?;
        marshal::write_color(&color, config.background_color)?;
        globals.set(COLOR_GLOBAL, color)?;
        Ok(())
    }

    pub fn run_file(&self, path: &Path) -> Result<(), ScriptError> {
        let script = path.display().to_string();
        let source = fs::read(path).map_err(|e| ScriptError::Load {
            script: script.clone(),
            message: e.to_string(),
        })?;
        self.exec(&script, format!("@{script}"), &source)
    }

    pub fn run_source(&self, name: &str, source: &str) -> Result<(), ScriptError> {
        self.exec(name, format!("={name}"), source.as_bytes())
    }

    // Compiling and running are kept apart so that a syntax error is a load
    // failure and anything raised afterwards is a runtime failure.
    fn exec(&self, script: &str, chunk_name: String, source: &[u8]) -> Result<(), ScriptError> {
        let chunk = self
            .lua
            .load(source)
            .set_name(chunk_name)
            .into_function()
            .map_err(|e| ScriptError::Load {
                script: script.to_string(),
                message: e.to_string(),
            })?;

        chunk.call::<_, ()>(()).map_err(|e| ScriptError::Runtime {
            script: script.to_string(),
            message: e.to_string(),
        })
    }

    /// Reads the configuration globals as they are now.
    pub fn snapshot(&self) -> Result<ConfigSnapshot, ScriptError> {
        let globals = self.lua.globals();
        let window_title =
            marshal::read_string(&self.lua, TITLE_GLOBAL, globals.get(TITLE_GLOBAL)?)?;
        let background_color = marshal::read_color(&self.lua, globals.get(COLOR_GLOBAL)?)?;

        Ok(ConfigSnapshot {
            window_title,
            background_color,
        })
    }
}

impl Default for ConfigBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the script at `script_path` over the default configuration and
/// returns the result. The Lua state does not outlive this call.
pub fn bootstrap_config(script_path: impl AsRef<Path>) -> Result<ConfigSnapshot, ScriptError> {
    let script_path = script_path.as_ref();
    log::debug!("running configuration script {}", script_path.display());

    let bridge = ConfigBridge::new();
    bridge.install(&ConfigSnapshot::default())?;
    bridge.run_file(script_path)?;
    bridge.snapshot()
}

/// Same as [`bootstrap_config`] for a script held in memory.
pub fn bootstrap_config_from_source(
    name: &str,
    source: &str,
) -> Result<ConfigSnapshot, ScriptError> {
    let bridge = ConfigBridge::new();
    bridge.install(&ConfigSnapshot::default())?;
    bridge.run_source(name, source)?;
    bridge.snapshot()
}
