use thiserror::Error;

/// Errors raised while bootstrapping configuration from a script.
///
/// All of them are fatal for startup: a half-applied configuration is never
/// handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script file is missing, unreadable or does not parse.
    #[error("cannot load script {script}: {message}")]
    Load { script: String, message: String },

    /// The script raised an error while running.
    #[error("script {script} failed: {message}")]
    Runtime { script: String, message: String },

    /// A configuration global holds a value that cannot be converted.
    #[error("global `{name}` must be a string or a number, got {found}")]
    Value {
        name: &'static str,
        found: &'static str,
    },

    /// The Lua state itself failed (allocation, broken metatables, ...).
    #[error("script environment failure: {0}")]
    Environment(String),
}

impl From<mlua::Error> for ScriptError {
    fn from(e: mlua::Error) -> Self {
        ScriptError::Environment(e.to_string())
    }
}
