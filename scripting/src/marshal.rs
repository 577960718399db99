//! Conversions between host values and Lua values.
//!
//! Colors travel as tables with `red`, `green` and `blue` fields. Reading is
//! lenient the way Lua's `tonumber` is: a missing or non-numeric field reads
//! as 0, numeric strings are converted.

use mlua::{Lua, Table, Value};

use crate::color::Color;
use crate::error::ScriptError;

pub const RED: &str = "red";
pub const GREEN: &str = "green";
pub const BLUE: &str = "blue";

/// Sets the three color fields on `table`, in red, green, blue order.
pub fn write_color(table: &Table, color: Color) -> mlua::Result<()> {
    table.set(RED, color.red)?;
    table.set(GREEN, color.green)?;
    table.set(BLUE, color.blue)?;
    Ok(())
}

/// Reads a color table. A value that is not a table reads as black.
pub fn read_color<'lua>(lua: &'lua Lua, value: Value<'lua>) -> mlua::Result<Color> {
    let table = match value {
        Value::Table(table) => table,
        other => {
            log::debug!("color value is a {}, reading as black", other.type_name());
            return Ok(Color::default());
        }
    };

    Ok(Color {
        red: number_field(lua, &table, RED)?,
        green: number_field(lua, &table, GREEN)?,
        blue: number_field(lua, &table, BLUE)?,
    })
}

fn number_field<'lua>(lua: &'lua Lua, table: &Table<'lua>, key: &str) -> mlua::Result<f32> {
    let value: Value = table.get(key)?;
    Ok(lua.coerce_number(value)?.unwrap_or(0.0) as f32)
}

pub fn write_string(table: &Table, key: &str, value: &str) -> mlua::Result<()> {
    table.set(key, value)
}

/// Reads a string global. Numbers are converted like `tostring` does;
/// anything else is rejected.
pub fn read_string<'lua>(
    lua: &'lua Lua,
    name: &'static str,
    value: Value<'lua>,
) -> Result<String, ScriptError> {
    let found = value.type_name();
    match value {
        Value::String(s) => Ok(s.to_string_lossy().into_owned()),
        Value::Integer(_) | Value::Number(_) => match lua.coerce_string(value)? {
            Some(s) => Ok(s.to_string_lossy().into_owned()),
            None => Err(ScriptError::Value { name, found }),
        },
        _ => Err(ScriptError::Value { name, found }),
    }
}
