use mlua::prelude::*;
use mlua::IntoLua;

use crate::{GroupResult, MatchResult};

impl IntoLua for MatchResult {
    fn into_lua(self, lua: &Lua) -> LuaResult<LuaValue> {
        let table = lua.create_table()?;

        table.set("begin", self.begin)?;
        table.set("end", self.end)?;
        table.set("value", self.value)?;
        table.set("groups", self.groups)?;

        Ok(LuaValue::Table(table))
    }
}

impl IntoLua for GroupResult {
    fn into_lua(self, lua: &Lua) -> LuaResult<LuaValue> {
        let table = lua.create_table()?;

        table.set("index", self.index)?;
        table.set("begin", self.begin)?;
        table.set("end", self.end)?;
        table.set("value", self.value)?;

        Ok(LuaValue::Table(table))
    }
}

/// Builds the error raised for an argument of the wrong type.
pub fn bad_argument(pos: usize, func: &str, expected: &str, value: &LuaValue) -> LuaError {
    LuaError::RuntimeError(format!(
        "bad argument #{} to '{}' ({} expected, got {})",
        pos,
        func,
        expected,
        type_name(value)
    ))
}

/// Returns the Lua type of a value, as `type()` reports it.
fn type_name(value: &LuaValue) -> &'static str {
    match value {
        LuaValue::Integer(_) | LuaValue::Number(_) => "number",
        value => value.type_name(),
    }
}

/// Extracts a string argument, rejecting every other type.
pub fn string_arg(value: &LuaValue, pos: usize, func: &str) -> LuaResult<String> {
    match value {
        LuaValue::String(s) => utf8_arg(s, pos, func),
        value => Err(bad_argument(pos, func, "string", value)),
    }
}

/// Converts a Lua string argument, which must hold valid UTF-8.
pub fn utf8_arg(s: &LuaString, pos: usize, func: &str) -> LuaResult<String> {
    s.to_str()
        .map(|s| (*s).to_owned())
        .map_err(|_| LuaError::RuntimeError(format!("bad argument #{} to '{}' (invalid UTF-8 string)", pos, func)))
}

/// Converts an optional start argument into a byte offset, clamping negative values to 0.
pub fn start_offset(start: Option<i64>) -> usize {
    start.map_or(0, |start| start.max(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_offset() {
        assert_eq!(start_offset(None), 0);
        assert_eq!(start_offset(Some(-3)), 0);
        assert_eq!(start_offset(Some(0)), 0);
        assert_eq!(start_offset(Some(7)), 7);
    }

    #[test]
    fn test_bad_argument() {
        let lua = Lua::new();

        let err = string_arg(&LuaValue::Integer(42), 2, "find").unwrap_err();

        assert_eq!(err.to_string(), "runtime error: bad argument #2 to 'find' (string expected, got number)");

        let s = LuaValue::String(lua.create_string("abc").unwrap());

        assert_eq!(string_arg(&s, 1, "find").unwrap(), "abc");
    }

    #[test]
    fn test_invalid_utf8_argument() {
        let lua = Lua::new();

        let s = LuaValue::String(lua.create_string(&b"a\xffb"[..]).unwrap());
        let err = string_arg(&s, 2, "match").unwrap_err();

        assert_eq!(err.to_string(), "runtime error: bad argument #2 to 'match' (invalid UTF-8 string)");
    }
}
