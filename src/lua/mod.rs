//! The `dualre` Lua module.
//!
//! `module` builds a table with one sub-table per engine, `std` and `pcre2`.
//! Every function takes a pattern, either a handle returned by `compile` or a
//! pattern string compiled for that call only, and 0-based byte offsets.
//!
//! ```lua
//! local p = dualre.pcre2.compile("(\\w+)@(\\w+)", ":ignorecase")
//! for _, m in ipairs(p:search("a@b c@d") or {}) do
//!     print(m.begin, m["end"], m.value, m.groups[2].value)
//! end
//! p:release()
//! ```

use mlua::prelude::*;

use crate::common::FlagSet;
use crate::{pcre2::Pcre2Regex, standard::StdRegex, CompiledPattern};

mod convert;
mod pattern;

pub use self::pattern::{HostEngine, LuaPattern};

use self::convert::string_arg;
use self::pattern::{ops, with_pattern};

/// Creates the `dualre` module table.
pub fn module(lua: &Lua) -> LuaResult<LuaTable> {
    let exports = lua.create_table()?;

    exports.set("version", env!("CARGO_PKG_VERSION"))?;
    exports.set(StdRegex::TABLE, engine_table::<StdRegex>(lua)?)?;

    let pcre2 = engine_table::<Pcre2Regex>(lua)?;

    pcre2.set("version", crate::pcre2::version().into_lua_err()?.to_string())?;
    pcre2.set("jit", crate::pcre2::jit_available())?;

    exports.set(Pcre2Regex::TABLE, pcre2)?;

    Ok(exports)
}

/// Entry point of the loadable module, `require("dualre")`.
#[cfg(feature = "module")]
#[mlua::lua_module]
fn dualre(lua: &Lua) -> LuaResult<LuaTable> {
    module(lua)
}

macro_rules! add_functions {
    ($lua:ident, $table:ident, $engine:ty, $($name:expr => $op:path),*) => {
        $(
            $table.set(
                $name,
                $lua.create_function(|_, (pattern, subject, start): (LuaValue, LuaValue, Option<i64>)| {
                    let subject = string_arg(&subject, 2, $name)?;

                    with_pattern::<$engine, _, _>(&pattern, $name, |p| $op(p, &subject, start))
                })?,
            )?;
        )*
    };
}

fn engine_table<E: HostEngine>(lua: &Lua) -> LuaResult<LuaTable> {
    let table = lua.create_table()?;

    table.set("compile", lua.create_function(compile::<E>)?)?;

    add_functions!(lua, table, E,
        "contains" => ops::contains,
        "match" => ops::whole,
        "search" => ops::search,
        "find" => ops::find,
        "find_all" => ops::find_all
    );

    table.set("replace", lua.create_function(replace::<E>)?)?;
    table.set("replace_all", lua.create_function(replace_all::<E>)?)?;

    let flags = lua.create_table()?;

    for (name, _, description) in E::Flags::TOKENS {
        flags.set(*name, *description)?;
    }

    table.set("flags", flags)?;

    Ok(table)
}

fn compile<E: HostEngine>(_: &Lua, (pattern, tokens): (LuaValue, LuaVariadic<LuaValue>)) -> LuaResult<LuaPattern<E>> {
    let pattern = string_arg(&pattern, 1, "compile")?;
    let tokens = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| string_arg(token, i + 2, "compile"))
        .collect::<LuaResult<Vec<_>>>()?;

    CompiledPattern::new(&pattern, &tokens).map(LuaPattern).into_lua_err()
}

fn replace<E: HostEngine>(_: &Lua, (pattern, subject, replacement): (LuaValue, LuaValue, LuaValue)) -> LuaResult<String> {
    let subject = string_arg(&subject, 2, "replace")?;
    let replacement = string_arg(&replacement, 3, "replace")?;

    with_pattern::<E, _, _>(&pattern, "replace", |p| p.replace(&subject, &replacement))
}

fn replace_all<E: HostEngine>(
    _: &Lua,
    (pattern, subject, replacement): (LuaValue, LuaValue, LuaValue),
) -> LuaResult<String> {
    let subject = string_arg(&subject, 2, "replace_all")?;
    let replacement = string_arg(&replacement, 3, "replace_all")?;

    with_pattern::<E, _, _>(&pattern, "replace_all", |p| p.replace_all(&subject, &replacement))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lua() -> Lua {
        let _ = pretty_env_logger::try_init();

        let lua = Lua::new();

        lua.globals().set("dualre", module(&lua).unwrap()).unwrap();
        lua
    }

    #[test]
    fn test_module_info() {
        let lua = lua();

        let version: String = lua.load("return dualre.version").eval().unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));

        let jit: bool = lua.load("return dualre.pcre2.jit").eval().unwrap();
        assert_eq!(jit, crate::pcre2::jit_available());

        lua.load(
            r#"
            assert(dualre.pcre2.version:match("^10%.%d+%.0$"))
            assert(dualre.std.flags.grep == "Use the regular expression grammar used by the grep utility.")
            assert(dualre.std.flags.ecmascript == "Default match type")
            assert(dualre.pcre2.flags.ignorecase ~= nil)
            assert(dualre.pcre2.flags.grep == nil)
            "#,
        )
        .exec()
        .unwrap();
    }

    #[test]
    fn test_handle() {
        lua()
            .load(
                r#"
                local p = dualre.pcre2.compile("a+", ":ignorecase", "ignorecase")
                assert(tostring(p) == "pattern: 'a+' flags: (:ignorecase)")
                assert(p.pattern == "a+")
                assert(#p.flags == 1 and p.flags[1] == "ignorecase")
                assert(p.released == false)
                assert(p.jit == dualre.pcre2.jit)
                assert(p:find("bAa") == 1)

                local s = dualre.std.compile("b")
                assert(tostring(s) == "pattern: 'b' flags: ()")
                assert(s.jit == nil)

                p:release()
                p:release()
                assert(p.released)
                assert(p.pattern == nil)
                assert(tostring(p) == "no pattern")

                local ok, err = pcall(p.find, p, "aaa")
                assert(not ok and tostring(err):find("pattern has been released", 1, true))
                "#,
            )
            .exec()
            .unwrap();
    }

    #[test]
    fn test_search() {
        lua()
            .load(
                r#"
                local m = dualre.std.search("(\\w+)=(\\d+)", "a=1 bb=22")
                assert(#m == 2)
                assert(m[1].begin == 0 and m[1]["end"] == 3)
                assert(m[2].begin == 4 and m[2]["end"] == 9 and m[2].value == "bb=22")
                assert(#m[2].groups == 2)
                assert(m[2].groups[1].index == 1 and m[2].groups[1].value == "bb")
                assert(m[2].groups[2].begin == 7 and m[2].groups[2].value == "22")
                assert(dualre.std.search("x", "abc") == nil)

                local m = dualre.pcre2.search("(a)|(b)", "b")
                assert(#m[1].groups == 1 and m[1].groups[1].index == 2)

                local p = dualre.pcre2.compile("\\d+")
                local m = p:search("1 22 333", 2)
                assert(#m == 2 and m[1].value == "22" and m[2].value == "333")
                "#,
            )
            .exec()
            .unwrap();
    }

    #[test]
    fn test_find_and_match() {
        lua()
            .load(
                r#"
                assert(dualre.pcre2.find("b", "abcb") == 1)
                assert(dualre.pcre2.find("b", "abcb", 2) == 3)
                assert(dualre.pcre2.find("b", "abcb", -5) == 1)
                assert(dualre.pcre2.find("z", "abcb") == nil)

                local all = dualre.std.find_all("a*", "bbb")
                assert(#all == 4 and all[1] == 0 and all[4] == 3)
                assert(#dualre.std.find_all("z", "bbb") == 0)

                assert(dualre.std.contains("b", "abc"))
                assert(not dualre.std.contains("b", "abc", 2))

                assert(dualre.std.match("b", "abc") == nil)
                local m = dualre.std.match("a.c", "abc")
                assert(#m == 1 and m[1].value == "abc")

                local p = dualre.pcre2.compile("\\d+")
                assert(p:match("ab12", 2)[1].value == "12")
                assert(p:match("ab12x", 2) == nil)
                assert(p:contains("ab12"))
                assert(#p:find_all("1 22 333") == 3)
                "#,
            )
            .exec()
            .unwrap();
    }

    #[test]
    fn test_replace() {
        lua()
            .load(
                r#"
                assert(dualre.pcre2.replace("o", "foo boo", "0") == "f0o boo")
                assert(dualre.pcre2.replace_all("o", "foo boo", "$0") == "f$0$0 b$0$0")
                assert(dualre.std.replace_all("o", "foo boo", "\\0") == "f\\0\\0 b\\0\\0")

                local p = dualre.std.compile("o")
                assert(p:replace_all("xyz", "0") == "xyz")
                assert(p:replace("foo", "0") == "f0o")
                "#,
            )
            .exec()
            .unwrap();
    }

    #[test]
    fn test_errors() {
        lua()
            .load(
                r#"
                local ok, err = pcall(dualre.pcre2.compile, "a", ":basic")
                assert(not ok and tostring(err):find(":basic is not a valid PCRE2 flag", 1, true))

                ok, err = pcall(dualre.std.compile, "a", "basic", "grep")
                assert(not ok and tostring(err):find("mutually exclusive", 1, true))

                ok, err = pcall(dualre.pcre2.compile, "(abc")
                assert(not ok and tostring(err):find("PCRE2 compilation failed, pattern: '(abc', offset 4", 1, true))

                ok, err = pcall(dualre.std.find, "a", 42)
                assert(not ok and tostring(err):find("bad argument #2 to 'find' (string expected, got number)", 1, true))

                ok, err = pcall(dualre.pcre2.match, "a", "a\xffb")
                assert(not ok and tostring(err):find("bad argument #2 to 'match' (invalid UTF-8 string)", 1, true))

                ok, err = pcall(dualre.std.find, 42, "a")
                assert(not ok and tostring(err):find("bad argument #1 to 'find'", 1, true))

                ok, err = pcall(dualre.std.find, dualre.pcre2.compile("a"), "a")
                assert(not ok)

                local p = dualre.std.compile("a")
                ok, err = pcall(p.find, p, {})
                assert(not ok and tostring(err):find("(string expected, got table)", 1, true))
                "#,
            )
            .exec()
            .unwrap();
    }

    #[cfg(feature = "lua54")]
    #[test]
    fn test_close() {
        lua()
            .load(
                r#"
                local p = dualre.pcre2.compile("a")
                do
                    local q <close> = p
                end
                assert(p.released)
                "#,
            )
            .exec()
            .unwrap();
    }
}
