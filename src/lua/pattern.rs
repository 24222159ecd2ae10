use mlua::prelude::*;

use crate::lua::convert::{bad_argument, start_offset, string_arg, utf8_arg};
use crate::{pcre2::Pcre2Regex, standard::StdRegex, CompiledPattern, Engine, MatchResult, Result};

/// An engine exposed to Lua.
pub trait HostEngine: Engine + 'static {
    /// Name of the engine table in the module.
    const TABLE: &'static str;

    /// Returns whether the pattern runs on a JIT, for engines that have one.
    fn jit(&self) -> Option<bool> {
        None
    }
}

impl HostEngine for StdRegex {
    const TABLE: &'static str = "std";
}

impl HostEngine for Pcre2Regex {
    const TABLE: &'static str = "pcre2";

    fn jit(&self) -> Option<bool> {
        Some(Pcre2Regex::jit(self))
    }
}

/// A compiled pattern handle owned by Lua.
pub struct LuaPattern<E: Engine>(pub CompiledPattern<E>);

/// Runs `f` over the pattern argument, a handle or a pattern string compiled for this call only.
pub fn with_pattern<E, R, F>(value: &LuaValue, func: &str, f: F) -> LuaResult<R>
where
    E: HostEngine,
    F: FnOnce(&CompiledPattern<E>) -> Result<R>,
{
    match value {
        LuaValue::UserData(ud) => {
            let handle = ud.borrow::<LuaPattern<E>>()?;

            f(&handle.0).into_lua_err()
        }
        LuaValue::String(s) => {
            let mut pattern = CompiledPattern::<E>::new(&utf8_arg(&s, 1, func)?, &[] as &[&str]).into_lua_err()?;
            let result = f(&pattern);

            pattern.release();

            result.into_lua_err()
        }
        value => Err(bad_argument(1, func, "string", value)),
    }
}

/// Operations shared by the module functions and the handle methods.
pub mod ops {
    use super::*;

    /// Returns true if the pattern matches at or after `start`.
    pub fn contains<E: Engine>(p: &CompiledPattern<E>, subject: &str, start: Option<i64>) -> Result<bool> {
        p.is_match_at(subject, start_offset(start))
    }

    /// Matches the whole subject from `start`.
    pub fn whole<E: Engine>(p: &CompiledPattern<E>, subject: &str, start: Option<i64>) -> Result<Option<Vec<MatchResult>>> {
        Ok(p.match_whole_at(subject, start_offset(start))?.map(|m| vec![m]))
    }

    /// Collects every match at or after `start`, `None` when there is none.
    pub fn search<E: Engine>(p: &CompiledPattern<E>, subject: &str, start: Option<i64>) -> Result<Option<Vec<MatchResult>>> {
        let matches = p.find_iter(subject, start_offset(start))?.collect::<Result<Vec<_>>>()?;

        Ok(if matches.is_empty() { None } else { Some(matches) })
    }

    /// Returns the begin offset of the first match at or after `start`.
    pub fn find<E: Engine>(p: &CompiledPattern<E>, subject: &str, start: Option<i64>) -> Result<Option<usize>> {
        Ok(p.find_at(subject, start_offset(start))?.map(|m| m.begin))
    }

    /// Returns the begin offsets of every match at or after `start`.
    pub fn find_all<E: Engine>(p: &CompiledPattern<E>, subject: &str, start: Option<i64>) -> Result<Vec<usize>> {
        p.find_iter(subject, start_offset(start))?.map(|m| m.map(|m| m.begin)).collect()
    }
}

macro_rules! add_ops {
    ($methods:ident, $($name:expr => $op:path),*) => {
        $(
            $methods.add_method($name, |_, this, (subject, start): (LuaValue, Option<i64>)| {
                let subject = string_arg(&subject, 1, $name)?;

                $op(&this.0, &subject, start).into_lua_err()
            });
        )*
    };
}

impl<E: HostEngine> LuaUserData for LuaPattern<E> {
    fn add_fields<F: LuaUserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("pattern", |_, this| {
            Ok(if this.0.is_released() {
                None
            } else {
                Some(this.0.as_str().to_owned())
            })
        });
        fields.add_field_method_get("flags", |_, this| Ok(this.0.flags().to_vec()));
        fields.add_field_method_get("released", |_, this| Ok(this.0.is_released()));
        fields.add_field_method_get("jit", |_, this| Ok(this.0.engine().ok().and_then(HostEngine::jit)));
    }

    fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
        methods.add_method_mut("release", |_, this, ()| {
            this.0.release();
            Ok(())
        });

        add_ops!(methods,
            "contains" => ops::contains,
            "match" => ops::whole,
            "search" => ops::search,
            "find" => ops::find,
            "find_all" => ops::find_all
        );

        methods.add_method("replace", |_, this, (subject, replacement): (LuaValue, LuaValue)| {
            let subject = string_arg(&subject, 1, "replace")?;
            let replacement = string_arg(&replacement, 2, "replace")?;

            this.0.replace(&subject, &replacement).into_lua_err()
        });
        methods.add_method("replace_all", |_, this, (subject, replacement): (LuaValue, LuaValue)| {
            let subject = string_arg(&subject, 1, "replace_all")?;
            let replacement = string_arg(&replacement, 2, "replace_all")?;

            this.0.replace_all(&subject, &replacement).into_lua_err()
        });

        methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| Ok(this.0.to_string()));

        #[cfg(feature = "lua54")]
        methods.add_meta_method_mut(LuaMetaMethod::Close, |_, this, _: LuaMultiValue| {
            this.0.release();
            Ok(())
        });
    }
}
