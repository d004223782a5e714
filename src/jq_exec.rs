//! jq pre-selection, evaluated with jaq.
//!
//! Lets a caller point the tool at wrapped parser output, e.g. `.units[]` or
//! `.result.files[] | select(.path | endswith("Api.java"))`. Every value the
//! filter yields becomes one compilation unit.
use anyhow::{Result, anyhow};
use jaq_core::{Compiler, Ctx, RcIter, compile::Undefined, load};
use jaq_json::Val;
use serde_json::Value;

pub fn select_units(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val renders as JSON text; go back through serde_json to keep key order
        let value = serde_json::from_str::<Value>(&val.to_string())?;
        out.push(value);
    }
    Ok(out)
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> anyhow::Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    anyhow!(s)
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> anyhow::Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    anyhow!(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn iterates_wrapped_units() {
        let doc = json!({"units": [{"path": "A.java"}, {"path": "B.java"}]});
        let units = select_units(".units[]", &doc).unwrap();
        assert_eq!(units, vec![json!({"path": "A.java"}), json!({"path": "B.java"})]);
    }

    #[test]
    fn select_can_drop_everything() {
        let doc = json!({"units": [{"path": "A.java"}]});
        let units = select_units(r#".units[] | select(.path == "Z.java")"#, &doc).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn bad_filter_is_an_error() {
        assert!(select_units(".units[", &json!({})).is_err());
        assert!(select_units("no_such_function", &json!({})).is_err());
    }
}
