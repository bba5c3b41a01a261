//! Program-argument override logic
//!
//! Each argument is a JSON object with exactly one recognized top-level key.
//! Merge semantics per section:
//! - `tex`, `loader`, `svg`: shallow-merge into the section (existing keys
//!   overwritten, new keys added)
//! - `tex/macros`, `tex/environments`: shallow-merge into the named map
//!   nested under `tex`
//! - `tex/packages`: extend the package load list (deduplicated), collect
//!   per-package option overrides, then merge option tables for every
//!   package that ends up loaded
//!
//! Later arguments win on key conflicts. No argument can abort startup.

use serde_json::{Map, Value};

use super::defaults::package_defaults;

/// Key inside a `tex/packages` override that carries the load-list additions.
const PACKAGE_LIST_KEY: &str = "tex/packages/list";

/// Apply JSON-encoded override arguments to `config`, in order.
pub fn apply_overrides(config: &mut Value, args: &[String]) {
    let Value::Object(root) = config else { return };
    let mut packages = package_defaults();
    for arg in args {
        apply_argument(root, &mut packages, arg);
    }
}

fn apply_argument(root: &mut Map<String, Value>, packages: &mut Map<String, Value>, arg: &str) {
    let parsed: Value = match serde_json::from_str(arg) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("error processing {}: {}", arg, error);
            return;
        }
    };
    let Value::Object(object) = parsed else {
        tracing::warn!("error processing {}: not a JSON object", arg);
        return;
    };
    // An override carries exactly one top-level key; anything else is
    // ambiguous (the map is key-ordered, so "first key wins" would not
    // follow the argument as written) and is skipped whole.
    if object.len() != 1 {
        tracing::warn!("error processing {}: expected exactly one top-level key", arg);
        return;
    }
    let Some((key, overlay)) = object.into_iter().next() else {
        return;
    };
    match key.as_str() {
        "tex" | "loader" | "svg" => {
            if let Some(section) = section_entry(root, &key) {
                merge_object(section, overlay, &key);
            }
        }
        "tex/macros" => merge_nested(root, "macros", overlay, &key),
        "tex/environments" => merge_nested(root, "environments", overlay, &key),
        "tex/packages" => apply_packages(root, packages, overlay),
        _ => tracing::warn!("unknown option {}", key),
    }
}

/// Mutable handle on a named object entry, created empty if absent.
/// A non-object already under the key is replaced by an empty object.
fn section_entry<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    let value = parent
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    value.as_object_mut()
}

fn merge_object(target: &mut Map<String, Value>, overlay: Value, key: &str) {
    match overlay {
        Value::Object(overlay) => {
            target.extend(overlay);
            tracing::info!("applied section {}", key);
        }
        _ => tracing::warn!("error processing section {}: not a JSON object", key),
    }
}

fn merge_nested(root: &mut Map<String, Value>, name: &str, overlay: Value, key: &str) {
    let Some(tex) = section_entry(root, "tex") else {
        return;
    };
    if let Some(nested) = section_entry(tex, name) {
        merge_object(nested, overlay, key);
    }
}

fn apply_packages(
    root: &mut Map<String, Value>,
    packages: &mut Map<String, Value>,
    overlay: Value,
) {
    let Value::Object(mut overlay) = overlay else {
        tracing::warn!("error processing section tex/packages: not a JSON object");
        return;
    };

    let additions: Vec<String> = match overlay.remove(PACKAGE_LIST_KEY) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        Some(_) => {
            tracing::warn!("ignoring {}: not a JSON array", PACKAGE_LIST_KEY);
            Vec::new()
        }
        None => Vec::new(),
    };

    // Remaining keys are per-package option overrides, collected in the
    // side table so they apply whether or not the package is loaded yet.
    for (name, options) in overlay {
        match options {
            Value::Object(options) => {
                if let Some(entry) = section_entry(packages, &name) {
                    entry.extend(options);
                }
            }
            _ => tracing::warn!("ignoring options for package {}: not a JSON object", name),
        }
    }

    let Some(tex) = section_entry(root, "tex") else {
        return;
    };
    let mut list: Vec<String> = match tex.get("packages") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };
    for name in additions {
        if !list.contains(&name) {
            list.push(name);
        }
    }
    tracing::info!("preloaded packages list: {}", list.join(","));
    tex.insert(
        "packages".to_string(),
        Value::Array(list.iter().cloned().map(Value::String).collect()),
    );

    // Assign package options only for packages that are preloaded.
    for name in &list {
        if let Some(Value::Object(options)) = packages.get(name).cloned() {
            if let Some(target) = section_entry(tex, name) {
                target.extend(options);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{assemble, engine_defaults};
    use serde_json::json;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn simple_section_shallow_merges() {
        let config = assemble(&args(&[r#"{"tex":{"tags":"ams","newKey":1}}"#]));
        assert_eq!(config["tex"]["tags"], "ams");
        assert_eq!(config["tex"]["newKey"], 1);
        // Untouched keys survive.
        assert_eq!(config["tex"]["processEscapes"], true);
    }

    #[test]
    fn later_arguments_win() {
        let config = assemble(&args(&[
            r#"{"svg":{"scale":2}}"#,
            r#"{"svg":{"scale":3}}"#,
        ]));
        assert_eq!(config["svg"]["scale"], 3);
    }

    #[test]
    fn dotted_sections_merge_under_tex() {
        let config = assemble(&args(&[
            r#"{"tex/macros":{"RR":"\\mathbb{R}"}}"#,
            r#"{"tex/environments":{"braced":["\\left\\{","\\right\\}"]}}"#,
        ]));
        assert_eq!(config["tex"]["macros"]["RR"], "\\mathbb{R}");
        assert_eq!(
            config["tex"]["environments"]["braced"],
            json!(["\\left\\{", "\\right\\}"])
        );
        assert_eq!(config["tex"]["packages"][0], "base");
    }

    #[test]
    fn package_list_extends_and_deduplicates() {
        let config = assemble(&args(&[
            r#"{"tex/packages":{"tex/packages/list":["ams","base","ams"]}}"#,
        ]));
        let packages = config["tex"]["packages"].as_array().unwrap();
        let names: Vec<&str> = packages.iter().filter_map(|p| p.as_str()).collect();
        assert_eq!(
            names,
            ["base", "require", "newcommand", "configmacros", "ams"]
        );
        // ams is now loaded, so its default options land under tex.
        assert_eq!(config["tex"]["ams"]["multlineWidth"], "90%");
    }

    #[test]
    fn package_option_overrides_apply_when_loaded() {
        let config = assemble(&args(&[r#"{"tex/packages":{
            "tex/packages/list":["physics"],
            "physics":{"italicdiff":true}
        }}"#]));
        assert_eq!(config["tex"]["physics"]["italicdiff"], true);
        assert_eq!(config["tex"]["physics"]["arrowdel"], false);
    }

    #[test]
    fn unloaded_package_options_stay_out_of_config() {
        let config = assemble(&args(&[
            r#"{"tex/packages":{"physics":{"italicdiff":true}}}"#,
        ]));
        assert!(config["tex"].get("physics").is_none());
    }

    #[test]
    fn unknown_option_leaves_config_unaffected() {
        let config = assemble(&args(&[r#"{"chtml":{"scale":2}}"#]));
        assert_eq!(config, engine_defaults());
    }

    #[test]
    fn malformed_argument_skipped_processing_continues() {
        let config = assemble(&args(&[
            "not json at all",
            r#"{"svg":{"fontCache":"local"}}"#,
        ]));
        assert_eq!(config["svg"]["fontCache"], "local");
    }

    #[test]
    fn multi_key_argument_skipped_whole() {
        let config = assemble(&args(&[
            r#"{"svg":{"scale":9},"tex":{"tags":"ams"}}"#,
            r#"{"svg":{"scale":2}}"#,
        ]));
        // Neither key of the ambiguous argument applies; the well-formed
        // one still does.
        assert_eq!(config["svg"]["scale"], 2);
        assert_eq!(config["tex"]["tags"], "none");
    }

    #[test]
    fn non_object_argument_skipped() {
        let config = assemble(&args(&[r#"[1,2,3]"#, r#""tex""#]));
        assert_eq!(config, engine_defaults());
    }
}
