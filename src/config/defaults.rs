//! Built-in engine defaults
//!
//! Mirrors the engine's documented option sections. Parts of this are
//! overwritten by program arguments, see [`super::apply_overrides`].

use serde_json::{json, Map, Value};

/// Default engine configuration.
pub fn engine_defaults() -> Value {
    json!({
        "loader": {
            "load": ["input/tex-full", "input/mml", "input/asciimath", "output/svg"]
        },
        "tex": {
            "packages": ["base", "require", "newcommand", "configmacros"],
            "processEscapes": true,
            "processRefs": true,
            "processEnvironments": true,
            "digits": "/^(?:[0-9]+(?:\\{,\\}[0-9]*)?|\\{,\\}[0-9]+)/",
            "tags": "none",
            "tagSide": "right",
            "useLabelIds": true,
            "maxBuffer": 50 * 1024,
            "macros": {},
            "environments": {}
        },
        "svg": {
            "scale": 1,
            "minScale": 0.5,
            "mtextInheritFont": false,
            "merrorInheritFont": false,
            "mathmlSpacing": false,
            "skipAttributes": {},
            "exFactor": 0.5,
            "displayAlign": "center",
            "displayIndent": "0",
            "fontCache": "none",
            "localID": null,
            "internalSpeechTitles": false,
            "titleID": 0
        },
        "startup": {
            "typeset": false
        }
    })
}

/// Default options for TeX packages.
///
/// A package's entry is merged into the `tex` section only when the package
/// ends up in the final load list. May be overwritten by program arguments.
pub fn package_defaults() -> Map<String, Value> {
    let table = json!({
        "ams": {
            "multlineWidth": "90%",
            "multlineIndent": "1em"
        },
        "amscd": {
            "colspace": "5pt",
            "rowspace": "5pt",
            "harrowsize": "2.75em",
            "varrowsize": "1.75em",
            "hideHorizontalLabels": false
        },
        "autoload": {
            "action": ["toggle", "mathtip", "texttip"],
            "amscd": [[], ["CD"]],
            "bbox": ["bbox"],
            "boldsymbol": ["boldsymbol"],
            "braket": ["bra", "ket", "braket", "set", "Bra", "Ket", "Braket", "Set",
                       "ketbra", "Ketbra"],
            "cancel": ["cancel", "bcancel", "xcancel", "cancelto"],
            "color": ["color", "definecolor", "textcolor", "colorbox", "fcolorbox"],
            "enclose": ["enclose"],
            "extpfeil": ["xtwoheadrightarrow", "xtwoheadleftarrow", "xmapsto",
                         "xlongequal", "xtofrom", "Newextarrow"],
            "html": ["href", "class", "style", "cssId"],
            "mhchem": ["ce", "pu"],
            "newcommand": ["newcommand", "renewcommand", "newenvironment",
                           "renewenvironment", "def", "let"],
            "unicode": ["unicode"],
            "upgreek": ["upalpha", "upbeta", "upchi", "updelta", "Updelta", "upepsilon",
                        "upeta", "upgamma", "Upgamma", "upiota", "upkappa", "uplambda",
                        "Uplambda", "upmu", "upnu", "upomega", "Upomega", "upomicron",
                        "upphi", "Upphi", "uppi", "Uppi", "uppsi", "Uppsi", "uprho",
                        "upsigma", "Upsigma", "uptau", "uptheta", "Uptheta", "upupsilon",
                        "Upupsilon", "upvarepsilon", "upvarphi", "upvarpi", "upvarrho",
                        "upvarsigma", "upvartheta", "upxi", "Upxi", "upzeta"],
            "verb": ["verb"]
        },
        "physics": {
            "italicdiff": false,
            "arrowdel": false
        }
    });
    match table {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_all_sections() {
        let config = engine_defaults();
        for section in ["loader", "tex", "svg", "startup"] {
            assert!(config[section].is_object(), "missing section {}", section);
        }
        assert_eq!(config["tex"]["packages"][0], "base");
        assert_eq!(config["svg"]["fontCache"], "none");
        assert_eq!(config["startup"]["typeset"], false);
    }

    #[test]
    fn package_table_holds_known_packages() {
        let table = package_defaults();
        for package in ["ams", "amscd", "autoload", "physics"] {
            assert!(table.contains_key(package), "missing package {}", package);
        }
        // Packages loaded by default deliberately have no option table.
        assert!(!table.contains_key("base"));
    }
}
