// build.rs
//
// Compiles `locales/<lang>.toml` into the `t!` macro. English is always the
// base table; the selected language only overrides the keys it defines.

use std::collections::BTreeMap;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

type Messages = BTreeMap<String, String>;

const BASE_LANG: &str = "en";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed=CTX_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let lang = selected_language();

    let mut messages = read_messages(BASE_LANG)?;
    if lang != BASE_LANG {
        if Path::new(&locale_path(&lang)).exists() {
            messages.extend(read_messages(&lang)?);
        } else {
            println!("cargo:warning=No locale file for '{lang}', using '{BASE_LANG}'.");
        }
    }

    let out_dir = env::var("OUT_DIR")?;
    fs::write(
        Path::new(&out_dir).join("translations.rs"),
        render_macro(&messages),
    )?;
    Ok(())
}

/// A `lang_*` cargo feature wins over `CTX_LANG`. With several features
/// enabled, the alphabetically first one is used.
fn selected_language() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    features.sort();

    match features.as_slice() {
        [] => env::var("CTX_LANG").unwrap_or_else(|_| BASE_LANG.to_string()),
        [only] => only.clone(),
        [first, ..] => {
            println!("cargo:warning=Several language features enabled ({features:?}), using '{first}'.");
            first.clone()
        }
    }
}

fn locale_path(lang: &str) -> String {
    format!("locales/{lang}.toml")
}

fn read_messages(lang: &str) -> Result<Messages, Box<dyn Error>> {
    let path = locale_path(lang);
    let content = fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
    Ok(toml::from_str(&content).map_err(|e| format!("{path}: {e}"))?)
}

/// One arm per key; any other key is a compile error at the call site.
fn render_macro(messages: &Messages) -> String {
    let mut code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for (key, text) in messages {
        code.push_str(&format!("    ({key:?}) => {{ {text:?} }};\n"));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n}\n",
    );
    code
}
