// build.rs
//
// Compiles `locales/<lang>.toml` over `locales/en.toml` into the `t!` macro. Every
// user-facing string of `ez` goes through it, so an unknown key is a compile error.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_LANG: &str = "en";
const LANG_ENV: &str = "EZ_LANG";
const FEATURE_PREFIX: &str = "CARGO_FEATURE_LANG_";

type Messages = BTreeMap<String, String>;

fn main() {
    println!("cargo:rerun-if-env-changed={}", LANG_ENV);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let lang = selected_language();
    println!("cargo:rustc-env=EZ_LANG_EFFECTIVE={}", lang);

    let mut messages = read_messages(&locale_path(FALLBACK_LANG))
        .unwrap_or_else(|e| panic!("{}", e));
    if lang != FALLBACK_LANG {
        let path = locale_path(&lang);
        if Path::new(&path).exists() {
            messages.extend(read_messages(&path).unwrap_or_else(|e| panic!("{}", e)));
        } else {
            println!(
                "cargo:warning=No '{}' for language '{}', using '{}'.",
                path, lang, FALLBACK_LANG
            );
        }
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let dest = Path::new(&out_dir).join("translations.rs");
    fs::write(&dest, render_macro(&messages)).expect("write translations.rs");
}

/// A `lang_*` feature wins over `EZ_LANG`; English otherwise.
fn selected_language() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| key.strip_prefix(FEATURE_PREFIX).map(str::to_lowercase))
        .collect();
    features.sort();

    match features.split_first() {
        Some((first, rest)) => {
            if !rest.is_empty() {
                println!(
                    "cargo:warning=Several language features enabled ({:?}); using '{}'.",
                    features, first
                );
            }
            first.clone()
        }
        None => env::var(LANG_ENV).unwrap_or_else(|_| FALLBACK_LANG.to_string()),
    }
}

fn locale_path(lang: &str) -> String {
    format!("locales/{}.toml", lang)
}

fn read_messages(path: &str) -> Result<Messages, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path, e))?;
    toml::from_str(&content).map_err(|e| format!("Cannot parse {}: {}", path, e))
}

fn render_macro(messages: &Messages) -> String {
    let mut code = String::from(
        "/// Expands to the compiled message for a key of `locales/*.toml`.\n\
         #[macro_export]\nmacro_rules! t {\n",
    );
    for (key, text) in messages {
        code.push_str(&format!("    ({:?}) => {{ {:?} }};\n", key, text));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n}\n",
    );
    code
}
