use crate::svg_extract::Icon;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Render one path's attributes as quoted "key": "value" pairs.
///
/// The fill attribute is dropped; the registry themes icons at render
/// time. Values are interpolated verbatim, so a literal quote inside a
/// value corrupts the generated syntax.
fn render_path_attrs(attrs: &IndexMap<String, String>) -> String {
    attrs
        .iter()
        .filter(|(key, _)| key.as_str() != "fill")
        .map(|(key, value)| format!(r#""{key}": "{value}""#))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the paths array literal for one icon. An icon without path
/// elements renders as the empty list `[  ]`.
fn render_paths(paths: &[IndexMap<String, String>]) -> String {
    let entries: Vec<String> = paths
        .iter()
        .map(|attrs| format!("{{{}}}", render_path_attrs(attrs)))
        .collect();

    format!("[ {} ]", entries.join(", "))
}

/// Render the full registration module for one icon.
///
/// Deterministic in its inputs; a missing dimension renders as the literal
/// `undefined`.
pub fn render_module(icon: &Icon, registry: &str) -> String {
    format!(
        r#"import Icon from '{registry}'

Icon.register({{
  '{name}': {{
    width: {width},
    height: {height},
    paths: {paths}
  }}
}})
"#,
        registry = registry,
        name = icon.name,
        width = icon.width.as_deref().unwrap_or("undefined"),
        height = icon.height.as_deref().unwrap_or("undefined"),
        paths = render_paths(&icon.paths),
    )
}

/// Write the rendered module to `<output_dir>/<name>.js`, replacing any
/// existing file at that path. The output directory must already exist.
pub fn write_module(icon: &Icon, registry: &str, output_dir: &Path) -> Result<PathBuf> {
    let module_path = output_dir.join(format!("{}.js", icon.name));

    std::fs::write(&module_path, render_module(icon, registry))
        .with_context(|| format!("Failed to write {}", module_path.display()))?;

    Ok(module_path)
}
