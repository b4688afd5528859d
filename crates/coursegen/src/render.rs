// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Render one top-level template against the resolved course data.
//!
//! Each call builds its own Tera instance: course filters, then every file
//! of the templates directory as a partial (`{% include "schedule" %}` for
//! `templates/schedule.html`), then the page template itself. Nothing is
//! shared between calls.
//!
//! With `autoescape` on (the default) every `{{ }}` expression is HTML
//! escaped by Tera, which also rewrites `/` as `&#x2F;`. A URL printed as
//! plain text therefore comes out as `https:&#x2F;&#x2F;...`; browsers decode
//! it, but non-HTML output does not. Pass links through `maybeLink`, or set
//! `autoescape: false` in `coursegen.yaml` for text pages.

use crate::config::Layout;
use crate::error::{PathContext, Result};
use crate::helpers::register_helpers;
use crate::resolve::{CourseData, resolve};
use indexmap::IndexMap;
use std::path::Path;
use tera::{Context, Tera};

/// Render `input` to `output` using the default layout under the current
/// directory.
pub fn render(input: &Path, output: &Path) -> Result<()> {
    render_with(&Layout::default().resolve(Path::new(".")), input, output)
}

/// Render `input` to `output`, reading data and partials from `layout`
/// (already resolved against its root). The output file is replaced whole,
/// and only once everything before it succeeded.
pub fn render_with(layout: &Layout, input: &Path, output: &Path) -> Result<()> {
    let mut tera = build_engine(layout)?;

    let name = template_name(input);
    let source = std::fs::read_to_string(input).at(input)?;
    tera.add_raw_template(&name, &source)?;

    let data = resolve(layout)?;
    let rendered = render_document(&tera, &name, &data)?;

    std::fs::write(output, &rendered).at(output)?;

    let bytes = rendered.len();
    let path = output.display().to_string();
    diagnostics::log_info!("Wrote {bytes} bytes to {path}", bytes: bytes, path: path);
    Ok(())
}

/// A fresh engine with the course filters and partials registered.
pub fn build_engine(layout: &Layout) -> Result<Tera> {
    let mut tera = Tera::default();
    // An empty suffix matches every template name.
    tera.autoescape_on(if layout.autoescape { vec![""] } else { vec![] });
    register_helpers(&mut tera);
    tera.add_raw_templates(load_partials(&layout.templates_dir)?)?;
    Ok(tera)
}

/// Every regular file in `dir`, keyed by file stem. A later file with the
/// same stem replaces an earlier one.
pub fn load_partials(dir: &Path) -> Result<IndexMap<String, String>> {
    let mut partials = IndexMap::new();

    for entry in std::fs::read_dir(dir).at(dir)? {
        let path = entry.at(dir)?.path();
        if !path.is_file() {
            let skipped = path.display().to_string();
            diagnostics::log_warn!("Skipping non-file {skipped} in templates directory", skipped: skipped);
            continue;
        }

        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let contents = std::fs::read_to_string(&path).at(&path)?;

        let replaced = partials.insert(name.clone(), contents).is_some();
        diagnostics::log_debug!(
            "Registered partial {name} (replaced: {replaced})",
            name: name,
            replaced: replaced
        );
    }

    Ok(partials)
}

/// Apply a compiled template to the resolved data.
pub fn render_document(tera: &Tera, name: &str, data: &CourseData) -> Result<String> {
    let document = serde_json::to_value(data.document())?;

    if diagnostics::enabled(diagnostics::emit::Level::Debug) {
        let dump = serde_json::to_string_pretty(&document)?;
        diagnostics::log_debug!("Template context: {dump}", dump: dump);
    }

    let context = Context::from_value(document)?;
    Ok(tera.render(name, &context)?)
}

/// Register the page under its file name, which cannot clash with a
/// partial's extension-less name unless the page has no extension.
fn template_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}
