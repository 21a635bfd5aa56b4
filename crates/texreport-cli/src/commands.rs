//! Subcommand handlers.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde_json::{json, Map, Value};
use texreport::style::{AttrValue, StyleValue};
use texreport::{build as build_report, Compiler, ReportConfig, ReportRenderer, Theme};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::cli::{BuildArgs, CheckArgs, ThemeArgs};

pub fn build(args: &BuildArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(out) = &args.out {
        config.output.folder = out.clone();
    }
    if let Some(name) = &args.name {
        config.output.filename = name.clone();
    }
    if let Some(program) = &args.compiler {
        config.compiler.program = program.clone();
    }

    let report = config
        .to_report()
        .with_context(|| format!("assembling {}", args.config.display()))?;
    let theme = config.theme().context("loading theme")?;
    debug!(theme = theme.name(), "rendering");
    let rendered = ReportRenderer::new(theme)?.render(&report)?;

    let latex = config.compiler.compiler();
    let compiler: Option<&dyn Compiler> = if args.no_compile {
        None
    } else {
        Some(&latex)
    };
    let output = build_report(&rendered, &config.build_options(), compiler)?;

    println!(
        "{} sources in {}",
        style("wrote").green().bold(),
        output.source_dir.display()
    );
    if let Some(pdf) = &output.pdf_path {
        println!("{} {}", style("built").green().bold(), pdf.display());
    }
    Ok(())
}

/// Renders in memory so every referenced file and template is checked.
pub fn check(args: &CheckArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let report = config.to_report()?;
    let theme = config.theme().context("loading theme")?;
    let rendered = ReportRenderer::new(theme)?.render(&report)?;
    rendered.assets.verify()?;

    println!(
        "{} {} ({} blocks, {} assets)",
        style("ok").green().bold(),
        args.config.display(),
        report.blocks().len(),
        rendered.assets.copies().len()
    );
    Ok(())
}

pub fn theme(args: &ThemeArgs) -> Result<()> {
    let theme = match &args.theme {
        Some(path) => {
            Theme::load(path).with_context(|| format!("loading theme {}", path.display()))?
        }
        None => Theme::builtin(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&theme_json(&theme)?)?);
    } else {
        print!("{}", theme_table(&theme)?);
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<ReportConfig> {
    ReportConfig::load(path).with_context(|| format!("reading {}", path.display()))
}

fn display_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Text(text) => text.clone(),
        AttrValue::Asset(path) => format!("asset {}", path.display()),
    }
}

/// One attribute per line, values aligned, aliases annotated with their target.
fn theme_table(theme: &Theme) -> Result<String> {
    let resolved = theme.styles().resolved()?;
    let width = resolved.keys().map(|name| name.width()).max().unwrap_or(0);

    let mut out = format!(
        "{} {}\n",
        style("theme").bold(),
        style(theme.name()).cyan()
    );
    for (name, value) in &resolved {
        let pad = " ".repeat(width - name.width());
        let mut line = format!("  {}{}  {}", name, pad, display_value(value));
        if let Some(StyleValue::Alias(target)) = theme.styles().get(name) {
            line.push_str(&format!(" {}", style(format!("(= {})", target)).dim()));
        }
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn theme_json(theme: &Theme) -> Result<Value> {
    let attributes: Map<String, Value> = theme
        .styles()
        .resolved()?
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                AttrValue::Text(text) => Value::String(text),
                AttrValue::Asset(path) => json!({ "asset": path.display().to_string() }),
            };
            (name, value)
        })
        .collect();

    Ok(json!({
        "name": theme.name(),
        "templates": theme.templates().names().collect::<Vec<_>>(),
        "attributes": attributes,
    }))
}
