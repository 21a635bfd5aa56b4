//! Building the source folder with a stand-in compiler.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use texreport::style::StyleValue;
use texreport::{
    build, BuildOptions, Compiler, Figure, Metadata, Report, ReportError, ReportRenderer, Theme,
};

/// Writes a fake PDF and counts how often it ran.
struct FakeCompiler {
    runs: Cell<u8>,
}

impl FakeCompiler {
    fn new() -> Self {
        Self { runs: Cell::new(0) }
    }
}

impl Compiler for FakeCompiler {
    fn compile(&self, source_dir: &Path, tex_file: &str) -> texreport::Result<()> {
        self.runs.set(self.runs.get() + 1);
        assert!(source_dir.join(tex_file).is_file());
        let pdf = source_dir.join(tex_file.replace(".tex", ".pdf"));
        fs::write(pdf, format!("pdf after {} passes", self.runs.get())).unwrap();
        Ok(())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FailingCompiler;

impl Compiler for FailingCompiler {
    fn compile(&self, _source_dir: &Path, _tex_file: &str) -> texreport::Result<()> {
        Err(ReportError::MissingResource {
            path: "epflreport.cls".into(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn sample(dir: &Path) -> texreport::RenderedReport {
    let figure = dir.join("plot.png");
    let logo = dir.join("logo.png");
    fs::write(&figure, "png").unwrap();
    fs::write(&logo, "png").unwrap();

    let theme = Theme::builtin()
        .named("lab")
        .add("titlepage.logo", StyleValue::asset(&logo));
    let mut report = Report::new(Metadata::new("Report").author("A. Author"));
    report.chapter("Results");
    report.figure(Figure::new(&figure)).unwrap();

    ReportRenderer::new(theme).unwrap().render(&report).unwrap()
}

#[test]
fn writes_sources_and_assets_without_compiler() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = sample(dir.path());
    let out = dir.path().join("out");

    let output = build(&rendered, &BuildOptions::new(&out, "miblab_report"), None).unwrap();

    let source = out.join("miblab_report_source");
    assert_eq!(output.source_dir, source);
    assert_eq!(output.tex_path, source.join("miblab_report.tex"));
    assert_eq!(output.class_path, source.join("lab.cls"));
    assert!(output.pdf_path.is_none());

    assert_eq!(
        fs::read_to_string(&output.tex_path).unwrap(),
        rendered.document_source
    );
    assert_eq!(
        fs::read_to_string(&output.class_path).unwrap(),
        rendered.class_source
    );
    assert!(source.join("assets/titlepage-logo.png").is_file());
    assert!(source.join("figures/01-plot.png").is_file());
}

#[test]
fn compiles_configured_passes_and_moves_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = sample(dir.path());
    let out = dir.path().join("out");
    let compiler = FakeCompiler::new();

    let output = build(
        &rendered,
        &BuildOptions::new(&out, "report").passes(3),
        Some(&compiler),
    )
    .unwrap();

    assert_eq!(compiler.runs.get(), 3);
    let pdf = out.join("report.pdf");
    assert_eq!(output.pdf_path.as_deref(), Some(pdf.as_path()));
    assert_eq!(fs::read_to_string(&pdf).unwrap(), "pdf after 3 passes");
    assert!(!out.join("report_source/report.pdf").exists());
}

#[test]
fn rebuild_replaces_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = sample(dir.path());
    let out = dir.path().join("out");
    let options = BuildOptions::new(&out, "report");

    build(&rendered, &options, Some(&FakeCompiler::new())).unwrap();
    fs::write(out.join("report_source/report.tex"), "stale").unwrap();
    build(&rendered, &options, Some(&FakeCompiler::new())).unwrap();

    assert_eq!(
        fs::read_to_string(out.join("report_source/report.tex")).unwrap(),
        rendered.document_source
    );
    assert_eq!(
        fs::read_to_string(out.join("report.pdf")).unwrap(),
        "pdf after 2 passes"
    );
}

#[test]
fn compiler_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = sample(dir.path());
    let result = build(
        &rendered,
        &BuildOptions::new(dir.path().join("out"), "report"),
        Some(&FailingCompiler),
    );
    assert!(result.is_err());
}

#[test]
fn asset_removed_after_render_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = sample(dir.path());
    fs::remove_file(dir.path().join("logo.png")).unwrap();

    let err = build(
        &rendered,
        &BuildOptions::new(dir.path().join("out"), "report"),
        None,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("missing resource: {}", dir.path().join("logo.png").display())
    );
    assert!(!dir.path().join("out").exists());
}

#[test]
fn builds_from_configuration_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("plot.png"), "png").unwrap();
    fs::write(dir.path().join("data.csv"), "a,b\n1,2\n").unwrap();
    fs::write(
        dir.path().join("theme.yaml"),
        "name: miblab\nattributes:\n  color.title: 00AA00\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("report.yaml"),
        "theme: theme.yaml\n\
         output:\n  folder: build\n  filename: annual\n\
         metadata:\n  title: Annual Report\n  author: A. Author\n\
         content:\n\
         \x20 - chapter: Results\n\
         \x20 - figure: { path: plot.png, caption: A plot }\n\
         \x20 - table: { source: data.csv }\n",
    )
    .unwrap();

    let config = texreport::ReportConfig::load(dir.path().join("report.yaml")).unwrap();
    let report = config.to_report().unwrap();
    let rendered = ReportRenderer::new(config.theme().unwrap())
        .unwrap()
        .render(&report)
        .unwrap();
    let output = build(&rendered, &config.build_options(), None).unwrap();

    let source = dir.path().join("build/annual_source");
    assert_eq!(output.tex_path, source.join("annual.tex"));
    assert_eq!(output.class_path, source.join("miblab.cls"));
    assert!(source.join("figures/01-plot.png").is_file());
    assert!(rendered.class_source.contains("{00AA00}"));
    assert!(rendered.document_source.contains("\\documentclass{miblab}"));
}
