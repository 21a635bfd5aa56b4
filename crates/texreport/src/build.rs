//! Writing the LaTeX project to disk and compiling it.
//!
//! For `folder = "out"` and `filename = "report"` a build produces:
//!
//! ```text
//! out/
//! ├── report.pdf              (when a compiler is given)
//! └── report_source/
//!     ├── report.tex
//!     ├── <theme>.cls
//!     ├── assets/...
//!     └── figures/...
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::error::{ReportError, Result};
use crate::render::RenderedReport;

/// Number of trailing compiler log lines kept in [`ReportError::Compile`].
const LOG_TAIL_LINES: usize = 20;

/// Where and how to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub folder: PathBuf,
    /// Base name of the `.tex` and `.pdf` files.
    pub filename: String,
    /// Compiler runs; two let references and the table of contents settle.
    pub passes: u8,
}

impl BuildOptions {
    pub fn new(folder: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            passes: 2,
        }
    }

    pub fn passes(mut self, passes: u8) -> Self {
        self.passes = passes;
        self
    }

    /// `<folder>/<filename>_source`
    pub fn source_dir(&self) -> PathBuf {
        self.folder.join(format!("{}_source", self.filename))
    }
}

/// What a build left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub source_dir: PathBuf,
    pub tex_path: PathBuf,
    pub class_path: PathBuf,
    /// Set when a compiler ran.
    pub pdf_path: Option<PathBuf>,
}

/// Turns a `.tex` file into a PDF next to it.
pub trait Compiler {
    /// Runs one pass over `tex_file` (a file name inside `source_dir`).
    fn compile(&self, source_dir: &Path, tex_file: &str) -> Result<()>;

    fn name(&self) -> &str;
}

/// A LaTeX engine run as a subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexCompiler {
    program: String,
    args: Vec<String>,
}

impl LatexCompiler {
    /// `pdflatex`, `xelatex`, `lualatex`, or any engine accepting the same flags.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
        }
    }

    pub fn pdflatex() -> Self {
        Self::new("pdflatex")
    }

    /// Appends an extra argument placed before the file name.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self::pdflatex()
    }
}

impl Compiler for LatexCompiler {
    fn compile(&self, source_dir: &Path, tex_file: &str) -> Result<()> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(tex_file)
            .current_dir(source_dir)
            .output()
            .map_err(|source| ReportError::CompilerUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = stdout.lines().collect();
        let log = lines[lines.len().saturating_sub(LOG_TAIL_LINES)..].join("\n");
        Err(ReportError::Compile {
            program: self.program.clone(),
            status: output.status,
            log,
        })
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Writes the sources and assets, then compiles if `compiler` is given.
///
/// Existing files in the source folder are replaced.
pub fn build(
    rendered: &RenderedReport,
    options: &BuildOptions,
    compiler: Option<&dyn Compiler>,
) -> Result<BuildOutput> {
    rendered.assets.verify()?;

    let source_dir = options.source_dir();
    fs::create_dir_all(&source_dir).map_err(|e| ReportError::io(&source_dir, e))?;

    let tex_name = format!("{}.tex", options.filename);
    let tex_path = source_dir.join(&tex_name);
    write_file(&tex_path, &rendered.document_source)?;

    let class_path = source_dir.join(format!("{}.cls", rendered.class_name));
    write_file(&class_path, &rendered.class_source)?;

    for copy in rendered.assets.copies() {
        let target = source_dir.join(&copy.target);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
        fs::copy(&copy.source, &target).map_err(|e| ReportError::io(&copy.source, e))?;
        debug!(source = %copy.source.display(), target = %copy.target, "copied asset");
    }

    let pdf_path = match compiler {
        Some(compiler) => {
            if rendered.uses_fontspec && is_pdflatex(compiler.name()) {
                warn!(
                    compiler = compiler.name(),
                    "theme loads font files with fontspec; use xelatex or lualatex"
                );
            }
            Some(compile(compiler, options, &source_dir, &tex_name)?)
        }
        None => None,
    };

    info!(
        source = %source_dir.display(),
        pdf = ?pdf_path.as_ref().map(|p| p.display().to_string()),
        "report built"
    );

    Ok(BuildOutput {
        source_dir,
        tex_path,
        class_path,
        pdf_path,
    })
}

fn compile(
    compiler: &dyn Compiler,
    options: &BuildOptions,
    source_dir: &Path,
    tex_name: &str,
) -> Result<PathBuf> {
    for pass in 1..=options.passes.max(1) {
        debug!(compiler = compiler.name(), pass, "compiling");
        compiler.compile(source_dir, tex_name)?;
    }

    let built = source_dir.join(format!("{}.pdf", options.filename));
    let pdf_path = options.folder.join(format!("{}.pdf", options.filename));
    if pdf_path.exists() {
        fs::remove_file(&pdf_path).map_err(|e| ReportError::io(&pdf_path, e))?;
    }
    fs::rename(&built, &pdf_path).map_err(|e| ReportError::io(&built, e))?;
    Ok(pdf_path)
}

/// pdfLaTeX cannot load `fontspec`.
fn is_pdflatex(program: &str) -> bool {
    Path::new(program)
        .file_stem()
        .is_some_and(|stem| stem == "pdflatex")
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| ReportError::io(path, e))
}
