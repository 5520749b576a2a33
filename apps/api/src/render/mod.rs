//! Document rendering: self-contained HTML in, PDF bytes out.
//!
//! Rendering is blocking work (process spawn, file IO, layout in the converter).
//! `DocumentRenderer::render` is therefore synchronous; async callers run it via
//! `tokio::task::spawn_blocking`.
//!
//! Markup is not validated here. Any converter failure is a `RenderError`.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

const INPUT_FILE: &str = "document.html";
const OUTPUT_FILE: &str = "document.pdf";
/// Stderr is included in errors, truncated to keep logs readable.
const MAX_STDERR_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("scratch directory IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to start converter '{bin}': {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Converter { status: String, stderr: String },

    #[error("converter produced no output")]
    EmptyOutput,

    #[error("render task aborted: {0}")]
    Aborted(String),
}

/// Converts a complete HTML document into PDF bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Renders by shelling out to an HTML→PDF converter (`weasyprint` by default).
///
/// Invocation: `<bin> [args...] <input.html> <output.pdf>`. Each call gets its
/// own scratch directory, removed on drop, so concurrent renders never share files.
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    bin: String,
    args: Vec<String>,
    scratch_root: Option<PathBuf>,
}

impl CommandPdfRenderer {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            args: Vec::new(),
            scratch_root: None,
        }
    }

    /// Arguments placed before the input/output paths.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Places scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    fn scratch_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("render-");
        match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }
}

impl DocumentRenderer for CommandPdfRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let scratch = self.scratch_dir()?;
        let input = scratch.path().join(INPUT_FILE);
        let output = scratch.path().join(OUTPUT_FILE);
        fs::write(&input, html)?;

        debug!("Rendering {} bytes of HTML with '{}'", html.len(), self.bin);

        let result = Command::new(&self.bin)
            .args(&self.args)
            .arg(&input)
            .arg(&output)
            .current_dir(scratch.path())
            .output()
            .map_err(|source| RenderError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        if !result.status.success() {
            let stderr: String = String::from_utf8_lossy(&result.stderr)
                .chars()
                .take(MAX_STDERR_CHARS)
                .collect();
            return Err(RenderError::Converter {
                status: result.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let pdf = match fs::read(&output) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::EmptyOutput)
            }
            Err(e) => return Err(RenderError::Io(e)),
        };
        if pdf.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        debug!("Rendered PDF of {} bytes", pdf.len());
        Ok(pdf)
    }
}
