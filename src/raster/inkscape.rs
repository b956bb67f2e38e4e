use std::path::{Path, PathBuf};
use std::process::Command;

use crate::foundation::core::Rect;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::raster::{DimensionQuery, VectorRasterizer};

/// Rasterizer backed by the `inkscape` command-line tool (1.x syntax).
#[derive(Clone, Debug)]
pub struct Inkscape {
    program: PathBuf,
}

impl Default for Inkscape {
    fn default() -> Self {
        Self::with_program("inkscape")
    }
}

impl Inkscape {
    /// Use a specific `inkscape` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(&self, operation: &str, cmd: &mut Command) -> ScrollResult<std::process::Output> {
        tracing::debug!(program = %self.program.display(), ?cmd, "running inkscape");
        let output = cmd.output().map_err(|e| {
            ScrollError::tool_unavailable(
                operation,
                format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.program.display()
                ),
            )
        })?;
        if !output.status.success() {
            return Err(ScrollError::tool_failure(operation, &output));
        }
        Ok(output)
    }
}

impl VectorRasterizer for Inkscape {
    fn name(&self) -> &'static str {
        "inkscape"
    }

    fn export_area(&self, svg: &Path, rect: &Rect, out: &Path) -> ScrollResult<()> {
        let operation = format!(
            "exporting {rect} of '{}' to '{}'",
            svg.display(),
            out.display()
        );
        let mut cmd = Command::new(&self.program);
        cmd.arg("--export-area")
            .arg(rect.export_area_arg())
            .arg("-o")
            .arg(out)
            .arg(svg);

        if let Err(e) = self.run(&operation, &mut cmd) {
            let _ = std::fs::remove_file(out);
            return Err(e);
        }
        Ok(())
    }

    fn query(&self, svg: &Path, query: DimensionQuery) -> ScrollResult<f64> {
        let operation = format!("querying {query:?} of '{}'", svg.display());
        let mut cmd = Command::new(&self.program);
        cmd.arg(query.inkscape_flag()).arg(svg);
        let output = self.run(&operation, &mut cmd)?;
        parse_query_reply(&output.stdout, &output.stderr)
    }
}

/// Parse the single number `inkscape --query-*` prints.
pub(crate) fn parse_query_reply(stdout: &[u8], stderr: &[u8]) -> ScrollResult<f64> {
    let text = String::from_utf8_lossy(stdout);
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ScrollError::dimension_query(format!(
            "expected a number, got stdout {:?}, stderr {:?}",
            trimmed,
            String::from_utf8_lossy(stderr).trim()
        ))),
    }
}
