use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;

use crate::foundation::error::{ScrollError, ScrollResult};

/// Options for [`encode_frames`].
#[derive(Clone, Debug)]
pub struct EncodeOpts {
    /// Directory holding the numbered PNG frames.
    pub indir: PathBuf,
    /// Output video path. Defaults to `<indir>/rendered.mp4`.
    pub output: Option<PathBuf>,
    /// Frames per second; should match the value the frames were generated with.
    pub fps: u32,
    /// Common file name prefix of the frames, e.g. `render_`.
    pub prefix: String,
    /// Zero-padded digit count of the frame numbers.
    pub digits: u8,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl EncodeOpts {
    /// Defaults matching the frames a `Scroller` writes.
    pub fn new(indir: impl Into<PathBuf>) -> Self {
        Self {
            indir: indir.into(),
            output: None,
            fps: 30,
            prefix: String::new(),
            digits: 6,
            overwrite: true,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.indir.join("rendered.mp4"))
    }

    /// `ffmpeg` image-sequence pattern, e.g. `frames/%06d.png`.
    pub fn input_pattern(&self) -> PathBuf {
        self.indir
            .join(format!("{}%{:02}d.png", self.prefix, self.digits))
    }

    fn validate(&self) -> ScrollResult<()> {
        if self.fps == 0 {
            return Err(ScrollError::invalid_config("fps must be > 0"));
        }
        if self.digits == 0 {
            return Err(ScrollError::invalid_config("digits must be > 0"));
        }
        if !self.indir.exists() {
            return Err(ScrollError::SourceNotFound(self.indir.clone()));
        }
        if !self.indir.is_dir() {
            return Err(ScrollError::invalid_config(format!(
                "'{}' is not a directory",
                self.indir.display()
            )));
        }
        Ok(())
    }

    /// Arguments passed to `ffmpeg` (H.264, yuv420p, CRF 18, fast start).
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push(if self.overwrite { "-y" } else { "-n" }.into());
        args.extend(["-loglevel", "error", "-r"].map(OsString::from));
        args.push(self.fps.to_string().into());
        args.push("-i".into());
        args.push(self.input_pattern().into_os_string());
        args.extend(
            [
                "-c:v",
                "libx264",
                "-vf",
                "yadif,format=yuv420p",
                "-crf",
                "18",
                "-bf",
                "2",
                "-use_editlist",
                "0",
                "-movflags",
                "+faststart",
            ]
            .map(OsString::from),
        );
        args.push(self.output_path().into_os_string());
        args
    }
}

/// Encode the frames in `opts.indir` into an MP4 with the system `ffmpeg`.
///
/// Returns the path of the written video.
pub fn encode_frames(opts: &EncodeOpts) -> ScrollResult<PathBuf> {
    opts.validate()?;
    let out = opts.output_path();
    ensure_parent_dir(&out)?;
    if !opts.overwrite && out.exists() {
        return Err(ScrollError::invalid_config(format!(
            "output file '{}' already exists",
            out.display()
        )));
    }

    let operation = format!(
        "encoding '{}' to '{}'",
        opts.input_pattern().display(),
        out.display()
    );
    if !is_ffmpeg_on_path() {
        return Err(ScrollError::tool_unavailable(
            operation,
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    let args = opts.ffmpeg_args();
    tracing::info!(?args, "running ffmpeg");
    let output = Command::new("ffmpeg").args(&args).output().map_err(|e| {
        ScrollError::tool_unavailable(operation.clone(), format!("failed to spawn ffmpeg: {e}"))
    })?;
    if !output.status.success() {
        return Err(ScrollError::tool_failure(operation, &output));
    }
    Ok(out)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ScrollResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
