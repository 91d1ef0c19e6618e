//! Destinations for rendered frames.
//!
//! Video encoding is delegated to the system `ffmpeg` binary: [`FfmpegEncoder`]
//! spawns it and streams raw RGB frames to its standard input. If the binary
//! cannot be found, opening the encoder fails with
//! [`EncodeError::BackendNotFound`]; there is no fallback format.

use std::{
    io::{ self, Write },
    path::{ Path, PathBuf },
    process::{ Child, ChildStdin, Command, Stdio },
};
use image::RgbImage;
use log::debug;
use crate::error::EncodeError;

pub type EncodeResult<T> = Result<T, EncodeError>;

/// Default output frame rate.
pub const DEF_FPS: u32 = 60;

/// Default encoder program.
pub const DEF_ENCODER: &str = "ffmpeg";

/// Something that accepts a sequence of equally sized frames.
pub trait FrameSink {
    /// Append a frame.
    fn push(&mut self, frame: &RgbImage) -> EncodeResult<()>;

    /// Flush all frames and release resources. No frames may be pushed after
    /// this is called.
    fn finish(&mut self) -> EncodeResult<()>;
}

/// Settings for [`FfmpegEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Encoder program, looked up on `PATH` if not a path.
    pub program: String,
    /// Output file; the container is inferred from the extension.
    pub output: PathBuf,
    /// Frames per second.
    pub fps: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl EncodeConfig {
    /// Arguments passed to the encoder program.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-y".into(),
            "-loglevel".into(), "error".into(),
            "-f".into(), "rawvideo".into(),
            "-pix_fmt".into(), "rgb24".into(),
            "-s".into(), format!("{}x{}", self.width, self.height),
            "-framerate".into(), self.fps.to_string(),
            "-i".into(), "-".into(),
            "-an".into(),
            "-c:v".into(), "libx264".into(),
            "-pix_fmt".into(), "yuv420p".into(),
            self.output.to_string_lossy().into_owned(),
        ]
    }
}

/// Pipes raw RGB frames into a child `ffmpeg` process.
#[derive(Debug)]
pub struct FfmpegEncoder {
    config: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    frames: usize,
}

impl FfmpegEncoder {
    /// Spawn the encoder.
    pub fn spawn(config: EncodeConfig) -> EncodeResult<Self> {
        let mut child
            = Command::new(&config.program)
            .args(config.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound
                    => EncodeError::BackendNotFound(config.program.clone()),
                _ => EncodeError::Io(err),
            })?;
        let stdin = child.stdin.take();
        debug!("spawned {} {}", config.program, config.args().join(" "));
        Ok(Self { config, child: Some(child), stdin, frames: 0 })
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> usize { self.frames }

    pub fn config(&self) -> &EncodeConfig { &self.config }
}

impl FrameSink for FfmpegEncoder {
    fn push(&mut self, frame: &RgbImage) -> EncodeResult<()> {
        let (w, h) = frame.dimensions();
        if (w, h) != (self.config.width, self.config.height) {
            return Err(EncodeError::FrameSize(
                w, h, self.config.width, self.config.height));
        }
        let stdin = self.stdin.as_mut().ok_or(EncodeError::Finished)?;
        stdin.write_all(frame.as_raw())?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> EncodeResult<()> {
        // closing stdin signals end of stream
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else { return Ok(()); };
        let status = child.wait()?;
        if status.success() {
            debug!(
                "encoder finished: {} frames to {}",
                self.frames,
                self.config.output.display(),
            );
            Ok(())
        } else {
            Err(EncodeError::BackendFailed(status.to_string()))
        }
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            child.wait().ok();
        }
    }
}

/// Writes each frame as a numbered PNG file in a directory.
#[derive(Clone, Debug)]
pub struct PngSequence {
    dir: PathBuf,
    frames: usize,
    finished: bool,
}

impl PngSequence {
    /// Create the output directory if needed.
    pub fn create<P>(dir: P) -> EncodeResult<Self>
    where P: AsRef<Path>
    {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, frames: 0, finished: false })
    }

    /// Path of the `k`-th frame.
    pub fn frame_path(&self, k: usize) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", k))
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> usize { self.frames }
}

impl FrameSink for PngSequence {
    fn push(&mut self, frame: &RgbImage) -> EncodeResult<()> {
        if self.finished { return Err(EncodeError::Finished); }
        frame.save(self.frame_path(self.frames))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> EncodeResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn config(program: &str) -> EncodeConfig {
        EncodeConfig {
            program: program.into(),
            output: PathBuf::from("out.mp4"),
            fps: 60,
            width: 40,
            height: 20,
        }
    }

    #[test]
    fn encoder_arguments() {
        let args = config("ffmpeg").args();
        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("-s") + 1], "40x20");
        assert_eq!(args[pos("-framerate") + 1], "60");
        assert_eq!(args[pos("-f") + 1], "rawvideo");
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn missing_backend_is_fatal() {
        let res = FfmpegEncoder::spawn(config("definitely-not-an-encoder-3f9a1c"));
        assert!(matches!(res, Err(EncodeError::BackendNotFound(_))));
    }

    #[test]
    fn png_sequence() {
        let dir = std::env::temp_dir()
            .join(format!("hydrogen-png-sequence-{}", std::process::id()));
        let mut sink = PngSequence::create(&dir).unwrap();
        let frame = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        sink.push(&frame).unwrap();
        sink.push(&frame).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.frames(), 2);
        assert!(sink.frame_path(1).exists());
        assert!(matches!(sink.push(&frame), Err(EncodeError::Finished)));
        let back = image::open(sink.frame_path(0)).unwrap().to_rgb8();
        assert_eq!(back, frame);
        std::fs::remove_dir_all(&dir).ok();
    }
}
