//! Frame Sources
//!
//! Video demuxing is an external collaborator: the monitor consumes frames
//! through this narrow seam. The shipped implementation walks a directory
//! of pre-extracted frame images in filename order, with a caller-supplied
//! capture FPS.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Frame, MonitorError, StreamInfo};
use crate::logic::vision::ImageInput;

/// A sequential, forward-only frame stream.
///
/// Implementations release any decoding resource on drop; the monitor
/// additionally drops the source on every exit path, including error and
/// cancellation.
pub trait FrameSource {
    /// Stream metadata, reported once at monitor start
    fn info(&self) -> StreamInfo;

    /// Next frame in temporal order, None at end of stream
    fn next_frame(&mut self) -> Option<Frame>;
}

// ============================================================================
// FRAME DIRECTORY SOURCE
// ============================================================================

/// Frame extensions accepted by the directory source
const FRAME_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Frame stream over a directory of extracted frame images
pub struct FrameDirSource {
    frames: Vec<PathBuf>,
    cursor: usize,
    fps: f32,
    path: PathBuf,
}

impl FrameDirSource {
    /// Open a frame directory. Fails immediately (no partial processing)
    /// when the directory is missing or holds no frame images.
    pub fn open(path: impl AsRef<Path>, fps: f32) -> Result<Self, MonitorError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(MonitorError::SourceNotFound {
                path: path.display().to_string(),
            });
        }

        let entries = fs::read_dir(&path).map_err(|e| MonitorError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(MonitorError::OpenFailed {
                path: path.display().to_string(),
                message: "no frame images found".to_string(),
            });
        }

        let fps = if fps > 0.0 { fps } else { crate::constants::DEFAULT_FALLBACK_FPS };

        Ok(Self {
            frames,
            cursor: 0,
            fps,
            path,
        })
    }
}

impl FrameSource for FrameDirSource {
    fn info(&self) -> StreamInfo {
        let frame_count = self.frames.len() as u64;
        StreamInfo {
            fps: self.fps,
            frame_count,
            duration_secs: frame_count as f32 / self.fps,
        }
    }

    fn next_frame(&mut self) -> Option<Frame> {
        let path = self.frames.get(self.cursor)?.clone();
        let index = self.cursor as u64;
        self.cursor += 1;
        Some(Frame {
            index,
            input: ImageInput::Path(path),
        })
    }
}

impl Drop for FrameDirSource {
    fn drop(&mut self) {
        log::debug!("Frame source released: {}", self.path.display());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"frame").unwrap();
    }

    #[test]
    fn test_missing_dir_fails_to_open() {
        match FrameDirSource::open("/no/such/frames", 25.0) {
            Err(MonitorError::SourceNotFound { .. }) => {}
            other => panic!("Expected SourceNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_empty_dir_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        assert!(FrameDirSource::open(dir.path(), 25.0).is_err());
    }

    #[test]
    fn test_frames_come_out_in_filename_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "frame-0002.jpg");
        touch(dir.path(), "frame-0001.jpg");
        touch(dir.path(), "frame-0003.png");

        let mut source = FrameDirSource::open(dir.path(), 10.0).unwrap();

        let info = source.info();
        assert_eq!(info.frame_count, 3);
        assert!((info.duration_secs - 0.3).abs() < 1e-6);

        let first = source.next_frame().unwrap();
        assert_eq!(first.index, 0);
        assert!(first.input.source_ref().ends_with("frame-0001.jpg"));

        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn test_zero_fps_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "f.jpg");
        let source = FrameDirSource::open(dir.path(), 0.0).unwrap();
        assert_eq!(source.info().fps, crate::constants::DEFAULT_FALLBACK_FPS);
    }
}
