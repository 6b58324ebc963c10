use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::process::{ToolError, run_tool, run_tool_streaming};

/// Extracts still frames from a video into `<project_root>/images`
///
/// Decoding itself happens in the external tools (ffmpeg, sharp-frames);
/// only argument assembly and exit checking live here.
pub struct FrameExtractor {
    project_root: PathBuf,
    output_dir: PathBuf,
}

impl FrameExtractor {
    pub fn new(project_root: &Path) -> Result<Self, ToolError> {
        let output_dir = project_root.join("images");
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Extract frames at a fixed rate
    ///
    /// # Returns
    /// * Count of `.jpg` frames in the output directory
    pub fn extract_all(&self, video: &Path, target_fps: u32) -> Result<usize, ToolError> {
        info!(
            "extracting frames from {} at {} fps",
            video.display(),
            target_fps
        );

        let mut cmd = Command::new("ffmpeg");
        cmd.args(ffmpeg_args(video, target_fps, &self.output_dir));
        run_tool(&mut cmd, "ffmpeg")?;

        let count = count_jpgs(&self.output_dir)?;
        info!("extracted {} frames to {}", count, self.output_dir.display());
        Ok(count)
    }

    /// Extract at a fixed rate, then drop blurred outliers with sharp-frames
    pub fn extract_outlier_filtered(
        &self,
        video: &Path,
        target_fps: u32,
        sensitivity: u32,
    ) -> Result<usize, ToolError> {
        info!(
            "extracting frames with outlier removal from {} at {} fps",
            video.display(),
            target_fps
        );

        let temp_dir = self.project_root.join("_temp_frames");
        fs::create_dir_all(&temp_dir)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.args(ffmpeg_args(video, target_fps, &temp_dir));
        run_tool(&mut cmd, "ffmpeg")?;
        info!(
            "extracted {} frames before outlier removal",
            count_jpgs(&temp_dir)?
        );

        let mut cmd = Command::new("sharp-frames");
        cmd.arg(&temp_dir)
            .arg(&self.output_dir)
            .args(["--selection-method", "outlier-removal"])
            .arg("--outlier-sensitivity")
            .arg(sensitivity.to_string());
        run_tool_streaming(&mut cmd, "sharp-frames")?;

        fs::remove_dir_all(&temp_dir)?;

        let count = count_jpgs(&self.output_dir)?;
        info!("outlier removal kept {} frames", count);
        Ok(count)
    }

    /// Keep the N sharpest frames, selected by sharp-frames
    pub fn sharp_best_n(
        &self,
        video: &Path,
        fps: u32,
        num_frames: usize,
    ) -> Result<usize, ToolError> {
        info!(
            "selecting {} sharpest frames from {}",
            num_frames,
            video.display()
        );

        let mut cmd = Command::new("sharp-frames");
        cmd.arg(video)
            .arg(&self.output_dir)
            .arg("--fps")
            .arg(fps.to_string())
            .arg("--num-frames")
            .arg(num_frames.to_string());
        run_tool(&mut cmd, "sharp-frames")?;

        let count = count_jpgs(&self.output_dir)?;
        info!("saved {} frames", count);
        Ok(count)
    }

    /// Keep the sharpest frame of each batch of consecutive frames
    pub fn sharp_batched(
        &self,
        video: &Path,
        batch_size: u32,
        batch_buffer: u32,
        fps: u32,
    ) -> Result<usize, ToolError> {
        info!(
            "batched sharp-frame selection (batch_size={}, batch_buffer={}, fps={})",
            batch_size, batch_buffer, fps
        );

        let mut cmd = Command::new("sharp-frames");
        cmd.arg(video)
            .arg(&self.output_dir)
            .args(["--selection-method", "batched"])
            .arg("--batch-size")
            .arg(batch_size.to_string())
            .arg("--batch-buffer")
            .arg(batch_buffer.to_string())
            .arg("--fps")
            .arg(fps.to_string());
        run_tool(&mut cmd, "sharp-frames")?;

        let count = count_jpgs(&self.output_dir)?;
        info!("saved {} frames", count);
        Ok(count)
    }
}

fn ffmpeg_args(video: &Path, target_fps: u32, dir: &Path) -> Vec<OsString> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        video.into(),
        "-vf".into(),
        format!("fps={target_fps}").into(),
        "-qscale:v".into(),
        "2".into(),
        dir.join("frame_%03d.jpg").into(),
    ]
}

fn count_jpgs(dir: &Path) -> Result<usize, ToolError> {
    let mut count = 0;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg"))
        {
            count += 1;
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffmpeg_args_set_rate_and_pattern() {
        let args = ffmpeg_args(Path::new("flight.mp4"), 7, Path::new("out"));

        assert!(args.contains(&OsString::from("fps=7")));
        assert_eq!(args.last().unwrap(), &OsString::from("out/frame_%03d.jpg"));
    }
}
