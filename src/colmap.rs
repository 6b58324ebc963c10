use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::process::{ToolError, run_tool};

/// Camera settings for COLMAP feature extraction
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub model: String,
    /// Treat all frames as one physical camera
    pub single_camera: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            model: "SIMPLE_RADIAL".to_string(),
            single_camera: true,
        }
    }
}

/// COLMAP workspace layout and step runners
///
/// The project directory owns `database.db`, `images/`, `sparse/` and
/// `dense/`. `images/` is created by the frame extractor; only `sparse/`
/// is created here.
pub struct ColmapProject {
    database_path: PathBuf,
    images_path: PathBuf,
    sparse_path: PathBuf,
    dense_path: PathBuf,
}

impl ColmapProject {
    pub fn new(project_path: &Path) -> Result<Self, ToolError> {
        let sparse_path = project_path.join("sparse");
        fs::create_dir_all(&sparse_path)?;

        Ok(Self {
            database_path: project_path.join("database.db"),
            images_path: project_path.join("images"),
            sparse_path,
            dense_path: project_path.join("dense"),
        })
    }

    /// Detect image features into `database.db`
    pub fn extract_features(&self, camera: &CameraConfig) -> Result<(), ToolError> {
        info!("extracting features");

        let mut cmd = Command::new("colmap");
        cmd.args(self.feature_extractor_args(camera));
        run_tool(&mut cmd, "colmap feature_extractor")
    }

    fn feature_extractor_args(&self, camera: &CameraConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "feature_extractor".into(),
            "--database_path".into(),
            self.database_path.clone().into(),
            "--image_path".into(),
            self.images_path.clone().into(),
            "--ImageReader.camera_model".into(),
            camera.model.clone().into(),
        ];

        if camera.single_camera {
            args.push("--ImageReader.single_camera".into());
            args.push("1".into());
        }

        args
    }

    /// Match features sequentially, suited to ordered video frames
    pub fn match_features(&self) -> Result<(), ToolError> {
        info!("matching features");

        let mut cmd = Command::new("colmap");
        cmd.arg("sequential_matcher")
            .arg("--database_path")
            .arg(&self.database_path);
        run_tool(&mut cmd, "colmap sequential_matcher")
    }

    /// Triangulate the sparse model into `sparse/`
    pub fn sparse_reconstruct(&self) -> Result<(), ToolError> {
        info!("running sparse reconstruction");

        let mut cmd = Command::new("colmap");
        cmd.arg("mapper")
            .arg("--database_path")
            .arg(&self.database_path)
            .arg("--image_path")
            .arg(&self.images_path)
            .arg("--output_path")
            .arg(&self.sparse_path);
        run_tool(&mut cmd, "colmap mapper")
    }

    /// Undistort images into `dense/`, preparing dense reconstruction
    pub fn undistort_images(&self, max_image_size: u32) -> Result<(), ToolError> {
        info!("undistorting images");

        let mut cmd = Command::new("colmap");
        cmd.arg("image_undistorter")
            .arg("--image_path")
            .arg(&self.images_path)
            .arg("--input_path")
            .arg(self.sparse_path.join("0"))
            .arg("--output_path")
            .arg(&self.dense_path)
            .args(["--output_type", "COLMAP"])
            .arg("--max_image_size")
            .arg(max_image_size.to_string());
        run_tool(&mut cmd, "colmap image_undistorter")
    }

    pub fn dense_path(&self) -> &Path {
        &self.dense_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ColmapProject {
        ColmapProject {
            database_path: PathBuf::from("p/database.db"),
            images_path: PathBuf::from("p/images"),
            sparse_path: PathBuf::from("p/sparse"),
            dense_path: PathBuf::from("p/dense"),
        }
    }

    #[test]
    fn test_feature_extractor_args_single_camera() {
        let args = project().feature_extractor_args(&CameraConfig::default());

        assert!(args.contains(&OsString::from("SIMPLE_RADIAL")));
        assert!(args.contains(&OsString::from("--ImageReader.single_camera")));
    }

    #[test]
    fn test_feature_extractor_args_multi_camera() {
        let camera = CameraConfig {
            model: "PINHOLE".to_string(),
            single_camera: false,
        };
        let args = project().feature_extractor_args(&camera);

        assert!(args.contains(&OsString::from("PINHOLE")));
        assert!(!args.contains(&OsString::from("--ImageReader.single_camera")));
    }
}
