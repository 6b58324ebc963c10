use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::process::{ToolError, run_tool, run_tool_streaming};

/// OpenMVS densification over a COLMAP dense workspace
pub struct OpenMvsProject {
    dense_path: PathBuf,
    undistorted_images: PathBuf,
}

impl OpenMvsProject {
    pub fn new(project_path: &Path) -> Self {
        let dense_path = project_path.join("dense");
        let undistorted_images = dense_path.join("images");

        Self {
            dense_path,
            undistorted_images,
        }
    }

    /// Convert the COLMAP workspace into `scene.mvs`
    ///
    /// Runs from the dense folder, where InterfaceCOLMAP finds `sparse/`
    /// on its own. The image folder is passed absolute so the `.mvs` file
    /// stores absolute paths.
    pub fn interface_colmap(&self) -> Result<(), ToolError> {
        info!("running InterfaceCOLMAP");

        let images = fs::canonicalize(&self.undistorted_images)?;

        let mut cmd = Command::new("InterfaceCOLMAP");
        cmd.current_dir(&self.dense_path)
            .args(["-i", "."])
            .args(["-o", "scene.mvs"])
            .arg("--image-folder")
            .arg(images);
        run_tool(&mut cmd, "InterfaceCOLMAP")
    }

    /// Densify the point cloud, streaming tool progress to the console
    pub fn densify(&self) -> Result<(), ToolError> {
        info!("running DensifyPointCloud");

        let mut cmd = Command::new("DensifyPointCloud");
        cmd.current_dir(&self.dense_path)
            .args(["-i", "scene.mvs"])
            .args(["-w", "."])
            .args(["-v", "3"]);
        run_tool_streaming(&mut cmd, "DensifyPointCloud")
    }

    pub fn scene_file(&self) -> PathBuf {
        self.dense_path.join("scene.mvs")
    }
}
