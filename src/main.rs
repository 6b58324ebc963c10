use std::path::PathBuf;

use videoscan::{CameraConfig, ColmapProject, FrameExtractor, OpenMvsProject};

const OUTLIER_SENSITIVITY: u32 = 85;
const MAX_UNDISTORT_SIZE: u32 = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let Some(video) = args.get(1).map(PathBuf::from) else {
        eprintln!("usage: videoscan <video> [project-dir] [fps]");
        std::process::exit(2);
    };

    let project = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("scan_project"));
    let fps: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);

    println!("videoscan reconstruction");
    println!("========================");
    println!("Video:   {}", video.display());
    println!("Project: {}", project.display());
    println!("FPS:     {}", fps);
    println!();

    let extractor = FrameExtractor::new(&project)?;
    extractor.extract_outlier_filtered(&video, fps, OUTLIER_SENSITIVITY)?;

    let colmap = ColmapProject::new(&project)?;
    colmap.extract_features(&CameraConfig::default())?;
    colmap.match_features()?;
    colmap.sparse_reconstruct()?;
    colmap.undistort_images(MAX_UNDISTORT_SIZE)?;

    let mvs = OpenMvsProject::new(&project);
    mvs.interface_colmap()?;
    mvs.densify()?;

    println!();
    println!("Done. Dense scene at {}", mvs.scene_file().display());

    Ok(())
}
