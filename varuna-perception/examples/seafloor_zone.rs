//! Zone extraction demo on a synthetic seafloor scene.
//!
//! This example demonstrates:
//! - Filtering a noisy sonar point cloud
//! - Building a synthetic occupancy grid around the vehicle
//! - Extracting and applying the cleared zone
//! - Exporting the result as an SVG visualization
//!
//! # Usage
//!
//! ```bash
//! cargo run --example seafloor_zone
//! ```
//!
//! The output SVG will be saved to the `output/` directory.

use std::path::Path;

use varuna_perception::io::SvgRenderer;
use varuna_perception::preprocessing::{remove_outliers, PreprocessingConfig};
use varuna_perception::{
    CellState, GridCoord, OccupancyGrid, PointCloud, Pose2D, VarunaConfig, ZoneExtractor,
};

/// Simulated sonar sweep: a dense arc of wall returns plus a few
/// scattered multipath ghosts.
fn synthetic_sonar_cloud() -> PointCloud {
    let mut cloud = PointCloud::new();
    for i in 0..240 {
        let angle = i as f32 * 0.01 - 1.2;
        let range = 12.0 + 0.05 * (i as f32 * 0.7).sin();
        cloud.push(range * angle.cos(), range * angle.sin(), -2.0, 0.8);
    }
    // Multipath ghosts well off the wall arc
    cloud.push(45.0, -30.0, -2.0, 0.1);
    cloud.push(-38.0, 52.0, -1.5, 0.1);
    cloud.push(60.0, 61.0, -3.0, 0.1);
    cloud
}

/// Occupancy grid the external builder would produce for this scene:
/// a harbor wall ahead, a pillar to port, everything else unknown.
fn synthetic_grid(config: &VarunaConfig) -> OccupancyGrid {
    let mut grid = config
        .grid
        .to_grid()
        .expect("default grid configuration is valid");

    let center = GridCoord::new(grid.width() as i32 / 2, grid.height() as i32 / 2);
    grid.fill_rect(
        center + GridCoord::new(35, -60),
        center + GridCoord::new(40, 60),
        CellState::Occupied,
    );
    grid.fill_rect(
        center + GridCoord::new(-25, 20),
        center + GridCoord::new(-18, 27),
        CellState::Occupied,
    );
    grid
}

fn main() {
    env_logger::init();

    let config = VarunaConfig::default();

    // 1. Point-cloud preprocessing
    let raw = synthetic_sonar_cloud();
    let filter = PreprocessingConfig::new().with_mean_k(10).with_std_dev_mul(1.0);
    let filtered = remove_outliers(&raw, &filter);
    println!(
        "preprocessing: {} raw points -> {} after outlier removal",
        raw.len(),
        filtered.len()
    );

    // 2. Zone extraction
    let mut grid = synthetic_grid(&config);
    let pose = Pose2D::new(0.0, 0.0, 0.0);

    let extractor: ZoneExtractor = config
        .zone_extractor()
        .expect("default zone configuration is valid");
    let result = extractor
        .extract(&mut grid, pose)
        .expect("extraction on a valid grid cannot fail");

    let counts = grid.count_by_state();
    println!(
        "zone extraction: {} polygon vertices, {} cells cleared",
        result.polygon.len(),
        result.cells_cleared
    );
    println!(
        "grid: {} unoccupied / {} occupied / {} unknown",
        counts.unoccupied, counts.occupied, counts.unknown
    );

    // 3. SVG audit output
    let output_dir = Path::new("output");
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        eprintln!("failed to create output directory: {}", e);
        return;
    }

    let svg_path = output_dir.join("seafloor_zone.svg");
    let renderer = SvgRenderer::new(&grid)
        .with_zone(&result.polygon)
        .with_vehicle(grid.vehicle_cell(pose))
        .with_title("seafloor zone extraction");

    match renderer.save(&svg_path) {
        Ok(()) => println!("saved {}", svg_path.display()),
        Err(e) => eprintln!("failed to save SVG: {}", e),
    }
}
