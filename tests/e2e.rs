mod common;

use anchor_grid::config::grid::load_config;
use anchor_grid::detector::{FramePart, FrameReader};
use anchor_grid::grid::{BorderSettings, Settings, FALLBACK_CELL};
use anchor_grid::hud::HudRegion;
use anchor_grid::image::io::write_json_file;
use anchor_grid::image::{ChannelOrder, GrayImageU8, ImageRgb8};
use anchor_grid::sampler::Interpolation;
use anchor_grid::{AnchorGridDetector, BoundingRect, DetectorParams, GridCell};
use common::synthetic_image::{draw_upside_down, frame_with_houses, lattice_houses};
use nalgebra::Vector2;

const W: usize = 1000;
const H: usize = 800;
const BACKGROUND: [u8; 3] = [100, 100, 100];

fn params() -> DetectorParams {
    DetectorParams {
        cell: Settings {
            offset: Vector2::new(0.1, 0.1),
            scale: Vector2::new(0.8, 0.8),
        },
        borders: Some(BorderSettings {
            top: 0.05,
            bottom: 0.1,
            left: 0.03,
            right: 0.03,
        }),
        ..Default::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn regular_houses_recover_the_lattice() {
    common::init_logging();
    let mut rects = lattice_houses(&[2, 7, 12], &[3, 8]);
    let mut data = frame_with_houses(W, H, BACKGROUND, &rects);
    // Square blob: wrong aspect. Dark-roofed house: not lit from the top.
    let blob = BoundingRect::new(800, 100, 40, 40);
    let upside_down = BoundingRect::new(800, 600, 60, 50);
    draw_upside_down(&mut data, W, &upside_down);
    rects.push(blob);
    rects.push(upside_down);

    let image = ImageRgb8::new(W, H, ChannelOrder::Bgr, &data);
    let detector = AnchorGridDetector::new(params());
    let report = detector.process_with_diagnostics(&image, &rects);

    let res = &report.grid;
    assert!(res.found);
    assert_eq!(res.anchors_used, 6);
    assert!(close(res.top_left.x, 54.0) && close(res.top_left.y, 60.0));
    assert!(close(res.top_left.width, 48.0));
    assert!(close(res.bottom_right.x, 918.0) && close(res.bottom_right.y, 636.0));

    assert_eq!(res.grid.n_rows(), 13);
    assert_eq!(res.grid.n_cols(), 19);
    assert_eq!(res.grid.cell_width(), Some(48));
    assert_eq!(res.grid.get(0, 0), Some(&GridCell { x: 54, y: 60, width: 48 }));
    assert_eq!(
        res.grid.get(12, 18),
        Some(&GridCell {
            x: 918,
            y: 636,
            width: 48
        })
    );
    assert_eq!(res.grid.locate(160, 210), Some((3, 2)));

    let anchors = &report.trace.anchors;
    assert_eq!(anchors.candidates, 8);
    assert_eq!(anchors.accepted, 6);
    assert_eq!(anchors.rejected_aspect, 1);
    assert_eq!(anchors.rejected_brightness, 1);
    assert!(!report.trace.aggregation.fallback);
    assert_eq!(report.trace.aggregation.anchors_skipped, 0);
}

#[test]
fn lattice_at_the_image_origin_is_found() {
    common::init_logging();
    // Sample cells land on (48 i, 48 j); with no borders the top-left cell is (0, 0).
    let rects: Vec<BoundingRect> = [(2, 3), (7, 3), (12, 8)]
        .iter()
        .map(|&(i, j)| BoundingRect::new(6 + 48 * i, 5 + 48 * j, 60, 50))
        .collect();
    let data = frame_with_houses(W, H, BACKGROUND, &rects);
    let image = ImageRgb8::new(W, H, ChannelOrder::Rgb, &data);
    let detector = AnchorGridDetector::new(DetectorParams {
        borders: Some(BorderSettings {
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
        }),
        ..params()
    });
    let report = detector.process_with_diagnostics(&image, &rects);

    assert_eq!(report.trace.anchors.accepted, 3);
    assert_eq!(report.trace.aggregation.anchors_skipped, 0);
    assert!(!report.trace.aggregation.fallback);
    let res = &report.grid;
    assert!(res.found);
    assert_eq!(res.anchors_used, 3);
    assert_eq!((res.top_left.x, res.top_left.y), (0.0, 0.0));
    assert!(close(res.bottom_right.x, 912.0) && close(res.bottom_right.y, 720.0));
    assert_eq!(res.grid.get(0, 0), Some(&GridCell { x: 0, y: 0, width: 48 }));
    assert_eq!(res.grid.n_rows(), 16);
    assert_eq!(res.grid.n_cols(), 20);
}

#[test]
fn frame_without_houses_falls_back() {
    common::init_logging();
    let data = vec![BACKGROUND; W * H];
    let image = ImageRgb8::new(W, H, ChannelOrder::Rgb, &data);
    let detector = AnchorGridDetector::new(params());
    let rects = [BoundingRect::new(300, 300, 60, 50)];
    let res = detector.process(&image, &rects);

    assert!(!res.found);
    assert_eq!(res.anchors_used, 0);
    assert_eq!(res.top_left, FALLBACK_CELL);
    assert_eq!(res.bottom_right, FALLBACK_CELL);
    assert_eq!(res.grid.len(), 1);
    assert_eq!(res.grid.get(0, 0), Some(&GridCell { x: 1, y: 1, width: 10 }));
}

#[test]
fn background_cells_sample_as_rgb() {
    let rects = lattice_houses(&[4], &[4]);
    // Stored as BGR: the sampler must hand out [200, 100, 10].
    let data = frame_with_houses(W, H, [10, 100, 200], &rects);
    let image = ImageRgb8::new(W, H, ChannelOrder::Bgr, &data);
    let detector = AnchorGridDetector::new(params());
    let res = detector.process(&image, &rects);
    assert!(res.found);

    let corner = res.grid.get(0, 0).expect("corner cell");
    let patch = detector.sample_cell(&image, corner);
    assert_eq!(patch.size, 64);
    assert_eq!(patch.interpolation, Interpolation::Linear);
    assert!(!patch.is_truncated(corner));
    let expected = [200i16, 100, 10];
    assert!(patch
        .pixels
        .iter()
        .all(|p| p.iter().zip(expected).all(|(&v, e)| (i16::from(v) - e).abs() <= 1)));

    let patches = detector.sample_grid(&image, &res.grid);
    assert_eq!(patches.len(), res.grid.n_rows());
    assert!(patches.iter().all(|row| row.len() == res.grid.n_cols()));
}

#[test]
fn frame_reader_returns_counters_and_sampled_grid() {
    let rects = lattice_houses(&[2, 7, 12], &[3, 8]);
    let data = frame_with_houses(W, H, BACKGROUND, &rects);
    let image = ImageRgb8::new(W, H, ChannelOrder::Bgr, &data);

    let mut regions = Vec::new();
    let text = |region: HudRegion, _: &GrayImageU8| -> Result<String, String> {
        regions.push(region);
        Ok(match region {
            HudRegion::Rides => "3\n".to_string(),
            _ => String::new(),
        })
    };
    let mut reader = FrameReader::new(AnchorGridDetector::new(params()), text)
        .with_parts(&[FramePart::Grid, FramePart::Rides]);
    let report = reader.read(&image, &rects).expect("frame report");

    assert_eq!(report.rides.as_deref(), Some("3"));
    let grid = report.grid.expect("sampled grid");
    assert_eq!(grid.len(), 13);
    assert_eq!(grid[0].len(), 19);
    assert_eq!((grid[0][0].x, grid[0][0].y), (54, 60));
    drop(reader);
    assert_eq!(
        regions,
        vec![HudRegion::GameOver, HudRegion::Upgrade, HudRegion::Rides]
    );
}

#[test]
fn config_file_drives_the_detector() {
    let dir = std::env::temp_dir().join(format!("anchor_grid_e2e_{}", std::process::id()));
    let path = dir.join("config.json");
    let raw = serde_json::json!({
        "input_path": "frame.png",
        "candidates": [{ "x": 156, "y": 209, "width": 60, "height": 50 }],
        "output": { "format": "json" },
        "detector": {
            "cell": { "offset": [0.1, 0.1], "scale": [0.8, 0.8] },
            "borders": { "top": 0.05, "bottom": 0.1, "left": 0.03, "right": 0.03 }
        }
    });
    write_json_file(&path, &raw).expect("write config");
    let config = load_config(&path).expect("load config");
    let _ = std::fs::remove_dir_all(&dir);

    let data = frame_with_houses(W, H, BACKGROUND, &config.candidates);
    let image = ImageRgb8::new(W, H, config.channel_order, &data);
    let detector = AnchorGridDetector::new(config.detector.clone());
    let res = detector.process(&image, &config.candidates);
    assert!(res.found);
    assert_eq!(res.grid.n_rows(), 13);
    assert_eq!(res.grid.n_cols(), 19);
}
