use anchor_grid::config::grid::{self, OutputFormat};
use anchor_grid::image::io::{load_rgb_image, write_json_file, RgbFrame};
use anchor_grid::{AnchorGridDetector, CellPatch, DetectionReport};
use image::RgbImage;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "grid_demo".to_string());
    let config = grid::parse_cli(&program)?;

    let frame = load_rgb_image(&config.input_path)?.with_order(config.channel_order);
    let image = frame.as_view();
    log::info!(
        "Loaded {} ({}x{}), {} candidates",
        config.input_path.display(),
        frame.width(),
        frame.height(),
        config.candidates.len()
    );

    let detector = AnchorGridDetector::new(config.detector.clone());
    let detailed = detector.process_with_diagnostics(&image, &config.candidates);

    if config.output.format.includes_text() {
        print_text_summary(&detailed);
    }

    if config.output.format.includes_json() {
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &detailed)?;
            if config.output.format.includes_text() {
                println!("\nJSON report written to {}", path.display());
            } else {
                println!("JSON report written to {}", path.display());
            }
        } else {
            let json = serde_json::to_string_pretty(&detailed)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if config.output.format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &frame, &detector, &detailed)?;
        if config.output.format.includes_text() {
            println!("Debug artifacts written to {}", dir.display());
        } else {
            eprintln!("Debug artifacts written to {}", dir.display());
        }
    }

    Ok(())
}

fn print_text_summary(detailed: &DetectionReport) {
    let res = &detailed.grid;
    println!("Detection summary");
    println!("  found: {}", res.found);
    println!("  anchors_used: {}", res.anchors_used);
    println!("  latency_ms: {:.3}", res.latency_ms);
    println!(
        "  top_left: ({:.2}, {:.2}) width={:.2}",
        res.top_left.x, res.top_left.y, res.top_left.width
    );
    println!(
        "  bottom_right: ({:.2}, {:.2}) width={:.2}",
        res.bottom_right.x, res.bottom_right.y, res.bottom_right.width
    );
    println!(
        "  lattice: {} rows x {} cols, cell={}",
        res.grid.n_rows(),
        res.grid.n_cols(),
        res.grid
            .cell_width()
            .map(|w| format!("{w}px"))
            .unwrap_or_else(|| "-".to_string())
    );

    let trace = &detailed.trace;
    let b = &trace.input.borders;
    println!(
        "\nInput: {}x{} candidates={} borders=[top {:.3} bottom {:.3} left {:.3} right {:.3}]",
        trace.input.width,
        trace.input.height,
        trace.input.candidates,
        b.top,
        b.bottom,
        b.left,
        b.right
    );

    let a = &trace.anchors;
    println!(
        "Anchors: accepted={}/{} degenerate={} aspect={} size={} bounds={} brightness={}",
        a.accepted,
        a.candidates,
        a.rejected_degenerate,
        a.rejected_aspect,
        a.rejected_size,
        a.rejected_out_of_bounds,
        a.rejected_brightness
    );

    let agg = &trace.aggregation;
    println!(
        "Aggregation: fallback={} used={} skipped={}",
        agg.fallback, agg.anchors_used, agg.anchors_skipped
    );

    let stages = trace
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect::<Vec<_>>()
        .join(" ");
    println!("\nTimings (ms): {stages} total={:.3}", trace.timings.total_ms);
}

fn save_debug_artifacts(
    dir: &Path,
    frame: &RgbFrame,
    detector: &AnchorGridDetector,
    detailed: &DetectionReport,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create debug dir {}: {e}", dir.display()))?;

    write_json_file(&dir.join("detection_report.json"), detailed)?;
    write_json_file(&dir.join("anchors.json"), &detailed.trace.anchors)?;

    let patches = detector.sample_grid(&frame.as_view(), &detailed.grid.grid);
    for (row, cells) in patches.iter().enumerate() {
        for (col, patch) in cells.iter().enumerate() {
            let path = dir.join(format!("cell_r{row:02}_c{col:02}.png"));
            save_patch(patch, &path)?;
        }
    }

    Ok(())
}

fn save_patch(patch: &CellPatch, path: &Path) -> Result<(), String> {
    if patch.is_empty() {
        return Ok(());
    }
    let raw = patch.pixels.iter().flatten().copied().collect::<Vec<u8>>();
    let img = RgbImage::from_raw(patch.size, patch.size, raw)
        .ok_or_else(|| format!("Patch buffer does not match {}x{}", patch.size, patch.size))?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}
