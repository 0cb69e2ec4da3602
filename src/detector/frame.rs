//! Whole-frame reading.
//!
//! Checks the HUD banners first: while a game-over or upgrade banner covers
//! the board nothing else is read. Otherwise the selected parts are
//! extracted: the sampled grid and the rides / day / roads counters.
use super::pipeline::AnchorGridDetector;
use crate::hud::{FrameStatus, HudReader, HudRegion, TextReader};
use crate::image::ImageRgb8;
use crate::types::BoundingRect;
use log::debug;
use serde::{Deserialize, Serialize};

/// Parts of a frame that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FramePart {
    Grid,
    Rides,
    Day,
    Roads,
}

impl FramePart {
    pub const ALL: [FramePart; 4] = [
        FramePart::Grid,
        FramePart::Rides,
        FramePart::Day,
        FramePart::Roads,
    ];

    fn hud_region(self) -> Option<HudRegion> {
        match self {
            FramePart::Grid => None,
            FramePart::Rides => Some(HudRegion::Rides),
            FramePart::Day => Some(HudRegion::Day),
            FramePart::Roads => Some(HudRegion::Roads),
        }
    }
}

/// One lattice cell with its resized RGB patch, rows of pixels.
#[derive(Clone, Debug, Serialize)]
pub struct SampledCell {
    pub x: i32,
    pub y: i32,
    pub pixels: Vec<Vec<[u8; 3]>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub status: FrameStatus,
    pub grid: Option<Vec<Vec<SampledCell>>>,
    pub rides: Option<String>,
    pub day: Option<String>,
    pub roads: Option<String>,
}

impl FrameReport {
    fn banner(status: FrameStatus) -> Self {
        Self {
            status,
            grid: None,
            rides: None,
            day: None,
            roads: None,
        }
    }
}

pub struct FrameReader<R> {
    detector: AnchorGridDetector,
    text: R,
    parts: Vec<FramePart>,
}

impl<R: TextReader> FrameReader<R> {
    /// Reader extracting every part.
    pub fn new(detector: AnchorGridDetector, text: R) -> Self {
        Self {
            detector,
            text,
            parts: FramePart::ALL.to_vec(),
        }
    }

    pub fn with_parts(mut self, parts: &[FramePart]) -> Self {
        self.parts = parts.to_vec();
        self
    }

    pub fn detector(&self) -> &AnchorGridDetector {
        &self.detector
    }

    pub fn read(
        &mut self,
        image: &ImageRgb8<'_>,
        rects: &[BoundingRect],
    ) -> Result<FrameReport, String> {
        let gray = image.to_gray();
        let hud = HudReader::new(gray.as_view());

        let status = hud.status(&mut self.text)?;
        if status != FrameStatus::Playing {
            debug!("FrameReader::read banner visible: {:?}", status);
            return Ok(FrameReport::banner(status));
        }

        let mut report = FrameReport::banner(status);
        if self.parts.contains(&FramePart::Grid) {
            report.grid = Some(self.sampled_grid(image, rects));
        }
        for part in &self.parts {
            let Some(region) = part.hud_region() else {
                continue;
            };
            let text = hud.read(region, &mut self.text)?;
            match part {
                FramePart::Rides => report.rides = Some(text),
                FramePart::Day => report.day = Some(text),
                FramePart::Roads => report.roads = Some(text),
                FramePart::Grid => {}
            }
        }
        Ok(report)
    }

    fn sampled_grid(
        &self,
        image: &ImageRgb8<'_>,
        rects: &[BoundingRect],
    ) -> Vec<Vec<SampledCell>> {
        let result = self.detector.process(image, rects);
        result
            .grid
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        let patch = self.detector.sample_cell(image, cell);
                        SampledCell {
                            x: cell.x,
                            y: cell.y,
                            pixels: patch.rows().map(<[[u8; 3]]>::to_vec).collect(),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectorParams;
    use crate::image::{ChannelOrder, GrayImageU8};

    fn reader_for(
        banner: &'static str,
    ) -> impl FnMut(HudRegion, &GrayImageU8) -> Result<String, String> {
        move |region: HudRegion, _: &GrayImageU8| {
            Ok(match region {
                HudRegion::GameOver => banner.to_string(),
                HudRegion::Rides => "4".to_string(),
                HudRegion::Day => "MO".to_string(),
                HudRegion::Roads => "17\n".to_string(),
                HudRegion::Upgrade => String::new(),
            })
        }
    }

    fn frame() -> Vec<[u8; 3]> {
        vec![[40u8; 3]; 640 * 480]
    }

    #[test]
    fn playing_frame_reads_selected_parts() {
        let data = frame();
        let image = ImageRgb8::new(640, 480, ChannelOrder::Bgr, &data);
        let detector = AnchorGridDetector::new(DetectorParams::default());
        let mut reader = FrameReader::new(detector, reader_for(""))
            .with_parts(&[FramePart::Grid, FramePart::Roads]);
        let report = reader.read(&image, &[]).expect("report");
        assert_eq!(report.status, FrameStatus::Playing);
        assert_eq!(report.roads.as_deref(), Some("17"));
        assert_eq!(report.rides, None);
        assert_eq!(report.day, None);
        let grid = report.grid.expect("grid");
        assert_eq!(grid.len(), 1);
        assert_eq!((grid[0][0].x, grid[0][0].y), (1, 1));
        assert_eq!(grid[0][0].pixels.len(), 64);
        assert_eq!(grid[0][0].pixels[0].len(), 64);
    }

    #[test]
    fn game_over_short_circuits() {
        let data = frame();
        let image = ImageRgb8::new(640, 480, ChannelOrder::Bgr, &data);
        let detector = AnchorGridDetector::new(DetectorParams::default());
        let mut reader = FrameReader::new(detector, reader_for("Game Over"));
        let report = reader.read(&image, &[]).expect("report");
        assert_eq!(report.status, FrameStatus::GameOver);
        assert!(report.grid.is_none() && report.rides.is_none());
    }

    #[test]
    fn report_serializes_with_lowercase_keys() {
        let data = frame();
        let image = ImageRgb8::new(640, 480, ChannelOrder::Bgr, &data);
        let detector = AnchorGridDetector::new(DetectorParams::default());
        let mut reader =
            FrameReader::new(detector, reader_for("")).with_parts(&[FramePart::Day]);
        let report = reader.read(&image, &[]).expect("report");
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["day"], "MO");
        assert!(json["grid"].is_null());
        assert_eq!(json["status"]["kind"], "playing");
    }
}
