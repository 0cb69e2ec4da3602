use super::regions::{HudRegion, PixelWindow};
use crate::image::{GrayImageU8, ImageU8, ImageView, ImageViewMut};
use crate::types::ImageDims;
use log::debug;
use serde::Serialize;

/// Pixels at or below this level are zeroed before inversion.
const TEXT_THRESHOLD: u8 = 127;

/// Upgrade banners read "Woche <n>" in the German localisation the readouts
/// were tuned on.
pub const UPGRADE_PREFIX: &str = "Woche";
const GAME_OVER_TEXT: &str = "Game Over";

/// Text recognition backend for prepared HUD crops.
///
/// Implemented for any `FnMut(HudRegion, &GrayImageU8) -> Result<String, String>`.
pub trait TextReader {
    fn read_text(&mut self, region: HudRegion, patch: &GrayImageU8) -> Result<String, String>;
}

impl<F> TextReader for F
where
    F: FnMut(HudRegion, &GrayImageU8) -> Result<String, String>,
{
    fn read_text(&mut self, region: HudRegion, patch: &GrayImageU8) -> Result<String, String> {
        self(region, patch)
    }
}

/// What the frame currently shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FrameStatus {
    Playing,
    GameOver,
    Upgrade { banner: String },
}

/// Crop `window` and turn light-on-dark HUD text into dark-on-light:
/// threshold-to-zero at 127, then invert.
pub fn prepare_for_text(gray: &ImageU8<'_>, window: &PixelWindow) -> GrayImageU8 {
    let mut patch = gray.crop(window.x0, window.y0, window.x1, window.y1);
    for y in 0..patch.height() {
        for v in patch.row_mut(y) {
            let kept = if *v > TEXT_THRESHOLD { *v } else { 0 };
            *v = 255 - kept;
        }
    }
    patch
}

/// Reads HUD regions of one grayscale frame.
pub struct HudReader<'a> {
    gray: ImageU8<'a>,
}

impl<'a> HudReader<'a> {
    pub fn new(gray: ImageU8<'a>) -> Self {
        Self { gray }
    }

    pub fn dims(&self) -> ImageDims {
        ImageDims::new(self.gray.w, self.gray.h)
    }

    /// Recognised text of `region` with line and form feeds removed.
    pub fn read<R: TextReader + ?Sized>(
        &self,
        region: HudRegion,
        reader: &mut R,
    ) -> Result<String, String> {
        let window = region.window(self.dims());
        let patch = prepare_for_text(&self.gray, &window);
        let raw = reader
            .read_text(region, &patch)
            .map_err(|e| format!("Failed to read {region:?} text: {e}"))?;
        let text: String = raw.chars().filter(|c| !matches!(*c, '\n' | '\x0c')).collect();
        debug!("HudReader::read region={:?} text={:?}", region, text);
        Ok(text)
    }

    /// Game-over banner first, then the upgrade banner; otherwise playing.
    pub fn status<R: TextReader + ?Sized>(&self, reader: &mut R) -> Result<FrameStatus, String> {
        let game_over = self.read(HudRegion::GameOver, reader)?;
        if game_over == GAME_OVER_TEXT {
            return Ok(FrameStatus::GameOver);
        }
        let upgrade = self.read(HudRegion::Upgrade, reader)?;
        if upgrade.starts_with(UPGRADE_PREFIX) {
            return Ok(FrameStatus::Upgrade { banner: upgrade });
        }
        Ok(FrameStatus::Playing)
    }
}
