//! Borrowed 3-channel 8-bit image view.
//!
//! Screenshots arrive either in RGB order or in the BGR order produced by
//! most capture/decoding stacks. The view keeps the storage order and
//! exposes [`ImageRgb8::rgb`] for order-independent access.
use super::traits::ImageView;
use super::u8::GrayImageU8;
use serde::{Deserialize, Serialize};

/// Storage order of the three channels of each pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

#[derive(Clone, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // pixels between rows
    pub order: ChannelOrder,
    pub data: &'a [[u8; 3]],
}

impl<'a> ImageRgb8<'a> {
    /// Tightly packed view over `w * h` pixels. `data` must hold at least
    /// `w * h` pixels.
    pub fn new(w: usize, h: usize, order: ChannelOrder, data: &'a [[u8; 3]]) -> Self {
        debug_assert!(data.len() >= w * h, "buffer holds {} of {} pixels", data.len(), w * h);
        Self {
            w,
            h,
            stride: w,
            order,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.data[y * self.stride + x]
    }

    /// Pixel at `(x, y)` reordered to RGB.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        to_rgb(self.get(x, y), self.order)
    }

    /// Sum of the three channels at `(x, y)`, or `None` outside the image.
    pub fn channel_sum(&self, x: usize, y: usize) -> Option<u32> {
        self.pixel(x, y)
            .map(|[a, b, c]| u32::from(a) + u32::from(b) + u32::from(c))
    }

    /// Luma conversion with the ITU-R BT.601 weights.
    pub fn to_gray(&self) -> GrayImageU8 {
        let mut data = Vec::with_capacity(self.w * self.h);
        for row in self.rows() {
            data.extend(row.iter().map(|&px| {
                let [r, g, b] = to_rgb(px, self.order);
                let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
                luma.round().clamp(0.0, 255.0) as u8
            }));
        }
        GrayImageU8::new(self.w, self.h, data)
    }
}

#[inline]
pub(crate) fn to_rgb(px: [u8; 3], order: ChannelOrder) -> [u8; 3] {
    match order {
        ChannelOrder::Rgb => px,
        ChannelOrder::Bgr => [px[2], px[1], px[0]],
    }
}

impl<'a> ImageView for ImageRgb8<'a> {
    type Pixel = [u8; 3];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[[u8; 3]] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_pixels_are_reordered() {
        let data = vec![[10u8, 20, 30]];
        let img = ImageRgb8::new(1, 1, ChannelOrder::Bgr, &data);
        assert_eq!(img.rgb(0, 0), [30, 20, 10]);
        assert_eq!(img.channel_sum(0, 0), Some(60));
        assert_eq!(img.channel_sum(1, 0), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "buffer holds 3 of 4 pixels")]
    fn short_buffer_is_rejected() {
        let data = vec![[0u8; 3]; 3];
        let _ = ImageRgb8::new(2, 2, ChannelOrder::Rgb, &data);
    }

    #[test]
    fn gray_conversion_uses_luma_weights() {
        let data = vec![[255u8, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
        let img = ImageRgb8::new(2, 2, ChannelOrder::Rgb, &data);
        let gray = img.to_gray();
        assert_eq!(gray.data(), &[76, 150, 29, 255]);
    }
}
