//! 8-bit grayscale images: a borrowed view and an owned buffer.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Copy the window `[x0, x1) × [y0, y1)` clipped to the image bounds.
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> GrayImageU8 {
        let x1 = x1.min(self.w);
        let y1 = y1.min(self.h);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        let width = x1 - x0;
        let height = y1 - y0;
        let mut data = Vec::with_capacity(width * height);
        for y in y0..y1 {
            data.extend_from_slice(&self.row(y)[x0..x1]);
        }
        GrayImageU8::new(width, height, data)
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

/// Owned 8-bit grayscale buffer, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.width
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_clips_to_bounds() {
        let data: Vec<u8> = (0..16).collect();
        let view = ImageU8 {
            w: 4,
            h: 4,
            stride: 4,
            data: &data,
        };
        let patch = view.crop(2, 1, 10, 3);
        assert_eq!(patch.width(), 2);
        assert_eq!(patch.height(), 2);
        assert_eq!(patch.data(), &[6, 7, 10, 11]);
    }

    #[test]
    fn crop_outside_is_empty() {
        let data = vec![0u8; 9];
        let view = ImageU8 {
            w: 3,
            h: 3,
            stride: 3,
            data: &data,
        };
        assert!(view.crop(5, 5, 8, 8).is_empty());
    }
}
