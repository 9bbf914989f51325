//! Owned RGBA raster in row-major layout, pixels stored as `[r, g, b, a]`.
use super::traits::{ImageView, ImageViewMut};

/// One RGBA sample, `[r, g, b, a]`.
pub type Rgba = [u8; 4];

/// Fully transparent black, used as the compact canvas background.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Owned, tightly packed RGBA raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterRgba {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<Rgba>,
}

impl RasterRgba {
    /// Fully transparent raster of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::from_pixel(w, h, TRANSPARENT)
    }

    pub fn from_pixel(w: usize, h: usize, px: Rgba) -> Self {
        Self {
            w,
            h,
            data: vec![px; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgba) {
        let i = self.idx(x, y);
        self.data[i] = px;
    }

    /// Paint an axis-aligned rectangle, clipped to the raster bounds.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, px: Rgba) {
        let x1 = (x + w).min(self.w);
        let y1 = (y + h).min(self.h);
        for yy in y.min(self.h)..y1 {
            let row = self.row_mut(yy);
            for dst in &mut row[x.min(x1)..x1] {
                *dst = px;
            }
        }
    }

    /// Copy out the intersection of `(x, y, w, h)` with the raster.
    ///
    /// Returns `None` when the intersection is empty.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> Option<RasterRgba> {
        let x1 = x.saturating_add(w).min(self.w);
        let y1 = y.saturating_add(h).min(self.h);
        if x >= x1 || y >= y1 {
            return None;
        }
        let mut data = Vec::with_capacity((x1 - x) * (y1 - y));
        for yy in y..y1 {
            data.extend_from_slice(&self.row(yy)[x..x1]);
        }
        Some(RasterRgba {
            w: x1 - x,
            h: y1 - y,
            data,
        })
    }

    /// Copy `src` into `self` with its top-left corner at `(x, y)`, clipping
    /// whatever falls outside.
    pub fn blit(&mut self, src: &RasterRgba, x: usize, y: usize) {
        if x >= self.w || y >= self.h {
            return;
        }
        let cols = src.w.min(self.w - x);
        let rows = src.h.min(self.h - y);
        for sy in 0..rows {
            let src_row = &src.row(sy)[..cols];
            self.row_mut(y + sy)[x..x + cols].copy_from_slice(src_row);
        }
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let raw: Vec<u8> = self.data.iter().flat_map(|px| px.iter().copied()).collect();
        image::RgbaImage::from_raw(self.w as u32, self.h as u32, raw)
            .unwrap_or_else(|| image::RgbaImage::new(self.w as u32, self.h as u32))
    }

    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let data = img.pixels().map(|p| p.0).collect();
        Self {
            w: img.width() as usize,
            h: img.height() as usize,
            data,
        }
    }

    /// Bilinear resample to `w × h`.
    pub fn resized(&self, w: usize, h: usize) -> RasterRgba {
        if w == self.w && h == self.h {
            return self.clone();
        }
        let resized = image::imageops::resize(
            &self.to_rgba_image(),
            w.max(1) as u32,
            h.max(1) as u32,
            image::imageops::FilterType::Triangle,
        );
        Self::from_rgba_image(&resized)
    }
}

impl ImageView for RasterRgba {
    type Pixel = Rgba;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgba] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for RasterRgba {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgba] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];

    #[test]
    fn crop_clips_to_bounds() {
        let mut img = RasterRgba::from_pixel(10, 8, [255, 255, 255, 255]);
        img.fill_rect(6, 4, 10, 10, RED);
        let crop = img.crop(5, 3, 20, 20).expect("non-empty intersection");
        assert_eq!((crop.w, crop.h), (5, 5));
        assert_eq!(crop.get(1, 1), RED);
        assert_eq!(crop.get(0, 0), [255, 255, 255, 255]);
        assert!(img.crop(10, 0, 4, 4).is_none());
    }

    #[test]
    fn blit_clips_source_overhang() {
        let mut canvas = RasterRgba::new(4, 4);
        let src = RasterRgba::from_pixel(3, 3, RED);
        canvas.blit(&src, 2, 2);
        assert_eq!(canvas.get(3, 3), RED);
        assert_eq!(canvas.get(1, 1), TRANSPARENT);
        assert_eq!(canvas.data.iter().filter(|&&p| p == RED).count(), 4);
    }

    #[test]
    fn rgba_image_conversion_preserves_pixels() {
        let mut img = RasterRgba::new(3, 2);
        img.set(2, 1, [1, 2, 3, 4]);
        let back = RasterRgba::from_rgba_image(&img.to_rgba_image());
        assert_eq!(back, img);
    }
}
