//! Boundary to the physical display driver.
//!
//! The engine only ever needs four things from a driver: where to write a
//! pixel, when to publish the frame, its size, and how it packs colors.

/// A color in the driver's native packed format.
pub type PackedColor = u16;

/// Pack 8-bit channels into RGB565.
#[inline]
pub const fn pack_rgb565(r: u8, g: u8, b: u8) -> PackedColor {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Expand RGB565 back to 8-bit channels (low bits replicated).
#[inline]
pub const fn unpack_rgb565(color: PackedColor) -> (u8, u8, u8) {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

/// A pixel sink with an off-screen buffer.
pub trait Display {
    /// Physical width in pixels.
    fn width(&self) -> u16;

    /// Physical height in pixels.
    fn height(&self) -> u16;

    /// Write one pixel into the off-screen buffer.
    fn set_pixel(&mut self, x: u16, y: u16, color: PackedColor);

    /// Publish the off-screen buffer.
    fn present(&mut self);

    /// Convert 8-bit channels to the driver's packed format.
    fn pack_color(&self, r: u8, g: u8, b: u8) -> PackedColor {
        pack_rgb565(r, g, b)
    }
}

/// Headless double-buffered display held in memory.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    back: Vec<PackedColor>,
    front: Vec<PackedColor>,
    presents: u64,
}

impl FrameBuffer {
    /// Create a black frame buffer.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![0; len],
            front: vec![0; len],
            presents: 0,
        }
    }

    /// Published pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u16, y: u16) -> Option<PackedColor> {
        self.offset(x, y).map(|i| self.front[i])
    }

    /// Pixel in the off-screen buffer.
    pub fn back_pixel(&self, x: u16, y: u16) -> Option<PackedColor> {
        self.offset(x, y).map(|i| self.back[i])
    }

    /// The published frame, row-major.
    pub fn front(&self) -> &[PackedColor] {
        &self.front
    }

    /// Number of frames presented so far.
    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Number of non-black pixels in the published frame.
    pub fn lit_pixels(&self) -> usize {
        self.front.iter().filter(|&&c| c != 0).count()
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl Display for FrameBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn set_pixel(&mut self, x: u16, y: u16, color: PackedColor) {
        // Off-buffer writes are dropped, as on the panel hardware.
        if let Some(i) = self.offset(x, y) {
            self.back[i] = color;
        }
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.presents += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb565_known_values() {
        assert_eq!(pack_rgb565(0, 0, 0), 0x0000);
        assert_eq!(pack_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(pack_rgb565(255, 0, 0), 0xF800);
        assert_eq!(pack_rgb565(0, 255, 0), 0x07E0);
        assert_eq!(pack_rgb565(0, 0, 255), 0x001F);
        assert_eq!(pack_rgb565(255, 255, 0), 0xFFE0);
    }

    #[test]
    fn rgb565_unpack_saturates() {
        assert_eq!(unpack_rgb565(0xFFFF), (255, 255, 255));
        assert_eq!(unpack_rgb565(0xF800), (255, 0, 0));
        assert_eq!(unpack_rgb565(0), (0, 0, 0));
    }

    #[test]
    fn present_publishes_back_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_pixel(1, 2, 0xABCD);
        assert_eq!(fb.pixel(1, 2), Some(0));
        assert_eq!(fb.back_pixel(1, 2), Some(0xABCD));

        fb.present();
        assert_eq!(fb.pixel(1, 2), Some(0xABCD));
        assert_eq!(fb.presents(), 1);
        assert_eq!(fb.lit_pixels(), 1);
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(5, 0, 0xFFFF);
        fb.present();
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(fb.pixel(5, 0), None);
    }
}
