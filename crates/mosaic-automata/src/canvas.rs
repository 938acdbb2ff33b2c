//! Render pipeline: logical cells to physical pixels.

use mosaic_panel::PanelMapper;

use crate::{Display, Rgb};

/// A logical drawing surface over a display and a panel mapper.
///
/// Every write goes through [`PanelMapper::map`], so automata draw in
/// logical coordinates and never see the chain layout.
pub struct Canvas<'a, D: Display + ?Sized> {
    display: &'a mut D,
    mapper: &'a PanelMapper,
}

impl<'a, D: Display + ?Sized> Canvas<'a, D> {
    /// Borrow a display and a mapper for the duration of a frame.
    pub fn new(display: &'a mut D, mapper: &'a PanelMapper) -> Self {
        Self { display, mapper }
    }

    /// Logical width.
    pub fn width(&self) -> u16 {
        self.mapper.width()
    }

    /// Logical height.
    pub fn height(&self) -> u16 {
        self.mapper.height()
    }

    /// The mapper in use.
    pub fn mapper(&self) -> &PanelMapper {
        self.mapper
    }

    /// Write one logical pixel.
    #[inline]
    pub fn put(&mut self, x: u16, y: u16, color: Rgb) {
        let p = self.mapper.map(x, y);
        let packed = self.display.pack_color(color.r, color.g, color.b);
        self.display.set_pixel(p.x, p.y, packed);
    }

    /// Write one logical pixel, ignoring coordinates outside the canvas.
    pub fn put_clipped(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && x < self.width() as i32 && y < self.height() as i32 {
            self.put(x as u16, y as u16, color);
        }
    }

    /// Paint every logical pixel with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.draw_cells(|_, _| color);
    }

    /// Paint every logical pixel with the color computed for its cell.
    pub fn draw_cells<F>(&mut self, color_of: F)
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        self.draw_region(self.width() as usize, self.height() as usize, color_of);
    }

    /// Paint a `width × height` region anchored at the origin, clipped to the canvas.
    pub fn draw_region<F>(&mut self, width: usize, height: usize, mut color_of: F)
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let w = width.min(self.width() as usize);
        let h = height.min(self.height() as usize);
        for y in 0..h {
            for x in 0..w {
                let color = color_of(x, y);
                self.put(x as u16, y as u16, color);
            }
        }
    }

    /// Publish the frame.
    pub fn present(&mut self) {
        self.display.present();
    }
}
