//! Colors and palettes.

/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const MAGENTA: Self = Self::new(255, 0, 255);

    /// Create a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level.
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Convert HSV (all components in 0..=1, hue wraps) to RGB.
    pub fn hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        let sector = h.floor();
        let f = h - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Fully saturated color at full brightness.
    pub fn hue(hue: f32) -> Self {
        Self::hsv(hue, 1.0, 1.0)
    }

    /// Relative luminance (Rec. 709 weights), 0..=255.
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32
    }

    /// Scale every channel by `factor` (clamped to 0..=1).
    pub fn scale(&self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self::new(
            channel(self.r as f32 / 255.0 * f),
            channel(self.g as f32 / 255.0 * f),
            channel(self.b as f32 / 255.0 * f),
        )
    }

    /// Linear blend: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

#[inline]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Palette families for multi-state automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PaletteScheme {
    /// Evenly spaced hues
    Rainbow,
    /// Black through red and yellow to white
    Fire,
    /// Deep blue through cyan to white
    Ocean,
    /// Black to white
    Grayscale,
    /// Red, green and blue repeated
    Triad,
}

impl PaletteScheme {
    pub const ALL: [Self; 5] = [Self::Rainbow, Self::Fire, Self::Ocean, Self::Grayscale, Self::Triad];

    /// One color per state.
    pub fn generate(&self, states: usize) -> Vec<Rgb> {
        let span = states.saturating_sub(1).max(1) as f32;
        (0..states)
            .map(|i| {
                let t = i as f32 / span;
                match self {
                    Self::Rainbow => Rgb::hue(i as f32 / states as f32),
                    Self::Fire => Rgb::new(
                        channel(t * 4.0),
                        channel((t - 0.25) * 4.0),
                        channel((t - 0.5) * 4.0),
                    ),
                    Self::Ocean => Rgb::new(
                        channel((t - 0.5) * 2.0),
                        channel(t * 2.0),
                        channel(0.5 + t * 0.5),
                    ),
                    Self::Grayscale => Rgb::gray(channel(t)),
                    Self::Triad => [Rgb::RED, Rgb::GREEN, Rgb::BLUE][i % 3],
                }
            })
            .collect()
    }

    /// Lowercase name for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rainbow => "rainbow",
            Self::Fire => "fire",
            Self::Ocean => "ocean",
            Self::Grayscale => "grayscale",
            Self::Triad => "triad",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primaries() {
        assert_eq!(Rgb::hue(0.0), Rgb::RED);
        assert_eq!(Rgb::hue(1.0 / 3.0), Rgb::GREEN);
        assert_eq!(Rgb::hue(2.0 / 3.0), Rgb::BLUE);
        assert_eq!(Rgb::hue(1.0), Rgb::RED);
        assert_eq!(Rgb::hsv(0.3, 0.0, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::hsv(0.3, 1.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn luminance_orders_gray() {
        assert!(Rgb::WHITE.luminance() > Rgb::gray(128).luminance());
        assert!(Rgb::gray(128).luminance() > Rgb::BLACK.luminance());
        assert!(Rgb::GREEN.luminance() > Rgb::BLUE.luminance());
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(210, 120, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(110, 70, 15));
    }

    #[test]
    fn palettes_have_one_color_per_state() {
        for scheme in PaletteScheme::ALL {
            for states in [1, 2, 3, 16, 31] {
                assert_eq!(scheme.generate(states).len(), states, "{}", scheme.label());
            }
        }
    }

    #[test]
    fn fire_and_grayscale_span_black_to_white() {
        for scheme in [PaletteScheme::Fire, PaletteScheme::Grayscale] {
            let p = scheme.generate(8);
            assert_eq!(p[0], Rgb::BLACK, "{}", scheme.label());
            assert_eq!(p[7], Rgb::WHITE, "{}", scheme.label());
        }
    }

    #[test]
    fn triad_cycles() {
        let p = PaletteScheme::Triad.generate(5);
        assert_eq!(p, vec![Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::RED, Rgb::GREEN]);
    }
}
