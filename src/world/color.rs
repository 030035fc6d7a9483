use crate::renderer::Rgba;

/// Normalised RGBA colour, every channel in `0.0 ..= 1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        )
    }

    /// Scale r/g/b by `factor`; alpha is kept.  No clamping here –
    /// [`to_rgba`](Self::to_rgba) saturates when packing.
    #[inline]
    pub fn brightness(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Pack to 0xAARRGGBB, saturating out-of-range channels.
    #[inline]
    pub fn to_rgba(self) -> Rgba {
        #[inline]
        fn channel(v: f32) -> u32 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u32
        }
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}
