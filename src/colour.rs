//! Display-space colours and their conversion for the render target.
//!
//! Colours are written the way a user picks them (sRGB-encoded, as the values
//! end up on screen). When the target texture is an sRGB format the GPU encodes
//! on write, so the values have to be linearised first or the hexagon comes out
//! too bright.

/// An RGBA colour in display (sRGB-encoded) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Applies the sRGB electro-optical transfer function to the colour channels.
    ///
    /// Alpha is always linear and passes through untouched.
    pub fn to_linear(self) -> Self {
        Self {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a,
        }
    }

    /// Values to hand to the GPU when rendering into `format`.
    pub fn for_format(self, format: wgpu::TextureFormat) -> Self {
        if format.is_srgb() { self.to_linear() } else { self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clear colour for a render pass targeting `format`.
    pub fn to_wgpu(self, format: wgpu::TextureFormat) -> wgpu::Color {
        let c = self.for_format(format);
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }

    /// The 8-bit value each channel ends up as on screen.
    pub fn to_rgba8(self) -> [u8; 4] {
        let f_to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [f_to_u8(self.r), f_to_u8(self.g), f_to_u8(self.b), f_to_u8(self.a)]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
