use glam::Vec4;
use num_traits::{PrimInt, Unsigned};

/// A pixel encoding usable by the geometric transforms.
///
/// Every pixel kind converts to and from a normalized RGBA float vector and
/// packs into a fixed-width unsigned integer. The transforms are generic over
/// this trait and monomorphized per pixel kind, so the hot loops never go
/// through dynamic dispatch.
pub trait Pixel: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The number of bytes one pixel occupies.
    const BYTES: usize;

    /// The integer type the pixel packs into.
    type Packed: PrimInt + Unsigned + std::fmt::Debug + Send + Sync;

    /// Convert the pixel into a normalized RGBA vector.
    fn to_vector4(self) -> Vec4;

    /// Build a pixel from a normalized RGBA vector.
    ///
    /// Components are clamped to `[0, 1]` before quantization.
    fn from_vector4(v: Vec4) -> Self;

    /// Pack the pixel into its integer representation.
    fn pack(self) -> Self::Packed;

    /// Unpack the pixel from its integer representation.
    fn unpack(packed: Self::Packed) -> Self;
}

// BT.709 luma coefficients.
const LUMA: Vec4 = Vec4::new(0.2126, 0.7152, 0.0722, 0.0);

#[inline]
fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn unorm16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// 8-bit single channel gray pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray8(pub u8);

impl Pixel for Gray8 {
    const BYTES: usize = 1;
    type Packed = u8;

    #[inline]
    fn to_vector4(self) -> Vec4 {
        let g = self.0 as f32 / 255.0;
        Vec4::new(g, g, g, 1.0)
    }

    #[inline]
    fn from_vector4(v: Vec4) -> Self {
        Self(unorm8(v.dot(LUMA)))
    }

    #[inline]
    fn pack(self) -> u8 {
        self.0
    }

    #[inline]
    fn unpack(packed: u8) -> Self {
        Self(packed)
    }
}

/// 16-bit single channel gray pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray16(pub u16);

impl Pixel for Gray16 {
    const BYTES: usize = 2;
    type Packed = u16;

    #[inline]
    fn to_vector4(self) -> Vec4 {
        let g = self.0 as f32 / 65535.0;
        Vec4::new(g, g, g, 1.0)
    }

    #[inline]
    fn from_vector4(v: Vec4) -> Self {
        Self(unorm16(v.dot(LUMA)))
    }

    #[inline]
    fn pack(self) -> u16 {
        self.0
    }

    #[inline]
    fn unpack(packed: u16) -> Self {
        Self(packed)
    }
}

/// 8-bit per channel RGB pixel. Alpha is implied opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb24 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb24 {
    /// Create a new pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Pixel for Rgb24 {
    const BYTES: usize = 3;
    type Packed = u32;

    #[inline]
    fn to_vector4(self) -> Vec4 {
        Vec4::new(self.r as f32, self.g as f32, self.b as f32, 255.0) / 255.0
    }

    #[inline]
    fn from_vector4(v: Vec4) -> Self {
        Self::new(unorm8(v.x), unorm8(v.y), unorm8(v.z))
    }

    #[inline]
    fn pack(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, 0])
    }

    #[inline]
    fn unpack(packed: u32) -> Self {
        let [r, g, b, _] = packed.to_le_bytes();
        Self::new(r, g, b)
    }
}

/// 8-bit per channel RGBA pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba32 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba32 {
    /// Create a new pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for Rgba32 {
    const BYTES: usize = 4;
    type Packed = u32;

    #[inline]
    fn to_vector4(self) -> Vec4 {
        Vec4::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32) / 255.0
    }

    #[inline]
    fn from_vector4(v: Vec4) -> Self {
        Self::new(unorm8(v.x), unorm8(v.y), unorm8(v.z), unorm8(v.w))
    }

    #[inline]
    fn pack(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    #[inline]
    fn unpack(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self::new(r, g, b, a)
    }
}

/// Floating point RGBA pixel, stored as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RgbaF32(pub Vec4);

impl Pixel for RgbaF32 {
    const BYTES: usize = 16;
    type Packed = u128;

    #[inline]
    fn to_vector4(self) -> Vec4 {
        self.0
    }

    #[inline]
    fn from_vector4(v: Vec4) -> Self {
        Self(v.clamp(Vec4::ZERO, Vec4::ONE))
    }

    fn pack(self) -> u128 {
        self.0
            .to_array()
            .iter()
            .enumerate()
            .fold(0u128, |acc, (i, c)| acc | (c.to_bits() as u128) << (32 * i))
    }

    fn unpack(packed: u128) -> Self {
        let lane = |i: u32| f32::from_bits((packed >> (32 * i)) as u32);
        Self(Vec4::new(lane(0), lane(1), lane(2), lane(3)))
    }
}
