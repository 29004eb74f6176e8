//! Transform options and preset profiles.

/// Options for one optimization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Neither output dimension exceeds this; images already within it are
    /// never upscaled
    pub max_dimension: u32,
    /// Encoder quality, 1-100
    pub quality: u8,
}

impl OptimizeOptions {
    /// Profile for avatars and icons: aggressively small.
    pub fn thumbnail() -> Self {
        Self {
            max_dimension: 80,
            quality: 90,
        }
    }

    /// Profile for article imagery: compress without meaningful resizing.
    pub fn full_image() -> Self {
        Self {
            max_dimension: 4000,
            quality: 90,
        }
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self::thumbnail()
    }
}
