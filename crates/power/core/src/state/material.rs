//! Block materials the powers read and write.
//!
//! Only the materials the transient animation cares about are named; every
//! other host material is carried opaquely as [`Material::Other`].

/// Dye colour of a wool block.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WoolColor {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl WoolColor {
    pub const ALL: [WoolColor; 16] = [
        WoolColor::White,
        WoolColor::Orange,
        WoolColor::Magenta,
        WoolColor::LightBlue,
        WoolColor::Yellow,
        WoolColor::Lime,
        WoolColor::Pink,
        WoolColor::Gray,
        WoolColor::LightGray,
        WoolColor::Cyan,
        WoolColor::Purple,
        WoolColor::Blue,
        WoolColor::Brown,
        WoolColor::Green,
        WoolColor::Red,
        WoolColor::Black,
    ];

    /// Colour at `index`, wrapping around the palette.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index as usize) % Self::ALL.len()]
    }
}

/// Material occupying a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    #[default]
    Air,
    Fire,
    Wool(WoolColor),
    /// Any host material without meaning to the powers.
    Other(u16),
}

impl Material {
    pub fn is_wool(self) -> bool {
        matches!(self, Material::Wool(_))
    }

    pub fn is_air(self) -> bool {
        matches!(self, Material::Air)
    }
}
