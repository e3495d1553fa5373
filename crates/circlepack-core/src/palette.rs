//! Instance colors: the Riso ink palette and hex parsing.

use glam::Vec3;
use rand::Rng;

use crate::error::SketchError;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RisoColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// A subset of the standard Riso ink colors.
pub const RISO_COLORS: &[RisoColor] = &[
    RisoColor { name: "Black", hex: "#000000" },
    RisoColor { name: "Burgundy", hex: "#914e72" },
    RisoColor { name: "Blue", hex: "#0078bf" },
    RisoColor { name: "Green", hex: "#00a95c" },
    RisoColor { name: "Medium Blue", hex: "#3255a4" },
    RisoColor { name: "Bright Red", hex: "#f15060" },
    RisoColor { name: "Risofederal Blue", hex: "#3d5588" },
    RisoColor { name: "Purple", hex: "#765ba7" },
    RisoColor { name: "Teal", hex: "#00838a" },
    RisoColor { name: "Flat Gold", hex: "#bb8b41" },
    RisoColor { name: "Hunter Green", hex: "#407060" },
    RisoColor { name: "Red", hex: "#ff665e" },
    RisoColor { name: "Brown", hex: "#925f52" },
    RisoColor { name: "Yellow", hex: "#ffe800" },
    RisoColor { name: "Marine Red", hex: "#d2515e" },
    RisoColor { name: "Orange", hex: "#ff6c2f" },
    RisoColor { name: "Fluorescent Pink", hex: "#ff48b0" },
    RisoColor { name: "Light Gray", hex: "#88898a" },
];

/// Parse `#rrggbb` or `#rgb` (leading `#` optional) into RGB in `[0, 1]`.
pub fn parse_hex(hex: &str) -> Result<Vec3> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || SketchError::InvalidColor(hex.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    let [r, g, b] = match digits.len() {
        6 => [
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ],
        3 => [
            channel(&digits[0..1])? * 17,
            channel(&digits[1..2])? * 17,
            channel(&digits[2..3])? * 17,
        ],
        _ => return Err(invalid()),
    };
    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

/// Set of colors instances draw from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Vec3>,
}

impl Palette {
    /// The full [`RISO_COLORS`] list.
    pub fn riso() -> Result<Self> {
        let colors = RISO_COLORS
            .iter()
            .map(|c| parse_hex(c.hex))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self> {
        if hexes.is_empty() {
            return Err(SketchError::InvalidConfig("palette is empty".to_string()));
        }
        let colors = hexes
            .iter()
            .map(|h| parse_hex(h.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Uniformly random color from the palette.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}
