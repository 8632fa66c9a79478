//! Palette handling: hex parsing, background split, seeded shuffling.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Linear-space-agnostic 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Some(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            6 => {
                let byte = |i: usize| Some(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?);
                Some(Self {
                    r: byte(0)?,
                    g: byte(2)?,
                    b: byte(4)?,
                })
            }
            _ => None,
        }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub type Palette = Vec<Rgb>;

/// Parse a list of hex strings, skipping malformed entries.
pub fn parse_palette(hexes: &[&str]) -> Palette {
    hexes
        .iter()
        .filter_map(|h| {
            let c = Rgb::from_hex(h);
            if c.is_none() {
                log::warn!("[palette] ignoring malformed color {:?}", h);
            }
            c
        })
        .collect()
}

/// Take the first entry as background; the remainder is forwarded.
///
/// An empty palette falls back to white.
pub fn split_background(mut palette: Palette) -> (Rgb, Palette) {
    if palette.is_empty() {
        return (Rgb::WHITE, palette);
    }
    let background = palette.remove(0);
    (background, palette)
}

/// Ordered palette list, optionally shuffled with a fixed seed.
pub struct PaletteProvider {
    palettes: Vec<Palette>,
}

impl PaletteProvider {
    pub fn new(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    pub fn from_hex_lists(lists: &[&[&str]]) -> Self {
        Self::new(lists.iter().map(|l| parse_palette(l)).collect())
    }

    pub fn shuffled(mut self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        self.palettes.shuffle(&mut rng);
        self
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn into_palettes(self) -> Vec<Palette> {
        self.palettes
    }
}
