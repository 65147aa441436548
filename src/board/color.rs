//! Colors, the named palette, and per-player shade derivation.
//!
//! A player owns one base color. Every ownership tier (level) gets its own
//! shade of that base: the first tier keeps the base unchanged and each later
//! tier is darker than the one before it.

use serde::{Deserialize, Serialize};

use super::level::Level;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Builds a color from unbounded integer channels, clamping each to 0..=255.
    ///
    /// Returns the color and whether any channel had to be clamped.
    pub fn clamped(channels: [i64; 3]) -> (Self, bool) {
        let clamp = |c: i64| c.clamp(0, 255) as u8;
        let clipped = channels.iter().any(|c| !(0..=255).contains(c));
        (
            Color::new(clamp(channels[0]), clamp(channels[1]), clamp(channels[2])),
            clipped,
        )
    }

    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns true if every channel of `self` is strictly below `other`'s.
    pub fn is_darker_than(self, other: Color) -> bool {
        self.r < other.r && self.g < other.g && self.b < other.b
    }

    /// Darkens each channel by `channel / divisor` (integer floor division).
    ///
    /// A divisor below 1 is treated as 1.
    pub fn darken(self, divisor: u32) -> Self {
        let d = divisor.max(1);
        let shade = |c: u8| c - (u32::from(c) / d) as u8;
        Color::new(shade(self.r), shade(self.g), shade(self.b))
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb(c.channels())
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(p: image::Rgb<u8>) -> Self {
        Color::new(p.0[0], p.0[1], p.0[2])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Per-level shades of one base color, in level (tier) order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Shades(Vec<(String, Color)>);

impl Shades {
    /// Returns the shade for the named level.
    pub fn get(&self, level: &str) -> Option<Color> {
        self.0.iter().find(|(name, _)| name == level).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.0.iter().map(|(name, c)| (name.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the starting divisor and per-tier step for `tiers` levels.
///
/// The canonical three-tier map uses 6 then 2; every other size starts at
/// `2 * (tiers - 1)` and steps down by 2, ending at 2 on the last tier.
const fn divisor_schedule(tiers: usize) -> (i64, i64) {
    if tiers == 3 {
        (6, 4)
    } else {
        (2 * tiers as i64 - 2, 2)
    }
}

/// Derives one shade per level from `base`.
///
/// Tier 1 keeps `base`. Tier `k > 1` darkens the base with the divisor
/// `start - step * (k - 2)`, floored at 1. Channels are 8-bit, so a shade can
/// never leave 0..=255.
pub fn derive_shades(base: Color, levels: &[Level]) -> Shades {
    let (start, step) = divisor_schedule(levels.len());
    let mut divisor = start;
    let mut shades = Vec::with_capacity(levels.len());

    for (tier, level) in levels.iter().enumerate() {
        let shade = if tier == 0 {
            base
        } else {
            let d = divisor.max(1) as u32;
            divisor -= step;
            base.darken(d)
        };
        tracing::debug!(level = %level.name, %shade, "derived shade");
        shades.push((level.name.clone(), shade));
    }

    Shades(shades)
}

/// A named color palette.
///
/// Constructed once and passed by reference; there is no global registry.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(&'static str, Color)>,
}

impl Palette {
    /// The CSS named-color set.
    pub fn css() -> Self {
        Palette {
            entries: CSS_COLORS
                .iter()
                .map(|(name, [r, g, b])| (*name, Color::new(*r, *g, *b)))
                .collect(),
        }
    }

    /// Looks up a color by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    /// Returns the color at `index`, wrapping around the palette.
    pub fn nth(&self, index: usize) -> Option<(&'static str, Color)> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(index % self.entries.len()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static CSS_COLORS: [(&str, [u8; 3]); 143] = [
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgreen", [144, 238, 144]),
    ("lightgray", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
    ("grey", [128, 128, 128]),
    ("darkgrey", [169, 169, 169]),
];
