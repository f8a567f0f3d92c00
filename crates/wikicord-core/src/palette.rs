//! Card accent colors.
//!
//! A fixed, ordered palette with an explicit cursor. The publisher owns one
//! `Palette` per run so color assignment is deterministic and testable.

/// A named accent color, stored as the 24-bit RGB integer Discord expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub name: &'static str,
    pub rgb: u32,
}

impl Color {
    /// `#RRGGBB` form of the color.
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.rgb)
    }
}

/// The palette, in assignment order.
pub const COLORS: [Color; 9] = [
    Color { name: "orange", rgb: 0xFF5733 },
    Color { name: "green", rgb: 0x33FF70 },
    Color { name: "blue", rgb: 0x3387FF },
    Color { name: "pink", rgb: 0xFF7EFA },
    Color { name: "red", rgb: 0xF95B74 },
    Color { name: "purple", rgb: 0x9975FF },
    Color { name: "cyan", rgb: 0x92F5FF },
    Color { name: "yellow", rgb: 0xFCEE74 },
    Color { name: "darkGray", rgb: 0x5B5B5B },
];

/// Cycling cursor over [`COLORS`].
#[derive(Clone, Debug, Default)]
pub struct Palette {
    cursor: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the color under the cursor and advance, wrapping at the end.
    pub fn next_color(&mut self) -> Color {
        let color = COLORS[self.cursor % COLORS.len()];
        self.cursor = (self.cursor + 1) % COLORS.len();
        color
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        COLORS.len()
    }

    pub fn is_empty(&self) -> bool {
        COLORS.is_empty()
    }

    /// Pick any palette color. Not used when publishing.
    pub fn random() -> Color {
        COLORS[random_index(COLORS.len())]
    }
}

/// Cheap non-cryptographic index from the clock's sub-second nanos.
fn random_index(len: usize) -> usize {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    nanos as usize % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_color_is_orange() {
        let mut palette = Palette::new();
        assert_eq!(palette.next_color().name, "orange");
        assert_eq!(palette.next_color().name, "green");
    }

    #[test]
    fn test_wraps_after_size_plus_one_calls() {
        let mut palette = Palette::new();
        let first = palette.next_color();
        for _ in 1..palette.len() {
            palette.next_color();
        }
        assert_eq!(palette.next_color(), first);
    }

    #[test]
    fn test_cycle_visits_every_color_in_order() {
        let mut palette = Palette::new();
        let seen: Vec<Color> = (0..COLORS.len() * 2).map(|_| palette.next_color()).collect();
        assert_eq!(&seen[..COLORS.len()], &COLORS[..]);
        assert_eq!(&seen[COLORS.len()..], &COLORS[..]);
    }

    #[test]
    fn test_independent_palettes() {
        let mut a = Palette::new();
        let mut b = Palette::new();
        a.next_color();
        a.next_color();
        assert_eq!(b.next_color().name, "orange");
    }

    #[test]
    fn test_hex() {
        assert_eq!(COLORS[0].hex(), "#FF5733");
        assert_eq!(COLORS[8].hex(), "#5B5B5B");
    }

    #[test]
    fn test_random_is_in_palette() {
        for _ in 0..20 {
            assert!(COLORS.contains(&Palette::random()));
        }
    }
}
