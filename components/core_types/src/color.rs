//! Tri-color marking tags.

use std::fmt;

/// Mark colors for tri-color marking.
///
/// The default is `Black`: every node is allocated black, so a node created
/// in the middle of a cycle is never mistaken for garbage by that cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    /// Not yet visited in this cycle (presumed dead)
    White = 0,
    /// Reachable, outgoing edges not yet scanned
    Gray = 1,
    /// Reachable and fully scanned
    #[default]
    Black = 2,
}

impl Color {
    /// All colors, in numeric order.
    pub const ALL: [Color; 3] = [Color::White, Color::Gray, Color::Black];

    /// Index of this color into per-color tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "WHITE",
            Color::Gray => "GRAY",
            Color::Black => "BLACK",
        };
        f.write_str(name)
    }
}
