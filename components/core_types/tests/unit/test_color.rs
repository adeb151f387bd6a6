//! Unit tests for Color

use core_types::Color;

#[cfg(test)]
mod color_tests {
    use super::*;

    #[test]
    fn test_new_nodes_default_to_black() {
        assert_eq!(Color::default(), Color::Black);
    }

    #[test]
    fn test_color_indices_are_distinct() {
        let indices: Vec<usize> = Color::ALL.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::White.to_string(), "WHITE");
        assert_eq!(Color::Gray.to_string(), "GRAY");
        assert_eq!(Color::Black.to_string(), "BLACK");
    }
}
