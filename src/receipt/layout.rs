//! Fixed receipt geometry and the checks run against it.

use std::fmt;

/// Left and right page margin.
pub const MARGIN: f32 = 32.0;
/// Distance from the top edge to the first baseline.
pub const TOP_OFFSET: f32 = 52.0;
/// Extra space below a centered line, on top of its font size.
pub const CENTER_GAP: f32 = 6.0;
/// Offset of the second column from the page middle.
pub const COLUMN_GAP: f32 = 10.0;
/// Offset of a reading value from its label.
pub const VALUE_OFFSET: f32 = 100.0;
/// Indent of charge lines from the margin.
pub const ITEM_INDENT: f32 = 10.0;

const TOLERANCE: f32 = 0.01;

/// Page edge a run of text crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Started left of the left margin
    Left,
    /// Ended right of the right margin
    Right,
}

/// A non-fatal problem found while laying out a receipt.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// Text extends past a margin; it is drawn anyway.
    Overflow {
        /// The text
        text: String,
        /// Left edge
        x: f32,
        /// Baseline
        y: f32,
        /// Measured width
        width: f32,
        /// Margin crossed
        edge: Edge,
    },
    /// A font has no glyph for some drawn characters.
    MissingGlyphs {
        /// PostScript name of the font
        font: String,
        /// Characters drawn as `.notdef`
        chars: Vec<char>,
    },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::Overflow {
                text,
                x,
                width,
                edge,
                ..
            } => {
                let side = match edge {
                    Edge::Left => "left",
                    Edge::Right => "right",
                };
                write!(f, "'{}' ({:.1}pt at x={:.1}) crosses the {} margin", text, width, x, side)
            },
            LayoutWarning::MissingGlyphs { font, chars } => {
                let chars: String = chars.iter().collect();
                write!(f, "font {} cannot show '{}'", font, chars)
            },
        }
    }
}

/// A run of text as placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    /// The text
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Font size
    pub size: f32,
    /// Measured width
    pub width: f32,
    /// Drawn in the bold face
    pub bold: bool,
}

impl PlacedText {
    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Check a placed run against the margins of a page `page_width` wide.
pub fn check_margins(placed: &PlacedText, page_width: f32) -> Option<LayoutWarning> {
    let edge = if placed.x < MARGIN - TOLERANCE {
        Edge::Left
    } else if placed.right() > page_width - MARGIN + TOLERANCE {
        Edge::Right
    } else {
        return None;
    };
    Some(LayoutWarning::Overflow {
        text: placed.text.clone(),
        x: placed.x,
        y: placed.y,
        width: placed.width,
        edge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(x: f32, width: f32) -> PlacedText {
        PlacedText {
            text: "x".to_string(),
            x,
            y: 100.0,
            size: 10.0,
            width,
            bold: false,
        }
    }

    #[test]
    fn test_inside_margins() {
        assert_eq!(check_margins(&placed(32.0, 356.94), 420.94), None);
    }

    #[test]
    fn test_overflow_edges() {
        match check_margins(&placed(10.0, 50.0), 420.94) {
            Some(LayoutWarning::Overflow { edge, .. }) => assert_eq!(edge, Edge::Left),
            other => panic!("unexpected {:?}", other),
        }
        match check_margins(&placed(300.0, 100.0), 420.94) {
            Some(LayoutWarning::Overflow { edge, .. }) => assert_eq!(edge, Edge::Right),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_warning_display() {
        let warning = LayoutWarning::MissingGlyphs {
            font: "Test-Regular".to_string(),
            chars: vec!['đ', 'ư'],
        };
        assert_eq!(warning.to_string(), "font Test-Regular cannot show 'đư'");
    }
}
