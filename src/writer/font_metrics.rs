//! Font metrics for label text layout.
//!
//! Label pages use the PDF Base-14 Helvetica family exclusively, so only
//! its advance widths are carried here. Widths are standard PostScript
//! metrics in units of 1/1000 em; centered strings need them to compute
//! the draw origin.

/// Font weight for label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

impl FontWeight {
    /// The Base-14 font name for this weight.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontWeight::Normal => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
        }
    }
}

/// Calculate the width of a string in points at the given size.
pub fn text_width(text: &str, weight: FontWeight, font_size: f32) -> f32 {
    let units: f32 = text.chars().map(|c| char_width_units(c, weight)).sum();
    units * font_size / 1000.0
}

/// The x origin that centers `text` on `center_x`.
pub fn centered_x(text: &str, weight: FontWeight, font_size: f32, center_x: f32) -> f32 {
    center_x - text_width(text, weight, font_size) / 2.0
}

/// Advance width of a single character in 1/1000 em units.
fn char_width_units(ch: char, weight: FontWeight) -> f32 {
    let bold = weight == FontWeight::Bold;
    match ch {
        ' ' | '.' | ',' | ';' | '/' | '\\' => 278.0,
        ':' => {
            if bold {
                333.0
            } else {
                278.0
            }
        },
        '-' | '!' | '(' | ')' | '[' | ']' | '{' | '}' | '`' => 333.0,
        '\'' => 222.0,
        '"' => 400.0,
        '?' => 500.0,
        '@' => 800.0,
        '#' | '$' | '_' => 556.0,
        '%' => 889.0,
        '^' => 500.0,
        '&' => 722.0,
        '*' => 389.0,
        '+' | '=' | '<' | '>' | '~' => 584.0,
        '|' => 280.0,
        '0'..='9' => 556.0,
        'A'..='D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722.0,
        'E' | 'V' | 'X' | 'Y' => 667.0,
        'F' | 'L' | 'T' | 'Z' => 611.0,
        'G' | 'O' | 'Q' => 778.0,
        'I' => 278.0,
        'J' => 556.0,
        'M' => 833.0,
        'P' | 'S' => 667.0,
        'W' => 944.0,
        'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' => 556.0,
        'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 611.0,
        'f' => {
            if bold {
                333.0
            } else {
                278.0
            }
        },
        'i' | 'j' | 'l' => {
            if bold {
                278.0
            } else {
                222.0
            }
        },
        'm' => {
            if bold {
                889.0
            } else {
                833.0
            }
        },
        'r' => 389.0,
        't' => 333.0,
        'w' => 778.0,
        'z' => 500.0,
        // Unknown characters fall back to a middling advance
        _ => 500.0,
    }
}
