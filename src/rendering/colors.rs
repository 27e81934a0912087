//! Karma color palette.
//!
//! Two surfaces use these classes: the PNG renderer (RGB values) and the
//! terminal summary (ANSI via owo_colors). Both map the same four display
//! classes so the image and the summary never disagree.

use owo_colors::OwoColorize;
use plotters::style::RGBColor;

use crate::karma::KarmaClass;

/// Sentinel karma - dark gray.
pub const NEUTRAL: RGBColor = RGBColor(169, 169, 169);
/// Positive karma - green.
pub const POSITIVE: RGBColor = RGBColor(0, 128, 0);
/// Negative karma - red.
pub const NEGATIVE: RGBColor = RGBColor(255, 0, 0);
/// Genuine zero karma - blue.
pub const ZERO: RGBColor = RGBColor(0, 0, 255);
/// Edge color - light gray.
pub const EDGE: RGBColor = RGBColor(211, 211, 211);

/// Node fill color for a display class.
pub fn node_color(class: KarmaClass) -> RGBColor {
    match class {
        KarmaClass::Neutral => NEUTRAL,
        KarmaClass::Positive => POSITIVE,
        KarmaClass::Negative => NEGATIVE,
        KarmaClass::Zero => ZERO,
    }
}

/// Colorize a karma figure for the terminal summary.
pub fn terminal_karma(class: KarmaClass, text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match class {
        KarmaClass::Neutral => text.dimmed().to_string(),
        KarmaClass::Positive => text.green().to_string(),
        KarmaClass::Negative => text.red().to_string(),
        KarmaClass::Zero => text.blue().to_string(),
    }
}

/// Bold a heading for the terminal summary.
pub fn terminal_heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_map_to_distinct_colors() {
        let classes = [
            KarmaClass::Neutral,
            KarmaClass::Positive,
            KarmaClass::Negative,
            KarmaClass::Zero,
        ];
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                let (ca, cb) = (node_color(*a), node_color(*b));
                assert_ne!((ca.0, ca.1, ca.2), (cb.0, cb.1, cb.2));
            }
        }
    }

    #[test]
    fn test_terminal_karma_plain_when_color_off() {
        let s = terminal_karma(KarmaClass::Negative, "-12", false);
        assert_eq!(s, "-12");
    }
}
