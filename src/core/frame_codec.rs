//! Text form of a persisted window frame: `{{x, y}, {width, height}}`.
//!
//! Numbers use Rust's shortest round-trip float formatting, so a frame read
//! back from its own string is bit-for-bit the frame that was written.

use crate::models::Rect;

pub fn format_frame(frame: &Rect) -> String {
    format!(
        "{{{{{}, {}}}, {{{}, {}}}}}",
        frame.x, frame.y, frame.width, frame.height
    )
}

/// Parses [`format_frame`] output. Anything that isn't exactly four finite
/// numbers is rejected.
pub fn parse_frame(raw: &str) -> Option<Rect> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
        return None;
    }

    let flat: String = trimmed.chars().filter(|c| *c != '{' && *c != '}').collect();
    let mut values = [0.0f64; 4];
    let mut count = 0usize;
    for part in flat.split(',') {
        if count == values.len() {
            return None;
        }
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        values[count] = value;
        count += 1;
    }
    if count != values.len() {
        return None;
    }

    let [x, y, width, height] = values;
    Some(Rect::new(x, y, width, height))
}
