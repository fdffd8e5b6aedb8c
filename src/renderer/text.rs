//! Text wrapping and layout for on-screen messages

use glam::IVec2;

use crate::sim::Rect;

/// Greedy word wrap so every line fits in `max_width` as measured by `measure`.
/// A single word wider than the limit gets a line of its own.
pub fn wrap_text<F>(text: &str, max_width: i32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> i32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rectangle of the given size centered on a point
pub fn centered(size: IVec2, center: IVec2) -> Rect {
    Rect::new(center.x - size.x / 2, center.y - size.y / 2, size.x, size.y)
}

/// Stack lines vertically around `center`, each horizontally centered,
/// with `spacing` pixels between them
pub fn stack_lines(sizes: &[IVec2], center: IVec2, spacing: i32) -> Vec<Rect> {
    if sizes.is_empty() {
        return Vec::new();
    }
    let total: i32 = sizes.iter().map(|s| s.y).sum::<i32>() + (sizes.len() as i32 - 1) * spacing;
    let mut top = center.y - total / 2;
    sizes
        .iter()
        .map(|size| {
            let rect = Rect::new(center.x - size.x / 2, top, size.x, size.y);
            top += size.y + spacing;
            rect
        })
        .collect()
}
