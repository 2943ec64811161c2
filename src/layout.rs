//! Screen geometry for the two letter circles.
//!
//! Rendering and mouse hit testing both derive glyph positions from the
//! terminal area, so a click lands on exactly what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::f64::consts::PI;

use crate::letters::Letter;
use crate::round::Round;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 2;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// A drawn letter and where it sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSlot {
    pub letter: Letter,
    /// 0 for the left circle, 1 for the right
    pub circle: usize,
    /// Index within the circle's letter order
    pub index: usize,
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardAreas {
    pub header: Rect,
    pub circles: [Rect; 2],
    pub footer: Rect,
}

pub fn board_areas(area: Rect) -> BoardAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    BoardAreas {
        header: rows[0],
        circles: [halves[0], halves[1]],
        footer: rows[2],
    }
}

/// Evenly spaced points on an ellipse inside `area`, starting at the top and
/// going clockwise.
pub fn ring_positions(area: Rect, count: usize) -> Vec<(u16, u16)> {
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let cx = area.x as f64 + (area.width as f64 - 1.0) / 2.0;
    let cy = area.y as f64 + (area.height as f64 - 1.0) / 2.0;

    // Keep one cell of padding inside the circle's border.
    let max_ry = ((area.height as f64 - 1.0) / 2.0 - 1.5).max(0.0);
    let max_rx = ((area.width as f64 - 1.0) / 2.0 - 2.5).max(0.0);
    let ry = max_ry.min(max_rx / CELL_ASPECT);
    let rx = ry * CELL_ASPECT;

    let right = (area.x + area.width - 1) as f64;
    let bottom = (area.y + area.height - 1) as f64;

    (0..count)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / count as f64 - PI / 2.0;
            let x = (cx + rx * angle.cos()).round().clamp(area.x as f64, right);
            let y = (cy + ry * angle.sin()).round().clamp(area.y as f64, bottom);
            (x as u16, y as u16)
        })
        .collect()
}

pub fn board_slots(area: Rect, round: &Round) -> Vec<GlyphSlot> {
    let areas = board_areas(area);
    round
        .circles()
        .iter()
        .zip(areas.circles.iter())
        .enumerate()
        .flat_map(|(circle, (letters, rect))| {
            ring_positions(*rect, letters.len())
                .into_iter()
                .zip(letters.iter())
                .enumerate()
                .map(move |(index, ((x, y), letter))| GlyphSlot {
                    letter: *letter,
                    circle,
                    index,
                    x,
                    y,
                })
        })
        .collect()
}

/// The letter under a click, allowing one cell of slack on either side.
pub fn hit_test(slots: &[GlyphSlot], column: u16, row: u16) -> Option<Letter> {
    slots
        .iter()
        .filter(|s| s.y == row && s.x.abs_diff(column) <= 1)
        .min_by_key(|s| s.x.abs_diff(column))
        .map(|s| s.letter)
}
