//! World-space geometry for one frame
//!
//! Pure function of a [`RenderFrame`], so it can be checked without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{GRID_SPACING, GROUND_BAND_HEIGHT};
use crate::sim::RenderFrame;

/// Column caps overhang the column by this much on each side
const CAP_OVERHANG: f32 = 6.0;
const CAP_HEIGHT: f32 = 12.0;
const GRID_LINE: f32 = 1.0;

/// Build every triangle for the frame, back to front
pub fn build_scene(frame: &RenderFrame, show_grid: bool) -> Vec<Vertex> {
    let (w, h) = (frame.world_width, frame.world_height);
    let mut vertices = Vec::with_capacity(64 + frame.obstacles.len() * 24);

    if show_grid {
        let mut y = 0.0;
        while y < h {
            vertices.extend(shapes::rect(0.0, y, w, GRID_LINE, colors::GRID));
            y += GRID_SPACING;
        }
    }

    for o in &frame.obstacles {
        vertices.extend(shapes::rect(o.x, 0.0, o.width, o.gap_top, colors::COLUMN));
        vertices.extend(shapes::rect(
            o.x,
            o.gap_bottom,
            o.width,
            h - o.gap_bottom,
            colors::COLUMN,
        ));
        vertices.extend(shapes::rect(
            o.x - CAP_OVERHANG,
            o.gap_top - CAP_HEIGHT,
            o.width + CAP_OVERHANG * 2.0,
            CAP_HEIGHT,
            colors::COLUMN_CAP,
        ));
        vertices.extend(shapes::rect(
            o.x - CAP_OVERHANG,
            o.gap_bottom,
            o.width + CAP_OVERHANG * 2.0,
            CAP_HEIGHT,
            colors::COLUMN_CAP,
        ));
    }

    vertices.extend(shapes::rect(
        0.0,
        h - GROUND_BAND_HEIGHT,
        w,
        GROUND_BAND_HEIGHT,
        colors::GROUND,
    ));

    let b = frame.player_bounds;
    let center = Vec2::new((b.left + b.right) / 2.0, (b.top + b.bottom) / 2.0);
    let size = Vec2::new(b.right - b.left, b.bottom - b.top);
    vertices.extend(shapes::kite(
        center,
        size,
        frame.player_rotation,
        colors::KITE,
        colors::KITE_SPAR,
        colors::KITE_TAIL,
    ));

    vertices
}
