//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle (top-left origin)
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    quad(
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        color,
    )
}

/// Two triangles for an arbitrary convex quad given in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Rotate `point` about `center` by `angle` radians (y down, so positive is clockwise on screen)
#[inline]
fn rotate_about(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(point - center)
}

/// Diamond kite filling a `size` box around `center`, tilted by `rotation`,
/// with a cross spar and a short tail trailing from the bottom point
pub fn kite(center: Vec2, size: Vec2, rotation: f32, body: [f32; 4], spar: [f32; 4], tail: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let top = center + Vec2::new(0.0, -half.y);
    let right = center + Vec2::new(half.x, -half.y * 0.3);
    let bottom = center + Vec2::new(0.0, half.y);
    let left = center + Vec2::new(-half.x, -half.y * 0.3);
    let r = |p: Vec2| rotate_about(p, center, rotation);

    let mut vertices = quad([r(top), r(right), r(bottom), r(left)], body);

    // Cross spar
    let spar_w = 2.0;
    vertices.extend(quad(
        [
            r(left + Vec2::new(0.0, -spar_w / 2.0)),
            r(right + Vec2::new(0.0, -spar_w / 2.0)),
            r(right + Vec2::new(0.0, spar_w / 2.0)),
            r(left + Vec2::new(0.0, spar_w / 2.0)),
        ],
        spar,
    ));

    // Tail: three shrinking bows below the bottom point
    for i in 0..3 {
        let y = bottom.y + 6.0 + i as f32 * 8.0;
        let w = 5.0 - i as f32;
        let bow = Vec2::new(bottom.x, y);
        vertices.extend(quad(
            [
                r(bow + Vec2::new(-w, -2.0)),
                r(bow + Vec2::new(w, -2.0)),
                r(bow + Vec2::new(w, 2.0)),
                r(bow + Vec2::new(-w, 2.0)),
            ],
            tail,
        ));
    }

    vertices
}
