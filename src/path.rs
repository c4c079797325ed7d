/// Straight segment an edge is drawn along, already clipped to the node boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl EdgeGeometry {
    /// Segment between the borders of two node rects `(x, y, width, height)`,
    /// aimed from center to center.
    pub fn between(source: (f32, f32, f32, f32), target: (f32, f32, f32, f32)) -> Self {
        let source_center = rect_center(source);
        let target_center = rect_center(target);
        Self {
            start: clip_to_rect(source, source_center, target_center),
            end: clip_to_rect(target, target_center, source_center),
        }
    }

    pub fn length(&self) -> f32 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        (dx * dx + dy * dy).sqrt()
    }
}

fn rect_center((x, y, w, h): (f32, f32, f32, f32)) -> (f32, f32) {
    (x + w / 2.0, y + h / 2.0)
}

/// Point where the ray from `center` towards `toward` leaves the rect.
///
/// Never overshoots `toward`, so overlapping boxes still give a segment
/// between the two centers.
fn clip_to_rect(
    (_, _, w, h): (f32, f32, f32, f32),
    center: (f32, f32),
    toward: (f32, f32),
) -> (f32, f32) {
    let dx = toward.0 - center.0;
    let dy = toward.1 - center.1;

    let mut t: f32 = 1.0;
    if dx != 0.0 {
        t = t.min((w / 2.0) / dx.abs());
    }
    if dy != 0.0 {
        t = t.min((h / 2.0) / dy.abs());
    }

    (center.0 + dx * t, center.1 + dy * t)
}

/// Generate the SVG path command for an edge line.
///
/// # Returns
/// SVG path command string (e.g., "M 110 30 L 200 30")
pub fn generate_edge_path(geometry: &EdgeGeometry) -> String {
    format!(
        "M {} {} L {} {}",
        geometry.start.0, geometry.start.1, geometry.end.0, geometry.end.1
    )
}

/// Generate the SVG path command for a classic arrow terminator at the end
/// of the edge.
///
/// The arrow is a closed triangle whose tip sits on `geometry.end` and whose
/// base is `size` back along the edge, `size` wide.
/// Returns an empty string for a zero-length edge, which has no direction.
pub fn generate_arrow_path(geometry: &EdgeGeometry, size: f32) -> String {
    let length = geometry.length();
    if length <= f32::EPSILON {
        return String::new();
    }

    let (tip_x, tip_y) = geometry.end;
    let ux = (geometry.end.0 - geometry.start.0) / length;
    let uy = (geometry.end.1 - geometry.start.1) / length;

    let base_x = tip_x - ux * size;
    let base_y = tip_y - uy * size;
    // Perpendicular to the edge
    let nx = -uy * size / 2.0;
    let ny = ux * size / 2.0;

    format!(
        "M {} {} L {} {} L {} {} Z",
        tip_x,
        tip_y,
        base_x + nx,
        base_y + ny,
        base_x - nx,
        base_y - ny
    )
}

/// Shortest distance from `point` to the segment `start`-`end`.
pub fn distance_to_segment(point: (f32, f32), start: (f32, f32), end: (f32, f32)) -> f32 {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length_sq = dx * dx + dy * dy;

    let t = if length_sq <= f32::EPSILON {
        0.0
    } else {
        (((point.0 - start.0) * dx + (point.1 - start.1) * dy) / length_sq).clamp(0.0, 1.0)
    };

    let closest_x = start.0 + dx * t;
    let closest_y = start.1 + dy * t;
    let px = point.0 - closest_x;
    let py = point.1 - closest_y;
    (px * px + py * py).sqrt()
}
