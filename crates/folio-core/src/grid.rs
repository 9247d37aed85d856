use glam::Vec2;

/// Drawing surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One dot of the backdrop lattice. Never moves once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    pub pos: Vec2,
    pub radius: f32,
}

/// Number of lattice lines along an axis of length `extent`.
#[inline]
pub fn lattice_len(extent: f32, spacing: f32) -> usize {
    if !(extent.is_finite() && extent >= 0.0 && spacing.is_finite() && spacing > 0.0) {
        return 0;
    }
    (extent / spacing).floor() as usize + 1
}

/// Build the dot lattice covering `viewport`, column by column.
///
/// Yields `(floor(w/s) + 1) * (floor(h/s) + 1)` points; a degenerate spacing
/// or viewport yields none.
pub fn build_grid(viewport: Viewport, spacing: f32, radius: f32) -> Vec<GridPoint> {
    let cols = lattice_len(viewport.width, spacing);
    let rows = lattice_len(viewport.height, spacing);
    let mut points = Vec::with_capacity(cols * rows);
    for i in 0..cols {
        for j in 0..rows {
            points.push(GridPoint {
                pos: Vec2::new(i as f32 * spacing, j as f32 * spacing),
                radius,
            });
        }
    }
    points
}
