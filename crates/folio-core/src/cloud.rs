//! Influence regions ("clouds") that drift across the dot grid.

use crate::constants::{
    CLOUD_EDGE_MARGIN_FACTOR, CLOUD_INITIAL_SPEED_SCALE, CLOUD_RADIUS_MAX, CLOUD_RADIUS_MIN,
    SHAPE_SAMPLES, SHAPE_VARIATION_MAX, SHAPE_VARIATION_MIN,
};
use crate::grid::Viewport;
use crate::palette::Hsl;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Organic outline of a cloud: one signed radius offset per 45 degree
/// sector, scaled by `variation`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub offsets: [f32; SHAPE_SAMPLES],
    pub variation: f32,
}

impl ShapeDescriptor {
    /// A perfect circle.
    pub const ROUND: Self = Self {
        offsets: [0.0; SHAPE_SAMPLES],
        variation: SHAPE_VARIATION_MIN,
    };

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut offsets = [0.0; SHAPE_SAMPLES];
        for o in &mut offsets {
            *o = rng.gen_range(-1.0..=1.0);
        }
        Self {
            offsets,
            variation: rng.gen_range(SHAPE_VARIATION_MIN..=SHAPE_VARIATION_MAX),
        }
    }

    /// Offset at `angle` (radians, any range), linearly interpolated between
    /// the two nearest samples.
    pub fn offset_at(&self, angle: f32) -> f32 {
        let n = SHAPE_SAMPLES;
        let a = angle.rem_euclid(TAU);
        let index = a / TAU * n as f32;
        let lower = index.floor();
        let frac = index - lower;
        let lo = lower as usize % n;
        let hi = index.ceil() as usize % n;
        self.offsets[lo] * (1.0 - frac) + self.offsets[hi] * frac
    }

    /// Multiplier applied to the base radius at `angle`.
    #[inline]
    pub fn radius_factor(&self, angle: f32) -> f32 {
        1.0 + self.offset_at(angle) * self.variation
    }
}

/// Smoothed influence of a region on a point `distance` away from its
/// centre, given the region's effective radius in that direction.
///
/// Quadratic ease-out: 1 at the centre, 0 at and beyond the boundary.
#[inline]
pub fn influence(distance: f32, effective_radius: f32) -> f32 {
    if effective_radius.is_nan() || effective_radius <= 0.0 || distance >= effective_radius {
        return 0.0;
    }
    let f = 1.0 - distance / effective_radius;
    f * f
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Hsl,
    /// Palette slot the colour came from; used to re-palette in place.
    pub slot: usize,
    pub shape: ShapeDescriptor,
}

impl Cloud {
    /// Spawn a cloud at a uniformly random position inside `viewport`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        speed: f32,
        slot: usize,
        color: Hsl,
    ) -> Self {
        let x = rng.gen::<f32>() * viewport.width.max(0.0);
        let y = rng.gen::<f32>() * viewport.height.max(0.0);
        let vx = (rng.gen::<f32>() - 0.5) * speed * CLOUD_INITIAL_SPEED_SCALE;
        let vy = (rng.gen::<f32>() - 0.5) * speed * CLOUD_INITIAL_SPEED_SCALE;
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: rng.gen_range(CLOUD_RADIUS_MIN..=CLOUD_RADIUS_MAX),
            color,
            slot,
            shape: ShapeDescriptor::random(rng),
        }
    }

    /// Effective radius in the direction `angle` from the centre.
    #[inline]
    pub fn radius_at(&self, angle: f32) -> f32 {
        self.radius * self.shape.radius_factor(angle)
    }

    /// Influence of this cloud on the point `p`.
    pub fn influence_at(&self, p: Vec2) -> f32 {
        let d = p - self.pos;
        let angle = d.y.atan2(d.x);
        influence(d.length(), self.radius_at(angle))
    }

    /// Pull the velocity toward `target`. The added force is
    /// `distance * strength` along the direction to the target; the
    /// resulting speed is capped at `max_speed`.
    pub fn attract(&mut self, target: Vec2, strength: f32, max_speed: f32) {
        let to = target - self.pos;
        let distance = to.length();
        if distance > 0.0 {
            self.vel += to / distance * (strength * distance);
        }
        self.vel = self.vel.clamp_length_max(max_speed);
    }

    /// Integrate one frame and bounce off the viewport edges.
    pub fn advance(&mut self, viewport: Viewport) {
        self.pos += self.vel;
        let margin = self.radius * CLOUD_EDGE_MARGIN_FACTOR;
        bounce_axis(&mut self.pos.x, &mut self.vel.x, margin, viewport.width);
        bounce_axis(&mut self.pos.y, &mut self.vel.y, margin, viewport.height);
    }
}

/// Reflect `vel` and clamp `pos` into `[margin, extent - margin]` when the
/// position touches either bound. If the band is empty the cloud is parked
/// in the middle of the axis.
fn bounce_axis(pos: &mut f32, vel: &mut f32, margin: f32, extent: f32) {
    let lo = margin;
    let hi = extent - margin;
    if hi < lo {
        *pos = extent * 0.5;
        return;
    }
    if *pos <= lo || *pos >= hi {
        *vel = -*vel;
        *pos = pos.clamp(lo, hi);
    }
}
