//! The dot-grid backdrop engine.
//!
//! [`Backdrop`] owns the lattice, the clouds and the RNG used to seed them.
//! A frame is `clear -> step clouds -> shade and paint every dot`; the
//! surface is abstracted behind [`DotSurface`] so the maths can be driven
//! without a browser.

use crate::cloud::Cloud;
use crate::config::BackdropConfig;
use crate::grid::{build_grid, GridPoint, Viewport};
use crate::palette::{base_tone, cloud_color, influence_opacity, ColorScheme, Hsla};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where the backdrop paints.
pub trait DotSurface {
    fn clear(&mut self, viewport: Viewport);
    fn fill_dot(&mut self, center: Vec2, radius: f32, color: Hsla);
}

/// Advance every cloud by one frame.
///
/// Takes the current clouds as an immutable snapshot and returns the next
/// ones, so every dot of a frame is shaded against the same positions.
/// `pointer` is only consulted when attraction is enabled.
pub fn step_clouds(
    clouds: &[Cloud],
    viewport: Viewport,
    config: &BackdropConfig,
    pointer: Option<Vec2>,
) -> Vec<Cloud> {
    let attract_to = pointer.filter(|_| config.mouse_attraction);
    let max_speed = config.max_cloud_speed();
    clouds
        .iter()
        .map(|c| {
            let mut next = c.clone();
            if let Some(target) = attract_to {
                next.attract(target, config.mouse_attraction_strength, max_speed);
            }
            next.advance(viewport);
            next
        })
        .collect()
}

/// Strongest cloud covering `p`, with its influence. Ties keep the earlier
/// cloud.
pub fn dominant_cloud(p: Vec2, clouds: &[Cloud]) -> Option<(&Cloud, f32)> {
    let mut best: Option<(&Cloud, f32)> = None;
    for c in clouds {
        let f = c.influence_at(p);
        if f <= 0.0 {
            continue;
        }
        match best {
            Some((_, bf)) if f <= bf => {}
            _ => best = Some((c, f)),
        }
    }
    best
}

/// Colour of the dot at `p`: max-wins over all clouds, base tone if none
/// covers it.
pub fn shade_point(p: Vec2, clouds: &[Cloud], scheme: ColorScheme) -> Hsla {
    match dominant_cloud(p, clouds) {
        Some((c, f)) => c.color.with_alpha(influence_opacity(scheme, f)),
        None => base_tone(scheme),
    }
}

pub struct Backdrop {
    config: BackdropConfig,
    viewport: Viewport,
    scheme: ColorScheme,
    reduced_motion: bool,
    rng: StdRng,
    grid: Vec<GridPoint>,
    clouds: Vec<Cloud>,
}

impl Backdrop {
    /// Build the grid and seed the clouds.
    ///
    /// `reduced_motion` is read once here: clouds are placed but never
    /// move afterwards.
    pub fn new(
        config: BackdropConfig,
        viewport: Viewport,
        scheme: ColorScheme,
        reduced_motion: bool,
        seed: u64,
    ) -> Self {
        let mut backdrop = Self {
            config,
            viewport,
            scheme,
            reduced_motion,
            rng: StdRng::seed_from_u64(seed),
            grid: Vec::new(),
            clouds: Vec::new(),
        };
        backdrop.reseed();
        backdrop
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn grid(&self) -> &[GridPoint] {
        &self.grid
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    /// Full reset for a new viewport: new grid, new clouds, new shapes.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reseed();
        log::debug!(
            "[backdrop] resized to {}x{} dots={}",
            viewport.width,
            viewport.height,
            self.grid.len()
        );
    }

    /// Swap palettes without disturbing positions, velocities or shapes.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if scheme == self.scheme {
            return;
        }
        self.scheme = scheme;
        for c in &mut self.clouds {
            c.color = cloud_color(scheme, c.slot);
        }
        log::debug!("[backdrop] color scheme -> {:?}", scheme);
    }

    /// Move the clouds one frame forward (no-op under reduced motion).
    pub fn step(&mut self, pointer: Option<Vec2>) {
        if self.reduced_motion {
            return;
        }
        self.clouds = step_clouds(&self.clouds, self.viewport, &self.config, pointer);
    }

    /// Every grid point with its colour for the current cloud positions.
    pub fn shade(&self) -> impl Iterator<Item = (&GridPoint, Hsla)> + '_ {
        self.grid
            .iter()
            .map(move |g| (g, shade_point(g.pos, &self.clouds, self.scheme)))
    }

    /// Run one full frame against `surface`.
    pub fn render<S: DotSurface + ?Sized>(&mut self, pointer: Option<Vec2>, surface: &mut S) {
        surface.clear(self.viewport);
        self.step(pointer);
        for (g, color) in self.shade() {
            surface.fill_dot(g.pos, g.radius, color);
        }
    }

    fn reseed(&mut self) {
        self.grid = build_grid(self.viewport, self.config.dot_spacing, self.config.dot_radius);
        let scheme = self.scheme;
        let viewport = self.viewport;
        let speed = self.config.cloud_speed;
        let rng = &mut self.rng;
        self.clouds = (0..self.config.cloud_count)
            .map(|slot| Cloud::spawn(&mut *rng, viewport, speed, slot, cloud_color(scheme, slot)))
            .collect();
    }
}
