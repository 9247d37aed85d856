// Host-side tests for the backdrop engine: grid, clouds, step and shading.

use folio_core::*;
use glam::Vec2;
use std::f32::consts::PI;

fn make_backdrop(w: f32, h: f32, seed: u64) -> Backdrop {
    Backdrop::new(
        BackdropConfig::default(),
        Viewport::new(w, h),
        ColorScheme::Light,
        false,
        seed,
    )
}

fn round_cloud(pos: Vec2, radius: f32, slot: usize) -> Cloud {
    Cloud {
        pos,
        vel: Vec2::ZERO,
        radius,
        color: cloud_color(ColorScheme::Dark, slot),
        slot,
        shape: ShapeDescriptor::ROUND,
    }
}

#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    dots: Vec<(Vec2, f32, Hsla)>,
}

impl DotSurface for RecordingSurface {
    fn clear(&mut self, _viewport: Viewport) {
        self.clears += 1;
        self.dots.clear();
    }

    fn fill_dot(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.dots.push((center, radius, color));
    }
}

#[test]
fn grid_covers_viewport_inclusive() {
    for &(w, h, s) in &[
        (1024.0, 768.0, 10.0),
        (1920.0, 1080.0, 10.0),
        (375.0, 812.0, 40.0),
        (100.0, 100.0, 7.0),
        (0.0, 0.0, 10.0),
    ] {
        let grid = build_grid(Viewport::new(w, h), s, 3.0);
        let expected =
            ((w / s).floor() as usize + 1) * ((h / s).floor() as usize + 1);
        assert_eq!(grid.len(), expected, "viewport {w}x{h} spacing {s}");
    }
}

#[test]
fn grid_points_sit_on_the_lattice() {
    let grid = build_grid(Viewport::new(95.0, 42.0), 10.0, 2.5);
    assert_eq!(grid.len(), 10 * 5);
    assert_eq!(grid[0].pos, Vec2::ZERO);
    assert!(grid.iter().all(|g| g.radius == 2.5));
    assert!(grid.iter().all(|g| g.pos.x <= 95.0 && g.pos.y <= 42.0));
    assert!(grid
        .iter()
        .all(|g| g.pos.x % 10.0 == 0.0 && g.pos.y % 10.0 == 0.0));
}

#[test]
fn reference_viewport_has_7931_dots() {
    let b = make_backdrop(1024.0, 768.0, 1);
    assert_eq!(b.grid().len(), 103 * 77);
    assert_eq!(b.grid().len(), 7931);
    assert_eq!(b.clouds().len(), 3);
}

#[test]
fn degenerate_spacing_yields_no_grid() {
    assert!(build_grid(Viewport::new(100.0, 100.0), 0.0, 3.0).is_empty());
    assert!(build_grid(Viewport::new(100.0, 100.0), -5.0, 3.0).is_empty());
}

#[test]
fn spawned_clouds_respect_shape_and_radius_bands() {
    let config = BackdropConfig {
        cloud_count: 8,
        ..BackdropConfig::default()
    };
    for seed in 0..50 {
        let b = Backdrop::new(
            config.clone(),
            Viewport::new(800.0, 600.0),
            ColorScheme::Dark,
            false,
            seed,
        );
        for c in b.clouds() {
            assert!(c.shape.offsets.iter().all(|o| (-1.0..=1.0).contains(o)));
            assert!((0.3..=0.5).contains(&c.shape.variation));
            assert!((150.0..=250.0).contains(&c.radius));
            assert!((0.0..=800.0).contains(&c.pos.x));
            assert!((0.0..=600.0).contains(&c.pos.y));
            // initial components are (u - 0.5) * speed * 0.5
            assert!(c.vel.x.abs() <= 1.25 && c.vel.y.abs() <= 1.25);
        }
    }
}

#[test]
fn clouds_cycle_through_the_palette() {
    let config = BackdropConfig {
        cloud_count: 5,
        ..BackdropConfig::default()
    };
    let b = Backdrop::new(config, Viewport::new(640.0, 480.0), ColorScheme::Light, false, 3);
    let palette = cloud_palette(ColorScheme::Light);
    for (i, c) in b.clouds().iter().enumerate() {
        assert_eq!(c.slot, i);
        assert_eq!(c.color, palette[i % palette.len()]);
    }
}

#[test]
fn same_seed_same_clouds() {
    let a = make_backdrop(1024.0, 768.0, 42);
    let b = make_backdrop(1024.0, 768.0, 42);
    assert_eq!(a.clouds(), b.clouds());
}

#[test]
fn influence_is_monotonic_and_bounded() {
    let r = 200.0;
    assert_eq!(influence(0.0, r), 1.0);
    assert_eq!(influence(r, r), 0.0);
    assert_eq!(influence(r + 1.0, r), 0.0);
    let mut prev = influence(0.0, r);
    for i in 1..200 {
        let f = influence(i as f32, r);
        assert!(f < prev, "influence not decreasing at d={i}");
        assert!(f > 0.0 && f < 1.0);
        prev = f;
    }
}

#[test]
fn influence_with_degenerate_radius_is_zero() {
    assert_eq!(influence(0.0, 0.0), 0.0);
    assert_eq!(influence(0.0, -10.0), 0.0);
    assert_eq!(influence(0.0, f32::NAN), 0.0);
}

#[test]
fn shape_offsets_interpolate_between_sectors() {
    let mut offsets = [0.0; 8];
    offsets[1] = 1.0;
    offsets[7] = -1.0;
    let shape = ShapeDescriptor {
        offsets,
        variation: 0.5,
    };
    assert!(shape.offset_at(0.0).abs() < 1e-6);
    assert!((shape.offset_at(PI / 4.0) - 1.0).abs() < 1e-4);
    assert!((shape.offset_at(PI / 8.0) - 0.5).abs() < 1e-4);
    // negative angles wrap around to the last sector
    assert!((shape.offset_at(-PI / 4.0) + 1.0).abs() < 1e-4);
    assert!((shape.radius_factor(PI / 4.0) - 1.5).abs() < 1e-4);
    assert!((shape.radius_factor(-PI / 4.0) - 0.5).abs() < 1e-4);
}

#[test]
fn organic_radius_changes_coverage_by_direction() {
    let mut offsets = [0.0; 8];
    offsets[0] = 1.0; // stretched toward +x
    offsets[4] = -1.0; // squeezed toward -x
    let cloud = Cloud {
        shape: ShapeDescriptor {
            offsets,
            variation: 0.5,
        },
        ..round_cloud(Vec2::new(500.0, 500.0), 100.0, 0)
    };
    assert!((cloud.radius_at(0.0) - 150.0).abs() < 1e-3);
    assert!((cloud.radius_at(PI) - 50.0).abs() < 1e-3);
    assert!(cloud.influence_at(Vec2::new(620.0, 500.0)) > 0.0);
    assert_eq!(cloud.influence_at(Vec2::new(380.0, 500.0)), 0.0);
}

#[test]
fn strongest_cloud_wins_regardless_of_order() {
    let near = round_cloud(Vec2::new(0.0, 0.0), 100.0, 0);
    let far = round_cloud(Vec2::new(60.0, 0.0), 100.0, 1);
    let p = Vec2::new(10.0, 0.0);

    let a = shade_point(p, &[near.clone(), far.clone()], ColorScheme::Dark);
    let b = shade_point(p, &[far, near.clone()], ColorScheme::Dark);
    assert_eq!(a, b);
    assert_eq!(a.hsl, near.color);
    let expected_alpha = influence_opacity(ColorScheme::Dark, 0.81);
    assert!((a.a - expected_alpha).abs() < 1e-4);
}

#[test]
fn uncovered_points_use_the_base_tone() {
    let c = round_cloud(Vec2::new(0.0, 0.0), 100.0, 0);
    let p = Vec2::new(500.0, 500.0);
    assert_eq!(shade_point(p, &[c], ColorScheme::Light), base_tone(ColorScheme::Light));
    assert_eq!(shade_point(p, &[], ColorScheme::Dark), base_tone(ColorScheme::Dark));
}

#[test]
fn colors_format_as_css_hsla() {
    let c = Hsl::new(280.0, 70.0, 60.0).with_alpha(0.45);
    assert_eq!(c.to_string(), "hsla(280, 70%, 60%, 0.450)");
}

#[test]
fn opacity_ramp_ends_per_scheme() {
    assert!((influence_opacity(ColorScheme::Dark, 0.0) - 0.35).abs() < 1e-6);
    assert!((influence_opacity(ColorScheme::Dark, 1.0) - 0.6).abs() < 1e-6);
    assert!((influence_opacity(ColorScheme::Light, 0.0) - 0.25).abs() < 1e-6);
    assert!((influence_opacity(ColorScheme::Light, 1.0) - 0.6).abs() < 1e-6);
    // out-of-range influence is clamped
    assert_eq!(
        influence_opacity(ColorScheme::Dark, 2.0),
        influence_opacity(ColorScheme::Dark, 1.0)
    );
}

#[test]
fn bounce_reflects_and_clamps_at_far_edge() {
    let viewport = Viewport::new(200.0, 300.0);
    let mut c = round_cloud(Vec2::new(148.0, 100.0), 100.0, 0);
    c.vel = Vec2::new(5.0, 0.0);
    c.advance(viewport);
    assert!(c.vel.x < 0.0);
    assert!(c.pos.x >= 50.0 && c.pos.x <= 150.0);
    assert_eq!(c.pos.y, 100.0);
}

#[test]
fn bounce_reflects_and_clamps_at_near_edge() {
    let viewport = Viewport::new(400.0, 400.0);
    let mut c = round_cloud(Vec2::new(200.0, 52.0), 100.0, 0);
    c.vel = Vec2::new(1.0, -4.0);
    c.advance(viewport);
    assert!(c.vel.y > 0.0);
    assert!(c.pos.y >= 50.0 && c.pos.y <= 350.0);
    assert_eq!(c.vel.x, 1.0);
}

#[test]
fn clouds_stay_in_bounds_over_many_frames() {
    let mut b = make_backdrop(1024.0, 768.0, 9);
    for _ in 0..5_000 {
        b.step(None);
        for c in b.clouds() {
            let m = c.radius * 0.5;
            assert!(c.pos.x >= m && c.pos.x <= 1024.0 - m);
            assert!(c.pos.y >= m && c.pos.y <= 768.0 - m);
        }
    }
}

#[test]
fn narrow_viewport_parks_the_cloud_in_the_middle() {
    let mut c = round_cloud(Vec2::new(10.0, 10.0), 200.0, 0);
    c.vel = Vec2::new(3.0, 3.0);
    c.advance(Viewport::new(100.0, 80.0));
    assert_eq!(c.pos, Vec2::new(50.0, 40.0));
}

#[test]
fn attraction_pulls_toward_pointer() {
    let config = BackdropConfig {
        mouse_attraction: true,
        ..BackdropConfig::default()
    };
    let c = round_cloud(Vec2::new(100.0, 100.0), 100.0, 0);
    let next = step_clouds(
        &[c],
        Viewport::new(1000.0, 1000.0),
        &config,
        Some(Vec2::new(300.0, 100.0)),
    );
    // distance 200 * strength 0.0005 along +x
    assert!((next[0].vel.x - 0.1).abs() < 1e-5);
    assert!(next[0].vel.y.abs() < 1e-6);
    assert!((next[0].pos.x - 100.1).abs() < 1e-4);
}

#[test]
fn attraction_speed_is_capped() {
    let config = BackdropConfig {
        mouse_attraction: true,
        mouse_attraction_strength: 1.0,
        ..BackdropConfig::default()
    };
    let c = round_cloud(Vec2::new(100.0, 500.0), 100.0, 0);
    let next = step_clouds(
        &[c],
        Viewport::new(1000.0, 1000.0),
        &config,
        Some(Vec2::new(900.0, 500.0)),
    );
    assert!((next[0].vel.length() - config.max_cloud_speed()).abs() < 1e-3);
}

#[test]
fn pointer_is_ignored_without_attraction() {
    let config = BackdropConfig::default();
    let mut c = round_cloud(Vec2::new(300.0, 300.0), 100.0, 0);
    c.vel = Vec2::new(1.0, 0.5);
    let next = step_clouds(
        &[c.clone()],
        Viewport::new(1000.0, 1000.0),
        &config,
        Some(Vec2::new(0.0, 0.0)),
    );
    assert_eq!(next[0].vel, c.vel);
    assert_eq!(next[0].pos, c.pos + c.vel);
}

#[test]
fn step_does_not_touch_the_input_snapshot() {
    let b = make_backdrop(800.0, 600.0, 5);
    let before = b.clouds().to_vec();
    let next = step_clouds(b.clouds(), b.viewport(), b.config(), None);
    assert_eq!(b.clouds(), &before[..]);
    assert_ne!(next, before);
}

#[test]
fn reduced_motion_freezes_clouds() {
    let mut b = Backdrop::new(
        BackdropConfig::default(),
        Viewport::new(1024.0, 768.0),
        ColorScheme::Dark,
        true,
        11,
    );
    let before = b.clouds().to_vec();
    for _ in 0..100 {
        b.step(Some(Vec2::new(10.0, 10.0)));
    }
    assert_eq!(b.clouds(), &before[..]);
    assert!(b.is_reduced_motion());
}

#[test]
fn resize_rebuilds_grid_and_reseeds_clouds() {
    let mut b = make_backdrop(1024.0, 768.0, 21);
    let before = b.clouds().to_vec();
    b.resize(Viewport::new(400.0, 300.0));
    assert_eq!(b.grid().len(), 41 * 31);
    assert_eq!(b.clouds().len(), before.len());
    assert_ne!(b.clouds(), &before[..]);
    for c in b.clouds() {
        assert!(c.pos.x <= 400.0 && c.pos.y <= 300.0);
    }
}

#[test]
fn color_scheme_change_recolors_in_place() {
    let mut b = make_backdrop(1024.0, 768.0, 8);
    let before = b.clouds().to_vec();
    b.set_color_scheme(ColorScheme::Dark);
    assert_eq!(b.scheme(), ColorScheme::Dark);
    for (old, new) in before.iter().zip(b.clouds()) {
        assert_eq!(old.pos, new.pos);
        assert_eq!(old.vel, new.vel);
        assert_eq!(old.shape, new.shape);
        assert_eq!(new.color, cloud_color(ColorScheme::Dark, new.slot));
    }
}

#[test]
fn render_clears_then_paints_every_dot() {
    let mut b = make_backdrop(320.0, 240.0, 2);
    let mut surface = RecordingSurface::default();
    b.render(None, &mut surface);
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.dots.len(), b.grid().len());
    for ((center, radius, color), g) in surface.dots.iter().zip(b.grid()) {
        assert_eq!(*center, g.pos);
        assert_eq!(*radius, 3.0);
        assert_eq!(*color, shade_point(g.pos, b.clouds(), ColorScheme::Light));
    }
}

#[test]
fn zero_clouds_paint_only_base_tone() {
    let config = BackdropConfig {
        cloud_count: 0,
        ..BackdropConfig::default()
    };
    let mut b = Backdrop::new(config, Viewport::new(100.0, 100.0), ColorScheme::Dark, false, 0);
    let mut surface = RecordingSurface::default();
    b.render(None, &mut surface);
    assert_eq!(surface.dots.len(), 121);
    assert!(surface
        .dots
        .iter()
        .all(|(_, _, c)| *c == base_tone(ColorScheme::Dark)));
}

#[test]
fn config_validation() {
    assert!(BackdropConfig::default().validated().is_ok());
    let zero = BackdropConfig {
        dot_spacing: 0.0,
        ..BackdropConfig::default()
    };
    assert_eq!(zero.validated(), Err(ConfigError::DotSpacing(0.0)));
    let nan = BackdropConfig {
        dot_spacing: f32::NAN,
        ..BackdropConfig::default()
    };
    assert!(matches!(nan.validated(), Err(ConfigError::DotSpacing(_))));
    let too_fine = BackdropConfig {
        dot_spacing: 1e-3,
        ..BackdropConfig::default()
    };
    assert_eq!(too_fine.validated(), Err(ConfigError::DotSpacing(1e-3)));
    let finest = BackdropConfig {
        dot_spacing: 1.0,
        ..BackdropConfig::default()
    };
    assert!(finest.validated().is_ok());
    let radius = BackdropConfig {
        dot_radius: -1.0,
        ..BackdropConfig::default()
    };
    assert_eq!(radius.validated(), Err(ConfigError::DotRadius(-1.0)));
    let speed = BackdropConfig {
        cloud_speed: f32::INFINITY,
        ..BackdropConfig::default()
    };
    assert!(matches!(speed.validated(), Err(ConfigError::CloudSpeed(_))));
    let strength = BackdropConfig {
        mouse_attraction_strength: -0.1,
        ..BackdropConfig::default()
    };
    assert!(matches!(
        strength.validated(),
        Err(ConfigError::AttractionStrength(_))
    ));
}
