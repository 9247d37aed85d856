// Shared tuning constants for the backdrop engine and the chrome controllers.

// Backdrop defaults
pub const DEFAULT_DOT_SPACING: f32 = 10.0; // px between lattice points
pub const MIN_DOT_SPACING: f32 = 1.0; // finer lattices are rejected by validation
pub const DEFAULT_DOT_RADIUS: f32 = 3.0;
pub const DEFAULT_CLOUD_SPEED: f32 = 5.0;
pub const DEFAULT_CLOUD_COUNT: usize = 3;
pub const DEFAULT_MOUSE_ATTRACTION_STRENGTH: f32 = 0.0005;

// Cloud spawning
pub const CLOUD_RADIUS_MIN: f32 = 150.0;
pub const CLOUD_RADIUS_MAX: f32 = 250.0;
pub const CLOUD_INITIAL_SPEED_SCALE: f32 = 0.5; // velocity component = (u - 0.5) * speed * scale
pub const CLOUD_MAX_SPEED_FACTOR: f32 = 2.0; // clamp |v| to speed * factor
pub const CLOUD_EDGE_MARGIN_FACTOR: f32 = 0.5; // bounce margin as a fraction of the radius

// Organic shape
pub const SHAPE_SAMPLES: usize = 8; // one offset per 45 degree sector
pub const SHAPE_VARIATION_MIN: f32 = 0.3;
pub const SHAPE_VARIATION_MAX: f32 = 0.5;

// Influence to opacity mapping: base + influence * span
pub const DARK_OPACITY_BASE: f32 = 0.35;
pub const DARK_OPACITY_SPAN: f32 = 0.25;
pub const LIGHT_OPACITY_BASE: f32 = 0.25;
pub const LIGHT_OPACITY_SPAN: f32 = 0.35;

// Chrome visibility
pub const HEADER_TOP_ZONE_PX: f64 = 50.0; // header is always shown above this offset
pub const FOOTER_BOTTOM_ZONE_PX: f64 = 10.0; // footer is always shown this close to the bottom
pub const DEFAULT_HIDE_DELAY_MS: u64 = 3000;
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 10.0;
