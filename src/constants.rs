// DOM hooks, media queries and loop tuning used by the web front-end.

// Elements picked up by the auto-mount in `start`
pub const BACKDROP_CANVAS_ID: &str = "backdrop-canvas";
pub const HEADER_ID: &str = "site-header";
pub const FOOTER_ID: &str = "site-footer";

// Classes toggled on mounted chrome elements
pub const VISIBLE_CLASS: &str = "visible";
pub const HIDDEN_CLASS: &str = "hidden";

// Environment queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// Frame loop diagnostics: log average frame cost every N frames
pub const FRAME_STATS_INTERVAL: u32 = 600;
