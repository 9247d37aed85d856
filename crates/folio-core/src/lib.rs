pub mod backdrop;
pub mod cloud;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod palette;
pub mod scroll;
pub mod visibility;

pub use backdrop::*;
pub use cloud::*;
pub use config::*;
pub use error::*;
pub use grid::*;
pub use palette::*;
pub use scroll::*;
pub use visibility::*;
