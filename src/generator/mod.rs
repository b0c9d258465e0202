pub mod dispatch;
pub mod params;
pub mod render;
