pub mod params;
pub mod platform;
