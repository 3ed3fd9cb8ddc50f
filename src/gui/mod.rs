pub mod app;
pub mod theme;
