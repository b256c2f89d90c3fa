// Presentation layer - interactive command surface
pub mod app_state;
pub mod handlers;
