pub mod annotation;
pub mod app_state;
pub mod dataset;
pub mod theme;
