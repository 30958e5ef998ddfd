pub mod chart;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod time;
