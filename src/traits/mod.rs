pub mod display_sink;

pub use display_sink::*;
