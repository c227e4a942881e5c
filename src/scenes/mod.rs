mod basin;

pub use basin::BasinScene;
