//! Native window backend for displaying rendered height frames

pub mod gpu_context;
pub mod gray_surface;
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub mod window_sink;

pub use gpu_context::GpuContext;
pub use gray_surface::GraySurface;
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use window_sink::WindowSink;
