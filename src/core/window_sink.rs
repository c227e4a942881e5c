use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

use super::gpu_context::GpuContext;
use super::gray_surface::GraySurface;
use crate::display::GrayFrame;
use crate::traits::DisplaySink;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Smallest on-screen edge of a new window in logical pixels
const MIN_WINDOW_EDGE: usize = 256;
/// Largest on-screen edge of a new window in logical pixels
const MAX_WINDOW_EDGE: usize = 1024;

/// Frame waiting for the next event pump to reach its window
struct PendingFrame {
    rows: usize,
    cols: usize,
    pixels: Vec<u8>,
}

/// Which window names can still take frames.
///
/// A name becomes unavailable when its window is closed or fails to open;
/// every name does once the event loop has exited.
#[derive(Default)]
struct WindowStates {
    closed: HashSet<String>,
    exited: bool,
}

impl WindowStates {
    fn is_open(&self, name: &str) -> bool {
        !self.exited && !self.closed.contains(name)
    }

    fn close(&mut self, name: String) {
        self.closed.insert(name);
    }

    fn exit(&mut self) {
        self.exited = true;
    }

    fn ensure_open(&self, name: &str) -> Result<()> {
        if self.exited {
            return Err("display event loop has exited".into());
        }
        if self.closed.contains(name) {
            return Err(format!("window '{}' is closed", name).into());
        }
        Ok(())
    }
}

struct ViewerWindow {
    name: String,
    window: Arc<Window>,
    surface: GraySurface,
}

/// Window state driven by the pumped event loop
struct Viewer {
    instance: wgpu::Instance,
    gpu: Option<GpuContext>,
    windows: HashMap<WindowId, ViewerWindow>,
    by_name: HashMap<String, WindowId>,
    pending: HashMap<String, PendingFrame>,
    states: WindowStates,
}

impl Viewer {
    fn new() -> Self {
        Self {
            instance: GpuContext::instance(),
            gpu: None,
            windows: HashMap::new(),
            by_name: HashMap::new(),
            pending: HashMap::new(),
            states: WindowStates::default(),
        }
    }

    /// Push every pending frame to its window, opening windows on first use
    fn flush_pending(&mut self, event_loop: &ActiveEventLoop) {
        let pending = std::mem::take(&mut self.pending);

        for (name, frame) in pending {
            if !self.states.is_open(&name) {
                continue;
            }
            if frame.pixels.is_empty() {
                log::debug!("'{}': nothing to show for an empty frame", name);
                continue;
            }

            let existing = self.by_name.get(&name).copied();
            let id = match existing {
                Some(id) => id,
                None => match self.open_window(event_loop, &name, frame.rows, frame.cols) {
                    Ok(id) => id,
                    Err(e) => {
                        log::warn!("failed to open window '{}': {}", name, e);
                        self.states.close(name);
                        continue;
                    }
                },
            };

            let Some(viewer_window) = self.windows.get_mut(&id) else {
                continue;
            };
            let gray = GrayFrame::new(frame.rows, frame.cols, &frame.pixels);
            match viewer_window.surface.upload(&gray) {
                Ok(()) => viewer_window.window.request_redraw(),
                Err(e) => log::warn!("failed to upload frame for '{}': {}", name, e),
            }
        }
    }

    fn open_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        name: &str,
        rows: usize,
        cols: usize,
    ) -> Result<WindowId> {
        let (width, height) = initial_window_size(rows, cols);
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(name)
                    .with_inner_size(LogicalSize::new(width, height)),
            )?,
        );

        let surface = self.instance.create_surface(window.clone())?;
        let gpu = if let Some(gpu) = self.gpu.clone() {
            gpu
        } else {
            let gpu = pollster::block_on(GpuContext::new_with_surface(&self.instance, &surface))?;
            self.gpu = Some(gpu.clone());
            gpu
        };

        let size = window.inner_size();
        let surface = GraySurface::new(surface, gpu, size.width, size.height)?;

        let id = window.id();
        log::info!("opened window '{}' ({}x{} cells)", name, cols, rows);
        self.windows.insert(
            id,
            ViewerWindow {
                name: name.to_string(),
                window,
                surface,
            },
        );
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    fn close_window(&mut self, id: WindowId) {
        if let Some(closed) = self.windows.remove(&id) {
            log::info!("window '{}' closed", closed.name);
            self.by_name.remove(&closed.name);
            self.states.close(closed.name);
        }
    }
}

impl ApplicationHandler for Viewer {
    // Windows are opened on demand when a frame arrives
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close_window(window_id),
            WindowEvent::Resized(new_size) => {
                if let Some(w) = self.windows.get_mut(&window_id) {
                    w.surface.resize(new_size.width, new_size.height);
                    w.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(w) = self.windows.get(&window_id) {
                    if let Err(e) = w.surface.present() {
                        log::warn!("failed to present '{}': {}", w.name, e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_pending(event_loop);
    }
}

/// Scale a frame so its longer edge lands between the window edge limits
fn initial_window_size(rows: usize, cols: usize) -> (u32, u32) {
    let longest = rows.max(cols).max(1);
    let (width, height) = if longest < MIN_WINDOW_EDGE {
        let scale = MIN_WINDOW_EDGE.div_ceil(longest);
        (cols * scale, rows * scale)
    } else if longest > MAX_WINDOW_EDGE {
        (
            (cols * MAX_WINDOW_EDGE / longest).max(1),
            (rows * MAX_WINDOW_EDGE / longest).max(1),
        )
    } else {
        (cols, rows)
    };
    (width.max(1) as u32, height.max(1) as u32)
}

/// Display sink showing each window name in its own native window.
///
/// `show` queues the frame; `poll` pumps the event loop for at most the
/// given timeout, which opens windows, uploads frames and presents them.
/// The event loop must be created on the main thread, once per process.
pub struct WindowSink {
    event_loop: EventLoop<()>,
    viewer: Viewer,
}

impl WindowSink {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            viewer: Viewer::new(),
        })
    }
}

impl DisplaySink for WindowSink {
    fn show(&mut self, window_name: &str, frame: &GrayFrame<'_>) -> Result<()> {
        self.viewer.states.ensure_open(window_name)?;

        self.viewer.pending.insert(
            window_name.to_string(),
            PendingFrame {
                rows: frame.rows,
                cols: frame.cols,
                pixels: frame.pixels.to_vec(),
            },
        );
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<()> {
        if self.viewer.states.exited {
            return Ok(());
        }

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.viewer)
        {
            log::info!("display event loop exited with code {}", code);
            self.viewer.states.exit();
        }
        Ok(())
    }

    fn is_open(&self, window_name: &str) -> bool {
        self.viewer.states.is_open(window_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_window_stops_taking_frames() {
        let mut states = WindowStates::default();
        assert!(states.is_open("map"));
        assert!(states.ensure_open("map").is_ok());

        states.close("map".to_string());

        assert!(!states.is_open("map"));
        assert!(states.ensure_open("map").is_err());
        assert!(states.is_open("other"));
    }

    #[test]
    fn test_exit_closes_every_window() {
        let mut states = WindowStates::default();
        states.exit();

        assert!(!states.is_open("map"));
        assert!(!states.is_open("other"));
        assert!(states.ensure_open("map").is_err());
    }

    #[test]
    fn test_small_frames_scale_up() {
        assert_eq!(initial_window_size(2, 4), (256, 128));
        assert_eq!(initial_window_size(100, 100), (300, 300));
    }

    #[test]
    fn test_large_frames_scale_down() {
        assert_eq!(initial_window_size(2048, 4096), (1024, 512));
    }

    #[test]
    fn test_mid_frames_keep_size() {
        assert_eq!(initial_window_size(480, 640), (640, 480));
    }

    #[test]
    fn test_degenerate_frames_get_a_pixel() {
        assert_eq!(initial_window_size(0, 0), (1, 1));
        assert_eq!(initial_window_size(1, 3000), (1024, 1));
    }
}
