use std::sync::Arc;
use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Shared GPU context for every viewer window
///
/// Cloning is cheap (Arc), so each window surface keeps its own handle to
/// the same adapter, device and queue.
#[derive(Clone)]
pub struct GpuContext {
    adapter: Arc<Adapter>,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a GPU context compatible with a surface
    pub async fn new_with_surface(instance: &Instance, surface: &Surface<'_>) -> Result<Self> {
        let adapter = Self::request_adapter(instance, surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        log::debug!("using adapter {:?}", adapter.get_info().name);

        Ok(Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Create the instance every viewer surface is created from
    pub fn instance() -> Instance {
        Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        })
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to find appropriate adapter: {:?}", e).into())
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        // Grids wider than the default 2D texture limit need the adapter's own
        let limits = Limits {
            max_texture_dimension_2d: adapter.limits().max_texture_dimension_2d,
            ..Limits::downlevel_defaults()
        };

        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Height Grid Viewer Device"),
                required_features: Features::empty(),
                required_limits: limits,
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| format!("Failed to create device: {:?}", e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_semantics() {
        // Needs real hardware to construct; check the handle stays Clone
        fn assert_clone<T: Clone>() {}
        assert_clone::<GpuContext>();
    }
}
