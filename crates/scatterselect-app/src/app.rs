//! Core application state and lifecycle.

use crate::scatter::ScatterPlot;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use scatterselect_core::{
    BoundingBox, IndicatorState, MouseButton, PointerEvent, RectangleSelector, SelectionInput,
    SelectorConfig,
};
use scatterselect_render::{GridStyle, RenderContext, Renderer, RendererError, VelloRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// Margin kept free of points around the plot, in physical pixels.
const PLOT_MARGIN: f64 = 40.0;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub grid_style: GridStyle,
    pub background_color: Color,
    /// Number of scatter points to generate.
    pub point_count: usize,
    /// Seed for the generated points.
    pub seed: u32,
    /// Selector style and behavior.
    pub selector: SelectorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "ScatterSelect".to_string(),
            width: 1280,
            height: 800,
            grid_style: GridStyle::Lines,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            point_count: 400,
            seed: 0x5EED,
            selector: SelectorConfig::default(),
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    plot_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // Selection
    selector: RectangleSelector<IndicatorState>,
    input: SelectionInput,
    /// Box reported by the selector, waiting to be applied to the plot.
    reported: Rc<RefCell<Option<BoundingBox>>>,

    plot: ScatterPlot,
}

impl AppState {
    /// Route a pointer event through the selector and apply any finished selection.
    fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.input.handle_pointer_event(event, &mut self.selector);

        let finished = self.reported.borrow_mut().take();
        if let Some(bbox) = finished {
            let count = self.plot.select_in(&bbox);
            log::info!(
                "Selected {} of {} points in x={} y={} w={} h={}",
                count,
                self.plot.len(),
                bbox.x,
                bbox.y,
                bbox.width,
                bbox.height
            );
        }
        self.window.request_redraw();
    }

    fn render(&mut self, render_cx: &vello::util::RenderContext, config: &AppConfig) {
        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let render_ctx = RenderContext::new(Size::new(width as f64, height as f64))
            .with_background(config.background_color)
            .with_grid(config.grid_style)
            .with_points(self.plot.plot_points())
            .with_indicator(self.selector.indicator());
        self.plot_renderer.build_scene(&render_ctx);
        let base_color = self.plot_renderer.background_color(&render_ctx);
        let scene = self.plot_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match self.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello renders through compute shaders into an Rgba8Unorm storage texture,
        // which is then blitted to the surface format.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = self.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("Failed to render: {:?}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        self.texture_blitter
            .copy(device, &mut encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: vello::util::RenderContext,
    /// First fatal error raised inside the event loop.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: vello::util::RenderContext::new(),
            error: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Create the window, surface and renderer.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let surface = pollster::block_on(self.render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &self.render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let plot_area = Rect::new(0.0, 0.0, width as f64, height as f64).inset(-PLOT_MARGIN);
        let plot = ScatterPlot::generate(self.config.point_count, plot_area, self.config.seed);

        let reported = Rc::new(RefCell::new(None));
        let sink = reported.clone();
        let selector = RectangleSelector::with_config(
            IndicatorState::new(),
            &self.config.selector,
            move |bbox| {
                *sink.borrow_mut() = Some(bbox);
            },
        );
        let input = SelectionInput::new().with_end_on_abandon(self.config.selector.end_on_abandon);

        log::info!(
            "ScatterSelect initialized with {} points; drag with the left button to select",
            plot.len()
        );

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            plot_renderer: VelloRenderer::new(),
            texture_blitter,
            selector,
            input,
            reported,
            plot,
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Initialization failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                self.render_cx
                    .resize_surface(&mut state.surface, size.width, size.height);
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                state.render(&self.render_cx, &self.config);
            }

            other => {
                if let Some(pointer) = pointer_event(&other, &state.input) {
                    state.handle_pointer_event(pointer);
                }
            }
        }
    }
}

/// Map a window event to the pointer event it stands for, if any.
///
/// Only focus loss cancels a drag. `CursorLeft` is ignored because some
/// platforms report it while the button is still held outside the window.
fn pointer_event(event: &WindowEvent, input: &SelectionInput) -> Option<PointerEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(PointerEvent::Move {
            position: Point::new(position.x, position.y),
        }),
        WindowEvent::MouseInput {
            state: btn_state,
            button,
            ..
        } => {
            let button = match button {
                winit::event::MouseButton::Left => MouseButton::Left,
                winit::event::MouseButton::Right => MouseButton::Right,
                winit::event::MouseButton::Middle => MouseButton::Middle,
                _ => return None,
            };
            input.button_event(button, *btn_state == ElementState::Pressed)
        }
        WindowEvent::Focused(false) => Some(PointerEvent::Cancel),
        _ => None,
    }
}
