use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use walker_assets::{Model, Playhead};
use walker_input::{Bindings, Control, InputState, map_key};
use walker_render::Projection;
use walker_render_wgpu::WgpuRenderer;
use walker_sim::Walker;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "walker-desktop", about = "First/third person scene walker")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Model file to load
    #[arg(long, default_value = "model.glb")]
    model: PathBuf,

    /// Fallback model file when the primary fails
    #[arg(long, default_value = "model.gltf")]
    fallback: PathBuf,

    /// Key bindings file (missing or malformed falls back to defaults)
    #[arg(long, default_value = "bindings.json")]
    bindings: PathBuf,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "75.0")]
    fov: f32,
}

/// Application state: everything that exists independent of the GPU.
struct AppState {
    walker: Walker,
    input: InputState,
    bindings: Bindings,
    projection: Projection,
    model: Option<Model>,
    model_rx: Receiver<Model>,
    playhead: Option<Playhead>,
    last_frame: Instant,
}

impl AppState {
    fn new(cli: &Cli) -> Self {
        let bindings = Bindings::load_or_default(&cli.bindings);
        let projection = Projection {
            fov_y: cli.fov.to_radians(),
            ..Projection::default()
        };
        // Loading starts immediately and runs beside the event loop; frames
        // before delivery render without a model.
        let model_rx = walker_assets::spawn_loader(cli.model.clone(), cli.fallback.clone());

        Self {
            walker: Walker::new(),
            input: InputState::new(),
            bindings,
            projection,
            model: None,
            model_rx,
            playhead: None,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let Some(control) = map_key(&self.bindings, event.physical_key, &event.logical_key)
        else {
            return;
        };
        self.input
            .key_event(control, event.state == ElementState::Pressed, event.repeat);
    }

    /// One simulation frame: view toggle edge, integration, animation.
    fn frame(&mut self, dt: f32) {
        if self.input.just_pressed(Control::ToggleView) {
            self.walker.toggle_view();
        }
        self.walker.step(&self.input);
        if let Some(playhead) = &mut self.playhead {
            playhead.advance(dt);
        }
        self.input.clear_transients();
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        egui::Area::new(egui::Id::new("hud"))
            .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.heading("Scene Walker");
                    ui.label(self.walker.view().label());
                    let p = self.walker.position();
                    ui.label(format!("Position: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
                    match &self.model {
                        Some(model) => {
                            ui.label(format!(
                                "Model: {} ({} meshes)",
                                model.name,
                                model.meshes.len()
                            ));
                        }
                        None => {
                            ui.label("Model: loading...");
                        }
                    }
                    ui.separator();
                    ui.small("WASD move | arrows look | Space/C fly | Shift sprint | V view");
                });
            });
    }
}

struct WalkerApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl WalkerApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    /// Pick up the loader's delivery, if it has arrived.
    fn poll_model(&mut self) {
        if self.state.model.is_some() {
            return;
        }
        let Ok(model) = self.state.model_rx.try_recv() else {
            return;
        };
        if let (Some(device), Some(renderer)) = (&self.device, &mut self.renderer) {
            renderer.upload_model(device, &model);
        }
        self.state.playhead = Playhead::for_clips(&model.clips);
        self.state.model = Some(model);
    }
}

impl ApplicationHandler for WalkerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Scene Walker")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("walker_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.projection.set_aspect(size.width, size.height);

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.projection.set_aspect(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.state.handle_key(&key_event);
            }
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never send key-up events.
                self.state.input.release_all();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;

                self.poll_model();
                self.state.frame(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &self.state.walker.camera_pose(),
                        &self.state.projection,
                    );
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("walker-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = WalkerApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
