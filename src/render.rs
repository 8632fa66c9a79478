use audiograph_core::backend::{DrawCall, FrameInputs, RenderBackend, Surface};
use audiograph_core::config::RendererOptions;
use audiograph_core::pass::{names, Pass, PassKind, UniformValue};
use audiograph_core::palette::Rgb;
use audiograph_core::target::TargetSet;
use web_sys as web;

mod helpers;
mod post;
mod targets;
use post::{PassUniforms, PostResources, SceneColors, SceneUniforms};
use targets::GpuTargets;

/// Surface texture and encoder for the frame being recorded.
struct FrameInFlight {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    supports_depth: bool,

    targets: GpuTargets,
    // built by `prepare` once the chain is known
    post: Option<PostResources>,

    bound: Surface,
    frame: Option<FrameInFlight>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    colors: SceneColors,
}

fn acquire<'f>(
    surface: &wgpu::Surface<'_>,
    device: &wgpu::Device,
    frame: &'f mut Option<FrameInFlight>,
) -> anyhow::Result<&'f mut FrameInFlight> {
    if frame.is_none() {
        let texture = surface.get_current_texture()?;
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });
        *frame = Some(FrameInFlight {
            texture,
            view,
            encoder,
        });
    }
    frame
        .as_mut()
        .ok_or_else(|| anyhow::anyhow!("no frame in flight"))
}

fn rgba(c: Rgb) -> [f32; 4] {
    let [r, g, b] = c.to_f32();
    [r, g, b, 1.0]
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        options: &RendererOptions,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let supports_depth = adapter
            .get_texture_format_features(targets::DEPTH_FORMAT)
            .allowed_usages
            .contains(wgpu::TextureUsages::TEXTURE_BINDING);

        let caps = surface.get_capabilities(&adapter);
        let fallback = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb() == options.gamma_output)
            .unwrap_or(fallback);
        let wanted_alpha = if options.alpha {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            wgpu::CompositeAlphaMode::Opaque
        };
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wanted_alpha)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} {:?} depth_textures={}",
            width,
            height,
            format,
            supports_depth
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            supports_depth,
            targets: GpuTargets::default(),
            post: None,
            bound: Surface::Screen,
            frame: None,
            width,
            height,
            clear_color: wgpu::Color::BLACK,
            colors: SceneColors {
                palette: [[1.0; 4]; 2],
                background: [0.0, 0.0, 0.0, 1.0],
            },
        })
    }

    /// Whether depth textures can be sampled by later passes.
    #[inline]
    pub fn supports_depth(&self) -> bool {
        self.supports_depth
    }

    /// Build pipelines for the final pass chain.
    pub fn prepare(&mut self, passes: &[Pass]) {
        self.post = Some(post::create_post_resources(
            &self.device,
            passes,
            self.config.format,
        ));
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn set_clear_color(&mut self, color: Rgb) {
        let [r, g, b] = color.to_f32();
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
        self.colors.background = rgba(color);
    }

    /// First two entries tint the orb.
    pub fn set_palette(&mut self, palette: &[Rgb]) {
        let mut it = palette.iter().copied().map(rgba);
        if let Some(a) = it.next() {
            self.colors.palette = [a, it.next().unwrap_or(a)];
        }
    }
}

fn prepared(post: &Option<PostResources>) -> anyhow::Result<&PostResources> {
    post.as_ref()
        .ok_or_else(|| anyhow::anyhow!("render pipelines not prepared"))
}

impl<'a> RenderBackend for GpuState<'a> {
    fn sync_targets(&mut self, targets: &TargetSet) -> anyhow::Result<()> {
        let rebuilt = self.targets.sync(&self.device, targets);
        if rebuilt > 0 {
            log::info!("[gpu] rebuilt {} render targets", rebuilt);
        }
        Ok(())
    }

    fn bind_surface(&mut self, surface: Surface) {
        self.bound = surface;
    }

    fn clear_scene_override(&mut self) {}

    fn draw_pass(&mut self, draw: &DrawCall<'_>, _targets: &TargetSet) -> anyhow::Result<()> {
        let post = prepared(&self.post)?;
        let gpu = post
            .passes
            .get(draw.index)
            .ok_or_else(|| anyhow::anyhow!("no pipeline for pass {}", draw.index))?;
        anyhow::ensure!(
            gpu.kind == draw.pass.kind,
            "pass {} changed kind since prepare",
            draw.index
        );

        let uniforms = &draw.pass.uniforms;
        if gpu.kind == PassKind::Scene {
            let float = |name: &str, fallback: f32| {
                uniforms
                    .get(name)
                    .and_then(UniformValue::as_float)
                    .unwrap_or(fallback)
            };
            let u = SceneUniforms::new(
                draw.frame,
                float(names::TIME, draw.frame.time),
                float(names::EFFECT, draw.frame.effect),
                &self.colors,
            );
            self.queue
                .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
        } else {
            let u = PassUniforms::from_uniforms(uniforms);
            self.queue
                .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
        let bind_group = post.bind_group(&self.device, gpu, draw, &self.targets)?;
        let clear = if gpu.kind == PassKind::Scene {
            self.clear_color
        } else {
            wgpu::Color::BLACK
        };

        let frame = acquire(&self.surface, &self.device, &mut self.frame)?;
        let FrameInFlight { view, encoder, .. } = frame;
        let (color_view, depth_view) = match draw.output {
            Surface::Screen => (&*view, None),
            Surface::Target(slot) => {
                let t = self.targets.get(slot)?;
                (&t.color_view, gpu.with_depth.then_some(&t.depth_view))
            }
        };
        post::encode(
            encoder,
            draw.pass.label(),
            color_view,
            depth_view,
            clear,
            &gpu.pipeline,
            &bind_group,
        );
        Ok(())
    }

    fn draw_scene(&mut self, frame: &FrameInputs) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.bound == Surface::Screen,
            "direct scene draw needs the screen bound, got {:?}",
            self.bound
        );
        let post = prepared(&self.post)?;
        let u = SceneUniforms::new(frame, frame.time, frame.effect, &self.colors);
        self.queue
            .write_buffer(&post.direct.uniform_buffer, 0, bytemuck::bytes_of(&u));
        let bind_group = post.scene_bind_group(&self.device, &post.direct);
        let in_flight = acquire(&self.surface, &self.device, &mut self.frame)?;
        post::encode(
            &mut in_flight.encoder,
            "scene_direct",
            &in_flight.view,
            None,
            self.clear_color,
            &post.direct.pipeline,
            &bind_group,
        );
        Ok(())
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };
        self.queue.submit(Some(frame.encoder.finish()));
        frame.texture.present();
        Ok(())
    }
}
