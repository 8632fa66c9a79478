use super::helpers;
use super::targets::{GpuTargets, DEPTH_FORMAT};
use audiograph_core::backend::{DrawCall, FrameInputs};
use audiograph_core::pass::{names, Pass, PassKind, UniformValue, Uniforms};
use audiograph_core::target::{TargetSlot, TextureDesc};

pub(crate) static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub(crate) static SSAO_WGSL: &str = include_str!("../../shaders/ssao.wgsl");
pub(crate) static BLOOM_WGSL: &str = include_str!("../../shaders/bloom.wgsl");

/// Mirrors `PassUniforms` in ssao.wgsl / bloom.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PassUniforms {
    resolution: [f32; 2],
    camera_near: f32,
    camera_far: f32,
    time: f32,
    effect: f32,
    strength: f32,
    threshold: f32,
    radius: f32,
    intensity: f32,
    _pad: [f32; 2],
}

fn float(u: &Uniforms, name: &str) -> f32 {
    u.get(name).and_then(UniformValue::as_float).unwrap_or(0.0)
}

impl PassUniforms {
    pub(crate) fn from_uniforms(u: &Uniforms) -> Self {
        Self {
            resolution: u
                .get(names::RESOLUTION)
                .and_then(UniformValue::as_vec2)
                .unwrap_or([1.0, 1.0]),
            camera_near: float(u, names::CAMERA_NEAR),
            camera_far: float(u, names::CAMERA_FAR),
            time: float(u, names::TIME),
            effect: float(u, names::EFFECT),
            strength: float(u, names::STRENGTH),
            threshold: float(u, names::THRESHOLD),
            radius: float(u, names::RADIUS),
            intensity: float(u, names::INTENSITY),
            _pad: [0.0; 2],
        }
    }
}

/// Mirrors `SceneUniforms` in scene.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    mesh: [f32; 4],
    params: [f32; 4],
    color_a: [f32; 4],
    color_b: [f32; 4],
    background: [f32; 4],
}

/// Colors the scene shader reads besides the frame inputs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SceneColors {
    pub(crate) palette: [[f32; 4]; 2],
    pub(crate) background: [f32; 4],
}

impl SceneUniforms {
    pub(crate) fn new(frame: &FrameInputs, time: f32, effect: f32, colors: &SceneColors) -> Self {
        let (mesh, has_mesh) = match frame.mesh {
            Some(m) => (
                [m.position.x, m.position.y, m.position.z, m.rotation_y],
                1.0,
            ),
            None => ([0.0; 4], 0.0),
        };
        Self {
            view_proj: frame.view_proj.to_cols_array_2d(),
            inv_view_proj: frame.view_proj.inverse().to_cols_array_2d(),
            eye: frame.camera_eye.extend(1.0).to_array(),
            mesh,
            params: [time, effect, has_mesh, 0.0],
            color_a: colors.palette[0],
            color_b: colors.palette[1],
            background: colors.background,
        }
    }
}

/// Pipeline and uniform buffer for one pass of the chain.
pub(crate) struct PassGpu {
    pub(crate) kind: PassKind,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    /// Writes a depth attachment (scene capture into a target).
    pub(crate) with_depth: bool,
}

pub(crate) struct PostResources {
    scene_bgl: wgpu::BindGroupLayout, // uniform
    post_bgl: wgpu::BindGroupLayout,  // uniform+tex+sampler
    ao_bgl: wgpu::BindGroupLayout,    // uniform+tex+sampler+depth
    nearest_sampler: wgpu::Sampler,
    pub(crate) passes: Vec<PassGpu>,
    pub(crate) direct: PassGpu,
}

fn uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn layout(device: &wgpu::Device, label: &str, bgl: &wgpu::BindGroupLayout) -> wgpu::PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bgl],
        push_constant_ranges: &[],
    })
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    passes: &[Pass],
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let color_sample = wgpu::TextureSampleType::Float { filterable: true };
    let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::FRAGMENT | wgpu::ShaderStages::VERTEX,
        )],
    });
    let post_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
            helpers::texture_entry(1, color_sample),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let ao_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("ao_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
            helpers::texture_entry(1, color_sample),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            helpers::texture_entry(3, wgpu::TextureSampleType::Depth),
        ],
    });
    // nearest min/mag, no mipmaps
    let nearest_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("nearest_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
    });
    let ssao_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("ssao_shader"),
        source: wgpu::ShaderSource::Wgsl(SSAO_WGSL.into()),
    });
    let bloom_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("bloom_shader"),
        source: wgpu::ShaderSource::Wgsl(BLOOM_WGSL.into()),
    });
    let pl_scene = layout(device, "pl_scene", &scene_bgl);
    let pl_post = layout(device, "pl_post", &post_bgl);
    let pl_ao = layout(device, "pl_ao", &ao_bgl);
    let offscreen_format = helpers::color_format(&TextureDesc::PRIMARY);

    let gpu_passes = passes
        .iter()
        .map(|pass| {
            let color_format = if pass.is_terminal() {
                swap_format
            } else {
                offscreen_format
            };
            let label = pass.label();
            let (pipeline, size, with_depth) = match pass.kind {
                PassKind::Scene => {
                    let with_depth = !pass.is_terminal();
                    let (entry, depth) = if with_depth {
                        ("fs_scene", Some(DEPTH_FORMAT))
                    } else {
                        ("fs_scene_direct", None)
                    };
                    let p = helpers::make_fullscreen_pipeline(
                        device,
                        label,
                        &pl_scene,
                        &scene_shader,
                        entry,
                        color_format,
                        depth,
                    );
                    (p, std::mem::size_of::<SceneUniforms>(), with_depth)
                }
                PassKind::AmbientOcclusion => {
                    let p = helpers::make_fullscreen_pipeline(
                        device,
                        label,
                        &pl_ao,
                        &ssao_shader,
                        "fs_ssao",
                        color_format,
                        None,
                    );
                    (p, std::mem::size_of::<PassUniforms>(), false)
                }
                PassKind::Bloom => {
                    let p = helpers::make_fullscreen_pipeline(
                        device,
                        label,
                        &pl_post,
                        &bloom_shader,
                        "fs_bloom",
                        color_format,
                        None,
                    );
                    (p, std::mem::size_of::<PassUniforms>(), false)
                }
            };
            PassGpu {
                kind: pass.kind,
                pipeline,
                uniform_buffer: uniform_buffer(device, label, size),
                with_depth,
            }
        })
        .collect();

    let direct = PassGpu {
        kind: PassKind::Scene,
        pipeline: helpers::make_fullscreen_pipeline(
            device,
            "scene_direct",
            &pl_scene,
            &scene_shader,
            "fs_scene_direct",
            swap_format,
            None,
        ),
        uniform_buffer: uniform_buffer(
            device,
            "scene_direct",
            std::mem::size_of::<SceneUniforms>(),
        ),
        with_depth: false,
    };

    PostResources {
        scene_bgl,
        post_bgl,
        ao_bgl,
        nearest_sampler,
        passes: gpu_passes,
        direct,
    }
}

fn texture_slot(u: &Uniforms, name: &str) -> Option<TargetSlot> {
    match u.get(name)? {
        UniformValue::Texture(slot) | UniformValue::DepthTexture(slot) => Some(*slot),
        _ => None,
    }
}

impl PostResources {
    pub(crate) fn scene_bind_group(&self, device: &wgpu::Device, gpu: &PassGpu) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_scene"),
            layout: &self.scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: gpu.uniform_buffer.as_entire_binding(),
            }],
        })
    }

    /// Bind the pass uniforms plus whatever textures it samples.
    pub(crate) fn bind_group(
        &self,
        device: &wgpu::Device,
        gpu: &PassGpu,
        draw: &DrawCall<'_>,
        targets: &GpuTargets,
    ) -> anyhow::Result<wgpu::BindGroup> {
        if gpu.kind == PassKind::Scene {
            return Ok(self.scene_bind_group(device, gpu));
        }
        let uniforms = &draw.pass.uniforms;
        let input = texture_slot(uniforms, names::T_DIFFUSE)
            .or(draw.input)
            .ok_or_else(|| anyhow::anyhow!("{} has no input texture", draw.pass.label()))?;
        let input_view = &targets.get(input)?.color_view;
        let mut entries = vec![
            wgpu::BindGroupEntry {
                binding: 0,
                resource: gpu.uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(input_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&self.nearest_sampler),
            },
        ];
        let layout = if gpu.kind == PassKind::AmbientOcclusion {
            let slot = texture_slot(uniforms, names::T_DEPTH).unwrap_or(TargetSlot::Initial);
            let depth = targets.get(slot)?;
            anyhow::ensure!(
                depth.has_sampled_depth(),
                "{:?} has no sampleable depth texture",
                slot
            );
            entries.push(wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(&depth.depth_view),
            });
            &self.ao_bgl
        } else {
            &self.post_bgl
        };
        Ok(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(draw.pass.label()),
            layout,
            entries: &entries,
        }))
    }
}

/// Record one fullscreen draw.
pub(crate) fn encode(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    depth: Option<&wgpu::TextureView>,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: depth.map(|view| wgpu::RenderPassDepthStencilAttachment {
            view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bind_group, &[]);
    r.draw(0..3, 0..1);
    drop(r);
}
