use super::helpers;
use audiograph_core::target::{RenderTarget, TargetSet, TargetSlot};
use fnv::FnvHashMap;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// GPU storage backing one [`RenderTarget`] description.
///
/// WebGPU textures cannot change size, so a resize of the description
/// recreates the storage here; the description itself stays in place.
pub(crate) struct GpuTarget {
    generation: u64,
    size: (u32, u32),
    sampled_depth: bool,
    _color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    _depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    _attachments: Vec<(wgpu::Texture, wgpu::TextureView)>,
}

impl GpuTarget {
    fn new(device: &wgpu::Device, target: &RenderTarget) -> Self {
        let (w, h) = target.size();
        let color_usage =
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (color_tex, color_view) = helpers::create_texture(
            device,
            target.label(),
            w,
            h,
            helpers::color_format(&target.texture),
            color_usage,
        );
        let depth_usage = if target.has_depth_texture() {
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING
        } else {
            wgpu::TextureUsages::RENDER_ATTACHMENT
        };
        let (depth_tex, depth_view) =
            helpers::create_texture(device, "target_depth", w, h, DEPTH_FORMAT, depth_usage);
        let attachments = target
            .attachments
            .iter()
            .map(|desc| {
                helpers::create_texture(
                    device,
                    "target_attachment",
                    w,
                    h,
                    helpers::color_format(desc),
                    color_usage,
                )
            })
            .collect();
        Self {
            generation: target.generation(),
            size: (w, h),
            sampled_depth: target.has_depth_texture(),
            _color_tex: color_tex,
            color_view,
            _depth_tex: depth_tex,
            depth_view,
            _attachments: attachments,
        }
    }

    #[inline]
    pub(crate) fn has_sampled_depth(&self) -> bool {
        self.sampled_depth
    }

    fn is_current(&self, target: &RenderTarget) -> bool {
        self.generation == target.generation()
            && self.size == target.size()
            && self.sampled_depth == target.has_depth_texture()
    }
}

#[derive(Default)]
pub(crate) struct GpuTargets {
    slots: FnvHashMap<TargetSlot, GpuTarget>,
}

impl GpuTargets {
    /// Recreate storage for every slot whose description changed.
    pub(crate) fn sync(&mut self, device: &wgpu::Device, targets: &TargetSet) -> usize {
        let mut rebuilt = 0;
        for (slot, target) in targets.iter() {
            let stale = self
                .slots
                .get(&slot)
                .map_or(true, |gpu| !gpu.is_current(target));
            if stale {
                self.slots.insert(slot, GpuTarget::new(device, target));
                rebuilt += 1;
            }
        }
        rebuilt
    }

    pub(crate) fn get(&self, slot: TargetSlot) -> anyhow::Result<&GpuTarget> {
        self.slots
            .get(&slot)
            .ok_or_else(|| anyhow::anyhow!("target {:?} not allocated", slot))
    }
}
