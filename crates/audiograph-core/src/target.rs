//! Off-screen render target descriptions.
//!
//! A [`RenderTarget`] describes the storage a GPU backend must keep for one
//! logical slot: a color texture, an optional sampleable depth texture and any
//! extra color attachments. The description is owned by the compositor and
//! mutated in place on resize; backends watch [`RenderTarget::generation`] to
//! know when their storage is stale.

/// Channel layout of a color texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    Rgb,
    Rgba,
}

/// Component type of a color texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TexelType {
    UnsignedByte,
    Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Sampling and storage policy of one texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureDesc {
    pub format: ColorFormat,
    pub texel: TexelType,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub generate_mipmaps: bool,
}

impl TextureDesc {
    /// Primary color policy shared by every pipeline target.
    pub const PRIMARY: TextureDesc = TextureDesc {
        format: ColorFormat::Rgb,
        texel: TexelType::UnsignedByte,
        min_filter: FilterMode::Nearest,
        mag_filter: FilterMode::Nearest,
        generate_mipmaps: false,
    };
}

/// Sampleable depth texture attached to a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DepthTexture;

/// Logical slots owned by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetSlot {
    PrimaryA,
    PrimaryB,
    /// Scene capture; the only slot that may carry a depth texture.
    Initial,
}

impl TargetSlot {
    pub const ALL: [TargetSlot; 3] = [
        TargetSlot::PrimaryA,
        TargetSlot::PrimaryB,
        TargetSlot::Initial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TargetSlot::PrimaryA => "rt_primary_a",
            TargetSlot::PrimaryB => "rt_primary_b",
            TargetSlot::Initial => "rt_initial",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderTarget {
    label: &'static str,
    width: u32,
    height: u32,
    generation: u64,
    pub texture: TextureDesc,
    pub attachments: Vec<TextureDesc>,
    pub depth_buffer: bool,
    pub stencil_buffer: bool,
    pub depth_texture: Option<DepthTexture>,
}

/// Allocate a target with the fixed filtering/format policy.
///
/// With `attachment_count > 1` a second RGBA float texture is cloned from the
/// primary one, giving a minimal multiple-render-target layout (e.g. a
/// normal/roughness buffer next to the color output).
pub fn create_target(
    label: &'static str,
    width: u32,
    height: u32,
    attachment_count: usize,
) -> RenderTarget {
    let texture = TextureDesc::PRIMARY;
    let mut attachments = Vec::new();
    if attachment_count > 1 {
        attachments.push(TextureDesc {
            format: ColorFormat::Rgba,
            texel: TexelType::Float,
            ..texture
        });
    }
    RenderTarget {
        label,
        width: width.max(1),
        height: height.max(1),
        generation: 0,
        texture,
        attachments,
        depth_buffer: true,
        stencil_buffer: false,
        depth_texture: None,
    }
}

impl RenderTarget {
    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bumped every time the size actually changes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn has_depth_texture(&self) -> bool {
        self.depth_texture.is_some()
    }

    /// Resize in place. Returns `false` when the size is unchanged.
    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.generation += 1;
        true
    }
}

/// The three pipeline targets, indexed by [`TargetSlot`].
#[derive(Clone, Debug)]
pub struct TargetSet {
    primary_a: RenderTarget,
    primary_b: RenderTarget,
    initial: RenderTarget,
}

impl TargetSet {
    /// Create all slots at `(width, height)`; the initial target captures
    /// depth into a texture only when `with_depth_texture` is set.
    pub fn new(width: u32, height: u32, with_depth_texture: bool) -> Self {
        let primary_a = create_target(TargetSlot::PrimaryA.label(), width, height, 0);
        let primary_b = create_target(TargetSlot::PrimaryB.label(), width, height, 0);
        let mut initial = create_target(TargetSlot::Initial.label(), width, height, 0);
        if with_depth_texture {
            initial.depth_texture = Some(DepthTexture);
        }
        Self {
            primary_a,
            primary_b,
            initial,
        }
    }

    pub fn get(&self, slot: TargetSlot) -> &RenderTarget {
        match slot {
            TargetSlot::PrimaryA => &self.primary_a,
            TargetSlot::PrimaryB => &self.primary_b,
            TargetSlot::Initial => &self.initial,
        }
    }

    pub fn initial(&self) -> &RenderTarget {
        &self.initial
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetSlot, &RenderTarget)> {
        TargetSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RenderTarget> {
        [&mut self.primary_a, &mut self.primary_b, &mut self.initial].into_iter()
    }
}
