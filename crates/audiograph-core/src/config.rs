//! Runtime configuration resolved once at startup.
//!
//! Nothing here is re-queried per frame: the capability flag and platform
//! classification are decided while the pipeline is built and then threaded
//! through as plain values.

/// Options handed to the graphics context when it is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererOptions {
    pub antialias: bool,
    pub alpha: bool,
    pub stencil: bool,
    /// Present through an sRGB surface (gamma 2.2 output).
    pub gamma_output: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            antialias: false,
            alpha: false,
            stencil: false,
            gamma_output: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Depth textures can be sampled; gates the ambient-occlusion pass.
    pub supports_depth: bool,
    pub renderer: RendererOptions,
}

impl PipelineConfig {
    pub fn new(supports_depth: bool) -> Self {
        Self {
            supports_depth,
            renderer: RendererOptions::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

/// User-agent derived platform classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Platform {
    pub is_mobile: bool,
    pub is_ios: bool,
}

impl Platform {
    pub fn from_user_agent(ua: &str) -> Self {
        let lower = ua.to_ascii_lowercase();
        let is_ios = lower.contains("iphone") || lower.contains("ipad");
        let is_mobile = is_ios
            || lower.contains("android")
            || lower.contains("ipod")
            || lower.contains("iemobile")
            || lower.contains("opera mini")
            || lower.contains("blackberry")
            || lower.contains("mobile");
        Self { is_mobile, is_ios }
    }

    /// Autoplaying media is not attempted on iOS.
    #[inline]
    pub fn supports_media(&self) -> bool {
        !self.is_ios
    }
}
