//! Ordered post-processing chain and the targets it renders through.

use crate::backend::{DrawCall, FrameInputs, RenderBackend, Surface};
use crate::error::ChainError;
use crate::pass::{names, Pass, PassKind, PassRole, UniformValue};
use crate::resize::{resize_targets, Viewport};
use crate::target::{TargetSet, TargetSlot};

/// Ordered passes; insertion order is render order.
#[derive(Clone, Debug, Default)]
pub struct PassChain {
    passes: Vec<Pass>,
}

impl PassChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pass(&mut self, pass: Pass) {
        self.passes.push(pass);
    }

    #[inline]
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn contains(&self, kind: PassKind) -> bool {
        self.passes.iter().any(|p| p.kind == kind)
    }

    /// Fewer than two passes never go through intermediate targets.
    #[inline]
    pub fn composites(&self) -> bool {
        self.passes.len() > 1
    }

    /// Exactly one terminal pass, in last position.
    pub fn validate(&self) -> Result<(), ChainError> {
        let terminals: Vec<usize> = self
            .passes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_terminal())
            .map(|(i, _)| i)
            .collect();
        match terminals.as_slice() {
            [] => Err(ChainError::NoTerminal),
            [index] if *index + 1 == self.passes.len() => Ok(()),
            [index] => Err(ChainError::TerminalNotLast {
                label: self.passes[*index].label().to_string(),
                index: *index,
            }),
            many => Err(ChainError::MultipleTerminals { count: many.len() }),
        }
    }

    /// Write `value` into every pass declaring `name`; returns how many did.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> usize {
        self.passes
            .iter_mut()
            .map(|p| p.uniforms.set(name, value))
            .filter(|set| *set)
            .count()
    }

    /// Input and output of each pass, in render order.
    ///
    /// Pass 0 captures into the initial target, intermediate passes after it
    /// alternate between the two primary targets, the terminal pass writes
    /// the screen.
    pub fn routes(&self) -> Vec<(Option<TargetSlot>, Surface)> {
        let mut routes = Vec::with_capacity(self.passes.len());
        let mut input = None;
        let mut use_a = true;
        for (i, pass) in self.passes.iter().enumerate() {
            let output = if pass.role == PassRole::Terminal {
                Surface::Screen
            } else if i == 0 {
                Surface::Target(TargetSlot::Initial)
            } else {
                let slot = if use_a {
                    TargetSlot::PrimaryA
                } else {
                    TargetSlot::PrimaryB
                };
                use_a = !use_a;
                Surface::Target(slot)
            };
            routes.push((input, output));
            if let Surface::Target(slot) = output {
                input = Some(slot);
            }
        }
        routes
    }
}

/// Owns the pipeline targets and the pass chain rendering through them.
pub struct Compositor {
    chain: PassChain,
    targets: TargetSet,
    validated: bool,
}

impl Compositor {
    pub fn new(targets: TargetSet) -> Self {
        Self {
            chain: PassChain::new(),
            targets,
            validated: false,
        }
    }

    pub fn add_pass(&mut self, pass: Pass) {
        self.chain.add_pass(pass);
        self.validated = false;
    }

    #[inline]
    pub fn passes(&self) -> &[Pass] {
        self.chain.passes()
    }

    #[inline]
    pub fn chain(&self) -> &PassChain {
        &self.chain
    }

    #[inline]
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Physical size of the scene capture target.
    pub fn resolution(&self) -> [f32; 2] {
        let (w, h) = self.targets.initial().size();
        [w as f32, h as f32]
    }

    /// Apply the viewport to every target; returns how many changed.
    pub fn resize(&mut self, viewport: &Viewport) -> usize {
        let changed = resize_targets(viewport, self.targets.iter_mut());
        if changed > 0 {
            let (w, h) = viewport.physical_size();
            log::info!("[resize] targets -> {}x{}", w, h);
        }
        changed
    }

    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> usize {
        self.chain.set_uniform(name, value)
    }

    /// Push the capture target size into every `resolution` uniform.
    pub fn push_resolution(&mut self) -> usize {
        let res = self.resolution();
        self.chain.set_uniform(names::RESOLUTION, UniformValue::Vec2(res))
    }

    pub fn validate(&mut self) -> Result<(), ChainError> {
        if !self.validated {
            self.chain.validate()?;
            self.validated = true;
        }
        Ok(())
    }

    /// Run every pass once, in insertion order.
    ///
    /// A chain of zero or one pass is not composited: the scene is drawn
    /// straight to the screen and no target is touched.
    pub fn render<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        frame: &FrameInputs,
    ) -> anyhow::Result<()> {
        if !self.chain.composites() {
            return backend.draw_scene(frame);
        }
        self.validate()?;
        backend.sync_targets(&self.targets)?;
        let routes = self.chain.routes();
        for (index, (input, output)) in routes.into_iter().enumerate() {
            if let Some(slot) = input {
                self.chain.passes[index]
                    .uniforms
                    .set(names::T_DIFFUSE, UniformValue::Texture(slot));
            }
            let draw = DrawCall {
                index,
                pass: &self.chain.passes[index],
                input,
                output,
                frame,
            };
            backend.draw_pass(&draw, &self.targets)?;
        }
        Ok(())
    }
}
