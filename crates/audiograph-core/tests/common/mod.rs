// Shared fakes for host-side tests: a backend that records every call and an
// audio source that counts collaborator calls.

#![allow(dead_code)]

use audiograph_core::backend::{DrawCall, FrameInputs, RenderBackend, Surface};
use audiograph_core::pass::{PassKind, Uniforms};
use audiograph_core::target::{TargetSet, TargetSlot};
use audiograph_core::{AudioSource, ReadySignal};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Sync { sizes: Vec<(TargetSlot, (u32, u32))> },
    Bind(Surface),
    ClearOverride,
    Draw {
        index: usize,
        kind: PassKind,
        input: Option<TargetSlot>,
        output: Surface,
        uniforms: Uniforms,
    },
    DirectScene,
    Present,
}

#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub fail_draws: bool,
}

impl RecordingBackend {
    pub fn draws(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Draw { .. }))
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn sync_targets(&mut self, targets: &TargetSet) -> anyhow::Result<()> {
        let sizes = targets.iter().map(|(slot, t)| (slot, t.size())).collect();
        self.calls.push(Call::Sync { sizes });
        Ok(())
    }

    fn bind_surface(&mut self, surface: Surface) {
        self.calls.push(Call::Bind(surface));
    }

    fn clear_scene_override(&mut self) {
        self.calls.push(Call::ClearOverride);
    }

    fn draw_pass(&mut self, draw: &DrawCall<'_>, _targets: &TargetSet) -> anyhow::Result<()> {
        if self.fail_draws {
            anyhow::bail!("device lost");
        }
        self.calls.push(Call::Draw {
            index: draw.index,
            kind: draw.pass.kind,
            input: draw.input,
            output: draw.output,
            uniforms: draw.pass.uniforms.clone(),
        });
        Ok(())
    }

    fn draw_scene(&mut self, _frame: &FrameInputs) -> anyhow::Result<()> {
        if self.fail_draws {
            anyhow::bail!("device lost");
        }
        self.calls.push(Call::DirectScene);
        Ok(())
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAudio {
    pub queued: u32,
    pub skipped: u32,
    pub played: u32,
    pub updates: u32,
    pub last_effect: Option<f32>,
    pub ready: ReadySignal,
}

impl AudioSource for FakeAudio {
    fn queue(&mut self) {
        self.queued += 1;
    }

    fn skip(&mut self) {
        self.skipped += 1;
    }

    fn play_queued(&mut self) {
        self.played += 1;
    }

    fn update(&mut self, _dt_sec: f32) {
        self.updates += 1;
    }

    fn ready(&self) -> ReadySignal {
        self.ready.clone()
    }

    fn set_effect(&mut self, level: f32) {
        self.last_effect = Some(level);
    }
}
