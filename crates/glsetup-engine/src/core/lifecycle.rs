use super::error::BootstrapError;

/// Bootstrap phase.
///
/// Phases only move forward:
/// `Uninitialized -> PlatformReady -> WindowOpen -> Running -> Closed`.
/// `Failed` can be entered from any non-terminal phase.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Phase {
    Uninitialized,
    /// Event loop exists; no window yet.
    PlatformReady,
    /// Window, context and surface exist and the context is current.
    WindowOpen,
    /// GL entry points are loaded; frames may be rendered.
    Running,
    Closed,
    Failed(BootstrapError),
}

impl Phase {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Closed | Phase::Failed(_))
    }
}

/// Tracks bootstrap progress independently of the platform loop.
///
/// The runtime reports each step here. Out-of-order steps are rejected and
/// logged, so the phase always reflects what actually happened.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    window_created: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            window_created: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns `true` once a window was opened, even if it is gone now.
    #[inline]
    pub fn window_created(&self) -> bool {
        self.window_created
    }

    /// Frames may only be rendered while running.
    #[inline]
    pub fn can_render(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn platform_ready(&mut self) -> bool {
        self.advance(Phase::Uninitialized, Phase::PlatformReady)
    }

    pub fn window_opened(&mut self) -> bool {
        let ok = self.advance(Phase::PlatformReady, Phase::WindowOpen);
        self.window_created |= ok;
        ok
    }

    pub fn loader_ready(&mut self) -> bool {
        self.advance(Phase::WindowOpen, Phase::Running)
    }

    pub fn closed(&mut self) -> bool {
        self.advance(Phase::Running, Phase::Closed)
    }

    /// Records a fatal error. The first failure wins.
    pub fn fail(&mut self, err: BootstrapError) -> bool {
        if self.phase.is_terminal() {
            log::warn!("ignoring failure after {:?}: {err}", self.phase);
            return false;
        }

        log::error!("bootstrap failed in {:?}: {err}", self.phase);
        self.phase = Phase::Failed(err);
        true
    }

    /// Final result once the loop has returned.
    ///
    /// A loop that stops before the window is closed reports the step that
    /// never completed. A loop that stops while running (the platform tore
    /// it down) counts as a normal exit.
    pub fn into_outcome(self) -> Result<(), BootstrapError> {
        match self.phase {
            Phase::Closed | Phase::Running => Ok(()),
            Phase::Failed(err) => Err(err),
            Phase::Uninitialized => Err(BootstrapError::PlatformInit(
                "event loop was never created".to_string(),
            )),
            Phase::PlatformReady => Err(BootstrapError::WindowCreation(
                "event loop exited before a window was created".to_string(),
            )),
            Phase::WindowOpen => Err(BootstrapError::LoaderInit(
                "event loop exited before GL functions were loaded".to_string(),
            )),
        }
    }

    fn advance(&mut self, from: Phase, to: Phase) -> bool {
        if self.phase != from {
            log::warn!("rejected transition to {to:?} from {:?}", self.phase);
            return false;
        }

        log::debug!("lifecycle: {from:?} -> {to:?}");
        self.phase = to;
        true
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
