/// Advisory warnings shown to the child. They never block drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// A brush stroke went over the line art
    CrossedBoundary,
    /// The fill tool was used directly on the line art
    FillOnBoundary,
}

impl Warning {
    /// Short sentence for the warning bubble
    pub fn message(&self) -> &'static str {
        match self {
            Self::CrossedBoundary => "Oops! Try to stay inside the lines.",
            Self::FillOnBoundary => "That's a line! Tap inside a shape to fill it.",
        }
    }
}

/// Outline glow state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GlowState {
    #[default]
    Cleared,
    /// Raised, waiting for the next tick to start the timer
    Pending(Warning),
    Active { warning: Warning, until: f64 },
}

/// Timer-driven cue: `Cleared -> Pending -> Active -> Cleared`.
///
/// The host calls [`WarningCue::tick`] once per frame with the current time.
#[derive(Debug, Clone)]
pub struct WarningCue {
    state: GlowState,
    duration: f64,
}

impl WarningCue {
    pub fn new(duration: f64) -> Self {
        Self {
            state: GlowState::Cleared,
            duration,
        }
    }

    pub fn state(&self) -> GlowState {
        self.state
    }

    /// Raise a warning. Raising again while glowing restarts the glow.
    pub fn trigger(&mut self, warning: Warning) {
        log::info!("{}", warning.message());
        self.state = GlowState::Pending(warning);
    }

    pub fn tick(&mut self, now: f64) {
        self.state = match self.state {
            GlowState::Pending(warning) => GlowState::Active {
                warning,
                until: now + self.duration,
            },
            GlowState::Active { until, .. } if now >= until => GlowState::Cleared,
            state => state,
        };
    }

    pub fn clear(&mut self) {
        self.state = GlowState::Cleared;
    }

    pub fn is_glowing(&self) -> bool {
        !matches!(self.state, GlowState::Cleared)
    }

    /// Warning currently on display, if any
    pub fn active_warning(&self) -> Option<Warning> {
        match self.state {
            GlowState::Cleared => None,
            GlowState::Pending(warning) | GlowState::Active { warning, .. } => Some(warning),
        }
    }

    /// Glow strength in `0..=1`, fading out over the last half of the timer
    pub fn intensity(&self, now: f64) -> f32 {
        match self.state {
            GlowState::Cleared => 0.0,
            GlowState::Pending(_) => 1.0,
            GlowState::Active { until, .. } => {
                let remaining = (until - now).max(0.0);
                let half = (self.duration / 2.0).max(f64::EPSILON);
                (remaining / half).min(1.0) as f32
            }
        }
    }
}
