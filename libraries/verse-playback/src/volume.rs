//! Volume control with mute memory
//!
//! Volume is a linear 0.0-1.0 level, the range the audio sink accepts.
//! Muting drives the sink to zero but keeps the stored level so unmuting
//! can restore it.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Stored level (0.0-1.0)
    level: f64,

    /// Mute state (preserves level)
    muted: bool,
}

/// Snap a stepped level onto the 0.01 grid
fn snap(level: f64) -> f64 {
    (level * 100.0).round() / 100.0
}

impl Volume {
    /// Create a volume controller
    ///
    /// A level of exactly 0 starts muted.
    pub fn new(level: f64) -> Self {
        let mut volume = Self {
            level: 1.0,
            muted: false,
        };
        volume.set_level(level);
        volume
    }

    /// Set the level, clamped to 0.0-1.0
    ///
    /// Zero mutes; any positive level unmutes. Non-finite input is ignored.
    pub fn set_level(&mut self, level: f64) {
        if !level.is_finite() {
            return;
        }
        self.level = level.clamp(0.0, 1.0);
        self.muted = self.level == 0.0;
    }

    /// Change the level by `delta`, snapped to hundredths
    pub fn step(&mut self, delta: f64) {
        self.set_level(snap(self.level + delta));
    }

    /// Stored level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Mute (level preserved)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the sink should be driven at
    ///
    /// Returns 0.0 if muted, otherwise the stored level.
    pub fn output_level(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
