//! Input mapping: keys and device tilt to game triggers

/// A discrete trigger for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Flap (or start from the title screen)
    Jump,
    Restart,
    ToggleAutopilot,
    /// Sound on/off (front-end only)
    ToggleMute,
}

impl InputAction {
    /// Map a `KeyboardEvent.code` value
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" | "KeyW" => Some(InputAction::Jump),
            "KeyR" | "Enter" => Some(InputAction::Restart),
            "KeyA" => Some(InputAction::ToggleAutopilot),
            "KeyM" => Some(InputAction::ToggleMute),
            _ => None,
        }
    }
}

/// Default forward-tilt angle (degrees) that counts as a flap
pub const DEFAULT_TILT_THRESHOLD: f32 = 25.0;
/// The device must come back this far below the threshold to re-arm
pub const TILT_HYSTERESIS: f32 = 8.0;

/// Edge-triggered tilt detector
///
/// Fires once when the tilt crosses the threshold upward, then stays quiet
/// until the device has been brought back below `threshold - TILT_HYSTERESIS`.
#[derive(Debug, Clone)]
pub struct TiltTrigger {
    pub threshold: f32,
    /// Resting angle captured from the first sample
    baseline: Option<f32>,
    armed: bool,
}

impl Default for TiltTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_TILT_THRESHOLD)
    }
}

impl TiltTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            baseline: None,
            armed: true,
        }
    }

    /// Feed one orientation sample (`beta`, degrees). Returns true on a crossing.
    pub fn sample(&mut self, beta: f32) -> bool {
        if !beta.is_finite() {
            return false;
        }
        let baseline = *self.baseline.get_or_insert(beta);
        let tilt = beta - baseline;

        if self.armed && tilt >= self.threshold {
            self.armed = false;
            return true;
        }
        if !self.armed && tilt < self.threshold - TILT_HYSTERESIS {
            self.armed = true;
        }
        false
    }

    /// Forget the resting angle (e.g. after the device was put down)
    pub fn recalibrate(&mut self) {
        self.baseline = None;
        self.armed = true;
    }
}
