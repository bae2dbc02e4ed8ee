use recycler::math;

/// Default smooth-scroll speed, in content units per frame.
pub const DEFAULT_SMOOTH_SCROLL_SPEED: f64 = 50.0;

/// Frame-stepped scrolling toward a target offset at a constant speed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothScroll {
    pub target: f64,
    /// Distance covered per frame. Non-positive speeds jump straight to the target.
    pub speed: f64,
}

impl SmoothScroll {
    pub fn new(target: f64, speed: f64) -> Self {
        Self { target, speed }
    }

    pub fn is_done(&self, offset: f64) -> bool {
        offset == self.target
    }

    /// Returns the offset for the next frame, or `None` once `current` is at the target.
    ///
    /// The last step lands exactly on the target.
    pub fn step(&self, current: f64) -> Option<f64> {
        if self.is_done(current) {
            return None;
        }
        if self.speed <= 0.0 {
            return Some(self.target);
        }
        let next = if current > self.target {
            (current - self.speed).max(self.target)
        } else {
            (current + self.speed).min(self.target)
        };
        Some(next)
    }
}

/// Velocity-driven scrolling after a fling, decaying by `deceleration_rate` per second.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inertia {
    /// Content units per second.
    pub velocity: f64,
    pub deceleration_rate: f64,
}

impl Inertia {
    /// Speed (units per second) below which inertia stops.
    pub const STOP_VELOCITY: f64 = 1.0;

    pub fn new(velocity: f64, deceleration_rate: f64) -> Self {
        Self {
            velocity,
            deceleration_rate,
        }
    }

    /// Decays the velocity over `dt` seconds and returns the next offset, or `None` once the
    /// velocity has dropped below [`Self::STOP_VELOCITY`].
    pub fn step(&mut self, current: f64, dt: f64) -> Option<f64> {
        self.velocity *= math::powf(self.deceleration_rate, dt);
        if self.velocity > -Self::STOP_VELOCITY && self.velocity < Self::STOP_VELOCITY {
            self.velocity = 0.0;
            return None;
        }
        Some(current + self.velocity * dt)
    }
}

/// A cooperative scroll animation, advanced one frame at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAnimation {
    Smooth(SmoothScroll),
    Inertia(Inertia),
}

impl ScrollAnimation {
    /// Computes the next frame's offset from `current`. `dt` is the frame time in seconds.
    pub fn step(&mut self, current: f64, dt: f64) -> Option<f64> {
        match self {
            Self::Smooth(s) => s.step(current),
            Self::Inertia(i) => i.step(current, dt),
        }
    }

    pub fn is_done(&self, offset: f64) -> bool {
        match self {
            Self::Smooth(s) => s.is_done(offset),
            Self::Inertia(i) => i.velocity == 0.0,
        }
    }
}
