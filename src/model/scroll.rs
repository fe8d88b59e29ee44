//! Scroll physics
//!
//! Velocity and acceleration are integrated over wall-clock ticks; whole
//! units of travelled distance become discrete scroll clicks. Each unit is
//! emitted exactly once.

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Mouse button that produces one tick in this direction
    pub const fn button(self) -> u8 {
        match self {
            ScrollDirection::Up => 4,
            ScrollDirection::Down => 5,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            ScrollDirection::Up => ScrollDirection::Down,
            ScrollDirection::Down => ScrollDirection::Up,
        }
    }
}

/// Tunables for the integrator, in units/s and units/s²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollParams {
    pub speed: f64,
    pub terminal_velocity: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub fling_velocity: f64,
}

impl ScrollParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            speed: config.scroll_speed,
            terminal_velocity: config.scroll_max_speed,
            acceleration: config.scroll_acceleration,
            deceleration: config.scroll_deceleration,
            fling_velocity: config.scroll_fling_velocity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    velocity: f64,
    acceleration: f64,
    distance: f64,
    emitted: u64,
    direction: ScrollDirection,
    params: ScrollParams,
}

impl ScrollState {
    pub fn new(params: ScrollParams, direction: ScrollDirection) -> Self {
        Self {
            velocity: 0.0,
            acceleration: 0.0,
            distance: 0.0,
            emitted: 0,
            direction,
            params,
        }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: ScrollDirection) {
        self.direction = direction;
    }

    pub fn is_stopped(&self) -> bool {
        self.velocity <= 0.0
    }

    /// Speed up; starts at the initial speed when at rest
    pub fn accelerate(&mut self) {
        self.acceleration = self.params.acceleration;
        if self.velocity <= 0.0 {
            self.velocity = self.params.speed.min(self.params.terminal_velocity);
        }
    }

    /// Coast down towards rest
    pub fn decelerate(&mut self) {
        self.acceleration = self.params.deceleration;
    }

    /// Add a velocity impulse
    pub fn fling(&mut self) {
        self.velocity = (self.velocity + self.params.fling_velocity)
            .clamp(0.0, self.params.terminal_velocity);
    }

    /// Bring everything to rest
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.acceleration = 0.0;
        self.distance = 0.0;
        self.emitted = 0;
    }

    /// Advance by `elapsed_ms` and return how many scroll clicks are due.
    ///
    /// Velocity saturates at zero and at terminal velocity; distance is the
    /// exact integral of that clamped velocity.
    pub fn tick(&mut self, elapsed_ms: f64) -> u32 {
        let s = (elapsed_ms / 1000.0).max(0.0);
        let v0 = self.velocity;
        let a = self.acceleration;
        let terminal = self.params.terminal_velocity;

        // Time until the velocity saturates within this tick
        let saturate_at = if a > 0.0 {
            ((terminal - v0) / a).max(0.0)
        } else if a < 0.0 {
            (v0 / -a).max(0.0)
        } else {
            f64::INFINITY
        };

        if a == 0.0 || s <= saturate_at {
            self.distance += v0 * s + 0.5 * a * s * s;
            self.velocity = v0 + a * s;
        } else {
            let t1 = saturate_at;
            let v1 = if a > 0.0 { terminal } else { 0.0 };
            self.distance += v0 * t1 + 0.5 * a * t1 * t1 + v1 * (s - t1);
            self.velocity = v1;
        }
        self.velocity = self.velocity.clamp(0.0, terminal);

        let whole = self.distance.max(0.0).floor() as u64;
        let due = whole.saturating_sub(self.emitted);
        self.emitted = self.emitted.max(whole);

        if self.velocity <= 0.0 {
            self.distance = 0.0;
            self.emitted = 0;
        }

        due.min(u32::MAX as u64) as u32
    }
}
