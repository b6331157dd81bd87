use super::{Physics, Shape};

const INITIAL_SIZE: f32 = 0.05;

// One launch interpolation, rebased on the particle's position at queue time
#[derive(Clone, Copy, Debug)]
struct Launch {
    origin_x: f32,
    origin_y: f32,
    height: f32,
    start: f32,
    duration: f32,
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    Launching(Launch),
    Exploding,
    Spent,
}

pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    time: f32,
    pub opacity: f32,
    pub size: f32,
    pub color: (u8, u8, u8),
    phase: Phase,
}

impl Particle {
    pub fn new(x: f32, y: f32, color: (u8, u8, u8), shape: Shape, launch_speed: f32) -> Self {
        // The scatter direction is fixed at birth but only kicks in at burst
        let (sx, sy) = shape.sample();
        Self {
            x,
            y,
            vx: sx * launch_speed,
            vy: sy * launch_speed,
            time: 0.0,
            opacity: 1.0,
            size: INITIAL_SIZE,
            color,
            phase: Phase::Idle,
        }
    }

    // Queues the rise to burst height. Only one launch can be in flight:
    // queuing again replaces it, rebased on the current position. Exploding
    // and spent particles ignore the call.
    pub fn queue_launch(&mut self, height: f32, duration: f32) {
        match self.phase {
            Phase::Idle | Phase::Launching(_) => {
                self.phase = Phase::Launching(Launch {
                    origin_x: self.x,
                    origin_y: self.y,
                    height,
                    start: self.time,
                    duration,
                });
            }
            Phase::Exploding | Phase::Spent => {}
        }
    }

    pub fn advance(&mut self, dt: f32, physics: &Physics) {
        match self.phase {
            // Terminal state, frozen for good
            Phase::Spent => {}
            Phase::Idle => {
                self.time += dt;
            }
            Phase::Launching(launch) => {
                self.time += dt;
                let fraction = if launch.duration > 0.0 {
                    ((self.time - launch.start) / launch.duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.x = launch.origin_x;
                self.y = launch.origin_y + launch.height * fraction;
                if fraction >= 1.0 {
                    // Snapped to the end state above; the burst begins next frame
                    self.phase = Phase::Exploding;
                }
            }
            Phase::Exploding => {
                self.time += dt;
                self.vx += physics.gravity.0 * dt;
                self.vy += physics.gravity.1 * dt;
                self.x += self.vx * dt;
                self.y += self.vy * dt;
                self.vx *= physics.damping;
                self.vy *= physics.damping;
                self.opacity *= physics.damping;
                self.size *= physics.damping;
                if self.opacity < physics.fade_epsilon {
                    self.phase = Phase::Spent;
                }
            }
        }
    }

    pub fn spent(&self) -> bool {
        matches!(self.phase, Phase::Spent)
    }

    pub fn exploding(&self) -> bool {
        matches!(self.phase, Phase::Exploding)
    }
}
