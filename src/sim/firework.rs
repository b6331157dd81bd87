use super::{Cracker, FireworkConfig};

// Lowest burst height above the spawn point, in world units
const MIN_BURST_HEIGHT: f32 = 4.0;

pub struct Firework {
    config: FireworkConfig,
    crackers: Vec<Cracker>,
    running: bool,
}

impl Firework {
    pub fn new(config: FireworkConfig) -> Self {
        Self {
            config,
            crackers: Vec::new(),
            running: true,
        }
    }

    // One simulation frame. Spawning happens before the advance pass; the
    // sweep of finished crackers runs last, never during iteration.
    pub fn tick(&mut self, dt: f32) {
        if self.running && fastrand::f32() < self.config.frequency {
            self.spawn_cracker();
        }

        for cracker in &mut self.crackers {
            cracker.advance(dt, &self.config.physics);
        }

        self.crackers.retain(|cracker| !cracker.is_done());
    }

    fn spawn_cracker(&mut self) {
        let half_w = self.config.world_width / 2.0;
        let half_h = self.config.world_height / 2.0;

        // Launch pad: anywhere along the bottom, one unit below the sky
        let x = -half_w + fastrand::f32() * self.config.world_width;
        let y = -(half_h + 1.0);

        let color = if self.config.palette.is_empty() {
            (255, 255, 255)
        } else {
            self.config.palette[fastrand::usize(0..self.config.palette.len())]
        };

        let mut cracker = Cracker::new(
            self.config.particles_per_cracker,
            color,
            self.config.shape,
            x,
            y,
            self.config.physics.launch_speed,
        );

        let span = (self.config.world_height - 1.0 - MIN_BURST_HEIGHT).max(0.0);
        let height = MIN_BURST_HEIGHT + fastrand::f32() * span;
        cracker.launch(height, self.config.launch_duration);

        self.crackers.push(cracker);
    }

    // Stops new launches; live crackers keep burning out
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // True once stopped and the last cracker has been swept out
    pub fn is_clear(&self) -> bool {
        !self.running && self.crackers.is_empty()
    }

    pub fn crackers(&self) -> &[Cracker] {
        &self.crackers
    }
}
