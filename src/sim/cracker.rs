use super::{Particle, Physics, Shape};

// One burst unit: a clutch of particles sharing a spawn point and color
pub struct Cracker {
    particles: Vec<Particle>,
}

impl Cracker {
    pub fn new(
        count: usize,
        color: (u8, u8, u8),
        shape: Shape,
        x: f32,
        y: f32,
        launch_speed: f32,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle::new(x, y, color, shape, launch_speed))
            .collect();
        Self { particles }
    }

    // Sends every particle rising `height` world units over `duration` seconds
    pub fn launch(&mut self, height: f32, duration: f32) {
        for particle in &mut self.particles {
            particle.queue_launch(height, duration);
        }
    }

    pub fn advance(&mut self, dt: f32, physics: &Physics) {
        for particle in &mut self.particles {
            particle.advance(dt, physics);
        }
    }

    // Pure query: done once every particle has burned out. An empty cracker
    // is done from the start.
    pub fn is_done(&self) -> bool {
        self.particles.iter().all(Particle::spent)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive_to_done(cracker: &mut Cracker, physics: &Physics) {
        let mut frames = 0;
        while !cracker.is_done() {
            cracker.advance(1.0 / 60.0, physics);
            frames += 1;
            assert!(frames < 2000, "cracker never finished");
        }
    }

    #[test]
    fn empty_cracker_is_done_immediately() {
        let cracker = Cracker::new(0, (255, 0, 0), Shape::Circular, 0.0, 0.0, 8.0);
        assert!(cracker.is_done());
    }

    #[test]
    fn single_particle_cracker_finishes() {
        fastrand::seed(3);
        let physics = Physics::default();
        let mut cracker = Cracker::new(1, (255, 0, 0), Shape::Circular, 0.0, -5.0, 8.0);
        assert!(!cracker.is_done());

        cracker.launch(5.0, 0.5);
        drive_to_done(&mut cracker, &physics);
        assert!(cracker.is_done());
    }

    #[test]
    fn done_only_once_every_particle_is_spent() {
        fastrand::seed(5);
        let physics = Physics::default();
        let mut cracker = Cracker::new(100, (255, 0, 0), Shape::Heart, 0.0, -5.0, 8.0);
        cracker.launch(6.0, 1.0);

        let mut frames = 0;
        while !cracker.is_done() {
            // The conjunction must hold on every intermediate frame
            let all_spent = cracker.particles().iter().all(Particle::spent);
            assert_eq!(cracker.is_done(), all_spent);
            cracker.advance(1.0 / 60.0, &physics);
            frames += 1;
            assert!(frames < 2000, "cracker never finished");
        }
        assert!(cracker.particles().iter().all(Particle::spent));
    }

    #[test]
    fn unlaunched_cracker_stays_put() {
        fastrand::seed(9);
        let physics = Physics::default();
        let mut cracker = Cracker::new(10, (255, 0, 0), Shape::Circular, 2.0, -3.0, 8.0);
        for _ in 0..60 {
            cracker.advance(1.0 / 60.0, &physics);
        }
        for particle in cracker.particles() {
            assert_eq!((particle.x, particle.y), (2.0, -3.0));
        }
        assert!(!cracker.is_done());
    }
}
