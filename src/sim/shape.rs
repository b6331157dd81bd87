use std::f32::consts::TAU;

// The heart curve takes ln|t|, which blows up at t = 0; |t| is floored
// here so every draw stays finite.
const HEART_T_MIN: f32 = 1e-3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shape {
    Circular,
    Heart,
}

impl Shape {
    // Scatter offset for one particle, in world units
    pub fn sample(self) -> (f32, f32) {
        match self {
            Shape::Circular => {
                let t = fastrand::f32() * TAU;
                let r = 0.4 + fastrand::f32() * 0.6;
                (r * t.cos(), r * t.sin())
            }
            Shape::Heart => {
                let t = fastrand::f32() * 2.0 - 1.0;
                heart_offset(t)
            }
        }
    }
}

fn heart_offset(t: f32) -> (f32, f32) {
    let a = t.abs().max(HEART_T_MIN);
    let x = t.sin() * t.cos() * a.ln();
    let y = a.sqrt() * t.cos();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_magnitude_stays_in_annulus() {
        fastrand::seed(7);
        for _ in 0..1000 {
            let (x, y) = Shape::Circular.sample();
            let mag = (x * x + y * y).sqrt();
            assert!(
                (0.4 - 1e-4..=1.0 + 1e-4).contains(&mag),
                "magnitude {mag} outside [0.4, 1.0]"
            );
        }
    }

    #[test]
    fn heart_guards_the_log_singularity() {
        let (x, y) = heart_offset(0.0);
        assert!(x.is_finite() && y.is_finite());

        let (x, y) = heart_offset(f32::MIN_POSITIVE);
        assert!(x.is_finite() && y.is_finite());

        let (x, y) = heart_offset(-f32::MIN_POSITIVE);
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn heart_samples_are_always_finite() {
        fastrand::seed(11);
        for _ in 0..1000 {
            let (x, y) = Shape::Heart.sample();
            assert!(x.is_finite() && y.is_finite(), "degenerate sample ({x}, {y})");
        }
    }
}
