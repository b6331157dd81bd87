use crossterm::event::Event;
use std::io::{BufWriter, Stdout};

pub mod fireworks;

pub trait Effect {
    fn update(&mut self, dt: f32);
    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()>;
    fn handle_event(&mut self, _event: &Event) {}
    // A timed show reports true once there is nothing left to draw
    fn finished(&self) -> bool {
        false
    }
}
