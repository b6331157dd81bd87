use super::Effect;
use crate::sim::{Firework, FireworkConfig};
use crossterm::event::{Event, KeyCode};
use std::io::{BufWriter, Stdout, Write};

#[derive(Clone)]
pub struct FireworksOptions {
    pub config: FireworkConfig,
    pub bg_color: (u8, u8, u8),
    // Stop launching after this many seconds and exit once the sky clears
    pub stop_after: Option<f32>,
}

impl Default for FireworksOptions {
    fn default() -> Self {
        Self {
            config: FireworkConfig::default(),
            bg_color: (0, 0, 0),
            stop_after: None,
        }
    }
}

pub struct FireworksEffect {
    width: usize,
    height: usize,
    firework: Firework,
    bg_color: (u8, u8, u8),
    stop_after: Option<f32>,
    time: f32,
    // Cells per world unit; the world keeps its height and stretches
    // horizontally to match the terminal aspect
    cell_scale: f32,
    world_width: f32,
    world_height: f32,
    output_buf: Vec<u8>,
}

impl FireworksEffect {
    pub fn new(width: usize, height: usize, options: FireworksOptions) -> Self {
        let mut config = options.config;
        let cell_scale = height.max(1) as f32 / config.world_height;
        config.world_width = width as f32 / cell_scale;

        let world_width = config.world_width;
        let world_height = config.world_height;

        Self {
            width,
            height,
            firework: Firework::new(config),
            bg_color: options.bg_color,
            stop_after: options.stop_after,
            time: 0.0,
            cell_scale,
            world_width,
            world_height,
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    fn world_to_cell(&self, wx: f32, wy: f32) -> (i32, i32) {
        let cx = (wx + self.world_width / 2.0) * self.cell_scale;
        let cy = (self.world_height / 2.0 - wy) * self.cell_scale;
        (cx as i32, cy as i32)
    }

    fn blend_with_bg(cell: (f32, (u8, u8, u8)), bg_color: (u8, u8, u8)) -> (u8, u8, u8) {
        let (intensity, color) = cell;
        if intensity <= 0.05 {
            return bg_color;
        }
        let blend = (intensity / 3.0).min(1.0);
        (
            (bg_color.0 as f32 * (1.0 - blend) + color.0 as f32 * blend) as u8,
            (bg_color.1 as f32 * (1.0 - blend) + color.1 as f32 * blend) as u8,
            (bg_color.2 as f32 * (1.0 - blend) + color.2 as f32 * blend) as u8,
        )
    }
}

impl Effect for FireworksEffect {
    fn update(&mut self, dt: f32) {
        self.time += dt;

        if let Some(stop_after) = self.stop_after {
            if self.time >= stop_after && self.firework.is_running() {
                self.firework.stop();
            }
        }

        self.firework.tick(dt);
    }

    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let bg_color = self.bg_color;
        let mut glow_buffer = vec![(0.0f32, bg_color); self.width * self.height];

        for cracker in self.firework.crackers() {
            for particle in cracker.particles() {
                if particle.spent() {
                    continue;
                }

                let (x, y) = self.world_to_cell(particle.x, particle.y);
                if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
                    continue;
                }
                let idx = y as usize * self.width + x as usize;

                let intensity = particle.opacity * 2.5;
                if intensity > glow_buffer[idx].0 {
                    glow_buffer[idx] = (intensity, particle.color);
                }

                if particle.exploding() {
                    // Soft halo while the particle is still large enough to show one
                    if particle.size * self.cell_scale >= 0.5 {
                        for dy in -1..=1i32 {
                            for dx in -1..=1i32 {
                                if dx == 0 && dy == 0 {
                                    continue;
                                }
                                let nx = x + dx;
                                let ny = y + dy;
                                if nx >= 0
                                    && nx < self.width as i32
                                    && ny >= 0
                                    && ny < self.height as i32
                                {
                                    let idx = ny as usize * self.width + nx as usize;
                                    let glow = particle.opacity * 0.8;
                                    if glow > glow_buffer[idx].0 {
                                        glow_buffer[idx] = (glow, particle.color);
                                    }
                                }
                            }
                        }
                    }
                } else {
                    // Rising shell: short tail straight down
                    for i in 1..4i32 {
                        let ny = y + i;
                        if ny >= self.height as i32 {
                            break;
                        }
                        let idx = ny as usize * self.width + x as usize;
                        let fade = 2.0 * (1.0 - i as f32 * 0.25);
                        if fade > glow_buffer[idx].0 {
                            glow_buffer[idx] = (fade, particle.color);
                        }
                    }
                }
            }
        }

        let mut prev_top: (u8, u8, u8) = (255, 255, 255);
        let mut prev_bot: (u8, u8, u8) = (255, 255, 255);

        // Render using half-blocks, two buffer rows per terminal row
        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top = Self::blend_with_bg(glow_buffer[top_idx], bg_color);
                let bot = Self::blend_with_bg(glow_buffer[bot_idx], bg_color);

                // Only emit color codes if changed
                if top != prev_top {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = top;
                }
                if bot != prev_bot {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = bot;
                }
                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = (255, 255, 255);
            prev_bot = (255, 255, 255);
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        stdout.write_all(&self.output_buf)?;
        stdout.flush()?;
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            // Wind the show down; the program exits once the sky is clear
            if key.code == KeyCode::Char('s') {
                self.firework.stop();
            }
        }
    }

    fn finished(&self) -> bool {
        self.firework.is_clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_effect(width: usize, height: usize) -> FireworksEffect {
        fastrand::seed(8);
        FireworksEffect::new(width, height, FireworksOptions::default())
    }

    #[test]
    fn world_stretches_to_the_terminal_aspect() {
        let effect = test_effect(160, 80);
        // 80 cells tall over 8 world units -> 10 cells per unit
        assert_eq!(effect.cell_scale, 10.0);
        assert_eq!(effect.world_width, 16.0);
    }

    #[test]
    fn world_to_cell_maps_center_and_corners() {
        let effect = test_effect(160, 80);
        assert_eq!(effect.world_to_cell(0.0, 0.0), (80, 40));
        // Top-left corner of the sky
        assert_eq!(effect.world_to_cell(-8.0, 4.0), (0, 0));
        // Bottom edge lands on the last row
        let (_, cy) = effect.world_to_cell(0.0, -3.99);
        assert_eq!(cy, 79);
    }

    #[test]
    fn stop_after_ends_the_show() {
        let mut effect = FireworksEffect::new(
            80,
            40,
            FireworksOptions {
                config: FireworkConfig {
                    frequency: 1.0,
                    particles_per_cracker: 2,
                    launch_duration: 0.1,
                    ..FireworkConfig::default()
                },
                stop_after: Some(0.5),
                ..FireworksOptions::default()
            },
        );

        fastrand::seed(10);
        assert!(!effect.finished());

        let mut frames = 0;
        while !effect.finished() {
            effect.update(1.0 / 60.0);
            frames += 1;
            assert!(frames < 5000, "show never ended");
        }
        assert!(effect.time >= 0.5);
    }
}
