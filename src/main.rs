use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{BufWriter, stdout};
use std::time::{Duration, Instant};

mod effects;
mod sim;

use effects::Effect;
use effects::fireworks::{FireworksEffect, FireworksOptions};
use sim::{FireworkConfig, Shape};

fn print_usage() {
    eprintln!("pyroterm - Fireworks display for the terminal");
    eprintln!();
    eprintln!("Usage: pyroterm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --shape SHAPE      Burst shape: circular (default) or heart");
    eprintln!("  --frequency F      Chance per frame of a new launch, 0.0 to 1.0 (default 0.1)");
    eprintln!("  --particles N      Particles per cracker (default 100)");
    eprintln!("  --bg-color RRGGBB  Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!("  --stop-after SECS  Stop launching after SECS seconds and exit once the sky clears");
    eprintln!();
    eprintln!("Press 's' to wind the show down, 'q', ESC, or Ctrl+C to exit");
}

fn run_effect<E: Effect>(build: impl Fn(usize, usize) -> E) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;

    let (cols, rows) = terminal::size()?;
    let mut effect = build(cols as usize, rows as usize * 2);

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                    // Pass non-exit key events to the effect
                    effect.handle_event(&event);
                }
                Event::Resize(cols, rows) => {
                    effect = build(*cols as usize, *rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {
                    effect.handle_event(&event);
                }
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        while accumulator >= FIXED_DT {
            effect.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        effect.render(&mut stdout)?;

        if effect.finished() {
            break;
        }
    }

    execute!(stdout, Show, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut options = FireworksOptions::default();
    let mut config = FireworkConfig::default();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shape" => {
                if i + 1 < args.len() {
                    config.shape = match args[i + 1].as_str() {
                        "circular" => Shape::Circular,
                        "heart" => Shape::Heart,
                        other => {
                            eprintln!("Unknown shape: {other}");
                            eprintln!("Expected: circular or heart");
                            std::process::exit(1);
                        }
                    };
                    i += 2;
                } else {
                    eprintln!("--shape requires a value");
                    std::process::exit(1);
                }
            }
            "--frequency" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<f32>() {
                        Ok(f) if (0.0..=1.0).contains(&f) => config.frequency = f,
                        _ => {
                            eprintln!("Invalid frequency: {}", args[i + 1]);
                            eprintln!("Expected a number between 0.0 and 1.0");
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("--frequency requires a value");
                    std::process::exit(1);
                }
            }
            "--particles" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<usize>() {
                        Ok(n) => config.particles_per_cracker = n,
                        Err(_) => {
                            eprintln!("Invalid particle count: {}", args[i + 1]);
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("--particles requires a value");
                    std::process::exit(1);
                }
            }
            "--bg-color" => {
                if i + 1 < args.len() {
                    if let Some(color) = parse_hex_color(&args[i + 1]) {
                        options.bg_color = color;
                        i += 2;
                    } else {
                        eprintln!("Invalid hex color: {}", args[i + 1]);
                        eprintln!("Expected format: RRGGBB (e.g., 1a1b26)");
                        std::process::exit(1);
                    }
                } else {
                    eprintln!("--bg-color requires a hex color value");
                    std::process::exit(1);
                }
            }
            "--stop-after" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<f32>() {
                        Ok(secs) if secs >= 0.0 => options.stop_after = Some(secs),
                        _ => {
                            eprintln!("Invalid duration: {}", args[i + 1]);
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("--stop-after requires a value in seconds");
                    std::process::exit(1);
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Unknown option: {arg}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    options.config = config;

    run_effect(|width, height| FireworksEffect::new(width, height, options.clone()))
}
