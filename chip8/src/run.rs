use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, Config};
use chip8_display::Display;

use crate::audio::{Beeper, Mute, Sound};
use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = Config::default().with_cycles_per_timer_tick(args.cycles_per_frame);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let mut chip8 = Chip8::new(config);

    // Load ROM
    let file = File::open(&args.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("loaded {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let title = match args.rom.file_name() {
        Some(name) => format!("Chip-8 - {}", name.to_string_lossy()),
        None => "Chip-8".to_string(),
    };
    let mut display = Display::new(&sdl, &title, args.scale)?;
    let mut events = sdl.event_pump()?;
    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute)
    } else {
        match Beeper::new(&sdl) {
            Ok(beeper) => Box::new(beeper),
            Err(e) => {
                warn!("unable to open audio, continuing muted: {}", e);
                Box::new(Mute)
            }
        }
    };

    let frame_time = Duration::from_secs(1) / args.frame_rate;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => {
                    if key == Keycode::Escape {
                        break 'event;
                    } else if key == Keycode::Return {
                        if !repeat {
                            info!("resetting");
                            chip8.reset()?;
                        }
                    } else if let Some(pad) = keymap(key) {
                        chip8.update_key(pad, true)?;
                        if !repeat && chip8.is_waiting_for_key() {
                            chip8.deliver_key(pad)?;
                        }
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(pad) = keymap(key) {
                        chip8.update_key(pad, false)?;
                    }
                }
                _ => continue,
            };
        }

        // Update state
        if let Err(e) = chip8.run_cycles(args.cycles_per_frame) {
            error!("halting at {:04X}: {}", chip8.cpu().pc, e);
            sound.set_active(false);
            return Err(e.into());
        }
        sound.set_active(chip8.sound_active());

        // Only redraw when the frame buffer has changed
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    info!("quitting");
    Ok(())
}
