//! SDL2 User Interface
//!
//! Window/event-loop collaborator. Paces the core at one frame's worth of
//! machine cycles per ~16.7 ms, presents the rendered framebuffer, and
//! maps quit events onto ending the loop. The core itself never blocks;
//! all real-time pacing lives here.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use std::time::{Duration, Instant};

use crate::emu::Emulator;
use crate::video::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Scale factor for the window
pub const SCALE: u32 = 4;

const FRAME_TIME: Duration = Duration::from_nanos(16_742_706); // ~59.73 Hz

/// SDL2 UI wrapper
pub struct Ui {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

impl Ui {
    /// Create the window and event pump
    pub fn new() -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(
                "gbcore",
                SCREEN_WIDTH as u32 * SCALE,
                SCREEN_HEIGHT as u32 * SCALE,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        // Prefer software rendering for compatibility on systems where
        // accelerated backends are unavailable.
        let canvas = window
            .into_canvas()
            .software()
            .build()
            .map_err(|e| e.to_string())?;

        let event_pump = sdl_context.event_pump()?;

        Ok(Self { canvas, event_pump })
    }

    /// Drive the emulator until the window is closed
    pub fn run(&mut self, emu: &mut Emulator) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::ARGB8888,
                SCREEN_WIDTH as u32,
                SCREEN_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        'running: loop {
            let frame_start = Instant::now();

            for event in self.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => break 'running,
                    _ => {}
                }
            }

            emu.run_frame();

            let framebuffer = emu.framebuffer();
            texture
                .with_lock(None, |bytes, pitch| {
                    for y in 0..SCREEN_HEIGHT {
                        for x in 0..SCREEN_WIDTH {
                            let pixel = framebuffer[y * SCREEN_WIDTH + x];
                            let offset = y * pitch + x * 4;
                            bytes[offset..offset + 4].copy_from_slice(&pixel.to_le_bytes());
                        }
                    }
                })
                .map_err(|e| e.to_string())?;

            self.canvas.clear();
            self.canvas.copy(&texture, None, None)?;
            self.canvas.present();

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_TIME {
                std::thread::sleep(FRAME_TIME - elapsed);
            }
        }

        Ok(())
    }
}
