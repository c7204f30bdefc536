//! Frame pacing
//!
//! Drives an [`Animation`] at a fixed target frame rate. The simulation dt is
//! the nominal frame duration, never the measured one, so gameplay stays
//! deterministic; the runner only sleeps away whatever real time is left in
//! the frame. Suspension happens here at the frame boundary and nowhere else.

use std::thread;
use std::time::{Duration, Instant};

use crate::draw::DrawSurface;

/// Something the runner can step frame by frame
pub trait Animation {
    /// Draw and advance one frame; `dt` is the nominal frame duration
    fn do_one_frame(&mut self, surface: &mut dyn DrawSurface, dt: f32);

    /// Whether the animation has finished
    fn should_stop(&self) -> bool;
}

/// Steps animations at a fixed frame rate
pub struct AnimationRunner {
    frames_per_sec: u32,
}

impl AnimationRunner {
    pub fn new(frames_per_sec: u32) -> Self {
        Self { frames_per_sec }
    }

    /// Nominal duration of one frame in seconds
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frames_per_sec as f32
    }

    /// Run the animation until it reports it should stop
    pub fn run(&self, surface: &mut dyn DrawSurface, animation: &mut dyn Animation) {
        let frame_duration = Duration::from_secs_f32(self.frame_dt());
        let dt = self.frame_dt();

        while !animation.should_stop() {
            let frame_start = Instant::now();
            animation.do_one_frame(surface, dt);

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }
    }
}
