//! Headless demo: an autopilot plays the built-in level
//!
//! Steps the simulation directly (no frame-rate sleeps) with a paddle that
//! chases the lowest live ball, and logs how the run went. Useful as a smoke
//! test of the whole engine without any rendering backend.

use std::rc::Rc;

use anyhow::Result;

use brickbreak::counter::Counter;
use brickbreak::draw::NullSurface;
use brickbreak::input::SharedInput;
use brickbreak::level::{Level, LevelSpec};
use brickbreak::runner::Animation;
use brickbreak::{GameConfig, HighScoresTable, ScoreInfo};

/// Hard cap so a pathological run cannot spin forever (10 minutes of frames)
const MAX_FRAMES_PER_TURN: u32 = 60 * 600;

fn main() -> Result<()> {
    env_logger::init();

    let config = GameConfig::default();
    let input = SharedInput::new();
    let score = Counter::new(0);
    let lives = Counter::new(config.lives);
    let dt = 1.0 / config.frames_per_sec as f32;

    let spec = LevelSpec::demo(&config);
    let mut level = Level::new(
        spec,
        Rc::new(input.clone()),
        score.clone(),
        lives.clone(),
        config.clone(),
    )?;
    let mut surface = NullSurface;

    while level.blocks_remaining() > 0 && lives.value() > 0 {
        level.begin_turn();
        let mut frames = 0;
        while !level.should_stop() && frames < MAX_FRAMES_PER_TURN {
            steer_toward_lowest_ball(&level, &input);
            level.do_one_frame(&mut surface, dt);
            frames += 1;
        }
        level.finish_turn();
        if frames >= MAX_FRAMES_PER_TURN {
            log::warn!("turn frame cap reached, stopping the demo");
            break;
        }
    }

    let outcome = if level.blocks_remaining() == 0 {
        "cleared"
    } else {
        "lost"
    };
    log::info!(
        "demo {}: score {}, {} live(s) left",
        outcome,
        score.value(),
        lives.value()
    );

    let mut table = HighScoresTable::default();
    if let Some(rank) = table.add(ScoreInfo::new("autopilot", score.value())) {
        log::info!("autopilot ranked #{rank}");
    }
    let mut serialized = Vec::new();
    table.save(&mut serialized)?;
    println!("{}", String::from_utf8_lossy(&serialized));

    Ok(())
}

/// Chase the ball closest to the bottom of the arena
fn steer_toward_lowest_ball(level: &Level, input: &SharedInput) {
    input.release_all();

    let Some(paddle) = level.paddle_rect() else {
        return;
    };
    let target = level
        .balls()
        .iter()
        .filter(|ball| ball.in_play())
        .max_by(|a, b| a.center().y().total_cmp(&b.center().y()));
    let Some(ball) = target else {
        return;
    };

    let paddle_center = paddle.upper_left().x() + paddle.width() / 2.0;
    let error = ball.center().x() - paddle_center;
    if error < -4.0 {
        input.set_left(true);
    } else if error > 4.0 {
        input.set_right(true);
    }
}
