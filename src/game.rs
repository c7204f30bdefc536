//! Whole-run sequencing
//!
//! Plays a list of levels in order against one shared score and lives pool.
//! A level is replayed turn after turn until it is cleared or the lives run
//! out; running out anywhere ends the run.

use std::rc::Rc;

use anyhow::Result;

use crate::GameConfig;
use crate::counter::Counter;
use crate::draw::DrawSurface;
use crate::input::KeySource;
use crate::level::{Level, LevelSpec};
use crate::runner::AnimationRunner;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every level cleared
    Won { score: i32 },
    /// Lives ran out
    Lost { score: i32 },
}

impl GameOutcome {
    pub fn score(&self) -> i32 {
        match self {
            GameOutcome::Won { score } | GameOutcome::Lost { score } => *score,
        }
    }
}

/// Runs levels in sequence
pub struct GameFlow {
    config: GameConfig,
    keyboard: Rc<dyn KeySource>,
    runner: AnimationRunner,
    score: Counter,
    lives: Counter,
}

impl GameFlow {
    pub fn new(config: GameConfig, keyboard: Rc<dyn KeySource>) -> Self {
        let runner = AnimationRunner::new(config.frames_per_sec);
        let lives = Counter::new(config.lives);
        Self {
            config,
            keyboard,
            runner,
            score: Counter::new(0),
            lives,
        }
    }

    pub fn score(&self) -> i32 {
        self.score.value()
    }

    pub fn lives(&self) -> i32 {
        self.lives.value()
    }

    /// Play the given levels until they are all cleared or lives run out
    pub fn run_levels(
        &mut self,
        surface: &mut dyn DrawSurface,
        specs: Vec<LevelSpec>,
    ) -> Result<GameOutcome> {
        for spec in specs {
            let name = spec.name.clone();
            let mut level = Level::new(
                spec,
                self.keyboard.clone(),
                self.score.clone(),
                self.lives.clone(),
                self.config.clone(),
            )?;

            while level.blocks_remaining() > 0 {
                level.play_one_turn(&self.runner, surface);
                if self.lives.value() <= 0 {
                    log::info!("game over on '{}', final score {}", name, self.score.value());
                    return Ok(GameOutcome::Lost {
                        score: self.score.value(),
                    });
                }
            }
            log::info!("level '{}' cleared, score {}", name, self.score.value());
        }

        Ok(GameOutcome::Won {
            score: self.score.value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Color, NullSurface};
    use crate::input::SharedInput;
    use crate::level::BlockSpec;
    use crate::sim::velocity::Velocity;

    fn flow() -> GameFlow {
        GameFlow::new(GameConfig::default(), Rc::new(SharedInput::new()))
    }

    #[test]
    fn starts_with_configured_lives_and_zero_score() {
        let flow = flow();
        assert_eq!(flow.lives(), 7);
        assert_eq!(flow.score(), 0);
    }

    #[test]
    fn an_empty_level_list_is_an_immediate_win() {
        let mut flow = flow();
        let outcome = flow.run_levels(&mut NullSurface, Vec::new()).unwrap();
        assert_eq!(outcome, GameOutcome::Won { score: 0 });
    }

    #[test]
    fn a_trivial_level_is_cleared_through_the_runner() {
        // One block straight above a very fast serve, so the whole turn is a
        // handful of real-time frames.
        let spec = LevelSpec {
            name: "Sprint".to_string(),
            paddle_speed: 300.0,
            paddle_width: 100.0,
            ball_velocities: vec![Velocity::new(0.0, -3000.0)],
            blocks: vec![BlockSpec::simple(375.0, 100.0, 50.0, 20.0, Color::BLUE)],
        };

        let mut flow = flow();
        let outcome = flow.run_levels(&mut NullSurface, vec![spec]).unwrap();
        assert_eq!(outcome, GameOutcome::Won { score: 110 });
        assert_eq!(flow.lives(), 7);
    }
}
