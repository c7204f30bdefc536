//! Level descriptions and per-turn orchestration
//!
//! A [`LevelSpec`] is the plain, serializable description of one level: the
//! paddle, the serve velocities, and the block layout. A [`Level`] turns that
//! description into a live environment - border walls, death region, wired
//! listeners - and steps it frame by frame as an [`Animation`].

use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::GameConfig;
use crate::counter::Counter;
use crate::draw::{Color, DrawSurface, Drawable, Fill};
use crate::input::KeySource;
use crate::runner::{Animation, AnimationRunner};
use crate::sim::ball::Ball;
use crate::sim::block::{Block, HitPoints};
use crate::sim::environment::{Body, CollidableId, Environment, SharedEnvironment};
use crate::sim::geometry::{Point, Rect};
use crate::sim::listener::{BallRemover, BlockRemover, ScoreTracker, listener_handle};
use crate::sim::paddle::Paddle;
use crate::sim::velocity::Velocity;
use crate::status::{LevelNameIndicator, LivesIndicator, ScoreIndicator, StatusBar};

/// Radius of every served ball
const BALL_RADIUS: i32 = 5;
/// Points awarded for clearing a level
const CLEAR_BONUS: i32 = 100;
/// How far below the arena the death region sits
const DEATH_REGION_DROP: f32 = 50.0;

/// Serializable description of one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hit_points: HitPoints,
    pub default_fill: Option<Fill>,
    /// Fill overrides keyed by remaining hit points
    #[serde(default)]
    pub fills: BTreeMap<u32, Fill>,
    pub stroke: Option<Color>,
}

impl BlockSpec {
    /// A one-hit block with a single solid fill
    pub fn simple(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            hit_points: HitPoints::Hits(1),
            default_fill: Some(Fill::solid(color)),
            fills: BTreeMap::new(),
            stroke: Some(Color::BLACK),
        }
    }

    /// Build the block this spec describes
    pub fn build(&self, id: CollidableId) -> Result<Block> {
        Block::new(
            id,
            Rect::from_coords(self.x, self.y, self.width, self.height),
            self.hit_points,
            self.default_fill,
            self.fills.clone(),
            self.stroke,
        )
    }
}

/// Serializable description of one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    /// Paddle speed in pixels per second
    pub paddle_speed: f32,
    pub paddle_width: f32,
    /// One ball is served per velocity at the start of each turn
    pub ball_velocities: Vec<Velocity>,
    pub blocks: Vec<BlockSpec>,
}

impl LevelSpec {
    /// How many blocks must be destroyed to clear the level
    pub fn blocks_to_remove(&self) -> i32 {
        self.blocks
            .iter()
            .filter(|b| b.hit_points != HitPoints::Unbreakable)
            .count() as i32
    }

    pub fn ball_count(&self) -> i32 {
        self.ball_velocities.len() as i32
    }

    /// A built-in level: three rows of one-hit blocks across the arena
    pub fn demo(config: &GameConfig) -> Self {
        const BLOCK_WIDTH: f32 = 50.0;
        const BLOCK_HEIGHT: f32 = 20.0;
        const SPACING: f32 = 2.0;
        const ROWS: u32 = 3;
        const FIRST_ROW_Y: f32 = 100.0;
        const ROW_COLORS: [Color; 3] = [Color::RED, Color::YELLOW, Color::GREEN];

        let mut blocks = Vec::new();
        for row in 0..ROWS {
            let y = FIRST_ROW_Y + row as f32 * (BLOCK_HEIGHT + SPACING);
            let mut x = config.margin + 25.0;
            while x + BLOCK_WIDTH < config.width - config.margin - 25.0 {
                blocks.push(BlockSpec::simple(
                    x,
                    y,
                    BLOCK_WIDTH,
                    BLOCK_HEIGHT,
                    ROW_COLORS[row as usize % ROW_COLORS.len()],
                ));
                x += BLOCK_WIDTH + SPACING;
            }
        }

        Self {
            name: "Rows".to_string(),
            paddle_speed: 400.0,
            paddle_width: 120.0,
            ball_velocities: vec![
                Velocity::from_angle_and_speed((-30.0f32).to_radians(), 350.0),
                Velocity::from_angle_and_speed(30.0f32.to_radians(), 350.0),
            ],
            blocks,
        }
    }
}

/// One live level: environment, paddle, balls, counters and status bar
pub struct Level {
    config: GameConfig,
    spec: LevelSpec,
    environment: SharedEnvironment,
    paddle_id: CollidableId,
    balls: Vec<Ball>,
    status_bar: StatusBar,
    blocks_to_remove: Counter,
    balls_left: Counter,
    score: Counter,
    lives: Counter,
    running: bool,
}

impl Level {
    /// Build the level: borders, death region, blocks with their listeners,
    /// and a centered paddle
    pub fn new(
        spec: LevelSpec,
        keyboard: Rc<dyn KeySource>,
        score: Counter,
        lives: Counter,
        config: GameConfig,
    ) -> Result<Self> {
        let environment = Environment::new_shared();
        let blocks_to_remove = Counter::new(spec.blocks_to_remove());
        let balls_left = Counter::new(spec.ball_count());

        Self::create_borders(&environment, &config, &balls_left);
        Self::add_level_blocks(&environment, &spec, &blocks_to_remove, &score)?;

        let paddle_id = {
            let mut env = environment.borrow_mut();
            let id = env.allocate_id();
            let paddle = Paddle::new(id, keyboard, spec.paddle_speed, spec.paddle_width, &config);
            env.add_collidable(Body::Paddle(paddle));
            id
        };

        let status_bar = StatusBar::new(
            config.width,
            config.status_bar_height,
            vec![
                Box::new(LivesIndicator::new(lives.clone())),
                Box::new(ScoreIndicator::new(score.clone())),
                Box::new(LevelNameIndicator::new(spec.name.clone())),
            ],
        );

        Ok(Self {
            config,
            spec,
            environment,
            paddle_id,
            balls: Vec::new(),
            status_bar,
            blocks_to_remove,
            balls_left,
            score,
            lives,
            running: false,
        })
    }

    /// Three border walls plus the death region below the screen
    ///
    /// The death region is an ordinary wall wearing a [`BallRemover`]; a ball
    /// that reaches it bounces once and is then retired by the listener.
    fn create_borders(environment: &SharedEnvironment, config: &GameConfig, balls_left: &Counter) {
        let mut env = environment.borrow_mut();
        let top = config.status_bar_height;

        for rect in [
            Rect::from_coords(0.0, top, config.width, config.margin),
            Rect::from_coords(0.0, top, config.margin, config.height),
            Rect::from_coords(config.width - config.margin, top, config.margin, config.height),
        ] {
            let id = env.allocate_id();
            env.add_collidable(Body::Block(Block::wall(id, rect)));
        }

        let id = env.allocate_id();
        let mut death_region = Block::wall(
            id,
            Rect::from_coords(
                0.0,
                config.height + DEATH_REGION_DROP,
                config.width,
                config.margin,
            ),
        );
        death_region.add_hit_listener(listener_handle(BallRemover::new(balls_left.clone())));
        env.add_collidable(Body::Block(death_region));
    }

    fn add_level_blocks(
        environment: &SharedEnvironment,
        spec: &LevelSpec,
        blocks_to_remove: &Counter,
        score: &Counter,
    ) -> Result<()> {
        let remover = listener_handle(BlockRemover::new(
            environment.clone(),
            blocks_to_remove.clone(),
        ));
        let scorer = listener_handle(ScoreTracker::new(score.clone()));

        let mut env = environment.borrow_mut();
        for block_spec in &spec.blocks {
            let id = env.allocate_id();
            let mut block = block_spec.build(id)?;
            block.add_hit_listener(remover.clone());
            block.add_hit_listener(scorer.clone());
            env.add_collidable(Body::Block(block));
        }
        Ok(())
    }

    /// Reset the paddle and serve a fresh set of balls
    pub fn begin_turn(&mut self) {
        {
            let mut env = self.environment.borrow_mut();
            if let Some(paddle) = env.paddle_mut(self.paddle_id) {
                paddle.reconfigure(self.spec.paddle_speed, self.spec.paddle_width);
            }
        }

        self.balls.clear();
        let serve = Point::new(self.config.width / 2.0, self.config.ball_spawn_y());
        for velocity in self.spec.ball_velocities.clone() {
            let mut ball = Ball::new(serve, BALL_RADIUS, Color::WHITE);
            ball.set_environment(self.environment.clone());
            ball.set_velocity(velocity);
            self.balls.push(ball);
        }

        if self.balls_left.value() == 0 {
            self.balls_left.increase(self.spec.ball_count());
        }

        self.running = true;
        log::info!(
            "turn started on '{}' with {} ball(s), {} block(s) left",
            self.spec.name,
            self.balls.len(),
            self.blocks_to_remove.value()
        );
    }

    /// End-of-turn bookkeeping: losing every ball costs a life, clearing the
    /// blocks pays a bonus
    pub fn finish_turn(&mut self) {
        if self.balls_left.value() <= 0 {
            self.lives.decrease(1);
            log::info!("all balls lost, {} live(s) left", self.lives.value());
        } else if self.blocks_to_remove.value() <= 0 {
            self.score.increase(CLEAR_BONUS);
            log::info!("'{}' cleared, score {}", self.spec.name, self.score.value());
        }
    }

    /// Run one full turn to completion at the runner's frame rate
    pub fn play_one_turn(&mut self, runner: &AnimationRunner, surface: &mut dyn DrawSurface) {
        self.begin_turn();
        runner.run(surface, self);
        self.finish_turn();
    }

    pub fn blocks_remaining(&self) -> i32 {
        self.blocks_to_remove.value()
    }

    pub fn balls_remaining(&self) -> i32 {
        self.balls_left.value()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn environment(&self) -> &SharedEnvironment {
        &self.environment
    }

    /// Current paddle rectangle (for demos and tests)
    pub fn paddle_rect(&self) -> Option<Rect> {
        self.environment
            .borrow_mut()
            .paddle_mut(self.paddle_id)
            .map(|paddle| *paddle.rect())
    }

    /// Draw the whole scene: status bar, bodies, balls
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.status_bar.draw(surface);
        self.environment.borrow().draw_collidables(surface);
        for ball in &self.balls {
            ball.draw(surface);
        }
    }
}

impl Animation for Level {
    fn do_one_frame(&mut self, surface: &mut dyn DrawSurface, dt: f32) {
        self.draw(surface);

        // Exactly one paddle move and one motion tick per ball per frame
        {
            let mut env = self.environment.borrow_mut();
            if let Some(paddle) = env.paddle_mut(self.paddle_id) {
                paddle.time_step(dt);
            }
        }
        for ball in &mut self.balls {
            if ball.in_play() {
                ball.move_one_step(dt);
            }
        }
        self.balls.retain(|ball| ball.in_play());

        if self.blocks_to_remove.value() <= 0 || self.balls_left.value() <= 0 {
            self.running = false;
        }
    }

    fn should_stop(&self) -> bool {
        !self.running
    }
}
