//! End-to-end gameplay scenarios exercising the whole engine headlessly

use std::rc::Rc;

use brickbreak::counter::Counter;
use brickbreak::draw::{Color, NullSurface};
use brickbreak::input::SharedInput;
use brickbreak::level::{BlockSpec, Level, LevelSpec};
use brickbreak::runner::Animation;
use brickbreak::sim::ball::Ball;
use brickbreak::sim::block::Block;
use brickbreak::sim::environment::{Body, Environment};
use brickbreak::sim::geometry::{Point, Rect};
use brickbreak::sim::velocity::Velocity;
use brickbreak::GameConfig;

const FRAME_CAP: u32 = 10_000;

fn run_turn(level: &mut Level, input: &SharedInput, hold_left: bool) -> u32 {
    let mut surface = NullSurface;
    let dt = 1.0 / 60.0;
    level.begin_turn();
    if hold_left {
        input.set_left(true);
    }
    let mut frames = 0;
    while !level.should_stop() && frames < FRAME_CAP {
        level.do_one_frame(&mut surface, dt);
        frames += 1;
    }
    assert!(frames < FRAME_CAP, "turn did not terminate");
    level.finish_turn();
    frames
}

#[test]
fn ball_reflects_off_a_single_wall() {
    // One wall whose left edge is at x=110, spanning y in [90, 110]; a ball
    // at (100, 100) moving straight right at speed 10 must reflect in X and
    // stop just short of the impact point.
    let environment = Environment::new_shared();
    {
        let mut env = environment.borrow_mut();
        let id = env.allocate_id();
        env.add_collidable(Body::Block(Block::wall(
            id,
            Rect::from_coords(110.0, 90.0, 10.0, 20.0),
        )));
    }

    let mut ball = Ball::new(Point::new(100.0, 100.0), 5, Color::WHITE);
    ball.set_environment(environment.clone());
    ball.set_velocity(Velocity::new(10.0, 0.0));

    ball.move_one_step(1.0);

    assert!(ball.velocity().dx() < 0.0);
    assert_eq!(ball.velocity().dy(), 0.0);
    assert!((ball.velocity().speed() - 10.0).abs() < 1e-3);
    // Backed off by 1% of the 10px step, which quantizes back onto the edge
    assert_eq!(ball.center(), Point::new(110.0, 100.0));

    // The next tick must not re-collide with the surface the ball sits on
    ball.move_one_step(1.0);
    assert_eq!(ball.center(), Point::new(100.0, 100.0));
    assert!(ball.velocity().dx() < 0.0);
}

fn level_with(spec: LevelSpec, input: &SharedInput, score: &Counter, lives: &Counter) -> Level {
    Level::new(
        spec,
        Rc::new(input.clone()),
        score.clone(),
        lives.clone(),
        GameConfig::default(),
    )
    .unwrap()
}

#[test]
fn clearing_the_only_block_ends_the_turn_with_the_bonus() {
    // A single one-hit block straight above the serve point: the ball flies
    // up, destroys it, and the turn ends cleared.
    let spec = LevelSpec {
        name: "One Block".to_string(),
        paddle_speed: 300.0,
        paddle_width: 100.0,
        ball_velocities: vec![Velocity::new(0.0, -300.0)],
        blocks: vec![BlockSpec::simple(375.0, 100.0, 50.0, 20.0, Color::BLUE)],
    };
    let input = SharedInput::new();
    let score = Counter::new(0);
    let lives = Counter::new(7);
    let mut level = level_with(spec, &input, &score, &lives);

    run_turn(&mut level, &input, false);

    assert_eq!(level.blocks_remaining(), 0);
    // 10 for the destruction plus the 100 clear bonus
    assert_eq!(score.value(), 110);
    assert_eq!(lives.value(), 7);
}

#[test]
fn losing_the_only_ball_costs_a_life() {
    // The paddle races off to the left margin while the ball drops straight
    // down, sails past it, bounces once off the death region and is retired.
    let spec = LevelSpec {
        name: "Runaway".to_string(),
        paddle_speed: 3000.0,
        paddle_width: 100.0,
        ball_velocities: vec![Velocity::new(0.0, 300.0)],
        blocks: vec![BlockSpec::simple(30.0, 40.0, 40.0, 15.0, Color::RED)],
    };
    let input = SharedInput::new();
    let score = Counter::new(0);
    let lives = Counter::new(7);
    let mut level = level_with(spec, &input, &score, &lives);

    run_turn(&mut level, &input, true);

    assert_eq!(level.balls_remaining(), 0);
    assert_eq!(lives.value(), 6);
    assert_eq!(level.blocks_remaining(), 1);
    assert_eq!(score.value(), 0);
}

#[test]
fn every_served_ball_must_be_lost_to_end_the_turn() {
    let spec = LevelSpec {
        name: "Pair".to_string(),
        paddle_speed: 3000.0,
        paddle_width: 100.0,
        ball_velocities: vec![Velocity::new(0.0, 300.0), Velocity::new(50.0, 300.0)],
        blocks: vec![BlockSpec::simple(30.0, 40.0, 40.0, 15.0, Color::RED)],
    };
    let input = SharedInput::new();
    let score = Counter::new(0);
    let lives = Counter::new(7);
    let mut level = level_with(spec, &input, &score, &lives);

    level.begin_turn();
    assert_eq!(level.balls().len(), 2);
    assert_eq!(level.balls_remaining(), 2);
    input.set_left(true);

    let mut surface = NullSurface;
    let mut frames = 0;
    while !level.should_stop() && frames < FRAME_CAP {
        level.do_one_frame(&mut surface, 1.0 / 60.0);
        frames += 1;
    }
    assert!(frames < FRAME_CAP, "turn did not terminate");
    level.finish_turn();

    assert_eq!(level.balls_remaining(), 0);
    // One life for the whole turn, not one per ball
    assert_eq!(lives.value(), 6);
}

#[test]
fn paddle_bounces_keep_the_ball_in_play() {
    // No paddle input: the ball drops onto the paddle's center zone, bounces
    // straight back up, clears the block above, and the turn ends cleared -
    // proof the serve/paddle/block loop hangs together.
    let spec = LevelSpec {
        name: "Pong".to_string(),
        paddle_speed: 300.0,
        paddle_width: 100.0,
        ball_velocities: vec![Velocity::new(0.0, 300.0)],
        blocks: vec![BlockSpec::simple(375.0, 100.0, 50.0, 20.0, Color::GREEN)],
    };
    let input = SharedInput::new();
    let score = Counter::new(0);
    let lives = Counter::new(7);
    let mut level = level_with(spec, &input, &score, &lives);

    run_turn(&mut level, &input, false);

    assert_eq!(level.blocks_remaining(), 0);
    assert_eq!(lives.value(), 7);
    assert_eq!(score.value(), 110);
}
