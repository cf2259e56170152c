use boxslide_game::{
    Level, LevelDesc, Matrix2x2, MoveInput, Simulation, SimulationConfig, WallDesc, ZoneDesc,
};
use boxslide_physics::{CollisionLayers, DepthRange, MovementConfig, SpatialQuery, SpeedRange};
use glam::Vec2;

/// Bodies move one unit per second walking, two running.
fn config() -> SimulationConfig {
    SimulationConfig {
        tick_rate: 50,
        movement: MovementConfig {
            speed: SpeedRange::new(1.0, 2.0),
            ..Default::default()
        },
    }
}

fn lane(zone_matrix: Matrix2x2) -> Level {
    Level::from_desc(&LevelDesc {
        id: "lane".to_string(),
        zones: vec![ZoneDesc {
            center: Vec2::new(3.0, 0.0),
            half_extents: Vec2::new(1.0, 5.0),
            matrix: zone_matrix,
            depth: 0.0,
        }],
        ..Default::default()
    })
    .expect("valid level")
}

#[test]
fn crossing_a_fast_zone_covers_more_ground() {
    let mut plain = Simulation::new(config(), lane(Matrix2x2::IDENTITY)).unwrap();
    let mut fast = Simulation::new(config(), lane(Matrix2x2::scale(2.0))).unwrap();
    let a = plain.add_body_at(Vec2::ZERO);
    let b = fast.add_body_at(Vec2::ZERO);

    let input = MoveInput::toward(Vec2::X);
    for _ in 0..200 {
        plain.step(&[input]);
        fast.step(&[input]);
    }

    let plain_x = plain.get_body(a).unwrap().position().x;
    let fast_x = fast.get_body(b).unwrap().position().x;

    assert!((plain_x - 4.0).abs() < 1e-3, "plain_x={plain_x}");
    // The 2-unit zone takes half as long to cross
    assert!(fast_x > plain_x + 0.5, "fast_x={fast_x} plain_x={plain_x}");
    assert!(fast_x < plain_x + 1.5, "fast_x={fast_x} plain_x={plain_x}");

    let body = fast.get_body(b).unwrap();
    assert!(!body.state.in_zone(), "body should have left the zone");
}

#[test]
fn shear_ramp_lifts_body_while_inside() {
    let mut sim = Simulation::new(config(), lane(Matrix2x2::shear_y(0.5))).unwrap();
    let id = sim.add_body_at(Vec2::new(2.5, 0.0));
    assert!(sim.get_body(id).unwrap().state.in_zone());

    let input = MoveInput::toward(Vec2::X);
    for _ in 0..10 {
        sim.step(&[input]);
    }

    let pos = sim.get_body(id).unwrap().position();
    assert!((pos.x - 2.7).abs() < 1e-3, "{pos:?}");
    assert!((pos.y - 0.1).abs() < 1e-3, "{pos:?}");
}

#[test]
fn wall_inside_zone_still_blocks() {
    let level = Level::from_desc(&LevelDesc {
        id: "blocked".to_string(),
        walls: vec![WallDesc {
            center: Vec2::new(4.5, 0.0),
            half_extents: Vec2::new(0.5, 5.0),
        }],
        zones: vec![ZoneDesc {
            center: Vec2::new(3.0, 0.0),
            half_extents: Vec2::new(1.0, 5.0),
            matrix: Matrix2x2::scale(2.0),
            depth: 0.0,
        }],
        ..Default::default()
    })
    .unwrap();

    let mut sim = Simulation::new(config(), level).unwrap();
    let id = sim.add_body_at(Vec2::ZERO);

    let input = MoveInput::toward(Vec2::X).running();
    for _ in 0..200 {
        sim.step(&[input]);
    }

    let x = sim.get_body(id).unwrap().position().x;
    // Wall face at 4.0, unit box
    assert!(x <= 3.5 + 1e-3, "x={x}");
    assert!(x > 3.4, "x={x}");
}

#[test]
fn animated_zone_takes_effect_on_later_ticks() {
    let mut sim = Simulation::new(config(), lane(Matrix2x2::IDENTITY)).unwrap();
    let id = sim.add_body_at(Vec2::new(3.0, 0.0));
    let input = MoveInput::toward(Vec2::Y);

    sim.step(&[input]);
    let before = sim.get_body(id).unwrap().state.last_displacement;

    let zone = sim
        .level
        .collision
        .overlap_point(
            Vec2::new(3.0, 0.0),
            CollisionLayers::ZONE,
            DepthRange::UNBOUNDED,
        )
        .expect("zone under body");
    sim.level_mut()
        .collision
        .zone_mut(zone)
        .unwrap()
        .set_matrix(Matrix2x2::scale(3.0));

    sim.step(&[input]);
    sim.step(&[input]);
    let after = sim.get_body(id).unwrap().state.last_displacement;

    assert!((before.y - 0.02).abs() < 1e-5);
    assert!((after.y - 0.06).abs() < 1e-5);
}
