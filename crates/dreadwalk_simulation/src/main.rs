//! Headless симуляция DREADWALK
//!
//! Цель проходит сквозь все радиусы врага и уходит обратно.
//! Usage: dreadwalk_simulation [enemy_config.ron]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use dreadwalk_simulation::audio::LoggingAudioSink;
use dreadwalk_simulation::{
    create_headless_app, AudioLayerController, ClipId, DebugRingsPlugin, Enemy, EnemyAiSet, EnemyConfig, PerceptionChanged,
    SimulationPlugin, TargetTag,
};

const TICKS: usize = 1800;

/// Маркер демо-цели
#[derive(Component)]
struct Walker {
    velocity: Vec3,
}

/// Цель идёт к врагу, на x < 0.5 разворачивается
fn walk_target(mut walkers: Query<(&mut Transform, &mut Walker)>, time: Res<Time>) {
    for (mut transform, mut walker) in walkers.iter_mut() {
        transform.translation += walker.velocity * time.delta_secs();
        if transform.translation.x < 0.5 && walker.velocity.x < 0.0 {
            walker.velocity = -walker.velocity;
        }
    }
}

fn report_transitions(mut transitions: EventReader<PerceptionChanged>) {
    for event in transitions.read() {
        println!(
            "Enemy {:?}: {} → {} at {:.2}m",
            event.entity, event.from, event.to, event.distance
        );
    }
}

fn load_config() -> EnemyConfig {
    let Some(path) = std::env::args().nth(1) else {
        let mut config = EnemyConfig::default();
        config.sounds.outer_ambience = Some(ClipId::from("ambience_outer"));
        config.sounds.inner_ambience = Some(ClipId::from("ambience_inner"));
        config.sounds.idle = vec![ClipId::from("groan_a"), ClipId::from("groan_b")];
        config.sounds.chase = vec![ClipId::from("snarl")];
        config.sounds.attack = Some(ClipId::from("bite"));
        return config;
    };

    match EnemyConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}, falling back to defaults");
            EnemyConfig::default()
        }
    }
}

fn main() {
    let seed = 42;
    println!("Starting DREADWALK headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, DebugRingsPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .add_systems(FixedUpdate, walk_target.before(EnemyAiSet))
        .add_systems(PostUpdate, report_transitions);

    app.world_mut().spawn((
        TargetTag::player(),
        Transform::from_xyz(20.0, 0.0, 0.0),
        Walker {
            velocity: Vec3::new(-1.0, 0.0, 0.0),
        },
    ));
    app.world_mut().spawn((
        Enemy,
        load_config(),
        AudioLayerController::with_sink(LoggingAudioSink),
        Transform::default(),
    ));

    for tick in 0..TICKS {
        app.update();

        if tick % 300 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    println!("Simulation complete!");
}
