use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::state::AppState;
use crate::core::canvas::{Canvas, CanvasRect};
use crate::core::components::{Bloom, BloomGrowth, CanvasBox};
use crate::core::config::GameConfig;
use crate::core::system::system_order::SimulationSet;
use crate::gameplay::rules::random_spawn_rect;
use crate::rendering::sprites::{bloom_sprite, SpriteAssets};

/// Blooms sit above the flower; later spawns sit above earlier ones.
const BLOOM_Z_BASE: f32 = 2.0;
const BLOOM_Z_STEP: f32 = 1e-4;

/// Repeating spawn timer, reset when a run starts.
#[derive(Resource, Deref, DerefMut)]
pub struct SpawnClock(pub Timer);

/// Random source for bloom placement and regrow delays.
#[derive(Resource, Deref, DerefMut)]
pub struct BloomRng(pub StdRng);

impl FromWorld for BloomRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<GameConfig>().and_then(|c| c.seed);
        match seed {
            Some(s) => {
                info!(target: "spawn", "Bloom RNG seeded with {s}");
                Self(StdRng::seed_from_u64(s))
            }
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Spawn counter, restarted with each run.
#[derive(Resource, Default, Debug)]
pub struct BloomSerial(pub u64);

#[derive(Event, Debug, Clone, Copy)]
pub struct BloomSpawned {
    pub entity: Entity,
    pub rect: CanvasRect,
}

pub struct BloomSpawnPlugin;

impl Plugin for BloomSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BloomSerial>()
            .init_resource::<BloomRng>()
            .add_event::<BloomSpawned>()
            .add_systems(
                OnEnter(AppState::Playing),
                (reset_spawn_clock, spawn_first_bloom).chain(),
            )
            .add_systems(
                Update,
                tick_spawn_clock
                    .in_set(SimulationSet)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

fn reset_spawn_clock(mut commands: Commands, cfg: Res<GameConfig>, mut serial: ResMut<BloomSerial>) {
    serial.0 = 0;
    commands.insert_resource(SpawnClock(Timer::from_seconds(
        cfg.blooms.spawn_interval.max(0.05),
        TimerMode::Repeating,
    )));
}

fn spawn_first_bloom(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut rng: ResMut<BloomRng>,
    mut serial: ResMut<BloomSerial>,
    sprites: Option<Res<SpriteAssets>>,
    mut spawned: EventWriter<BloomSpawned>,
) {
    if let Some(ev) = spawn_bloom(&mut commands, &cfg, &mut rng, &mut serial, sprites.as_deref()) {
        spawned.write(ev);
    }
}

pub fn tick_spawn_clock(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    clock: Option<ResMut<SpawnClock>>,
    mut rng: ResMut<BloomRng>,
    mut serial: ResMut<BloomSerial>,
    sprites: Option<Res<SpriteAssets>>,
    blooms: Query<(), With<Bloom>>,
    mut spawned: EventWriter<BloomSpawned>,
) {
    let Some(mut clock) = clock else {
        return;
    };
    clock.tick(time.delta());
    let mut live = blooms.iter().count();
    for _ in 0..clock.times_finished_this_tick() {
        if live >= cfg.blooms.max_live {
            debug!(target: "spawn", "Bloom cap {} reached", cfg.blooms.max_live);
            break;
        }
        if let Some(ev) = spawn_bloom(&mut commands, &cfg, &mut rng, &mut serial, sprites.as_deref()) {
            spawned.write(ev);
            live += 1;
        }
    }
}

/// Spawn one bloom at a free random spot. Returns `None` when no spot was found.
pub fn spawn_bloom(
    commands: &mut Commands,
    cfg: &GameConfig,
    rng: &mut BloomRng,
    serial: &mut BloomSerial,
    sprites: Option<&SpriteAssets>,
) -> Option<BloomSpawned> {
    let flower = CanvasRect::new(
        Vec2::new(cfg.flower.x, cfg.flower.y),
        Vec2::new(cfg.flower.width, cfg.flower.height),
    );
    let Some(rect) = random_spawn_rect(
        &mut rng.0,
        cfg.canvas.size(),
        cfg.blooms.size(),
        &flower,
        cfg.blooms.spawn_attempts,
    ) else {
        debug!(target: "spawn", "No free spot for a bloom after {} attempts", cfg.blooms.spawn_attempts);
        return None;
    };

    let canvas = Canvas::from_config(cfg);
    let world = canvas.rect_to_world(&rect);
    let z = BLOOM_Z_BASE + serial.0 as f32 * BLOOM_Z_STEP;
    let bloom = Bloom { serial: serial.0 };
    serial.0 += 1;

    let entity = commands
        .spawn((
            Name::new(format!("Bloom #{}", bloom.serial)),
            bloom,
            BloomGrowth::new(cfg.blooms.frame_secs),
            CanvasBox(rect),
            bloom_sprite(sprites, 0, cfg.blooms.size()),
            Transform::from_translation(world.extend(z)),
            StateScoped(AppState::Playing),
        ))
        .id();
    debug!(target: "spawn", "Spawned bloom {:?} at ({:.0}, {:.0})", entity, rect.min.x, rect.min.y);
    Some(BloomSpawned { entity, rect })
}
