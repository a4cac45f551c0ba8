use std::sync::Arc;

use power_core::{
    Activation, AoeConfig, AoePower, EffectKind, EngineConfig, GateDecision, Power, PowerId,
    RainbowConfig, RainbowPower, Vec3,
};
use power_runtime::{Runtime, RuntimeConfig, RuntimeError, SandboxWorld};

const AOE: PowerId = PowerId(1);
const RAINBOW: PowerId = PowerId(2);

fn config() -> RuntimeConfig {
    RuntimeConfig {
        engine: EngineConfig::default().with_seed(0xC0FFEE),
        ..RuntimeConfig::default()
    }
}

fn powers() -> Vec<Box<dyn Power>> {
    vec![
        Box::new(AoePower::new(
            AOE,
            AoeConfig {
                effect: EffectKind::Slow,
                range: 6,
                ..AoeConfig::default()
            },
        )),
        Box::new(RainbowPower::new(RAINBOW, RainbowConfig::default())),
    ]
}

async fn start(world: Arc<SandboxWorld>) -> Runtime {
    Runtime::builder()
        .config(config())
        .world(world)
        .powers(powers())
        .build()
        .await
        .expect("runtime should start")
}

#[tokio::test]
async fn aoe_activation_respects_cooldown_across_ticks() {
    let world = Arc::new(SandboxWorld::default());
    let caster = world.spawn_living(0.0, 0.0, Vec3::new(1.0, 0.0, 0.0));
    let victim = world.spawn_living(3.0, 0.0, Vec3::new(-1.0, 0.0, 0.0));
    let bystander = world.spawn_living(30.0, 0.0, Vec3::ZERO);

    let runtime = start(Arc::clone(&world)).await;
    let handle = runtime.handle();

    let first = handle.activate(caster, AOE).await.unwrap();
    assert!(first.fired());
    assert_eq!(world.effects_on(caster).len(), 1);
    assert_eq!(world.effects_on(victim)[0].effect.kind, EffectKind::Slow);
    assert!(world.effects_on(bystander).is_empty());

    handle.advance(10).await.unwrap();
    let second = handle.activate(caster, AOE).await.unwrap();
    assert_eq!(
        second.outcome,
        Activation::Rejected(GateDecision::CoolingDown { remaining: 10 })
    );

    handle.advance(15).await.unwrap();
    assert!(handle.activate(caster, AOE).await.unwrap().fired());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rainbow_animation_terminates_and_cleans_up() {
    let world = Arc::new(SandboxWorld::default());
    let caster = world.spawn_living(0.0, 0.0, Vec3::new(0.0, 0.2, 0.3));

    let runtime = start(Arc::clone(&world)).await;
    let handle = runtime.handle();

    let report = handle.activate(caster, RAINBOW).await.unwrap();
    let Activation::Launched { projectiles, .. } = report.outcome else {
        panic!("expected launch, got {:?}", report.outcome);
    };
    assert_eq!(projectiles, 5);
    assert_eq!(handle.active_tasks().await.unwrap(), 1);

    let mut ticks = 0;
    while handle.active_tasks().await.unwrap() > 0 {
        handle.advance(20).await.unwrap();
        ticks += 20;
        assert!(ticks < 5_000, "animation did not terminate");
    }

    assert!(
        world
            .placed_blocks()
            .iter()
            .all(|(_, material)| !material.is_wool())
    );
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.world.airborne_transients, 0);
    assert_eq!(snapshot.active_tasks, 0);
}

#[tokio::test]
async fn concurrent_activations_from_one_actor_pass_once() {
    let world = Arc::new(SandboxWorld::default());
    let caster = world.spawn_living(0.0, 0.0, Vec3::new(1.0, 0.0, 0.0));
    let runtime = start(Arc::clone(&world)).await;

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let handle = runtime.handle();
        tasks.push(tokio::spawn(async move {
            handle.activate(caster, AOE).await.unwrap()
        }));
    }

    let mut fired = 0;
    for task in tasks {
        if task.await.unwrap().fired() {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
}

#[tokio::test]
async fn despawn_forgets_cooldowns_and_later_activations_are_no_ops() {
    let world = Arc::new(SandboxWorld::default());
    let caster = world.spawn_living(0.0, 0.0, Vec3::new(1.0, 0.0, 0.0));
    let runtime = start(Arc::clone(&world)).await;
    let handle = runtime.handle();

    assert!(handle.activate(caster, AOE).await.unwrap().fired());
    assert_eq!(handle.snapshot().await.unwrap().cooldown_records, 1);

    assert!(handle.despawn(caster).await.unwrap());
    assert_eq!(handle.snapshot().await.unwrap().cooldown_records, 0);
    assert_eq!(
        handle.activate(caster, AOE).await.unwrap().outcome,
        Activation::ActorVanished
    );
    assert!(!handle.despawn(caster).await.unwrap());
}

#[tokio::test]
async fn consumption_is_charged_from_durability() {
    let world = Arc::new(SandboxWorld::default());
    let caster = world.spawn_living(0.0, 0.0, Vec3::new(1.0, 0.0, 0.0));
    world.set_durability(caster, 4);

    let runtime = Runtime::builder()
        .config(config())
        .world(Arc::clone(&world))
        .power(Box::new(AoePower::new(
            AOE,
            AoeConfig {
                consumption: 3,
                cooldown: 0,
                ..AoeConfig::default()
            },
        )))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert!(handle.activate(caster, AOE).await.unwrap().fired());
    assert_eq!(
        handle.activate(caster, AOE).await.unwrap().outcome,
        Activation::Rejected(GateDecision::ChargeFailed)
    );
    assert_eq!(world.durability(caster), Some(1));
}

#[tokio::test]
async fn unknown_and_duplicate_powers_are_errors() {
    let world = Arc::new(SandboxWorld::default());
    let caster = world.spawn_living(0.0, 0.0, Vec3::ZERO);
    let runtime = start(Arc::clone(&world)).await;

    let err = runtime.handle().activate(caster, PowerId(77)).await.unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownPower(PowerId(77))));

    let duplicate = Runtime::builder()
        .powers(powers())
        .power(Box::new(RainbowPower::new(RAINBOW, RainbowConfig::default())))
        .build()
        .await;
    assert!(matches!(duplicate, Err(RuntimeError::DuplicatePower(RAINBOW))));
}

#[tokio::test(start_paused = true)]
async fn driven_ticks_advance_with_time() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            drive_ticks: true,
            ..config()
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    tokio::time::sleep(std::time::Duration::from_millis(520)).await;
    let now = handle.snapshot().await.unwrap().now;
    assert!(now.0 >= 9, "only reached {now}");
}
