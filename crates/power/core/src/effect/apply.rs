//! One-shot application of an area effect.

use tracing::{trace, warn};

use crate::config::AoeConfig;
use crate::effect::EffectDescriptor;
use crate::env::{Cosmetic, StatusSink, WorldError, WorldOracle};
use crate::state::EntityId;

/// Counts of what one application did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Successful calls into the status sink, self-application included.
    pub applied: usize,
    /// Targets that vanished before the effect reached them.
    pub skipped: usize,
}

/// Applies an area power's effect to its caster and the selected targets.
#[derive(Clone, Copy)]
pub struct EffectApplicator<'a> {
    world: &'a dyn WorldOracle,
    sink: &'a dyn StatusSink,
}

impl<'a> EffectApplicator<'a> {
    pub fn new(world: &'a dyn WorldOracle, sink: &'a dyn StatusSink) -> Self {
        Self { world, sink }
    }

    /// Applies `config`'s effect once, synchronously.
    ///
    /// The actor receives it first when self-application is on, then a
    /// splash cosmetic plays at the actor, then every target other than the
    /// actor receives it. A target that vanished is skipped without
    /// affecting the rest.
    pub fn apply(&self, config: &AoeConfig, actor: EntityId, targets: &[EntityId]) -> ApplyReport {
        let effect = config.descriptor();
        let mut report = ApplyReport::default();

        if config.self_application {
            self.apply_one(actor, &effect, &mut report);
        }

        if let Some(location) = self.world.location_of(actor) {
            self.world.play_cosmetic(
                location,
                Cosmetic::PotionBreak {
                    rgb: effect.kind.color(),
                },
            );
        }

        for &target in targets.iter().filter(|&&target| target != actor) {
            self.apply_one(target, &effect, &mut report);
        }

        report
    }

    fn apply_one(&self, target: EntityId, effect: &EffectDescriptor, report: &mut ApplyReport) {
        match self.sink.apply_effect(target, effect) {
            Ok(()) => report.applied += 1,
            Err(WorldError::TargetVanished(id)) => {
                trace!(target = %id, "effect target vanished, skipping");
                report.skipped += 1;
            }
            Err(error) => {
                warn!(target = %target, %error, "effect application failed, skipping");
                report.skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;
    use crate::state::Location;
    use crate::test_support::MockWorld;

    fn config(self_application: bool) -> AoeConfig {
        AoeConfig {
            amplifier: 2,
            duration: 40,
            effect: EffectKind::Poison,
            self_application,
            ..AoeConfig::default()
        }
    }

    fn world_with_targets(n: u32) -> (MockWorld, Vec<EntityId>) {
        let world = MockWorld::new();
        world.add_living(EntityId(0), Location::ORIGIN);
        let targets: Vec<_> = (1..=n).map(EntityId).collect();
        for &id in &targets {
            world.add_living(id, Location::new(1.0, 0.0, 0.0));
        }
        (world, targets)
    }

    #[test]
    fn self_application_adds_one_call() {
        let (world, targets) = world_with_targets(3);
        let report =
            EffectApplicator::new(&world, &world).apply(&config(true), EntityId(0), &targets);

        assert_eq!(report.applied, 4);
        let calls = world.effect_calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].0, EntityId(0));
    }

    #[test]
    fn without_self_application_only_targets_are_hit() {
        let (world, targets) = world_with_targets(3);
        let report =
            EffectApplicator::new(&world, &world).apply(&config(false), EntityId(0), &targets);

        assert_eq!(report.applied, 3);
        assert!(world.effect_calls().iter().all(|(id, _)| *id != EntityId(0)));
    }

    #[test]
    fn actor_in_target_list_is_not_hit_twice() {
        let (world, mut targets) = world_with_targets(2);
        targets.push(EntityId(0));
        let report =
            EffectApplicator::new(&world, &world).apply(&config(true), EntityId(0), &targets);
        assert_eq!(report.applied, 3);
    }

    #[test]
    fn descriptor_uses_zero_based_strength() {
        let (world, targets) = world_with_targets(1);
        let mut cfg = config(false);
        cfg.amplifier = 1;
        EffectApplicator::new(&world, &world).apply(&cfg, EntityId(0), &targets);

        let (_, effect) = world.effect_calls()[0];
        assert_eq!(effect.strength, 0);
        assert_eq!(effect.duration_ticks, 40);
        assert_eq!(effect.kind, EffectKind::Poison);
    }

    #[test]
    fn vanished_target_is_skipped_and_rest_continue() {
        let (world, targets) = world_with_targets(3);
        world.despawn(EntityId(2));

        let report =
            EffectApplicator::new(&world, &world).apply(&config(false), EntityId(0), &targets);
        assert_eq!(
            report,
            ApplyReport {
                applied: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn emits_one_splash_at_actor() {
        let (world, targets) = world_with_targets(2);
        EffectApplicator::new(&world, &world).apply(&config(false), EntityId(0), &targets);

        let cosmetics = world.cosmetics();
        assert_eq!(cosmetics.len(), 1);
        assert_eq!(
            cosmetics[0],
            (
                Location::ORIGIN,
                Cosmetic::PotionBreak {
                    rgb: EffectKind::Poison.color()
                }
            )
        );
    }
}
