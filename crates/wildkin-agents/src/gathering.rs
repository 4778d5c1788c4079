//! The resource claim protocol, from the creature's side.
//!
//! seek -> (arrive, claim) -> harvest -> (fail | yield) -> deplete
//!
//! A creature only holds a claim while harvesting. Arriving at a resource
//! someone else holds leaves it waiting in place, which the stuck tracker
//! turns into a re-plan. Every exit path releases the claim.

use rand::Rng;
use tracing::debug;
use wildkin_types::{ItemKind, ResourceId, ResourceKind, SimEvent};
use wildkin_world::{SearchMode, regrow_range, roll_between};

use crate::config::GatheringConfig;
use crate::context::SimContext;
use crate::creature::{Activity, Creature};
use crate::inventory::Item;
use crate::movement::{StuckTracker, step_toward};
use crate::village::maybe_claim_home;

/// Chance that a finished harvest yields nothing.
pub const fn failure_chance(config: &GatheringConfig, kind: ResourceKind) -> f64 {
    match kind {
        ResourceKind::Tree => config.tree_failure,
        ResourceKind::Bush => config.bush_failure,
        ResourceKind::Rock => config.rock_failure,
    }
}

/// Pick the nearest matching resource and start walking to it.
/// Returns `false` if none was found.
pub fn start_seek(creature: &mut Creature, ctx: &mut SimContext<'_>, kind: ResourceKind, mode: SearchMode) -> bool {
    let Some(resource) = ctx.world.find_resource(creature.position, kind, mode, creature.id) else {
        return false;
    };
    let g = &ctx.config.gathering;
    creature.activity = Activity::SeekingResource {
        resource,
        stuck: StuckTracker::new(ctx.rng, g.stuck_limit, g.progress_epsilon),
    };
    true
}

/// Advance a creature walking to `resource`.
pub fn seek_resource(
    creature: &mut Creature,
    ctx: &mut SimContext<'_>,
    resource: ResourceId,
    mut stuck: StuckTracker,
    dt: f32,
) -> Activity {
    let Ok(target) = ctx.world.resource(resource) else {
        debug!(creature = %creature.id, resource = %resource, "seek target missing");
        return give_up(creature);
    };
    if target.depleted {
        return give_up(creature);
    }
    let position = target.position;
    let distance = creature.position.distance(position);
    let config = ctx.config;
    let g = &config.gathering;

    if distance <= g.arrival_radius {
        if let Ok(res) = ctx.world.resource_mut(resource)
            && res.claim(creature.id).is_ok()
        {
            return Activity::Gathering {
                resource,
                remaining: g.harvest_duration,
            };
        }
        // Contested: wait here until the holder leaves or patience runs out.
        if stuck.update(distance, dt) {
            debug!(creature = %creature.id, resource = %resource, "gave up on contested resource");
            return give_up(creature);
        }
        return Activity::SeekingResource { resource, stuck };
    }

    let speed = creature.speed(&config.vitals);
    let (next, heading) = step_toward(ctx.world, creature.position, position, speed, dt);
    creature.position = next;
    creature.heading = heading;
    if stuck.update(creature.position.distance(position), dt) {
        debug!(creature = %creature.id, resource = %resource, "stuck, re-planning");
        return give_up(creature);
    }
    Activity::SeekingResource { resource, stuck }
}

/// Count down a harvest; completes it when the timer runs out.
pub fn harvest(
    creature: &mut Creature,
    ctx: &mut SimContext<'_>,
    resource: ResourceId,
    remaining: f32,
    dt: f32,
) -> Activity {
    let held = ctx
        .world
        .resource(resource)
        .is_ok_and(|r| r.gatherer == Some(creature.id));
    if !held {
        return give_up(creature);
    }
    let remaining = remaining - dt;
    if remaining > 0.0 {
        return Activity::Gathering { resource, remaining };
    }
    complete_harvest(creature, ctx, resource);
    Activity::Idle
}

fn complete_harvest(creature: &mut Creature, ctx: &mut SimContext<'_>, resource: ResourceId) {
    let config = ctx.config;
    let g = &config.gathering;
    creature.energy = (creature.energy - g.energy_cost).max(0.0);
    let Ok(res) = ctx.world.resource_mut(resource) else {
        return;
    };
    let kind = res.kind;

    if ctx.rng.random_bool(failure_chance(g, kind).clamp(0.0, 1.0)) {
        res.release(creature.id);
        ctx.emit(SimEvent::GatherFailed {
            creature: creature.id,
            resource,
        });
        return;
    }

    let regrow = roll_between(ctx.rng, regrow_range(kind));
    res.deplete(regrow);

    let mut rolled = Vec::new();
    let count = if g.max_yield > g.min_yield {
        ctx.rng.random_range(g.min_yield..=g.max_yield)
    } else {
        g.min_yield
    };
    for _ in 0..count {
        rolled.push(kind.primary_item());
    }
    match kind {
        ResourceKind::Bush if ctx.rng.random_bool(g.berry_chance.clamp(0.0, 1.0)) => {
            rolled.push(ItemKind::Berry);
        }
        ResourceKind::Rock if ctx.rng.random_bool(g.crystal_chance.clamp(0.0, 1.0)) => {
            rolled.push(ItemKind::Crystal);
        }
        _ => {}
    }

    let mut kept = Vec::new();
    for item in rolled {
        if ctx.give_item(creature, Item::new(item)) {
            kept.push(item);
        }
    }
    ctx.emit(SimEvent::GatherSucceeded {
        creature: creature.id,
        resource,
        kind,
        items: kept,
    });

    creature.gather_count = creature.gather_count.saturating_add(1);
    if maybe_claim_home(
        &mut creature.village,
        creature.gather_count,
        creature.position,
        &config.village,
    ) {
        tracing::info!(creature = %creature.id, x = creature.position.x, z = creature.position.z, "home claimed");
        ctx.emit(SimEvent::HomeClaimed {
            creature: creature.id,
            position: creature.position,
        });
    }
}

/// Abandon the current approach and ask the planner for a new goal now.
fn give_up(creature: &mut Creature) -> Activity {
    creature.cooldowns.plan = 0.0;
    creature.goal = None;
    Activity::Idle
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wildkin_types::{CreatureId, Personality, Species, Vec2};
    use wildkin_world::{FlatTerrain, WorldResource, WorldState};

    use super::*;
    use crate::config::CreatureConfig;
    use crate::memory::SpeciesMemory;

    fn world_with(kind: ResourceKind, at: Vec2) -> WorldState {
        let resources = vec![WorldResource::new(ResourceId(0), kind, at)];
        WorldState::new(50.0, Box::new(FlatTerrain::default()), Vec::new(), resources, Vec::new()).unwrap()
    }

    fn test_creature(id: u32) -> Creature {
        Creature::new(CreatureId(id), "Dew", Species::Mossling, Personality::Curious, Vec2::ZERO)
    }

    #[test]
    fn walk_claim_harvest_deplete() {
        let mut world = world_with(ResourceKind::Bush, Vec2::new(3.0, 0.0));
        let mut memory = SpeciesMemory::default();
        let mut config = CreatureConfig::default();
        config.gathering.bush_failure = 0.0;
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = Vec::new();
        let mut ctx = SimContext {
            world: &mut world,
            species_memory: &mut memory,
            config: &config,
            rng: &mut rng,
            events: &mut events,
        };
        let mut c = test_creature(0);

        assert!(start_seek(&mut c, &mut ctx, ResourceKind::Bush, SearchMode::Competitive));
        for _ in 0..100 {
            let activity = core::mem::take(&mut c.activity);
            c.activity = match activity {
                Activity::SeekingResource { resource, stuck } => seek_resource(&mut c, &mut ctx, resource, stuck, 0.1),
                Activity::Gathering { resource, remaining } => harvest(&mut c, &mut ctx, resource, remaining, 0.1),
                other => other,
            };
            if c.activity == Activity::Idle {
                break;
            }
        }
        assert_eq!(c.activity, Activity::Idle);
        assert!(c.inventory.count(ItemKind::Herb) >= 1);
        assert_eq!(c.gather_count, 1);
        let res = ctx.world.resource(ResourceId(0)).unwrap();
        assert!(res.depleted);
        assert_eq!(res.gatherer, None);
        assert!(matches!(ctx.events.last(), Some(SimEvent::GatherSucceeded { .. })));
    }

    #[test]
    fn failure_costs_energy_and_releases() {
        let mut world = world_with(ResourceKind::Rock, Vec2::new(1.0, 0.0));
        let mut memory = SpeciesMemory::default();
        let mut config = CreatureConfig::default();
        config.gathering.rock_failure = 1.0;
        let mut rng = StdRng::seed_from_u64(2);
        let mut events = Vec::new();
        let mut ctx = SimContext {
            world: &mut world,
            species_memory: &mut memory,
            config: &config,
            rng: &mut rng,
            events: &mut events,
        };
        let mut c = test_creature(0);
        ctx.world.resource_mut(ResourceId(0)).unwrap().claim(c.id).unwrap();
        let next = harvest(&mut c, &mut ctx, ResourceId(0), 0.05, 0.1);
        assert_eq!(next, Activity::Idle);
        assert!((c.energy - 97.0).abs() < 1e-4);
        assert!(c.inventory.is_empty());
        let res = ctx.world.resource(ResourceId(0)).unwrap();
        assert!(!res.depleted);
        assert_eq!(res.gatherer, None);
        assert!(matches!(ctx.events.last(), Some(SimEvent::GatherFailed { .. })));
    }

    #[test]
    fn contested_resource_is_not_stolen() {
        let mut world = world_with(ResourceKind::Tree, Vec2::new(1.0, 0.0));
        let mut memory = SpeciesMemory::default();
        let config = CreatureConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = Vec::new();
        let mut ctx = SimContext {
            world: &mut world,
            species_memory: &mut memory,
            config: &config,
            rng: &mut rng,
            events: &mut events,
        };
        ctx.world.resource_mut(ResourceId(0)).unwrap().claim(CreatureId(9)).unwrap();
        let mut c = test_creature(0);
        assert!(start_seek(&mut c, &mut ctx, ResourceKind::Tree, SearchMode::Competitive));
        let mut gave_up = false;
        for _ in 0..100 {
            let activity = core::mem::take(&mut c.activity);
            c.activity = match activity {
                Activity::SeekingResource { resource, stuck } => seek_resource(&mut c, &mut ctx, resource, stuck, 0.1),
                other => other,
            };
            assert!(!matches!(c.activity, Activity::Gathering { .. }));
            if c.activity == Activity::Idle {
                gave_up = true;
                break;
            }
        }
        assert!(gave_up);
        assert_eq!(ctx.world.resource(ResourceId(0)).unwrap().gatherer, Some(CreatureId(9)));
    }

    #[test]
    fn strict_search_skips_claimed() {
        let mut world = world_with(ResourceKind::Tree, Vec2::new(1.0, 0.0));
        world.resources[0].claim(CreatureId(9)).unwrap();
        let mut memory = SpeciesMemory::default();
        let config = CreatureConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = Vec::new();
        let mut ctx = SimContext {
            world: &mut world,
            species_memory: &mut memory,
            config: &config,
            rng: &mut rng,
            events: &mut events,
        };
        let mut c = test_creature(0);
        assert!(!start_seek(&mut c, &mut ctx, ResourceKind::Tree, SearchMode::Strict));
        assert_eq!(c.activity, Activity::Idle);
    }

    #[test]
    fn home_claimed_on_eighth_gather() {
        let mut world = world_with(ResourceKind::Tree, Vec2::new(1.0, 0.0));
        let mut memory = SpeciesMemory::default();
        let mut config = CreatureConfig::default();
        config.gathering.tree_failure = 0.0;
        let mut rng = StdRng::seed_from_u64(4);
        let mut events = Vec::new();
        let mut ctx = SimContext {
            world: &mut world,
            species_memory: &mut memory,
            config: &config,
            rng: &mut rng,
            events: &mut events,
        };
        let mut c = test_creature(0);
        c.gather_count = 7;
        ctx.world.resource_mut(ResourceId(0)).unwrap().claim(c.id).unwrap();
        harvest(&mut c, &mut ctx, ResourceId(0), 0.0, 0.1);
        assert_eq!(c.gather_count, 8);
        assert_eq!(c.home(), Some(Vec2::ZERO));
        assert!(
            ctx.events
                .iter()
                .any(|e| matches!(e, SimEvent::HomeClaimed { .. }))
        );
    }
}
