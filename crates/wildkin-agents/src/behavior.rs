//! Per-creature update: timers, vitals, activity progression, and the
//! arbitration rule table that picks a new activity when the creature is
//! free.
//!
//! # Order of operations
//!
//! 1. Skip the dead
//! 2. Count down cooldowns and fear
//! 3. Vitals (may kill by starvation)
//! 4. Auto-equip upgrades
//! 5. Fear re-sprint
//! 6. Potion auto-use when hurt
//! 7. Progress the current activity
//! 8. If idle or wandering, run the arbitration rules
//! 9. Engagement scan
//!
//! Creatures are updated in index order and see the partially updated
//! state of creatures processed earlier in the same tick.

use rand::Rng;
use tracing::{debug, info};
use wildkin_types::{BuildingKind, DeathCause, FoodSourceId, ItemKind, SimEvent, Vec2};
use wildkin_world::{building_site, roll_between};

use crate::combat;
use crate::context::SimContext;
use crate::crafting::{RecipeEffect, consume_inputs, recipe_for, require_recipe};
use crate::creature::{Activity, Creature, HomeErrand};
use crate::decision::{GoalAction, PlanContext, plan, replan_interval};
use crate::gathering;
use crate::inventory::Item;
use crate::movement::{StuckTracker, step_toward, wander_target};
use crate::scoring::{item_value, lowest_slot};
use crate::village::{can_afford, deposit_surplus, pay_for};
use crate::vitals::apply_vital_tick;

/// Distance at which a wander target counts as reached.
const WANDER_ARRIVAL: f32 = 0.5;

/// Update `creatures[index]` by `dt` seconds.
pub fn update_creature(creatures: &mut [Creature], index: usize, ctx: &mut SimContext<'_>, dt: f32) {
    let Some(creature) = creatures.get_mut(index) else {
        return;
    };
    if !creature.alive {
        return;
    }
    let config = ctx.config;

    tick_timers(creature, dt);

    let sheltered = is_sheltered(creature, config.vitals.shelter_radius);
    if let Some(cause) = apply_vital_tick(creature, &config.vitals, dt, sheltered).death {
        die(creature, cause, ctx);
        return;
    }

    for kind in creature.equipment.auto_equip(&mut creature.inventory) {
        creature.strategy.mark_used(kind);
        ctx.emit(SimEvent::Equipped {
            creature: creature.id,
            item: kind,
        });
    }

    combat::check_fear(creatures, index, ctx);
    let Some(creature) = creatures.get_mut(index) else {
        return;
    };
    maybe_drink_potion(creature, ctx);

    match creature.activity {
        Activity::Fighting(fight) => {
            combat::update_fight(creatures, index, fight, ctx, dt);
            return;
        }
        Activity::Chasing(chase) => {
            combat::update_chase(creatures, index, chase, ctx, dt);
            return;
        }
        _ => {}
    }

    let sites = if matches!(creature.activity, Activity::Building { .. }) {
        building_positions(creatures)
    } else {
        Vec::new()
    };
    let Some(creature) = creatures.get_mut(index) else {
        return;
    };
    let activity = core::mem::take(&mut creature.activity);
    creature.activity = progress(creature, ctx, activity, &sites, dt);

    if creature.activity.is_free() {
        arbitrate(creature, ctx, dt);
    }

    combat::scan_for_engagement(creatures, index, ctx, dt);
}

fn tick_timers(creature: &mut Creature, dt: f32) {
    let timers = &mut creature.cooldowns;
    timers.combat = (timers.combat - dt).max(0.0);
    timers.craft = (timers.craft - dt).max(0.0);
    timers.plan = (timers.plan - dt).max(0.0);
    if let Some(fear) = creature.fear.as_mut() {
        fear.remaining -= dt;
        if fear.remaining <= 0.0 {
            creature.fear = None;
        }
    }
}

/// Asleep within range of an owned shelter.
fn is_sheltered(creature: &Creature, radius: f32) -> bool {
    matches!(creature.activity, Activity::Sleeping { .. })
        && creature
            .village
            .as_ref()
            .and_then(|v| v.building(BuildingKind::Shelter))
            .is_some_and(|b| b.position.distance(creature.position) <= radius)
}

/// Mark a creature dead of `cause` outside combat.
pub fn die(creature: &mut Creature, cause: DeathCause, ctx: &mut SimContext<'_>) {
    creature.hp = 0.0;
    creature.alive = false;
    creature.death_cause = Some(cause);
    creature.activity = Activity::Dead;
    creature.fear = None;
    creature.goal = None;
    ctx.world.release_all(creature.id);
    ctx.species_memory.record_death(creature.species, cause);
    info!(creature = %creature.id, %cause, "creature died");
    ctx.emit(SimEvent::Died {
        creature: creature.id,
        cause,
    });
}

fn building_positions(creatures: &[Creature]) -> Vec<Vec2> {
    creatures
        .iter()
        .filter_map(|c| c.village.as_ref())
        .flat_map(|v| v.buildings.iter().map(|b| b.position))
        .collect()
}

// ---------------------------------------------------------------------------
// Potions
// ---------------------------------------------------------------------------

/// Start drinking the oldest potion when hurt and not in combat. Whatever
/// the creature was doing is interrupted.
fn maybe_drink_potion(creature: &mut Creature, ctx: &mut SimContext<'_>) {
    if creature.hp_fraction() >= ctx.config.crafting.potion_threshold
        || !creature.inventory.has(ItemKind::HealingPotion, 1)
        || creature.activity.is_combat()
        || matches!(creature.activity, Activity::Dead | Activity::DrinkingPotion { .. })
    {
        return;
    }
    let heal = match recipe_for(ItemKind::HealingPotion).map(|r| r.effect) {
        Some(RecipeEffect::Heal(amount)) => amount as f32,
        _ => return,
    };
    if !creature.activity.is_free() {
        combat::interrupt(creature, ctx);
    }
    if creature.inventory.remove(ItemKind::HealingPotion, 1).is_err() {
        return;
    }
    creature.strategy.mark_used(ItemKind::HealingPotion);
    creature.activity = Activity::DrinkingPotion {
        remaining: ctx.config.crafting.drink_duration,
        heal,
    };
}

// ---------------------------------------------------------------------------
// Activity progression
// ---------------------------------------------------------------------------

fn progress(creature: &mut Creature, ctx: &mut SimContext<'_>, activity: Activity, sites: &[Vec2], dt: f32) -> Activity {
    match activity {
        Activity::Idle => Activity::Idle,
        Activity::Wandering { target } => wander(creature, ctx, target, dt),
        Activity::SeekingFood { source, stuck } => seek_food(creature, ctx, source, stuck, dt),
        Activity::Eating {
            source,
            remaining,
            restore,
        } => eat(creature, ctx, source, remaining - dt, restore),
        Activity::SeekingResource { resource, stuck } => gathering::seek_resource(creature, ctx, resource, stuck, dt),
        Activity::Gathering { resource, remaining } => gathering::harvest(creature, ctx, resource, remaining, dt),
        Activity::Crafting {
            output,
            remaining,
            consumed,
        } => craft(creature, ctx, output, remaining - dt, consumed),
        Activity::DrinkingPotion { remaining, heal } => drink(creature, ctx, remaining - dt, heal),
        Activity::Sleeping { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 || creature.energy >= ctx.config.vitals.max_vital {
                Activity::Idle
            } else {
                Activity::Sleeping { remaining }
            }
        }
        Activity::ReturningHome { errand, stuck } => return_home(creature, ctx, errand, stuck, dt),
        Activity::Building { kind, remaining } => build(creature, ctx, kind, remaining - dt, sites),
        Activity::Fleeing {
            threat,
            remaining,
            direction,
        } => combat::update_flee(creature, ctx, threat, remaining, direction, dt),
        // Driven pairwise by the combat module.
        activity @ (Activity::Fighting(_) | Activity::Chasing(_) | Activity::Dead) => activity,
    }
}

fn wander(creature: &mut Creature, ctx: &SimContext<'_>, target: Vec2, dt: f32) -> Activity {
    let speed = creature.speed(&ctx.config.vitals);
    let (next, heading) = step_toward(ctx.world, creature.position, target, speed, dt);
    creature.position = next;
    creature.heading = heading;
    if next.distance(target) <= WANDER_ARRIVAL {
        Activity::Idle
    } else {
        Activity::Wandering { target }
    }
}

fn seek_food(
    creature: &mut Creature,
    ctx: &mut SimContext<'_>,
    source: FoodSourceId,
    mut stuck: StuckTracker,
    dt: f32,
) -> Activity {
    let config = ctx.config;
    let Some(position) = ctx
        .world
        .food_source(source)
        .ok()
        .filter(|f| f.is_free_for(creature.id))
        .map(|f| f.position)
    else {
        creature.cooldowns.plan = 0.0;
        return Activity::Idle;
    };
    if creature.position.distance(position) <= config.food.eat_radius {
        return match ctx.world.food_source_mut(source).and_then(|f| f.occupy(creature.id)) {
            Ok(()) => Activity::Eating {
                source: Some(source),
                remaining: config.food.eat_duration,
                restore: config.food.bush_restore,
            },
            Err(err) => {
                debug!(creature = %creature.id, %err, "could not start eating");
                Activity::Idle
            }
        };
    }
    let speed = creature.speed(&config.vitals);
    let (next, heading) = step_toward(ctx.world, creature.position, position, speed, dt);
    creature.position = next;
    creature.heading = heading;
    if stuck.update(next.distance(position), dt) {
        debug!(creature = %creature.id, food = %source, "stuck on the way to food");
        creature.cooldowns.plan = 0.0;
        return Activity::Idle;
    }
    Activity::SeekingFood { source, stuck }
}

fn eat(
    creature: &mut Creature,
    ctx: &mut SimContext<'_>,
    source: Option<FoodSourceId>,
    remaining: f32,
    restore: f32,
) -> Activity {
    if remaining > 0.0 {
        return Activity::Eating {
            source,
            remaining,
            restore,
        };
    }
    let config = ctx.config;
    creature.hunger = (creature.hunger + restore).min(config.vitals.max_vital);
    if let Some(id) = source {
        let respawn = roll_between(ctx.rng, config.food.respawn);
        if let Ok(bush) = ctx.world.food_source_mut(id) {
            bush.consume(respawn);
        }
    }
    ctx.emit(SimEvent::Ate {
        creature: creature.id,
        hunger: creature.hunger,
    });
    Activity::Idle
}

fn craft(
    creature: &mut Creature,
    ctx: &mut SimContext<'_>,
    output: ItemKind,
    remaining: f32,
    consumed: Vec<Item>,
) -> Activity {
    if remaining > 0.0 {
        return Activity::Crafting {
            output,
            remaining,
            consumed,
        };
    }
    for item in consumed {
        creature.strategy.mark_used(item.kind);
    }
    let capacity = creature.capacity(ctx.config);
    if creature.inventory.add(Item::new(output), capacity).is_err() {
        ctx.drop_item(creature.id, Item::new(output), creature.position);
    }
    creature.cooldowns.craft = ctx.config.crafting.cooldown;
    creature.cooldowns.plan = 0.0;
    debug!(creature = %creature.id, item = %output, "crafted");
    ctx.emit(SimEvent::Crafted {
        creature: creature.id,
        item: output,
    });
    Activity::Idle
}

fn drink(creature: &mut Creature, ctx: &mut SimContext<'_>, remaining: f32, heal: f32) -> Activity {
    if remaining > 0.0 {
        return Activity::DrinkingPotion { remaining, heal };
    }
    let before = creature.hp;
    creature.hp = (creature.hp + heal).min(creature.max_hp);
    ctx.emit(SimEvent::PotionDrunk {
        creature: creature.id,
        healed: (creature.hp - before).max(0.0).round() as u32,
    });
    Activity::Idle
}

fn fall_asleep(creature: &Creature, ctx: &mut SimContext<'_>) -> Activity {
    ctx.emit(SimEvent::FellAsleep { creature: creature.id });
    Activity::Sleeping {
        remaining: creature.traits().sleep_duration,
    }
}

fn return_home(
    creature: &mut Creature,
    ctx: &mut SimContext<'_>,
    errand: HomeErrand,
    mut stuck: StuckTracker,
    dt: f32,
) -> Activity {
    let config = ctx.config;
    let Some(home) = creature.home() else {
        return Activity::Idle;
    };
    if creature.position.distance(home) <= config.village.home_radius {
        return arrive_home(creature, ctx, errand);
    }
    let speed = creature.speed(&config.vitals);
    let (next, heading) = step_toward(ctx.world, creature.position, home, speed, dt);
    creature.position = next;
    creature.heading = heading;
    if stuck.update(next.distance(home), dt) {
        debug!(creature = %creature.id, "stuck on the way home");
        return match errand {
            HomeErrand::Sleep => fall_asleep(creature, ctx),
            HomeErrand::Build(_) => {
                creature.cooldowns.plan = 0.0;
                Activity::Idle
            }
        };
    }
    Activity::ReturningHome { errand, stuck }
}

fn arrive_home(creature: &mut Creature, ctx: &mut SimContext<'_>, errand: HomeErrand) -> Activity {
    match errand {
        HomeErrand::Sleep => fall_asleep(creature, ctx),
        HomeErrand::Build(kind) if can_afford(&creature.inventory, kind) => Activity::Building {
            kind,
            remaining: ctx.config.village.build_duration,
        },
        HomeErrand::Build(_) => {
            creature.cooldowns.plan = 0.0;
            Activity::Idle
        }
    }
}

fn build(creature: &mut Creature, ctx: &mut SimContext<'_>, kind: BuildingKind, remaining: f32, sites: &[Vec2]) -> Activity {
    if remaining > 0.0 {
        return Activity::Building { kind, remaining };
    }
    creature.cooldowns.plan = 0.0;
    let Some(home) = creature.home() else {
        return Activity::Idle;
    };
    if let Err(err) = pay_for(&mut creature.inventory, kind) {
        debug!(creature = %creature.id, %err, building = kind.label(), "build abandoned");
        return Activity::Idle;
    }
    let position = building_site(home, &ctx.world.obstacles, sites, ctx.world.half_extent);
    if let Some(village) = creature.village.as_mut() {
        village.add_building(kind, position);
    }
    info!(creature = %creature.id, building = kind.label(), x = position.x, z = position.z, "building completed");
    ctx.emit(SimEvent::BuildingCompleted {
        creature: creature.id,
        kind,
        position,
    });
    Activity::Idle
}

// ---------------------------------------------------------------------------
// Arbitration
// ---------------------------------------------------------------------------

/// A rule returns `true` once it has started an activity.
type Rule = fn(&mut Creature, &mut SimContext<'_>, f32) -> bool;

/// Arbitration rules in priority order.
const RULES: [(&str, Rule); 6] = [
    ("sleep", sleep_rule),
    ("hunger", hunger_rule),
    ("deposit", deposit_rule),
    ("goal", goal_rule),
    ("pickup", pickup_rule),
    ("wander", wander_rule),
];

fn arbitrate(creature: &mut Creature, ctx: &mut SimContext<'_>, dt: f32) {
    for (name, rule) in RULES {
        if rule(creature, ctx, dt) {
            tracing::trace!(creature = %creature.id, rule = name, state = ?creature.state_label(), "activity chosen");
            return;
        }
    }
}

fn sleep_rule(creature: &mut Creature, ctx: &mut SimContext<'_>, _dt: f32) -> bool {
    if creature.energy >= creature.traits().sleep_threshold {
        return false;
    }
    let config = ctx.config;
    let village = &config.village;
    let detour = creature.home().is_some_and(|h| {
        let d = h.distance(creature.position);
        d > village.home_radius && d <= village.sleep_detour
    });
    creature.activity = if detour {
        let g = &config.gathering;
        Activity::ReturningHome {
            errand: HomeErrand::Sleep,
            stuck: StuckTracker::new(ctx.rng, g.stuck_limit, g.progress_epsilon),
        }
    } else {
        fall_asleep(creature, ctx)
    };
    true
}

fn hunger_rule(creature: &mut Creature, ctx: &mut SimContext<'_>, _dt: f32) -> bool {
    if creature.hunger >= creature.traits().hunger_threshold {
        return false;
    }
    let config = ctx.config;
    let food = &config.food;
    if let Some(source) = ctx.world.nearest_food(creature.position, creature.id, food.search_radius) {
        let g = &config.gathering;
        creature.activity = Activity::SeekingFood {
            source,
            stuck: StuckTracker::new(ctx.rng, g.stuck_limit, g.progress_epsilon),
        };
        return true;
    }
    if creature.inventory.remove(ItemKind::Berry, 1).is_ok() {
        creature.strategy.mark_used(ItemKind::Berry);
        creature.activity = Activity::Eating {
            source: None,
            remaining: food.eat_duration,
            restore: food.berry_restore,
        };
        return true;
    }
    false
}

fn deposit_rule(creature: &mut Creature, ctx: &mut SimContext<'_>, _dt: f32) -> bool {
    let config = ctx.config;
    let village_cfg = &config.village;
    if !creature.is_home(village_cfg.home_radius) {
        return false;
    }
    let Some(village) = creature.village.as_mut() else {
        return false;
    };
    let count = deposit_surplus(village, &mut creature.inventory, village_cfg);
    if count > 0 {
        debug!(creature = %creature.id, count, "deposited surplus");
        ctx.emit(SimEvent::Deposited {
            creature: creature.id,
            count,
        });
    }
    false
}

fn goal_rule(creature: &mut Creature, ctx: &mut SimContext<'_>, _dt: f32) -> bool {
    let config = ctx.config;
    if creature.cooldowns.plan <= 0.0 {
        let goal = plan(&PlanContext {
            creature,
            world: &*ctx.world,
            memory: &*ctx.species_memory,
            config,
        });
        creature.cooldowns.plan = replan_interval(&goal, &config.decision);
        creature.goal = Some(goal);
    }
    let Some(action) = creature.goal.as_ref().map(|g| g.action) else {
        return false;
    };
    match action {
        GoalAction::Idle => false,
        GoalAction::Gather { kind, mode } => {
            if gathering::start_seek(creature, ctx, kind, mode) {
                true
            } else {
                creature.goal = None;
                creature.cooldowns.plan = config.decision.fast_replan;
                false
            }
        }
        GoalAction::Craft { recipe } => {
            creature.goal = None;
            creature.cooldowns.plan = 0.0;
            start_craft(creature, ctx, recipe)
        }
        GoalAction::Build { kind } => {
            creature.goal = None;
            creature.cooldowns.plan = 0.0;
            if creature.is_home(config.village.home_radius) {
                creature.activity = arrive_home(creature, ctx, HomeErrand::Build(kind));
            } else {
                let g = &config.gathering;
                creature.activity = Activity::ReturningHome {
                    errand: HomeErrand::Build(kind),
                    stuck: StuckTracker::new(ctx.rng, g.stuck_limit, g.progress_epsilon),
                };
            }
            !creature.activity.is_free()
        }
    }
}

fn start_craft(creature: &mut Creature, ctx: &SimContext<'_>, output: ItemKind) -> bool {
    let consumed = match require_recipe(output).and_then(|r| consume_inputs(&mut creature.inventory, r)) {
        Ok(items) => items,
        Err(err) => {
            debug!(creature = %creature.id, %err, "craft aborted");
            return false;
        }
    };
    creature.activity = Activity::Crafting {
        output,
        remaining: ctx.config.crafting.craft_duration,
        consumed,
    };
    true
}

/// Pick up worthwhile items lying within reach. Instant; never claims the
/// creature's turn.
fn pickup_rule(creature: &mut Creature, ctx: &mut SimContext<'_>, dt: f32) -> bool {
    let config = ctx.config;
    let nearby: Vec<_> = ctx
        .world
        .drops
        .nearby(creature.position, config.inventory.pickup_radius)
        .into_iter()
        .map(|d| (d.id, d.kind, d.durability))
        .collect();
    for (id, kind, durability) in nearby {
        let capacity = creature.capacity(config);
        let full = creature.inventory.len() >= capacity;
        let wanted = if kind.is_food() && creature.inventory.has(kind, 1) {
            ctx.rng
                .random_bool((config.inventory.duplicate_food_rate * f64::from(dt)).clamp(0.0, 1.0))
                && !full
        } else {
            let value = item_value(creature, kind, ctx.species_memory, config);
            match lowest_slot(creature, ctx.species_memory, config) {
                None => true,
                Some((_, lowest)) if full => value > lowest + config.inventory.drop_margin,
                Some((_, lowest)) => value > lowest,
            }
        };
        if !wanted {
            continue;
        }
        let Some(dropped) = ctx.world.drops.take(id) else {
            continue;
        };
        let item = Item {
            kind: dropped.kind,
            durability,
        };
        if ctx.give_item(creature, item) {
            ctx.emit(SimEvent::ItemPickedUp {
                creature: creature.id,
                item: kind,
            });
        }
    }
    false
}

fn wander_rule(creature: &mut Creature, ctx: &mut SimContext<'_>, _dt: f32) -> bool {
    if matches!(creature.activity, Activity::Wandering { .. }) {
        return true;
    }
    let anchor = creature.home().unwrap_or(creature.position);
    let range = creature.profile().wander_range;
    let target = wander_target(ctx.rng, ctx.world, anchor, range);
    creature.activity = Activity::Wandering { target };
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wildkin_types::{CreatureId, Personality, Species, StateLabel};
    use wildkin_world::{FlatTerrain, FoodSource, WorldState};

    use super::*;
    use crate::config::CreatureConfig;
    use crate::memory::SpeciesMemory;
    use crate::village::Village;

    struct Fixture {
        world: WorldState,
        memory: SpeciesMemory,
        config: CreatureConfig,
        rng: StdRng,
        events: Vec<SimEvent>,
    }

    impl Fixture {
        fn new(food: Vec<FoodSource>) -> Self {
            let mut config = CreatureConfig::default();
            config.combat.engagement_rate = 0.0;
            Self {
                world: WorldState::new(50.0, Box::new(FlatTerrain::default()), Vec::new(), Vec::new(), food)
                    .unwrap(),
                memory: SpeciesMemory::default(),
                config,
                rng: StdRng::seed_from_u64(11),
                events: Vec::new(),
            }
        }

        fn run(&mut self, creatures: &mut [Creature], ticks: usize, dt: f32) {
            let mut ctx = SimContext {
                world: &mut self.world,
                species_memory: &mut self.memory,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.events,
            };
            for _ in 0..ticks {
                for i in 0..creatures.len() {
                    update_creature(creatures, i, &mut ctx, dt);
                }
            }
        }
    }

    fn test_creature(personality: Personality) -> Creature {
        Creature::new(CreatureId(0), "Iris", Species::Mossling, personality, Vec2::ZERO)
    }

    #[test]
    fn hungry_creature_walks_to_bush_and_eats() {
        let mut fx = Fixture::new(vec![FoodSource::new(FoodSourceId(0), Vec2::new(4.0, 0.0))]);
        let mut cs = vec![test_creature(Personality::Curious)];
        cs[0].hunger = 15.0;
        fx.run(&mut cs, 1, 0.1);
        assert_eq!(cs[0].state_label(), StateLabel::SeekingFood);
        let mut ate = false;
        for _ in 0..100 {
            fx.run(&mut cs, 1, 0.1);
            if fx.events.iter().any(|e| matches!(e, SimEvent::Ate { .. })) {
                ate = true;
                break;
            }
        }
        assert!(ate);
        assert!(cs[0].hunger > 70.0);
        assert!(!fx.world.food[0].active);
    }

    #[test]
    fn tired_creature_sleeps_in_place_without_home() {
        let mut fx = Fixture::new(Vec::new());
        let mut cs = vec![test_creature(Personality::Curious)];
        cs[0].energy = 5.0;
        fx.run(&mut cs, 1, 0.1);
        assert_eq!(cs[0].state_label(), StateLabel::Sleeping);
        assert!(fx.events.iter().any(|e| matches!(e, SimEvent::FellAsleep { .. })));
    }

    #[test]
    fn tired_creature_detours_home() {
        let mut fx = Fixture::new(Vec::new());
        let mut cs = vec![test_creature(Personality::Curious)];
        cs[0].energy = 5.0;
        cs[0].village = Some(Village::new(Vec2::new(20.0, 0.0)));
        fx.run(&mut cs, 1, 0.1);
        assert_eq!(cs[0].state_label(), StateLabel::ReturningHome);
    }

    #[test]
    fn crafts_then_equips_next_tick() {
        let mut fx = Fixture::new(Vec::new());
        let mut cs = vec![test_creature(Personality::Aggressive)];
        cs[0].inventory.add(Item::new(ItemKind::Wood), 12).unwrap();
        cs[0].inventory.add(Item::new(ItemKind::Stone), 12).unwrap();
        cs[0].inventory.add(Item::new(ItemKind::Stone), 12).unwrap();
        let base = cs[0].attack();
        fx.run(&mut cs, 1, 0.1);
        assert_eq!(cs[0].state_label(), StateLabel::Crafting);
        assert!(cs[0].inventory.is_empty());
        fx.run(&mut cs, 40, 0.1);
        assert!((cs[0].attack() - base - 8.0).abs() < f32::EPSILON);
        assert!(fx.events.iter().any(|e| matches!(e, SimEvent::Crafted { item: ItemKind::StoneBlade, .. })));
        assert!(fx.events.iter().any(|e| matches!(e, SimEvent::Equipped { item: ItemKind::StoneBlade, .. })));
    }

    #[test]
    fn hurt_creature_drinks_potion() {
        let mut fx = Fixture::new(Vec::new());
        let mut cs = vec![test_creature(Personality::Curious)];
        cs[0].hp = 20.0;
        cs[0].inventory.add(Item::new(ItemKind::HealingPotion), 12).unwrap();
        fx.run(&mut cs, 1, 0.1);
        assert_eq!(cs[0].state_label(), StateLabel::DrinkingPotion);
        fx.run(&mut cs, 20, 0.1);
        assert!(cs[0].hp >= 49.0);
        assert!(!cs[0].inventory.has(ItemKind::HealingPotion, 1));
    }

    #[test]
    fn starvation_records_species_memory() {
        let mut fx = Fixture::new(Vec::new());
        let mut cs = vec![test_creature(Personality::Curious)];
        cs[0].hunger = 0.0;
        cs[0].hp = 0.5;
        fx.run(&mut cs, 1, 1.0);
        assert!(!cs[0].alive);
        assert_eq!(cs[0].state_label(), StateLabel::Dead);
        assert_eq!(fx.memory.record(Species::Mossling).starvation_deaths, 1);
    }

    #[test]
    fn builds_shelter_at_home() {
        let mut fx = Fixture::new(Vec::new());
        let mut cs = vec![test_creature(Personality::Curious)];
        cs[0].village = Some(Village::new(Vec2::ZERO));
        for kind in [ItemKind::Wood, ItemKind::Wood, ItemKind::Wood, ItemKind::Stone, ItemKind::Stone] {
            cs[0].inventory.add(Item::new(kind), 12).unwrap();
        }
        fx.run(&mut cs, 1, 0.1);
        assert_eq!(cs[0].state_label(), StateLabel::Building);
        fx.run(&mut cs, 110, 0.1);
        assert!(cs[0].has_building(BuildingKind::Shelter));
        assert!(cs[0].inventory.is_empty());
    }
}
