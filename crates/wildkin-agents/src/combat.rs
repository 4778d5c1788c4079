//! Combat, flee, and chase.
//!
//! ## Combat flow
//!
//! 1. **Scan**: an eligible creature rolls engagement against every eligible
//!    neighbour within the engagement radius. The defender's current
//!    activity is interrupted (an ambush if it was busy).
//! 2. **Hit exchange**: the two sides alternate hits on a fixed interval
//!    once within melee range. Each hit wears the attacker's weapon and the
//!    defender's armor.
//! 3. **Flee roll**: after each hit the creature that took damage rolls the
//!    flee table. A flee ends the fight; the winner may give chase.
//! 4. **Cap / timeout**: once both sides have landed the hit cap, or the
//!    fight outlasts the safety timeout, both disengage. The cap counts hits
//!    within one engagement; a chase that catches its prey starts a new
//!    engagement with both counts at zero.
//! 5. **Death**: HP at zero marks the victim dead, pays XP, and moves loot.
//!
//! All pairwise state lives on the two creatures' activities; the fight is
//! driven by whichever side currently holds the turn.

use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::{debug, info};
use wildkin_types::{CreatureId, DeathCause, EquipSlot, ItemKind, SimEvent, Vec2};

use crate::context::SimContext;
use crate::creature::{Activity, Creature, Fear};
use crate::equipment::Wear;
use crate::movement::{step_along, step_toward};

// ---------------------------------------------------------------------------
// Pairwise state
// ---------------------------------------------------------------------------

/// One side of a hit exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engagement {
    /// The other side.
    pub opponent: CreatureId,
    /// Hits this side has landed.
    pub hits_dealt: u32,
    /// This side swings next.
    pub my_turn: bool,
    /// Seconds accumulated toward the next swing.
    pub swing_timer: f32,
    /// Seconds since the fight began.
    pub elapsed: f32,
}

impl Engagement {
    /// A fresh engagement against `opponent`.
    pub const fn new(opponent: CreatureId, my_turn: bool) -> Self {
        Self {
            opponent,
            hits_dealt: 0,
            my_turn,
            swing_timer: 0.0,
            elapsed: 0.0,
        }
    }
}

/// A hunter's pursuit of fleeing prey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit {
    /// The pursued creature.
    pub prey: CreatureId,
    /// Seconds before the hunter gives up.
    pub remaining: f32,
    /// Head start before catch checks begin.
    pub grace: f32,
    /// The prey was nearly dead when the chase began.
    pub going_for_kill: bool,
}

/// Mutable access to two distinct creatures.
pub fn two_mut(creatures: &mut [Creature], a: usize, b: usize) -> Option<(&mut Creature, &mut Creature)> {
    if a == b {
        return None;
    }
    let (lo, hi) = (a.min(b), a.max(b));
    let (left, right) = creatures.split_at_mut_checked(hi)?;
    let low = left.get_mut(lo)?;
    let high = right.first_mut()?;
    if a < b { Some((low, high)) } else { Some((high, low)) }
}

// ---------------------------------------------------------------------------
// Damage
// ---------------------------------------------------------------------------

/// Outcome of a single blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blow {
    /// HP removed from the defender.
    pub damage: u32,
    /// Elemental advantage applied.
    pub super_effective: bool,
}

/// Damage of one hit: `round(atk * roll * advantage - armor)`, at least the
/// configured minimum.
#[allow(clippy::cast_sign_loss)]
pub fn compute_blow(attacker: &Creature, defender: &Creature, roll: f32, advantage: f32, min_damage: f32) -> Blow {
    let super_effective = attacker.element().beats(defender.element());
    let mult = if super_effective { advantage } else { 1.0 };
    let raw = (attacker.attack() * roll * mult - defender.armor()).round();
    Blow {
        damage: raw.max(min_damage).max(0.0) as u32,
        super_effective,
    }
}

// ---------------------------------------------------------------------------
// Engagement scan
// ---------------------------------------------------------------------------

fn can_fight(creature: &Creature) -> bool {
    creature.alive
        && !creature.activity.is_combat()
        && creature.activity != Activity::Dead
        && creature.cooldowns.combat <= 0.0
        && creature.fear.is_none()
}

/// Roll engagement between `creatures[index]` and its neighbours. Starts at
/// most one fight. Neighbours are visited in index order.
pub fn scan_for_engagement(creatures: &mut [Creature], index: usize, ctx: &mut SimContext<'_>, dt: f32) {
    let config = ctx.config;
    let cfg = &config.combat;
    let Some(me) = creatures.get(index) else {
        return;
    };
    if !can_fight(me)
        || matches!(me.activity, Activity::Sleeping { .. })
        || me.hp_fraction() < cfg.min_initiator_hp
    {
        return;
    }
    let rate = cfg.engagement_rate
        * f64::from(me.profile().aggression)
        * f64::from(me.traits().aggression)
        * f64::from(dt);
    let chance = rate.clamp(0.0, 1.0);
    let (my_pos, my_species) = (me.position, me.species);

    let mut target = None;
    for (j, other) in creatures.iter().enumerate() {
        if j == index || !can_fight(other) || other.position.distance(my_pos) > cfg.engagement_radius {
            continue;
        }
        if other.species == my_species && ctx.rng.random_bool(cfg.same_species_skip.clamp(0.0, 1.0)) {
            continue;
        }
        if ctx.rng.random_bool(chance) {
            target = Some(j);
            break;
        }
    }
    if let Some(j) = target {
        engage(creatures, index, j, ctx);
    }
}

/// Start a fight. The attacker swings first.
pub fn engage(creatures: &mut [Creature], attacker: usize, defender: usize, ctx: &mut SimContext<'_>) {
    let Some((a, d)) = two_mut(creatures, attacker, defender) else {
        return;
    };
    let ambush = !d.activity.is_free();
    interrupt(a, ctx);
    interrupt(d, ctx);
    a.activity = Activity::Fighting(Engagement::new(d.id, true));
    d.activity = Activity::Fighting(Engagement::new(a.id, false));
    info!(attacker = %a.id, defender = %d.id, ambush, "combat engaged");
    ctx.emit(SimEvent::CombatStarted {
        attacker: a.id,
        defender: d.id,
        ambush,
    });
}

/// Abort the current activity, undoing partial progress: crafting inputs
/// are refunded, claims and meals are released, a potion being drunk is
/// lost, sleep ends. Builds lose nothing since they pay on completion.
pub fn interrupt(creature: &mut Creature, ctx: &mut SimContext<'_>) {
    let activity = core::mem::take(&mut creature.activity);
    if let Activity::Crafting { output, consumed, .. } = activity {
        debug!(creature = %creature.id, item = %output, "craft interrupted, refunding");
        let capacity = creature.capacity(ctx.config);
        for item in consumed {
            if creature.inventory.add(item, capacity).is_err() {
                ctx.drop_item(creature.id, item, creature.position);
            }
        }
    }
    ctx.world.release_all(creature.id);
    creature.goal = None;
    creature.cooldowns.plan = 0.0;
}

// ---------------------------------------------------------------------------
// Hit exchange
// ---------------------------------------------------------------------------

/// Advance the fight of `creatures[index]`.
pub fn update_fight(creatures: &mut [Creature], index: usize, mut fight: Engagement, ctx: &mut SimContext<'_>, dt: f32) {
    let config = ctx.config;
    let cfg = &config.combat;
    let Some(other) = creatures.iter().position(|c| c.id == fight.opponent) else {
        end_alone(creatures, index, ctx);
        return;
    };
    let Some((me, opp)) = two_mut(creatures, index, other) else {
        end_alone(creatures, index, ctx);
        return;
    };
    let Activity::Fighting(their) = opp.activity else {
        end_alone(creatures, index, ctx);
        return;
    };
    if !opp.alive || their.opponent != me.id {
        end_alone(creatures, index, ctx);
        return;
    }

    fight.elapsed += dt;
    if fight.elapsed > cfg.safety_timeout {
        debug!(first = %me.id, second = %opp.id, "combat safety timeout");
        disengage(me, opp, ctx);
        return;
    }
    if !fight.my_turn {
        me.activity = Activity::Fighting(fight);
        return;
    }

    let distance = me.position.distance(opp.position);
    if distance > cfg.melee_range {
        let (next, heading) = step_toward(ctx.world, me.position, opp.position, me.speed(&config.vitals), dt);
        me.position = next;
        me.heading = heading;
        me.activity = Activity::Fighting(fight);
        return;
    }
    me.heading = (opp.position - me.position).heading();
    fight.swing_timer += dt;
    if fight.swing_timer < cfg.hit_interval {
        me.activity = Activity::Fighting(fight);
        return;
    }

    let mut their = their;
    strike(me, opp, &mut fight, &mut their, ctx);
}

/// One blow from `me` to `opp`, then the defender's flee roll and the cap.
fn strike(me: &mut Creature, opp: &mut Creature, fight: &mut Engagement, their: &mut Engagement, ctx: &mut SimContext<'_>) {
    let config = ctx.config;
    let cfg = &config.combat;
    let roll = wildkin_world::roll_between(ctx.rng, cfg.damage_roll);
    let blow = compute_blow(me, opp, roll, cfg.advantage, cfg.min_damage);
    opp.hp = (opp.hp - blow.damage as f32).max(0.0);
    fight.hits_dealt = fight.hits_dealt.saturating_add(1);
    ctx.emit(SimEvent::CombatHit {
        attacker: me.id,
        defender: opp.id,
        damage: blow.damage,
        super_effective: blow.super_effective,
    });
    apply_wear(me, EquipSlot::Weapon, cfg.durability_warning, ctx);
    apply_wear(opp, EquipSlot::Armor, cfg.durability_warning, ctx);

    if opp.hp <= 0.0 {
        kill(me, opp, ctx);
        return;
    }

    if ctx.rng.random_bool(cfg.flee.chance(opp.hp_fraction()).clamp(0.0, 1.0)) {
        start_flee(opp, me.id, opp.position - me.position, ctx);
        me.cooldowns.combat = cfg.cooldown;
        opp.cooldowns.combat = cfg.cooldown;
        ctx.emit(SimEvent::Fled {
            creature: opp.id,
            from: me.id,
        });
        me.activity = Activity::Idle;
        maybe_chase(me, opp, ctx);
        return;
    }

    if fight.hits_dealt >= cfg.hit_cap && their.hits_dealt >= cfg.hit_cap {
        disengage(me, opp, ctx);
        return;
    }

    fight.my_turn = false;
    fight.swing_timer = 0.0;
    their.my_turn = true;
    their.swing_timer = 0.0;
    me.activity = Activity::Fighting(*fight);
    opp.activity = Activity::Fighting(*their);
}

fn apply_wear(creature: &mut Creature, slot: EquipSlot, warning: f32, ctx: &mut SimContext<'_>) {
    match creature.equipment.wear(slot, warning) {
        Wear::Fine => {}
        Wear::Warning(item) => ctx.emit(SimEvent::EquipmentWarning {
            creature: creature.id,
            slot,
            item,
        }),
        Wear::Broke(item) => {
            debug!(creature = %creature.id, item = %item, "equipment broke");
            ctx.emit(SimEvent::EquipmentBroke {
                creature: creature.id,
                slot,
                item,
            });
        }
    }
}

/// Both sides walk away with a cooldown.
fn disengage(a: &mut Creature, b: &mut Creature, ctx: &mut SimContext<'_>) {
    let cooldown = ctx.config.combat.cooldown;
    for c in [&mut *a, &mut *b] {
        c.activity = Activity::Idle;
        c.cooldowns.combat = cooldown;
        c.cooldowns.plan = 0.0;
    }
    ctx.emit(SimEvent::CombatDisengaged {
        first: a.id,
        second: b.id,
    });
}

/// The opponent vanished; end this side's fight without a partner.
fn end_alone(creatures: &mut [Creature], index: usize, ctx: &SimContext<'_>) {
    if let Some(me) = creatures.get_mut(index) {
        debug!(creature = %me.id, "combat opponent gone");
        me.activity = Activity::Idle;
        me.cooldowns.combat = ctx.config.combat.cooldown;
        me.cooldowns.plan = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Flee
// ---------------------------------------------------------------------------

/// Sprint away along `away` (falls back to the current heading).
pub fn start_flee(creature: &mut Creature, threat: CreatureId, away: Vec2, ctx: &SimContext<'_>) {
    let direction = if away.length() <= f32::EPSILON {
        Vec2::from_heading(creature.heading)
    } else {
        away.normalized()
    };
    creature.activity = Activity::Fleeing {
        threat,
        remaining: ctx.config.combat.flee_duration,
        direction,
    };
}

/// Advance a sprint; ends in the scared state.
pub fn update_flee(
    creature: &mut Creature,
    ctx: &SimContext<'_>,
    threat: CreatureId,
    remaining: f32,
    direction: Vec2,
    dt: f32,
) -> Activity {
    let config = ctx.config;
    let cfg = &config.combat;
    let speed = creature.speed(&config.vitals) * cfg.flee_speed;
    creature.position = step_along(ctx.world, creature.position, direction, speed, dt);
    creature.heading = direction.heading();
    let remaining = remaining - dt;
    if remaining > 0.0 {
        return Activity::Fleeing {
            threat,
            remaining,
            direction,
        };
    }
    creature.fear = Some(Fear {
        threat,
        remaining: cfg.scared_duration,
    });
    Activity::Idle
}

/// A scared creature sprints again if its threat comes back within range.
pub fn check_fear(creatures: &mut [Creature], index: usize, ctx: &mut SimContext<'_>) {
    let Some(me) = creatures.get(index) else {
        return;
    };
    let Some(fear) = me.fear else {
        return;
    };
    if matches!(me.activity, Activity::Fleeing { .. } | Activity::Fighting(_) | Activity::Dead) {
        return;
    }
    let threat = creatures
        .iter()
        .find(|c| c.id == fear.threat && c.alive)
        .map(|c| c.position);
    let Some(threat_pos) = threat else {
        return;
    };
    if threat_pos.distance(me.position) > ctx.config.combat.resprint_radius {
        return;
    }
    if let Some(me) = creatures.get_mut(index) {
        debug!(creature = %me.id, threat = %fear.threat, "threat returned, sprinting again");
        let away = me.position - threat_pos;
        interrupt(me, ctx);
        start_flee(me, fear.threat, away, ctx);
    }
}

// ---------------------------------------------------------------------------
// Chase
// ---------------------------------------------------------------------------

/// The winner of a flee decides whether to pursue.
fn maybe_chase(hunter: &mut Creature, prey: &Creature, ctx: &mut SimContext<'_>) {
    let config = ctx.config;
    let cfg = &config.combat;
    if hunter.hp_fraction() < cfg.chase_min_hp {
        return;
    }
    let going_for_kill = prey.hp_fraction() < cfg.kill_threshold;
    let chance = if going_for_kill {
        cfg.kill_chance
    } else {
        cfg.chase_chance * f64::from(hunter.traits().chase)
    };
    if !ctx.rng.random_bool(chance.clamp(0.0, 1.0)) {
        return;
    }
    hunter.activity = Activity::Chasing(Pursuit {
        prey: prey.id,
        remaining: cfg.chase_duration,
        grace: cfg.chase_grace,
        going_for_kill,
    });
    ctx.emit(SimEvent::ChaseStarted {
        hunter: hunter.id,
        prey: prey.id,
        going_for_kill,
    });
}

/// Advance a pursuit: catch, escape, or give up.
pub fn update_chase(creatures: &mut [Creature], index: usize, mut chase: Pursuit, ctx: &mut SimContext<'_>, dt: f32) {
    let config = ctx.config;
    let cfg = &config.combat;
    let prey_index = creatures.iter().position(|c| c.id == chase.prey && c.alive);
    let Some((hunter, prey)) = prey_index.and_then(|p| two_mut(creatures, index, p)) else {
        abandon(creatures, index, ctx);
        return;
    };
    if prey.activity.is_combat() && !matches!(prey.activity, Activity::Fleeing { .. }) {
        let hunter_id = hunter.id;
        abandon(creatures, index, ctx);
        debug!(hunter = %hunter_id, "prey busy, chase abandoned");
        return;
    }

    chase.remaining -= dt;
    chase.grace -= dt;
    let speed = hunter.speed(&config.vitals) * cfg.chase_speed;
    let (next, heading) = step_toward(ctx.world, hunter.position, prey.position, speed, dt);
    hunter.position = next;
    hunter.heading = heading;
    let distance = hunter.position.distance(prey.position);

    if chase.grace <= 0.0 && distance <= cfg.catch_distance {
        prey.fear = None;
        let ambush = !prey.activity.is_free() && !matches!(prey.activity, Activity::Fleeing { .. });
        if ambush {
            interrupt(prey, ctx);
        }
        hunter.activity = Activity::Fighting(Engagement::new(prey.id, true));
        prey.activity = Activity::Fighting(Engagement::new(hunter.id, false));
        info!(hunter = %hunter.id, prey = %prey.id, "chase caught");
        ctx.emit(SimEvent::ChaseCaught {
            hunter: hunter.id,
            prey: prey.id,
        });
        return;
    }
    if distance > cfg.escape_distance {
        hunter.activity = Activity::Idle;
        hunter.cooldowns.plan = 0.0;
        ctx.emit(SimEvent::ChaseEscaped {
            hunter: hunter.id,
            prey: prey.id,
        });
        return;
    }
    if chase.remaining <= 0.0 {
        abandon(creatures, index, ctx);
        return;
    }
    hunter.activity = Activity::Chasing(chase);
}

fn abandon(creatures: &mut [Creature], index: usize, ctx: &mut SimContext<'_>) {
    if let Some(hunter) = creatures.get_mut(index) {
        hunter.activity = Activity::Idle;
        hunter.cooldowns.plan = 0.0;
        ctx.emit(SimEvent::ChaseAbandoned { hunter: hunter.id });
    }
}

// ---------------------------------------------------------------------------
// Death, loot, progression
// ---------------------------------------------------------------------------

/// Resolve a combat death: mark the victim dead, release its claims, record
/// the species memory, pay the killer XP and loot.
pub fn kill(killer: &mut Creature, victim: &mut Creature, ctx: &mut SimContext<'_>) {
    let config = ctx.config;
    let cfg = &config.combat;
    victim.hp = 0.0;
    victim.alive = false;
    victim.death_cause = Some(DeathCause::Combat);
    victim.activity = Activity::Dead;
    victim.fear = None;
    victim.goal = None;
    ctx.world.release_all(victim.id);
    ctx.species_memory.record_death(victim.species, DeathCause::Combat);

    let loot_count = ctx.rng.random_range(1..=2_usize);
    let capacity = killer.capacity(ctx.config);
    let mut loot: Vec<ItemKind> = Vec::new();
    for _ in 0..loot_count {
        let Some(idx) = (0..victim.inventory.len()).choose(ctx.rng) else {
            break;
        };
        if killer.inventory.free_slots(capacity) == 0 {
            break;
        }
        if let Some(item) = victim.inventory.take_at(idx) {
            if killer.inventory.add(item, capacity).is_ok() {
                loot.push(item.kind);
            } else {
                victim.inventory.restore(item);
            }
        }
    }

    killer.kills = killer.kills.saturating_add(1);
    let xp = cfg
        .kill_xp
        .saturating_add(cfg.kill_xp_per_level.saturating_mul(victim.level));
    killer.activity = Activity::Idle;
    killer.cooldowns.combat = cfg.cooldown;
    killer.cooldowns.plan = 0.0;

    info!(killer = %killer.id, victim = %victim.id, "creature killed in combat");
    ctx.emit(SimEvent::Killed {
        killer: killer.id,
        victim: victim.id,
        loot,
    });
    ctx.emit(SimEvent::Died {
        creature: victim.id,
        cause: DeathCause::Combat,
    });
    gain_xp(killer, xp, ctx);
}

/// Add XP and apply every level-up it pays for.
pub fn gain_xp(creature: &mut Creature, xp: u32, ctx: &mut SimContext<'_>) {
    let config = ctx.config;
    let cfg = &config.combat;
    creature.xp = creature.xp.saturating_add(xp);
    loop {
        let needed = creature.level.saturating_mul(cfg.xp_per_level);
        if needed == 0 || creature.xp < needed {
            break;
        }
        creature.xp = creature.xp.saturating_sub(needed);
        creature.level = creature.level.saturating_add(1);
        creature.max_hp += cfg.level_hp;
        creature.base_atk += cfg.level_atk;
        creature.hp = creature.max_hp;
        info!(creature = %creature.id, level = creature.level, "level up");
        ctx.emit(SimEvent::LeveledUp {
            creature: creature.id,
            level: creature.level,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wildkin_types::{Personality, Species};
    use wildkin_world::{FlatTerrain, WorldState};

    use super::*;
    use crate::config::CreatureConfig;
    use crate::inventory::Item;
    use crate::memory::SpeciesMemory;

    struct Fixture {
        world: WorldState,
        memory: SpeciesMemory,
        config: CreatureConfig,
        rng: StdRng,
        events: Vec<SimEvent>,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            Self {
                world: WorldState::new(50.0, Box::new(FlatTerrain::default()), Vec::new(), Vec::new(), Vec::new())
                    .unwrap(),
                memory: SpeciesMemory::default(),
                config: CreatureConfig::default(),
                rng: StdRng::seed_from_u64(seed),
                events: Vec::new(),
            }
        }

        fn ctx(&mut self) -> SimContext<'_> {
            SimContext {
                world: &mut self.world,
                species_memory: &mut self.memory,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.events,
            }
        }
    }

    fn creature(id: u32, species: Species, x: f32) -> Creature {
        Creature::new(CreatureId(id), "Test", species, Personality::Brave, Vec2::new(x, 0.0))
    }

    #[test]
    fn two_mut_returns_in_argument_order() {
        let mut cs = vec![creature(0, Species::Mossling, 0.0), creature(1, Species::Emberfox, 1.0)];
        let (b, a) = two_mut(&mut cs, 1, 0).unwrap();
        assert_eq!(b.id, CreatureId(1));
        assert_eq!(a.id, CreatureId(0));
        assert!(two_mut(&mut cs, 1, 1).is_none());
        assert!(two_mut(&mut cs, 0, 5).is_none());
    }

    #[test]
    fn elemental_advantage_multiplies_damage() {
        let mut attacker = creature(0, Species::Emberfox, 0.0);
        attacker.base_atk = 20.0;
        let defender = creature(1, Species::Mossling, 1.0);
        for roll in [0.8_f32, 1.0, 1.2] {
            let blow = compute_blow(&attacker, &defender, roll, 1.5, 1.0);
            assert!(blow.super_effective);
            assert_eq!(blow.damage, (20.0 * roll * 1.5).round() as u32);
        }
    }

    #[test]
    fn armor_mitigates_with_minimum_one() {
        let attacker = creature(0, Species::Mossling, 0.0);
        let mut defender = creature(1, Species::Mossling, 1.0);
        defender.inventory.add(Item::new(ItemKind::StoneShield), 12).unwrap();
        defender.equipment.auto_equip(&mut defender.inventory);
        let blow = compute_blow(&attacker, &defender, 1.0, 1.5, 1.0);
        assert_eq!(blow.damage, 3);
        let mut weak = creature(2, Species::Mossling, 0.0);
        weak.base_atk = 1.0;
        assert_eq!(compute_blow(&weak, &defender, 0.8, 1.5, 1.0).damage, 1);
    }

    #[test]
    fn engage_interrupts_crafting_with_refund() {
        let mut fx = Fixture::new(1);
        let mut cs = vec![creature(0, Species::Emberfox, 0.0), creature(1, Species::Mossling, 1.0)];
        cs[1].activity = Activity::Crafting {
            output: ItemKind::StoneBlade,
            remaining: 2.0,
            consumed: vec![
                Item::new(ItemKind::Wood),
                Item::new(ItemKind::Stone),
                Item::new(ItemKind::Stone),
            ],
        };
        let mut ctx = fx.ctx();
        engage(&mut cs, 0, 1, &mut ctx);
        assert_eq!(cs[1].inventory.count(ItemKind::Stone), 2);
        assert_eq!(cs[1].inventory.count(ItemKind::Wood), 1);
        assert!(matches!(cs[0].activity, Activity::Fighting(e) if e.my_turn));
        assert!(matches!(cs[1].activity, Activity::Fighting(e) if !e.my_turn));
        assert!(matches!(
            fx.events.last(),
            Some(SimEvent::CombatStarted { ambush: true, .. })
        ));
    }

    #[test]
    fn hits_alternate_and_cap_disengages() {
        let mut fx = Fixture::new(7);
        // Nobody flees, nobody dies.
        fx.config.combat.flee.above_20 = 0.0;
        fx.config.combat.flee.above_40 = 0.0;
        fx.config.combat.flee.critical = 0.0;
        let mut cs = vec![creature(0, Species::Tidecrab, 0.0), creature(1, Species::Tidecrab, 1.0)];
        for c in &mut cs {
            c.max_hp = 1000.0;
            c.hp = 1000.0;
        }
        let mut ctx = fx.ctx();
        engage(&mut cs, 0, 1, &mut ctx);
        for _ in 0..200 {
            for i in 0..cs.len() {
                if let Activity::Fighting(e) = cs[i].activity {
                    assert!(e.hits_dealt <= 4);
                    update_fight(&mut cs, i, e, &mut ctx, 0.1);
                }
            }
        }
        assert_eq!(cs[0].activity, Activity::Idle);
        assert_eq!(cs[1].activity, Activity::Idle);
        let hits = fx
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::CombatHit { .. }))
            .count();
        assert_eq!(hits, 8);
        assert!(
            fx.events
                .iter()
                .any(|e| matches!(e, SimEvent::CombatDisengaged { .. }))
        );
        assert!(cs[0].cooldowns.combat > 0.0);
    }

    #[test]
    fn kill_pays_xp_and_loot() {
        let mut fx = Fixture::new(3);
        let mut killer = creature(0, Species::Emberfox, 0.0);
        let mut victim = creature(1, Species::Mossling, 1.0);
        victim.level = 6;
        victim.inventory.add(Item::new(ItemKind::Crystal), 12).unwrap();
        let mut ctx = fx.ctx();
        kill(&mut killer, &mut victim, &mut ctx);
        assert!(!victim.alive);
        assert_eq!(victim.activity, Activity::Dead);
        assert_eq!(killer.kills, 1);
        assert_eq!(killer.inventory.count(ItemKind::Crystal), 1);
        // 20 + 5 * 6 = 50 XP: exactly one level at level 1.
        assert_eq!(killer.level, 2);
        assert_eq!(killer.xp, 0);
        assert!((killer.hp - killer.max_hp).abs() < f32::EPSILON);
        assert_eq!(fx.memory.record(Species::Mossling).combat_deaths, 1);
    }

    #[test]
    fn loot_respects_capacity() {
        let mut fx = Fixture::new(4);
        let mut killer = creature(0, Species::Emberfox, 0.0);
        for _ in 0..12 {
            killer.inventory.add(Item::new(ItemKind::Wood), 12).unwrap();
        }
        let mut victim = creature(1, Species::Mossling, 1.0);
        victim.inventory.add(Item::new(ItemKind::Crystal), 12).unwrap();
        let mut ctx = fx.ctx();
        kill(&mut killer, &mut victim, &mut ctx);
        assert_eq!(killer.inventory.len(), 12);
        assert_eq!(victim.inventory.count(ItemKind::Crystal), 1);
    }

    #[test]
    fn flee_ends_in_fear() {
        let mut fx = Fixture::new(5);
        let mut c = creature(0, Species::Sparkwing, 0.0);
        let ctx = fx.ctx();
        start_flee(&mut c, CreatureId(9), Vec2::new(1.0, 0.0), &ctx);
        let mut steps = 0;
        while let Activity::Fleeing {
            threat,
            remaining,
            direction,
        } = c.activity
        {
            c.activity = update_flee(&mut c, &ctx, threat, remaining, direction, 0.5);
            steps += 1;
        }
        assert_eq!(steps, 8);
        assert!(c.position.x > 10.0);
        assert_eq!(c.fear.map(|f| f.threat), Some(CreatureId(9)));
    }

    #[test]
    fn chase_catches_slow_prey() {
        let mut fx = Fixture::new(6);
        let mut cs = vec![creature(0, Species::Sparkwing, 0.0), creature(1, Species::Stonebeak, 3.0)];
        cs[1].activity = Activity::Idle;
        cs[0].activity = Activity::Chasing(Pursuit {
            prey: CreatureId(1),
            remaining: 8.0,
            grace: 1.0,
            going_for_kill: false,
        });
        let mut ctx = fx.ctx();
        for _ in 0..40 {
            if let Activity::Chasing(p) = cs[0].activity {
                update_chase(&mut cs, 0, p, &mut ctx, 0.1);
            }
        }
        assert!(matches!(cs[0].activity, Activity::Fighting(e) if e.opponent == CreatureId(1)));
        assert!(matches!(cs[1].activity, Activity::Fighting(_)));
        assert!(fx.events.iter().any(|e| matches!(e, SimEvent::ChaseCaught { .. })));
    }

    #[test]
    fn caught_prey_starts_a_fresh_engagement() {
        let mut fx = Fixture::new(6);
        let mut cs = vec![creature(0, Species::Sparkwing, 0.0), creature(1, Species::Stonebeak, 0.5)];
        cs[1].activity = Activity::Fleeing {
            threat: CreatureId(0),
            remaining: 2.0,
            direction: Vec2::new(1.0, 0.0),
        };
        let chase = Pursuit {
            prey: CreatureId(1),
            remaining: 8.0,
            grace: 0.0,
            going_for_kill: true,
        };
        let mut ctx = fx.ctx();
        update_chase(&mut cs, 0, chase, &mut ctx, 0.1);
        // Counters start at zero; a cap reached before the flee does not carry over.
        assert_eq!(cs[0].activity, Activity::Fighting(Engagement::new(CreatureId(1), true)));
        assert_eq!(cs[1].activity, Activity::Fighting(Engagement::new(CreatureId(0), false)));
        assert!(!fx.events.iter().any(|e| matches!(e, SimEvent::CombatStarted { .. })));
    }

    #[test]
    fn chase_of_dead_prey_is_abandoned() {
        let mut fx = Fixture::new(6);
        let mut cs = vec![creature(0, Species::Sparkwing, 0.0), creature(1, Species::Stonebeak, 3.0)];
        cs[1].alive = false;
        let p = Pursuit {
            prey: CreatureId(1),
            remaining: 8.0,
            grace: 1.0,
            going_for_kill: true,
        };
        let mut ctx = fx.ctx();
        update_chase(&mut cs, 0, p, &mut ctx, 0.1);
        assert_eq!(cs[0].activity, Activity::Idle);
        assert!(matches!(fx.events.last(), Some(SimEvent::ChaseAbandoned { .. })));
    }
}
