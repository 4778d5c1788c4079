//! Per-creature goal planner.
//!
//! A single pass over an ordered rule table. Each rule inspects the
//! creature's inventory, equipment, village, and the world, and either
//! produces a [`Goal`] or defers to the next rule. The first goal wins.
//!
//! | # | Rule | Output |
//! |---|------|--------|
//! | 1 | Home-building needs | Build, or strict gather of the first missing material |
//! | 2 | Craftable recipe (cooldown elapsed) | Craft |
//! | 3 | Nearest-completion recipe | Gather its first missing material |
//! | 4 | Room in the inventory | Gather the highest-valued material |
//! | 5 | Full inventory | Gather only what the drop policy would keep |
//! | 6 | Fallback | Idle, with a reason |
//!
//! Downstream systems consume the goal as-is without re-deriving intent.

use std::fmt;

use wildkin_types::{BuildingKind, ItemKind, ResourceKind};
use wildkin_world::{SearchMode, WorldState};

use crate::config::{CreatureConfig, DecisionConfig};
use crate::crafting::{CraftChoice, RECIPES, choose_recipe, fills_gap};
use crate::creature::Creature;
use crate::memory::SpeciesMemory;
use crate::scoring::{item_value, would_accept};
use crate::village::{can_afford, missing_materials};

/// What a goal asks the creature to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalAction {
    /// Go harvest a world object of this kind.
    Gather {
        /// Target resource type.
        kind: ResourceKind,
        /// Whether contested resources are acceptable.
        mode: SearchMode,
    },
    /// Craft this item now.
    Craft {
        /// Recipe output.
        recipe: ItemKind,
    },
    /// Walk home and construct this building.
    Build {
        /// The tier to build.
        kind: BuildingKind,
    },
    /// Nothing worth doing.
    Idle,
}

/// The planner's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    /// The action to take.
    pub action: GoalAction,
    /// Human-readable justification.
    pub reason: String,
    /// Rank of the rule that produced it; lower is more urgent.
    pub priority: u8,
}

impl Goal {
    fn new(action: GoalAction, priority: u8, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
            priority,
        }
    }

    /// Whether the goal commits the creature to a plan.
    pub const fn is_committed(&self) -> bool {
        !matches!(self.action, GoalAction::Idle)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Everything a planning rule may read.
#[derive(Clone, Copy)]
pub struct PlanContext<'a> {
    /// The creature being planned for.
    pub creature: &'a Creature,
    /// The shared world, for resource availability.
    pub world: &'a WorldState,
    /// Species death statistics.
    pub memory: &'a SpeciesMemory,
    /// Tunables.
    pub config: &'a CreatureConfig,
}

impl PlanContext<'_> {
    fn available(&self, kind: ResourceKind, mode: SearchMode) -> bool {
        self.world
            .find_resource(self.creature.position, kind, mode, self.creature.id)
            .is_some()
    }

    fn gather_for(&self, item: ItemKind, mode: SearchMode, priority: u8, reason: String) -> Option<Goal> {
        let kind = ResourceKind::yielding(item)?;
        self.available(kind, mode)
            .then(|| Goal::new(GoalAction::Gather { kind, mode }, priority, reason))
    }
}

type Rule = fn(&PlanContext<'_>) -> Option<Goal>;

/// Planning rules in priority order.
const RULES: [(&str, Rule); 5] = [
    ("home", home_needs),
    ("craft", craftable_recipe),
    ("recipe", nearest_recipe),
    ("gather", best_material),
    ("full", improving_material),
];

/// Run the rule table and return the first goal produced.
pub fn plan(ctx: &PlanContext<'_>) -> Goal {
    for (name, rule) in RULES {
        if let Some(goal) = rule(ctx) {
            tracing::trace!(creature = %ctx.creature.id, rule = name, reason = %goal.reason, "planned");
            return goal;
        }
    }
    let reason = if ctx.creature.inventory.len() >= ctx.creature.capacity(ctx.config) {
        "inventory full of better items"
    } else {
        "nothing to gather nearby"
    };
    Goal::new(GoalAction::Idle, 6, reason)
}

/// Seconds until the next planning pass after producing `goal`.
pub const fn replan_interval(goal: &Goal, config: &DecisionConfig) -> f32 {
    if goal.is_committed() {
        config.slow_replan
    } else {
        config.fast_replan
    }
}

fn home_needs(ctx: &PlanContext<'_>) -> Option<Goal> {
    let kind = ctx.creature.village.as_ref()?.next_tier()?;
    if can_afford(&ctx.creature.inventory, kind) {
        return Some(Goal::new(
            GoalAction::Build { kind },
            1,
            format!("has materials for a {}", kind.label()),
        ));
    }
    let (item, short) = missing_materials(&ctx.creature.inventory, kind).into_iter().next()?;
    ctx.gather_for(
        item,
        SearchMode::Strict,
        1,
        format!("needs {short} {item} for a {}", kind.label()),
    )
}

fn craftable_recipe(ctx: &PlanContext<'_>) -> Option<Goal> {
    let c = ctx.creature;
    if c.cooldowns.craft > 0.0 {
        return None;
    }
    let recipe = choose_recipe(&CraftChoice {
        inventory: &c.inventory,
        equipment: &c.equipment,
        hp_fraction: c.hp_fraction(),
        hurt_threshold: ctx.config.crafting.hurt_threshold,
        bias: c.traits().craft_bias,
    })?;
    Some(Goal::new(
        GoalAction::Craft { recipe: recipe.output },
        2,
        format!("can craft a {}", recipe.output),
    ))
}

fn nearest_recipe(ctx: &PlanContext<'_>) -> Option<Goal> {
    let c = ctx.creature;
    let wanted = |r: &&crate::crafting::Recipe| {
        fills_gap(r, &c.equipment, &c.inventory)
            || (r.output == ItemKind::HealingPotion && !c.inventory.has(ItemKind::HealingPotion, 1))
    };
    let recipe = RECIPES
        .iter()
        .filter(wanted)
        .filter(|r| !r.is_craftable(&c.inventory))
        .map(|r| (r, r.completion(&c.inventory)))
        .filter(|(_, done)| *done > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(r, _)| r)?;
    let (item, _) = recipe.missing(&c.inventory).into_iter().next()?;
    if !would_accept(c, item, ctx.memory, ctx.config) {
        return None;
    }
    ctx.gather_for(
        item,
        SearchMode::Competitive,
        3,
        format!("working toward a {}", recipe.output),
    )
}

fn best_gatherable(ctx: &PlanContext<'_>, accept: impl Fn(ItemKind) -> bool) -> Option<(ResourceKind, f32)> {
    ResourceKind::ALL
        .into_iter()
        .filter(|k| accept(k.primary_item()))
        .filter(|k| ctx.available(*k, SearchMode::Competitive))
        .map(|k| (k, item_value(ctx.creature, k.primary_item(), ctx.memory, ctx.config)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

fn best_material(ctx: &PlanContext<'_>) -> Option<Goal> {
    if ctx.creature.inventory.len() >= ctx.creature.capacity(ctx.config) {
        return None;
    }
    let (kind, value) = best_gatherable(ctx, |_| true)?;
    Some(Goal::new(
        GoalAction::Gather {
            kind,
            mode: SearchMode::Competitive,
        },
        4,
        format!("{} is worth {value:.0}", kind.primary_item()),
    ))
}

fn improving_material(ctx: &PlanContext<'_>) -> Option<Goal> {
    let (kind, _) = best_gatherable(ctx, |item| would_accept(ctx.creature, item, ctx.memory, ctx.config))?;
    Some(Goal::new(
        GoalAction::Gather {
            kind,
            mode: SearchMode::Competitive,
        },
        5,
        format!("{} would replace a weaker item", kind.primary_item()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wildkin_types::{CreatureId, Personality, ResourceId, Species, Vec2};
    use wildkin_world::{FlatTerrain, WorldResource};

    use super::*;
    use crate::inventory::Item;
    use crate::village::Village;

    fn test_world() -> WorldState {
        let resources = vec![
            WorldResource::new(ResourceId(0), ResourceKind::Tree, Vec2::new(5.0, 0.0)),
            WorldResource::new(ResourceId(1), ResourceKind::Rock, Vec2::new(-5.0, 0.0)),
            WorldResource::new(ResourceId(2), ResourceKind::Bush, Vec2::new(0.0, 5.0)),
        ];
        WorldState::new(50.0, Box::new(FlatTerrain::default()), Vec::new(), resources, Vec::new()).unwrap()
    }

    fn test_creature() -> Creature {
        Creature::new(CreatureId(0), "Vale", Species::Tidecrab, Personality::Aggressive, Vec2::ZERO)
    }

    fn give(creature: &mut Creature, kind: ItemKind, n: usize) {
        for _ in 0..n {
            creature.inventory.add(Item::new(kind), 40).unwrap();
        }
    }

    fn run(creature: &Creature, world: &WorldState) -> Goal {
        let memory = SpeciesMemory::default();
        let config = CreatureConfig::default();
        plan(&PlanContext {
            creature,
            world,
            memory: &memory,
            config: &config,
        })
    }

    #[test]
    fn craftable_recipe_wins_over_gathering() {
        let world = test_world();
        let mut c = test_creature();
        give(&mut c, ItemKind::Wood, 1);
        give(&mut c, ItemKind::Stone, 2);
        let goal = run(&c, &world);
        assert_eq!(
            goal.action,
            GoalAction::Craft {
                recipe: ItemKind::StoneBlade
            }
        );
    }

    #[test]
    fn craft_cooldown_defers_to_gathering() {
        let world = test_world();
        let mut c = test_creature();
        give(&mut c, ItemKind::Wood, 2);
        c.cooldowns.craft = 3.0;
        assert!(matches!(run(&c, &world).action, GoalAction::Gather { .. }));
    }

    #[test]
    fn home_needs_come_first() {
        let world = test_world();
        let mut c = test_creature();
        give(&mut c, ItemKind::Wood, 2);
        c.village = Some(Village::new(Vec2::ZERO));
        let goal = run(&c, &world);
        assert_eq!(
            goal.action,
            GoalAction::Gather {
                kind: ResourceKind::Tree,
                mode: SearchMode::Strict
            }
        );
        assert_eq!(goal.priority, 1);

        give(&mut c, ItemKind::Wood, 1);
        give(&mut c, ItemKind::Stone, 2);
        assert_eq!(
            run(&c, &world).action,
            GoalAction::Build {
                kind: BuildingKind::Shelter
            }
        );
    }

    #[test]
    fn empty_world_idles_with_reason() {
        let world =
            WorldState::new(50.0, Box::new(FlatTerrain::default()), Vec::new(), Vec::new(), Vec::new()).unwrap();
        let goal = run(&test_creature(), &world);
        assert_eq!(goal.action, GoalAction::Idle);
        assert!(!goal.reason.is_empty());
        assert!((replan_interval(&goal, &DecisionConfig::default()) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fresh_creature_gathers_something() {
        let world = test_world();
        let goal = run(&test_creature(), &world);
        assert!(matches!(
            goal.action,
            GoalAction::Gather {
                mode: SearchMode::Competitive,
                ..
            }
        ));
        assert!((replan_interval(&goal, &DecisionConfig::default()) - 6.0).abs() < f32::EPSILON);
    }
}
