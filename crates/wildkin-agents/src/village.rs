//! Settlements: home claiming, the shelter -> campfire -> storage chain,
//! and storage deposits.
//!
//! A creature claims its current position as home the moment its lifetime
//! gather count reaches the threshold. From then on it builds each tier in
//! order, one building of each kind, and deposits surplus items whenever it
//! is home and owns a storage building.

use serde::{Deserialize, Serialize};
use wildkin_types::{BuildingKind, ItemCategory, ItemKind, Vec2};

use crate::config::VillageConfig;
use crate::error::AgentError;
use crate::inventory::{Inventory, Item};

/// A finished building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Building type.
    pub kind: BuildingKind,
    /// Placed position.
    pub position: Vec2,
    /// Items deposited (storage only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deposits: Vec<Item>,
}

/// A creature's home and its buildings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Village {
    /// Home coordinates.
    pub home: Vec2,
    /// Buildings in construction order.
    pub buildings: Vec<Building>,
}

impl Village {
    /// A home with nothing built yet.
    pub const fn new(home: Vec2) -> Self {
        Self {
            home,
            buildings: Vec::new(),
        }
    }

    /// Whether a building of `kind` exists.
    pub fn has(&self, kind: BuildingKind) -> bool {
        self.buildings.iter().any(|b| b.kind == kind)
    }

    /// The building of `kind`, if built.
    pub fn building(&self, kind: BuildingKind) -> Option<&Building> {
        self.buildings.iter().find(|b| b.kind == kind)
    }

    /// The next unbuilt tier whose prerequisite is met.
    pub fn next_tier(&self) -> Option<BuildingKind> {
        BuildingKind::TIERS.into_iter().find(|kind| {
            !self.has(*kind) && kind.prerequisite().is_none_or(|pre| self.has(pre))
        })
    }

    /// Add a finished building. At most one of each kind.
    pub fn add_building(&mut self, kind: BuildingKind, position: Vec2) -> bool {
        if self.has(kind) {
            return false;
        }
        self.buildings.push(Building {
            kind,
            position,
            deposits: Vec::new(),
        });
        true
    }

    /// Number of items in storage.
    pub fn stored(&self) -> usize {
        self.building(BuildingKind::Storage)
            .map_or(0, |b| b.deposits.len())
    }
}

/// Materials a building consumes.
pub const fn build_cost(kind: BuildingKind) -> &'static [(ItemKind, u32)] {
    match kind {
        BuildingKind::Shelter => &[(ItemKind::Wood, 3), (ItemKind::Stone, 2)],
        BuildingKind::Campfire => &[(ItemKind::Wood, 2)],
        BuildingKind::Storage => &[(ItemKind::Wood, 4), (ItemKind::Stone, 3)],
    }
}

/// Whether `inventory` covers the cost of `kind`.
pub fn can_afford(inventory: &Inventory, kind: BuildingKind) -> bool {
    build_cost(kind).iter().all(|(item, n)| inventory.has(*item, *n))
}

/// Missing materials for `kind`, with the shortfall for each.
pub fn missing_materials(inventory: &Inventory, kind: BuildingKind) -> Vec<(ItemKind, u32)> {
    build_cost(kind)
        .iter()
        .filter_map(|(item, n)| {
            let short = n.saturating_sub(inventory.count(*item));
            (short > 0).then_some((*item, short))
        })
        .collect()
}

/// Consume the cost of `kind`. Fails without mutating if short.
pub fn pay_for(inventory: &mut Inventory, kind: BuildingKind) -> Result<(), AgentError> {
    if let Some((item, short)) = missing_materials(inventory, kind).first() {
        let available = inventory.count(*item);
        return Err(AgentError::MissingItem {
            kind: *item,
            requested: available.saturating_add(*short),
            available,
        });
    }
    for (item, n) in build_cost(kind) {
        inventory.remove(*item, *n)?;
    }
    Ok(())
}

/// Claim a home at `position` if the gather threshold has just been reached.
///
/// Returns `true` only on the call that creates the home; an existing home
/// is never moved.
pub fn maybe_claim_home(
    village: &mut Option<Village>,
    gather_count: u32,
    position: Vec2,
    config: &VillageConfig,
) -> bool {
    if village.is_some() || gather_count < config.home_threshold {
        return false;
    }
    *village = Some(Village::new(position));
    true
}

/// Move surplus items into storage.
///
/// Keeps `food_reserve` food items, `material_reserve` of each material,
/// and every weapon, armor piece, and potion (they are worn or drunk, not
/// stored). Stops at the storage limit. Returns how many items moved.
pub fn deposit_surplus(village: &mut Village, inventory: &mut Inventory, config: &VillageConfig) -> u32 {
    let Some(storage) = village
        .buildings
        .iter_mut()
        .find(|b| b.kind == BuildingKind::Storage)
    else {
        return 0;
    };
    let mut moved = 0_u32;
    for kind in ItemKind::ALL {
        let reserve = match kind.category() {
            ItemCategory::Food => config.food_reserve,
            ItemCategory::Material => config.material_reserve,
            _ => continue,
        };
        let surplus = inventory.count(kind).saturating_sub(reserve);
        let room = config.storage_limit.saturating_sub(storage.deposits.len());
        let n = surplus.min(u32::try_from(room).unwrap_or(u32::MAX));
        if n == 0 {
            continue;
        }
        if let Ok(items) = inventory.remove(kind, n) {
            storage.deposits.extend(items);
            moved = moved.saturating_add(n);
        }
    }
    moved
}
