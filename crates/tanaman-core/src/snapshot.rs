//! The persisted snapshot contract.
//!
//! A snapshot is one JSON object with camelCase keys. Saving is strict:
//! [`capture`] builds a [`Snapshot`] from `&GameState` and serializes it
//! as is. Loading is tolerant: [`restore`] decodes field by field, fills
//! anything missing or malformed from the new-game defaults, upgrades the
//! legacy single `mutation` plot field, and repairs plot and roster
//! invariants. Only a document that is not a JSON object at all is
//! rejected, and [`load_or_new`] turns that into a fresh game.
//!
//! Shop shelves and weather are session state and are never persisted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use tanaman_ledger::{Holding, Ledger};
use tanaman_pets::{AbilityScheduler, MutationMachine, MutationRun, PassiveCooldowns, PetRoster};
use tanaman_types::catalog::{EQUIP_SLOTS, INITIAL_UPGRADE_COST};
use tanaman_types::{
    EpochMillis, FruitGrade, MutationType, PetSpecies, PetTier, PlantVariant, Plot, PlotId,
    PlotStatus, SeedType, ToolKind,
};
use tanaman_world::Garden;

use crate::state::GameState;

/// Errors produced while encoding or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The document is not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document is JSON but not an object.
    #[error("snapshot is not a JSON object")]
    NotAnObject,

    /// The snapshot could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Countable holdings, pets and tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    /// Unplanted seeds.
    pub seeds: BTreeMap<SeedType, u32>,
    /// Plain fruit.
    pub fruits: BTreeMap<SeedType, u32>,
    /// Bonus fruit.
    pub boosted_fruits: BTreeMap<SeedType, u32>,
    /// Fruit stolen by the racoon.
    pub racoon_infected_fruits: BTreeMap<SeedType, u32>,
    /// Watering cans.
    pub watering_cans: u32,
    /// Size bonus charges.
    pub size_bonus: u32,
    /// Super duper speed charges.
    pub super_duper_speed: u32,
    /// Owned pets per species.
    pub pets: BTreeMap<PetSpecies, u32>,
    /// The three equip slots.
    pub equipped_pets: Vec<Option<PetSpecies>>,
    /// Gold shards.
    pub pet_shard_gold: u32,
    /// Diamond shards.
    pub pet_shard_diamond: u32,
    /// Rainbow shards.
    pub pet_shard_rainbow: u32,
    /// Species with the gold tier.
    pub golden_pets: Vec<PetSpecies>,
    /// Species with the diamond tier.
    pub diamond_pets: Vec<PetSpecies>,
    /// Species with the rainbow tier.
    pub rainbow_pets: Vec<PetSpecies>,
    /// Shared age per species.
    pub pet_ages: BTreeMap<PetSpecies, u32>,
}

/// Mutation machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSnapshot {
    /// Whether a run is in flight.
    pub is_mutating: bool,
    /// Species inside the machine.
    pub pet_type: Option<PetSpecies>,
    /// When the run completes.
    pub end_time: Option<EpochMillis>,
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Money on hand.
    pub money: u64,
    /// Holdings, pets and tiers.
    pub inventory: InventorySnapshot,
    /// Plots in garden order.
    pub plots: Vec<Plot>,
    /// Price of the next garden upgrade.
    pub upgrade_cost: u64,
    /// Seeds bought at least once.
    pub unlocked_seeds: Vec<SeedType>,
    /// When this snapshot was taken.
    pub last_save_timestamp: EpochMillis,
    /// Remaining active cooldown per equip slot, in seconds.
    pub ability_cooldowns: Vec<Option<f64>>,
    /// Passive tier tracks.
    pub passive_cooldowns: PassiveCooldowns,
    /// The mutation machine.
    pub mutation_machine: MachineSnapshot,
}

impl Snapshot {
    /// Serialize to the persisted JSON text.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Serialize)
    }
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

/// Take a snapshot of the state. Never mutates.
pub fn capture(state: &GameState, now: EpochMillis) -> Snapshot {
    let ledger = &state.ledger;
    let roster = &state.roster;
    let run = state.machine.run();

    let inventory = InventorySnapshot {
        seeds: ledger.seeds().clone(),
        fruits: ledger.fruits(FruitGrade::Plain).clone(),
        boosted_fruits: ledger.fruits(FruitGrade::Bonus).clone(),
        racoon_infected_fruits: ledger.fruits(FruitGrade::Infected).clone(),
        watering_cans: ledger.count(Holding::Tool(ToolKind::WateringCan)),
        size_bonus: ledger.count(Holding::Tool(ToolKind::SizeBonus)),
        super_duper_speed: ledger.count(Holding::Tool(ToolKind::SuperDuperSpeed)),
        pets: roster.owned_map().clone(),
        equipped_pets: roster.slots().to_vec(),
        pet_shard_gold: ledger.count(Holding::Shard(PetTier::Gold)),
        pet_shard_diamond: ledger.count(Holding::Shard(PetTier::Diamond)),
        pet_shard_rainbow: ledger.count(Holding::Shard(PetTier::Rainbow)),
        golden_pets: roster.tier_members(PetTier::Gold),
        diamond_pets: roster.tier_members(PetTier::Diamond),
        rainbow_pets: roster.tier_members(PetTier::Rainbow),
        pet_ages: roster.ages().clone(),
    };

    Snapshot {
        money: ledger.money(),
        inventory,
        plots: state.garden.plots().to_vec(),
        upgrade_cost: state.garden.upgrade_cost(),
        unlocked_seeds: ledger.unlocked().iter().copied().collect(),
        last_save_timestamp: now,
        ability_cooldowns: state
            .scheduler
            .active()
            .iter()
            .map(|cooldown| cooldown.and_then(|seconds| seconds.to_f64()))
            .collect(),
        passive_cooldowns: state.scheduler.passive(),
        mutation_machine: MachineSnapshot {
            is_mutating: run.is_some(),
            pet_type: run.map(|run| run.species),
            end_time: run.map(|run| run.end_at),
        },
    }
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

/// A state rebuilt from a snapshot, plus when it was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    /// The rebuilt state. Session-local parts are at their defaults.
    pub state: GameState,
    /// The snapshot's save time.
    pub last_save: EpochMillis,
}

/// Rebuild a state from snapshot JSON.
///
/// `now` stands in for a missing save timestamp.
pub fn restore(json: &str, now: EpochMillis) -> Result<Restored, SnapshotError> {
    let document: Value = serde_json::from_str(json).map_err(SnapshotError::Parse)?;
    let Value::Object(root) = document else {
        return Err(SnapshotError::NotAnObject);
    };
    let empty = Map::new();
    let inventory = match root.get("inventory") {
        Some(Value::Object(inventory)) => inventory,
        _ => &empty,
    };

    let ledger = restore_ledger(&root, inventory);
    let roster = restore_roster(inventory);
    let garden = Garden::from_parts(
        restore_plots(root.get("plots")),
        count_u64(&root, "upgradeCost")
            .filter(|cost| *cost > 0)
            .unwrap_or(INITIAL_UPGRADE_COST),
    );

    let mut active = [None; EQUIP_SLOTS];
    if let Some(Value::Array(saved)) = root.get("abilityCooldowns") {
        for (slot, value) in active.iter_mut().zip(saved) {
            *slot = value.as_f64().and_then(Decimal::from_f64);
        }
    }
    let passive = field::<PassiveCooldowns>(&root, "passiveCooldowns").unwrap_or_default();
    let mut scheduler = AbilityScheduler::from_parts(active, passive);
    scheduler.sync(&roster);

    let machine = field::<MachineSnapshot>(&root, "mutationMachine")
        .and_then(|saved| match (saved.is_mutating, saved.pet_type, saved.end_time) {
            (true, Some(species), Some(end_at)) => Some(MutationRun { species, end_at }),
            _ => None,
        });

    let last_save = field::<EpochMillis>(&root, "lastSaveTimestamp").unwrap_or(now);

    let state = GameState {
        ledger,
        garden,
        roster,
        scheduler,
        machine: MutationMachine::from_run(machine),
        ..GameState::default()
    };
    debug!(plots = state.garden.len(), %last_save, "Snapshot restored");
    Ok(Restored { state, last_save })
}

/// Restore from an optional stored document, falling back to a new game
/// when there is none or it cannot be read at all.
pub fn load_or_new(json: Option<&str>, now: EpochMillis) -> Restored {
    let fresh = || Restored {
        state: GameState::new(),
        last_save: now,
    };
    let Some(json) = json else {
        return fresh();
    };
    restore(json, now).unwrap_or_else(|error| {
        warn!(%error, "Discarding unreadable snapshot, starting a new game");
        fresh()
    })
}

fn restore_ledger(root: &Map<String, Value>, inventory: &Map<String, Value>) -> Ledger {
    let mut ledger = Ledger::empty();
    ledger.set_money(count_u64(root, "money").unwrap_or(0));

    for (key, grade) in [
        ("fruits", Some(FruitGrade::Plain)),
        ("boostedFruits", Some(FruitGrade::Bonus)),
        ("racoonInfectedFruits", Some(FruitGrade::Infected)),
        ("seeds", None),
    ] {
        for (seed, amount) in count_map(inventory, key, SeedType::from_id) {
            let holding = grade.map_or(Holding::Seed(seed), |grade| Holding::Fruit(grade, seed));
            ledger.set_count(holding, amount);
        }
    }

    for (key, holding) in [
        ("wateringCans", Holding::Tool(ToolKind::WateringCan)),
        ("sizeBonus", Holding::Tool(ToolKind::SizeBonus)),
        ("superDuperSpeed", Holding::Tool(ToolKind::SuperDuperSpeed)),
        ("petShardGold", Holding::Shard(PetTier::Gold)),
        ("petShardDiamond", Holding::Shard(PetTier::Diamond)),
        ("petShardRainbow", Holding::Shard(PetTier::Rainbow)),
    ] {
        if let Some(count) = count_u32(inventory, key).filter(|count| *count > 0) {
            ledger.set_count(holding, count);
        }
    }

    if let Some(Value::Array(unlocked)) = root.get("unlockedSeeds") {
        for seed in unlocked.iter().filter_map(Value::as_str).filter_map(SeedType::from_id) {
            ledger.unlock(seed);
        }
    }
    ledger
}

fn restore_roster(inventory: &Map<String, Value>) -> PetRoster {
    let mut roster = PetRoster::new();
    for (species, count) in count_map(inventory, "pets", PetSpecies::from_id) {
        roster.set_owned(species, count);
    }
    for (species, age) in count_map(inventory, "petAges", PetSpecies::from_id) {
        roster.set_age(species, age);
    }

    let mut slots = [None; EQUIP_SLOTS];
    if let Some(Value::Array(saved)) = inventory.get("equippedPets") {
        for (slot, value) in slots.iter_mut().zip(saved) {
            *slot = value.as_str().and_then(PetSpecies::from_id);
        }
    }
    roster.set_slots(slots);

    for (key, tier) in [
        ("goldenPets", PetTier::Gold),
        ("diamondPets", PetTier::Diamond),
        ("rainbowPets", PetTier::Rainbow),
    ] {
        if let Some(Value::Array(members)) = inventory.get(key) {
            for species in members.iter().filter_map(Value::as_str).filter_map(PetSpecies::from_id) {
                roster.insert_tier(species, tier);
            }
        }
    }
    roster.normalize();
    roster
}

fn restore_plots(saved: Option<&Value>) -> Vec<Plot> {
    let plots: Vec<Plot> = match saved {
        Some(Value::Array(saved)) => saved
            .iter()
            .zip(0_u32..)
            .map(|(value, ordinal)| restore_plot(value, PlotId::new(ordinal)))
            .collect(),
        _ => Vec::new(),
    };
    if plots.is_empty() {
        return Garden::new().plots().to_vec();
    }
    plots
}

/// Decode one plot field by field, so a bad value only loses that field.
fn restore_plot(value: &Value, id: PlotId) -> Plot {
    let Value::Object(object) = value else {
        warn!(plot_id = %id, "Replacing malformed plot with an empty one");
        return Plot::empty(id);
    };

    let seed_type = field::<SeedType>(object, "type");
    let next_phase_at = field::<EpochMillis>(object, "nextPhaseAt");
    let status = field::<PlotStatus>(object, "status").unwrap_or(match (seed_type, next_phase_at) {
        (None, _) => PlotStatus::Empty,
        (Some(_), Some(_)) => PlotStatus::Growing,
        (Some(_), None) => PlotStatus::Ready,
    });
    let variant = match object.get("variant").and_then(Value::as_str) {
        Some("gold_rainbow") => PlantVariant::Rainbow,
        _ => field(object, "variant").unwrap_or_default(),
    };
    let tags: &[Value] = match (object.get("mutations"), object.get("mutation")) {
        (Some(Value::Array(tags)), _) => tags,
        (None, Some(legacy @ Value::String(_))) => std::slice::from_ref(legacy),
        _ => &[],
    };

    let mut plot = Plot {
        id,
        seed_type,
        planted_at: field(object, "plantedAt"),
        next_phase_at,
        status,
        boosted: object.get("boosted").and_then(Value::as_bool).unwrap_or(false),
        variant,
        mutations: tags
            .iter()
            .filter_map(|tag| MutationType::deserialize(tag).ok())
            .collect(),
    };
    normalize_plot(&mut plot);
    plot
}

/// Repair a restored plot so it satisfies the plot invariants.
///
/// A plot without a seed (or marked empty) is cleared. A timed plot that
/// lost its deadline is treated as ready, and a deadline on an untimed
/// plot is dropped.
fn normalize_plot(plot: &mut Plot) {
    if plot.seed_type.is_none() || plot.status == PlotStatus::Empty {
        plot.clear();
        return;
    }
    match (plot.status.is_timed(), plot.next_phase_at) {
        (true, None) => plot.status = PlotStatus::Ready,
        (false, Some(_)) => plot.next_phase_at = None,
        _ => {}
    }
}

// --- Field decoding ---

fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    let value = object.get(key).filter(|value| !value.is_null())?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(key, %error, "Ignoring malformed snapshot field");
            None
        }
    }
}

fn count_u64(object: &Map<String, Value>, key: &str) -> Option<u64> {
    object.get(key).and_then(Value::as_u64)
}

fn count_u32(object: &Map<String, Value>, key: &str) -> Option<u32> {
    count_u64(object, key).and_then(|count| u32::try_from(count).ok())
}

/// Decode a per-catalog count map, skipping unknown keys and bad counts.
fn count_map<K: Ord>(
    object: &Map<String, Value>,
    key: &str,
    from_id: fn(&str) -> Option<K>,
) -> BTreeMap<K, u32> {
    let Some(Value::Object(entries)) = object.get(key) else {
        return BTreeMap::new();
    };
    entries
        .iter()
        .filter_map(|(id, count)| {
            let decoded = from_id(id)?;
            let count = count.as_u64().and_then(|count| u32::try_from(count).ok())?;
            Some((decoded, count))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use tanaman_world::ScriptedRandom;

    use super::*;
    use crate::actions;

    const T0: EpochMillis = EpochMillis::new(1_700_000_000_000);

    fn played() -> GameState {
        let mut state = GameState::new();
        let mut source = ScriptedRandom::new([0.9]);
        actions::plant(&mut state, PlotId::new(2), SeedType::Mango, T0, &mut source).unwrap();
        state.ledger.set_money(1234);
        state
            .ledger
            .credit(Holding::Fruit(FruitGrade::Bonus, SeedType::Grape), 3)
            .unwrap();
        state.ledger.credit(Holding::Shard(PetTier::Gold), 1).unwrap();
        state.ledger.unlock(SeedType::Cacao);
        state.roster.set_owned(PetSpecies::Fox, 2);
        state.roster.set_age(PetSpecies::Fox, 21);
        state.roster.insert_tier(PetSpecies::Fox, PetTier::Diamond);
        actions::equip(&mut state, PetSpecies::Fox).unwrap();
        state.machine.start(&state.roster, PetSpecies::Fox, T0).unwrap();
        state
    }

    #[test]
    fn saved_state_restores_equal() {
        let state = played();
        let json = capture(&state, T0).to_json().unwrap();
        let restored = restore(&json, EpochMillis::new(0)).unwrap();
        assert_eq!(restored.last_save, T0);
        assert_eq!(restored.state.ledger, state.ledger);
        assert_eq!(restored.state.garden, state.garden);
        assert_eq!(restored.state.roster, state.roster);
        assert_eq!(restored.state.scheduler, state.scheduler);
        assert_eq!(restored.state.machine, state.machine);
    }

    #[test]
    fn wire_keys_are_camel_case() {
        let json = capture(&played(), T0).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["upgradeCost"], 10);
        assert_eq!(value["lastSaveTimestamp"], 1_700_000_000_000_i64);
        assert_eq!(value["inventory"]["boostedFruits"]["grape"], 3);
        assert_eq!(value["inventory"]["equippedPets"][0], "fox");
        assert_eq!(value["inventory"]["equippedPets"][1], Value::Null);
        assert_eq!(value["inventory"]["diamondPets"][0], "fox");
        assert_eq!(value["plots"][2]["type"], "mango");
        assert_eq!(value["mutationMachine"]["isMutating"], true);
        assert_eq!(value["mutationMachine"]["petType"], "fox");
    }

    #[test]
    fn missing_sub_maps_are_zero_filled() {
        let json = r#"{"money": 50, "inventory": {"seeds": {"grape": 2}}}"#;
        let restored = restore(json, T0).unwrap();
        let ledger = &restored.state.ledger;
        assert_eq!(ledger.money(), 50);
        assert_eq!(ledger.count(Holding::Seed(SeedType::Grape)), 2);
        assert_eq!(ledger.count(Holding::Seed(SeedType::Mango)), 0);
        assert_eq!(ledger.seeds().len(), SeedType::ALL.len());
        assert_eq!(ledger.fruits(FruitGrade::Infected).len(), SeedType::ALL.len());
        assert_eq!(restored.state.roster.owned_map().len(), PetSpecies::ALL.len());
        assert_eq!(restored.state.garden.len(), 6);
        assert_eq!(restored.state.garden.upgrade_cost(), 10);
        assert!(ledger.is_unlocked(SeedType::Mango));
        assert_eq!(restored.last_save, T0);
    }

    #[test]
    fn legacy_single_mutation_is_upgraded() {
        let json = r#"{"plots": [
            {"id": 7, "type": "mango", "status": "ready", "variant": "gold_rainbow", "mutation": "gatal"},
            {"id": 8, "type": null, "status": "empty", "mutation": null}
        ]}"#;
        let restored = restore(json, T0).unwrap();
        let plots = restored.state.garden.plots();
        assert_eq!(plots.len(), 2);
        let first = plots.first().unwrap();
        assert_eq!(first.id, PlotId::new(0));
        assert!(first.mutations.contains(&MutationType::Gatal));
        assert_eq!(first.variant, PlantVariant::Rainbow);
        assert!(plots.get(1).unwrap().is_empty());
        assert!(restored.state.plots_consistent());
    }

    #[test]
    fn inconsistent_plots_are_repaired() {
        let json = r#"{"plots": [
            {"id": 0, "type": "grape", "status": "growing", "nextPhaseAt": null},
            {"id": 1, "type": null, "status": "ready", "boosted": true},
            {"id": 2, "type": "cacao", "status": "ready", "nextPhaseAt": 5},
            "not a plot"
        ]}"#;
        let restored = restore(json, T0).unwrap();
        let plots = restored.state.garden.plots();
        assert!(plots.first().unwrap().is_ready());
        assert!(plots.get(1).unwrap().is_empty());
        assert!(!plots.get(1).unwrap().boosted);
        assert_eq!(plots.get(2).unwrap().next_phase_at, None);
        assert!(plots.get(3).unwrap().is_empty());
        assert!(restored.state.plots_consistent());
    }

    #[test]
    fn equipped_pets_are_padded_and_checked() {
        let json = r#"{"inventory": {
            "pets": {"chicken": 1, "fox": 0},
            "equippedPets": ["chicken", "fox", null, "chicken", "racoon"],
            "goldenPets": ["chicken"], "rainbowPets": ["chicken"]
        }}"#;
        let restored = restore(json, T0).unwrap();
        let roster = &restored.state.roster;
        assert_eq!(roster.slots(), &[Some(PetSpecies::Chicken), None, None]);
        assert!(roster.has_tier(PetSpecies::Chicken, PetTier::Rainbow));
        assert!(!roster.has_tier(PetSpecies::Chicken, PetTier::Gold));

        let short = r#"{"inventory": {"pets": {"chicken": 1}, "equippedPets": ["chicken"]}}"#;
        let restored = restore(short, T0).unwrap();
        assert_eq!(restored.state.roster.slots(), &[Some(PetSpecies::Chicken), None, None]);
    }

    #[test]
    fn cooldowns_round_trip_through_numbers() {
        let json = r#"{"inventory": {
            "pets": {"fox": 1, "chicken": 1},
            "equippedPets": ["fox", "chicken", null]
        }, "abilityCooldowns": [12.5, 30, 99], "passiveCooldowns": {"gold": 7, "diamond": 60, "rainbow": 60}}"#;
        let restored = restore(json, T0).unwrap();
        let scheduler = &restored.state.scheduler;
        assert_eq!(scheduler.active(), &[Some(dec!(12.5)), None, None]);
        assert_eq!(scheduler.passive().gold, 7);
    }

    #[test]
    fn machine_run_survives_reload() {
        let json = r#"{"inventory": {"pets": {"fox": 1}, "petAges": {"fox": 30}},
            "mutationMachine": {"isMutating": true, "petType": "fox", "endTime": 123}}"#;
        let restored = restore(json, T0).unwrap();
        assert_eq!(
            restored.state.machine.run(),
            Some(MutationRun {
                species: PetSpecies::Fox,
                end_at: EpochMillis::new(123),
            })
        );

        let idle = r#"{"mutationMachine": {"isMutating": false, "petType": null, "endTime": null}}"#;
        assert!(!restore(idle, T0).unwrap().state.machine.is_busy());
    }

    #[test]
    fn unreadable_documents_start_fresh() {
        assert!(matches!(restore("{not json", T0), Err(SnapshotError::Parse(_))));
        assert!(matches!(restore("[1, 2]", T0), Err(SnapshotError::NotAnObject)));
        let fresh = load_or_new(Some("garbage"), T0);
        assert_eq!(fresh.state, GameState::new());
        assert_eq!(fresh.last_save, T0);
        assert_eq!(load_or_new(None, T0).state, GameState::new());
    }

    #[test]
    fn bad_counts_fall_back_to_zero() {
        let json = r#"{"money": -5, "upgradeCost": 0, "inventory": {"wateringCans": "many", "seeds": {"mango": -1, "durian": 4}}}"#;
        let restored = restore(json, T0).unwrap();
        assert_eq!(restored.state.ledger.money(), 0);
        assert_eq!(restored.state.garden.upgrade_cost(), 10);
        assert_eq!(restored.state.ledger.count(Holding::Tool(ToolKind::WateringCan)), 0);
        assert_eq!(restored.state.ledger.count(Holding::Seed(SeedType::Mango)), 0);
    }

    #[test]
    fn watered_browser_plot_with_fractional_deadline_survives() {
        let json = r#"{"lastSaveTimestamp": 1700000000000, "plots": [
            {"id": 0, "type": "mango", "plantedAt": 1700000000000, "nextPhaseAt": 1700000058800.75,
             "status": "growing", "boosted": false, "variant": "gold", "mutations": ["windy"]}
        ]}"#;
        let restored = restore(json, T0).unwrap();
        let plot = restored.state.garden.plot(PlotId::new(0)).unwrap();
        assert_eq!(plot.seed_type, Some(SeedType::Mango));
        assert_eq!(plot.status, PlotStatus::Growing);
        assert_eq!(plot.planted_at, Some(T0));
        assert_eq!(plot.next_phase_at, Some(EpochMillis::new(1_700_000_058_801)));
        assert_eq!(plot.variant, PlantVariant::Gold);
        assert!(plot.mutations.contains(&MutationType::Windy));
        assert!(restored.state.plots_consistent());
    }

    #[test]
    fn unknown_status_is_inferred_from_the_plot() {
        let json = r#"{"plots": [
            {"type": "grape", "status": "wilted", "nextPhaseAt": 1700000010000},
            {"type": "cacao", "status": "sprouting"}
        ]}"#;
        let restored = restore(json, T0).unwrap();
        let plots = restored.state.garden.plots();
        let growing = plots.first().unwrap();
        assert_eq!(growing.seed_type, Some(SeedType::Grape));
        assert_eq!(growing.status, PlotStatus::Growing);
        assert_eq!(growing.next_phase_at, Some(EpochMillis::new(1_700_000_010_000)));
        let ready = plots.get(1).unwrap();
        assert_eq!(ready.seed_type, Some(SeedType::Cacao));
        assert!(ready.is_ready());
        assert!(restored.state.plots_consistent());
    }

    #[test]
    fn unknown_seed_clears_only_its_own_plot() {
        let json = r#"{"plots": [
            {"type": "durian", "status": "growing", "nextPhaseAt": 1700000010000, "mutations": ["windy"]},
            {"type": "mango", "status": "ready", "boosted": true}
        ]}"#;
        let restored = restore(json, T0).unwrap();
        let plots = restored.state.garden.plots();
        assert_eq!(plots.len(), 2);
        assert_eq!(plots.first().unwrap(), &Plot::empty(PlotId::new(0)));
        let kept = plots.get(1).unwrap();
        assert_eq!(kept.seed_type, Some(SeedType::Mango));
        assert!(kept.is_ready());
        assert!(kept.boosted);
    }

    #[test]
    fn fractional_save_and_machine_times_are_rounded() {
        let json = r#"{"lastSaveTimestamp": 1700000000000.4,
            "inventory": {"pets": {"fox": 1}, "petAges": {"fox": 30}},
            "mutationMachine": {"isMutating": true, "petType": "fox", "endTime": 1700000300000.6}}"#;
        let restored = restore(json, EpochMillis::new(42)).unwrap();
        assert_eq!(restored.last_save, T0);
        assert_eq!(
            restored.state.machine.run().map(|run| run.end_at),
            Some(EpochMillis::new(1_700_000_300_001))
        );
    }
}
