//! End-to-end session tests: play, save, reload, catch up, keep playing.
//!
//! Randomness is scripted with a high fallback draw, which keeps every
//! roll on its common outcome (cloudy weather, normal plants, no mutation
//! machine failure) so the whole session is deterministic.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use tanaman_core::actions;
use tanaman_core::admin::{self, AdminCommand};
use tanaman_core::clock::{Clock, ManualClock};
use tanaman_core::{GameState, MemoryStore, SnapshotStore, load_or_new, reconcile, run_tick, save_state};
use tanaman_ledger::Holding;
use tanaman_types::catalog::LONG_ABSENCE_MS;
use tanaman_types::{EpochMillis, FruitGrade, PetSpecies, PetTier, PlotId, PlotStatus, SeedType, Weather};
use tanaman_world::ScriptedRandom;

const T0: EpochMillis = EpochMillis::new(1_700_000_000_000);
const KEY: &str = "tanamanTycoonState";

fn common_outcomes() -> ScriptedRandom {
    ScriptedRandom::default().with_fallback(0.99)
}

fn tick_until(state: &mut GameState, clock: &ManualClock, until: EpochMillis, source: &mut ScriptedRandom) {
    while clock.now() < until {
        clock.advance(1000);
        run_tick(state, clock.now(), source).unwrap();
    }
}

#[test]
fn play_save_reload_and_catch_up() {
    let clock = ManualClock::new(T0);
    let mut source = common_outcomes();
    let mut store = MemoryStore::new();

    // --- First session: plant, grow, harvest, sell ---
    let mut state = load_or_new(store.load(KEY).as_deref(), clock.now()).state;
    state.begin_session(&mut source);
    assert_eq!(state.weather.current(), Weather::Cloudy);

    actions::plant(&mut state, PlotId::new(0), SeedType::Mango, clock.now(), &mut source).unwrap();
    tick_until(&mut state, &clock, T0.checked_add_millis(140_000).unwrap(), &mut source);
    assert!(state.garden.plot(PlotId::new(0)).unwrap().is_ready());
    assert_eq!(state.tick, 140);

    actions::harvest(&mut state, PlotId::new(0), clock.now(), &mut source).unwrap();
    assert_eq!(state.ledger.count(Holding::Fruit(FruitGrade::Plain, SeedType::Mango)), 1);
    let plot = state.garden.plot(PlotId::new(0)).unwrap();
    assert_eq!(plot.status, PlotStatus::Fruiting);
    assert_eq!(plot.next_phase_at, T0.checked_add_millis(260_000));

    actions::sell_fruit(&mut state, FruitGrade::Plain, SeedType::Mango, &mut source).unwrap();
    assert_eq!(state.ledger.money(), 35);

    // --- Pet mutation started before quitting ---
    admin::execute(
        &mut state,
        &AdminCommand::GivePet {
            name: "fox".to_owned(),
            age: 25,
        },
    )
    .unwrap();
    actions::start_mutation(&mut state, PetSpecies::Fox, clock.now()).unwrap();
    clock.advance(10_000);
    save_state(&state, &mut store, KEY, &clock).unwrap();
    let saved_at = clock.now();

    // --- Away for almost six minutes ---
    clock.advance(350_000);

    // --- Second session: restore and catch up ---
    let restored = load_or_new(store.load(KEY).as_deref(), clock.now());
    assert_eq!(restored.last_save, saved_at);
    let mut state = restored.state;
    assert_eq!(state.ledger.money(), 35);
    assert!(state.machine.is_busy());

    let report = reconcile(&mut state, restored.last_save, clock.now(), LONG_ABSENCE_MS).unwrap();
    assert!(report.long_absence);
    assert_eq!(report.plots_advanced, 1);
    assert_eq!(
        report.notice().unwrap().text,
        "Welcome back! While you were away (~5 minutes): your plants grew."
    );
    assert!(state.garden.plot(PlotId::new(0)).unwrap().is_ready());

    state.begin_session(&mut source);
    let summary = run_tick(&mut state, clock.now(), &mut source).unwrap();
    assert_eq!(summary.tick, 1);
    assert_eq!(summary.notices.len(), 1);
    assert_eq!(summary.notices[0].text, "Fox mutated into a Rainbow pet!");
    assert!(state.roster.has_tier(PetSpecies::Fox, PetTier::Rainbow));
    assert_eq!(state.roster.age(PetSpecies::Fox), 0);
    assert!(!state.machine.is_busy());
    assert!(state.plots_consistent());
}

#[test]
fn rejected_actions_leave_saved_state_unchanged() {
    let clock = ManualClock::new(T0);
    let mut source = common_outcomes();
    let mut store = MemoryStore::new();
    let mut state = GameState::new();
    state.begin_session(&mut source);

    assert!(actions::harvest(&mut state, PlotId::new(3), clock.now(), &mut source).is_err());
    assert!(actions::buy_seed(&mut state, SeedType::Jasmine).is_err());
    assert!(actions::equip(&mut state, PetSpecies::Griffin).is_err());
    assert!(actions::upgrade_garden(&mut state).is_ok());
    assert!(actions::upgrade_garden(&mut state).is_err());

    save_state(&state, &mut store, KEY, &clock).unwrap();
    let restored = load_or_new(store.load(KEY).as_deref(), clock.now());
    assert_eq!(restored.state.ledger, state.ledger);
    assert_eq!(restored.state.garden, state.garden);
    assert_eq!(restored.state.garden.len(), 7);
    assert_eq!(restored.state.ledger.money(), 0);
}
