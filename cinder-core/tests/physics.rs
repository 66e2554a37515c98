#![allow(missing_docs)]
//! End-to-end behavior of the physics orchestrator through the public API.

use std::cell::Cell;

use cinder_core::block;
use cinder_core::{Level, PackedEntry, Physics, PhysicsConfig, TickQueue, World, WorldEvents};
use cinder_utils::random::legacy_random::LegacyRandom;
use cinder_utils::{BlockId, Dimensions};

/// A level that counts block reads.
#[derive(Default)]
struct CountingWorld {
    level: Level,
    lookups: Cell<usize>,
}

impl CountingWorld {
    fn loaded(dims: Dimensions) -> Self {
        Self {
            level: Level::empty(dims).expect("test level"),
            lookups: Cell::new(0),
        }
    }

    fn take_lookups(&self) -> usize {
        self.lookups.replace(0)
    }
}

impl World for CountingWorld {
    fn is_loaded(&self) -> bool {
        self.level.is_loaded()
    }

    fn dimensions(&self) -> Dimensions {
        self.level.dimensions()
    }

    fn get_block(&self, index: usize) -> BlockId {
        self.lookups.set(self.lookups.get() + 1);
        self.level.get_block(index)
    }

    fn set_block(&mut self, index: usize, block: BlockId) {
        self.level.set_block(index, block);
    }
}

fn physics<W: World>(world: W, events: &WorldEvents) -> Physics<W, LegacyRandom> {
    Physics::with_random(world, events, true, LegacyRandom::from_seed(1234))
}

fn mark_glass(physics: &mut Physics<Level, LegacyRandom>, index: usize, _: BlockId) {
    physics.world_mut().set_block(index, block::GLASS);
}

#[test]
fn test_countdown_round_trip() {
    for (pos, delay) in [(0, 0), (1, 1), (12_345, 7), (PackedEntry::POS_MASK as usize, 31)] {
        let mut queue = TickQueue::new();
        queue.enqueue(PackedEntry::new(pos, delay));
        for _ in 0..delay {
            let state = queue.check();
            assert!(!state.is_due());
            assert_eq!(state.entry().pos(), pos);
        }
        let state = queue.check();
        assert!(state.is_due());
        assert_eq!(state.entry().pos(), pos);
        assert!(queue.is_empty());
    }
}

#[test]
fn test_masked_countdown_preserves_flags() {
    let mut queue = TickQueue::new();
    queue.enqueue(PackedEntry::new(99, 0b10101));

    let first = queue.check_masked(0b00011);
    assert!(!first.is_due());
    assert_eq!(first.entry().flags(), 0b10100);
    assert_eq!(queue.len(), 1);

    let second = queue.check_masked(0b00011);
    assert!(second.is_due());
    assert_eq!(second.entry().flags(), 0b10100);
    assert_eq!(second.entry().pos(), 99);
    assert!(queue.is_empty());
}

#[test]
fn test_random_ticker_lookups_per_tick() {
    let events = WorldEvents::new();
    let mut physics = physics(CountingWorld::loaded(Dimensions::new(32, 32, 32)), &events);
    physics.world().take_lookups();

    physics.tick();
    assert_eq!(physics.world().take_lookups(), 24);
    physics.tick();
    assert_eq!(physics.world().take_lookups(), 24);
    assert_eq!(physics.tick_count(), 2);
}

#[test]
fn test_partial_chunks_are_ticked() {
    let events = WorldEvents::new();
    let mut physics = physics(CountingWorld::loaded(Dimensions::new(17, 1, 40)), &events);
    physics.world().take_lookups();

    physics.tick();
    // 2 chunks along x, 3 along z, 1 along y.
    assert_eq!(physics.world().take_lookups(), 2 * 3 * 3);
}

#[test]
fn test_disabled_does_nothing() {
    let events = WorldEvents::new();
    let mut physics = physics(CountingWorld::loaded(Dimensions::new(32, 32, 32)), &events);
    physics.set_enabled(false);
    physics.liquid_mut().schedule_water(0);
    physics.falling_mut().schedule(1);
    physics.world().take_lookups();

    for _ in 0..5 {
        physics.tick();
    }
    assert_eq!(physics.world().take_lookups(), 0);
    assert_eq!(physics.liquid().pending(), 1);
    assert_eq!(physics.falling().pending(), 1);
    assert_eq!(physics.tick_count(), 0);
}

#[test]
fn test_unloaded_does_nothing() {
    let events = WorldEvents::new();
    let mut physics = physics(CountingWorld::default(), &events);
    physics.liquid_mut().schedule_water(0);

    physics.tick();
    assert_eq!(physics.world().take_lookups(), 0);
    assert_eq!(physics.liquid().pending(), 1);
    assert_eq!(physics.tick_count(), 0);
}

#[test]
fn test_toggle_clears_liquid_and_falling_only() {
    let events = WorldEvents::new();
    let level = Level::empty(Dimensions::new(8, 8, 8)).expect("test level");
    let mut physics = physics(level, &events);
    physics.liquid_mut().schedule_water(3);
    physics.liquid_mut().schedule_lava(4);
    physics.falling_mut().schedule(5);
    physics.tnt_mut().ignite(6, false);

    physics.set_enabled(false);
    physics.set_enabled(true);

    assert!(physics.enabled());
    assert_eq!(physics.liquid().pending(), 0);
    assert_eq!(physics.falling().pending(), 0);
    assert_eq!(physics.tnt().pending(), 1);
}

#[test]
fn test_unregistered_placement_is_noop() {
    let events = WorldEvents::new();
    let level = Level::empty(Dimensions::new(4, 4, 4)).expect("test level");
    let mut physics = physics(level, &events);
    let before = physics.world().blocks().to_vec();

    physics.on_block_placed(1, 1, 1, block::STONE);
    physics.on_block_placed(2, 2, 2, block::OBSIDIAN);

    assert_eq!(physics.world().blocks(), before.as_slice());
    assert_eq!(physics.liquid().pending(), 0);
    assert_eq!(physics.falling().pending(), 0);
    assert_eq!(physics.tnt().pending(), 0);
}

#[test]
fn test_out_of_bounds_placement_is_ignored() {
    let events = WorldEvents::new();
    let level = Level::empty(Dimensions::new(4, 4, 4)).expect("test level");
    let mut physics = physics(level, &events);

    physics.place_block(4, 0, 0, block::WATER);
    physics.on_block_placed(0, 9, 0, block::WATER);

    assert_eq!(physics.world().count(block::WATER), 0);
    assert_eq!(physics.liquid().pending(), 0);
}

#[test]
fn test_default_config_is_enabled() {
    let events = WorldEvents::new();
    let level = Level::empty(Dimensions::new(4, 4, 4)).expect("test level");
    let physics = Physics::new(level, &events, &PhysicsConfig::default());
    assert!(physics.enabled());
}

#[test]
fn test_disabled_from_config() {
    let events = WorldEvents::new();
    let config = PhysicsConfig::from_json5("{ enabled: false, seed: 9 }").expect("config");
    let level = Level::empty(Dimensions::new(4, 4, 4)).expect("test level");
    let mut physics = Physics::new(level, &events, &config);
    assert!(!physics.enabled());

    physics.place_block(0, 3, 0, block::SAND);
    physics.tick();
    assert_eq!(physics.world().block_at(0, 3, 0), block::SAND);
}

#[test]
fn test_registered_random_tick_handler_runs() {
    let events = WorldEvents::new();
    let dims = Dimensions::new(16, 16, 16);
    let mut level = Level::new();
    level
        .load(dims, vec![block::OBSIDIAN; dims.volume()])
        .expect("test level");
    let mut physics = physics(level, &events);
    physics
        .callbacks_mut()
        .set_random_tick(block::OBSIDIAN, mark_glass);

    physics.tick();
    let glass = physics.world().count(block::GLASS);
    assert!((1..=3).contains(&glass), "marked {glass} cells");
}

#[test]
fn test_reload_adopts_new_dimensions() {
    let events = WorldEvents::new();
    let level = Level::empty(Dimensions::new(8, 8, 8)).expect("test level");
    let mut physics = physics(level, &events);
    physics.liquid_mut().schedule_water(0);
    physics.tnt_mut().ignite(1, false);

    let dims = Dimensions::new(20, 4, 10);
    physics
        .world_mut()
        .load(dims, vec![block::AIR; dims.volume()])
        .expect("reload");
    events.raise_new_map_loaded();
    physics.handle_world_events();

    assert_eq!(physics.dimensions(), dims);
    assert_eq!(physics.liquid().pending(), 0);
    assert_eq!(physics.tnt().pending(), 1);

    // Raising again with the same map changes nothing.
    events.raise_new_map_loaded();
    events.raise_new_map_loaded();
    physics.handle_world_events();
    assert_eq!(physics.dimensions(), dims);

    physics.place_block(19, 3, 9, block::SAND);
    assert_eq!(physics.falling().pending(), 1);
}

#[test]
fn test_reload_is_picked_up_by_tick() {
    let events = WorldEvents::new();
    let mut physics = physics(CountingWorld::default(), &events);
    physics.tick();
    assert_eq!(physics.tick_count(), 0);

    physics
        .world_mut()
        .level
        .load(Dimensions::new(32, 16, 16), vec![block::AIR; 32 * 16 * 16])
        .expect("load");
    events.raise_new_map_loaded();
    physics.world().take_lookups();

    physics.tick();
    assert_eq!(physics.tick_count(), 1);
    assert_eq!(physics.world().take_lookups(), 2 * 3);
}

#[test]
fn test_drop_unsubscribes() {
    let events = WorldEvents::new();
    let level = Level::empty(Dimensions::new(4, 4, 4)).expect("test level");
    let physics = physics(level, &events);
    assert_eq!(events.subscriber_count(), 1);

    drop(physics);
    assert_eq!(events.subscriber_count(), 0);
    events.raise_new_map_loaded();
}

#[test]
fn test_water_fills_basin() {
    let events = WorldEvents::new();
    let dims = Dimensions::new(5, 3, 5);
    let mut level = Level::empty(dims).expect("test level");
    for z in 0..5 {
        for x in 0..5 {
            let rim = x == 0 || x == 4 || z == 0 || z == 4;
            level.set_block(dims.index(x, 0, z), block::STONE);
            if rim {
                level.set_block(dims.index(x, 1, z), block::STONE);
            }
        }
    }
    let mut physics = physics(level, &events);
    physics.place_block(2, 1, 2, block::WATER);

    for _ in 0..4 {
        physics.tick();
    }
    assert_eq!(physics.world().count(block::WATER), 9);
    for z in 1..4 {
        for x in 1..4 {
            assert_eq!(physics.world().block_at(x, 1, z), block::WATER);
        }
    }
    assert_eq!(physics.world().block_at(2, 2, 2), block::AIR);
}

#[test]
fn test_sand_lands_on_floor() {
    let events = WorldEvents::new();
    let dims = Dimensions::new(1, 6, 1);
    let mut level = Level::empty(dims).expect("test level");
    level.set_block(dims.index(0, 0, 0), block::STONE);
    let mut physics = physics(level, &events);

    physics.place_block(0, 5, 0, block::SAND);
    physics.place_block(0, 4, 0, block::GRAVEL);
    // The sand waits for the gravel below to land before it drops.
    for _ in 0..5 {
        physics.tick();
    }

    assert_eq!(physics.world().block_at(0, 1, 0), block::GRAVEL);
    assert_eq!(physics.world().block_at(0, 2, 0), block::SAND);
    assert_eq!(physics.world().block_at(0, 3, 0), block::AIR);
}

#[test]
fn test_lava_pass_runs_before_water_pass() {
    let events = WorldEvents::new();
    let mut level = Level::empty(Dimensions::new(2, 1, 1)).expect("test level");
    level.set_block(0, block::LAVA);
    level.set_block(1, block::WATER);
    let mut physics = physics(level, &events);
    for liquid in [block::LAVA, block::STILL_LAVA, block::WATER, block::STILL_WATER] {
        physics.callbacks_mut().clear_random_tick(liquid);
    }

    physics.liquid_mut().schedule_lava(0);
    for _ in 0..30 {
        physics.tick();
    }
    // Both entries are due on the next tick.
    physics.liquid_mut().schedule_water(1);
    physics.tick();

    assert_eq!(physics.world().block_at(0, 0, 0), block::LAVA);
    assert_eq!(physics.world().block_at(1, 0, 0), block::STONE);
    assert_eq!(physics.liquid().pending(), 0);
}

#[test]
fn test_falling_pass_runs_before_fuse_pass() {
    let events = WorldEvents::new();
    let dims = Dimensions::new(1, 12, 1);
    let mut level = Level::empty(dims).expect("test level");
    level.set_block(dims.index(0, 0, 0), block::STONE);
    level.set_block(dims.index(0, 1, 0), block::TNT);
    let mut physics = physics(level, &events);
    physics.callbacks_mut().clear_random_tick(block::SAND);

    physics.tnt_mut().ignite(dims.index(0, 1, 0), false);
    for _ in 0..14 {
        physics.tick();
    }
    // The fuse and the fall both come due on the 16th tick.
    let top = dims.index(0, 11, 0);
    physics.world_mut().set_block(top, block::SAND);
    physics.falling_mut().schedule(top);
    physics.tick();
    assert_eq!(physics.world().count(block::SAND), 1);
    physics.tick();

    // The sand lands on the charge first and is caught in the blast.
    assert_eq!(physics.world().count(block::SAND), 0);
    assert_eq!(physics.world().count(block::TNT), 0);
    assert_eq!(physics.world().block_at(0, 0, 0), block::AIR);
    assert_eq!(physics.tnt().pending(), 0);
}
