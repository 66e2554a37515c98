//! The per-tick physics orchestrator.
//!
//! [`Physics`] owns the world, the random source and the behavior simulators.
//! Each call to [`Physics::tick`] runs, in order:
//!
//! 1. the lava pass and the water pass of [`LiquidPhysics`],
//! 2. the gravity pass of [`FallingPhysics`],
//! 3. the fuse pass of [`TntPhysics`],
//! 4. the random block ticker, which samples three cells per 16³ chunk.
//!
//! Later steps observe every cell change made by earlier ones in the same
//! tick.

mod falling;
mod foliage;
mod liquid;
mod random_ticker;
mod tnt;

use cinder_utils::random::{Random, RandomSource};
use cinder_utils::{BlockId, Dimensions};

pub use falling::FallingPhysics;
pub use foliage::FoliagePhysics;
pub use liquid::LiquidPhysics;
pub use random_ticker::{CHUNK_SIZE, TICKS_PER_CHUNK};
pub use tnt::TntPhysics;

use crate::behavior::BlockCallbacks;
use crate::config::PhysicsConfig;
use crate::world::{Subscription, World, WorldEvent, WorldEvents};

/// Index of the cell below in the array returned by [`neighbours`].
pub(crate) const BELOW: usize = 4;

/// Linear indices of the six face neighbours of a cell, `None` past the map
/// edge. Order: -x, +x, -z, +z, -y, +y.
pub(crate) fn neighbours(dims: Dimensions, index: usize) -> [Option<usize>; 6] {
    let (x, y, z) = dims.unpack(index);
    let width = dims.width;
    let one_y = dims.one_y();
    [
        (x > 0).then(|| index - 1),
        (x + 1 < dims.width).then(|| index + 1),
        (z > 0).then(|| index - width),
        (z + 1 < dims.length).then(|| index + width),
        (y > 0).then(|| index - one_y),
        (y + 1 < dims.height).then(|| index + one_y),
    ]
}

/// Drives block physics for one world session.
///
/// Dropping the orchestrator unsubscribes it from the world events.
pub struct Physics<W: World, R: Random = RandomSource> {
    world: W,
    rng: R,
    enabled: bool,
    dimensions: Dimensions,
    tick_count: u64,
    callbacks: BlockCallbacks<W, R>,
    pub(crate) liquid: LiquidPhysics,
    pub(crate) falling: FallingPhysics,
    pub(crate) tnt: TntPhysics,
    pub(crate) foliage: FoliagePhysics,
    world_events: Subscription,
}

impl<W: World> Physics<W, RandomSource> {
    /// Creates the orchestrator from configuration.
    ///
    /// The random source is seeded from `config.seed`, or from entropy when
    /// no seed is configured.
    #[must_use]
    pub fn new(world: W, events: &WorldEvents, config: &PhysicsConfig) -> Self {
        Self::with_random(world, events, config.enabled, config.random_source())
    }
}

impl<W: World, R: Random> Physics<W, R> {
    /// Creates the orchestrator with an explicit random source.
    ///
    /// Subscribes to `events` and registers the built-in simulators'
    /// callbacks. If the world is already loaded its extents are picked up
    /// immediately.
    #[must_use]
    pub fn with_random(world: W, events: &WorldEvents, enabled: bool, rng: R) -> Self {
        let mut callbacks = BlockCallbacks::new();
        liquid::register(&mut callbacks);
        falling::register(&mut callbacks);
        tnt::register(&mut callbacks);
        foliage::register(&mut callbacks);

        let mut physics = Self {
            world,
            rng,
            enabled,
            dimensions: Dimensions::default(),
            tick_count: 0,
            callbacks,
            liquid: LiquidPhysics::new(),
            falling: FallingPhysics::new(),
            tnt: TntPhysics::new(),
            foliage: FoliagePhysics::new(),
            world_events: events.subscribe(),
        };
        if physics.world.is_loaded() {
            physics.reset_map();
        }
        physics
    }

    /// Advances the simulation by one tick.
    ///
    /// Does nothing while disabled or while no map is loaded.
    pub fn tick(&mut self) {
        self.handle_world_events();
        if !self.enabled || !self.world.is_loaded() {
            return;
        }

        self.liquid.tick_lava(&mut self.world, &mut self.tnt);
        self.liquid.tick_water(&mut self.world);
        self.falling.tick(&mut self.world);
        self.tnt.tick(&mut self.world);

        self.tick_count += 1;
        self.tick_random_blocks();
    }

    /// Notifies the simulators that `block` was placed at `(x, y, z)`.
    ///
    /// Does nothing while disabled, when no placement handler is registered
    /// for `block`, or when the coordinate lies outside the loaded map.
    pub fn on_block_placed(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        self.handle_world_events();
        if !self.enabled || !self.in_bounds(x, y, z) {
            return;
        }

        let index = self.dimensions.index(x, y, z);
        self.callbacks.place(block).invoke(self, index, block);
    }

    /// Writes `block` into the world and then runs [`Self::on_block_placed`].
    ///
    /// Coordinates outside the loaded map are ignored.
    pub fn place_block(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        self.handle_world_events();
        if !self.in_bounds(x, y, z) {
            return;
        }
        self.world.set_block(self.dimensions.index(x, y, z), block);
        self.on_block_placed(x, y, z, block);
    }

    const fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        let dims = self.dimensions;
        x < dims.width && y < dims.height && z < dims.length
    }

    /// Returns true if physics is running.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Turns physics on or off.
    ///
    /// Either way, pending liquid and falling updates are dropped. Pending
    /// explosive fuses are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.clear_queued_events();
        log::debug!("Physics {}", if enabled { "enabled" } else { "disabled" });
    }

    fn clear_queued_events(&mut self) {
        self.liquid.clear();
        self.falling.clear();
    }

    /// Applies every world event raised since the last call.
    ///
    /// Called automatically on entry to [`Self::tick`],
    /// [`Self::on_block_placed`] and [`Self::place_block`].
    pub fn handle_world_events(&mut self) {
        let mut reloaded = false;
        for event in self.world_events.drain() {
            match event {
                WorldEvent::NewMapLoaded => reloaded = true,
            }
        }
        if reloaded {
            self.reset_map();
        }
    }

    fn reset_map(&mut self) {
        let dimensions = self.world.dimensions();
        self.falling.reset_map(dimensions);
        self.liquid.reset_map(dimensions);
        self.tnt.resize(dimensions);
        self.foliage.resize(dimensions);
        self.dimensions = dimensions;
        log::debug!(
            "Physics reset for {}x{}x{} map",
            dimensions.width,
            dimensions.height,
            dimensions.length
        );
    }

    /// Number of ticks processed while enabled and loaded.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The extents cached at the last map load.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The simulated world.
    #[must_use]
    pub const fn world(&self) -> &W {
        &self.world
    }

    /// The simulated world, mutably.
    ///
    /// After replacing the map, raise
    /// [`WorldEvents::raise_new_map_loaded`].
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// The random source shared by the ticker and the handlers.
    pub fn random_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// The callback tables, for registering extra behaviors.
    pub fn callbacks_mut(&mut self) -> &mut BlockCallbacks<W, R> {
        &mut self.callbacks
    }

    /// The liquid simulator.
    #[must_use]
    pub const fn liquid(&self) -> &LiquidPhysics {
        &self.liquid
    }

    /// The liquid simulator, mutably.
    pub fn liquid_mut(&mut self) -> &mut LiquidPhysics {
        &mut self.liquid
    }

    /// The falling block simulator.
    #[must_use]
    pub const fn falling(&self) -> &FallingPhysics {
        &self.falling
    }

    /// The falling block simulator, mutably.
    pub fn falling_mut(&mut self) -> &mut FallingPhysics {
        &mut self.falling
    }

    /// The explosive simulator.
    #[must_use]
    pub const fn tnt(&self) -> &TntPhysics {
        &self.tnt
    }

    /// The explosive simulator, mutably.
    pub fn tnt_mut(&mut self) -> &mut TntPhysics {
        &mut self.tnt
    }
}
