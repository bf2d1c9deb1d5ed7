use std::collections::{BTreeMap, HashMap, HashSet};

use rand::seq::{IndexedRandom, index};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::RotationConfig;
use crate::rotation::placement::{Placement, Window, conflicts, free_bands};
use crate::rotation::state::RotationState;
use crate::rotation::timers::ExpiryTimers;

/// A working-set member for one appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlacement {
    pub id: String,
    pub placement: Placement,
    pub inserted_at: f64,
}

impl ActivePlacement {
    pub fn entry_at(&self) -> f64 {
        self.inserted_at + self.placement.entry_delay
    }

    pub fn expires_at(&self) -> f64 {
        self.entry_at() + self.placement.traversal()
    }

    pub fn window(&self) -> Window {
        Window {
            start: self.entry_at(),
            end: self.expires_at(),
        }
    }

    /// 0.0 entering on the right edge, 1.0 gone past the left edge.
    pub fn progress(&self, now: f64) -> f32 {
        ((now - self.entry_at()) / self.placement.traversal()).clamp(0.0, 1.0) as f32
    }
}

/// Keeps a bounded, collision-free stream of images crossing the view.
///
/// Time is whatever clock the caller passes to [`tick`](Self::tick), in
/// seconds; the scheduler never reads the wall clock itself.
pub struct RotationScheduler {
    config: RotationConfig,
    state: RotationState,
    catalog: Vec<String>,
    active: BTreeMap<String, ActivePlacement>,
    appearances: HashMap<String, u32>,
    timers: ExpiryTimers,
    target: usize,
    rng: Pcg64Mcg,
}

impl RotationScheduler {
    pub fn new(config: RotationConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Fixed seed for the selection RNG; placements are seeded per identifier anyway.
    pub fn with_seed(config: RotationConfig, seed: u64) -> Self {
        Self {
            config,
            state: RotationState::Uninitialized,
            catalog: Vec::new(),
            active: BTreeMap::new(),
            appearances: HashMap::new(),
            timers: ExpiryTimers::new(),
            target: 0,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Floor actually enforced: the configured one, capped to the catalog.
    pub fn floor(&self) -> usize {
        self.config.floor.min(self.catalog.len())
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn get(&self, id: &str) -> Option<&ActivePlacement> {
        self.active.get(id)
    }

    pub fn active(&self) -> impl Iterator<Item = &ActivePlacement> {
        self.active.values()
    }

    pub fn appearances(&self, id: &str) -> u32 {
        self.appearances.get(id).copied().unwrap_or(0)
    }

    /// Placements on screen at `now`, back to front.
    pub fn visible(&self, now: f64) -> Vec<&ActivePlacement> {
        let mut visible: Vec<_> = self
            .active
            .values()
            .filter(|a| a.entry_at() <= now && now < a.expires_at())
            .collect();
        visible.sort_by(|a, b| a.placement.layer.cmp(&b.placement.layer).then_with(|| a.id.cmp(&b.id)));
        visible
    }

    /// Catalog arrived: choose the first working set. Later calls are ignored.
    pub fn on_catalog_ready(&mut self, catalog: Catalog, now: f64) {
        if self.state != RotationState::Uninitialized {
            debug!(state = ?self.state, "catalog already handled");
            return;
        }
        self.state = RotationState::Seeding;

        let mut seen = HashSet::new();
        self.catalog = catalog
            .into_images()
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let wanted = self.rng.random_range(self.config.target_min..=self.config.target_max);
        self.target = wanted.min(self.catalog.len());
        self.seed(self.target, now);

        self.state = RotationState::Steady;
        info!(catalog = self.catalog.len(), target = self.target, "rotation seeded");
    }

    /// Fires every timer due at or before `now`. Returns how many images were replaced.
    pub fn tick(&mut self, now: f64) -> usize {
        if self.state != RotationState::Steady {
            return 0;
        }

        let mut replaced = 0;
        while let Some((id, due)) = self.timers.pop_due(now) {
            self.active.remove(&id);
            if let Some(next) = self.choose_replacement(&id) {
                self.admit(next, due);
            }
            replaced += 1;
        }
        self.heal(now);
        replaced
    }

    /// Drops an identifier for the rest of the session, e.g. when its image
    /// cannot be decoded, and tops the working set back up right away.
    pub fn forget(&mut self, id: &str, now: f64) {
        self.catalog.retain(|c| c != id);
        self.target = self.target.min(self.catalog.len());
        self.timers.cancel(id);
        if self.active.remove(id).is_some() {
            debug!(id, "forgot active image");
        }
        if self.state == RotationState::Steady {
            self.heal(now);
        }
    }

    /// Cancels every timer. Nothing mutates the working set afterwards.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.active.clear();
        self.state = RotationState::TornDown;
        debug!("rotation torn down");
    }

    fn heal(&mut self, now: f64) {
        let floor = self.floor();
        if self.active.len() < floor {
            let missing = self.target.max(floor) - self.active.len();
            debug!(active = self.active.len(), floor, missing, "working set under floor, topping up");
            self.seed(missing, now);
        }
    }

    // Candidates are finalized one at a time in selection order, each against
    // everything admitted before it.
    fn seed(&mut self, count: usize, now: f64) {
        let idle: Vec<usize> = (0..self.catalog.len())
            .filter(|&i| !self.active.contains_key(&self.catalog[i]))
            .collect();
        let count = count.min(idle.len());
        let picks: Vec<String> = index::sample(&mut self.rng, idle.len(), count)
            .iter()
            .map(|i| self.catalog[idle[i]].clone())
            .collect();
        for id in picks {
            self.admit(id, now);
        }
    }

    fn choose_replacement(&mut self, evicted: &str) -> Option<String> {
        let idle: Vec<&String> = self
            .catalog
            .iter()
            .filter(|id| id.as_str() != evicted && !self.active.contains_key(id.as_str()))
            .collect();
        match idle.choose(&mut self.rng) {
            Some(id) => Some((*id).clone()),
            None if self.catalog.iter().any(|id| id == evicted) => Some(evicted.to_string()),
            None => None,
        }
    }

    fn admit(&mut self, id: String, inserted_at: f64) {
        let cycle = self.appearances.entry(id.clone()).or_insert(0);
        *cycle += 1;
        let mut placement = Placement::derive(&id, *cycle, &self.config);

        // A taken band moves elsewhere before the entry is pushed back.
        let natural = inserted_at + placement.entry_delay;
        if self.resolve_start(natural, &placement) > natural {
            let occupied = self.bands_sharing_span(natural, &placement);
            let drawn = placement.band;
            if placement.relocate_band(&free_bands(&occupied, &self.config)) {
                debug!(image = %id, from = drawn, to = placement.band, "moved to a free band");
            }
        }
        let start = self.resolve_start(natural, &placement);
        placement.entry_delay = start - inserted_at;

        let active = ActivePlacement {
            id: id.clone(),
            placement,
            inserted_at,
        };
        self.timers.schedule(&id, active.expires_at());
        self.active.insert(id, active);
    }

    fn bands_sharing_span(&self, start: f64, placement: &Placement) -> Vec<f32> {
        let window = Window {
            start,
            end: start + placement.traversal(),
        };
        self.active
            .values()
            .filter(|other| window.overlaps(&other.window(), self.config.clearance))
            .map(|other| other.placement.band)
            .collect()
    }

    /// Earliest start at or after `start` that collides with nothing active.
    fn resolve_start(&self, mut start: f64, placement: &Placement) -> f64 {
        loop {
            let candidate = Window {
                start,
                end: start + placement.traversal(),
            };
            let blocking = self
                .active
                .values()
                .filter(|other| conflicts(placement.band, &candidate, other.placement.band, &other.window(), &self.config))
                .map(|other| other.expires_at())
                .fold(None, |acc: Option<f64>, end| Some(acc.map_or(end, |a| a.min(end))));
            match blocking {
                Some(end) => start = end + self.config.clearance,
                None => return start,
            }
        }
    }
}
