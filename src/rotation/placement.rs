use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::config::RotationConfig;

/// Trajectory of one appearance of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub width: f32,
    pub height: f32,
    /// Pixels per second, right to left.
    pub speed: f32,
    pub layer: u8,
    /// Top edge as a fraction of the canvas height.
    pub band: f32,
    /// Seconds between insertion and the image entering the span.
    pub entry_delay: f64,
    pub cycle: u32,
    traversal: f64,
    // Where in the free bands this appearance lands if its own band is taken.
    reroll: f32,
}

impl Placement {
    /// Same `(id, cycle)` always yields the same placement.
    pub fn derive(id: &str, cycle: u32, config: &RotationConfig) -> Self {
        let mut rng = placement_rng(id, cycle);

        let width = rng.random_range(config.width_min..=config.width_max);
        let height = width * rng.random_range(config.aspect_min..=config.aspect_max);
        let speed = rng.random_range(config.speed_min..=config.speed_max);
        let layer = rng.random_range(1..=config.layers);
        let band = rng.random_range(config.band_min..=config.band_max);
        let entry_delay = rng.random_range(config.stagger_min..=config.stagger_max);
        let reroll = rng.random_range(0.0..1.0);

        Self {
            width,
            height,
            speed,
            layer,
            band,
            entry_delay,
            cycle,
            traversal: f64::from((config.span + width) / speed),
            reroll,
        }
    }

    /// Moves the band into one of the `free` intervals, picked by this
    /// appearance's own draw. Returns false when nothing is free.
    pub fn relocate_band(&mut self, free: &[(f32, f32)]) -> bool {
        let total: f32 = free.iter().map(|(lo, hi)| hi - lo).sum();
        if total <= 0.0 {
            return false;
        }
        let mut offset = self.reroll * total;
        for (lo, hi) in free {
            if offset <= hi - lo {
                self.band = (lo + offset).min(*hi);
                return true;
            }
            offset -= hi - lo;
        }
        // Rounding left the offset just past the last interval.
        match free.last() {
            Some((lo, hi)) => {
                self.band = (lo + hi) * 0.5;
                true
            }
            None => false,
        }
    }

    /// Time from entering the span to fully leaving it.
    pub fn traversal(&self) -> f64 {
        self.traversal
    }
}

fn placement_rng(id: &str, cycle: u32) -> Pcg64Mcg {
    let seed = fnv1a(id.as_bytes()) ^ u64::from(cycle).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    Pcg64Mcg::seed_from_u64(seed)
}

// Stable across platforms and releases, unlike the std hasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Absolute occupancy of the span, `[start, end]` in scheduler seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn overlaps(&self, other: &Window, clearance: f64) -> bool {
        self.start < other.end + clearance && other.start < self.end + clearance
    }
}

// Keeps a relocated band strictly clear of its neighbors despite rounding.
const BAND_MARGIN: f32 = 1e-4;

/// Parts of `[band_min, band_max]` that are at least `band_proximity` away
/// from every band in `occupied`.
pub fn free_bands(occupied: &[f32], config: &RotationConfig) -> Vec<(f32, f32)> {
    let reach = config.band_proximity + BAND_MARGIN;
    let mut blocked: Vec<(f32, f32)> = occupied.iter().map(|b| (b - reach, b + reach)).collect();
    blocked.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut free = Vec::new();
    let mut cursor = config.band_min;
    for (lo, hi) in blocked {
        if lo > cursor {
            free.push((cursor, lo.min(config.band_max)));
        }
        cursor = cursor.max(hi);
        if cursor >= config.band_max {
            break;
        }
    }
    if cursor < config.band_max {
        free.push((cursor, config.band_max));
    }
    free.retain(|(lo, hi)| hi > lo);
    free
}

/// Two images collide when their bands are close and they share the span.
pub fn conflicts(
    a_band: f32,
    a: &Window,
    b_band: f32,
    b: &Window,
    config: &RotationConfig,
) -> bool {
    (a_band - b_band).abs() < config.band_proximity && a.overlaps(b, config.clearance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_reproducible() {
        let config = RotationConfig::default();
        assert_eq!(
            Placement::derive("cenote.jpg", 3, &config),
            Placement::derive("cenote.jpg", 3, &config)
        );
    }

    #[test]
    fn repeated_appearances_differ() {
        let config = RotationConfig::default();
        let placements: Vec<_> = (1..=64)
            .map(|cycle| Placement::derive("roma-norte.png", cycle, &config))
            .collect();
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                assert_ne!((a.width, a.speed, a.band), (b.width, b.speed, b.band));
            }
        }
    }

    #[test]
    fn parameters_stay_in_range() {
        let config = RotationConfig::default();
        for cycle in 1..200 {
            let p = Placement::derive("tulum.webp", cycle, &config);
            assert!((config.width_min..=config.width_max).contains(&p.width));
            assert!(p.height >= p.width * config.aspect_min - 1e-3);
            assert!((config.speed_min..=config.speed_max).contains(&p.speed));
            assert!((1..=config.layers).contains(&p.layer));
            assert!((config.band_min..=config.band_max).contains(&p.band));
            assert!((config.stagger_min..=config.stagger_max).contains(&p.entry_delay));
            let expected = f64::from((config.span + p.width) / p.speed);
            assert!((p.traversal() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn distant_bands_never_conflict() {
        let config = RotationConfig::default();
        let w = Window { start: 0.0, end: 10.0 };
        assert!(!conflicts(0.1, &w, 0.5, &w, &config));
        assert!(conflicts(0.1, &w, 0.11, &w, &config));
    }

    #[test]
    fn clearance_pads_adjacent_windows() {
        let a = Window { start: 0.0, end: 10.0 };
        let b = Window { start: 10.2, end: 20.0 };
        assert!(a.overlaps(&b, 0.5));
        assert!(!a.overlaps(&b, 0.1));
    }

    #[test]
    fn free_bands_skip_occupied_neighborhoods() {
        let config = RotationConfig {
            band_min: 0.0,
            band_max: 1.0,
            band_proximity: 0.1,
            ..RotationConfig::default()
        };
        let free = free_bands(&[0.5, 0.05, 0.55], &config);
        assert_eq!(free.len(), 2);
        assert!(free[0].0 > 0.15 && free[0].1 < 0.4);
        assert!(free[1].0 > 0.65 && (free[1].1 - 1.0).abs() < 1e-6);

        let crowded = free_bands(&[0.1, 0.3, 0.5, 0.7, 0.9], &config);
        assert!(crowded.is_empty());
    }

    #[test]
    fn relocated_band_clears_every_occupant() {
        let config = RotationConfig::default();
        let occupied = [0.1, 0.3, 0.31, 0.6, 0.8];
        let free = free_bands(&occupied, &config);
        for cycle in 1..100 {
            let mut p = Placement::derive("bacalar.jpg", cycle, &config);
            assert!(p.relocate_band(&free));
            assert!((config.band_min..=config.band_max).contains(&p.band));
            for band in occupied {
                assert!((p.band - band).abs() >= config.band_proximity);
            }
        }
        let mut p = Placement::derive("bacalar.jpg", 1, &config);
        assert!(!p.relocate_band(&[]));
    }
}
