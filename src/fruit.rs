//! Fruit catalog and falling fruit instances.

use rand::Rng;

use crate::config::RoundConfig;

/// Static catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FruitKind {
    pub id: &'static str,
    pub glyph: &'static str,
    pub points: u32,
}

pub const FRUIT_KINDS: &[FruitKind] = &[
    FruitKind { id: "apple", glyph: "🍎", points: 10 },
    FruitKind { id: "banana", glyph: "🍌", points: 8 },
    FruitKind { id: "strawberry", glyph: "🍓", points: 12 },
    FruitKind { id: "orange", glyph: "🍊", points: 9 },
    FruitKind { id: "grape", glyph: "🍇", points: 11 },
];

/// Look up a catalog entry by identifier.
pub fn kind(id: &str) -> Option<&'static FruitKind> {
    FRUIT_KINDS.iter().find(|k| k.id == id)
}

/// Removal key for a live fruit. Allocated from a per-session counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FruitId(pub u64);

/// One falling fruit. `x`/`y` are percentages of the play area (centre of the
/// fruit), `size` is a pixel diameter, `speed` is percent per frame before the
/// fall-rate multiplier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fruit {
    pub id: FruitId,
    pub kind: &'static FruitKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
}

impl Fruit {
    /// Roll a fresh fruit just above the play area.
    pub fn spawn<R: Rng + ?Sized>(id: FruitId, cfg: &RoundConfig, rng: &mut R) -> Self {
        let kind = &FRUIT_KINDS[rng.gen_range(0..FRUIT_KINDS.len())];
        Self {
            id,
            kind,
            x: rng.gen_range(cfg.spawn_x.clone()),
            y: cfg.spawn_y,
            size: rng.gen_range(cfg.size_px.clone()),
            speed: rng.gen_range(cfg.speed.clone()),
        }
    }

    /// Half extents of the hit box in percent space for a play area of
    /// `area_w` x `area_h` pixels.
    pub fn hit_extent(&self, area_w: f64, area_h: f64, tolerance: f64) -> (f64, f64) {
        let radius = self.size / 2.0;
        (
            radius / area_w * 100.0 + tolerance,
            radius / area_h * 100.0 + tolerance,
        )
    }

    pub fn contains(&self, px: f64, py: f64, area_w: f64, area_h: f64, tolerance: f64) -> bool {
        let (hx, hy) = self.hit_extent(area_w, area_h, tolerance);
        (self.x - px).abs() < hx && (self.y - py).abs() < hy
    }
}
