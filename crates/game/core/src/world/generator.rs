//! Static terrain: wall rings plus rejection-sampled scenery.
//!
//! Layout is fixed (perimeter ring, the walled city with one gate per side,
//! two broken ruin lines); scenery content is random. Scattering is best
//! effort: a class that runs out of attempts simply ends up with fewer pieces
//! and the shortfall is reported.

use crate::config::GameConfig;
use crate::env::GameRng;
use crate::state::{Decoration, DecorationKind, IdAllocator, Position};

/// Result of one scatter pass over a decoration class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScatterOutcome {
    pub kind: DecorationKind,
    pub requested: usize,
    pub placed: usize,
    pub attempts: u32,
}

impl ScatterOutcome {
    pub fn is_exhausted(&self) -> bool {
        self.placed < self.requested
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub walls: usize,
    pub scattered: Vec<ScatterOutcome>,
}

impl GenerationReport {
    pub fn shortfalls(&self) -> impl Iterator<Item = &ScatterOutcome> {
        self.scattered.iter().filter(|outcome| outcome.is_exhausted())
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    pub decorations: Vec<Decoration>,
    pub report: GenerationReport,
}

struct ScatterClass {
    kind: DecorationKind,
    count: usize,
    /// Positions are drawn from `[0, map_size - margin)`.
    margin: f32,
    scale_min: f32,
    scale_spread: f32,
}

const SCATTER_CLASSES: [ScatterClass; 3] = [
    ScatterClass {
        kind: DecorationKind::Water,
        count: GameConfig::WATER_COUNT,
        margin: 100.0,
        scale_min: 0.8,
        scale_spread: 0.5,
    },
    ScatterClass {
        kind: DecorationKind::Tree,
        count: GameConfig::TREE_COUNT,
        margin: 0.0,
        scale_min: 0.8,
        scale_spread: 0.4,
    },
    ScatterClass {
        kind: DecorationKind::Rock,
        count: GameConfig::ROCK_COUNT,
        margin: 0.0,
        scale_min: 0.5,
        scale_spread: 0.5,
    },
];

/// Builds the terrain for a new world.
pub fn generate(config: &GameConfig, rng: &mut GameRng, ids: &mut IdAllocator) -> GeneratedWorld {
    let mut decorations = Vec::new();
    let mut report = GenerationReport::default();

    for position in wall_layout(config) {
        decorations.push(Decoration::wall(ids.decoration(), position));
    }
    report.walls = decorations.len();

    for class in &SCATTER_CLASSES {
        let outcome = scatter(config, rng, ids, class, &mut decorations);
        report.scattered.push(outcome);
    }

    GeneratedWorld {
        decorations,
        report,
    }
}

fn wall_layout(config: &GameConfig) -> Vec<Position> {
    let block = GameConfig::WALL_SIZE;
    let mut walls: Vec<Position> = Vec::new();
    let mut add = |x: f32, y: f32| {
        let position = Position::new(x, y);
        if !walls.contains(&position) {
            walls.push(position);
        }
    };

    // Perimeter ring.
    let far = config.map_size - block;
    let mut along = 0.0;
    while along <= far {
        add(along, 0.0);
        add(along, far);
        add(0.0, along);
        add(far, along);
        along += block;
    }

    // City ring with a gate straddling the center line of each side.
    let (start, end) = (GameConfig::CITY_START, GameConfig::CITY_END);
    let center = config.map_size / 2.0;
    let mut along = start;
    while along <= end {
        if (along - center).abs() > GameConfig::GATE_HALF_WIDTH {
            add(along, start);
            add(along, end);
            add(start, along);
            add(end, along);
        }
        along += block;
    }

    // Ruins: two vertical lines broken level with the city.
    let mut y = 100.0;
    while y < 700.0 {
        if !(GameConfig::SPAWN_EXCLUSION_MIN..=GameConfig::SPAWN_EXCLUSION_MAX).contains(&y) {
            add(200.0, y);
            add(600.0, y);
        }
        y += block;
    }

    walls
}

fn inside_city(position: Position) -> bool {
    let span = GameConfig::CITY_START..=GameConfig::CITY_END + GameConfig::WALL_SIZE;
    span.contains(&position.x) && span.contains(&position.y)
}

fn scatter(
    config: &GameConfig,
    rng: &mut GameRng,
    ids: &mut IdAllocator,
    class: &ScatterClass,
    decorations: &mut Vec<Decoration>,
) -> ScatterOutcome {
    let mut outcome = ScatterOutcome {
        kind: class.kind,
        requested: class.count,
        placed: 0,
        attempts: 0,
    };
    let extent = config.map_size - class.margin;

    while outcome.placed < class.count && outcome.attempts < config.decoration_attempts {
        outcome.attempts += 1;
        let candidate = Position::new(rng.range_f32(0.0, extent), rng.range_f32(0.0, extent));
        if inside_city(candidate) {
            continue;
        }
        let crowded = decorations
            .iter()
            .any(|other| other.position.distance(candidate) < config.decoration_clearance);
        if crowded {
            continue;
        }

        let scale = class.scale_min + rng.unit() as f32 * class.scale_spread;
        decorations.push(Decoration::new(ids.decoration(), class.kind, candidate, scale));
        outcome.placed += 1;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_with_seed(seed: u64) -> GeneratedWorld {
        let mut rng = GameRng::seed_from_u64(seed);
        let mut ids = IdAllocator::new();
        generate(&GameConfig::default(), &mut rng, &mut ids)
    }

    #[test]
    fn same_seed_reproduces_terrain() {
        let a = generate_with_seed(9);
        let b = generate_with_seed(9);
        assert_eq!(a.decorations, b.decorations);
    }

    #[test]
    fn walls_form_rings_with_open_gates() {
        let world = generate_with_seed(1);
        let walls: Vec<_> = world
            .decorations
            .iter()
            .filter(|d| d.kind == DecorationKind::Wall)
            .map(|d| d.position)
            .collect();

        assert_eq!(walls.len(), world.report.walls);
        assert!(walls.contains(&Position::new(0.0, 0.0)));
        assert!(walls.contains(&Position::new(768.0, 768.0)));
        assert!(walls.contains(&Position::new(300.0, 300.0)));
        assert!(walls.contains(&Position::new(492.0, 500.0)));
        // Gate columns are empty on the top side of the city.
        assert!(!walls.contains(&Position::new(396.0, 300.0)));
        assert!(!walls.contains(&Position::new(364.0, 300.0)));
        // No duplicate blocks.
        for (i, a) in walls.iter().enumerate() {
            assert!(walls[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn scenery_respects_city_and_clearance() {
        let world = generate_with_seed(5);
        let config = GameConfig::default();
        let scenery: Vec<_> = world
            .decorations
            .iter()
            .filter(|d| d.kind != DecorationKind::Wall)
            .collect();

        assert!(!scenery.is_empty());
        for (i, piece) in world.decorations.iter().enumerate() {
            if piece.kind == DecorationKind::Wall {
                continue;
            }
            assert!(!inside_city(piece.position));
            for earlier in &world.decorations[..i] {
                assert!(piece.position.distance(earlier.position) >= config.decoration_clearance);
            }
        }
    }

    #[test]
    fn exhausted_class_is_reported_not_fatal() {
        let mut config = GameConfig::default();
        config.decoration_attempts = 3;
        let mut rng = GameRng::seed_from_u64(2);
        let mut ids = IdAllocator::new();

        let world = generate(&config, &mut rng, &mut ids);

        let trees = world
            .report
            .scattered
            .iter()
            .find(|o| o.kind == DecorationKind::Tree)
            .unwrap();
        assert!(trees.is_exhausted());
        assert_eq!(trees.attempts, 3);
        assert!(world.report.shortfalls().count() >= 1);
    }
}
