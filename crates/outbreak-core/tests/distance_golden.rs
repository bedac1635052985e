//! Golden-value checks for distance fields over a fixed obstacle course.
//!
//! The course is a 20x30 grid crossed by an L-shaped wall. The expected
//! matrices pin down every cell of the field, sentinels included.

use outbreak_core::{Apocalypse, DistanceField, EntityKind, OutbreakConfig};
use outbreak_grid::Cell;

const WALL: [(u32, u32); 17] = [
    (4, 15),
    (5, 15),
    (6, 15),
    (7, 15),
    (8, 15),
    (9, 15),
    (10, 15),
    (11, 15),
    (12, 15),
    (13, 15),
    (14, 15),
    (15, 15),
    (15, 14),
    (15, 13),
    (15, 12),
    (15, 11),
    (15, 10),
];

const HUMAN_SEEDED: [[u32; 30]; 20] = [
    [24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 5, 6, 7, 8, 9],
    [23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 5, 6, 7, 8],
    [22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 3, 4, 5, 6, 7],
    [23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 5, 6, 7, 8],
    [24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 600, 8, 7, 6, 5, 4, 3, 2, 3, 3, 4, 5, 6, 7, 8],
    [25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 600, 9, 8, 7, 6, 5, 4, 3, 3, 2, 3, 4, 5, 6, 7],
    [26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 600, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 5, 6],
    [25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 17, 16, 15, 14, 13, 600, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 3, 4, 5],
    [24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 16, 17, 16, 15, 14, 600, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 5, 6],
    [23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 15, 16, 17, 16, 15, 600, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 5, 6, 7],
    [22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 14, 15, 16, 17, 16, 600, 10, 10, 9, 8, 7, 6, 5, 4, 3, 4, 5, 6, 7, 8],
    [21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 13, 14, 15, 16, 17, 600, 9, 10, 9, 8, 7, 6, 5, 4, 3, 4, 5, 6, 7, 8],
    [20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 12, 13, 14, 15, 16, 600, 8, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 5, 6, 7],
    [19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 11, 12, 13, 14, 15, 600, 7, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 5, 6],
    [18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 10, 11, 12, 13, 14, 600, 6, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 3, 4, 5],
    [17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 600, 600, 600, 600, 600, 600, 5, 6, 5, 4, 3, 4, 3, 2, 1, 2, 3, 4, 5, 6],
    [16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 5, 4, 3, 2, 3, 4, 3, 2, 3, 4, 5, 6, 7],
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 3, 2, 1, 2, 3, 4, 3, 4, 5, 6, 7, 8],
    [14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 3, 2, 1, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 3, 2, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
];

const ZOMBIE_SEEDED: [[u32; 30]; 20] = [
    [19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24],
    [18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
    [17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22],
    [16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 4, 5, 600, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22],
    [14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 600, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
    [13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 600, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24],
    [12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 600, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25],
    [13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 600, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26],
    [14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 600, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27],
    [14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 600, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28],
    [13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 600, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29],
    [12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2, 600, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30],
    [13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 2, 3, 600, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30],
    [14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 3, 4, 600, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29],
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 600, 600, 600, 600, 600, 600, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28],
    [16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27],
    [17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28],
    [18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29],
    [19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30],
];

fn cells(coords: &[(u32, u32)]) -> Vec<Cell> {
    coords.iter().map(|&(r, c)| Cell::new(r, c)).collect()
}

fn course(zombies: &[(u32, u32)], humans: &[(u32, u32)]) -> Apocalypse {
    let config = OutbreakConfig {
        grid_height: 20,
        grid_width: 30,
        rng_seed: Some(0),
        ..OutbreakConfig::default()
    };
    Apocalypse::with_entities(config, &cells(&WALL), &cells(zombies), &cells(humans))
        .expect("fixture world")
}

fn assert_matches(field: &DistanceField, expected: &[[u32; 30]; 20]) {
    assert_eq!(field.height(), 20);
    assert_eq!(field.width(), 30);
    assert_eq!(field.sentinel(), 600);
    for (row, (got, want)) in field.rows().zip(expected.iter()).enumerate() {
        assert_eq!(got, &want[..], "distances diverged in row {row}");
    }
}

#[test]
fn human_seeded_field_matches_golden_matrix() {
    let world = course(&[], &[(18, 14), (18, 20), (14, 24), (7, 24), (2, 22)]);
    let field = world.compute_distance_field(EntityKind::Human);
    assert_matches(&field, &HUMAN_SEEDED);
}

#[test]
fn zombie_seeded_field_matches_golden_matrix() {
    let world = course(&[(12, 12), (7, 12)], &[]);
    let field = world.compute_distance_field(EntityKind::Zombie);
    assert_matches(&field, &ZOMBIE_SEEDED);
}

#[test]
fn course_walls_always_hold_the_sentinel() {
    let world = course(&[(12, 12), (7, 12)], &[(18, 14)]);
    for kind in [EntityKind::Human, EntityKind::Zombie] {
        let field = world.compute_distance_field(kind);
        for &(row, col) in &WALL {
            assert_eq!(
                field.get(Cell::new(row, col)),
                Some(field.sentinel()),
                "wall cell ({row}, {col}) must stay unreached"
            );
        }
    }
}

#[test]
fn seeds_sit_at_distance_zero() {
    let humans = [(18, 14), (18, 20), (14, 24), (7, 24), (2, 22)];
    let world = course(&[], &humans);
    let field = world.compute_distance_field(EntityKind::Human);
    for &(row, col) in &humans {
        assert_eq!(field.get(Cell::new(row, col)), Some(0));
    }
}
