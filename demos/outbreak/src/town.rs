//! Synthetic town used by the demo.
//!
//! A 6 × 6 grid of places about 280 m apart, mostly homes, with every
//! non-home place type present at least once.  Grid neighbours are joined
//! by roads whose length is the great-circle distance between them.

use et_core::{GeoPoint, PlaceType};
use et_town::{Town, TownBuilder, TownMetadata, TownResult};

const SIDE:      usize = 6;
const STEP_DEG:  f32   = 0.0025;
const ORIGIN:    (f32, f32) = (43.7300, -79.7600);

/// Repeating row pattern; homes on every other cell.
const LAYOUT: [PlaceType; 9] = [
    PlaceType::Accommodation,
    PlaceType::Commercial,
    PlaceType::Accommodation,
    PlaceType::Workplace,
    PlaceType::Accommodation,
    PlaceType::Education,
    PlaceType::Accommodation,
    PlaceType::Religious,
    PlaceType::Accommodation,
];

/// Cells overriding the layout.
const HEALTHCARE_CELL: usize = 14;
const OTHER_CELL:      usize = 21;

pub fn build_town() -> TownResult<Town> {
    let center = GeoPoint::new(
        ORIGIN.0 + STEP_DEG * (SIDE as f32 - 1.0) / 2.0,
        ORIGIN.1 + STEP_DEG * (SIDE as f32 - 1.0) / 2.0,
    );
    let metadata = TownMetadata { origin: center, radius_m: 1_000.0, epsg_code: 4326 };
    let mut b = TownBuilder::with_capacity(SIDE * SIDE, 4 * SIDE * SIDE).metadata(metadata);

    let mut grid = Vec::with_capacity(SIDE * SIDE);
    for cell in 0..SIDE * SIDE {
        let (row, col) = (cell / SIDE, cell % SIDE);
        let place = match cell {
            HEALTHCARE_CELL => PlaceType::HealthcareFacility,
            OTHER_CELL => PlaceType::Other,
            _ => LAYOUT[cell % LAYOUT.len()],
        };
        let pos = GeoPoint::new(ORIGIN.0 + row as f32 * STEP_DEG, ORIGIN.1 + col as f32 * STEP_DEG);
        grid.push(b.add_node(pos, place));
    }

    for row in 0..SIDE {
        for col in 0..SIDE {
            let here = grid[row * SIDE + col];
            if col + 1 < SIDE {
                b.connect(here, grid[row * SIDE + col + 1]);
            }
            if row + 1 < SIDE {
                b.connect(here, grid[(row + 1) * SIDE + col]);
            }
        }
    }

    b.build()
}
