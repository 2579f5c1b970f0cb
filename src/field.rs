//! Spatial field: occupancy grid and adjacency queries.

use crate::animal::AnimalId;
use rand::Rng;

/// A (row, column) coordinate on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    /// Create a new location
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Neighbor offsets, clockwise starting north.
const RING: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Occupancy grid holding at most one animal per cell.
#[derive(Clone, Debug)]
pub struct Field {
    depth: usize,
    width: usize,
    /// cells[row * width + col] holds the occupant's id, if any
    cells: Vec<Option<AnimalId>>,
}

impl Field {
    /// Create an empty field with the given dimensions.
    ///
    /// Panics if either dimension is zero.
    pub fn new(depth: usize, width: usize) -> Self {
        assert!(depth > 0 && width > 0, "field dimensions must be positive");
        Self {
            depth,
            width,
            cells: vec![None; depth * width],
        }
    }

    /// Number of rows
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells
    #[inline]
    pub fn area(&self) -> usize {
        self.depth * self.width
    }

    #[inline]
    fn offset(&self, location: Location) -> usize {
        assert!(
            location.row < self.depth && location.col < self.width,
            "location ({}, {}) outside {}x{} field",
            location.row,
            location.col,
            self.depth,
            self.width
        );
        location.row * self.width + location.col
    }

    /// Remove any occupant at the given location. No-op if the cell is empty.
    #[inline]
    pub fn clear(&mut self, location: Location) {
        let offset = self.offset(location);
        self.cells[offset] = None;
    }

    /// Record an animal as occupying the given location.
    ///
    /// Overwrites any previous occupant reference; callers clear the cell
    /// first to keep the one-occupant-per-cell invariant.
    #[inline]
    pub fn place(&mut self, id: AnimalId, location: Location) {
        let offset = self.offset(location);
        self.cells[offset] = Some(id);
    }

    /// Get the occupant at a location, if any
    #[inline]
    pub fn occupant(&self, location: Location) -> Option<AnimalId> {
        self.cells[self.offset(location)]
    }

    /// Check if a cell is unoccupied
    #[inline]
    pub fn is_free(&self, location: Location) -> bool {
        self.occupant(location).is_none()
    }

    /// Count occupied cells across the whole field
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// In-bounds locations adjacent to `location`.
    ///
    /// The 8-neighbor ring is walked clockwise from a starting index drawn
    /// from `rng`, so repeated scans accumulate no directional bias while
    /// the sequence stays fully determined by the generator state.
    /// Out-of-bounds neighbors are dropped; there is no wraparound.
    pub fn adjacent_locations<R: Rng>(&self, location: Location, rng: &mut R) -> Vec<Location> {
        let start = rng.gen_range(0..RING.len());
        let mut locations = Vec::with_capacity(RING.len());
        for i in 0..RING.len() {
            let (row_offset, col_offset) = RING[(start + i) % RING.len()];
            let row = location.row as isize + row_offset;
            let col = location.col as isize + col_offset;
            if row >= 0 && row < self.depth as isize && col >= 0 && col < self.width as isize {
                locations.push(Location::new(row as usize, col as usize));
            }
        }
        locations
    }

    /// Adjacent locations that are currently unoccupied
    pub fn free_adjacent_locations<R: Rng>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Vec<Location> {
        self.adjacent_locations(location, rng)
            .into_iter()
            .filter(|&candidate| self.is_free(candidate))
            .collect()
    }

    /// First free adjacent location in this call's scan order, if any
    pub fn free_adjacent_location<R: Rng>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Option<Location> {
        self.free_adjacent_locations(location, rng)
            .into_iter()
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_place_and_clear() {
        let mut field = Field::new(10, 10);
        let loc = Location::new(3, 4);

        assert!(field.is_free(loc));
        field.place(7, loc);
        assert_eq!(field.occupant(loc), Some(7));
        assert_eq!(field.occupied_count(), 1);

        field.clear(loc);
        assert!(field.is_free(loc));
        assert_eq!(field.occupied_count(), 0);

        // Clearing an empty cell is a no-op
        field.clear(loc);
        assert!(field.is_free(loc));
    }

    #[test]
    fn test_adjacency_interior() {
        let field = Field::new(10, 10);
        let mut rng = rng();

        let adjacent = field.adjacent_locations(Location::new(5, 5), &mut rng);
        assert_eq!(adjacent.len(), 8);

        // All eight neighbors present, regardless of rotation
        for row in 4..=6 {
            for col in 4..=6 {
                let loc = Location::new(row, col);
                if loc != Location::new(5, 5) {
                    assert!(adjacent.contains(&loc));
                }
            }
        }
    }

    #[test]
    fn test_adjacency_corner_and_edge() {
        let field = Field::new(10, 10);
        let mut rng = rng();

        let corner = field.adjacent_locations(Location::new(0, 0), &mut rng);
        assert_eq!(corner.len(), 3);

        let edge = field.adjacent_locations(Location::new(0, 5), &mut rng);
        assert_eq!(edge.len(), 5);
    }

    #[test]
    fn test_adjacency_degenerate_grid() {
        let field = Field::new(1, 1);
        let mut rng = rng();

        let adjacent = field.adjacent_locations(Location::new(0, 0), &mut rng);
        assert!(adjacent.is_empty());
        assert!(field
            .free_adjacent_location(Location::new(0, 0), &mut rng)
            .is_none());
    }

    #[test]
    fn test_adjacency_deterministic_given_seed() {
        let field = Field::new(10, 10);
        let mut rng1 = rng();
        let mut rng2 = rng();

        for _ in 0..20 {
            let a = field.adjacent_locations(Location::new(5, 5), &mut rng1);
            let b = field.adjacent_locations(Location::new(5, 5), &mut rng2);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_free_adjacent_filtering() {
        let mut field = Field::new(3, 3);
        let mut rng = rng();
        let center = Location::new(1, 1);

        // Occupy all but one neighbor
        for row in 0..3 {
            for col in 0..3 {
                let loc = Location::new(row, col);
                if loc != center && loc != Location::new(0, 0) {
                    field.place((row * 3 + col) as u64, loc);
                }
            }
        }

        let free = field.free_adjacent_locations(center, &mut rng);
        assert_eq!(free, vec![Location::new(0, 0)]);
        assert_eq!(
            field.free_adjacent_location(center, &mut rng),
            Some(Location::new(0, 0))
        );
    }

    #[test]
    #[should_panic(expected = "field dimensions must be positive")]
    fn test_zero_dimension_rejected() {
        Field::new(0, 10);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_place_rejected() {
        let mut field = Field::new(5, 5);
        field.place(1, Location::new(5, 0));
    }
}
