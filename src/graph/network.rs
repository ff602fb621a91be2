use crate::types::Edge;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SOURCE: &str = "A";
pub const SINK: &str = "T";

pub const DEFAULT_MIN_CAPACITY: u64 = 5;
pub const DEFAULT_MAX_CAPACITY: u64 = 15;

/// The road network of the traffic quiz: a lattice of nine junctions
/// leading from `A` to `T`.
pub const TOPOLOGY: [(&str, &str); 13] = [
    ("A", "B"),
    ("A", "C"),
    ("A", "D"),
    ("B", "E"),
    ("B", "F"),
    ("C", "E"),
    ("C", "F"),
    ("D", "F"),
    ("E", "G"),
    ("E", "H"),
    ("F", "H"),
    ("G", "T"),
    ("H", "T"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityRangeError {
    pub min: u64,
    pub max: u64,
}

impl Error for CapacityRangeError {}

impl Display for CapacityRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid capacity range: min {} is larger than max {}",
            self.min, self.max
        )
    }
}

/// Assigns every edge of `TOPOLOGY` a capacity drawn uniformly from `min..=max`.
pub fn generate_network<R: Rng>(
    min_capacity: u64,
    max_capacity: u64,
    rng: &mut R,
) -> Result<Vec<Edge>, CapacityRangeError> {
    if min_capacity > max_capacity {
        return Err(CapacityRangeError {
            min: min_capacity,
            max: max_capacity,
        });
    }
    Ok(TOPOLOGY
        .iter()
        .map(|(from, to)| Edge::new(from, to, rng.gen_range(min_capacity..=max_capacity)))
        .collect())
}
