use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::types::Player;

const HEX_DIRECTIONS: [Axial; 6] = [
    Axial { q: 1, r: 0 },
    Axial { q: 1, r: -1 },
    Axial { q: 0, r: -1 },
    Axial { q: -1, r: 0 },
    Axial { q: -1, r: 1 },
    Axial { q: 0, r: 1 },
];

const SQUARE_DIRECTIONS: [Cartesian; 8] = [
    Cartesian { x: -1, y: -1 },
    Cartesian { x: 0, y: -1 },
    Cartesian { x: 1, y: -1 },
    Cartesian { x: -1, y: 0 },
    Cartesian { x: 1, y: 0 },
    Cartesian { x: -1, y: 1 },
    Cartesian { x: 0, y: 1 },
    Cartesian { x: 1, y: 1 },
];

/// Grid geometry shared by every board of one kind.
///
/// Coordinates order themselves "closest to top-left first", which is the
/// tie-break order used by the strategies.
pub trait Topology: Copy + Debug + Default + Send + Sync + 'static {
    type Coord: Copy
        + Eq
        + Hash
        + Ord
        + Debug
        + fmt::Display
        + Add<Output = Self::Coord>
        + Serialize
        + Send
        + Sync
        + 'static;

    /// Unit steps walked by the capture rays.
    fn directions() -> &'static [Self::Coord];

    /// Every playable coordinate for `size`, sorted in tie-break order.
    fn shape(size: usize) -> Vec<Self::Coord>;

    /// Discs placed by `setup`.
    fn starting_pattern(size: usize) -> Vec<(Self::Coord, Player)>;

    /// Rows for text rendering: `(indent, cells)` from top to bottom.
    fn layout(size: usize) -> Vec<(usize, Vec<Self::Coord>)>;

    /// Builds a coordinate from a pair: `(q, r)` on hex, `(x, y)` on square.
    fn coord(a: i32, b: i32) -> Self::Coord;
}

/// Axial hex coordinate. `s` is derived so `q + r + s == 0` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axial {
    q: i32,
    r: i32,
}

impl Axial {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Builds from cube components; `None` unless they sum to zero.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        (q + r + s == 0).then_some(Self { q, r })
    }

    pub fn q(self) -> i32 {
        self.q
    }

    pub fn r(self) -> i32 {
        self.r
    }

    pub fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance from the center cell.
    pub fn ring(self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s().abs())
    }
}

impl Add for Axial {
    type Output = Axial;

    fn add(self, rhs: Axial) -> Axial {
        Axial::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Ord for Axial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.r.cmp(&other.r).then_with(|| self.q.cmp(&other.q))
    }
}

impl PartialOrd for Axial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Axial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s())
    }
}

/// Cartesian square coordinate, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: i32,
    pub y: i32,
}

impl Cartesian {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Cartesian {
    type Output = Cartesian;

    fn add(self, rhs: Cartesian) -> Cartesian {
        Cartesian::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Ord for Cartesian {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for Cartesian {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cartesian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Hexagonal board; size `n` is the hexagon of radius `n - 1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hex;

impl Topology for Hex {
    type Coord = Axial;

    fn directions() -> &'static [Axial] {
        &HEX_DIRECTIONS
    }

    fn shape(size: usize) -> Vec<Axial> {
        Self::layout(size)
            .into_iter()
            .flat_map(|(_, row)| row)
            .collect()
    }

    /// Alternating ring around the empty center.
    /// The six cells around the center, three of each colour. Black opens
    /// with exactly three moves, each flipping a single disc.
    fn starting_pattern(_size: usize) -> Vec<(Axial, Player)> {
        const OWNERS: [Player; 6] = [
            Player::Black,
            Player::Black,
            Player::White,
            Player::Black,
            Player::White,
            Player::White,
        ];
        HEX_DIRECTIONS.iter().copied().zip(OWNERS).collect()
    }

    fn layout(size: usize) -> Vec<(usize, Vec<Axial>)> {
        if size == 0 {
            return Vec::new();
        }
        let radius = size as i32 - 1;
        (-radius..=radius)
            .map(|r| {
                let q_min = (-radius).max(-radius - r);
                let q_max = radius.min(radius - r);
                let row = (q_min..=q_max).map(|q| Axial::new(q, r)).collect();
                (r.unsigned_abs() as usize, row)
            })
            .collect()
    }

    fn coord(a: i32, b: i32) -> Axial {
        Axial::new(a, b)
    }
}

/// Square board of `size x size` cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Square;

impl Topology for Square {
    type Coord = Cartesian;

    fn directions() -> &'static [Cartesian] {
        &SQUARE_DIRECTIONS
    }

    fn shape(size: usize) -> Vec<Cartesian> {
        Self::layout(size)
            .into_iter()
            .flat_map(|(_, row)| row)
            .collect()
    }

    /// The usual four-disc cross in the middle: white on the main diagonal.
    fn starting_pattern(size: usize) -> Vec<(Cartesian, Player)> {
        let hi = (size / 2) as i32;
        let lo = hi - 1;
        vec![
            (Cartesian::new(lo, lo), Player::White),
            (Cartesian::new(hi, lo), Player::Black),
            (Cartesian::new(lo, hi), Player::Black),
            (Cartesian::new(hi, hi), Player::White),
        ]
    }

    fn layout(size: usize) -> Vec<(usize, Vec<Cartesian>)> {
        let n = size as i32;
        (0..n)
            .map(|y| (0, (0..n).map(|x| Cartesian::new(x, y)).collect()))
            .collect()
    }

    fn coord(a: i32, b: i32) -> Cartesian {
        Cartesian::new(a, b)
    }
}
