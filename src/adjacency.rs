//! Keyboard adjacency model used by the spatial matcher.
//!
//! Layouts are written as rows of key tokens (unshifted char followed by
//! its shifted variant, or a single char for keypads) and compiled into
//! per-character neighbour lists at construction time. The compiled graphs
//! are read-only and safe to share across concurrent evaluations.

use std::collections::{HashMap, HashSet};

// Slanted layouts indent each row half a key to the right of the one
// above, so every key has up to six neighbours. Aligned layouts (keypads)
// have up to eight.
const QWERTY: &str = "
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \\|
     aA sS dD fF gG hH jJ kK lL ;: '\"
      zZ xX cC vV bB nN mM ,< .> /?
";

const DVORAK: &str = "
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}
    '\" ,< .> pP yY fF gG cC rR lL /? =+ \\|
     aA oO eE uU iI dD hH tT nN sS -_
      ;: qQ jJ kK xX bB mM wW vV zZ
";

const KEYPAD: &str = "
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .
";

const MAC_KEYPAD: &str = "
  = / *
7 8 9 -
4 5 6 +
1 2 3
  0 .
";

/// Neighbour offsets for slanted rows. List position encodes direction
/// (left, up-left, up-right, right, down-right, down-left), which the
/// spatial matcher relies on to count turns.
const SLANTED_COORDS: [(isize, isize); 6] = [(-1, 0), (0, -1), (1, -1), (1, 0), (0, 1), (-1, 1)];

const ALIGNED_COORDS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// A compiled keyboard layout: for every character, the key tokens on the
/// physically adjacent positions (`None` where there is no key).
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    name: &'static str,
    graph: HashMap<char, Vec<Option<String>>>,
    shifted: HashSet<char>,
}

impl AdjacencyGraph {
    pub fn qwerty() -> Self {
        Self::build("qwerty", QWERTY, true)
    }

    pub fn dvorak() -> Self {
        Self::build("dvorak", DVORAK, true)
    }

    pub fn keypad() -> Self {
        Self::build("keypad", KEYPAD, false)
    }

    pub fn mac_keypad() -> Self {
        Self::build("mac_keypad", MAC_KEYPAD, false)
    }

    /// The four standard layouts, in a fixed order.
    pub fn standard_layouts() -> Vec<AdjacencyGraph> {
        vec![
            Self::qwerty(),
            Self::dvorak(),
            Self::keypad(),
            Self::mac_keypad(),
        ]
    }

    fn build(name: &'static str, layout: &str, slanted: bool) -> Self {
        let token_size = layout
            .split_whitespace()
            .next()
            .map(str::len)
            .unwrap_or(1) as isize;
        let x_unit = token_size + 1;
        let coords: &[(isize, isize)] = if slanted {
            &SLANTED_COORDS
        } else {
            &ALIGNED_COORDS
        };

        // Layout text is ASCII, so byte offsets are column numbers.
        let mut positions: HashMap<(isize, isize), &str> = HashMap::new();
        for (y, line) in layout.lines().enumerate() {
            let y = y as isize;
            let slant = if slanted { y - 1 } else { 0 };
            let bytes = line.as_bytes();
            let mut i = 0;
            while i < bytes.len() {
                if bytes[i] == b' ' {
                    i += 1;
                    continue;
                }
                let start = i;
                while i < bytes.len() && bytes[i] != b' ' {
                    i += 1;
                }
                let x = (start as isize - slant) / x_unit;
                positions.insert((x, y), &line[start..i]);
            }
        }

        let mut graph: HashMap<char, Vec<Option<String>>> = HashMap::new();
        let mut shifted = HashSet::new();
        for (&(x, y), token) in &positions {
            for (slot, c) in token.chars().enumerate() {
                if slot == 1 {
                    shifted.insert(c);
                }
                let neighbors = coords
                    .iter()
                    .map(|&(dx, dy)| positions.get(&(x + dx, y + dy)).map(|t| t.to_string()))
                    .collect();
                graph.insert(c, neighbors);
            }
        }

        AdjacencyGraph {
            name,
            graph,
            shifted,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Direction-indexed neighbour tokens of `c`, or `None` if `c` is not
    /// on this layout.
    pub fn neighbors(&self, c: char) -> Option<&[Option<String>]> {
        self.graph.get(&c).map(Vec::as_slice)
    }

    /// Whether `c` is typed with shift held on this layout.
    pub fn is_shifted(&self, c: char) -> bool {
        self.shifted.contains(&c)
    }

    /// Number of characters reachable on this layout, i.e. how many keys an
    /// attacker could start a walk from.
    pub fn starting_positions(&self) -> usize {
        self.graph.len()
    }

    /// Mean number of occupied neighbour slots per character.
    pub fn average_degree(&self) -> f64 {
        if self.graph.is_empty() {
            return 0.0;
        }
        let total: usize = self
            .graph
            .values()
            .map(|ns| ns.iter().flatten().count())
            .sum();
        total as f64 / self.graph.len() as f64
    }
}
