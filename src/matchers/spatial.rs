//! Spatial matcher - walks over physically adjacent keyboard keys.

use super::Matcher;
use crate::adjacency::AdjacencyGraph;
use crate::types::{Match, MatchKind};

const MIN_WALK_LEN: usize = 3;

/// Finds runs of length >= 3 where each consecutive character pair sits on
/// adjacent keys (or the same key shifted) of one keyboard layout.
pub struct SpatialMatcher {
    graphs: Vec<AdjacencyGraph>,
}

impl SpatialMatcher {
    /// Matcher over the four standard layouts.
    pub fn new() -> Self {
        SpatialMatcher {
            graphs: AdjacencyGraph::standard_layouts(),
        }
    }

    pub fn with_layouts(graphs: Vec<AdjacencyGraph>) -> Self {
        SpatialMatcher { graphs }
    }
}

impl Default for SpatialMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for SpatialMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let mut out = Vec::new();
        for graph in &self.graphs {
            walk_layout(&chars, graph, &mut out);
        }
        out
    }
}

fn walk_layout(chars: &[char], graph: &AdjacencyGraph, out: &mut Vec<Match>) {
    let n = chars.len();
    let mut i = 0;
    while i + 1 < n {
        let mut j = i + 1;
        let mut turns = 0usize;
        let mut last_direction: Option<usize> = None;
        let mut shifted_count = usize::from(graph.is_shifted(chars[i]));

        loop {
            let mut found = false;
            if j < n {
                let prev = chars[j - 1];
                let cur = chars[j];
                if let Some(neighbors) = graph.neighbors(prev) {
                    for (direction, neighbor) in neighbors.iter().enumerate() {
                        let Some(token) = neighbor else { continue };
                        if !token.contains(cur) {
                            continue;
                        }
                        found = true;
                        if token.chars().nth(1) == Some(cur) {
                            shifted_count += 1;
                        }
                        // A turn is a change of direction mid-walk; the
                        // first move sets the direction for free.
                        if let Some(last) = last_direction {
                            if last != direction {
                                turns += 1;
                            }
                        }
                        last_direction = Some(direction);
                        break;
                    }
                }
            }

            if found {
                j += 1;
                continue;
            }
            if j - i >= MIN_WALK_LEN {
                out.push(Match {
                    start: i,
                    end: j - 1,
                    token: chars[i..j].iter().collect(),
                    kind: MatchKind::Spatial {
                        layout: graph.name(),
                        turns,
                        shifted_count,
                        starting_positions: graph.starting_positions(),
                        average_degree: graph.average_degree(),
                    },
                    guesses: 0.0,
                });
            }
            i = j;
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qwerty_matches(password: &str) -> Vec<Match> {
        let matcher = SpatialMatcher::with_layouts(vec![AdjacencyGraph::qwerty()]);
        matcher.matches(password)
    }

    fn spatial_meta(m: &Match) -> (usize, usize) {
        match m.kind {
            MatchKind::Spatial {
                turns,
                shifted_count,
                ..
            } => (turns, shifted_count),
            ref other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_straight_row_has_zero_turns() {
        let matches = qwerty_matches("qwerty");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "qwerty");
        let (turns, shifted) = spatial_meta(&matches[0]);
        assert_eq!(turns, 0);
        assert_eq!(shifted, 0);
    }

    #[test]
    fn test_direction_change_counts_turns() {
        // qwer runs right, drops to f, then fdsa runs back left.
        let matches = qwerty_matches("qwerfdsa");
        let longest = matches
            .iter()
            .max_by_key(|m| m.token_len())
            .expect("walk found");
        assert_eq!(longest.token, "qwerfdsa");
        let (turns, _) = spatial_meta(longest);
        assert_eq!(turns, 2);
    }

    #[test]
    fn test_short_runs_are_ignored() {
        assert!(qwerty_matches("qw").is_empty());
    }

    #[test]
    fn test_non_adjacent_characters_break_the_walk() {
        let matches = qwerty_matches("qwep");
        // 'e' -> 'p' is not adjacent, so only "qwe" survives.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "qwe");
    }

    #[test]
    fn test_shifted_keys_are_counted() {
        let matches = qwerty_matches("qWerty");
        assert_eq!(matches.len(), 1);
        let (_, shifted) = spatial_meta(&matches[0]);
        assert_eq!(shifted, 1);
    }

    #[test]
    fn test_keypad_walks_are_found() {
        let matcher = SpatialMatcher::new();
        let matches = matcher.matches("7894561");
        assert!(matches
            .iter()
            .any(|m| matches!(m.kind, MatchKind::Spatial { layout: "keypad", .. })));
    }
}
