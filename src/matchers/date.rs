//! Date matcher - date-shaped substrings with plausible d/m/y fields.

use super::{Matcher, PatternError};
use crate::estimate::REFERENCE_YEAR;
use crate::types::{Match, MatchKind};
use ::regex::Regex;

const DATE_MIN_YEAR: i32 = 1000;
const DATE_MAX_YEAR: i32 = 2050;

/// How a digit run of a given length may be cut into three fields.
fn date_splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

#[derive(Clone, Copy)]
struct Dmy {
    year: i32,
    month: u32,
    day: u32,
}

fn map_ints_to_dm(ints: [i32; 2]) -> Option<(u32, u32)> {
    for (day, month) in [(ints[0], ints[1]), (ints[1], ints[0])] {
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            return Some((day as u32, month as u32));
        }
    }
    None
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}

fn map_ints_to_dmy(ints: [i32; 3]) -> Option<Dmy> {
    // The middle field is a day or a month in every split we accept.
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }
    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_12 = 0;
    for int in ints {
        if (100..DATE_MIN_YEAR).contains(&int) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 12 {
            under_12 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_12 == 0 {
        return None;
    }

    let year_splits = [
        (ints[2], [ints[0], ints[1]]),
        (ints[0], [ints[1], ints[2]]),
    ];
    // A four-digit year is decisive: the remaining fields must form a
    // valid day/month or the whole candidate is rejected.
    for (year, rest) in year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            return map_ints_to_dm(rest).map(|(day, month)| Dmy { year, month, day });
        }
    }
    for (year, rest) in year_splits {
        if let Some((day, month)) = map_ints_to_dm(rest) {
            return Some(Dmy {
                year: two_to_four_digit_year(year),
                month,
                day,
            });
        }
    }
    None
}

/// Finds date-shaped substrings: all-digit runs of length 4-8 cut by the
/// split tables, and separated forms like "13.5.1987". Ambiguous digit
/// runs resolve to the candidate closest to the reference year.
pub struct DateMatcher {
    separated: Regex,
}

impl DateMatcher {
    /// Compiles the separated-date shape.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidRegex` if the pattern fails to compile.
    pub fn new() -> Result<Self, PatternError> {
        let separated = Regex::new(r"^(\d{1,4})([\s/\\_.-])(\d{1,2})([\s/\\_.-])(\d{1,4})$")
            .map_err(|source| PatternError::InvalidRegex {
                name: "date_separator",
                source,
            })?;
        Ok(DateMatcher { separated })
    }

    fn no_separator_matches(&self, chars: &[char], out: &mut Vec<Match>) {
        let n = chars.len();
        for i in 0..n {
            for len in 4..=8 {
                let j = i + len - 1;
                if j >= n {
                    break;
                }
                if !chars[i..=j].iter().all(|c| c.is_ascii_digit()) {
                    continue;
                }
                let token: String = chars[i..=j].iter().collect();
                let mut best: Option<Dmy> = None;
                for &(k, l) in date_splits(len) {
                    let fields = [&token[..k], &token[k..l], &token[l..]];
                    let Some(ints) = parse_fields(fields) else { continue };
                    let Some(dmy) = map_ints_to_dmy(ints) else { continue };
                    let closer = match best {
                        None => true,
                        Some(b) => {
                            (dmy.year - REFERENCE_YEAR).abs() < (b.year - REFERENCE_YEAR).abs()
                        }
                    };
                    if closer {
                        best = Some(dmy);
                    }
                }
                if let Some(dmy) = best {
                    out.push(date_match(i, j, token, None, dmy));
                }
            }
        }
    }

    fn separated_matches(&self, chars: &[char], out: &mut Vec<Match>) {
        let n = chars.len();
        for i in 0..n {
            for len in 6..=10 {
                let j = i + len - 1;
                if j >= n {
                    break;
                }
                let token: String = chars[i..=j].iter().collect();
                let Some(caps) = self.separated.captures(&token) else {
                    continue;
                };
                if caps.get(2).map(|m| m.as_str()) != caps.get(4).map(|m| m.as_str()) {
                    continue;
                }
                let fields = [&caps[1], &caps[3], &caps[5]];
                let Some(ints) = parse_fields(fields) else { continue };
                let Some(dmy) = map_ints_to_dmy(ints) else { continue };
                let separator = caps[2].chars().next();
                out.push(date_match(i, j, token.clone(), separator, dmy));
            }
        }
    }
}

fn parse_fields(fields: [&str; 3]) -> Option<[i32; 3]> {
    let mut ints = [0i32; 3];
    for (slot, field) in ints.iter_mut().zip(fields) {
        *slot = field.parse().ok()?;
    }
    Some(ints)
}

fn date_match(start: usize, end: usize, token: String, separator: Option<char>, dmy: Dmy) -> Match {
    Match {
        start,
        end,
        token,
        kind: MatchKind::Date {
            separator,
            year: dmy.year,
            month: dmy.month,
            day: dmy.day,
        },
        guesses: 0.0,
    }
}

impl Matcher for DateMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let mut out = Vec::new();
        self.no_separator_matches(&chars, &mut out);
        self.separated_matches(&chars, &mut out);

        // Dates embed smaller dates; keep only the maximal spans.
        let keep: Vec<bool> = out
            .iter()
            .map(|m| {
                !out.iter().any(|o| {
                    (o.start < m.start && o.end >= m.end) || (o.start <= m.start && o.end > m.end)
                })
            })
            .collect();
        let mut kept = keep.iter().copied();
        out.retain(|_| kept.next().unwrap_or(false));
        out
    }
}
