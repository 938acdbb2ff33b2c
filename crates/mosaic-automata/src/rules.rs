//! Rule tables for elementary and Life-like automata.

use rand::seq::SliceRandom;
use rand::Rng;

/// A Wolfram elementary rule: bit `p` of the number is the next state for
/// neighborhood pattern `p = left << 2 | center << 1 | right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementaryRule(pub u8);

impl ElementaryRule {
    /// Rules that make for good viewing.
    pub const INTERESTING: [u8; 11] = [30, 54, 60, 90, 102, 110, 150, 158, 182, 184, 190];

    /// Mirror-symmetric rules, used for the ordered band.
    pub const SYMMETRIC: [u8; 8] = [18, 22, 90, 122, 126, 146, 150, 182];

    /// Class III (chaotic) rules, used for the disordered band.
    pub const CHAOTIC: [u8; 8] = [30, 45, 75, 86, 89, 101, 135, 149];

    /// Rule 184, the traffic rule.
    pub const TRAFFIC: Self = Self(184);

    /// Next state of the center cell.
    #[inline]
    pub const fn apply(&self, left: u8, center: u8, right: u8) -> u8 {
        let pattern = (left & 1) << 2 | (center & 1) << 1 | (right & 1);
        (self.0 >> pattern) & 1
    }

    /// Whether mirroring a neighborhood never changes the outcome.
    pub const fn is_symmetric(&self) -> bool {
        // Patterns 001/100 and 011/110 are the only mirror pairs.
        let r = self.0;
        (r >> 1) & 1 == (r >> 4) & 1 && (r >> 3) & 1 == (r >> 6) & 1
    }

    /// Compute one generation of `prev` into `next` with horizontal wraparound.
    pub fn evolve(&self, prev: &[u8], next: &mut [u8]) {
        let w = prev.len();
        for x in 0..w {
            let left = prev[(x + w - 1) % w];
            let right = prev[(x + 1) % w];
            next[x] = self.apply(left, prev[x], right);
        }
    }

    /// Pick from a rule set.
    pub fn choose<R: Rng + ?Sized>(set: &[u8], rng: &mut R) -> Self {
        Self(set.choose(rng).copied().unwrap_or(30))
    }
}

impl std::fmt::Display for ElementaryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule {}", self.0)
    }
}

/// Build a neighbor-count mask from digits 0-8.
pub const fn mask(counts: &[u8]) -> u16 {
    let mut m = 0u16;
    let mut i = 0;
    while i < counts.len() {
        if counts[i] <= 8 {
            m |= 1 << counts[i];
        }
        i += 1;
    }
    m
}

/// Birth and survival masks for a Life-like rule.
///
/// Bit `i` of `birth` set: a dead cell with `i` live neighbors is born.
/// Bit `i` of `survival` set: a live cell with `i` live neighbors survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LifeRule {
    pub birth: u16,
    pub survival: u16,
}

impl LifeRule {
    /// Conway's Life, B3/S23.
    pub const CONWAY: Self = Self::new(mask(&[3]), mask(&[2, 3]));
    /// B36/S23, has a replicator.
    pub const HIGH_LIFE: Self = Self::new(mask(&[3, 6]), mask(&[2, 3]));
    /// B3678/S34678, symmetric under inversion.
    pub const DAY_AND_NIGHT: Self = Self::new(mask(&[3, 6, 7, 8]), mask(&[3, 4, 6, 7, 8]));
    /// B3/S12345, grows corridors.
    pub const MAZE: Self = Self::new(mask(&[3]), mask(&[1, 2, 3, 4, 5]));
    /// B3/S45678, slow coral growth.
    pub const CORAL: Self = Self::new(mask(&[3]), mask(&[4, 5, 6, 7, 8]));
    /// B36/S125.
    pub const TWO_BY_TWO: Self = Self::new(mask(&[3, 6]), mask(&[1, 2, 5]));

    /// Named rule sets.
    pub const PRESETS: [(&'static str, Self); 6] = [
        ("Conway's Life", Self::CONWAY),
        ("HighLife", Self::HIGH_LIFE),
        ("Day & Night", Self::DAY_AND_NIGHT),
        ("Maze", Self::MAZE),
        ("Coral", Self::CORAL),
        ("2x2", Self::TWO_BY_TWO),
    ];

    /// Create a rule from raw masks (bits above 8 are ignored).
    pub const fn new(birth: u16, survival: u16) -> Self {
        Self {
            birth: birth & 0x1FF,
            survival: survival & 0x1FF,
        }
    }

    /// Whether `n` live neighbors bring a dead cell to life.
    #[inline]
    pub const fn births(&self, n: u8) -> bool {
        n <= 8 && self.birth & (1u16 << n) != 0
    }

    /// Whether a live cell with `n` live neighbors stays alive.
    #[inline]
    pub const fn survives(&self, n: u8) -> bool {
        n <= 8 && self.survival & (1u16 << n) != 0
    }

    /// Next state of a cell.
    #[inline]
    pub const fn next(&self, alive: bool, n: u8) -> bool {
        if alive {
            self.survives(n)
        } else {
            self.births(n)
        }
    }

    /// Name of the matching preset, if any.
    pub fn preset_name(&self) -> Option<&'static str> {
        Self::PRESETS.iter().find(|(_, r)| r == self).map(|(name, _)| *name)
    }

    /// Parse `B3/S23`-style text (or Golly's `23/3`, survival first).
    ///
    /// Parsing is lenient: characters that are not digits 0-8 are skipped and
    /// unrecognized tokens are dropped. Garbage yields a rule with no births
    /// and no survivals.
    pub fn parse(text: &str) -> Self {
        let mut birth = 0u16;
        let mut survival = 0u16;
        let mut untagged = 0;

        for token in text.split('/').map(str::trim).filter(|t| !t.is_empty()) {
            let (target, digits) = match token.as_bytes()[0] {
                b'B' | b'b' => (&mut birth, &token[1..]),
                b'S' | b's' => (&mut survival, &token[1..]),
                b'0'..=b'9' => {
                    untagged += 1;
                    match untagged {
                        1 => (&mut survival, token),
                        2 => (&mut birth, token),
                        _ => continue,
                    }
                }
                _ => continue,
            };
            for c in digits.chars() {
                if let Some(d) = c.to_digit(10).filter(|&d| d <= 8) {
                    *target |= 1 << d;
                }
            }
        }

        Self::new(birth, survival)
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl std::fmt::Display for LifeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = |m: u16| -> String {
            (0..=8u8)
                .filter(|&i| m & (1u16 << i) != 0)
                .map(|i| char::from(b'0' + i))
                .collect()
        };
        write!(f, "B{}/S{}", digits(self.birth), digits(self.survival))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_30_table() {
        let r = ElementaryRule(30);
        // 111 110 101 100 011 010 001 000 -> 0 0 0 1 1 1 1 0
        let expected = [0, 1, 1, 1, 1, 0, 0, 0];
        for p in 0..8u8 {
            assert_eq!(r.apply((p >> 2) & 1, (p >> 1) & 1, p & 1), expected[p as usize]);
        }
    }

    #[test]
    fn evolve_wraps() {
        // Rule 90 is left XOR right.
        let r = ElementaryRule(90);
        let prev = [1, 0, 0, 0];
        let mut next = [0; 4];
        r.evolve(&prev, &mut next);
        assert_eq!(next, [0, 1, 0, 1]);
    }

    #[test]
    fn symmetric_sets_are_symmetric() {
        for rule in ElementaryRule::SYMMETRIC {
            assert!(ElementaryRule(rule).is_symmetric(), "rule {}", rule);
        }
        assert!(!ElementaryRule(30).is_symmetric());
        assert!(!ElementaryRule(110).is_symmetric());
    }

    #[test]
    fn conway_masks() {
        let r = LifeRule::CONWAY;
        assert!(r.births(3));
        assert!(!r.births(2));
        assert!(r.survives(2) && r.survives(3));
        assert!(!r.survives(4));
        assert!(!r.next(true, 1));
        assert!(r.next(false, 3));
        assert_eq!(r.to_string(), "B3/S23");
    }

    #[test]
    fn parse_standard_and_golly_notation() {
        assert_eq!(LifeRule::parse("B3/S23"), LifeRule::CONWAY);
        assert_eq!(LifeRule::parse("b36/s23"), LifeRule::HIGH_LIFE);
        assert_eq!(LifeRule::parse("S23/B3"), LifeRule::CONWAY);
        assert_eq!(LifeRule::parse("23/3"), LifeRule::CONWAY);
        assert_eq!(LifeRule::parse(" B3678 / S34678 "), LifeRule::DAY_AND_NIGHT);
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(LifeRule::parse("B3x9/S2?3"), LifeRule::CONWAY);
        assert_eq!(LifeRule::parse("garbage"), LifeRule::new(0, 0));
        assert_eq!(LifeRule::parse(""), LifeRule::new(0, 0));
        assert_eq!(LifeRule::parse("B/S"), LifeRule::new(0, 0));
    }

    #[test]
    fn preset_names_round_trip() {
        for (name, rule) in LifeRule::PRESETS {
            assert_eq!(rule.preset_name(), Some(name));
            assert_eq!(LifeRule::parse(&rule.to_string()), rule);
        }
        assert_eq!(LifeRule::new(1, 1).preset_name(), None);
    }
}
