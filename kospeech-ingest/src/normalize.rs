//! Grapheme-to-phoneme transcript normalization.
//!
//! The scanner is generic over [`Normalize`]; [`KoreanG2p`] is the corpus
//! default. Rule tables are precompiled at construction, which is why each
//! worker gets its own instance from a factory instead of sharing one.

use std::collections::HashMap;

/// Orthographic-to-phonemic text transformation.
///
/// Pure with respect to output given identical input; side-effect-free.
pub trait Normalize {
    fn normalize(&self, raw: &str) -> String;
}

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_COUNT: u32 = 11_172;
const VOWEL_COUNT: u32 = 21;
const TAIL_COUNT: u32 = 28;

/// Onset index of plain `ㅇ` (vowel-initial syllable)
const LEAD_IEUNG: u8 = 11;
/// Onset indices of `ㄴ` and `ㅁ`
const LEAD_NIEUN: u8 = 2;
const LEAD_MIEUM: u8 = 6;
/// Coda indices of `ㅇ` and `ㅎ`
const TAIL_IEUNG: u8 = 21;
const TAIL_HIEUT: u8 = 27;

/// One character of input, decomposed when it is a Hangul syllable
#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Syllable { lead: u8, vowel: u8, tail: u8 },
    Other(char),
}

fn decompose(c: char) -> Unit {
    let code = c as u32;
    if (SYLLABLE_BASE..SYLLABLE_BASE + SYLLABLE_COUNT).contains(&code) {
        let index = code - SYLLABLE_BASE;
        Unit::Syllable {
            lead: (index / (VOWEL_COUNT * TAIL_COUNT)) as u8,
            vowel: ((index / TAIL_COUNT) % VOWEL_COUNT) as u8,
            tail: (index % TAIL_COUNT) as u8,
        }
    } else {
        Unit::Other(c)
    }
}

fn compose(lead: u8, vowel: u8, tail: u8) -> char {
    let code =
        SYLLABLE_BASE + (lead as u32 * VOWEL_COUNT + vowel as u32) * TAIL_COUNT + tail as u32;
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Rule-based Korean grapheme-to-phoneme normalizer.
///
/// Implements the standard-pronunciation subset that matters for corpus
/// supervision: coda neutralization, coda-cluster simplification, liaison
/// onto vowel-initial syllables, ㅎ-deletion, and nasal assimilation.
/// Non-Hangul characters pass through unchanged.
pub struct KoreanG2p {
    /// Coda → pronounced representative when no liaison applies
    neutralized: HashMap<u8, u8>,
    /// Double-consonant coda → (remaining coda, onset) before a vowel
    clusters: HashMap<u8, (u8, u8)>,
    /// Single coda → onset it surfaces as before a vowel
    liaison: HashMap<u8, u8>,
    /// Neutralized coda → nasal coda before a nasal onset
    nasalized: HashMap<u8, u8>,
}

impl KoreanG2p {
    pub fn new() -> Self {
        // Coda indices: ㄱ1 ㄲ2 ㄳ3 ㄴ4 ㄵ5 ㄶ6 ㄷ7 ㄹ8 ㄺ9 ㄻ10 ㄼ11 ㄽ12
        // ㄾ13 ㄿ14 ㅀ15 ㅁ16 ㅂ17 ㅄ18 ㅅ19 ㅆ20 ㅇ21 ㅈ22 ㅊ23 ㅋ24 ㅌ25
        // ㅍ26 ㅎ27. Onset indices: ㄱ0 ㄲ1 ㄴ2 ㄷ3 ㄸ4 ㄹ5 ㅁ6 ㅂ7 ㅃ8 ㅅ9
        // ㅆ10 ㅇ11 ㅈ12 ㅉ13 ㅊ14 ㅋ15 ㅌ16 ㅍ17 ㅎ18.
        let neutralized = HashMap::from([
            // singles: obstruents collapse to ㄱ/ㄷ/ㅂ
            (2, 1),
            (24, 1),
            (19, 7),
            (20, 7),
            (22, 7),
            (23, 7),
            (25, 7),
            (27, 7),
            (26, 17),
            // clusters: one member survives
            (3, 1),
            (5, 4),
            (6, 4),
            (9, 1),
            (10, 16),
            (11, 8),
            (12, 8),
            (13, 8),
            (14, 17),
            (15, 8),
            (18, 17),
        ]);

        let clusters = HashMap::from([
            (3, (1, 9)),   // ㄳ → ㄱ + ㅅ
            (5, (4, 12)),  // ㄵ → ㄴ + ㅈ
            (6, (0, 2)),   // ㄶ → ㅎ deleted, ㄴ liaises
            (9, (8, 0)),   // ㄺ → ㄹ + ㄱ
            (10, (8, 6)),  // ㄻ → ㄹ + ㅁ
            (11, (8, 7)),  // ㄼ → ㄹ + ㅂ
            (12, (8, 9)),  // ㄽ → ㄹ + ㅅ
            (13, (8, 16)), // ㄾ → ㄹ + ㅌ
            (14, (8, 17)), // ㄿ → ㄹ + ㅍ
            (15, (0, 5)),  // ㅀ → ㅎ deleted, ㄹ liaises
            (18, (17, 9)), // ㅄ → ㅂ + ㅅ
        ]);

        let liaison = HashMap::from([
            (1, 0),
            (2, 1),
            (4, 2),
            (7, 3),
            (8, 5),
            (16, 6),
            (17, 7),
            (19, 9),
            (20, 10),
            (22, 12),
            (23, 14),
            (24, 15),
            (25, 16),
            (26, 17),
        ]);

        let nasalized = HashMap::from([(1, TAIL_IEUNG), (7, 4), (17, 16)]);

        Self {
            neutralized,
            clusters,
            liaison,
            nasalized,
        }
    }

    /// Resolve a coda followed by a vowel-initial syllable.
    ///
    /// Returns the remaining coda and the onset replacing the `ㅇ` of the
    /// next syllable, if any.
    fn liaise(&self, tail: u8) -> (u8, Option<u8>) {
        if let Some(&(remaining, onset)) = self.clusters.get(&tail) {
            return (remaining, Some(onset));
        }
        match tail {
            TAIL_IEUNG => (tail, None),
            TAIL_HIEUT => (0, None),
            _ => match self.liaison.get(&tail) {
                Some(&onset) => (0, Some(onset)),
                None => (tail, None),
            },
        }
    }

    /// Resolve a coda with no following vowel.
    fn close(&self, tail: u8, next_lead: Option<u8>) -> u8 {
        let tail = self.neutralized.get(&tail).copied().unwrap_or(tail);
        match next_lead {
            Some(LEAD_NIEUN) | Some(LEAD_MIEUM) => {
                self.nasalized.get(&tail).copied().unwrap_or(tail)
            }
            _ => tail,
        }
    }
}

impl Default for KoreanG2p {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalize for KoreanG2p {
    fn normalize(&self, raw: &str) -> String {
        let mut units: Vec<Unit> = raw.chars().map(decompose).collect();

        for i in 0..units.len() {
            let next_lead = match units.get(i + 1) {
                Some(Unit::Syllable { lead, .. }) => Some(*lead),
                _ => None,
            };

            let Unit::Syllable { tail, .. } = units[i] else {
                continue;
            };
            if tail == 0 {
                continue;
            }

            if next_lead == Some(LEAD_IEUNG) {
                let (remaining, onset) = self.liaise(tail);
                if let Unit::Syllable { tail, .. } = &mut units[i] {
                    *tail = remaining;
                }
                if let Some(onset) = onset {
                    if let Some(Unit::Syllable { lead, .. }) = units.get_mut(i + 1) {
                        *lead = onset;
                    }
                }
            } else {
                let closed = self.close(tail, next_lead);
                if let Unit::Syllable { tail, .. } = &mut units[i] {
                    *tail = closed;
                }
            }
        }

        units
            .iter()
            .map(|unit| match *unit {
                Unit::Syllable { lead, vowel, tail } => compose(lead, vowel, tail),
                Unit::Other(c) => c,
            })
            .collect()
    }
}
