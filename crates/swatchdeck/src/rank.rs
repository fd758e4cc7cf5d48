//! Fractional rank keys.
//!
//! A palette entry persists a string `sorting` key, and ascending
//! lexicographic order of those keys *is* the palette order. Dense integer
//! positions cannot support that contract: inserting between two adjacent
//! integers eventually runs out of room and forces every record to be
//! renumbered. Rank keys instead encode a fraction strictly between 0 and 1
//! in base 36, so there always is another key between any two distinct keys;
//! when the digits run out of room, the key grows longer instead of failing.
//!
//! A key has the shape `<bucket>|<digits>`, in the LexoRank tradition. The
//! bucket is a single digit chosen by the generator seed; it only prefixes
//! the key and has no bearing on correctness. The digits are base-36
//! fraction digits that never end in `0`, which keeps distinct keys from
//! sharing a value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The key alphabet, in ASCII order so that byte-wise string comparison and
/// numeric digit order agree.
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The radix of the fraction digits.
const RADIX: usize = DIGITS.len();

/// The number of rank buckets a seed can select.
const BUCKETS: u64 = 3;

/// The separator between the bucket digit and the fraction digits.
const SEPARATOR: u8 = b'|';

/// The gap left between consecutively appended keys. A generous gap keeps
/// keys short when items are inserted right behind an appended item.
const STEP: usize = 8;

// =============================================================================
// Errors
// =============================================================================

/// Errors for rank key construction and generation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RankError {
    /// A string that does not have the `<bucket>|<digits>` shape, contains
    /// characters outside the key alphabet, or ends in a zero digit.
    #[error("rank key `{0}` is malformed")]
    MalformedKey(String),

    /// Two bounds that do not share a bucket; there is no key between them
    /// within either bucket.
    #[error("rank keys `{0}` and `{1}` belong to different buckets")]
    BucketMismatch(String, String),

    /// A lower bound that does not precede the upper bound.
    #[error("lower bound `{0}` must be strictly less than upper bound `{1}`")]
    BoundsOutOfOrder(String, String),

    /// A request for a key between two absent bounds, which has no defined
    /// position.
    #[error("a rank between two absent bounds is undefined")]
    Unbounded,
}

// =============================================================================
// Rank keys
// =============================================================================

/// A totally-ordered, opaque rank key.
///
/// Keys compare by plain lexicographic string order, so collaborators that
/// persist or index them need no knowledge of their internals. A key is
/// validated on construction; every operation on valid keys yields valid
/// keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RankKey(String);

impl RankKey {
    /// Parse and validate a persisted rank key.
    pub fn parse(s: &str) -> Result<Self, RankError> {
        let malformed = || RankError::MalformedKey(s.to_string());
        let bytes = s.as_bytes();

        if bytes.len() < 3 || !DIGITS.contains(&bytes[0]) || bytes[1] != SEPARATOR {
            return Err(malformed());
        }

        let digits = &bytes[2..];
        if !digits.iter().all(|d| DIGITS.contains(d)) {
            return Err(malformed());
        }
        if digits.ends_with(b"0") {
            return Err(malformed());
        }

        Ok(Self(s.to_string()))
    }

    /// Access this key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bucket digit of this key.
    #[inline]
    fn bucket(&self) -> u8 {
        self.0.as_bytes()[0]
    }

    /// The fraction digits of this key.
    #[inline]
    fn digits(&self) -> &[u8] {
        &self.0.as_bytes()[2..]
    }

    /// Assemble a key from a bucket digit and fraction digits.
    fn assemble(bucket: u8, digits: &[u8]) -> Self {
        let mut key = String::with_capacity(2 + digits.len());
        key.push(bucket as char);
        key.push(SEPARATOR as char);
        // Digits only ever come from the ASCII alphabet.
        key.push_str(std::str::from_utf8(digits).unwrap_or_default());
        Self(key)
    }
}

impl std::fmt::Display for RankKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RankKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RankKey {
    type Error = RankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RankKey> for String {
    fn from(value: RankKey) -> Self {
        value.0
    }
}

// =============================================================================
// Digit arithmetic
// =============================================================================

/// The numeric value of a key digit. Digits are validated on key
/// construction, so an unknown byte cannot occur; it maps to 0 to keep this
/// function total.
#[inline]
fn digit_value(digit: u8) -> usize {
    DIGITS.iter().position(|&d| d == digit).unwrap_or(0)
}

/// Compute fraction digits strictly between `low` and `high`, where an empty
/// `low` stands for 0 and an absent `high` stands for 1.
///
/// The algorithm walks shared prefixes, then either picks a digit from the
/// middle of the remaining gap or, when the bounding digits are adjacent,
/// descends one position deeper. Descending is what grows keys: between any
/// two distinct keys there is always a longer key, so running out of room is
/// impossible by construction.
fn midpoint(low: &[u8], high: Option<&[u8]>) -> Vec<u8> {
    if let Some(high) = high {
        // Keep the digits both bounds agree on.
        let mut shared = 0;
        while shared < high.len() {
            let low_digit = low.get(shared).copied().unwrap_or(b'0');
            if low_digit != high[shared] {
                break;
            }
            shared += 1;
        }
        if shared > 0 {
            let mut result = high[..shared].to_vec();
            result.extend(midpoint(
                low.get(shared..).unwrap_or(&[]),
                Some(&high[shared..]),
            ));
            return result;
        }

        let low_digit = low.first().map_or(0, |&d| digit_value(d));
        let high_digit = digit_value(high[0]);

        if high_digit - low_digit > 1 {
            return vec![DIGITS[(low_digit + high_digit + 1) / 2]];
        }

        // The bounding digits are adjacent. If the upper bound has more
        // digits, its first digit alone already sits strictly between.
        if high.len() > 1 {
            return vec![high[0]];
        }

        let mut result = vec![DIGITS[low_digit]];
        result.extend(midpoint(low.get(1..).unwrap_or(&[]), None));
        return result;
    }

    // No upper bound: anything strictly greater than `low` but below 1.
    let low_digit = low.first().map_or(0, |&d| digit_value(d));
    if RADIX - low_digit > 1 {
        return vec![DIGITS[(low_digit + RADIX + 1) / 2]];
    }

    let mut result = vec![DIGITS[low_digit]];
    result.extend(midpoint(low.get(1..).unwrap_or(&[]), None));
    result
}

/// Add the append gap to the fraction digits, carrying as needed. If the
/// carry would overflow past the leading digit, the digits are extended
/// instead. Trailing zeros produced by a carry are stripped.
fn add_step(digits: &[u8]) -> Vec<u8> {
    let mut result = digits.to_vec();
    let mut carry = STEP;

    for digit in result.iter_mut().rev() {
        let value = digit_value(*digit) + carry;
        if value < RADIX {
            *digit = DIGITS[value];
            carry = 0;
            break;
        }
        *digit = DIGITS[value - RADIX];
        carry = 1;
    }

    if carry > 0 {
        // The key sits at the very top of its range; grow instead of wrap.
        let mut result = digits.to_vec();
        result.push(DIGITS[STEP]);
        return result;
    }

    while result.ends_with(b"0") {
        result.pop();
    }
    result
}

// =============================================================================
// Generator
// =============================================================================

/// The generator of rank keys for one palette.
///
/// The seed picks the bucket prefix; it has no effect on correctness. The
/// generator keeps a monotonically-advancing cursor over the keys it has
/// issued or observed, so that two appends in quick succession can never
/// hand out the same key even before either one is persisted.
#[derive(Debug)]
pub struct RankGenerator {
    bucket: u8,
    cursor: Option<RankKey>,
}

impl RankGenerator {
    /// Create a new generator. The seed selects the bucket prefix.
    pub fn new(seed: u64) -> Self {
        Self {
            bucket: DIGITS[(seed % BUCKETS) as usize],
            cursor: None,
        }
    }

    /// The deterministic starting key: the midpoint of this generator's
    /// bucket.
    pub fn initial(&self) -> RankKey {
        RankKey::assemble(self.bucket, &midpoint(&[], None))
    }

    /// Produce a key strictly greater than the given key, suitable for
    /// appending at the end of the palette.
    pub fn increment(&self, key: &RankKey) -> RankKey {
        RankKey::assemble(key.bucket(), &add_step(key.digits()))
    }

    /// Produce a key strictly between the two bounds.
    ///
    /// With both bounds given, the result is strictly greater than `low`
    /// and strictly less than `high`; the bounds must share a bucket and be
    /// in ascending order. With one bound absent, the result is only
    /// constrained by the other. Both bounds absent is an error, since that
    /// names no position at all.
    pub fn between(
        &self,
        low: Option<&RankKey>,
        high: Option<&RankKey>,
    ) -> Result<RankKey, RankError> {
        let (bucket, digits) = match (low, high) {
            (Some(low), Some(high)) => {
                if low.bucket() != high.bucket() {
                    return Err(RankError::BucketMismatch(
                        low.to_string(),
                        high.to_string(),
                    ));
                }
                if low >= high {
                    return Err(RankError::BoundsOutOfOrder(
                        low.to_string(),
                        high.to_string(),
                    ));
                }
                (
                    low.bucket(),
                    midpoint(low.digits(), Some(high.digits())),
                )
            }
            (Some(low), None) => (low.bucket(), midpoint(low.digits(), None)),
            (None, Some(high)) => (high.bucket(), midpoint(&[], Some(high.digits()))),
            (None, None) => return Err(RankError::Unbounded),
        };

        Ok(RankKey::assemble(bucket, &digits))
    }

    /// Advance the cursor past the given key, if it is greater. Called while
    /// rebuilding from persisted records so that subsequent appends exceed
    /// everything already stored.
    pub fn observe(&mut self, key: &RankKey) {
        if self.cursor.as_ref().map_or(true, |cursor| cursor < key) {
            self.cursor = Some(key.clone());
        }
    }

    /// Produce the next append key and advance the cursor.
    ///
    /// The first key is [`RankGenerator::initial`]; every further key is the
    /// increment of the last issued or observed key. The cursor never moves
    /// backwards, so a generator instance never revisits a key.
    pub fn next_append(&mut self) -> RankKey {
        let next = match self.cursor.as_ref() {
            Some(cursor) => self.increment(cursor),
            None => self.initial(),
        };
        self.cursor = Some(next.clone());
        next
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod test {
    use super::{RankError, RankGenerator, RankKey};
    use std::collections::BTreeSet;

    #[test]
    fn test_parse() {
        assert!(RankKey::parse("0|i").is_ok());
        assert!(RankKey::parse("2|8zx").is_ok());

        for bad in ["", "0", "0|", "0i", "a-i", "0|i0", "0|I", "0|i!", "ö|i"] {
            assert_eq!(
                RankKey::parse(bad),
                Err(RankError::MalformedKey(bad.to_string())),
                "`{}` should be malformed",
                bad
            );
        }
    }

    #[test]
    fn test_initial_is_seed_stable() {
        assert_eq!(RankGenerator::new(0).initial().as_str(), "0|i");
        assert_eq!(RankGenerator::new(1).initial().as_str(), "1|i");
        assert_eq!(RankGenerator::new(5).initial().as_str(), "2|i");

        // The seed only affects the prefix, never the digits.
        let a = RankGenerator::new(0).initial();
        let b = RankGenerator::new(1).initial();
        assert_eq!(&a.as_str()[1..], &b.as_str()[1..]);
    }

    #[test]
    fn test_increment_is_strictly_increasing() {
        let mut generator = RankGenerator::new(0);
        let mut issued = BTreeSet::new();
        let mut previous = generator.next_append();
        issued.insert(previous.clone());

        for _ in 0..1000 {
            let next = generator.next_append();
            assert!(next > previous, "{} should exceed {}", next, previous);
            assert!(issued.insert(next.clone()), "{} was issued twice", next);
            previous = next;
        }
    }

    #[test]
    fn test_between_bounds() {
        let generator = RankGenerator::new(0);
        let low = RankKey::parse("0|8").unwrap();
        let high = RankKey::parse("0|x").unwrap();

        let key = generator.between(Some(&low), Some(&high)).unwrap();
        assert!(low < key && key < high);

        let below = generator.between(None, Some(&low)).unwrap();
        assert!(below < low);

        let above = generator.between(Some(&high), None).unwrap();
        assert!(high < above);

        assert_eq!(generator.between(None, None), Err(RankError::Unbounded));
        assert!(matches!(
            generator.between(Some(&high), Some(&low)),
            Err(RankError::BoundsOutOfOrder(_, _))
        ));
        assert!(matches!(
            generator.between(Some(&low), Some(&low)),
            Err(RankError::BoundsOutOfOrder(_, _))
        ));

        let other = RankKey::parse("1|i").unwrap();
        assert!(matches!(
            generator.between(Some(&low), Some(&other)),
            Err(RankError::BucketMismatch(_, _))
        ));
    }

    #[test]
    fn test_between_adjacent_keys() {
        let generator = RankGenerator::new(0);
        let low = RankKey::parse("0|i").unwrap();
        let high = RankKey::parse("0|i1").unwrap();

        // There is no room at this length; the key must grow instead.
        let key = generator.between(Some(&low), Some(&high)).unwrap();
        assert!(low < key && key < high, "{} out of order", key);
        assert!(key.as_str().len() > high.as_str().len());
    }

    #[test]
    fn test_between_never_saturates() {
        // Squeeze 1000 keys against the same lower bound.
        let generator = RankGenerator::new(0);
        let low = RankKey::parse("0|i").unwrap();
        let mut high = RankKey::parse("0|j").unwrap();
        let mut seen = BTreeSet::new();

        for _ in 0..1000 {
            let key = generator.between(Some(&low), Some(&high)).unwrap();
            assert!(low < key && key < high, "{} out of order", key);
            assert!(seen.insert(key.clone()), "{} repeated", key);
            high = key;
        }

        // And 1000 keys against the same upper bound.
        let high = RankKey::parse("0|j").unwrap();
        let mut low = RankKey::parse("0|i").unwrap();
        for _ in 0..1000 {
            let key = generator.between(Some(&low), Some(&high)).unwrap();
            assert!(low < key && key < high, "{} out of order", key);
            low = key;
        }
    }

    #[test]
    fn test_random_insertions_stay_sorted() {
        use rand::Rng;

        let mut generator = RankGenerator::new(0);
        let mut rng = rand::rng();
        let mut keys = vec![generator.next_append()];

        for _ in 0..500 {
            let slot = rng.random_range(0..=keys.len());
            let low = slot.checked_sub(1).map(|i| &keys[i]);
            let high = keys.get(slot);
            let key = generator
                .between(low, high)
                .expect("bounded insertion should succeed");
            keys.insert(slot, key);

            assert!(
                keys.windows(2).all(|pair| pair[0] < pair[1]),
                "keys fell out of order"
            );
        }
    }

    #[test]
    fn test_observe_prevents_reuse() {
        let mut generator = RankGenerator::new(0);
        let persisted = RankKey::parse("0|y").unwrap();
        generator.observe(&persisted);
        generator.observe(&RankKey::parse("0|8").unwrap());

        let next = generator.next_append();
        assert!(next > persisted, "{} should exceed {}", next, persisted);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let key = RankKey::parse("0|i8").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"0|i8\"");

        let back: RankKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        assert!(serde_json::from_str::<RankKey>("\"0|i0\"").is_err());
    }
}
