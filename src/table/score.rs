//! Partial-ratio fuzzy similarity on a 0-100 scale.
//!
//! The global table filter keeps a row when the query "partially" matches the
//! row's joined column text: the query is compared against every same-length
//! window of the longer string and the best window wins. Each window is
//! scored with `rapidfuzz`'s indel ratio, `200 * LCS / (len_a + len_b)`.

use rapidfuzz::fuzz;

/// Scores how well the shorter of `a` and `b` matches somewhere inside the
/// longer one.
///
/// Both inputs are lower-cased and stripped of punctuation first. Empty inputs
/// (after stripping) score 0.
///
/// ```
/// use patient_roster::table::partial_ratio;
///
/// assert_eq!(partial_ratio("smith", "John Smith 4/2/1985"), 100);
/// assert!(partial_ratio("smyth", "John Smith") >= 80);
/// assert!(partial_ratio("zzzz", "John Smith") < 60);
/// ```
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let n = short.len();
    let m = long.len();

    let leading = (1..n).map(move |len| &long[..len]);
    let full = (0..=m - n).map(move |start| &long[start..start + n]);
    let trailing = (1..n).map(move |len| &long[m - len..]);

    let mut best = 0.0_f64;
    for window in full.chain(leading).chain(trailing) {
        let score = ratio(short, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = best.round().clamp(0.0, 100.0) as u8;
    rounded
}

/// Lower-cases, replaces every non-alphanumeric character with a space and
/// trims the ends.
fn normalize(text: &str) -> Vec<char> {
    let mapped: Vec<char> = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let start = mapped.iter().position(|c| *c != ' ').unwrap_or(mapped.len());
    let end = mapped.iter().rposition(|c| *c != ' ').map_or(start, |i| i + 1);
    mapped[start..end].to_vec()
}

/// Indel ratio of two windows on a 0-100 scale.
fn ratio(a: &[char], b: &[char]) -> f64 {
    100.0 * fuzz::ratio(a.iter().copied(), b.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substring_scores_full_marks() {
        assert_eq!(partial_ratio("smith", "Smith"), 100);
        assert_eq!(partial_ratio("SMITH", "jane smith 1 main st"), 100);
    }

    #[test]
    fn argument_order_does_not_matter() {
        let text = "Maria Gonzalez 3/14/1972 55 Elm Street Active";
        assert_eq!(partial_ratio("gonzales", text), partial_ratio(text, "gonzales"));
    }

    #[test]
    fn punctuation_is_ignored() {
        assert_eq!(partial_ratio("o'brien", "Sean OBrien"), partial_ratio("o brien", "Sean OBrien"));
        assert_eq!(partial_ratio("!!!", "Sean"), 0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(partial_ratio("", "anything"), 0);
        assert_eq!(partial_ratio("anything", "   "), 0);
    }

    #[test]
    fn one_typo_stays_above_default_threshold() {
        assert!(partial_ratio("jonse", "Tom Jones 2/2/1960") > 60);
    }

    #[test]
    fn unrelated_text_stays_below_default_threshold() {
        assert!(partial_ratio("xqzv", "Tom Jones 2/2/1960 7 Oak Road Inquiry") <= 60);
    }

    #[test]
    fn window_ratio_counts_in_order_matches() {
        let a: Vec<char> = "abcde".chars().collect();
        let b: Vec<char> = "aebdc".chars().collect();
        assert!((ratio(&a, &b) - 60.0).abs() < 1e-9);
    }
}
