//! Fuzzy text comparison for grading learner answers.
//!
//! Transcriptions come back from speech recognition with stray
//! punctuation, inconsistent spacing, and parenthetical asides the
//! learner never spoke, so both sides are normalized before comparison.

/// Terminal punctuation stripped during normalization, ASCII and fullwidth.
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', '。', '！', '？', '…', '．'];

/// Compare an expected answer against a learner transcription.
///
/// With `tolerance == 0` the normalized forms must match exactly;
/// otherwise they may differ by up to `tolerance` edit operations.
/// Pure and panic-free for arbitrary input.
pub fn compare(expected: &str, actual: &str, tolerance: usize) -> bool {
    let a = normalize(expected);
    let b = normalize(actual);

    if a == b {
        return true;
    }
    if tolerance == 0 {
        return false;
    }
    levenshtein_distance(&a, &b) <= tolerance
}

/// Strip parenthetical and bracketed content.
///
/// Handles ASCII and fullwidth bracket families, tracks nesting depth,
/// and is idempotent: stripping already-stripped text is a no-op.
pub fn remove_parens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' | '[' | '（' | '［' | '【' => depth += 1,
            ')' | ']' | '）' | '］' | '】' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

/// Normalize a string to its comparison form.
///
/// Removes parentheticals, strips terminal punctuation, lowercases,
/// folds diacritics, and drops all whitespace so spacing differences
/// never affect the verdict. Empty or punctuation-only input normalizes
/// to the empty string.
pub fn normalize(text: &str) -> String {
    let stripped = remove_parens(text);
    let trimmed = stripped.trim().trim_end_matches(TERMINAL_PUNCTUATION);

    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if c.is_whitespace() {
            continue;
        }
        for folded in c.to_lowercase() {
            match fold_diacritic(folded) {
                Some(base) => out.push(base),
                None => {}
            }
        }
    }
    out
}

/// Fold a lowercased char to its base letter, or drop combining marks.
fn fold_diacritic(c: char) -> Option<char> {
    // Combining diacritical marks carry no content of their own.
    if ('\u{0300}'..='\u{036F}').contains(&c) {
        return None;
    }
    let base = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ĩ' | 'ī' | 'į' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' => 'u',
        'ç' | 'ć' | 'č' => 'c',
        'ñ' | 'ń' | 'ň' => 'n',
        'ý' | 'ÿ' => 'y',
        'ś' | 'š' => 's',
        'ź' | 'ż' | 'ž' => 'z',
        'ğ' => 'g',
        other => other,
    };
    Some(base)
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn remove_parens_strips_asides() {
        assert_eq!(remove_parens("hola (hello) amigo"), "hola  amigo");
        assert_eq!(remove_parens("안녕하세요 (formal)"), "안녕하세요 ");
        assert_eq!(remove_parens("a [b (c)] d"), "a  d");
        assert_eq!(remove_parens("学校【がっこう】へ行く"), "学校へ行く");
    }

    #[test]
    fn remove_parens_is_idempotent() {
        for input in ["hola (hello) amigo", "plain", "(all)", "a [b] (c) d", ")("] {
            let once = remove_parens(input);
            assert_eq!(remove_parens(&once), once);
        }
    }

    #[test]
    fn remove_parens_tolerates_unbalanced_input() {
        assert_eq!(remove_parens("abc)"), "abc");
        assert_eq!(remove_parens("]]ok"), "ok");
    }

    #[test]
    fn normalize_collapses_spacing_and_punctuation() {
        assert_eq!(normalize("  Hola  mundo.  "), "holamundo");
        assert_eq!(normalize("¿Dónde está?"), "¿dondeesta");
        assert_eq!(normalize("学校へ 行きます。"), "学校へ行きます");
    }

    #[test]
    fn empty_and_noise_only_inputs_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("(aside only)..."), "");
        assert!(compare("", "(um)", 0));
        assert!(!compare("hola", "", 0));
    }

    #[test]
    fn strict_compare_requires_normalized_equality() {
        assert!(compare("Hola mundo", "hola  mundo.", 0));
        assert!(compare("café", "cafe", 0));
        assert!(!compare("hola mundo", "hola mundos", 0));
    }

    #[test]
    fn tolerance_budgets_edit_operations() {
        assert!(!compare("kitten", "sitting", 2));
        assert!(compare("kitten", "sitting", 3));
        assert!(compare("저는 학생이에요", "저는 학생이예요", 1));
    }

    #[test]
    fn larger_tolerance_never_breaks_a_match() {
        let cases = [("hola", "hola"), ("kitten", "sitting"), ("a", "b")];
        for (x, y) in cases {
            for tol in 0..6 {
                if compare(x, y, tol) {
                    assert!(compare(x, y, tol + 1));
                }
            }
        }
    }
}
