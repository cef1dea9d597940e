//! Typed-answer checking

/// Canonical form of a typed answer: trimmed, lowercased, `ё` folded to `е`
/// and whitespace runs collapsed to a single space.
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace('ё', "е")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exact match after normalization. No fuzzy matching.
pub fn is_correct(user_answer: &str, correct_answer: &str) -> bool {
    normalize(user_answer) == normalize(correct_answer)
}

/// How one typed letter compares with the expected answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterMark {
    Match,
    Mismatch,
    Space,
}

/// Compare the typed answer letter by letter against the normalized correct
/// answer. A whitespace run in the typed answer lines up with the single
/// space of the normalized form. Used to colour the feedback line.
pub fn letter_diff(user_answer: &str, correct_answer: &str) -> Vec<(char, LetterMark)> {
    let expected: Vec<char> = normalize(correct_answer).chars().collect();
    let mut cursor = 0;
    let mut in_space = false;

    user_answer
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_whitespace() {
                if !in_space && expected.get(cursor) == Some(&' ') {
                    cursor += 1;
                }
                in_space = true;
                return (ch, LetterMark::Space);
            }
            in_space = false;

            let typed = fold_letter(ch);
            let mark = match expected.get(cursor) {
                Some(&want) if Some(want) == typed => LetterMark::Match,
                _ => LetterMark::Mismatch,
            };
            cursor += 1;
            (ch, mark)
        })
        .collect()
}

fn fold_letter(ch: char) -> Option<char> {
    let mut lower = ch.to_lowercase();
    let first = lower.next()?;
    if lower.next().is_some() {
        return None;
    }
    Some(if first == 'ё' { 'е' } else { first })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello   World \t"), "hello world");
        assert_eq!(normalize("Ёжик"), "ежик");
        assert_eq!(normalize("ice\n\ncream"), "ice cream");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for s in ["  Пёс  и   КОТ ", "Paris", "\tÉcole  ", "ЁЁЁ", "a\u{00a0}b"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_is_correct() {
        assert!(is_correct("Paris ", "paris"));
        assert!(is_correct("пЁс", "пес"));
        assert!(is_correct("big   red  ball", "Big red ball"));
        assert!(!is_correct("pari", "paris"));
        assert!(!is_correct("", "cat"));
    }

    #[test]
    fn test_letter_diff_marks_positions() {
        let marks: Vec<LetterMark> = letter_diff("Cot", "cat").into_iter().map(|(_, m)| m).collect();
        assert_eq!(marks, vec![LetterMark::Match, LetterMark::Mismatch, LetterMark::Match]);
    }

    #[test]
    fn test_letter_diff_spaces_and_overflow() {
        let diff = letter_diff(" ice creamy ", "ice cream");
        assert_eq!(diff.len(), 10);
        assert_eq!(diff[3], (' ', LetterMark::Space));
        assert_eq!(diff[9], ('y', LetterMark::Mismatch));
        assert!(diff[..9].iter().all(|(_, m)| *m != LetterMark::Mismatch));
    }

    #[test]
    fn test_letter_diff_whitespace_runs() {
        assert!(is_correct("ice  cream", "ice cream"));
        let diff = letter_diff("ice \t cream", "Ice cream");
        assert_eq!(diff.len(), 11);
        assert!(diff.iter().all(|(_, m)| *m != LetterMark::Mismatch));
        assert_eq!(diff[4], ('\t', LetterMark::Space));
    }

    #[test]
    fn test_letter_diff_folds_yo() {
        let diff = letter_diff("Ёж", "еж");
        assert!(diff.iter().all(|(_, m)| *m == LetterMark::Match));
        assert!(letter_diff("", "cat").is_empty());
    }
}
