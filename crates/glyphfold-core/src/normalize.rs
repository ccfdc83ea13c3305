use std::borrow::Cow;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::NormalizeError;

/// The "Combining Diacritical Marks" block. Only this block is stripped;
/// marks from the extended or supplement blocks survive.
pub const COMBINING_DIACRITICAL_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// A Cyrillic letter that is folded onto its Latin look-alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Homoglyph {
    pub from: char,
    pub to: char,
}

/// Exactly two pairs. Other look-alikes (е, о, р, с, х, у) are left alone.
pub const HOMOGLYPHS: [Homoglyph; 2] = [
    // CYRILLIC SMALL LETTER A
    Homoglyph { from: '\u{0430}', to: 'a' },
    // CYRILLIC SMALL LETTER EL
    Homoglyph { from: '\u{043B}', to: 'l' },
];

/// What to do with byte input that is not well-formed UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidInputPolicy {
    /// Substitute U+FFFD for every ill-formed sequence
    #[default]
    Replace,
    Reject,
}

impl InvalidInputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidInputPolicy::Replace => "replace",
            InvalidInputPolicy::Reject => "reject",
        }
    }
}

impl FromStr for InvalidInputPolicy {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" | "lossy" => Ok(InvalidInputPolicy::Replace),
            "reject" | "strict" => Ok(InvalidInputPolicy::Reject),
            other => Err(NormalizeError::UnknownPolicy(other.to_string())),
        }
    }
}

#[inline]
pub fn is_combining_diacritic(c: char) -> bool {
    COMBINING_DIACRITICAL_MARKS.contains(&c)
}

#[inline]
pub fn fold_homoglyph(c: char) -> char {
    HOMOGLYPHS
        .iter()
        .find(|h| h.from == c)
        .map_or(c, |h| h.to)
}

/// Lowercase, NFD, drop U+0300..=U+036F, fold Cyrillic а/л to Latin a/l.
///
/// The result is left decomposed. It is not re-composed to NFC, so
/// callers comparing against stored keys must store keys produced by this
/// same function.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    normalize_into(input, &mut out);
    out
}

/// Appends the normalized form of `input` to `out`.
pub fn normalize_into(input: &str, out: &mut String) {
    // Lowercasing has to see whole words for the final-sigma rule
    let lower = input.to_lowercase();

    out.extend(
        lower
            .nfd()
            .filter(|c| !is_combining_diacritic(*c))
            .map(fold_homoglyph),
    );
}

pub fn is_normalized(input: &str) -> bool {
    normalize(input) == input
}

/// True when both strings normalize to the same key.
pub fn eq_normalized(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Decodes `input` as UTF-8, borrowing when it is already well formed.
pub fn decode(input: &[u8], policy: InvalidInputPolicy) -> Result<Cow<'_, str>, NormalizeError> {
    match std::str::from_utf8(input) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(e) => match policy {
            InvalidInputPolicy::Replace => Ok(String::from_utf8_lossy(input)),
            InvalidInputPolicy::Reject => Err(NormalizeError::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            }),
        },
    }
}

/// Normalizes raw bytes, decoding them as UTF-8 under `policy`.
pub fn normalize_bytes(input: &[u8], policy: InvalidInputPolicy) -> Result<String, NormalizeError> {
    let text = decode(input, policy)?;
    Ok(normalize(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_strips_acute() {
        assert_eq!(normalize("café"), "cafe");
        assert_eq!(normalize("Ángela"), "angela");
        assert_eq!(normalize("Crème Brûlée"), "creme brulee");
    }

    #[test]
    fn test_precomposed_and_decomposed_agree() {
        assert_eq!(normalize("caf\u{00E9}"), normalize("cafe\u{0301}"));
    }

    #[test]
    fn test_keeps_marks_outside_block() {
        // COMBINING DOTTED GRAVE ACCENT lives in the supplement block
        assert_eq!(normalize("a\u{1DC0}"), "a\u{1DC0}");
        assert_eq!(normalize("\u{00E9}\u{1DC0}"), "e\u{1DC0}");
        // COMBINING LEFT HARPOON ABOVE, symbols block
        assert_eq!(normalize("x\u{20D0}"), "x\u{20D0}");
    }

    #[test]
    fn test_cyrillic_homoglyphs() {
        assert_eq!(normalize("Алла"), "alla");
        assert_eq!(normalize("АЛЛА"), "alla");
    }

    #[test]
    fn test_other_cyrillic_untouched() {
        assert_eq!(normalize("сом"), "сом");
        assert_eq!(normalize("еорсху"), "еорсху");
        assert!(normalize("сом").chars().all(|c| !c.is_ascii()));
    }

    #[test]
    fn test_cyrillic_breve_and_diaeresis_stripped() {
        // й and ё decompose into a base letter plus a mark from the block
        assert_eq!(normalize("Йога"), "\u{0438}\u{043E}\u{0433}a");
        assert_eq!(normalize("ё"), "\u{0435}");
    }

    #[test]
    fn test_not_recomposed() {
        assert_eq!(normalize("한"), "\u{1112}\u{1161}\u{11AB}");
        assert!(!is_normalized("한"));
    }

    #[test]
    fn test_dotted_capital_i() {
        // İ lowercases to i + U+0307, the dot is then stripped
        assert_eq!(normalize("İstanbul"), "istanbul");
    }

    #[test]
    fn test_case_invariance() {
        for s in ["Café", "Ángela", "Алла", "Ωμέγα", "Йога"] {
            assert_eq!(normalize(&s.to_uppercase()), normalize(&s.to_lowercase()), "{s}");
        }
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "café",
            "Ángela",
            "Алла",
            "сом",
            "İstanbul",
            "ΟΔΟΣ",
            "한국어",
            "a\u{1DC0}\u{0301}",
            "ﬁle ﬀ",
            "\u{FFFD}",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "{s:?}");
            assert!(is_normalized(&once));
        }
    }

    #[test]
    fn test_compatibility_forms_kept() {
        // NFD only, ligatures are not expanded
        assert_eq!(normalize("ﬁ"), "ﬁ");
    }

    #[test]
    fn test_eq_normalized() {
        assert!(eq_normalized("Алла", "alla"));
        assert!(eq_normalized("CAFÉ", "cafe"));
        assert!(!eq_normalized("сом", "com"));
    }

    #[test]
    fn test_normalize_into_appends() {
        let mut buf = String::from("> ");
        normalize_into("Ángela", &mut buf);
        assert_eq!(buf, "> angela");
    }

    #[test]
    fn test_bytes_valid() {
        assert_eq!(
            normalize_bytes("Алла".as_bytes(), InvalidInputPolicy::Reject),
            Ok("alla".to_string())
        );
    }

    #[test]
    fn test_bytes_replace() {
        assert_eq!(
            normalize_bytes(b"CAF\xff", InvalidInputPolicy::Replace),
            Ok("caf\u{FFFD}".to_string())
        );
    }

    #[test]
    fn test_bytes_reject() {
        assert_eq!(
            normalize_bytes(b"caf\xff", InvalidInputPolicy::Reject),
            Err(NormalizeError::InvalidUtf8 { valid_up_to: 3 })
        );
    }

    #[test]
    fn test_decode_borrows_valid_input() {
        let decoded = decode(b"plain", InvalidInputPolicy::Reject).unwrap();
        assert!(matches!(decoded, Cow::Borrowed("plain")));

        let replaced = decode(b"\xc3(", InvalidInputPolicy::Replace).unwrap();
        assert_eq!(replaced, "\u{FFFD}(");
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Reject".parse::<InvalidInputPolicy>(), Ok(InvalidInputPolicy::Reject));
        assert_eq!(" lossy ".parse::<InvalidInputPolicy>(), Ok(InvalidInputPolicy::Replace));
        assert!("ignore".parse::<InvalidInputPolicy>().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&InvalidInputPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
        let back: InvalidInputPolicy = serde_json::from_str("\"replace\"").unwrap();
        assert_eq!(back, InvalidInputPolicy::Replace);
    }
}
