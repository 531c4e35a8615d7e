//! Override codes written into individual time cells.
//!
//! A train cell is normally left empty and filled from the feed. The
//! author can instead write a short code:
//!
//! ```text
//! <train spec>? (first | last | blank)? (two_row | two-row | tworow)?
//! ```
//!
//! `first`/`last` mark the train's endpoint at that station, `blank`
//! keeps the cell empty but colored, and the two-row suffix forces
//! separate arrival and departure lines.

use crate::domain::TrainSpec;
use crate::fill::FillError;

const TWO_ROW_SUFFIXES: &[&str] = &["two_row", "two-row", "tworow"];

/// A parsed cell override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellCodes {
    /// The only train to look up in this cell, if named.
    pub train_spec: Option<TrainSpec>,
    pub first: bool,
    pub last: bool,
    pub blank: bool,
    pub two_row: bool,
}

#[derive(Clone, Copy)]
enum Keyword {
    First,
    Last,
    Blank,
}

/// Strip `word` from the end of `text` if it stands as a word of its own.
fn strip_word_suffix<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_suffix(word)?;
    (rest.is_empty() || rest.ends_with(char::is_whitespace)).then(|| rest.trim_end())
}

fn find_in_column<'a>(text: &str, column_specs: &'a [TrainSpec]) -> Option<&'a TrainSpec> {
    let key = TrainSpec::parse(text).ok()?.key();
    column_specs.iter().find(|spec| spec.key() == key)
}

/// Whether `text` reads as a train spec rather than prose: a plain
/// train number, or a number the column uses with another weekday.
fn names_a_train(text: &str, column_specs: &[TrainSpec]) -> bool {
    let Ok(spec) = TrainSpec::parse(text) else {
        return false;
    };
    let number = spec.number();
    !column_specs.is_empty()
        && (number.chars().all(|c| c.is_ascii_digit())
            || column_specs.iter().any(|c| c.number() == number))
}

/// Parse the override code in a cell of a column holding `column_specs`.
///
/// Returns `Ok(None)` for text that is not a code, including prose that
/// happens to end in a keyword. A code keyword preceded by a train number
/// that the column does not list is an error.
///
/// # Examples
///
/// ```
/// use timetable_fill::domain::split_column_key;
/// use timetable_fill::spec::parse_cell_codes;
///
/// let specs = split_column_key("59 / 174").unwrap();
/// let codes = parse_cell_codes("59 last", &specs).unwrap().unwrap();
/// assert_eq!(codes.train_spec.unwrap().number(), "59");
/// assert!(codes.last);
///
/// assert!(parse_cell_codes("See note", &specs).unwrap().is_none());
/// assert!(parse_cell_codes("58 last", &specs).is_err());
/// assert!(parse_cell_codes("Runs last", &specs).unwrap().is_none());
/// ```
pub fn parse_cell_codes(
    text: &str,
    column_specs: &[TrainSpec],
) -> Result<Option<CellCodes>, FillError> {
    let mut rest = text.trim();
    let mut codes = CellCodes::default();

    if let Some(stripped) = TWO_ROW_SUFFIXES
        .iter()
        .find_map(|suffix| strip_word_suffix(rest, suffix))
    {
        codes.two_row = true;
        rest = stripped;
    }

    let keyword = [
        ("last", Keyword::Last),
        ("first", Keyword::First),
        ("blank", Keyword::Blank),
    ]
    .into_iter()
    .find_map(|(word, kw)| strip_word_suffix(rest, word).map(|prefix| (prefix, kw)));

    if let Some((prefix, keyword)) = keyword {
        if prefix.is_empty() {
            return Ok(match keyword {
                Keyword::First => Some(CellCodes { first: true, ..codes }),
                Keyword::Last => Some(CellCodes { last: true, ..codes }),
                Keyword::Blank => None,
            });
        }
        let Some(spec) = find_in_column(prefix, column_specs) else {
            if names_a_train(prefix, column_specs) {
                return Err(FillError::Input(format!(
                    "cell code {text:?} names a train not in its column"
                )));
            }
            return Ok(None);
        };
        codes.train_spec = Some(spec.clone());
        match keyword {
            Keyword::First => codes.first = true,
            Keyword::Last => codes.last = true,
            Keyword::Blank => codes.blank = true,
        }
        return Ok(Some(codes));
    }

    if rest.is_empty() {
        return Ok(codes.two_row.then_some(codes));
    }

    Ok(find_in_column(rest, column_specs).map(|spec| CellCodes {
        train_spec: Some(spec.clone()),
        ..codes
    }))
}

/// Replace a cell's keyword text with its display fragment.
///
/// `blank` becomes a single space; arrow keywords become glyphs (HTML
/// divs with alignment, or bare characters in text).
pub fn cell_substitution(text: &str, doing_html: bool) -> Option<&'static str> {
    let html = match text.trim() {
        "blank" => return Some(" "),
        "downarrow" => r#"<div style="text-align: center; font-weight: bold;">&#x2193;</div>"#,
        "uparrow" => r#"<div style="text-align: center; font-weight: bold;">&#x2191;</div>"#,
        "rightarrow" => r#"<div style="text-align: center; font-weight: bold;">&#x2192;</div>"#,
        "downrightarrow" => r#"<div style="text-align: right; font-weight: bold;">&#x2198;</div>"#,
        "rightdownarrow" => r#"<div style="text-align: left; font-weight: bold;">&#x2198;</div>"#,
        "uprightarrow" => r#"<div style="text-align: right; font-weight: bold;">&#x2197;</div>"#,
        "rightuparrow" => r#"<div style="text-align: left; font-weight: bold;">&#x2197;</div>"#,
        _ => return None,
    };
    if doing_html {
        return Some(html);
    }
    Some(match text.trim() {
        "downarrow" => "↓",
        "uparrow" => "↑",
        "rightarrow" => "→",
        "downrightarrow" | "rightdownarrow" => "↘",
        _ => "↗",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split_column_key;
    use proptest::prelude::*;

    fn specs(key: &str) -> Vec<TrainSpec> {
        split_column_key(key).unwrap()
    }

    #[test]
    fn empty_cell_is_not_a_code() {
        assert_eq!(parse_cell_codes("", &specs("59")).unwrap(), None);
        assert_eq!(parse_cell_codes("   ", &specs("59")).unwrap(), None);
    }

    #[test]
    fn bare_first_and_last() {
        let codes = parse_cell_codes("last", &specs("59")).unwrap().unwrap();
        assert!(codes.last && !codes.first && codes.train_spec.is_none());

        let codes = parse_cell_codes(" first ", &specs("59")).unwrap().unwrap();
        assert!(codes.first && !codes.last);
    }

    #[test]
    fn train_scoped_codes() {
        let column = specs("59 / 174");
        let codes = parse_cell_codes("174 first", &column).unwrap().unwrap();
        assert_eq!(codes.train_spec.unwrap().key(), "174");
        assert!(codes.first);

        let codes = parse_cell_codes("59 blank", &column).unwrap().unwrap();
        assert!(codes.blank);
        assert_eq!(codes.train_spec.unwrap().key(), "59");
    }

    #[test]
    fn bare_blank_is_free_text() {
        assert_eq!(parse_cell_codes("blank", &specs("59")).unwrap(), None);
    }

    #[test]
    fn bare_train_spec_selects_train() {
        let codes = parse_cell_codes("174", &specs("59/174")).unwrap().unwrap();
        assert_eq!(codes.train_spec.unwrap().key(), "174");
        assert!(!codes.first && !codes.last && !codes.blank && !codes.two_row);
    }

    #[test]
    fn weekday_specs_match_by_key() {
        let column = specs("91 monday / 91 tuesday");
        let codes = parse_cell_codes("91 tuesday last", &column).unwrap().unwrap();
        assert_eq!(codes.train_spec.unwrap().key(), "91 tuesday");
        assert!(parse_cell_codes("91 last", &column).is_err());
    }

    #[test]
    fn two_row_suffixes() {
        for suffix in ["two_row", "two-row", "tworow"] {
            let codes = parse_cell_codes(suffix, &specs("59")).unwrap().unwrap();
            assert!(codes.two_row);
            assert!(codes.train_spec.is_none());

            let text = format!("59 first {suffix}");
            let codes = parse_cell_codes(&text, &specs("59")).unwrap().unwrap();
            assert!(codes.two_row && codes.first);
        }
    }

    #[test]
    fn unknown_train_with_keyword_is_input_error() {
        let err = parse_cell_codes("58 last", &specs("59/174")).unwrap_err();
        assert!(matches!(err, FillError::Input(_)));
    }

    #[test]
    fn keyword_must_be_its_own_word() {
        assert_eq!(parse_cell_codes("ballast", &specs("59")).unwrap(), None);
        assert_eq!(parse_cell_codes("59first", &specs("59")).unwrap(), None);
    }

    #[test]
    fn free_text_is_not_a_code() {
        assert_eq!(parse_cell_codes("Does not run", &specs("59")).unwrap(), None);
    }

    #[test]
    fn prose_ending_in_a_keyword_is_free_text() {
        let column = specs("59 / 174");
        for text in ["Leave blank", "Runs last", "Stops here first", "Bus 8 last two-row"] {
            assert_eq!(parse_cell_codes(text, &column).unwrap(), None, "{text}");
        }
    }

    #[test]
    fn keyword_columns_only_take_bare_codes() {
        let codes = parse_cell_codes("last", &[]).unwrap().unwrap();
        assert!(codes.last);
        assert_eq!(parse_cell_codes("59 last", &[]).unwrap(), None);
    }

    #[test]
    fn substitutions() {
        assert_eq!(cell_substitution("blank", true), Some(" "));
        assert_eq!(cell_substitution(" blank ", false), Some(" "));
        assert_eq!(cell_substitution("downarrow", false), Some("↓"));
        assert_eq!(cell_substitution("rightuparrow", false), Some("↗"));
        assert!(cell_substitution("uparrow", true).unwrap().contains("&#x2191;"));
        assert!(
            cell_substitution("downrightarrow", true)
                .unwrap()
                .contains("text-align: right")
        );
        assert!(
            cell_substitution("rightdownarrow", true)
                .unwrap()
                .contains("text-align: left")
        );
        assert_eq!(cell_substitution("59", true), None);
    }

    proptest! {
        #[test]
        fn never_panics(text in ".{0,40}") {
            let _ = parse_cell_codes(&text, &specs("59 / 174"));
        }

        #[test]
        fn plain_numbers_in_column_are_codes(n in 1u32..10000) {
            let column = specs(&n.to_string());
            let codes = parse_cell_codes(&format!("{n} last"), &column).unwrap().unwrap();
            prop_assert!(codes.last);
            let spec = codes.train_spec.unwrap();
            prop_assert_eq!(spec.number(), n.to_string());
        }
    }
}
