//! Drawer items and section name classification.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Section name shared by every item whose label does not start with a letter.
pub const NON_LETTER_SECTION: &str = "#";

/// Trait for items that can be placed in the drawer.
///
/// The drawer only reads labels; items stay owned by the caller.
///
/// # Example
///
/// ```
/// use trebuchet_drawer::DrawerItem;
///
/// struct App {
///     title: String,
///     remote: bool,
/// }
///
/// impl DrawerItem for App {
///     fn label(&self) -> &str {
///         &self.title
///     }
///
///     fn section_hint(&self) -> Option<&str> {
///         self.remote.then_some("Remote")
///     }
/// }
/// ```
pub trait DrawerItem {
    /// Returns the display label the drawer sorts and sections by.
    fn label(&self) -> &str;

    /// Returns an explicit section name, overriding the one derived from
    /// the label.
    fn section_hint(&self) -> Option<&str> {
        None
    }
}

impl DrawerItem for String {
    fn label(&self) -> &str {
        self
    }
}

impl DrawerItem for &str {
    fn label(&self) -> &str {
        self
    }
}

impl DrawerItem for Box<str> {
    fn label(&self) -> &str {
        self
    }
}

/// Computes the section name for a display label.
///
/// The first grapheme of the trimmed label decides the section. It is
/// decomposed (NFD) so accented letters file under their base letter in
/// either normalization form; letters map to their uppercase form,
/// everything else (digits, symbols, an empty label) collapses into
/// [`NON_LETTER_SECTION`].
pub fn section_name_for(label: &str) -> String {
    let Some(first) = label.trim_start().graphemes(true).next() else {
        return NON_LETTER_SECTION.to_string();
    };

    match first.nfd().next() {
        Some(c) if c.is_alphabetic() => section_letter(c).to_string(),
        _ => NON_LETTER_SECTION.to_string(),
    }
}

/// Uppercase form of `c`, or `c` itself when uppercasing would expand it
/// into several characters ("ß" to "SS").
fn section_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Case- and accent-insensitive sort key, consistent with
/// [`section_name_for`].
fn sort_key(label: &str) -> String {
    label
        .trim_start()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the section name of `item`, preferring its section hint.
pub fn section_name<T: DrawerItem + ?Sized>(item: &T) -> String {
    match active_hint(item) {
        Some(hint) => hint.to_string(),
        None => section_name_for(item.label()),
    }
}

fn active_hint<T: DrawerItem + ?Sized>(item: &T) -> Option<&str> {
    item.section_hint().filter(|hint| !hint.is_empty())
}

/// Returns `true` if the section of `item` comes from its hint rather than
/// its label.
pub(crate) fn is_hinted<T: DrawerItem + ?Sized>(item: &T) -> bool {
    active_hint(item).is_some()
}

/// Drawer sort order: hinted items first (by hint), then labels compared
/// ignoring case and accents, ties broken by the exact label.
pub fn compare_items<T: DrawerItem + ?Sized>(a: &T, b: &T) -> Ordering {
    match (active_hint(a), active_hint(b)) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| {
        let (x, y) = (a.label().trim_start(), b.label().trim_start());
        sort_key(x).cmp(&sort_key(y)).then_with(|| x.cmp(y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Remote(&'static str);

    impl DrawerItem for Remote {
        fn label(&self) -> &str {
            self.0
        }

        fn section_hint(&self) -> Option<&str> {
            Some("Remote")
        }
    }

    #[test]
    fn test_letters_uppercase() {
        assert_eq!(section_name_for("apple"), "A");
        assert_eq!(section_name_for("Zebra"), "Z");
        assert_eq!(section_name_for("  banana"), "B");
    }

    #[test]
    fn test_non_letters_collapse() {
        assert_eq!(section_name_for("#1 App"), "#");
        assert_eq!(section_name_for("7 Minute Workout"), "#");
        assert_eq!(section_name_for("@home"), "#");
        assert_eq!(section_name_for(""), "#");
        assert_eq!(section_name_for("   "), "#");
    }

    #[test]
    fn test_non_latin_letters_keep_their_own_section() {
        assert_eq!(section_name_for("Яндекс"), "Я");
        assert_eq!(section_name_for("ωmega"), "Ω");
    }

    #[test]
    fn test_accented_letters_use_base_letter() {
        // Precomposed and decomposed forms agree
        assert_eq!(section_name_for("\u{e9}cole"), "E");
        assert_eq!(section_name_for("e\u{301}cole"), "E");
        assert_eq!(section_name_for("\u{c5}ngstr\u{f6}m"), "A");
    }

    #[test]
    fn test_expanding_uppercase_keeps_one_char() {
        assert_eq!(section_name_for("\u{df}tadt"), "\u{df}");
        assert_eq!(section_name_for("\u{df}tadt").chars().count(), 1);
    }

    #[test]
    fn test_compare_ignores_accents() {
        let mut labels = vec!["Zoom", "Files", "Email", "\u{e9}cran"];
        labels.sort_by(|a, b| compare_items(a, b));
        assert_eq!(labels, ["\u{e9}cran", "Email", "Files", "Zoom"]);

        assert_eq!(
            compare_items(&"e\u{301}cran", &"\u{e9}cran"),
            "e\u{301}cran".cmp("\u{e9}cran")
        );
    }

    #[test]
    fn test_compare_items() {
        let mut labels = vec!["banana", "Apple", "#1 App", "apple", "Zebra"];
        labels.sort_by(|a, b| compare_items(a, b));
        assert_eq!(labels, ["#1 App", "Apple", "apple", "banana", "Zebra"]);

        assert_eq!(compare_items(&Remote("Zebra"), &Remote("Apple")), Ordering::Greater);
        assert_eq!(compare_items(&Remote("Zebra"), &Remote("Zebra")), Ordering::Equal);
    }

    #[test]
    fn test_section_hint_overrides_label() {
        let item = Remote("Angry Birds");
        assert_eq!(section_name(&item), "Remote");
        assert!(is_hinted(&item));
        assert!(!is_hinted(&"Angry Birds"));
    }
}
