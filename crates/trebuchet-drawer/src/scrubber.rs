//! The letter scrubber beside the drawer.
//!
//! The scrubber always shows the full alphabet, plus up to
//! [`MAX_CUSTOM_LABELS`] custom single-glyph labels before or after it.
//! Letters with no matching drawer section are drawn grayed out; a finger
//! sliding across them resolves to the nearest populated label in the
//! direction of travel.
//!
//! ```text
//!  labels:  ["#", "A", "C"]
//!
//!  index      0   1   2   3   4  ...  26
//!  text       #   A   B   C   D  ...   Z
//!  lit        *   *       *
//!  previous   0   1   1   3   3  ...   3
//!  next       0   1   3   3   3  ...   3
//! ```
//!
//! Touch indices are visual positions. In right-to-left layouts the
//! scrubber is mirrored, so visual index `i` addresses label
//! [`effective_index`]`(i, len, true)`.

use std::collections::BTreeMap;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::ValidationError;
use crate::logging::{span_names, targets, PerfSpan};

/// Number of letters in the scrubber alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Maximum number of custom labels next to the alphabet.
pub const MAX_CUSTOM_LABELS: usize = 8;

/// Maximum number of labels a scrubber accepts.
pub const MAX_LABELS: usize = ALPHABET_LEN + MAX_CUSTOM_LABELS;

/// One slot of the scrubber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabel {
    /// Text drawn in the scrubber.
    pub text: String,
    /// Whether a drawer section maps to this label.
    pub highlighted: bool,
    /// Position of the matching label in the input label list.
    pub adapter_index: Option<usize>,
    /// Nearest highlighted index at or before this one, or the first
    /// highlighted index when none precedes it.
    pub previous: usize,
    /// Nearest highlighted index at or after this one, or the last
    /// highlighted index when none follows it.
    pub next: usize,
}

impl SectionLabel {
    fn new(text: impl Into<String>, adapter_index: Option<usize>) -> Self {
        Self {
            text: text.into(),
            highlighted: adapter_index.is_some(),
            adapter_index,
            previous: 0,
            next: 0,
        }
    }
}

/// How a label string takes part in the alphabet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKind {
    /// A reserved alphabet slot with no members.
    Reserved,
    /// One of the 26 alphabet letters, uppercased.
    Letter(char),
    /// Anything else.
    Custom,
}

fn classify(label: &str) -> LabelKind {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (None, _) => LabelKind::Reserved,
        (Some(c), None) if c.is_ascii_alphabetic() => {
            LabelKind::Letter(c.to_ascii_uppercase())
        }
        _ => LabelKind::Custom,
    }
}

/// Maps a visual touch index to a label index and back.
///
/// Right-to-left layouts mirror the scrubber; indices past the end are
/// clamped to the last label.
pub fn effective_index(index: usize, len: usize, rtl: bool) -> usize {
    if rtl {
        len.saturating_sub(1).saturating_sub(index)
    } else {
        index
    }
}

/// Lays out `labels` as the alphabet plus custom labels.
///
/// `labels` holds one entry per drawer section, in order. Single letters
/// light up their slot in the fixed A..Z run; empty strings are reserved
/// slots without members; any other label is a custom label placed before
/// or after the alphabet, keeping its relative position.
///
/// The list is rejected when a custom label is longer than one character,
/// letters are out of order, a custom label splits the letters into two
/// runs, or there are more than [`MAX_CUSTOM_LABELS`] custom labels while
/// the list is longer than [`MAX_LABELS`].
pub fn build_sections<S: AsRef<str>>(
    labels: &[S],
) -> Result<Vec<SectionLabel>, ValidationError> {
    let _perf = PerfSpan::new(span_names::SCRUBBER);

    let mut letters: [Option<usize>; ALPHABET_LEN] = [None; ALPHABET_LEN];
    let mut leading = Vec::new();
    let mut trailing = Vec::new();
    let mut last_letter: Option<char> = None;

    for (index, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        match classify(label) {
            LabelKind::Reserved => {}
            LabelKind::Letter(letter) => {
                if let Some(previous) = last_letter.filter(|&previous| letter <= previous) {
                    return Err(ValidationError::LettersOutOfOrder {
                        index,
                        letter,
                        previous,
                    });
                }
                if !trailing.is_empty() {
                    return Err(ValidationError::LettersSplit { index });
                }
                letters[usize::from(letter as u8 - b'A')] = Some(index);
                last_letter = Some(letter);
            }
            LabelKind::Custom => {
                if label.graphemes(true).nth(1).is_some() {
                    return Err(ValidationError::LabelTooLong {
                        index,
                        label: label.to_string(),
                    });
                }
                let slot = SectionLabel::new(label, Some(index));
                if last_letter.is_some() {
                    trailing.push(slot);
                } else {
                    leading.push(slot);
                }
            }
        }
    }

    let custom = leading.len() + trailing.len();
    if custom > MAX_CUSTOM_LABELS && labels.len() > MAX_LABELS {
        return Err(ValidationError::TooManyCustomLabels {
            custom,
            total: labels.len(),
        });
    }

    let alphabet = (b'A'..=b'Z')
        .zip(letters)
        .map(|(letter, adapter_index)| SectionLabel::new(char::from(letter), adapter_index));

    let mut sections: Vec<SectionLabel> = leading
        .into_iter()
        .chain(alphabet)
        .chain(trailing)
        .collect();
    link_highlights(&mut sections);

    tracing::debug!(
        target: targets::SCRUBBER,
        labels = labels.len(),
        custom,
        highlighted = sections.iter().filter(|s| s.highlighted).count(),
        "built scrubber sections"
    );

    Ok(sections)
}

/// Points every label at its nearest highlighted neighbours, one pass in
/// each direction.
fn link_highlights(sections: &mut [SectionLabel]) {
    let first = sections.iter().position(|s| s.highlighted);
    let last = sections.iter().rposition(|s| s.highlighted);

    let mut nearest = first;
    for (index, section) in sections.iter_mut().enumerate() {
        if section.highlighted {
            nearest = Some(index);
        }
        section.previous = nearest.unwrap_or(index);
    }

    let mut nearest = last;
    for (index, section) in sections.iter_mut().enumerate().rev() {
        if section.highlighted {
            nearest = Some(index);
        }
        section.next = nearest.unwrap_or(index);
    }
}

/// How the scrubber presents its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrubberMode {
    /// The collapsed alphabet with custom labels.
    Letters,
    /// One entry per raw label, all highlighted (list mode).
    Raw,
    /// No usable labels; drawn as a plain line.
    #[default]
    Unavailable,
}

/// A scrubber built from a drawer's section labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scrubber {
    sections: Vec<SectionLabel>,
    mode: ScrubberMode,
}

impl Scrubber {
    /// Build a letter scrubber.
    ///
    /// Labels found in `glyphs` are replaced by their glyph before the
    /// layout is validated.
    pub fn letters<S: AsRef<str>>(
        labels: &[S],
        glyphs: &BTreeMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let labels: Vec<&str> = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                glyphs.get(label).map_or(label, String::as_str)
            })
            .collect();

        Ok(Self {
            sections: build_sections(&labels)?,
            mode: ScrubberMode::Letters,
        })
    }

    /// Build a scrubber showing every label as is.
    pub fn raw<S: AsRef<str>>(labels: &[S]) -> Self {
        let sections = labels
            .iter()
            .enumerate()
            .map(|(index, label)| SectionLabel {
                text: label.as_ref().to_string(),
                highlighted: true,
                adapter_index: Some(index),
                previous: index,
                next: index,
            })
            .collect();

        Self {
            sections,
            mode: ScrubberMode::Raw,
        }
    }

    /// A scrubber without labels.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Build a letter scrubber, falling back to an unavailable one when the
    /// labels cannot be laid out as letters.
    pub fn for_sections<S: AsRef<str>>(labels: &[S], glyphs: &BTreeMap<String, String>) -> Self {
        Self::letters(labels, glyphs).unwrap_or_else(|error| {
            tracing::warn!(
                target: targets::SCRUBBER,
                %error,
                labels = labels.len(),
                "falling back to a plain scrubber"
            );
            Self::unavailable()
        })
    }

    /// The presentation mode.
    pub fn mode(&self) -> ScrubberMode {
        self.mode
    }

    /// Returns `true` unless the scrubber is a plain line.
    pub fn is_available(&self) -> bool {
        self.mode != ScrubberMode::Unavailable
    }

    /// Labels in logical (left-to-right) order.
    pub fn sections(&self) -> &[SectionLabel] {
        &self.sections
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Labels in the order they are drawn.
    pub fn visual_sections(&self, rtl: bool) -> impl Iterator<Item = &SectionLabel> + '_ {
        let len = self.sections.len();
        (0..len).map(move |i| &self.sections[effective_index(i, len, rtl)])
    }

    /// The label drawn at visual `touch_index`, clamped to the last label.
    pub fn label_at(&self, touch_index: usize, rtl: bool) -> Option<&SectionLabel> {
        let len = self.sections.len();
        let clamped = touch_index.min(len.checked_sub(1)?);
        self.sections.get(effective_index(clamped, len, rtl))
    }

    /// Visual index under a touch at `fraction` of the scrubber's length.
    pub fn touch_index_at_fraction(&self, fraction: f32) -> usize {
        let len = self.sections.len();
        if len == 0 || fraction.is_nan() {
            return 0;
        }
        ((fraction.clamp(0.0, 1.0) * len as f32) as usize).min(len - 1)
    }

    /// Resolves a touch to the nearest highlighted label in the direction
    /// of travel.
    ///
    /// Returns `current_touch_index` when its label is highlighted. Otherwise
    /// moving forward (`previous < current`, flipped in right-to-left
    /// layouts) picks the next highlighted label and moving backward the
    /// previous one. Raw and unavailable scrubbers pass the index through.
    pub fn directional_index(
        &self,
        previous_touch_index: usize,
        current_touch_index: usize,
        rtl: bool,
    ) -> usize {
        if self.mode != ScrubberMode::Letters || self.sections.is_empty() {
            return current_touch_index;
        }

        let len = self.sections.len();
        let current = current_touch_index.min(len - 1);
        let section = &self.sections[effective_index(current, len, rtl)];
        if section.highlighted {
            return current;
        }

        let forward = (previous_touch_index < current_touch_index) ^ rtl;
        let target = if forward { section.next } else { section.previous };

        tracing::trace!(
            target: targets::SCRUBBER,
            previous_touch_index,
            current_touch_index,
            rtl,
            forward,
            target,
            "resolved unhighlighted touch"
        );

        effective_index(target, len, rtl)
    }

    /// Resolves a touch to the position of its label in the list the
    /// scrubber was built from.
    ///
    /// Returns `None` when the scrubber is unavailable or no label maps to
    /// a section.
    pub fn adapter_index_for_touch(
        &self,
        previous_touch_index: usize,
        current_touch_index: usize,
        rtl: bool,
    ) -> Option<usize> {
        if self.mode == ScrubberMode::Unavailable {
            return None;
        }

        let index = self.directional_index(previous_touch_index, current_touch_index, rtl);
        self.label_at(index, rtl)?.adapter_index
    }

    /// Visual index of the label for `adapter_index`, used to track the
    /// drawer's scroll position on the scrubber.
    pub fn touch_index_for_adapter_index(&self, adapter_index: usize, rtl: bool) -> Option<usize> {
        let len = self.sections.len();
        self.sections
            .iter()
            .position(|s| s.adapter_index == Some(adapter_index))
            .map(|logical| effective_index(logical, len, rtl))
    }
}
