//! Hint generation and typed-prefix filtering
//!
//! Hints are labelled boxes laid out on an n×n lattice over a screen, or
//! centred on explicit points. A [`HintSet`] narrows them as the user types.

use std::path::{Path, PathBuf};

use crate::color::Color;

/// A labelled on-screen target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub label: String,
}

impl Hint {
    /// Centre of the hint box, where the pointer lands on selection
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Colours used to draw hint boxes and labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintStyle {
    pub bg: Color,
    pub fg: Color,
}

/// Smallest `n` with `n * n >= count`
pub fn lattice_side(count: usize) -> usize {
    let mut n = (count as f64).sqrt().ceil() as usize;
    while n * n < count {
        n += 1;
    }
    while n > 0 && (n - 1) * (n - 1) >= count {
        n -= 1;
    }
    n
}

/// Boxes of an `n × n` lattice over a `width × height` screen, row-major.
///
/// Each box is `size_pct` percent of its cell, centred with equal gaps.
pub fn lattice(width: i32, height: i32, n: usize, size_pct: u32) -> Vec<(i32, i32, i32, i32)> {
    if n == 0 {
        return Vec::new();
    }
    let side = n as i32;
    let cell_w = width / side;
    let cell_h = height / side;
    let box_w = (cell_w * size_pct as i32 / 100).max(1);
    let box_h = (cell_h * size_pct as i32 / 100).max(1);
    let gap_x = (cell_w - box_w) / 2;
    let gap_y = (cell_h - box_h) / 2;

    let mut boxes = Vec::with_capacity(n * n);
    for row in 0..side {
        for col in 0..side {
            boxes.push((
                col * cell_w + gap_x,
                row * cell_h + gap_y,
                box_w,
                box_h,
            ));
        }
    }
    boxes
}

/// Lattice hints labelled `alphabet[row] + alphabet[col]`.
///
/// `desired` defaults to `k²` for an alphabet of `k` characters and may not
/// exceed it. The full `n × n` lattice covering `desired` is returned.
pub fn generate_procedural(
    width: i32,
    height: i32,
    alphabet: &[char],
    desired: Option<usize>,
    size_pct: u32,
) -> Result<Vec<Hint>, HintError> {
    let k = alphabet.len();
    let capacity = k * k;
    let desired = desired.unwrap_or(capacity);
    if desired == 0 {
        return Err(HintError::EmptySource("hint alphabet".to_string()));
    }
    if desired > capacity {
        return Err(HintError::TooMany {
            requested: desired,
            capacity,
        });
    }

    let n = lattice_side(desired);
    let hints = lattice(width, height, n, size_pct)
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, w, h))| {
            let label: String = [alphabet[i / n], alphabet[i % n]].iter().collect();
            Hint { x, y, w, h, label }
        })
        .collect();

    Ok(hints)
}

/// Read one label per line, skipping blank lines
pub fn load_labels(path: &Path) -> Result<Vec<String>, HintError> {
    let content = std::fs::read_to_string(path).map_err(|e| HintError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let labels = parse_labels(&content);
    if labels.is_empty() {
        return Err(HintError::EmptySource(path.display().to_string()));
    }
    tracing::debug!("Loaded {} hint labels from {}", labels.len(), path.display());
    Ok(labels)
}

/// Split a word list into labels
pub fn parse_labels(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lattice hints carrying externally supplied labels, in line order
pub fn generate_external(
    width: i32,
    height: i32,
    labels: Vec<String>,
    size_pct: u32,
) -> Result<Vec<Hint>, HintError> {
    if labels.is_empty() {
        return Err(HintError::EmptySource("hint word list".to_string()));
    }
    let n = lattice_side(labels.len());
    Ok(lattice(width, height, n, size_pct)
        .into_iter()
        .zip(labels)
        .map(|((x, y, w, h), label)| Hint { x, y, w, h, label })
        .collect())
}

/// Shortest uniform labels for `count` targets: one character each when the
/// alphabet suffices, two otherwise
pub fn short_labels(count: usize, alphabet: &[char]) -> Result<Vec<String>, HintError> {
    let k = alphabet.len();
    if k == 0 {
        return Err(HintError::EmptySource("hint alphabet".to_string()));
    }
    if count <= k {
        return Ok(alphabet[..count].iter().map(|c| c.to_string()).collect());
    }
    if count > k * k {
        return Err(HintError::TooMany {
            requested: count,
            capacity: k * k,
        });
    }
    Ok((0..count)
        .map(|i| [alphabet[i / k], alphabet[i % k]].iter().collect())
        .collect())
}

/// Square hints of side `size` centred on each point
pub fn point_hints(points: &[(i32, i32)], labels: Vec<String>, size: i32) -> Vec<Hint> {
    points
        .iter()
        .zip(labels)
        .map(|(&(px, py), label)| Hint {
            x: px - size / 2,
            y: py - size / 2,
            w: size,
            h: size,
            label,
        })
        .collect()
}

/// Does `label`, ignoring spaces, start with `prefix`?
pub fn label_matches(label: &str, prefix: &str) -> bool {
    let mut chars = label.chars().filter(|c| *c != ' ');
    prefix.chars().all(|p| chars.next() == Some(p))
}

/// Hints plus the prefix typed so far
#[derive(Debug, Clone, Default)]
pub struct HintSet {
    hints: Vec<Hint>,
    prefix: String,
}

impl HintSet {
    pub fn new(hints: Vec<Hint>) -> Self {
        Self {
            hints,
            prefix: String::new(),
        }
    }

    /// All hints, ignoring the prefix
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn push(&mut self, c: char) {
        self.prefix.push(c);
    }

    /// Remove the last typed character
    pub fn pop(&mut self) -> Option<char> {
        self.prefix.pop()
    }

    pub fn clear(&mut self) {
        self.prefix.clear();
    }

    /// Hints whose label is still consistent with the prefix
    pub fn candidates(&self) -> Vec<&Hint> {
        self.hints
            .iter()
            .filter(|hint| label_matches(&hint.label, &self.prefix))
            .collect()
    }

    /// The single remaining hint, if the prefix has narrowed to one
    pub fn unique(&self) -> Option<&Hint> {
        self.unique_index().map(|idx| &self.hints[idx])
    }

    /// Position in [`HintSet::hints`] of the single remaining hint
    pub fn unique_index(&self) -> Option<usize> {
        let mut candidates = self
            .hints
            .iter()
            .enumerate()
            .filter(|(_, hint)| label_matches(&hint.label, &self.prefix));
        match (candidates.next(), candidates.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }
}

/// Errors from building a hint source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintError {
    /// The source produced no labels at all
    EmptySource(String),
    Io { path: PathBuf, message: String },
    TooMany { requested: usize, capacity: usize },
}

impl std::fmt::Display for HintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HintError::EmptySource(source) => write!(f, "No hints generated from {}", source),
            HintError::Io { path, message } => {
                write!(f, "Failed to read hint file {}: {}", path.display(), message)
            }
            HintError::TooMany {
                requested,
                capacity,
            } => write!(
                f,
                "Requested {} hints but the alphabet only labels {}",
                requested, capacity
            ),
        }
    }
}

impl std::error::Error for HintError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_lattice_side() {
        assert_eq!(lattice_side(1), 1);
        assert_eq!(lattice_side(4), 2);
        assert_eq!(lattice_side(5), 3);
        assert_eq!(lattice_side(676), 26);
        assert_eq!(lattice_side(0), 0);
    }

    #[test]
    fn test_lattice_boxes_are_centred_in_cells() {
        let boxes = lattice(1000, 800, 2, 50);
        assert_eq!(boxes.len(), 4);
        // cell 500x400, box 250x200, gaps 125/100
        assert_eq!(boxes[0], (125, 100, 250, 200));
        assert_eq!(boxes[3], (625, 500, 250, 200));
    }

    #[test]
    fn test_procedural_labels() {
        let hints = generate_procedural(1000, 800, &alphabet("abc"), None, 50).unwrap();
        let labels: Vec<&str> = hints.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc"]);
    }

    #[test]
    fn test_procedural_empty_alphabet_is_error() {
        assert!(matches!(
            generate_procedural(1000, 800, &[], None, 50),
            Err(HintError::EmptySource(_))
        ));
    }

    #[test]
    fn test_procedural_too_many() {
        assert_eq!(
            generate_procedural(1000, 800, &alphabet("ab"), Some(5), 50),
            Err(HintError::TooMany {
                requested: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_hint_convergence() {
        let chars = alphabet("asdfghjkl");
        for desired in [1, 2, 7, 40, 81] {
            let hints = generate_procedural(1920, 1080, &chars, Some(desired), 60).unwrap();
            assert!(hints.len() >= desired);

            let mut labels: Vec<&str> = hints.iter().map(|h| h.label.as_str()).collect();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), hints.len(), "labels must be unique");

            for (i, hint) in hints.iter().enumerate() {
                let mut set = HintSet::new(hints.clone());
                for c in hint.label.chars() {
                    set.push(c);
                }
                assert_eq!(set.unique(), Some(&hints[i]));
            }
        }
    }

    #[test]
    fn test_label_matches_skips_spaces() {
        assert!(label_matches("foo bar", "foob"));
        assert!(label_matches("foo bar", ""));
        assert!(!label_matches("foo bar", "foo "));
        assert!(!label_matches("ab", "abc"));
    }

    #[test]
    fn test_external_hints() {
        let labels = parse_labels("alpha\n\n  beta \ngamma\n");
        assert_eq!(labels, ["alpha", "beta", "gamma"]);

        let hints = generate_external(1000, 1000, labels, 50).unwrap();
        assert_eq!(hints.len(), 3);
        assert_eq!(hints[1].label, "beta");
        // 2x2 lattice, second cell of the first row
        assert_eq!((hints[1].x, hints[1].y), (625, 125));
    }

    #[test]
    fn test_external_empty_is_error() {
        assert!(matches!(
            generate_external(1000, 1000, Vec::new(), 50),
            Err(HintError::EmptySource(_))
        ));
    }

    #[test]
    fn test_load_labels_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        assert_eq!(load_labels(&path).unwrap(), ["one", "two"]);

        std::fs::write(&path, "\n \n").unwrap();
        assert!(matches!(load_labels(&path), Err(HintError::EmptySource(_))));
    }

    #[test]
    fn test_short_labels() {
        let chars = alphabet("ab");
        assert_eq!(short_labels(2, &chars).unwrap(), ["a", "b"]);
        assert_eq!(short_labels(3, &chars).unwrap(), ["aa", "ab", "ba"]);
        assert!(short_labels(5, &chars).is_err());
    }

    #[test]
    fn test_point_hints_centred() {
        let hints = point_hints(&[(100, 50)], vec!["a".to_string()], 20);
        assert_eq!(hints[0].center(), (100, 50));
        assert_eq!((hints[0].x, hints[0].y), (90, 40));
    }

    #[test]
    fn test_hint_set_pop_and_clear() {
        let hints = generate_procedural(100, 100, &alphabet("ab"), None, 50).unwrap();
        let mut set = HintSet::new(hints);

        set.push('a');
        assert_eq!(set.candidates().len(), 2);
        set.push('b');
        assert_eq!(set.unique().map(|h| h.label.as_str()), Some("ab"));
        assert_eq!(set.pop(), Some('b'));
        assert_eq!(set.prefix(), "a");
        set.clear();
        assert_eq!(set.candidates().len(), 4);
        set.push('z');
        assert!(set.candidates().is_empty());
    }
}
