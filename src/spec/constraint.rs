use std::fmt;

use serde::{Serialize, Serializer};

/// Plot corner a room can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }
}

/// Side of the target room a relative placement attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeDirection {
    LeftOf,
    RightOf,
    TopOf,
    BottomOf,
    TopLeftOf,
    TopRightOf,
    BottomLeftOf,
    BottomRightOf,
}

/// Horizontal component of a relative direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Aligned,
    Right,
}

/// Vertical component of a relative direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Above,
    Aligned,
    Below,
}

impl RelativeDirection {
    /// Prefixes accepted in constraint text, longest first so that
    /// `top-left-of-` is tried before `top-of-`.
    const PREFIXES: [(&'static str, RelativeDirection); 10] = [
        ("bottom-right-of-", RelativeDirection::BottomRightOf),
        ("bottom-left-of-", RelativeDirection::BottomLeftOf),
        ("top-right-of-", RelativeDirection::TopRightOf),
        ("top-left-of-", RelativeDirection::TopLeftOf),
        ("bottom-of-", RelativeDirection::BottomOf),
        ("right-of-", RelativeDirection::RightOf),
        ("left-of-", RelativeDirection::LeftOf),
        ("top-of-", RelativeDirection::TopOf),
        ("above-", RelativeDirection::TopOf),
        ("below-", RelativeDirection::BottomOf),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeDirection::LeftOf => "left-of",
            RelativeDirection::RightOf => "right-of",
            RelativeDirection::TopOf => "top-of",
            RelativeDirection::BottomOf => "bottom-of",
            RelativeDirection::TopLeftOf => "top-left-of",
            RelativeDirection::TopRightOf => "top-right-of",
            RelativeDirection::BottomLeftOf => "bottom-left-of",
            RelativeDirection::BottomRightOf => "bottom-right-of",
        }
    }

    pub fn components(&self) -> (Horizontal, Vertical) {
        match self {
            RelativeDirection::LeftOf => (Horizontal::Left, Vertical::Aligned),
            RelativeDirection::RightOf => (Horizontal::Right, Vertical::Aligned),
            RelativeDirection::TopOf => (Horizontal::Aligned, Vertical::Above),
            RelativeDirection::BottomOf => (Horizontal::Aligned, Vertical::Below),
            RelativeDirection::TopLeftOf => (Horizontal::Left, Vertical::Above),
            RelativeDirection::TopRightOf => (Horizontal::Right, Vertical::Above),
            RelativeDirection::BottomLeftOf => (Horizontal::Left, Vertical::Below),
            RelativeDirection::BottomRightOf => (Horizontal::Right, Vertical::Below),
        }
    }
}

/// Positional rule for one room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    Corner(Corner),
    Centered,
    RelativeTo {
        direction: RelativeDirection,
        target: String,
    },
    Free,
}

impl Constraint {
    /// Parse constraint text. Returns `None` for text outside the vocabulary;
    /// callers decide whether that is a warning or an error.
    ///
    /// Matching is case-insensitive and treats spaces and underscores like
    /// dashes, so `Left of Kitchen` and `left_of_kitchen` both parse. A
    /// relative target keeps its own spelling, lowercased, so it can be
    /// matched against room keys exactly.
    pub fn parse(text: &str) -> Option<Constraint> {
        let norm = normalize_token(text);
        let constraint = match norm.as_str() {
            "" | "any" | "free" | "auto" | "none" => Constraint::Free,
            "top-left" => Constraint::Corner(Corner::TopLeft),
            "top-right" => Constraint::Corner(Corner::TopRight),
            "bottom-left" => Constraint::Corner(Corner::BottomLeft),
            "bottom-right" => Constraint::Corner(Corner::BottomRight),
            "center" | "centre" | "centered" | "centred" | "middle" => Constraint::Centered,
            other => {
                let (prefix, direction) = RelativeDirection::PREFIXES
                    .iter()
                    .find(|(prefix, _)| other.len() > prefix.len() && other.starts_with(*prefix))
                    .copied()?;
                Constraint::RelativeTo {
                    direction,
                    target: raw_suffix(text, prefix.len()).to_lowercase(),
                }
            }
        };
        Some(constraint)
    }

    /// Corner and centered rooms are resolved before relative and free ones.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Constraint::Corner(_) | Constraint::Centered)
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Constraint::RelativeTo { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Corner(corner) => f.write_str(corner.as_str()),
            Constraint::Centered => f.write_str("center"),
            Constraint::RelativeTo { direction, target } => {
                write!(f, "{}-{}", direction.as_str(), target)
            }
            Constraint::Free => f.write_str("any"),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Lower-case, trim, and fold runs of whitespace or underscores into `-`.
pub(crate) fn normalize_token(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_dash = true;
            continue;
        }
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.extend(ch.to_lowercase());
    }
    out
}

/// The part of `text` left after the first `consumed` bytes of its
/// normalized form, in the original spelling.
fn raw_suffix(text: &str, consumed: usize) -> &str {
    let text = text.trim();
    let mut emitted = 0;
    let mut pending_dash = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_dash = true;
            continue;
        }
        if pending_dash && emitted > 0 {
            emitted += 1;
        }
        pending_dash = false;
        if emitted >= consumed {
            return &text[idx..];
        }
        emitted += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    ""
}
