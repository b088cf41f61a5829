use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::constraint::{Constraint, normalize_token};
use crate::error::{LayoutError, Result};

/// Room size as supplied by a spec source: JSON numbers or numeric text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(i64),
    Text(String),
}

impl Dimension {
    fn positive(&self) -> Option<i32> {
        let value = match self {
            Dimension::Number(n) => *n,
            Dimension::Text(text) => text.trim().parse::<i64>().ok()?,
        };
        (value > 0 && value <= i32::MAX as i64).then_some(value as i32)
    }
}

impl From<i64> for Dimension {
    fn from(value: i64) -> Self {
        Dimension::Number(value)
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        Dimension::Number(value as i64)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::Text(value.to_string())
    }
}

/// Unvalidated room entry as it arrives from a spec source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRoom {
    pub name: String,
    pub width: Dimension,
    pub height: Dimension,
    #[serde(default, alias = "position", alias = "pos")]
    pub constraint: Option<String>,
}

impl RawRoom {
    pub fn new(
        name: impl Into<String>,
        width: impl Into<Dimension>,
        height: impl Into<Dimension>,
    ) -> Self {
        Self {
            name: name.into(),
            width: width.into(),
            height: height.into(),
            constraint: None,
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }
}

/// A validated room request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSpec {
    pub name: String,
    pub key: String,
    pub width: i32,
    pub height: i32,
    pub constraint: Constraint,
}

impl RoomSpec {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// How constraint text outside the vocabulary is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintPolicy {
    /// Fall back to a free placement and report a warning.
    #[default]
    Lenient,
    /// Reject the request with [`LayoutError::InvalidSpec`].
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Constraint text did not match the vocabulary; the room is placed freely.
    Unrecognized,
    /// A relative constraint names a room that is not in the request.
    UnknownTarget,
    /// A relative target matches no key exactly and several keys once
    /// separators are ignored; the room is placed freely.
    AmbiguousTarget,
}

/// Constraint text that was accepted but not understood as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintWarning {
    pub key: String,
    pub constraint: String,
    pub kind: WarningKind,
}

/// Output of [`validate_rooms`]: the rooms in input order plus warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRooms {
    pub rooms: Vec<RoomSpec>,
    pub warnings: Vec<ConstraintWarning>,
}

impl ValidatedRooms {
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Validate raw entries into [`RoomSpec`]s.
///
/// Any malformed entry fails the whole request. Duplicate keys are rejected
/// as well, since relative references to them would be ambiguous.
pub fn validate_rooms(raw: &[RawRoom], policy: ConstraintPolicy) -> Result<ValidatedRooms> {
    let mut rooms = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in raw.iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(LayoutError::InvalidSpec(format!(
                "entry {}: room name is empty",
                index + 1
            )));
        }
        let key = name.to_lowercase();
        let width = entry.width.positive().ok_or_else(|| {
            LayoutError::InvalidSpec(format!(
                "room `{name}`: width {:?} is not a positive integer",
                entry.width
            ))
        })?;
        let height = entry.height.positive().ok_or_else(|| {
            LayoutError::InvalidSpec(format!(
                "room `{name}`: height {:?} is not a positive integer",
                entry.height
            ))
        })?;

        if !seen.insert(key.clone()) {
            return Err(LayoutError::InvalidSpec(format!(
                "duplicate room key `{key}`"
            )));
        }

        let text = entry.constraint.as_deref().unwrap_or("");
        let constraint = match Constraint::parse(text) {
            Some(constraint) => constraint,
            None if policy == ConstraintPolicy::Strict => {
                return Err(LayoutError::InvalidSpec(format!(
                    "room `{name}`: unrecognized constraint `{}`",
                    text.trim()
                )));
            }
            None => {
                warnings.push(ConstraintWarning {
                    key: key.clone(),
                    constraint: text.trim().to_string(),
                    kind: WarningKind::Unrecognized,
                });
                Constraint::Free
            }
        };

        rooms.push(RoomSpec {
            name: name.to_string(),
            key,
            width,
            height,
            constraint,
        });
    }

    resolve_targets(&mut rooms, &mut warnings);
    Ok(ValidatedRooms { rooms, warnings })
}

/// Rewrite relative targets to the room key they refer to. An exact key
/// match wins; otherwise the target is compared with separators folded, so
/// `left-of-living_room` still finds the `living room` key when no other key
/// folds to the same token.
fn resolve_targets(rooms: &mut [RoomSpec], warnings: &mut Vec<ConstraintWarning>) {
    let keys: HashSet<String> = rooms.iter().map(|room| room.key.clone()).collect();
    let mut by_token: HashMap<String, Vec<String>> = HashMap::new();
    for room in rooms.iter() {
        by_token
            .entry(normalize_token(&room.key))
            .or_default()
            .push(room.key.clone());
    }

    for room in rooms.iter_mut() {
        let Constraint::RelativeTo { target, .. } = &mut room.constraint else {
            continue;
        };
        if keys.contains(target.as_str()) {
            continue;
        }
        let kind = match by_token.get(&normalize_token(target)).map(Vec::as_slice) {
            Some([key]) => {
                *target = key.clone();
                continue;
            }
            Some(_) => WarningKind::AmbiguousTarget,
            None => WarningKind::UnknownTarget,
        };
        warnings.push(ConstraintWarning {
            key: room.key.clone(),
            constraint: room.constraint.to_string(),
            kind,
        });
    }
}
