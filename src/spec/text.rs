//! Line-oriented spec source: `name,width,height[,position]` per line and
//! `WxH` plot sizes, the formats the floor-plan front ends exchange.

use super::core::RawRoom;
use crate::error::{LayoutError, Result};
use crate::geometry::Plot;

/// Parse one room per line. Blank lines and `#` comments are skipped; any
/// other line with fewer than three fields fails the whole request.
pub fn parse_room_lines(text: &str) -> Result<Vec<RawRoom>> {
    let mut rooms = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            return Err(LayoutError::InvalidSpec(format!(
                "line {}: expected `name, width, height[, position]`, got `{line}`",
                idx + 1
            )));
        }
        let mut room = RawRoom::new(fields[0], fields[1], fields[2]);
        if let Some(position) = fields.get(3) {
            room = room.with_constraint(*position);
        }
        rooms.push(room);
    }
    Ok(rooms)
}

/// Parse a JSON array of room entries.
pub fn parse_room_json(text: &str) -> Result<Vec<RawRoom>> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a plot size such as `40x30`, `40 X 30` or `40 by 30`.
pub fn parse_plot(text: &str) -> Result<Plot> {
    let lowered = text.trim().to_lowercase();
    let (w, h) = lowered
        .split_once("by")
        .or_else(|| lowered.split_once('x'))
        .ok_or_else(|| LayoutError::InvalidPlot(format!("expected `WxH`, got `{text}`")))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|_| LayoutError::InvalidPlot(format!("expected `WxH`, got `{text}`")))
    };
    Plot::new(parse(w)?, parse(h)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Dimension;

    #[test]
    fn parses_room_lines_with_optional_position() {
        let rooms = parse_room_lines(
            "Master Bedroom, 14, 12, top-left\n\n# utility\nBath, 8, 6\nKitchen,12,10,bottom-right\n",
        )
        .unwrap();
        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms[0].name, "Master Bedroom");
        assert_eq!(rooms[0].width, Dimension::Text("14".into()));
        assert_eq!(rooms[0].constraint.as_deref(), Some("top-left"));
        assert_eq!(rooms[1].constraint, None);
        assert_eq!(rooms[2].constraint.as_deref(), Some("bottom-right"));
    }

    #[test]
    fn short_line_names_line_number() {
        let err = parse_room_lines("Bath, 8, 6\nKitchen, 12\n").unwrap_err();
        match err {
            LayoutError::InvalidSpec(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parses_plot_spellings() {
        assert_eq!(parse_plot("40x30").unwrap(), Plot::new(40, 30).unwrap());
        assert_eq!(parse_plot(" 40 X 30 ").unwrap(), Plot::new(40, 30).unwrap());
        assert_eq!(parse_plot("25 by 60").unwrap(), Plot::new(25, 60).unwrap());
    }

    #[test]
    fn rejects_malformed_plot() {
        for text in ["40", "ax30", "0x30", "40x-1", ""] {
            let err = parse_plot(text).unwrap_err();
            assert!(err.is_invalid_spec(), "{text:?}");
        }
    }

    #[test]
    fn parses_json_rooms() {
        let rooms = parse_room_json(r#"[{"name":"Office","width":10,"height":9}]"#).unwrap();
        assert_eq!(rooms[0].width, Dimension::Number(10));
        assert!(parse_room_json("{not json").is_err());
    }
}
