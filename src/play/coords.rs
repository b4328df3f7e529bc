//! Text coordinates: column letter then 1-based row (`D3`).

use crate::core::Move;

/// Parse a coordinate such as `D3` or `d3` on a `size`×`size` board.
///
/// Surrounding whitespace is ignored. Returns `None` if the text is
/// malformed or the cell is off the board.
#[must_use]
pub fn parse_coordinate(text: &str, size: usize) -> Option<Move> {
    let text = text.trim();
    let mut chars = text.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let col = (letter as u8 - b'A') as usize;

    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }

    let mv = Move::new(row - 1, col);
    mv.in_bounds(size).then_some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_coordinate("D3", 8), Some(Move::new(2, 3)));
        assert_eq!(parse_coordinate(" a1 ", 8), Some(Move::new(0, 0)));
        assert_eq!(parse_coordinate("J10", 10), Some(Move::new(9, 9)));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse_coordinate("", 8), None);
        assert_eq!(parse_coordinate("3D", 8), None);
        assert_eq!(parse_coordinate("D0", 8), None);
        assert_eq!(parse_coordinate("D9", 8), None);
        assert_eq!(parse_coordinate("I1", 8), None);
        assert_eq!(parse_coordinate("D-1", 8), None);
    }

    #[test]
    fn test_display_round_trip() {
        let mv = Move::new(4, 5);
        assert_eq!(parse_coordinate(&mv.to_string(), 8), Some(mv));
    }
}
