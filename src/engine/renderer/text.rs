// Built-in 5x7 bitmap font for HUD text
//
// Each glyph is seven rows of five bits, most significant bit on the left.
// Lowercase letters use the uppercase shapes; unknown characters advance the
// cursor without drawing.

use glam::Vec2;

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;

/// Cells per character including the one-cell gap
const ADVANCE_CELLS: f32 = 6.0;

/// Cells per line height; a size-40 line gives 5px cells
const LINE_CELLS: f32 = 8.0;

fn glyph(ch: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// A filled square cell of a laid-out glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCell {
    pub min: Vec2,
    pub size: f32,
}

/// Lay out `text` as filled cells, top-left at `position`, line height `size`
pub fn layout(text: &str, position: Vec2, size: f32) -> Vec<TextCell> {
    let cell = size / LINE_CELLS;
    let mut cells = Vec::new();

    for (index, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };

        let origin = position + Vec2::new(index as f32 * ADVANCE_CELLS * cell, 0.0);
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - column)) != 0 {
                    cells.push(TextCell {
                        min: origin + Vec2::new(column as f32, row as f32) * cell,
                        size: cell,
                    });
                }
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_draws_nothing() {
        assert!(layout(" ", Vec2::ZERO, 40.0).is_empty());
    }

    #[test]
    fn test_one_cell_count() {
        // '1' lights 1 + 2 + 1 + 1 + 1 + 1 + 3 cells
        assert_eq!(layout("1", Vec2::ZERO, 40.0).len(), 10);
    }

    #[test]
    fn test_cells_scale_with_size() {
        let cells = layout("-", Vec2::new(20.0, 20.0), 40.0);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].size, 5.0);
        assert_eq!(cells[0].min, Vec2::new(20.0, 35.0));
    }

    #[test]
    fn test_second_character_advances() {
        let cells = layout(" -", Vec2::ZERO, 8.0);
        assert_eq!(cells[0].min, Vec2::new(6.0, 3.0));
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(
            layout("score", Vec2::ZERO, 40.0),
            layout("SCORE", Vec2::ZERO, 40.0)
        );
    }

    #[test]
    fn test_every_score_character_has_a_glyph() {
        for ch in "Score: 0123456789".chars().filter(|c| *c != ' ') {
            assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
    }
}
