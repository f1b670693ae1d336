//! ASCII rendering of arena snapshots for terminal review.

use bomber_core::arena::{Arena, Cell, Position};

/// Render one arena frame as ASCII.
///
/// Rows print top-down, so the highest `y` row comes first. Glyphs:
/// `#` wall, `+` box, `0`-`9` bomb fuse, `.` floor. Living combatants
/// overlay their cell as `A`, `B`, ... in snapshot order.
#[must_use]
pub fn render(arena: &Arena) -> String {
    let width = arena.grid.width() as i32;
    let height = arena.grid.height() as i32;
    let mut out = String::with_capacity(arena.grid.cell_count() + height as usize);

    for y in (0..height).rev() {
        for x in 0..width {
            let pos = Position::new(x, y);
            let glyph = combatant_glyph(arena, pos).unwrap_or_else(|| cell_glyph(arena, pos));
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Render a frame with a one-line status footer (tick and health).
#[must_use]
pub fn render_with_status(arena: &Arena) -> String {
    let mut out = render(arena);
    out.push_str(&format!("tick {}", arena.tick));
    for (index, combatant) in arena.combatants.iter().enumerate() {
        let label = (b'A' + (index % 26) as u8) as char;
        out.push_str(&format!(
            "  {label}={} hp:{}",
            combatant.id, combatant.health
        ));
    }
    out.push('\n');
    out
}

fn combatant_glyph(arena: &Arena, pos: Position) -> Option<char> {
    arena
        .combatants
        .iter()
        .enumerate()
        .find(|(_, c)| c.is_alive() && c.position == pos)
        .map(|(index, _)| (b'A' + (index % 26) as u8) as char)
}

fn cell_glyph(arena: &Arena, pos: Position) -> char {
    match arena.grid.cell(pos) {
        Some(Cell::Wall) => '#',
        Some(Cell::Box) => '+',
        Some(Cell::Bomb { timer }) => {
            char::from_digit(u32::from(timer).min(9), 10).unwrap_or('9')
        }
        Some(Cell::Empty) | None => '.',
    }
}
