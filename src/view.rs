//! Plain-text view of a game snapshot.
//!
//! Each board cell is two characters wide. Rows waiting to be cleared are
//! drawn as `==` while highlighted and `--` while dissolving.

use blockfall::core::line_clear::ClearPhase;
use blockfall::core::pieces;
use blockfall::core::GameSnapshot;
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Empty,
    Ghost,
    Block,
}

impl Glyph {
    fn as_str(self) -> &'static str {
        match self {
            Glyph::Empty => " .",
            Glyph::Ghost => "::",
            Glyph::Block => "[]",
        }
    }
}

fn piece_label(kind: Option<PieceKind>) -> String {
    kind.map_or_else(|| "-".to_string(), |k| k.as_str().to_ascii_uppercase())
}

/// Render `snapshot` into `out`, one string per terminal line.
pub fn render_lines(snapshot: &GameSnapshot, out: &mut Vec<String>) {
    out.clear();

    let mut glyphs = [[Glyph::Empty; W]; H];
    for (y, row) in snapshot.board.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                glyphs[y][x] = Glyph::Block;
            }
        }
    }

    if let Some(active) = snapshot.active {
        let mask = pieces::shape(active.kind, active.rotation);
        let mut paint = |origin_y: i8, glyph: Glyph| {
            for (col, row) in mask.cells() {
                let x = active.x + col;
                let y = origin_y + row;
                if x >= 0 && y >= 0 && (x as usize) < W && (y as usize) < H {
                    let slot = &mut glyphs[y as usize][x as usize];
                    if *slot == Glyph::Empty || glyph == Glyph::Block {
                        *slot = glyph;
                    }
                }
            }
        };
        if let Some(ghost_y) = snapshot.ghost_y {
            paint(ghost_y, Glyph::Ghost);
        }
        paint(active.y, Glyph::Block);
    }

    let clearing = match snapshot.phase {
        ClearPhase::Highlight => Some("=="),
        ClearPhase::Dissolve => Some("--"),
        _ => None,
    };

    let side = [
        format!("Score  {}", snapshot.score.score),
        format!("Lines  {}", snapshot.score.lines),
        format!("Level  {}", snapshot.score.level),
        String::new(),
        format!("Next   {}", piece_label(Some(snapshot.next))),
        format!("Hold   {}", piece_label(snapshot.hold)),
        String::new(),
        if snapshot.game_over {
            "GAME OVER (r restarts)".to_string()
        } else if snapshot.paused {
            "PAUSED".to_string()
        } else {
            String::new()
        },
    ];

    for (y, row) in glyphs.iter().enumerate() {
        let mut line = String::with_capacity(W * 2 + 32);
        line.push('|');
        match clearing {
            Some(fill) if snapshot.pending_rows.contains(&y) => {
                for _ in 0..W {
                    line.push_str(fill);
                }
            }
            _ => {
                for glyph in row {
                    line.push_str(glyph.as_str());
                }
            }
        }
        line.push('|');
        if let Some(text) = side.get(y) {
            line.push_str("  ");
            line.push_str(text);
        }
        out.push(line);
    }
    out.push(format!("+{}+", "-".repeat(W * 2)));
}
