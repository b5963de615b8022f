use crate::core::{FLOOR_HEADROOM, GridExtent, GridLoc};
use std::fmt;
use tracing::warn;

pub const GLYPH_START: char = 's';
pub const GLYPH_BLOCK: char = ']';
pub const GLYPH_BOX: char = 'x';
pub const GLYPH_PAD: char = 'o';
pub const GLYPH_ELEVATOR: char = 'e';
pub const GLYPH_SHAFT: char = '-';
pub const GLYPH_EMPTY: char = '.';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElevatorSpec {
    /// Cell of the `e` glyph; `loc.y == low`.
    pub loc: GridLoc,
    pub low: i32,
    pub high: i32,
}

/// Everything the parser learns about a level. Immutable after
/// construction; the controller builds its occupancy view from it and
/// returns to it on restart.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub extent: GridExtent,
    pub gopher_start: GridLoc,
    pub box_starts: Vec<GridLoc>,
    pub pads: Vec<GridLoc>,
    pub blocks: Vec<GridLoc>,
    pub elevators: Vec<ElevatorSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    EmptyLevel,
    MissingStart,
    DuplicateStart { first: GridLoc, second: GridLoc },
    /// A `-` glyph with no elevator below it in the same column.
    OrphanShaft { loc: GridLoc },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyLevel => write!(f, "level description is empty"),
            ParseError::MissingStart => write!(f, "level has no start cell ('s')"),
            ParseError::DuplicateStart { first, second } => write!(
                f,
                "level has more than one start cell: {:?} and {:?}",
                first, second
            ),
            ParseError::OrphanShaft { loc } => write!(
                f,
                "shaft marker '-' at {:?} is not above an elevator",
                loc
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a textual level description.
///
/// Rows are lines (the depth axis), columns are whitespace-separated
/// tokens, and each character of a token is one floor, bottom first. The
/// lattice gets a one-cell empty border on all four horizontal sides and
/// two floors of headroom above the tallest column, so rule code can probe
/// any neighbor of a content cell without leaving the lattice.
pub fn parse_level(data: &str) -> Result<LevelLayout, ParseError> {
    let lines: Vec<Vec<&str>> = data
        .trim_matches('\n')
        .lines()
        .map(|line| line.split_whitespace().collect())
        .collect();

    let max_token_len = lines
        .iter()
        .flatten()
        .map(|t| t.len())
        .max()
        .unwrap_or(0);
    if max_token_len == 0 {
        return Err(ParseError::EmptyLevel);
    }

    // One border row/column on each side, headroom on top.
    let content_cols = lines.iter().map(|row| row.len()).max().unwrap_or(0);
    let nz = lines.len() as i32 + 2;
    let nx = content_cols as i32 + 2;
    let ny = (max_token_len + FLOOR_HEADROOM) as i32;

    let mut gopher_start: Option<GridLoc> = None;
    let mut box_starts = Vec::new();
    let mut pads = Vec::new();
    let mut blocks = Vec::new();
    let mut elevators = Vec::new();

    for (i, row) in lines.iter().enumerate() {
        for (j, token) in row.iter().enumerate() {
            let chars: Vec<char> = token.chars().collect();
            let mut in_shaft = false;
            for (k, &ch) in chars.iter().enumerate() {
                let loc = GridLoc::new(i as i32 + 1, j as i32 + 1, k as i32);
                match ch {
                    GLYPH_START => {
                        if let Some(first) = gopher_start {
                            return Err(ParseError::DuplicateStart {
                                first,
                                second: loc,
                            });
                        }
                        gopher_start = Some(loc);
                    }
                    GLYPH_BLOCK => blocks.push(loc),
                    GLYPH_BOX => box_starts.push(loc),
                    GLYPH_PAD => pads.push(loc),
                    GLYPH_ELEVATOR => {
                        let mut high = k;
                        while high + 1 < chars.len() && chars[high + 1] == GLYPH_SHAFT {
                            high += 1;
                        }
                        elevators.push(ElevatorSpec {
                            loc,
                            low: k as i32,
                            high: high as i32,
                        });
                    }
                    GLYPH_SHAFT => {
                        let rooted = k > 0
                            && (chars[k - 1] == GLYPH_ELEVATOR || (chars[k - 1] == GLYPH_SHAFT && in_shaft));
                        if !rooted {
                            return Err(ParseError::OrphanShaft { loc });
                        }
                    }
                    GLYPH_EMPTY => {}
                    other => {
                        // Permissive like the original grammar, but visible.
                        warn!(glyph = %other, ?loc, "unrecognized level glyph treated as empty");
                    }
                }
                in_shaft = ch == GLYPH_ELEVATOR || (ch == GLYPH_SHAFT && in_shaft);
            }
        }
    }

    let gopher_start = gopher_start.ok_or(ParseError::MissingStart)?;

    Ok(LevelLayout {
        extent: GridExtent::new(nz, nx, ny),
        gopher_start,
        box_starts,
        pads,
        blocks,
        elevators,
    })
}

impl LevelLayout {
    pub fn is_pad(&self, loc: &GridLoc) -> bool {
        self.pads.contains(loc)
    }

    /// Re-emits the glyph grammar for this layout, border stripped and
    /// tokens trimmed. Parsing the output reproduces the same start, box,
    /// pad, block, and elevator lists.
    pub fn serialize(&self) -> String {
        let nz = self.extent.nz;
        let nx = self.extent.nx;
        let ny = self.extent.ny as usize;

        let mut rows = Vec::new();
        for z in 1..nz - 1 {
            let mut tokens = Vec::new();
            for x in 1..nx - 1 {
                let mut token = vec![GLYPH_EMPTY; ny];
                for y in 0..ny as i32 {
                    let loc = GridLoc::new(z, x, y);
                    if loc == self.gopher_start {
                        token[y as usize] = GLYPH_START;
                    } else if self.blocks.contains(&loc) {
                        token[y as usize] = GLYPH_BLOCK;
                    } else if self.box_starts.contains(&loc) {
                        token[y as usize] = GLYPH_BOX;
                    } else if self.pads.contains(&loc) {
                        token[y as usize] = GLYPH_PAD;
                    }
                }
                for elev in &self.elevators {
                    if elev.loc.z == z && elev.loc.x == x {
                        token[elev.low as usize] = GLYPH_ELEVATOR;
                        for y in elev.low + 1..=elev.high {
                            token[y as usize] = GLYPH_SHAFT;
                        }
                    }
                }
                let mut token: String = token.into_iter().collect();
                while token.len() > 1 && token.ends_with(GLYPH_EMPTY) {
                    token.pop();
                }
                tokens.push(token);
            }
            rows.push(tokens.join(" "));
        }
        rows.join("\n")
    }
}
