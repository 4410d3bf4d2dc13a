//! Terminal front end: glyph sprites and a dirty-cell screen.
//!
//! The 640×480 playfield maps onto an 80×30 grid of character cells, one
//! cell per 8×16 pixels.  Only cells under a dirty rect are rewritten when a
//! frame is presented.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use alien_raid::assets::{self, AssetProvider, Flip, ImageHandle};
use alien_raid::error::{Error, Result};
use alien_raid::geometry::{Rect, PLAYFIELD};
use alien_raid::render::{Background, Surface};

pub const CELL_W: i32 = 8;
pub const CELL_H: i32 = 16;

const COLS: i32 = PLAYFIELD.w / CELL_W;
const ROWS: i32 = PLAYFIELD.h / CELL_H;

/// Smallest terminal, in cells, that holds the playfield plus the hint line.
pub const MIN_SIZE: (u16, u16) = (COLS as u16, ROWS as u16 + 1);

pub fn fits(width: u16, height: u16) -> bool {
    width >= MIN_SIZE.0 && height >= MIN_SIZE.1
}

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_EXPLOSION: Color = Color::Yellow;
const C_SHOT: Color = Color::Cyan;
const C_BOMB: Color = Color::Magenta;
const C_STARS: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Glyph {
    rows: Vec<String>,
    color: Color,
}

impl Glyph {
    fn new(rows: &[&str], color: Color) -> Self {
        Glyph {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            color,
        }
    }

    fn cols(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    fn at(&self, col: usize, row: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.chars().nth(col))
            .unwrap_or(' ')
    }

    fn flipped(&self, flip: Flip) -> Self {
        let cols = self.cols();
        let mut rows: Vec<String> = self
            .rows
            .iter()
            .map(|r| {
                let padded: Vec<char> = r.chars().chain(std::iter::repeat(' ')).take(cols).collect();
                padded.into_iter().rev().map(mirror_h).collect()
            })
            .collect();
        if flip == Flip::Both {
            rows.reverse();
            rows = rows
                .into_iter()
                .map(|r| r.chars().map(mirror_v).collect())
                .collect();
        }
        Glyph {
            rows,
            color: self.color,
        }
    }
}

fn mirror_h(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '(' => ')',
        ')' => '(',
        '<' => '>',
        '>' => '<',
        '[' => ']',
        ']' => '[',
        other => other,
    }
}

fn mirror_v(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '^' => 'v',
        'v' => '^',
        other => other,
    }
}

/// Built-in art for every image the asset table asks for.
fn builtin(name: &str) -> Option<Glyph> {
    let glyph = match name {
        assets::PLAYER => Glyph::new(&["  _/|", "(o_o)"], C_PLAYER),
        "alien1.gif" => Glyph::new(&["/@@@@\\", "\\/\\/\\/"], C_ALIEN),
        "alien2.gif" => Glyph::new(&["/@@@@\\", "/\\/\\/\\"], C_ALIEN),
        "alien3.gif" => Glyph::new(&["/@@@@\\", "|/\\/\\|"], C_ALIEN),
        assets::EXPLOSION => Glyph::new(&["\\*!!*/", " *##* "], C_EXPLOSION),
        assets::SHOT => Glyph::new(&["|"], C_SHOT),
        assets::BOMB => Glyph::new(&["o"], C_BOMB),
        assets::BACKGROUND => starfield(16, ROWS as usize),
        _ => return None,
    };
    Some(glyph)
}

/// A sparse, fixed star pattern for the background tile.
fn starfield(cols: usize, rows: usize) -> Glyph {
    let rows: Vec<String> = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| match (row * 7 + col * 13) % 29 {
                    0 => '.',
                    11 if row % 3 == 0 => '+',
                    _ => ' ',
                })
                .collect()
        })
        .collect();
    Glyph {
        rows,
        color: C_STARS,
    }
}

/// Issues `ImageHandle`s backed by character art.
#[derive(Clone, Debug, Default)]
pub struct GlyphSheet {
    glyphs: Vec<Glyph>,
}

impl GlyphSheet {
    pub fn new() -> Self {
        GlyphSheet::default()
    }

    fn register(&mut self, glyph: Glyph) -> ImageHandle {
        let handle = ImageHandle {
            id: self.glyphs.len() as u32,
            width: glyph.cols() as i32 * CELL_W,
            height: glyph.rows.len() as i32 * CELL_H,
        };
        self.glyphs.push(glyph);
        handle
    }

    fn glyph(&self, image: ImageHandle) -> Option<&Glyph> {
        self.glyphs.get(image.id as usize)
    }
}

impl AssetProvider for GlyphSheet {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle> {
        let glyph = builtin(name).ok_or_else(|| Error::Asset {
            name: name.to_string(),
            reason: "no such sprite".to_string(),
        })?;
        Ok(self.register(glyph))
    }

    fn flip(&mut self, image: ImageHandle, flip: Flip) -> ImageHandle {
        match self.glyph(image).map(|g| g.flipped(flip)) {
            Some(glyph) => self.register(glyph),
            None => image,
        }
    }
}

// ── Screen ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Cell range `[start, end)` covering pixels `[lo, hi)` along one axis.
fn span(lo: i32, hi: i32, cell: i32, limit: i32) -> (i32, i32) {
    let start = lo.div_euclid(cell).clamp(0, limit);
    let end = (hi + cell - 1).div_euclid(cell).clamp(0, limit);
    (start, end)
}

pub struct Screen<W: Write> {
    out: W,
    sheet: GlyphSheet,
    cells: Vec<Cell>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, sheet: GlyphSheet) -> Self {
        Screen {
            out,
            sheet,
            cells: vec![EMPTY; (COLS * ROWS) as usize],
        }
    }

    fn index(col: i32, row: i32) -> usize {
        (row * COLS + col) as usize
    }

    fn backdrop(&self, background: &Background, tiles: &[Rect], col: i32, row: i32) -> Cell {
        let Background::Tiled(tile) = background else {
            return EMPTY;
        };
        let (x, y) = (col * CELL_W, row * CELL_H);
        let Some(spot) = tiles.iter().find(|t| {
            t.left() <= x && x < t.right() && t.top() <= y && y < t.bottom()
        }) else {
            return EMPTY;
        };
        let Some(glyph) = self.sheet.glyph(*tile) else {
            return EMPTY;
        };
        let (c, r) = ((x - spot.x) / CELL_W, (y - spot.y) / CELL_H);
        match glyph.at(c as usize, r as usize) {
            ' ' => EMPTY,
            ch => Cell {
                ch,
                color: glyph.color,
            },
        }
    }

    fn write_cells(&mut self, cols: (i32, i32), rows: (i32, i32)) -> std::io::Result<()> {
        for row in rows.0..rows.1 {
            self.out.queue(cursor::MoveTo(cols.0 as u16, row as u16))?;
            for col in cols.0..cols.1 {
                let cell = self.cells[Self::index(col, row)];
                self.out.queue(style::SetForegroundColor(cell.color))?;
                self.out.queue(Print(cell.ch))?;
            }
        }
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(0, ROWS as u16))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print("← → : Move   SPACE : Shoot   ESC / Q : Quit"))?;
        Ok(())
    }
}

impl<W: Write> Surface for Screen<W> {
    /// Rows snap to the nearest cell, so small vertical offsets such as the
    /// player's one-pixel bob do not jump the sprite a whole row.
    fn blit(&mut self, image: ImageHandle, at: Rect) {
        let Some(glyph) = self.sheet.glyph(image) else {
            return;
        };
        let col0 = at.x.div_euclid(CELL_W);
        let row0 = (at.y + CELL_H / 2).div_euclid(CELL_H);
        for (r, line) in glyph.rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let (col, row) = (col0 + c as i32, row0 + r as i32);
                if ch == ' ' || !(0..COLS).contains(&col) || !(0..ROWS).contains(&row) {
                    continue;
                }
                self.cells[Self::index(col, row)] = Cell {
                    ch,
                    color: glyph.color,
                };
            }
        }
    }

    fn erase(&mut self, background: &Background, area: Rect) {
        let (c0, c1) = span(area.left(), area.right(), CELL_W, COLS);
        let (r0, r1) = span(area.top(), area.bottom(), CELL_H, ROWS);
        let tiles = background.tiles(&PLAYFIELD);
        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[Self::index(col, row)] = self.backdrop(background, &tiles, col, row);
            }
        }
    }

    fn present(&mut self, dirty: &[Rect]) -> std::io::Result<()> {
        for rect in dirty {
            let cols = span(rect.left(), rect.right(), CELL_W, COLS);
            let rows = span(rect.top(), rect.bottom(), CELL_H, ROWS);
            self.write_cells(cols, rows)?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }

    fn present_all(&mut self) -> std::io::Result<()> {
        self.write_cells((0, COLS), (0, ROWS))?;
        self.draw_controls_hint()?;
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
