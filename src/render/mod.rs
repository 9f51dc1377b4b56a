use bracket_geometry::prelude::{Point, Rect};
use bracket_terminal::prelude::*;
use chrono::{DateTime, Local, Utc};

use crate::game::score::ScoreState;

pub const SCREEN_WIDTH: i32 = 80;
pub const TILE_TOP: i32 = 14;
const TILE_WIDTH: i32 = 5;
const TILE_HEIGHT: i32 = 3;
const TILE_GAP: i32 = 1;
const ROW_GAP: i32 = 1;
const SIDE_MARGIN: i32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    Tile(usize),
    Clear,
    Submit,
    Finish,
}

/// Screen rectangles for the scrambled tiles and the three buttons.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub tiles: Vec<Rect>,
    pub clear: Rect,
    pub submit: Rect,
    pub finish: Rect,
    pub error_row: i32,
}

impl Layout {
    pub fn new(letter_count: usize, width: i32) -> Self {
        let step = TILE_WIDTH + TILE_GAP;
        let per_row = ((width - SIDE_MARGIN * 2 + TILE_GAP) / step).max(1) as usize;

        let mut tiles = Vec::with_capacity(letter_count);
        for row_start in (0..letter_count).step_by(per_row) {
            let in_row = (letter_count - row_start).min(per_row) as i32;
            let row_width = in_row * step - TILE_GAP;
            let left = (width - row_width) / 2;
            let top = TILE_TOP + (row_start / per_row) as i32 * (TILE_HEIGHT + ROW_GAP);
            for col in 0..in_row {
                tiles.push(Rect::with_size(left + col * step, top, TILE_WIDTH, TILE_HEIGHT));
            }
        }

        let rows = letter_count.div_ceil(per_row).max(1) as i32;
        let button_row = TILE_TOP + rows * (TILE_HEIGHT + ROW_GAP) + 1;
        let clear = button(width - SIDE_MARGIN - CLEAR_LABEL.len() as i32, button_row, CLEAR_LABEL);
        let submit = button(
            (width - SUBMIT_LABEL.len() as i32) / 2,
            button_row + 2,
            SUBMIT_LABEL,
        );
        let finish = button(
            width - SIDE_MARGIN - FINISH_LABEL.len() as i32,
            button_row + 6,
            FINISH_LABEL,
        );

        Self {
            tiles,
            clear,
            submit,
            finish,
            error_row: button_row + 4,
        }
    }

    pub fn hit(&self, point: Point) -> Option<Hit> {
        if let Some(idx) = self.tiles.iter().position(|tile| tile.point_in_rect(point)) {
            return Some(Hit::Tile(idx));
        }
        [
            (self.clear, Hit::Clear),
            (self.submit, Hit::Submit),
            (self.finish, Hit::Finish),
        ]
        .into_iter()
        .find(|(rect, _)| rect.point_in_rect(point))
        .map(|(_, hit)| hit)
    }
}

const CLEAR_LABEL: &str = "[ Clear ]";
const SUBMIT_LABEL: &str = "[ Submit Word ]";
const FINISH_LABEL: &str = "[ Finish Game ]";

fn button(x: i32, y: i32, label: &str) -> Rect {
    Rect::with_size(x, y, label.len() as i32, 1)
}

pub fn draw_header(ctx: &mut BTerm, scores: ScoreState) {
    ctx.draw_box(0, 0, SCREEN_WIDTH - 1, 5, RGB::named(GRAY), RGB::named(BLACK));
    ctx.print_color_centered(1, RGB::named(YELLOW), RGB::named(BLACK), "Animal Scramble");
    ctx.print_color(
        2,
        3,
        RGB::named(WHITE),
        RGB::named(BLACK),
        format!("Score: {}", scores.current_score),
    );
    let best = format!("Best: {}", scores.high_score);
    ctx.print_color(
        SCREEN_WIDTH - 2 - best.len() as i32,
        3,
        RGB::named(LIGHT_BLUE),
        RGB::named(BLACK),
        &best,
    );
}

pub fn draw_board(
    ctx: &mut BTerm,
    layout: &Layout,
    letters: &[char],
    guess: &str,
    error: Option<&str>,
) {
    ctx.print_color_centered(
        7,
        RGB::named(WHITE),
        RGB::named(BLACK),
        "Unscramble the letters to form an animal name:",
    );
    ctx.print_color(
        SIDE_MARGIN,
        9,
        RGB::named(WHITE),
        RGB::named(BLACK),
        format!("Selected Letters: {guess}"),
    );

    let mut x = SIDE_MARGIN;
    for letter in guess.chars() {
        if x + 3 > SCREEN_WIDTH - SIDE_MARGIN {
            break;
        }
        ctx.print_color(
            x,
            11,
            RGB::named(BLACK),
            RGB::named(GRAY),
            format!(" {letter} "),
        );
        x += 4;
    }

    for (tile, letter) in layout.tiles.iter().zip(letters) {
        ctx.draw_box(
            tile.x1,
            tile.y1,
            tile.width() - 1,
            tile.height() - 1,
            RGB::named(WHITE),
            RGB::named(BLACK),
        );
        ctx.print_color(
            tile.x1 + tile.width() / 2,
            tile.y1 + tile.height() / 2,
            RGB::named(LIGHT_GREEN),
            RGB::named(BLACK),
            letter.to_string(),
        );
    }

    for (rect, label) in [
        (layout.clear, CLEAR_LABEL),
        (layout.submit, SUBMIT_LABEL),
        (layout.finish, FINISH_LABEL),
    ] {
        ctx.print_color(rect.x1, rect.y1, RGB::named(BLACK), RGB::named(GRAY), label);
    }

    if let Some(message) = error {
        ctx.print_color_centered(layout.error_row, RGB::named(RED), RGB::named(BLACK), message);
    }
}

pub fn draw_summary(ctx: &mut BTerm, scores: ScoreState, recorded_at: Option<DateTime<Utc>>) {
    ctx.print_color_centered(10, RGB::named(YELLOW), RGB::named(BLACK), "Game finished");
    ctx.print_color_centered(
        13,
        RGB::named(WHITE),
        RGB::named(BLACK),
        format!("Final score: {}", scores.current_score),
    );
    ctx.print_color_centered(
        15,
        RGB::named(LIGHT_BLUE),
        RGB::named(BLACK),
        format!("Highest score: {}", scores.high_score),
    );
    if let Some(stamp) = recorded_at {
        let local: DateTime<Local> = stamp.with_timezone(&Local);
        ctx.print_color_centered(
            16,
            RGB::named(DARK_GRAY),
            RGB::named(BLACK),
            format!("set {}", local.format("%Y-%m-%d %H:%M")),
        );
    }
    ctx.print_color_centered(
        19,
        RGB::named(LIGHT_CYAN),
        RGB::named(BLACK),
        "Enter: play again  Esc: quit",
    );
}

pub const LOG_VISIBLE_ENTRIES: usize = 5;
const LOG_PANEL_HEIGHT: i32 = LOG_VISIBLE_ENTRIES as i32 + 2;

/// Top row of the event log panel so its bottom border sits on the last row.
pub const fn log_panel_top(screen_height: i32) -> i32 {
    screen_height - 1 - LOG_PANEL_HEIGHT
}

pub fn draw_log(ctx: &mut BTerm, log: &[String], top: i32) {
    ctx.draw_box(
        0,
        top,
        SCREEN_WIDTH - 1,
        LOG_PANEL_HEIGHT,
        RGB::named(DARK_GRAY),
        RGB::named(BLACK),
    );
    ctx.print_color(
        2,
        top + 1,
        RGB::named(WHITE),
        RGB::named(BLACK),
        "Event Log",
    );
    for (row, entry) in log.iter().take(LOG_VISIBLE_ENTRIES).enumerate() {
        ctx.print(2, top + 2 + row as i32, entry);
    }
}
