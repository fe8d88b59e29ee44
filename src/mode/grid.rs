//! Grid mode: narrow down a target by picking sectors
//!
//! The pointer follows the centre of the active rectangle, so leaving grid
//! mode at any point leaves the pointer where the user was aiming.

use super::{draw_cursor, next_press, ModeOutcome, Selection};
use crate::keymap::{Action, InputEvent};
use crate::model::{GridState, PanDirection};
use crate::platform::{Platform, Pointer, ScreenId};
use crate::session::Session;

const CUTS: [(Action, PanDirection); 4] = [
    (Action::GridCutUp, PanDirection::Up),
    (Action::GridCutDown, PanDirection::Down),
    (Action::GridCutLeft, PanDirection::Left),
    (Action::GridCutRight, PanDirection::Right),
];

const PANS: [(Action, PanDirection); 4] = [
    (Action::GridUp, PanDirection::Up),
    (Action::GridDown, PanDirection::Down),
    (Action::GridLeft, PanDirection::Left),
    (Action::GridRight, PanDirection::Right),
];

pub fn run(platform: &mut dyn Platform, session: &mut Session) -> anyhow::Result<ModeOutcome> {
    let screen = platform.mouse_get_position().screen;
    let (width, height) = platform.screen_get_dimensions(screen);
    let mut grid = GridState::new(width, height);
    let nr = session.config.grid_nr;
    let nc = session.config.grid_nc;
    let min_size = session.config.cursor_size;

    tracing::debug!("Grid mode on screen {} ({}x{})", screen, width, height);
    center_pointer(platform, screen, &grid);

    let outcome = loop {
        redraw(platform, session, screen, &grid);

        let Some(event) = next_press(platform)? else {
            break ModeOutcome::quit();
        };
        let keymap = &session.keymap;

        let sector = keymap.matches(Action::GridKeys, &event);
        if sector != 0 {
            let idx = sector as u32 - 1;
            if idx / nc < nr {
                grid.focus_sector(idx / nc, idx % nc, nr, nc, min_size);
                session.opnum = 0;
                center_pointer(platform, screen, &grid);
            }
            continue;
        }

        if let Some(&(_, dir)) = CUTS.iter().find(|(a, _)| keymap.is(*a, &event)) {
            grid.cut(dir, min_size);
            center_pointer(platform, screen, &grid);
            continue;
        }

        if let Some(&(_, dir)) = PANS.iter().find(|(a, _)| keymap.is(*a, &event)) {
            grid.pan(dir);
            center_pointer(platform, screen, &grid);
            continue;
        }

        if keymap.is(Action::GridExit, &event) {
            break ModeOutcome::done(None);
        }
        if keymap.is(Action::Exit, &event) {
            break ModeOutcome::quit();
        }
        break ModeOutcome::done(Some(event));
    };

    center_pointer(platform, screen, &grid);
    let (x, y) = grid.center();
    tracing::debug!("Grid mode exit at ({}, {}): {:?}", x, y, outcome.exit);
    Ok(outcome.with_selection(Selection { x, y, label: None }))
}

fn center_pointer(platform: &mut dyn Platform, screen: ScreenId, grid: &GridState) {
    let (x, y) = grid.center();
    platform.mouse_move(screen, x, y);
}

fn redraw(platform: &mut dyn Platform, session: &Session, screen: ScreenId, grid: &GridState) {
    let color = session.config.grid_color;
    let t = session.config.grid_size;

    platform.clear(screen);
    if t > 0 {
        let (w, h) = (grid.width(), grid.height());
        platform.draw_box(screen, grid.lx, grid.ly, w, t, color);
        platform.draw_box(screen, grid.lx, grid.uy - t, w, t, color);
        platform.draw_box(screen, grid.lx, grid.ly, t, h, color);
        platform.draw_box(screen, grid.ux - t, grid.ly, t, h, color);

        let (xs, ys) = grid.lines(session.config.grid_nr, session.config.grid_nc);
        for x in xs {
            platform.draw_box(screen, x - t / 2, grid.ly, t, h, color);
        }
        for y in ys {
            platform.draw_box(screen, grid.lx, y - t / 2, w, t, color);
        }
    }

    let (cx, cy) = grid.center();
    draw_cursor(platform, session, Pointer { screen, x: cx, y: cy });
    platform.commit();
}
