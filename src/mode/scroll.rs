//! Scroll gesture driver
//!
//! Runs while a scroll key is held or the scroll is still coasting. The
//! platform is polled with a short timeout so the integrator advances even
//! without input; due ticks become clicks on button 4 or 5.

use std::time::{Duration, Instant};

use crate::keymap::{Action, InputEvent};
use crate::model::{ScrollDirection, ScrollState};
use crate::platform::Platform;
use crate::session::Session;

/// Poll interval while scrolling
pub const TICK: Duration = Duration::from_millis(16);

/// Direction a key scrolls in, if it is a scroll key
pub fn direction_of(session: &Session, event: &InputEvent) -> Option<ScrollDirection> {
    if session.keymap.is(Action::ScrollDown, event) {
        Some(ScrollDirection::Down)
    } else if session.keymap.is(Action::ScrollUp, event) {
        Some(ScrollDirection::Up)
    } else {
        None
    }
}

/// Run one scroll gesture started by the press `key`.
///
/// Returns the key press that interrupted scrolling, if any.
pub fn run(
    platform: &mut dyn Platform,
    session: &Session,
    key: InputEvent,
    direction: ScrollDirection,
) -> anyhow::Result<Option<InputEvent>> {
    let fling_timeout = Duration::from_millis(session.config.scroll_fling_timeout);
    let mut state = ScrollState::new(session.scroll_params(), direction);
    let mut held = Some(key);
    let mut reverse: Option<InputEvent> = None;
    let mut pressed_at = platform.now();
    let mut last = pressed_at;
    let mut total: u64 = 0;

    tracing::debug!("Scroll {:?} started", direction);
    state.accelerate();

    loop {
        let event = platform.next_event(Some(TICK))?;
        let now = platform.now();
        total += emit(platform, &mut state, now, &mut last) as u64;

        match event {
            None => {
                if platform.is_closed() && held.is_some() {
                    state.stop();
                }
            }
            Some(ev) if !ev.pressed => {
                if reverse.is_some_and(|r| r.code == ev.code) {
                    reverse = None;
                } else if held.is_some_and(|h| h.code == ev.code) {
                    held = None;
                    if now.duration_since(pressed_at) <= fling_timeout {
                        state.fling();
                        state.decelerate();
                    } else {
                        state.stop();
                    }
                }
            }
            Some(ev) => match direction_of(session, &ev) {
                Some(dir) if dir == state.direction() => {
                    if held.is_none() {
                        pressed_at = now;
                    }
                    held = Some(ev);
                    state.accelerate();
                }
                Some(_) => {
                    reverse = Some(ev);
                    state.decelerate();
                }
                None => {
                    state.stop();
                    tracing::debug!("Scroll interrupted after {} ticks", total);
                    return Ok(Some(ev));
                }
            },
        }

        if state.is_stopped() {
            if let Some(r) = reverse.take() {
                state.set_direction(state.direction().opposite());
                state.accelerate();
                held = Some(r);
                pressed_at = now;
                continue;
            }
            if held.is_none() || platform.is_closed() {
                tracing::debug!("Scroll finished after {} ticks", total);
                return Ok(None);
            }
        }
    }
}

fn emit(
    platform: &mut dyn Platform,
    state: &mut ScrollState,
    now: Instant,
    last: &mut Instant,
) -> u32 {
    let elapsed_ms = now.duration_since(*last).as_secs_f64() * 1000.0;
    *last = now;
    let clicks = state.tick(elapsed_ms);
    let button = state.direction().button();
    for _ in 0..clicks {
        platform.mouse_click(button);
    }
    clicks
}
