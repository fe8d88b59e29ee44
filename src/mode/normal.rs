//! Normal mode: keyboard pointer movement
//!
//! Movement keys warp the pointer relative to where it is, optionally
//! repeated by a typed count (`5j`). Absolute warps and history jumps are
//! recorded in the session ring so they can be undone with `hist_back`.

use std::io::Write;
use std::time::Duration;

use super::{draw_cursor, next_press, release_drag, scroll, Exit, Mode, ModeOutcome, Selection};
use crate::keymap::{Action, InputEvent};
use crate::platform::{Platform, Pointer};
use crate::session::Session;

/// What the dispatcher wants the loop to do next
enum Flow {
    Continue,
    /// Handle this event next instead of reading a new one
    Replay(InputEvent),
    Exit(ModeOutcome),
}

/// Run normal mode, handling `first` before reading any input
pub fn run(
    platform: &mut dyn Platform,
    session: &mut Session,
    out: &mut dyn Write,
    first: Option<InputEvent>,
) -> anyhow::Result<ModeOutcome> {
    let mut pending = first;
    session.opnum = 0;
    redraw(platform, session);

    let outcome = loop {
        let event = match pending.take() {
            Some(event) => event,
            None => match next_press(platform)? {
                Some(event) => event,
                None => break ModeOutcome::quit(),
            },
        };
        if !event.pressed {
            continue;
        }

        match dispatch(platform, session, out, event)? {
            Flow::Continue => {}
            Flow::Replay(next) => pending = Some(next),
            Flow::Exit(outcome) => break outcome,
        }
        redraw(platform, session);
    };

    if !matches!(outcome.exit, Exit::Switch(_)) {
        release_drag(platform, session);
    }
    tracing::debug!("Normal mode exit: {:?}", outcome.exit);
    Ok(outcome)
}

fn redraw(platform: &mut dyn Platform, session: &Session) {
    for screen in platform.screen_list() {
        platform.clear(screen);
    }
    let pointer = platform.mouse_get_position();
    draw_cursor(platform, session, pointer);
    platform.commit();
}

fn dispatch(
    platform: &mut dyn Platform,
    session: &mut Session,
    out: &mut dyn Write,
    event: InputEvent,
) -> anyhow::Result<Flow> {
    let keymap = &session.keymap;

    if let Some(digit) = keymap.digit(&event) {
        // A leading zero is the `start` key, not part of a count
        if digit != 0 || session.opnum != 0 {
            session.opnum = session.opnum.saturating_mul(10).saturating_add(digit);
            tracing::trace!("Count {}", session.opnum);
            return Ok(Flow::Continue);
        }
    }

    let pointer = platform.mouse_get_position();
    let (width, height) = platform.screen_get_dimensions(pointer.screen);
    // Any step past the screen extent clamps to the edge anyway
    let count = i64::from(session.opnum.max(1));
    let reach = i64::from(width.max(height));
    let step = (count * i64::from(session.config.move_step)).min(reach) as i32;

    let relative = [
        (Action::Left, -step, 0),
        (Action::Right, step, 0),
        (Action::Up, 0, -step),
        (Action::Down, 0, step),
    ];
    if let Some(&(_, dx, dy)) = relative.iter().find(|(a, ..)| keymap.is(*a, &event)) {
        warp(platform, pointer, pointer.x + dx, pointer.y + dy, width, height);
        session.opnum = 0;
        return Ok(Flow::Continue);
    }

    // -1 keeps the current coordinate on that axis
    let absolute = [
        (Action::Top, -1, 0),
        (Action::Middle, -1, height / 2),
        (Action::Bottom, -1, height - 1),
        (Action::Start, 0, -1),
        (Action::End, width - 1, -1),
    ];
    if let Some(&(_, x, y)) = absolute.iter().find(|(a, ..)| keymap.is(*a, &event)) {
        let x = if x == -1 { pointer.x } else { x };
        let y = if y == -1 { pointer.y } else { y };
        session.ring.insert(pointer.x, pointer.y);
        warp(platform, pointer, x, y, width, height);
        let moved = platform.mouse_get_position();
        session.ring.insert(moved.x, moved.y);
        session.opnum = 0;
        return Ok(Flow::Continue);
    }

    if keymap.is(Action::HistBack, &event) || keymap.is(Action::HistForward, &event) {
        let target = if keymap.is(Action::HistBack, &event) {
            session.ring.prev()
        } else {
            session.ring.next()
        };
        if let Some((x, y)) = target {
            warp(platform, pointer, x, y, width, height);
        }
        session.opnum = 0;
        return Ok(Flow::Continue);
    }

    let button = keymap.matches(Action::Buttons, &event);
    if button != 0 {
        session.opnum = 0;
        platform.mouse_click(button as u8);
        session.record_click(pointer.x, pointer.y);
        tracing::debug!("Clicked button {} at ({}, {})", button, pointer.x, pointer.y);
        if session.oneshot {
            return Ok(Flow::Exit(
                ModeOutcome::button(button).with_selection(selection(pointer)),
            ));
        }
        return Ok(Flow::Continue);
    }

    let button = keymap.matches(Action::OneshotButtons, &event);
    if button != 0 {
        session.opnum = 0;
        oneshot_click(platform, session, button)?;
        session.record_click(pointer.x, pointer.y);
        return Ok(Flow::Exit(ModeOutcome::quit()));
    }

    if keymap.is(Action::Drag, &event) {
        let drag_button = session.config.drag_button;
        if session.dragging {
            platform.mouse_up(drag_button);
        } else {
            platform.mouse_down(drag_button);
        }
        session.dragging = !session.dragging;
        return Ok(Flow::Continue);
    }

    if keymap.is(Action::Print, &event) {
        writeln!(out, "{} {}", pointer.x, pointer.y)?;
        out.flush()?;
        return Ok(Flow::Continue);
    }

    if let Some(direction) = scroll::direction_of(session, &event) {
        session.opnum = 0;
        return Ok(match scroll::run(platform, session, event, direction)? {
            Some(leftover) => Flow::Replay(leftover),
            None => Flow::Continue,
        });
    }

    let switches = [
        (Action::Hint, Mode::Hint),
        (Action::Hint2, Mode::Hint),
        (Action::Grid, Mode::Grid),
        (Action::Screen, Mode::ScreenSelection),
        (Action::History, Mode::History),
    ];
    if let Some((_, mode)) = switches.into_iter().find(|(a, _)| keymap.is(*a, &event)) {
        return Ok(Flow::Exit(ModeOutcome::switch(mode)));
    }

    if keymap.is(Action::Exit, &event) {
        return Ok(Flow::Exit(ModeOutcome::quit()));
    }

    tracing::trace!("Unbound key {:?}", event);
    Ok(Flow::Continue)
}

/// Click, then keep clicking while the same key repeats within the
/// double-click window
fn oneshot_click(
    platform: &mut dyn Platform,
    session: &Session,
    button: usize,
) -> anyhow::Result<()> {
    let window = Duration::from_millis(session.config.oneshot_timeout);
    platform.mouse_click(button as u8);

    let mut deadline = platform.now() + window;
    loop {
        let left = deadline.saturating_duration_since(platform.now());
        if left.is_zero() {
            break;
        }
        match platform.next_event(Some(left))? {
            None => break,
            Some(ev) if !ev.pressed => {}
            Some(ev) if session.keymap.matches(Action::OneshotButtons, &ev) == button => {
                platform.mouse_click(button as u8);
                deadline = platform.now() + window;
            }
            Some(ev) => {
                tracing::trace!("Double-click window closed by {:?}", ev);
                break;
            }
        }
    }
    Ok(())
}

fn warp(platform: &mut dyn Platform, pointer: Pointer, x: i32, y: i32, width: i32, height: i32) {
    let x = x.clamp(0, (width - 1).max(0));
    let y = y.clamp(0, (height - 1).max(0));
    platform.mouse_move(pointer.screen, x, y);
}

fn selection(pointer: Pointer) -> Selection {
    Selection {
        x: pointer.x,
        y: pointer.y,
        label: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::keymap::{parse_key_sequence, KeyCode, Modifiers};
    use crate::platform::{HeadlessPlatform, PlatformCall, Step};

    fn key(spec: &str) -> InputEvent {
        InputEvent::from_sequence(parse_key_sequence(spec).unwrap(), true)
    }

    fn setup(keys: &[&str]) -> (HeadlessPlatform, Session) {
        let mut platform = HeadlessPlatform::new(vec![(1000, 800)]);
        for k in keys {
            platform.tap(key(k));
        }
        (platform, Session::new(Config::default()).unwrap())
    }

    fn run_all(platform: &mut HeadlessPlatform, session: &mut Session) -> (ModeOutcome, String) {
        let mut out = Vec::new();
        let outcome = run(platform, session, &mut out, None).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn position(platform: &HeadlessPlatform) -> (i32, i32) {
        let p = platform.mouse_get_position();
        (p.x, p.y)
    }

    #[test]
    fn test_relative_moves_with_count() {
        let (mut platform, mut session) = setup(&["l", "3", "j", "1", "2", "h", "esc"]);
        let (outcome, _) = run_all(&mut platform, &mut session);

        assert_eq!(outcome.exit, Exit::Quit);
        assert_eq!(platform.moves(), [(510, 400), (510, 430), (390, 430)]);
        assert_eq!(session.opnum, 0);
    }

    #[test]
    fn test_moves_clamp_to_screen() {
        let (mut platform, mut session) = setup(&["9", "9", "k", "esc"]);
        run_all(&mut platform, &mut session);
        assert_eq!(position(&platform), (500, 0));
    }

    #[test]
    fn test_huge_count_stops_at_edge() {
        let keys = ["4", "2", "9", "4", "9", "6", "7", "2", "9", "5", "l", "esc"];
        let (mut platform, mut session) = setup(&keys);
        run_all(&mut platform, &mut session);
        assert_eq!(position(&platform), (999, 400));

        let keys = ["2", "1", "4", "7", "4", "8", "3", "6", "4", "8", "h", "esc"];
        let (mut platform, mut session) = setup(&keys);
        run_all(&mut platform, &mut session);
        assert_eq!(position(&platform), (0, 400));
    }

    #[test]
    fn test_leading_zero_is_start() {
        let (mut platform, mut session) = setup(&["0", "esc"]);
        run_all(&mut platform, &mut session);
        assert_eq!(position(&platform), (0, 400));
    }

    #[test]
    fn test_zero_after_digit_extends_count() {
        let (mut platform, mut session) = setup(&["1", "0", "l", "esc"]);
        run_all(&mut platform, &mut session);
        assert_eq!(position(&platform), (600, 400));
    }

    #[test]
    fn test_absolute_warps() {
        let (mut platform, mut session) = setup(&["H", "$", "M", "L", "esc"]);
        run_all(&mut platform, &mut session);
        assert_eq!(platform.moves(), [(500, 0), (999, 0), (999, 400), (999, 799)]);
    }

    #[test]
    fn test_history_back_and_forward() {
        let (mut platform, mut session) = setup(&["H", "L", "C-o", "C-o", "C-i", "esc"]);
        run_all(&mut platform, &mut session);

        // Ring: (500,400) (500,0) (500,799)
        let moves = platform.moves();
        assert_eq!(&moves[2..], [(500, 0), (500, 400), (500, 0)]);
    }

    #[test]
    fn test_buttons_click_by_index() {
        let (mut platform, mut session) = setup(&["m", ",", ".", "esc"]);
        let (outcome, _) = run_all(&mut platform, &mut session);
        assert_eq!(outcome.exit, Exit::Quit);
        assert_eq!(platform.clicks(), [1, 2, 3]);
    }

    #[test]
    fn test_oneshot_session_ends_on_button() {
        let (mut platform, mut session) = setup(&["l", ",", "j"]);
        session.oneshot = true;
        let (outcome, _) = run_all(&mut platform, &mut session);

        assert_eq!(outcome.exit, Exit::Button(2));
        assert_eq!(
            outcome.selection,
            Some(Selection {
                x: 510,
                y: 400,
                label: None
            })
        );
    }

    #[test]
    fn test_oneshot_button_double_click_window() {
        let mut platform = HeadlessPlatform::new(vec![(1000, 800)]);
        let mut session = Session::new(Config::default()).unwrap();
        platform.tap(key("n"));
        platform.wait(100);
        platform.tap(key("n"));
        platform.wait(400);
        platform.tap(key("n"));

        let (outcome, _) = run_all(&mut platform, &mut session);
        assert_eq!(outcome.exit, Exit::Quit);
        // The third press arrives after the 300ms window
        assert_eq!(platform.clicks(), [1, 1]);
    }

    #[test]
    fn test_drag_toggles_button() {
        let (mut platform, mut session) = setup(&["v", "l", "v", "v", "esc"]);
        run_all(&mut platform, &mut session);

        let presses: Vec<&PlatformCall> = platform
            .calls()
            .iter()
            .filter(|c| matches!(c, PlatformCall::Down(_) | PlatformCall::Up(_)))
            .collect();
        // The drag still held at exit is released
        assert_eq!(
            presses,
            [
                &PlatformCall::Down(1),
                &PlatformCall::Up(1),
                &PlatformCall::Down(1),
                &PlatformCall::Up(1)
            ]
        );
    }

    #[test]
    fn test_drag_survives_mode_switch() {
        let (mut platform, mut session) = setup(&["v", "g"]);
        let (outcome, _) = run_all(&mut platform, &mut session);

        assert_eq!(outcome.exit, Exit::Switch(Mode::Grid));
        assert!(session.dragging);
        assert!(!platform.calls().contains(&PlatformCall::Up(1)));

        // Back in normal mode the same key drops it
        platform.tap(key("v"));
        platform.tap(key("esc"));
        run_all(&mut platform, &mut session);
        assert!(!session.dragging);
        assert_eq!(
            platform
                .calls()
                .iter()
                .filter(|c| **c == PlatformCall::Up(1))
                .count(),
            1
        );
    }

    #[test]
    fn test_print_writes_position() {
        let (mut platform, mut session) = setup(&["l", "p", "esc"]);
        let (_, printed) = run_all(&mut platform, &mut session);
        assert_eq!(printed, "510 400\n");
    }

    #[test]
    fn test_mode_switches() {
        for (k, mode) in [
            ("x", Mode::Hint),
            ("X", Mode::Hint),
            ("g", Mode::Grid),
            ("s", Mode::ScreenSelection),
            (";", Mode::History),
        ] {
            let (mut platform, mut session) = setup(&[k]);
            let (outcome, _) = run_all(&mut platform, &mut session);
            assert_eq!(outcome.exit, Exit::Switch(mode));
        }
    }

    #[test]
    fn test_first_event_is_handled() {
        let (mut platform, mut session) = setup(&["esc"]);
        let mut out = Vec::new();
        run(
            &mut platform,
            &mut session,
            &mut out,
            Some(InputEvent::press(KeyCode::Char('j'), Modifiers::NONE)),
        )
        .unwrap();
        assert_eq!(platform.moves(), [(500, 410)]);
    }

    #[test]
    fn test_scroll_leftover_is_processed() {
        let mut platform = HeadlessPlatform::new(vec![(1000, 800)]);
        let mut session = Session::new(Config::default()).unwrap();
        platform.press(key("e"));
        platform.wait(50);
        platform.press(key("l"));
        platform.push(Step::Event(InputEvent::release(
            KeyCode::Char('e'),
            Modifiers::NONE,
        )));
        platform.tap(key("esc"));

        run_all(&mut platform, &mut session);
        assert!(platform.clicks().iter().all(|b| *b == 5));
        assert!(!platform.clicks().is_empty());
        assert_eq!(platform.moves(), [(510, 400)]);
    }

    #[test]
    fn test_closed_input_quits() {
        let (mut platform, mut session) = setup(&["l"]);
        let (outcome, _) = run_all(&mut platform, &mut session);
        assert_eq!(outcome.exit, Exit::Quit);
    }

    #[test]
    fn test_cursor_drawn_after_each_key() {
        let (mut platform, mut session) = setup(&["l", "esc"]);
        run_all(&mut platform, &mut session);
        let boxes = platform
            .calls()
            .iter()
            .filter(|c| matches!(c, PlatformCall::DrawBox { .. }))
            .count();
        // Once on entry, once after `l`
        assert_eq!(boxes, 2);
    }
}
