//! Hint-driven modes
//!
//! Hint, screen selection, history and word-list hints all share one
//! selection loop: draw the labelled boxes, narrow them as the user types,
//! and warp to the last one standing.

use anyhow::Context;

use super::{next_press, Mode, ModeOutcome, Selection};
use crate::keymap::Action;
use crate::model::hint::{self, Hint, HintError, HintSet};
use crate::platform::{Platform, ScreenId};
use crate::session::Session;

/// Hints plus the screen each one is drawn on
struct Targets {
    hints: Vec<Hint>,
    screens: Vec<ScreenId>,
}

impl Targets {
    fn on_screen(screen: ScreenId, hints: Vec<Hint>) -> Self {
        let screens = vec![screen; hints.len()];
        Self { hints, screens }
    }
}

/// Run one of the hint-driven modes.
///
/// `mode` must be `Hint`, `HintOneshot`, `ScreenSelection`, `History` or
/// `HintSpec`.
pub fn run(
    platform: &mut dyn Platform,
    session: &mut Session,
    mode: &Mode,
) -> anyhow::Result<ModeOutcome> {
    let targets = match mode {
        Mode::Hint | Mode::HintOneshot => procedural_targets(platform, session)?,
        Mode::HintSpec(path) => {
            let labels = hint::load_labels(path)?;
            let screen = platform.mouse_get_position().screen;
            let (w, h) = platform.screen_get_dimensions(screen);
            Targets::on_screen(
                screen,
                hint::generate_external(w, h, labels, session.config.hint_size)?,
            )
        }
        Mode::ScreenSelection => screen_targets(platform, session)?,
        Mode::History => match history_targets(platform, session)? {
            Some(targets) => targets,
            None => {
                tracing::info!("No click history to show");
                return Ok(ModeOutcome::done(None));
            }
        },
        other => anyhow::bail!("{} is not a hint mode", other),
    };

    tracing::debug!("{} mode with {} hints", mode, targets.hints.len());
    select(platform, session, targets)
}

fn procedural_targets(
    platform: &mut dyn Platform,
    session: &Session,
) -> anyhow::Result<Targets> {
    let screen = platform.mouse_get_position().screen;
    let (w, h) = platform.screen_get_dimensions(screen);
    let hints = hint::generate_procedural(
        w,
        h,
        &session.hint_alphabet(),
        None,
        session.config.hint_size,
    )
    .context("Failed to generate hints")?;
    Ok(Targets::on_screen(screen, hints))
}

fn screen_targets(platform: &mut dyn Platform, session: &Session) -> anyhow::Result<Targets> {
    let alphabet = session.screen_alphabet();
    if alphabet.is_empty() {
        return Err(HintError::EmptySource("screen_chars".to_string()).into());
    }

    let mut targets = Targets {
        hints: Vec::new(),
        screens: Vec::new(),
    };
    for (screen, label) in platform.screen_list().into_iter().zip(alphabet) {
        let (w, h) = platform.screen_get_dimensions(screen);
        let size = (w.min(h) / 8).max(1);
        targets
            .hints
            .extend(hint::point_hints(&[(w / 2, h / 2)], vec![label.to_string()], size));
        targets.screens.push(screen);
    }
    Ok(targets)
}

fn history_targets(
    platform: &mut dyn Platform,
    session: &Session,
) -> anyhow::Result<Option<Targets>> {
    let history = session.load_history();
    if history.is_empty() {
        return Ok(None);
    }
    let labels = hint::short_labels(history.len(), &session.hint_alphabet())?;
    let screen = platform.mouse_get_position().screen;
    let hints = hint::point_hints(
        history.entries(),
        labels,
        session.config.history_hint_size,
    );
    Ok(Some(Targets::on_screen(screen, hints)))
}

fn select(
    platform: &mut dyn Platform,
    session: &mut Session,
    targets: Targets,
) -> anyhow::Result<ModeOutcome> {
    if targets.hints.is_empty() {
        return Err(HintError::EmptySource("hint source".to_string()).into());
    }
    let Targets { hints, screens } = targets;
    let mut set = HintSet::new(hints);

    loop {
        redraw(platform, session, &set, &screens);

        let Some(event) = next_press(platform)? else {
            return Ok(ModeOutcome::quit());
        };

        if session.keymap.is(Action::HintUndo, &event) {
            set.pop();
            continue;
        }
        if session.keymap.is(Action::HintUndoAll, &event) {
            set.clear();
            continue;
        }

        let Some(c) = event.typed_char() else {
            return Ok(ModeOutcome::done(Some(event)));
        };
        set.push(c);

        match set.candidates().len() {
            0 => {
                tracing::debug!("No hint matches '{}'", set.prefix());
                return Ok(ModeOutcome::done(Some(event)));
            }
            1 => {
                let Some(idx) = set.unique_index() else {
                    continue;
                };
                let hint = &set.hints()[idx];
                let screen = screens[idx];
                let (x, y) = hint.center();
                let before = platform.mouse_get_position();

                // Some applications only register hover after real motion
                platform.mouse_move(screen, x - 1, y);
                platform.mouse_move(screen, x, y);

                session.ring.insert(before.x, before.y);
                session.ring.insert(x, y);
                tracing::debug!("Selected hint '{}' at ({}, {})", hint.label, x, y);
                return Ok(ModeOutcome::done(None).with_selection(Selection {
                    x,
                    y,
                    label: Some(hint.label.clone()),
                }));
            }
            _ => {}
        }
    }
}

fn redraw(platform: &mut dyn Platform, session: &Session, set: &HintSet, screens: &[ScreenId]) {
    let style = session.hint_style();
    let visible: Vec<(ScreenId, Hint)> = set
        .hints()
        .iter()
        .zip(screens)
        .filter(|(h, _)| hint::label_matches(&h.label, set.prefix()))
        .map(|(h, s)| (*s, h.clone()))
        .collect();

    for screen in platform.screen_list() {
        platform.clear(screen);
        let on_screen: Vec<Hint> = visible
            .iter()
            .filter(|(s, _)| *s == screen)
            .map(|(_, h)| h.clone())
            .collect();
        if !on_screen.is_empty() {
            platform.draw_hints(screen, &on_screen, &style);
        }
    }
    platform.commit();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::keymap::{parse_key_sequence, InputEvent};
    use crate::mode::Exit;
    use crate::platform::{HeadlessPlatform, PlatformCall};

    fn key(spec: &str) -> InputEvent {
        InputEvent::from_sequence(parse_key_sequence(spec).unwrap(), true)
    }

    fn session(yaml: &str) -> Session {
        Session::new(Config::from_yaml(yaml).unwrap()).unwrap()
    }

    fn platform(keys: &[&str]) -> HeadlessPlatform {
        let mut platform = HeadlessPlatform::new(vec![(1000, 800)]);
        for k in keys {
            platform.tap(key(k));
        }
        platform
    }

    #[test]
    fn test_unique_prefix_selects() {
        let mut platform = platform(&["b", "a"]);
        let mut session = session("hint_chars: ab\nhint_size: 50\n");

        let outcome = run(&mut platform, &mut session, &Mode::Hint).unwrap();
        assert_eq!(outcome.exit, Exit::Done);
        assert_eq!(outcome.leftover, None);

        // 2x2 lattice on 1000x800: "ba" is the bottom-left cell
        let selection = outcome.selection.unwrap();
        assert_eq!((selection.x, selection.y), (250, 600));
        assert_eq!(selection.label.as_deref(), Some("ba"));
        assert_eq!(platform.moves(), [(249, 600), (250, 600)]);
        assert_eq!(session.ring.current(), Some((250, 600)));
    }

    #[test]
    fn test_no_match_returns_key() {
        let mut platform = platform(&["a", "z"]);
        let mut session = session("hint_chars: ab\n");

        let outcome = run(&mut platform, &mut session, &Mode::Hint).unwrap();
        assert_eq!(outcome.exit, Exit::Done);
        assert_eq!(outcome.leftover, Some(key("z")));
        assert_eq!(outcome.selection, None);
        assert!(platform.moves().is_empty());
    }

    #[test]
    fn test_non_character_key_is_unmatched() {
        let mut platform = platform(&["esc"]);
        let mut session = session("");

        let outcome = run(&mut platform, &mut session, &Mode::Hint).unwrap();
        assert_eq!(outcome.leftover, Some(key("esc")));
    }

    #[test]
    fn test_undo_and_undo_all() {
        let mut platform = platform(&["a", "backspace", "b", "C-u", "a", "b"]);
        let mut session = session("hint_chars: ab\n");

        let outcome = run(&mut platform, &mut session, &Mode::Hint).unwrap();
        assert_eq!(outcome.selection.unwrap().label.as_deref(), Some("ab"));
    }

    #[test]
    fn test_redraw_shows_only_candidates() {
        let mut platform = platform(&["a", "a"]);
        let mut session = session("hint_chars: ab\n");
        run(&mut platform, &mut session, &Mode::Hint).unwrap();

        let drawn: Vec<Vec<String>> = platform
            .calls()
            .iter()
            .filter_map(|c| match c {
                PlatformCall::DrawHints { labels, .. } => Some(labels.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(drawn[0], ["aa", "ab", "ba", "bb"]);
        assert_eq!(drawn[1], ["aa", "ab"]);
    }

    #[test]
    fn test_screen_selection() {
        let mut platform = HeadlessPlatform::new(vec![(1000, 800), (640, 480)]);
        platform.tap(key("k"));
        let mut session = session("");

        let outcome = run(&mut platform, &mut session, &Mode::ScreenSelection).unwrap();
        assert_eq!(outcome.exit, Exit::Done);
        let p = platform.mouse_get_position();
        assert_eq!((p.screen, p.x, p.y), (1, 320, 240));
    }

    #[test]
    fn test_history_mode_uses_click_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let mut session = session("").with_history_path(Some(path));
        session.record_click(100, 100);
        session.record_click(600, 300);

        let mut platform = platform(&["b"]);
        let outcome = run(&mut platform, &mut session, &Mode::History).unwrap();
        let selection = outcome.selection.unwrap();
        assert_eq!((selection.x, selection.y), (600, 300));
    }

    #[test]
    fn test_empty_history_is_done() {
        let mut platform = platform(&["a"]);
        let mut session = session("");
        let outcome = run(&mut platform, &mut session, &Mode::History).unwrap();
        assert_eq!(outcome, ModeOutcome::done(None));
        assert_eq!(platform.remaining(), 2);
    }

    #[test]
    fn test_hint_spec_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        std::fs::write(&path, "save\nsearch\nquit\n").unwrap();

        let mut platform = platform(&["s", "e", "a"]);
        let mut session = session("");
        let outcome = run(&mut platform, &mut session, &Mode::HintSpec(path)).unwrap();
        assert_eq!(outcome.selection.unwrap().label.as_deref(), Some("search"));
    }

    #[test]
    fn test_empty_alphabet_is_fatal() {
        let mut platform = platform(&["a"]);
        let mut session = session("");
        session.config.hint_chars.clear();
        assert!(run(&mut platform, &mut session, &Mode::Hint).is_err());
    }
}
