//! Mode controller
//!
//! Idles on the activation chords, then drives a chain of modes until one
//! of them quits. Config reloads are only applied while idle.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{grid, hint, normal, release_drag, Exit, Mode, ModeOutcome, Selection};
use crate::keymap::{Action, InputEvent, KeySequence};
use crate::platform::Platform;
use crate::session::Session;

/// Activation chords, in resolution order
const ACTIVATIONS: [Action; 8] = [
    Action::Activation,
    Action::HintActivation,
    Action::Hint2Activation,
    Action::HintOneshot,
    Action::Hint2Oneshot,
    Action::GridActivation,
    Action::ScreenActivation,
    Action::HistoryActivation,
];

fn activation_mode(action: Action) -> Option<Mode> {
    match action {
        Action::Activation => Some(Mode::Normal),
        Action::HintActivation | Action::Hint2Activation => Some(Mode::Hint),
        Action::HintOneshot | Action::Hint2Oneshot => Some(Mode::HintOneshot),
        Action::GridActivation => Some(Mode::Grid),
        Action::ScreenActivation => Some(Mode::ScreenSelection),
        Action::HistoryActivation => Some(Mode::History),
        _ => None,
    }
}

pub struct Controller<'a> {
    platform: &'a mut dyn Platform,
    session: Session,
    out: &'a mut dyn Write,
    /// Explicit `--config` path; `None` reloads from the default location
    config_path: Option<PathBuf>,
}

impl<'a> Controller<'a> {
    pub fn new(platform: &'a mut dyn Platform, session: Session, out: &'a mut dyn Write) -> Self {
        Self {
            platform,
            session,
            out,
            config_path: None,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Idle loop: wait for an activation chord, run it, repeat until input
    /// closes
    pub fn run_daemon(&mut self) -> anyhow::Result<()> {
        self.watch_config();

        loop {
            if self.platform.take_reload() {
                let path = self.config_path.clone();
                if let Err(e) = self.session.reload(path.as_deref()) {
                    tracing::warn!("Keeping previous config: {}", e);
                }
            }

            let sequences = self.session.keymap.activation_sequences();
            let Some(event) = self.platform.wait_for_any(&sequences)? else {
                tracing::info!("Input closed, stopping");
                return Ok(());
            };

            let Some(mode) = self
                .session
                .keymap
                .resolve(&ACTIVATIONS, &event)
                .and_then(activation_mode)
            else {
                continue;
            };

            let chord = KeySequence::new(event.mods, event.code);
            tracing::debug!("Activation {} -> {} mode", chord, mode);
            self.activate(mode, &chord)?;
        }
    }

    /// Grab the keyboard, run the mode chain starting at `mode`, release.
    ///
    /// `chord` is the activation that asked for it.
    pub fn activate(&mut self, mode: Mode, chord: &KeySequence) -> anyhow::Result<()> {
        self.platform
            .grab_keyboard()
            .with_context(|| format!("Failed to grab keyboard for {} ({} mode)", chord, mode))?;

        let result = self.run_chain(mode);

        release_drag(&mut *self.platform, &mut self.session);
        self.platform.ungrab_keyboard();
        self.clear_screens();
        result
    }

    /// Run a single mode once and report the result on the output.
    ///
    /// Normal mode only ends on a button when the session is oneshot.
    /// Returns the process exit status: the index of the button that ended
    /// the run, 0 otherwise.
    pub fn run_oneshot(&mut self, mode: Mode) -> anyhow::Result<i32> {
        self.platform
            .grab_keyboard()
            .with_context(|| format!("Failed to grab keyboard for {} mode", mode))?;

        let result = self.run_mode(&mode, None);

        release_drag(&mut *self.platform, &mut self.session);
        self.platform.ungrab_keyboard();
        self.clear_screens();
        let outcome = result?;

        if outcome.exit != Exit::Quit {
            if let Some(selection) = &outcome.selection {
                let with_label = matches!(mode, Mode::HintSpec(_));
                write_selection(&mut *self.out, selection, with_label)?;
            }
        }

        Ok(match outcome.exit {
            Exit::Button(index) => index as i32,
            _ => 0,
        })
    }

    fn run_chain(&mut self, mode: Mode) -> anyhow::Result<()> {
        if mode == Mode::HintOneshot {
            let outcome = hint::run(&mut *self.platform, &mut self.session, &mode)?;
            if let Some(selection) = &outcome.selection {
                write_selection(&mut *self.out, selection, false)?;
            }
            return Ok(());
        }

        let mut mode = mode;
        let mut leftover: Option<InputEvent> = None;
        loop {
            let outcome = self.run_mode(&mode, leftover.take())?;
            tracing::debug!("{} mode ended: {:?}", mode, outcome.exit);

            match outcome.exit {
                Exit::Quit | Exit::Button(_) => return Ok(()),
                Exit::Switch(next) => mode = next,
                Exit::Done => {
                    mode = Mode::Normal;
                    leftover = outcome.leftover;
                }
            }
        }
    }

    fn run_mode(&mut self, mode: &Mode, first: Option<InputEvent>) -> anyhow::Result<ModeOutcome> {
        match mode {
            Mode::Normal => normal::run(&mut *self.platform, &mut self.session, &mut *self.out, first),
            Mode::Grid => grid::run(&mut *self.platform, &mut self.session),
            Mode::Hint
            | Mode::HintOneshot
            | Mode::ScreenSelection
            | Mode::History
            | Mode::HintSpec(_) => hint::run(&mut *self.platform, &mut self.session, mode),
        }
    }

    fn clear_screens(&mut self) {
        for screen in self.platform.screen_list() {
            self.platform.clear(screen);
        }
        self.platform.commit();
    }

    fn watch_config(&mut self) {
        let path = match &self.config_path {
            Some(path) => Some(path.clone()),
            None => crate::config_paths::config_file().filter(|p| p.exists()),
        };
        if let Some(path) = path {
            if let Err(e) = self.platform.monitor_file(&path) {
                tracing::warn!("Config changes will not be picked up: {}", e);
            }
        }
    }

    /// Config file this controller reloads from, if set explicitly
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

fn write_selection(
    out: &mut dyn Write,
    selection: &Selection,
    with_label: bool,
) -> std::io::Result<()> {
    match (&selection.label, with_label) {
        (Some(label), true) => writeln!(out, "{} {} {}", selection.x, selection.y, label)?,
        _ => writeln!(out, "{} {}", selection.x, selection.y)?,
    }
    out.flush()
}
