//! In-memory platform backend
//!
//! Input comes from a script of steps; time is virtual and only moves when
//! the script waits or a timed read runs dry. Every side effect is recorded
//! as a [`PlatformCall`] so callers can inspect what the engine did.

use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use super::{Platform, PlatformCall, PlatformError, Pointer, ScreenId};
use crate::color::Color;
use crate::keymap::InputEvent;
use crate::model::{Hint, HintStyle};
use crate::watcher::ConfigWatcher;

/// One scripted input step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Event(InputEvent),
    /// Let this much virtual time pass before the next step
    Wait(Duration),
    /// Behave as if a monitored file changed
    Reload,
}

pub struct HeadlessPlatform {
    script: VecDeque<Step>,
    screens: Vec<(i32, i32)>,
    pointer: Pointer,
    calls: Vec<PlatformCall>,
    grabbed: bool,
    /// Reason given for refusing every keyboard grab
    grab_refusal: Option<String>,
    epoch: Instant,
    elapsed: Duration,
    reload_pending: bool,
    watcher: Option<ConfigWatcher>,
    watch_files: bool,
}

impl HeadlessPlatform {
    /// A backend with the given screens, pointer at the centre of the first
    pub fn new(screens: Vec<(i32, i32)>) -> Self {
        let screens = if screens.is_empty() {
            vec![(1920, 1080)]
        } else {
            screens
        };
        let (w, h) = screens[0];
        Self {
            script: VecDeque::new(),
            screens,
            pointer: Pointer {
                screen: 0,
                x: w / 2,
                y: h / 2,
            },
            calls: Vec::new(),
            grabbed: false,
            grab_refusal: None,
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
            reload_pending: false,
            watcher: None,
            watch_files: false,
        }
    }

    /// Refuse keyboard grabs, as when another client holds the keyboard
    pub fn with_grab_refused(mut self, reason: &str) -> Self {
        self.grab_refusal = Some(reason.to_string());
        self
    }

    /// Use a real file watcher for [`Platform::monitor_file`]
    pub fn with_file_watching(mut self) -> Self {
        self.watch_files = true;
        self
    }

    pub fn push(&mut self, step: Step) {
        self.script.push_back(step);
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.script.extend(steps);
    }

    /// Queue a key press
    pub fn press(&mut self, event: InputEvent) {
        self.push(Step::Event(InputEvent {
            pressed: true,
            ..event
        }));
    }

    /// Queue a press and its release
    pub fn tap(&mut self, event: InputEvent) {
        self.press(event);
        self.push(Step::Event(InputEvent {
            pressed: false,
            ..event
        }));
    }

    pub fn wait(&mut self, ms: u64) {
        self.push(Step::Wait(Duration::from_millis(ms)));
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn calls(&self) -> &[PlatformCall] {
        &self.calls
    }

    /// Every pointer warp, in order
    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Move { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Every button click, in order
    pub fn clicks(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Click(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    /// Virtual time since construction
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn dimensions(&self, screen: ScreenId) -> (i32, i32) {
        self.screens.get(screen).copied().unwrap_or((0, 0))
    }
}

impl Platform for HeadlessPlatform {
    fn next_event(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<Option<InputEvent>, PlatformError> {
        let mut remaining = timeout;

        loop {
            match self.script.pop_front() {
                Some(Step::Event(event)) => return Ok(Some(event)),
                Some(Step::Reload) => self.reload_pending = true,
                Some(Step::Wait(wait)) => match remaining {
                    Some(left) if wait > left => {
                        self.elapsed += left;
                        self.script.push_front(Step::Wait(wait - left));
                        return Ok(None);
                    }
                    Some(left) => {
                        self.elapsed += wait;
                        remaining = Some(left - wait);
                    }
                    None => self.elapsed += wait,
                },
                None => {
                    if let Some(left) = remaining {
                        self.elapsed += left;
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.script.is_empty()
    }

    fn grab_keyboard(&mut self) -> Result<(), PlatformError> {
        if let Some(reason) = &self.grab_refusal {
            return Err(PlatformError::Grab(reason.clone()));
        }
        self.grabbed = true;
        self.calls.push(PlatformCall::Grab);
        Ok(())
    }

    fn ungrab_keyboard(&mut self) {
        self.grabbed = false;
        self.calls.push(PlatformCall::Ungrab);
    }

    fn mouse_move(&mut self, screen: ScreenId, x: i32, y: i32) {
        self.pointer = Pointer { screen, x, y };
        self.calls.push(PlatformCall::Move { screen, x, y });
    }

    fn mouse_click(&mut self, button: u8) {
        self.calls.push(PlatformCall::Click(button));
    }

    fn mouse_down(&mut self, button: u8) {
        self.calls.push(PlatformCall::Down(button));
    }

    fn mouse_up(&mut self, button: u8) {
        self.calls.push(PlatformCall::Up(button));
    }

    fn mouse_get_position(&self) -> Pointer {
        self.pointer
    }

    fn screen_list(&self) -> Vec<ScreenId> {
        (0..self.screens.len()).collect()
    }

    fn screen_get_dimensions(&self, screen: ScreenId) -> (i32, i32) {
        self.dimensions(screen)
    }

    fn draw_box(&mut self, screen: ScreenId, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.calls.push(PlatformCall::DrawBox {
            screen,
            x,
            y,
            w,
            h,
            color,
        });
    }

    fn draw_hints(&mut self, screen: ScreenId, hints: &[Hint], _style: &HintStyle) {
        self.calls.push(PlatformCall::DrawHints {
            screen,
            labels: hints.iter().map(|h| h.label.clone()).collect(),
        });
    }

    fn clear(&mut self, screen: ScreenId) {
        self.calls.push(PlatformCall::Clear(screen));
    }

    fn commit(&mut self) {
        self.calls.push(PlatformCall::Commit);
    }

    fn monitor_file(&mut self, path: &Path) -> Result<(), PlatformError> {
        if !self.watch_files {
            tracing::debug!("Headless platform not watching {}", path.display());
            return Ok(());
        }
        let watcher = ConfigWatcher::new(path).map_err(|e| PlatformError::Watch {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.watcher = Some(watcher);
        Ok(())
    }

    fn take_reload(&mut self) -> bool {
        let watched = self
            .watcher
            .as_ref()
            .is_some_and(|watcher| watcher.poll_changed());
        std::mem::take(&mut self.reload_pending) || watched
    }

    fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }
}
