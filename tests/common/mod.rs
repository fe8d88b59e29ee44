//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keywarp::config::Config;
use keywarp::keymap::{parse_key_sequence, InputEvent};
use keywarp::platform::{replay, HeadlessPlatform, Platform};
use keywarp::session::Session;

/// Press event for a chord spec like `A-M-c` or `H`
pub fn key(spec: &str) -> InputEvent {
    InputEvent::from_sequence(parse_key_sequence(spec).unwrap(), true)
}

/// A 1000x800 single-screen backend with the given keys tapped in order
pub fn platform_with_keys(keys: &[&str]) -> HeadlessPlatform {
    let mut platform = HeadlessPlatform::new(vec![(1000, 800)]);
    for k in keys {
        platform.tap(key(k));
    }
    platform
}

/// A 1000x800 single-screen backend fed from a replay script
pub fn platform_with_script(script: &str) -> HeadlessPlatform {
    let mut platform = HeadlessPlatform::new(vec![(1000, 800)]);
    platform.extend(replay::parse_script(script).unwrap());
    platform
}

pub fn session(yaml: &str) -> Session {
    Session::new(Config::from_yaml(yaml).unwrap()).unwrap()
}

pub fn position(platform: &HeadlessPlatform) -> (i32, i32) {
    let p = platform.mouse_get_position();
    (p.x, p.y)
}
