//! Config files feeding the keymap and the modes

mod common;

use common::{platform_with_keys, position};

use keywarp::config::{Config, ConfigError};
use keywarp::keymap::{Action, KeymapError};
use keywarp::mode::Controller;
use keywarp::session::Session;

fn load(content: &str) -> Result<Config, ConfigError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).unwrap();
    Config::load(Some(&path))
}

#[test]
fn test_rebound_activation_and_movement() {
    let config = load("move_step: 25\nkeys:\n  activation_key: C-space\n  left: a,left\n").unwrap();
    let mut platform = platform_with_keys(&["A-M-c", "C-space", "left", "a", "esc"]);
    let mut out = Vec::new();
    Controller::new(&mut platform, Session::new(config).unwrap(), &mut out)
        .run_daemon()
        .unwrap();

    // The old activation chord does nothing; both `left` alternatives move
    assert_eq!(platform.moves(), [(475, 400), (450, 400)]);
    assert_eq!(position(&platform), (450, 400));
}

#[test]
fn test_bad_chord_names_the_binding() {
    let err = load("keys:\n  grid_exit: C-nope\n").unwrap_err();
    match err {
        ConfigError::Keys(KeymapError::InvalidKey(msg)) => assert!(msg.contains("grid_exit")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_dump_lists_every_binding() {
    let yaml = Config::default().to_yaml().unwrap();
    for name in ["activation_key", "hint_oneshot_key", "grid_cut_right", "scroll_up"] {
        assert!(yaml.contains(name), "missing {}", name);
    }
    assert_eq!(Config::from_yaml(&yaml).unwrap().keys.len(), Action::ALL.len());
}

#[test]
fn test_buttons_order_sets_button_numbers() {
    let config = load("keys:\n  buttons: \". m ,\"\n").unwrap();
    let mut platform = platform_with_keys(&["A-M-c", "m", ".", "esc"]);
    let mut out = Vec::new();
    Controller::new(&mut platform, Session::new(config).unwrap(), &mut out)
        .run_daemon()
        .unwrap();

    assert_eq!(platform.clicks(), [2, 1]);
}
