use std::io::Write;

use minigames::config::Settings;
use minigames::constants;
use minigames::error::GameError;
use minigames::games::waste::Category;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_defaults_match_constants() {
    let settings = Settings::default();

    assert_eq!(settings.maze.lives, constants::maze::LIVES);
    assert_eq!(settings.maze.step, constants::maze::STEP_SIZE);
    assert_eq!(settings.dots.advance_delay_ms, 1500);
    assert_eq!(settings.dots.snap_radius, constants::dots::SNAP_RADIUS);
    assert_eq!(settings.waste.feedback_delay_ms, 800);
    assert_eq!(settings.waste.penalty, constants::waste::PENALTY);
    assert_that(&settings.waste.seed).is_none();
}

#[test]
fn test_load_without_file_gives_defaults() {
    let settings = Settings::load(None).unwrap();
    assert_eq!(settings.maze, Settings::default().maze);
    assert_eq!(settings.dots, Settings::default().dots);
}

#[test]
fn test_toml_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("minigames-settings-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r######"
[maze]
lives = 5
board = ["#####", "#S.o#", "#####"]

[dots]
advance_delay_ms = 250

[[waste.catalog]]
name = "Battery"
glyph = "B"
category = "hazardous"
points = 20
"######
    )
    .unwrap();
    drop(file);

    let settings = Settings::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(settings.maze.lives, 5);
    assert_eq!(settings.maze.board.len(), 3);
    assert_eq!(settings.dots.advance_delay_ms, 250);
    assert_eq!(settings.waste.catalog.len(), 1);
    assert_eq!(settings.waste.catalog[0].category, Category::Hazardous);
    assert_eq!(settings.waste.penalty, constants::waste::PENALTY);
}

#[test]
fn test_unreadable_settings_surface_as_errors() {
    let path = std::env::temp_dir().join(format!("minigames-broken-{}.toml", std::process::id()));
    std::fs::write(&path, "[waste]\naccuracy_threshold = \"high\"\n").unwrap();

    let result = Settings::load(Some(&path));
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(GameError::Settings(_))));
}
