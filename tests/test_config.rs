use std::f64::consts::PI;

use approx::assert_relative_eq;

use asteroid_shooter::config::{GameConfig, SpriteSize, MAX_SPRITE_DIMENSION};
use asteroid_shooter::entities::AsteroidSize;
use asteroid_shooter::error::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = GameConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.screen_width, 800.0);
    assert_eq!(config.ticks_per_second, 60);
    assert_eq!(config.split_divisor, 3.0);
}

#[test]
fn derived_per_tick_constants() {
    let config = GameConfig::default();
    assert_relative_eq!(config.rotation_per_tick(), PI / 60.0);
    assert_relative_eq!(config.bullet_speed_per_tick(), 350.0 / 60.0);
    assert_eq!(config.spawn_radius(101.0), 501.0);
    assert_eq!(config.screen_center().x, 400.0);
    assert_eq!(config.screen_center().y, 300.0);
}

#[test]
fn empty_toml_gives_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn partial_toml_overrides_only_given_fields() {
    let text = r#"
        screen_width = 1024.0
        split_divisor = 2.0
        spawn_sizes = ["big", "small"]

        [sprites]
        laser = { width = 12.0, height = 40.0 }
    "#;
    let config = GameConfig::from_toml_str(text).unwrap();
    assert_eq!(config.screen_width, 1024.0);
    assert_eq!(config.screen_height, 600.0);
    assert_eq!(config.split_divisor, 2.0);
    assert_eq!(config.spawn_sizes, vec![AsteroidSize::Big, AsteroidSize::Small]);
    assert_eq!(config.sprites.laser.width, 12.0);
    assert_eq!(config.sprites.player, GameConfig::default().sprites.player);
}

#[test]
fn empty_sprite_pool_is_rejected() {
    let err = GameConfig::from_toml_str("[sprites]\ntiny = []\n").unwrap_err();
    assert!(matches!(err, ConfigError::EmptySpritePool("sprites.tiny")));
}

#[test]
fn tiny_perimeter_spawns_are_rejected() {
    let err = GameConfig::from_toml_str("spawn_sizes = [\"big\", \"tiny\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "spawn_sizes", .. }));
}

#[test]
fn zero_tick_rate_is_rejected() {
    let config = GameConfig {
        ticks_per_second: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "ticks_per_second", .. })
    ));
}

#[test]
fn inverted_rotation_range_is_rejected() {
    let config = GameConfig {
        rotation_speed_min: 0.5,
        rotation_speed_max: 0.1,
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn nan_values_are_rejected() {
    let err = GameConfig::from_toml_str("split_divisor = nan\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "split_divisor", .. }));

    let err = GameConfig::from_toml_str("bullet_cull_margin = nan\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "bullet_cull_margin", .. }));

    let config = GameConfig {
        rotation_speed_min: f64::NAN,
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn infinite_values_are_rejected() {
    let err = GameConfig::from_toml_str("base_velocity = inf\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "base_velocity", .. }));

    let err = GameConfig::from_toml_str("screen_height = inf\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "screen_height", .. }));

    let err = GameConfig::from_toml_str("rotation_per_second = -inf\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "rotation_per_second", .. }));
}

#[test]
fn oversized_sprites_are_rejected() {
    let err = GameConfig::from_toml_str("[sprites.background]\nwidth = 1e300\nheight = 256.0\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "sprites.background", .. }));

    let mut config = GameConfig::default();
    config.sprites.big[0] = SpriteSize::new(MAX_SPRITE_DIMENSION + 1.0, 10.0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "sprites.big", .. })
    ));

    config.sprites.big[0] = SpriteSize::new(MAX_SPRITE_DIMENSION, MAX_SPRITE_DIMENSION);
    assert!(config.validate().is_ok());
}

#[test]
fn nan_sprite_is_rejected() {
    let mut config = GameConfig::default();
    config.sprites.laser = SpriteSize::new(9.0, f64::NAN);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { field: "sprites.laser", .. })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("screen_width = \"wide\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load("/definitely/not/here/asteroids.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("asteroids.toml"));
}

#[test]
fn config_round_trips_through_toml() {
    let config = GameConfig::default();
    let text = toml::to_string(&config).unwrap();
    assert_eq!(GameConfig::from_toml_str(&text).unwrap(), config);
}
