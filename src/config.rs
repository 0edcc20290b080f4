use std::cell::RefCell;
use std::fmt;

use tilebox_core::rules::SHUFFLE_MOVES_MAX;
use tilebox_core::{BoardSize, BoardSizeError, LabelPolicy, LabelPolicyError, PuzzleRules};
use web_sys::UrlSearchParams;

pub const PARAM_SIZE: &str = "size";
pub const PARAM_SHUFFLE: &str = "shuffle";
pub const PARAM_LABEL: &str = "label";
pub const PARAM_AUTO_SHUFFLE: &str = "autoshuffle";

thread_local! {
    static APP_CONFIG: RefCell<Option<AppConfig>> = RefCell::new(None);
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub rules: PuzzleRules,
    pub label_policy: LabelPolicy,
    pub auto_shuffle: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules: PuzzleRules::default(),
            label_policy: LabelPolicy::default(),
            auto_shuffle: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Size(BoardSizeError),
    ShuffleMoves { value: String },
    LabelPolicy(LabelPolicyError),
    Flag { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Size(err) => write!(f, "{PARAM_SIZE}: {err}"),
            ConfigError::ShuffleMoves { value } => write!(
                f,
                "{PARAM_SHUFFLE}: '{value}' is not a move count in 0..={SHUFFLE_MOVES_MAX}"
            ),
            ConfigError::LabelPolicy(err) => write!(f, "{PARAM_LABEL}: {err}"),
            ConfigError::Flag { key, value } => {
                write!(f, "{key}: '{value}' is not a boolean")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Builds the config from query parameters. Bad values keep their default and
/// are reported alongside the result.
pub fn parse_app_config<F>(get: F) -> (AppConfig, Vec<ConfigError>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();
    let mut errors = Vec::new();
    if let Some(value) = get(PARAM_SIZE) {
        match value.parse::<BoardSize>() {
            Ok(size) => config.rules.size = size,
            Err(err) => errors.push(ConfigError::Size(err)),
        }
    }
    if let Some(value) = get(PARAM_SHUFFLE) {
        match value.trim().parse::<u32>() {
            Ok(moves) if moves <= SHUFFLE_MOVES_MAX => config.rules.shuffle_moves = moves,
            _ => errors.push(ConfigError::ShuffleMoves { value }),
        }
    }
    if let Some(value) = get(PARAM_LABEL) {
        match value.parse::<LabelPolicy>() {
            Ok(policy) => config.label_policy = policy,
            Err(err) => errors.push(ConfigError::LabelPolicy(err)),
        }
    }
    if let Some(value) = get(PARAM_AUTO_SHUFFLE) {
        match parse_flag(&value) {
            Some(flag) => config.auto_shuffle = flag,
            None => errors.push(ConfigError::Flag {
                key: PARAM_AUTO_SHUFFLE,
                value,
            }),
        }
    }
    (config, errors)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn load_app_config() -> AppConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    let Ok(params) = UrlSearchParams::new_with_str(&search) else {
        return AppConfig::default();
    };
    let (config, errors) = parse_app_config(|key| params.get(key));
    for err in errors {
        gloo::console::warn!("config: ignoring query parameter", err.to_string());
    }
    config
}

pub fn app_config() -> AppConfig {
    APP_CONFIG.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(load_app_config)
            .clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(pairs: &[(&str, &str)]) -> (AppConfig, Vec<ConfigError>) {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        parse_app_config(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_query_uses_defaults() {
        let (config, errors) = parse(&[]);
        assert_eq!(config, AppConfig::default());
        assert!(errors.is_empty());
        assert_eq!(config.rules.size.get(), 3);
        assert_eq!(config.rules.shuffle_moves, 1000);
    }

    #[test]
    fn reads_every_parameter() {
        let (config, errors) = parse(&[
            ("size", "4"),
            ("shuffle", "250"),
            ("label", "legacy"),
            ("autoshuffle", ""),
        ]);
        assert!(errors.is_empty());
        assert_eq!(config.rules.size.get(), 4);
        assert_eq!(config.rules.shuffle_moves, 250);
        assert_eq!(config.label_policy, LabelPolicy::Legacy);
        assert!(config.auto_shuffle);
    }

    #[test]
    fn bad_values_fall_back_and_report() {
        let (config, errors) = parse(&[
            ("size", "12"),
            ("shuffle", "-3"),
            ("label", "loud"),
            ("autoshuffle", "maybe"),
        ]);
        assert_eq!(config, AppConfig::default());
        assert_eq!(errors.len(), 4);
        assert!(matches!(
            errors[0],
            ConfigError::Size(BoardSizeError::OutOfRange { found: 12, .. })
        ));
        assert!(errors[3].to_string().starts_with("autoshuffle"));
    }
}
