// src/config.rs

use crate::constants::{
    CHECK_PENALTY, DEFAULT_DEPTH, DEFAULT_HASH_MB, DEFAULT_TIME_MS, ENDGAME_PIECE_THRESHOLD,
    KING_ACTIVITY_MULTIPLIER, MOBILITY_WEIGHT, PAWN_COUNT_BONUS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const PROFILES_DIR: &str = "profiles";

/// Weights of the hand-written evaluation terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub pawn_bonus: i32,
    pub mobility_weight: i32,
    pub king_activity_multiplier: i32,
    pub check_penalty: i32,
    /// At most this many non-pawn, non-king pieces on the board means endgame.
    pub endgame_piece_threshold: u32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            pawn_bonus: PAWN_COUNT_BONUS,
            mobility_weight: MOBILITY_WEIGHT,
            king_activity_multiplier: KING_ACTIVITY_MULTIPLIER,
            check_penalty: CHECK_PENALTY,
            endgame_piece_threshold: ENDGAME_PIECE_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub hash_mb: usize,
    pub default_depth: i32,
    pub default_time_ms: u64,
    pub use_null_move: bool,
    pub use_quiescence: bool,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_mb: DEFAULT_HASH_MB,
            default_depth: DEFAULT_DEPTH,
            default_time_ms: DEFAULT_TIME_MS,
            use_null_move: true,
            use_quiescence: true,
            weights: EvalWeights::default(),
        }
    }
}

pub fn save_profile(name: &str, config: &EngineConfig) -> io::Result<()> {
    save_profile_in(Path::new(PROFILES_DIR), name, config)
}

pub fn load_profile(name: &str) -> io::Result<EngineConfig> {
    load_profile_in(Path::new(PROFILES_DIR), name)
}

pub fn get_profiles() -> io::Result<Vec<String>> {
    get_profiles_in(Path::new(PROFILES_DIR))
}

pub fn save_profile_in(dir: &Path, name: &str, config: &EngineConfig) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", name));
    let json = serde_json::to_string_pretty(config)?;
    fs::File::create(path)?.write_all(json.as_bytes())
}

pub fn load_profile_in(dir: &Path, name: &str) -> io::Result<EngineConfig> {
    let path = dir.join(format!("{}.json", name));
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(io::Error::from)
}

pub fn get_profiles_in(dir: &Path) -> io::Result<Vec<String>> {
    let mut profiles = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(stem) = path.file_stem() {
                if let Some(name) = stem.to_str() {
                    profiles.push(name.to_string());
                }
            }
        }
    }
    profiles.sort();
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_profile_round_trip() {
        let dir = tempdir().unwrap();
        let mut config = EngineConfig::default();
        config.hash_mb = 4;
        config.use_null_move = false;
        config.weights.mobility_weight = 7;

        save_profile_in(dir.path(), "aggressive", &config).unwrap();
        let loaded = load_profile_in(dir.path(), "aggressive").unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_profile_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fast.json"), r#"{ "default_time_ms": 250 }"#).unwrap();

        let loaded = load_profile_in(dir.path(), "fast").unwrap();
        assert_eq!(loaded.default_time_ms, 250);
        assert_eq!(loaded.hash_mb, DEFAULT_HASH_MB);
        assert_eq!(loaded.weights, EvalWeights::default());
    }

    #[test]
    fn test_get_profiles_lists_json_stems() {
        let dir = tempdir().unwrap();
        save_profile_in(dir.path(), "b", &EngineConfig::default()).unwrap();
        save_profile_in(dir.path(), "a", &EngineConfig::default()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(get_profiles_in(dir.path()).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_profile_is_invalid_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let err = load_profile_in(dir.path(), "broken").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
