//! Rule configuration owned by each board.
//!
//! The pluggable parts of the rules (pawn long moves, promotion, castling,
//! en passant, turn order and the automatic draw thresholds) are plain data
//! so a board can be configured in code or from a TOML file:
//!
//! ```toml
//! enforce_turns = true
//! allowed_promotions = ["queen", "chancellor", "archbishop"]
//! pawn_long_move = { rule = "from_start_rank", steps = 3 }
//! move_rule = 50
//! ```
//!
//! Every field is optional in a file; missing fields keep their defaults.

use std::path::Path;

use chess_core::PieceKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the settings as valid TOML.
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The settings parsed but describe an unusable rule set.
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// How far a pawn may advance on its first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PawnLongMove {
    /// Pawns always advance a single rank.
    Disabled,
    /// Pawns standing on their color's pawn rank may advance `steps` ranks.
    FromStartRank { steps: u32 },
    /// Pawns that have never moved may advance `steps` ranks.
    WhileUnmoved { steps: u32 },
}

impl PawnLongMove {
    /// Returns the largest advance this rule ever grants.
    pub const fn max_steps(self) -> u32 {
        match self {
            PawnLongMove::Disabled => 1,
            PawnLongMove::FromStartRank { steps } | PawnLongMove::WhileUnmoved { steps } => steps,
        }
    }

    /// Returns true if some pawn may move more than one rank.
    pub const fn allows_long_move(self) -> bool {
        self.max_steps() > 1
    }
}

/// When pawns promote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionRule {
    /// Pawns never promote.
    Disabled,
    /// A pawn stepping from the rank before the far back rank onto it must promote.
    BackRank,
}

/// Whether castling is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastlingRule {
    Disabled,
    /// Castling with the rooks registered in the board's rook-origin slots.
    Standard,
}

/// Whether en passant captures are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnPassantRule {
    Disabled,
    Standard,
}

/// The rule configuration of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub promotion: PromotionRule,
    /// Kinds a pawn may promote to.
    pub allowed_promotions: Vec<PieceKind>,
    pub castling: CastlingRule,
    pub en_passant: EnPassantRule,
    /// Reject moves by the color that is not on move.
    pub enforce_turns: bool,
    /// Full moves without a capture or pawn move after which the game is drawn.
    pub move_rule: Option<u32>,
    /// Occurrences of the same position after which the game is drawn.
    pub repetition_rule: Option<u32>,
    pub pawn_long_move: PawnLongMove,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            promotion: PromotionRule::BackRank,
            allowed_promotions: vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
            ],
            castling: CastlingRule::Standard,
            en_passant: EnPassantRule::Standard,
            enforce_turns: true,
            move_rule: Some(75),
            repetition_rule: Some(5),
            pawn_long_move: PawnLongMove::FromStartRank { steps: 2 },
        }
    }
}

impl Settings {
    /// Default settings with archbishop and chancellor added as promotion targets.
    pub fn capablanca() -> Self {
        let mut settings = Settings::default();
        settings
            .allowed_promotions
            .extend([PieceKind::Archbishop, PieceKind::Chancellor]);
        settings
    }

    /// Parses settings from TOML text and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ParseError`] for malformed TOML and
    /// [`SettingsError::Invalid`] if validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ReadError`] if the file cannot be read, plus
    /// everything [`Self::from_toml_str`] can return.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded rule settings");
        Ok(settings)
    }

    /// Serializes the settings as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Checks that the settings describe a playable rule set.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(kind) = self
            .allowed_promotions
            .iter()
            .find(|k| matches!(k, PieceKind::King | PieceKind::Pawn))
        {
            return Err(SettingsError::Invalid(format!(
                "pawns cannot promote to {}",
                kind
            )));
        }
        if self.pawn_long_move.max_steps() == 0 {
            return Err(SettingsError::Invalid(
                "pawn long move needs at least one step".to_string(),
            ));
        }
        if self.move_rule == Some(0) {
            return Err(SettingsError::Invalid("move rule must be positive".to_string()));
        }
        if self.repetition_rule == Some(0) {
            return Err(SettingsError::Invalid(
                "repetition rule must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_standard_chess() {
        let settings = Settings::default();
        assert_eq!(settings.pawn_long_move.max_steps(), 2);
        assert!(settings.enforce_turns);
        assert_eq!(settings.allowed_promotions.len(), 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            enforce_turns = false
            allowed_promotions = ["queen", "chancellor"]
            pawn_long_move = { rule = "from_start_rank", steps = 3 }
            castling = "disabled"
            "#,
        )
        .unwrap();
        assert!(!settings.enforce_turns);
        assert_eq!(
            settings.allowed_promotions,
            vec![PieceKind::Queen, PieceKind::Chancellor]
        );
        assert_eq!(settings.pawn_long_move, PawnLongMove::FromStartRank { steps: 3 });
        assert_eq!(settings.castling, CastlingRule::Disabled);
        assert_eq!(settings.en_passant, EnPassantRule::Standard);
        assert_eq!(settings.move_rule, Some(75));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn rejects_king_promotion() {
        let err = Settings::from_toml_str(r#"allowed_promotions = ["king"]"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(err.to_string().contains("King"));
    }

    #[test]
    fn rejects_zero_thresholds() {
        assert!(matches!(
            Settings::from_toml_str("move_rule = 0"),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("repetition_rule = 0"),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_toml_str(r#"pawn_long_move = { rule = "while_unmoved", steps = 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Settings::from_toml_str("enforce_turns = maybe"),
            Err(SettingsError::ParseError(_))
        ));
    }

    #[test]
    fn toml_output_parses_back() {
        let settings = Settings::capablanca();
        let text = settings.to_toml_string().unwrap();
        assert_eq!(Settings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn load_missing_file() {
        let err = Settings::load("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, SettingsError::ReadError(_)));
    }
}
