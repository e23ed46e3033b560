// Battle content errors

/// Errors raised while setting up a battle from content tables
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error("Unknown battle stage: {0}")]
    UnknownStage(String),

    #[error("Unknown encounter set: {0}")]
    UnknownEncounterSet(u32),

    #[error("Unknown sprite id: {0}")]
    UnknownSprite(u32),

    #[error("Encounter has no monsters")]
    EmptyEncounter,

    #[error("Malformed stage mesh: expected at least {expected} bytes, found {found}")]
    MalformedStageMesh { expected: usize, found: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BattleError::UnknownStage("bf_moon".to_string());
        assert_eq!(err.to_string(), "Unknown battle stage: bf_moon");
        assert_eq!(
            BattleError::UnknownEncounterSet(9).to_string(),
            "Unknown encounter set: 9"
        );
    }
}
