//! Authoring wizard steps
//!
//! The editor walks creators through the game sections in a fixed order,
//! ending at the review screen. Review is a UI convenience, not a stored
//! state, so it is not a step itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthoringStep {
    General,
    Characters,
    Pois,
    Cards,
    Ai,
}

impl AuthoringStep {
    pub const ALL: [AuthoringStep; 5] = [
        AuthoringStep::General,
        AuthoringStep::Characters,
        AuthoringStep::Pois,
        AuthoringStep::Cards,
        AuthoringStep::Ai,
    ];

    /// The step after this one, or `None` once the wizard hands off to review
    pub fn next(&self) -> Option<AuthoringStep> {
        let index = Self::ALL.iter().position(|step| step == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_progression() {
        assert_eq!(AuthoringStep::General.next(), Some(AuthoringStep::Characters));
        assert_eq!(AuthoringStep::Characters.next(), Some(AuthoringStep::Pois));
        assert_eq!(AuthoringStep::Pois.next(), Some(AuthoringStep::Cards));
        assert_eq!(AuthoringStep::Cards.next(), Some(AuthoringStep::Ai));
        assert_eq!(AuthoringStep::Ai.next(), None);
    }
}
