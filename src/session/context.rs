use uuid::Uuid;

/// Number of turns a pinned context stays active by default.
pub const DEFAULT_CONTEXT_LIFESPAN: u32 = 5;

/// Whether detection calls override the session's accumulated contexts.
///
/// Some batches must start every turn from the same decision point in the
/// dialog graph instead of accumulating context turn over turn; pinning
/// resets the session's contexts and activates a single named one before
/// each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextOverride {
    /// Let the session accumulate context naturally.
    None,
    /// Reset all contexts, then activate this one before every turn.
    Pinned { name: String, lifespan: u32 },
}

impl ContextOverride {
    pub fn pinned(name: impl Into<String>) -> Self {
        Self::Pinned {
            name: name.into(),
            lifespan: DEFAULT_CONTEXT_LIFESPAN,
        }
    }

    /// Build the override from the configured fixed-context name, treating
    /// an empty name the same as an unset one.
    pub fn from_config(name: Option<&str>) -> Self {
        match name {
            Some(name) if !name.is_empty() => Self::pinned(name),
            _ => Self::None,
        }
    }

    /// Resource name and lifespan of the context to activate for one
    /// session, or `None` when nothing is pinned.
    ///
    /// The name is deterministic: derived from project, session, and the
    /// case-folded configured name, e.g.
    /// `projects/p/agent/sessions/s/contexts/greeting`.
    pub fn pinned_context(&self, project_id: &str, session_id: Uuid) -> Option<(String, u32)> {
        match self {
            Self::None => None,
            Self::Pinned { name, lifespan } => Some((
                format!(
                    "projects/{}/agent/sessions/{}/contexts/{}",
                    project_id,
                    session_id,
                    name.to_lowercase()
                ),
                *lifespan,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_context_name_is_deterministic_and_case_folded() {
        let session = Uuid::new_v4();
        let pinned = ContextOverride::pinned("GREETING");

        let (name, lifespan) = pinned.pinned_context("my-project", session).unwrap();

        assert_eq!(
            name,
            format!("projects/my-project/agent/sessions/{}/contexts/greeting", session)
        );
        assert_eq!(lifespan, DEFAULT_CONTEXT_LIFESPAN);
    }

    #[test]
    fn no_override_pins_nothing() {
        let none = ContextOverride::None;
        assert!(none.pinned_context("p", Uuid::new_v4()).is_none());
    }

    #[test]
    fn empty_configured_name_means_no_override() {
        assert_eq!(ContextOverride::from_config(None), ContextOverride::None);
        assert_eq!(ContextOverride::from_config(Some("")), ContextOverride::None);
        assert_eq!(
            ContextOverride::from_config(Some("order")),
            ContextOverride::Pinned {
                name: "order".to_string(),
                lifespan: DEFAULT_CONTEXT_LIFESPAN
            }
        );
    }
}
