use super::context::ContextOverride;
use uuid::Uuid;

/// A conversational session on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    id: Uuid,
    context: ContextOverride,
}

impl SessionSpec {
    pub fn new(context: ContextOverride) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
        }
    }

    /// The session identifier. Never changes after creation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &ContextOverride {
        &self.context
    }
}

/// How sessions are assigned to the samples of a batch.
///
/// An initial utterance seeds conversational state that later turns depend
/// on, so its batch shares a single session. Without one, every sample is
/// an independent single-turn probe with its own session.
#[derive(Debug, Clone)]
pub enum SessionStrategy {
    Shared(SessionSpec),
    PerSample { context: ContextOverride },
}

impl SessionStrategy {
    pub fn for_batch(has_initial: bool, context: ContextOverride) -> Self {
        if has_initial {
            Self::Shared(SessionSpec::new(context))
        } else {
            Self::PerSample { context }
        }
    }

    /// The session the next sample should run under.
    pub fn next_session(&self) -> SessionSpec {
        match self {
            Self::Shared(spec) => spec.clone(),
            Self::PerSample { context } => SessionSpec::new(context.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_strategy_hands_out_one_session_id() {
        let strategy = SessionStrategy::for_batch(true, ContextOverride::None);
        let first = strategy.next_session();
        let second = strategy.next_session();
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn per_sample_strategy_hands_out_distinct_session_ids() {
        let strategy = SessionStrategy::for_batch(false, ContextOverride::None);
        let first = strategy.next_session();
        let second = strategy.next_session();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn sessions_carry_the_batch_context_override() {
        let pinned = ContextOverride::pinned("greeting");
        let strategy = SessionStrategy::for_batch(false, pinned.clone());
        assert_eq!(strategy.next_session().context(), &pinned);
    }
}
