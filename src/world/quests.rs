//! Active quest log.

use super::geo::Coordinate;

/// Outcome of completing an active quest.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestCompletion {
    /// The quest that was removed
    pub quest: String,
    /// New navigation target carried by the completion, if any
    pub relocation: Option<Coordinate>,
}

/// Ordered set of active quests.
///
/// Insertion keeps first-seen order; adding a quest that is already active
/// does nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestLog {
    quests: Vec<String>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quest. Returns `false` if it was already active.
    pub fn add(&mut self, quest: impl Into<String>) -> bool {
        let quest = quest.into();
        if self.contains(&quest) {
            return false;
        }
        tracing::info!("Added quest '{}'", quest);
        self.quests.push(quest);
        true
    }

    /// Remove an active quest.
    ///
    /// Returns `None`, and ignores `relocation`, when the quest is not active.
    pub fn complete(
        &mut self,
        quest: &str,
        relocation: Option<Coordinate>,
    ) -> Option<QuestCompletion> {
        let index = self.quests.iter().position(|q| q == quest)?;
        let quest = self.quests.remove(index);
        tracing::info!("Completed quest '{}'", quest);
        Some(QuestCompletion { quest, relocation })
    }

    pub fn contains(&self, quest: &str) -> bool {
        self.quests.iter().any(|q| q == quest)
    }

    /// Active quests in insertion order
    pub fn quests(&self) -> &[String] {
        &self.quests
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn clear(&mut self) {
        self.quests.clear();
    }

    /// Render lines for a list widget (`- quest`).
    pub fn lines(&self) -> Vec<String> {
        self.quests.iter().map(|q| format!("- {q}")).collect()
    }
}
