//! Action-tag selection with study auto-promotion
//!
//! Mirrors the entry form's tag behavior for one edit session: selecting a
//! third-visit tag promotes the "opened a study" tag automatically, and
//! the promotion remembers its provenance so deselecting the third visit
//! removes only what the promotion added, never a tag the user picked.

use fieldlog_domain::constants::{
    ACTION_ABRIU_ESTUDO, REVISIT_TRIGGER_ACTIONS, THIRD_VISIT_ACTIONS,
};

/// Stateful tag selection for one note edit session.
#[derive(Debug, Clone, Default)]
pub struct ActionSelection {
    selected: Vec<String>,
    /// True while the study tag is present because the promotion added it.
    auto_added_study: bool,
}

impl ActionSelection {
    /// Empty selection for a new note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing note's tags. Seeded tags count as user-origin,
    /// so a study tag already on the note survives later deselections. The
    /// promotion rule still runs once, covering rows where a third-visit
    /// tag was stored without its study tag.
    pub fn from_existing(tags: &[String]) -> Self {
        let mut selection = Self::new();
        for tag in tags {
            if !selection.contains(tag) {
                selection.selected.push(tag.clone());
            }
        }
        selection.sync_study_promotion();
        selection
    }

    /// Flip membership of `tag`, then re-apply the promotion rules.
    ///
    /// Explicitly toggling the study tag makes it user-origin. While a
    /// third-visit tag is selected, toggling the study tag off is undone
    /// immediately (it comes back as a promotion).
    pub fn toggle(&mut self, tag: &str) {
        if let Some(pos) = self.selected.iter().position(|t| t == tag) {
            self.selected.remove(pos);
            if tag == ACTION_ABRIU_ESTUDO {
                self.auto_added_study = false;
            }
        } else {
            self.selected.push(tag.to_string());
            if tag == ACTION_ABRIU_ESTUDO {
                // User picked it directly; no longer the promotion's to remove.
                self.auto_added_study = false;
            }
        }

        self.sync_study_promotion();
    }

    /// Whether `tag` is currently selected.
    pub fn contains(&self, tag: &str) -> bool {
        self.selected.iter().any(|t| t == tag)
    }

    /// Selected tags in entry order.
    pub fn tags(&self) -> &[String] {
        &self.selected
    }

    /// Consume the selection, yielding the final tag list.
    pub fn into_tags(self) -> Vec<String> {
        self.selected
    }

    /// True when any first/second revisit tag is selected; the entry form
    /// opens the revisit section on this.
    pub fn revisit_triggered(&self) -> bool {
        self.selected.iter().any(|tag| REVISIT_TRIGGER_ACTIONS.contains(&tag.as_str()))
    }

    /// True while the study tag is present only by promotion.
    pub fn auto_added_study(&self) -> bool {
        self.auto_added_study
    }

    fn sync_study_promotion(&mut self) {
        let third_visit =
            self.selected.iter().any(|tag| THIRD_VISIT_ACTIONS.contains(&tag.as_str()));
        let has_study = self.contains(ACTION_ABRIU_ESTUDO);

        if third_visit && !has_study {
            self.selected.push(ACTION_ABRIU_ESTUDO.to_string());
            self.auto_added_study = true;
        } else if !third_visit {
            if self.auto_added_study && has_study {
                self.selected.retain(|tag| tag != ACTION_ABRIU_ESTUDO);
            }
            self.auto_added_study = false;
        }
    }
}
