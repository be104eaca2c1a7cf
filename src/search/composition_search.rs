use super::{active_query, contains_ci, Key, SearchEvent, SuggestionList};
use crate::api::{Composition, EntityId};

/// Composer picker plus a type-ahead over that composer's compositions.
#[derive(Clone, Debug, Default)]
pub struct CompositionSearch {
    composer_id: Option<EntityId>,
    composition_id: Option<EntityId>,
    query: String,
    suggestions: SuggestionList<Composition>,
}

impl CompositionSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out with both levels already chosen, e.g. from a handoff.
    pub fn with_selection(composer_id: Option<EntityId>, composition_id: Option<EntityId>) -> Self {
        Self {
            composer_id,
            composition_id,
            ..Default::default()
        }
    }

    pub fn composer_id(&self) -> Option<EntityId> {
        self.composer_id
    }

    pub fn composition_id(&self) -> Option<EntityId> {
        self.composition_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &SuggestionList<Composition> {
        &self.suggestions
    }

    pub fn select_composer(&mut self, composer_id: Option<EntityId>) -> SearchEvent {
        self.composer_id = composer_id;
        self.composition_id = None;
        self.reset_query();
        SearchEvent::ComposerChanged(composer_id)
    }

    /// Matches title or catalog number within the selected composer.
    pub fn set_query(&mut self, query: &str, compositions: &[Composition]) {
        self.query = query.to_string();
        let (Some(composer_id), Some(needle)) = (self.composer_id, active_query(query)) else {
            self.suggestions.clear();
            return;
        };
        let matches = compositions
            .iter()
            .filter(|c| c.composer_id == composer_id)
            .filter(|c| {
                contains_ci(&c.title, &needle)
                    || c.catalog_number
                        .as_deref()
                        .is_some_and(|n| contains_ci(n, &needle))
            })
            .cloned()
            .collect();
        self.suggestions.set_items(matches);
    }

    pub fn select_composition(&mut self, composition_id: EntityId) -> SearchEvent {
        self.composition_id = Some(composition_id);
        self.reset_query();
        SearchEvent::CompositionSelected(composition_id)
    }

    pub fn handle_key(&mut self, key: Key) -> Option<SearchEvent> {
        self.suggestions
            .handle_key(key)
            .map(|composition| self.select_composition(composition.id))
    }

    pub fn clear(&mut self) -> SearchEvent {
        self.composer_id = None;
        self.composition_id = None;
        self.reset_query();
        SearchEvent::Cleared
    }

    fn reset_query(&mut self) {
        self.query.clear();
        self.suggestions.clear();
    }
}
