use crate::api::EntityId;

/// Ordered multi-select of ids. Order is meaningful: artist credit order
/// on recordings, track order on albums.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedSelection {
    ids: Vec<EntityId>,
}

impl OrderedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id`. Returns false if it was already selected.
    pub fn add(&mut self, id: EntityId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&i| i != id);
        self.ids.len() != before
    }

    /// Checkbox behavior: include if absent, exclude if present.
    pub fn toggle(&mut self, id: EntityId) {
        if !self.remove(id) {
            self.ids.push(id);
        }
    }

    /// Drag-and-drop reorder. Out-of-range positions leave the list as is.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from >= self.ids.len() || to >= self.ids.len() || from == to {
            return;
        }
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<EntityId> for OrderedSelection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut selection = OrderedSelection::new();
        for id in iter {
            selection.add(id);
        }
        selection
    }
}
