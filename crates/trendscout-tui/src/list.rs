// Cursor-over-items state for the repository pane, with fuzzy filtering
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::item::ListItem;

pub struct SelectionList {
    items: Vec<ListItem>,
    // Positions into `items` that pass the filter, best match first
    visible: Vec<usize>,
    cursor: usize,
    filter: String,
    matcher: SkimMatcherV2,
}

impl SelectionList {
    pub fn new(items: Vec<ListItem>) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            items,
            visible,
            cursor: 0,
            filter: String::new(),
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    /// Cursor position within the visible rows
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Position of the selected item in the full list
    pub fn index(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn selected(&self) -> Option<&ListItem> {
        self.index().map(|i| &self.items[i])
    }

    /// Replace the item at `index`, order is kept
    pub fn set_item(&mut self, index: usize, item: ListItem) {
        if let Some(slot) = self.items.get_mut(index) {
            *slot = item;
        }
    }

    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.items.iter().position(|item| item.url() == url)
    }

    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    /// All items, ignoring the filter
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &ListItem> {
        self.visible.iter().map(move |&i| &self.items[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.refilter();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.cursor = 0;

        if self.filter.is_empty() {
            self.visible = (0..self.items.len()).collect();
            return;
        }

        let mut scored: Vec<(usize, i64)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                self.matcher
                    .fuzzy_match(&item.filter_text(), &self.filter)
                    .map(|score| (i, score))
            })
            .collect();
        // stable, so equal scores keep list order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        self.visible = scored.into_iter().map(|(i, _)| i).collect();
    }
}
