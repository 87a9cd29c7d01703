//! List reordering for the builder's drag-and-drop

/// Move the item at `from` so it ends up at index `to`.
///
/// Out-of-range indices return the list unchanged; all other items keep
/// their relative order.
pub fn move_item<T>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from >= items.len() || to >= items.len() || from == to {
        return items;
    }
    let item = items.remove(from);
    items.insert(to, item);
    items
}

/// Drag gesture state: start, hover, drop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<usize>,
    over: Option<usize>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, index: usize) {
        self.dragged = Some(index);
        self.over = None;
    }

    /// Last entered index wins
    pub fn enter(&mut self, index: usize) {
        if self.dragged.is_some() {
            self.over = Some(index);
        }
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    /// Finish the gesture and apply it to `items`
    pub fn end<T>(&mut self, items: Vec<T>) -> Vec<T> {
        match (self.dragged.take(), self.over.take()) {
            (Some(from), Some(to)) => move_item(items, from, to),
            _ => items,
        }
    }
}
