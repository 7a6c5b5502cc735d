//! Keyboard selection over a result list.

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the list.
    Up,
    /// Towards the bottom of the list.
    Down,
}

/// Selection cursor that starts with nothing selected and wraps at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    selected: Option<usize>,
}

impl SelectionCursor {
    /// A cursor with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Drop the selection.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Move through a list of `len` items.
    ///
    /// From no selection, Down selects the first item and Up the last.
    pub fn navigate(&mut self, direction: Direction, len: usize) -> Option<usize> {
        if len == 0 {
            self.selected = None;
            return None;
        }

        let next = match (direction, self.selected) {
            (Direction::Down, None) => 0,
            (Direction::Up, None) => len - 1,
            (Direction::Down, Some(current)) => {
                if current + 1 >= len {
                    0
                } else {
                    current + 1
                }
            }
            (Direction::Up, Some(current)) => {
                if current == 0 || current > len {
                    len - 1
                } else {
                    current - 1
                }
            }
        };

        self.selected = Some(next);
        self.selected
    }
}
