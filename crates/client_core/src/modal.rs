//! One tagged field per list view describing which modal is open, instead
//! of a nullable selected-id per modal kind.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveModal<I> {
    None,
    Add,
    Delete(I),
    Update(I),
    Slots(I),
}

impl<I> Default for ActiveModal<I> {
    fn default() -> Self {
        Self::None
    }
}

impl<I: Copy + Eq> ActiveModal<I> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Closing discards whatever form state the modal held.
    pub fn close(&mut self) {
        *self = Self::None;
    }

    pub fn open_add(&mut self) {
        *self = Self::Add;
    }

    pub fn open_delete(&mut self, id: I) {
        *self = Self::Delete(id);
    }

    pub fn open_update(&mut self, id: I) {
        *self = Self::Update(id);
    }

    pub fn open_slots(&mut self, id: I) {
        *self = Self::Slots(id);
    }

    pub fn delete_target(&self) -> Option<I> {
        match self {
            Self::Delete(id) => Some(*id),
            _ => None,
        }
    }

    pub fn update_target(&self) -> Option<I> {
        match self {
            Self::Update(id) => Some(*id),
            _ => None,
        }
    }

    pub fn slots_target(&self) -> Option<I> {
        match self {
            Self::Slots(id) => Some(*id),
            _ => None,
        }
    }
}
