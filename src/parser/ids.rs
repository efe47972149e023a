/// Named structs declared so far in one specification, indexed by their
/// type id. Ids are handed out strictly in order, so the next valid id is
/// always the current length.
pub struct IdTable<H> {
    ids: Vec<H>,
}

impl<H: Copy> IdTable<H> {
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check that `id` is the next id in sequence. Returns the expected id if not.
    pub fn check_next(&self, id: u32) -> Result<(), usize> {
        if id as usize == self.ids.len() {
            Ok(())
        } else {
            Err(self.ids.len())
        }
    }

    /// Register the struct for the next id and return that id.
    pub fn push(&mut self, handle: H) -> usize {
        self.ids.push(handle);
        self.ids.len() - 1
    }

    pub fn get(&self, id: u32) -> Option<H> {
        self.ids.get(id as usize).copied()
    }
}
