use crate::error::ResolveError;
use rand::Rng;
use std::collections::HashSet;

const ID_SPACE: usize = 1 << 16;

/// Hands out transaction IDs that are never repeated for the lifetime of
/// the allocator.
#[derive(Debug, Default)]
pub struct QueryIdAllocator {
    issued: HashSet<u16>,
}

impl QueryIdAllocator {
    pub fn new() -> Self {
        Self {
            issued: HashSet::new(),
        }
    }

    pub fn next_id(&mut self) -> Result<u16, ResolveError> {
        if self.issued.len() >= ID_SPACE {
            return Err(ResolveError::QueryIdsExhausted);
        }

        let mut rng = rand::thread_rng();
        loop {
            let id: u16 = rng.gen();
            if self.issued.insert(id) {
                return Ok(id);
            }
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}
