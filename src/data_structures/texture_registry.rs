//! Fixed-capacity texture table keyed by tag.
//!
//! Textures are appended in load order and never evicted. The position of an
//! entry in the table is its *slot*; the renderer uses the slot to select the
//! bind group for a draw. Lookups are linear and exact-match on the tag.

use thiserror::Error;

/// Maximum number of textures a scene can hold.
pub const MAX_TEXTURES: usize = 16;

/// Reasons a texture could not be registered.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode texture `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("texture table is full ({capacity} slots), cannot add `{tag}`")]
    CapacityExceeded { tag: String, capacity: usize },
    #[error("a texture tagged `{tag}` is already loaded in slot {slot}")]
    DuplicateTag { tag: String, slot: usize },
}

#[derive(Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// Append-only table of tagged texture handles.
///
/// `H` is whatever the backend uses as a texture handle. The scene stores GPU
/// [`Texture`](crate::data_structures::texture::Texture)s here.
#[derive(Debug)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
    capacity: usize,
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self::with_capacity(MAX_TEXTURES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `handle` under `tag` and return its slot.
    pub fn insert(&mut self, tag: impl Into<String>, handle: H) -> Result<usize, TextureError> {
        let tag = tag.into();
        if let Some(slot) = self.find_slot(&tag) {
            return Err(TextureError::DuplicateTag { tag, slot });
        }
        if self.is_full() {
            return Err(TextureError::CapacityExceeded {
                tag,
                capacity: self.capacity,
            });
        }
        self.entries.push(TextureEntry { tag, handle });
        Ok(self.entries.len() - 1)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    pub fn find_handle(&self, tag: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    pub fn get(&self, slot: usize) -> Option<&TextureEntry<H>> {
        self.entries.get(slot)
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every handle and reset the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
