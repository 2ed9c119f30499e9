//! Reference-counted texture handles.
//!
//! The host constructs one `ResourceManager` around its platform loader and
//! lends it to levels on `begin`/`end`. A failed load is logged and answered
//! with the null handle; nothing is cached for it.

use std::collections::HashMap;

use log::{debug, warn};

use ocular_core::canvas::TextureHandle;

/// Platform side of texture loading.
pub trait AssetLoader {
    /// Load the texture at `path` and return its pixel size, or `None` when
    /// the file is missing or unreadable.
    fn load_texture(&mut self, path: &str) -> Option<(u32, u32)>;

    fn unload_texture(&mut self, handle: TextureHandle);
}

#[derive(Debug)]
struct Entry {
    handle: TextureHandle,
    refs: usize,
}

pub struct ResourceManager<L: AssetLoader> {
    loader: L,
    textures: HashMap<String, Entry>,
    next_id: u32,
}

impl<L: AssetLoader> ResourceManager<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            textures: HashMap::new(),
            next_id: 1,
        }
    }

    /// Handle for `path`, loading it on first use. Every successful acquire
    /// must be paired with a [`release`](Self::release).
    pub fn acquire(&mut self, path: &str) -> TextureHandle {
        if let Some(entry) = self.textures.get_mut(path) {
            entry.refs += 1;
            return entry.handle;
        }

        let Some((width, height)) = self.loader.load_texture(path) else {
            warn!("texture {path} failed to load, using null handle");
            return TextureHandle::NULL;
        };

        let handle = TextureHandle {
            id: self.next_id,
            width,
            height,
        };
        self.next_id += 1;
        debug!("loaded texture {path} as #{}", handle.id);
        self.textures
            .insert(path.to_string(), Entry { handle, refs: 1 });
        handle
    }

    /// Drop one reference; the texture is unloaded when none remain.
    pub fn release(&mut self, path: &str) {
        let Some(entry) = self.textures.get_mut(path) else {
            return;
        };
        entry.refs -= 1;
        if entry.refs == 0 {
            if let Some(entry) = self.textures.remove(path) {
                debug!("unloading texture {path}");
                self.loader.unload_texture(entry.handle);
            }
        }
    }

    pub fn ref_count(&self, path: &str) -> usize {
        self.textures.get(path).map_or(0, |e| e.refs)
    }

    pub fn loaded_count(&self) -> usize {
        self.textures.len()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}
