use alloc::string::String;

use crate::{Handler, Handlers};

/// Configuration for [`crate::ContentList::with_options`].
#[derive(Clone, Default)]
pub struct ContentListOptions {
    /// Number of items to reserve room for up front.
    pub capacity: usize,
    /// Store-wide handlers exposed through [`crate::ContentList::context_values`].
    pub handlers: Handlers,
}

impl ContentListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_handlers(mut self, handlers: Handlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn with_handler(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }
}

impl core::fmt::Debug for ContentListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentListOptions")
            .field("capacity", &self.capacity)
            .field("handlers", &self.handlers.keys())
            .finish()
    }
}
