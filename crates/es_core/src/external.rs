//! Bookkeeping for texts that borrow caller-owned buffers.
//!
//! Every wrapper gets its own [`ExternalHandle`]. Wrappers of the same backing pointer
//! share one binding, and the release callback runs when the last of them is reclaimed.

use std::ptr::NonNull;

use ahash::RandomState;
use hashbrown::HashMap;

use crate::codec;
use crate::error::EncodingError;
use crate::text::Text;

/// Called with the backing pointer once no live text wraps it any more.
pub type ReleaseCallback = Box<dyn FnOnce(NonNull<u8>)>;

/// Identifies one external text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExternalHandle(u64);

struct Binding {
    len: usize,
    wrappers: u32,
    callback: Option<ReleaseCallback>,
}

/// Registry of live external texts, owned by one engine context.
pub struct ExternalTextRegistry {
    handles: HashMap<ExternalHandle, usize, RandomState>,
    bindings: HashMap<usize, Binding, RandomState>,
    next_handle: u64,
    released: usize,
}

impl ExternalTextRegistry {
    pub fn new() -> Self {
        Self {
            handles: HashMap::default(),
            bindings: HashMap::default(),
            next_handle: 0,
            released: 0,
        }
    }

    /// Records a binding and returns the handle for the new wrapper.
    ///
    /// When `ptr` is already bound the wrapper joins the existing binding. A callback
    /// given by a later wrapper is adopted if the binding has none yet, otherwise it is
    /// dropped without being called and the first one stays responsible.
    pub fn register(
        &mut self,
        ptr: NonNull<u8>,
        len: usize,
        callback: Option<ReleaseCallback>,
    ) -> ExternalHandle {
        let handle = self.next_free_handle();
        let key = ptr.as_ptr() as usize;
        match self.bindings.get_mut(&key) {
            Some(binding) => {
                debug_assert_eq!(binding.len, len, "external buffer re-wrapped with another length");
                binding.wrappers += 1;
                if let Some(callback) = callback {
                    if binding.callback.is_none() {
                        binding.callback = Some(callback);
                    } else {
                        tracing::warn!(
                            handle = handle.0,
                            len,
                            "external buffer already has a release callback, dropping the new one"
                        );
                    }
                }
            }
            None => {
                self.bindings.insert(
                    key,
                    Binding {
                        len,
                        wrappers: 1,
                        callback,
                    },
                );
            }
        }
        self.handles.insert(handle, key);
        tracing::trace!(handle = handle.0, len, "registered external text");
        handle
    }

    /// Next handle id that no live wrapper holds.
    fn next_free_handle(&mut self) -> ExternalHandle {
        loop {
            let handle = ExternalHandle(self.next_handle);
            self.next_handle = self.next_handle.wrapping_add(1);
            if !self.handles.contains_key(&handle) {
                return handle;
            }
        }
    }

    /// Called when the text owning `handle` has been reclaimed.
    ///
    /// Runs the release callback when this was the last wrapper of its buffer. A handle
    /// that is not live is a reclamation bug: fatal in debug builds, ignored otherwise.
    pub fn on_reclaim(&mut self, handle: ExternalHandle) {
        let Some(key) = self.handles.remove(&handle) else {
            tracing::error!(handle = handle.0, "external text reclaimed twice");
            debug_assert!(false, "external text handle {} reclaimed twice", handle.0);
            return;
        };
        let Some(binding) = self.bindings.get_mut(&key) else {
            return;
        };
        binding.wrappers -= 1;
        if binding.wrappers > 0 {
            return;
        }
        if let Some(binding) = self.bindings.remove(&key) {
            self.released += 1;
            tracing::debug!(len = binding.len, "released external text buffer");
            if let (Some(callback), Some(ptr)) = (binding.callback, NonNull::new(key as *mut u8)) {
                callback(ptr);
            }
        }
    }

    /// Validates `len` bytes at `ptr` as compact text and wraps them without copying.
    ///
    /// On error nothing is registered and `callback` is dropped unused.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes, and the bytes must not be modified
    /// or freed until `callback` runs (or, without a callback, for as long as any text
    /// wrapping them can be reached by the engine).
    pub unsafe fn wrap(
        &mut self,
        ptr: NonNull<u8>,
        len: usize,
        callback: Option<ReleaseCallback>,
    ) -> Result<Text, EncodingError> {
        // SAFETY: guaranteed by the caller.
        let bytes = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), len) };
        let units = codec::validate_compact(bytes)?;
        let handle = self.register(ptr, len, callback);
        // SAFETY: the buffer outlives the binding per this function's contract.
        Ok(unsafe { Text::external(ptr, len, units, handle) })
    }

    /// Wraps bytes that live for the whole program. No callback.
    pub fn wrap_static(&mut self, bytes: &'static [u8]) -> Result<Text, EncodingError> {
        let Some(ptr) = NonNull::new(bytes.as_ptr() as *mut u8) else {
            return Ok(Text::new());
        };
        // SAFETY: 'static bytes are never freed and never mutated through a shared slice.
        unsafe { self.wrap(ptr, bytes.len(), None) }
    }

    /// Takes ownership of `bytes`; the registry frees them on release.
    pub fn wrap_boxed(&mut self, bytes: Box<[u8]>) -> Result<Text, EncodingError> {
        codec::validate_compact(&bytes)?;
        if bytes.is_empty() {
            return Ok(Text::new());
        }
        let len = bytes.len();
        let raw = Box::into_raw(bytes);
        let Some(ptr) = NonNull::new(raw as *mut u8) else {
            return Ok(Text::new());
        };
        let free: ReleaseCallback = Box::new(move |p: NonNull<u8>| {
            let slice = std::ptr::slice_from_raw_parts_mut(p.as_ptr(), len);
            // SAFETY: `p` is the pointer produced by `Box::into_raw` above and the
            // callback runs at most once.
            drop(unsafe { Box::from_raw(slice) });
        });
        // SAFETY: the leaked box stays alive until `free` runs.
        unsafe { self.wrap(ptr, len, Some(free)) }
    }

    /// Number of live wrappers.
    pub fn live(&self) -> usize {
        self.handles.len()
    }

    /// Number of backing buffers released so far.
    pub fn released(&self) -> usize {
        self.released
    }

    pub fn is_live(&self, handle: ExternalHandle) -> bool {
        self.handles.contains_key(&handle)
    }
}

impl Default for ExternalTextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ExternalTextRegistry {
    /// Context teardown releases whatever is still bound.
    fn drop(&mut self) {
        for (key, binding) in self.bindings.drain() {
            if let (Some(callback), Some(ptr)) = (binding.callback, NonNull::new(key as *mut u8)) {
                callback(ptr);
            }
        }
        self.handles.clear();
    }
}
