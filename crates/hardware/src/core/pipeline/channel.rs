//! Single-slot handoff channel.
//!
//! This module provides the point-to-point link between stages. It enforces:
//! 1. **Capacity One:** A push fails while the previous value has not been drained.
//! 2. **Blocking Pop:** [`Channel::pop`] reports an empty slot as an error.
//! 3. **Non-blocking Pop:** [`Channel::pop_nb`] returns `None` on an empty slot.
//!
//! Stages never call the fallible operations blindly: they first check
//! [`Channel::is_ready`] / [`Channel::has_room`] for every channel they will touch
//! this cycle and skip the cycle entirely if any check fails.

use std::fmt;

use crate::common::error::ChannelError;

/// Bounded single-slot channel with back-pressure.
pub struct Channel<T> {
    name: &'static str,
    slot: Option<T>,
}

impl<T> Channel<T> {
    /// Creates an empty channel.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in errors and traces.
    pub const fn new(name: &'static str) -> Self {
        Self { name, slot: None }
    }

    /// Returns the channel label.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if a value is waiting to be popped.
    pub const fn is_ready(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns `true` if a push would succeed.
    pub const fn has_room(&self) -> bool {
        self.slot.is_none()
    }

    /// Places a value in the slot.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Full`] if the consumer has not drained the previous value.
    pub fn push(&mut self, value: T) -> Result<(), ChannelError> {
        if self.slot.is_some() {
            return Err(ChannelError::Full(self.name));
        }
        self.slot = Some(value);
        Ok(())
    }

    /// Takes the value from the slot.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Empty`] if no value is available.
    pub fn pop(&mut self) -> Result<T, ChannelError> {
        self.slot.take().ok_or(ChannelError::Empty(self.name))
    }

    /// Takes the value from the slot if there is one.
    pub const fn pop_nb(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Borrows the waiting value without consuming it.
    pub const fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Drops any waiting value.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl<T: fmt::Debug> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish()
    }
}
