//! Single-slot, latest-value-wins mailbox.
//!
//! Hand tracking and rendering run on different cadences. The tracking side
//! [`post`](SignalSlot::post)s each new signal, overwriting whatever the
//! render side has not picked up yet; the render side asks once per frame
//! whether anything fresh arrived and can always read the most recent value.
//! There is no queue: a burst of results collapses to the last one, and a
//! stall simply means the same value is read again.

/// Holds the most recently posted value and whether it has been taken.
#[derive(Debug, Clone)]
pub struct SignalSlot<T> {
    value: Option<T>,
    fresh: bool,
}

impl<T> Default for SignalSlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            fresh: false,
        }
    }
}

impl<T: Copy> SignalSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a new value.
    pub fn post(&mut self, value: T) {
        self.value = Some(value);
        self.fresh = true;
    }

    /// The value posted since the last call, if any.
    ///
    /// The value stays readable through [`latest`](Self::latest) afterwards.
    pub fn take_fresh(&mut self) -> Option<T> {
        if self.fresh {
            self.fresh = false;
            self.value
        } else {
            None
        }
    }

    /// The most recently posted value, fresh or not.
    pub fn latest(&self) -> Option<T> {
        self.value
    }

    /// True if a value was posted and not yet taken.
    pub fn has_fresh(&self) -> bool {
        self.fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot() {
        let mut slot = SignalSlot::<u32>::new();
        assert_eq!(slot.latest(), None);
        assert_eq!(slot.take_fresh(), None);
        assert!(!slot.has_fresh());
    }

    #[test]
    fn test_take_fresh_once() {
        let mut slot = SignalSlot::new();
        slot.post(3);
        assert!(slot.has_fresh());
        assert_eq!(slot.take_fresh(), Some(3));
        assert_eq!(slot.take_fresh(), None);
        assert_eq!(slot.latest(), Some(3));
    }

    #[test]
    fn test_last_write_wins() {
        let mut slot = SignalSlot::new();
        slot.post(1);
        slot.post(2);
        slot.post(5);
        assert_eq!(slot.take_fresh(), Some(5));
        assert_eq!(slot.take_fresh(), None);
    }
}
