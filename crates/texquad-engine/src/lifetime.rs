//! Single-owner resource slots.
//!
//! A [`ResourceSlot`] holds one acquired resource and releases it exactly once:
//! either through an explicit [`ResourceSlot::release`] or when the slot is
//! dropped. Releasing an empty slot is a no-op, which makes shutdown paths safe
//! to run more than once.

/// Owns a resource until it is explicitly released or the slot is dropped.
pub struct ResourceSlot<T> {
    label: &'static str,
    value: Option<T>,
}

impl<T> ResourceSlot<T> {
    pub fn new(label: &'static str, value: T) -> Self {
        log::debug!("acquired {label}");
        Self {
            label,
            value: Some(value),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the resource, or `None` once released.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn is_live(&self) -> bool {
        self.value.is_some()
    }

    /// Drops the held resource.
    ///
    /// Returns `true` if a resource was released by this call, `false` if the
    /// slot was already empty.
    pub fn release(&mut self) -> bool {
        match self.value.take() {
            Some(value) => {
                drop(value);
                log::debug!("released {}", self.label);
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for ResourceSlot<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<u32>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn counted() -> (Rc<Cell<u32>>, ResourceSlot<Counted>) {
        let drops = Rc::new(Cell::new(0));
        let slot = ResourceSlot::new("counted", Counted(drops.clone()));
        (drops, slot)
    }

    #[test]
    fn release_twice_drops_once() {
        let (drops, mut slot) = counted();
        assert!(slot.release());
        assert!(!slot.release());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn drop_after_release_does_not_double_release() {
        let (drops, mut slot) = counted();
        slot.release();
        drop(slot);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn drop_releases_live_slot() {
        let (drops, slot) = counted();
        assert!(slot.is_live());
        drop(slot);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn get_is_none_after_release() {
        let (_drops, mut slot) = counted();
        assert!(slot.get().is_some());
        slot.release();
        assert!(slot.get().is_none());
        assert!(slot.get_mut().is_none());
        assert_eq!(slot.label(), "counted");
    }
}
