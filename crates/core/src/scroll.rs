//! Page scroll suppression shared by overlays.
//!
//! The mini-cart (on small viewports) and the hero video modal both suppress
//! background scrolling. Each holds its own claim, and the page stays locked
//! while any claim is held.

/// An overlay that can suppress page scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollHolder {
    MiniCart,
    VideoModal,
}

impl ScrollHolder {
    const fn bit(self) -> u8 {
        match self {
            Self::MiniCart => 0b01,
            Self::VideoModal => 0b10,
        }
    }
}

/// Current scroll claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollLocks {
    held: u8,
}

impl ScrollLocks {
    #[must_use]
    pub const fn new() -> Self {
        Self { held: 0 }
    }

    /// Record a claim or release for `holder`, returning whether the page
    /// is still locked afterwards.
    pub const fn set(&mut self, holder: ScrollHolder, locked: bool) -> bool {
        if locked {
            self.held |= holder.bit();
        } else {
            self.held &= !holder.bit();
        }
        self.is_locked()
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.held != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_holder() {
        let mut locks = ScrollLocks::new();
        assert!(locks.set(ScrollHolder::VideoModal, true));
        assert!(!locks.set(ScrollHolder::VideoModal, false));
    }

    #[test]
    fn test_mini_cart_release_keeps_modal_lock() {
        let mut locks = ScrollLocks::new();
        locks.set(ScrollHolder::MiniCart, true);
        // Opening the modal, then the outside click closes the mini-cart
        locks.set(ScrollHolder::VideoModal, true);
        assert!(locks.set(ScrollHolder::MiniCart, false));

        assert!(!locks.set(ScrollHolder::VideoModal, false));
    }

    #[test]
    fn test_release_without_claim_is_harmless() {
        let mut locks = ScrollLocks::new();
        locks.set(ScrollHolder::VideoModal, true);
        assert!(locks.set(ScrollHolder::MiniCart, false));
        assert!(locks.is_locked());
    }
}
