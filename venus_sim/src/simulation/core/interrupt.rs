// venus_sim/src/simulation/core/interrupt.rs

//! Ctrl-C handling for runs without a window.

use bevy::prelude::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Raised once the user asked the mission to stop.
#[derive(Resource, Clone, Debug, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Set up a Ctrl-C handler that raises the returned flag.
pub fn install_ctrl_c_handler() -> Result<InterruptFlag, ctrlc::Error> {
    let flag = InterruptFlag::default();
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || handler_flag.raise())?;
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_flag() {
        let flag = InterruptFlag::default();
        let observer = flag.clone();
        assert!(!observer.is_raised());
        flag.raise();
        assert!(observer.is_raised());
    }
}
