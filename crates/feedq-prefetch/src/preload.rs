//! Preload bookkeeping.
//!
//! Every buffered item has its resource primed exactly once per locator
//! until the queue is cleared.

use std::collections::HashSet;

use feedq_core::{Item, ResourcePreloaderPort};

/// Locators already handed to the preloader.
#[derive(Debug, Default)]
pub struct PreloadTracker {
    primed: HashSet<String>,
}

impl PreloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime every item whose locator has not been seen. Returns the number
    /// of preload calls made.
    pub fn prime_all(&mut self, items: &[Item], preloader: &dyn ResourcePreloaderPort) -> usize {
        let mut primed = 0;
        for item in items {
            if self.primed.insert(item.resource_url.clone()) {
                preloader.preload(item);
                primed += 1;
            }
        }
        primed
    }

    /// Forget every locator.
    pub fn reset(&mut self) {
        self.primed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl ResourcePreloaderPort for Recording {
        fn preload(&self, item: &Item) {
            self.0.lock().unwrap().push(item.resource_url.clone());
        }
    }

    #[test]
    fn test_each_locator_primed_once() {
        let preloader = Recording::default();
        let mut tracker = PreloadTracker::new();

        let first = vec![Item::new("1", "u1"), Item::new("2", "u2")];
        assert_eq!(tracker.prime_all(&first, &preloader), 2);

        let second = vec![Item::new("2", "u2"), Item::new("3", "u3"), Item::new("4", "u1")];
        assert_eq!(tracker.prime_all(&second, &preloader), 1);

        assert_eq!(*preloader.0.lock().unwrap(), vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn test_reset_allows_repriming() {
        let preloader = Recording::default();
        let mut tracker = PreloadTracker::new();
        let items = vec![Item::new("1", "u1")];

        tracker.prime_all(&items, &preloader);
        tracker.reset();
        assert_eq!(tracker.prime_all(&items, &preloader), 1);
    }
}
