//! Tab navigation for mdtail.
//!
//! Moves the [DocumentSet] selection one step left or right with wraparound.

use crate::app::tab::DocumentSet;

/// Direction of a tab switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Moves the selection in `set` and returns whether it changed.
///
/// A set with fewer than two documents is never touched.
pub fn navigate(direction: Direction, set: &mut DocumentSet) -> bool {
    let len = set.len();
    if len <= 1 {
        return false;
    }

    let current = set.selected_index();
    let target = match direction {
        Direction::Previous => (current + len - 1) % len,
        Direction::Next => (current + 1) % len,
    };

    // target is always < len
    set.set_selected(target).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use rand::rng;
    use std::error;
    use std::path::PathBuf;

    fn set_of(n: usize) -> DocumentSet {
        let paths = (0..n).map(|i| PathBuf::from(format!("/docs/file_{i}.md")));
        DocumentSet::initialize(paths).expect("non-empty set")
    }

    #[test]
    fn three_documents_wrap_both_ways() -> Result<(), Box<dyn error::Error>> {
        let mut set = set_of(3);

        assert!(navigate(Direction::Previous, &mut set));
        assert_eq!(set.selected_index(), 2, "previous from 0 should wrap to 2");

        set.set_selected(0)?;
        assert!(navigate(Direction::Next, &mut set));
        assert_eq!(set.selected_index(), 1);
        Ok(())
    }

    #[test]
    fn single_document_never_moves() {
        let mut set = set_of(1);
        for _ in 0..10 {
            assert!(!navigate(Direction::Next, &mut set));
            assert!(!navigate(Direction::Previous, &mut set));
            assert_eq!(set.selected_index(), 0);
        }
    }

    #[test]
    fn randomized_round_trip_restores_selection() -> Result<(), Box<dyn error::Error>> {
        let mut rng = rng();
        for _ in 0..200 {
            let n = rng.random_range(2..12);
            let start = rng.random_range(0..n);
            let mut set = set_of(n);
            set.set_selected(start)?;

            assert!(navigate(Direction::Previous, &mut set));
            assert!(navigate(Direction::Next, &mut set));
            assert_eq!(set.selected_index(), start, "prev/next broke at n={n} s={start}");

            assert!(navigate(Direction::Next, &mut set));
            assert!(navigate(Direction::Previous, &mut set));
            assert_eq!(set.selected_index(), start, "next/prev broke at n={n} s={start}");
        }
        Ok(())
    }

    #[test]
    fn rapid_navigation_matches_modular_math() {
        let n = 7;
        let mut set = set_of(n);
        let presses = 1000;

        for _ in 0..presses {
            assert!(navigate(Direction::Next, &mut set));
        }
        assert_eq!(set.selected_index(), presses % n);

        for _ in 0..presses {
            assert!(navigate(Direction::Previous, &mut set));
        }
        assert_eq!(set.selected_index(), 0);
    }
}
