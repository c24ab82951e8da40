//! Level derivation.
//!
//! `level` is never stored independently in normal flow; every code path that
//! changes points recomputes it here so the two fields cannot drift.

/// Map accumulated points to a level number (always >= 1).
pub fn level_for(points: u32) -> u32 {
    points / 100 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(199), 2);
        assert_eq!(level_for(250), 3);
    }
}
