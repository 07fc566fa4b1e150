//! Points-to-level model
//!
//! A fixed ascending table of level bands. Every non-negative point total
//! falls in exactly one band; the top band is unbounded.

/// One level band; `max_points` is `None` for the unbounded top band
#[derive(Debug, Clone, Copy)]
pub struct LevelBand {
    pub level: u32,
    pub min_points: u32,
    pub max_points: Option<u32>,
}

/// Level bands, ordered ascending by `min_points`
pub const LEVEL_BANDS: &[LevelBand] = &[
    LevelBand { level: 1, min_points: 0, max_points: Some(99) },
    LevelBand { level: 2, min_points: 100, max_points: Some(249) },
    LevelBand { level: 3, min_points: 250, max_points: Some(499) },
    LevelBand { level: 4, min_points: 500, max_points: Some(999) },
    LevelBand { level: 5, min_points: 1000, max_points: Some(1999) },
    LevelBand { level: 6, min_points: 2000, max_points: Some(3499) },
    LevelBand { level: 7, min_points: 3500, max_points: Some(5499) },
    LevelBand { level: 8, min_points: 5500, max_points: Some(7999) },
    LevelBand { level: 9, min_points: 8000, max_points: Some(10999) },
    LevelBand { level: 10, min_points: 11000, max_points: None },
];

/// Level for a point total: the band whose range contains `points`
pub fn level_for(points: u32) -> u32 {
    LEVEL_BANDS
        .iter()
        .find(|band| {
            points >= band.min_points && band.max_points.map_or(true, |max| points <= max)
        })
        .map(|band| band.level)
        .unwrap_or(1)
}

/// Percentage of the way through the current band, 0-100
///
/// The top band has no next threshold and always reports 100.
pub fn level_progress_percent(points: u32) -> u8 {
    let index = LEVEL_BANDS
        .iter()
        .position(|band| {
            points >= band.min_points && band.max_points.map_or(true, |max| points <= max)
        })
        .unwrap_or(0);

    let band = &LEVEL_BANDS[index];
    let Some(next) = LEVEL_BANDS.get(index + 1) else {
        return 100;
    };

    let span = next.min_points - band.min_points;
    let into = points - band.min_points;
    (((into as f64 / span as f64) * 100.0).floor() as u8).clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(999), 4);
        assert_eq!(level_for(1000), 5);
        assert_eq!(level_for(11000), 10);
        assert_eq!(level_for(u32::MAX), 10);
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in LEVEL_BANDS.windows(2) {
            let max = pair[0].max_points.expect("only the top band is unbounded");
            assert_eq!(max + 1, pair[1].min_points);
        }
        assert!(LEVEL_BANDS.last().unwrap().max_points.is_none());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(level_progress_percent(0), 0);
        assert_eq!(level_progress_percent(50), 50);
        assert_eq!(level_progress_percent(100), 0);
        assert_eq!(level_progress_percent(175), 50);
        // Top band has no next threshold
        assert_eq!(level_progress_percent(20_000), 100);
    }

    proptest! {
        #[test]
        fn level_is_monotonic(p1 in 0u32..100_000, p2 in 0u32..100_000) {
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            prop_assert!(level_for(lo) <= level_for(hi));
        }

        #[test]
        fn every_point_total_has_exactly_one_band(points in 0u32..1_000_000) {
            let matches = LEVEL_BANDS
                .iter()
                .filter(|band| {
                    points >= band.min_points
                        && band.max_points.map_or(true, |max| points <= max)
                })
                .count();
            prop_assert_eq!(matches, 1);
        }

        #[test]
        fn progress_percent_is_bounded(points in 0u32..1_000_000) {
            prop_assert!(level_progress_percent(points) <= 100);
        }
    }
}
