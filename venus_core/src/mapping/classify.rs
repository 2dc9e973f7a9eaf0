// venus_core/src/mapping/classify.rs

use super::FeatureKind;
use crate::messages::RobotRecord;

/// Picks the single feature a record reports, if any.
///
/// A record may have several flags set; only the highest priority one counts:
/// rock, then cliff, then mountain.
pub fn classify(record: &RobotRecord) -> Option<FeatureKind> {
    if record.rock {
        Some(FeatureKind::Rock)
    } else if record.cliff {
        Some(FeatureKind::Cliff)
    } else if record.mountain {
        Some(FeatureKind::Mountain)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(rock: bool, cliff: bool, mountain: bool) -> RobotRecord {
        RobotRecord {
            rock,
            cliff,
            mountain,
            ..Default::default()
        }
    }

    #[test]
    fn no_flags_means_no_feature() {
        assert_eq!(classify(&flags(false, false, false)), None);
    }

    #[test]
    fn single_flags_map_to_their_feature() {
        assert_eq!(classify(&flags(true, false, false)), Some(FeatureKind::Rock));
        assert_eq!(classify(&flags(false, true, false)), Some(FeatureKind::Cliff));
        assert_eq!(
            classify(&flags(false, false, true)),
            Some(FeatureKind::Mountain)
        );
    }

    #[test]
    fn highest_priority_flag_wins() {
        for (rock, cliff, mountain) in [
            (true, true, false),
            (true, false, true),
            (true, true, true),
        ] {
            assert_eq!(
                classify(&flags(rock, cliff, mountain)),
                Some(FeatureKind::Rock)
            );
        }
        assert_eq!(classify(&flags(false, true, true)), Some(FeatureKind::Cliff));
    }
}
