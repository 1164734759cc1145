//! Reminder trigger evaluation
//!
//! Stateless: each call reports which offsets are crossed at that instant.
//! Remembering what has already been sent is the dispatcher's job (see
//! [`crate::ReminderLedger`]), and a crossing that happens between two polls
//! is only seen if a later poll still falls inside the window.

use classtime_api::{TriggerCrossing, TriggerOffset, TriggerSet};

/// Evaluate every configured offset against the distance to session start.
///
/// An offset is crossed when the session is still upcoming and no further
/// away than the offset. Output order matches `offsets`. Since a
/// [`TriggerSet`] is strictly decreasing, the first offset that is not
/// crossed means none of the shorter ones are either.
pub fn evaluate_triggers(start_delta_ms: i64, offsets: &TriggerSet) -> Vec<TriggerCrossing> {
    let mut open = start_delta_ms > 0;

    offsets
        .iter()
        .map(|offset| {
            let crossed = open && start_delta_ms <= offset_ms(offset);
            open = crossed;
            TriggerCrossing {
                offset: offset.clone(),
                crossed,
            }
        })
        .collect()
}

fn offset_ms(offset: &TriggerOffset) -> i64 {
    i64::try_from(offset.duration_ms).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtime_api::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE};

    fn crossed_names(start_delta_ms: i64, offsets: &TriggerSet) -> Vec<(String, bool)> {
        evaluate_triggers(start_delta_ms, offsets)
            .into_iter()
            .map(|c| (c.offset.name, c.crossed))
            .collect()
    }

    #[test]
    fn test_thirty_minutes_out() {
        let result = crossed_names(30 * MILLIS_PER_MINUTE as i64, &TriggerSet::standard());
        assert_eq!(
            result,
            [
                ("24h".to_string(), true),
                ("1h".to_string(), true),
                ("15min".to_string(), false)
            ]
        );
    }

    #[test]
    fn test_offset_boundary_is_inclusive() {
        let offsets = TriggerSet::standard();
        let at_one_hour = evaluate_triggers(MILLIS_PER_HOUR as i64, &offsets);
        assert!(at_one_hour[1].crossed);

        let just_over = evaluate_triggers(MILLIS_PER_HOUR as i64 + 1, &offsets);
        assert!(!just_over[1].crossed);
        assert!(just_over[0].crossed);
    }

    #[test]
    fn test_nothing_crossed_once_started() {
        let offsets = TriggerSet::standard();
        for delta in [0, -1, -(MILLIS_PER_HOUR as i64)] {
            assert!(evaluate_triggers(delta, &offsets).iter().all(|c| !c.crossed));
        }
    }

    #[test]
    fn test_far_future_crosses_nothing() {
        let offsets = TriggerSet::standard();
        let result = evaluate_triggers(3 * 24 * MILLIS_PER_HOUR as i64, &offsets);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|c| !c.crossed));
    }

    #[test]
    fn test_one_second_before_start_crosses_all() {
        let result = evaluate_triggers(1_000, &TriggerSet::standard());
        assert!(result.iter().all(|c| c.crossed));
    }

    #[test]
    fn test_empty_set() {
        assert!(evaluate_triggers(1_000, &TriggerSet::empty()).is_empty());
    }

    #[test]
    fn test_huge_offset_does_not_overflow() {
        let offsets = TriggerSet::new(vec![TriggerOffset::new("forever", u64::MAX).unwrap()]).unwrap();
        assert!(evaluate_triggers(i64::MAX, &offsets)[0].crossed);
    }
}
