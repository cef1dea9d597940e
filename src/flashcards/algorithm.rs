//! Day-table review scheduler
//!
//! The next due day is `today + offset[grade]`, where the three offsets come
//! from [`ParentSettings`]. There is no ease factor and no interval growth
//! beyond what the auto-grading streak rule provides:
//! - wrong answer: AGAIN
//! - correct answer, streak below 3: HARD
//! - correct answer, streak of 3 or more: EASY

use crate::settings::ParentSettings;

use super::models::Grade;

/// Correct answers in a row needed before auto-grading picks EASY
pub const EASY_STREAK: u32 = 3;

/// Day on or after which a card graded `grade` today is due again
pub fn next_due_epoch_day(today_epoch_day: i64, grade: Grade, settings: &ParentSettings) -> i64 {
    today_epoch_day + i64::from(settings.days_for(grade))
}

/// Grade derived from an auto-checked answer and the streak after it
pub fn grade_for_answer(is_correct: bool, correct_streak: u32) -> Grade {
    if !is_correct {
        Grade::Again
    } else if correct_streak >= EASY_STREAK {
        Grade::Easy
    } else {
        Grade::Hard
    }
}

/// Day offsets for AGAIN, HARD and EASY, for showing on grade buttons
pub fn preview_intervals(settings: &ParentSettings) -> [u32; 3] {
    Grade::ALL.map(|g| settings.days_for(g))
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "today".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(again: u32, hard: u32, easy: u32) -> ParentSettings {
        ParentSettings {
            again_days: again,
            hard_days: hard,
            easy_days: easy,
        }
    }

    #[test]
    fn test_next_due_adds_offset() {
        let s = ParentSettings::default();
        assert_eq!(next_due_epoch_day(100, Grade::Again, &s), 100);
        assert_eq!(next_due_epoch_day(100, Grade::Hard, &s), 101);
        assert_eq!(next_due_epoch_day(100, Grade::Easy, &s), 103);

        let custom = settings(2, 5, 14);
        for grade in Grade::ALL {
            assert_eq!(
                next_due_epoch_day(20_000, grade, &custom),
                20_000 + i64::from(custom.days_for(grade))
            );
        }
    }

    #[test]
    fn test_next_due_monotonic_in_offset() {
        let mut last = i64::MIN;
        for days in 0..50 {
            let due = next_due_epoch_day(7, Grade::Hard, &settings(0, days, 3));
            assert!(due >= last);
            last = due;
        }
    }

    #[test]
    fn test_grade_for_answer() {
        assert_eq!(grade_for_answer(false, 0), Grade::Again);
        assert_eq!(grade_for_answer(true, 1), Grade::Hard);
        assert_eq!(grade_for_answer(true, 2), Grade::Hard);
        assert_eq!(grade_for_answer(true, 3), Grade::Easy);
        assert_eq!(grade_for_answer(true, 10), Grade::Easy);
    }

    #[test]
    fn test_preview_intervals() {
        assert_eq!(preview_intervals(&ParentSettings::default()), [0, 1, 3]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "today");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
