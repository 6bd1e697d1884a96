//! Score derivation — maps letter grades to display integers and back.
//!
//! Grades are authoritative; integers only drive bucket display and animation.
//! Boundary table (score ≥ threshold, evaluated top-down):
//! 90 A+, 85 A, 80 A-, 77 B+, 73 B, 70 B-, 67 C+, 63 C, 60 C-, otherwise F.
//! The table has no D band, so `score_to_grade` never yields `D`.

use crate::analysis::models::LetterGrade;

const BOUNDARIES: [(i32, LetterGrade); 9] = [
    (90, LetterGrade::APlus),
    (85, LetterGrade::A),
    (80, LetterGrade::AMinus),
    (77, LetterGrade::BPlus),
    (73, LetterGrade::B),
    (70, LetterGrade::BMinus),
    (67, LetterGrade::CPlus),
    (63, LetterGrade::C),
    (60, LetterGrade::CMinus),
];

/// Representative integer for a grade, roughly the midpoint of its band.
pub fn grade_to_score(grade: LetterGrade) -> i32 {
    match grade {
        LetterGrade::APlus => 95,
        LetterGrade::A => 87,
        LetterGrade::AMinus => 82,
        LetterGrade::BPlus => 78,
        LetterGrade::B => 75,
        LetterGrade::BMinus => 71,
        LetterGrade::CPlus => 68,
        LetterGrade::C => 65,
        LetterGrade::CMinus => 61,
        LetterGrade::D => 55,
        LetterGrade::F => 40,
    }
}

pub fn score_to_grade(score: i32) -> LetterGrade {
    BOUNDARIES
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(LetterGrade::F)
}

/// Mean of the grade projections, rounded half away from zero, projected back.
/// Returns `None` for an empty slice.
pub fn average_grade(grades: &[LetterGrade]) -> Option<LetterGrade> {
    if grades.is_empty() {
        return None;
    }
    let total: i32 = grades.iter().map(|g| grade_to_score(*g)).sum();
    let mean = (f64::from(total) / grades.len() as f64).round() as i32;
    Some(score_to_grade(mean))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_plus_minus_one() {
        let cases = [
            (90, LetterGrade::APlus, LetterGrade::A),
            (85, LetterGrade::A, LetterGrade::AMinus),
            (80, LetterGrade::AMinus, LetterGrade::BPlus),
            (77, LetterGrade::BPlus, LetterGrade::B),
            (73, LetterGrade::B, LetterGrade::BMinus),
            (70, LetterGrade::BMinus, LetterGrade::CPlus),
            (67, LetterGrade::CPlus, LetterGrade::C),
            (63, LetterGrade::C, LetterGrade::CMinus),
            (60, LetterGrade::CMinus, LetterGrade::F),
        ];
        for (threshold, at, below) in cases {
            assert_eq!(score_to_grade(threshold), at, "score {threshold}");
            assert_eq!(score_to_grade(threshold + 1), at, "score {}", threshold + 1);
            assert_eq!(score_to_grade(threshold - 1), below, "score {}", threshold - 1);
        }
    }

    #[test]
    fn test_named_boundary_examples() {
        assert_eq!(score_to_grade(90), LetterGrade::APlus);
        assert_eq!(score_to_grade(89), LetterGrade::A);
        assert_eq!(score_to_grade(59), LetterGrade::F);
        assert_eq!(score_to_grade(60), LetterGrade::CMinus);
    }

    #[test]
    fn test_out_of_range_scores_clamp_to_ends() {
        assert_eq!(score_to_grade(150), LetterGrade::APlus);
        assert_eq!(score_to_grade(-3), LetterGrade::F);
        assert_eq!(score_to_grade(0), LetterGrade::F);
    }

    #[test]
    fn test_projection_round_trips_except_d() {
        for grade in LetterGrade::ALL {
            let score = grade_to_score(grade);
            assert!((0..=100).contains(&score));
            if grade != LetterGrade::D {
                assert_eq!(score_to_grade(score), grade, "grade {grade}");
            }
        }
        assert_eq!(score_to_grade(grade_to_score(LetterGrade::D)), LetterGrade::F);
    }

    #[test]
    fn test_projection_is_monotonic() {
        let scores: Vec<i32> = LetterGrade::ALL.iter().map(|g| grade_to_score(*g)).collect();
        assert!(scores.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_average_grade() {
        assert_eq!(average_grade(&[]), None);
        assert_eq!(average_grade(&[LetterGrade::B]), Some(LetterGrade::B));
        // (95 + 75) / 2 = 85 → A
        assert_eq!(
            average_grade(&[LetterGrade::APlus, LetterGrade::B]),
            Some(LetterGrade::A)
        );
        // (78 + 75) / 2 = 76.5 → 77 → B+
        assert_eq!(
            average_grade(&[LetterGrade::BPlus, LetterGrade::B]),
            Some(LetterGrade::BPlus)
        );
        // (40 + 61) / 2 = 50.5 → 51 → F
        assert_eq!(
            average_grade(&[LetterGrade::F, LetterGrade::CMinus]),
            Some(LetterGrade::F)
        );
    }
}
