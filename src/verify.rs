//! Post-hoc solution checking.
//!
//! Re-derives every timeline invariant from a finished [`Solution`] and its
//! instance, independently of the scheduler's own bookkeeping. A solution
//! produced by [`crate::scheduler::GreedyScheduler`] always verifies clean;
//! hand-edited or externally produced timelines may not.

use crate::index::ProgramIndex;
use crate::models::{InstanceData, Program, ScheduleEntry, Solution, Violation, ViolationType};

/// Checks a solution against its instance.
///
/// Returns every violation found, in timeline order with the score check
/// last. An empty vector means the solution is consistent.
///
/// # Example
/// ```
/// use tv_schedule::models::{Channel, InstanceData};
/// use tv_schedule::scheduler::GreedyScheduler;
/// use tv_schedule::verify::verify_solution;
///
/// let instance = InstanceData::new(0, 120)
///     .with_channel(Channel::new(1).with_slot("a", 0, 120, "News", 50));
/// let solution = GreedyScheduler::new().schedule(&instance);
/// assert!(verify_solution(&instance, &solution).is_empty());
/// ```
pub fn verify_solution(instance: &InstanceData, solution: &Solution) -> Vec<Violation> {
    let index = ProgramIndex::build(instance);
    let mut violations = Vec::new();
    let mut genre_run = 0usize;
    let mut previous_genre: Option<&str> = None;

    for (i, entry) in solution.entries.iter().enumerate() {
        let program = index.program_by_unique_id(&entry.unique_program_id);
        match program {
            None => violations.push(Violation::at(
                ViolationType::UnknownProgram,
                i,
                format!("Entry references unknown program {}", entry.unique_program_id),
            )),
            Some(p) if !matches_program(entry, p) => violations.push(Violation::at(
                ViolationType::UnknownProgram,
                i,
                format!(
                    "Entry {} on channel {} [{}, {}) disagrees with its program",
                    entry.unique_program_id, entry.channel_id, entry.start, entry.end
                ),
            )),
            Some(_) => {}
        }

        if entry.duration() < instance.min_duration {
            violations.push(Violation::at(
                ViolationType::TooShort,
                i,
                format!(
                    "Entry {} lasts {} minutes, minimum is {}",
                    entry.unique_program_id,
                    entry.duration(),
                    instance.min_duration
                ),
            ));
        }

        if let Some(prev) = i.checked_sub(1).map(|j| &solution.entries[j]) {
            if prev.unique_program_id == entry.unique_program_id {
                violations.push(Violation::at(
                    ViolationType::RepeatedProgram,
                    i,
                    format!("Program {} aired twice in a row", entry.unique_program_id),
                ));
            }
            if entry.start < prev.end {
                violations.push(Violation::at(
                    ViolationType::Overlap,
                    i,
                    format!(
                        "Entry {} starts at {} before previous entry ends at {}",
                        entry.unique_program_id, entry.start, prev.end
                    ),
                ));
            }
        }

        if let Some(p) = program {
            if let Some(block) = instance.priority_blocks.iter().find(|b| b.excludes(p)) {
                violations.push(Violation::at(
                    ViolationType::PriorityBlock,
                    i,
                    format!(
                        "Channel {} is not allowed during priority block [{}, {})",
                        entry.channel_id, block.start, block.end
                    ),
                ));
            }
        }

        let genre = program.map(|p| p.genre.as_str());
        genre_run = match (genre, previous_genre) {
            (Some(g), Some(prev)) if g == prev => genre_run + 1,
            (Some(_), _) => 1,
            (None, _) => 0,
        };
        if genre_run > instance.max_consecutive_genre as usize {
            violations.push(Violation::at(
                ViolationType::GenreRun,
                i,
                format!(
                    "{} consecutive {} entries, cap is {}",
                    genre_run,
                    genre.unwrap_or_default(),
                    instance.max_consecutive_genre
                ),
            ));
        }
        previous_genre = genre;
    }

    let fitness_sum = solution.fitness_sum();
    if solution.total_score != fitness_sum {
        violations.push(Violation::global(
            ViolationType::ScoreMismatch,
            format!(
                "Total score {} differs from fitness sum {}",
                solution.total_score, fitness_sum
            ),
        ));
    }

    violations
}

fn matches_program(entry: &ScheduleEntry, program: &Program) -> bool {
    entry.channel_id == program.channel_id
        && entry.program_id == program.program_id
        && entry.start == program.start
        && entry.end == program.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, PriorityBlock};

    fn instance() -> InstanceData {
        InstanceData::new(0, 300)
            .with_min_duration(30)
            .with_max_consecutive_genre(2)
            .with_channel(
                Channel::new(1)
                    .with_slot("n1", 0, 60, "News", 50)
                    .with_slot("n2", 60, 120, "News", 50)
                    .with_slot("n3", 120, 180, "News", 50)
                    .with_slot("flash", 180, 200, "News", 50),
            )
            .with_channel(
                Channel::new(2)
                    .with_slot("s1", 30, 90, "Sport", 40)
                    .with_slot("s2", 200, 300, "Sport", 40),
            )
    }

    fn entry(instance: &InstanceData, unique_id: &str) -> ScheduleEntry {
        let program = instance
            .channels
            .iter()
            .flat_map(|c| c.programs.iter())
            .find(|p| p.unique_id == unique_id)
            .unwrap();
        ScheduleEntry::for_program(program, program.score)
    }

    fn types(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type).collect()
    }

    #[test]
    fn test_clean_solution() {
        let inst = instance();
        let solution = Solution::from_entries(vec![entry(&inst, "1_n1_0"), entry(&inst, "2_s2_200")]);
        assert!(verify_solution(&inst, &solution).is_empty());
    }

    #[test]
    fn test_score_mismatch() {
        let inst = instance();
        let solution = Solution::new(vec![entry(&inst, "1_n1_0")], 49);
        let violations = verify_solution(&inst, &solution);
        assert_eq!(types(&violations), vec![ViolationType::ScoreMismatch]);
        assert_eq!(violations[0].entry_index, None);
    }

    #[test]
    fn test_overlap() {
        let inst = instance();
        let solution = Solution::from_entries(vec![entry(&inst, "1_n1_0"), entry(&inst, "2_s1_30")]);
        let violations = verify_solution(&inst, &solution);
        assert_eq!(types(&violations), vec![ViolationType::Overlap]);
        assert_eq!(violations[0].entry_index, Some(1));
    }

    #[test]
    fn test_too_short() {
        let inst = instance();
        let solution = Solution::from_entries(vec![entry(&inst, "1_flash_180")]);
        assert_eq!(
            types(&verify_solution(&inst, &solution)),
            vec![ViolationType::TooShort]
        );
    }

    #[test]
    fn test_repeated_program() {
        let inst = instance();
        let solution = Solution::from_entries(vec![entry(&inst, "1_n1_0"), entry(&inst, "1_n1_0")]);
        let found = types(&verify_solution(&inst, &solution));
        assert!(found.contains(&ViolationType::RepeatedProgram));
        assert!(found.contains(&ViolationType::Overlap));
    }

    #[test]
    fn test_genre_run() {
        let inst = instance();
        let solution = Solution::from_entries(vec![
            entry(&inst, "1_n1_0"),
            entry(&inst, "1_n2_60"),
            entry(&inst, "1_n3_120"),
        ]);
        let violations = verify_solution(&inst, &solution);
        assert_eq!(types(&violations), vec![ViolationType::GenreRun]);
        assert_eq!(violations[0].entry_index, Some(2));
    }

    #[test]
    fn test_priority_block() {
        let inst = instance().with_priority_block(PriorityBlock::new(250, 260).allow(1));
        let solution = Solution::from_entries(vec![entry(&inst, "2_s2_200")]);
        assert_eq!(
            types(&verify_solution(&inst, &solution)),
            vec![ViolationType::PriorityBlock]
        );
    }

    #[test]
    fn test_unknown_program() {
        let inst = instance();
        let mut forged = entry(&inst, "1_n1_0");
        forged.end = 90;
        let ghost = ScheduleEntry::for_program(&Program::new(9, "ghost", 200, 260), 10);
        let solution = Solution::from_entries(vec![forged, ghost]);
        assert_eq!(
            types(&verify_solution(&inst, &solution)),
            vec![ViolationType::UnknownProgram, ViolationType::UnknownProgram]
        );
    }
}
