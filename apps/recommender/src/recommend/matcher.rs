use std::collections::HashSet;

/// Number of user skills that exactly equal one of the job's requirements.
/// Both sets are expected to be normalized already.
pub fn match_count(skills: &HashSet<String>, requirements: &HashSet<String>) -> usize {
    let (small, large) = if skills.len() <= requirements.len() {
        (skills, requirements)
    } else {
        (requirements, skills)
    };
    small.iter().filter(|term| large.contains(*term)).count()
}
