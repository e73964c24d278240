use crate::models::SkillSet;

/// Default minimum overlap for a job/candidate pair to count as a match
pub const DEFAULT_RELEVANCE_THRESHOLD: usize = 3;

/// Normalize a skill name into its comparison key
///
/// Surrounding whitespace is trimmed and the name is lowercased. Returns
/// `None` for names that are blank after trimming.
#[inline]
pub fn normalize_skill(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Number of skills two sets have in common
///
/// Symmetric and total: an empty set on either side yields 0, and the
/// result never exceeds the size of the smaller set.
#[inline]
pub fn compute_overlap(a: &SkillSet, b: &SkillSet) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|key| large.contains_key(key)).count()
}

#[inline]
pub fn is_relevant(overlap_count: usize, threshold: usize) -> bool {
    overlap_count >= threshold
}
