use crate::core::overlap::{compute_overlap, is_relevant, DEFAULT_RELEVANCE_THRESHOLD};
use crate::models::{CandidateProfile, JobPosting, MatchResult, SkillSet};

/// Jobs whose required skills overlap the candidate's by at least `threshold`
///
/// Lazy and stable: jobs are yielded in input order.
///
/// The skill set is only borrowed while iterating; yielded jobs keep the
/// lifetime of the input collection.
pub fn filter_relevant_jobs<'s, 'a: 's, I>(
    candidate_skills: &'s SkillSet,
    jobs: I,
    threshold: usize,
) -> impl Iterator<Item = &'a JobPosting> + 's
where
    I: IntoIterator<Item = &'a JobPosting>,
    I::IntoIter: 's,
{
    jobs.into_iter()
        .filter(move |job| is_relevant(compute_overlap(candidate_skills, &job.skill_set()), threshold))
}

/// Candidates whose skills overlap the job's by at least `threshold`,
/// paired with their overlap count
///
/// Lazy and stable: candidates are yielded in input order.
pub fn filter_relevant_candidates<'s, 'a: 's, I>(
    job_skills: &'s SkillSet,
    candidates: I,
    threshold: usize,
) -> impl Iterator<Item = (&'a CandidateProfile, usize)> + 's
where
    I: IntoIterator<Item = &'a CandidateProfile>,
    I::IntoIter: 's,
{
    candidates.into_iter().filter_map(move |candidate| {
        let overlap = compute_overlap(job_skills, &candidate.skill_set());
        is_relevant(overlap, threshold).then_some((candidate, overlap))
    })
}

/// Skill-matching engine carrying the configured relevance threshold
///
/// Both directions (candidate to jobs, job to candidates) run through the
/// same overlap primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEngine {
    threshold: usize,
}

impl MatchEngine {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn with_default_threshold() -> Self {
        Self::new(DEFAULT_RELEVANCE_THRESHOLD)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Job feed direction: one candidate against many jobs
    pub fn relevant_jobs<'s, 'a: 's, I>(
        &self,
        candidate_skills: &'s SkillSet,
        jobs: I,
    ) -> impl Iterator<Item = &'a JobPosting> + 's
    where
        I: IntoIterator<Item = &'a JobPosting>,
        I::IntoIter: 's,
    {
        filter_relevant_jobs(candidate_skills, jobs, self.threshold)
    }

    /// Fan-out direction: one job against many candidates
    pub fn relevant_candidates<'s, 'a: 's, I>(
        &self,
        job_skills: &'s SkillSet,
        candidates: I,
    ) -> impl Iterator<Item = (&'a CandidateProfile, usize)> + 's
    where
        I: IntoIterator<Item = &'a CandidateProfile>,
        I::IntoIter: 's,
    {
        filter_relevant_candidates(job_skills, candidates, self.threshold)
    }

    pub fn match_result(&self, candidate: &CandidateProfile, job: &JobPosting) -> MatchResult {
        MatchResult {
            profile_id: candidate.profile_id.clone(),
            job_id: job.job_id.clone(),
            overlap_count: compute_overlap(&candidate.skill_set(), &job.skill_set()),
        }
    }

    pub fn is_match(&self, result: &MatchResult) -> bool {
        is_relevant(result.overlap_count, self.threshold)
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_default_threshold()
    }
}
