// Criterion benchmarks for Skill Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skill_match::core::{compute_overlap, dispatch_for_new_job, MatchEngine};
use skill_match::models::{CandidateProfile, JobPosting, SkillSet};

const SKILLS: &[&str] = &[
    "Java", "SQL", "React", "Python", "Kotlin", "Go", "Rust", "Docker", "AWS", "Figma",
    "Swift", "Linux", "Spark", "Excel", "Angular", "Django", "Flutter", "Azure",
];

fn skills_for(seed: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| SKILLS[(seed * 7 + i * 5) % SKILLS.len()].to_string())
        .collect()
}

fn create_candidate(id: usize) -> CandidateProfile {
    CandidateProfile {
        profile_id: format!("alumni-{}", id),
        full_name: format!("Alumnus {}", id),
        skills: skills_for(id, 3 + id % 6),
    }
}

fn create_job(id: usize) -> JobPosting {
    JobPosting {
        job_id: format!("job-{}", id),
        title: format!("Job {}", id),
        company_name: "IST".to_string(),
        skills: skills_for(id * 3, 4),
        deadline_date: None,
    }
}

fn bench_compute_overlap(c: &mut Criterion) {
    let a = SkillSet::from_names(skills_for(1, 8));
    let b = SkillSet::from_names(skills_for(2, 6));

    c.bench_function("compute_overlap", |bench| {
        bench.iter(|| compute_overlap(black_box(&a), black_box(&b)));
    });
}

fn bench_job_feed(c: &mut Criterion) {
    let engine = MatchEngine::default();
    let skills = SkillSet::from_names(skills_for(0, 6));

    let mut group = c.benchmark_group("job_feed");

    for job_count in [10, 100, 1000].iter() {
        let jobs: Vec<JobPosting> = (0..*job_count).map(create_job).collect();

        group.bench_with_input(BenchmarkId::new("relevant_jobs", job_count), job_count, |b, _| {
            b.iter(|| engine.relevant_jobs(black_box(&skills), black_box(&jobs)).count());
        });
    }

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let job = create_job(1);

    let mut group = c.benchmark_group("fan_out");

    for candidate_count in [100, 1000, 10000].iter() {
        let candidates: Vec<CandidateProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("dispatch_for_new_job", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| dispatch_for_new_job(black_box(&job), black_box(&candidates), 3));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_overlap, bench_job_feed, bench_fan_out);

criterion_main!(benches);
