//! Analysis pipeline: split → embed → compare → weigh → explain.
//!
//! Runs sequentially. A run issues one embedding call for the job description,
//! one per non-empty section, and exactly one feedback call unless an earlier
//! step failed.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::feedback::FeedbackClient;
use crate::analysis::scoring::{similarity_to_percent, weighted_final_score, ScoreMap};
use crate::analysis::sections::{split_sections, SectionMap, SplitMode};
use crate::embedding::similarity::{cosine_similarity, SimilarityError};
use crate::embedding::{Embedder, EmbeddingError};
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("similarity failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("feedback failed: {0}")]
    Feedback(#[from] LlmError),
}

/// Everything one analysis produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    #[serde(skip)]
    pub sections: SectionMap,
    pub scores: ScoreMap,
    pub final_score: f64,
    pub feedback: String,
    pub feedback_timed_out: bool,
}

#[derive(Clone)]
pub struct AnalysisPipeline {
    embedder: Arc<dyn Embedder>,
    feedback: FeedbackClient,
    split_mode: SplitMode,
}

impl AnalysisPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, feedback: FeedbackClient, split_mode: SplitMode) -> Self {
        Self {
            embedder,
            feedback,
            split_mode,
        }
    }

    /// Scores `resume_text` against `job_description` and asks for feedback.
    /// Any failure other than a feedback timeout aborts the run.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let request_id = Uuid::new_v4();
        self.run(resume_text, job_description)
            .instrument(info_span!("analysis", %request_id))
            .await
    }

    async fn run(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let sections = split_sections(resume_text, self.split_mode);
        debug!(
            skills = sections.skills.len(),
            experience = sections.experience.len(),
            projects = sections.projects.len(),
            "resume split into sections"
        );

        let job_vec = self.embedder.embed(job_description).await?;

        let mut scores = ScoreMap::default();
        for section in sections.non_empty() {
            let section_vec = self.embedder.embed(sections.get(section)).await?;
            let similarity = cosine_similarity(&section_vec, &job_vec)?;
            let percent = similarity_to_percent(similarity);
            debug!(section = section.name(), percent, "section scored");
            scores.set(section, percent);
        }

        let final_score = weighted_final_score(&scores);
        info!(
            skills = scores.skills,
            experience = scores.experience,
            projects = scores.projects,
            final_score,
            "resume scored"
        );

        let feedback = self.feedback.explain(&scores, final_score).await?;
        let feedback_timed_out = feedback.timed_out();
        let feedback = feedback.into_text();

        Ok(AnalysisResult {
            sections,
            scores,
            final_score,
            feedback,
            feedback_timed_out,
        })
    }
}
