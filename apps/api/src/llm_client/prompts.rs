// Prompt constants for the resume feedback call.
// The template is filled by `analysis::feedback::build_feedback_prompt`.

pub const FEEDBACK_SYSTEM: &str = "You are a professional ATS resume reviewer.";

pub const FEEDBACK_PROMPT_TEMPLATE: &str = "
You are an ATS resume reviewer.

Scores:
- Skills: {skills}%
- Experience: {experience}%
- Projects: {projects}%
- Final ATS score: {final_score}%

Explain briefly:
1) Why the score is at this level
2) Three concrete ways to improve the resume

Be concise and practical.
";
