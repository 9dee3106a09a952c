//! Section splitter: partitions raw resume text into skills / experience /
//! projects blocks by locating their headers.
//!
//! Two strategies are available:
//! - `Ordered` (default) finds every header line first, then slices the text
//!   between consecutive headers. Each byte belongs to at most one section.
//! - `Legacy` runs one independent pattern per section, each capturing from
//!   its keyword up to the next terminator keyword anywhere in the text.
//!   Captures may overlap when headers repeat or appear out of order.
//!
//! Matching is case-insensitive: the text is lowercased before scanning and
//! the extracted section text is returned lowercased and trimmed.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::scoring::Section;

/// Candidate header lines: optional qualifier, a section keyword, then the
/// rest of the line. `education` only terminates. Whether the rest of the
/// line still reads as a heading is decided by `title_tail_content_offset`.
const HEADER_PATTERN: &str = r"(?m)^[ \t]*(?:(?:technical|professional|work|key|core|relevant|personal|academic)[ \t]+)?(skills|experience|projects|education)\b([^\n]*)$";

/// Longest heading suffix after the keyword ("& tools", "(selected)").
const MAX_TITLE_TAIL_CHARS: usize = 40;
const MAX_TITLE_TAIL_WORDS: usize = 4;

/// Words that make a keyword line read as a sentence rather than a heading.
const PROSE_WORDS: &[&str] = &[
    "with", "in", "of", "for", "at", "on", "to", "from", "by", "as", "using", "including",
    "is", "was", "were", "are", "has", "have", "across", "over", "building", "working",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMode {
    #[default]
    Ordered,
    Legacy,
}

#[derive(Debug, Error)]
#[error("unknown section split mode '{0}'")]
pub struct UnknownSplitMode(String);

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitMode::Ordered => "ordered",
            SplitMode::Legacy => "legacy",
        }
    }
}

impl FromStr for SplitMode {
    type Err = UnknownSplitMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(SplitMode::Ordered),
            "legacy" => Ok(SplitMode::Legacy),
            other => Err(UnknownSplitMode(other.to_string())),
        }
    }
}

/// Text per scored section. A missing section is an empty string, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionMap {
    pub skills: String,
    pub experience: String,
    pub projects: String,
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
        }
    }

    fn slot(&mut self, section: Section) -> &mut String {
        match section {
            Section::Skills => &mut self.skills,
            Section::Experience => &mut self.experience,
            Section::Projects => &mut self.projects,
        }
    }

    /// Sections that have any non-whitespace text.
    pub fn non_empty(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL
            .into_iter()
            .filter(|&s| !self.get(s).trim().is_empty())
    }
}

pub fn split_sections(text: &str, mode: SplitMode) -> SectionMap {
    let lowered = text.to_lowercase();
    match mode {
        SplitMode::Ordered => split_ordered(&lowered),
        SplitMode::Legacy => split_legacy(&lowered),
    }
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"))
}

fn section_for_keyword(keyword: &str) -> Option<Section> {
    match keyword {
        "skills" => Some(Section::Skills),
        "experience" => Some(Section::Experience),
        "projects" => Some(Section::Projects),
        _ => None,
    }
}

/// A located header: which section it opens (None for terminator-only
/// headers), where the header line starts, and where its content starts.
struct Header {
    section: Option<Section>,
    start: usize,
    content_start: usize,
}

/// Decides whether the text following a header keyword keeps the line a
/// heading, and if so where inside `tail` the section content begins.
///
/// - empty: content starts on the next line
/// - `": rust, go"`: content starts after the colon
/// - `" & tools"`, `" summary"`, `" (selected)"`: short title, next line
/// - `" python, go"`: comma list without a colon, content starts right away
/// - `" with kafka and rust"`: prose, not a heading
fn title_tail_content_offset(tail: &str) -> Option<usize> {
    let (title, content_offset) = match tail.find(':') {
        Some(colon) => (&tail[..colon], colon + 1),
        None => (tail, tail.len()),
    };

    let words: Vec<&str> = title
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    if words.iter().any(|w| PROSE_WORDS.contains(w)) {
        return None;
    }

    let title = title.trim();
    if content_offset == tail.len() && title.contains(',') {
        return Some(0);
    }
    if title.chars().count() > MAX_TITLE_TAIL_CHARS
        || words.len() > MAX_TITLE_TAIL_WORDS
        || title.ends_with('.')
    {
        return None;
    }
    Some(content_offset)
}

fn split_ordered(text: &str) -> SectionMap {
    let headers: Vec<Header> = header_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let keyword = caps.get(1)?;
            let tail = caps.get(2)?;
            let offset = title_tail_content_offset(tail.as_str())?;
            Some(Header {
                section: section_for_keyword(keyword.as_str()),
                start: whole.start(),
                content_start: tail.start() + offset,
            })
        })
        .collect();

    let mut sections = SectionMap::default();
    let mut seen: Vec<Section> = Vec::with_capacity(Section::ALL.len());

    for (i, header) in headers.iter().enumerate() {
        let Some(section) = header.section else {
            continue;
        };
        // First occurrence of a header wins.
        if seen.contains(&section) {
            continue;
        }
        seen.push(section);

        let end = headers.get(i + 1).map_or(text.len(), |next| next.start);
        *sections.slot(section) = text[header.content_start..end].trim().to_string();
    }

    sections
}

fn legacy_patterns() -> &'static [(Section, Regex); 3] {
    static PATTERNS: OnceLock<[(Section, Regex); 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |p: &str| Regex::new(p).expect("legacy section pattern is valid");
        [
            (
                Section::Skills,
                compile(r"(?s)skills(.*?)(?:experience|projects|education|$)"),
            ),
            (
                Section::Experience,
                compile(r"(?s)experience(.*?)(?:projects|skills|education|$)"),
            ),
            (
                Section::Projects,
                compile(r"(?s)projects(.*?)(?:skills|experience|education|$)"),
            ),
        ]
    })
}

fn split_legacy(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    for (section, pattern) in legacy_patterns() {
        if let Some(body) = pattern.captures(text).and_then(|caps| caps.get(1)) {
            *sections.slot(*section) = body.as_str().trim().to_string();
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "Skills\nPython, Go\nExperience\n5 years backend\nProjects\nBuilt a cache";

    #[test]
    fn test_ordered_extracts_text_between_headers() {
        let sections = split_sections(FULL_RESUME, SplitMode::Ordered);
        assert_eq!(sections.skills, "python, go");
        assert_eq!(sections.experience, "5 years backend");
        assert_eq!(sections.projects, "built a cache");
    }

    #[test]
    fn test_legacy_extracts_text_between_headers() {
        let sections = split_sections(FULL_RESUME, SplitMode::Legacy);
        assert_eq!(sections.skills, "python, go");
        assert_eq!(sections.experience, "5 years backend");
        assert_eq!(sections.projects, "built a cache");
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let text = "SKILLS\nRust\nEXPERIENCE\nPlatform team\nEducation\nBSc";
        for mode in [SplitMode::Ordered, SplitMode::Legacy] {
            let sections = split_sections(text, mode);
            assert_eq!(sections.skills, "rust", "{mode:?}");
            assert_eq!(sections.experience, "platform team", "{mode:?}");
        }
    }

    #[test]
    fn test_education_terminates_a_section() {
        let text = "Projects\nKV store in Rust\n\nEducation\nMSc Computer Science";
        for mode in [SplitMode::Ordered, SplitMode::Legacy] {
            let sections = split_sections(text, mode);
            assert_eq!(sections.projects, "kv store in rust", "{mode:?}");
        }
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let text = "Skills\nPython, SQL";
        for mode in [SplitMode::Ordered, SplitMode::Legacy] {
            let sections = split_sections(text, mode);
            assert_eq!(sections.skills, "python, sql");
            assert!(sections.experience.is_empty());
            assert!(sections.projects.is_empty());
        }
    }

    #[test]
    fn test_no_headers_yields_all_empty() {
        let sections = split_sections("Jane Doe\njane@example.com", SplitMode::Ordered);
        assert_eq!(sections, SectionMap::default());
        assert_eq!(sections.non_empty().count(), 0);
    }

    #[test]
    fn test_ordered_accepts_colon_and_inline_content() {
        let text = "Skills: Rust, Tokio\nWork Experience:\nAcme Corp, 2019-2024";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "rust, tokio");
        assert_eq!(sections.experience, "acme corp, 2019-2024");
    }

    #[test]
    fn test_ordered_ignores_keywords_inside_prose() {
        let text = "Skills\nExperience with Kafka and Rust\nProjects\nSearch engine";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "experience with kafka and rust");
        assert!(sections.experience.is_empty());
        assert_eq!(sections.projects, "search engine");
    }

    #[test]
    fn test_ordered_accepts_headers_with_trailing_title_words() {
        let text = "Skills & Tools\nRust, Tokio\n\
                    Experience Summary\nAcme Corp\n\
                    Projects (Selected)\nKV store\n\
                    Education & Training\nBSc";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "rust, tokio");
        assert_eq!(sections.experience, "acme corp");
        assert_eq!(sections.projects, "kv store");
    }

    #[test]
    fn test_ordered_education_with_conjunction_terminates_projects() {
        let text = "Projects\nKV store\nEducation and Certifications\nBSc, AWS SAA";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.projects, "kv store");
    }

    #[test]
    fn test_ordered_titled_header_with_colon_keeps_inline_content() {
        let text = "Technical Skills & Tools: Rust, Go\nProfessional Experience History\nAcme";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "rust, go");
        assert_eq!(sections.experience, "acme");
    }

    #[test]
    fn test_ordered_keyword_followed_by_list_keeps_the_list() {
        let text = "Skills Python, Go, SQL\nProjects\nChat bot";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "python, go, sql");
        assert_eq!(sections.projects, "chat bot");
    }

    #[test]
    fn test_ordered_rejects_keyword_lines_that_read_as_sentences() {
        let text = "Experience\nBackend team\n\
                    Projects delivered on time for three clients.\n\
                    Skills in distributed systems\n\
                    Projects\nCache";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(
            sections.experience,
            "backend team\nprojects delivered on time for three clients.\nskills in distributed systems"
        );
        assert!(sections.skills.is_empty());
        assert_eq!(sections.projects, "cache");
    }

    #[test]
    fn test_ordered_handles_reordered_headers() {
        let text = "Projects\nCompiler\nSkills\nOCaml\nExperience\nTwo internships";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.projects, "compiler");
        assert_eq!(sections.skills, "ocaml");
        assert_eq!(sections.experience, "two internships");
    }

    #[test]
    fn test_ordered_first_header_occurrence_wins() {
        let text = "Skills\nGo\nExperience\nBackend\nSkills\nTerraform";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "go");
        assert_eq!(sections.experience, "backend");
    }

    #[test]
    fn test_ordered_handles_crlf_line_endings() {
        let text = "Skills\r\nPython\r\nProjects\r\nChat bot\r\n";
        let sections = split_sections(text, SplitMode::Ordered);
        assert_eq!(sections.skills, "python");
        assert_eq!(sections.projects, "chat bot");
    }

    #[test]
    fn test_non_empty_lists_sections_in_scoring_order() {
        let sections = SectionMap {
            skills: "rust".to_string(),
            experience: "   ".to_string(),
            projects: "cache".to_string(),
        };
        let found: Vec<Section> = sections.non_empty().collect();
        assert_eq!(found, vec![Section::Skills, Section::Projects]);
    }

    #[test]
    fn test_split_mode_from_str() {
        assert_eq!("ordered".parse::<SplitMode>().unwrap(), SplitMode::Ordered);
        assert_eq!(" Legacy ".parse::<SplitMode>().unwrap(), SplitMode::Legacy);
        assert!("fuzzy".parse::<SplitMode>().is_err());
        for mode in [SplitMode::Ordered, SplitMode::Legacy] {
            assert_eq!(mode.as_str().parse::<SplitMode>().unwrap(), mode);
        }
    }
}
