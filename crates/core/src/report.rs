use serde::{Deserialize, Serialize};

use crate::collection::CollectionConfig;
use crate::rank::ScoredChunk;

pub const SECTION_TITLE_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    pub importance_rank: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page_number: u32,
    pub refined_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Builds the two positional views of the ranked set. Both arrays index the
/// same chunk at every position; only the projection differs.
pub fn assemble_report(
    config: &CollectionConfig,
    input_documents: Vec<String>,
    ranked: &[ScoredChunk],
    processing_timestamp: String,
) -> Report {
    let extracted_sections = ranked
        .iter()
        .map(|scored| ExtractedSection {
            document: scored.chunk.document.clone(),
            page_number: scored.chunk.page_number,
            section_title: section_title(&scored.chunk.text),
            importance_rank: round_rank(scored.score),
        })
        .collect();
    let subsection_analysis = ranked
        .iter()
        .map(|scored| SubsectionAnalysis {
            document: scored.chunk.document.clone(),
            page_number: scored.chunk.page_number,
            refined_text: scored.chunk.text.clone(),
        })
        .collect();
    Report {
        metadata: ReportMetadata {
            input_documents,
            persona: config.persona.clone(),
            job: config.job.clone(),
            processing_timestamp,
        },
        extracted_sections,
        subsection_analysis,
    }
}

fn section_title(text: &str) -> String {
    let mut title: String = text.chars().take(SECTION_TITLE_CHARS).collect();
    if text.chars().count() > SECTION_TITLE_CHARS {
        title.push_str("...");
    }
    title
}

fn round_rank(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;

    fn scored(document: &str, page_number: u32, text: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                document: document.to_string(),
                page_number,
                text: text.to_string(),
            },
            score,
        }
    }

    fn config() -> CollectionConfig {
        CollectionConfig {
            persona: "Analyst".to_string(),
            job: "summarize earnings".to_string(),
        }
    }

    #[test]
    fn short_titles_are_verbatim() {
        assert_eq!(section_title("short text"), "short text");
        let exactly_80 = "y".repeat(80);
        assert_eq!(section_title(&exactly_80), exactly_80);
    }

    #[test]
    fn long_titles_get_an_ellipsis() {
        let text = "z".repeat(81);
        let title = section_title(&text);
        assert_eq!(title.chars().count(), 83);
        assert!(title.ends_with("..."));
        assert!(title.starts_with(&"z".repeat(80)));
    }

    #[test]
    fn title_truncation_counts_characters() {
        let text = "ü".repeat(120);
        let title = section_title(&text);
        assert_eq!(title.chars().count(), 83);
    }

    #[test]
    fn ranks_round_to_four_decimals() {
        assert_eq!(round_rank(0.123_456), 0.1235);
        assert_eq!(round_rank(0.1), 0.1);
        assert_eq!(round_rank(-0.000_06), -0.0001);
    }

    #[test]
    fn views_stay_paired() {
        let ranked = vec![
            scored("b.pdf", 4, &"long passage ".repeat(10), 0.91),
            scored("a.pdf", 1, "short passage", 0.52),
        ];
        let report = assemble_report(
            &config(),
            vec!["a.pdf".to_string(), "b.pdf".to_string()],
            &ranked,
            "2025-01-01 00:00:00".to_string(),
        );
        assert_eq!(report.extracted_sections.len(), 2);
        assert_eq!(
            report.extracted_sections.len(),
            report.subsection_analysis.len()
        );
        for (section, analysis) in report
            .extracted_sections
            .iter()
            .zip(&report.subsection_analysis)
        {
            assert_eq!(section.document, analysis.document);
            assert_eq!(section.page_number, analysis.page_number);
        }
        assert_eq!(report.subsection_analysis[1].refined_text, "short passage");
        assert_eq!(report.metadata.persona, "Analyst");
    }

    #[test]
    fn report_serializes_with_the_expected_field_names() {
        let report = assemble_report(
            &config(),
            vec!["a.pdf".to_string()],
            &[scored("a.pdf", 2, "some passage text", 0.75)],
            "2025-06-30 12:00:00".to_string(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["metadata"]["input_documents"][0], "a.pdf");
        assert_eq!(value["metadata"]["processing_timestamp"], "2025-06-30 12:00:00");
        assert_eq!(value["extracted_sections"][0]["page_number"], 2);
        assert_eq!(value["extracted_sections"][0]["importance_rank"], 0.75);
        assert_eq!(value["subsection_analysis"][0]["refined_text"], "some passage text");
    }
}
