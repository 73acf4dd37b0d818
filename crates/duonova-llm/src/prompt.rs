//! Prompts for resume extraction

use duonova_domain::FileType;

/// What the model is looking at
#[derive(Debug, Clone, PartialEq)]
enum Source {
    Document(FileType),
    Text(String),
}

/// Builds extraction prompts
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    source: Source,
}

impl PromptBuilder {
    /// Prompt to accompany an attached document
    pub fn for_document(file_type: FileType) -> Self {
        Self {
            source: Source::Document(file_type),
        }
    }

    /// Prompt that embeds resume text
    pub fn for_text(text: impl Into<String>) -> Self {
        Self {
            source: Source::Text(text.into()),
        }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role and task
        prompt.push_str(PARSER_ROLE);
        prompt.push_str("\n\n");

        // 2. Source-specific guidance
        match &self.source {
            Source::Document(file_type) => {
                prompt.push_str(&format!(
                    "The attached {} document is the complete resume.\n",
                    file_type.as_str().to_uppercase()
                ));
                prompt.push_str(DOCUMENT_GUIDANCE);
            }
            Source::Text(_) => prompt.push_str(TEXT_GUIDANCE),
        }
        prompt.push_str("\n\n");

        // 3. Output schema
        prompt.push_str("Required JSON output structure:\n");
        prompt.push_str(RESUME_SCHEMA);
        prompt.push_str("\n\n");

        // 4. The text to analyze
        if let Source::Text(text) = &self.source {
            prompt.push_str("Resume text:\n");
            prompt.push_str("---\n");
            prompt.push_str(text);
            prompt.push_str("\n---\n\n");
        }

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const PARSER_ROLE: &str = "You are an expert ATS (Applicant Tracking System) resume parser. \
Extract every piece of information available in the resume with maximum completeness and accuracy.";

const DOCUMENT_GUIDANCE: &str = r#"Use the full document structure:
- Read headers, footers, sidebars and every column
- Attach each link to the section or role it belongs to
- Keep achievements with the role they were earned in
- Handle tables, two-column layouts and unusual formatting"#;

const TEXT_GUIDANCE: &str = r#"The text was extracted locally and may have lost its layout:
- Section headings start on their own line
- Links appear inline as "(https://...)" next to the text they belong to
- Infer sections from context when headings are missing"#;

const RESUME_SCHEMA: &str = r#"{
  "personal_info": {
    "name": "full name",
    "email": "primary email address",
    "phone": "phone number with country code if available",
    "address": "city, state/country",
    "linkedin": "LinkedIn profile URL",
    "github": "GitHub profile URL",
    "portfolio": "personal website URL",
    "other_links": ["other professional links"]
  },
  "professional_summary": "summary or objective",
  "skills": {
    "technical_skills": [],
    "soft_skills": [],
    "programming_languages": [],
    "frameworks": [],
    "tools": [],
    "databases": [],
    "certifications": []
  },
  "experience": [
    {
      "company": "company name",
      "position": "exact job title",
      "location": "city, state/country",
      "start_date": "YYYY-MM",
      "end_date": "YYYY-MM or Present",
      "duration": "calculated duration",
      "description": "role description",
      "achievements": ["quantified achievements"],
      "technologies": ["technologies used in this role"],
      "responsibilities": ["key responsibilities"]
    }
  ],
  "education": [
    {
      "institution": "university or college",
      "degree": "degree and field",
      "location": "city, state/country",
      "graduation_date": "YYYY-MM",
      "gpa": "GPA if mentioned",
      "relevant_coursework": [],
      "honors": [],
      "thesis": "thesis title if applicable"
    }
  ],
  "projects": [
    {
      "name": "project name",
      "description": "what it does",
      "technologies": [],
      "url": "project link",
      "duration": "timeline",
      "role": "role on the project",
      "outcomes": ["quantified results"]
    }
  ],
  "achievements": ["awards, recognitions, publications"],
  "languages": [{"language": "name", "proficiency": "level"}]
}"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Return ONLY valid JSON matching the structure above, no markdown code blocks, no explanations.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_prompt_embeds_text() {
        let prompt = PromptBuilder::for_text("Jane Doe\nRust engineer").build();
        assert!(prompt.contains("Resume text:"));
        assert!(prompt.contains("Jane Doe\nRust engineer"));
        assert!(prompt.contains("\"personal_info\""));
        assert!(prompt.ends_with("no explanations."));
    }

    #[test]
    fn test_document_prompt_names_type() {
        let prompt = PromptBuilder::for_document(FileType::Pdf).build();
        assert!(prompt.contains("attached PDF document"));
        assert!(!prompt.contains("Resume text:"));
    }
}
