// All LLM prompt templates for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Resume rewrite prompt. Replace: {job_description}, {resume_text}, {rationale_instruction}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and resume writer.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

TASK:
Rewrite the resume to perfectly tailor it to the Job Description.
Crucial requirement: You must highlight changes.
- Wrap ANY new or modified text in <ins> tags (e.g. <ins>New Skill</ins>).
- Wrap removed text in <del> tags (e.g. <del>Old Irrelevant Skill</del>).
- Keep the formatting clean and professional using Markdown.
- Use `###` for Section Headers (e.g. ### Experience).
- Use `**` for Bold text (e.g. **Role**).
- Use `- ` for Bullet points.
- Output ONLY the body of the resume text.
- Example format:
  ### Experience
  **Software Engineer** - Google
  - <ins>Led team...</ins>

{rationale_instruction} Explain why you made specific changes, added certain keywords, or removed sections."#;

/// Cover letter prompt. Replace: {job_description}, {resume_text}, {cover_letter_text}, {rationale_instruction}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are an expert career coach.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

OLD COVER LETTER:
{cover_letter_text}

TASK:
Write a customized cover letter for this specific job.
- Highlight specific experiences from the resume that match the job requirements.
- Use a professional yet enticing tone.
- Structure it properly (Header, Salutation, Body, Closing).

{rationale_instruction} Explain how you connected the resume to the JD and why you chose this structure."#;

/// Interview research notes prompt. Replace: {job_description}, {factual_instruction}, {rationale_instruction}
pub const NOTES_PROMPT_TEMPLATE: &str = r#"You are a thorough job interview researcher.

JOB DESCRIPTION:
{job_description}

TASK:
Analyze the JD and use your internal knowledge to provide a prep document.
{factual_instruction}

SECTIONS REQUIRED:
1. Main Job Responsibilities (Summarized from JD)
2. Company Size and Founding Year
3. Key Products/Services
4. Target Customers
5. Main Competitors
6. General Reviews/Reputation (if known widely)
7. Hiring Manager / Team Info (if found in JD)
8. Company Website Link (Find based on company name, e.g. https://www.company.com)
9. Company LinkedIn Page (Find based on company name, e.g. https://www.linkedin.com/company/company-name)

{rationale_instruction} Explain how you extracted or inferred this information."#;

/// Company/role extraction prompt. Replace: {job_description}
pub const METADATA_PROMPT_TEMPLATE: &str = r#"JOB DESCRIPTION:
{job_description}

TASK:
Extract the COMPANY NAME and the JOB TITLE from the text above.
Return ONLY a JSON object with keys "company" and "role".
If not found, use "UnknownCompany" and "UnknownRole".
Example: {"company": "Google", "role": "Software Engineer"}"#;

/// Expands `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing a
/// placeholder lands verbatim. Braces that do not name a known key stay literal.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_substitutes_known_keys() {
        let filled = fill_template("Dear {name}, re: {role}.", &[("name", "Ada"), ("role", "SRE")]);
        assert_eq!(filled, "Dear Ada, re: SRE.");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "JD: {job_description}\nCV: {resume_text}",
            &[("job_description", "mention {resume_text} here"), ("resume_text", "CV body")],
        );
        assert_eq!(filled, "JD: mention {resume_text} here\nCV: CV body");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let filled = fill_template(r#"{"company": "X"} {missing} {job_description"#, &[("job_description", "jd")]);
        assert_eq!(filled, r#"{"company": "X"} {missing} {job_description"#);
    }

    #[test]
    fn test_metadata_template_keeps_json_example() {
        let filled = fill_template(METADATA_PROMPT_TEMPLATE, &[("job_description", "Rust at Acme")]);
        assert!(filled.contains("Rust at Acme"));
        assert!(filled.contains(r#"{"company": "Google""#));
        assert!(!filled.contains("{job_description}"));
    }
}
