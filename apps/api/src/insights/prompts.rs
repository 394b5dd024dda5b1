// Insight prompt templates. Replace `{spec_text}` and `{cv_text}` before sending.

use crate::insights::types::InsightType;

pub const MOCK_INTERVIEW_PROMPT_TEMPLATE: &str = "Create a thoughtful, probable mock job interview \
dialogue between an interviewer and interviewee based on this job specification - {spec_text} \
and this applicant's resume - {cv_text} that the reader can use to practice for their upcoming \
job interview.";

pub const SUITABILITY_PROMPT_TEMPLATE: &str = "Evaluate the suitability of this applicant based on \
this job specification - {spec_text} and this applicant's resume - {cv_text}. Provide detailed \
feedback.";

pub const TIPS_PROMPT_TEMPLATE: &str = "Provide tips and advice for this applicant based on this \
job specification - {spec_text} and this applicant's resume - {cv_text}.";

pub fn template_for(insight_type: InsightType) -> &'static str {
    match insight_type {
        InsightType::MockInterview => MOCK_INTERVIEW_PROMPT_TEMPLATE,
        InsightType::Suitability => SUITABILITY_PROMPT_TEMPLATE,
        InsightType::Tips => TIPS_PROMPT_TEMPLATE,
    }
}

/// Fills the template for `insight_type`. Pure: same inputs, same prompt.
///
/// Both placeholders are located in the template before substitution, so
/// document text that happens to contain `{cv_text}` is copied verbatim.
pub fn build_prompt(spec_text: &str, cv_text: &str, insight_type: InsightType) -> String {
    let template = template_for(insight_type);
    let mut prompt = String::with_capacity(template.len() + spec_text.len() + cv_text.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let (head, tail) = rest.split_at(start);
        prompt.push_str(head);
        if let Some(after) = tail.strip_prefix("{spec_text}") {
            prompt.push_str(spec_text);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{cv_text}") {
            prompt.push_str(cv_text);
            rest = after;
        } else {
            prompt.push('{');
            rest = &tail[1..];
        }
    }
    prompt.push_str(rest);
    prompt
}
