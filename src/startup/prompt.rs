//! Prompt rendering. User text goes in verbatim: no escaping, and because the
//! templates are compile-time `format!` strings, placeholder-looking input is
//! never expanded a second time.

use super::request::{FaqRequest, ValidationRequest};
use crate::providers::SamplingOptions;

pub const VALIDATION_SAMPLING: SamplingOptions = SamplingOptions::new(1024);
pub const FAQ_SAMPLING: SamplingOptions = SamplingOptions::new(1000);

pub fn render_validation(req: &ValidationRequest) -> String {
    format!(
        "You are an expert startup validator and business analyst. Your task is to evaluate the following startup idea comprehensively.

Startup Name: {name}
Description: {description}
Target Market: {market}
Business Model: {model}
Competitive Advantage: {advantage}

Please provide a detailed assessment structured as follows, using Markdown for clear formatting:

**Startup Rating:** [X/10] - Provide a concise justification for this rating, highlighting key strengths and weaknesses.
**Sentiment Analysis:** [Overall sentiment of the idea's viability, e.g., 'Highly Positive', 'Positive', 'Neutral', 'Slightly Negative', 'Negative'] - Explain the reasons behind this sentiment based on the provided details, considering market trends and potential.
**Suggestions for Improvement:**
* Suggestion 1: Explain how this improves the idea, focusing on market fit, scalability, technical feasibility, or execution strategy.
* Suggestion 2: Another actionable suggestion with explanation.
* Suggestion 3: A third practical suggestion (if applicable).
**Relevant Ideas & References:**
* Idea 1 Name: Brief description of a similar, complementary, or adjacent business idea. (If relevant, include a real or hypothetical URL reference, e.g., 'https://www.example.com/related_project')
* Idea 2 Name: Brief description. (If relevant, include a real or hypothetical URL reference)
* Idea 3 Name: Brief description. (If relevant, include a real or hypothetical URL reference)
",
        name = req.startup_name,
        description = req.description,
        market = req.target_market,
        model = req.business_model,
        advantage = req.competitive_advantage,
    )
}

pub fn render_faq(req: &FaqRequest) -> String {
    format!(
        "You are an expert AI assistant specializing in creating comprehensive Frequently Asked Questions (FAQ) sections for new startups.
Your goal is to anticipate common questions potential customers, investors, or users might have about the startup.

Startup Name: {name}
Startup Description: {description}

Generate a list of 5-8 common and insightful FAQs with concise answers.
Format your response clearly using Markdown, with each question as a bold heading and the answer following directly.

Example Format:
**Q: What is [Startup Name]?**
A: [Concise answer about what it does and its core value proposition.]

**Q: How does [Startup Name] work?**
A: [Explanation of the basic mechanics or user flow.]

--- Start Generating FAQs ---
",
        name = req.startup_name,
        description = req.startup_description,
    )
}
