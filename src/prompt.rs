//! Review prompt templates and formatting.
//!
//! The historical wrapper variants (pull-request review vs. file-level
//! code-quality review) collapse into one client parameterized by a
//! [`ReviewTemplate`] the caller selects.

/// System instruction for pull-request-level review.
const PR_REVIEW: &str = "As a tech reviewer, provide an in-depth review of the \
following pull request. Carefully analyze the changes and identify any problems \
that need addressing; describe each problem clearly and offer a constructive \
suggestion for how to address it. Also consider ways to optimize the changes. \
Focus on feedback that improves the quality of the codebase while remaining \
concise and clear. Avoid unnecessary explanations or summaries.";

/// System instruction for file-level code-quality review.
const FILE_REVIEW: &str = "As a code-quality reviewer, examine the following \
changes to a single file. Point out defects, fragile patterns, and readability \
problems, each with a concrete suggestion. Judge only what is visible in the \
diff; do not speculate about the rest of the codebase. Keep the feedback \
specific and brief.";

/// Which system instruction the client sends with every call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewTemplate {
    /// In-depth review of a whole pull request.
    PullRequest,
    /// Code-quality review of a single file's changes.
    File,
    /// Caller-supplied system instruction.
    Custom(String),
}

impl ReviewTemplate {
    pub fn system_prompt(&self) -> &str {
        match self {
            ReviewTemplate::PullRequest => PR_REVIEW,
            ReviewTemplate::File => FILE_REVIEW,
            ReviewTemplate::Custom(text) => text,
        }
    }
}

/// One unit of review input: a diff plus whatever metadata the caller has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRequest {
    pub title: String,
    pub body: String,
    pub filename: Option<String>,
    /// Unified diff text, supplied by the caller.
    pub changes: String,
}

/// Format a pull-request-level prompt embedding the diff.
///
/// `title` and `body` ride along on the request for the caller's benefit but
/// are not interpolated into the template.
pub fn pr_prompt(request: &ReviewRequest) -> String {
    format!(
        "Here are the changes for this pull request:\n\nChanges:\n```\n{}\n```\n",
        request.changes
    )
}

/// Format a per-file prompt embedding the filename and diff.
///
/// Always returns the full template, even when the filename is missing.
pub fn file_prompt(request: &ReviewRequest) -> String {
    let filename = request.filename.as_deref().unwrap_or("(unnamed file)");
    format!(
        "Below are the changes for file {}:\n```\n{}\n```\n",
        filename, request.changes
    )
}
