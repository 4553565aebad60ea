use crate::export::outline::OutlineFormatter;
use crate::mindmap::flatten::flatten;
use crate::mindmap::node::MindmapNode;
use std::fmt;

/// Kind of analysis requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisType {
    /// Short summary of the main themes
    Summary,
    /// Key insights and connections between nodes
    Insights,
    /// Comprehension questions
    Questions,
    /// New ideas to grow the mindmap
    Expand,
    /// Anything else
    General,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 5] = [
        AnalysisType::Summary,
        AnalysisType::Insights,
        AnalysisType::Questions,
        AnalysisType::Expand,
        AnalysisType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Summary => "summary",
            AnalysisType::Insights => "insights",
            AnalysisType::Questions => "questions",
            AnalysisType::Expand => "expand",
            AnalysisType::General => "general",
        }
    }

    /// Closing instruction appended after the outline
    pub fn instruction(&self) -> &'static str {
        match self {
            AnalysisType::Summary => {
                "Provide a short summary (2-3 paragraphs) of the main themes and the structure."
            }
            AnalysisType::Insights => {
                "Find the most important insights and connections between the nodes. \
                 What are the main themes?"
            }
            AnalysisType::Questions => "Create 5-7 comprehension questions based on this mindmap.",
            AnalysisType::Expand => {
                "Suggest 3-5 new ideas or nodes that could be added to enrich the mindmap."
            }
            AnalysisType::General => "Analyze this mindmap and provide useful insights.",
        }
    }
}

/// Unknown names fall back to [`AnalysisType::General`]
impl From<&str> for AnalysisType {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "summary" => AnalysisType::Summary,
            "insights" => AnalysisType::Insights,
            "questions" => AnalysisType::Questions,
            "expand" => AnalysisType::Expand,
            _ => AnalysisType::General,
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the user prompt describing a mindmap to the model
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    formatter: OutlineFormatter,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: use a custom outline style
    pub fn with_formatter(mut self, formatter: OutlineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Build the prompt for one analysis kind
    ///
    /// A missing root still yields a prompt, describing an empty mindmap.
    pub fn build(&self, root: Option<&MindmapNode>, kind: AnalysisType) -> String {
        let records = flatten(root);
        let node_count = records.len();
        let max_depth = records.iter().map(|r| r.depth).max().unwrap_or(0);

        format!(
            "Analyze the following mindmap, which has {} nodes and {} levels of depth.\n\n\
             Mindmap structure:\n{}\n\n{}",
            node_count,
            max_depth,
            self.formatter.format(&records),
            kind.instruction()
        )
    }
}
