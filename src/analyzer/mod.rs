//! Morphological analysis: the tokenize/extract-phrases capability and the
//! bundled rule-based implementation.

mod rule_based;
mod traits;

pub use rule_based::{AnalyzerOptions, RuleBasedAnalyzer};
pub use traits::{AnalyzedText, MorphologicalAnalyzer};
