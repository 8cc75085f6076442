//! The rule engine, refactoring engine, transformation executor, and
//! analysis coordinator — the hard engineering of the workspace.

pub mod coordinator;
pub mod id;
pub mod refactor;
pub mod refactor_engine;
pub mod result;
pub mod rule;
pub mod rule_engine;
pub mod severity;
pub mod transform;

pub use coordinator::AnalysisCoordinator;
pub use id::IdGenerator;
pub use refactor::{
    CodeTransformation, Confidence, Impact, RefactoringContext, RefactoringProvider,
    RefactoringSuggestion, TransformationKind,
};
pub use refactor_engine::{AppliedRefactoring, RefactorEngine, RefactorRegistry, RefactoringResult};
pub use result::{AnalysisMetadata, AnalysisResult, AnalysisStats, SuggestionView};
pub use rule::{Rule, RuleConfig, RuleContext, RuleExecutionResult, RuleMetadata, RuleViolation};
pub use rule_engine::{violations_to_issues, Issue, RuleEngine, RuleEngineResult, RuleRegistry};
pub use severity::{RuleCategory, RuleLanguage, Severity};
pub use transform::{apply_transformations, TransformError};
