use async_trait::async_trait;
use vantage_analysis::{
    CodeTransformation, Confidence, Impact, RefactoringContext, RefactoringProvider,
    RefactoringSuggestion, Rule, RuleCategory, RuleContext, RuleLanguage, RuleMetadata,
    RuleViolation, Severity,
};
use vantage_core::SourceLocation;
use vantage_parsers::find_any_type_annotations;

pub const RULE_ID: &str = "ts-no-any";

/// Flags every `: any` type annotation — parameter, return type, or
/// variable declaration — in a TS source file.
pub struct TsNoAnyRule {
    metadata: RuleMetadata,
}

impl Default for TsNoAnyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TsNoAnyRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata {
                id: RULE_ID.to_string(),
                name: "No any".to_string(),
                description: "Disallows the 'any' type, which defeats the purpose of static \
                    typing."
                    .to_string(),
                category: RuleCategory::Maintainability,
                severity: Severity::Medium,
                language: RuleLanguage::Ts,
                tags: vec!["typescript".to_string(), "types".to_string()],
                documentation: None,
            },
        }
    }
}

#[async_trait]
impl Rule for TsNoAnyRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<RuleViolation>> {
        let annotations = find_any_type_annotations(&ctx.parse_result.ast);

        Ok(annotations
            .into_iter()
            .map(|node| {
                let loc = node.loc.unwrap_or(SourceLocation::point(1, 0));
                RuleViolation::new(
                    self.metadata.id.clone(),
                    "Avoid 'any'; prefer a specific type or 'unknown'".to_string(),
                    self.metadata.severity,
                    loc.line,
                    loc.column,
                )
                .with_end(loc.end_line.unwrap_or(loc.line), loc.end_column.unwrap_or(loc.column))
                .with_node("predefined_type")
            })
            .collect())
    }
}

pub struct TsNoAnyProvider;

#[async_trait]
impl RefactoringProvider for TsNoAnyProvider {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    async fn generate_suggestions(
        &self,
        ctx: &RefactoringContext<'_>,
    ) -> anyhow::Result<Vec<RefactoringSuggestion>> {
        let violation = ctx.violation;
        let end_line = violation.end_line.unwrap_or(violation.line);
        let end_column = violation.end_column.unwrap_or(violation.column + 3);

        Ok(vec![
            RefactoringSuggestion {
                id: String::new(),
                rule_id: RULE_ID.to_string(),
                title: "Replace any with unknown".to_string(),
                description: "`unknown` keeps the compiler's narrowing checks instead of \
                    opting out of type safety entirely."
                    .to_string(),
                transformations: vec![CodeTransformation::replace(
                    violation.line,
                    violation.column,
                    end_line,
                    end_column,
                    "unknown",
                    "replace any with unknown",
                )],
                confidence: Confidence::for_score(85),
                confidence_score: 85,
                reasoning: "A mechanical swap; call sites will need a type guard or assertion \
                    before narrowing, which the compiler will now enforce."
                    .to_string(),
                impact: Impact {
                    estimated_time: "2m".to_string(),
                    description: None,
                },
                preview: Some("- any\n+ unknown".to_string()),
            },
            RefactoringSuggestion {
                id: String::new(),
                rule_id: RULE_ID.to_string(),
                title: "Create specific interface".to_string(),
                description: "Define an interface or type alias describing the value's \
                    actual shape instead of widening to 'any' or 'unknown'."
                    .to_string(),
                transformations: vec![],
                confidence: Confidence::for_score(70),
                confidence_score: 70,
                reasoning: "Requires inspecting call sites to determine the real shape; not \
                    mechanically derivable from this violation alone."
                    .to_string(),
                impact: Impact {
                    estimated_time: "15m".to_string(),
                    description: Some("Needs a human to name the shape.".to_string()),
                },
                preview: None,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_analysis::RuleContext;
    use vantage_core::LanguageParser;
    use vantage_parsers::TsParser;

    const SOURCE: &str = "function t(d: any): any { return d; }";

    #[tokio::test]
    async fn flags_one_violation_per_any_occurrence() {
        let parse_result = TsParser::new().parse(SOURCE, "a.ts");
        let rule = TsNoAnyRule::new();
        let options = Default::default();
        let ctx = RuleContext {
            parse_result: &parse_result,
            file_name: "a.ts",
            source_code: &parse_result.source_code,
            options: &options,
        };

        let violations = rule.check(&ctx).await.unwrap();
        assert_eq!(violations.len(), 2);
    }

    #[tokio::test]
    async fn provider_emits_replace_and_interface_suggestions() {
        let parse_result = TsParser::new().parse(SOURCE, "a.ts");
        let violation = RuleViolation::new(RULE_ID, "msg", Severity::Medium, 1, 14).with_end(1, 17);
        let ctx = RefactoringContext {
            parse_result: &parse_result,
            violation: &violation,
            file_name: "a.ts",
            source_code: &parse_result.source_code,
        };

        let suggestions = TsNoAnyProvider.generate_suggestions(&ctx).await.unwrap();
        assert!(suggestions
            .iter()
            .any(|s| s.title == "Replace any with unknown" && s.confidence_score == 85));
        assert!(suggestions
            .iter()
            .any(|s| s.title == "Create specific interface" && s.confidence_score == 70));
    }
}
