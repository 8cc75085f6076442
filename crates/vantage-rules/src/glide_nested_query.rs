use async_trait::async_trait;
use vantage_analysis::{
    Confidence, Impact, RefactoringContext, RefactoringProvider, RefactoringSuggestion, Rule,
    RuleCategory, RuleContext, RuleLanguage, RuleMetadata, RuleViolation, Severity,
};
use vantage_core::{AstNodeKind, SourceLocation};

pub const RULE_ID: &str = "glide-nested-query";

/// Flags a `GlideRecord.query()` call nested inside the body of another
/// `GlideRecord`'s `while (gr.next())` loop — a ServiceNow anti-pattern that
/// usually wants a `GlideAggregate` or a single encoded query instead.
pub struct GlideNestedQueryRule {
    metadata: RuleMetadata,
}

impl Default for GlideNestedQueryRule {
    fn default() -> Self {
        Self::new()
    }
}

impl GlideNestedQueryRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata {
                id: RULE_ID.to_string(),
                name: "No nested GlideRecord query".to_string(),
                description:
                    "Flags a GlideRecord query() issued inside the body of another \
                     GlideRecord's next()-driven loop."
                        .to_string(),
                category: RuleCategory::Performance,
                severity: Severity::High,
                language: RuleLanguage::Js,
                tags: vec!["glide".to_string(), "servicenow".to_string()],
                documentation: None,
            },
        }
    }
}

#[async_trait]
impl Rule for GlideNestedQueryRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<RuleViolation>> {
        let mut violations = Vec::new();

        for loop_node in ctx.parse_result.ast.find_loops() {
            if loop_node.kind != AstNodeKind::WhileStatement {
                continue;
            }
            let Some(condition) = loop_node.children.first() else {
                continue;
            };
            if condition.find_calls_by_callee_name("next").is_empty() {
                continue;
            }
            let Some(body) = loop_node.children.get(1) else {
                continue;
            };

            for query_call in body.find_calls_by_callee_name("query") {
                let loc = query_call.loc.unwrap_or(SourceLocation::point(1, 0));
                violations.push(
                    RuleViolation::new(
                        self.metadata.id.clone(),
                        "GlideRecord query() executed inside a next()-driven loop; \
                         prefer GlideAggregate or a single encoded query"
                            .to_string(),
                        self.metadata.severity,
                        loc.line,
                        loc.column,
                    )
                    .with_end(loc.end_line.unwrap_or(loc.line), loc.end_column.unwrap_or(loc.column))
                    .with_node("CallExpression"),
                );
            }
        }

        Ok(violations)
    }
}

pub struct GlideNestedQueryProvider;

#[async_trait]
impl RefactoringProvider for GlideNestedQueryProvider {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    async fn generate_suggestions(
        &self,
        ctx: &RefactoringContext<'_>,
    ) -> anyhow::Result<Vec<RefactoringSuggestion>> {
        let _ = ctx;
        Ok(vec![
            RefactoringSuggestion {
                id: String::new(),
                rule_id: RULE_ID.to_string(),
                title: "Use GlideAggregate instead of nested query".to_string(),
                description: "Replace the inner GlideRecord with a GlideAggregate to let \
                    the database do the counting/grouping instead of iterating row by row."
                    .to_string(),
                transformations: vec![],
                confidence: Confidence::for_score(65),
                confidence_score: 65,
                reasoning: "GlideAggregate avoids re-querying the table once per outer row, \
                    but requires recasting the inner loop's logic as an aggregation."
                    .to_string(),
                impact: Impact {
                    estimated_time: "20m".to_string(),
                    description: Some("Requires re-expressing the inner logic as a query.".to_string()),
                },
                preview: Some(
                    "- gr2.query(); while (gr2.next()) { ... }\n\
                     + var agg = new GlideAggregate('problem'); agg.addAggregate('COUNT'); agg.query();"
                        .to_string(),
                ),
            },
            RefactoringSuggestion {
                id: String::new(),
                rule_id: RULE_ID.to_string(),
                title: "Combine into a single encoded query".to_string(),
                description: "Fold the outer loop's filter into the inner GlideRecord's \
                    encoded query so only one query() call runs per outer row is avoided \
                    entirely."
                    .to_string(),
                transformations: vec![],
                confidence: Confidence::for_score(85),
                confidence_score: 85,
                reasoning: "A single encoded query with a join-style condition removes the \
                    nested query altogether."
                    .to_string(),
                impact: Impact {
                    estimated_time: "10m".to_string(),
                    description: None,
                },
                preview: Some(
                    "- gr2.addQuery('incident', gr1.sys_id); gr2.query();\n\
                     + gr2.addEncodedQuery('incident=' + gr1.sys_id); gr2.query();"
                        .to_string(),
                ),
            },
        ])
    }
}
