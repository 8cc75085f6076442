use async_trait::async_trait;
use std::collections::HashSet;
use vantage_analysis::{
    Confidence, Impact, RefactoringContext, RefactoringProvider, RefactoringSuggestion, Rule,
    RuleCategory, RuleContext, RuleLanguage, RuleMetadata, RuleViolation, Severity,
};
use vantage_core::{AstNode, AstNodeKind, SourceLocation};

pub const RULE_ID: &str = "js-query-without-conditions";

/// Flags a `GlideRecord.query()` call whose receiver had no preceding
/// `addQuery` call in the same scope.
///
/// The reference implementation this rule replaces flagged every `query()`
/// call unconditionally. Per the stated intent, this one tracks, per
/// receiver identifier, whether `addQuery` was observed earlier in the same
/// scope (a function body resets tracking for its own receivers).
pub struct QueryWithoutConditionsRule {
    metadata: RuleMetadata,
}

impl Default for QueryWithoutConditionsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryWithoutConditionsRule {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata {
                id: RULE_ID.to_string(),
                name: "GlideRecord query without conditions".to_string(),
                description: "Flags a GlideRecord query() call with no preceding addQuery on \
                    the same receiver in scope, which fetches the entire table."
                    .to_string(),
                category: RuleCategory::BestPractice,
                severity: Severity::Medium,
                language: RuleLanguage::Js,
                tags: vec!["glide".to_string(), "servicenow".to_string()],
                documentation: None,
            },
        }
    }
}

fn scan(node: &AstNode, seen: &mut HashSet<String>, rule_id: &str, out: &mut Vec<RuleViolation>) {
    if node.kind.is_function() {
        let mut scope_seen = HashSet::new();
        for child in &node.children {
            scan(child, &mut scope_seen, rule_id, out);
        }
        return;
    }

    if node.kind == AstNodeKind::CallExpression {
        if let Some(callee) = node.children.first() {
            if callee.kind == AstNodeKind::MemberExpression {
                let receiver = callee.children.first().and_then(|n| n.text.clone());
                let property = callee.children.last().and_then(|n| n.text.as_deref());

                if let Some(receiver) = receiver {
                    match property {
                        Some("addQuery") => {
                            seen.insert(receiver);
                        }
                        Some("query") => {
                            if !seen.contains(&receiver) {
                                let loc = node.loc.unwrap_or(SourceLocation::point(1, 0));
                                out.push(
                                    RuleViolation::new(
                                        rule_id,
                                        format!(
                                            "GlideRecord '{receiver}' called query() without a \
                                             preceding addQuery in this scope"
                                        ),
                                        Severity::Medium,
                                        loc.line,
                                        loc.column,
                                    )
                                    .with_end(
                                        loc.end_line.unwrap_or(loc.line),
                                        loc.end_column.unwrap_or(loc.column),
                                    )
                                    .with_node("CallExpression"),
                                );
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    for child in &node.children {
        scan(child, seen, rule_id, out);
    }
}

#[async_trait]
impl Rule for QueryWithoutConditionsRule {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    async fn check(&self, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<RuleViolation>> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();
        scan(&ctx.parse_result.ast, &mut seen, &self.metadata.id, &mut violations);
        Ok(violations)
    }
}

pub struct QueryWithoutConditionsProvider;

#[async_trait]
impl RefactoringProvider for QueryWithoutConditionsProvider {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    async fn generate_suggestions(
        &self,
        ctx: &RefactoringContext<'_>,
    ) -> anyhow::Result<Vec<RefactoringSuggestion>> {
        let _ = ctx;
        Ok(vec![RefactoringSuggestion {
            id: String::new(),
            rule_id: RULE_ID.to_string(),
            title: "Add an addQuery call before query()".to_string(),
            description: "An unconditioned query() fetches every row in the table; add at \
                least one addQuery/addEncodedQuery call first."
                .to_string(),
            transformations: vec![],
            confidence: Confidence::for_score(60),
            confidence_score: 60,
            reasoning: "The right condition depends on business intent, so only the guidance \
                is mechanical here, not the fix itself."
                .to_string(),
            impact: Impact {
                estimated_time: "5m".to_string(),
                description: None,
            },
            preview: Some("+ gr.addQuery('active', true);\n  gr.query();".to_string()),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_analysis::RuleContext;
    use vantage_core::LanguageParser;
    use vantage_parsers::JsParser;

    #[tokio::test]
    async fn flags_only_the_unconditioned_receiver() {
        let source = r#"
            function process() {
                var gr1 = new GlideRecord('incident');
                gr1.addQuery('active', true);
                gr1.query();
                var gr2 = new GlideRecord('problem');
                gr2.query();
            }
        "#;
        let parse_result = JsParser::new().parse(source, "a.js");
        let rule = QueryWithoutConditionsRule::new();
        let options = Default::default();
        let ctx = RuleContext {
            parse_result: &parse_result,
            file_name: "a.js",
            source_code: &parse_result.source_code,
            options: &options,
        };

        let violations = rule.check(&ctx).await.unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("gr2"));
    }

    #[tokio::test]
    async fn does_not_flag_every_query_call_unconditionally() {
        let source = r#"
            function process() {
                var gr = new GlideRecord('incident');
                gr.addQuery('active', true);
                gr.query();
            }
        "#;
        let parse_result = JsParser::new().parse(source, "a.js");
        let rule = QueryWithoutConditionsRule::new();
        let options = Default::default();
        let ctx = RuleContext {
            parse_result: &parse_result,
            file_name: "a.js",
            source_code: &parse_result.source_code,
            options: &options,
        };

        let violations = rule.check(&ctx).await.unwrap();
        assert!(violations.is_empty());
    }
}
