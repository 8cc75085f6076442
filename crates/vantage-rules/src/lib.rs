//! The built-in rule/provider catalog: reference implementations of the
//! extension points `vantage-analysis` defines. None of this is part of the
//! core — it exists to make the workspace runnable and testable end to end.

pub mod glide_nested_query;
pub mod query_without_conditions;
pub mod ts_no_any;

use std::sync::Arc;
use vantage_analysis::{RefactorRegistry, RuleRegistry};

/// Registers every catalog rule and its matching refactoring provider.
/// Called once from `vantage-server::main` at startup; tests register only
/// the rule(s) they need directly against a fresh registry instead.
pub async fn register_all(rules: &Arc<RuleRegistry>, providers: &Arc<RefactorRegistry>) {
    rules
        .register_rule(Arc::new(glide_nested_query::GlideNestedQueryRule::new()))
        .await;
    providers
        .register_provider(Arc::new(glide_nested_query::GlideNestedQueryProvider))
        .await;

    rules
        .register_rule(Arc::new(
            query_without_conditions::QueryWithoutConditionsRule::new(),
        ))
        .await;
    providers
        .register_provider(Arc::new(
            query_without_conditions::QueryWithoutConditionsProvider,
        ))
        .await;

    rules.register_rule(Arc::new(ts_no_any::TsNoAnyRule::new())).await;
    providers
        .register_provider(Arc::new(ts_no_any::TsNoAnyProvider))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_all_installs_three_rules_and_providers() {
        let rules = Arc::new(RuleRegistry::new());
        let providers = Arc::new(RefactorRegistry::new());
        register_all(&rules, &providers).await;

        assert_eq!(rules.len().await, 3);
        assert!(providers.get_provider(glide_nested_query::RULE_ID).await.is_some());
        assert!(providers
            .get_provider(query_without_conditions::RULE_ID)
            .await
            .is_some());
        assert!(providers.get_provider(ts_no_any::RULE_ID).await.is_some());
    }
}
