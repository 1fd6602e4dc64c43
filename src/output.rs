//! Human-facing renderings of a quota catalog.

use std::collections::BTreeMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::quota::QuotaDefinition;

#[derive(Tabled)]
struct QuotaRow<'a> {
    #[tabled(rename = "Service")]
    service: &'a str,
    #[tabled(rename = "Quota Name")]
    quota_name: &'a str,
    #[tabled(rename = "Quota Code")]
    quota_code: &'a str,
    #[tabled(rename = "Variable")]
    variable: String,
}

pub fn render_table(quotas: &[QuotaDefinition]) -> String {
    let rows = quotas.iter().map(|q| QuotaRow {
        service: &q.service_code,
        quota_name: &q.quota_name,
        quota_code: &q.quota_code,
        variable: q.variable_name(),
    });
    Table::new(rows).with(Style::sharp()).to_string()
}

/// `quotas` root, one branch per service (sorted), one leaf per quota.
pub fn render_tree(quotas: &[QuotaDefinition]) -> String {
    let mut by_service: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for quota in quotas {
        by_service
            .entry(quota.service_code.as_str())
            .or_default()
            .push(format!("{} ({})", quota.quota_name, quota.quota_code));
    }

    let tree = Tree::new("quotas".to_string()).with_leaves(
        by_service
            .into_iter()
            .map(|(service, leaves)| Tree::new(service.to_string()).with_leaves(leaves)),
    );
    tree.to_string()
}

pub fn render_json(quotas: &[QuotaDefinition]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(quotas)
}
