use serde::{Deserialize, Serialize};

use crate::terraform::templates;

/// One AWS service quota: `(service_code, quota_name, quota_code)`.
///
/// Deserializes both snake_case catalogs and the PascalCase shape returned by
/// `aws service-quotas list-service-quotas`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QuotaDefinition {
    #[serde(alias = "ServiceCode")]
    pub service_code: String,
    #[serde(alias = "QuotaName")]
    pub quota_name: String,
    #[serde(alias = "QuotaCode")]
    pub quota_code: String,
}

impl QuotaDefinition {
    pub fn new(
        service_code: impl Into<String>,
        quota_name: impl Into<String>,
        quota_code: impl Into<String>,
    ) -> Self {
        Self {
            service_code: service_code.into(),
            quota_name: quota_name.into(),
            quota_code: quota_code.into(),
        }
    }

    pub fn variable_name(&self) -> String {
        templates::variable_name(&self.service_code, &self.quota_name)
    }

    pub fn render_variable(&self) -> String {
        templates::variable_block(&self.service_code, &self.quota_name, &self.quota_code)
    }

    pub fn render_local(&self) -> String {
        templates::locals_entry(&self.service_code, &self.quota_name, &self.quota_code)
    }
}

/// An ordered list of quota definitions loaded from one or more sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaCatalog {
    #[serde(alias = "Quotas", default)]
    pub quotas: Vec<QuotaDefinition>,
}

impl QuotaCatalog {
    pub fn new(quotas: Vec<QuotaDefinition>) -> Self {
        Self { quotas }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn merge(&mut self, other: QuotaCatalog) {
        self.quotas.extend(other.quotas);
    }

    /// Keeps only quotas whose service code is listed. An empty filter keeps all.
    pub fn retain_services(&mut self, services: &[String]) {
        if services.is_empty() {
            return;
        }
        self.quotas
            .retain(|q| services.iter().any(|s| s == &q.service_code));
    }

    pub fn sort(&mut self) {
        self.quotas.sort();
    }

    pub fn services(&self) -> Vec<&str> {
        let mut services: Vec<&str> = self
            .quotas
            .iter()
            .map(|q| q.service_code.as_str())
            .collect();
        services.sort_unstable();
        services.dedup();
        services
    }

    pub fn len(&self) -> usize {
        self.quotas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuotaCatalog {
        QuotaCatalog::new(vec![
            QuotaDefinition::new("lambda", "Concurrent executions", "L-B99A9384"),
            QuotaDefinition::new("ec2", "Running On-Demand Standard instances", "L-1216C47A"),
            QuotaDefinition::new("ec2", "EC2-VPC Elastic IPs", "L-0263D0A3"),
        ])
    }

    #[test]
    fn test_quota_deserialization_snake_case() {
        let json = r#"{
            "service_code": "ec2",
            "quota_name": "Running On-Demand Instances",
            "quota_code": "L-1216C47A"
        }"#;
        let quota: QuotaDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(quota.service_code, "ec2");
        assert_eq!(quota.quota_name, "Running On-Demand Instances");
        assert_eq!(quota.quota_code, "L-1216C47A");
    }

    #[test]
    fn test_catalog_from_aws_cli_output() {
        let json = r#"{
            "Quotas": [
                {
                    "ServiceCode": "ec2",
                    "ServiceName": "Amazon Elastic Compute Cloud (Amazon EC2)",
                    "QuotaArn": "arn:aws:servicequotas:us-east-1:123456789012:ec2/L-1216C47A",
                    "QuotaCode": "L-1216C47A",
                    "QuotaName": "Running On-Demand Standard (A, C, D, H, I, M, R, T, Z) instances",
                    "Value": 5.0,
                    "Unit": "None",
                    "Adjustable": true,
                    "GlobalQuota": false
                }
            ],
            "NextToken": null
        }"#;
        let catalog = QuotaCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.quotas[0].service_code, "ec2");
        assert_eq!(catalog.quotas[0].quota_code, "L-1216C47A");
    }

    #[test]
    fn test_catalog_serializes_snake_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"quotas\""));
        assert!(json.contains("\"service_code\""));
        assert!(!json.contains("ServiceCode"));
    }

    #[test]
    fn test_catalog_missing_quotas_is_empty() {
        let catalog = QuotaCatalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_retain_services() {
        let mut catalog = sample();
        catalog.retain_services(&["ec2".to_string()]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.quotas.iter().all(|q| q.service_code == "ec2"));
    }

    #[test]
    fn test_retain_services_empty_filter_keeps_all() {
        let mut catalog = sample();
        catalog.retain_services(&[]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_sort_orders_by_service_then_name() {
        let mut catalog = sample();
        catalog.sort();
        let names: Vec<&str> = catalog.quotas.iter().map(|q| q.quota_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "EC2-VPC Elastic IPs",
                "Running On-Demand Standard instances",
                "Concurrent executions",
            ]
        );
    }

    #[test]
    fn test_services_sorted_and_distinct() {
        assert_eq!(sample().services(), vec!["ec2", "lambda"]);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut catalog = sample();
        catalog.merge(QuotaCatalog::new(vec![QuotaDefinition::new(
            "s3",
            "Buckets",
            "L-DC2B2D3D",
        )]));
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.quotas[3].service_code, "s3");
    }

    #[test]
    fn test_definition_delegates_to_templates() {
        let quota = QuotaDefinition::new("ec2", "Running On-Demand Instances", "L-1216C47A");
        assert_eq!(quota.variable_name(), "ec2_running_on_demand_instances");
        assert!(quota.render_variable().contains("(L-1216C47A)"));
        assert!(
            quota
                .render_local()
                .contains("desired_quota = var.ec2_running_on_demand_instances")
        );
    }
}
