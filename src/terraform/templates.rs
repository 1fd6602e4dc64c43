//! Terraform text templates for AWS service quota management.
//!
//! Every function here is pure: it takes plain strings and returns HCL text.
//! Output must stay byte-stable so regenerated files diff cleanly.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("identifier pattern is valid"));

const HEADER_RULE: &str = "# ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

/// Lowercases `raw` and collapses every run of non `[a-z0-9_]` characters
/// into a single underscore.
pub fn sanitize_identifier(raw: &str) -> String {
    NON_WORD.replace_all(&raw.to_lowercase(), "_").into_owned()
}

/// Terraform variable name for a quota, e.g. `ec2_running_on_demand_instances`.
pub fn variable_name(service_code: &str, quota_name: &str) -> String {
    sanitize_identifier(&format!("{service_code}_{quota_name}"))
}

/// A `variable` block for one quota. Ends with a blank line so blocks can be
/// concatenated directly.
pub fn variable_block(service_code: &str, quota_name: &str, quota_code: &str) -> String {
    let name = variable_name(service_code, quota_name);
    format!(
        r#"variable "{name}" {{
  description = "Quota for [{service_code}]: {quota_name} ({quota_code})"
  type        = number
  default     = null
}}

"#
    )
}

/// One `all_quotas` map entry, indented for placement inside the locals block.
pub fn locals_entry(service_code: &str, quota_name: &str, quota_code: &str) -> String {
    let name = variable_name(service_code, quota_name);
    format!(
        r#"    {name} = {{
      quota_code    = "{quota_code}"
      service_code  = "{service_code}"
      desired_quota = var.{name}
    }},
"#
    )
}

/// Wraps concatenated [`locals_entry`] output into a complete `main.tf`.
pub fn main_file(all_quotas: &str) -> String {
    format!(
        r#"{HEADER_RULE}
# CONFIGURE SERVICE QUOTAS
# NOTE: This module is autogenerated. Do not modify it manually.
{HEADER_RULE}

terraform {{
  required_version = ">= 1.0.0"
  required_providers {{
    aws = {{
      source  = "hashicorp/aws"
      version = ">= 3.75.1, < 6.0.0"
    }}
  }}
}}

locals {{
  all_quotas = {{
{all_quotas}
  }}

  adjusted_quotas = {{
    for k, v in local.all_quotas : k => v
    if v.desired_quota != null
  }}
}}

resource "aws_servicequotas_service_quota" "increase_quotas" {{
  for_each = local.adjusted_quotas

  quota_code   = each.value.quota_code
  service_code = each.value.service_code
  value        = each.value.desired_quota
}}

"#
    )
}

/// Wraps concatenated [`variable_block`] output into a complete `variables.tf`.
pub fn variables_file(all_vars: &str) -> String {
    format!(
        r#"{HEADER_RULE}
# INPUT VARIABLES FOR SERVICE QUOTAS
# NOTE: This module is autogenerated. Do not modify it manually.
{HEADER_RULE}

{all_vars}


"#
    )
}
