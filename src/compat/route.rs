//! Route source translation.
//!
//! A legacy connection manager names its route table in exactly one of two
//! ways: an `rds` block referencing an out-of-band, asynchronously updated
//! table, or a `route_config` block embedding the table inline. The
//! orchestrator enforces the mutual exclusion; this module translates
//! whichever block is present.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::document::Object;
use crate::errors::{Error, Result};

/// Where the connection manager's route table comes from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteSource {
    /// Dynamic discovery reference to an out-of-band route table.
    Rds(RdsConfig),
    /// Route table embedded inline in the document.
    Inline(RouteTableConfig),
    /// No route source configured.
    #[default]
    None,
}

/// Canonical dynamic route discovery reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdsConfig {
    /// Management cluster serving the route table.
    pub cluster: String,
    pub route_config_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_delay: Option<Duration>,
}

/// Canonical inline route table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTableConfig {
    pub virtual_hosts: Vec<VirtualHostConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_clusters: Option<bool>,
}

/// One virtual host in an inline route table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualHostConfig {
    pub name: String,
    pub domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_ssl: Option<SslRequirement>,
    pub routes: Vec<RouteRule>,
}

/// TLS requirement for a virtual host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SslRequirement {
    All,
    ExternalOnly,
}

impl SslRequirement {
    fn from_token(field: &str, token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "external_only" => Ok(Self::ExternalOnly),
            _ => Err(Error::unknown_enum_value(field, token)),
        }
    }
}

/// One routing rule: how to match a request and where to send it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRule {
    pub matcher: RouteMatch,
    pub action: RouteAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_rewrite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_rewrite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

/// Request match criterion; exactly one form per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMatch {
    Prefix(String),
    Path(String),
}

/// Forwarding target; exactly one form per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAction {
    Cluster(String),
    ClusterHeader(String),
}

/// Translate a legacy `rds` block.
pub fn translate_rds(config: &Object<'_>) -> Result<RdsConfig> {
    let cluster = config.get_str("cluster")?.to_string();
    let route_config_name = config.get_str("route_config_name")?.to_string();
    let refresh_delay = optional_millis(config, "refresh_delay_ms")?;

    Ok(RdsConfig { cluster, route_config_name, refresh_delay })
}

/// Translate a legacy inline `route_config` block.
pub fn translate_route_table(config: &Object<'_>) -> Result<RouteTableConfig> {
    let hosts = config.get_object_array("virtual_hosts")?;
    if hosts.is_empty() {
        return Err(Error::type_mismatch(
            config.scope("virtual_hosts"),
            "non-empty array of virtual hosts",
        ));
    }

    let virtual_hosts =
        hosts.iter().map(translate_virtual_host).collect::<Result<Vec<_>>>()?;
    let validate_clusters = config.get_bool_opt("validate_clusters")?;

    Ok(RouteTableConfig { virtual_hosts, validate_clusters })
}

fn translate_virtual_host(config: &Object<'_>) -> Result<VirtualHostConfig> {
    let name = config.get_str("name")?.to_string();

    if !config.has("domains") {
        return Err(Error::missing_field(config.scope("domains")));
    }
    let domains = config.get_string_array_or_empty("domains")?;
    if domains.is_empty() {
        return Err(Error::type_mismatch(
            config.scope("domains"),
            "non-empty array of domain strings",
        ));
    }

    let require_ssl = match config.get_str_opt("require_ssl")? {
        Some(token) => Some(SslRequirement::from_token(&config.scope("require_ssl"), token)?),
        None => None,
    };

    let routes = config
        .get_object_array("routes")?
        .iter()
        .map(translate_route_rule)
        .collect::<Result<Vec<_>>>()?;

    Ok(VirtualHostConfig { name, domains, require_ssl, routes })
}

fn translate_route_rule(config: &Object<'_>) -> Result<RouteRule> {
    let matcher = match (config.get_str_opt("prefix")?, config.get_str_opt("path")?) {
        (Some(prefix), None) => RouteMatch::Prefix(prefix.to_string()),
        (None, Some(path)) => RouteMatch::Path(path.to_string()),
        _ => {
            return Err(Error::type_mismatch(
                config.context(),
                "exactly one of 'prefix' or 'path'",
            ))
        }
    };

    let action = match (config.get_str_opt("cluster")?, config.get_str_opt("cluster_header")?) {
        (Some(cluster), None) => RouteAction::Cluster(cluster.to_string()),
        (None, Some(header)) => RouteAction::ClusterHeader(header.to_string()),
        _ => {
            return Err(Error::type_mismatch(
                config.context(),
                "exactly one of 'cluster' or 'cluster_header'",
            ))
        }
    };

    let prefix_rewrite = config.get_str_opt("prefix_rewrite")?.map(str::to_string);
    let host_rewrite = config.get_str_opt("host_rewrite")?.map(str::to_string);
    let timeout = optional_millis(config, "timeout_ms")?;

    Ok(RouteRule { matcher, action, prefix_rewrite, host_rewrite, timeout })
}

pub(crate) fn optional_millis(config: &Object<'_>, key: &str) -> Result<Option<Duration>> {
    match config.get_i64_opt(key)? {
        Some(ms) if ms >= 0 => Ok(Some(Duration::from_millis(ms as u64))),
        Some(_) => Err(Error::type_mismatch(config.scope(key), "non-negative integer")),
        None => Ok(None),
    }
}
