//! Built-in connector definitions embedded in the binary
//!
//! This module embeds all supported connector YAML files directly into the
//! binary, allowing users to use `--connector greenhouse` instead of
//! specifying a file path.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in connector YAML definitions
pub static BUILTIN_CONNECTORS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();

        // Recruiting / ATS
        m.insert("greenhouse", include_str!("../connectors/greenhouse.yaml"));
        m.insert("lever", include_str!("../connectors/lever.yaml"));

        // Performance management
        m.insert("lattice", include_str!("../connectors/lattice.yaml"));

        // HRIS
        m.insert(
            "knoetic-workday",
            include_str!("../connectors/knoetic-workday.yaml"),
        );
        m.insert(
            "workday",
            include_str!("../connectors/knoetic-workday.yaml"),
        );

        m
    });

/// Get a built-in connector by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_CONNECTORS.get(name).copied()
}

/// Check if a connector name is a built-in connector
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_CONNECTORS.contains_key(name)
}

/// List all built-in connector names (deduplicated, primary names only)
pub fn list_builtin() -> Vec<&'static str> {
    vec!["greenhouse", "lever", "lattice", "knoetic-workday"]
}

/// Connector metadata for display
#[derive(Debug, Clone)]
pub struct ConnectorInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub aliases: &'static [&'static str],
    pub config_schema: &'static [ConfigField],
    pub streams: &'static [&'static str],
}

/// Configuration field definition
#[derive(Debug, Clone)]
pub struct ConfigField {
    pub name: &'static str,
    pub field_type: &'static str,
    pub required: bool,
    pub secret: bool,
    pub description: &'static str,
    pub default: Option<&'static str>,
}

/// Get detailed info about all built-in connectors
pub fn list_builtin_info() -> Vec<ConnectorInfo> {
    vec![
        ConnectorInfo {
            name: "greenhouse",
            description: "Greenhouse Harvest API: jobs, candidates, applications, offers",
            category: "Recruiting",
            aliases: &[],
            config_schema: &[ConfigField {
                name: "api_key",
                field_type: "string",
                required: true,
                secret: true,
                description: "Harvest API key (sent as basic auth username)",
                default: None,
            }],
            streams: &[
                "jobs",
                "job_openings",
                "candidates",
                "applications",
                "offers",
                "scorecards",
                "users",
                "departments",
                "job_posts",
            ],
        },
        ConnectorInfo {
            name: "lever",
            description: "Lever API: opportunities, postings, and per-opportunity substreams",
            category: "Recruiting",
            aliases: &[],
            config_schema: &[ConfigField {
                name: "api_key",
                field_type: "string",
                required: true,
                secret: true,
                description: "Lever API key (sent as basic auth username)",
                default: None,
            }],
            streams: &[
                "opportunities",
                "users",
                "postings",
                "stages",
                "archive_reasons",
                "sources",
                "tags",
                "opportunity_offers",
                "opportunity_notes",
                "opportunity_interviews",
                "opportunity_feedback",
                "opportunity_referrals",
                "opportunity_resumes",
                "opportunity_applications",
            ],
        },
        ConnectorInfo {
            name: "lattice",
            description: "Lattice API: users, departments, goals, reviewees",
            category: "Performance",
            aliases: &[],
            config_schema: &[ConfigField {
                name: "api_token",
                field_type: "string",
                required: true,
                secret: true,
                description: "Lattice API token (bearer)",
                default: None,
            }],
            streams: &["users", "departments", "goals", "reviewees"],
        },
        ConnectorInfo {
            name: "knoetic-workday",
            description: "Workday custom report gateway: workers, orgs, reference data",
            category: "HRIS",
            aliases: &["workday"],
            config_schema: &[
                ConfigField {
                    name: "host",
                    field_type: "string",
                    required: true,
                    secret: false,
                    description: "Workday services host (e.g., wd2-impl-services1.workday.com)",
                    default: None,
                },
                ConfigField {
                    name: "tenant",
                    field_type: "string",
                    required: true,
                    secret: false,
                    description: "Workday tenant name",
                    default: None,
                },
                ConfigField {
                    name: "username",
                    field_type: "string",
                    required: true,
                    secret: false,
                    description: "Integration user (sent as username@tenant)",
                    default: None,
                },
                ConfigField {
                    name: "password",
                    field_type: "string",
                    required: true,
                    secret: true,
                    description: "Integration user password",
                    default: None,
                },
            ],
            streams: &[
                "workers",
                "worker_details",
                "organization_hierarchies",
                "ethnicities",
                "gender_identities",
                "locations",
                "job_profiles",
                "positions",
                "sexual_orientations",
                "frequencies",
                "base_snapshot_report",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_connectors_exist() {
        assert!(get_builtin("greenhouse").is_some());
        assert!(get_builtin("lever").is_some());
        assert!(get_builtin("lattice").is_some());
        assert!(get_builtin("knoetic-workday").is_some());
    }

    #[test]
    fn test_aliases_work() {
        assert_eq!(get_builtin("workday"), get_builtin("knoetic-workday"));
    }

    #[test]
    fn test_unknown_connector() {
        assert!(get_builtin("unknown").is_none());
    }

    #[test]
    fn test_list_builtin() {
        let list = list_builtin();
        assert_eq!(list.len(), 4);
        assert!(list.contains(&"greenhouse"));
        assert!(list.contains(&"lever"));
    }

    #[test]
    fn test_all_builtins_parse() {
        for name in list_builtin() {
            let yaml = get_builtin(name).unwrap();
            let def = crate::loader::load_connector_from_str(yaml)
                .unwrap_or_else(|e| panic!("builtin '{name}' failed to parse: {e}"));
            assert_eq!(def.name, name);
        }
    }

    #[test]
    fn test_lever_covers_all_vendor_streams() {
        // Lever's API surface: 7 top-level streams plus 7 per-opportunity
        // substreams
        let def = crate::loader::load_connector_from_str(get_builtin("lever").unwrap()).unwrap();
        assert_eq!(def.streams.len(), 14);
        assert!(def.stream("opportunity_resumes").is_some());
    }

    #[test]
    fn test_info_streams_match_manifests() {
        for info in list_builtin_info() {
            let yaml = get_builtin(info.name).unwrap();
            let def = crate::loader::load_connector_from_str(yaml).unwrap();
            for stream in info.streams {
                assert!(
                    def.stream(stream).is_some(),
                    "stream '{stream}' missing from '{}' manifest",
                    info.name
                );
            }
        }
    }
}
