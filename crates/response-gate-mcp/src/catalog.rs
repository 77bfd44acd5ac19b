// response-gate-mcp/src/catalog.rs
// ============================================================================
// Module: Endpoint Catalog
// Description: Static descriptors for the analytics export endpoints.
// Purpose: Drive tool listing, schema generation, and parameter validation.
// Dependencies: response-gate-providers, serde_json
// ============================================================================

//! ## Overview
//! The catalog is the immutable source of truth for every gated tool: name,
//! upstream path, description, and parameter specification. Tool listing
//! derives JSON Schemas from it, and dispatch validates arguments against it
//! before any fetch. Parameter order here is the order query pairs are sent
//! upstream.

// ============================================================================
// SECTION: Imports
// ============================================================================

use response_gate_providers::ParamValue;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Parameter Specification
// ============================================================================

/// Accepted parameter value shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Plain string value.
    String,
    /// Integer value, serialized as its decimal text.
    Integer,
    /// Boolean value, serialized as `true`/`false`.
    Boolean,
    /// List of strings, serialized as repeated query keys.
    StringList,
    /// List of integers, serialized as repeated query keys.
    IntegerList,
}

/// One parameter accepted by an endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Query parameter name.
    pub name: &'static str,
    /// Accepted value shape.
    pub kind: ParamKind,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Default applied when the parameter is absent.
    pub default: Option<&'static str>,
    /// Client-facing description.
    pub description: &'static str,
}

/// One gated analytics endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDescriptor {
    /// Tool name advertised to the host.
    pub name: &'static str,
    /// Upstream path under the API base URL.
    pub path: &'static str,
    /// Client-facing description.
    pub description: &'static str,
    /// Accepted parameters, in upstream serialization order.
    pub params: &'static [ParamSpec],
}

// ============================================================================
// SECTION: Shared Parameters
// ============================================================================

/// Response format selector, defaulting to JSON.
const FORMAT: ParamSpec = ParamSpec {
    name: "format",
    kind: ParamKind::String,
    required: false,
    default: Some("json"),
    description: "Response format (json or csv).",
};

/// Window start date.
const START_DATE: ParamSpec = ParamSpec {
    name: "start_date",
    kind: ParamKind::String,
    required: false,
    default: None,
    description: "Start date (YYYY-MM-DD).",
};

/// Window end date.
const END_DATE: ParamSpec = ParamSpec {
    name: "end_date",
    kind: ParamKind::String,
    required: false,
    default: None,
    description: "End date (YYYY-MM-DD).",
};

/// Aggregation time unit.
const UNIT: ParamSpec = ParamSpec {
    name: "unit",
    kind: ParamKind::String,
    required: false,
    default: None,
    description: "Time unit (quarter, month, week).",
};

/// Series toggle.
const SERIES: ParamSpec = ParamSpec {
    name: "series",
    kind: ParamKind::Boolean,
    required: false,
    default: None,
    description: "Whether to return series data.",
};

/// Decimal precision selector.
const DECIMAL_PLACES: ParamSpec = ParamSpec {
    name: "decimal_places",
    kind: ParamKind::Integer,
    required: false,
    default: None,
    description: "Number of decimal places (1-3).",
};

/// Required team hierarchy level.
const TEAM_HIERARCHY_LEVEL: ParamSpec = ParamSpec {
    name: "team_hierarchy_level",
    kind: ParamKind::Integer,
    required: true,
    default: None,
    description: "Org hierarchy level (1-3).",
};

/// Person breakout toggle.
const INCLUDE_PERSON_BREAKOUT: ParamSpec = ParamSpec {
    name: "include_person_breakout",
    kind: ParamKind::Boolean,
    required: false,
    default: None,
    description: "Include person details.",
};

/// Required work category slug.
const WORK_CATEGORY_SLUG: ParamSpec = ParamSpec {
    name: "work_category_slug",
    kind: ParamKind::String,
    required: true,
    default: None,
    description: "Work category slug.",
};

/// Optional team id filter.
const TEAM_ID_FILTER: ParamSpec = ParamSpec {
    name: "team_id",
    kind: ParamKind::IntegerList,
    required: false,
    default: None,
    description: "List of team IDs.",
};

/// Optional role filter.
const ROLE_FILTER: ParamSpec = ParamSpec {
    name: "role",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of roles.",
};

/// Optional location filter.
const LOCATION_FILTER: ParamSpec = ParamSpec {
    name: "location",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of locations.",
};

/// Optional custom laptop column filter.
const CUSTOM_COLUMN_LAPTOP: ParamSpec = ParamSpec {
    name: "custom_column_laptop",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of laptop types.",
};

/// Required deliverable identifier.
const DELIVERABLE_ID: ParamSpec = ParamSpec {
    name: "deliverable_id",
    kind: ParamKind::Integer,
    required: true,
    default: None,
    description: "Deliverable id.",
};

/// Completed-only toggle.
const COMPLETED_ONLY: ParamSpec = ParamSpec {
    name: "completed_only",
    kind: ParamKind::Boolean,
    required: false,
    default: None,
    description: "Only completed deliverables.",
};

/// In-progress-only toggle.
const INPROGRESS_ONLY: ParamSpec = ParamSpec {
    name: "inprogress_only",
    kind: ParamKind::Boolean,
    required: false,
    default: None,
    description: "Only in-progress deliverables.",
};

/// Archived visibility toggle.
const VIEW_ARCHIVED: ParamSpec = ParamSpec {
    name: "view_archived",
    kind: ParamKind::Boolean,
    required: false,
    default: None,
    description: "Include archived deliverables.",
};

/// Required person id list.
const PERSON_ID_REQUIRED: ParamSpec = ParamSpec {
    name: "person_id",
    kind: ParamKind::IntegerList,
    required: true,
    default: None,
    description: "List of person IDs.",
};

/// Required team id list.
const TEAM_ID_REQUIRED: ParamSpec = ParamSpec {
    name: "team_id",
    kind: ParamKind::IntegerList,
    required: true,
    default: None,
    description: "List of team IDs.",
};

/// Required single team id.
const TEAM_ID_SINGLE: ParamSpec = ParamSpec {
    name: "team_id",
    kind: ParamKind::Integer,
    required: true,
    default: None,
    description: "Team ID.",
};

/// Optional git instance filter.
const INSTANCE_SLUG: ParamSpec = ParamSpec {
    name: "instance_slug",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of git instance slugs.",
};

/// Optional organization filter.
const ORGANIZATION_NAME: ParamSpec = ParamSpec {
    name: "organization_name",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of organization names.",
};

/// Optional repository filter.
const REPO_NAME: ParamSpec = ParamSpec {
    name: "repo_name",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of repository names.",
};

/// Optional effective date.
const EFFECTIVE_DATE: ParamSpec = ParamSpec {
    name: "effective_date",
    kind: ParamKind::String,
    required: false,
    default: None,
    description: "Effective date (YYYY-MM-DD).",
};

/// Optional name filter.
const NAME_FILTER: ParamSpec = ParamSpec {
    name: "name",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of names.",
};

/// Optional email filter.
const EMAIL_FILTER: ParamSpec = ParamSpec {
    name: "email",
    kind: ParamKind::StringList,
    required: false,
    default: None,
    description: "List of emails.",
};

/// Optional person id filter.
const PERSON_ID_FILTER: ParamSpec = ParamSpec {
    name: "person_id",
    kind: ParamKind::IntegerList,
    required: false,
    default: None,
    description: "List of person IDs.",
};

/// Required hierarchy level for team listing.
const HIERARCHY_LEVEL: ParamSpec = ParamSpec {
    name: "hierarchy_level",
    kind: ParamKind::Integer,
    required: true,
    default: None,
    description: "Team hierarchy level.",
};

/// Child team toggle.
const INCLUDE_CHILDREN: ParamSpec = ParamSpec {
    name: "include_children",
    kind: ParamKind::Boolean,
    required: false,
    default: None,
    description: "Whether to include child teams.",
};

// ============================================================================
// SECTION: Endpoint Catalog
// ============================================================================

/// All gated analytics endpoints, in listing order.
pub const ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor {
        name: "allocations_by_person",
        path: "/endpoints/export/v0/allocations/details/by_person",
        description: "Returns allocation data for the whole company, aggregated by person.",
        params: &[FORMAT, START_DATE, END_DATE, UNIT, SERIES, DECIMAL_PLACES],
    },
    EndpointDescriptor {
        name: "allocations_by_team",
        path: "/endpoints/export/v0/allocations/details/by_team",
        description: "Returns allocation data for the whole company, aggregated by team at the \
                      specified hierarchy level.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            TEAM_HIERARCHY_LEVEL,
            INCLUDE_PERSON_BREAKOUT,
        ],
    },
    EndpointDescriptor {
        name: "allocations_by_investment_category",
        path: "/endpoints/export/v0/allocations/details/investment_category",
        description: "Returns allocation data for the whole company, aggregated by investment \
                      category.",
        params: &[FORMAT, START_DATE, END_DATE, UNIT, SERIES, DECIMAL_PLACES],
    },
    EndpointDescriptor {
        name: "allocations_by_investment_category_person",
        path: "/endpoints/export/v0/allocations/details/investment_category/by_person",
        description: "Returns allocation data for the whole company, aggregated by investment \
                      category and person.",
        params: &[FORMAT, START_DATE, END_DATE, UNIT, SERIES, DECIMAL_PLACES],
    },
    EndpointDescriptor {
        name: "allocations_by_investment_category_team",
        path: "/endpoints/export/v0/allocations/details/investment_category/by_team",
        description: "Returns allocation data for the whole company, aggregated by investment \
                      category and team at the specified hierarchy level.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            TEAM_HIERARCHY_LEVEL,
            INCLUDE_PERSON_BREAKOUT,
        ],
    },
    EndpointDescriptor {
        name: "allocations_by_work_category",
        path: "/endpoints/export/v0/allocations/details/work_category",
        description: "Returns allocation data for the whole company, aggregated by deliverable \
                      within the specified work category.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            WORK_CATEGORY_SLUG,
        ],
    },
    EndpointDescriptor {
        name: "allocations_by_work_category_person",
        path: "/endpoints/export/v0/allocations/details/work_category/by_person",
        description: "Returns allocation data for the whole company, aggregated by deliverable \
                      within the specified work category and person.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            WORK_CATEGORY_SLUG,
        ],
    },
    EndpointDescriptor {
        name: "allocations_by_work_category_team",
        path: "/endpoints/export/v0/allocations/details/work_category/by_team",
        description: "Returns allocation data for the whole company, aggregated by deliverable \
                      within the specified work category and team at the specified hierarchy \
                      level.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            TEAM_HIERARCHY_LEVEL,
            WORK_CATEGORY_SLUG,
            INCLUDE_PERSON_BREAKOUT,
        ],
    },
    EndpointDescriptor {
        name: "allocations_filter_fields",
        path: "/endpoints/export/v0/allocations/filter_fields",
        description: "Returns a list of the available fields and known values for filtering \
                      allocations.",
        params: &[FORMAT],
    },
    EndpointDescriptor {
        name: "allocations_summary_by_investment_category",
        path: "/endpoints/export/v0/allocations/summary_filtered/by_investment_category",
        description: "Returns total FTE amounts for investment categories. Supports filtering.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            TEAM_ID_FILTER,
            ROLE_FILTER,
            LOCATION_FILTER,
            CUSTOM_COLUMN_LAPTOP,
        ],
    },
    EndpointDescriptor {
        name: "allocations_summary_by_work_category",
        path: "/endpoints/export/v0/allocations/summary_filtered/by_work_category",
        description: "Returns total FTE amounts for deliverables within a work category. \
                      Supports filtering.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            DECIMAL_PLACES,
            TEAM_ID_FILTER,
            ROLE_FILTER,
            LOCATION_FILTER,
            WORK_CATEGORY_SLUG,
            CUSTOM_COLUMN_LAPTOP,
        ],
    },
    EndpointDescriptor {
        name: "deliverable_details",
        path: "/endpoints/export/v0/delivery/deliverable_details",
        description: "Returns data about a specific deliverable.",
        params: &[FORMAT, DELIVERABLE_ID],
    },
    EndpointDescriptor {
        name: "deliverable_scope_and_effort_history",
        path: "/endpoints/export/v0/delivery/scope_and_effort_history",
        description: "Returns weekly data about the scope of a deliverable and the total effort \
                      allocated per week.",
        params: &[FORMAT, DELIVERABLE_ID, START_DATE, END_DATE, UNIT],
    },
    EndpointDescriptor {
        name: "work_categories",
        path: "/endpoints/export/v0/delivery/work_categories",
        description: "Returns a list of all known work categories.",
        params: &[FORMAT],
    },
    EndpointDescriptor {
        name: "work_category_contents",
        path: "/endpoints/export/v0/delivery/work_category_contents",
        description: "Returns data about the deliverables in a specified work category.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            WORK_CATEGORY_SLUG,
            COMPLETED_ONLY,
            INPROGRESS_ONLY,
            VIEW_ARCHIVED,
            TEAM_ID_FILTER,
        ],
    },
    EndpointDescriptor {
        name: "company_metrics",
        path: "/endpoints/export/v0/metrics/company_metrics",
        description: "Returns metrics data for the company during the specified timeframe.",
        params: &[FORMAT, START_DATE, END_DATE, UNIT, SERIES],
    },
    EndpointDescriptor {
        name: "person_metrics",
        path: "/endpoints/export/v0/metrics/person_metrics",
        description: "Returns metrics data for the specified person during the specified \
                      timeframe.",
        params: &[FORMAT, START_DATE, END_DATE, UNIT, SERIES, PERSON_ID_REQUIRED],
    },
    EndpointDescriptor {
        name: "team_metrics",
        path: "/endpoints/export/v0/metrics/team_metrics",
        description: "Returns metrics data for the specified team during the specified timeframe.",
        params: &[FORMAT, START_DATE, END_DATE, UNIT, SERIES, TEAM_ID_REQUIRED],
    },
    EndpointDescriptor {
        name: "team_sprint_summary",
        path: "/endpoints/export/v0/metrics/team_sprint_summary",
        description: "Returns issue count and, if available, story point data for a team's \
                      sprints in the specified timeframe.",
        params: &[FORMAT, START_DATE, END_DATE, TEAM_ID_SINGLE],
    },
    EndpointDescriptor {
        name: "unlinked_pull_requests",
        path: "/endpoints/export/v0/metrics/unlinked_pull_requests",
        description: "Lists details of unlinked pull requests merged during the specified \
                      timeframe.",
        params: &[
            FORMAT,
            START_DATE,
            END_DATE,
            UNIT,
            SERIES,
            INSTANCE_SLUG,
            ORGANIZATION_NAME,
            REPO_NAME,
        ],
    },
    EndpointDescriptor {
        name: "list_engineers",
        path: "/endpoints/export/v0/people/list_engineers",
        description: "Returns a list of all active allocatable people as of a specific date.",
        params: &[FORMAT, EFFECTIVE_DATE],
    },
    EndpointDescriptor {
        name: "search_people",
        path: "/endpoints/export/v0/people/search",
        description: "Searches for people by name, email, or id.",
        params: &[FORMAT, NAME_FILTER, EMAIL_FILTER, PERSON_ID_FILTER],
    },
    EndpointDescriptor {
        name: "list_teams",
        path: "/endpoints/export/v0/teams/list_teams",
        description: "Displays all teams at the specified hierarchy level. Optionally, includes \
                      child teams.",
        params: &[FORMAT, HIERARCHY_LEVEL, INCLUDE_CHILDREN],
    },
    EndpointDescriptor {
        name: "search_teams",
        path: "/endpoints/export/v0/teams/search",
        description: "Searches for teams by name or id.",
        params: &[FORMAT, NAME_FILTER, TEAM_ID_FILTER],
    },
];

/// Looks up an endpoint descriptor by tool name.
#[must_use]
pub fn find(name: &str) -> Option<&'static EndpointDescriptor> {
    ENDPOINTS.iter().find(|descriptor| descriptor.name == name)
}

// ============================================================================
// SECTION: Schema Generation
// ============================================================================

impl EndpointDescriptor {
    /// Builds the JSON Schema advertised for this tool's arguments.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in self.params {
            properties.insert(param.name.to_string(), param_schema(param));
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// Builds the JSON Schema fragment for one parameter.
fn param_schema(param: &ParamSpec) -> Value {
    match param.kind {
        ParamKind::String => json!({"type": "string", "description": param.description}),
        ParamKind::Integer => json!({"type": "integer", "description": param.description}),
        ParamKind::Boolean => json!({"type": "boolean", "description": param.description}),
        ParamKind::StringList => json!({
            "type": "array",
            "items": {"type": "string"},
            "description": param.description,
        }),
        ParamKind::IntegerList => json!({
            "type": "array",
            "items": {"type": "integer"},
            "description": param.description,
        }),
    }
}

// ============================================================================
// SECTION: Parameter Collection
// ============================================================================

/// Validates tool arguments and renders them as ordered query parameters.
///
/// Null and absent optional values are skipped, empty lists are skipped, and
/// defaults are applied for absent parameters that declare one. Unknown
/// argument names are rejected.
///
/// # Errors
///
/// Returns [`ParamError`] when an argument is unknown, mistyped, or a
/// required parameter is missing.
pub fn collect_params(
    descriptor: &EndpointDescriptor,
    arguments: &Value,
) -> Result<Vec<(String, ParamValue)>, ParamError> {
    let empty = serde_json::Map::new();
    let object = match arguments {
        Value::Null => &empty,
        Value::Object(map) => map,
        _ => return Err(ParamError::NotAnObject),
    };
    for key in object.keys() {
        if !descriptor.params.iter().any(|param| param.name == key) {
            return Err(ParamError::Unknown(key.clone()));
        }
    }
    let mut collected = Vec::new();
    for param in descriptor.params {
        let value = object.get(param.name).filter(|value| !value.is_null());
        match value {
            Some(value) => {
                if let Some(rendered) = render_param(param, value)? {
                    collected.push((param.name.to_string(), rendered));
                } else if param.required {
                    return Err(ParamError::MissingRequired(param.name.to_string()));
                }
            }
            None => {
                if let Some(default) = param.default {
                    collected
                        .push((param.name.to_string(), ParamValue::Scalar(default.to_string())));
                } else if param.required {
                    return Err(ParamError::MissingRequired(param.name.to_string()));
                }
            }
        }
    }
    Ok(collected)
}

/// Renders one argument value against its specification.
///
/// Returns `Ok(None)` for empty lists, which are omitted upstream.
fn render_param(param: &ParamSpec, value: &Value) -> Result<Option<ParamValue>, ParamError> {
    let mistyped = || ParamError::WrongType {
        name: param.name.to_string(),
        expected: expected_shape(param.kind),
    };
    match param.kind {
        ParamKind::String => {
            let text = value.as_str().ok_or_else(mistyped)?;
            Ok(Some(ParamValue::Scalar(text.to_string())))
        }
        ParamKind::Integer => {
            let number = integer_text(value).ok_or_else(mistyped)?;
            Ok(Some(ParamValue::Scalar(number)))
        }
        ParamKind::Boolean => {
            let flag = value.as_bool().ok_or_else(mistyped)?;
            Ok(Some(ParamValue::Scalar(flag.to_string())))
        }
        ParamKind::StringList => {
            let items = value.as_array().ok_or_else(mistyped)?;
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(item.as_str().ok_or_else(mistyped)?.to_string());
            }
            Ok(if rendered.is_empty() { None } else { Some(ParamValue::List(rendered)) })
        }
        ParamKind::IntegerList => {
            let items = value.as_array().ok_or_else(mistyped)?;
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(integer_text(item).ok_or_else(mistyped)?);
            }
            Ok(if rendered.is_empty() { None } else { Some(ParamValue::List(rendered)) })
        }
    }
}

/// Renders an integer JSON value as decimal text.
fn integer_text(value: &Value) -> Option<String> {
    let number = value.as_number()?;
    if number.is_i64() || number.is_u64() { Some(number.to_string()) } else { None }
}

/// Describes the expected shape for error messages.
const fn expected_shape(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::String => "string",
        ParamKind::Integer => "integer",
        ParamKind::Boolean => "boolean",
        ParamKind::StringList => "array of strings",
        ParamKind::IntegerList => "array of integers",
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Argument validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// Arguments payload was not a JSON object.
    #[error("arguments must be an object")]
    NotAnObject,
    /// Argument name not declared by the endpoint.
    #[error("unknown parameter: {0}")]
    Unknown(String),
    /// Declared required parameter absent or empty.
    #[error("missing required parameter: {0}")]
    MissingRequired(String),
    /// Argument present with the wrong JSON type.
    #[error("parameter {name} must be {expected}")]
    WrongType {
        /// Parameter name.
        name: String,
        /// Expected shape description.
        expected: &'static str,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use serde_json::json;

    use super::ENDPOINTS;
    use super::ParamError;
    use super::ParamValue;
    use super::collect_params;
    use super::find;

    #[test]
    fn catalog_covers_all_export_endpoints() {
        assert_eq!(ENDPOINTS.len(), 24);
        for descriptor in ENDPOINTS {
            assert!(descriptor.path.starts_with("/endpoints/export/v0/"));
        }
    }

    #[test]
    fn find_resolves_names_and_rejects_strangers() {
        assert!(find("team_metrics").is_some());
        assert!(find("no_such_tool").is_none());
    }

    #[test]
    fn format_defaults_to_json_when_absent() {
        let descriptor = find("work_categories").unwrap();
        let params = collect_params(descriptor, &json!({})).unwrap();
        assert_eq!(params, vec![("format".to_string(), ParamValue::Scalar("json".to_string()))]);
    }

    #[test]
    fn explicit_arguments_override_defaults() {
        let descriptor = find("work_categories").unwrap();
        let params = collect_params(descriptor, &json!({"format": "csv"})).unwrap();
        assert_eq!(params, vec![("format".to_string(), ParamValue::Scalar("csv".to_string()))]);
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let descriptor = find("company_metrics").unwrap();
        let err = collect_params(descriptor, &json!({"surprise": 1})).unwrap_err();
        assert_eq!(err, ParamError::Unknown("surprise".to_string()));
    }

    #[test]
    fn missing_required_parameter_is_rejected() {
        let descriptor = find("team_metrics").unwrap();
        let err = collect_params(descriptor, &json!({})).unwrap_err();
        assert_eq!(err, ParamError::MissingRequired("team_id".to_string()));
    }

    #[test]
    fn empty_required_list_counts_as_missing() {
        let descriptor = find("person_metrics").unwrap();
        let err = collect_params(descriptor, &json!({"person_id": []})).unwrap_err();
        assert_eq!(err, ParamError::MissingRequired("person_id".to_string()));
    }

    #[test]
    fn null_optional_values_are_skipped() {
        let descriptor = find("company_metrics").unwrap();
        let params = collect_params(descriptor, &json!({"start_date": null})).unwrap();
        assert!(!params.iter().any(|(name, _)| name == "start_date"));
    }

    #[test]
    fn empty_optional_lists_are_skipped() {
        let descriptor = find("search_teams").unwrap();
        let params = collect_params(descriptor, &json!({"name": []})).unwrap();
        assert!(!params.iter().any(|(name, _)| name == "name"));
    }

    #[test]
    fn integer_lists_render_as_decimal_text() {
        let descriptor = find("team_metrics").unwrap();
        let params = collect_params(descriptor, &json!({"team_id": [7, 3]})).unwrap();
        let team_id = params.iter().find(|(name, _)| name == "team_id").unwrap();
        assert_eq!(
            team_id.1,
            ParamValue::List(vec!["7".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn mistyped_values_are_rejected() {
        let descriptor = find("team_sprint_summary").unwrap();
        let err = collect_params(descriptor, &json!({"team_id": "seven"})).unwrap_err();
        assert_eq!(
            err,
            ParamError::WrongType {
                name: "team_id".to_string(),
                expected: "integer",
            }
        );

        let descriptor = find("company_metrics").unwrap();
        let err = collect_params(descriptor, &json!({"series": "true"})).unwrap_err();
        assert!(matches!(err, ParamError::WrongType { .. }));
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let descriptor = find("company_metrics").unwrap();
        let err = collect_params(descriptor, &json!([1, 2])).unwrap_err();
        assert_eq!(err, ParamError::NotAnObject);
    }

    #[test]
    fn input_schema_declares_required_parameters() {
        let descriptor = find("list_teams").unwrap();
        let schema = descriptor.input_schema();
        let required = schema.get("required").and_then(|value| value.as_array()).unwrap();
        assert_eq!(required, &vec![json!("hierarchy_level")]);
        let properties = schema.get("properties").and_then(|value| value.as_object()).unwrap();
        assert!(properties.contains_key("include_children"));
        assert_eq!(schema.get("additionalProperties"), Some(&json!(false)));
    }
}
