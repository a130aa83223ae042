//! Column mapping: header rules, mapping-set assembly and custom columns.

mod proposal;
mod rules;

pub use proposal::{
    BOOLEAN_OPTIONS, ColumnHint, build_column_hint, parse_number, propose_custom_column,
};
pub use rules::{ColumnMatch, NormalizedHeader, SKIP_CONFIDENCE, map_column, normalize_header};

use std::collections::BTreeMap;

use tci_ingest::unique_headers;
use tci_model::{
    ColumnMapping, ColumnTarget, ConfidenceTier, CustomColumnProposal, FieldName, ImportContext,
    MappingSource,
};

use crate::error::{ImportError, Result};

/// Mappings for every header of one table, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingSet {
    /// Unique, non-blank headers.
    pub headers: Vec<String>,
    pub mappings: Vec<ColumnMapping>,
}

impl MappingSet {
    /// Header currently mapped to `field`, if any.
    pub fn column_for(&self, field: FieldName) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.target_field == ColumnTarget::Field(field))
            .map(|m| m.source_column.as_str())
    }

    /// Mappings whose data lands in custom fields.
    pub fn custom_columns(&self) -> impl Iterator<Item = &ColumnMapping> {
        self.mappings.iter().filter(|m| m.is_custom())
    }
}

/// Maps every header, applying manual overrides and resolving conflicts.
///
/// Headers are made unique first. When several headers claim the same field
/// the manual one keeps it, then the one matched by the earliest rule, then
/// the leftmost; the others become Skip so their data lands in custom
/// fields.
pub fn build_mapping_set<S: AsRef<str>>(headers: &[S], context: &ImportContext) -> MappingSet {
    let headers = unique_headers(headers);

    // (mapping, rule position) per header
    let mut candidates: Vec<(ColumnMapping, Option<usize>)> = headers
        .iter()
        .map(|header| match context.override_for(header) {
            Some(target) => (
                ColumnMapping {
                    source_column: header.clone(),
                    target_field: target,
                    confidence_tier: ConfidenceTier::High,
                    confidence: ConfidenceTier::High.score(),
                    source: MappingSource::Manual,
                },
                Some(0),
            ),
            None => {
                let found = map_column(header);
                (
                    ColumnMapping {
                        source_column: header.clone(),
                        target_field: found.target,
                        confidence_tier: found.tier,
                        confidence: found.confidence,
                        source: MappingSource::Auto,
                    },
                    found.rule,
                )
            }
        })
        .collect();

    // Winning column index per field: manual first, then earliest rule, then leftmost.
    let rank = |idx: usize| {
        let (mapping, rule) = &candidates[idx];
        (
            mapping.source != MappingSource::Manual,
            rule.unwrap_or(usize::MAX),
        )
    };
    let mut winners: BTreeMap<FieldName, usize> = BTreeMap::new();
    for (idx, (mapping, _)) in candidates.iter().enumerate() {
        let Some(field) = mapping.target_field.field() else {
            continue;
        };
        match winners.get(&field) {
            Some(&current) if rank(current) <= rank(idx) => {}
            _ => {
                winners.insert(field, idx);
            }
        }
    }

    for (idx, (mapping, _)) in candidates.iter_mut().enumerate() {
        let Some(field) = mapping.target_field.field() else {
            continue;
        };
        if winners.get(&field) != Some(&idx) {
            tracing::debug!(
                column = %mapping.source_column,
                field = field.key(),
                "field already claimed by another column, keeping as custom data"
            );
            mapping.target_field = ColumnTarget::Skip;
            mapping.confidence_tier = ConfidenceTier::Low;
            mapping.confidence = SKIP_CONFIDENCE;
            mapping.source = MappingSource::Auto;
        }
    }

    let mappings: Vec<ColumnMapping> = candidates.into_iter().map(|(m, _)| m).collect();
    for mapping in &mappings {
        tracing::debug!(
            column = %mapping.source_column,
            target = %mapping.target_field,
            tier = %mapping.confidence_tier,
            "column mapping"
        );
    }
    MappingSet { headers, mappings }
}

/// Proposes custom columns for every auto-skipped header.
///
/// Value-based refinement looks at the header's cells in `rows`. Proposal
/// names are made unique with a numeric suffix. Returns `(header, proposal)`
/// pairs in header order.
pub fn propose_custom_columns(
    set: &MappingSet,
    rows: &[BTreeMap<String, String>],
) -> Vec<(String, CustomColumnProposal)> {
    let mut proposals: Vec<(String, CustomColumnProposal)> = Vec::new();
    for mapping in set.custom_columns() {
        let header = mapping.source_column.as_str();
        let values = rows
            .iter()
            .filter_map(|row| row.get(header).map(String::as_str));
        let mut proposal = propose_custom_column(header, values);
        let base = proposal.name.clone();
        let mut n = 2;
        while proposals.iter().any(|(_, p)| p.name == proposal.name) {
            proposal.name = format!("{base}_{n}");
            n += 1;
        }
        proposals.push((header.to_string(), proposal));
    }
    proposals
}

/// Parses a `Header=field` override. `field` may be `skip`.
///
/// # Example
///
/// ```
/// use tci_import::parse_override;
/// use tci_model::{ColumnTarget, FieldName};
///
/// let (header, target) = parse_override("Summary=title")?;
/// assert_eq!(header, "Summary");
/// assert_eq!(target, ColumnTarget::Field(FieldName::Title));
/// # Ok::<(), tci_import::ImportError>(())
/// ```
pub fn parse_override(value: &str) -> Result<(String, ColumnTarget)> {
    let invalid = |reason: String| ImportError::InvalidOverride {
        value: value.to_string(),
        reason,
    };
    let (header, field) = value
        .rsplit_once('=')
        .ok_or_else(|| invalid("expected Header=field".to_string()))?;
    let header = header.trim();
    if header.is_empty() {
        return Err(invalid("header is empty".to_string()));
    }
    let target = field.parse::<ColumnTarget>().map_err(invalid)?;
    Ok((header.to_string(), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(set: &MappingSet) -> Vec<String> {
        set.mappings.iter().map(|m| m.target_field.to_string()).collect()
    }

    #[test]
    fn test_mapping_set_size_matches_headers() {
        let context = ImportContext::new("p");
        let set = build_mapping_set(&["Test Case ID", "Title", "Priority", "Status"], &context);
        assert_eq!(set.mappings.len(), 4);
        assert_eq!(targets(&set), vec!["skip", "title", "priority", "status"]);
        assert_eq!(set.column_for(FieldName::Title), Some("Title"));
    }

    #[test]
    fn test_earliest_rule_then_leftmost_wins() {
        let context = ImportContext::new("p");
        let set = build_mapping_set(&["Test Name", "Summary", "Name"], &context);
        assert_eq!(targets(&set), vec!["title", "skip", "skip"]);

        let set = build_mapping_set(&["Test Case", "Title"], &context);
        assert_eq!(targets(&set), vec!["skip", "title"]);
    }

    #[test]
    fn test_case_prefixed_headers_do_not_displace_canonical_columns() {
        let context = ImportContext::new("p");
        let set = build_mapping_set(
            &["Title", "Test Case Description", "Description", "Test Case Steps"],
            &context,
        );
        assert_eq!(targets(&set), vec!["title", "skip", "description", "skip"]);
        assert_eq!(set.column_for(FieldName::Description), Some("Description"));

        let set = build_mapping_set(&["Test Case Description", "Status"], &context);
        assert_eq!(targets(&set), vec!["title", "status"]);
    }

    #[test]
    fn test_manual_overrides() {
        let context = ImportContext::new("p")
            .with_override("Summary", ColumnTarget::Field(FieldName::Title))
            .with_override("Internal", ColumnTarget::Skip);
        let set = build_mapping_set(&["Title", "Summary", "Internal", "Sprint"], &context);
        assert_eq!(targets(&set), vec!["skip", "title", "skip", "skip"]);
        assert_eq!(set.mappings[1].source, MappingSource::Manual);
        assert_eq!(set.mappings[1].confidence_tier, ConfidenceTier::High);
        assert!(set.mappings[2].is_ignored());
        assert!(set.mappings[3].is_custom());

        let custom: Vec<_> = set.custom_columns().map(|m| m.source_column.as_str()).collect();
        assert_eq!(custom, vec!["Title", "Sprint"]);
    }

    #[test]
    fn test_blank_and_duplicate_headers() {
        let context = ImportContext::new("p");
        let set = build_mapping_set(&["Title", "", "Title"], &context);
        assert_eq!(set.headers, vec!["Title", "Column 2", "Title (2)"]);
        assert_eq!(targets(&set), vec!["title", "skip", "skip"]);
    }

    #[test]
    fn test_proposal_names_are_unique() {
        let context = ImportContext::new("p");
        let set = build_mapping_set(&["Bug Count", "bug_count"], &context);
        let proposals = propose_custom_columns(&set, &[]);
        let names: Vec<_> = proposals.iter().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["bug_count", "bug_count_2"]);
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("Owner = assignedTester").unwrap(),
            ("Owner".to_string(), ColumnTarget::Field(FieldName::AssignedTester))
        );
        assert_eq!(
            parse_override("A=B=skip").unwrap(),
            ("A=B".to_string(), ColumnTarget::Skip)
        );
        assert!(matches!(
            parse_override("Owner"),
            Err(ImportError::InvalidOverride { .. })
        ));
        assert!(parse_override("Owner=boss").is_err());
        assert!(parse_override("=title").is_err());
    }
}
