//! Row validation — maps the header row to column indices, then normalizes
//! each data row into a `CandidateRecord` or a `ValidationError`. Total over
//! its input: every data row lands in exactly one of the two outputs.

use serde::Serialize;
use thiserror::Error;

use crate::models::recruiter::{CandidateRecord, Tier};

/// Column indices resolved from the header row (case-insensitive match).
/// Only `email` is required.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub email: usize,
    pub company: Option<usize>,
    pub domain: Option<usize>,
    pub tier: Option<usize>,
    pub quality_score: Option<usize>,
}

/// Fatal precondition: the header has no `email` column. Carries the columns
/// that were present so the caller can surface a useful message instead of
/// thousands of per-row errors.
#[derive(Debug, Error)]
#[error("missing required 'email' column (found: {})", self.found_list())]
pub struct MissingEmailColumn {
    pub found: Vec<String>,
}

impl MissingEmailColumn {
    fn found_list(&self) -> String {
        if self.found.is_empty() {
            "none".to_string()
        } else {
            self.found.join(", ")
        }
    }
}

impl ColumnMap {
    /// Resolves recognized column names from the header row.
    pub fn from_header(header: &[String]) -> Result<ColumnMap, MissingEmailColumn> {
        let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let index_of = |name: &str| normalized.iter().position(|h| h == name);

        let Some(email) = index_of("email") else {
            return Err(MissingEmailColumn {
                found: normalized.into_iter().filter(|h| !h.is_empty()).collect(),
            });
        };

        Ok(ColumnMap {
            name: index_of("name"),
            email,
            company: index_of("company"),
            domain: index_of("domain"),
            tier: index_of("tier"),
            quality_score: index_of("quality_score"),
        })
    }
}

/// A non-fatal, per-row validation failure. `row` is the 1-based position of
/// the data row in the source.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub row: usize,
    pub message: String,
}

/// Validates and normalizes data rows against a resolved column map.
/// Output order matches source order for both candidates and errors.
pub fn validate_rows(
    columns: &ColumnMap,
    rows: &[Vec<String>],
) -> (Vec<CandidateRecord>, Vec<ValidationError>) {
    let mut candidates = Vec::new();
    let mut errors = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 1;

        let email = cell(row, Some(columns.email)).trim().to_lowercase();
        if email.is_empty() {
            errors.push(ValidationError {
                row: row_number,
                message: "missing email field".to_string(),
            });
            continue;
        }
        if !is_valid_email(&email) {
            errors.push(ValidationError {
                row: row_number,
                message: format!("invalid email format: {email}"),
            });
            continue;
        }

        let name = derive_name(cell(row, columns.name), &email);
        let company = optional_cell(row, columns.company);
        let domain = optional_cell(row, columns.domain);
        let tier = match cell(row, columns.tier) {
            "" => Tier::default(),
            raw => Tier::parse_or_default(raw),
        };
        let quality_score = parse_quality_score(cell(row, columns.quality_score));

        candidates.push(CandidateRecord {
            name,
            email,
            company,
            domain,
            tier,
            quality_score,
        });
    }

    (candidates, errors)
}

fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(|s| s.as_str())
        .unwrap_or("")
}

fn optional_cell(row: &[String], index: Option<usize>) -> Option<String> {
    let value = cell(row, index).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Basic `local@domain.tld` shape check, equivalent to
/// `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Blank name falls back to the local part of the email; if that is somehow
/// empty too, the literal "Recruiter".
fn derive_name(name_cell: &str, email: &str) -> String {
    let name = name_cell.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    let local = email.split('@').next().unwrap_or("");
    if local.is_empty() {
        "Recruiter".to_string()
    } else {
        local.to_string()
    }
}

/// Kept only if it parses as a float within [0, 100]; otherwise absent.
/// No error recorded either way.
fn parse_quality_score(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|score| (0.0..=100.0).contains(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_resolution_case_insensitive() {
        let columns =
            ColumnMap::from_header(&header(&["Name", "EMAIL", "Company", "tier"])).unwrap();
        assert_eq!(columns.email, 1);
        assert_eq!(columns.name, Some(0));
        assert_eq!(columns.company, Some(2));
        assert_eq!(columns.tier, Some(3));
        assert_eq!(columns.domain, None);
        assert_eq!(columns.quality_score, None);
    }

    #[test]
    fn test_missing_email_column_names_found_columns() {
        let err = ColumnMap::from_header(&header(&["Name", "Company"])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("email"));
        assert!(message.contains("name"));
        assert!(message.contains("company"));
    }

    #[test]
    fn test_missing_email_column_empty_header() {
        let err = ColumnMap::from_header(&header(&[])).unwrap_err();
        assert!(err.to_string().contains("none"));
    }

    #[test]
    fn test_every_row_is_candidate_or_error() {
        let columns = ColumnMap::from_header(&header(&["name", "email"])).unwrap();
        let data = rows(&[
            &["Jane", "jane@co.com"],
            &["", "bad-email"],
            &["Bob", ""],
            &["Ann", "ann@co.com"],
        ]);
        let (candidates, errors) = validate_rows(&columns, &data);
        assert_eq!(candidates.len() + errors.len(), data.len());
        assert_eq!(candidates.len(), 2);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_blank_email_error() {
        let columns = ColumnMap::from_header(&header(&["email"])).unwrap();
        let (_, errors) = validate_rows(&columns, &rows(&[&["   "]]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 1);
        assert_eq!(errors[0].message, "missing email field");
    }

    #[test]
    fn test_invalid_email_error_includes_value() {
        let columns = ColumnMap::from_header(&header(&["email"])).unwrap();
        let (_, errors) = validate_rows(&columns, &rows(&[&["not-an-email"]]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "invalid email format: not-an-email");
    }

    #[test]
    fn test_email_lowercased_and_trimmed() {
        let columns = ColumnMap::from_header(&header(&["email"])).unwrap();
        let (candidates, _) = validate_rows(&columns, &rows(&[&["Jane@Co.COM"]]));
        assert_eq!(candidates[0].email, "jane@co.com");
    }

    #[test]
    fn test_blank_name_falls_back_to_email_local_part() {
        let columns = ColumnMap::from_header(&header(&["name", "email"])).unwrap();
        let (candidates, _) = validate_rows(&columns, &rows(&[&["", "jane@co.com"]]));
        assert_eq!(candidates[0].name, "jane");
    }

    #[test]
    fn test_derive_name_last_resort() {
        assert_eq!(derive_name("", ""), "Recruiter");
        assert_eq!(derive_name("  ", "@"), "Recruiter");
    }

    #[test]
    fn test_tier_coercion() {
        let columns = ColumnMap::from_header(&header(&["email", "tier"])).unwrap();
        let data = rows(&[
            &["a@co.com", "bogus"],
            &["b@co.com", "pro"],
            &["c@co.com", ""],
        ]);
        let (candidates, errors) = validate_rows(&columns, &data);
        assert!(errors.is_empty());
        assert_eq!(candidates[0].tier, Tier::Free);
        assert_eq!(candidates[1].tier, Tier::Pro);
        assert_eq!(candidates[2].tier, Tier::Free);
    }

    #[test]
    fn test_quality_score_bounds() {
        let columns = ColumnMap::from_header(&header(&["email", "quality_score"])).unwrap();
        let data = rows(&[
            &["a@co.com", "150"],
            &["b@co.com", "abc"],
            &["c@co.com", "42.5"],
            &["d@co.com", "-1"],
            &["e@co.com", "0"],
            &["f@co.com", "100"],
        ]);
        let (candidates, errors) = validate_rows(&columns, &data);
        assert!(errors.is_empty());
        assert_eq!(candidates[0].quality_score, None);
        assert_eq!(candidates[1].quality_score, None);
        assert_eq!(candidates[2].quality_score, Some(42.5));
        assert_eq!(candidates[3].quality_score, None);
        assert_eq!(candidates[4].quality_score, Some(0.0));
        assert_eq!(candidates[5].quality_score, Some(100.0));
    }

    #[test]
    fn test_short_row_treated_as_blank_cells() {
        let columns = ColumnMap::from_header(&header(&["name", "email", "company"])).unwrap();
        let (_, errors) = validate_rows(&columns, &rows(&[&["Jane"]]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "missing email field");
    }

    #[test]
    fn test_email_shape_rejections() {
        for bad in ["plain", "a@b", "a@.com", "@co.com", "a @co.com", "a@b@c.com", "a@co."] {
            assert!(!is_valid_email(bad), "expected rejection: {bad}");
        }
        for good in ["a@b.co", "jane.doe@sub.example.com", "x_y@co-op.io"] {
            assert!(is_valid_email(good), "expected acceptance: {good}");
        }
    }

    #[test]
    fn test_output_order_matches_source_order() {
        let columns = ColumnMap::from_header(&header(&["email"])).unwrap();
        let data = rows(&[&["z@co.com"], &["bad"], &["a@co.com"], &["worse"]]);
        let (candidates, errors) = validate_rows(&columns, &data);
        assert_eq!(candidates[0].email, "z@co.com");
        assert_eq!(candidates[1].email, "a@co.com");
        assert_eq!(errors[0].row, 2);
        assert_eq!(errors[1].row, 4);
    }
}
