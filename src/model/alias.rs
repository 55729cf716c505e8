use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A donor as shown within an alias
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DonorDto {
    pub id: i32,
    pub name: String,
    /// Code of the donor's category, e.g. `company` or `individual`
    pub donor_type: String,
    pub external_donor_id: Option<String>,
    pub postcode: Option<String>,
    pub company_registration_number: Option<String>,
}

/// A donor alias along with every donor it groups
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AliasDto {
    pub id: i32,
    pub name: String,
    pub note: Option<String>,
    pub last_edited_at: NaiveDateTime,
    pub donors: Vec<DonorDto>,
}

/// Aliases split by whether they group more than one donor
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AliasOverviewDto {
    /// Aliases grouping two or more donors
    pub grouped: Vec<AliasDto>,
    /// Aliases owning exactly one donor
    pub ungrouped: Vec<AliasDto>,
}

/// Request body for creating a new alias from existing donors
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAliasDto {
    pub name: String,
    pub note: Option<String>,
    pub donor_ids: Vec<i32>,
}

/// Request body for renaming an alias or changing its note
///
/// Fields left out of the request are not changed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAliasDto {
    pub name: Option<String>,
    pub note: Option<String>,
}

/// One alias within an exported alias ledger
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AliasExportEntry {
    pub alias_name: String,
    pub donor_names: Vec<String>,
}

/// Outcome of replacing the alias ledger with an uploaded one
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct BulkImportSummaryDto {
    /// Number of aliases created from the uploaded entries
    pub alias_count: usize,
    /// Number of singleton aliases created for donors the upload did not mention
    pub singleton_count: usize,
    /// Donor names in the upload that matched no known donor
    pub unmatched_donor_names: Vec<String>,
}
