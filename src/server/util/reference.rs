//! Reference categories used by Electoral Commission donation records.
//!
//! These lists are seeded into `donor_type` and `donation_type` before every import, so records
//! can refer to them by code. Seeding is idempotent.

/// Donor categories as `(code, display name)` pairs.
///
/// The display name is the exact value found in the source's `DonorStatus` column.
pub const DONOR_TYPES: &[(&str, &str)] = &[
    ("individual", "Individual"),
    ("company", "Company"),
    ("registeredpoliticalparty", "Registered Political Party"),
    ("unincorporatedassociation", "Unincorporated Association"),
    ("other", "Other"),
    ("tradeunion", "Trade Union"),
    ("buildingsociety", "Building Society"),
    ("publicfund", "Public Fund"),
    ("limitedliabilitypartnership", "Limited Liability Partnership"),
    ("trust", "Trust"),
    ("friendlysociety", "Friendly Society"),
    ("impermissibledonor", "Impermissible Donor"),
    ("na", "N/A"),
    ("unidentifiabledonor", "Unidentifiable Donor"),
];

/// Donation categories, stored using the source's `DonationType` value as the code.
pub const DONATION_TYPES: &[&str] = &[
    "Cash",
    "Non Cash",
    "Visit",
    "Public Funds",
    "Exempt Trust",
    "Permissible Donor Exempt Trust",
    "Impermissible Donor",
    "Unidentified Donor",
];

/// Looks up the donor type code for a `DonorStatus` display name.
///
/// # Returns
/// - `Some(&str)` - The matching code
/// - `None` - The status is not a known donor category
pub fn donor_type_code(display_name: &str) -> Option<&'static str> {
    DONOR_TYPES
        .iter()
        .find(|(_, display)| *display == display_name)
        .map(|(code, _)| *code)
}
