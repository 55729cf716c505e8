//! Factories for raw Electoral Commission donation records.

use std::collections::HashMap;

use crate::{constant::TEST_RECIPIENT_NAME, error::TestError};

/// Source columns in the order the Electoral Commission export uses them.
pub const RECORD_COLUMNS: &[&str] = &[
    "ECRef",
    "RegulatedEntityName",
    "RegulatedEntityId",
    "Value",
    "AcceptedDate",
    "ReceivedDate",
    "AccountingUnitName",
    "DonorName",
    "DonorStatus",
    "DonorId",
    "CompanyRegistrationNumber",
    "Postcode",
    "DonationType",
    "DonationAction",
    "ReportingPeriodName",
    "IsBequest",
];

/// Creates a relevant cash donation record from an individual.
///
/// Override individual columns with `insert` on the returned map.
pub fn raw_record(external_ref: &str, donor_name: &str) -> HashMap<String, String> {
    let values = [
        ("ECRef", external_ref),
        ("RegulatedEntityName", TEST_RECIPIENT_NAME),
        ("RegulatedEntityId", "52"),
        ("Value", "£1,500.00"),
        ("AcceptedDate", "02/03/2021"),
        ("ReceivedDate", "01/03/2021"),
        ("AccountingUnitName", "Central Party"),
        ("DonorName", donor_name),
        ("DonorStatus", "Individual"),
        ("DonorId", "9001"),
        ("CompanyRegistrationNumber", ""),
        ("Postcode", "SW1A 1AA"),
        ("DonationType", "Cash"),
        ("DonationAction", ""),
        ("ReportingPeriodName", "Q1 2021"),
        ("IsBequest", "False"),
    ];

    values
        .into_iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect()
}

/// Serializes records into CSV bytes with the standard header row.
///
/// When `with_bom` is set the header starts with a UTF-8 byte-order mark as the real export does.
pub fn csv_bytes(
    records: &[HashMap<String, String>],
    with_bom: bool,
) -> Result<Vec<u8>, TestError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = RECORD_COLUMNS.iter().map(|c| c.to_string()).collect();
    if with_bom {
        header[0] = format!("\u{feff}{}", header[0]);
    }
    writer.write_record(&header)?;

    for record in records {
        let row: Vec<&str> = RECORD_COLUMNS
            .iter()
            .map(|column| record.get(*column).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|err| TestError::Fixture(err.to_string()))
}
