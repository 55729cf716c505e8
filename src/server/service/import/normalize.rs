//! Turns raw Electoral Commission rows into validated donation records.
//!
//! A row is first checked for relevancy (central party donations that were accepted and not
//! reported for a referendum, election or poll). Irrelevant rows are discarded without being
//! parsed. Relevant rows are scrubbed of embedded line breaks and parsed; any value that
//! cannot be parsed is a fatal error for the import.

use std::{collections::HashMap, str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::server::{
    data::donor::DonorMetadata,
    error::import::ImportError,
    util::reference::{donor_type_code, DONATION_TYPES},
};

/// One row of the source CSV, keyed by column header.
pub type RawRecord = HashMap<String, String>;

pub const EC_REF: &str = "ECRef";
pub const REGULATED_ENTITY_NAME: &str = "RegulatedEntityName";
pub const REGULATED_ENTITY_ID: &str = "RegulatedEntityId";
pub const VALUE: &str = "Value";
pub const ACCEPTED_DATE: &str = "AcceptedDate";
pub const RECEIVED_DATE: &str = "ReceivedDate";
pub const ACCOUNTING_UNIT_NAME: &str = "AccountingUnitName";
pub const DONOR_NAME: &str = "DonorName";
pub const DONOR_STATUS: &str = "DonorStatus";
pub const DONOR_ID: &str = "DonorId";
pub const COMPANY_REGISTRATION_NUMBER: &str = "CompanyRegistrationNumber";
pub const POSTCODE: &str = "Postcode";
pub const DONATION_TYPE: &str = "DonationType";
pub const DONATION_ACTION: &str = "DonationAction";
pub const REPORTING_PERIOD_NAME: &str = "ReportingPeriodName";
pub const IS_BEQUEST: &str = "IsBequest";

const BYTE_ORDER_MARK: char = '\u{feff}';
const RECORD_DATE_FORMAT: &str = "%d/%m/%Y";
const DEREGISTERED_DATE_FORMAT: &str = "%d/%m/%y";

static NON_DONATION_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(referendum)|(election)|(poll)").expect("valid regex"));
static REPEATED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));
static SPACE_AFTER_OPEN_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s+").expect("valid regex"));
static SPACE_BEFORE_CLOSE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\)").expect("valid regex"));

/// A relevant donation, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub external_ref: String,
    pub recipient_name: String,
    pub deregistered_date: Option<NaiveDate>,
    pub donor_name: String,
    pub donor_type_code: String,
    pub donation_type_code: String,
    pub value: Decimal,
    pub date: NaiveDate,
    pub is_legacy: bool,
    pub donor: DonorMetadata,
}

/// Normalizes one raw row.
///
/// # Returns
/// - `Ok(Some(NormalizedRecord))` - The row is a relevant donation
/// - `Ok(None)` - The row is not relevant and should be discarded
/// - `Err(ImportError)` - The row is relevant but a value could not be parsed
pub fn normalize(record: &RawRecord) -> Result<Option<NormalizedRecord>, ImportError> {
    if !is_relevant(record) {
        return Ok(None);
    }

    let record = scrub_line_breaks(record);

    let external_ref = field(&record, EC_REF).trim().to_string();
    if external_ref.is_empty() {
        return Err(ImportError::RecordParse {
            external_ref,
            field: EC_REF,
            value: String::new(),
        });
    }
    let parse_error = |column: &'static str| ImportError::RecordParse {
        external_ref: external_ref.clone(),
        field: column,
        value: field(&record, column).to_string(),
    };

    let (recipient_name, deregistered_date) =
        split_recipient(field(&record, REGULATED_ENTITY_NAME))
            .ok_or_else(|| parse_error(REGULATED_ENTITY_NAME))?;

    let donor_status = field(&record, DONOR_STATUS);
    let donor_type_code = donor_type_code(donor_status)
        .ok_or_else(|| ImportError::UnknownDonorType(donor_status.to_string()))?;

    let donation_type_code = field(&record, DONATION_TYPE);
    if !DONATION_TYPES.contains(&donation_type_code) {
        return Err(ImportError::UnknownDonationType(
            donation_type_code.to_string(),
        ));
    }

    let value = parse_value(field(&record, VALUE)).ok_or_else(|| parse_error(VALUE))?;

    let (date_column, date_value) = match field(&record, RECEIVED_DATE).trim() {
        "" => (ACCEPTED_DATE, field(&record, ACCEPTED_DATE).trim()),
        received => (RECEIVED_DATE, received),
    };
    let date = NaiveDate::parse_from_str(date_value, RECORD_DATE_FORMAT)
        .map_err(|_| parse_error(date_column))?;

    Ok(Some(NormalizedRecord {
        recipient_name,
        deregistered_date,
        donor_name: clean_donor_name(field(&record, DONOR_NAME)),
        donor_type_code: donor_type_code.to_string(),
        donation_type_code: donation_type_code.to_string(),
        value,
        date,
        is_legacy: field(&record, IS_BEQUEST).trim().eq_ignore_ascii_case("true"),
        donor: DonorMetadata {
            external_donor_id: optional(field(&record, DONOR_ID)),
            external_entity_id: optional(field(&record, REGULATED_ENTITY_ID)),
            postcode: optional(field(&record, POSTCODE)),
            company_registration_number: optional(field(
                &record,
                COMPANY_REGISTRATION_NUMBER,
            )),
        },
        external_ref,
    }))
}

/// Checks whether a row describes a donation worth importing.
///
/// Missing columns count as empty.
pub fn is_relevant(record: &RawRecord) -> bool {
    field(record, ACCOUNTING_UNIT_NAME) == "Central Party"
        && field(record, DONOR_STATUS) != "Unidentifiable Donor"
        && !matches!(field(record, DONATION_ACTION), "Returned" | "Forfeited")
        && !NON_DONATION_PERIOD.is_match(field(record, REPORTING_PERIOD_NAME))
}

/// Replaces `\n` with a space and drops `\r` in every value except bare `TRUE`/`FALSE` flags.
pub fn scrub_line_breaks(record: &RawRecord) -> RawRecord {
    record
        .iter()
        .map(|(column, value)| {
            let value = match value.trim() {
                "TRUE" | "FALSE" => value.clone(),
                _ => value.replace('\n', " ").replace('\r', ""),
            };
            (column.clone(), value)
        })
        .collect()
}

/// Trims a donor name, collapses repeated spaces and tightens spacing inside parentheses.
pub fn clean_donor_name(name: &str) -> String {
    let name = REPEATED_SPACES.replace_all(name.trim(), " ");
    let name = SPACE_AFTER_OPEN_PAREN.replace_all(&name, "(");
    SPACE_BEFORE_CLOSE_PAREN.replace_all(&name, ")").into_owned()
}

/// Splits `"Name [De-registered dd/mm/yy]"` into the name and deregistration date.
///
/// Names without a deregistration suffix are returned unchanged with no date. Returns `None`
/// if the suffix is present but its date cannot be parsed.
pub fn split_recipient(entity_name: &str) -> Option<(String, Option<NaiveDate>)> {
    if !entity_name.contains("De-registered") {
        return Some((entity_name.to_string(), None));
    }

    let date = entity_name.split_whitespace().last()?.trim_end_matches(']');
    let date = NaiveDate::parse_from_str(date, DEREGISTERED_DATE_FORMAT).ok()?;
    let name = entity_name
        .split(" [")
        .next()
        .unwrap_or(entity_name)
        .trim()
        .to_string();

    Some((name, Some(date)))
}

/// Parses a money value such as `£1,500.00`, tolerating a mis-decoded pound sign.
pub fn parse_value(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '£' | 'Â' | ','))
        .collect();

    Decimal::from_str(cleaned.trim()).ok()
}

fn field<'r>(record: &'r RawRecord, column: &str) -> &'r str {
    record
        .get(column)
        .or_else(|| {
            (column == EC_REF)
                .then(|| record.get(&format!("{BYTE_ORDER_MARK}{EC_REF}")))
                .flatten()
        })
        .map(String::as_str)
        .unwrap_or("")
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
