/// Donor type created for donors inserted by fixtures when no other type is requested.
pub const TEST_DONOR_TYPE: (&str, &str) = ("individual", "Individual");

/// Donor types as `(code, DonorStatus display name)`, mirroring the seeded production list.
pub const TEST_DONOR_TYPES: &[(&str, &str)] = &[
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

/// Donation type used by fixture donations.
pub const TEST_DONATION_TYPE: &str = "Cash";

pub const TEST_DONATION_TYPES: &[&str] = &[
    "Cash",
    "Non Cash",
    "Visit",
    "Public Funds",
    "Exempt Trust",
    "Permissible Donor Exempt Trust",
    "Impermissible Donor",
    "Unidentified Donor",
];

/// Recipient used by record factories.
pub const TEST_RECIPIENT_NAME: &str = "Example Party";
