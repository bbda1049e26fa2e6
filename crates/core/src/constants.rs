/// Placeholder written to metadata fields the resolution left empty
pub const UNKNOWN_FIELD: &str = "UNKNOWN";

/// Platform key used for rows that carry no platform column
pub const DEFAULT_PLATFORM: &str = "DEFAULT";

/// Group key used when no custom group label is supplied
pub const DEFAULT_GROUP: &str = "DEFAULT";

/// Currencies accepted on import rows
pub const SUPPORTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "TRY"];
