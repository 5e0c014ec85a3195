use crate::destination::table_short_name;

pub const TABLE_ARNS_VAR: &str = "DYNAMODB_TABLE_ARNS";
pub const BUCKET_ARN_VAR: &str = "S3_BUCKET_ARN";
pub const BUCKET_NAME_VAR: &str = "S3_BUCKET_NAME";
pub const BUCKET_MODE_VAR: &str = "EXPORT_BUCKET_MODE";

/// Selects how the export destination bucket is configured.
///
/// Both modes hand the configured value to the export request unchanged; they
/// only differ in which environment variable carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketMode {
    /// Full bucket ARN, e.g. `arn:aws:s3:::my-bucket`.
    #[default]
    ResourceName,
    /// Plain bucket name, e.g. `my-bucket`.
    PlainName,
}

impl BucketMode {
    pub fn env_var(self) -> &'static str {
        match self {
            Self::ResourceName => BUCKET_ARN_VAR,
            Self::PlainName => BUCKET_NAME_VAR,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "arn" | "resource_name" | "resource-name" => Ok(Self::ResourceName),
            "name" | "plain_name" | "plain-name" => Ok(Self::PlainName),
            other => Err(ConfigError::new(format!(
                "Unsupported {BUCKET_MODE_VAR} '{other}' (expected arn or name)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub bucket_mode: BucketMode,
    pub bucket: String,
    pub table_arns: Vec<String>,
}

impl ExportConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration through `lookup`, which returns the value of
    /// a named variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bucket_mode = match lookup(BUCKET_MODE_VAR) {
            Some(raw) if !raw.trim().is_empty() => BucketMode::parse(&raw)?,
            _ => BucketMode::default(),
        };

        let bucket_var = bucket_mode.env_var();
        let bucket = required(&lookup, bucket_var)?;
        let table_arns = parse_table_arns(&required(&lookup, TABLE_ARNS_VAR)?)?;

        Ok(Self {
            bucket_mode,
            bucket,
            table_arns,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or_else(|| ConfigError::new(format!("{name} must be configured")))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::new(format!("{name} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Splits a comma-separated list of table ARNs, keeping the given order.
///
/// Every entry must end in a non-empty `/`-separated table name.
pub fn parse_table_arns(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut table_arns = Vec::new();
    for (position, entry) in raw.split(',').enumerate() {
        let table_arn = entry.trim();
        if table_arn.is_empty() {
            return Err(ConfigError::new(format!(
                "{TABLE_ARNS_VAR} entry {position} is empty"
            )));
        }
        if table_short_name(table_arn).is_none() {
            return Err(ConfigError::new(format!(
                "Table identifier '{table_arn}' has no table name after '/'"
            )));
        }
        table_arns.push(table_arn.to_string());
    }
    Ok(table_arns)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}
