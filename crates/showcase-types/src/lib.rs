//! Validated text primitives shared by the showcase crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input is not usable as an asset file name
    #[error("invalid asset name: {0}")]
    InvalidAssetName(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A flat file name that is safe to resolve inside an asset directory.
///
/// Asset names are requested by logical name from outside the process (page markup, HTTP paths),
/// so they are restricted to a conservative ASCII set:
/// - no path separators and no leading `.` (no traversal, no hidden files)
/// - only `0-9`, `a-z`, `A-Z`, `.`, `-`, `_`
/// - at most [`AssetName::MAX_LEN`] bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetName(String);

impl AssetName {
    /// Maximum accepted length in bytes.
    pub const MAX_LEN: usize = 128;

    /// Validates `input` and wraps it.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let name = input.as_ref();
        if name.trim().is_empty() {
            return Err(TextError::Empty);
        }
        if name.len() > Self::MAX_LEN {
            return Err(TextError::InvalidAssetName(format!(
                "exceeds maximum length of {} characters",
                Self::MAX_LEN
            )));
        }
        if name.starts_with('.') {
            return Err(TextError::InvalidAssetName(format!(
                "'{name}' must not start with '.'"
            )));
        }
        let ok = name
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));
        if !ok {
            return Err(TextError::InvalidAssetName(format!(
                "'{name}' contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
            )));
        }
        Ok(Self(name.to_owned()))
    }

    /// Returns the file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

impl std::fmt::Display for AssetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
