//! The attributes column of a GFF3 feature record.
//!
//! Only the two attributes that link features together are retained:
//!
//! - `ID=`, the identifier of the feature itself.
//! - `Parent=`, the identifier(s) of the feature(s) that own this feature.
//!
//! Identifiers frequently carry a type prefix separated by a colon (e.g.,
//! `transcript:ENST0001` or `gene:ENSG0001`). Only the text after the _last_
//! colon is used as the effective identifier, so that features referring to
//! each other with or without the prefix still link up.

use std::str::FromStr;

/// The delimiter between attributes.
const ATTRIBUTE_DELIMITER: char = ';';

/// The delimiter between multiple values of a single attribute.
const VALUE_DELIMITER: char = ',';

/// The separator between a type prefix and an identifier.
const PREFIX_SEPARATOR: char = ':';

/// The key prefix for the identifier attribute.
pub const ID_KEY: &str = "ID=";

/// The key prefix for the parent attribute.
pub const PARENT_KEY: &str = "Parent=";

/// The attributes of a GFF3 feature record that are relevant to building a
/// gene model.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Attributes {
    /// The feature's own identifier.
    id: Option<String>,
    /// The identifiers of the feature's parents.
    parents: Vec<String>,
}

impl Attributes {
    /// Gets the feature's identifier, if one was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::record::Attributes;
    ///
    /// let attributes = "ID=transcript:ENST01.2;Parent=gene:ENSG01".parse::<Attributes>()?;
    /// assert_eq!(attributes.id(), Some("ENST01.2"));
    /// assert_eq!(attributes.parent(), Some("ENSG01"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Gets every parent identifier, in the order they were listed.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Gets the first parent identifier, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

impl FromStr for Attributes {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut attributes = Attributes::default();

        for attribute in s.split(ATTRIBUTE_DELIMITER).map(str::trim) {
            if let Some(value) = attribute.strip_prefix(ID_KEY) {
                attributes.id = identifier(value);
            } else if let Some(values) = attribute.strip_prefix(PARENT_KEY) {
                attributes.parents = values.split(VALUE_DELIMITER).filter_map(identifier).collect();
            }
        }

        Ok(attributes)
    }
}

/// Extracts the effective identifier from a raw attribute value.
///
/// Returns [`None`] if nothing is left after removing the type prefix.
fn identifier(value: &str) -> Option<String> {
    let value = value
        .rsplit(PREFIX_SEPARATOR)
        .next()
        .unwrap_or(value)
        .trim();

    match value.is_empty() {
        true => None,
        false => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_and_parent() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "ID=rna-XM_001;Parent=gene-ABC;gbkey=mRNA".parse::<Attributes>()?;
        assert_eq!(attributes.id(), Some("rna-XM_001"));
        assert_eq!(attributes.parent(), Some("gene-ABC"));
        assert_eq!(attributes.parents(), &[String::from("gene-ABC")]);
        Ok(())
    }

    #[test]
    fn test_version_prefix_is_stripped() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "ID=exon:a:b:ENSE01;Parent=transcript:ENST01".parse::<Attributes>()?;
        assert_eq!(attributes.id(), Some("ENSE01"));
        assert_eq!(attributes.parent(), Some("ENST01"));
        Ok(())
    }

    #[test]
    fn test_multiple_parents() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Parent=transcript:T1,transcript:T2".parse::<Attributes>()?;
        assert_eq!(attributes.id(), None);
        assert_eq!(
            attributes.parents(),
            &[String::from("T1"), String::from("T2")]
        );
        Ok(())
    }

    #[test]
    fn test_missing_and_empty_values() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Name=foo; ID=; Parent=gene:".parse::<Attributes>()?;
        assert_eq!(attributes.id(), None);
        assert_eq!(attributes.parent(), None);

        let attributes = "".parse::<Attributes>()?;
        assert_eq!(attributes, Attributes::default());
        Ok(())
    }

    #[test]
    fn test_keys_are_case_sensitive() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "id=T1;parent=G1".parse::<Attributes>()?;
        assert_eq!(attributes.id(), None);
        assert_eq!(attributes.parent(), None);
        Ok(())
    }
}
