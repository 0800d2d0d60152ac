use super::ValidationError;

/// Display name parts captured at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    pub fn new(first: &str, last: &str) -> Result<Self, ValidationError> {
        let first = first.trim();
        let last = last.trim();
        if first.is_empty() {
            return Err(ValidationError::MissingField("firstname"));
        }
        if last.is_empty() {
            return Err(ValidationError::MissingField("lastname"));
        }
        Ok(Self {
            first: first.to_owned(),
            last: last.to_owned(),
        })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_name_parts() {
        let name = PersonName::new(" Ada ", " Lovelace ").unwrap();
        assert_eq!(name.first(), "Ada");
        assert_eq!(name.last(), "Lovelace");
    }

    #[test]
    fn rejects_blank_parts() {
        assert_eq!(
            PersonName::new("  ", "Lovelace"),
            Err(ValidationError::MissingField("firstname"))
        );
        assert_eq!(
            PersonName::new("Ada", ""),
            Err(ValidationError::MissingField("lastname"))
        );
    }
}
