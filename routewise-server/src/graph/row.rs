//! Raw tabular fare rows.

use crate::domain::{AirportId, Fare, FareRecord};

use super::error::BuildError;

/// One unvalidated row of a fare table.
///
/// Every field is optional because tabular sources routinely have gaps.
/// [`FareRow::validate`] turns the row into a [`FareRecord`] or reports
/// why it cannot be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FareRow {
    /// 1-based data row number, used in error messages.
    pub row: usize,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub fare: Option<String>,
}

impl FareRow {
    /// Create a row with every field present.
    pub fn new(
        row: usize,
        origin: impl Into<String>,
        destination: impl Into<String>,
        fare: impl Into<String>,
    ) -> Self {
        Self {
            row,
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            fare: Some(fare.into()),
        }
    }

    /// Validate the row.
    ///
    /// Airport columns are checked before the fare, so a row missing both
    /// reports the missing airport.
    pub fn validate(&self) -> Result<FareRecord, BuildError> {
        let origin = self.airport(self.origin.as_deref(), "origin")?;
        let destination = self.airport(self.destination.as_deref(), "destination")?;
        let fare = self.fare()?;

        Ok(FareRecord::new(origin, destination, fare))
    }

    fn airport(&self, value: Option<&str>, field: &'static str) -> Result<AirportId, BuildError> {
        let value = value.map(str::trim).unwrap_or_default();
        AirportId::parse(value).map_err(|_| BuildError::MissingField {
            row: self.row,
            field,
        })
    }

    fn fare(&self) -> Result<Fare, BuildError> {
        let raw = match self.fare.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Err(self.malformed("fare is missing".to_string())),
        };

        let amount: f64 = raw
            .parse()
            .map_err(|_| self.malformed(format!("fare is not a number: {raw:?}")))?;

        Fare::new(amount).map_err(|e| self.malformed(e.to_string()))
    }

    fn malformed(&self, reason: String) -> BuildError {
        BuildError::MalformedRecord {
            row: self.row,
            reason,
        }
    }
}
