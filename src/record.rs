use crate::error::SortError;

/// A single input record. The price is the sort key.
///
/// Prices are held as integer hundredths so that comparison is a plain integer
/// comparison and the two decimal digit rendering is exact. Any decimal form is
/// accepted on decode and rounded to the nearest 1/100.
///
/// # Examples
/// ```
/// use record_cluster_sort::record::Record;
///
/// let record = Record::decode("Laptop,999.99,Dell,Electronics", ',')?;
/// assert_eq!(record.price_cents(), 99999);
/// assert_eq!(record.encode(','), "Laptop,999.99,Dell,Electronics");
/// # Ok::<(), record_cluster_sort::error::SortError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    name: String,
    price: i64,
    brand: String,
    category: String,
}

impl Record {
    /// Create a record from its fields. The price is given in hundredths.
    pub fn new(name: &str, price_cents: i64, brand: &str, category: &str) -> Record {
        Record {
            name: name.to_string(),
            price: price_cents,
            brand: brand.to_string(),
            category: category.to_string(),
        }
    }

    /// Parse one delimiter separated line in {name, price, brand, category} order.
    ///
    /// Fewer than four fields is a [SortError::MalformedRecord]; a price that is
    /// not a finite number is a [SortError::InvalidNumber]. Text fields must not
    /// contain the separator - that is an input invariant, not enforced here, and
    /// a violating category field keeps the excess separators.
    pub fn decode(line: &str, field_separator: char) -> Result<Record, SortError> {
        let mut fields = line.splitn(4, field_separator);
        let malformed = || SortError::MalformedRecord { line: line.to_string() };
        let name = fields.next().ok_or_else(malformed)?;
        let price = fields.next().ok_or_else(malformed)?;
        let brand = fields.next().ok_or_else(malformed)?;
        let category = fields.next().ok_or_else(malformed)?;
        Ok(
            Record {
                name: name.to_string(),
                price: parse_price(price)?,
                brand: brand.to_string(),
                category: category.to_string(),
            }
        )
    }

    /// Render the record as one delimiter separated line, price with exactly
    /// two decimal digits.
    pub fn encode(&self, field_separator: char) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.name,
            format_price(self.price),
            self.brand,
            self.category,
            sep = field_separator,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sort key in hundredths of a unit.
    pub fn price_cents(&self) -> i64 {
        self.price
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

fn parse_price(value: &str) -> Result<i64, SortError> {
    let price: f64 = value.trim().parse().or_else(
        |_| Err(SortError::InvalidNumber { value: value.to_string() })
    )?;
    if !price.is_finite() {
        return Err(SortError::InvalidNumber { value: value.to_string() });
    }
    Ok((price * 100.0).round() as i64)
}

fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() -> Result<(), SortError> {
        let line = "Keyboard,49.90,Logitech,Peripherals";
        let record = Record::decode(line, ',')?;
        assert_eq!(record.name(), "Keyboard");
        assert_eq!(record.price_cents(), 4990);
        assert_eq!(record.brand(), "Logitech");
        assert_eq!(record.category(), "Peripherals");
        assert_eq!(record.encode(','), line);
        assert_eq!(Record::decode(&record.encode(','), ',')?, record);
        Ok(())
    }

    #[test]
    fn test_price_rendering_is_normalized() -> Result<(), SortError> {
        for (input, rendered) in [("7", "7.00"), ("7.5", "7.50"), ("7.55", "7.55"), ("7.499", "7.50")] {
            let record = Record::decode(&format!("a,{input},b,c"), ',')?;
            assert_eq!(record.encode(','), format!("a,{rendered},b,c"));
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_after_rounding() -> Result<(), SortError> {
        let first = Record::decode("a,12.345,b,c", ',')?;
        let second = Record::decode(&first.encode(','), ',')?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_alternate_separator() -> Result<(), SortError> {
        let record = Record::decode("Desk\t120.00\tIkea\tFurniture", '\t')?;
        assert_eq!(record.name(), "Desk");
        assert_eq!(record.encode('\t'), "Desk\t120.00\tIkea\tFurniture");
        Ok(())
    }

    #[test]
    fn test_missing_fields() {
        for line in ["", "Laptop", "Laptop,999.99", "Laptop,999.99,Dell"] {
            let result = Record::decode(line, ',');
            assert!(matches!(result, Err(SortError::MalformedRecord { .. })), "line: {line:?}");
        }
    }

    #[test]
    fn test_invalid_price() {
        for line in ["Laptop,cheap,Dell,Electronics", "Laptop,,Dell,Electronics", "Laptop,inf,Dell,Electronics"] {
            let result = Record::decode(line, ',');
            assert!(matches!(result, Err(SortError::InvalidNumber { .. })), "line: {line:?}");
        }
    }

    #[test]
    fn test_negative_price() -> Result<(), SortError> {
        let record = Record::decode("Refund,-3.20,Store,Adjustments", ',')?;
        assert_eq!(record.price_cents(), -320);
        assert_eq!(record.encode(','), "Refund,-3.20,Store,Adjustments");
        Ok(())
    }
}
