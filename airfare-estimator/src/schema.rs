use airfare_core::{FareError, FareResult, FeatureRow};

/// Scalar inputs of the multi-hop network in the order it was trained on.
/// The cabin indicator columns follow, in encoder class order.
pub const MULTIHOP_SCALAR_COLUMNS: [&str; 15] = [
    "flightDayOfWeekSin",
    "flightDayOfWeekCos",
    "flightMonthSin",
    "flightMonthCos",
    "flightHourSin",
    "flightHourCos",
    "flightMinuteSin",
    "flightMinuteCos",
    "timeDeltaDays",
    "travelDurationDay",
    "totalTravelDistance",
    "isBasicEconomy",
    "isRefundable",
    "isNonStop",
    "numLegs",
];

/// Training-order schema for artifacts that do not declare their own
pub fn default_multihop_schema(cabin_classes: &[String]) -> Vec<String> {
    MULTIHOP_SCALAR_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(cabin_classes.iter().cloned())
        .collect()
}

/// Reorder `row` to match `schema` by name.
///
/// The row must carry exactly the schema's columns: a missing or an extra
/// column means the assembled features and the model disagree, and guessing
/// an order would silently misalign them.
pub fn align(row: &FeatureRow, schema: &[String]) -> FareResult<FeatureRow> {
    if let Some(extra) = row.names().find(|name| !schema.iter().any(|s| s == name)) {
        return Err(FareError::MalformedInput(format!(
            "feature '{}' is not part of the model input schema",
            extra
        )));
    }

    let mut aligned = FeatureRow::new();
    for column in schema {
        let value = row.get(column).ok_or_else(|| {
            FareError::MalformedInput(format!("model input '{}' was not assembled", column))
        })?;
        aligned.set(column, value.clone());
    }

    if aligned.len() != schema.len() {
        return Err(FareError::MalformedInput("model input schema repeats a column".to_string()));
    }
    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_align_reorders_by_name() {
        let row = FeatureRow::new().with("b", 2.0).with("a", 1.0).with("coach", 1.0);
        let aligned = align(&row, &schema(&["a", "b", "coach"])).unwrap();
        let names: Vec<&str> = aligned.names().collect();
        assert_eq!(names, vec!["a", "b", "coach"]);
    }

    #[test]
    fn test_align_rejects_mismatch() {
        let row = FeatureRow::new().with("a", 1.0).with("b", 2.0);
        assert!(matches!(align(&row, &schema(&["a"])), Err(FareError::MalformedInput(_))));
        assert!(matches!(align(&row, &schema(&["a", "b", "c"])), Err(FareError::MalformedInput(_))));
        assert!(align(&row, &schema(&["a", "b", "a"])).is_err());
    }

    #[test]
    fn test_default_schema_appends_cabins() {
        let s = default_multihop_schema(&["business".to_string(), "coach".to_string()]);
        assert_eq!(s.len(), 17);
        assert_eq!(s[0], "flightDayOfWeekSin");
        assert_eq!(s[14], "numLegs");
        assert_eq!(s[16], "coach");
    }
}
