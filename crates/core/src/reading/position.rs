use crate::error::{CoreError, Result};

/// Parse a combined `"lat,lon"` position string.
///
/// Both parts are trimmed. Exactly two finite numbers within WGS84 bounds
/// are accepted.
pub fn parse_position(raw: &str) -> Result<(f64, f64)> {
    let malformed = |reason: &str| CoreError::MalformedPosition {
        raw: raw.to_owned(),
        reason: reason.to_owned(),
    };

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [lat, lon] = parts.as_slice() else {
        return Err(malformed("expected exactly two comma-separated values"));
    };
    let lat: f64 = lat.parse().map_err(|_| malformed("latitude is not a number"))?;
    let lon: f64 = lon.parse().map_err(|_| malformed("longitude is not a number"))?;

    if !lat.is_finite() || !lon.is_finite() {
        return Err(malformed("coordinates must be finite"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(malformed("latitude out of range"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(malformed("longitude out of range"));
    }
    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_position("45.0, 9.0").unwrap(), (45.0, 9.0));
        assert_eq!(parse_position(" 45.4642 ,9.19 ").unwrap(), (45.4642, 9.19));
    }

    #[test]
    fn negative_coordinates() {
        assert_eq!(parse_position("-33.86,151.2").unwrap(), (-33.86, 151.2));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_position("bad").unwrap_err();
        assert!(matches!(err, CoreError::MalformedPosition { .. }));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(parse_position("1,2,3").is_err());
        assert!(parse_position("45.0").is_err());
        assert!(parse_position(",").is_err());
    }

    #[test]
    fn rejects_non_finite_and_out_of_bounds() {
        assert!(parse_position("NaN,9.0").is_err());
        assert!(parse_position("inf,9.0").is_err());
        assert!(parse_position("91.0,9.0").is_err());
        assert!(parse_position("45.0,181.0").is_err());
    }
}
