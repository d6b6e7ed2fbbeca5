//! In-process unit conversion.

type Transform = fn(f64) -> f64;

/// Supported `(from, to)` pairs.
const CONVERSIONS: &[(&str, &str, Transform)] = &[
    // length
    ("km", "m", km_to_m),
    ("m", "km", m_to_km),
    ("m", "cm", m_to_cm),
    ("cm", "m", cm_to_m),
    // mass
    ("kg", "g", kg_to_g),
    ("g", "kg", g_to_kg),
    // temperature
    ("C", "F", c_to_f),
    ("F", "C", f_to_c),
];

fn km_to_m(x: f64) -> f64 {
    x * 1000.0
}

fn m_to_km(x: f64) -> f64 {
    x / 1000.0
}

fn m_to_cm(x: f64) -> f64 {
    x * 100.0
}

fn cm_to_m(x: f64) -> f64 {
    x / 100.0
}

fn kg_to_g(x: f64) -> f64 {
    x * 1000.0
}

fn g_to_kg(x: f64) -> f64 {
    x / 1000.0
}

fn c_to_f(x: f64) -> f64 {
    x * 9.0 / 5.0 + 32.0
}

fn f_to_c(x: f64) -> f64 {
    (x - 32.0) * 5.0 / 9.0
}

/// Convert `value`, or `None` for an unsupported pair. Units are
/// case-sensitive.
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    CONVERSIONS
        .iter()
        .find(|(from, to, _)| *from == from_unit && *to == to_unit)
        .map(|(_, _, transform)| transform(value))
}

/// Human-readable conversion result. Never fails.
pub fn unit_converter(value: f64, from_unit: &str, to_unit: &str) -> String {
    match convert(value, from_unit, to_unit) {
        Some(result) => format!("{} {} = {:.2} {}", value, from_unit, result, to_unit),
        None => format!(
            "Conversion from {} to {} is not supported",
            from_unit, to_unit
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_to_two_decimals() {
        assert_eq!(unit_converter(100.0, "km", "m"), "100 km = 100000.00 m");
        assert_eq!(unit_converter(0.0, "C", "F"), "0 C = 32.00 F");
        assert_eq!(unit_converter(2.5, "kg", "g"), "2.5 kg = 2500.00 g");
        assert_eq!(unit_converter(1.0, "g", "kg"), "1 g = 0.00 kg");
    }

    #[test]
    fn unsupported_pairs_are_reported_not_raised() {
        for (from, to) in [("km", "cm"), ("cm", "km"), ("kg", "m"), ("c", "f"), ("", "")] {
            let text = unit_converter(1.0, from, to);
            assert!(text.contains("not supported"), "{from}->{to}: {text}");
            assert_eq!(convert(1.0, from, to), None);
        }
    }

    #[test]
    fn every_pair_has_an_inverse() {
        for (from, to, _) in CONVERSIONS {
            assert!(convert(1.0, to, from).is_some(), "{to}->{from} missing");
        }
    }

    #[test]
    fn temperature_round_trip_within_rounding() {
        for x in [-40.0, -12.34, 0.0, 21.5, 37.0, 100.0, 451.0] {
            let f = (convert(x, "C", "F").unwrap() * 100.0).round() / 100.0;
            let back = (convert(f, "F", "C").unwrap() * 100.0).round() / 100.0;
            assert!((back - x).abs() <= 0.01, "{x} -> {f} -> {back}");
        }
    }
}
