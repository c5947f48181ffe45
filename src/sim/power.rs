use serde::{Deserialize, Deserializer, Serialize};

/// Nameplate capacity of the solar array (kW).
pub const MAX_SOLAR_KW: f64 = 1000.0;
/// Nameplate capacity of the wind turbine (kW).
pub const MAX_WIND_KW: f64 = 1000.0;
/// Nameplate capacity of the hydro plant (kW).
pub const MAX_HYDRO_KW: f64 = 1000.0;
/// Fraction of hydro nameplate that reaches the bus.
pub const HYDRO_EFFICIENCY: f64 = 0.9;

/// Resource availability, each nominally a percentage in `0..=100`.
///
/// Bounds are not enforced. Absent fields deserialize as `0.0`, and numeric
/// strings such as `"42.5"` are accepted alongside JSON numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    /// Solar irradiance availability (%).
    #[serde(deserialize_with = "lenient_f64")]
    pub sunlight: f64,
    /// Wind availability (%).
    #[serde(deserialize_with = "lenient_f64")]
    pub wind: f64,
    /// Water flow availability (%).
    #[serde(deserialize_with = "lenient_f64")]
    pub hydro: f64,
}

impl SimulationInput {
    pub fn new(sunlight: f64, wind: f64, hydro: f64) -> Self {
        Self {
            sunlight,
            wind,
            hydro,
        }
    }
}

/// Estimated output per source, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub solar_kw: f64,
    pub wind_kw: f64,
    pub hydro_kw: f64,
}

/// Plant capacities used by the simulator.
///
/// Defaults match the module constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantRatings {
    /// Solar nameplate (kW).
    pub max_solar_kw: f64,
    /// Wind nameplate (kW).
    pub max_wind_kw: f64,
    /// Hydro nameplate (kW).
    pub max_hydro_kw: f64,
    /// Hydro conversion efficiency (0.0-1.0).
    pub hydro_efficiency: f64,
}

impl Default for PlantRatings {
    fn default() -> Self {
        Self {
            max_solar_kw: MAX_SOLAR_KW,
            max_wind_kw: MAX_WIND_KW,
            max_hydro_kw: MAX_HYDRO_KW,
            hydro_efficiency: HYDRO_EFFICIENCY,
        }
    }
}

impl PlantRatings {
    /// Maps availability percentages to kilowatt output.
    ///
    /// Solar and hydro scale linearly. Wind follows the cubic power curve
    /// with an upper clamp at 100% only, so negative wind stays negative
    /// after cubing.
    ///
    /// # Arguments
    ///
    /// * `input` - Availability percentages; out-of-range values pass through
    ///
    /// # Returns
    ///
    /// Per-source output in kW, each rounded to two decimals.
    pub fn simulate(&self, input: &SimulationInput) -> SimulationOutput {
        let solar_kw = (input.sunlight / 100.0) * self.max_solar_kw;

        let wind_norm = (input.wind / 100.0).min(1.0);
        let wind_kw = wind_norm.powi(3) * self.max_wind_kw;

        let hydro_kw = (input.hydro / 100.0) * self.max_hydro_kw * self.hydro_efficiency;

        SimulationOutput {
            solar_kw: round2(solar_kw),
            wind_kw: round2(wind_kw),
            hydro_kw: round2(hydro_kw),
        }
    }
}

/// Runs the simulator against the default plant ratings.
pub fn simulate(input: &SimulationInput) -> SimulationOutput {
    PlantRatings::default().simulate(input)
}

/// Rounds to two decimal places.
///
/// Rounding is done on the exact decimal expansion of `x` with ties to
/// even, so `1.4849999999999999` stays `1.48` and `0.125` becomes `0.12`.
/// Magnitudes of `1e15` and above have no representable hundredths and are
/// returned unchanged, as are non-finite values.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() || x.abs() >= 1e15 {
        return x;
    }
    format!("{x:.2}").parse().unwrap_or(x)
}

/// Accepts a JSON number, a boolean (`true` is `1.0`) or a string holding a number.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Flag(bool),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Flag(b) => Ok(if b { 1.0 } else { 0.0 }),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("could not convert \"{s}\" to float"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sunlight: f64, wind: f64, hydro: f64) -> SimulationOutput {
        simulate(&SimulationInput::new(sunlight, wind, hydro))
    }

    #[test]
    fn all_zero_inputs_produce_zero_output() {
        let out = run(0.0, 0.0, 0.0);
        assert_eq!(out.solar_kw, 0.0);
        assert_eq!(out.wind_kw, 0.0);
        assert_eq!(out.hydro_kw, 0.0);
    }

    #[test]
    fn solar_is_ten_kw_per_percent() {
        for pct in 0..=100 {
            let sunlight = pct as f64;
            let out = run(sunlight, 0.0, 0.0);
            assert!(
                (out.solar_kw - sunlight * 10.0).abs() < 1e-9,
                "sunlight {sunlight} gave {}",
                out.solar_kw
            );
        }
        assert_eq!(run(33.333, 0.0, 0.0).solar_kw, 333.33);
    }

    #[test]
    fn wind_follows_cubic_curve() {
        assert_eq!(run(0.0, 50.0, 0.0).wind_kw, 125.0);
        assert_eq!(run(0.0, 20.0, 0.0).wind_kw, 8.0);
    }

    #[test]
    fn wind_clamps_at_full_capacity() {
        for wind in [100.0, 101.0, 150.0, 1e6] {
            assert_eq!(run(0.0, wind, 0.0).wind_kw, 1000.0);
        }
    }

    #[test]
    fn negative_wind_is_not_clamped_below() {
        // (-0.5)^3 * 1000
        assert_eq!(run(0.0, -50.0, 0.0).wind_kw, -125.0);
    }

    #[test]
    fn hydro_applies_efficiency() {
        assert_eq!(run(0.0, 0.0, 100.0).hydro_kw, 900.0);
        assert_eq!(run(0.0, 0.0, 50.0).hydro_kw, 450.0);
    }

    #[test]
    fn out_of_range_inputs_pass_through() {
        let out = run(150.0, 0.0, -10.0);
        assert_eq!(out.solar_kw, 1500.0);
        assert_eq!(out.hydro_kw, -90.0);
    }

    #[test]
    fn custom_ratings_scale_output() {
        let plant = PlantRatings {
            max_solar_kw: 5.0,
            max_wind_kw: 2.0,
            max_hydro_kw: 10.0,
            hydro_efficiency: 0.5,
        };
        let out = plant.simulate(&SimulationInput::new(50.0, 100.0, 100.0));
        assert_eq!(out.solar_kw, 2.5);
        assert_eq!(out.wind_kw, 2.0);
        assert_eq!(out.hydro_kw, 5.0);
    }

    #[test]
    fn round2_uses_exact_decimal_value() {
        assert_eq!(round2(1.484_999_999_999_999_9), 1.48);
        // 2.675 is stored just below the half
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(7.0), 7.0);
        assert_eq!(round2(-2.345_01), -2.35);
    }

    #[test]
    fn round2_breaks_exact_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.625), -0.62);
    }

    #[test]
    fn small_hydro_flows_round_on_decimal_value() {
        assert_eq!(run(0.0, 0.0, 0.095).hydro_kw, 0.85);
        assert_eq!(run(0.0, 0.0, 0.165).hydro_kw, 1.48);
    }

    #[test]
    fn huge_inputs_stay_finite() {
        let out = run(1e306, 0.0, -1e306);
        assert!(out.solar_kw.is_finite());
        assert_eq!(out.solar_kw, (1e306 / 100.0) * 1000.0);
        assert!(out.hydro_kw.is_finite() && out.hydro_kw < 0.0);

        let json = serde_json::to_value(out).expect("output should serialize");
        assert!(json["solar_kw"].is_f64());
    }

    #[test]
    fn round2_passes_through_large_and_non_finite() {
        assert_eq!(round2(1.5e15), 1.5e15);
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn input_defaults_missing_fields_to_zero() {
        let input: SimulationInput =
            serde_json::from_str(r#"{"sunlight": 40}"#).expect("partial input should parse");
        assert_eq!(input, SimulationInput::new(40.0, 0.0, 0.0));
    }

    #[test]
    fn input_accepts_numeric_strings() {
        let input: SimulationInput =
            serde_json::from_str(r#"{"sunlight": "12.5", "wind": 30, "hydro": " 7 "}"#)
                .expect("numeric strings should parse");
        assert_eq!(input, SimulationInput::new(12.5, 30.0, 7.0));
    }

    #[test]
    fn input_accepts_booleans_as_zero_or_one() {
        let input: SimulationInput =
            serde_json::from_str(r#"{"sunlight": true, "wind": false, "hydro": 3}"#)
                .expect("booleans should parse");
        assert_eq!(input, SimulationInput::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn input_rejects_non_numeric_strings() {
        let result = serde_json::from_str::<SimulationInput>(r#"{"wind": "gusty"}"#);
        assert!(result.is_err());
    }
}
