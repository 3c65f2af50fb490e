#[cfg(test)]
mod tests_config {
    use depth_chart_rs::{ChartConfig, ChartDimensions, ChartError, Margin, SceneLayers};

    #[test]
    fn defaults_match_documented_values() {
        let config = ChartConfig::default();

        assert_eq!(config.levels, 10);
        assert_eq!(config.playback_interval_ms, 1000);
        assert_eq!(config.transition_duration_ms, 300);
        assert_eq!(config.bid_color, "#83b27d");
        assert_eq!(config.ask_color, "#c76e5b");
        assert_eq!(
            config.margin,
            Margin {
                top: 20.0,
                right: 30.0,
                bottom: 40.0,
                left: 80.0
            }
        );
        assert_eq!(config.band_padding, 0.1);
        assert_eq!(config.layers, SceneLayers::all());
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(
            r#"{ "levels": 5, "transition_duration_ms": 150, "margin": { "top": 0, "right": 0, "bottom": 0, "left": 0 } }"#,
        )
        .expect("valid config");

        assert_eq!(config.levels, 5);
        assert_eq!(config.transition_duration_ms, 150);
        assert_eq!(config.playback_interval_ms, 1000);
        assert_eq!(config.margin.left, 0.0);
        assert_eq!(config.font_weight, "lighter");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ChartConfig::from_json(r#"{ "levels": 0 }"#).expect_err("zero levels");
        assert!(matches!(err, ChartError::InvalidConfig { .. }));

        let err = ChartConfig::from_json(r#"{ "band_padding": 1.5 }"#).expect_err("padding");
        assert!(matches!(err, ChartError::InvalidConfig { .. }));

        let err =
            ChartConfig::from_json(r#"{ "playback_interval_ms": 0 }"#).expect_err("interval");
        assert!(matches!(err, ChartError::InvalidConfig { .. }));

        let err = ChartConfig::from_json("not json").expect_err("syntax");
        assert!(matches!(err, ChartError::DeserializationError { .. }));
    }

    #[test]
    fn dimensions_subtract_margins_and_clamp() {
        let margin = Margin::default();
        let dims = ChartDimensions::from_container(800.0, 400.0, margin);
        assert_eq!(dims.width, 690.0);
        assert_eq!(dims.height, 340.0);

        let tiny = ChartDimensions::from_container(50.0, 30.0, margin);
        assert_eq!(tiny.width, 0.0);
        assert_eq!(tiny.height, 0.0);
    }
}
