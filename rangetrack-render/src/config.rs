//! Static track configuration descriptor, as the host registry consumes it.

use rangetrack_core::options::AVAILABLE_OPTIONS;
use rangetrack_core::RenderOptions;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackConfig {
    pub track_type: &'static str,
    pub datatype: Vec<&'static str>,
    pub orientation: &'static str,
    pub available_options: Vec<&'static str>,
    pub default_options: RenderOptions,
}

/// Descriptor for the `range` track: accepted datatype, orientation, the
/// enumerated option names, and a default value for every one of them.
pub fn track_config() -> TrackConfig {
    TrackConfig {
        track_type: "range",
        datatype: vec!["vector"],
        orientation: "1d-horizontal",
        available_options: AVAILABLE_OPTIONS.to_vec(),
        default_options: RenderOptions::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangetrack_core::Mode;

    #[test]
    fn descriptor_enumerates_every_defaulted_option() {
        let config = track_config();
        assert_eq!(config.track_type, "range");
        assert_eq!(config.datatype, vec!["vector"]);
        assert_eq!(config.orientation, "1d-horizontal");

        assert_eq!(config.default_options.mode, Mode::MinMax);
        assert_eq!(config.default_options.resolution, 1);

        // every option name the descriptor enumerates deserializes onto the
        // typed options struct
        for name in &config.available_options {
            let json = serde_json::to_value(&config.default_options).expect("serialize defaults");
            assert!(
                json.get(name).is_some(),
                "option {name} missing from defaults"
            );
        }
        assert_eq!(config.available_options.len(), 13);
    }
}
