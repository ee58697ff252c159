use std::time::Duration;

use message_primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Address of the dispatch contract on the origin side. Bound into every
    /// canonical hash the engine verifies.
    pub originating_contract: Address,
    /// How long a single oracle adapter query may take before the adapter
    /// counts as silent.
    #[serde(with = "humantime_serde")]
    pub adapter_query_timeout: Duration,
    pub event_buffer_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            originating_contract: Address::zero(),
            adapter_query_timeout: Duration::from_secs(5),
            event_buffer_cap: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use message_primitives::Address;

    use super::Config;

    #[test]
    fn deserialize_config() {
        let config_str = "
            originating_contract = '0x00000000000000000000000000000000000004a1'
            adapter_query_timeout = '3s'
            event_buffer_cap = 500
            ";

        let cfg: Config = toml::from_str(config_str).unwrap();

        assert_eq!(
            cfg.originating_contract,
            "0x00000000000000000000000000000000000004a1"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(cfg.adapter_query_timeout, Duration::from_secs(3));
        assert_eq!(cfg.event_buffer_cap, 500);
    }

    #[test]
    fn missing_fields_fall_back_on_defaults() {
        let cfg: Config = toml::from_str("event_buffer_cap = 10").unwrap();

        assert_eq!(cfg.originating_contract, Address::zero());
        assert_eq!(cfg.adapter_query_timeout, Duration::from_secs(5));
        assert_eq!(cfg.event_buffer_cap, 10);
    }

    #[test]
    fn can_serialize_deserialize_config() {
        let cfg = Config::default();

        let serialized = toml::to_string_pretty(&cfg).expect("should work");
        let deserialized: Config = toml::from_str(serialized.as_str()).expect("should work");

        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn fail_deserialization() {
        assert!(toml::from_str::<Config>("adapter_query_timeout = 'not a duration'").is_err());
        assert!(toml::from_str::<Config>("originating_contract = 'not an address'").is_err());
    }
}
