//! Runtime switches read from the environment.

use std::env;

use compose_core::{staticCompositionLocalOf, StaticCompositionLocal};

pub const NAME_FIELD_ENV_VAR: &str = "MYCOMPOSE_NAME_FIELD";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GreetingConfig {
    /// Shows a "Name" text field bound to the greeting's draft state.
    pub show_name_field: bool,
}

impl GreetingConfig {
    pub fn from_env() -> Self {
        let config = Self::from_value(env::var(NAME_FIELD_ENV_VAR).ok().as_deref());
        log::debug!("{NAME_FIELD_ENV_VAR} -> {config:?}");
        config
    }

    /// `1`, `true`, `yes` and `on` enable the field; anything else, or no
    /// value, leaves it off.
    pub fn from_value(value: Option<&str>) -> Self {
        let show_name_field = value.is_some_and(|raw| {
            matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });
        Self { show_name_field }
    }

    pub fn with_name_field(mut self, show: bool) -> Self {
        self.show_name_field = show;
        self
    }
}

thread_local! {
    static LOCAL_GREETING_CONFIG: StaticCompositionLocal<GreetingConfig> =
        staticCompositionLocalOf(GreetingConfig::default);
}

#[allow(non_snake_case)]
pub fn LocalGreetingConfig() -> StaticCompositionLocal<GreetingConfig> {
    LOCAL_GREETING_CONFIG.with(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_field_is_off_by_default() {
        assert_eq!(GreetingConfig::from_value(None), GreetingConfig::default());
        assert!(!GreetingConfig::from_value(Some("0")).show_name_field);
        assert!(!GreetingConfig::from_value(Some("")).show_name_field);
    }

    #[test]
    fn truthy_values_enable_name_field() {
        for raw in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(GreetingConfig::from_value(Some(raw)).show_name_field, "{raw}");
        }
    }
}
