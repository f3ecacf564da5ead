use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

pub const DEFAULT_NOTIFICATION_PORT: u16 = 18000;

/// Prefix of the environment variables overriding configuration values.
///
/// Nested keys are separated by a double underscore, e.g. `OCEAN_WEBHOOK__MAX_ATTEMPTS`.
pub const ENV_PREFIX: &str = "OCEAN_";

/// Loads the user configuration.
///
/// Values are read from the TOML file at the provided path and then overridden by any
/// `OCEAN_`-prefixed environment variables. A missing file is not an error: every field falls back
/// to its `serde` default, which lets the service run with environment-only configuration.
pub fn load_config<T: for<'a> Deserialize<'a>>(
    config_file: impl AsRef<Path>,
) -> figment::Result<T> {
    Figment::from(Toml::file(config_file.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use serde::Deserialize;

    use super::load_config;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Nested {
        retries: u32,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Sample {
        name: String,
        nested: Nested,
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "sample.toml",
                r#"
                    name = "from-file"

                    [nested]
                    retries = 1
                "#,
            )?;
            jail.set_env("OCEAN_NESTED__RETRIES", "5");

            let sample: Sample = load_config("sample.toml")?;
            assert_eq!(
                sample,
                Sample {
                    name: "from-file".to_string(),
                    nested: Nested { retries: 5 },
                }
            );

            Ok(())
        });
    }
}
