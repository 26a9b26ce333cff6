use fb_config::{ENV_PREFIX, FbConfig};

/// Config sections that can be set from the environment.
const SECTIONS: [&str; 5] = ["TURSO", "DATABASE", "DASHBOARD", "WATCH", "EXPORT"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &FbConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FbConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    for section in SECTIONS {
        let prefix = format!("{ENV_PREFIX}{section}_");
        let nested = format!("{ENV_PREFIX}{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&prefix) && !key.starts_with(&nested))
        {
            warnings.push(format!(
                "{key} is ignored. Use double underscores between section and key (example: {nested}{}).",
                key.trim_start_matches(&prefix)
            ));
        }
    }

    if !config.turso.is_configured()
        && (!config.turso.url.is_empty() || !config.turso.auth_token.is_empty())
    {
        warnings.push(
            "Turso config is incomplete: both turso.url and turso.auth_token are required. Using the local database."
                .to_string(),
        );
    }

    warnings
}
