//! Acting-profile resolution for CLI commands.
//!
//! The resolution chain: `--actor` flag > `PRAGATI_ACTOR` env > the config
//! file's `default_actor`. Every command except `init` and `completions`
//! requires an acting profile — the engine takes an explicit actor on every
//! call and the CLI never invents one.

use std::env;

/// Errors from actor resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorResolutionError {
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ActorResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ActorResolutionError {}

/// Environment reader trait for dependency injection in tests.
trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

struct RealEnv;

impl EnvReader for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}

fn resolve_actor_with(
    cli_flag: Option<&str>,
    config_default: Option<&str>,
    env: &dyn EnvReader,
) -> Option<String> {
    if let Some(actor) = cli_flag {
        if !actor.is_empty() {
            return Some(actor.to_string());
        }
    }

    if let Some(val) = env.get("PRAGATI_ACTOR") {
        return Some(val);
    }

    config_default
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolve the acting profile id: `--actor` flag > `PRAGATI_ACTOR` >
/// config `default_actor`. Returns `None` if nothing is set.
#[must_use]
pub fn resolve_actor(cli_flag: Option<&str>, config_default: Option<&str>) -> Option<String> {
    resolve_actor_with(cli_flag, config_default, &RealEnv)
}

/// Resolve the acting profile id, erroring when unset. Use for every command
/// that talks to the engine.
pub fn require_actor(
    cli_flag: Option<&str>,
    config_default: Option<&str>,
) -> Result<String, ActorResolutionError> {
    resolve_actor(cli_flag, config_default).ok_or_else(|| ActorResolutionError {
        message: "An acting profile is required. \
                  Set --actor, PRAGATI_ACTOR, or default_actor in pragati.toml."
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{EnvReader, resolve_actor_with};
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvReader for FakeEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| (*v).to_string())
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> FakeEnv {
        FakeEnv(pairs.iter().copied().collect())
    }

    #[test]
    fn flag_wins_over_env_and_config() {
        let e = env(&[("PRAGATI_ACTOR", "dc-mumbai")]);
        assert_eq!(
            resolve_actor_with(Some("so-maharashtra"), Some("c-kumar"), &e),
            Some("so-maharashtra".to_string())
        );
    }

    #[test]
    fn env_wins_over_config() {
        let e = env(&[("PRAGATI_ACTOR", "dc-mumbai")]);
        assert_eq!(
            resolve_actor_with(None, Some("c-kumar"), &e),
            Some("dc-mumbai".to_string())
        );
    }

    #[test]
    fn config_is_the_fallback() {
        let e = env(&[]);
        assert_eq!(
            resolve_actor_with(None, Some("c-kumar"), &e),
            Some("c-kumar".to_string())
        );
    }

    #[test]
    fn empty_values_do_not_resolve() {
        let e = env(&[]);
        assert_eq!(resolve_actor_with(Some(""), Some(""), &e), None);
        assert_eq!(resolve_actor_with(None, None, &e), None);
    }
}
