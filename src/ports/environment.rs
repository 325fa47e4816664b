// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment lookup trait definition.
//!
//! The loader reads a handful of environment variables (`OPENSSL_CONF`,
//! `OPENSSL_CONF_INCLUDE`, ...) and the configuration dialect can reference them
//! through the `ENV` section. Both go through this port so that tests can supply
//! fixed values instead of mutating the process environment.

/// A source of environment variables.
///
/// # Examples
///
/// ```rust
/// use osslcfg::ports::Environment;
///
/// struct Fixed;
///
/// impl Environment for Fixed {
///     fn var(&self, name: &str) -> Option<String> {
///         (name == "HOME").then(|| "/root".to_string())
///     }
/// }
///
/// assert_eq!(Fixed.var("HOME").as_deref(), Some("/root"));
/// assert_eq!(Fixed.var("PATH"), None);
/// ```
pub trait Environment {
    /// Returns the value of the variable called `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Environment for Empty {
        fn var(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_environment_by_reference() {
        fn lookup<E: Environment>(env: E) -> Option<String> {
            env.var("anything")
        }
        let env = Empty;
        assert_eq!(lookup(&env), None);
    }
}
