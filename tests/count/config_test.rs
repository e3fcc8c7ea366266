/*!
 * Configuration Tests
 * Environment parsing for kernel pinning and dispatch policy
 */

use memcount::core::limits::{DISPATCH_ENV, KERNEL_ENV};
use memcount::{ConfigError, DispatchConfig, DispatchPolicy, KernelKind};
use pretty_assertions::assert_eq;
use serial_test::serial;

fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let out = f();
    for (key, _) in vars {
        std::env::remove_var(key);
    }
    out
}

#[test]
#[serial]
fn test_env_unset_is_default() {
    std::env::remove_var(KERNEL_ENV);
    std::env::remove_var(DISPATCH_ENV);
    assert_eq!(DispatchConfig::from_env(), Ok(DispatchConfig::default()));
}

#[test]
#[serial]
fn test_env_kernel_pin() {
    let config = with_env(&[(KERNEL_ENV, " AVX2 ")], DispatchConfig::from_env);
    assert_eq!(config, Ok(DispatchConfig::pinned(KernelKind::Avx2)));
}

#[test]
#[serial]
fn test_env_unknown_kernel() {
    let config = with_env(&[(KERNEL_ENV, "avx1024")], DispatchConfig::from_env);
    assert_eq!(config, Err(ConfigError::UnknownKernel("avx1024".to_string())));
}

#[test]
#[serial]
fn test_env_policy() {
    let config = with_env(
        &[(DISPATCH_ENV, "static"), (KERNEL_ENV, "swar")],
        DispatchConfig::from_env,
    );
    assert_eq!(
        config,
        Ok(DispatchConfig {
            policy: DispatchPolicy::Static,
            kernel: Some(KernelKind::Swar),
        })
    );
}

#[test]
#[serial]
fn test_env_invalid_policy() {
    let config = with_env(&[(DISPATCH_ENV, "sometimes")], DispatchConfig::from_env);
    assert_eq!(config, Err(ConfigError::InvalidPolicy("sometimes".to_string())));
}

#[test]
#[serial]
fn test_env_empty_ignored() {
    let config = with_env(&[(KERNEL_ENV, ""), (DISPATCH_ENV, "  ")], DispatchConfig::from_env);
    assert_eq!(config, Ok(DispatchConfig::default()));
}

#[test]
fn test_config_from_json() {
    let config: DispatchConfig = serde_json::from_str(r#"{"kernel":"neon"}"#).unwrap();
    assert_eq!(config.kernel, Some(KernelKind::Neon));
    assert_eq!(config.policy, DispatchPolicy::compiled());
}
