/*!
 * Dispatch Configuration
 *
 * Runtime configuration for kernel selection
 */

use super::errors::ConfigResult;
use super::limits::{DISPATCH_ENV, KERNEL_ENV};
use super::types::{DispatchPolicy, KernelKind};
use serde::{Deserialize, Serialize};

/// Dispatcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Requested policy; only the compiled policy can actually take effect
    pub policy: DispatchPolicy,
    /// Kernel to prefer over probing, if it is available
    pub kernel: Option<KernelKind>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            policy: DispatchPolicy::compiled(),
            kernel: None,
        }
    }
}

impl DispatchConfig {
    /// Configuration that pins a specific kernel
    pub const fn pinned(kernel: KernelKind) -> Self {
        Self {
            policy: DispatchPolicy::compiled(),
            kernel: Some(kernel),
        }
    }

    /// Configuration that probes the CPU and takes the fastest kernel
    pub const fn probing() -> Self {
        Self {
            policy: DispatchPolicy::compiled(),
            kernel: None,
        }
    }

    /// Read `MEMCOUNT_KERNEL` and `MEMCOUNT_DISPATCH`
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(value) = env_value(KERNEL_ENV) {
            config.kernel = Some(value.parse()?);
        }
        if let Some(value) = env_value(DISPATCH_ENV) {
            config.policy = value.parse()?;
        }

        Ok(config)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
