//! Host permission state consumed by the setup flow. The flags are
//! refreshed from the operating environment on entry to the permissions
//! screen; the wizard never sets them itself.

pub const SCREEN_RECORDING_ENV: &str = "TURIX_PERMISSION_SCREEN_RECORDING";
pub const ACCESSIBILITY_ENV: &str = "TURIX_PERMISSION_ACCESSIBILITY";
pub const NOTIFICATIONS_ENV: &str = "TURIX_PERMISSION_NOTIFICATIONS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionFlags {
    pub screen_recording: bool,
    pub accessibility: bool,
    pub notifications: bool,
}

impl PermissionFlags {
    /// Screen recording and accessibility gate the wizard; notifications
    /// are informational only.
    pub fn required_granted(&self) -> bool {
        self.screen_recording && self.accessibility
    }
}

pub trait PermissionProbe {
    fn current(&self) -> PermissionFlags;
}

/// Reads grants from TURIX_PERMISSION_* variables. The macOS preflight
/// checks (screen capture, accessibility trust) belong to the host shell,
/// which exports these before launching the wizard.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPermissionProbe;

impl PermissionProbe for EnvPermissionProbe {
    fn current(&self) -> PermissionFlags {
        PermissionFlags {
            screen_recording: env_flag(SCREEN_RECORDING_ENV),
            accessibility: env_flag(ACCESSIBILITY_ENV),
            notifications: env_flag(NOTIFICATIONS_ENV),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn env_probe_reads_grant_variables() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        std::env::set_var(SCREEN_RECORDING_ENV, "1");
        std::env::set_var(ACCESSIBILITY_ENV, "true");
        std::env::remove_var(NOTIFICATIONS_ENV);

        let flags = EnvPermissionProbe.current();
        assert!(flags.screen_recording);
        assert!(flags.accessibility);
        assert!(!flags.notifications);
        assert!(flags.required_granted());

        std::env::set_var(ACCESSIBILITY_ENV, "0");
        let flags = EnvPermissionProbe.current();
        assert!(!flags.accessibility);
        assert!(!flags.required_granted());

        std::env::remove_var(SCREEN_RECORDING_ENV);
        std::env::remove_var(ACCESSIBILITY_ENV);
    }

    #[test]
    fn required_grants_ignore_notifications() {
        let flags = PermissionFlags {
            screen_recording: true,
            accessibility: true,
            notifications: false,
        };
        assert!(flags.required_granted());
    }
}
