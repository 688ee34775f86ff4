/// Fire-and-forget speech and notification collaborators
/// Currently only implemented for macOS; failures are swallowed and never
/// reach the state machine

#[cfg(target_os = "macos")]
use std::process::Command;

/// Speak an announcement aloud
pub fn speak(message: &str) {
    #[cfg(target_os = "macos")]
    {
        let _ = Command::new("say").arg(message).spawn();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

/// Post a desktop notification
pub fn notify(message: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Cadence""#,
            message.replace('"', "\\\"")
        );

        let _ = Command::new("osascript").arg("-e").arg(&script).output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

/// Announce through both channels
pub fn announce(message: &str) {
    speak(message);
    notify(message);
}
