//! Accessibility permission gate
//!
//! The event tap and synthetic key events both need the process to be
//! trusted for Accessibility. Checked once, before the listener starts.

use std::ffi::c_void;

use tracing::{info, warn};

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;

    static kAXTrustedCheckOptionPrompt: *const c_void;
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFDictionaryCreate(
        allocator: *const c_void,
        keys: *const *const c_void,
        values: *const *const c_void,
        num_values: isize,
        key_callbacks: *const c_void,
        value_callbacks: *const c_void,
    ) -> *const c_void;

    fn CFRelease(cf: *const c_void);

    static kCFTypeDictionaryKeyCallBacks: c_void;
    static kCFTypeDictionaryValueCallBacks: c_void;
    static kCFBooleanTrue: *const c_void;
}

/// Raised when the process is not trusted for Accessibility
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error(
        "Accessibility permission required. Enable keyboard-translit in System Settings > \
         Privacy & Security > Accessibility, then start it again."
    )]
    AccessibilityDenied,
}

/// Check if the process is trusted for Accessibility
pub fn is_trusted() -> bool {
    // SAFETY: AXIsProcessTrusted only reads permission state
    unsafe { AXIsProcessTrusted() }
}

/// Check trust, showing the system prompt if it is missing
fn is_trusted_with_prompt() -> bool {
    unsafe {
        let keys = [kAXTrustedCheckOptionPrompt];
        let values = [kCFBooleanTrue];

        let options = CFDictionaryCreate(
            std::ptr::null(),
            keys.as_ptr(),
            values.as_ptr(),
            1,
            &kCFTypeDictionaryKeyCallBacks as *const c_void,
            &kCFTypeDictionaryValueCallBacks as *const c_void,
        );

        let result = AXIsProcessTrustedWithOptions(options);

        if !options.is_null() {
            CFRelease(options);
        }

        result
    }
}

/// Require Accessibility trust before any hotkey or injection work
///
/// When trust is missing the system prompt is shown once. Its own button
/// leads to the settings pane. The caller is expected to exit on the
/// returned error.
pub fn ensure_accessibility() -> Result<(), PermissionError> {
    if is_trusted() {
        info!("accessibility permission granted");
        return Ok(());
    }

    if is_trusted_with_prompt() {
        return Ok(());
    }

    warn!("accessibility permission missing, system prompt shown");
    Err(PermissionError::AccessibilityDenied)
}
