//! NSPasteboard-backed clipboard

use std::ffi::CStr;
use std::os::raw::c_char;

use cocoa::appkit::NSPasteboardTypeString;
use cocoa::base::{id, nil};
use cocoa::foundation::{NSAutoreleasePool, NSString};
use objc::runtime::NO;
use objc::{class, msg_send, sel, sel_impl};

use super::{Clipboard, ClipboardError};

/// The general pasteboard, looked up on every call
///
/// Holds no Objective-C pointers, so it can move freely between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pasteboard;

#[allow(deprecated)]
impl Pasteboard {
    pub fn new() -> Self {
        Self
    }

    /// Run `f` with the general pasteboard inside its own autorelease pool
    fn with_general<T>(f: impl FnOnce(id) -> T) -> Option<T> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let pasteboard: id = msg_send![class!(NSPasteboard), generalPasteboard];
            let result = if pasteboard == nil {
                None
            } else {
                Some(f(pasteboard))
            };
            pool.drain();
            result
        }
    }
}

#[allow(deprecated)]
impl Clipboard for Pasteboard {
    fn change_count(&self) -> Result<i64, ClipboardError> {
        Self::with_general(|pasteboard| unsafe {
            let count: isize = msg_send![pasteboard, changeCount];
            count as i64
        })
        .ok_or(ClipboardError::Unavailable)
    }

    fn read_text(&self) -> Option<String> {
        Self::with_general(|pasteboard| unsafe {
            let value: id = msg_send![pasteboard, stringForType: NSPasteboardTypeString];
            if value == nil {
                return None;
            }
            let cstr: *const c_char = NSString::UTF8String(value);
            if cstr.is_null() {
                return None;
            }
            Some(CStr::from_ptr(cstr).to_string_lossy().into_owned())
        })
        .flatten()
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        Self::with_general(|pasteboard| unsafe {
            let _: isize = msg_send![pasteboard, clearContents];
            let value = NSString::alloc(nil).init_str(text);
            let ok: objc::runtime::BOOL =
                msg_send![pasteboard, setString: value forType: NSPasteboardTypeString];
            let _: () = msg_send![value, release];
            if ok == NO {
                Err(ClipboardError::WriteRejected)
            } else {
                Ok(())
            }
        })
        .ok_or(ClipboardError::Unavailable)?
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        Self::with_general(|pasteboard| unsafe {
            let _: isize = msg_send![pasteboard, clearContents];
        })
        .ok_or(ClipboardError::Unavailable)
    }
}
