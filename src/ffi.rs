//! FFI bindings for rationmix
//!
//! This module provides C-compatible functions for calling the formulation
//! engine from other languages. All functions use C strings (null-terminated)
//! and return allocated memory that must be freed by the caller using
//! `rationmix_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::compute_feed_mix;
use crate::request::FormulationRequest;
use crate::targets::TargetTable;
use crate::ENGINE_VERSION;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Formulate a feed mix from a request JSON.
///
/// `targets_json` may be NULL to use the built-in target table.
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string; `targets_json`
///   must be NULL or a valid null-terminated C string.
/// - Returns a newly allocated result JSON string that must be freed with
///   `rationmix_free_string`.
/// - Returns NULL on error; call `rationmix_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn rationmix_formulate(
    request_json: *const c_char,
    targets_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let request_str = match cstr_to_string(request_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid request JSON string pointer");
            return ptr::null_mut();
        }
    };

    let request: FormulationRequest = match serde_json::from_str(&request_str) {
        Ok(r) => r,
        Err(e) => {
            set_last_error(&format!("Failed to parse request: {}", e));
            return ptr::null_mut();
        }
    };

    if let Err(e) = request.validate() {
        set_last_error(&e.to_string());
        return ptr::null_mut();
    }

    let targets = if targets_json.is_null() {
        TargetTable::default()
    } else {
        let targets_str = match cstr_to_string(targets_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid targets JSON string pointer");
                return ptr::null_mut();
            }
        };
        match TargetTable::from_json(&targets_str) {
            Ok(t) => t,
            Err(e) => {
                set_last_error(&format!("Failed to parse target table: {}", e));
                return ptr::null_mut();
            }
        }
    };

    match compute_feed_mix(
        request.category,
        request.stage,
        request.batch_size,
        &request.kitchen,
        &request.energy,
        &targets,
    ) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(json) => string_to_cstr(&json),
            Err(e) => {
                set_last_error(&e.to_string());
                ptr::null_mut()
            }
        },
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the built-in target table as JSON.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with
///   `rationmix_free_string`; NULL on serialization failure.
#[no_mangle]
pub unsafe extern "C" fn rationmix_default_targets() -> *mut c_char {
    clear_last_error();

    match TargetTable::default().to_json() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the engine version string.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with
///   `rationmix_free_string`.
#[no_mangle]
pub unsafe extern "C" fn rationmix_version() -> *mut c_char {
    string_to_cstr(ENGINE_VERSION)
}

/// Return the last error message, or NULL if none.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with
///   `rationmix_free_string`.
#[no_mangle]
pub unsafe extern "C" fn rationmix_last_error() -> *mut c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(err) => string_to_cstr(err.to_str().unwrap_or("Unknown error")),
        None => ptr::null_mut(),
    })
}

/// Free a string allocated by this library.
///
/// # Safety
/// - `ptr` must be a pointer previously returned by a rationmix function,
///   or NULL (a no-op).
#[no_mangle]
pub unsafe extern "C" fn rationmix_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
