//! C ABI exports for hosts embedding the resolver as a shared library.
//!
//! Strings returned here are owned by this library and must be released
//! with [`wbi_string_free`] (or [`wbi_installer_free`] for pairs). A null or
//! non-UTF-8 argument, a failed lookup, or a panic all produce an empty
//! string.

use std::ffi::{c_char, CStr, CString};
use std::panic::{self, UnwindSafe};
use crate::options::verbose;
use crate::surface;
use crate::utils::download::HttpSource;

#[repr(C)]
pub struct WbiInstaller {
    pub version: *mut c_char,
    pub url: *mut c_char,
}

/// Borrows a C string argument; `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

fn into_c_string(value: String) -> *mut c_char {
    // Interior NULs cannot cross the boundary; report them as not found.
    CString::new(value)
        .unwrap_or_default()
        .into_raw()
}

fn guarded<T, F>(f: F) -> T
where
    T: Default,
    F: FnOnce() -> T + UnwindSafe,
{
    panic::catch_unwind(f).unwrap_or_else(|_| {
        verbose::warn("resolver panicked; returning an empty result");
        T::default()
    })
}

fn with_source<T, F>(f: F) -> T
where
    T: Default,
    F: FnOnce(HttpSource) -> T + UnwindSafe,
{
    guarded(|| match HttpSource::new() {
        Ok(source) => f(source),
        Err(e) => {
            verbose::warn(&format!("could not build HTTP client: {}", e));
            T::default()
        }
    })
}

unsafe fn versions_export(os: *const c_char, list: fn(HttpSource, &str) -> String) -> *mut c_char {
    let os = arg(os).unwrap_or_default();
    into_c_string(with_source(|source| list(source, os)))
}

unsafe fn url_export(
    os: *const c_char,
    version: *const c_char,
    url: fn(HttpSource, &str, &str) -> String,
) -> *mut c_char {
    let os = arg(os).unwrap_or_default();
    let version = arg(version).unwrap_or_default();
    into_c_string(with_source(|source| url(source, os, version)))
}

unsafe fn installer_export(os: *const c_char, latest: fn(HttpSource, &str) -> (String, String)) -> WbiInstaller {
    let os = arg(os).unwrap_or_default();
    let (version, url) = with_source(|source| latest(source, os));
    WbiInstaller {
        version: into_c_string(version),
        url: into_c_string(url),
    }
}

/// # Safety
/// `os` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn wbi_r_versions(os: *const c_char) -> *mut c_char {
    versions_export(os, surface::r_versions)
}

/// # Safety
/// `os` and `version` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn wbi_r_url(os: *const c_char, version: *const c_char) -> *mut c_char {
    url_export(os, version, surface::r_url)
}

/// # Safety
/// `os` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn wbi_python_versions(os: *const c_char) -> *mut c_char {
    versions_export(os, surface::python_versions)
}

/// # Safety
/// `os` and `version` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn wbi_python_url(os: *const c_char, version: *const c_char) -> *mut c_char {
    url_export(os, version, surface::python_url)
}

/// # Safety
/// `os` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn wbi_quarto_versions(os: *const c_char) -> *mut c_char {
    versions_export(os, surface::quarto_versions)
}

/// # Safety
/// `os` and `version` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn wbi_quarto_url(os: *const c_char, version: *const c_char) -> *mut c_char {
    url_export(os, version, surface::quarto_url)
}

/// # Safety
/// `os` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn wbi_workbench_url(os: *const c_char) -> WbiInstaller {
    installer_export(os, surface::workbench_url)
}

/// # Safety
/// `os` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn wbi_driver_url(os: *const c_char) -> WbiInstaller {
    installer_export(os, surface::driver_url)
}

/// # Safety
/// `s` must be null or a pointer previously returned by this library and
/// not yet freed.
#[no_mangle]
pub unsafe extern "C" fn wbi_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// # Safety
/// `installer` must come from [`wbi_workbench_url`] or [`wbi_driver_url`]
/// and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn wbi_installer_free(installer: WbiInstaller) {
    wbi_string_free(installer.version);
    wbi_string_free(installer.url);
}
