// SPDX-License-Identifier: MIT

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_safety_doc)]

include!("ffi.rs");

// Re-export libloading for error handling
pub use libloading;

use std::sync::{Mutex, OnceLock};

static MMAL: OnceLock<MmalLibrary> = OnceLock::new();
static BCM_HOST: OnceLock<BcmHostLibrary> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Load libmmal.so and return the process-wide handle.
///
/// The environment variable `MMALPLAY_MMAL_LIBRARY` can be used to specify
/// a custom path to the library. If not set, searches standard system paths
/// (on Raspberry Pi OS the VideoCore userland lives in /opt/vc/lib, which
/// is on the default search path when the vc ldconfig entry is installed).
pub fn mmal() -> Result<&'static MmalLibrary, libloading::Error> {
    if let Some(lib) = MMAL.get() {
        return Ok(lib);
    }

    let _guard = INIT_LOCK.lock().unwrap();

    // Double-check after acquiring lock
    if let Some(lib) = MMAL.get() {
        return Ok(lib);
    }

    let lib_path = std::env::var("MMALPLAY_MMAL_LIBRARY")
        .ok()
        .unwrap_or_else(|| "libmmal.so".to_string());

    let lib = unsafe { MmalLibrary::new(lib_path.as_str())? };

    MMAL.set(lib).ok().expect("Failed to initialize library");

    Ok(MMAL.get().unwrap())
}

/// Load libbcm_host.so and return the process-wide handle.
///
/// libbcm_host links the vcos/vchi/tvservice objects, so every symbol the
/// display session needs resolves through this one library. The path can be
/// overridden with `MMALPLAY_BCM_HOST_LIBRARY`.
pub fn bcm_host() -> Result<&'static BcmHostLibrary, libloading::Error> {
    if let Some(lib) = BCM_HOST.get() {
        return Ok(lib);
    }

    let _guard = INIT_LOCK.lock().unwrap();

    if let Some(lib) = BCM_HOST.get() {
        return Ok(lib);
    }

    let lib_path = std::env::var("MMALPLAY_BCM_HOST_LIBRARY")
        .ok()
        .unwrap_or_else(|| "libbcm_host.so".to_string());

    let lib = unsafe { BcmHostLibrary::new(lib_path.as_str())? };

    BCM_HOST
        .set(lib)
        .ok()
        .expect("Failed to initialize library");

    Ok(BCM_HOST.get().unwrap())
}

/// Try to get the loaded libmmal handle without loading it.
///
/// Used from the graph control callback, which must not attempt a library
/// load on the hardware's callback thread.
pub fn try_mmal() -> Option<&'static MmalLibrary> {
    MMAL.get()
}

/// Try to get the loaded libbcm_host handle without loading it.
pub fn try_bcm_host() -> Option<&'static BcmHostLibrary> {
    BCM_HOST.get()
}
