//! Dynamic-library compiler backend.
//!
//! Binds the compiler over a C ABI. The library exports a single hook
//! symbol that takes the two message callbacks and returns a table of
//! stage entry points:
//!
//! ```c
//! const CompilerApi *Compiler_Hook(MessageFn progress, MessageFn error);
//! ```
//!
//! Entry points return nonzero for success and zero for failure, and report
//! their own diagnostics through the callbacks as preformatted lines. The
//! library handle is released when the session drops.

use std::{
    ffi::{CStr, CString, c_char},
    path::PathBuf,
    sync::OnceLock,
};

use log::{debug, info};

use mapforge_core::{
    parms::{BspParms, LightParms, VisParms},
    vector::Vec3,
};

use crate::{
    error::{GatewayError, StageFailure},
    gateway::{CompilerBackend, CompilerSession, MessageSinks},
};

/// Stem of the compiler library loaded when no path is configured; the
/// platform prefix and suffix are added by the loader.
pub const DEFAULT_LIBRARY: &str = "mapcomp";

/// Name of the hook symbol resolved from the compiler library.
pub const HOOK_SYMBOL: &str = "Compiler_Hook";

type MessageFn = unsafe extern "C" fn(*const c_char);

#[repr(C)]
struct RawVec3 {
    x: f32,
    y: f32,
    z: f32,
}

#[repr(C)]
struct RawBspParms {
    verbose: i32,
    entity_verbose: i32,
}

#[repr(C)]
struct RawVisParms {
    verbose: i32,
    full_vis: i32,
    sort_portals: i32,
}

#[repr(C)]
struct RawLightParms {
    verbose: i32,
    extra_samples: i32,
    radiosity: i32,
    fast_patch: i32,
    min_light: RawVec3,
    light_scale: f32,
    reflective_scale: f32,
    patch_size: f32,
    bounce: i32,
}

fn raw_bool(value: bool) -> i32 {
    value as i32
}

impl From<Vec3> for RawVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x(),
            y: v.y(),
            z: v.z(),
        }
    }
}

impl From<&BspParms> for RawBspParms {
    fn from(parms: &BspParms) -> Self {
        Self {
            verbose: raw_bool(parms.verbose),
            entity_verbose: raw_bool(parms.entity_verbose),
        }
    }
}

impl From<&VisParms> for RawVisParms {
    fn from(parms: &VisParms) -> Self {
        Self {
            verbose: raw_bool(parms.verbose),
            full_vis: raw_bool(parms.full_vis),
            sort_portals: raw_bool(parms.sort_portals),
        }
    }
}

impl From<&LightParms> for RawLightParms {
    fn from(parms: &LightParms) -> Self {
        Self {
            verbose: raw_bool(parms.verbose),
            extra_samples: raw_bool(parms.extra_samples),
            radiosity: raw_bool(parms.radiosity),
            fast_patch: raw_bool(parms.fast_patch),
            min_light: parms.min_light.into(),
            light_scale: parms.light_scale,
            reflective_scale: parms.reflective_scale,
            patch_size: parms.patch_size,
            bounce: parms.bounce,
        }
    }
}

/// Stage entry points exported by the compiler library.
#[repr(C)]
struct CompilerApi {
    create_bsp: unsafe extern "C" fn(*const c_char, *const RawBspParms) -> i32,
    update_entities: unsafe extern "C" fn(*const c_char, *const c_char) -> i32,
    save_bsp: unsafe extern "C" fn(*const c_char) -> i32,
    free_bsp: unsafe extern "C" fn(),
    vis_bsp: unsafe extern "C" fn(*const c_char, *const RawVisParms) -> i32,
    light_bsp: unsafe extern "C" fn(*const c_char, *const RawLightParms) -> i32,
}

type HookFn = unsafe extern "C" fn(MessageFn, MessageFn) -> *const CompilerApi;

// One compile run per process; the trampolines need somewhere process-wide
// to find the sinks.
static SINKS: OnceLock<MessageSinks> = OnceLock::new();

extern "C" fn progress_trampoline(line: *const c_char) {
    forward(line, |sinks, line| (sinks.progress)(line));
}

extern "C" fn error_trampoline(line: *const c_char) {
    forward(line, |sinks, line| (sinks.error)(line));
}

fn forward(line: *const c_char, emit: impl Fn(&MessageSinks, &str)) {
    if line.is_null() {
        return;
    }
    // Safety: non-null, and the compiler hands over NUL-terminated lines.
    let line = unsafe { CStr::from_ptr(line) }.to_string_lossy();
    if let Some(sinks) = SINKS.get() {
        emit(sinks, line.trim_end());
    }
}

/// Backend that loads the compiler from a dynamic library on disk.
#[derive(Debug, Clone)]
pub struct DylibBackend {
    path: PathBuf,
}

impl DylibBackend {
    /// Backend loading the library at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for DylibBackend {
    /// Backend loading the platform-decorated default library name.
    fn default() -> Self {
        Self::new(PathBuf::from(libloading::library_filename(DEFAULT_LIBRARY)))
    }
}

impl CompilerBackend for DylibBackend {
    fn load(&self, sinks: MessageSinks) -> Result<Box<dyn CompilerSession>, GatewayError> {
        let _ = SINKS.set(sinks);

        info!(path = self.path.display().to_string(); "Loading compiler library");
        // Safety: the library is only asked for the hook symbol below; no
        // initialization routine with preconditions runs on load.
        let library = unsafe { libloading::Library::new(&self.path) }.map_err(|source| {
            GatewayError::Unavailable {
                path: self.path.clone(),
                source: Box::new(source),
            }
        })?;

        // Safety: the hook signature is the library's published contract.
        let api = unsafe {
            let hook: libloading::Symbol<'_, HookFn> = library
                .get(HOOK_SYMBOL.as_bytes())
                .map_err(|source| GatewayError::MissingEntryPoint {
                    symbol: HOOK_SYMBOL,
                    source: Box::new(source),
                })?;
            hook(progress_trampoline, error_trampoline)
        };
        if api.is_null() {
            return Err(GatewayError::InitFailed);
        }
        debug!("Compiler function table resolved");

        Ok(Box::new(DylibSession {
            api,
            _library: library,
        }))
    }
}

/// A live compiler session bound to a loaded library.
struct DylibSession {
    api: *const CompilerApi,
    /// Keeps the library mapped for as long as the entry points are
    /// callable; dropping it releases the handle.
    _library: libloading::Library,
}

impl DylibSession {
    fn api(&self) -> &CompilerApi {
        // Safety: non-null checked at load time, and the table lives inside
        // the still-mapped library.
        unsafe { &*self.api }
    }
}

fn c_path(path: &str) -> Result<CString, StageFailure> {
    CString::new(path).map_err(|_| StageFailure)
}

fn status(ret: i32) -> Result<(), StageFailure> {
    if ret != 0 { Ok(()) } else { Err(StageFailure) }
}

impl CompilerSession for DylibSession {
    fn create_bsp(&mut self, map_path: &str, parms: &BspParms) -> Result<(), StageFailure> {
        let map = c_path(map_path)?;
        let raw = RawBspParms::from(parms);
        // Safety: pointers outlive the call; the table was validated at load.
        status(unsafe { (self.api().create_bsp)(map.as_ptr(), &raw) })
    }

    fn update_entities(&mut self, map_path: &str, bsp_path: &str) -> Result<(), StageFailure> {
        let map = c_path(map_path)?;
        let bsp = c_path(bsp_path)?;
        status(unsafe { (self.api().update_entities)(map.as_ptr(), bsp.as_ptr()) })
    }

    fn save_bsp(&mut self, bsp_path: &str) -> Result<(), StageFailure> {
        let bsp = c_path(bsp_path)?;
        status(unsafe { (self.api().save_bsp)(bsp.as_ptr()) })
    }

    fn free_bsp(&mut self) {
        unsafe { (self.api().free_bsp)() }
    }

    fn vis_bsp(&mut self, bsp_path: &str, parms: &VisParms) -> Result<(), StageFailure> {
        let bsp = c_path(bsp_path)?;
        let raw = RawVisParms::from(parms);
        status(unsafe { (self.api().vis_bsp)(bsp.as_ptr(), &raw) })
    }

    fn light_bsp(&mut self, bsp_path: &str, parms: &LightParms) -> Result<(), StageFailure> {
        let bsp = c_path(bsp_path)?;
        let raw = RawLightParms::from(parms);
        status(unsafe { (self.api().light_bsp)(bsp.as_ptr(), &raw) })
    }
}
