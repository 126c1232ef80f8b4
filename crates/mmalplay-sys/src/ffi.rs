// SPDX-License-Identifier: MIT

// Hand-maintained bindings to the VideoCore userland, in the style of
// bindgen's dynamic-loading output: one struct per shared library, each
// symbol stored as a `Result` field with a same-named calling method.
//
// Only the subset of libmmal / libbcm_host used by the playback graph and
// the tvservice session is declared here.

use std::ffi::{c_char, c_int, c_void};

/* ------------------------------------------------------------------ */
/* libmmal types                                                      */
/* ------------------------------------------------------------------ */

pub type MMAL_STATUS_T = u32;

pub const MMAL_SUCCESS: MMAL_STATUS_T = 0;
pub const MMAL_ENOMEM: MMAL_STATUS_T = 1;
pub const MMAL_ENOSPC: MMAL_STATUS_T = 2;
pub const MMAL_EINVAL: MMAL_STATUS_T = 3;
pub const MMAL_ENOSYS: MMAL_STATUS_T = 4;
pub const MMAL_ENOENT: MMAL_STATUS_T = 5;
pub const MMAL_ENXIO: MMAL_STATUS_T = 6;
pub const MMAL_EIO: MMAL_STATUS_T = 7;
pub const MMAL_ESPIPE: MMAL_STATUS_T = 8;
pub const MMAL_ECORRUPT: MMAL_STATUS_T = 9;
pub const MMAL_ENOTREADY: MMAL_STATUS_T = 10;
pub const MMAL_ECONFIG: MMAL_STATUS_T = 11;
pub const MMAL_EISCONN: MMAL_STATUS_T = 12;
pub const MMAL_ENOTCONN: MMAL_STATUS_T = 13;
pub const MMAL_EAGAIN: MMAL_STATUS_T = 14;
pub const MMAL_EFAULT: MMAL_STATUS_T = 15;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_GRAPH_USERDATA_T {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_GRAPH_T {
    pub userdata: *mut MMAL_GRAPH_USERDATA_T,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_PORT_T {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_COMPONENT_PRIVATE_T {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_COMPONENT_USERDATA_T {
    _unused: [u8; 0],
}

/// Component descriptor as laid out in mmal_component.h. Port tables are
/// arrays of pointers owned by the component.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_COMPONENT_T {
    pub priv_: *mut MMAL_COMPONENT_PRIVATE_T,
    pub userdata: *mut MMAL_COMPONENT_USERDATA_T,
    pub name: *const c_char,
    pub is_enabled: u32,
    pub control: *mut MMAL_PORT_T,
    pub input_num: u32,
    pub input: *mut *mut MMAL_PORT_T,
    pub output_num: u32,
    pub output: *mut *mut MMAL_PORT_T,
    pub clock_num: u32,
    pub clock: *mut *mut MMAL_PORT_T,
    pub port_num: u32,
    pub port: *mut *mut MMAL_PORT_T,
    pub id: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_CONNECTION_T {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_BUFFER_HEADER_T {
    _unused: [u8; 0],
}

pub type MMAL_GRAPH_EVENT_CB = Option<
    unsafe extern "C" fn(
        graph: *mut MMAL_GRAPH_T,
        port: *mut MMAL_PORT_T,
        buffer: *mut MMAL_BUFFER_HEADER_T,
        cb_data: *mut c_void,
    ),
>;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_PARAMETER_HEADER_T {
    pub id: u32,
    pub size: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_RECT_T {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

pub type MMAL_BOOL_T = i32;
pub type MMAL_DISPLAYTRANSFORM_T = u32;
pub type MMAL_DISPLAYMODE_T = u32;

/// First parameter id of the video parameter group.
pub const MMAL_PARAMETER_DISPLAYREGION: u32 = 1 << 16;

pub const MMAL_DISPLAY_SET_NONE: u32 = 0;
pub const MMAL_DISPLAY_SET_NUM: u32 = 1;
pub const MMAL_DISPLAY_SET_FULLSCREEN: u32 = 2;
pub const MMAL_DISPLAY_SET_TRANSFORM: u32 = 4;
pub const MMAL_DISPLAY_SET_DEST_RECT: u32 = 8;
pub const MMAL_DISPLAY_SET_SRC_RECT: u32 = 0x10;
pub const MMAL_DISPLAY_SET_MODE: u32 = 0x20;
pub const MMAL_DISPLAY_SET_PIXEL: u32 = 0x40;
pub const MMAL_DISPLAY_SET_NOASPECT: u32 = 0x80;
pub const MMAL_DISPLAY_SET_LAYER: u32 = 0x100;
pub const MMAL_DISPLAY_SET_COPYPROTECT: u32 = 0x200;
pub const MMAL_DISPLAY_SET_ALPHA: u32 = 0x400;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMAL_DISPLAYREGION_T {
    pub hdr: MMAL_PARAMETER_HEADER_T,
    /// Bitfield of MMAL_DISPLAY_SET_* naming which fields below are valid.
    pub set: u32,
    pub display_num: u32,
    pub fullscreen: MMAL_BOOL_T,
    pub transform: MMAL_DISPLAYTRANSFORM_T,
    pub dest_rect: MMAL_RECT_T,
    pub src_rect: MMAL_RECT_T,
    pub noaspect: MMAL_BOOL_T,
    pub mode: MMAL_DISPLAYMODE_T,
    pub pixel_x: u32,
    pub pixel_y: u32,
    pub layer: i32,
    pub copyprotect_required: MMAL_BOOL_T,
    pub alpha: u32,
}

pub const MMAL_COMPONENT_DEFAULT_CONTAINER_READER: &[u8; 20] = b"vc.container_reader\0";
pub const MMAL_COMPONENT_DEFAULT_IMAGE_DECODER: &[u8; 20] = b"vc.ril.image_decode\0";
pub const MMAL_COMPONENT_DEFAULT_VIDEO_RENDERER: &[u8; 20] = b"vc.ril.video_render\0";

/* ------------------------------------------------------------------ */
/* libbcm_host types (vcos / vchi / tvservice)                        */
/* ------------------------------------------------------------------ */

pub type VCOS_STATUS_T = u32;
pub const VCOS_SUCCESS: VCOS_STATUS_T = 0;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct OPAQUE_VCHI_INSTANCE_T {
    _unused: [u8; 0],
}

pub type VCHI_INSTANCE_T = *mut OPAQUE_VCHI_INSTANCE_T;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct VCHI_CONNECTION_T {
    _unused: [u8; 0],
}

pub type HDMI_RES_GROUP_T = u32;
pub const HDMI_RES_GROUP_INVALID: HDMI_RES_GROUP_T = 0;
pub const HDMI_RES_GROUP_CEA: HDMI_RES_GROUP_T = 1;
pub const HDMI_RES_GROUP_DMT: HDMI_RES_GROUP_T = 2;

pub type HDMI_MODE_T = u32;
pub const HDMI_MODE_OFF: HDMI_MODE_T = 0;
pub const HDMI_MODE_DVI: HDMI_MODE_T = 1;
pub const HDMI_MODE_HDMI: HDMI_MODE_T = 2;
pub const HDMI_MODE_3D: HDMI_MODE_T = 3;

pub type HDMI_PROPERTY_T = u32;
pub const HDMI_PROPERTY_PIXEL_ENCODING: HDMI_PROPERTY_T = 0;
pub const HDMI_PROPERTY_PIXEL_CLOCK_TYPE: HDMI_PROPERTY_T = 1;
pub const HDMI_PROPERTY_CONTENT_TYPE: HDMI_PROPERTY_T = 2;
pub const HDMI_PROPERTY_FUZZY_MATCH: HDMI_PROPERTY_T = 3;
pub const HDMI_PROPERTY_3D_STRUCTURE: HDMI_PROPERTY_T = 4;

pub const HDMI_3D_FORMAT_NONE: u32 = 0;

pub const HDMI_PIXEL_CLOCK_TYPE_PAL: u32 = 0;
pub const HDMI_PIXEL_CLOCK_TYPE_NTSC: u32 = 1;

pub type HDMI_ASPECT_T = u32;
pub const HDMI_ASPECT_UNKNOWN: HDMI_ASPECT_T = 0;
pub const HDMI_ASPECT_4_3: HDMI_ASPECT_T = 1;
pub const HDMI_ASPECT_14_9: HDMI_ASPECT_T = 2;
pub const HDMI_ASPECT_16_9: HDMI_ASPECT_T = 3;
pub const HDMI_ASPECT_5_4: HDMI_ASPECT_T = 4;
pub const HDMI_ASPECT_16_10: HDMI_ASPECT_T = 5;
pub const HDMI_ASPECT_15_9: HDMI_ASPECT_T = 6;
pub const HDMI_ASPECT_64_27: HDMI_ASPECT_T = 7;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct HDMI_PROPERTY_PARAM_T {
    pub property: HDMI_PROPERTY_T,
    pub param1: u32,
    pub param2: u32,
}

/// One supported mode as reported by vc_tv_hdmi_get_supported_modes_new.
/// The leading C bitfield (scan_mode:1, native:1, group:3, code:7,
/// pixel_rep:3, aspect_ratio:5) is kept as one packed word with accessors.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct TV_SUPPORTED_MODE_NEW_T {
    pub mode_bits: u32,
    pub frame_rate: u16,
    pub width: u16,
    pub height: u16,
    pub pixel_freq: u32,
    pub struct_3d_mask: u32,
}

impl TV_SUPPORTED_MODE_NEW_T {
    pub fn scan_mode(&self) -> u32 {
        self.mode_bits & 0x1
    }

    pub fn native(&self) -> u32 {
        (self.mode_bits >> 1) & 0x1
    }

    pub fn group(&self) -> u32 {
        (self.mode_bits >> 2) & 0x7
    }

    pub fn code(&self) -> u32 {
        (self.mode_bits >> 5) & 0x7f
    }

    pub fn pixel_rep(&self) -> u32 {
        (self.mode_bits >> 12) & 0x7
    }

    pub fn aspect_ratio(&self) -> u32 {
        (self.mode_bits >> 15) & 0x1f
    }
}

impl Default for TV_SUPPORTED_MODE_NEW_T {
    fn default() -> Self {
        // Zeroed entry, as memset before the query in the original callers
        TV_SUPPORTED_MODE_NEW_T {
            mode_bits: 0,
            frame_rate: 0,
            width: 0,
            height: 0,
            pixel_freq: 0,
            struct_3d_mask: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct HDMI_DISPLAY_OPTIONS_T {
    pub aspect: HDMI_ASPECT_T,
    pub vertical_bar_present: u32,
    pub left_bar_width: u32,
    pub right_bar_width: u32,
    pub horizontal_bar_present: u32,
    pub top_bar_height: u32,
    pub bottom_bar_height: u32,
    pub overscan_flags: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct TV_DISPLAY_STATE_HDMI_T {
    pub state: u32,
    pub width: u32,
    pub height: u32,
    pub frame_rate: u16,
    pub scan_mode: u16,
    pub group: HDMI_RES_GROUP_T,
    pub mode: u32,
    pub pixel_rep: u32,
    pub aspect_ratio: HDMI_ASPECT_T,
    pub display_options: HDMI_DISPLAY_OPTIONS_T,
    pub pixel_encoding: u32,
    pub format_3d: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct TV_DISPLAY_STATE_SDTV_T {
    pub state: u32,
    pub width: u16,
    pub height: u16,
    pub frame_rate: u16,
    pub scan_mode: u16,
    pub mode: u32,
    pub colour: u32,
    pub cp_mode: u32,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub union TV_DISPLAY_UNION_T {
    pub hdmi: TV_DISPLAY_STATE_HDMI_T,
    pub sdtv: TV_DISPLAY_STATE_SDTV_T,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct TV_DISPLAY_STATE_T {
    pub state: u32,
    pub display: TV_DISPLAY_UNION_T,
}

/* ------------------------------------------------------------------ */
/* libmmal.so                                                         */
/* ------------------------------------------------------------------ */

pub struct MmalLibrary {
    __library: ::libloading::Library,
    pub mmal_graph_create: Result<
        unsafe extern "C" fn(graph: *mut *mut MMAL_GRAPH_T, userdata_size: u32) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_graph_new_component: Result<
        unsafe extern "C" fn(
            graph: *mut MMAL_GRAPH_T,
            name: *const c_char,
            component: *mut *mut MMAL_COMPONENT_T,
        ) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_graph_new_connection: Result<
        unsafe extern "C" fn(
            graph: *mut MMAL_GRAPH_T,
            out: *mut MMAL_PORT_T,
            in_: *mut MMAL_PORT_T,
            flags: u32,
            connection: *mut *mut MMAL_CONNECTION_T,
        ) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_graph_enable: Result<
        unsafe extern "C" fn(
            graph: *mut MMAL_GRAPH_T,
            cb: MMAL_GRAPH_EVENT_CB,
            cb_data: *mut c_void,
        ) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_graph_disable:
        Result<unsafe extern "C" fn(graph: *mut MMAL_GRAPH_T) -> MMAL_STATUS_T, ::libloading::Error>,
    pub mmal_graph_destroy:
        Result<unsafe extern "C" fn(graph: *mut MMAL_GRAPH_T) -> MMAL_STATUS_T, ::libloading::Error>,
    pub mmal_component_release: Result<
        unsafe extern "C" fn(component: *mut MMAL_COMPONENT_T) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_port_parameter_set: Result<
        unsafe extern "C" fn(
            port: *mut MMAL_PORT_T,
            param: *const MMAL_PARAMETER_HEADER_T,
        ) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_util_port_set_uri: Result<
        unsafe extern "C" fn(port: *mut MMAL_PORT_T, uri: *const c_char) -> MMAL_STATUS_T,
        ::libloading::Error,
    >,
    pub mmal_buffer_header_release:
        Result<unsafe extern "C" fn(header: *mut MMAL_BUFFER_HEADER_T), ::libloading::Error>,
}

impl MmalLibrary {
    /// # Safety
    ///
    /// Loading a shared library runs its initializers; the path must name a
    /// real libmmal build.
    pub unsafe fn new<P>(path: P) -> Result<Self, ::libloading::Error>
    where
        P: AsRef<::std::ffi::OsStr>,
    {
        let library = ::libloading::Library::new(path)?;
        Self::from_library(library)
    }

    /// # Safety
    ///
    /// The library must export symbols with the declared signatures.
    pub unsafe fn from_library<L>(library: L) -> Result<Self, ::libloading::Error>
    where
        L: Into<::libloading::Library>,
    {
        let __library = library.into();
        let mmal_graph_create = __library.get(b"mmal_graph_create\0").map(|sym| *sym);
        let mmal_graph_new_component = __library.get(b"mmal_graph_new_component\0").map(|sym| *sym);
        let mmal_graph_new_connection =
            __library.get(b"mmal_graph_new_connection\0").map(|sym| *sym);
        let mmal_graph_enable = __library.get(b"mmal_graph_enable\0").map(|sym| *sym);
        let mmal_graph_disable = __library.get(b"mmal_graph_disable\0").map(|sym| *sym);
        let mmal_graph_destroy = __library.get(b"mmal_graph_destroy\0").map(|sym| *sym);
        let mmal_component_release = __library.get(b"mmal_component_release\0").map(|sym| *sym);
        let mmal_port_parameter_set = __library.get(b"mmal_port_parameter_set\0").map(|sym| *sym);
        let mmal_util_port_set_uri = __library.get(b"mmal_util_port_set_uri\0").map(|sym| *sym);
        let mmal_buffer_header_release =
            __library.get(b"mmal_buffer_header_release\0").map(|sym| *sym);
        Ok(MmalLibrary {
            __library,
            mmal_graph_create,
            mmal_graph_new_component,
            mmal_graph_new_connection,
            mmal_graph_enable,
            mmal_graph_disable,
            mmal_graph_destroy,
            mmal_component_release,
            mmal_port_parameter_set,
            mmal_util_port_set_uri,
            mmal_buffer_header_release,
        })
    }

    pub unsafe fn mmal_graph_create(
        &self,
        graph: *mut *mut MMAL_GRAPH_T,
        userdata_size: u32,
    ) -> MMAL_STATUS_T {
        (self
            .mmal_graph_create
            .as_ref()
            .expect("Expected function, got error."))(graph, userdata_size)
    }

    pub unsafe fn mmal_graph_new_component(
        &self,
        graph: *mut MMAL_GRAPH_T,
        name: *const c_char,
        component: *mut *mut MMAL_COMPONENT_T,
    ) -> MMAL_STATUS_T {
        (self
            .mmal_graph_new_component
            .as_ref()
            .expect("Expected function, got error."))(graph, name, component)
    }

    pub unsafe fn mmal_graph_new_connection(
        &self,
        graph: *mut MMAL_GRAPH_T,
        out: *mut MMAL_PORT_T,
        in_: *mut MMAL_PORT_T,
        flags: u32,
        connection: *mut *mut MMAL_CONNECTION_T,
    ) -> MMAL_STATUS_T {
        (self
            .mmal_graph_new_connection
            .as_ref()
            .expect("Expected function, got error."))(graph, out, in_, flags, connection)
    }

    pub unsafe fn mmal_graph_enable(
        &self,
        graph: *mut MMAL_GRAPH_T,
        cb: MMAL_GRAPH_EVENT_CB,
        cb_data: *mut c_void,
    ) -> MMAL_STATUS_T {
        (self
            .mmal_graph_enable
            .as_ref()
            .expect("Expected function, got error."))(graph, cb, cb_data)
    }

    pub unsafe fn mmal_graph_disable(&self, graph: *mut MMAL_GRAPH_T) -> MMAL_STATUS_T {
        (self
            .mmal_graph_disable
            .as_ref()
            .expect("Expected function, got error."))(graph)
    }

    pub unsafe fn mmal_graph_destroy(&self, graph: *mut MMAL_GRAPH_T) -> MMAL_STATUS_T {
        (self
            .mmal_graph_destroy
            .as_ref()
            .expect("Expected function, got error."))(graph)
    }

    pub unsafe fn mmal_component_release(&self, component: *mut MMAL_COMPONENT_T) -> MMAL_STATUS_T {
        (self
            .mmal_component_release
            .as_ref()
            .expect("Expected function, got error."))(component)
    }

    pub unsafe fn mmal_port_parameter_set(
        &self,
        port: *mut MMAL_PORT_T,
        param: *const MMAL_PARAMETER_HEADER_T,
    ) -> MMAL_STATUS_T {
        (self
            .mmal_port_parameter_set
            .as_ref()
            .expect("Expected function, got error."))(port, param)
    }

    pub unsafe fn mmal_util_port_set_uri(
        &self,
        port: *mut MMAL_PORT_T,
        uri: *const c_char,
    ) -> MMAL_STATUS_T {
        (self
            .mmal_util_port_set_uri
            .as_ref()
            .expect("Expected function, got error."))(port, uri)
    }

    pub unsafe fn mmal_buffer_header_release(&self, header: *mut MMAL_BUFFER_HEADER_T) {
        (self
            .mmal_buffer_header_release
            .as_ref()
            .expect("Expected function, got error."))(header)
    }
}

/* ------------------------------------------------------------------ */
/* libbcm_host.so                                                     */
/* ------------------------------------------------------------------ */

pub struct BcmHostLibrary {
    __library: ::libloading::Library,
    pub bcm_host_init: Result<unsafe extern "C" fn(), ::libloading::Error>,
    pub vcos_init: Result<unsafe extern "C" fn() -> VCOS_STATUS_T, ::libloading::Error>,
    pub vchi_initialise:
        Result<unsafe extern "C" fn(instance: *mut VCHI_INSTANCE_T) -> i32, ::libloading::Error>,
    pub vchi_connect: Result<
        unsafe extern "C" fn(
            connections: *mut *mut VCHI_CONNECTION_T,
            num_connections: u32,
            instance: VCHI_INSTANCE_T,
        ) -> i32,
        ::libloading::Error,
    >,
    pub vchi_disconnect:
        Result<unsafe extern "C" fn(instance: VCHI_INSTANCE_T) -> i32, ::libloading::Error>,
    pub vc_vchi_tv_init: Result<
        unsafe extern "C" fn(
            initialise_instance: VCHI_INSTANCE_T,
            connections: *mut *mut VCHI_CONNECTION_T,
            num_connections: u32,
        ),
        ::libloading::Error,
    >,
    pub vc_vchi_tv_stop: Result<unsafe extern "C" fn(), ::libloading::Error>,
    pub vc_tv_hdmi_set_property: Result<
        unsafe extern "C" fn(property: *const HDMI_PROPERTY_PARAM_T) -> c_int,
        ::libloading::Error,
    >,
    pub vc_tv_hdmi_get_property: Result<
        unsafe extern "C" fn(property: *mut HDMI_PROPERTY_PARAM_T) -> c_int,
        ::libloading::Error,
    >,
    pub vc_tv_hdmi_power_on_preferred: Result<unsafe extern "C" fn() -> c_int, ::libloading::Error>,
    pub vc_tv_hdmi_power_on_explicit_new: Result<
        unsafe extern "C" fn(mode: HDMI_MODE_T, group: HDMI_RES_GROUP_T, code: u32) -> c_int,
        ::libloading::Error,
    >,
    pub vc_tv_power_off: Result<unsafe extern "C" fn() -> c_int, ::libloading::Error>,
    pub vc_tv_get_display_state:
        Result<unsafe extern "C" fn(tvstate: *mut TV_DISPLAY_STATE_T) -> c_int, ::libloading::Error>,
    pub vc_tv_hdmi_get_supported_modes_new: Result<
        unsafe extern "C" fn(
            group: HDMI_RES_GROUP_T,
            supported_modes: *mut TV_SUPPORTED_MODE_NEW_T,
            max_supported_modes: u32,
            preferred_group: *mut HDMI_RES_GROUP_T,
            preferred_mode: *mut u32,
        ) -> c_int,
        ::libloading::Error,
    >,
}

impl BcmHostLibrary {
    /// # Safety
    ///
    /// Loading a shared library runs its initializers; the path must name a
    /// real libbcm_host build.
    pub unsafe fn new<P>(path: P) -> Result<Self, ::libloading::Error>
    where
        P: AsRef<::std::ffi::OsStr>,
    {
        let library = ::libloading::Library::new(path)?;
        Self::from_library(library)
    }

    /// # Safety
    ///
    /// The library must export symbols with the declared signatures.
    pub unsafe fn from_library<L>(library: L) -> Result<Self, ::libloading::Error>
    where
        L: Into<::libloading::Library>,
    {
        let __library = library.into();
        let bcm_host_init = __library.get(b"bcm_host_init\0").map(|sym| *sym);
        let vcos_init = __library.get(b"vcos_init\0").map(|sym| *sym);
        let vchi_initialise = __library.get(b"vchi_initialise\0").map(|sym| *sym);
        let vchi_connect = __library.get(b"vchi_connect\0").map(|sym| *sym);
        let vchi_disconnect = __library.get(b"vchi_disconnect\0").map(|sym| *sym);
        let vc_vchi_tv_init = __library.get(b"vc_vchi_tv_init\0").map(|sym| *sym);
        let vc_vchi_tv_stop = __library.get(b"vc_vchi_tv_stop\0").map(|sym| *sym);
        let vc_tv_hdmi_set_property = __library.get(b"vc_tv_hdmi_set_property\0").map(|sym| *sym);
        let vc_tv_hdmi_get_property = __library.get(b"vc_tv_hdmi_get_property\0").map(|sym| *sym);
        let vc_tv_hdmi_power_on_preferred = __library
            .get(b"vc_tv_hdmi_power_on_preferred\0")
            .map(|sym| *sym);
        let vc_tv_hdmi_power_on_explicit_new = __library
            .get(b"vc_tv_hdmi_power_on_explicit_new\0")
            .map(|sym| *sym);
        let vc_tv_power_off = __library.get(b"vc_tv_power_off\0").map(|sym| *sym);
        let vc_tv_get_display_state = __library.get(b"vc_tv_get_display_state\0").map(|sym| *sym);
        let vc_tv_hdmi_get_supported_modes_new = __library
            .get(b"vc_tv_hdmi_get_supported_modes_new\0")
            .map(|sym| *sym);
        Ok(BcmHostLibrary {
            __library,
            bcm_host_init,
            vcos_init,
            vchi_initialise,
            vchi_connect,
            vchi_disconnect,
            vc_vchi_tv_init,
            vc_vchi_tv_stop,
            vc_tv_hdmi_set_property,
            vc_tv_hdmi_get_property,
            vc_tv_hdmi_power_on_preferred,
            vc_tv_hdmi_power_on_explicit_new,
            vc_tv_power_off,
            vc_tv_get_display_state,
            vc_tv_hdmi_get_supported_modes_new,
        })
    }

    pub unsafe fn bcm_host_init(&self) {
        (self
            .bcm_host_init
            .as_ref()
            .expect("Expected function, got error."))()
    }

    pub unsafe fn vcos_init(&self) -> VCOS_STATUS_T {
        (self
            .vcos_init
            .as_ref()
            .expect("Expected function, got error."))()
    }

    pub unsafe fn vchi_initialise(&self, instance: *mut VCHI_INSTANCE_T) -> i32 {
        (self
            .vchi_initialise
            .as_ref()
            .expect("Expected function, got error."))(instance)
    }

    pub unsafe fn vchi_connect(
        &self,
        connections: *mut *mut VCHI_CONNECTION_T,
        num_connections: u32,
        instance: VCHI_INSTANCE_T,
    ) -> i32 {
        (self
            .vchi_connect
            .as_ref()
            .expect("Expected function, got error."))(connections, num_connections, instance)
    }

    pub unsafe fn vchi_disconnect(&self, instance: VCHI_INSTANCE_T) -> i32 {
        (self
            .vchi_disconnect
            .as_ref()
            .expect("Expected function, got error."))(instance)
    }

    pub unsafe fn vc_vchi_tv_init(
        &self,
        initialise_instance: VCHI_INSTANCE_T,
        connections: *mut *mut VCHI_CONNECTION_T,
        num_connections: u32,
    ) {
        (self
            .vc_vchi_tv_init
            .as_ref()
            .expect("Expected function, got error."))(
            initialise_instance,
            connections,
            num_connections,
        )
    }

    pub unsafe fn vc_vchi_tv_stop(&self) {
        (self
            .vc_vchi_tv_stop
            .as_ref()
            .expect("Expected function, got error."))()
    }

    pub unsafe fn vc_tv_hdmi_set_property(&self, property: *const HDMI_PROPERTY_PARAM_T) -> c_int {
        (self
            .vc_tv_hdmi_set_property
            .as_ref()
            .expect("Expected function, got error."))(property)
    }

    pub unsafe fn vc_tv_hdmi_get_property(&self, property: *mut HDMI_PROPERTY_PARAM_T) -> c_int {
        (self
            .vc_tv_hdmi_get_property
            .as_ref()
            .expect("Expected function, got error."))(property)
    }

    pub unsafe fn vc_tv_hdmi_power_on_preferred(&self) -> c_int {
        (self
            .vc_tv_hdmi_power_on_preferred
            .as_ref()
            .expect("Expected function, got error."))()
    }

    pub unsafe fn vc_tv_hdmi_power_on_explicit_new(
        &self,
        mode: HDMI_MODE_T,
        group: HDMI_RES_GROUP_T,
        code: u32,
    ) -> c_int {
        (self
            .vc_tv_hdmi_power_on_explicit_new
            .as_ref()
            .expect("Expected function, got error."))(mode, group, code)
    }

    pub unsafe fn vc_tv_power_off(&self) -> c_int {
        (self
            .vc_tv_power_off
            .as_ref()
            .expect("Expected function, got error."))()
    }

    pub unsafe fn vc_tv_get_display_state(&self, tvstate: *mut TV_DISPLAY_STATE_T) -> c_int {
        (self
            .vc_tv_get_display_state
            .as_ref()
            .expect("Expected function, got error."))(tvstate)
    }

    pub unsafe fn vc_tv_hdmi_get_supported_modes_new(
        &self,
        group: HDMI_RES_GROUP_T,
        supported_modes: *mut TV_SUPPORTED_MODE_NEW_T,
        max_supported_modes: u32,
        preferred_group: *mut HDMI_RES_GROUP_T,
        preferred_mode: *mut u32,
    ) -> c_int {
        (self
            .vc_tv_hdmi_get_supported_modes_new
            .as_ref()
            .expect("Expected function, got error."))(
            group,
            supported_modes,
            max_supported_modes,
            preferred_group,
            preferred_mode,
        )
    }
}
