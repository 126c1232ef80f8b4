// SPDX-License-Identifier: MIT

//! Real backend over the VideoCore firmware libraries.
//!
//! Implements [`GraphBackend`] against libmmal and [`TvBackend`] against
//! libbcm_host, both loaded at runtime through `mmalplay-sys`. Every entry
//! point verifies the symbols it needs before touching the hardware, so a
//! build of the firmware libraries missing a symbol surfaces as
//! [`Error::SymbolNotFound`] instead of a crash.

use crate::{
    graph::{GraphBackend, Link, StageKind},
    mode::{AspectRatio, ModeGroup, PixelClockType, ScanMode},
    tv::{HardwareState, HdmiProperty, ModeQuery, RawMode, TvBackend},
    Error,
};
use mmalplay_sys as sys;
use std::{
    ffi::{c_char, c_void, CString},
    mem, ptr,
    sync::Once,
};

/// Upper bound on mode-table entries per group, matching the firmware's
/// own table sizing.
const MAX_MODES: usize = 127;

static HOST_INIT: Once = Once::new();

/// Zero-sized handle to the VideoCore firmware.
#[derive(Debug, Default, Clone, Copy)]
pub struct VideoCore;

impl VideoCore {
    pub fn new() -> Self {
        VideoCore
    }
}

/// VCHI control channel to the firmware TV service.
pub struct VchiChannel {
    instance: sys::VCHI_INSTANCE_T,
    connection: *mut sys::VCHI_CONNECTION_T,
}

// The channel is only a pair of firmware handles; the session type
// serializes all access to them.
unsafe impl Send for VchiChannel {}

fn require<T>(
    symbol: &Result<T, sys::libloading::Error>,
    name: &'static str,
) -> Result<(), Error> {
    if symbol.is_ok() {
        Ok(())
    } else {
        Err(Error::SymbolNotFound(name))
    }
}

fn group_to_raw(group: ModeGroup) -> sys::HDMI_RES_GROUP_T {
    match group {
        ModeGroup::Cea => sys::HDMI_RES_GROUP_CEA,
        ModeGroup::Dmt => sys::HDMI_RES_GROUP_DMT,
    }
}

fn group_from_raw(raw: sys::HDMI_RES_GROUP_T) -> Option<ModeGroup> {
    match raw {
        sys::HDMI_RES_GROUP_CEA => Some(ModeGroup::Cea),
        sys::HDMI_RES_GROUP_DMT => Some(ModeGroup::Dmt),
        _ => None,
    }
}

fn scan_mode_from_raw(raw: u32) -> ScanMode {
    if raw == 0 {
        ScanMode::Progressive
    } else {
        ScanMode::Interlaced
    }
}

fn aspect_from_raw(raw: sys::HDMI_ASPECT_T) -> AspectRatio {
    match raw {
        sys::HDMI_ASPECT_4_3 => AspectRatio::Ratio4x3,
        sys::HDMI_ASPECT_14_9 => AspectRatio::Ratio14x9,
        sys::HDMI_ASPECT_16_9 => AspectRatio::Ratio16x9,
        sys::HDMI_ASPECT_5_4 => AspectRatio::Ratio5x4,
        sys::HDMI_ASPECT_16_10 => AspectRatio::Ratio16x10,
        sys::HDMI_ASPECT_15_9 => AspectRatio::Ratio15x9,
        sys::HDMI_ASPECT_64_27 => AspectRatio::Ratio64x27,
        _ => AspectRatio::Unknown,
    }
}

/// Fetch one of the component's input ports.
///
/// # Safety
///
/// `component` must point at a live component descriptor.
unsafe fn input_port(
    component: *mut sys::MMAL_COMPONENT_T,
    index: u32,
) -> Result<*mut sys::MMAL_PORT_T, Error> {
    if component.is_null() {
        return Err(Error::NullPointer);
    }
    let component = unsafe { &*component };
    if index >= component.input_num || component.input.is_null() {
        return Err(Error::NullPointer);
    }
    let port = unsafe { *component.input.add(index as usize) };
    if port.is_null() {
        return Err(Error::NullPointer);
    }
    Ok(port)
}

/// Fetch one of the component's output ports.
///
/// # Safety
///
/// `component` must point at a live component descriptor.
unsafe fn output_port(
    component: *mut sys::MMAL_COMPONENT_T,
    index: u32,
) -> Result<*mut sys::MMAL_PORT_T, Error> {
    if component.is_null() {
        return Err(Error::NullPointer);
    }
    let component = unsafe { &*component };
    if index >= component.output_num || component.output.is_null() {
        return Err(Error::NullPointer);
    }
    let port = unsafe { *component.output.add(index as usize) };
    if port.is_null() {
        return Err(Error::NullPointer);
    }
    Ok(port)
}

/// Graph control callback. The only events the playback pipeline sees are
/// buffers surfacing on control ports; they are returned to their pool.
unsafe extern "C" fn control_callback(
    _graph: *mut sys::MMAL_GRAPH_T,
    _port: *mut sys::MMAL_PORT_T,
    buffer: *mut sys::MMAL_BUFFER_HEADER_T,
    _cb_data: *mut c_void,
) {
    if let Some(lib) = sys::try_mmal() {
        if lib.mmal_buffer_header_release.is_ok() && !buffer.is_null() {
            unsafe { lib.mmal_buffer_header_release(buffer) };
        }
    }
}

impl GraphBackend for VideoCore {
    type Graph = *mut sys::MMAL_GRAPH_T;
    type Stage = *mut sys::MMAL_COMPONENT_T;
    type Link = ();

    fn bootstrap(&mut self) -> Result<(), Error> {
        let lib = sys::bcm_host()?;
        require(&lib.bcm_host_init, "bcm_host_init")?;
        HOST_INIT.call_once(|| unsafe { lib.bcm_host_init() });
        Ok(())
    }

    fn graph_create(&mut self) -> Result<Self::Graph, Error> {
        let lib = sys::mmal()?;
        require(&lib.mmal_graph_create, "mmal_graph_create")?;
        let mut graph = ptr::null_mut();
        let status = unsafe { lib.mmal_graph_create(&mut graph, 0) };
        if status != sys::MMAL_SUCCESS {
            return Err(Error::GraphCreate(status.into()));
        }
        if graph.is_null() {
            return Err(Error::NullPointer);
        }
        Ok(graph)
    }

    fn stage_create(
        &mut self,
        graph: &mut Self::Graph,
        kind: StageKind,
    ) -> Result<Self::Stage, Error> {
        let lib = sys::mmal()?;
        require(&lib.mmal_graph_new_component, "mmal_graph_new_component")?;
        let name = match kind {
            StageKind::Reader => sys::MMAL_COMPONENT_DEFAULT_CONTAINER_READER,
            StageKind::Decoder => sys::MMAL_COMPONENT_DEFAULT_IMAGE_DECODER,
            StageKind::Renderer => sys::MMAL_COMPONENT_DEFAULT_VIDEO_RENDERER,
        };
        let mut component = ptr::null_mut();
        let status = unsafe {
            lib.mmal_graph_new_component(*graph, name.as_ptr() as *const c_char, &mut component)
        };
        if status != sys::MMAL_SUCCESS {
            return Err(Error::StageCreate(kind, status.into()));
        }
        if component.is_null() {
            return Err(Error::NullPointer);
        }
        Ok(component)
    }

    fn stage_release(&mut self, stage: Self::Stage) {
        if let Ok(lib) = sys::mmal() {
            if lib.mmal_component_release.is_ok() {
                unsafe { lib.mmal_component_release(stage) };
            }
        }
    }

    fn set_display_region(
        &mut self,
        renderer: &mut Self::Stage,
        display_num: u32,
    ) -> Result<(), Error> {
        let lib = sys::mmal()?;
        require(&lib.mmal_port_parameter_set, "mmal_port_parameter_set")?;
        let input = unsafe { input_port(*renderer, 0)? };
        let mut region: sys::MMAL_DISPLAYREGION_T = unsafe { mem::zeroed() };
        region.hdr.id = sys::MMAL_PARAMETER_DISPLAYREGION;
        region.hdr.size = mem::size_of::<sys::MMAL_DISPLAYREGION_T>() as u32;
        region.set = sys::MMAL_DISPLAY_SET_LAYER | sys::MMAL_DISPLAY_SET_NUM;
        region.display_num = display_num;
        let status = unsafe { lib.mmal_port_parameter_set(input, &region.hdr) };
        if status != sys::MMAL_SUCCESS {
            return Err(Error::DisplayRegion(status.into()));
        }
        Ok(())
    }

    fn set_uri(&mut self, reader: &mut Self::Stage, uri: &str) -> Result<(), Error> {
        let lib = sys::mmal()?;
        require(&lib.mmal_util_port_set_uri, "mmal_util_port_set_uri")?;
        if reader.is_null() {
            return Err(Error::NullPointer);
        }
        // The container reader takes its uri through the control port.
        let control = unsafe { (**reader).control };
        if control.is_null() {
            return Err(Error::NullPointer);
        }
        let uri = CString::new(uri)?;
        let status = unsafe { lib.mmal_util_port_set_uri(control, uri.as_ptr()) };
        if status != sys::MMAL_SUCCESS {
            return Err(Error::SetUri(status.into()));
        }
        Ok(())
    }

    fn link_create(
        &mut self,
        graph: &mut Self::Graph,
        link: Link,
        from: &mut Self::Stage,
        to: &mut Self::Stage,
    ) -> Result<(), Error> {
        let lib = sys::mmal()?;
        require(&lib.mmal_graph_new_connection, "mmal_graph_new_connection")?;
        let out = unsafe { output_port(*from, 0)? };
        let in_ = unsafe { input_port(*to, 0)? };
        // The graph owns the connection; no handle comes back to us.
        let status =
            unsafe { lib.mmal_graph_new_connection(*graph, out, in_, 0, ptr::null_mut()) };
        if status != sys::MMAL_SUCCESS {
            return Err(Error::Connect(link, status.into()));
        }
        Ok(())
    }

    fn link_release(&mut self, _link: ()) {}

    fn graph_enable(&mut self, graph: &mut Self::Graph) -> Result<(), Error> {
        let lib = sys::mmal()?;
        require(&lib.mmal_graph_enable, "mmal_graph_enable")?;
        require(&lib.mmal_buffer_header_release, "mmal_buffer_header_release")?;
        let status =
            unsafe { lib.mmal_graph_enable(*graph, Some(control_callback), ptr::null_mut()) };
        if status != sys::MMAL_SUCCESS {
            return Err(Error::GraphEnable(status.into()));
        }
        Ok(())
    }

    fn graph_disable(&mut self, graph: &mut Self::Graph) {
        if let Ok(lib) = sys::mmal() {
            if lib.mmal_graph_disable.is_ok() {
                // Blocks until the firmware stops delivering callbacks.
                let status = unsafe { lib.mmal_graph_disable(*graph) };
                if status != sys::MMAL_SUCCESS {
                    log::warn!("graph disable returned {}", crate::Status::from(status));
                }
            }
        }
    }

    fn graph_destroy(&mut self, graph: Self::Graph) {
        if let Ok(lib) = sys::mmal() {
            if lib.mmal_graph_destroy.is_ok() {
                unsafe { lib.mmal_graph_destroy(graph) };
            }
        }
    }
}

impl VideoCore {
    fn pixel_clock_type(lib: &sys::BcmHostLibrary) -> PixelClockType {
        let mut param = sys::HDMI_PROPERTY_PARAM_T {
            property: sys::HDMI_PROPERTY_PIXEL_CLOCK_TYPE,
            param1: sys::HDMI_PIXEL_CLOCK_TYPE_PAL,
            param2: 0,
        };
        // Anything but an explicit NTSC answer reads as PAL.
        if lib.vc_tv_hdmi_get_property.is_ok() {
            unsafe { lib.vc_tv_hdmi_get_property(&mut param) };
        }
        if param.param1 == sys::HDMI_PIXEL_CLOCK_TYPE_NTSC {
            PixelClockType::Ntsc
        } else {
            PixelClockType::Pal
        }
    }
}

impl TvBackend for VideoCore {
    type Channel = VchiChannel;

    fn channel_connect(&mut self) -> Result<VchiChannel, Error> {
        let lib = sys::bcm_host()?;
        require(&lib.vcos_init, "vcos_init")?;
        require(&lib.vchi_initialise, "vchi_initialise")?;
        require(&lib.vchi_connect, "vchi_connect")?;

        let status = unsafe { lib.vcos_init() };
        if status != sys::VCOS_SUCCESS {
            return Err(Error::ChannelInit(status as i32));
        }
        let mut instance: sys::VCHI_INSTANCE_T = ptr::null_mut();
        let ret = unsafe { lib.vchi_initialise(&mut instance) };
        if ret != 0 {
            return Err(Error::ChannelInit(ret));
        }
        let ret = unsafe { lib.vchi_connect(ptr::null_mut(), 0, instance) };
        if ret != 0 {
            return Err(Error::ChannelConnect(ret));
        }
        Ok(VchiChannel {
            instance,
            connection: ptr::null_mut(),
        })
    }

    fn service_init(&mut self, channel: &mut VchiChannel) -> Result<(), Error> {
        let lib = sys::bcm_host()?;
        require(&lib.vc_vchi_tv_init, "vc_vchi_tv_init")?;
        unsafe { lib.vc_vchi_tv_init(channel.instance, &mut channel.connection, 1) };
        Ok(())
    }

    fn service_stop(&mut self, _channel: &mut VchiChannel) {
        if let Ok(lib) = sys::bcm_host() {
            if lib.vc_vchi_tv_stop.is_ok() {
                unsafe { lib.vc_vchi_tv_stop() };
            }
        }
    }

    fn channel_disconnect(&mut self, channel: VchiChannel) {
        if let Ok(lib) = sys::bcm_host() {
            if lib.vchi_disconnect.is_ok() {
                unsafe { lib.vchi_disconnect(channel.instance) };
            }
        }
    }

    fn supported_modes(
        &mut self,
        _channel: &mut VchiChannel,
        group: ModeGroup,
    ) -> Result<ModeQuery, Error> {
        let lib = sys::bcm_host()?;
        require(
            &lib.vc_tv_hdmi_get_supported_modes_new,
            "vc_tv_hdmi_get_supported_modes_new",
        )?;
        let mut table = [sys::TV_SUPPORTED_MODE_NEW_T::default(); MAX_MODES];
        let mut preferred_group: sys::HDMI_RES_GROUP_T = sys::HDMI_RES_GROUP_INVALID;
        let mut preferred_mode: u32 = 0;
        let count = unsafe {
            lib.vc_tv_hdmi_get_supported_modes_new(
                group_to_raw(group),
                table.as_mut_ptr(),
                table.len() as u32,
                &mut preferred_group,
                &mut preferred_mode,
            )
        };
        if count < 0 {
            return Err(Error::ModeQuery(count));
        }
        let modes = table[..(count as usize).min(MAX_MODES)]
            .iter()
            .map(|raw| RawMode {
                code: raw.code(),
                frame_rate: u32::from(raw.frame_rate),
                pixel_freq_hz: raw.pixel_freq,
                width: u32::from(raw.width),
                height: u32::from(raw.height),
                scan_mode: scan_mode_from_raw(raw.scan_mode()),
                aspect: aspect_from_raw(raw.aspect_ratio()),
            })
            .collect();
        Ok(ModeQuery {
            modes,
            preferred_group: group_from_raw(preferred_group),
            preferred_mode,
        })
    }

    fn set_property(
        &mut self,
        _channel: &mut VchiChannel,
        property: HdmiProperty,
    ) -> Result<(), Error> {
        let lib = sys::bcm_host()?;
        require(&lib.vc_tv_hdmi_set_property, "vc_tv_hdmi_set_property")?;
        let (property, param1) = match property {
            HdmiProperty::ThreeDStructureNone => {
                (sys::HDMI_PROPERTY_3D_STRUCTURE, sys::HDMI_3D_FORMAT_NONE)
            }
            HdmiProperty::PixelClockType(PixelClockType::Pal) => (
                sys::HDMI_PROPERTY_PIXEL_CLOCK_TYPE,
                sys::HDMI_PIXEL_CLOCK_TYPE_PAL,
            ),
            HdmiProperty::PixelClockType(PixelClockType::Ntsc) => (
                sys::HDMI_PROPERTY_PIXEL_CLOCK_TYPE,
                sys::HDMI_PIXEL_CLOCK_TYPE_NTSC,
            ),
        };
        let param = sys::HDMI_PROPERTY_PARAM_T {
            property,
            param1,
            param2: 0,
        };
        let ret = unsafe { lib.vc_tv_hdmi_set_property(&param) };
        if ret != 0 {
            return Err(Error::SetProperty(ret));
        }
        Ok(())
    }

    fn power_on_preferred(&mut self, _channel: &mut VchiChannel) -> Result<(), Error> {
        let lib = sys::bcm_host()?;
        require(
            &lib.vc_tv_hdmi_power_on_preferred,
            "vc_tv_hdmi_power_on_preferred",
        )?;
        let ret = unsafe { lib.vc_tv_hdmi_power_on_preferred() };
        if ret != 0 {
            return Err(Error::PowerOn(ret));
        }
        Ok(())
    }

    fn power_on_explicit(
        &mut self,
        _channel: &mut VchiChannel,
        group: ModeGroup,
        mode: u32,
    ) -> Result<(), Error> {
        let lib = sys::bcm_host()?;
        require(
            &lib.vc_tv_hdmi_power_on_explicit_new,
            "vc_tv_hdmi_power_on_explicit_new",
        )?;
        let ret = unsafe {
            lib.vc_tv_hdmi_power_on_explicit_new(sys::HDMI_MODE_HDMI, group_to_raw(group), mode)
        };
        if ret != 0 {
            return Err(Error::PowerOn(ret));
        }
        Ok(())
    }

    fn power_off(&mut self, _channel: &mut VchiChannel) -> Result<(), Error> {
        let lib = sys::bcm_host()?;
        require(&lib.vc_tv_power_off, "vc_tv_power_off")?;
        let ret = unsafe { lib.vc_tv_power_off() };
        if ret != 0 {
            return Err(Error::PowerOff(ret));
        }
        Ok(())
    }

    fn display_state(&mut self, _channel: &mut VchiChannel) -> Result<HardwareState, Error> {
        let lib = sys::bcm_host()?;
        require(&lib.vc_tv_get_display_state, "vc_tv_get_display_state")?;
        let mut state: sys::TV_DISPLAY_STATE_T = unsafe { mem::zeroed() };
        let ret = unsafe { lib.vc_tv_get_display_state(&mut state) };
        if ret != 0 {
            return Err(Error::DisplayState(ret));
        }
        let hdmi = unsafe { state.display.hdmi };
        Ok(HardwareState {
            frame_rate: u32::from(hdmi.frame_rate),
            clock_type: Self::pixel_clock_type(lib),
            group: group_from_raw(hdmi.group),
            mode: hdmi.mode,
            scan_mode: scan_mode_from_raw(u32::from(hdmi.scan_mode)),
            aspect: aspect_from_raw(hdmi.aspect_ratio),
            width: hdmi.width,
            height: hdmi.height,
        })
    }
}
