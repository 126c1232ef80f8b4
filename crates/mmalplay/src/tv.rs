// SPDX-License-Identifier: MIT

//! HDMI/TV display control session.
//!
//! Wraps the VideoCore TV service behind a start/stop session: queries for
//! supported display modes, power transitions (preferred, explicit mode,
//! off), and the live display status with NTSC frame-rate correction.
//!
//! # Example
//!
//! ```no_run
//! use mmalplay::{mode::ModeGroup, tv::TvService};
//!
//! let mut tv = TvService::new();
//! tv.start()?;
//! for mode in tv.modes(ModeGroup::Cea)? {
//!     println!("{}", mode);
//! }
//! tv.stop();
//! # Ok::<(), mmalplay::Error>(())
//! ```

use crate::{
    mode::{DisplayMode, DisplayState, ModeGroup, PixelClockType, ScanMode},
    videocore::VideoCore,
    Error,
};

/// One supported-mode descriptor as reported by the hardware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMode {
    pub code: u32,
    pub frame_rate: u32,
    /// Pixel clock in Hz.
    pub pixel_freq_hz: u32,
    pub width: u32,
    pub height: u32,
    pub scan_mode: ScanMode,
    pub aspect: crate::mode::AspectRatio,
}

/// Result of a supported-modes query, including the display's preferred
/// group and mode which the hardware reports as a side effect.
#[derive(Debug, Clone, Default)]
pub struct ModeQuery {
    pub modes: Vec<RawMode>,
    pub preferred_group: Option<ModeGroup>,
    pub preferred_mode: u32,
}

/// Raw display state as reported by the hardware, before frame-rate
/// correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareState {
    pub frame_rate: u32,
    pub clock_type: PixelClockType,
    pub group: Option<ModeGroup>,
    pub mode: u32,
    pub scan_mode: ScanMode,
    pub aspect: crate::mode::AspectRatio,
    pub width: u32,
    pub height: u32,
}

/// HDMI property writes the session issues before power transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdmiProperty {
    /// Clear any 3D structure so the display comes up flat.
    ThreeDStructureNone,
    /// Force the pixel clock interpretation.
    PixelClockType(PixelClockType),
}

/// TV service operations the session state machine is written against.
///
/// The real implementation is [`VideoCore`]; tests substitute a counting
/// double, mirroring [`crate::graph::GraphBackend`].
pub trait TvBackend {
    type Channel;

    /// Bring up the host interface and connect a control channel.
    fn channel_connect(&mut self) -> Result<Self::Channel, Error>;

    /// Register the TV service on a connected channel.
    fn service_init(&mut self, channel: &mut Self::Channel) -> Result<(), Error>;

    /// Deregister the TV service.
    fn service_stop(&mut self, channel: &mut Self::Channel);

    /// Tear down the control channel.
    fn channel_disconnect(&mut self, channel: Self::Channel);

    fn supported_modes(
        &mut self,
        channel: &mut Self::Channel,
        group: ModeGroup,
    ) -> Result<ModeQuery, Error>;

    fn set_property(
        &mut self,
        channel: &mut Self::Channel,
        property: HdmiProperty,
    ) -> Result<(), Error>;

    fn power_on_preferred(&mut self, channel: &mut Self::Channel) -> Result<(), Error>;

    fn power_on_explicit(
        &mut self,
        channel: &mut Self::Channel,
        group: ModeGroup,
        mode: u32,
    ) -> Result<(), Error>;

    fn power_off(&mut self, channel: &mut Self::Channel) -> Result<(), Error>;

    fn display_state(&mut self, channel: &mut Self::Channel) -> Result<HardwareState, Error>;
}

/// A started-or-stopped session over the TV service.
///
/// All queries and power transitions require [`start`](TvService::start)
/// first and return [`Error::NotStarted`] otherwise. A failed power
/// transition stops the session; query failures leave it running.
pub struct TvService<B: TvBackend = VideoCore> {
    backend: B,
    channel: Option<B::Channel>,
    preferred: Option<(ModeGroup, u32)>,
}

impl TvService<VideoCore> {
    /// Create a session over the real VideoCore backend.
    pub fn new() -> Self {
        Self::with_backend(VideoCore::new())
    }
}

impl Default for TvService<VideoCore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TvBackend> TvService<B> {
    /// Create a session over an explicit backend.
    pub fn with_backend(backend: B) -> Self {
        TvService {
            backend,
            channel: None,
            preferred: None,
        }
    }

    /// Whether the session is currently started.
    pub fn is_started(&self) -> bool {
        self.channel.is_some()
    }

    /// Connect the control channel and register the TV service.
    ///
    /// Idempotent while started. If service registration fails the channel
    /// is disconnected again before the error returns.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.channel.is_some() {
            return Ok(());
        }
        let mut channel = self.backend.channel_connect()?;
        if let Err(err) = self.backend.service_init(&mut channel) {
            self.backend.channel_disconnect(channel);
            return Err(err);
        }
        self.channel = Some(channel);
        Ok(())
    }

    /// Deregister the service and disconnect the channel.
    ///
    /// Infallible and idempotent; stopping a never-started session is a
    /// no-op.
    pub fn stop(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            self.backend.service_stop(&mut channel);
            self.backend.channel_disconnect(channel);
        }
    }

    /// Query the display modes the attached display supports in `group`.
    ///
    /// Also records the display's preferred group and mode, which the
    /// hardware reports alongside the mode table (see
    /// [`preferred`](TvService::preferred)).
    pub fn modes(&mut self, group: ModeGroup) -> Result<Vec<DisplayMode>, Error> {
        let channel = self.channel.as_mut().ok_or(Error::NotStarted)?;
        let query = self.backend.supported_modes(channel, group)?;
        if let Some(preferred_group) = query.preferred_group {
            self.preferred = Some((preferred_group, query.preferred_mode));
        }
        Ok(query
            .modes
            .iter()
            .map(|raw| DisplayMode {
                group,
                code: raw.code,
                frame_rate: raw.frame_rate,
                clock_mhz: raw.pixel_freq_hz / 1_000_000,
                width: raw.width,
                height: raw.height,
                scan_mode: raw.scan_mode,
                aspect: raw.aspect,
            })
            .collect())
    }

    /// The display's preferred (group, mode) as recorded by the most
    /// recent query that reported one.
    pub fn preferred(&self) -> Option<(ModeGroup, u32)> {
        self.preferred
    }

    /// Actively determine the display's preferred (group, mode), querying
    /// the CEA table first and falling back to DMT.
    pub fn preferred_mode(&mut self) -> Result<Option<(ModeGroup, u32)>, Error> {
        self.preferred = None;
        for group in [ModeGroup::Cea, ModeGroup::Dmt] {
            self.modes(group)?;
            if let Some(preferred) = self.preferred {
                return Ok(Some(preferred));
            }
        }
        Ok(None)
    }

    /// Power the display on in its preferred mode.
    ///
    /// Clears the 3D structure first so the display comes up flat. Any
    /// failure in the sequence, property write included, stops the
    /// session before the error returns.
    pub fn power_on_preferred(&mut self) -> Result<(), Error> {
        self.power_transition(|backend, channel| {
            backend.set_property(channel, HdmiProperty::ThreeDStructureNone)?;
            backend.power_on_preferred(channel)
        })
    }

    /// Power the display on in an explicit (group, mode).
    ///
    /// Clears the 3D structure and pins the pixel clock to PAL
    /// interpretation so the hardware drives the nominal rate, then powers
    /// on in full HDMI mode. Any failure in the sequence stops the
    /// session before the error returns.
    pub fn power_on_explicit(&mut self, group: ModeGroup, mode: u32) -> Result<(), Error> {
        self.power_transition(|backend, channel| {
            backend.set_property(channel, HdmiProperty::ThreeDStructureNone)?;
            backend.set_property(channel, HdmiProperty::PixelClockType(PixelClockType::Pal))?;
            backend.power_on_explicit(channel, group, mode)
        })
    }

    /// Power the display off.
    ///
    /// A failed power-off stops the session before the error returns.
    pub fn power_off(&mut self) -> Result<(), Error> {
        self.power_transition(|backend, channel| backend.power_off(channel))
    }

    /// Run a power sequence against the started session, stopping the
    /// session if any step of it fails.
    fn power_transition(
        &mut self,
        transition: impl FnOnce(&mut B, &mut B::Channel) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let channel = self.channel.as_mut().ok_or(Error::NotStarted)?;
        if let Err(err) = transition(&mut self.backend, channel) {
            self.stop();
            return Err(err);
        }
        Ok(())
    }

    /// Current display state.
    ///
    /// When the pixel clock runs NTSC timing, the reported nominal frame
    /// rate is corrected by 1000/1001 (so a nominal 60 reads back as
    /// 59.94). A failed query leaves the session running.
    pub fn status(&mut self) -> Result<DisplayState, Error> {
        let channel = self.channel.as_mut().ok_or(Error::NotStarted)?;
        let raw = self.backend.display_state(channel)?;
        let mut frame_rate = raw.frame_rate as f32;
        if raw.clock_type == PixelClockType::Ntsc {
            frame_rate = frame_rate * 1000.0 / 1001.0;
        }
        Ok(DisplayState {
            frame_rate,
            mode: raw.mode,
            scan_mode: raw.scan_mode,
            group: raw.group,
            aspect: raw.aspect,
            width: raw.width,
            height: raw.height,
        })
    }
}

impl<B: TvBackend> Drop for TvService<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::AspectRatio;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum FailPoint {
        Connect,
        ServiceInit,
        Modes,
        SetProperty,
        PowerOnPreferred,
        PowerOnExplicit,
        PowerOff,
        DisplayState,
    }

    #[derive(Debug, Default)]
    struct Ledger {
        fail: Option<FailPoint>,
        connects: u32,
        disconnects: u32,
        service_inits: u32,
        service_stops: u32,
        queried_groups: Vec<ModeGroup>,
        properties: Vec<HdmiProperty>,
        power_on_preferred: u32,
        power_on_explicit: Vec<(ModeGroup, u32)>,
        power_off: u32,
        query: ModeQuery,
        cea_query: Option<ModeQuery>,
        state: Option<HardwareState>,
    }

    #[derive(Clone)]
    struct MockTv {
        ledger: Rc<RefCell<Ledger>>,
    }

    impl MockTv {
        fn new() -> Self {
            MockTv {
                ledger: Rc::new(RefCell::new(Ledger::default())),
            }
        }

        fn failing(fail: FailPoint) -> Self {
            let backend = Self::new();
            backend.ledger.borrow_mut().fail = Some(fail);
            backend
        }

        fn ledger(&self) -> Rc<RefCell<Ledger>> {
            Rc::clone(&self.ledger)
        }
    }

    impl TvBackend for MockTv {
        type Channel = u32;

        fn channel_connect(&mut self) -> Result<u32, Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::Connect) {
                return Err(Error::ChannelConnect(-1));
            }
            ledger.connects += 1;
            Ok(ledger.connects)
        }

        fn service_init(&mut self, _channel: &mut u32) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::ServiceInit) {
                return Err(Error::ServiceInit(-1));
            }
            ledger.service_inits += 1;
            Ok(())
        }

        fn service_stop(&mut self, _channel: &mut u32) {
            self.ledger.borrow_mut().service_stops += 1;
        }

        fn channel_disconnect(&mut self, _channel: u32) {
            self.ledger.borrow_mut().disconnects += 1;
        }

        fn supported_modes(
            &mut self,
            _channel: &mut u32,
            group: ModeGroup,
        ) -> Result<ModeQuery, Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::Modes) {
                return Err(Error::ModeQuery(-1));
            }
            ledger.queried_groups.push(group);
            if group == ModeGroup::Cea {
                if let Some(query) = &ledger.cea_query {
                    return Ok(query.clone());
                }
            }
            Ok(ledger.query.clone())
        }

        fn set_property(&mut self, _channel: &mut u32, property: HdmiProperty) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::SetProperty) {
                return Err(Error::SetProperty(-1));
            }
            ledger.properties.push(property);
            Ok(())
        }

        fn power_on_preferred(&mut self, _channel: &mut u32) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::PowerOnPreferred) {
                return Err(Error::PowerOn(-1));
            }
            ledger.power_on_preferred += 1;
            Ok(())
        }

        fn power_on_explicit(
            &mut self,
            _channel: &mut u32,
            group: ModeGroup,
            mode: u32,
        ) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::PowerOnExplicit) {
                return Err(Error::PowerOn(-1));
            }
            ledger.power_on_explicit.push((group, mode));
            Ok(())
        }

        fn power_off(&mut self, _channel: &mut u32) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::PowerOff) {
                return Err(Error::PowerOff(-1));
            }
            ledger.power_off += 1;
            Ok(())
        }

        fn display_state(&mut self, _channel: &mut u32) -> Result<HardwareState, Error> {
            let ledger = self.ledger.borrow();
            if ledger.fail == Some(FailPoint::DisplayState) {
                return Err(Error::DisplayState(-1));
            }
            Ok(ledger.state.unwrap_or(HardwareState {
                frame_rate: 60,
                clock_type: PixelClockType::Pal,
                group: Some(ModeGroup::Cea),
                mode: 16,
                scan_mode: ScanMode::Progressive,
                aspect: AspectRatio::Ratio16x9,
                width: 1920,
                height: 1080,
            }))
        }
    }

    fn service_with(backend: MockTv) -> (TvService<MockTv>, Rc<RefCell<Ledger>>) {
        let ledger = backend.ledger();
        (TvService::with_backend(backend), ledger)
    }

    fn dmt_descriptors() -> Vec<RawMode> {
        vec![
            RawMode {
                code: 4,
                frame_rate: 60,
                pixel_freq_hz: 25_175_000,
                width: 640,
                height: 480,
                scan_mode: ScanMode::Progressive,
                aspect: AspectRatio::Ratio4x3,
            },
            RawMode {
                code: 35,
                frame_rate: 60,
                pixel_freq_hz: 108_000_000,
                width: 1280,
                height: 1024,
                scan_mode: ScanMode::Progressive,
                aspect: AspectRatio::Ratio5x4,
            },
            RawMode {
                code: 82,
                frame_rate: 60,
                pixel_freq_hz: 148_500_000,
                width: 1920,
                height: 1080,
                scan_mode: ScanMode::Progressive,
                aspect: AspectRatio::Ratio16x9,
            },
        ]
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut tv, ledger) = service_with(MockTv::new());
        tv.start().unwrap();
        tv.start().unwrap();

        assert!(tv.is_started());
        assert_eq!(ledger.borrow().connects, 1);
        assert_eq!(ledger.borrow().service_inits, 1);
    }

    #[test]
    fn test_start_rolls_back_channel_on_service_failure() {
        let (mut tv, ledger) = service_with(MockTv::failing(FailPoint::ServiceInit));

        let err = tv.start().unwrap_err();
        assert!(matches!(err, Error::ServiceInit(_)));
        assert!(!tv.is_started());

        let ledger = ledger.borrow();
        assert_eq!(ledger.connects, 1);
        assert_eq!(ledger.disconnects, 1);
        assert_eq!(ledger.service_stops, 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut tv, ledger) = service_with(MockTv::new());
        tv.stop();
        assert_eq!(ledger.borrow().disconnects, 0);

        tv.start().unwrap();
        tv.stop();
        tv.stop();

        let ledger = ledger.borrow();
        assert_eq!(ledger.service_stops, 1);
        assert_eq!(ledger.disconnects, 1);
        assert_eq!(ledger.connects, 1);
    }

    #[test]
    fn test_operations_require_start() {
        let (mut tv, ledger) = service_with(MockTv::new());

        assert!(matches!(tv.modes(ModeGroup::Cea), Err(Error::NotStarted)));
        assert!(matches!(tv.status(), Err(Error::NotStarted)));
        assert!(matches!(tv.power_on_preferred(), Err(Error::NotStarted)));
        assert!(matches!(
            tv.power_on_explicit(ModeGroup::Cea, 16),
            Err(Error::NotStarted)
        ));
        assert!(matches!(tv.power_off(), Err(Error::NotStarted)));
        assert_eq!(ledger.borrow().queried_groups.len(), 0);
        assert_eq!(ledger.borrow().properties.len(), 0);
    }

    #[test]
    fn test_modes_maps_descriptors_and_records_preferred() {
        let (mut tv, ledger) = service_with(MockTv::new());
        ledger.borrow_mut().query = ModeQuery {
            modes: dmt_descriptors(),
            preferred_group: Some(ModeGroup::Dmt),
            preferred_mode: 82,
        };
        tv.start().unwrap();

        let modes = tv.modes(ModeGroup::Dmt).unwrap();
        assert_eq!(modes.len(), 3);
        assert_eq!(tv.preferred(), Some((ModeGroup::Dmt, 82)));

        let full_hd = &modes[2];
        assert_eq!(full_hd.group, ModeGroup::Dmt);
        assert_eq!(full_hd.code, 82);
        assert_eq!(full_hd.clock_mhz, 148);
        assert_eq!((full_hd.width, full_hd.height), (1920, 1080));
        assert_eq!(
            full_hd.to_string(),
            "DMT mode 82: 1920x1080p @ 60Hz 16:9 (148 MHz)"
        );
    }

    #[test]
    fn test_modes_without_preferred_keeps_previous() {
        let (mut tv, ledger) = service_with(MockTv::new());
        ledger.borrow_mut().query = ModeQuery {
            modes: dmt_descriptors(),
            preferred_group: Some(ModeGroup::Dmt),
            preferred_mode: 35,
        };
        tv.start().unwrap();
        tv.modes(ModeGroup::Dmt).unwrap();

        ledger.borrow_mut().query = ModeQuery::default();
        tv.modes(ModeGroup::Dmt).unwrap();
        assert_eq!(tv.preferred(), Some((ModeGroup::Dmt, 35)));
    }

    #[test]
    fn test_preferred_mode_prefers_cea() {
        let (mut tv, ledger) = service_with(MockTv::new());
        ledger.borrow_mut().cea_query = Some(ModeQuery {
            modes: vec![],
            preferred_group: Some(ModeGroup::Cea),
            preferred_mode: 16,
        });
        tv.start().unwrap();

        let preferred = tv.preferred_mode().unwrap();
        assert_eq!(preferred, Some((ModeGroup::Cea, 16)));
        assert_eq!(ledger.borrow().queried_groups, vec![ModeGroup::Cea]);
    }

    #[test]
    fn test_preferred_mode_falls_back_to_dmt() {
        let (mut tv, ledger) = service_with(MockTv::new());
        ledger.borrow_mut().cea_query = Some(ModeQuery::default());
        ledger.borrow_mut().query = ModeQuery {
            modes: vec![],
            preferred_group: Some(ModeGroup::Dmt),
            preferred_mode: 82,
        };
        tv.start().unwrap();

        let preferred = tv.preferred_mode().unwrap();
        assert_eq!(preferred, Some((ModeGroup::Dmt, 82)));
        assert_eq!(
            ledger.borrow().queried_groups,
            vec![ModeGroup::Cea, ModeGroup::Dmt]
        );
    }

    #[test]
    fn test_preferred_mode_none_when_display_reports_none() {
        let (mut tv, _ledger) = service_with(MockTv::new());
        tv.start().unwrap();
        assert_eq!(tv.preferred_mode().unwrap(), None);
    }

    #[test]
    fn test_power_on_preferred_clears_3d() {
        let (mut tv, ledger) = service_with(MockTv::new());
        tv.start().unwrap();
        tv.power_on_preferred().unwrap();

        let ledger = ledger.borrow();
        assert_eq!(ledger.properties, vec![HdmiProperty::ThreeDStructureNone]);
        assert_eq!(ledger.power_on_preferred, 1);
    }

    #[test]
    fn test_power_on_explicit_pins_pal_clock() {
        let (mut tv, ledger) = service_with(MockTv::new());
        tv.start().unwrap();
        tv.power_on_explicit(ModeGroup::Cea, 16).unwrap();

        let ledger = ledger.borrow();
        assert_eq!(
            ledger.properties,
            vec![
                HdmiProperty::ThreeDStructureNone,
                HdmiProperty::PixelClockType(PixelClockType::Pal),
            ]
        );
        assert_eq!(ledger.power_on_explicit, vec![(ModeGroup::Cea, 16)]);
    }

    #[test]
    fn test_power_failure_stops_session() {
        for fail in [
            FailPoint::PowerOnPreferred,
            FailPoint::PowerOnExplicit,
            FailPoint::PowerOff,
        ] {
            let (mut tv, ledger) = service_with(MockTv::failing(fail));
            tv.start().unwrap();

            let result = match fail {
                FailPoint::PowerOnPreferred => tv.power_on_preferred(),
                FailPoint::PowerOnExplicit => tv.power_on_explicit(ModeGroup::Cea, 16),
                _ => tv.power_off(),
            };

            assert!(result.is_err(), "expected failure at {:?}", fail);
            assert!(!tv.is_started(), "session should stop after {:?}", fail);
            assert_eq!(ledger.borrow().service_stops, 1);
            assert_eq!(ledger.borrow().disconnects, 1);
        }
    }

    #[test]
    fn test_property_failure_stops_session() {
        // A failed property write aborts the power sequence the same way a
        // failed power call does.
        let (mut tv, ledger) = service_with(MockTv::failing(FailPoint::SetProperty));
        tv.start().unwrap();

        let err = tv.power_on_preferred().unwrap_err();
        assert!(matches!(err, Error::SetProperty(_)));
        assert!(!tv.is_started());
        assert_eq!(ledger.borrow().power_on_preferred, 0);
        assert_eq!(ledger.borrow().service_stops, 1);
        assert_eq!(ledger.borrow().disconnects, 1);

        let (mut tv, ledger) = service_with(MockTv::failing(FailPoint::SetProperty));
        tv.start().unwrap();

        let err = tv.power_on_explicit(ModeGroup::Cea, 16).unwrap_err();
        assert!(matches!(err, Error::SetProperty(_)));
        assert!(!tv.is_started());
        assert!(ledger.borrow().power_on_explicit.is_empty());
        assert_eq!(ledger.borrow().service_stops, 1);
    }

    #[test]
    fn test_query_failure_keeps_session_running() {
        for fail in [FailPoint::Modes, FailPoint::DisplayState] {
            let (mut tv, ledger) = service_with(MockTv::failing(fail));
            tv.start().unwrap();

            let failed = match fail {
                FailPoint::Modes => tv.modes(ModeGroup::Cea).is_err(),
                _ => tv.status().is_err(),
            };

            assert!(failed);
            assert!(tv.is_started());
            assert_eq!(ledger.borrow().service_stops, 0);
        }
    }

    #[test]
    fn test_status_corrects_ntsc_frame_rate() {
        let (mut tv, ledger) = service_with(MockTv::new());
        ledger.borrow_mut().state = Some(HardwareState {
            frame_rate: 60,
            clock_type: PixelClockType::Ntsc,
            group: Some(ModeGroup::Cea),
            mode: 16,
            scan_mode: ScanMode::Progressive,
            aspect: AspectRatio::Ratio16x9,
            width: 1920,
            height: 1080,
        });
        tv.start().unwrap();

        let status = tv.status().unwrap();
        assert!((status.frame_rate - 59.94).abs() < 0.01);
    }

    #[test]
    fn test_status_keeps_pal_frame_rate() {
        let (mut tv, _ledger) = service_with(MockTv::new());
        tv.start().unwrap();

        let status = tv.status().unwrap();
        assert_eq!(status.frame_rate, 60.0);
        assert_eq!(status.group, Some(ModeGroup::Cea));
        assert_eq!(status.to_string(), "CEA mode 16: 1920x1080p @ 60.00Hz 16:9");
    }

    #[test]
    fn test_drop_stops_session() {
        let backend = MockTv::new();
        let ledger = backend.ledger();
        {
            let mut tv = TvService::with_backend(backend);
            tv.start().unwrap();
        }
        assert_eq!(ledger.borrow().service_stops, 1);
        assert_eq!(ledger.borrow().disconnects, 1);
    }
}
