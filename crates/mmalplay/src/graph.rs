// SPDX-License-Identifier: MIT

//! Hardware playback pipeline: container reader → image decoder → video
//! renderer.
//!
//! The topology is fixed, so the pipeline is a plain owner struct with one
//! slot per stage and per connection rather than a general graph. Once the
//! graph is enabled, playback runs entirely inside the hardware pipeline;
//! the only feedback is a control callback that returns buffers to their
//! pool, and that stays confined to the backend.
//!
//! # Example
//!
//! ```no_run
//! use mmalplay::graph::MmalGraph;
//!
//! let mut graph = MmalGraph::new();
//! graph.set_display(mmalplay::LCD);
//! graph.open("/home/pi/clip.mp4")?;
//! assert!(graph.is_open());
//! // drop() closes the pipeline if close() is never called
//! # Ok::<(), mmalplay::Error>(())
//! ```

use crate::{videocore::VideoCore, Error};
use std::fmt;

/// One functional unit of the playback pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageKind {
    /// Media container reader (demuxer source).
    Reader,
    /// Hardware image/video decoder.
    Decoder,
    /// Video renderer driving a display surface.
    Renderer,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StageKind::Reader => f.write_str("reader"),
            StageKind::Decoder => f.write_str("decoder"),
            StageKind::Renderer => f.write_str("renderer"),
        }
    }
}

/// One of the two data links in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Link {
    ReaderToDecoder,
    DecoderToRenderer,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Link::ReaderToDecoder => f.write_str("reader to decoder"),
            Link::DecoderToRenderer => f.write_str("decoder to renderer"),
        }
    }
}

/// Pipeline lifecycle state.
///
/// Failures during `Opening` always land in `Closed` via full teardown;
/// both `Empty` and `Closed` accept a new `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Empty,
    Opening,
    Enabled,
    Closed,
}

/// Hardware operations the pipeline state machine is written against.
///
/// The real implementation is [`VideoCore`]; tests substitute a counting
/// double. Handle types are associated so the double can use plain values
/// where the hardware uses raw pointers.
pub trait GraphBackend {
    type Graph;
    type Stage;
    type Link;

    /// One-time process-wide host init. Idempotent.
    fn bootstrap(&mut self) -> Result<(), Error>;

    fn graph_create(&mut self) -> Result<Self::Graph, Error>;

    fn stage_create(
        &mut self,
        graph: &mut Self::Graph,
        kind: StageKind,
    ) -> Result<Self::Stage, Error>;

    fn stage_release(&mut self, stage: Self::Stage);

    /// Apply the display-region parameter (layer + display number) to the
    /// renderer input.
    fn set_display_region(
        &mut self,
        renderer: &mut Self::Stage,
        display_num: u32,
    ) -> Result<(), Error>;

    /// Point the reader at the playback URI.
    fn set_uri(&mut self, reader: &mut Self::Stage, uri: &str) -> Result<(), Error>;

    /// Connect `from`'s output to `to`'s input.
    fn link_create(
        &mut self,
        graph: &mut Self::Graph,
        link: Link,
        from: &mut Self::Stage,
        to: &mut Self::Stage,
    ) -> Result<Self::Link, Error>;

    fn link_release(&mut self, link: Self::Link);

    /// Enable the graph, registering the buffer-release control callback.
    fn graph_enable(&mut self, graph: &mut Self::Graph) -> Result<(), Error>;

    /// Disable the graph. Blocks until the hardware guarantees no further
    /// control callback invocations for this graph.
    fn graph_disable(&mut self, graph: &mut Self::Graph);

    fn graph_destroy(&mut self, graph: Self::Graph);
}

/// The playback pipeline owner.
///
/// Owns zero or one active pipeline; every stage and connection handle
/// lives in a slot here and never outlives the pipeline. Intended for
/// exclusive use by one owner; concurrent calls from multiple threads must
/// be serialized by the caller.
pub struct MmalGraph<B: GraphBackend = VideoCore> {
    backend: B,
    display_num: u32,
    state: PipelineState,
    uri: Option<String>,
    graph: Option<B::Graph>,
    reader: Option<B::Stage>,
    decoder: Option<B::Stage>,
    renderer: Option<B::Stage>,
    link_read_dec: Option<B::Link>,
    link_dec_rend: Option<B::Link>,
}

impl MmalGraph<VideoCore> {
    /// Create a pipeline manager over the real VideoCore backend,
    /// targeting the HDMI display.
    pub fn new() -> Self {
        Self::with_backend(VideoCore::new())
    }
}

impl Default for MmalGraph<VideoCore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: GraphBackend> MmalGraph<B> {
    /// Create a pipeline manager over an explicit backend.
    pub fn with_backend(backend: B) -> Self {
        MmalGraph {
            backend,
            display_num: crate::HDMI,
            state: PipelineState::Empty,
            uri: None,
            graph: None,
            reader: None,
            decoder: None,
            renderer: None,
            link_read_dec: None,
            link_dec_rend: None,
        }
    }

    /// Set the target display number (see [`crate::LCD`] / [`crate::HDMI`]).
    ///
    /// Only effective before `open`; once a pipeline is enabled the setting
    /// is ignored until the next open.
    pub fn set_display(&mut self, display_num: u32) {
        match self.state {
            PipelineState::Opening | PipelineState::Enabled => {
                log::warn!(
                    "ignoring display change to {} while pipeline is active",
                    display_num
                );
            }
            PipelineState::Empty | PipelineState::Closed => self.display_num = display_num,
        }
    }

    /// Target display number the next open will render to.
    pub fn display(&self) -> u32 {
        self.display_num
    }

    /// URI of the currently open pipeline, if any.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Whether a pipeline is currently enabled.
    pub fn is_open(&self) -> bool {
        self.state == PipelineState::Enabled
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Open `uri` and start playback.
    ///
    /// Builds the full pipeline: bootstraps the host, creates the graph
    /// container and the three stages, applies the display region to the
    /// renderer (failure is logged, not fatal), points the reader at the
    /// URI, connects the two links, and enables the graph. Playback then
    /// progresses asynchronously inside the hardware pipeline with no
    /// further driving calls.
    ///
    /// Any fatal failure tears down everything built so far before the
    /// error returns; no stage, link, or graph handle leaks. Opening while
    /// a pipeline is enabled closes the old pipeline first.
    pub fn open(&mut self, uri: &str) -> Result<(), Error> {
        if self.state == PipelineState::Enabled {
            log::debug!("pipeline already enabled, closing before reopen");
            self.close();
        }

        // Argument check happens before any hardware call.
        if uri.is_empty() {
            return Err(Error::InvalidUri(uri.to_string()));
        }

        self.state = PipelineState::Opening;
        match self.build(uri) {
            Ok(()) => {
                self.state = PipelineState::Enabled;
                self.uri = Some(uri.to_string());
                log::debug!("pipeline enabled for {} on display {}", uri, self.display_num);
                Ok(())
            }
            Err(err) => {
                self.close();
                Err(err)
            }
        }
    }

    fn build(&mut self, uri: &str) -> Result<(), Error> {
        self.backend.bootstrap()?;

        // The graph container is committed to its slot before any stage is
        // created so the error path's close() always sees it.
        let mut graph = self.backend.graph_create()?;
        let result = self.build_stages(&mut graph, uri);
        self.graph = Some(graph);
        result
    }

    fn build_stages(&mut self, graph: &mut B::Graph, uri: &str) -> Result<(), Error> {
        let MmalGraph {
            backend,
            display_num,
            reader,
            decoder,
            renderer,
            link_read_dec,
            link_dec_rend,
            ..
        } = self;

        // Each stage lands in its slot as soon as it exists, keeping
        // partial-failure teardown complete.
        let rd = reader.insert(backend.stage_create(graph, StageKind::Reader)?);
        let dec = decoder.insert(backend.stage_create(graph, StageKind::Decoder)?);
        let ren = renderer.insert(backend.stage_create(graph, StageKind::Renderer)?);

        // Cosmetic setting: a failure here is logged but does not abort the
        // open, unlike the fatal uri set below.
        if let Err(err) = backend.set_display_region(ren, *display_num) {
            log::warn!("failed to set display region: {}", err);
        }

        backend.set_uri(rd, uri)?;

        *link_read_dec = Some(backend.link_create(graph, Link::ReaderToDecoder, rd, dec)?);
        *link_dec_rend = Some(backend.link_create(graph, Link::DecoderToRenderer, dec, ren)?);

        backend.graph_enable(graph)
    }

    /// Stop playback and release every held handle.
    ///
    /// Disables the graph first (blocking out the buffer callback), then
    /// releases whichever links and stages exist, then destroys the graph
    /// container. Tolerant of partially built pipelines and idempotent;
    /// closing a never-opened pipeline is a no-op.
    pub fn close(&mut self) {
        if let Some(graph) = self.graph.as_mut() {
            self.backend.graph_disable(graph);
        }
        if let Some(link) = self.link_dec_rend.take() {
            self.backend.link_release(link);
        }
        if let Some(link) = self.link_read_dec.take() {
            self.backend.link_release(link);
        }
        if let Some(stage) = self.reader.take() {
            self.backend.stage_release(stage);
        }
        if let Some(stage) = self.decoder.take() {
            self.backend.stage_release(stage);
        }
        if let Some(stage) = self.renderer.take() {
            self.backend.stage_release(stage);
        }
        if let Some(graph) = self.graph.take() {
            self.backend.graph_destroy(graph);
        }
        self.uri = None;
        if self.state != PipelineState::Empty {
            self.state = PipelineState::Closed;
        }
    }
}

impl<B: GraphBackend> Drop for MmalGraph<B> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum FailPoint {
        GraphCreate,
        Stage(StageKind),
        DisplayRegion,
        SetUri,
        Link(Link),
        Enable,
    }

    #[derive(Debug, Default)]
    struct Ledger {
        fail: Option<FailPoint>,
        bootstraps: u32,
        graphs_created: u32,
        graphs_destroyed: u32,
        stages_created: Vec<StageKind>,
        stages_released: Vec<StageKind>,
        links_created: Vec<Link>,
        links_released: Vec<Link>,
        enables: u32,
        disables: u32,
        uri: Option<String>,
        display_region: Option<u32>,
    }

    impl Ledger {
        /// True when every created handle has been handed back.
        fn balanced(&self) -> bool {
            let mut created = self.stages_created.clone();
            let mut released = self.stages_released.clone();
            created.sort();
            released.sort();
            let mut lc = self.links_created.clone();
            let mut lr = self.links_released.clone();
            lc.sort();
            lr.sort();
            self.graphs_created == self.graphs_destroyed && created == released && lc == lr
        }
    }

    #[derive(Clone)]
    struct MockBackend {
        ledger: Rc<RefCell<Ledger>>,
    }

    impl MockBackend {
        fn new() -> Self {
            MockBackend {
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

    impl GraphBackend for MockBackend {
        type Graph = u32;
        type Stage = StageKind;
        type Link = Link;

        fn bootstrap(&mut self) -> Result<(), Error> {
            self.ledger.borrow_mut().bootstraps += 1;
            Ok(())
        }

        fn graph_create(&mut self) -> Result<u32, Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::GraphCreate) {
                return Err(Error::GraphCreate(Status(1)));
            }
            ledger.graphs_created += 1;
            Ok(ledger.graphs_created)
        }

        fn stage_create(&mut self, _graph: &mut u32, kind: StageKind) -> Result<StageKind, Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::Stage(kind)) {
                return Err(Error::StageCreate(kind, Status(2)));
            }
            ledger.stages_created.push(kind);
            Ok(kind)
        }

        fn stage_release(&mut self, stage: StageKind) {
            self.ledger.borrow_mut().stages_released.push(stage);
        }

        fn set_display_region(
            &mut self,
            _renderer: &mut StageKind,
            display_num: u32,
        ) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::DisplayRegion) {
                return Err(Error::DisplayRegion(Status(3)));
            }
            ledger.display_region = Some(display_num);
            Ok(())
        }

        fn set_uri(&mut self, _reader: &mut StageKind, uri: &str) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::SetUri) {
                return Err(Error::SetUri(Status(3)));
            }
            ledger.uri = Some(uri.to_string());
            Ok(())
        }

        fn link_create(
            &mut self,
            _graph: &mut u32,
            link: Link,
            _from: &mut StageKind,
            _to: &mut StageKind,
        ) -> Result<Link, Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::Link(link)) {
                return Err(Error::Connect(link, Status(4)));
            }
            ledger.links_created.push(link);
            Ok(link)
        }

        fn link_release(&mut self, link: Link) {
            self.ledger.borrow_mut().links_released.push(link);
        }

        fn graph_enable(&mut self, _graph: &mut u32) -> Result<(), Error> {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.fail == Some(FailPoint::Enable) {
                return Err(Error::GraphEnable(Status(5)));
            }
            ledger.enables += 1;
            Ok(())
        }

        fn graph_disable(&mut self, _graph: &mut u32) {
            self.ledger.borrow_mut().disables += 1;
        }

        fn graph_destroy(&mut self, _graph: u32) {
            self.ledger.borrow_mut().graphs_destroyed += 1;
        }
    }

    fn graph_with(backend: MockBackend) -> (MmalGraph<MockBackend>, Rc<RefCell<Ledger>>) {
        let ledger = backend.ledger();
        (MmalGraph::with_backend(backend), ledger)
    }

    #[test]
    fn test_open_reaches_enabled() {
        let (mut graph, ledger) = graph_with(MockBackend::new());

        graph.open("file:///clip.mp4").unwrap();

        assert!(graph.is_open());
        assert_eq!(graph.state(), PipelineState::Enabled);
        assert_eq!(graph.uri(), Some("file:///clip.mp4"));

        let ledger = ledger.borrow();
        assert_eq!(ledger.bootstraps, 1);
        assert_eq!(
            ledger.stages_created,
            vec![StageKind::Reader, StageKind::Decoder, StageKind::Renderer]
        );
        assert_eq!(
            ledger.links_created,
            vec![Link::ReaderToDecoder, Link::DecoderToRenderer]
        );
        assert_eq!(ledger.enables, 1);
        assert_eq!(ledger.uri.as_deref(), Some("file:///clip.mp4"));
        assert_eq!(ledger.display_region, Some(crate::HDMI));
    }

    #[test]
    fn test_close_releases_everything_and_is_idempotent() {
        let (mut graph, ledger) = graph_with(MockBackend::new());
        graph.open("file:///clip.mp4").unwrap();

        graph.close();
        assert_eq!(graph.state(), PipelineState::Closed);
        assert!(!graph.is_open());
        assert_eq!(graph.uri(), None);
        assert!(ledger.borrow().balanced());
        assert_eq!(ledger.borrow().disables, 1);

        // Closing again changes nothing observable.
        graph.close();
        graph.close();
        assert_eq!(graph.state(), PipelineState::Closed);
        assert!(ledger.borrow().balanced());
        assert_eq!(ledger.borrow().disables, 1);
    }

    #[test]
    fn test_close_before_open_is_noop() {
        let (mut graph, ledger) = graph_with(MockBackend::new());
        graph.close();
        assert_eq!(graph.state(), PipelineState::Empty);
        assert_eq!(ledger.borrow().disables, 0);
        assert_eq!(ledger.borrow().graphs_destroyed, 0);
    }

    #[test]
    fn test_open_failure_releases_everything_built() {
        let fail_points = [
            FailPoint::GraphCreate,
            FailPoint::Stage(StageKind::Reader),
            FailPoint::Stage(StageKind::Decoder),
            FailPoint::Stage(StageKind::Renderer),
            FailPoint::SetUri,
            FailPoint::Link(Link::ReaderToDecoder),
            FailPoint::Link(Link::DecoderToRenderer),
            FailPoint::Enable,
        ];

        for fail in fail_points {
            let (mut graph, ledger) = graph_with(MockBackend::failing(fail));

            let result = graph.open("file:///clip.mp4");

            assert!(result.is_err(), "open should fail at {:?}", fail);
            assert_eq!(graph.state(), PipelineState::Closed);
            assert!(!graph.is_open());
            assert_eq!(graph.uri(), None);
            assert!(
                ledger.borrow().balanced(),
                "handles leaked after failure at {:?}: {:?}",
                fail,
                ledger.borrow()
            );
        }
    }

    #[test]
    fn test_second_link_failure_scenario() {
        let backend = MockBackend::failing(FailPoint::Link(Link::DecoderToRenderer));
        let (mut graph, ledger) = graph_with(backend);

        let err = graph.open("file:///clip.mp4").unwrap_err();
        assert!(matches!(err, Error::Connect(Link::DecoderToRenderer, _)));

        let ledger = ledger.borrow();
        assert!(ledger.stages_released.contains(&StageKind::Reader));
        assert!(ledger.stages_released.contains(&StageKind::Decoder));
        assert!(ledger.links_released.contains(&Link::ReaderToDecoder));
        assert!(ledger.balanced());
    }

    #[test]
    fn test_display_region_failure_is_nonfatal() {
        let (mut graph, ledger) = graph_with(MockBackend::failing(FailPoint::DisplayRegion));

        graph.open("file:///clip.mp4").unwrap();

        assert!(graph.is_open());
        assert_eq!(ledger.borrow().display_region, None);
        assert_eq!(ledger.borrow().enables, 1);
    }

    #[test]
    fn test_empty_uri_rejected_before_hardware() {
        let (mut graph, ledger) = graph_with(MockBackend::new());

        let err = graph.open("").unwrap_err();
        assert!(matches!(err, Error::InvalidUri(_)));
        assert_eq!(ledger.borrow().bootstraps, 0);
        assert_eq!(ledger.borrow().graphs_created, 0);
    }

    #[test]
    fn test_set_display_before_open() {
        let (mut graph, ledger) = graph_with(MockBackend::new());
        assert_eq!(graph.display(), crate::HDMI);

        graph.set_display(crate::LCD);
        assert_eq!(graph.display(), crate::LCD);

        graph.open("file:///clip.mp4").unwrap();
        assert_eq!(ledger.borrow().display_region, Some(crate::LCD));
    }

    #[test]
    fn test_set_display_ignored_while_enabled() {
        let (mut graph, _ledger) = graph_with(MockBackend::new());
        graph.open("file:///clip.mp4").unwrap();

        graph.set_display(crate::LCD);
        assert_eq!(graph.display(), crate::HDMI);

        // Effective again after close.
        graph.close();
        graph.set_display(crate::LCD);
        assert_eq!(graph.display(), crate::LCD);
    }

    #[test]
    fn test_reopen_closes_previous_pipeline() {
        let (mut graph, ledger) = graph_with(MockBackend::new());
        graph.open("file:///first.mp4").unwrap();
        graph.open("file:///second.mp4").unwrap();

        assert!(graph.is_open());
        assert_eq!(graph.uri(), Some("file:///second.mp4"));

        let ledger = ledger.borrow();
        assert_eq!(ledger.enables, 2);
        assert_eq!(ledger.disables, 1);
        assert_eq!(ledger.graphs_created, 2);
        assert_eq!(ledger.graphs_destroyed, 1);
    }

    #[test]
    fn test_drop_closes_pipeline() {
        let backend = MockBackend::new();
        let ledger = backend.ledger();
        {
            let mut graph = MmalGraph::with_backend(backend);
            graph.open("file:///clip.mp4").unwrap();
        }
        assert!(ledger.borrow().balanced());
        assert_eq!(ledger.borrow().disables, 1);
    }

    // Hardware-dependent tests
    #[ignore = "test requires Raspberry Pi VideoCore hardware"]
    #[test]
    fn test_open_media_on_hardware() {
        let media = std::env::var("MMALPLAY_TEST_MEDIA")
            .unwrap_or_else(|_| "/home/pi/test.jpg".to_string());
        let mut graph = MmalGraph::new();
        graph.open(&media).unwrap();
        assert!(graph.is_open());
        std::thread::sleep(std::time::Duration::from_secs(1));
        graph.close();
    }
}
