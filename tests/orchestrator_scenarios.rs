use flightmap::prelude::*;
use futures::channel::oneshot;
use futures::{FutureExt, StreamExt};
use std::cell::RefCell;
use std::rc::Rc;

/// Integration scenarios for the startup protocol and steady-state forwarding.
/// The engine is scripted: `prepare` stays pending until the test replies.
#[cfg(test)]
mod orchestrator_scenarios {
    use super::*;

    #[derive(Default)]
    struct EngineLog {
        constructed: usize,
        prepared: Vec<Vec<String>>,
        started: usize,
        updates: Vec<BoundsLiteral>,
        center_calls: usize,
    }

    struct ScriptedModule {
        log: Rc<RefCell<EngineLog>>,
        reply: RefCell<Option<oneshot::Receiver<String>>>,
    }

    impl ScriptedModule {
        fn new() -> (Self, Rc<RefCell<EngineLog>>, oneshot::Sender<String>) {
            let log = Rc::new(RefCell::new(EngineLog::default()));
            let (tx, rx) = oneshot::channel();
            let module = Self {
                log: log.clone(),
                reply: RefCell::new(Some(rx)),
            };
            (module, log, tx)
        }
    }

    impl CenterAlgorithm for ScriptedModule {
        fn find_center(&self, coords: &[LatLng]) -> LatLng {
            self.log.borrow_mut().center_calls += 1;
            GeographicMidpoint.find_center(coords)
        }
    }

    impl EngineModule for ScriptedModule {
        type Engine = ScriptedEngine;

        fn construct(&self, _canvas: &Surface) -> flightmap::Result<ScriptedEngine> {
            self.log.borrow_mut().constructed += 1;
            Ok(ScriptedEngine {
                log: self.log.clone(),
                reply: self.reply.borrow_mut().take(),
            })
        }
    }

    struct ScriptedEngine {
        log: Rc<RefCell<EngineLog>>,
        reply: Option<oneshot::Receiver<String>>,
    }

    impl FlightEngine for ScriptedEngine {
        fn prepare(&mut self, locations: &[Location]) -> PrepareFuture {
            self.log
                .borrow_mut()
                .prepared
                .push(locations.iter().map(|l| l.icao.clone()).collect());
            let reply = self.reply.take();
            async move {
                match reply {
                    Some(rx) => rx
                        .await
                        .map_err(|_| ViewportError::EngineInit("prepare abandoned".into())),
                    None => Err(ViewportError::EngineInit("prepare called twice".into())),
                }
            }
            .boxed_local()
        }

        fn start(&mut self) {
            self.log.borrow_mut().started += 1;
        }

        fn update(&mut self, bounds: &BoundsLiteral) {
            self.log.borrow_mut().updates.push(*bounds);
        }
    }

    const JFK: LatLng = LatLng {
        lat: 40.64,
        lng: -73.78,
    };
    const LHR: LatLng = LatLng {
        lat: 51.47,
        lng: -0.45,
    };

    fn airports() -> Vec<Location> {
        vec![
            Location::new("KJFK", "John F. Kennedy International Airport", JFK).with_iata("JFK"),
            Location::new("EGLL", "London Heathrow Airport", LHR).with_iata("LHR"),
        ]
    }

    /// The engine normalizes both airports and adds Boston, which it found
    /// flights to.
    fn resolved() -> Vec<LatLng> {
        vec![
            LatLng::new(40.6413, -73.7781),
            LatLng::new(51.47, -0.4543),
            LatLng::new(42.3656, -71.0096),
        ]
    }

    fn resolved_reply() -> String {
        serde_json::to_string(&resolved()).unwrap()
    }

    fn document() -> HeadlessDocument {
        HeadlessDocument::with_elements(["googlemap", "flight"])
    }

    /// Handles every queued event, collecting any prepare replies started.
    fn pump(
        orchestrator: &mut ViewportOrchestrator<HeadlessLoader, ScriptedModule>,
        events: &mut EventStream,
    ) -> Vec<PrepareFuture> {
        let mut pending = Vec::new();
        while let Some(Some(event)) = events.next().now_or_never() {
            if let Some(prepare) = orchestrator.handle_event(event).unwrap() {
                pending.push(prepare);
            }
        }
        pending
    }

    async fn wait_until(condition: impl Fn() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("condition never met");
    }

    #[tokio::test]
    async fn test_startup_fits_locations_and_centers_on_delegated_center() {
        let (module, log, _reply) = ScriptedModule::new();
        let loader = HeadlessLoader::new();
        let record = loader.record();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), loader, module, airports());

        orchestrator.start(&document()).await.unwrap();

        assert_eq!(orchestrator.state(), ViewportState::MapReady);
        let record = record.borrow();
        assert_eq!(record.loads, 1);
        assert_eq!(
            record.subscriptions,
            vec![MapEvent::ZoomChanged, MapEvent::BoundsChanged]
        );

        let (fitted, padding) = record.fits[0];
        assert_eq!(fitted, LatLngBounds::from_coords(40.64, -73.78, 51.47, -0.45));
        assert_eq!(padding, 0);

        let expected_center = GeographicMidpoint.find_center(&[JFK, LHR]);
        assert_eq!(record.centers, vec![expected_center]);
        assert_ne!(record.centers[0], fitted.midpoint());
        assert_eq!(record.maps_created[0].1.center, Some(expected_center));
        assert!(log.borrow().center_calls >= 1);
        assert_eq!(log.borrow().constructed, 0);
    }

    #[tokio::test]
    async fn test_missing_map_surface_fails_before_loading() {
        let (module, log, _reply) = ScriptedModule::new();
        let loader = HeadlessLoader::new();
        let record = loader.record();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), loader, module, airports());

        let result = orchestrator
            .start(&HeadlessDocument::with_elements(["flight"]))
            .await;

        assert!(matches!(result, Err(ViewportError::MissingElement(_))));
        assert_eq!(record.borrow().loads, 0);
        assert_eq!(orchestrator.state(), ViewportState::Uninitialized);
        assert_eq!(log.borrow().constructed, 0);
    }

    #[tokio::test]
    async fn test_repeated_zoom_before_prepare_resolves_starts_engine_once() {
        let (module, log, _reply) = ScriptedModule::new();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), HeadlessLoader::new(), module, airports());
        let mut events = orchestrator.take_events().unwrap();
        orchestrator.start(&document()).await.unwrap();

        let first = pump(&mut orchestrator, &mut events);
        assert_eq!(first.len(), 1);
        assert_eq!(orchestrator.state(), ViewportState::EngineStarting);

        assert!(orchestrator
            .handle_event(MapEvent::ZoomChanged)
            .unwrap()
            .is_none());
        assert!(orchestrator
            .handle_event(MapEvent::ZoomChanged)
            .unwrap()
            .is_none());

        let log = log.borrow();
        assert_eq!(log.constructed, 1);
        assert_eq!(log.prepared, vec![vec!["KJFK".to_string(), "EGLL".to_string()]]);
        assert_eq!(log.started, 0);
    }

    #[tokio::test]
    async fn test_bounds_changes_forwarded_only_once_active() {
        let (module, log, reply) = ScriptedModule::new();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), HeadlessLoader::new(), module, airports());
        let mut events = orchestrator.take_events().unwrap();
        orchestrator.start(&document()).await.unwrap();
        let handle = orchestrator.map().unwrap().handle();

        let mut pending = pump(&mut orchestrator, &mut events);
        handle.pan_to(LatLng::new(45.0, -30.0));
        pump(&mut orchestrator, &mut events);
        assert!(log.borrow().updates.is_empty());

        reply.send(resolved_reply()).unwrap();
        let response = pending.remove(0).await;
        orchestrator.complete_prepare(response).unwrap();
        assert_eq!(orchestrator.state(), ViewportState::EngineActive);
        assert_eq!(log.borrow().started, 1);

        // The re-fit itself moves the viewport
        pump(&mut orchestrator, &mut events);
        assert!(!log.borrow().updates.is_empty());

        handle.pan_to(LatLng::new(47.0, -35.0));
        handle.pan_to(LatLng::new(48.0, -36.0));
        let before = log.borrow().updates.len();
        pump(&mut orchestrator, &mut events);

        let log = log.borrow();
        assert_eq!(log.updates.len(), before + 2);
        assert_eq!(log.updates.last(), Some(&handle.bounds().to_literal()));
    }

    #[tokio::test]
    async fn test_resolved_coordinates_drive_refit() {
        let (module, log, reply) = ScriptedModule::new();
        let loader = HeadlessLoader::new();
        let record = loader.record();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), loader, module, airports());
        let mut events = orchestrator.take_events().unwrap();
        orchestrator.start(&document()).await.unwrap();

        let mut pending = pump(&mut orchestrator, &mut events);
        reply.send(resolved_reply()).unwrap();
        let response = pending.remove(0).await;
        orchestrator.complete_prepare(response).unwrap();

        assert_eq!(orchestrator.resolved_coords(), Some(resolved().as_slice()));

        let record = record.borrow();
        assert_eq!(record.fits.len(), 2);
        assert_eq!(record.fits[1].0, compute_bounds(&resolved()).unwrap());
        assert_ne!(record.fits[1].0, record.fits[0].0);
        assert_eq!(record.centers[1], GeographicMidpoint.find_center(&resolved()));
        assert_ne!(record.centers[1], record.centers[0]);
        assert_eq!(log.borrow().started, 1);
    }

    #[tokio::test]
    async fn test_zoom_after_activation_is_ignored() {
        let (module, log, reply) = ScriptedModule::new();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), HeadlessLoader::new(), module, airports());
        let mut events = orchestrator.take_events().unwrap();
        orchestrator.start(&document()).await.unwrap();
        let handle = orchestrator.map().unwrap().handle();

        let mut pending = pump(&mut orchestrator, &mut events);
        reply.send(resolved_reply()).unwrap();
        let response = pending.remove(0).await;
        orchestrator.complete_prepare(response).unwrap();

        handle.zoom_to(6.0);
        handle.fire(MapEvent::ZoomChanged);
        assert!(pump(&mut orchestrator, &mut events).is_empty());

        let log = log.borrow();
        assert_eq!(log.constructed, 1);
        assert_eq!(log.prepared.len(), 1);
        assert_eq!(log.started, 1);
        assert_eq!(orchestrator.state(), ViewportState::EngineActive);
    }

    #[tokio::test]
    async fn test_run_loop_keeps_handling_events_while_preparing() {
        let (module, log, reply) = ScriptedModule::new();
        let mut orchestrator =
            ViewportOrchestrator::new(ViewerConfig::new("key"), HeadlessLoader::new(), module, airports());
        orchestrator.start(&document()).await.unwrap();
        let handle = orchestrator.map().unwrap().handle();

        let run = orchestrator.run();
        let driver = async {
            wait_until(|| log.borrow().constructed == 1).await;

            // Viewport moves while prepare is pending are dropped
            handle.pan_to(LatLng::new(45.0, -30.0));
            handle.zoom_to(4.0);
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
            assert!(log.borrow().updates.is_empty());
            assert_eq!(log.borrow().constructed, 1);

            reply.send(resolved_reply()).unwrap();
            wait_until(|| log.borrow().started == 1).await;

            handle.pan_to(LatLng::new(47.0, -35.0));
            let expected = handle.bounds().to_literal();
            wait_until(|| log.borrow().updates.last() == Some(&expected)).await;
        };

        futures::pin_mut!(run);
        futures::pin_mut!(driver);
        match futures::future::select(run, driver).await {
            futures::future::Either::Right(_) => {}
            futures::future::Either::Left(_) => panic!("event loop ended while the map is alive"),
        }

        assert_eq!(log.borrow().prepared.len(), 1);
    }

    #[tokio::test]
    async fn test_launch_with_default_airports_reaches_map_ready_events() {
        let (module, log, _reply) = ScriptedModule::new();
        let loader = HeadlessLoader::new();
        let record = loader.record();
        let document = document();

        let launched = launch(ViewerConfig::new("key"), loader, module, &document, target_airports());
        futures::pin_mut!(launched);
        let driver = wait_until(|| log.borrow().constructed == 1);
        futures::pin_mut!(driver);
        let _ = futures::future::select(launched, driver).await;

        let record = record.borrow();
        assert_eq!(record.loads, 1);
        assert_eq!(record.fits.len(), 1);
        assert_eq!(log.borrow().prepared[0].len(), target_airports().len());
    }
}
