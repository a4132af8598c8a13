use flightmap::prelude::*;
use futures::FutureExt;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Engine that "tracks" the airports it was given and prints what it sees
struct ConsoleEngine {
    updates: Rc<Cell<usize>>,
}

impl FlightEngine for ConsoleEngine {
    fn prepare(&mut self, locations: &[Location]) -> PrepareFuture {
        let coords: Vec<LatLng> = locations.iter().map(|l| l.coord).collect();
        async move {
            // Simulates the engine fetching flight data
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, ViewportError>(serde_json::to_string(&coords)?)
        }
        .boxed_local()
    }

    fn start(&mut self) {
        println!("✈️  Engine started");
    }

    fn update(&mut self, bounds: &BoundsLiteral) {
        self.updates.set(self.updates.get() + 1);
        println!(
            "   📦 Visible: N {:.2} E {:.2} S {:.2} W {:.2}",
            bounds.north, bounds.east, bounds.south, bounds.west
        );
    }
}

struct ConsoleModule {
    updates: Rc<Cell<usize>>,
}

impl CenterAlgorithm for ConsoleModule {
    fn find_center(&self, coords: &[LatLng]) -> LatLng {
        GeographicMidpoint.find_center(coords)
    }
}

impl EngineModule for ConsoleModule {
    type Engine = ConsoleEngine;

    fn construct(&self, canvas: &Surface) -> flightmap::Result<ConsoleEngine> {
        println!("🛠️  Engine constructed on #{}", canvas.id);
        Ok(ConsoleEngine {
            updates: self.updates.clone(),
        })
    }
}

/// Runs the whole viewer against the in-memory provider
fn main() -> anyhow::Result<()> {
    flightmap::init_logging();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        println!("🗺️ Flightmap Headless Example");
        println!("=============================");

        let config = ViewerConfig::from_env()
            .unwrap_or_else(|_| ViewerConfig::new("demo-key"))
            .with_map_options(
                MapOptionsPatch::new().option("gestureHandling", serde_json::json!("greedy")),
            );
        let updates = Rc::new(Cell::new(0));
        let module = ConsoleModule {
            updates: updates.clone(),
        };
        let document = HeadlessDocument::with_elements([
            config.map_element_id.clone(),
            config.canvas_element_id.clone(),
        ]);

        let airports = target_airports();
        for airport in &airports {
            println!(
                "   📍 {} ({}) {:.4}, {:.4}",
                airport.icao, airport.iata, airport.coord.lat, airport.coord.lng
            );
        }

        let mut orchestrator =
            ViewportOrchestrator::new(config, HeadlessLoader::new(), module, airports);
        orchestrator.start(&document).await?;
        println!("✅ State: {}", orchestrator.state());

        let handle = orchestrator
            .map()
            .map(HeadlessMap::handle)
            .ok_or_else(|| anyhow::anyhow!("map missing after start"))?;

        let user = async {
            tokio::time::sleep(Duration::from_millis(400)).await;

            println!("\n🚀 Simulating user interaction:");
            for (name, center) in [
                ("Boston", LatLng::new(42.3656, -71.0096)),
                ("Paris", LatLng::new(49.0097, 2.5479)),
            ] {
                println!("   Pan to {name}");
                handle.pan_to(center);
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            handle.zoom_to(5.0);
            tokio::time::sleep(Duration::from_millis(50)).await;
        };

        futures::pin_mut!(user);
        let run = orchestrator.run();
        futures::pin_mut!(run);
        futures::future::select(run, user).await;

        println!("\n✅ Engine received {} viewport updates", updates.get());
        Ok::<(), anyhow::Error>(())
    })
}
