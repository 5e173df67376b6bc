use wasm_bindgen::prelude::*;

use crate::utils::errors::SimulationError;
use crate::utils::set_panic_hook;

use super::{Config, Simulation as CoreSimulation};

fn to_js(error: SimulationError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// The web `Simulation` provides JS/WASM-compatible interfaces to the core
/// `Simulation` struct.  For additional insight on these methods, refer to
/// the associated core `Simulation` methods.  Errors are returned to
/// JavaScript as strings.
#[wasm_bindgen]
pub struct Simulation {
    simulation: CoreSimulation,
}

#[wasm_bindgen]
impl Simulation {
    /// A JS/WASM interface for `Simulation.post`, which uses a JSON
    /// representation of the configuration.
    pub fn post_json(config: &str) -> Result<Simulation, JsValue> {
        set_panic_hook();
        Self::post(Config::from_json(config))
    }

    /// A JS/WASM interface for `Simulation.post`, which uses a YAML
    /// representation of the configuration.
    pub fn post_yaml(config: &str) -> Result<Simulation, JsValue> {
        set_panic_hook();
        Self::post(Config::from_yaml(config))
    }

    /// An interface to `Simulation.step_until`.
    pub fn step_until(&mut self, until: f64) -> Result<usize, JsValue> {
        self.simulation.step_until(until).map_err(to_js)
    }

    /// A JS/WASM interface for `Simulation.run`, which converts the metrics
    /// to a JSON string.
    pub fn run_json(&mut self) -> Result<String, JsValue> {
        self.simulation.run().map_err(to_js)?;
        self.metrics_json()
    }

    /// An interface to `Simulation.get_global_time`.
    pub fn get_global_time(&self) -> f64 {
        self.simulation.get_global_time()
    }

    /// An interface to `Simulation.get_status`.
    pub fn get_status(&self, station_id: &str) -> Result<String, JsValue> {
        self.simulation.get_status(station_id).map_err(to_js)
    }

    /// A JS/WASM interface for `Simulation.metrics`, which converts the
    /// metrics to a JSON string.
    pub fn metrics_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.simulation.metrics())
            .map_err(|error| to_js(error.into()))
    }

    /// A JS/WASM interface for `Simulation.metrics`, which converts the
    /// metrics to a YAML string.
    pub fn metrics_yaml(&self) -> Result<String, JsValue> {
        serde_yaml::to_string(&self.simulation.metrics())
            .map_err(|error| to_js(error.into()))
    }

    /// A JS/WASM interface for `Simulation.get_records`, which converts the
    /// records to a JSON string.
    pub fn records_json(&self, station_id: &str) -> Result<String, JsValue> {
        let records = self.simulation.get_records(station_id).map_err(to_js)?;
        serde_json::to_string(records).map_err(|error| to_js(error.into()))
    }

    /// An interface to `Simulation.reset`.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.simulation.reset().map_err(to_js)
    }
}

impl Simulation {
    fn post(config: Result<Config, SimulationError>) -> Result<Simulation, JsValue> {
        let simulation = config
            .and_then(CoreSimulation::post)
            .map_err(to_js)?;
        Ok(Self { simulation })
    }

    /// The wrapped core simulation.
    pub fn simulation(&self) -> &CoreSimulation {
        &self.simulation
    }
}
