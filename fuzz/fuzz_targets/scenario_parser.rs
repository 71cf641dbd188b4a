#![no_main]

use closure_delay::config::EngineConfig;
use closure_delay::delay::calculate_delay;
use closure_delay::measurement::Scenario;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, and neither may evaluating a scenario it accepts
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(scenario) = Scenario::from_toml_str(input) {
            let _ = calculate_delay(
                &scenario.measurement,
                &scenario.closure,
                &EngineConfig::default(),
            );
        }
    }
});
