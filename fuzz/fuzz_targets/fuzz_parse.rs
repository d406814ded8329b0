#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Split the input so one buffer drives both readers.
        let (edges, assignments) = s.split_once("\n%%\n").unwrap_or((s, s));
        if let Ok(network) = surprise_net::parse_network(edges, "fuzz.pairs") {
            if let Ok(partition) = surprise_net::parse_partition(assignments, "fuzz.part", &network) {
                // Counting must never panic and must always yield valid parameters.
                let params = surprise_net::derive_parameters(&network, &partition)
                    .expect("derived parameters are always in range");
                let _ = surprise_core::compute_surprise(&params);
            }
        }
    }
});
