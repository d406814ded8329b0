#![no_main]
use libfuzzer_sys::fuzz_target;
use surprise_core::{surprise_trace, SurpriseConfig, SurpriseParams, TermStrategy};

fn take_u64(data: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 4];
    for (i, b) in data.iter().skip(at * 4).take(4).enumerate() {
        buf[i] = *b;
    }
    u64::from(u32::from_le_bytes(buf))
}

fuzz_target!(|data: &[u8]| {
    // Four counts, each capped by the one it must not exceed.
    let total = take_u64(data, 0) % 5_000_000;
    let intra = take_u64(data, 1) % (total + 1);
    let links = take_u64(data, 2) % (total + 1);
    let observed = take_u64(data, 3) % (intra.min(links) + 1);
    let strategy = if data.len() % 2 == 0 {
        TermStrategy::Direct
    } else {
        TermStrategy::Incremental
    };

    let params = SurpriseParams::new(total, intra, links, observed)
        .expect("counts were reduced into range");
    let config = SurpriseConfig {
        strategy,
        ..SurpriseConfig::default()
    };
    let (report, steps) = surprise_trace(&params, &config).expect("default tolerance is valid");
    assert!(report.score.is_finite() && report.score >= 0.0);
    assert_eq!(steps.len() as u64, report.terms_folded);
    assert!(steps
        .windows(2)
        .all(|w| w[1].running_total.log10() >= w[0].running_total.log10()));
});
