#![no_main]

use jobdiff_extract::extract_steps;
use jobdiff_types::JobBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    match extract_steps(&text) {
        Ok(JobBody::Flow(dsl)) => {
            assert!(text.contains("<dsl>"));
            assert_eq!(dsl, dsl.trim());
            assert!(!dsl.contains("<dsl>"));
        }
        Ok(JobBody::Steps(steps)) => {
            assert!(!text.contains("<dsl>"));
            assert!(!text.contains("</dsl>"));
            for step in &steps {
                assert_eq!(step.as_str(), step.trim());
                assert!(!step.contains("<command>"));
                assert!(!step.contains("</command>"));
            }
        }
        Err(e) => {
            let lines = text.lines().count().max(1);
            assert!(e.line() >= 1 && e.line() <= lines + 1, "{:?}", e);
        }
    }
});
