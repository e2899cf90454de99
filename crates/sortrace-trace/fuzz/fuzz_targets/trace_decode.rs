#![no_main]
use ciborium::de::from_reader;
use libfuzzer_sys::fuzz_target;
use sortrace_core::Replay;
use sortrace_trace::format::TraceFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(tf) = from_reader::<TraceFile, _>(data) {
        // Replay must reject, never panic, on arbitrary envelopes.
        let _ = Replay::new().replay(&tf.initial, &tf.events);
    }
});
