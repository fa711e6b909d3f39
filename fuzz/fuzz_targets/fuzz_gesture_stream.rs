#![no_main]

use libfuzzer_sys::fuzz_target;
use pinboard_core::config::EditorConfig;
use pinboard_web::WebEditorHost;

// Each line of the input is one encoded DOM event; timestamps advance 50ms
// per line.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut host = WebEditorHost::new("fuzz", EditorConfig::default());
    let _ = host.apply_catalog_json(r#"{"products":[],"totalCount":8}"#);
    let _ = host.regions_mut().replace_from_json(
        r#"[{"slot":0,"left":0,"top":0,"width":50,"height":50},
            {"slot":1,"left":50,"top":0,"width":50,"height":50},
            {"slot":2,"left":100,"top":0,"width":50,"height":50},
            {"slot":3,"left":150,"top":0,"width":50,"height":50}]"#,
    );

    for (i, line) in text.lines().enumerate() {
        let _ = host.dispatch_json(line, i as f64 * 50.0);
        assert!(host.editor().board().is_consistent());
        assert_eq!(host.editor().board().len(), 8);
    }
});
